use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrchardCareError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unknown plant: {0}")]
    UnknownPlantKey(String),

    #[error("Invalid month {month} for {plant}")]
    InvalidMonthValue { plant: String, month: u32 },

    #[error("Invalid plant catalog: {0}")]
    InvalidCatalog(String),

    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, OrchardCareError>;
