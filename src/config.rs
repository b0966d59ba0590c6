use crate::error::{OrchardCareError, Result};
use crate::logic::activities::engine::DEFAULT_REMINDER_LEADS;
use crate::models::{Hemisphere, PlantKind, UserPreferences};
use dialoguer::{Confirm, Input, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    pub orchard: OrchardConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub reminders: ReminderConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OrchardConfig {
    #[serde(default)]
    pub hemisphere: Hemisphere,
    #[serde(default = "default_true")]
    pub organic_preference: bool,
    #[serde(default)]
    pub selected_plants: Vec<String>,
    /// Free-form notes about plants outside the catalog. Not scheduled.
    #[serde(default)]
    pub custom_plants: String,
}

impl Default for OrchardConfig {
    fn default() -> Self {
        Self {
            hemisphere: Hemisphere::Northern,
            organic_preference: true,
            selected_plants: Vec::new(),
            custom_plants: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_interval")]
    pub refresh_interval_minutes: u32,
    #[serde(default = "default_interval")]
    pub reminder_interval_minutes: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            refresh_interval_minutes: default_interval(),
            reminder_interval_minutes: default_interval(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReminderConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_lead_days")]
    pub lead_days: Vec<u32>,
}

impl ReminderConfig {
    /// Lead times to place on the calendar, empty when disabled.
    pub fn active_leads(&self) -> &[u32] {
        if self.enabled {
            &self.lead_days
        } else {
            &[]
        }
    }
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            lead_days: default_lead_days(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NotificationConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_true() -> bool {
    true
}

fn default_interval() -> u32 {
    60
}

fn default_lead_days() -> Vec<u32> {
    DEFAULT_REMINDER_LEADS.to_vec()
}

impl Config {
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Err(OrchardCareError::Config(format!(
                "Config file not found at {:?}. Run `orchardcare init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(config_path)
            .map_err(|e| OrchardCareError::Config(format!("Failed to read config: {}", e)))?;

        Self::parse(&config_str)
    }

    pub fn parse(content: &str) -> Result<Self> {
        // Substitute environment variables
        let content = Self::substitute_env_vars(content);

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| OrchardCareError::Config(format!("Failed to parse config: {}", e)))?;

        for warning in config.validate() {
            tracing::warn!("{}", warning);
        }

        Ok(config)
    }

    /// Explicit path if given, otherwise the first existing standard
    /// location, otherwise the XDG default.
    pub fn resolve_path(config_override: Option<PathBuf>) -> Result<PathBuf> {
        match config_override {
            Some(p) => Ok(p),
            None => Self::find_config_path(),
        }
    }

    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("orchardcare").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        Self::default_config_path()
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/orchardcare/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| OrchardCareError::Config("Cannot determine config directory".into()))?
            .join("orchardcare");
        Ok(config_dir.join("config.yaml"))
    }

    /// Problems worth reporting that do not prevent running.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for key in &self.orchard.selected_plants {
            if PlantKind::from_key(key).is_none() {
                warnings.push(format!("Unknown plant '{}' will be ignored", key));
            }
        }
        if self.orchard.selected_plants.is_empty() {
            warnings.push("No plants selected - nothing will be scheduled".to_string());
        }
        if self.schedule.refresh_interval_minutes == 0 {
            warnings.push("refresh_interval_minutes is 0; using 1 minute".to_string());
        }
        if self.schedule.reminder_interval_minutes == 0 {
            warnings.push("reminder_interval_minutes is 0; using 1 minute".to_string());
        }
        if !self.orchard.custom_plants.trim().is_empty() {
            tracing::debug!("Custom plants are recorded but not scheduled");
        }

        warnings
    }

    pub fn preferences(&self) -> UserPreferences {
        UserPreferences::from_keys(
            self.orchard.hemisphere,
            self.orchard.organic_preference,
            &self.orchard.selected_plants,
        )
    }

    /// Store preferences edited at runtime back into the config.
    pub fn apply_preferences(&mut self, prefs: &UserPreferences) {
        self.orchard.hemisphere = prefs.hemisphere;
        self.orchard.organic_preference = prefs.organic_preference;
        self.orchard.selected_plants = prefs
            .selected_plants
            .iter()
            .map(|p| p.key().to_string())
            .collect();
    }

    pub fn refresh_interval(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.schedule.refresh_interval_minutes.max(1)))
    }

    pub fn reminder_interval(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.schedule.reminder_interval_minutes.max(1)))
    }

    pub fn save(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let yaml = serde_yaml::to_string(self)?;
        let content = format!(
            "# Orchard Care Configuration\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(config_path, content)?;
        tracing::info!("Configuration saved to {}", config_path.display());
        Ok(())
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive(config_override: Option<PathBuf>) -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up Orchard Care!");
        println!();

        let hemispheres = [Hemisphere::Northern, Hemisphere::Southern];
        let hemisphere_idx = Select::new()
            .with_prompt("  Hemisphere")
            .items(&hemispheres.iter().map(|h| h.as_str()).collect::<Vec<_>>())
            .default(0)
            .interact()
            .map_err(|e| OrchardCareError::Config(format!("Input error: {}", e)))?;

        let organic_preference = Confirm::new()
            .with_prompt("  Prefer organic spray products?")
            .default(true)
            .interact()
            .map_err(|e| OrchardCareError::Config(format!("Input error: {}", e)))?;

        println!();
        let plant_labels: Vec<&str> = PlantKind::all().iter().map(|p| p.as_str()).collect();
        let chosen = MultiSelect::new()
            .with_prompt("  Plants in your orchard (space to toggle, enter to confirm)")
            .items(&plant_labels)
            .interact()
            .map_err(|e| OrchardCareError::Config(format!("Input error: {}", e)))?;

        let custom_plants: String = Input::new()
            .with_prompt("  Other plants (notes only)")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| OrchardCareError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            orchard: OrchardConfig {
                hemisphere: hemispheres[hemisphere_idx],
                organic_preference,
                selected_plants: chosen
                    .into_iter()
                    .map(|i| PlantKind::all()[i].key().to_string())
                    .collect(),
                custom_plants,
            },
            ..Config::default()
        };

        let config_path = match config_override {
            Some(p) => p,
            None => Self::default_config_path()?,
        };
        config.save(&config_path)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}
