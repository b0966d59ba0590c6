pub mod calendar;
pub mod notify;
pub mod sensor;

pub use calendar::{CalendarEntityState, CareCalendar};
pub use notify::{LogSink, MemorySink, NotificationSink};
pub use sensor::{CareSensor, SensorState};

use crate::models::PlantKind;
use serde::Serialize;

pub const DOMAIN: &str = "orchard_care";

/// Device grouping shared by every entity of one plant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub identifiers: Vec<(String, String)>,
    pub name: String,
    pub manufacturer: &'static str,
    pub model: &'static str,
}

impl DeviceInfo {
    pub fn for_plant(plant: PlantKind) -> Self {
        Self {
            identifiers: vec![(DOMAIN.to_string(), plant.key().to_string())],
            name: plant.as_str().to_string(),
            manufacturer: "Orchard Care",
            model: "Fruit Tree/Berry Care",
        }
    }
}
