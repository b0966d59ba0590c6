pub mod engine;
pub mod pruning;
pub mod spray;

pub use engine::EventGenerator;

use crate::models::{CareKind, DerivedSchedule, PlantKind};
use chrono::Duration;

/// A recurring care task placed once per scheduled month.
pub trait CareActivity: Send + Sync {
    fn kind(&self) -> CareKind;

    /// Day of the month the task is placed on.
    fn anchor_day(&self) -> u32;

    fn duration(&self) -> Duration;

    fn summary(&self, plant: PlantKind) -> String;

    fn description(&self, plant: PlantKind, schedule: &DerivedSchedule) -> String;

    fn months<'a>(&self, schedule: &'a DerivedSchedule) -> &'a [u32] {
        schedule.months(self.kind())
    }
}
