use super::CareActivity;
use crate::models::{CareKind, DerivedSchedule, PlantKind};
use chrono::Duration;

/// Pruning is placed mid-month and blocks out two hours.
pub struct PruningActivity;

impl CareActivity for PruningActivity {
    fn kind(&self) -> CareKind {
        CareKind::Pruning
    }

    fn anchor_day(&self) -> u32 {
        15
    }

    fn duration(&self) -> Duration {
        Duration::hours(2)
    }

    fn summary(&self, plant: PlantKind) -> String {
        format!("Prune {}", plant.as_str())
    }

    fn description(&self, plant: PlantKind, schedule: &DerivedSchedule) -> String {
        format!("Pruning time for {}. {}", plant.as_str(), schedule.care_notes)
    }
}
