use super::CareActivity;
use crate::models::{CareKind, DerivedSchedule, PlantKind};
use chrono::Duration;

/// Products named in a spray event description.
const LISTED_PRODUCTS: usize = 3;

/// Spray treatment on the first of the month, one hour.
pub struct SprayActivity;

impl CareActivity for SprayActivity {
    fn kind(&self) -> CareKind {
        CareKind::Spray
    }

    fn anchor_day(&self) -> u32 {
        1
    }

    fn duration(&self) -> Duration {
        Duration::hours(1)
    }

    fn summary(&self, plant: PlantKind) -> String {
        format!("Spray {}", plant.as_str())
    }

    fn description(&self, _plant: PlantKind, schedule: &DerivedSchedule) -> String {
        let products = if schedule.spray_products.is_empty() {
            "See care guide".to_string()
        } else {
            schedule
                .spray_products
                .iter()
                .take(LISTED_PRODUCTS)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        };

        format!(
            "{} spray treatment. Recommended products: {}",
            schedule.spray_type, products
        )
    }
}
