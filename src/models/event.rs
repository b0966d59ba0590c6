use super::{CareKind, PlantKind};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareEvent {
    pub plant: PlantKind,
    pub kind: CareKind,
    /// Days ahead of the care date this reminder fires; `None` for the care
    /// event itself.
    pub reminder_lead_days: Option<u32>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub summary: String,
    pub description: String,
}

impl CareEvent {
    pub fn is_primary(&self) -> bool {
        self.reminder_lead_days.is_none()
    }

    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }
}
