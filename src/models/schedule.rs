use super::{PlantKind, SprayType};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CareKind {
    Pruning,
    Spray,
}

impl CareKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CareKind::Pruning => "Pruning",
            CareKind::Spray => "Spray",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            CareKind::Pruning => "pruning",
            CareKind::Spray => "spray",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            CareKind::Pruning => "mdi:content-cut",
            CareKind::Spray => "mdi:spray",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            CareKind::Pruning => Color::Yellow,
            CareKind::Spray => Color::Magenta,
        }
    }

    pub fn all() -> &'static [CareKind] {
        &[CareKind::Pruning, CareKind::Spray]
    }
}

impl std::fmt::Display for CareKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-plant output of one refresh cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedSchedule {
    pub pruning_months: Vec<u32>,
    pub spray_months: Vec<u32>,
    pub spray_products: Vec<String>,
    pub spray_type: SprayType,
    pub next_pruning: Option<NaiveDate>,
    pub next_spray: Option<NaiveDate>,
    pub care_notes: String,
}

impl DerivedSchedule {
    pub fn months(&self, kind: CareKind) -> &[u32] {
        match kind {
            CareKind::Pruning => &self.pruning_months,
            CareKind::Spray => &self.spray_months,
        }
    }

    pub fn next(&self, kind: CareKind) -> Option<NaiveDate> {
        match kind {
            CareKind::Pruning => self.next_pruning,
            CareKind::Spray => self.next_spray,
        }
    }
}

/// Schedules keyed by plant. Replaced wholesale on every refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleCache {
    schedules: BTreeMap<PlantKind, DerivedSchedule>,
    computed_at: Option<NaiveDateTime>,
}

impl ScheduleCache {
    pub fn new(schedules: BTreeMap<PlantKind, DerivedSchedule>, computed_at: NaiveDateTime) -> Self {
        Self {
            schedules,
            computed_at: Some(computed_at),
        }
    }

    pub fn get(&self, plant: PlantKind) -> Option<&DerivedSchedule> {
        self.schedules.get(&plant)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlantKind, &DerivedSchedule)> {
        self.schedules.iter()
    }

    pub fn computed_at(&self) -> Option<NaiveDateTime> {
        self.computed_at
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }
}
