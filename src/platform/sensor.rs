use super::{DeviceInfo, DOMAIN};
use crate::logic::calculations::days_until;
use crate::models::{CareKind, PlantKind, PlantProfile, ScheduleCache, SprayType};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::{json, Map, Value};

pub const NOT_SCHEDULED: &str = "Not scheduled";

/// Upcoming dates within this many days render as a countdown.
const COUNTDOWN_DAYS: i64 = 30;

/// Snapshot of a sensor as published to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorState {
    pub unique_id: String,
    pub name: String,
    pub icon: &'static str,
    pub value: String,
    pub attributes: Map<String, Value>,
    pub device: DeviceInfo,
}

/// Next pruning or spray date for one plant.
#[derive(Debug, Clone)]
pub struct CareSensor {
    plant: PlantKind,
    kind: CareKind,
    spray_type: SprayType,
    care_notes: String,
}

impl CareSensor {
    pub fn new(profile: &PlantProfile, kind: CareKind, spray_type: SprayType) -> Self {
        Self {
            plant: profile.kind,
            kind,
            spray_type,
            care_notes: profile.care_notes.clone(),
        }
    }

    pub fn plant(&self) -> PlantKind {
        self.plant
    }

    pub fn kind(&self) -> CareKind {
        self.kind
    }

    pub fn unique_id(&self) -> String {
        format!("{}_{}_{}", DOMAIN, self.plant.key(), self.kind.key())
    }

    pub fn name(&self) -> String {
        format!("{} {}", self.plant.as_str(), self.kind.as_str())
    }

    pub fn icon(&self) -> &'static str {
        self.kind.icon()
    }

    pub fn device_info(&self) -> DeviceInfo {
        DeviceInfo::for_plant(self.plant)
    }

    pub fn next_date(&self, cache: &ScheduleCache) -> Option<NaiveDate> {
        cache.get(self.plant).and_then(|s| s.next(self.kind))
    }

    pub fn native_value(&self, cache: &ScheduleCache, now: NaiveDateTime) -> String {
        format_next(self.next_date(cache), now)
    }

    pub fn attributes(&self, cache: &ScheduleCache) -> Map<String, Value> {
        let schedule = cache.get(self.plant);
        let months: Vec<u32> = schedule
            .map(|s| s.months(self.kind).to_vec())
            .unwrap_or_default();
        let next = self
            .next_date(cache)
            .map(|d| Value::String(d.format("%Y-%m-%d").to_string()))
            .unwrap_or(Value::Null);

        let mut attrs = Map::new();
        match self.kind {
            CareKind::Pruning => {
                attrs.insert("pruning_months".into(), json!(months));
                attrs.insert("next_pruning_date".into(), next);
            }
            CareKind::Spray => {
                let products: Vec<String> = schedule
                    .map(|s| s.spray_products.clone())
                    .unwrap_or_default();
                attrs.insert("spray_months".into(), json!(months));
                attrs.insert("next_spray_date".into(), next);
                attrs.insert("spray_products".into(), json!(products));
                attrs.insert("spray_type".into(), json!(self.spray_type.key()));
            }
        }
        attrs.insert("care_notes".into(), json!(self.care_notes));
        attrs.insert("plant_type".into(), json!(self.plant.as_str()));
        attrs
    }

    pub fn state(&self, cache: &ScheduleCache, now: NaiveDateTime) -> SensorState {
        SensorState {
            unique_id: self.unique_id(),
            name: self.name(),
            icon: self.icon(),
            value: self.native_value(cache, now),
            attributes: self.attributes(cache),
            device: self.device_info(),
        }
    }
}

/// "Now", "In N days", "<Month> <Year>" or "Not scheduled".
pub fn format_next(next: Option<NaiveDate>, now: NaiveDateTime) -> String {
    let Some(next) = next else {
        return NOT_SCHEDULED.to_string();
    };

    let days = days_until(next, now);
    if days <= 0 {
        "Now".to_string()
    } else if days <= COUNTDOWN_DAYS {
        format!("In {} days", days)
    } else {
        next.format("%B %Y").to_string()
    }
}
