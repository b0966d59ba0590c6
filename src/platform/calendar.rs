use super::{DeviceInfo, DOMAIN};
use crate::logic::EventGenerator;
use crate::models::{CareEvent, PlantKind, ScheduleCache};
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

/// Snapshot of a calendar entity as published to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEntityState {
    pub unique_id: String,
    pub name: String,
    pub device: DeviceInfo,
    pub event: Option<CareEvent>,
}

/// Calendar entity exposing one plant's care events.
pub struct CareCalendar {
    plant: PlantKind,
    generator: EventGenerator,
}

impl CareCalendar {
    pub fn new(plant: PlantKind, reminder_leads: &[u32]) -> Self {
        Self {
            plant,
            generator: EventGenerator::new().with_reminders(reminder_leads),
        }
    }

    pub fn plant(&self) -> PlantKind {
        self.plant
    }

    pub fn unique_id(&self) -> String {
        format!("{}_{}_calendar", DOMAIN, self.plant.key())
    }

    pub fn name(&self) -> String {
        format!("{} Care Calendar", self.plant.as_str())
    }

    pub fn device_info(&self) -> DeviceInfo {
        DeviceInfo::for_plant(self.plant)
    }

    /// First event starting within a day of `now`.
    pub fn event(&self, cache: &ScheduleCache, now: NaiveDateTime) -> Option<CareEvent> {
        self.get_events(cache, now, now + Duration::days(1))
            .into_iter()
            .next()
    }

    pub fn state(&self, cache: &ScheduleCache, now: NaiveDateTime) -> CalendarEntityState {
        CalendarEntityState {
            unique_id: self.unique_id(),
            name: self.name(),
            device: self.device_info(),
            event: self.event(cache, now),
        }
    }

    /// All events in `[start, end]`; empty until the plant has a schedule.
    pub fn get_events(
        &self,
        cache: &ScheduleCache,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Vec<CareEvent> {
        match cache.get(self.plant) {
            Some(schedule) => self.generator.generate(self.plant, schedule, start, end),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{calculations::compute_schedule, PlantCatalog};
    use crate::models::{CareKind, Hemisphere};
    use chrono::{NaiveDate, NaiveTime};
    use std::collections::BTreeMap;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::MIN)
    }

    fn cache_with(plant: PlantKind, today: NaiveDate) -> ScheduleCache {
        let catalog = PlantCatalog::builtin().unwrap();
        let schedule = compute_schedule(
            catalog.get(plant).unwrap(),
            Hemisphere::Northern,
            true,
            today,
        );
        let mut map = BTreeMap::new();
        map.insert(plant, schedule);
        ScheduleCache::new(map, today.and_time(NaiveTime::MIN))
    }

    #[test]
    fn entity_identity() {
        let calendar = CareCalendar::new(PlantKind::Orange, &[]);
        assert_eq!(calendar.unique_id(), "orchard_care_citrus_orange_calendar");
        assert_eq!(calendar.name(), "Orange Tree Care Calendar");
        assert_eq!(calendar.device_info().manufacturer, "Orchard Care");
    }

    #[test]
    fn current_event_within_a_day() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 14).unwrap();
        let cache = cache_with(PlantKind::Apple, today);
        let calendar = CareCalendar::new(PlantKind::Apple, &[]);

        let event = calendar
            .event(&cache, at(2024, 1, 14) + Duration::hours(6))
            .expect("pruning tomorrow");
        assert_eq!(event.kind, CareKind::Pruning);
        assert_eq!(event.start, at(2024, 1, 15));

        assert!(calendar.event(&cache, at(2024, 1, 20)).is_none());
    }

    #[test]
    fn state_carries_device_and_current_event() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 14).unwrap();
        let cache = cache_with(PlantKind::Apple, today);
        let calendar = CareCalendar::new(PlantKind::Apple, &[]);

        let state = calendar.state(&cache, at(2024, 1, 14) + Duration::hours(6));
        assert_eq!(state.unique_id, "orchard_care_apple_calendar");
        assert_eq!(state.device.name, "Apple Tree");
        assert_eq!(state.event.map(|e| e.start), Some(at(2024, 1, 15)));
    }

    #[test]
    fn no_schedule_means_no_events() {
        let calendar = CareCalendar::new(PlantKind::Fig, &[7, 3]);
        let cache = ScheduleCache::default();
        assert!(calendar
            .get_events(&cache, at(2024, 1, 1), at(2025, 1, 1))
            .is_empty());
        assert!(calendar.event(&cache, at(2024, 1, 1)).is_none());
    }

    #[test]
    fn events_include_reminders_when_configured() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let cache = cache_with(PlantKind::Apple, today);
        let calendar = CareCalendar::new(PlantKind::Apple, &[7, 3]);

        let events = calendar.get_events(&cache, at(2024, 1, 1), at(2024, 1, 31));
        let reminders = events.iter().filter(|e| !e.is_primary()).count();
        assert_eq!(reminders, 2);
        assert_eq!(events.last().unwrap().start, at(2024, 1, 15));
    }
}
