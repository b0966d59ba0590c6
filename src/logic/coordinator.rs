use super::calculations::schedule_for;
use super::{NotificationDispatcher, PlantCatalog};
use crate::config::Config;
use crate::error::Result;
use crate::models::{CareEvent, CareKind, PlantKind, ScheduleCache, UserPreferences};
use crate::platform::{CareCalendar, CareSensor, NotificationSink};
use chrono::{Duration, NaiveDateTime};
use std::collections::BTreeMap;

/// Owns the schedule cache and every entity reading from it.
pub struct CareCoordinator {
    catalog: PlantCatalog,
    preferences: UserPreferences,
    reminder_leads: Vec<u32>,
    notifications_enabled: bool,
    cache: ScheduleCache,
    dispatcher: NotificationDispatcher,
    sensors: Vec<CareSensor>,
    calendars: Vec<CareCalendar>,
}

impl CareCoordinator {
    pub fn new(
        catalog: PlantCatalog,
        preferences: UserPreferences,
        reminder_leads: &[u32],
        notifications_enabled: bool,
    ) -> Self {
        let mut coordinator = Self {
            catalog,
            preferences,
            reminder_leads: reminder_leads.to_vec(),
            notifications_enabled,
            cache: ScheduleCache::default(),
            dispatcher: NotificationDispatcher::new(),
            sensors: Vec::new(),
            calendars: Vec::new(),
        };
        coordinator.build_entities();
        coordinator
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let catalog = PlantCatalog::builtin()?;
        Ok(Self::new(
            catalog,
            config.preferences(),
            config.reminders.active_leads(),
            config.notifications.enabled,
        ))
    }

    /// Replace preferences and entities from a new config. The cache is
    /// emptied until the next refresh; notification history is kept.
    pub fn apply_config(&mut self, config: &Config) {
        self.preferences = config.preferences();
        self.reminder_leads = config.reminders.active_leads().to_vec();
        self.notifications_enabled = config.notifications.enabled;
        self.cache = ScheduleCache::default();
        self.build_entities();
    }

    fn build_entities(&mut self) {
        self.sensors.clear();
        self.calendars.clear();
        let spray_type = self.preferences.spray_type();

        for &plant in &self.preferences.selected_plants {
            let Some(profile) = self.catalog.get(plant) else {
                tracing::warn!("No care profile for {}, skipping", plant.key());
                continue;
            };
            for &kind in CareKind::all() {
                self.sensors.push(CareSensor::new(profile, kind, spray_type));
            }
            self.calendars
                .push(CareCalendar::new(plant, &self.reminder_leads));
        }
        tracing::debug!(
            "Built {} sensors and {} calendars",
            self.sensors.len(),
            self.calendars.len()
        );
    }

    /// Recompute every selected plant's schedule and replace the cache.
    /// Returns the number of plants scheduled.
    pub fn refresh(&mut self, now: NaiveDateTime) -> usize {
        let today = now.date();
        let mut schedules = BTreeMap::new();

        for &plant in &self.preferences.selected_plants {
            match self.catalog.get(plant) {
                Some(profile) => {
                    schedules.insert(plant, schedule_for(profile, &self.preferences, today));
                }
                None => tracing::warn!("No care profile for {}, skipping", plant.key()),
            }
        }

        let count = schedules.len();
        self.cache = ScheduleCache::new(schedules, now);
        tracing::debug!("Refreshed schedules for {} plants", count);
        count
    }

    pub fn cache(&self) -> &ScheduleCache {
        &self.cache
    }

    pub fn catalog(&self) -> &PlantCatalog {
        &self.catalog
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    pub fn sensors(&self) -> &[CareSensor] {
        &self.sensors
    }

    pub fn calendars(&self) -> &[CareCalendar] {
        &self.calendars
    }

    pub fn calendar(&self, plant: PlantKind) -> Option<&CareCalendar> {
        self.calendars.iter().find(|c| c.plant() == plant)
    }

    pub fn dispatcher(&self) -> &NotificationDispatcher {
        &self.dispatcher
    }

    /// Events across all plants, or one plant when given, in `[start, end]`.
    pub fn events_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        plant: Option<PlantKind>,
    ) -> Vec<CareEvent> {
        let mut events: Vec<CareEvent> = self
            .calendars
            .iter()
            .filter(|c| plant.map_or(true, |p| c.plant() == p))
            .flat_map(|c| c.get_events(&self.cache, start, end))
            .collect();
        events.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.summary.cmp(&b.summary)));
        events
    }

    pub fn upcoming_events(&self, now: NaiveDateTime, days: i64) -> Vec<CareEvent> {
        self.events_between(now, now + Duration::days(days), None)
    }

    /// Run one reminder scan. Returns the number of notifications delivered.
    pub fn check_reminders(&mut self, now: NaiveDateTime, sink: &mut dyn NotificationSink) -> usize {
        if !self.notifications_enabled {
            tracing::trace!("Notifications disabled, skipping scan");
            return 0;
        }

        let (start, end) = NotificationDispatcher::scan_window(now);
        let events = self.events_between(start, end, None);
        let delivered = self.dispatcher.check(&events, now, sink);
        if delivered > 0 {
            tracing::info!("Delivered {} care notifications", delivered);
        }
        delivered
    }
}
