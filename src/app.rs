use crate::config::Config;
use crate::error::Result;
use crate::logic::{CareCoordinator, Integration, TimerKind};
use crate::models::{CareEvent, PlantKind, UserPreferences};
use crate::platform::MemorySink;
use crate::ui::screens::SettingsField;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Calendar,
    Plants,
    Notifications,
    Settings,
}

impl Screen {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Screen::Dashboard),
            '2' => Some(Screen::Calendar),
            '3' => Some(Screen::Plants),
            '4' => Some(Screen::Notifications),
            's' | 'S' => Some(Screen::Settings),
            _ => None,
        }
    }
}

pub struct CalendarState {
    pub year: i32,
    pub month: u32,
    pub selected_date: Option<NaiveDate>,
}

impl CalendarState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            year: today.year(),
            month: today.month(),
            selected_date: Some(today),
        }
    }

    pub fn prev_month(&mut self) {
        if self.month == 1 {
            self.month = 12;
            self.year -= 1;
        } else {
            self.month -= 1;
        }
        self.clamp_selection();
    }

    pub fn next_month(&mut self) {
        if self.month == 12 {
            self.month = 1;
            self.year += 1;
        } else {
            self.month += 1;
        }
        self.clamp_selection();
    }

    pub fn prev_day(&mut self) {
        self.shift_day(-1);
    }

    pub fn next_day(&mut self) {
        self.shift_day(1);
    }

    fn shift_day(&mut self, days: i64) {
        let Some(current) = self.selected_date.or_else(|| self.first_of_month()) else {
            return;
        };
        let date = current + Duration::days(days);
        self.year = date.year();
        self.month = date.month();
        self.selected_date = Some(date);
    }

    // Keep the selection inside the displayed month
    fn clamp_selection(&mut self) {
        let day = self.selected_date.map(|d| d.day()).unwrap_or(1);
        self.selected_date = (1..=day)
            .rev()
            .find_map(|d| NaiveDate::from_ymd_opt(self.year, self.month, d));
    }

    fn first_of_month(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// `[first day 00:00, last day 23:59:59]` of the displayed month.
    pub fn month_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let first = self.first_of_month()?;
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)?
        };
        Some((
            first.and_time(NaiveTime::MIN),
            next.and_time(NaiveTime::MIN) - Duration::seconds(1),
        ))
    }
}

pub struct PlantsState {
    pub selected_index: usize,
}

impl PlantsState {
    pub fn new() -> Self {
        Self { selected_index: 0 }
    }

    pub fn next(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }
}

pub struct SettingsState {
    pub focused_field: SettingsField,
    pub draft: UserPreferences,
    pub modified: bool,
}

impl SettingsState {
    pub fn new(preferences: UserPreferences) -> Self {
        Self {
            focused_field: SettingsField::Hemisphere,
            draft: preferences,
            modified: false,
        }
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
    }

    /// Flip the focused setting in the draft.
    pub fn toggle(&mut self) {
        match self.focused_field {
            SettingsField::Hemisphere => {
                self.draft.hemisphere = self.draft.hemisphere.toggled();
            }
            SettingsField::Organic => {
                self.draft.organic_preference = !self.draft.organic_preference;
            }
            SettingsField::Plant(kind) => {
                self.draft.toggle(kind);
            }
        }
        self.modified = true;
    }

    pub fn reset(&mut self, preferences: UserPreferences) {
        self.draft = preferences;
        self.modified = false;
    }
}

pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    pub config: Config,
    pub config_path: PathBuf,
    pub now: NaiveDateTime,

    // Services
    pub integration: Integration,
    pub notifications: MemorySink,

    // Screen states
    pub calendar_state: CalendarState,
    pub plants_state: PlantsState,
    pub settings_state: SettingsState,

    // UI state
    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: Config, config_path: PathBuf, now: NaiveDateTime) -> Result<Self> {
        let mut integration = Integration::new();
        integration.initialize(&config, now)?;
        let preferences = config.preferences();

        Ok(Self {
            screen: Screen::Dashboard,
            should_quit: false,
            config,
            config_path,
            now,
            integration,
            notifications: MemorySink::default(),
            calendar_state: CalendarState::new(now.date()),
            plants_state: PlantsState::new(),
            settings_state: SettingsState::new(preferences),
            status_message: None,
        })
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn coordinator(&self) -> Option<&CareCoordinator> {
        self.integration.coordinator()
    }

    /// Advance the clock and run whatever timers came due.
    pub fn tick(&mut self, now: NaiveDateTime) -> Result<()> {
        self.now = now;
        let before = self.notifications.len();
        let ran = self.integration.tick(now, &mut self.notifications)?;
        if !ran.is_empty() {
            tracing::debug!("Ran timers: {:?}", ran);
        }
        let new = self.notifications.len() - before;
        if new > 0 {
            self.set_status(&format!("{} new care notification(s)", new));
        }
        Ok(())
    }

    /// Run both timer callbacks immediately.
    pub fn refresh_now(&mut self) -> Result<()> {
        self.integration
            .run_timer(TimerKind::ScheduleRefresh, self.now, &mut self.notifications)?;
        self.integration
            .run_timer(TimerKind::ReminderScan, self.now, &mut self.notifications)?;
        self.set_status("Schedules refreshed");
        Ok(())
    }

    /// Write the settings draft to the config file and reconfigure.
    pub fn save_settings(&mut self) -> Result<()> {
        let mut updated = self.config.clone();
        updated.apply_preferences(&self.settings_state.draft);
        updated.save(&self.config_path)?;
        self.integration.reconfigure(&updated, self.now)?;
        self.config = updated;
        self.settings_state.modified = false;

        let selected = self.settings_state.draft.selected_plants.len();
        let max = self.plant_rows().len();
        if self.plants_state.selected_index >= max {
            self.plants_state.selected_index = max.saturating_sub(1);
        }
        self.set_status(&format!("Settings saved - {} plants scheduled", selected));
        Ok(())
    }

    pub fn discard_settings(&mut self) {
        let current = self.config.preferences();
        self.settings_state.reset(current);
    }

    /// Selected plants that have a schedule, in selection order.
    pub fn plant_rows(&self) -> Vec<PlantKind> {
        self.coordinator()
            .map(|c| {
                c.preferences()
                    .selected_plants
                    .iter()
                    .copied()
                    .filter(|&p| c.cache().get(p).is_some())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn month_events(&self) -> Vec<CareEvent> {
        match (self.coordinator(), self.calendar_state.month_range()) {
            (Some(c), Some((start, end))) => c.events_between(start, end, None),
            _ => Vec::new(),
        }
    }

    pub fn upcoming_events(&self, days: i64) -> Vec<CareEvent> {
        self.coordinator()
            .map(|c| c.upcoming_events(self.now, days))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_navigation_wraps_years_and_clamps_day() {
        let mut cal = CalendarState::new(date(2024, 1, 31));
        cal.prev_month();
        assert_eq!((cal.year, cal.month), (2023, 12));
        assert_eq!(cal.selected_date, Some(date(2023, 12, 31)));

        cal.next_month();
        cal.next_month();
        assert_eq!((cal.year, cal.month), (2024, 2));
        assert_eq!(cal.selected_date, Some(date(2024, 2, 29)));
    }

    #[test]
    fn day_selection_crosses_months() {
        let mut cal = CalendarState::new(date(2024, 3, 31));
        cal.next_day();
        assert_eq!((cal.year, cal.month), (2024, 4));
        assert_eq!(cal.selected_date, Some(date(2024, 4, 1)));
        cal.prev_day();
        assert_eq!(cal.month, 3);
    }

    #[test]
    fn month_range_covers_whole_month() {
        let cal = CalendarState::new(date(2024, 12, 5));
        let (start, end) = cal.month_range().unwrap();
        assert_eq!(start, date(2024, 12, 1).and_time(NaiveTime::MIN));
        assert_eq!(end, date(2024, 12, 31).and_hms_opt(23, 59, 59).unwrap());
    }

    #[test]
    fn settings_toggle_edits_draft_only() {
        let prefs = UserPreferences::default().with_plant(PlantKind::Apple);
        let mut settings = SettingsState::new(prefs.clone());

        settings.toggle();
        assert_eq!(settings.draft.hemisphere, crate::models::Hemisphere::Southern);
        settings.next_field();
        settings.toggle();
        assert!(!settings.draft.organic_preference);
        settings.next_field();
        settings.toggle();
        assert!(!settings.draft.is_selected(PlantKind::Apple));
        assert!(settings.modified);

        settings.reset(prefs.clone());
        assert_eq!(settings.draft, prefs);
        assert!(!settings.modified);
    }

    #[test]
    fn save_settings_writes_and_reconfigures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut config = Config::default();
        config.orchard.selected_plants = vec!["apple".into()];
        let now = date(2024, 3, 1).and_time(NaiveTime::MIN);

        let mut app = App::new(config, path.clone(), now).unwrap();
        assert_eq!(app.plant_rows(), vec![PlantKind::Apple]);

        app.settings_state.draft.select(PlantKind::Fig);
        app.save_settings().unwrap();

        assert_eq!(app.plant_rows(), vec![PlantKind::Apple, PlantKind::Fig]);
        let saved = Config::load_from(&path).unwrap();
        assert_eq!(saved.orchard.selected_plants, vec!["apple", "fig"]);
    }

    #[test]
    fn refresh_sets_status_until_cleared() {
        let mut config = Config::default();
        config.orchard.selected_plants = vec!["apple".into()];
        let now = date(2024, 3, 1).and_time(NaiveTime::MIN);
        let mut app = App::new(config, PathBuf::from("unused.yaml"), now).unwrap();

        app.refresh_now().unwrap();
        assert_eq!(app.status_message.as_deref(), Some("Schedules refreshed"));
        app.clear_status();
        assert!(app.status_message.is_none());
    }

    #[test]
    fn failed_save_leaves_config_and_schedules_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let path = blocker.join("config.yaml");
        let mut config = Config::default();
        config.orchard.selected_plants = vec!["apple".into()];
        let now = date(2024, 3, 1).and_time(NaiveTime::MIN);

        let mut app = App::new(config, path, now).unwrap();
        app.settings_state.draft.select(PlantKind::Pear);
        app.settings_state.modified = true;

        assert!(app.save_settings().is_err());
        assert_eq!(app.config.orchard.selected_plants, vec!["apple"]);
        assert_eq!(app.plant_rows(), vec![PlantKind::Apple]);
        assert!(app.settings_state.modified);

        app.discard_settings();
        assert_eq!(app.settings_state.draft.selected_plants, vec![PlantKind::Apple]);
    }
}
