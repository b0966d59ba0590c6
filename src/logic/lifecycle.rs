use super::timers::{TimerKind, TimerRegistry};
use super::CareCoordinator;
use crate::config::Config;
use crate::error::{OrchardCareError, Result};
use crate::platform::NotificationSink;
use chrono::NaiveDateTime;

pub enum LifecycleState {
    Uninitialized,
    Active(Box<CareCoordinator>),
    TornDown,
}

impl LifecycleState {
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleState::Uninitialized => "uninitialized",
            LifecycleState::Active(_) => "active",
            LifecycleState::TornDown => "torn down",
        }
    }
}

/// One configured orchard: its coordinator and the timers driving it.
pub struct Integration {
    state: LifecycleState,
    timers: TimerRegistry,
}

impl Integration {
    pub fn new() -> Self {
        Self {
            state: LifecycleState::Uninitialized,
            timers: TimerRegistry::new(),
        }
    }

    /// Validate the catalog, compute the first schedules and start both timers.
    pub fn initialize(&mut self, config: &Config, now: NaiveDateTime) -> Result<()> {
        if !matches!(self.state, LifecycleState::Uninitialized) {
            return Err(self.invalid("initialize"));
        }

        let mut coordinator = CareCoordinator::from_config(config)?;
        let scheduled = coordinator.refresh(now);
        self.register_timers(config, now);
        self.state = LifecycleState::Active(Box::new(coordinator));

        tracing::info!("Orchard care active for {} plants", scheduled);
        Ok(())
    }

    /// Swap in new preferences and recompute. Sent notifications are remembered.
    pub fn reconfigure(&mut self, config: &Config, now: NaiveDateTime) -> Result<()> {
        let scheduled = match &mut self.state {
            LifecycleState::Active(coordinator) => {
                coordinator.apply_config(config);
                coordinator.refresh(now)
            }
            _ => return Err(self.invalid("reconfigure")),
        };
        self.register_timers(config, now);

        tracing::info!("Reconfigured orchard care for {} plants", scheduled);
        Ok(())
    }

    pub fn teardown(&mut self) -> Result<()> {
        if !matches!(self.state, LifecycleState::Active(_)) {
            return Err(self.invalid("teardown"));
        }

        self.timers.clear();
        self.state = LifecycleState::TornDown;
        tracing::info!("Orchard care torn down");
        Ok(())
    }

    /// Initialize, hand the coordinator to `f`, then tear down whether or
    /// not `f` succeeded.
    pub fn run_once<T>(
        &mut self,
        config: &Config,
        now: NaiveDateTime,
        f: impl FnOnce(&CareCoordinator) -> Result<T>,
    ) -> Result<T> {
        self.initialize(config, now)?;
        let result = match self.coordinator() {
            Some(coordinator) => f(coordinator),
            None => Err(self.invalid("run")),
        };
        self.teardown()?;
        result
    }

    /// Run every timer due at `now`. Returns the kinds that ran.
    pub fn tick(
        &mut self,
        now: NaiveDateTime,
        sink: &mut dyn NotificationSink,
    ) -> Result<Vec<TimerKind>> {
        if !matches!(self.state, LifecycleState::Active(_)) {
            return Err(self.invalid("tick"));
        }

        let due = self.timers.due(now);
        for &kind in &due {
            self.run_timer(kind, now, sink)?;
        }
        Ok(due)
    }

    /// Run one timer callback directly.
    pub fn run_timer(
        &mut self,
        kind: TimerKind,
        now: NaiveDateTime,
        sink: &mut dyn NotificationSink,
    ) -> Result<()> {
        let state_name = self.state.name();
        let LifecycleState::Active(coordinator) = &mut self.state else {
            return Err(OrchardCareError::InvalidTransition {
                action: "run timers",
                state: state_name,
            });
        };

        tracing::trace!("Running {}", kind);
        match kind {
            TimerKind::ScheduleRefresh => {
                coordinator.refresh(now);
            }
            TimerKind::ReminderScan => {
                coordinator.check_reminders(now, sink);
            }
        }
        Ok(())
    }

    pub fn coordinator(&self) -> Option<&CareCoordinator> {
        match &self.state {
            LifecycleState::Active(coordinator) => Some(coordinator.as_ref()),
            _ => None,
        }
    }

    pub fn timers(&self) -> &TimerRegistry {
        &self.timers
    }

    pub fn state_name(&self) -> &'static str {
        self.state.name()
    }

    fn register_timers(&mut self, config: &Config, now: NaiveDateTime) {
        self.timers
            .register(TimerKind::ScheduleRefresh, config.refresh_interval(), now);
        self.timers
            .register(TimerKind::ReminderScan, config.reminder_interval(), now);
    }

    fn invalid(&self, action: &'static str) -> OrchardCareError {
        OrchardCareError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }
}

impl Default for Integration {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CareKind, PlantKind};
    use crate::platform::MemorySink;
    use chrono::{Duration, NaiveDate, NaiveTime};

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::MIN)
    }

    fn config(plants: &[&str]) -> Config {
        let mut config = Config::default();
        config.orchard.selected_plants = plants.iter().map(|p| p.to_string()).collect();
        config
    }

    #[test]
    fn initialize_computes_immediately() {
        let mut integration = Integration::new();
        integration
            .initialize(&config(&["apple", "pear"]), at(2024, 3, 1))
            .unwrap();

        assert_eq!(integration.state_name(), "active");
        let coordinator = integration.coordinator().unwrap();
        assert_eq!(coordinator.cache().len(), 2);
        assert_eq!(coordinator.sensors().len(), 4);
        assert_eq!(integration.timers().len(), 2);
    }

    #[test]
    fn unknown_plants_do_not_block_startup() {
        let mut integration = Integration::new();
        integration
            .initialize(&config(&["apple", "durian"]), at(2024, 3, 1))
            .unwrap();
        assert_eq!(integration.coordinator().unwrap().cache().len(), 1);
    }

    #[test]
    fn run_once_tears_down_after_failure() {
        let mut integration = Integration::new();
        let plants = integration
            .run_once(&config(&["apple", "pear"]), at(2024, 3, 1), |c| {
                Ok(c.cache().len())
            })
            .unwrap();
        assert_eq!(plants, 2);
        assert_eq!(integration.state_name(), "torn down");

        let mut integration = Integration::new();
        let err = integration
            .run_once(&config(&["apple"]), at(2024, 3, 1), |_| -> Result<()> {
                Err(OrchardCareError::NotFound("report".into()))
            })
            .unwrap_err();
        assert!(matches!(err, OrchardCareError::NotFound(_)));
        assert_eq!(integration.state_name(), "torn down");
        assert_eq!(integration.timers().len(), 0);
    }

    #[test]
    fn reconfigure_requires_active() {
        let mut integration = Integration::new();
        let err = integration
            .reconfigure(&config(&["apple"]), at(2024, 3, 1))
            .unwrap_err();
        assert!(matches!(
            err,
            OrchardCareError::InvalidTransition {
                action: "reconfigure",
                state: "uninitialized"
            }
        ));
    }

    #[test]
    fn teardown_is_terminal() {
        let mut integration = Integration::new();
        assert!(integration.teardown().is_err());

        integration
            .initialize(&config(&["apple"]), at(2024, 3, 1))
            .unwrap();
        integration.teardown().unwrap();
        assert_eq!(integration.state_name(), "torn down");
        assert!(integration.coordinator().is_none());
        assert_eq!(integration.timers().len(), 0);

        assert!(integration.teardown().is_err());
        assert!(integration
            .initialize(&config(&["apple"]), at(2024, 3, 1))
            .is_err());
        assert!(integration
            .reconfigure(&config(&["apple"]), at(2024, 3, 1))
            .is_err());
        let mut sink = MemorySink::default();
        assert!(integration.tick(at(2024, 3, 2), &mut sink).is_err());
    }

    #[test]
    fn double_initialize_is_rejected() {
        let mut integration = Integration::new();
        integration
            .initialize(&config(&["apple"]), at(2024, 3, 1))
            .unwrap();
        let err = integration
            .initialize(&config(&["apple"]), at(2024, 3, 1))
            .unwrap_err();
        assert_eq!(err.to_string(), "Cannot initialize while active");
    }

    #[test]
    fn reconfigure_recomputes_with_new_preferences() {
        let mut integration = Integration::new();
        integration
            .initialize(&config(&["cherry"]), at(2024, 3, 1))
            .unwrap();
        let northern = integration
            .coordinator()
            .unwrap()
            .cache()
            .get(PlantKind::Cherry)
            .unwrap()
            .months(CareKind::Pruning)
            .to_vec();
        assert_eq!(northern, vec![6, 7, 8]);

        let mut southern = config(&["cherry"]);
        southern.orchard.hemisphere = crate::models::Hemisphere::Southern;
        integration.reconfigure(&southern, at(2024, 3, 1)).unwrap();

        let schedule = integration
            .coordinator()
            .unwrap()
            .cache()
            .get(PlantKind::Cherry)
            .unwrap()
            .clone();
        assert_eq!(schedule.pruning_months, vec![12, 1, 2]);
        assert_eq!(schedule.next_pruning, NaiveDate::from_ymd_opt(2024, 12, 1));
    }

    #[test]
    fn tick_runs_due_timers() {
        let mut integration = Integration::new();
        let start = at(2024, 1, 8);
        integration.initialize(&config(&["apple"]), start).unwrap();
        let mut sink = MemorySink::default();

        assert!(integration.tick(start, &mut sink).unwrap().is_empty());
        assert_eq!(sink.len(), 0);

        let ran = integration
            .tick(start + Duration::hours(1), &mut sink)
            .unwrap();
        assert_eq!(ran.len(), 2);
        assert_eq!(sink.len(), 1);
        assert_eq!(
            integration.coordinator().unwrap().cache().computed_at(),
            Some(start + Duration::hours(1))
        );
    }

    #[test]
    fn reconfigure_keeps_sent_notifications() {
        let mut integration = Integration::new();
        let now = at(2024, 1, 8);
        integration.initialize(&config(&["apple"]), now).unwrap();
        let mut sink = MemorySink::default();
        integration
            .run_timer(TimerKind::ReminderScan, now, &mut sink)
            .unwrap();
        assert_eq!(sink.len(), 1);

        integration.reconfigure(&config(&["apple"]), now).unwrap();
        integration
            .run_timer(TimerKind::ReminderScan, now, &mut sink)
            .unwrap();
        assert_eq!(sink.len(), 1);
    }
}
