use chrono::{Duration, NaiveDateTime};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    ScheduleRefresh,
    ReminderScan,
}

impl fmt::Display for TimerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerKind::ScheduleRefresh => write!(f, "schedule refresh"),
            TimerKind::ReminderScan => write!(f, "reminder scan"),
        }
    }
}

#[derive(Debug, Clone)]
struct Timer {
    kind: TimerKind,
    interval: Duration,
    next_due: NaiveDateTime,
}

/// Repeating timers polled by the host loop.
#[derive(Debug, Default)]
pub struct TimerRegistry {
    timers: Vec<Timer>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// First fire is one interval after `now`. Re-registering a kind
    /// replaces it.
    pub fn register(&mut self, kind: TimerKind, interval: Duration, now: NaiveDateTime) {
        let interval = interval.max(Duration::seconds(1));
        self.timers.retain(|t| t.kind != kind);
        self.timers.push(Timer {
            kind,
            interval,
            next_due: now + interval,
        });
        tracing::debug!("Registered {} every {} minutes", kind, interval.num_minutes());
    }

    /// Kinds due at `now`, each reported once even if several intervals
    /// were missed. Advances their next due time past `now`.
    pub fn due(&mut self, now: NaiveDateTime) -> Vec<TimerKind> {
        let mut fired = Vec::new();
        for timer in &mut self.timers {
            if timer.next_due > now {
                continue;
            }
            while timer.next_due <= now {
                timer.next_due += timer.interval;
            }
            fired.push(timer.kind);
        }
        fired
    }

    pub fn next_due(&self) -> Option<NaiveDateTime> {
        self.timers.iter().map(|t| t.next_due).min()
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }
}
