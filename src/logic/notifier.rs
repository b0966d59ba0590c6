use crate::models::{CareEvent, Notification, NotificationKey};
use crate::platform::NotificationSink;
use chrono::{Duration, NaiveDateTime, NaiveTime};
use std::collections::HashSet;

/// Days ahead of a care date on which a notification may fire.
pub const NOTIFY_OFFSETS: [i64; 4] = [7, 3, 1, 0];

/// How far ahead each check looks.
pub const SCAN_HORIZON_DAYS: i64 = 14;

/// Sends each care occurrence at most once per process lifetime.
#[derive(Debug, Default)]
pub struct NotificationDispatcher {
    sent: HashSet<NotificationKey>,
}

impl NotificationDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Window scanned by a check at `now`: start of today through the
    /// horizon.
    pub fn scan_window(now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
        let start = now.date().and_time(NaiveTime::MIN);
        (start, now + Duration::days(SCAN_HORIZON_DAYS))
    }

    /// Deliver notifications for primary events due in exactly 7, 3, 1 or 0
    /// days. Returns the number delivered.
    pub fn check(
        &mut self,
        events: &[CareEvent],
        now: NaiveDateTime,
        sink: &mut dyn NotificationSink,
    ) -> usize {
        let today = now.date();
        let (_, horizon) = Self::scan_window(now);
        let mut delivered = 0;

        for event in events.iter().filter(|e| e.is_primary()) {
            if event.start > horizon {
                continue;
            }

            let offset = (event.date() - today).num_days();
            if !NOTIFY_OFFSETS.contains(&offset) {
                continue;
            }

            let key = NotificationKey {
                summary: event.summary.clone(),
                date: event.date(),
            };
            if self.sent.contains(&key) {
                continue;
            }

            let notification = Notification {
                title: format!("Orchard Care: {}", event.summary),
                body: format!(
                    "{} is due {} ({}). {}",
                    event.summary,
                    lead_phrase(offset),
                    event.date().format("%A, %B %-d"),
                    event.description
                ),
                key: key.clone(),
                created_at: now,
            };

            match sink.deliver(&notification) {
                Ok(()) => {
                    tracing::debug!("Notified {}", key);
                    self.sent.insert(key);
                    delivered += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to deliver notification for {}: {}", key, e);
                }
            }
        }

        delivered
    }

    pub fn sent_count(&self) -> usize {
        self.sent.len()
    }
}

fn lead_phrase(days: i64) -> String {
    match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        n => format!("in {} days", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{OrchardCareError, Result};
    use crate::models::{CareKind, PlantKind};
    use crate::platform::MemorySink;
    use chrono::NaiveDate;

    fn now(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn event(y: i32, m: u32, d: u32, lead: Option<u32>) -> CareEvent {
        let start = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::MIN);
        CareEvent {
            plant: PlantKind::Apple,
            kind: CareKind::Spray,
            reminder_lead_days: lead,
            start,
            end: start + Duration::hours(1),
            summary: "Spray Apple Tree".to_string(),
            description: "Organic spray treatment.".to_string(),
        }
    }

    #[test]
    fn notifies_on_listed_offsets_only() {
        let mut dispatcher = NotificationDispatcher::new();
        let mut sink = MemorySink::default();
        let today = now(2024, 3, 1);

        for (day, expected) in [(1, 1), (2, 1), (3, 0), (4, 1), (5, 0), (8, 1), (10, 0)] {
            let mut d = NotificationDispatcher::new();
            let mut s = MemorySink::default();
            let count = d.check(&[event(2024, 3, day, None)], today, &mut s);
            assert_eq!(count, expected, "day {}", day);
        }

        let delivered = dispatcher.check(&[event(2024, 3, 8, None)], today, &mut sink);
        assert_eq!(delivered, 1);
        assert!(sink.notifications[0].body.contains("in 7 days"));
        assert_eq!(sink.notifications[0].title, "Orchard Care: Spray Apple Tree");
    }

    #[test]
    fn body_names_the_lead_time() {
        let today = now(2024, 3, 1);
        for (day, phrase) in [(1, "today"), (2, "tomorrow"), (4, "in 3 days")] {
            let mut dispatcher = NotificationDispatcher::new();
            let mut sink = MemorySink::default();
            dispatcher.check(&[event(2024, 3, day, None)], today, &mut sink);
            assert_eq!(sink.len(), 1, "day {}", day);
            assert!(
                sink.notifications[0].body.contains(phrase),
                "{:?} should mention {}",
                sink.notifications[0].body,
                phrase
            );
        }
    }

    #[test]
    fn same_occurrence_is_sent_once() {
        let mut dispatcher = NotificationDispatcher::new();
        let mut sink = MemorySink::default();
        let events = [event(2024, 3, 8, None)];

        assert_eq!(dispatcher.check(&events, now(2024, 3, 1), &mut sink), 1);
        assert_eq!(dispatcher.check(&events, now(2024, 3, 1), &mut sink), 0);
        // 3 days out is another eligible offset, but the key was already used
        assert_eq!(dispatcher.check(&events, now(2024, 3, 5), &mut sink), 0);
        assert_eq!(sink.notifications.len(), 1);
        assert_eq!(dispatcher.sent_count(), 1);
        assert_eq!(
            sink.notifications[0].key,
            NotificationKey {
                summary: "Spray Apple Tree".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
            }
        );
    }

    #[test]
    fn reminder_events_do_not_notify() {
        let mut dispatcher = NotificationDispatcher::new();
        let mut sink = MemorySink::default();
        let count = dispatcher.check(&[event(2024, 3, 1, Some(7))], now(2024, 3, 1), &mut sink);
        assert_eq!(count, 0);
    }

    #[test]
    fn today_uses_today_wording() {
        let mut dispatcher = NotificationDispatcher::new();
        let mut sink = MemorySink::default();
        dispatcher.check(&[event(2024, 3, 1, None)], now(2024, 3, 1), &mut sink);
        assert!(sink.notifications[0].body.contains("due today"));
    }

    struct FailingSink;

    impl NotificationSink for FailingSink {
        fn deliver(&mut self, _notification: &Notification) -> Result<()> {
            Err(OrchardCareError::Io(std::io::Error::other("sink offline")))
        }
    }

    #[test]
    fn failed_delivery_is_retried() {
        let mut dispatcher = NotificationDispatcher::new();
        let events = [event(2024, 3, 2, None)];

        assert_eq!(dispatcher.check(&events, now(2024, 3, 1), &mut FailingSink), 0);
        assert_eq!(dispatcher.sent_count(), 0);

        let mut sink = MemorySink::default();
        assert_eq!(dispatcher.check(&events, now(2024, 3, 1), &mut sink), 1);
    }
}
