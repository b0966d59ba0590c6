use crate::error::Result;
use crate::models::Notification;

/// Destination for care notifications supplied by the host.
pub trait NotificationSink {
    fn deliver(&mut self, notification: &Notification) -> Result<()>;
}

/// Writes notifications to the log at info level.
#[derive(Debug, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn deliver(&mut self, notification: &Notification) -> Result<()> {
        tracing::info!(
            key = %notification.key,
            "{}: {}",
            notification.title,
            notification.body
        );
        Ok(())
    }
}

/// Keeps delivered notifications in memory, oldest first.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub notifications: Vec<Notification>,
}

impl MemorySink {
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &Notification> {
        self.notifications.iter().rev().take(count)
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}

impl NotificationSink for MemorySink {
    fn deliver(&mut self, notification: &Notification) -> Result<()> {
        self.notifications.push(notification.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NotificationKey;
    use chrono::NaiveDate;

    fn notification(summary: &str) -> Notification {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        Notification {
            title: format!("Orchard Care: {}", summary),
            body: String::new(),
            key: NotificationKey {
                summary: summary.to_string(),
                date,
            },
            created_at: date.and_hms_opt(9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn memory_sink_lists_newest_first() {
        let mut sink = MemorySink::default();
        assert!(sink.is_empty());
        for summary in ["Prune Apple Tree", "Spray Apple Tree", "Prune Pear Tree"] {
            sink.deliver(&notification(summary)).unwrap();
        }

        let recent: Vec<&str> = sink.recent(2).map(|n| n.key.summary.as_str()).collect();
        assert_eq!(recent, vec!["Prune Pear Tree", "Spray Apple Tree"]);
        assert_eq!(sink.len(), 3);
    }
}
