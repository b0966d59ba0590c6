use super::{pruning::PruningActivity, spray::SprayActivity, CareActivity};
use crate::models::{CareEvent, CareKind, DerivedSchedule, PlantKind};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Default reminder lead times, in days before the care date.
pub const DEFAULT_REMINDER_LEADS: [u32; 2] = [7, 3];

const REMINDER_DURATION_MINUTES: i64 = 30;

pub struct EventGenerator {
    activities: Vec<Box<dyn CareActivity>>,
    reminder_leads: Vec<u32>,
}

impl EventGenerator {
    pub fn new() -> Self {
        let activities: Vec<Box<dyn CareActivity>> =
            vec![Box::new(PruningActivity), Box::new(SprayActivity)];

        Self {
            activities,
            reminder_leads: Vec::new(),
        }
    }

    pub fn with_reminders(mut self, leads: &[u32]) -> Self {
        let mut leads: Vec<u32> = leads.iter().copied().filter(|&d| d > 0).collect();
        leads.sort_unstable_by(|a, b| b.cmp(a));
        leads.dedup();
        self.reminder_leads = leads;
        self
    }

    /// Care events for one plant whose start lies in `[start, end]`, sorted
    /// by start time.
    pub fn generate(
        &self,
        plant: PlantKind,
        schedule: &DerivedSchedule,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Vec<CareEvent> {
        let in_range = |dt: NaiveDateTime| start <= dt && dt <= end;
        let mut events = Vec::new();

        for activity in &self.activities {
            let summary = activity.summary(plant);
            let description = activity.description(plant, schedule);

            for year in start.year()..=end.year() + 1 {
                for &month in activity.months(schedule) {
                    let Some(date) = NaiveDate::from_ymd_opt(year, month, activity.anchor_day())
                    else {
                        tracing::debug!(
                            "Skipping {} for {}: no date {}-{}-{}",
                            activity.kind(),
                            plant.key(),
                            year,
                            month,
                            activity.anchor_day()
                        );
                        continue;
                    };
                    let event_start = date.and_time(NaiveTime::MIN);

                    if in_range(event_start) {
                        events.push(CareEvent {
                            plant,
                            kind: activity.kind(),
                            reminder_lead_days: None,
                            start: event_start,
                            end: event_start + activity.duration(),
                            summary: summary.clone(),
                            description: description.clone(),
                        });
                    }

                    for &lead in &self.reminder_leads {
                        let reminder_start = event_start - Duration::days(i64::from(lead));
                        if in_range(reminder_start) {
                            events.push(reminder(
                                plant,
                                activity.kind(),
                                lead,
                                reminder_start,
                                &summary,
                                date,
                            ));
                        }
                    }
                }
            }
        }

        events.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.summary.cmp(&b.summary)));
        events
    }
}

impl Default for EventGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn reminder(
    plant: PlantKind,
    kind: CareKind,
    lead: u32,
    start: NaiveDateTime,
    summary: &str,
    due: NaiveDate,
) -> CareEvent {
    CareEvent {
        plant,
        kind,
        reminder_lead_days: Some(lead),
        start,
        end: start + Duration::minutes(REMINDER_DURATION_MINUTES),
        summary: format!("Reminder: {}", summary),
        description: format!(
            "{} in {} days ({}).",
            summary,
            lead,
            due.format("%B %-d, %Y")
        ),
    }
}
