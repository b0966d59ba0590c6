use crate::models::{CareEvent, CareKind};
use crate::ui::Theme;
use chrono::{Datelike, NaiveDate};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// Month grid with days colored by the care due on them.
pub struct CalendarWidget<'a> {
    year: i32,
    month: u32,
    events: &'a [CareEvent],
    today: NaiveDate,
    selected_date: Option<NaiveDate>,
}

impl<'a> CalendarWidget<'a> {
    pub fn new(year: i32, month: u32, events: &'a [CareEvent], today: NaiveDate) -> Self {
        Self {
            year,
            month,
            events,
            today,
            selected_date: None,
        }
    }

    pub fn selected(mut self, date: Option<NaiveDate>) -> Self {
        self.selected_date = date;
        self
    }

    // Primary events only; reminders would paint the week before every task
    fn care_on(&self, date: NaiveDate) -> Option<CareKind> {
        self.events
            .iter()
            .find(|e| e.is_primary() && e.date() == date)
            .map(|e| e.kind)
    }

    fn days_in_month(&self) -> u32 {
        let next_month = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };

        next_month
            .and_then(|d| d.pred_opt())
            .map(|d| d.day())
            .unwrap_or(30)
    }

    fn first_day_of_month(&self) -> u32 {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.weekday().num_days_from_sunday())
            .unwrap_or(0)
    }
}

impl Widget for CalendarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| format!("{}-{:02}", self.year, self.month));

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 21 || inner.height < 8 {
            return;
        }

        let header_line = Line::from(Span::styled("Su Mo Tu We Th Fr Sa", Theme::dim()));
        buf.set_line(inner.x, inner.y, &header_line, inner.width);

        let days_in_month = self.days_in_month();
        let first_day = self.first_day_of_month();

        let mut day = 1u32;
        let mut row = 1u16;

        while day <= days_in_month && row < inner.height {
            let mut line_spans: Vec<Span> = Vec::new();

            for col in 0..7 {
                if (row == 1 && col < first_day) || day > days_in_month {
                    line_spans.push(Span::raw("   "));
                    continue;
                }

                let date = NaiveDate::from_ymd_opt(self.year, self.month, day);
                let care = date.and_then(|d| self.care_on(d));

                let style = if date.is_some() && self.selected_date == date {
                    Theme::selected()
                } else if date == Some(self.today) {
                    Theme::highlight()
                } else if let Some(kind) = care {
                    Style::default().fg(kind.color())
                } else {
                    Theme::normal()
                };

                line_spans.push(Span::styled(format!("{:2}", day), style));
                line_spans.push(Span::raw(" "));
                day += 1;
            }

            buf.set_line(inner.x, inner.y + row, &Line::from(line_spans), inner.width);
            row += 1;
        }
    }
}

pub struct CareLegend;

impl Widget for CareLegend {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut y = area.y;
        for &kind in CareKind::all() {
            if y >= area.y + area.height {
                break;
            }

            let line = Line::from(vec![
                Span::styled("■ ", Style::default().fg(kind.color())),
                Span::styled(kind.as_str(), Theme::dim()),
            ]);

            buf.set_line(area.x, y, &line, area.width);
            y += 1;
        }

        if y < area.y + area.height {
            let line = Line::from(vec![
                Span::styled("■ ", Theme::highlight()),
                Span::styled("Today", Theme::dim()),
            ]);
            buf.set_line(area.x, y, &line, area.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlantKind;
    use chrono::{Duration, NaiveTime};

    fn event(kind: CareKind, date: NaiveDate, lead: Option<u32>) -> CareEvent {
        let start = date.and_time(NaiveTime::MIN);
        CareEvent {
            plant: PlantKind::Apple,
            kind,
            reminder_lead_days: lead,
            start,
            end: start + Duration::hours(1),
            summary: "x".into(),
            description: String::new(),
        }
    }

    #[test]
    fn reminders_do_not_color_days() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
        let events = vec![event(CareKind::Spray, d, Some(7))];
        let widget = CalendarWidget::new(2024, 3, &events, d);
        assert_eq!(widget.care_on(d), None);
    }

    #[test]
    fn grid_fits_month() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let events = vec![event(CareKind::Pruning, NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(), None)];
        let widget = CalendarWidget::new(2024, 2, &events, today);
        assert_eq!(widget.days_in_month(), 29);
        assert_eq!(widget.first_day_of_month(), 4);
        assert_eq!(
            widget.care_on(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()),
            Some(CareKind::Pruning)
        );

        let area = Rect::new(0, 0, 24, 10);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        let title: String = (1..14).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(title.starts_with("February 2024"));
    }
}
