use crate::models::CareEvent;
use crate::ui::components::{CalendarWidget, CareLegend};
use crate::ui::Theme;
use chrono::{Datelike, NaiveDate};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

pub struct CalendarScreen<'a> {
    pub year: i32,
    pub month: u32,
    pub today: NaiveDate,
    pub selected_date: Option<NaiveDate>,
    pub events: &'a [CareEvent],
}

impl<'a> CalendarScreen<'a> {
    pub fn new(events: &'a [CareEvent], today: NaiveDate) -> Self {
        Self {
            year: today.year(),
            month: today.month(),
            today,
            selected_date: Some(today),
            events,
        }
    }

    pub fn with_date(mut self, year: i32, month: u32) -> Self {
        self.year = year;
        self.month = month;
        self
    }

    pub fn selected(mut self, date: Option<NaiveDate>) -> Self {
        self.selected_date = date;
        self
    }

    fn events_for_selected(&self) -> Vec<&CareEvent> {
        match self.selected_date {
            Some(date) => self.events.iter().filter(|e| e.date() == date).collect(),
            None => Vec::new(),
        }
    }
}

impl Widget for CalendarScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(10),   // Calendar + details
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Care Calendar", Theme::title()),
            Span::styled(" - ", Theme::dim()),
            Span::styled("[←/→] Change month  [↑/↓] Select day", Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        let cal_area = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(5)])
            .split(content[0]);

        CalendarWidget::new(self.year, self.month, self.events, self.today)
            .selected(self.selected_date)
            .render(cal_area[0], buf);

        let legend_block = Block::default()
            .title("Legend")
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let legend_inner = legend_block.inner(cal_area[1]);
        legend_block.render(cal_area[1], buf);
        CareLegend.render(legend_inner, buf);

        self.render_details(content[1], buf);

        let nav = Line::from(vec![
            Span::styled("[1-4]", Theme::nav_key()),
            Span::styled("Screens ", Theme::nav_label()),
            Span::styled("[t]", Theme::nav_key()),
            Span::styled("Today ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Back", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[2], buf);
    }
}

impl CalendarScreen<'_> {
    fn render_details(&self, area: Rect, buf: &mut Buffer) {
        let date_str = self
            .selected_date
            .map(|d| d.format("%B %d, %Y").to_string())
            .unwrap_or_else(|| "No date selected".to_string());

        let block = Block::default()
            .title(date_str)
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let events = self.events_for_selected();

        if events.is_empty() {
            Paragraph::new(Span::styled("No care due on this date", Theme::dim()))
                .render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = events
            .iter()
            .map(|event| {
                let marker = if event.is_primary() { "● " } else { "○ " };
                let mut lines = vec![Line::from(vec![
                    Span::styled(marker, Style::default().fg(event.kind.color())),
                    Span::styled(event.summary.as_str(), Theme::header()),
                ])];

                lines.push(Line::from(vec![
                    Span::styled("  Time: ", Theme::dim()),
                    Span::styled(
                        format!(
                            "{} - {}",
                            event.start.format("%H:%M"),
                            event.end.format("%H:%M")
                        ),
                        Theme::normal(),
                    ),
                ]));
                lines.push(Line::from(vec![
                    Span::styled("  ", Theme::dim()),
                    Span::styled(event.description.as_str(), Theme::normal()),
                ]));

                ListItem::new(lines)
            })
            .collect();

        List::new(items).render(inner, buf);
    }
}
