use crate::logic::CareCoordinator;
use crate::models::{CareEvent, CareKind, PlantKind};
use crate::ui::Theme;
use chrono::NaiveDateTime;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, Widget},
};

pub struct DashboardScreen<'a> {
    pub coordinator: &'a CareCoordinator,
    pub upcoming: &'a [CareEvent],
    pub now: NaiveDateTime,
    pub notification_count: usize,
    pub status_message: Option<&'a str>,
}

impl<'a> DashboardScreen<'a> {
    pub fn new(
        coordinator: &'a CareCoordinator,
        upcoming: &'a [CareEvent],
        now: NaiveDateTime,
    ) -> Self {
        Self {
            coordinator,
            upcoming,
            now,
            notification_count: 0,
            status_message: None,
        }
    }

    pub fn with_notifications(mut self, count: usize) -> Self {
        self.notification_count = count;
        self
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }

    fn sensor_value(&self, plant: PlantKind, kind: CareKind) -> String {
        self.coordinator
            .sensors()
            .iter()
            .find(|s| s.plant() == plant && s.kind() == kind)
            .map(|s| s.native_value(self.coordinator.cache(), self.now))
            .unwrap_or_default()
    }
}

impl Widget for DashboardScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(8),    // Sensors and upcoming
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav bar
            ])
            .split(area);

        self.render_header(chunks[0], buf);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);

        self.render_sensors(middle[0], buf);
        self.render_upcoming(middle[1], buf);

        self.render_status_message(chunks[2], buf);
        self.render_nav(chunks[3], buf);
    }
}

impl DashboardScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let prefs = self.coordinator.preferences();
        let title = format!(
            "Orchard Care - {} hemisphere, {} sprays",
            prefs.hemisphere.as_str(),
            prefs.spray_type().as_str()
        );

        let block = Block::default()
            .title(Span::styled(title, Theme::title()))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());

        let computed = self
            .coordinator
            .cache()
            .computed_at()
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "Never".to_string());

        let info = format!(
            "Schedules computed: {}  |  Notifications sent: {}",
            computed, self.notification_count
        );
        Paragraph::new(Span::styled(info, Theme::dim()))
            .block(block)
            .render(area, buf);
    }

    fn render_sensors(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Next Care", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let plants = &self.coordinator.preferences().selected_plants;
        if plants.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            Paragraph::new(Span::styled(
                "No plants selected - press [s] to choose some",
                Theme::dim(),
            ))
            .render(inner, buf);
            return;
        }

        let rows: Vec<Row> = plants
            .iter()
            .map(|&plant| {
                let pruning = self.sensor_value(plant, CareKind::Pruning);
                let spray = self.sensor_value(plant, CareKind::Spray);
                Row::new(vec![
                    Cell::from(Span::styled(plant.as_str(), Theme::normal())),
                    Cell::from(Span::styled(
                        pruning.clone(),
                        Style::default().fg(Theme::sensor_value_color(&pruning)),
                    )),
                    Cell::from(Span::styled(
                        spray.clone(),
                        Style::default().fg(Theme::sensor_value_color(&spray)),
                    )),
                ])
            })
            .collect();

        let header = Row::new(vec!["Plant", "Pruning", "Spray"]).style(Theme::dim());
        let table = Table::new(
            rows,
            [
                Constraint::Percentage(40),
                Constraint::Percentage(30),
                Constraint::Percentage(30),
            ],
        )
        .header(header)
        .block(block);

        Widget::render(table, area, buf);
    }

    fn render_upcoming(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Coming Up (30 days)", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let primary: Vec<&CareEvent> = self.upcoming.iter().filter(|e| e.is_primary()).collect();

        if primary.is_empty() {
            Paragraph::new(Span::styled("Nothing due", Theme::dim())).render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = primary
            .iter()
            .map(|event| {
                let line = Line::from(vec![
                    Span::styled(event.start.format("%m/%d").to_string(), Theme::dim()),
                    Span::raw(" "),
                    Span::styled("● ", Style::default().fg(event.kind.color())),
                    Span::styled(event.summary.as_str(), Theme::normal()),
                ]);
                ListItem::new(line)
            })
            .collect();

        List::new(items).render(inner, buf);
    }

    fn render_status_message(&self, area: Rect, buf: &mut Buffer) {
        if let Some(msg) = self.status_message {
            let style = if msg.contains("failed") || msg.contains("error") {
                Theme::warning()
            } else {
                Theme::success()
            };
            Paragraph::new(Span::styled(msg, style)).render(area, buf);
        }
    }

    fn render_nav(&self, area: Rect, buf: &mut Buffer) {
        let nav = Line::from(vec![
            Span::styled("[1]", Theme::nav_key()),
            Span::styled("Dashboard ", Theme::nav_label()),
            Span::styled("[2]", Theme::nav_key()),
            Span::styled("Calendar ", Theme::nav_label()),
            Span::styled("[3]", Theme::nav_key()),
            Span::styled("Plants ", Theme::nav_label()),
            Span::styled("[4]", Theme::nav_key()),
            Span::styled("Notifications ", Theme::nav_label()),
            Span::styled("[s]", Theme::nav_key()),
            Span::styled("Settings ", Theme::nav_label()),
            Span::styled("[r]", Theme::nav_key()),
            Span::styled("Refresh ", Theme::nav_label()),
            Span::styled("[q]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);

        Paragraph::new(nav).render(area, buf);
    }
}
