use crate::logic::CareCoordinator;
use crate::models::{CareKind, PlantKind};
use crate::ui::Theme;
use chrono::{Month, NaiveDateTime};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

pub struct PlantsScreen<'a> {
    pub coordinator: &'a CareCoordinator,
    pub plants: &'a [PlantKind],
    pub selected_index: usize,
    pub now: NaiveDateTime,
}

impl<'a> PlantsScreen<'a> {
    pub fn new(coordinator: &'a CareCoordinator, plants: &'a [PlantKind], now: NaiveDateTime) -> Self {
        Self {
            coordinator,
            plants,
            selected_index: 0,
            now,
        }
    }

    pub fn with_selection(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }
}

impl Widget for PlantsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(10),   // List + detail
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Plants", Theme::title()),
            Span::styled(format!(" - {} scheduled", self.plants.len()), Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(chunks[1]);

        self.render_list(content[0], buf);
        self.render_detail(content[1], buf);

        let nav = Line::from(vec![
            Span::styled("[↑↓]", Theme::nav_key()),
            Span::styled("Select ", Theme::nav_label()),
            Span::styled("[1-4]", Theme::nav_key()),
            Span::styled("Screens ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Back", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[2], buf);
    }
}

impl PlantsScreen<'_> {
    fn render_list(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Orchard")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.plants.is_empty() {
            Paragraph::new(Span::styled("No plants scheduled", Theme::dim())).render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .plants
            .iter()
            .enumerate()
            .map(|(i, plant)| {
                let style = if i == self.selected_index {
                    Theme::selected()
                } else {
                    Theme::normal()
                };
                ListItem::new(Span::styled(plant.as_str(), style))
            })
            .collect();

        List::new(items).render(inner, buf);
    }

    fn render_detail(&self, area: Rect, buf: &mut Buffer) {
        let Some(&plant) = self.plants.get(self.selected_index) else {
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border())
                .render(area, buf);
            return;
        };

        let block = Block::default()
            .title(Span::styled(plant.as_str(), Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border_focused());

        let Some(schedule) = self.coordinator.cache().get(plant) else {
            Paragraph::new(Span::styled("Not scheduled", Theme::dim()))
                .block(block)
                .render(area, buf);
            return;
        };

        let mut lines = Vec::new();
        for &kind in CareKind::all() {
            let value = self
                .coordinator
                .sensors()
                .iter()
                .find(|s| s.plant() == plant && s.kind() == kind)
                .map(|s| s.native_value(self.coordinator.cache(), self.now))
                .unwrap_or_default();
            let next = schedule
                .next(kind)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string());

            lines.push(Line::from(vec![
                Span::styled("● ", Style::default().fg(kind.color())),
                Span::styled(kind.as_str(), Theme::header()),
                Span::styled("  ", Theme::dim()),
                Span::styled(
                    value.clone(),
                    Style::default().fg(Theme::sensor_value_color(&value)),
                ),
                Span::styled(format!("  ({})", next), Theme::dim()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("  Months: ", Theme::dim()),
                Span::styled(month_names(schedule.months(kind)), Theme::normal()),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(format!("{} products: ", schedule.spray_type.as_str()), Theme::dim()),
            Span::styled(schedule.spray_products.join(", "), Theme::normal()),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            schedule.care_notes.as_str(),
            Theme::normal(),
        )));

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

/// Short month names in the given order, e.g. "Dec, Jan, Feb".
pub fn month_names(months: &[u32]) -> String {
    if months.is_empty() {
        return "None".to_string();
    }
    months
        .iter()
        .filter_map(|&m| u8::try_from(m).ok().and_then(|m| Month::try_from(m).ok()))
        .map(|m| m.name()[..3].to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
