use crate::platform::MemorySink;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

/// Shown log entries; older ones stay in the sink.
const LOG_LIMIT: usize = 100;

/// Delivered notifications, newest first.
pub struct NotificationsScreen<'a> {
    pub sink: &'a MemorySink,
    pub enabled: bool,
}

impl<'a> NotificationsScreen<'a> {
    pub fn new(sink: &'a MemorySink) -> Self {
        Self {
            sink,
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl Widget for NotificationsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(5),    // Log
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let state = if self.enabled { "on" } else { "off" };
        let title = Line::from(vec![
            Span::styled("Notifications", Theme::title()),
            Span::styled(
                format!(" - {} delivered, reminders {}", self.sink.len(), state),
                Theme::dim(),
            ),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        let block = Block::default()
            .title("Log")
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(chunks[1]);
        block.render(chunks[1], buf);

        if self.sink.is_empty() {
            Paragraph::new(Span::styled("No notifications yet", Theme::dim())).render(inner, buf);
        } else {
            let items: Vec<ListItem> = self
                .sink
                .recent(LOG_LIMIT)
                .map(|n| {
                    ListItem::new(vec![
                        Line::from(vec![
                            Span::styled(
                                n.created_at.format("%m/%d %H:%M").to_string(),
                                Theme::dim(),
                            ),
                            Span::raw(" "),
                            Span::styled(n.title.as_str(), Theme::highlight()),
                        ]),
                        Line::from(vec![
                            Span::raw("  "),
                            Span::styled(n.body.as_str(), Theme::normal()),
                        ]),
                    ])
                })
                .collect();
            List::new(items).render(inner, buf);
        }

        let nav = Line::from(vec![
            Span::styled("[1-4]", Theme::nav_key()),
            Span::styled("Screens ", Theme::nav_label()),
            Span::styled("[r]", Theme::nav_key()),
            Span::styled("Scan now ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Back", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[2], buf);
    }
}
