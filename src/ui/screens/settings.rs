use crate::models::{PlantKind, UserPreferences};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Hemisphere,
    Organic,
    Plant(PlantKind),
}

impl SettingsField {
    pub fn all() -> Vec<SettingsField> {
        let mut fields = vec![SettingsField::Hemisphere, SettingsField::Organic];
        fields.extend(PlantKind::all().iter().map(|&p| SettingsField::Plant(p)));
        fields
    }

    pub fn label(&self) -> &'static str {
        match self {
            SettingsField::Hemisphere => "Hemisphere",
            SettingsField::Organic => "Spray Preference",
            SettingsField::Plant(kind) => kind.as_str(),
        }
    }

    fn index(&self) -> usize {
        Self::all().iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn prev(&self) -> Self {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

pub struct SettingsScreen<'a> {
    pub draft: &'a UserPreferences,
    pub focused_field: SettingsField,
    pub modified: bool,
}

impl<'a> SettingsScreen<'a> {
    pub fn new(draft: &'a UserPreferences) -> Self {
        Self {
            draft,
            focused_field: SettingsField::Hemisphere,
            modified: false,
        }
    }

    pub fn with_focus(mut self, field: SettingsField) -> Self {
        self.focused_field = field;
        self
    }

    pub fn modified(mut self, modified: bool) -> Self {
        self.modified = modified;
        self
    }

    fn get_field_value(&self, field: SettingsField) -> String {
        match field {
            SettingsField::Hemisphere => self.draft.hemisphere.as_str().to_string(),
            SettingsField::Organic => self.draft.spray_type().as_str().to_string(),
            SettingsField::Plant(kind) => {
                if self.draft.is_selected(kind) {
                    "[x]".to_string()
                } else {
                    "[ ]".to_string()
                }
            }
        }
    }
}

impl Widget for SettingsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(3), // Hemisphere
                Constraint::Length(3), // Organic
                Constraint::Min(5),    // Plant checklist
                Constraint::Length(3), // Help
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Settings", Theme::title()),
            Span::styled(" - Orchard Preferences", Theme::dim()),
            if self.modified {
                Span::styled("  (unsaved)", Theme::warning())
            } else {
                Span::raw("")
            },
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        self.render_field(SettingsField::Hemisphere, chunks[1], buf);
        self.render_field(SettingsField::Organic, chunks[2], buf);
        self.render_plants(chunks[3], buf);
        self.render_help(chunks[4], buf);

        let nav = Line::from(vec![
            Span::styled("[↑↓]", Theme::nav_key()),
            Span::styled("Navigate ", Theme::nav_label()),
            Span::styled("[Enter/Space]", Theme::nav_key()),
            Span::styled("Toggle ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Discard/Back ", Theme::nav_label()),
            Span::styled("[Ctrl+S]", Theme::nav_key()),
            Span::styled("Save", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[5], buf);
    }
}

impl SettingsScreen<'_> {
    fn render_field(&self, field: SettingsField, area: Rect, buf: &mut Buffer) {
        let is_focused = field == self.focused_field;
        let border_style = if is_focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };
        let value_style = if is_focused {
            Theme::selected()
        } else {
            Theme::normal()
        };

        let block = Block::default()
            .title(field.label())
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(Span::styled(self.get_field_value(field), value_style)).render(inner, buf);
    }

    fn render_plants(&self, area: Rect, buf: &mut Buffer) {
        let plant_focused = matches!(self.focused_field, SettingsField::Plant(_));
        let block = Block::default()
            .title(format!("Plants ({} selected)", self.draft.selected_plants.len()))
            .borders(Borders::ALL)
            .border_style(if plant_focused {
                Theme::border_focused()
            } else {
                Theme::border()
            });
        let inner = block.inner(area);
        block.render(area, buf);

        let plants = PlantKind::all();
        let visible = usize::from(inner.height).max(1);
        let focused = plants
            .iter()
            .position(|&p| self.focused_field == SettingsField::Plant(p))
            .unwrap_or(0);
        let offset = focused.saturating_sub(visible - 1);

        let items: Vec<ListItem> = plants
            .iter()
            .skip(offset)
            .take(visible)
            .map(|&plant| {
                let field = SettingsField::Plant(plant);
                let style = if field == self.focused_field {
                    Theme::selected()
                } else if self.draft.is_selected(plant) {
                    Theme::normal()
                } else {
                    Theme::dim()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(self.get_field_value(field), style),
                    Span::raw(" "),
                    Span::styled(plant.as_str(), style),
                ]))
            })
            .collect();

        List::new(items).render(inner, buf);
    }

    fn render_help(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(area);
        block.render(area, buf);

        let help_text = match self.focused_field {
            SettingsField::Hemisphere => "Southern shifts every care month by six months",
            SettingsField::Organic => "Choose between organic and conventional spray products",
            SettingsField::Plant(_) => "Selected plants get sensors, a calendar and reminders",
        };
        Paragraph::new(Span::styled(help_text, Theme::dim())).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_cycle_through_every_plant() {
        let all = SettingsField::all();
        assert_eq!(all.len(), 2 + PlantKind::all().len());
        assert_eq!(SettingsField::Organic.next(), SettingsField::Plant(PlantKind::all()[0]));
        assert_eq!(SettingsField::Hemisphere.prev(), *all.last().unwrap());
        assert_eq!(all.last().unwrap().next(), SettingsField::Hemisphere);
    }
}
