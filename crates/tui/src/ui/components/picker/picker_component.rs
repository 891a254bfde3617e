use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState};
use vellum_types::{PickerCommand, PickerMode};

use super::state::{Row, rows};
use crate::app::{App, Effect};
use crate::ui::components::Component;
use crate::ui::icons::{icon, spinner_frame};
use crate::ui::theme::theme_helpers::{block, build_hint_spans};

/// Backend list on the root view, the listed folder on every other level.
#[derive(Debug, Default)]
pub struct PickerComponent {
    list_state: ListState,
}

impl PickerComponent {
    fn title(app: &App) -> String {
        let title = match app.snapshot.current_page() {
            Some(page) => page.title.clone(),
            None => app.snapshot.mode.title().to_string(),
        };
        if app.is_loading() {
            format!(" {} {title} ", spinner_frame(app.spinner_tick))
        } else {
            format!(" {title} ")
        }
    }
}

impl Component for PickerComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let rows = rows(&app.snapshot);
        let depth = app.snapshot.depth();
        let at_root = depth == 0;
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => app.picker_view.select_next(rows.len()),
            KeyCode::Up | KeyCode::Char('k') => app.picker_view.select_prev(rows.len()),
            KeyCode::Enter => {
                if let Some(row) = app.picker_view.selected(rows.len()).and_then(|index| rows.get(index)) {
                    return vec![Effect::Command(row.command(depth))];
                }
            }
            KeyCode::Backspace | KeyCode::Left if !at_root => return vec![Effect::Command(PickerCommand::Pop { depth })],
            KeyCode::Char('n') if !at_root && app.snapshot.mode == PickerMode::Save => {
                return vec![Effect::Command(PickerCommand::CreateNew { depth })];
            }
            KeyCode::Esc if at_root => return vec![Effect::Command(PickerCommand::Cancel)],
            KeyCode::Esc => return vec![Effect::Command(PickerCommand::Pop { depth })],
            _ => {}
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.theme;
        let rows = rows(&app.snapshot);
        let items: Vec<ListItem> = rows
            .iter()
            .map(|row| {
                let style = match row {
                    Row::Back | Row::CreateNew => theme.accent_primary_style(),
                    _ => theme.text_primary_style(),
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", row.icon()), theme.text_secondary_style()),
                    Span::styled(row.label(), style),
                ]))
            })
            .collect();

        let title = Self::title(app);
        let list = List::new(items)
            .block(block(theme, Some(title.as_str()), !app.is_loading()))
            .highlight_style(theme.selection_style())
            .highlight_symbol("› ");
        self.list_state.select(app.picker_view.selected(rows.len()));
        frame.render_stateful_widget(list, rect, &mut self.list_state);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let theme = &*app.theme;
        if app.is_loading() {
            return vec![Span::styled(format!("{} Working…", icon("spinner")), theme.text_muted_style())];
        }
        let mut hints = vec![("↑/↓", " Move  "), ("Enter", " Select  ")];
        if app.snapshot.depth() == 0 {
            hints.push(("Esc", " Cancel"));
        } else {
            hints.push(("Backspace", " Back  "));
            if app.snapshot.mode == PickerMode::Save {
                hints.push(("n", " New file  "));
            }
            hints.push(("Esc", " Back"));
        }
        build_hint_spans(theme, &hints)
    }
}
