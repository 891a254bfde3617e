//! Free-text prompt, used for new file names and device paths.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use vellum_types::{DialogResponse, Severity};

use super::TextInputState;
use crate::app::{App, DialogView, Effect};
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers::{block, block_with_severity, build_hint_spans};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptModalState {
    title: String,
    input: TextInputState,
}

impl PromptModalState {
    /// Prompt seeded with `initial`, cursor at the start so a name can be typed before a default extension.
    pub fn new(title: impl Into<String>, initial: &str) -> Self {
        let mut input = TextInputState::with_text(initial);
        input.move_home();
        Self {
            title: title.into(),
            input,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn input(&self) -> &TextInputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut TextInputState {
        &mut self.input
    }
}

#[derive(Debug, Default, Clone)]
pub struct PromptModal;

impl Component for PromptModal {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let Some(DialogView::Prompt(state)) = app.dialog_mut() else {
            return Vec::new();
        };
        let input = state.input_mut();
        match key.code {
            KeyCode::Enter => return vec![Effect::ResolveDialog(DialogResponse::Text(Some(input.input().to_string())))],
            KeyCode::Esc => return vec![Effect::ResolveDialog(DialogResponse::Text(None))],
            KeyCode::Left => input.move_left(),
            KeyCode::Right => input.move_right(),
            KeyCode::Home => input.move_home(),
            KeyCode::End => input.move_end(),
            KeyCode::Backspace => input.backspace(),
            KeyCode::Delete => input.delete(),
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => input.insert_char(c),
            _ => {}
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.theme;
        let Some(DialogView::Prompt(state)) = app.dialog() else {
            return;
        };
        let outer = block_with_severity(theme, Severity::Info, Some(state.title()));
        let inner = outer.inner(rect);
        frame.render_widget(outer, rect);

        let [input_area] = Layout::vertical([Constraint::Length(3)]).areas(inner);
        let input_block = block(theme, None, true);
        let text_area = input_block.inner(input_area);
        let line = Line::from(Span::styled(state.input().input().to_string(), theme.text_primary_style()));
        frame.render_widget(Paragraph::new(line).block(input_block), input_area);

        let cursor_x = text_area.x.saturating_add(state.input().cursor_columns() as u16);
        frame.set_cursor_position((cursor_x.min(text_area.right().saturating_sub(1)), text_area.y));
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        build_hint_spans(&*app.theme, &[("Enter", " Submit  "), ("Esc", " Cancel")])
    }
}
