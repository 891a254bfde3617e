use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use vellum_types::{DialogResponse, Severity};

use crate::app::{App, DialogView, Effect};
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers::{block_with_severity, build_hint_spans, render_button};

const BUTTON_WIDTH: u16 = 10;
const BUTTON_SPACER: u16 = 2;

#[derive(Debug, Default, Clone)]
pub struct ConfirmationModal;

impl Component for ConfirmationModal {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let Some(DialogView::Confirm(state)) = app.dialog_mut() else {
            return Vec::new();
        };
        let answer = match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                state.toggle_focus();
                return Vec::new();
            }
            KeyCode::Enter => state.is_yes_focused(),
            KeyCode::Char('y') | KeyCode::Char('Y') => true,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => false,
            _ => return Vec::new(),
        };
        vec![Effect::ResolveDialog(DialogResponse::Confirmed(answer))]
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.theme;
        let Some(DialogView::Confirm(state)) = app.dialog() else {
            return;
        };
        let block = block_with_severity(theme, Severity::Warning, Some(state.title()));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let [message_area, _, button_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1), Constraint::Length(3)]).areas(inner);

        let lines: Vec<Line> = state.message().lines().map(|line| Line::from(Span::raw(line.to_string()))).collect();
        frame.render_widget(
            Paragraph::new(lines).style(theme.text_primary_style()).wrap(Wrap { trim: false }),
            message_area,
        );

        let buttons = [("Yes", state.is_yes_focused()), ("No", !state.is_yes_focused())];
        for (index, (label, focused)) in buttons.into_iter().enumerate() {
            let offset = index as u16 * (BUTTON_WIDTH + BUTTON_SPACER);
            let area = Rect::new(button_area.x + offset, button_area.y, BUTTON_WIDTH, button_area.height).intersection(button_area);
            render_button(frame, area, label, focused, theme);
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        build_hint_spans(&*app.theme, &[("Tab/←/→", " Switch  "), ("Enter", " Choose  "), ("y/n", " Answer  "), ("Esc", " No")])
    }
}
