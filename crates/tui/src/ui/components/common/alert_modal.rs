use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::{Paragraph, Wrap};
use vellum_types::{DialogResponse, Severity};

use crate::app::{App, DialogView, Effect};
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers::{block_with_severity, build_hint_spans};

/// A warning or error that stays on screen until acknowledged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertModalState {
    severity: Severity,
    message: String,
}

impl AlertModalState {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn title(&self) -> &'static str {
        match self.severity {
            Severity::Info => "Notice",
            Severity::Success => "Done",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct AlertModal;

impl Component for AlertModal {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if !matches!(app.dialog(), Some(DialogView::Alert(_))) {
            return Vec::new();
        }
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => vec![Effect::ResolveDialog(DialogResponse::Dismissed)],
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.theme;
        let Some(DialogView::Alert(state)) = app.dialog() else {
            return;
        };
        let block = block_with_severity(theme, state.severity(), Some(state.title()));
        frame.render_widget(
            Paragraph::new(state.message().to_string())
                .style(theme.text_primary_style())
                .wrap(Wrap { trim: false })
                .block(block),
            rect,
        );
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        build_hint_spans(&*app.theme, &[("Enter/Esc", " Dismiss")])
    }
}
