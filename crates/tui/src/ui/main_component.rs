//! Top-level view: the picker body, the status and hint lines, and the modal overlay.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::app::{App, DialogView, Effect};
use crate::ui::components::Component;
use crate::ui::components::common::{AlertModal, ConfirmationModal, PromptModal};
use crate::ui::components::picker::PickerComponent;
use crate::ui::utils::centered_rect;

const MODAL_WIDTH: u16 = 60;

#[derive(Clone, Copy)]
enum Modal {
    Confirm,
    Prompt,
    Alert,
}

fn open_modal(app: &App) -> Option<Modal> {
    app.dialog().map(|view| match view {
        DialogView::Confirm(_) => Modal::Confirm,
        DialogView::Prompt(_) => Modal::Prompt,
        DialogView::Alert(_) => Modal::Alert,
    })
}

#[derive(Debug, Default)]
pub struct MainView {
    picker: PickerComponent,
    confirmation: ConfirmationModal,
    prompt: PromptModal,
    alert: AlertModal,
}

impl MainView {
    /// Routes a key press to the open modal, or to the picker when no modal is open.
    ///
    /// Picker input is dropped while an operation is in flight, and between
    /// sending a command and receiving the snapshot that accounts for it.
    pub fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match open_modal(app) {
            Some(Modal::Confirm) => self.confirmation.handle_key_events(app, key),
            Some(Modal::Prompt) => self.prompt.handle_key_events(app, key),
            Some(Modal::Alert) => self.alert.handle_key_events(app, key),
            None if app.is_loading() || app.awaiting_picker() => Vec::new(),
            None => {
                let effects = self.picker.handle_key_events(app, key);
                app.record_commands(&effects);
                effects
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        frame.render_widget(Block::default().style(Style::default().bg(app.theme.roles().background)), area);
        let [body, status, hints] = Layout::vertical([Constraint::Min(3), Constraint::Length(1), Constraint::Length(1)]).areas(area);

        self.picker.render(frame, body, app);
        self.render_status(frame, status, app);

        let modal = open_modal(app);
        let hint_spans = match modal {
            Some(Modal::Confirm) => self.confirmation.get_hint_spans(app),
            Some(Modal::Prompt) => self.prompt.get_hint_spans(app),
            Some(Modal::Alert) => self.alert.get_hint_spans(app),
            None => self.picker.get_hint_spans(app),
        };
        frame.render_widget(Paragraph::new(Line::from(hint_spans)), hints);

        let Some(modal) = modal else {
            return;
        };
        let modal_height = match modal {
            Modal::Confirm => 9,
            Modal::Prompt => 5,
            Modal::Alert => 7,
        };
        let modal_area = centered_rect(MODAL_WIDTH, modal_height, body);
        frame.render_widget(Clear, modal_area);
        match modal {
            Modal::Confirm => self.confirmation.render(frame, modal_area, app),
            Modal::Prompt => self.prompt.render(frame, modal_area, app),
            Modal::Alert => self.alert.render(frame, modal_area, app),
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, app: &App) {
        let Some((severity, message)) = &app.status else {
            return;
        };
        let line = Line::from(Span::styled(message.as_str(), app.theme.severity_style(*severity)));
        frame.render_widget(Paragraph::new(line), area);
    }
}
