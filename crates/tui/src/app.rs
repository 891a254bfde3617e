//! Application state for the picker TUI.
//!
//! `App` mirrors the latest [`PickerSnapshot`] published by the controller and
//! owns everything that is purely presentational: the highlighted row of each
//! page, the dialog being answered, and the status line. User gestures leave
//! the UI as [`Effect`]s; the runtime forwards them to the picker driver.

use std::collections::VecDeque;

use tracing::debug;
use vellum_picker::PendingDialog;
use vellum_types::{DialogRequest, DialogResponse, PickerCommand, PickerSnapshot, Severity};

use crate::ui::components::common::{AlertModalState, ConfirmationModalState, PromptModalState};
use crate::ui::components::picker::PickerViewState;
use crate::ui::theme::{NordTheme, Theme};

/// Inputs the runtime feeds into [`App::update`].
#[derive(Debug)]
pub enum Msg {
    /// The controller published new state.
    Snapshot(PickerSnapshot),
    /// The controller is waiting on a dialog.
    Dialog(PendingDialog),
    /// Animation tick.
    Tick,
}

/// Side effects requested by components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Forward a gesture to the picker driver.
    Command(PickerCommand),
    /// Answer the dialog currently on screen.
    ResolveDialog(DialogResponse),
}

/// View state of the dialog on screen.
#[derive(Debug, Clone)]
pub enum DialogView {
    Confirm(ConfirmationModalState),
    Prompt(PromptModalState),
    Alert(AlertModalState),
}

impl DialogView {
    fn from_request(request: &DialogRequest) -> Self {
        match request {
            DialogRequest::Confirm { title, message } => DialogView::Confirm(ConfirmationModalState::new(title, message)),
            DialogRequest::Prompt { title, initial } => DialogView::Prompt(PromptModalState::new(title, initial)),
            DialogRequest::Alert { severity, message } => DialogView::Alert(AlertModalState::new(*severity, message)),
        }
    }
}

#[derive(Debug)]
struct ActiveDialog {
    pending: PendingDialog,
    view: DialogView,
}

pub struct App {
    pub snapshot: PickerSnapshot,
    pub theme: Box<dyn Theme>,
    pub picker_view: PickerViewState,
    /// Latest non-blocking notice, shown in the status line.
    pub status: Option<(Severity, String)>,
    pub spinner_tick: usize,
    /// Picker commands sent so far; compared with `snapshot.handled`.
    commands_sent: u64,
    active_dialog: Option<ActiveDialog>,
    queued_dialogs: VecDeque<PendingDialog>,
}

impl App {
    pub fn new(snapshot: PickerSnapshot) -> Self {
        let mut picker_view = PickerViewState::default();
        picker_view.sync_depth(snapshot.depth());
        let commands_sent = snapshot.handled;
        Self {
            snapshot,
            theme: Box::new(NordTheme::new()),
            picker_view,
            status: None,
            spinner_tick: 0,
            commands_sent,
            active_dialog: None,
            queued_dialogs: VecDeque::new(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.snapshot.loading
    }

    /// Whether a command has been sent that no snapshot has accounted for yet.
    ///
    /// Until then the visible page may be stale, so picker input is held back.
    pub fn awaiting_picker(&self) -> bool {
        self.commands_sent > self.snapshot.handled
    }

    pub(crate) fn record_commands(&mut self, effects: &[Effect]) {
        let sent = effects.iter().filter(|effect| matches!(effect, Effect::Command(_))).count();
        self.commands_sent += sent as u64;
    }

    pub fn dialog(&self) -> Option<&DialogView> {
        self.active_dialog.as_ref().map(|active| &active.view)
    }

    pub fn dialog_mut(&mut self) -> Option<&mut DialogView> {
        self.active_dialog.as_mut().map(|active| &mut active.view)
    }

    /// Applies a message and reports whether the screen needs redrawing.
    pub fn update(&mut self, msg: Msg) -> bool {
        match msg {
            Msg::Snapshot(snapshot) => {
                self.picker_view.sync_depth(snapshot.depth());
                if snapshot.depth() != self.snapshot.depth() {
                    self.status = None;
                }
                self.snapshot = snapshot;
                true
            }
            Msg::Dialog(pending) => {
                self.show_dialog(pending);
                true
            }
            Msg::Tick => {
                if self.is_loading() {
                    self.spinner_tick = self.spinner_tick.wrapping_add(1);
                    return true;
                }
                false
            }
        }
    }

    /// Answers the dialog on screen and brings up the next queued one.
    pub fn resolve_dialog(&mut self, response: DialogResponse) {
        if let Some(active) = self.active_dialog.take() {
            debug!(?response, "dialog resolved");
            active.pending.respond(response);
        }
        while self.active_dialog.is_none()
            && let Some(next) = self.queued_dialogs.pop_front()
        {
            self.show_dialog(next);
        }
    }

    /// Informational and success notices go to the status line and resolve at once;
    /// everything else opens a modal.
    fn show_dialog(&mut self, pending: PendingDialog) {
        if let DialogRequest::Alert { severity, message } = pending.request()
            && matches!(severity, Severity::Info | Severity::Success)
        {
            self.status = Some((*severity, message.clone()));
            pending.respond(DialogResponse::Dismissed);
            return;
        }
        if self.active_dialog.is_some() {
            self.queued_dialogs.push_back(pending);
            return;
        }
        let view = DialogView::from_request(pending.request());
        self.active_dialog = Some(ActiveDialog { pending, view });
    }
}
