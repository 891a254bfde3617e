//! Component abstraction shared by the picker view and the modals.
//!
//! Components keep only local UI behavior. They read and mutate [`App`] and
//! report anything that must leave the UI (picker gestures, dialog answers) as
//! [`Effect`]s for the runtime to carry out.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::app::{App, Effect};

pub(crate) trait Component {
    /// Handle a key press while this component owns input.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Draw into `rect`. Rendering must not change picker state.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Key hints shown in the footer while this component owns input.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'_>> {
        Vec::new()
    }
}
