/// Yes/No question with the focused answer.
///
/// "No" starts focused so a stray Enter never overwrites anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationModalState {
    title: String,
    message: String,
    yes_focused: bool,
}

impl ConfirmationModalState {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            yes_focused: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_yes_focused(&self) -> bool {
        self.yes_focused
    }

    pub fn toggle_focus(&mut self) {
        self.yes_focused = !self.yes_focused;
    }
}
