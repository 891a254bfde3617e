mod alert_modal;
mod confirmation_modal;
mod prompt_modal;

pub mod text_input;

pub use alert_modal::{AlertModal, AlertModalState};
pub use confirmation_modal::{ConfirmationModal, ConfirmationModalState};
pub use prompt_modal::{PromptModal, PromptModalState};
pub use text_input::TextInputState;
