//! UI components: the picker view and its modal dialogs.

pub mod common;
pub mod component;
pub mod picker;

pub(crate) use component::Component;
