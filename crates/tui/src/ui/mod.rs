//! Rendering and input handling for the picker UI.

pub mod components;
pub mod icons;
pub mod main_component;
pub mod runtime;
pub mod theme;
pub mod utils;
