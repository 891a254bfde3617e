//! Theme styling for the picker UI.
//!
//! Components ask the theme for semantic styles instead of hard-coding colors.

pub mod nord;
pub mod roles;
pub mod theme_helpers;

pub use nord::NordTheme;
pub use roles::{Theme, ThemeRoles};
