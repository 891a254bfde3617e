mod picker_component;
mod state;

pub use picker_component::PickerComponent;
pub use state::{PickerViewState, Row, rows};
