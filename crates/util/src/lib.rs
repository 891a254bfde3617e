//! Helpers shared by the Vellum crates: configuration loading, path expansion,
//! and file-name validation.

pub mod config;
pub mod file_name;
pub mod path_processing;

pub use config::{ConfigError, MountConfig, VellumConfig, default_config_dir, default_config_path, load_config, load_config_from_path};
pub use file_name::{RESERVED_CHARACTERS, ValidationError, validate_file_name};
pub use path_processing::expand_tilde;
