//! Configuration file parsing for intent-bridge
//!
//! Supports `.intent-bridge/config.toml` in the project directory.

pub mod settings;
pub mod types;

pub use settings::{
    config_path, init_config_dir, load_settings, load_settings_file, validate_settings,
};
pub use types::*;
