//! Language Selection
//!
//! Settings parsing and file name based language resolution.

pub mod pattern;
pub mod resolver;
pub mod settings;

pub use pattern::matches_wild;
pub use resolver::resolve;
pub use settings::{Settings, ensure_settings_file, plugin_home, settings_path};
