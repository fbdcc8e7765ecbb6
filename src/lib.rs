//! LPeg Binder
//!
//! Editor plugin core that hands documents to an external LPeg lexer.
//!
//! This library provides:
//! - Settings parsing and file name based language resolution
//! - Per-buffer language overrides
//! - The notification state machine deciding when to (re)bind a lexer
//! - A scripted replay harness and the `lpeg-bind` command-line tool

pub mod cli;
pub mod config;
pub mod language;
pub mod plugin;
pub mod replay;

// Re-exports for clean public API
pub use config::Config;
pub use language::{Settings, matches_wild, resolve};
pub use plugin::{BindError, BufferId, EditorHost, Event, LexerSession, Notification, Plugin};
