//! Editor Plugin
//!
//! Host traits, the override table, the lexer binder and the notification
//! state machine tying them together.

pub mod binder;
pub mod commands;
pub mod dispatcher;
pub mod host;
pub mod overrides;

#[cfg(test)]
pub(crate) mod fake;

pub use binder::{BindError, bind};
pub use commands::MenuCommand;
pub use dispatcher::{Event, Notification, Plugin, PluginOptions};
pub use host::{BufferId, EditorHost, LexerSession, PrivateCall, View, WindowId};
pub use overrides::BufferOverrides;
