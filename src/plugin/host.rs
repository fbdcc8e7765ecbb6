//! Host Interfaces
//!
//! The editor and the external lexer engine are only reached through the
//! two traits in this module. `EditorHost` is the editor window with its
//! documents, dialogs and status bar; `LexerSession` is one editing view
//! talking to the lexer engine.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Lexer id reported for a document that has no lexer
pub const NULL_LEXER: i32 = 1;

/// Lexer language name selecting the external LPeg lexer
pub const LPEG_LEXER: &str = "lpeg";

/// Identity the editor assigns to an open document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BufferId(pub u64);

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of the window a notification originates from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub u64);

/// One of the editor's two editing views
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Main,
    Secondary,
}

impl View {
    pub const ALL: [View; 2] = [View::Main, View::Secondary];
}

/// Calls forwarded verbatim to the lexer engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivateCall<'a> {
    /// Hand the engine the view's direct-access function
    DirectFunction,
    /// Hand the engine the view's document pointer
    DocPointer,
    /// Load the named grammar
    SetGrammar(&'a str),
}

/// An editing view bound to the lexer engine
pub trait LexerSession {
    /// Load the lexer engine module into this view
    fn load_lexer_library(&mut self, path: &Path);

    /// Switch the document to the named lexer
    fn set_lexer_language(&mut self, name: &str);

    /// Numeric id of the current lexer, `NULL_LEXER` when there is none
    fn lexer_id(&self) -> i32;

    /// Name of the current lexer
    fn lexer_language(&self) -> String;

    fn set_property(&mut self, key: &str, value: &str);

    fn private_call(&mut self, call: PrivateCall<'_>);

    /// Grammar currently loaded by the engine
    fn grammar_name(&mut self) -> String;

    /// Style number under the caret
    fn style_at_caret(&self) -> i32;

    /// Engine name of a style number
    fn style_name(&mut self, style: i32) -> String;

    fn set_margin_width(&mut self, margin: u32, pixels: u32);

    /// Re-lex from `start` to `end`; `None` means the end of the document
    fn colourise(&mut self, start: usize, end: Option<usize>);

    /// Last error reported by the engine, empty when there is none
    fn lexer_status(&mut self) -> String;
}

/// The editor hosting the plugin
pub trait EditorHost {
    type Session: LexerSession;

    /// Directory where plugins keep their configuration
    fn plugins_config_dir(&self) -> PathBuf;

    /// Whether notifications from `window` belong to this editor
    fn owns_window(&self, window: WindowId) -> bool;

    fn current_buffer(&self) -> BufferId;

    fn current_view(&self) -> View;

    /// File name (without directory) of a buffer
    fn file_name(&self, buffer: BufferId) -> String;

    fn full_path(&self, buffer: BufferId) -> Option<PathBuf>;

    /// Open a file for editing, returning false when the editor refused
    fn open_file(&mut self, path: &Path) -> bool;

    /// Set the document type section of the status bar
    fn set_status(&mut self, text: &str);

    fn show_error(&mut self, message: &str);

    fn show_about(&mut self, text: &str);

    /// Let the user choose one of `languages`, `None` when cancelled
    fn pick_language(&mut self, languages: &[&str]) -> Option<String>;

    fn session(&mut self, view: View) -> &mut Self::Session;
}
