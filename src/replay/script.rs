//! Replay script format
//!
//! ```json
//! {
//!   "settings": "python = *.py\n",
//!   "grammars": ["python", "lua"],
//!   "steps": [
//!     { "step": "open", "buffer": 1, "path": "/work/foo.py" },
//!     { "step": "ready" },
//!     { "step": "set_language", "language": "lua" }
//!   ]
//! }
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::plugin::{BufferId, View};

fn default_true() -> bool {
    true
}

/// A scripted editor session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    /// Settings file contents written before the plugin starts
    #[serde(default)]
    pub settings: Option<String>,

    /// Grammars the lexer engine knows; any grammar is accepted when absent
    #[serde(default)]
    pub grammars: Option<Vec<String>>,

    /// Whether the lexer library loads successfully
    #[serde(default = "default_true")]
    pub library: bool,

    pub steps: Vec<Step>,
}

/// One user or editor action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// The editor finished starting up
    Ready,

    /// Open a file and make it the current buffer
    Open {
        buffer: BufferId,
        path: PathBuf,
        #[serde(default)]
        view: View,
        /// Lexer the editor picks on its own, if any
        #[serde(default)]
        lexer: Option<String>,
    },

    /// Switch to an already open buffer
    Activate { buffer: BufferId },

    /// Rename the file behind a buffer
    Rename { buffer: BufferId, path: PathBuf },

    Save { buffer: BufferId },

    SaveAs { buffer: BufferId, path: PathBuf },

    /// Change a buffer's language through the editor's own menu
    LanguageChanged { buffer: BufferId, lexer: String },

    Close { buffer: BufferId },

    /// Run "Set Language..."; `None` cancels the picker
    SetLanguage {
        #[serde(default)]
        language: Option<String>,
    },

    EditSettings,

    About,

    /// Replace the settings file on disk without notifying the plugin
    WriteSettings { text: String },

    /// Move the caret onto a character with the given style
    MoveCaret { style: i32 },

    /// A notification from a window the editor does not own
    Stray { buffer: BufferId },
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Ready => "ready",
            Step::Open { .. } => "open",
            Step::Activate { .. } => "activate",
            Step::Rename { .. } => "rename",
            Step::Save { .. } => "save",
            Step::SaveAs { .. } => "save_as",
            Step::LanguageChanged { .. } => "language_changed",
            Step::Close { .. } => "close",
            Step::SetLanguage { .. } => "set_language",
            Step::EditSettings => "edit_settings",
            Step::About => "about",
            Step::WriteSettings { .. } => "write_settings",
            Step::MoveCaret { .. } => "move_caret",
            Step::Stray { .. } => "stray",
        }
    }
}
