//! Lexer Binder
//!
//! Points a view at the external LPeg lexer and loads a grammar into it.

use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::host::{EditorHost, LPEG_LEXER, LexerSession, NULL_LEXER, PrivateCall, View};
use crate::language::{Settings, plugin_home};

pub const PROPERTY_HOME: &str = "lexer.lpeg.home";
pub const PROPERTY_THEME: &str = "lexer.lpeg.color.theme";
pub const PROPERTY_FOLD: &str = "fold";

/// Margin showing fold markers
pub const FOLD_MARGIN: u32 = 2;
pub const FOLD_MARGIN_WIDTH: u32 = 14;

/// Errors reported while binding a grammar to a view
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// The view stayed on the null lexer after selecting LPeg
    #[error("Failed to set LPeg lexer")]
    LexerUnavailable,

    /// The engine reported an error after loading the grammar
    #[error("LPeg lexer error: {0}")]
    LexerRuntime(String),
}

/// File name of the lexer engine module for this platform
pub fn lexer_library_name() -> String {
    let width = if cfg!(target_pointer_width = "64") {
        "_64"
    } else {
        ""
    };
    format!("{}LexLPeg{}{}", DLL_PREFIX, width, DLL_SUFFIX)
}

/// Full path of the lexer engine module
pub fn lexer_library_path(config_dir: &Path) -> PathBuf {
    plugin_home(config_dir).join(lexer_library_name())
}

/// Text shown in the status bar once `language` is active
pub fn status_text(language: &str) -> String {
    format!("{} ({})", language, LPEG_LEXER)
}

/// Bind `language` to the document shown in `view`.
///
/// An empty language is a no-op. On success the status bar names the
/// language; on a runtime error the document may be partially colourised.
pub fn bind<H: EditorHost>(
    host: &mut H,
    view: View,
    language: &str,
    settings: &Settings,
) -> Result<(), BindError> {
    if language.is_empty() {
        return Ok(());
    }

    let home = plugin_home(&host.plugins_config_dir());
    let session = host.session(view);

    session.set_lexer_language(LPEG_LEXER);
    if session.lexer_id() == NULL_LEXER {
        return Err(BindError::LexerUnavailable);
    }

    session.set_property(PROPERTY_HOME, &home.to_string_lossy());
    session.set_property(PROPERTY_THEME, settings.theme());
    session.set_property(PROPERTY_FOLD, "1");

    session.private_call(PrivateCall::DirectFunction);
    session.private_call(PrivateCall::DocPointer);
    session.private_call(PrivateCall::SetGrammar(language));

    // The editor does not know the document type, so it would hide the fold margin
    session.set_margin_width(FOLD_MARGIN, FOLD_MARGIN_WIDTH);

    session.colourise(0, None);

    let status = session.lexer_status();
    if !status.is_empty() {
        return Err(BindError::LexerRuntime(status));
    }

    log::debug!("Bound {:?} to {:?} view", language, view);
    host.set_status(&status_text(language));
    Ok(())
}
