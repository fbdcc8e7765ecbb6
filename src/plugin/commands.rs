//! Menu commands

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::dispatcher::Plugin;
use super::host::EditorHost;
use crate::language::settings::PLUGIN_NAME;

/// Entries of the plugin menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuCommand {
    EditSettings,
    SetLanguage,
    About,
}

impl MenuCommand {
    pub const ALL: [MenuCommand; 3] = [
        MenuCommand::EditSettings,
        MenuCommand::SetLanguage,
        MenuCommand::About,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuCommand::EditSettings => "Edit Settings...",
            MenuCommand::SetLanguage => "Set Language...",
            MenuCommand::About => "About...",
        }
    }
}

/// Text of the about box
pub fn about_text(settings_path: &Path) -> String {
    format!(
        "{} {}\n\nSettings: {}",
        PLUGIN_NAME,
        env!("CARGO_PKG_VERSION"),
        settings_path.display()
    )
}

impl<H: EditorHost> Plugin<H> {
    /// Run a menu command against the current buffer
    pub fn run_command(&mut self, command: MenuCommand) {
        match command {
            MenuCommand::EditSettings => {
                let path = self.settings_path();
                if !self.host.open_file(&path) {
                    log::warn!("Editor refused to open {:?}", path);
                }
            }
            MenuCommand::SetLanguage => self.set_language_for_current_buffer(),
            MenuCommand::About => {
                let text = about_text(&self.settings_path());
                self.host.show_about(&text);
            }
        }
    }

    /// Ask the user for a language and pin it to the current buffer
    fn set_language_for_current_buffer(&mut self) {
        let names = self.settings.language_names();
        let picked = self.host.pick_language(&names);
        let Some(language) = picked.filter(|language| !language.is_empty()) else {
            return;
        };

        let buffer = self.host.current_buffer();
        log::info!("Pinning {:?} to buffer {}", language, buffer);
        self.overrides.set(buffer, language.clone());
        self.view = self.host.current_view();
        self.apply(&language);
    }
}
