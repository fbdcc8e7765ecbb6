//! Event Dispatcher
//!
//! Reacts to editor notifications and decides when a document gets a
//! (new) lexer.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::binder::{self, lexer_library_path};
use super::host::{BufferId, EditorHost, LPEG_LEXER, LexerSession, NULL_LEXER, View, WindowId};
use super::overrides::BufferOverrides;
use crate::language::{Settings, ensure_settings_file, resolve, settings_path};

/// Editor lifecycle events the plugin listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "buffer", rename_all = "snake_case")]
pub enum Event {
    /// The editor finished starting up
    Ready,
    BufferActivated(BufferId),
    FileRenamed(BufferId),
    FileBeforeSave(BufferId),
    FileSaved(BufferId),
    /// The buffer's language was changed outside of the plugin
    LanguageChanged(BufferId),
    FileClosed(BufferId),
    /// Caret or selection moved in the current view
    SelectionUpdated,
}

/// A notification as delivered by the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    pub origin: WindowId,
    pub event: Event,
}

impl Notification {
    pub fn new(origin: WindowId, event: Event) -> Self {
        Self { origin, event }
    }
}

/// Behaviour switches that do not live in the settings file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PluginOptions {
    /// Show the grammar and style under the caret in the status bar
    pub inspect_styles: bool,
}

/// Plugin state for one editor instance
pub struct Plugin<H: EditorHost> {
    pub(crate) host: H,
    pub(crate) settings: Settings,
    pub(crate) overrides: BufferOverrides,
    pub(crate) view: View,
    options: PluginOptions,
    is_ready: bool,
    file_being_saved: Option<PathBuf>,
}

impl<H: EditorHost> Plugin<H> {
    /// Create the plugin and load its settings
    pub fn new(host: H) -> Self {
        Self::with_options(host, PluginOptions::default())
    }

    pub fn with_options(host: H, options: PluginOptions) -> Self {
        let mut plugin = Self {
            host,
            settings: Settings::new(),
            overrides: BufferOverrides::new(),
            view: View::Main,
            options,
            is_ready: false,
            file_being_saved: None,
        };
        plugin.reload_settings();
        plugin
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn overrides(&self) -> &BufferOverrides {
        &self.overrides
    }

    pub fn is_ready(&self) -> bool {
        self.is_ready
    }

    /// Path of the settings file currently in use
    pub fn settings_path(&self) -> PathBuf {
        settings_path(&self.host.plugins_config_dir())
    }

    /// Handle one editor notification.
    ///
    /// Lexer failures are reported to the user and never end the plugin.
    pub fn handle(&mut self, notification: Notification) {
        if !self.host.owns_window(notification.origin) {
            log::trace!(
                "Ignoring {:?} from unknown window {:?}",
                notification.event,
                notification.origin
            );
            return;
        }

        log::trace!("Handling {:?}", notification.event);
        match notification.event {
            Event::Ready => {
                self.on_ready();
                // The first buffer is activated before the editor is ready
                self.on_buffer_activated();
            }
            Event::BufferActivated(_) | Event::FileRenamed(_) => self.on_buffer_activated(),
            Event::FileBeforeSave(buffer) => {
                self.file_being_saved = self.host.full_path(buffer);
            }
            Event::FileSaved(buffer) => self.on_file_saved(buffer),
            Event::LanguageChanged(buffer) | Event::FileClosed(buffer) => {
                if let Some(language) = self.overrides.remove(buffer) {
                    log::debug!("Dropped {:?} override for buffer {}", language, buffer);
                }
            }
            Event::SelectionUpdated => self.on_selection_updated(),
        }
    }

    fn on_ready(&mut self) {
        let library = lexer_library_path(&self.host.plugins_config_dir());
        for view in View::ALL {
            self.host.session(view).load_lexer_library(&library);
        }
        log::info!("Loaded lexer library {:?}", library);

        self.reload_settings();
        self.is_ready = true;
    }

    fn on_buffer_activated(&mut self) {
        self.view = self.host.current_view();
        if !self.is_ready {
            return;
        }
        self.check_file_for_new_lexer();
    }

    fn on_file_saved(&mut self, buffer: BufferId) {
        let saved = self.host.full_path(buffer);
        let before = self.file_being_saved.take();

        if saved != before {
            log::debug!("Buffer {} was saved under a new name: {:?}", buffer, saved);
            self.check_file_for_new_lexer();
        } else if saved.as_deref() == Some(self.settings_path().as_path()) {
            log::info!("Settings file saved, reloading");
            self.reload_settings();
        } else if self.wants_lexer() {
            // A plain save re-derives the language from the file name
            self.bind_by_file_name();
        }
    }

    fn on_selection_updated(&mut self) {
        if !self.options.inspect_styles {
            return;
        }

        let view = self.host.current_view();
        let session = self.host.session(view);
        if session.lexer_language() != LPEG_LEXER {
            return;
        }

        let grammar = session.grammar_name();
        let style = session.style_at_caret();
        let name = session.style_name(style);
        self.host
            .set_status(&format!("{} ({}): {} {}", grammar, LPEG_LEXER, name, style));
    }

    fn check_file_for_new_lexer(&mut self) {
        let buffer = self.host.current_buffer();
        if let Some(language) = self.overrides.get(buffer).map(str::to_string) {
            log::debug!("Using {:?} override for buffer {}", language, buffer);
            self.apply(&language);
        } else if self.wants_lexer() {
            self.bind_by_file_name();
        }
    }

    /// Whether the active document should get a lexer from its file name
    fn wants_lexer(&mut self) -> bool {
        self.settings.override_enabled() || self.host.session(self.view).lexer_id() == NULL_LEXER
    }

    fn bind_by_file_name(&mut self) {
        let file_name = self.host.file_name(self.host.current_buffer());
        let language = resolve(&file_name, &self.settings)
            .unwrap_or_default()
            .to_string();
        log::debug!("Resolved {:?} to {:?}", file_name, language);
        self.apply(&language);
    }

    /// Bind `language` to the active view, reporting failures to the user
    pub(crate) fn apply(&mut self, language: &str) {
        if let Err(e) = binder::bind(&mut self.host, self.view, language, &self.settings) {
            log::error!("Failed to bind {:?}: {}", language, e);
            self.host.show_error(&e.to_string());
        }
    }

    /// Reload settings from disk, seeding the file on first run.
    ///
    /// An unreadable file keeps the current settings.
    pub fn reload_settings(&mut self) {
        let config_dir = self.host.plugins_config_dir();
        let path = match ensure_settings_file(&config_dir) {
            Ok(path) => path,
            Err(e) => {
                log::warn!("{:#}", e);
                settings_path(&config_dir)
            }
        };

        if let Err(e) = self.settings.reload_from(&path) {
            log::debug!("Keeping previous settings: {:#}", e);
        }
    }
}
