//! Scripted Replay
//!
//! Drives the plugin through a recorded editor session without a real
//! editor: a `Script` lists user actions, `ScriptedHost` turns them into the
//! notifications the editor would send, and every observable effect ends
//! up in a `Transcript`.

pub mod host;
pub mod script;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

pub use host::{EDITOR_WINDOW, Effect, RecordingSession, STRAY_WINDOW, ScriptedHost};
pub use script::{Script, Step};

use crate::language::settings_path;
use crate::plugin::{Event, MenuCommand, Notification, Plugin, PluginOptions};

/// Effects produced by one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptEntry {
    pub step: &'static str,
    pub effects: Vec<Effect>,
}

/// Everything a replay produced, step by step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transcript {
    pub entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// All effects in order, regardless of step
    pub fn effects(&self) -> impl Iterator<Item = &Effect> {
        self.entries.iter().flat_map(|entry| entry.effects.iter())
    }

    /// Grammars colourised, in order
    pub fn grammars(&self) -> Vec<&str> {
        self.effects()
            .filter_map(|effect| match effect {
                Effect::Colourised { grammar, .. } => Some(grammar.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.effects()
            .filter_map(|effect| match effect {
                Effect::Error { message } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Load a replay script from a JSON file
pub fn load_script(path: &Path) -> Result<Script> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read replay script: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse replay script: {}", path.display()))
}

/// Run `script` with `config_dir` as the plugins config directory
pub fn run(config_dir: &Path, script: Script, options: PluginOptions) -> Result<Transcript> {
    Ok(run_with_plugin(config_dir, script, options)?.0)
}

/// Like `run`, also handing back the plugin for inspection
pub fn run_with_plugin(
    config_dir: &Path,
    script: Script,
    options: PluginOptions,
) -> Result<(Transcript, Plugin<ScriptedHost>)> {
    if let Some(text) = &script.settings {
        write_settings(config_dir, text)?;
    }

    let host = ScriptedHost::new(config_dir, script.library, script.grammars.clone());
    let mut plugin = Plugin::with_options(host, options);
    let mut transcript = Transcript::default();

    for (index, step) in script.steps.into_iter().enumerate() {
        let name = step.name();
        apply_step(&mut plugin, config_dir, step)
            .with_context(|| format!("Step {} ({}) failed", index + 1, name))?;
        transcript.entries.push(TranscriptEntry {
            step: name,
            effects: plugin.host_mut().take_effects(),
        });
    }

    Ok((transcript, plugin))
}

fn write_settings(config_dir: &Path, text: &str) -> Result<()> {
    fs::create_dir_all(config_dir)
        .with_context(|| format!("Failed to create {}", config_dir.display()))?;
    let path = settings_path(config_dir);
    fs::write(&path, text)
        .with_context(|| format!("Failed to write settings file: {}", path.display()))
}

fn notify(plugin: &mut Plugin<ScriptedHost>, event: Event) {
    plugin.handle(Notification::new(EDITOR_WINDOW, event));
}

fn apply_step(plugin: &mut Plugin<ScriptedHost>, config_dir: &Path, step: Step) -> Result<()> {
    match step {
        Step::Ready => notify(plugin, Event::Ready),
        Step::Open {
            buffer,
            path,
            view,
            lexer,
        } => {
            plugin.host_mut().open(buffer, path, view, lexer.as_deref());
            notify(plugin, Event::BufferActivated(buffer));
        }
        Step::Activate { buffer } => {
            plugin.host_mut().activate(buffer)?;
            notify(plugin, Event::BufferActivated(buffer));
        }
        Step::Rename { buffer, path } => {
            plugin.host_mut().set_path(buffer, path)?;
            notify(plugin, Event::FileRenamed(buffer));
        }
        Step::Save { buffer } => {
            notify(plugin, Event::FileBeforeSave(buffer));
            notify(plugin, Event::FileSaved(buffer));
        }
        Step::SaveAs { buffer, path } => {
            notify(plugin, Event::FileBeforeSave(buffer));
            plugin.host_mut().set_path(buffer, path)?;
            notify(plugin, Event::FileSaved(buffer));
        }
        Step::LanguageChanged { buffer, lexer } => {
            plugin.host_mut().change_language(buffer, &lexer)?;
            notify(plugin, Event::LanguageChanged(buffer));
        }
        Step::Close { buffer } => {
            notify(plugin, Event::FileClosed(buffer));
            plugin.host_mut().close(buffer)?;
        }
        Step::SetLanguage { language } => {
            plugin.host_mut().set_picker_answer(language);
            plugin.run_command(MenuCommand::SetLanguage);
        }
        Step::EditSettings => plugin.run_command(MenuCommand::EditSettings),
        Step::About => plugin.run_command(MenuCommand::About),
        Step::WriteSettings { text } => write_settings(config_dir, &text)?,
        Step::MoveCaret { style } => {
            plugin.host_mut().set_caret_style(style);
            notify(plugin, Event::SelectionUpdated);
        }
        Step::Stray { buffer } => {
            plugin.handle(Notification::new(STRAY_WINDOW, Event::BufferActivated(buffer)));
        }
    }
    Ok(())
}
