//! `lpeg-bind` subcommands

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::Serialize;

use crate::config::{Command, Config};
use crate::language::{Settings, ensure_settings_file, resolve, settings_path};
use crate::plugin::PluginOptions;
use crate::replay;

/// Parse arguments, set up logging and run the requested subcommand
pub fn run() -> Result<()> {
    let config = Config::from_args_and_env()?;
    init_logging(&config.log_level);

    let stdout = io::stdout();
    execute(&config, &mut stdout.lock())
}

fn init_logging(level: &str) {
    // RUST_LOG wins over --log-level
    let _ = env_logger::Builder::new()
        .parse_filters(level)
        .parse_default_env()
        .try_init();
}

/// Run `config.command`, writing results to `out`
pub fn execute(config: &Config, out: &mut impl Write) -> Result<()> {
    match &config.command {
        Command::Resolve { json, files } => {
            let settings = load_settings(&config.config_dir)?;
            write_resolutions(out, &settings, files, *json)
        }
        Command::Languages => {
            let settings = load_settings(&config.config_dir)?;
            write_languages(out, &settings)
        }
        Command::Init => {
            let path = ensure_settings_file(&config.config_dir)?;
            writeln!(out, "{}", path.display())?;
            Ok(())
        }
        Command::Replay {
            inspect_styles,
            script,
        } => {
            let script = replay::load_script(script)?;
            let options = PluginOptions {
                inspect_styles: *inspect_styles,
            };
            let transcript = replay::run(&config.config_dir, script, options)?;
            serde_json::to_writer_pretty(&mut *out, &transcript)?;
            writeln!(out)?;
            Ok(())
        }
        Command::Watch { files } => watch(&config.config_dir, files, out),
    }
}

fn load_settings(config_dir: &Path) -> Result<Settings> {
    let path = settings_path(config_dir);
    let mut settings = Settings::new();
    settings
        .reload_from(&path)
        .context("Run `lpeg-bind init` to create a settings file")?;
    Ok(settings)
}

#[derive(Debug, Serialize)]
struct Resolution<'a> {
    file: String,
    language: Option<&'a str>,
}

fn resolutions<'a>(settings: &'a Settings, files: &[PathBuf]) -> Vec<Resolution<'a>> {
    files
        .iter()
        .map(|file| {
            // Only the file name takes part in matching
            let name = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            Resolution {
                file: file.display().to_string(),
                language: resolve(&name, settings),
            }
        })
        .collect()
}

fn write_resolutions(
    out: &mut impl Write,
    settings: &Settings,
    files: &[PathBuf],
    json: bool,
) -> Result<()> {
    let resolutions = resolutions(settings, files);
    if json {
        serde_json::to_writer_pretty(&mut *out, &resolutions)?;
        writeln!(out)?;
    } else {
        for resolution in resolutions {
            writeln!(
                out,
                "{}\t{}",
                resolution.file,
                resolution.language.unwrap_or("-")
            )?;
        }
    }
    out.flush()?;
    Ok(())
}

fn write_languages(out: &mut impl Write, settings: &Settings) -> Result<()> {
    writeln!(out, "theme\t{}", settings.theme())?;
    writeln!(out, "override\t{}", settings.override_enabled())?;
    for (language, patterns) in settings.languages() {
        writeln!(out, "{}\t{}", language, patterns.join(";"))?;
    }
    Ok(())
}

fn watch(config_dir: &Path, files: &[PathBuf], out: &mut impl Write) -> Result<()> {
    let path = settings_path(config_dir);
    let mut settings = load_settings(config_dir)?;
    write_resolutions(out, &settings, files, false)?;

    let (tx, rx) = mpsc::channel::<notify::Result<notify::Event>>();
    let mut watcher = RecommendedWatcher::new(
        tx,
        notify::Config::default().with_poll_interval(Duration::from_secs(1)),
    )?;
    // Editors often replace the file, so watch its directory
    watcher
        .watch(config_dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch {}", config_dir.display()))?;
    log::info!("Watching {:?}", path);

    for result in rx {
        match result {
            Ok(event) => {
                let touched = event
                    .paths
                    .iter()
                    .any(|changed| changed.file_name() == path.file_name());
                if !touched || !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
                    continue;
                }

                match settings.reload_from(&path) {
                    Ok(()) => {
                        log::info!("Settings file changed, reloaded");
                        writeln!(out)?;
                        write_resolutions(out, &settings, files, false)?;
                    }
                    Err(e) => log::warn!("{:#}", e),
                }
            }
            Err(e) => log::error!("Settings watcher error: {}", e),
        }
    }

    Ok(())
}
