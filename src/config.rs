//! Configuration management for the `lpeg-bind` command-line tool.
//!
//! Handles:
//! - Command-line argument parsing
//! - Plugins config directory selection

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};

/// Command-line arguments for `lpeg-bind`
#[derive(Debug, Parser)]
#[command(name = "lpeg-bind")]
#[command(about = "Pick LPeg lexer languages for files from an LPegBinder.ini")]
#[command(version)]
pub struct Args {
    /// Plugins config directory holding the settings file
    #[arg(long, help = "Directory containing LPegBinder.ini")]
    pub config_dir: Option<PathBuf>,

    /// Log level
    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the language each file would be bound to
    Resolve {
        /// Print JSON instead of tab-separated text
        #[arg(long)]
        json: bool,

        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// List configured languages in match order
    Languages,

    /// Create the settings file from the default template if missing
    Init,

    /// Run a JSON replay script and print the transcript
    Replay {
        /// Report the style under the caret on move_caret steps
        #[arg(long)]
        inspect_styles: bool,

        script: PathBuf,
    },

    /// Re-resolve files whenever the settings file changes
    Watch {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Plugins config directory
    pub config_dir: PathBuf,
    /// Log filter handed to env_logger
    pub log_level: String,
    pub command: Command,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let config_dir = match args.config_dir {
            Some(dir) => dir,
            None => default_config_dir()?,
        };

        Ok(Config {
            config_dir,
            log_level: args.log_level,
            command: args.command,
        })
    }
}

/// `<user config dir>/lpeg-binder`
pub fn default_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("lpeg-binder"))
        .ok_or_else(|| anyhow!("Could not determine the user config directory"))
}
