//! script-archive - inspect and edit a script archive volume from the shell

mod commands;

use anyhow::Result;
use archive_core::{Archive, ArchiveConfig, ArchiveError};
use archive_log::LogOptions;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "script-archive", version, about)]
struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, env = "SCRIPT_ARCHIVE_CONFIG")]
    config: Option<PathBuf>,

    /// Volume root, overriding the configuration
    #[arg(long, env = "SCRIPT_ARCHIVE_ROOT")]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every file in the archive
    List,

    /// Print a file; bytecode is summarized
    Cat {
        name: String,

        /// Prefer whichever of script/bytecode is newer
        #[arg(long)]
        newest: bool,
    },

    /// Store a host file in the archive
    Save {
        name: String,
        source: PathBuf,

        /// Store as compiled bytecode regardless of content
        #[arg(long)]
        compiled: bool,
    },

    /// Delete a file
    Rm { name: String },

    /// Rename a file on disk
    Mv { name: String, new_name: String },

    /// Show volume facts
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ArchiveConfig::load_from(path).map_err(ArchiveError::from)?,
        None => ArchiveConfig::load().unwrap_or_default(),
    };
    if let Some(root) = cli.root {
        config.archive.root = root;
    }

    let log_options = LogOptions {
        directory: config
            .logging
            .directory
            .clone()
            .unwrap_or_else(archive_log::log_dir),
        level: config.logging.level.clone(),
    };
    archive_log::init(&log_options, Some(config.archive.root.clone()))?;

    if let Err(e) = archive_log::cleanup_old_logs(&log_options.directory, config.logging.keep_days) {
        tracing::warn!("Failed to cleanup old logs: {}", e);
    }

    let mut archive = Archive::from_config(&config)?;

    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::List => commands::list(&archive, &mut stdout),
        Command::Cat { name, newest } => commands::cat(
            &mut archive,
            &name,
            newest || config.archive.timestamp_priority,
            &mut stdout,
        ),
        Command::Save { name, source, compiled } => {
            commands::save(&mut archive, &name, &source, compiled)
        }
        Command::Rm { name } => commands::remove(&mut archive, &name),
        Command::Mv { name, new_name } => commands::rename(&mut archive, &name, &new_name),
        Command::Info => commands::info(&archive, &mut stdout),
    }
}
