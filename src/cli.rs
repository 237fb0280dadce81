/// CLI argument parsing and command handling

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// Build timestamp injected at compile time
pub const VERSION_WITH_BUILD: &str = concat!(env!("CARGO_PKG_VERSION"), " (built: ", env!("BUILD_TIMESTAMP"), ")");

#[derive(Parser)]
#[command(name = "stagelog-cli")]
#[command(author, version = VERSION_WITH_BUILD, about, long_about = None)]
pub struct Cli {
    /// StageLog profile directory (defaults to the platform data dir)
    #[arg(long, global = true)]
    pub profile_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the manual restore procedure
    Instructions,

    /// Restore StageLog data from a backup file
    Restore {
        /// Backup file to restore (.json); prompted for if omitted
        file: Option<PathBuf>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Backup operations
    Backup {
        #[command(subcommand)]
        command: BackupCommands,
    },

    /// Inspect the profile store
    Store {
        #[command(subcommand)]
        command: StoreCommands,
    },
}

#[derive(Subcommand)]
pub enum BackupCommands {
    /// Export the current StageLog data to a backup file
    Create {
        /// Output file (defaults to stagelog-backup-<timestamp>.json
        /// in the profile directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List backup files in the profile directory
    List,
}

#[derive(Subcommand)]
pub enum StoreCommands {
    /// View current store entries
    View,
}
