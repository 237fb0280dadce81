mod cli;
mod core;
mod utils;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};

use cli::{BackupCommands, Cli, Commands, StoreCommands};
use crate::core::{ConsolePrompter, LocalStore, MarkerReloader, RestoreManager, StageStore};
use utils::{format_bytes, resolve_profile_dir, truncate_value, RECOGNIZED_KEYS, STORE_FILE};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            let profile_dir = resolve_profile_dir(cli.profile_dir)?;
            println!("stagelog-cli - backup and restore companion for StageLog");
            println!();
            println!("Profile: {}", profile_dir.display());
            println!();
            println!("Common commands:");
            println!("  stagelog-cli backup create      Export your data to a backup file");
            println!("  stagelog-cli restore <file>     Restore data from a backup file");
            println!("  stagelog-cli instructions       Show the manual restore procedure");
            println!();
            println!("Run 'stagelog-cli --help' for the full command list.");
        }
        Some(Commands::Instructions) => {
            let prompter = ConsolePrompter::new();
            crate::core::restore::show_instructions(&prompter);
        }
        Some(Commands::Restore { file, yes }) => {
            let profile_dir = resolve_profile_dir(cli.profile_dir)?;
            handle_restore(&profile_dir, file, yes).await?;
        }
        Some(Commands::Backup { command }) => {
            let profile_dir = resolve_profile_dir(cli.profile_dir)?;
            handle_backup(&profile_dir, command)?;
        }
        Some(Commands::Store { command }) => {
            let profile_dir = resolve_profile_dir(cli.profile_dir)?;
            handle_store(&profile_dir, command)?;
        }
    }

    Ok(())
}

async fn handle_restore(profile_dir: &Path, file: Option<PathBuf>, yes: bool) -> Result<()> {
    let mut store = LocalStore::load(profile_dir.join(STORE_FILE))?;
    let prompter = if yes {
        ConsolePrompter::with_assume_yes()
    } else {
        ConsolePrompter::new()
    };
    let reloader = MarkerReloader::new(profile_dir);

    let mut manager = RestoreManager::new(&mut store, &prompter, &reloader);
    manager.begin_import(file).await?;

    Ok(())
}

fn handle_backup(profile_dir: &Path, command: BackupCommands) -> Result<()> {
    match command {
        BackupCommands::Create { output } => {
            let store = LocalStore::load(profile_dir.join(STORE_FILE))?;
            let path = crate::core::backup::write_backup(&store, output, profile_dir)?;
            println!("✓ Backup written to {}", path.display().to_string().green());
            println!("\nRestore it later with:");
            println!("  stagelog-cli restore {}", path.display());
        }
        BackupCommands::List => {
            let backups = crate::core::backup::list_backups(profile_dir)?;

            if backups.is_empty() {
                println!("No backups found in {}", profile_dir.display());
                println!("\nCreate one with: stagelog-cli backup create");
                return Ok(());
            }

            println!("Backups in {}\n", profile_dir.display());
            println!("{:<45} {:<10} {:<20}", "File", "Size", "Modified");
            println!("{}", "-".repeat(75));

            for backup in backups {
                let name = backup
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                println!(
                    "{:<45} {:<10} {:<20}",
                    name,
                    format_bytes(backup.size_bytes),
                    backup.modified.format("%Y-%m-%d %H:%M:%S")
                );
            }
        }
    }

    Ok(())
}

fn handle_store(profile_dir: &Path, command: StoreCommands) -> Result<()> {
    match command {
        StoreCommands::View => {
            let store = LocalStore::load(profile_dir.join(STORE_FILE))?;
            let keys = store.keys();

            if keys.is_empty() {
                println!("Store is empty ({})", store.path().display());
                return Ok(());
            }

            println!("Store entries in {}\n", store.path().display());
            for key in keys {
                if let Some(value) = store.get(&key) {
                    // Entries outside the backup's recognized set are
                    // shown but never touched by restore/export
                    let marker = if RECOGNIZED_KEYS.contains(&key.as_str()) {
                        ""
                    } else {
                        " (not covered by backups)"
                    };
                    println!(
                        "{}: {}{}",
                        key.bold(),
                        truncate_value(value, 60),
                        marker.dimmed()
                    );
                }
            }
        }
    }

    Ok(())
}
