/// Restore orchestration
///
/// Drives the import flow end to end: resolve the backup file, read
/// and parse it, validate the minimal shape, ask for explicit
/// confirmation, write the recognized entries into the store, then
/// signal the app to reload. The flow is linear; nothing is written
/// before the user confirms, and a rejected or cancelled run leaves
/// the store untouched.

use anyhow::{Context, Result};
use std::path::PathBuf;
use thiserror::Error;

use crate::core::backup::BackupDocument;
use crate::core::prompt::Prompter;
use crate::core::reload::Reloader;
use crate::core::store::StageStore;

#[derive(Debug, Error)]
pub enum RestoreError {
    #[error("Could not read backup file {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid file: the selected file is not valid JSON")]
    Parse(#[source] serde_json::Error),

    #[error("Invalid backup: no shows or performances data found")]
    Validation,
}

/// How an import run ended. Rejected runs have already been reported
/// to the user through the prompter.
#[derive(Debug)]
pub enum RestoreOutcome {
    Completed { keys_written: usize },
    Cancelled,
    Rejected(RestoreError),
}

pub struct RestoreManager<'a> {
    store: &'a mut dyn StageStore,
    prompter: &'a dyn Prompter,
    reloader: &'a dyn Reloader,
}

impl<'a> RestoreManager<'a> {
    pub fn new(
        store: &'a mut dyn StageStore,
        prompter: &'a dyn Prompter,
        reloader: &'a dyn Reloader,
    ) -> Self {
        Self {
            store,
            prompter,
            reloader,
        }
    }

    /// Run one import. `file` skips the selection prompt; otherwise the
    /// prompter asks for a path. Cancelling the selection or declining
    /// the confirmation ends the run silently with no writes.
    pub async fn begin_import(&mut self, file: Option<PathBuf>) -> Result<RestoreOutcome> {
        let path = match file {
            Some(path) => path,
            None => match self.prompter.pick_file()? {
                Some(path) => path,
                None => return Ok(RestoreOutcome::Cancelled),
            },
        };

        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(source) => {
                return Ok(self.reject(RestoreError::Read { path, source }));
            }
        };

        let document = match BackupDocument::parse(&text) {
            Ok(document) => document,
            Err(e) => return Ok(self.reject(RestoreError::Parse(e))),
        };

        if !document.is_valid() {
            return Ok(self.reject(RestoreError::Validation));
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let question = format!(
            "Restore backup from \"{}\"? This overwrites your current StageLog data",
            file_name
        );
        if !self.prompter.confirm(&question)? {
            return Ok(RestoreOutcome::Cancelled);
        }

        let keys_written = document.apply_to(self.store);
        self.store
            .persist()
            .context("Failed to persist restored entries")?;

        self.prompter.info(&format!(
            "✓ Backup restored ({} entries written), reloading StageLog",
            keys_written
        ));

        self.reloader
            .request_reload()
            .context("Failed to signal application reload")?;

        Ok(RestoreOutcome::Completed { keys_written })
    }

    fn reject(&self, error: RestoreError) -> RestoreOutcome {
        self.prompter.alert(&error.to_string());
        RestoreOutcome::Rejected(error)
    }
}

/// Display the manual restore procedure. No data access.
pub fn show_instructions(prompter: &dyn Prompter) {
    prompter.info("StageLog restore procedure:");
    prompter.info("");
    prompter.info("  1. Create a backup on the machine that has your data:");
    prompter.info("       stagelog-cli backup create");
    prompter.info("  2. Start the restore and pick the backup file:");
    prompter.info("       stagelog-cli restore <file.json>");
    prompter.info("     (or run 'stagelog-cli restore' and enter the path when asked)");
    prompter.info("  3. Confirm the overwrite when prompted");
    prompter.info("");
    prompter.info("Restoring overwrites the shows, performances, access schemes and");
    prompter.info("theme entries in your StageLog profile, then reloads the app.");
}
