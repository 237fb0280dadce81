/// Application reload signal
///
/// A completed restore must make the running StageLog app pick up the
/// new store contents. The app watches a marker file in its profile
/// directory and does a full reload when the marker changes.

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::RELOAD_SIGNAL_FILE;

#[cfg_attr(test, mockall::automock)]
pub trait Reloader {
    fn request_reload(&self) -> Result<()>;
}

/// Touches reload.signal in the profile directory with the current time
pub struct MarkerReloader {
    profile_dir: PathBuf,
}

impl MarkerReloader {
    pub fn new<P: AsRef<Path>>(profile_dir: P) -> Self {
        Self {
            profile_dir: profile_dir.as_ref().to_path_buf(),
        }
    }
}

impl Reloader for MarkerReloader {
    fn request_reload(&self) -> Result<()> {
        fs::create_dir_all(&self.profile_dir)
            .context("Failed to create profile directory")?;

        let marker = self.profile_dir.join(RELOAD_SIGNAL_FILE);
        fs::write(&marker, Local::now().to_rfc3339())
            .context("Failed to write reload signal")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use tempfile::TempDir;

    #[test]
    fn test_reload_writes_marker_with_timestamp() {
        let tmp = TempDir::new().unwrap();
        let reloader = MarkerReloader::new(tmp.path());

        reloader.request_reload().unwrap();

        let content = std::fs::read_to_string(tmp.path().join(RELOAD_SIGNAL_FILE)).unwrap();
        assert!(DateTime::parse_from_rfc3339(&content).is_ok());
    }

    #[test]
    fn test_reload_overwrites_existing_marker() {
        let tmp = TempDir::new().unwrap();
        let reloader = MarkerReloader::new(tmp.path());

        reloader.request_reload().unwrap();
        reloader.request_reload().unwrap();

        assert!(tmp.path().join(RELOAD_SIGNAL_FILE).exists());
    }
}
