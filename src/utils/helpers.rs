/// Helper utilities for the StageLog CLI

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::PathBuf;

use crate::utils::{AppConfig, BACKUP_FILE_PREFIX, DEFAULT_PROFILE_DIR_NAME, ENV_PROFILE_DIR};

/// Resolve the StageLog profile directory.
///
/// Resolution order:
/// 1. Explicit --profile-dir flag (saved for future runs)
/// 2. STAGELOG_PROFILE_DIR environment variable
/// 3. Directory saved in ~/.config/stagelog-cli/config.toml
/// 4. Platform data dir, e.g. ~/.local/share/stagelog
pub fn resolve_profile_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        let dir = ensure_dir(dir)?;

        // Save to config for future use
        if let Ok(mut config) = AppConfig::load() {
            let _ = config.set_profile_dir(dir.clone());
        }

        return Ok(dir);
    }

    if let Ok(dir) = std::env::var(ENV_PROFILE_DIR) {
        return ensure_dir(PathBuf::from(dir));
    }

    if let Ok(config) = AppConfig::load() {
        if let Some(dir) = config.profile_dir {
            let path = PathBuf::from(&dir);
            if path.exists() {
                return Ok(path);
            }
        }
    }

    let base = dirs::data_dir()
        .context("Failed to determine platform data directory")?;
    ensure_dir(base.join(DEFAULT_PROFILE_DIR_NAME))
}

fn ensure_dir(dir: PathBuf) -> Result<PathBuf> {
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create profile directory {}", dir.display()))?;
    Ok(dir)
}

/// Default file name for a newly created backup
pub fn default_backup_filename() -> String {
    format!(
        "{}{}.json",
        BACKUP_FILE_PREFIX,
        Local::now().format("%Y%m%d-%H%M%S")
    )
}

/// Format bytes to human-readable string
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1_000;
    const MB: u64 = 1_000_000;
    const GB: u64 = 1_000_000_000;

    if bytes >= GB {
        format!("{:.1}GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.0}MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.0}KB", bytes as f64 / KB as f64)
    } else {
        format!("{}B", bytes)
    }
}

/// Truncate a stored value for single-line display
pub fn truncate_value(value: &str, max_chars: usize) -> String {
    let flat: String = value
        .chars()
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();

    if flat.chars().count() <= max_chars {
        flat
    } else {
        let cut: String = flat.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_profile_dir_explicit_flag() {
        let tmp = TempDir::new().unwrap();
        let wanted = tmp.path().join("profile");

        let resolved = resolve_profile_dir(Some(wanted.clone())).unwrap();
        assert_eq!(resolved, wanted);
        assert!(wanted.exists());
    }

    #[test]
    fn test_default_backup_filename() {
        let name = default_backup_filename();
        assert!(name.starts_with(BACKUP_FILE_PREFIX));
        assert!(name.ends_with(".json"));
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512B");
        assert_eq!(format_bytes(2_000), "2KB");
        assert_eq!(format_bytes(3_500_000), "4MB");
        assert_eq!(format_bytes(1_500_000_000), "1.5GB");
    }

    #[test]
    fn test_truncate_value() {
        assert_eq!(truncate_value("short", 10), "short");
        assert_eq!(truncate_value("0123456789abc", 10), "0123456789...");
        assert_eq!(truncate_value("a\nb", 10), "a b");
    }
}
