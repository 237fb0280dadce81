/// Backup document model and export handling
///
/// A backup is a single JSON object holding the StageLog datasets as
/// opaque JSON values plus the user's theme preference. Fields are
/// independently optional; a document counts as a StageLog backup only
/// if it carries at least one of the shows or performances datasets.
/// Values are trusted and written to the store verbatim.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::store::StageStore;
use crate::utils::{
    default_backup_filename, BACKUP_FILE_PREFIX, KEY_ACCESS_SCHEMES, KEY_PERFORMANCES, KEY_SHOWS,
    KEY_THEME,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackupDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stagelog_shows: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stagelog_performances: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stagelog_access_schemes: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_preferences: Option<UserPreferences>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl BackupDocument {
    /// Parse backup file contents. Unknown top-level fields are ignored.
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// A document is a restorable StageLog backup only if it carries
    /// shows or performances data
    pub fn is_valid(&self) -> bool {
        self.stagelog_performances.is_some() || self.stagelog_shows.is_some()
    }

    pub fn theme(&self) -> Option<&str> {
        self.user_preferences
            .as_ref()
            .and_then(|p| p.theme.as_deref())
    }

    /// Write every recognized field present in the document into the
    /// store. Datasets are stored as compact JSON text, the theme as a
    /// plain string. Returns the number of keys written. Does not
    /// persist; the caller decides when to flush.
    pub fn apply_to(&self, store: &mut dyn StageStore) -> usize {
        let mut written = 0;

        let datasets = [
            (KEY_SHOWS, &self.stagelog_shows),
            (KEY_PERFORMANCES, &self.stagelog_performances),
            (KEY_ACCESS_SCHEMES, &self.stagelog_access_schemes),
        ];

        for (key, value) in datasets {
            if let Some(value) = value {
                store.set(key, value.to_string());
                written += 1;
            }
        }

        if let Some(theme) = self.theme() {
            store.set(KEY_THEME, theme.to_string());
            written += 1;
        }

        written
    }

    /// Build a document from the store's current recognized entries.
    /// Stored dataset entries are JSON text and are re-embedded as JSON
    /// values so the exported file stays a single readable object.
    pub fn from_store(store: &dyn StageStore) -> Result<Self> {
        let user_preferences = store.get(KEY_THEME).map(|theme| UserPreferences {
            theme: Some(theme.to_string()),
        });

        Ok(Self {
            stagelog_shows: read_dataset(store, KEY_SHOWS)?,
            stagelog_performances: read_dataset(store, KEY_PERFORMANCES)?,
            stagelog_access_schemes: read_dataset(store, KEY_ACCESS_SCHEMES)?,
            user_preferences,
        })
    }
}

fn read_dataset(store: &dyn StageStore, key: &str) -> Result<Option<Value>> {
    match store.get(key) {
        Some(text) => {
            let value: Value = serde_json::from_str(text)
                .with_context(|| format!("Stored entry {} is not valid JSON", key))?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// Export the store's recognized entries to a backup file.
/// Refuses to write a file that would not pass restore validation.
pub fn write_backup(
    store: &dyn StageStore,
    output: Option<PathBuf>,
    backup_dir: &Path,
) -> Result<PathBuf> {
    let doc = BackupDocument::from_store(store)?;

    if !doc.is_valid() {
        bail!("Nothing to back up: the store holds no shows or performances data");
    }

    let path = match output {
        Some(path) => path,
        None => backup_dir.join(default_backup_filename()),
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .context("Failed to create backup directory")?;
    }

    let content = serde_json::to_string_pretty(&doc)
        .context("Failed to serialize backup document")?;

    fs::write(&path, content)
        .with_context(|| format!("Failed to write backup file {}", path.display()))?;

    Ok(path)
}

/// A backup file found in the backup directory
#[derive(Debug, Clone)]
pub struct BackupFileInfo {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified: DateTime<Local>,
}

/// List generated backup files, newest first
pub fn list_backups(backup_dir: &Path) -> Result<Vec<BackupFileInfo>> {
    let mut backups = Vec::new();

    if !backup_dir.exists() {
        return Ok(backups);
    }

    for entry in fs::read_dir(backup_dir).context("Failed to read backup directory")? {
        let entry = entry?;
        let path = entry.path();

        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };

        if !name.starts_with(BACKUP_FILE_PREFIX) || !name.ends_with(".json") {
            continue;
        }

        let metadata = entry.metadata()?;
        let modified = metadata
            .modified()
            .map(DateTime::<Local>::from)
            .unwrap_or_else(|_| Local::now());

        backups.push(BackupFileInfo {
            path,
            size_bytes: metadata.len(),
            modified,
        });
    }

    backups.sort_by(|a, b| b.modified.cmp(&a.modified));

    Ok(backups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(BackupDocument::parse("{not json").is_err());
        assert!(BackupDocument::parse("").is_err());
    }

    #[test]
    fn test_validation_requires_identifying_field() {
        let empty = BackupDocument::parse("{}").unwrap();
        assert!(!empty.is_valid());

        let theme_only =
            BackupDocument::parse(r#"{"user_preferences":{"theme":"dark"}}"#).unwrap();
        assert!(!theme_only.is_valid());

        let shows_only = BackupDocument::parse(r#"{"stagelog_shows":[]}"#).unwrap();
        assert!(shows_only.is_valid());

        let performances_only =
            BackupDocument::parse(r#"{"stagelog_performances":[]}"#).unwrap();
        assert!(performances_only.is_valid());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let doc =
            BackupDocument::parse(r#"{"stagelog_shows":[],"exported_by":"stagelog"}"#).unwrap();
        assert!(doc.is_valid());
    }

    #[test]
    fn test_apply_writes_datasets_as_json_text_and_theme_verbatim() {
        let doc = BackupDocument::parse(
            r#"{
                "stagelog_shows": [{"id": 1}],
                "stagelog_performances": [],
                "stagelog_access_schemes": {"default": true},
                "user_preferences": {"theme": "dark"}
            }"#,
        )
        .unwrap();

        let mut store = MemoryStore::new();
        let written = doc.apply_to(&mut store);

        assert_eq!(written, 4);
        assert_eq!(store.get(KEY_SHOWS), Some(r#"[{"id":1}]"#));
        assert_eq!(store.get(KEY_PERFORMANCES), Some("[]"));
        assert_eq!(store.get(KEY_ACCESS_SCHEMES), Some(r#"{"default":true}"#));
        assert_eq!(store.get(KEY_THEME), Some("dark"));
    }

    #[test]
    fn test_apply_partial_document_writes_exactly_present_fields() {
        let doc = BackupDocument {
            stagelog_shows: Some(json!([1, 2, 3])),
            ..Default::default()
        };

        let mut store = MemoryStore::new();
        let written = doc.apply_to(&mut store);

        assert_eq!(written, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(KEY_SHOWS), Some("[1,2,3]"));
    }

    #[test]
    fn test_export_then_restore_round_trips() {
        let tmp = TempDir::new().unwrap();

        let mut source = MemoryStore::new();
        source.set(KEY_SHOWS, r#"[{"id":1}]"#.to_string());
        source.set(KEY_PERFORMANCES, "[]".to_string());
        source.set(KEY_THEME, "light".to_string());

        let path = write_backup(&source, None, tmp.path()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let doc = BackupDocument::parse(&text).unwrap();
        assert!(doc.is_valid());

        let mut target = MemoryStore::new();
        doc.apply_to(&mut target);

        assert_eq!(target.get(KEY_SHOWS), Some(r#"[{"id":1}]"#));
        assert_eq!(target.get(KEY_PERFORMANCES), Some("[]"));
        assert_eq!(target.get(KEY_THEME), Some("light"));
        assert_eq!(target.get(KEY_ACCESS_SCHEMES), None);
    }

    #[test]
    fn test_export_refuses_empty_store() {
        let tmp = TempDir::new().unwrap();
        let store = MemoryStore::new();

        assert!(write_backup(&store, None, tmp.path()).is_err());
    }

    #[test]
    fn test_list_backups_filters_by_name() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("stagelog-backup-20240101-120000.json"), "{}").unwrap();
        std::fs::write(tmp.path().join("stagelog-backup-20240102-120000.json"), "{}").unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "").unwrap();
        std::fs::write(tmp.path().join("storage.json"), "{}").unwrap();

        let backups = list_backups(tmp.path()).unwrap();
        assert_eq!(backups.len(), 2);
    }

    #[test]
    fn test_list_backups_missing_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        let backups = list_backups(&tmp.path().join("nope")).unwrap();
        assert!(backups.is_empty());
    }
}
