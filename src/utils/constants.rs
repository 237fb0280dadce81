/// StageLog store keys and file name conventions
///
/// Key names match what the StageLog app itself writes, so a restore
/// drops values exactly where the app expects to find them.

/// Serialized shows dataset
pub const KEY_SHOWS: &str = "stagelog_shows";

/// Serialized performances dataset
pub const KEY_PERFORMANCES: &str = "stagelog_performances";

/// Serialized access schemes dataset
pub const KEY_ACCESS_SCHEMES: &str = "stagelog_access_schemes";

/// UI theme preference (plain string, not JSON)
pub const KEY_THEME: &str = "theme";

/// Keys the restorer knows how to map from a backup document
pub const RECOGNIZED_KEYS: &[&str] = &[
    KEY_SHOWS,
    KEY_PERFORMANCES,
    KEY_ACCESS_SCHEMES,
    KEY_THEME,
];

/// Store object file inside the profile directory
pub const STORE_FILE: &str = "storage.json";

/// Marker file the running app watches to trigger a full reload
pub const RELOAD_SIGNAL_FILE: &str = "reload.signal";

/// Prefix for generated backup file names
pub const BACKUP_FILE_PREFIX: &str = "stagelog-backup-";

/// Default profile directory name under the platform data dir
pub const DEFAULT_PROFILE_DIR_NAME: &str = "stagelog";

/// Environment variable overriding the profile directory
pub const ENV_PROFILE_DIR: &str = "STAGELOG_PROFILE_DIR";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_keys() {
        assert_eq!(RECOGNIZED_KEYS.len(), 4);
        assert!(RECOGNIZED_KEYS.contains(&KEY_SHOWS));
        assert!(RECOGNIZED_KEYS.contains(&KEY_THEME));
    }
}
