use super::snapshot::CharacterSnapshot;
use super::types::Character;
use crate::core::constants::{
    AUTO_SAVE_KEY, MAX_AUTO_SAVES, QUICK_SAVE_KEY, SAVE_FORMAT_VERSION, SAVE_PREFIX,
};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing saves.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("checksum mismatch in save '{0}'")]
    ChecksumMismatch(String),

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("save '{0}' not found")]
    NotFound(String),

    #[error("invalid save key '{0}'")]
    InvalidKey(String),

    #[error("invalid backup: {0}")]
    InvalidBackup(String),

    #[error("could not determine save directory")]
    NoSaveDirectory,
}

pub type Result<T> = std::result::Result<T, SaveError>;

/// On-disk wrapper around a character snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SaveEnvelope {
    character: Value,
    /// RFC 3339 timestamp.
    save_date: String,
    version: String,
    #[serde(default)]
    auto_save: bool,
    checksum: String,
}

/// Backup of every save, as produced by [`SaveManager::export_saves`].
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveExport {
    version: String,
    export_date: String,
    saves: Vec<ExportedSave>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ExportedSave {
    filename: String,
    data: Value,
}

/// Summary of one save slot, as shown in a load menu.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveInfo {
    pub key: String,
    pub character_name: String,
    pub class_name: String,
    pub level: u32,
    pub gold: u32,
    pub dragon_shards: u32,
    pub save_date: Option<DateTime<Utc>>,
    pub is_auto_save: bool,
    pub is_quick_save: bool,
    pub is_corrupted: bool,
}

/// Manages named, quick and auto saves as checksummed JSON files.
pub struct SaveManager {
    save_dir: PathBuf,
}

impl SaveManager {
    /// Uses the platform data directory from the `directories` crate.
    pub fn new() -> Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "druids").ok_or(SaveError::NoSaveDirectory)?;
        Self::with_dir(project_dirs.data_dir())
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Result<Self> {
        let save_dir = dir.into();
        fs::create_dir_all(&save_dir)?;
        Ok(Self { save_dir })
    }

    pub fn save_dir(&self) -> &std::path::Path {
        &self.save_dir
    }

    /// Saves under `battle_druids_<name>`, or the quick-save slot when no name
    /// is given. Returns the key written.
    pub fn save(&self, character: &Character, name: Option<&str>) -> Result<String> {
        let key = match name {
            Some(name) => save_key(name),
            None => QUICK_SAVE_KEY.to_string(),
        };
        self.write(&key, character, false, Utc::now())?;
        tracing::info!(key = %key, character = %character.name, "game saved");
        Ok(key)
    }

    pub fn quick_save(&self, character: &Character) -> Result<String> {
        self.save(character, None)
    }

    /// Writes the day's auto save for this character and prunes old ones.
    pub fn auto_save(&self, character: &Character) -> Result<String> {
        let now = Utc::now();
        let key = auto_save_key(&character.name, now);
        self.write(&key, character, true, now)?;
        tracing::info!(key = %key, "auto saved");
        self.cleanup_old_auto_saves()?;
        Ok(key)
    }

    /// Loads a save by key, with or without the `battle_druids_` prefix.
    pub fn load(&self, name: &str) -> Result<Character> {
        let key = if name.starts_with(SAVE_PREFIX) {
            checked_key(name)?.to_string()
        } else {
            save_key(name)
        };
        let envelope = self.read_envelope(&key)?;
        let snapshot = verify(&key, envelope)?;
        let character = Character::from_snapshot(snapshot)?;
        tracing::info!(key = %key, character = %character.name, "game loaded");
        Ok(character)
    }

    pub fn load_quick_save(&self) -> Result<Character> {
        self.load(QUICK_SAVE_KEY)
    }

    pub fn has_quick_save(&self) -> bool {
        self.path_for(QUICK_SAVE_KEY).exists()
    }

    /// Lists every save, newest first. Unreadable or tampered files are
    /// included and flagged as corrupted, sorted last.
    pub fn list_saves(&self) -> Result<Vec<SaveInfo>> {
        let mut saves = Vec::new();

        for key in self.save_keys()? {
            let key = key.as_str();
            let info = self
                .read_envelope(key)
                .and_then(|envelope| {
                    let auto = envelope.auto_save;
                    let date = parse_date(&envelope.save_date);
                    verify(key, envelope).map(|snapshot| (snapshot, auto, date))
                });

            saves.push(match info {
                Ok((snapshot, auto, date)) => SaveInfo {
                    key: key.to_string(),
                    character_name: snapshot.name,
                    class_name: snapshot.class.name().to_string(),
                    level: snapshot.progression.victories.saturating_add(1),
                    gold: snapshot.progression.gold,
                    dragon_shards: snapshot.progression.dragon_shards,
                    save_date: date,
                    is_auto_save: auto,
                    is_quick_save: key == QUICK_SAVE_KEY,
                    is_corrupted: false,
                },
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "corrupted save");
                    SaveInfo {
                        key: key.to_string(),
                        character_name: "[CORRUPTED]".to_string(),
                        class_name: String::new(),
                        level: 0,
                        gold: 0,
                        dragon_shards: 0,
                        save_date: None,
                        is_auto_save: key.starts_with(AUTO_SAVE_KEY),
                        is_quick_save: key == QUICK_SAVE_KEY,
                        is_corrupted: true,
                    }
                }
            });
        }

        saves.sort_by(|a, b| b.save_date.cmp(&a.save_date).then_with(|| a.key.cmp(&b.key)));
        Ok(saves)
    }

    pub fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(checked_key(key)?);
        if !path.exists() {
            return Err(SaveError::NotFound(key.to_string()));
        }
        fs::remove_file(path)?;
        tracing::info!(key = %key, "save deleted");
        Ok(())
    }

    /// Keeps only the newest auto saves. Returns how many were deleted.
    pub fn cleanup_old_auto_saves(&self) -> Result<usize> {
        let stale: Vec<String> = self
            .list_saves()?
            .into_iter()
            .filter(|info| info.is_auto_save)
            .skip(MAX_AUTO_SAVES)
            .map(|info| info.key)
            .collect();

        for key in &stale {
            self.delete(key)?;
        }
        Ok(stale.len())
    }

    /// Deletes every save file. Returns how many were removed.
    pub fn clear_all(&self) -> Result<usize> {
        let keys = self.save_keys()?;
        for key in &keys {
            fs::remove_file(self.path_for(key))?;
        }
        tracing::info!(count = keys.len(), "all saves cleared");
        Ok(keys.len())
    }

    /// Bundles every readable save into one JSON backup document.
    /// Files that are not valid JSON are left out.
    pub fn export_saves(&self) -> Result<String> {
        let mut saves = Vec::new();
        for key in self.save_keys()? {
            let raw = fs::read_to_string(self.path_for(&key))?;
            match serde_json::from_str::<Value>(&raw) {
                Ok(data) => saves.push(ExportedSave { filename: key, data }),
                Err(e) => tracing::warn!(key = %key, error = %e, "skipping unreadable save in export"),
            }
        }

        let export = SaveExport {
            version: SAVE_FORMAT_VERSION.to_string(),
            export_date: Utc::now().to_rfc3339(),
            saves,
        };
        tracing::info!(count = export.saves.len(), "saves exported");
        Ok(serde_json::to_string_pretty(&export)?)
    }

    /// Restores a backup from [`SaveManager::export_saves`], overwriting saves
    /// with the same key. Every entry is validated before anything is written.
    /// Returns how many saves were imported.
    pub fn import_saves(&self, json: &str) -> Result<usize> {
        let export: SaveExport = serde_json::from_str(json)?;

        for save in &export.saves {
            checked_key(&save.filename)?;
            serde_json::from_value::<SaveEnvelope>(save.data.clone()).map_err(|e| {
                SaveError::InvalidBackup(format!("{}: {}", save.filename, e))
            })?;
        }

        for save in &export.saves {
            fs::write(
                self.path_for(&save.filename),
                serde_json::to_string_pretty(&save.data)?,
            )?;
        }
        tracing::info!(count = export.saves.len(), "saves imported");
        Ok(export.saves.len())
    }

    /// Keys of every `battle_druids_*.json` file in the save directory.
    fn save_keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.save_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            if let Some(key) = path.file_stem().and_then(|s| s.to_str()) {
                if key.starts_with(SAVE_PREFIX) {
                    keys.push(key.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.save_dir.join(format!("{}.json", key))
    }

    fn write(&self, key: &str, character: &Character, auto_save: bool, now: DateTime<Utc>) -> Result<()> {
        let snapshot = serde_json::to_value(character.to_snapshot())?;
        let envelope = SaveEnvelope {
            checksum: checksum(&snapshot),
            character: snapshot,
            save_date: now.to_rfc3339(),
            version: SAVE_FORMAT_VERSION.to_string(),
            auto_save,
        };
        let json = serde_json::to_string_pretty(&envelope)?;
        fs::write(self.path_for(key), json)?;
        Ok(())
    }

    fn read_envelope(&self, key: &str) -> Result<SaveEnvelope> {
        let json = match fs::read_to_string(self.path_for(key)) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(SaveError::NotFound(key.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&json)?)
    }
}

fn verify(key: &str, envelope: SaveEnvelope) -> Result<CharacterSnapshot> {
    if checksum(&envelope.character) != envelope.checksum {
        return Err(SaveError::ChecksumMismatch(key.to_string()));
    }
    match envelope.character {
        Value::Object(map) => CharacterSnapshot::from_key_values(&map),
        _ => Err(SaveError::InvalidSnapshot("character is not an object".to_string())),
    }
}

/// SHA-256 of the compact JSON form, as lowercase hex.
fn checksum(character: &Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(character.to_string().as_bytes());
    format!("{:x}", hasher.finalize())
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

/// Accepts only prefixed keys that name a file directly inside the save
/// directory.
fn checked_key(key: &str) -> Result<&str> {
    let suffix = key.strip_prefix(SAVE_PREFIX).unwrap_or_default();
    if suffix.is_empty() || key.contains(['/', '\\']) || key.contains("..") {
        return Err(SaveError::InvalidKey(key.to_string()));
    }
    Ok(key)
}

fn save_key(name: &str) -> String {
    format!("{}{}", SAVE_PREFIX, sanitize_name(name))
}

fn auto_save_key(character_name: &str, now: DateTime<Utc>) -> String {
    format!(
        "{}_{}_{}",
        AUTO_SAVE_KEY,
        sanitize_name(character_name),
        now.format("%Y-%m-%d")
    )
}

/// Lowercases, turns spaces into underscores, and drops anything that is not
/// alphanumeric, `_` or `-`.
pub fn sanitize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterClass;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn manager() -> (TempDir, SaveManager) {
        let dir = TempDir::new().unwrap();
        let manager = SaveManager::with_dir(dir.path()).unwrap();
        (dir, manager)
    }

    fn hero(name: &str) -> Character {
        let mut c = Character::new(CharacterClass::Rogue, name);
        c.progression.record_victory("Arena");
        c.progression.gold = 275;
        c
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("Hero"), "hero");
        assert_eq!(sanitize_name("Mage the Great"), "mage_the_great");
        assert_eq!(sanitize_name("Test!!!"), "test");
        assert_eq!(sanitize_name("   Spaces   "), "spaces");
    }

    #[test]
    fn test_named_save_and_load() {
        let (_dir, manager) = manager();
        let c = hero("Vex");
        let key = manager.save(&c, Some("Slot One")).unwrap();
        assert_eq!(key, "battle_druids_slot_one");

        assert_eq!(manager.load("Slot One").unwrap(), c);
        assert_eq!(manager.load("battle_druids_slot_one").unwrap(), c);
    }

    #[test]
    fn test_quick_save() {
        let (_dir, manager) = manager();
        assert!(!manager.has_quick_save());
        let key = manager.quick_save(&hero("Vex")).unwrap();
        assert_eq!(key, QUICK_SAVE_KEY);
        assert!(manager.has_quick_save());
        assert_eq!(manager.load_quick_save().unwrap().name, "Vex");
    }

    #[test]
    fn test_missing_save() {
        let (_dir, manager) = manager();
        assert!(matches!(manager.load("nobody"), Err(SaveError::NotFound(_))));
        assert!(matches!(manager.delete("battle_druids_nobody"), Err(SaveError::NotFound(_))));
    }

    #[test]
    fn test_tampered_save_detected() {
        let (_dir, manager) = manager();
        let key = manager.save(&hero("Vex"), Some("cheat")).unwrap();

        let path = manager.path_for(&key);
        let json = fs::read_to_string(&path).unwrap();
        fs::write(&path, json.replace("275", "99999")).unwrap();

        assert!(matches!(manager.load(&key), Err(SaveError::ChecksumMismatch(_))));
        let saves = manager.list_saves().unwrap();
        assert_eq!(saves.len(), 1);
        assert!(saves[0].is_corrupted);
    }

    #[test]
    fn test_garbage_file_listed_as_corrupted() {
        let (_dir, manager) = manager();
        fs::write(manager.path_for("battle_druids_junk"), "not json").unwrap();
        fs::write(manager.save_dir().join("unrelated.json"), "{}").unwrap();
        manager.save(&hero("Vex"), Some("good")).unwrap();

        let saves = manager.list_saves().unwrap();
        assert_eq!(saves.len(), 2);
        assert!(!saves[0].is_corrupted);
        assert_eq!(saves[0].level, 2);
        assert_eq!(saves[0].class_name, "Rogue");
        assert!(saves[1].is_corrupted);
    }

    #[test]
    fn test_list_newest_first() {
        let (_dir, manager) = manager();
        let older = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let newer = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        manager.write("battle_druids_old", &hero("Old"), false, older).unwrap();
        manager.write("battle_druids_new", &hero("New"), false, newer).unwrap();

        let saves = manager.list_saves().unwrap();
        assert_eq!(saves[0].character_name, "New");
        assert_eq!(saves[1].character_name, "Old");
        assert_eq!(saves[0].save_date, Some(newer));
    }

    #[test]
    fn test_auto_save_key_and_flag() {
        let (_dir, manager) = manager();
        let key = manager.auto_save(&hero("Vex")).unwrap();
        assert!(key.starts_with("battle_druids_autosave_vex_"));

        let saves = manager.list_saves().unwrap();
        assert!(saves[0].is_auto_save);
        assert!(!saves[0].is_quick_save);
    }

    #[test]
    fn test_cleanup_keeps_newest_auto_saves() {
        let (_dir, manager) = manager();
        for day in 1..=8 {
            let date = Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap();
            let key = auto_save_key("Vex", date);
            manager.write(&key, &hero("Vex"), true, date).unwrap();
        }
        manager.save(&hero("Vex"), Some("manual")).unwrap();

        assert_eq!(manager.cleanup_old_auto_saves().unwrap(), 3);

        let saves = manager.list_saves().unwrap();
        let autos: Vec<&SaveInfo> = saves.iter().filter(|s| s.is_auto_save).collect();
        assert_eq!(autos.len(), 5);
        assert!(autos[0].key.ends_with("2024-03-08"));
        assert!(autos[4].key.ends_with("2024-03-04"));
        assert!(saves.iter().any(|s| s.key == "battle_druids_manual"));
    }

    #[test]
    fn test_keys_outside_save_dir_rejected() {
        let (_dir, manager) = manager();
        for key in ["battle_druids_x/../../etc", "battle_druids_..", "battle_druids_a\\b", "battle_druids_"] {
            assert!(matches!(manager.load(key), Err(SaveError::InvalidKey(_))), "{}", key);
            assert!(matches!(manager.delete(key), Err(SaveError::InvalidKey(_))), "{}", key);
        }
        assert!(matches!(manager.delete("quicksave"), Err(SaveError::InvalidKey(_))));
    }

    #[test]
    fn test_clear_all_leaves_other_files() {
        let (_dir, manager) = manager();
        manager.save(&hero("Vex"), Some("one")).unwrap();
        manager.quick_save(&hero("Vex")).unwrap();
        manager.auto_save(&hero("Vex")).unwrap();
        fs::write(manager.save_dir().join("notes.json"), "{}").unwrap();

        assert_eq!(manager.clear_all().unwrap(), 3);
        assert!(manager.list_saves().unwrap().is_empty());
        assert!(manager.save_dir().join("notes.json").exists());
    }

    #[test]
    fn test_import_validates_before_writing() {
        let (_dir, manager) = manager();
        let bad_name = serde_json::json!({
            "version": "1.0.0",
            "exportDate": "2024-01-01T00:00:00Z",
            "saves": [{ "filename": "../escape", "data": {} }]
        });
        assert!(matches!(
            manager.import_saves(&bad_name.to_string()),
            Err(SaveError::InvalidKey(_))
        ));

        let bad_data = serde_json::json!({
            "version": "1.0.0",
            "exportDate": "2024-01-01T00:00:00Z",
            "saves": [{ "filename": "battle_druids_junk", "data": { "nope": 1 } }]
        });
        assert!(matches!(
            manager.import_saves(&bad_data.to_string()),
            Err(SaveError::InvalidBackup(_))
        ));
        assert!(matches!(manager.import_saves("[]"), Err(SaveError::Json(_))));
        assert!(manager.list_saves().unwrap().is_empty());
    }
}
