//! Persistence for the wallet's own UI settings
//!
//! Settings are addressed by `group/name` keys. [`FileStore`] keeps them in a
//! TOML file with one table per group; [`MemoryStore`] keeps them in process.

use crate::error::{Result, SettingsError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const KEY_HOST: &str = "connection/host";
pub const KEY_PORT: &str = "connection/port";
pub const KEY_RPCUSER: &str = "connection/rpcuser";
pub const KEY_RPCPASSWORD: &str = "connection/rpcpassword";
pub const KEY_SAVE_SENT_TX: &str = "options/savesenttx";

/// Environment variable that points at an explicit settings file
pub const SETTINGS_ENV: &str = "ZECWALLET_SETTINGS";

const ORGANIZATION: &str = "zec-qt-wallet-org";
const APPLICATION: &str = "zec-qt-wallet";
const DEFAULT_GROUP: &str = "general";
const BACKUP_SUFFIX: &str = ".backup";

/// Key/value storage for settings that survive restarts.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str);

    /// Flush pending writes to the backing medium.
    fn sync(&mut self) -> Result<()>;

    /// Read a key, treating a missing value as an empty string
    fn get_or_empty(&self, key: &str) -> String {
        self.get(key).unwrap_or_default()
    }

    /// Read a boolean key, falling back to `default` when missing or unparsable
    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key).as_deref().map(str::trim) {
            Some("true") | Some("1") => true,
            Some("false") | Some("0") => false,
            _ => default,
        }
    }
}

type Groups = BTreeMap<String, BTreeMap<String, String>>;

fn split_key(key: &str) -> (&str, &str) {
    match key.split_once('/') {
        Some((group, name)) => (group, name),
        None => (DEFAULT_GROUP, key),
    }
}

/// In-memory store, never persisted
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
    syncs: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times [`SettingsStore::sync`] has been called
    pub fn sync_count(&self) -> usize {
        self.syncs
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn sync(&mut self) -> Result<()> {
        self.syncs += 1;
        Ok(())
    }
}

#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
struct SettingsFile {
    groups: Groups,
}

/// Scalars are kept as their string form, so hand-edited typed values such
/// as `port = 8232` read the same as `port = "8232"`.
fn scalar_to_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Datetime(d) => Some(d.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}

fn unsupported(group: &str, name: &str) -> SettingsError {
    SettingsError::Store(format!(
        "Unsupported value for {}/{}: expected a string, number or boolean",
        group, name
    ))
}

/// Top-level scalars land in the default group; nested tables are rejected.
fn groups_from_table(table: toml::Table) -> Result<Groups> {
    let mut groups = Groups::new();
    for (key, value) in table {
        match value {
            toml::Value::Table(entries) => {
                let group = groups.entry(key.clone()).or_default();
                for (name, value) in entries {
                    let value = scalar_to_string(&value).ok_or_else(|| unsupported(&key, &name))?;
                    group.insert(name, value);
                }
            }
            other => {
                let value =
                    scalar_to_string(&other).ok_or_else(|| unsupported(DEFAULT_GROUP, &key))?;
                groups
                    .entry(DEFAULT_GROUP.to_string())
                    .or_default()
                    .insert(key, value);
            }
        }
    }
    Ok(groups)
}

/// TOML-backed store
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    groups: Groups,
    dirty: bool,
}

impl FileStore {
    /// Open the store at `path`; a missing file opens as empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let groups = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            groups_from_table(toml::from_str(&contents)?)?
        } else {
            debug!("No settings file at {}, starting empty", path.display());
            Groups::new()
        };

        Ok(FileStore {
            path,
            groups,
            dirty: false,
        })
    }

    /// Open the store at [`default_path`]
    pub fn open_default() -> Result<Self> {
        Self::open(default_path()?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<file name><suffix>` next to the settings file, whatever its extension
    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(suffix);
        PathBuf::from(name)
    }

    /// Write the file atomically, keeping a backup of the previous version
    fn write(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        if self.path.exists() {
            let backup_path = self.sibling(BACKUP_SUFFIX);
            fs::copy(&self.path, &backup_path).map_err(|e| {
                SettingsError::Store(format!("Failed to create backup: {}", e))
            })?;
        }

        let contents = toml::to_string_pretty(&SettingsFile {
            groups: self.groups.clone(),
        })?;

        let temp_path = self.sibling(".tmp");
        let mut file = File::create(&temp_path)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, &self.path)
            .map_err(|e| SettingsError::Store(format!("Failed to finalize write: {}", e)))?;

        Ok(())
    }
}

impl SettingsStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let (group, name) = split_key(key);
        self.groups.get(group)?.get(name).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        let (group, name) = split_key(key);
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(name.to_string(), value.to_string());
        self.dirty = true;
    }

    fn sync(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.write()?;
        self.dirty = false;
        debug!("Settings written to {}", self.path.display());
        Ok(())
    }
}

/// Default settings file location, honouring [`SETTINGS_ENV`]
pub fn default_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(SETTINGS_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    dirs::config_dir()
        .map(|dir| {
            dir.join(ORGANIZATION)
                .join(format!("{}.toml", APPLICATION))
        })
        .ok_or_else(|| SettingsError::Store("No configuration directory available".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.get(KEY_HOST).is_none());
        assert_eq!(store.get_or_empty(KEY_HOST), "");

        store.set(KEY_HOST, "10.0.0.1");
        assert_eq!(store.get(KEY_HOST).as_deref(), Some("10.0.0.1"));

        store.sync().unwrap();
        assert_eq!(store.sync_count(), 1);
    }

    #[test]
    fn test_get_bool_defaults() {
        let mut store = MemoryStore::new();
        assert!(store.get_bool(KEY_SAVE_SENT_TX, true));
        assert!(!store.get_bool(KEY_SAVE_SENT_TX, false));

        store.set(KEY_SAVE_SENT_TX, "false");
        assert!(!store.get_bool(KEY_SAVE_SENT_TX, true));

        store.set(KEY_SAVE_SENT_TX, "garbage");
        assert!(store.get_bool(KEY_SAVE_SENT_TX, true));
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("settings.toml")).unwrap();
        assert!(store.get(KEY_RPCUSER).is_none());
    }

    #[test]
    fn test_file_store_persists_groups() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.toml");

        let mut store = FileStore::open(&path).unwrap();
        store.set(KEY_HOST, "192.168.1.5");
        store.set(KEY_RPCUSER, "alice");
        store.set(KEY_SAVE_SENT_TX, "false");
        store.sync().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[connection]"));
        assert!(contents.contains("[options]"));

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(KEY_HOST).as_deref(), Some("192.168.1.5"));
        assert_eq!(reopened.get(KEY_RPCUSER).as_deref(), Some("alice"));
        assert!(!reopened.get_bool(KEY_SAVE_SENT_TX, true));
    }

    #[test]
    fn test_file_store_creates_backup_on_rewrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");

        let mut store = FileStore::open(&path).unwrap();
        store.set(KEY_PORT, "8232");
        store.sync().unwrap();
        store.set(KEY_PORT, "9999");
        store.sync().unwrap();

        let backup = fs::read_to_string(dir.path().join("settings.toml.backup")).unwrap();
        assert!(backup.contains("8232"));
        assert!(!dir.path().join("settings.toml.tmp").exists());
    }

    #[test]
    fn test_file_store_ungrouped_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");

        let mut store = FileStore::open(&path).unwrap();
        store.set("theme", "dark");
        store.sync().unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("theme").as_deref(), Some("dark"));
        assert_eq!(reopened.get("general/theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_file_store_backup_keeps_file_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wallet.ini");

        let mut store = FileStore::open(&path).unwrap();
        store.set(KEY_HOST, "first");
        store.sync().unwrap();
        store.set(KEY_HOST, "second");
        store.sync().unwrap();

        assert!(dir.path().join("wallet.ini.backup").exists());
        assert!(!dir.path().join("wallet.toml.backup").exists());
    }

    #[test]
    fn test_file_store_accepts_typed_scalars() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(
            &path,
            "theme = \"dark\"\n\n[connection]\nhost = \"127.0.0.1\"\nport = 8232\nrpcuser = \"alice\"\n\n[options]\nsavesenttx = false\n",
        )
        .unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get(KEY_PORT).as_deref(), Some("8232"));
        assert_eq!(store.get(KEY_RPCUSER).as_deref(), Some("alice"));
        assert!(!store.get_bool(KEY_SAVE_SENT_TX, true));
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_file_store_rejects_nested_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "[connection]\nport = [8232, 18232]\n").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(err.to_string().contains("connection/port"));
    }

    #[test]
    fn test_file_store_rejects_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "not = [valid").unwrap();
        assert!(FileStore::open(&path).is_err());
    }
}
