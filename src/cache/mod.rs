use anyhow::{Context, Result};
use directories_next::BaseDirs;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(test)]
pub mod memory;

pub const CHARACTERS_KEY: &str = "avatar_characters";
pub const EPISODES_KEY: &str = "avatar_episodes";
pub const LAST_QUIZ_RESULT_KEY: &str = "lastQuizScore";
pub const THEME_KEY: &str = "appTheme";

pub fn profile_key(user_id: &str) -> String {
    format!("userProfile:{}", user_id)
}

/// String key/value persistence. Last write wins.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(value) => {
            let parsed = serde_json::from_str(&value)
                .with_context(|| format!("corrupt cache entry for {}", key))?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}

pub fn save_json<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let encoded = serde_json::to_string(value)?;
    store.set(key, &encoded)
}

pub fn default_cache_dir() -> Result<PathBuf> {
    let mut dir = BaseDirs::new()
        .context("could not locate system directories")?
        .cache_dir()
        .to_path_buf();
    dir.push("avatar-trivia");
    Ok(dir)
}

/// Every entry lives in one JSON object on disk.
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn open(dir: &Path) -> Result<FileStore> {
        fs::create_dir_all(dir)
            .with_context(|| format!("could not create cache directory {}", dir.display()))?;
        Ok(FileStore {
            path: dir.join("store.json"),
            lock: Mutex::new(()),
        })
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("could not read {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).with_context(|| format!("corrupt store {}", self.path.display()))
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, serde_json::to_vec_pretty(entries)?)
            .with_context(|| format!("could not write {}", staging.display()))?;
        fs::rename(&staging, &self.path)
            .with_context(|| format!("could not replace {}", self.path.display()))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let mut entries = self.read_entries()?;
        entries.insert(key.to_owned(), value.to_owned());
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}
