use anyhow::{anyhow, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::cache::KeyValueStore;

#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    writes: RwLock<Vec<String>>,
    write_count: AtomicUsize,
    broken: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Default::default()
    }

    /// Every subsequent call fails, like a full disk.
    pub fn break_storage(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    pub fn write_count(&self) -> usize {
        self.write_count.load(Ordering::SeqCst)
    }

    pub fn writes_to(&self, key: &str) -> usize {
        self.writes.read().iter().filter(|k| *k == key).count()
    }

    fn check(&self) -> Result<()> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(anyhow!("storage unavailable"));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.check()?;
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.write_count.fetch_add(1, Ordering::SeqCst);
        self.writes.write().push(key.to_owned());
        self.check()?;
        self.entries.write().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.check()?;
        self.entries.write().remove(key);
        Ok(())
    }
}
