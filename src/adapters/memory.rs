use crate::{Adapter, AdapterHooks, Error, Result, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A simple in-memory [`Adapter`].
///
/// - Keys are `String`s, raw values are [`Value`]s.
/// - Clones share the same map, so a test can keep a handle and inspect what
///   a [`Store`](crate::Store) actually wrote.
/// - Intended for tests, local development, and ephemeral usage.
///
/// Hooks are empty unless set with [`with_hooks`](Self::with_hooks).
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<RwLock<HashMap<String, Value>>>,
    hooks: AdapterHooks,
}

impl MemoryStorage {
    /// Create a new empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty in-memory storage advertising `hooks`.
    pub fn with_hooks(hooks: AdapterHooks) -> Self {
        Self {
            inner: Arc::default(),
            hooks,
        }
    }

    /// Create a new in-memory storage from an existing map.
    pub fn from_map(map: HashMap<String, Value>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(map)),
            hooks: AdapterHooks::default(),
        }
    }

    /// A handle to the same map advertising different hooks.
    pub fn share_with_hooks(&self, hooks: AdapterHooks) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            hooks,
        }
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.read().map(|map| map.len()).unwrap_or(0)
    }

    /// Returns true if there are no stored keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a copy of the raw value under the exact `key` (useful for tests).
    pub fn raw(&self, key: &str) -> Option<Value> {
        self.read().ok().and_then(|map| map.get(key).cloned())
    }

    /// All stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .read()
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Value>>> {
        self.inner
            .read()
            .map_err(|_| Error::Generic("poisoned lock".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Value>>> {
        self.inner
            .write()
            .map_err(|_| Error::Generic("poisoned lock".to_string()))
    }
}

impl fmt::Debug for MemoryStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Avoid dumping potentially large in-memory contents.
        f.debug_struct("MemoryStorage")
            .field("len", &self.len())
            .field("hooks", &self.hooks)
            .finish()
    }
}

impl Adapter for MemoryStorage {
    fn get(&self, key: &str) -> Result<Value> {
        let map = self.read()?;
        Ok(map.get(key).cloned().unwrap_or(Value::Null))
    }

    fn set(&self, key: &str, raw: Value) -> Result<()> {
        let mut map = self.write()?;
        map.insert(key.to_string(), raw);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut map = self.write()?;
        map.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.write()?.clear();
        Ok(())
    }

    fn hooks(&self) -> AdapterHooks {
        self.hooks.clone()
    }
}
