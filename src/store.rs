use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;
use tracing;

use crate::hooks::{AfterGet, BeforeSet, OnClearError, OnGetError, OnRemoveError, OnSetError};
use crate::{Adapter, KeyValueStore, Result, Value};

/// Configuration of a [`Store`].
///
/// Every field has a default, so partial configuration deserializes:
///
/// ```
/// use stowkv::StoreOptions;
///
/// let options: StoreOptions = serde_json::from_str(r#"{"namespace": "app_"}"#).unwrap();
/// assert_eq!(options.namespace, "app_");
/// assert!(options.ignore.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    /// Prefix applied to every key before it reaches the adapter.
    pub namespace: String,
    /// Keys that are never written.
    pub ignore: HashSet<String>,
    /// If non-empty, the only keys that are written.
    pub only: HashSet<String>,
}

impl StoreOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key prefix.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Add keys to the ignore list.
    pub fn ignore<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.ignore.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Add keys to the only list.
    pub fn only<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.only.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Whether a write to `key` is filtered out.
    ///
    /// `ignore` wins over `only`: a key listed in both is excluded.
    pub fn is_excluded(&self, key: &str) -> bool {
        self.ignore.contains(key) || (!self.only.is_empty() && !self.only.contains(key))
    }
}

/// A namespaced, filtered, transform-aware facade over one [`Adapter`].
///
/// The adapter's hooks are queried once, when the store is built.
///
/// ```
/// # #[cfg(feature = "memory")]
/// # fn example() -> stowkv::Result<()> {
/// use stowkv::{KeyValueStore, MemoryStorage, Store, StoreOptions, Value};
///
/// let memory = MemoryStorage::new();
/// let store = Store::new(memory.clone(), StoreOptions::new().namespace("ns_"));
///
/// store.set("foo", Value::from("bar"))?;
/// assert_eq!(memory.raw("ns_foo"), Some(Value::from("bar")));
/// assert_eq!(store.get("foo")?, Value::from("bar"));
/// # Ok(())
/// # }
/// ```
pub struct Store<A: Adapter> {
    adapter: A,
    options: StoreOptions,
    after_get: Option<AfterGet>,
    before_set: Option<BeforeSet>,
    on_get_error: Option<OnGetError>,
    on_set_error: Option<OnSetError>,
    on_remove_error: Option<OnRemoveError>,
    on_clear_error: Option<OnClearError>,
}

impl<A: Adapter> Store<A> {
    /// Wrap `adapter` with `options`.
    pub fn new(adapter: A, options: StoreOptions) -> Self {
        let hooks = adapter.hooks();
        Self {
            adapter,
            options,
            after_get: hooks.after_get,
            before_set: hooks.before_set,
            on_get_error: hooks.on_get_error,
            on_set_error: hooks.on_set_error,
            on_remove_error: hooks.on_remove_error,
            on_clear_error: hooks.on_clear_error,
        }
    }

    /// Get a reference to the wrapped adapter.
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Get the store configuration.
    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Get the key prefix.
    pub fn namespace(&self) -> &str {
        &self.options.namespace
    }

    /// The key actually passed to the adapter for `key`.
    pub fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.options.namespace, key)
    }

    /// Whether writes to `key` are filtered out.
    pub fn is_excluded(&self, key: &str) -> bool {
        self.options.is_excluded(key)
    }
}

impl<A: Adapter> KeyValueStore for Store<A> {
    fn get(&self, key: &str) -> Result<Value> {
        let raw = match self.adapter.get(&self.full_key(key)) {
            Ok(raw) => raw,
            Err(e) => match &self.on_get_error {
                Some(handler) => {
                    tracing::trace!(key, "Adapter get failed, delegating to handler");
                    handler(e, key)?
                }
                None => return Err(e),
            },
        };

        match &self.after_get {
            Some(after_get) => Ok(after_get(raw)),
            None => Ok(raw),
        }
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let data = match &self.before_set {
            Some(before_set) => before_set(value),
            None => value,
        };

        if self.is_excluded(key) {
            tracing::debug!(key, "Write skipped (key filtered out)");
            return Ok(());
        }

        match self.adapter.set(&self.full_key(key), data.clone()) {
            Ok(()) => Ok(()),
            Err(e) => match &self.on_set_error {
                Some(handler) => {
                    tracing::trace!(key, "Adapter set failed, delegating to handler");
                    handler(e, key, &data)
                }
                None => Err(e),
            },
        }
    }

    fn remove(&self, key: &str) -> Result<()> {
        match self.adapter.remove(&self.full_key(key)) {
            Ok(()) => Ok(()),
            Err(e) => match &self.on_remove_error {
                Some(handler) => {
                    tracing::trace!(key, "Adapter remove failed, delegating to handler");
                    handler(e, key)
                }
                None => Err(e),
            },
        }
    }

    fn clear(&self) -> Result<()> {
        // Clears the whole medium, not only this namespace.
        match self.adapter.clear() {
            Ok(()) => Ok(()),
            Err(e) => match &self.on_clear_error {
                Some(handler) => {
                    tracing::trace!("Adapter clear failed, delegating to handler");
                    handler(e)
                }
                None => Err(e),
            },
        }
    }
}

impl<A: Adapter> fmt::Debug for Store<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("adapter", &self.adapter)
            .field("options", &self.options)
            .field("after_get", &self.after_get.is_some())
            .field("before_set", &self.before_set.is_some())
            .finish()
    }
}
