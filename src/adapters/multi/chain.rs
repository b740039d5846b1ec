use super::failure::{MultiStoreHandlers, StoreFailure};
use crate::{Error, KeyValueStore, Result, Value, is_truthy};
use std::fmt::Debug;
use std::sync::Arc;
use tracing;

/// Chains several stores: ordered fallback on read, fan-out on write.
///
/// - `get` asks each store in order and returns the first truthy value. If
///   none is truthy, the last store's (falsy) value is returned.
/// - `set`, `remove` and `clear` run against every store in order.
///
/// A store error is routed to the matching handler in
/// [`MultiStoreHandlers`], if configured, together with its chain position.
/// Otherwise it propagates immediately and the remaining stores are not
/// touched. Writes are not atomic across stores.
///
/// The store list is fixed at construction.
///
/// ```
/// # #[cfg(feature = "memory")]
/// # fn example() -> stowkv::Result<()> {
/// use stowkv::{KeyValueStore, MemoryStorage, MultiStore, Store, StoreOptions, Value};
///
/// let session = Store::new(MemoryStorage::new(), StoreOptions::default());
/// let local = Store::new(MemoryStorage::new(), StoreOptions::default());
/// local.set("foo", Value::from("baz"))?;
///
/// let chain = MultiStore::builder()
///     .add_store(session)
///     .add_store(local)
///     .build();
///
/// assert_eq!(chain.get("foo")?, Value::from("baz"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MultiStore {
    stores: Arc<[Arc<dyn KeyValueStore>]>,
    handlers: MultiStoreHandlers,
}

impl MultiStore {
    /// Create a builder for configuring a multi-store.
    pub fn builder() -> MultiStoreBuilder {
        MultiStoreBuilder::new()
    }

    /// Create a multi-store without error handlers.
    pub fn new(stores: Vec<Arc<dyn KeyValueStore>>) -> Self {
        Self::with_handlers(stores, MultiStoreHandlers::default())
    }

    /// Create a multi-store with error handlers.
    pub fn with_handlers(
        stores: Vec<Arc<dyn KeyValueStore>>,
        handlers: MultiStoreHandlers,
    ) -> Self {
        Self {
            stores: stores.into(),
            handlers,
        }
    }

    /// Get the number of stores.
    pub fn store_count(&self) -> usize {
        self.stores.len()
    }

    /// Returns true if the chain has no stores.
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Get a reference to a specific store by index.
    pub fn store(&self, index: usize) -> Option<&Arc<dyn KeyValueStore>> {
        self.stores.get(index)
    }

    /// All stores, in chain order.
    pub fn stores(&self) -> &[Arc<dyn KeyValueStore>] {
        &self.stores
    }

    /// Get the configured handlers.
    pub fn handlers(&self) -> &MultiStoreHandlers {
        &self.handlers
    }

    /// Run `op` against every store in order. A failure at index `i` goes to
    /// `handle(error, i)` if present, otherwise it aborts the fan-out.
    fn fan_out<Op, H>(&self, op: Op, handle: Option<H>) -> Result<()>
    where
        Op: Fn(&dyn KeyValueStore) -> Result<()>,
        H: Fn(Error, usize) -> Result<()>,
    {
        for (idx, store) in self.stores.iter().enumerate() {
            if let Err(e) = op(store.as_ref()) {
                match &handle {
                    Some(handle) => {
                        tracing::trace!(store_index = idx, "Store failed, delegating to handler");
                        handle(e, idx)?;
                    }
                    None => {
                        tracing::debug!(
                            store_index = idx,
                            skipped = self.stores.len() - (idx + 1),
                            "Store failed without handler, aborting fan-out"
                        );
                        return Err(e);
                    }
                }
            }
        }
        Ok(())
    }

    fn failure(&self, error: Error, index: usize) -> StoreFailure<'_> {
        StoreFailure::new(error, index, &self.stores)
    }
}

impl KeyValueStore for MultiStore {
    fn get(&self, key: &str) -> Result<Value> {
        let mut data = Value::Null;

        for (idx, store) in self.stores.iter().enumerate() {
            data = match store.get(key) {
                Ok(value) => value,
                Err(e) => match &self.handlers.on_get_error {
                    Some(handler) => {
                        tracing::trace!(
                            key,
                            store_index = idx,
                            "Store get failed, delegating to handler"
                        );
                        handler(self.failure(e, idx), key)?
                    }
                    None => return Err(e),
                },
            };

            if is_truthy(&data) {
                tracing::trace!(key, store_index = idx, "Value found");
                break;
            }
        }

        Ok(data)
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let data = &value;
        let handler = self
            .handlers
            .on_set_error
            .as_ref()
            .map(|h| move |e: Error, idx: usize| h(self.failure(e, idx), key, data));
        self.fan_out(|store| store.set(key, value.clone()), handler)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let handler = self
            .handlers
            .on_remove_error
            .as_ref()
            .map(|h| move |e: Error, idx: usize| h(self.failure(e, idx), key));
        self.fan_out(|store| store.remove(key), handler)
    }

    fn clear(&self) -> Result<()> {
        let handler = self
            .handlers
            .on_clear_error
            .as_ref()
            .map(|h| move |e: Error, idx: usize| h(self.failure(e, idx)));
        self.fan_out(|store| store.clear(), handler)
    }
}

/// Builder for [`MultiStore`].
pub struct MultiStoreBuilder {
    stores: Vec<Arc<dyn KeyValueStore>>,
    handlers: MultiStoreHandlers,
}

impl MultiStoreBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            stores: Vec::new(),
            handlers: MultiStoreHandlers::default(),
        }
    }

    /// Append a store to the chain.
    pub fn add_store<S: KeyValueStore + 'static>(mut self, store: S) -> Self {
        self.stores.push(Arc::new(store));
        self
    }

    /// Append an already shared store to the chain.
    pub fn add_shared(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.stores.push(store);
        self
    }

    /// Replace all handlers at once.
    pub fn handlers(mut self, handlers: MultiStoreHandlers) -> Self {
        self.handlers = handlers;
        self
    }

    /// Set the `get` error handler.
    pub fn on_get_error<F>(mut self, f: F) -> Self
    where
        F: Fn(StoreFailure<'_>, &str) -> Result<Value> + Send + Sync + 'static,
    {
        self.handlers = self.handlers.on_get_error(f);
        self
    }

    /// Set the `set` error handler.
    pub fn on_set_error<F>(mut self, f: F) -> Self
    where
        F: Fn(StoreFailure<'_>, &str, &Value) -> Result<()> + Send + Sync + 'static,
    {
        self.handlers = self.handlers.on_set_error(f);
        self
    }

    /// Set the `remove` error handler.
    pub fn on_remove_error<F>(mut self, f: F) -> Self
    where
        F: Fn(StoreFailure<'_>, &str) -> Result<()> + Send + Sync + 'static,
    {
        self.handlers = self.handlers.on_remove_error(f);
        self
    }

    /// Set the `clear` error handler.
    pub fn on_clear_error<F>(mut self, f: F) -> Self
    where
        F: Fn(StoreFailure<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.handlers = self.handlers.on_clear_error(f);
        self
    }

    /// Build the multi-store.
    pub fn build(self) -> MultiStore {
        MultiStore::with_handlers(self.stores, self.handlers)
    }
}

impl Default for MultiStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for MultiStoreBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiStoreBuilder")
            .field("store_count", &self.stores.len())
            .field("handlers", &self.handlers)
            .finish()
    }
}
