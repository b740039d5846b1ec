use std::fmt;
use std::sync::Arc;

use crate::{Error, KeyValueStore, Result, Value};

/// Context of a store failure inside a [`MultiStore`](super::MultiStore).
///
/// Carries the error together with the chain position it happened at: the
/// failing store and its immediate successor (`None` for the last store).
pub struct StoreFailure<'a> {
    /// The error raised by the store.
    pub error: Error,
    /// Position of the failing store in the chain.
    pub index: usize,
    /// The store that raised the error.
    pub current: &'a dyn KeyValueStore,
    /// The next store in the chain, if any.
    pub next: Option<&'a dyn KeyValueStore>,
}

impl<'a> StoreFailure<'a> {
    pub(crate) fn new(error: Error, index: usize, stores: &'a [Arc<dyn KeyValueStore>]) -> Self {
        Self {
            error,
            index,
            current: stores[index].as_ref(),
            next: stores.get(index + 1).map(|store| store.as_ref()),
        }
    }

    /// True if the failing store is the last one in the chain.
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }

    /// Discard the context and return the original error, e.g. to re-raise
    /// it from a handler.
    pub fn into_error(self) -> Error {
        self.error
    }
}

impl fmt::Debug for StoreFailure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreFailure")
            .field("error", &self.error)
            .field("index", &self.index)
            .field("current", &self.current)
            .field("next", &self.next)
            .finish()
    }
}

impl fmt::Display for StoreFailure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Store {} failed: {}", self.index, self.error)?;
        if self.is_last() {
            write!(f, " (last in chain)")?;
        }
        Ok(())
    }
}

/// Handler for a failed `get` at some position in the chain.
pub type OnGetError = Arc<dyn Fn(StoreFailure<'_>, &str) -> Result<Value> + Send + Sync>;
/// Handler for a failed `set`; receives the untransformed value.
pub type OnSetError = Arc<dyn Fn(StoreFailure<'_>, &str, &Value) -> Result<()> + Send + Sync>;
/// Handler for a failed `remove`.
pub type OnRemoveError = Arc<dyn Fn(StoreFailure<'_>, &str) -> Result<()> + Send + Sync>;
/// Handler for a failed `clear`.
pub type OnClearError = Arc<dyn Fn(StoreFailure<'_>) -> Result<()> + Send + Sync>;

/// Error handlers of a [`MultiStore`](super::MultiStore).
///
/// A handler returning `Ok` substitutes for the failed store's result and
/// lets the operation move on; returning `Err` aborts the operation with
/// that error. Without a handler the store's error propagates unchanged.
#[derive(Clone, Default)]
pub struct MultiStoreHandlers {
    pub on_get_error: Option<OnGetError>,
    pub on_set_error: Option<OnSetError>,
    pub on_remove_error: Option<OnRemoveError>,
    pub on_clear_error: Option<OnClearError>,
}

impl MultiStoreHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_get_error<F>(mut self, f: F) -> Self
    where
        F: Fn(StoreFailure<'_>, &str) -> Result<Value> + Send + Sync + 'static,
    {
        self.on_get_error = Some(Arc::new(f));
        self
    }

    pub fn on_set_error<F>(mut self, f: F) -> Self
    where
        F: Fn(StoreFailure<'_>, &str, &Value) -> Result<()> + Send + Sync + 'static,
    {
        self.on_set_error = Some(Arc::new(f));
        self
    }

    pub fn on_remove_error<F>(mut self, f: F) -> Self
    where
        F: Fn(StoreFailure<'_>, &str) -> Result<()> + Send + Sync + 'static,
    {
        self.on_remove_error = Some(Arc::new(f));
        self
    }

    pub fn on_clear_error<F>(mut self, f: F) -> Self
    where
        F: Fn(StoreFailure<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.on_clear_error = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for MultiStoreHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiStoreHandlers")
            .field("on_get_error", &self.on_get_error.is_some())
            .field("on_set_error", &self.on_set_error.is_some())
            .field("on_remove_error", &self.on_remove_error.is_some())
            .field("on_clear_error", &self.on_clear_error.is_some())
            .finish()
    }
}
