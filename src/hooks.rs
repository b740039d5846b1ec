//! Optional adapter capabilities.
//!
//! An [`Adapter`](crate::Adapter) advertises transforms and error handlers by
//! returning an [`AdapterHooks`] bundle. Every hook is optional; a missing
//! transform means the value passes through untouched, a missing error
//! handler means the error propagates to the caller unchanged.

use std::fmt;
use std::sync::Arc;

use crate::{Error, Result, Value, codec};

/// Transform applied to a raw value after it is read.
pub type AfterGet = Arc<dyn Fn(Value) -> Value + Send + Sync>;
/// Transform applied to a value before it is written.
pub type BeforeSet = Arc<dyn Fn(Value) -> Value + Send + Sync>;
/// Handler for a failed `get`; receives the error and the un-namespaced key.
pub type OnGetError = Arc<dyn Fn(Error, &str) -> Result<Value> + Send + Sync>;
/// Handler for a failed `set`; receives the error, key and transformed data.
pub type OnSetError = Arc<dyn Fn(Error, &str, &Value) -> Result<()> + Send + Sync>;
/// Handler for a failed `remove`.
pub type OnRemoveError = Arc<dyn Fn(Error, &str) -> Result<()> + Send + Sync>;
/// Handler for a failed `clear`.
pub type OnClearError = Arc<dyn Fn(Error) -> Result<()> + Send + Sync>;

/// The optional capability set of an adapter.
///
/// Handlers return a [`Result`]: `Ok` substitutes for the failed operation's
/// result, `Err` re-raises.
///
/// ```
/// use stowkv::{AdapterHooks, Value};
///
/// let hooks = AdapterHooks::json().on_get_error(|_err, _key| Ok(Value::Null));
/// assert!(hooks.has_transforms());
/// assert!(hooks.on_get_error.is_some());
/// ```
#[derive(Clone, Default)]
pub struct AdapterHooks {
    pub after_get: Option<AfterGet>,
    pub before_set: Option<BeforeSet>,
    pub on_get_error: Option<OnGetError>,
    pub on_set_error: Option<OnSetError>,
    pub on_remove_error: Option<OnRemoveError>,
    pub on_clear_error: Option<OnClearError>,
}

impl AdapterHooks {
    /// No hooks at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// The conventional JSON transform pair from [`codec`].
    pub fn json() -> Self {
        Self::new()
            .after_get(codec::decode_json)
            .before_set(codec::encode_json)
    }

    pub fn after_get<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.after_get = Some(Arc::new(f));
        self
    }

    pub fn before_set<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.before_set = Some(Arc::new(f));
        self
    }

    pub fn on_get_error<F>(mut self, f: F) -> Self
    where
        F: Fn(Error, &str) -> Result<Value> + Send + Sync + 'static,
    {
        self.on_get_error = Some(Arc::new(f));
        self
    }

    pub fn on_set_error<F>(mut self, f: F) -> Self
    where
        F: Fn(Error, &str, &Value) -> Result<()> + Send + Sync + 'static,
    {
        self.on_set_error = Some(Arc::new(f));
        self
    }

    pub fn on_remove_error<F>(mut self, f: F) -> Self
    where
        F: Fn(Error, &str) -> Result<()> + Send + Sync + 'static,
    {
        self.on_remove_error = Some(Arc::new(f));
        self
    }

    pub fn on_clear_error<F>(mut self, f: F) -> Self
    where
        F: Fn(Error) -> Result<()> + Send + Sync + 'static,
    {
        self.on_clear_error = Some(Arc::new(f));
        self
    }

    /// True if either transform is present.
    pub fn has_transforms(&self) -> bool {
        self.after_get.is_some() || self.before_set.is_some()
    }

    /// True if any error handler is present.
    pub fn has_error_handlers(&self) -> bool {
        self.on_get_error.is_some()
            || self.on_set_error.is_some()
            || self.on_remove_error.is_some()
            || self.on_clear_error.is_some()
    }
}

impl fmt::Debug for AdapterHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterHooks")
            .field("after_get", &self.after_get.is_some())
            .field("before_set", &self.before_set.is_some())
            .field("on_get_error", &self.on_get_error.is_some())
            .field("on_set_error", &self.on_set_error.is_some())
            .field("on_remove_error", &self.on_remove_error.is_some())
            .field("on_clear_error", &self.on_clear_error.is_some())
            .finish()
    }
}
