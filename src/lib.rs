use std::fmt::Debug;

use serde::{Serialize, de::DeserializeOwned};

pub use serde_json::Value;

#[cfg(feature = "memory")]
pub use adapters::memory::MemoryStorage;

pub use adapters::multi;
pub use adapters::multi::{MultiStore, MultiStoreHandlers, StoreFailure};
pub use hooks::AdapterHooks;
pub use store::{Store, StoreOptions};
pub use value::is_truthy;

pub mod codec;
pub mod hooks;
pub mod store;
pub mod value;

/// A specialized Result type for store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A unified Error type for store operations.
///
/// Adapters report every failure of their four primitives as
/// [`Error::Backend`]; the core never distinguishes between causes.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Storage backend error")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Generic storage error: {0}")]
    Generic(String),

    #[error("Serialization error")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Wrap any backend error.
    pub fn backend<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::Backend(err.into())
    }
}

/// Adapter modules, gated behind Cargo features.
pub mod adapters {
    #[cfg(feature = "memory")]
    pub mod memory;
    pub mod multi;
}

/// The raw backend contract wrapped by a [`Store`].
///
/// An adapter exposes the four primitives over one physical medium. Keys
/// arrive already namespaced; values arrive already transformed by
/// [`AdapterHooks::before_set`]. Absence is reported as [`Value::Null`].
///
/// Optional transforms and error handlers are advertised through
/// [`hooks`](Adapter::hooks), which a store queries once when it is built.
pub trait Adapter: Send + Sync + Debug {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Value>;

    /// Write a raw value under `key`.
    fn set(&self, key: &str, raw: Value) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Remove everything from the medium.
    fn clear(&self) -> Result<()>;

    /// Optional capabilities of this adapter. None by default.
    fn hooks(&self) -> AdapterHooks {
        AdapterHooks::default()
    }
}

impl<A: Adapter + ?Sized> Adapter for std::sync::Arc<A> {
    fn get(&self, key: &str) -> Result<Value> {
        (**self).get(key)
    }

    fn set(&self, key: &str, raw: Value) -> Result<()> {
        (**self).set(key, raw)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }

    fn hooks(&self) -> AdapterHooks {
        (**self).hooks()
    }
}

/// The public key/value surface shared by [`Store`] and [`MultiStore`].
///
/// Because a [`MultiStore`] is itself a `KeyValueStore`, chains can be
/// nested inside other chains.
pub trait KeyValueStore: Send + Sync + Debug {
    /// Read the value for `key`, or [`Value::Null`] if absent.
    fn get(&self, key: &str) -> Result<Value>;

    /// Write `value` under `key`.
    fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Remove `key`.
    fn remove(&self, key: &str) -> Result<()>;

    /// Clear everything reachable through this store.
    fn clear(&self) -> Result<()>;
}

/// Convenience methods built on [`KeyValueStore`].
pub trait StoreExt: KeyValueStore {
    /// Read `key` and deserialize it. Returns `None` when the value is null.
    ///
    /// ```
    /// # #[cfg(feature = "memory")]
    /// # fn example() -> stowkv::Result<()> {
    /// use stowkv::{AdapterHooks, MemoryStorage, Store, StoreExt, StoreOptions};
    ///
    /// let store = Store::new(
    ///     MemoryStorage::with_hooks(AdapterHooks::json()),
    ///     StoreOptions::default(),
    /// );
    /// store.set_as("ids", &vec![1, 2, 3])?;
    ///
    /// let ids: Option<Vec<u32>> = store.get_as("ids")?;
    /// assert_eq!(ids, Some(vec![1, 2, 3]));
    /// # Ok(())
    /// # }
    /// ```
    fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key)? {
            Value::Null => Ok(None),
            value => Ok(Some(serde_json::from_value(value)?)),
        }
    }

    /// Serialize `value` and write it under `key`.
    fn set_as<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.set(key, value)
    }
}

impl<T: KeyValueStore + ?Sized> StoreExt for T {}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Value> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}
