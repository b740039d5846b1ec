//! Chaining multiple stores together.
//!
//! A [`MultiStore`] coordinates an ordered list of stores behind the same
//! [`KeyValueStore`](crate::KeyValueStore) contract, so chains can be nested
//! inside other chains.
//!
//! # Examples
//!
//! ## Read fallback, write fan-out
//!
//! ```
//! # #[cfg(feature = "memory")]
//! # fn example() -> stowkv::Result<()> {
//! use stowkv::{AdapterHooks, KeyValueStore, MemoryStorage, Store, StoreOptions, Value};
//! use stowkv::multi::MultiStore;
//!
//! let session = Store::new(MemoryStorage::with_hooks(AdapterHooks::json()), StoreOptions::default());
//! let local = Store::new(
//!     MemoryStorage::with_hooks(AdapterHooks::json()),
//!     StoreOptions::new().namespace("app_"),
//! );
//!
//! let chain = MultiStore::builder()
//!     .add_store(session)
//!     .add_store(local)
//!     .build();
//!
//! // Written to both stores
//! chain.set("theme", Value::from("dark"))?;
//!
//! // Served by the first store holding a truthy value
//! assert_eq!(chain.get("theme")?, Value::from("dark"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Isolating failures
//!
//! ```
//! # #[cfg(feature = "memory")]
//! # fn example() -> stowkv::Result<()> {
//! use stowkv::{KeyValueStore, MemoryStorage, Store, StoreOptions, Value};
//! use stowkv::multi::MultiStore;
//!
//! let chain = MultiStore::builder()
//!     .add_store(Store::new(MemoryStorage::new(), StoreOptions::default()))
//!     .on_set_error(|failure, key, _value| {
//!         eprintln!("store {} could not persist {key}: {}", failure.index, failure.error);
//!         Ok(())
//!     })
//!     .build();
//!
//! chain.set("foo", Value::from("bar"))?;
//! # Ok(())
//! # }
//! ```

mod chain;
mod failure;

pub use chain::{MultiStore, MultiStoreBuilder};
pub use failure::{
    MultiStoreHandlers, OnClearError, OnGetError, OnRemoveError, OnSetError, StoreFailure,
};
