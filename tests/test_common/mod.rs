//! Common test utilities and reusable test suite for key/value stores
//!
//! This module provides a macro `kv_store_test_suite!` that generates
//! a set of contract tests for any KeyValueStore implementation, plus a
//! fault-injecting adapter for exercising error handlers.

#![allow(dead_code)]

use serde_json::json;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use stowkv::{Adapter, AdapterHooks, Error, KeyValueStore, MemoryStorage, Result, Value};

/// Install a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Macro to generate the contract test suite for a KeyValueStore.
///
/// # Usage
///
/// ```ignore
/// kv_store_test_suite!(setup = || {
///     Store::new(MemoryStorage::with_hooks(AdapterHooks::json()), StoreOptions::default())
/// });
/// ```
///
/// The store must round-trip structured values (JSON hooks or a raw
/// `Value` medium).
#[macro_export]
macro_rules! kv_store_test_suite {
    (setup = $setup:expr) => {
        mod kv_store_test_suite {
            use super::*;
            use $crate::test_common::*;

            #[test]
            fn test_set_and_get() {
                run_test_set_and_get(&($setup)());
            }

            #[test]
            fn test_get_missing() {
                run_test_get_missing(&($setup)());
            }

            #[test]
            fn test_overwrite() {
                run_test_overwrite(&($setup)());
            }

            #[test]
            fn test_remove() {
                run_test_remove(&($setup)());
            }

            #[test]
            fn test_remove_missing() {
                run_test_remove_missing(&($setup)());
            }

            #[test]
            fn test_clear() {
                run_test_clear(&($setup)());
            }

            #[test]
            fn test_structured_values() {
                run_test_structured_values(&($setup)());
            }
        }
    };
}

// Individual test implementations that can be reused

pub fn run_test_set_and_get<S: KeyValueStore>(store: &S) {
    assert_eq!(store.get("greeting").unwrap(), Value::Null);

    store.set("greeting", json!("hello world")).unwrap();
    assert_eq!(store.get("greeting").unwrap(), json!("hello world"));
}

pub fn run_test_get_missing<S: KeyValueStore>(store: &S) {
    assert_eq!(store.get("nonexistent").unwrap(), Value::Null);
}

pub fn run_test_overwrite<S: KeyValueStore>(store: &S) {
    store.set("key", json!("original")).unwrap();
    store.set("key", json!("updated")).unwrap();
    assert_eq!(store.get("key").unwrap(), json!("updated"));
}

pub fn run_test_remove<S: KeyValueStore>(store: &S) {
    store.set("key", json!("value")).unwrap();
    store.remove("key").unwrap();
    assert_eq!(store.get("key").unwrap(), Value::Null);
}

pub fn run_test_remove_missing<S: KeyValueStore>(store: &S) {
    assert!(store.remove("never-set").is_ok());
    assert!(store.remove("never-set").is_ok());
}

pub fn run_test_clear<S: KeyValueStore>(store: &S) {
    store.set("a", json!("1")).unwrap();
    store.set("b", json!("2")).unwrap();
    store.clear().unwrap();
    assert_eq!(store.get("a").unwrap(), Value::Null);
    assert_eq!(store.get("b").unwrap(), Value::Null);
}

pub fn run_test_structured_values<S: KeyValueStore>(store: &S) {
    let values = [
        json!({"foo": "bar", "nested": {"n": 1}}),
        json!(["foo", "bar"]),
        json!(42),
        json!(true),
        json!("plain text"),
    ];

    for (i, value) in values.iter().enumerate() {
        let key = format!("value-{i}");
        store.set(&key, value.clone()).unwrap();
        assert_eq!(&store.get(&key).unwrap(), value, "round trip of {value}");
    }
}

/// Adapter primitives, for selecting which ones fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Get,
    Set,
    Remove,
    Clear,
}

/// An adapter over [`MemoryStorage`] whose selected primitives always fail.
///
/// Every call is recorded with the key the adapter received.
#[derive(Debug, Clone)]
pub struct FaultyAdapter {
    inner: MemoryStorage,
    failing: HashSet<Op>,
    hooks: AdapterHooks,
    calls: Arc<Mutex<Vec<(Op, String)>>>,
}

impl FaultyAdapter {
    /// Fails the given primitives; the others hit memory.
    pub fn failing(ops: &[Op]) -> Self {
        Self {
            inner: MemoryStorage::new(),
            failing: ops.iter().copied().collect(),
            hooks: AdapterHooks::default(),
            calls: Arc::default(),
        }
    }

    /// Fails every primitive.
    pub fn failing_all() -> Self {
        Self::failing(&[Op::Get, Op::Set, Op::Remove, Op::Clear])
    }

    /// Fails nothing; useful as a recording adapter.
    pub fn healthy() -> Self {
        Self::failing(&[])
    }

    pub fn with_hooks(mut self, hooks: AdapterHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// The backing memory.
    pub fn memory(&self) -> &MemoryStorage {
        &self.inner
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<(Op, String)> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls to `op`.
    pub fn call_count(&self, op: Op) -> usize {
        self.calls().iter().filter(|(o, _)| *o == op).count()
    }

    /// Keys the adapter received for `op`.
    pub fn keys_for(&self, op: Op) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(o, _)| *o == op)
            .map(|(_, key)| key)
            .collect()
    }

    fn record(&self, op: Op, key: &str) -> Result<()> {
        self.calls.lock().unwrap().push((op, key.to_string()));
        if self.failing.contains(&op) {
            Err(Error::backend(format!("{op:?} failed for '{key}'")))
        } else {
            Ok(())
        }
    }
}

impl Adapter for FaultyAdapter {
    fn get(&self, key: &str) -> Result<Value> {
        self.record(Op::Get, key)?;
        self.inner.get(key)
    }

    fn set(&self, key: &str, raw: Value) -> Result<()> {
        self.record(Op::Set, key)?;
        self.inner.set(key, raw)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.record(Op::Remove, key)?;
        self.inner.remove(key)
    }

    fn clear(&self) -> Result<()> {
        self.record(Op::Clear, "")?;
        self.inner.clear()
    }

    fn hooks(&self) -> AdapterHooks {
        self.hooks.clone()
    }
}

/// Message of a backend error, for asserting which store raised it.
pub fn backend_message(err: &Error) -> String {
    match err {
        Error::Backend(source) => source.to_string(),
        other => panic!("Expected Backend error, got {other:?}"),
    }
}
