//! Tests for the in-memory adapter

use serde_json::json;
use std::collections::HashMap;
use stowkv::{Adapter, AdapterHooks, KeyValueStore, MemoryStorage, Store, StoreOptions, Value};

#[path = "test_common/mod.rs"]
mod test_common;

kv_store_test_suite!(setup = || Store::new(MemoryStorage::new(), StoreOptions::default()));

#[test]
fn test_new_is_empty() {
    let storage = MemoryStorage::new();
    assert!(storage.is_empty());
    assert_eq!(storage.len(), 0);
    assert!(storage.keys().is_empty());
}

#[test]
fn test_from_map() {
    let storage = MemoryStorage::from_map(HashMap::from([
        ("foo".to_string(), json!("bar")),
        ("n".to_string(), json!(1)),
    ]));

    assert_eq!(storage.len(), 2);
    assert_eq!(storage.get("foo").unwrap(), json!("bar"));
    assert_eq!(storage.raw("n"), Some(json!(1)));
}

#[test]
fn test_raw_missing_is_none() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.raw("missing"), None);
    assert_eq!(storage.get("missing").unwrap(), Value::Null);
}

#[test]
fn test_keys_sorted() {
    let storage = MemoryStorage::new();
    for key in ["c", "a", "b"] {
        storage.set(key, json!(key)).unwrap();
    }
    assert_eq!(storage.keys(), vec!["a", "b", "c"]);
}

#[test]
fn test_default_hooks_are_empty() {
    let storage = MemoryStorage::new();
    assert!(!storage.hooks().has_transforms());
    assert!(!storage.hooks().has_error_handlers());
}

#[test]
fn test_json_hooks_store_text() {
    let storage = MemoryStorage::with_hooks(AdapterHooks::json());
    let store = Store::new(storage.clone(), StoreOptions::default());

    store.set("n", json!(1)).unwrap();
    store.set("s", json!("text")).unwrap();

    assert_eq!(storage.raw("n"), Some(json!("1")));
    assert_eq!(storage.raw("s"), Some(json!("text")));
    assert_eq!(store.get("n").unwrap(), json!(1));
}

#[test]
fn test_json_numeric_string_comes_back_as_number() {
    // The text medium cannot tell "1" from 1
    let storage = MemoryStorage::with_hooks(AdapterHooks::json());
    let store = Store::new(storage, StoreOptions::default());

    store.set("id", json!("1")).unwrap();
    assert_eq!(store.get("id").unwrap(), json!(1));
}

#[test]
fn test_two_namespaces_share_one_medium() {
    let storage = MemoryStorage::new();
    let a = Store::new(storage.clone(), StoreOptions::new().namespace("a_"));
    let b = Store::new(storage.clone(), StoreOptions::new().namespace("b_"));

    a.set("key", json!("from a")).unwrap();
    b.set("key", json!("from b")).unwrap();

    assert_eq!(a.get("key").unwrap(), json!("from a"));
    assert_eq!(b.get("key").unwrap(), json!("from b"));
    assert_eq!(storage.keys(), vec!["a_key", "b_key"]);

    // Clearing through one namespace clears the whole medium
    a.clear().unwrap();
    assert_eq!(b.get("key").unwrap(), Value::Null);
}

#[test]
fn test_debug_does_not_dump_contents() {
    let storage = MemoryStorage::new();
    storage.set("secret", json!("value")).unwrap();

    let debug = format!("{:?}", storage);
    assert!(debug.contains("len: 1"));
    assert!(!debug.contains("secret"));
}
