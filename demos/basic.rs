//! A session store chained in front of a persistent store.
//!
//! Run with:
//! ```sh
//! cargo run --example basic --features="memory"
//! ```

use stowkv::multi::MultiStore;
use stowkv::{
    Adapter, AdapterHooks, KeyValueStore, MemoryStorage, Store, StoreExt, StoreOptions, Value,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let session_medium = MemoryStorage::with_hooks(AdapterHooks::json());
    let local_medium = MemoryStorage::with_hooks(AdapterHooks::json());

    // Never persist the auth token beyond the session.
    let session = Store::new(session_medium.clone(), StoreOptions::new().namespace("app_"));
    let local = Store::new(
        local_medium.clone(),
        StoreOptions::new().namespace("app_").ignore(["token"]),
    );

    let chain = MultiStore::builder()
        .add_store(session)
        .add_store(local)
        .on_set_error(|failure, key, _value| {
            eprintln!("store {} could not persist {key}: {}", failure.index, failure.error);
            Ok(())
        })
        .build();

    // Write
    chain.set("token", Value::from("s3cr3t"))?;
    chain.set_as("prefs", &serde_json::json!({"theme": "dark", "font_size": 14}))?;

    println!("session keys: {:?}", session_medium.keys());
    println!("local keys:   {:?}", local_medium.keys());

    // Simulate a new session: only the persistent store survives.
    session_medium.clear()?;

    // Read
    println!("prefs: {}", chain.get("prefs")?);
    println!("token: {}", chain.get("token")?);

    // Delete
    chain.remove("prefs")?;
    println!("prefs after remove: {}", chain.get("prefs")?);

    Ok(())
}
