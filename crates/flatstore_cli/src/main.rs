//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `flatstore_core` linkage.
//! - Run one save/read cycle against a scratch store for quick local sanity
//!   checks.

use flatstore_core::{bind_identifier, DocumentStore, JsonDocumentStore, StoreOptions};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct Probe {
    key: String,
    runs: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("flatstore_core ping={}", flatstore_core::ping());
    println!("flatstore_core version={}", flatstore_core::core_version());

    bind_identifier::<Probe>("key");

    let path = std::env::temp_dir().join("flatstore-probe.json");
    let store: JsonDocumentStore<Probe> =
        JsonDocumentStore::open(&path, StoreOptions::default())?;

    let runs = match store.find_by_id(&serde_json::json!("smoke"))? {
        Some(previous) => previous.runs + 1,
        None => 1,
    };
    store.save_or_update(&Probe {
        key: "smoke".to_string(),
        runs,
    })?;

    println!(
        "flatstore_core store path={} documents={} runs={}",
        path.display(),
        store.find_all()?.len(),
        runs
    );
    Ok(())
}
