//! SqliteVectorStore: upsert identity, deletes, and the top-k/threshold contract.

use std::sync::Arc;

use engram_core::config::VectorConfig;
use engram_core::models::Metadata;
use engram_core::traits::IVectorStore;
use engram_embeddings::TfIdfEmbedder;
use engram_storage::{SqliteVectorStore, StorageEngine};

fn store_with(config: VectorConfig) -> SqliteVectorStore {
    let storage = Arc::new(StorageEngine::open_in_memory().unwrap());
    SqliteVectorStore::new(storage, Arc::new(TfIdfEmbedder::new(128)), &config)
}

fn store() -> SqliteVectorStore {
    store_with(VectorConfig::default())
}

fn meta(pairs: &[(&str, &str)]) -> Metadata {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn add_then_get() {
    let store = store();
    store
        .add("m1", "user likes green tea", &meta(&[("about", "user")]))
        .unwrap();

    let item = store.get("m1").unwrap().unwrap();
    assert_eq!(item.text, "user likes green tea");
    assert_eq!(item.metadata.get("about").map(String::as_str), Some("user"));
    assert!(item.similarity.is_none());
    assert!(store.get("missing").unwrap().is_none());
}

#[test]
fn add_with_existing_id_replaces_in_place() {
    let store = store();
    store.add("m1", "user likes green tea", &Metadata::new()).unwrap();
    store.add("m1", "user likes black tea", &Metadata::new()).unwrap();

    assert_eq!(store.count().unwrap(), 1);
    assert_eq!(store.get("m1").unwrap().unwrap().text, "user likes black tea");
}

#[test]
fn delete_ignores_unknown_ids() {
    let store = store();
    store.add("m1", "owns a cat", &Metadata::new()).unwrap();
    store
        .delete(&["m1".to_string(), "ghost".to_string()])
        .unwrap();
    assert_eq!(store.count().unwrap(), 0);
    store.delete(&[]).unwrap();
}

#[test]
fn search_ranks_best_first_with_similarity() {
    let store = store();
    store.add("tea", "user likes green tea", &Metadata::new()).unwrap();
    store.add("trip", "flight to Osaka on Friday", &Metadata::new()).unwrap();

    let results = store.search("does the user like tea", 5, 0.0).unwrap();
    assert_eq!(results[0].id, "tea");
    let sims: Vec<f32> = results.iter().filter_map(|r| r.similarity).collect();
    assert_eq!(sims.len(), results.len());
    assert!(sims.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn search_top_k_is_capped_by_configured_max() {
    let store = store_with(VectorConfig {
        max_top_k: 2,
        ..VectorConfig::default()
    });
    for i in 0..5 {
        store
            .add(&format!("m{i}"), &format!("user note number {i}"), &Metadata::new())
            .unwrap();
    }
    assert_eq!(store.search("user note", 10, 0.0).unwrap().len(), 2);
    assert_eq!(store.search("user note", 1, 0.0).unwrap().len(), 1);
}

#[test]
fn search_on_empty_collection_is_empty() {
    let store = store();
    assert!(store.search("anything", 5, 0.0).unwrap().is_empty());
}

#[test]
fn request_threshold_only_raises_the_floor() {
    let store = store_with(VectorConfig {
        similarity_threshold: 0.99,
        ..VectorConfig::default()
    });
    store.add("tea", "user likes green tea", &Metadata::new()).unwrap();

    // A lower request threshold cannot undercut the configured one.
    assert!(store.search("green tea", 5, 0.0).unwrap().is_empty());
    // The exact text clears it.
    assert_eq!(store.search("user likes green tea", 5, 0.0).unwrap().len(), 1);

    let open = self::store();
    open.add("tea", "user likes green tea", &Metadata::new()).unwrap();
    assert!(open.search("green tea", 5, 1.01).unwrap().is_empty());
}

#[test]
fn collections_are_isolated() {
    let storage = Arc::new(StorageEngine::open_in_memory().unwrap());
    let embedder = Arc::new(TfIdfEmbedder::new(64));
    let a = SqliteVectorStore::new(
        storage.clone(),
        embedder.clone(),
        &VectorConfig {
            collection: "a".to_string(),
            ..VectorConfig::default()
        },
    );
    let b = SqliteVectorStore::new(
        storage,
        embedder,
        &VectorConfig {
            collection: "b".to_string(),
            ..VectorConfig::default()
        },
    );
    a.add("m1", "only in a", &Metadata::new()).unwrap();
    assert_eq!(a.count().unwrap(), 1);
    assert_eq!(b.count().unwrap(), 0);
    assert!(b.get("m1").unwrap().is_none());
}
