use std::sync::Arc;

use serde_json::json;

use super::*;
use crate::embedding::MockEmbedder;
use crate::profile::Profile;
use crate::store::{EmbeddingUpdate, MockProfileStore};
use crate::testing::object;

fn store_with_speaker() -> Arc<MockProfileStore> {
    let store = MockProfileStore::new();
    store.insert(
        Role::Speaker,
        Profile::new(
            "s1",
            object(json!({ "full_name": "Ada", "topics": ["compilers", "  "], "bio": "" })),
        ),
    );
    Arc::new(store)
}

#[tokio::test]
async fn test_refresh_writes_summary_and_vector() {
    let store = store_with_speaker();
    let embedder = Arc::new(MockEmbedder::default());
    let refresher = EmbeddingRefresher::new(store.clone(), embedder.clone(), 100);

    let outcome = refresher.refresh(Role::Speaker, "s1").await.unwrap();

    assert_eq!(outcome, RefreshOutcome::Updated { dim: 200 });
    assert_eq!(
        store.updates(),
        vec![EmbeddingUpdate {
            role: Role::Speaker,
            id: "s1".to_string(),
            dim: 200,
            embedding_text: "full_name: Ada, topics: compilers".to_string(),
        }]
    );
    assert_eq!(embedder.calls(), vec!["full_name: Ada, topics: compilers"]);
}

#[tokio::test]
async fn test_refresh_missing_profile_is_noop() {
    let store = store_with_speaker();
    let embedder = Arc::new(MockEmbedder::default());
    let refresher = EmbeddingRefresher::new(store.clone(), embedder.clone(), 100);

    let outcome = refresher.refresh(Role::Organizer, "s1").await.unwrap();

    assert_eq!(outcome, RefreshOutcome::ProfileMissing);
    assert!(store.updates().is_empty());
    assert!(embedder.calls().is_empty());
}

#[tokio::test]
async fn test_refresh_rejects_short_vectors() {
    let store = store_with_speaker();
    let refresher = EmbeddingRefresher::new(store.clone(), Arc::new(MockEmbedder::new(200)), 512);

    let err = refresher.refresh(Role::Speaker, "s1").await.unwrap_err();

    assert!(matches!(err, MatchError::InvalidEmbedding(_)));
    assert!(store.updates().is_empty());
}

#[tokio::test]
async fn test_spawned_refresh_swallows_errors() {
    let refresher = EmbeddingRefresher::new(
        Arc::new(MockProfileStore::failing(500)),
        Arc::new(MockEmbedder::default()),
        100,
    );

    let handle = refresher.spawn_embedding_refresh(Role::Speaker, "s1".to_string());
    handle.await.expect("refresh task must not panic");
}

#[tokio::test]
async fn test_spawned_refresh_completes_update() {
    let store = store_with_speaker();
    let refresher = EmbeddingRefresher::new(store.clone(), Arc::new(MockEmbedder::default()), 100);

    refresher
        .spawn_embedding_refresh(Role::Speaker, "s1".to_string())
        .await
        .unwrap();

    assert_eq!(store.updates().len(), 1);
}
