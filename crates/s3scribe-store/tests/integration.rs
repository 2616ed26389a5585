use s3scribe_core::{ObjectLocation, ObjectMetadata, StoreError};
use s3scribe_store::{confirmation_line, ExistenceChecker, MemoryObjectStore};
use std::sync::Arc;

fn audio_metadata(len: i64) -> ObjectMetadata {
    ObjectMetadata {
        content_length: Some(len),
        content_type: Some("audio/wav".to_string()),
        e_tag: Some("\"9b2cf535f27731c974343645a3985328\"".to_string()),
    }
}

#[tokio::test]
async fn test_check_existing_object_end_to_end() {
    let store = Arc::new(MemoryObjectStore::new());
    let loc = ObjectLocation::new("media", "calls/2024/intro.wav");
    store.insert(&loc, audio_metadata(88_244));

    let checker = ExistenceChecker::new(Box::new(Arc::clone(&store)));
    let meta = checker.check(&loc).await.unwrap();

    assert_eq!(
        confirmation_line(&loc, &meta),
        "Object s3://media/calls/2024/intro.wav exists (88244 bytes)"
    );
    assert_eq!(store.lookup_count(), 1);
}

#[tokio::test]
async fn test_check_missing_object_is_single_lookup() {
    let store = Arc::new(MemoryObjectStore::new());
    let checker = ExistenceChecker::new(Box::new(Arc::clone(&store)));

    let result = checker
        .check(&ObjectLocation::new("media", "missing.wav"))
        .await;
    match result {
        Err(StoreError::NotFound(uri)) => assert_eq!(uri, "s3://media/missing.wav"),
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert_eq!(store.lookup_count(), 1);
}

#[tokio::test]
async fn test_check_key_is_case_sensitive() {
    let store = Arc::new(MemoryObjectStore::new());
    store.insert(&ObjectLocation::new("media", "Intro.wav"), audio_metadata(1));
    let checker = ExistenceChecker::new(Box::new(Arc::clone(&store)));

    assert!(checker
        .check(&ObjectLocation::new("media", "intro.wav"))
        .await
        .is_err());
}
