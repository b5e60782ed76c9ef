use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use super::*;

#[derive(Default)]
struct CountingSource {
    calls: AtomicUsize,
    failures_left: Mutex<usize>,
}

#[async_trait]
impl BlameSource for CountingSource {
    async fn blame_hunks(
        &self,
        _key: &BlameKey,
    ) -> Result<Vec<BlameHunkData>, CodeIntelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        let mut failures_left = self.failures_left.lock().unwrap();
        if *failures_left > 0 {
            *failures_left -= 1;
            return Err(CodeIntelError::Transport("blame backend unavailable".to_owned()));
        }
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn concurrent_fetches_share_one_request() {
    let source = Arc::new(CountingSource::default());
    let store = BlameStore::new(source.clone());
    let key = BlameKey::new("r", "main", "a.rs");

    let (first, second) = tokio::join!(store.hunks(key.clone()), store.hunks(key.clone()));
    assert!(first.is_ok());
    assert!(second.is_ok());
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    assert!(store.is_memoized(&key));

    store.hunks(key).await.unwrap();
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn revisions_are_fetched_separately() {
    let source = Arc::new(CountingSource::default());
    let store = BlameStore::new(source.clone());

    store.hunks(BlameKey::new("r", "main", "a.rs")).await.unwrap();
    store.hunks(BlameKey::new("r", "v1.0", "a.rs")).await.unwrap();
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn failures_are_not_memoized() {
    let source = Arc::new(CountingSource {
        calls: AtomicUsize::new(0),
        failures_left: Mutex::new(1),
    });
    let store = BlameStore::new(source.clone());
    let key = BlameKey::new("r", "main", "a.rs");

    assert!(store.hunks(key.clone()).await.is_err());
    assert!(!store.is_memoized(&key));
    assert!(store.hunks(key.clone()).await.is_ok());
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
}
