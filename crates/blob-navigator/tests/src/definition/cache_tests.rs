use futures::future;

use super::*;
use crate::{
    definition::NoticeKind,
    ide::Range,
    occurrence::{Occurrence, SyntaxKind},
};

fn key(line: u32) -> OccurrenceKey {
    Occurrence::new(Range::from_numbers(line, 0, line, 3), Some(SyntaxKind::Identifier)).key()
}

fn ready(resolution: Resolution) -> BoxFuture<'static, Resolution> {
    future::ready(resolution).boxed()
}

#[tokio::test]
async fn second_request_joins_the_first() {
    let cache = DefinitionCache::new();
    let (first, started_first) =
        cache.get_or_start(key(0), || ready(Resolution::cached(NavigationAction::Notice(NoticeKind::NoDefinition))));
    let (second, started_second) = cache.get_or_start(key(0), || panic!("lookup must not start twice"));

    assert!(started_first);
    assert!(!started_second);
    assert_eq!(cache.state(&key(0)), DefinitionState::Pending);
    assert_eq!(first.await, second.await);
    assert_eq!(cache.state(&key(0)), DefinitionState::Resolved(NavigationAction::Notice(NoticeKind::NoDefinition)));
}

#[tokio::test]
async fn transient_results_are_evicted() {
    let cache = DefinitionCache::new();
    let (pending, _) = cache.get_or_start(key(1), || ready(Resolution::transient(NavigationAction::Deferred)));
    assert_eq!(pending.await, NavigationAction::Deferred);
    assert_eq!(cache.state(&key(1)), DefinitionState::Unrequested);
    assert!(cache.is_empty());
}

#[test]
fn keys_are_values_not_identities() {
    let cache = DefinitionCache::new();
    let a = Occurrence::new(Range::from_numbers(2, 1, 2, 4), Some(SyntaxKind::Identifier));
    let b = a;
    let (_, started) = cache.get_or_start(a.key(), || ready(Resolution::cached(NavigationAction::Deferred)));
    assert!(started);
    let (_, started) = cache.get_or_start(b.key(), || ready(Resolution::cached(NavigationAction::Deferred)));
    assert!(!started);
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn retry_after_a_transient_result_starts_a_fresh_lookup() {
    let cache = DefinitionCache::new();
    let (first, _) = cache.get_or_start(key(3), || ready(Resolution::transient(NavigationAction::Deferred)));
    assert_eq!(first.clone().await, NavigationAction::Deferred);

    let found = NavigationAction::Notice(NoticeKind::AtDefinition);
    let (second, started) = cache.get_or_start(key(3), || ready(Resolution::cached(found.clone())));
    assert!(started);
    assert_eq!(second.await, found);

    // Awaiting the finished transient lookup again must not evict its successor.
    assert_eq!(first.await, NavigationAction::Deferred);
    assert_eq!(cache.state(&key(3)), DefinitionState::Resolved(found));
    assert_eq!(cache.len(), 1);
}
