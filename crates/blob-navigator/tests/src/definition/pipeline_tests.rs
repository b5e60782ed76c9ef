use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use tokio::sync::oneshot;

use super::*;
use crate::{
    definition::NavigationTarget,
    codeintel::{CodeIntelError, HoverContents, MaybeLoadingResult},
    ide::{Location, Range},
    occurrence::SyntaxKind,
};

/// Client whose answers are released by the test, one call at a time.
struct GatedClient {
    calls: AtomicUsize,
    gates: Mutex<Vec<oneshot::Receiver<Result<MaybeLoadingResult<Vec<Location>>, CodeIntelError>>>>,
}

impl GatedClient {
    fn new() -> (Arc<Self>, Vec<oneshot::Sender<Result<MaybeLoadingResult<Vec<Location>>, CodeIntelError>>>) {
        let mut senders = Vec::new();
        let mut receivers = Vec::new();
        for _ in 0..4 {
            let (tx, rx) = oneshot::channel();
            senders.push(tx);
            receivers.push(rx);
        }
        receivers.reverse();
        let client = Arc::new(Self {
            calls: AtomicUsize::new(0),
            gates: Mutex::new(receivers),
        });
        (client, senders)
    }
}

#[async_trait]
impl CodeIntelClient for GatedClient {
    async fn definition(
        &self,
        _params: PositionParams,
    ) -> Result<MaybeLoadingResult<Vec<Location>>, CodeIntelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gates.lock().unwrap().pop().expect("test released too few gates");
        gate.await.unwrap_or(Err(CodeIntelError::Disposed))
    }

    async fn hover(
        &self,
        _params: PositionParams,
    ) -> Result<MaybeLoadingResult<Option<HoverContents>>, CodeIntelError> {
        Ok(MaybeLoadingResult::loaded(None))
    }
}

fn blob() -> Arc<BlobInfo> {
    Arc::new(BlobInfo {
        repo_name: "r".to_owned(),
        revision: "main".to_owned(),
        commit_id: "abc".to_owned(),
        file_path: "a.rs".to_owned(),
        content: "fn main() {}\n".to_owned(),
        lsif: None,
    })
}

fn occurrence() -> Occurrence {
    Occurrence::new(Range::from_numbers(0, 3, 0, 7), Some(SyntaxKind::IdentifierFunctionDefinition))
}

#[tokio::test]
async fn concurrent_requests_issue_one_remote_call() {
    let (client, mut senders) = GatedClient::new();
    let pipeline = DefinitionPipeline::new(blob(), client.clone(), Arc::new(DefinitionPerf::default()));

    let first = pipeline.request(&occurrence(), Position::new(0, 4));
    let second = pipeline.request(&occurrence(), Position::new(0, 5));
    let driver = tokio::spawn(first.clone());
    tokio::task::yield_now().await;
    assert_eq!(pipeline.state(&occurrence()), DefinitionState::Pending);

    senders.remove(0).send(Ok(MaybeLoadingResult::loaded(Vec::new()))).unwrap();
    let action = second.await;
    assert_eq!(driver.await.unwrap(), action);
    assert_eq!(action, NavigationAction::Notice(NoticeKind::NoDefinition));
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);

    let replay = pipeline.resolve(&occurrence(), Position::new(0, 4)).await;
    assert_eq!(replay, action);
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);

    let perf = pipeline.perf().snapshot();
    assert_eq!(perf.requests, 3);
    assert_eq!(perf.coalesced, 2);
    assert_eq!(perf.remote_calls, 1);
}

#[tokio::test]
async fn failures_are_retried_on_the_next_gesture() {
    let (client, mut senders) = GatedClient::new();
    let pipeline = DefinitionPipeline::new(blob(), client.clone(), Arc::new(DefinitionPerf::default()));

    senders.remove(0).send(Err(CodeIntelError::Transport("connection reset".to_owned()))).unwrap();
    let action = pipeline.resolve(&occurrence(), Position::new(0, 4)).await;
    assert_eq!(action, NavigationAction::Notice(NoticeKind::ResolutionFailed));
    assert_eq!(pipeline.state(&occurrence()), DefinitionState::Unrequested);

    senders.remove(0).send(Ok(MaybeLoadingResult::loading(Vec::new()))).unwrap();
    assert_eq!(pipeline.resolve(&occurrence(), Position::new(0, 4)).await, NavigationAction::Deferred);

    let location = Location::new("repo://r@abc/-/raw/b.rs", Some(Range::from_numbers(1, 0, 1, 2)));
    senders.remove(0).send(Ok(MaybeLoadingResult::loaded(vec![location]))).unwrap();
    let action = pipeline.resolve(&occurrence(), Position::new(0, 4)).await;
    assert_eq!(
        action,
        NavigationAction::Navigate(NavigationTarget {
            url: "/r@main/-/blob/b.rs?L2:1".to_owned(),
            selection: None,
        })
    );
    assert_eq!(client.calls.load(Ordering::SeqCst), 3);
    assert_eq!(pipeline.perf().snapshot().failures, 1);
}
