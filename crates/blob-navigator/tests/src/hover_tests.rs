use std::sync::Mutex;

use async_trait::async_trait;

use super::*;
use crate::{
    codeintel::{CodeIntelError, HoverContents, MarkupKind, MaybeLoadingResult},
    ide::Location,
    occurrence::SyntaxKind,
};

/// Answers every hover with the next queued response and records the URIs asked for.
struct QueuedClient {
    responses: Mutex<Vec<Result<MaybeLoadingResult<Option<HoverContents>>, CodeIntelError>>>,
    uris: Mutex<Vec<String>>,
}

impl QueuedClient {
    fn new(responses: Vec<Result<MaybeLoadingResult<Option<HoverContents>>, CodeIntelError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().rev().collect()),
            uris: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl CodeIntelClient for QueuedClient {
    async fn definition(
        &self,
        _params: PositionParams,
    ) -> Result<MaybeLoadingResult<Vec<Location>>, CodeIntelError> {
        Ok(MaybeLoadingResult::loaded(Vec::new()))
    }

    async fn hover(
        &self,
        params: PositionParams,
    ) -> Result<MaybeLoadingResult<Option<HoverContents>>, CodeIntelError> {
        self.uris.lock().unwrap().push(params.uri);
        self.responses.lock().unwrap().pop().unwrap_or(Ok(MaybeLoadingResult::loaded(None)))
    }
}

fn blob() -> BlobInfo {
    BlobInfo {
        repo_name: "github.com/acme/app".to_owned(),
        revision: "main".to_owned(),
        commit_id: "abc".to_owned(),
        file_path: "src/lib.rs".to_owned(),
        content: String::new(),
        lsif: None,
    }
}

fn markdown(value: &str) -> HoverContents {
    HoverContents {
        contents: vec![MarkupContent {
            kind: MarkupKind::Markdown,
            value: value.to_owned(),
        }],
        range: None,
    }
}

fn identifier() -> Occurrence {
    Occurrence::new(Range::from_numbers(2, 4, 2, 9), Some(SyntaxKind::Identifier))
}

#[tokio::test]
async fn found_hover_falls_back_to_the_occurrence_range() {
    let client = QueuedClient::new(vec![Ok(MaybeLoadingResult::loaded(Some(markdown("`value: u32`"))))]);
    let resolver = HoverResolver::new(&blob(), client.clone());

    let tooltip = resolver.hover(&identifier(), Position::new(2, 5)).await.expect("tooltip");
    assert_eq!(tooltip.range, identifier().range);
    assert_eq!(tooltip.contents[0].value, "`value: u32`");
    assert_eq!(*client.uris.lock().unwrap(), vec!["repo://github.com/acme/app@abc/-/raw/src/lib.rs".to_owned()]);
}

#[tokio::test]
async fn service_range_wins_over_the_occurrence_range() {
    let mut contents = markdown("struct Config");
    contents.range = Some(Range::from_numbers(2, 0, 2, 12));
    let client = QueuedClient::new(vec![Ok(MaybeLoadingResult::loaded(Some(contents)))]);
    let resolver = HoverResolver::new(&blob(), client);

    let tooltip = resolver.hover(&identifier(), Position::new(2, 5)).await.expect("tooltip");
    assert_eq!(tooltip.range, Range::from_numbers(2, 0, 2, 12));
}

#[tokio::test]
async fn loading_blank_and_failed_answers_yield_nothing() {
    let client = QueuedClient::new(vec![
        Ok(MaybeLoadingResult::loading(Some(markdown("partial")))),
        Ok(MaybeLoadingResult::loaded(Some(markdown("  ")))),
        Err(CodeIntelError::Transport("timed out".to_owned())),
    ]);
    let resolver = HoverResolver::new(&blob(), client.clone());

    for _ in 0..3 {
        assert_eq!(resolver.hover(&identifier(), Position::new(2, 5)).await, None);
    }
    assert_eq!(client.uris.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn non_interactive_occurrences_never_reach_the_service() {
    let client = QueuedClient::new(Vec::new());
    let resolver = HoverResolver::new(&blob(), client.clone());
    let comment = Occurrence::new(Range::from_numbers(0, 0, 0, 10), Some(SyntaxKind::Comment));
    let unknown = Occurrence::new(Range::from_numbers(1, 0, 1, 3), None);

    assert_eq!(resolver.hover(&comment, Position::new(0, 1)).await, None);
    assert_eq!(resolver.hover(&unknown, Position::new(1, 1)).await, None);
    assert!(client.uris.lock().unwrap().is_empty());
}
