use std::sync::Mutex;

use super::*;
use crate::{navigation::Selection, view::Notice};

#[derive(Default)]
struct SpinnerHost {
    events: Mutex<Vec<(bool, u64)>>,
}

impl NavigationHost for SpinnerHost {
    fn push_history(
        &self,
        _url: &str,
    ) {
    }

    fn go_back(&self) {}

    fn go_forward(&self) {}

    fn show_notice(
        &self,
        _notice: Notice,
    ) {
    }

    fn selection_changed(
        &self,
        _selection: Selection,
    ) {
    }

    fn pending_started(
        &self,
        id: u64,
        _anchor: Range,
    ) {
        self.events.lock().unwrap().push((true, id));
    }

    fn pending_finished(
        &self,
        id: u64,
    ) {
        self.events.lock().unwrap().push((false, id));
    }

    fn scroll_into_view(
        &self,
        _line: u32,
    ) -> bool {
        false
    }
}

fn host() -> (Arc<SpinnerHost>, Arc<dyn NavigationHost>) {
    let spinner = Arc::new(SpinnerHost::default());
    let host: Arc<dyn NavigationHost> = spinner.clone();
    (spinner, host)
}

#[test]
fn end_reports_the_finish_once() {
    let (spinner, host) = host();
    let indicator = PendingIndicator::begin(&host, Range::default(), CancellationToken::new());
    let id = indicator.id();
    indicator.end();
    assert_eq!(*spinner.events.lock().unwrap(), vec![(true, id), (false, id)]);
}

#[test]
fn dropping_without_end_still_finishes() {
    let (spinner, host) = host();
    let id = {
        let indicator = PendingIndicator::begin(&host, Range::default(), CancellationToken::new());
        indicator.id()
    };
    assert_eq!(*spinner.events.lock().unwrap(), vec![(true, id), (false, id)]);
}

#[test]
fn ids_are_unique() {
    let (_spinner, host) = host();
    let first = PendingIndicator::begin(&host, Range::default(), CancellationToken::new());
    let second = PendingIndicator::begin(&host, Range::default(), CancellationToken::new());
    assert_ne!(first.id(), second.id());
}

#[test]
fn cancelled_liveness_silences_the_finish() {
    let (spinner, host) = host();
    let liveness = CancellationToken::new();
    let indicator = PendingIndicator::begin(&host, Range::default(), liveness.clone());
    let id = indicator.id();
    liveness.cancel();
    indicator.end();
    assert_eq!(*spinner.events.lock().unwrap(), vec![(true, id)]);
}
