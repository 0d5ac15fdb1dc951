//! List Controller
//!
//! Owns the committed filter state for one item listing. Non-search filter
//! edits re-query immediately; search keystrokes are debounced so only the
//! settled value triggers a fetch. Each committed fetch carries a
//! generation number; a resolution from a superseded generation is dropped,
//! so a slow response can never overwrite a newer filter's results
//! (last-committed-wins).

use std::sync::Arc;

use log::debug;
use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Duration, Instant};

use crate::domain::{DomainError, ItemFilter, KindFilter, SortOrder, StatusFilter};
use crate::repository::{ItemQuery, ResultSet};

/// Quiet period after the last search keystroke before the query commits
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Where the controller currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    /// No pending input, nothing fetched yet
    Idle,
    /// A search keystroke occurred, quiet-period timer running
    Debouncing,
    /// A query is in flight
    Fetching,
    /// The authoritative fetch resolved, successfully or not
    Settled,
}

/// Published controller state: the committed filter plus the latest
/// results or error. Results are replaced wholesale on each settled
/// fetch and retained across a fetch error.
#[derive(Debug, Clone)]
pub struct ListSnapshot {
    pub filter: ItemFilter,
    pub phase: ListPhase,
    pub results: Option<ResultSet>,
    pub error: Option<DomainError>,
    pub generation: u64,
}

enum ListEvent {
    SetKind(KindFilter),
    SetStatus(StatusFilter),
    SetSort(SortOrder),
    SetPage(u32),
    SearchInput(String),
    Refresh,
}

struct FetchOutcome {
    generation: u64,
    result: Result<ResultSet, DomainError>,
}

/// Front half of the controller, held by the render layer.
///
/// Dropping the handle tears the controller down: the event channel
/// closes, the task exits, and any in-flight fetch result lands on a
/// closed channel and is discarded.
pub struct ListHandle {
    events: mpsc::UnboundedSender<ListEvent>,
    snapshot: watch::Receiver<ListSnapshot>,
}

impl ListHandle {
    /// Spawn a controller over `repo`, issuing the initial fetch at once
    pub fn spawn(repo: Arc<dyn ItemQuery>, initial: ItemFilter) -> Self {
        Self::spawn_with_debounce(repo, initial, SEARCH_DEBOUNCE)
    }

    pub fn spawn_with_debounce(
        repo: Arc<dyn ItemQuery>,
        initial: ItemFilter,
        debounce: Duration,
    ) -> Self {
        let (events, event_rx) = mpsc::unbounded_channel();
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot) = watch::channel(ListSnapshot {
            filter: initial.clone(),
            phase: ListPhase::Idle,
            results: None,
            error: None,
            generation: 0,
        });

        let controller = ListController {
            repo,
            events: event_rx,
            fetch_tx,
            fetches: fetch_rx,
            out: snapshot_tx,
            debounce,
            filter: initial,
            pending_search: None,
            deadline: None,
            phase: ListPhase::Idle,
            results: None,
            error: None,
            generation: 0,
        };
        tokio::spawn(controller.run());

        Self { events, snapshot }
    }

    pub fn set_kind(&self, kind: KindFilter) {
        let _ = self.events.send(ListEvent::SetKind(kind));
    }

    pub fn set_status(&self, status: StatusFilter) {
        let _ = self.events.send(ListEvent::SetStatus(status));
    }

    pub fn set_sort(&self, sort: SortOrder) {
        let _ = self.events.send(ListEvent::SetSort(sort));
    }

    pub fn set_page(&self, page: u32) {
        let _ = self.events.send(ListEvent::SetPage(page));
    }

    /// Feed one search keystroke; the committed value is whatever stands
    /// after the quiet period
    pub fn search_input(&self, text: impl Into<String>) {
        let _ = self.events.send(ListEvent::SearchInput(text.into()));
    }

    /// Re-run the current filter (e.g. after a mutation elsewhere)
    pub fn refresh(&self) {
        let _ = self.events.send(ListEvent::Refresh);
    }

    /// Current published state
    pub fn snapshot(&self) -> ListSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to state changes
    pub fn watch(&self) -> watch::Receiver<ListSnapshot> {
        self.snapshot.clone()
    }
}

struct ListController {
    repo: Arc<dyn ItemQuery>,
    events: mpsc::UnboundedReceiver<ListEvent>,
    fetch_tx: mpsc::UnboundedSender<FetchOutcome>,
    fetches: mpsc::UnboundedReceiver<FetchOutcome>,
    out: watch::Sender<ListSnapshot>,
    debounce: Duration,

    filter: ItemFilter,
    pending_search: Option<String>,
    deadline: Option<Instant>,
    phase: ListPhase,
    results: Option<ResultSet>,
    error: Option<DomainError>,
    generation: u64,
}

impl ListController {
    async fn run(mut self) {
        self.commit();
        loop {
            tokio::select! {
                event = self.events.recv() => match event {
                    Some(event) => self.apply(event),
                    // Handle dropped: stop; pending timer and in-flight
                    // results die with the channels.
                    None => break,
                },
                Some(outcome) = self.fetches.recv() => self.settle(outcome),
                _ = Self::quiet_period(self.deadline) => self.commit_search(),
            }
        }
    }

    /// Pends forever while no debounce timer is armed
    async fn quiet_period(deadline: Option<Instant>) {
        match deadline {
            Some(deadline) => sleep_until(deadline).await,
            None => std::future::pending().await,
        }
    }

    fn apply(&mut self, event: ListEvent) {
        match event {
            ListEvent::SetKind(kind) => {
                self.filter.kind = kind;
                self.filter.page = None;
                self.commit();
            }
            ListEvent::SetStatus(status) => {
                self.filter.status = status;
                self.filter.page = None;
                self.commit();
            }
            ListEvent::SetSort(sort) => {
                self.filter.sort = sort;
                self.filter.page = None;
                self.commit();
            }
            ListEvent::SetPage(page) => {
                self.filter.page = Some(page);
                self.commit();
            }
            ListEvent::SearchInput(text) => {
                // Every keystroke re-arms the timer; only the settled
                // value is committed.
                self.pending_search = Some(text);
                self.deadline = Some(Instant::now() + self.debounce);
                self.phase = ListPhase::Debouncing;
                self.publish();
            }
            ListEvent::Refresh => self.commit(),
        }
    }

    fn commit_search(&mut self) {
        self.deadline = None;
        if let Some(text) = self.pending_search.take() {
            self.filter.search = text.trim().to_string();
            self.filter.page = None;
            self.commit();
        }
    }

    /// Make the current filter authoritative and fetch it
    fn commit(&mut self) {
        self.generation += 1;
        let generation = self.generation;
        let repo = Arc::clone(&self.repo);
        let filter = self.filter.clone();
        let fetch_tx = self.fetch_tx.clone();
        tokio::spawn(async move {
            let result = repo.query(&filter).await;
            let _ = fetch_tx.send(FetchOutcome { generation, result });
        });
        self.phase = ListPhase::Fetching;
        self.publish();
    }

    fn settle(&mut self, outcome: FetchOutcome) {
        if outcome.generation != self.generation {
            debug!(
                "discarding stale fetch result (generation {}, current {})",
                outcome.generation, self.generation
            );
            return;
        }
        self.phase = ListPhase::Settled;
        match outcome.result {
            Ok(results) => {
                self.results = Some(results);
                self.error = None;
            }
            // Prior results stay displayed alongside the error
            Err(e) => self.error = Some(e),
        }
        self.publish();
    }

    fn publish(&self) {
        self.out.send_replace(ListSnapshot {
            filter: self.filter.clone(),
            phase: self.phase,
            results: self.results.clone(),
            error: self.error.clone(),
            generation: self.generation,
        });
    }
}
