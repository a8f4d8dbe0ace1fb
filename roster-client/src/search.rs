//! Debounced, latest-wins employee search
//!
//! Keystrokes are pushed as raw input values. A background driver waits for a
//! quiet period, drops repeats of the last committed query and keeps at most
//! one backend request in flight: committing a newer query aborts the older
//! request, and a late response from an older generation is discarded.
//!
//! ```text
//! push("a") push("an") push("ana")   ..300ms..   commit "ana" -> backend
//!                                                      |
//!                      watch<SearchView>  <------------+
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use shared::models::Employee;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::{ClientResult, HttpClient};

/// Quiet period after the last keystroke before a query is committed
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Message shown to the user when a search request fails
pub const SEARCH_ERROR_MESSAGE: &str = "Hubo un error al realizar la búsqueda.";

/// Anything that can answer a name query
#[async_trait]
pub trait SearchBackend: Send + Sync + 'static {
    async fn search(&self, query: &str) -> ClientResult<Vec<Employee>>;
}

#[async_trait]
impl SearchBackend for HttpClient {
    async fn search(&self, query: &str) -> ClientResult<Vec<Employee>> {
        HttpClient::search(self, query).await
    }
}

/// What the form renders
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchView {
    /// Last committed query
    pub query: String,
    /// Employees for the last completed request
    pub results: Vec<Employee>,
    /// A request for `query` is in flight
    pub loading: bool,
    /// User-facing error from the last failed request
    pub error: Option<String>,
    /// Commit counter; bumps on every accepted query
    pub generation: u64,
}

struct Outcome {
    generation: u64,
    result: ClientResult<Vec<Employee>>,
}

/// Handle to a running search pipeline
///
/// Dropping the handle stops the driver task and aborts any in-flight request.
pub struct SearchPipeline {
    input: mpsc::UnboundedSender<String>,
    view: watch::Receiver<SearchView>,
    shutdown: CancellationToken,
    driver: JoinHandle<()>,
}

impl SearchPipeline {
    /// Spawn a pipeline with the default debounce interval
    pub fn new<B: SearchBackend>(backend: B) -> Self {
        Self::with_debounce(backend, DEFAULT_DEBOUNCE)
    }

    /// Spawn a pipeline on the current tokio runtime
    pub fn with_debounce<B: SearchBackend>(backend: B, debounce: Duration) -> Self {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(SearchView::default());
        let shutdown = CancellationToken::new();

        let driver = SearchDriver::new(Arc::new(backend), debounce, view_tx);
        let task = tokio::spawn(driver.run(input_rx, shutdown.clone()));

        Self {
            input: input_tx,
            view: view_rx,
            shutdown,
            driver: task,
        }
    }

    /// Feed the current input value. Returns `false` once the driver has stopped.
    pub fn push(&self, value: impl Into<String>) -> bool {
        self.input.send(value.into()).is_ok()
    }

    /// Receiver notified on every view change
    pub fn subscribe(&self) -> watch::Receiver<SearchView> {
        self.view.clone()
    }

    /// Snapshot of the current view
    pub fn view(&self) -> SearchView {
        self.view.borrow().clone()
    }

    /// Stop the driver and wait for it to exit
    pub async fn shutdown(mut self) {
        self.shutdown.cancel();
        match (&mut self.driver).await {
            Err(e) if e.is_panic() => tracing::error!("Search driver panicked: {e}"),
            _ => {}
        }
    }
}

impl Drop for SearchPipeline {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

struct SearchDriver<B> {
    backend: Arc<B>,
    debounce: Duration,
    view: watch::Sender<SearchView>,
    committed: Option<String>,
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
}

impl<B: SearchBackend> SearchDriver<B> {
    fn new(backend: Arc<B>, debounce: Duration, view: watch::Sender<SearchView>) -> Self {
        Self {
            backend,
            debounce,
            view,
            committed: None,
            generation: 0,
            in_flight: None,
        }
    }

    async fn run(mut self, mut input: mpsc::UnboundedReceiver<String>, shutdown: CancellationToken) {
        tracing::debug!(debounce_ms = self.debounce.as_millis() as u64, "Search pipeline started");

        let (outcome_tx, mut outcomes) = mpsc::unbounded_channel();
        let mut pending: Option<String> = None;
        let mut deadline: Option<Instant> = None;

        loop {
            let sleep_until = deadline.unwrap_or_else(|| Instant::now() + Duration::from_secs(3600));

            tokio::select! {
                _ = shutdown.cancelled() => break,

                value = input.recv() => match value {
                    Some(value) => {
                        pending = Some(value);
                        deadline = Some(Instant::now() + self.debounce);
                    }
                    None => break,
                },

                _ = tokio::time::sleep_until(sleep_until), if deadline.is_some() => {
                    deadline = None;
                    if let Some(query) = pending.take() {
                        self.commit(query, &outcome_tx);
                    }
                }

                Some(outcome) = outcomes.recv() => self.apply(outcome),
            }
        }

        self.abort_in_flight();
        tracing::debug!("Search pipeline stopped");
    }

    fn abort_in_flight(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }

    fn commit(&mut self, query: String, outcomes: &mpsc::UnboundedSender<Outcome>) {
        if self.committed.as_deref() == Some(query.as_str()) {
            tracing::trace!(%query, "Query unchanged, skipping");
            return;
        }

        self.committed = Some(query.clone());
        self.generation += 1;
        self.abort_in_flight();
        let generation = self.generation;

        if query.is_empty() {
            self.view.send_modify(|view| {
                view.query.clear();
                view.results.clear();
                view.loading = false;
                view.error = None;
                view.generation = generation;
            });
            return;
        }

        tracing::debug!(%query, generation, "Committing search");
        self.view.send_modify(|view| {
            view.query.clone_from(&query);
            view.loading = true;
            view.generation = generation;
        });

        let backend = Arc::clone(&self.backend);
        let outcomes = outcomes.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let result = backend.search(&query).await;
            let _ = outcomes.send(Outcome { generation, result });
        }));
    }

    fn apply(&mut self, outcome: Outcome) {
        if outcome.generation != self.generation {
            tracing::debug!(
                stale = outcome.generation,
                current = self.generation,
                "Discarding stale search response"
            );
            return;
        }
        self.in_flight = None;

        match outcome.result {
            Ok(results) => {
                tracing::debug!(count = results.len(), "Search completed");
                self.view.send_modify(|view| {
                    view.results = results;
                    view.loading = false;
                    view.error = None;
                });
            }
            Err(e) => {
                tracing::warn!(
                    query = self.committed.as_deref().unwrap_or_default(),
                    code = %e.code(),
                    "Search request failed: {e}"
                );
                self.view.send_modify(|view| {
                    view.results.clear();
                    view.loading = false;
                    view.error = Some(SEARCH_ERROR_MESSAGE.to_string());
                });
            }
        }
    }
}
