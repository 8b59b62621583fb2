// Fetch worker
// Runs fetch requests on a background runtime and queues the outcomes

use super::{AgentFetcher, FetchOutcome, FetchRequest};
use crate::error::{FetchError, WidgetError};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

/// Background executor for fetch requests
///
/// Owns a single-worker tokio runtime so a UI thread can stay synchronous.
/// Outcomes are queued and collected with [`FetchWorker::drain`]. Dropping
/// the worker shuts the runtime down and abandons in-flight requests.
pub struct FetchWorker {
    runtime: Runtime,
    fetcher: Arc<dyn AgentFetcher>,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
}

impl FetchWorker {
    /// Start a worker around `fetcher`
    pub fn new(fetcher: Arc<dyn AgentFetcher>) -> Result<Self, WidgetError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("agent-entry-fetch")
            .enable_all()
            .build()
            .map_err(WidgetError::Runtime)?;
        let (tx, rx) = mpsc::channel();

        Ok(Self {
            runtime,
            fetcher,
            tx,
            rx,
        })
    }

    /// Run `request` in the background
    ///
    /// `on_complete` runs on the worker thread after the outcome is queued;
    /// hosts use it to wake their event loop.
    pub fn spawn<F>(&self, request: FetchRequest, on_complete: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let fetcher = self.fetcher.clone();
        let tx = self.tx.clone();

        self.runtime.spawn(async move {
            let url = request.url.clone();
            let task = tokio::spawn(async move { fetcher.fetch(&url).await });
            let result = match task.await {
                Ok(result) => result,
                Err(e) => Err(FetchError::Aborted(e.to_string())),
            };

            // Receiver gone means the worker was dropped; nothing to report to.
            if tx.send(FetchOutcome { request, result }).is_ok() {
                on_complete();
            }
        });
    }

    /// Take every outcome that has arrived so far
    pub fn drain(&self) -> Vec<FetchOutcome> {
        self.rx.try_iter().collect()
    }

    /// Wait up to `timeout` for the next outcome
    pub fn recv_timeout(&self, timeout: Duration) -> Option<FetchOutcome> {
        match self.rx.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl std::fmt::Debug for FetchWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchWorker").finish_non_exhaustive()
    }
}
