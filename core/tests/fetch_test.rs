//! Tests for the HTTP fetcher and the background fetch worker
//!
//! Uses a local mockito server in place of the agent endpoint.

use agent_entry_core::config::WidgetConfig;
use agent_entry_core::fetch::{AgentFetcher, FetchRequest, FetchWorker, HttpAgentFetcher};
use agent_entry_core::state::{FixedClock, MemoryStore};
use agent_entry_core::{Agent, EntryController, FetchError};
use chrono::NaiveDate;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

const AGENTS_BODY: &str = r#"[
    {"id":"1","title":"Bot A","url":"https://a","description":"first"},
    {"title":"Bot B","url":"https://b","avatar":"https://b/avatar.png"}
]"#;

#[tokio::test]
async fn test_http_fetcher_decodes_array() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/agents")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(AGENTS_BODY)
        .create_async()
        .await;

    let fetcher = HttpAgentFetcher::new().unwrap();
    let agents = fetcher
        .fetch(&format!("{}/agents", server.url()))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(agents.len(), 2);
    assert_eq!(agents[0].description.as_deref(), Some("first"));
    assert_eq!(agents[1].avatar.as_deref(), Some("https://b/avatar.png"));
}

#[tokio::test]
async fn test_http_fetcher_non_array_is_empty() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/agents")
        .with_status(200)
        .with_body(r#"{"data":[{"title":"Bot A","url":"https://a"}]}"#)
        .create_async()
        .await;

    let fetcher = HttpAgentFetcher::new().unwrap();
    let agents = fetcher
        .fetch(&format!("{}/agents", server.url()))
        .await
        .unwrap();

    assert!(agents.is_empty());
}

#[tokio::test]
async fn test_http_fetcher_error_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/agents")
        .with_status(503)
        .with_body(AGENTS_BODY)
        .create_async()
        .await;

    let fetcher = HttpAgentFetcher::new().unwrap();
    let result = fetcher.fetch(&format!("{}/agents", server.url())).await;

    assert!(matches!(result, Err(FetchError::Status(503))));
}

#[tokio::test]
async fn test_http_fetcher_invalid_json() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/agents")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let fetcher = HttpAgentFetcher::new().unwrap();
    let result = fetcher.fetch(&format!("{}/agents", server.url())).await;

    assert!(matches!(result, Err(FetchError::Decode(_))));
}

#[test]
fn test_worker_delivers_outcome_and_wakes_host() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/agents")
        .with_status(200)
        .with_body(AGENTS_BODY)
        .create();

    let worker = FetchWorker::new(Arc::new(HttpAgentFetcher::new().unwrap())).unwrap();
    let wakeups = Arc::new(AtomicUsize::new(0));
    let request = FetchRequest {
        url: format!("{}/agents", server.url()),
        generation: 0,
    };

    {
        let wakeups = wakeups.clone();
        worker.spawn(request.clone(), move || {
            wakeups.fetch_add(1, Ordering::SeqCst);
        });
    }

    let outcome = worker
        .recv_timeout(Duration::from_secs(10))
        .expect("outcome arrives");
    assert_eq!(outcome.request, request);
    assert_eq!(outcome.result.unwrap().len(), 2);
    assert_eq!(wakeups.load(Ordering::SeqCst), 1);
    assert!(worker.drain().is_empty());
}

#[test]
fn test_worker_reports_unreachable_endpoint() {
    let worker = FetchWorker::new(Arc::new(HttpAgentFetcher::new().unwrap())).unwrap();
    worker.spawn(
        FetchRequest {
            // port 9 (discard) is not expected to accept connections
            url: "http://127.0.0.1:9/agents".to_string(),
            generation: 3,
        },
        || {},
    );

    let outcome = worker
        .recv_timeout(Duration::from_secs(15))
        .expect("failure is still reported");
    assert_eq!(outcome.request.generation, 3);
    assert!(matches!(outcome.result, Err(FetchError::Request(_))));
}

#[test]
fn test_controller_with_worker_end_to_end() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/agents")
        .with_status(200)
        .with_body(AGENTS_BODY)
        .expect(1)
        .create();

    let config = WidgetConfig {
        api_url: Some(format!("{}/agents", server.url())),
        ..Default::default()
    };
    let mut ctrl = EntryController::new(
        config,
        MemoryStore::new(),
        FixedClock::new(NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()),
    );
    let worker = FetchWorker::new(Arc::new(HttpAgentFetcher::new().unwrap())).unwrap();

    assert!(ctrl.initialize().is_none());
    let now = Instant::now();
    let request = ctrl.pointer_enter(now).expect("hover fetches");
    worker.spawn(request, || {});

    // hover keeps working while the fetch is outstanding
    ctrl.pointer_leave(now);
    assert!(ctrl.pointer_enter(now).is_none());
    assert!(ctrl.is_open());

    let outcome = worker.recv_timeout(Duration::from_secs(10)).unwrap();
    ctrl.complete_fetch(outcome);

    assert!(!ctrl.is_loading());
    assert_eq!(
        ctrl.effective_agents()[0],
        Agent::new("Bot A", "https://a")
            .with_id("1")
            .with_description("first")
    );
    mock.assert();
}
