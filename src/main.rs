// Agent Entry GUI - Main Entry Point
// Native host window embedding the floating agent entry widget

mod state;
mod ui;

use agent_entry_core::fetch::{FetchWorker, HttpAgentFetcher};
use agent_entry_core::state::{FileStore, SystemClock};
use agent_entry_core::{EntryController, WidgetConfig, WidgetEvent};
use eframe::egui;
use state::HostState;
use std::sync::Arc;
use tracing::{info, warn};
use ui::{render_host_layout, AgentEntryWidget};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = WidgetConfig::from_env();
    info!(
        endpoint = ?config.endpoint(),
        static_agents = config.agents.len(),
        auto_hide = config.auto_hide,
        "Configuration loaded"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Agent Entry")
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Agent Entry",
        options,
        Box::new(move |cc| Box::new(AgentEntryApp::new(config, &cc.egui_ctx))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run window: {}", e))
}

/// Main application struct
/// Owns the host page state and the embedded widget
struct AgentEntryApp {
    /// Host page state fed by widget events
    host: HostState,
    /// Floating agent entry
    entry: AgentEntryWidget,
}

impl AgentEntryApp {
    /// Create the host and mount the widget
    fn new(config: WidgetConfig, ctx: &egui::Context) -> Self {
        let (events, host) = HostState::channel(200);

        let store = FileStore::new(FileStore::default_path());
        info!(path = %store.path().display(), "Using dismissal store");

        let mut controller = EntryController::new(config, store, SystemClock);
        controller.subscribe(move |event| {
            // Host gone means the window is closing
            let _ = events.send(event.clone());
        });

        let worker = match HttpAgentFetcher::new()
            .map_err(agent_entry_core::WidgetError::from)
            .and_then(|fetcher| FetchWorker::new(Arc::new(fetcher)))
        {
            Ok(worker) => Some(worker),
            Err(e) => {
                warn!(error = %e, "Remote agent lists disabled");
                None
            }
        };

        Self {
            host,
            entry: AgentEntryWidget::new(controller, worker, ctx),
        }
    }
}

impl eframe::App for AgentEntryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Widget first so events it emits this frame reach the page below
        self.entry.show(ctx);

        for event in self.host.drain() {
            match event {
                WidgetEvent::AgentSelected(agent) => {
                    info!(title = %agent.title, url = %agent.url, "Opening agent");
                    ctx.open_url(egui::OpenUrl::new_tab(&agent.url));
                }
                WidgetEvent::ComponentClosed => info!("Agent entry hidden for today"),
            }
        }

        render_host_layout(ctx, &self.host);
    }
}
