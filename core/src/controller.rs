//! Trigger/panel controller
//!
//! Owns every piece of widget state: panel open/closed, the hover close
//! timer, vertical drag position, fetch-once bookkeeping for the remote agent
//! list and the "hide for today" decision. It performs no I/O besides the
//! injected [`KeyValueStore`] and never blocks: time is passed in as
//! [`Instant`]s, and remote fetches are handed to the host as
//! [`FetchRequest`]s whose outcomes come back through
//! [`EntryController::complete_fetch`].
//!
//! Every failure path is absorbed here. Hosts only ever observe
//! [`WidgetEvent`]s and the resolved [`PanelView`].

use crate::config::WidgetConfig;
use crate::events::{SubscriptionId, Subscribers, WidgetEvent};
use crate::fetch::{FetchOutcome, FetchRequest};
use crate::panel::{render_panel, PanelSignal, PanelView};
use crate::state::{Agent, Clock, DragState, FetchState, KeyValueStore, VisibilityState};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Instant;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Mounted,
    Unmounted,
}

/// Interaction state machine of the agent entry widget
pub struct EntryController {
    config: WidgetConfig,
    store: Box<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    lifecycle: Lifecycle,
    visibility: VisibilityState,
    fetch: FetchState,
    drag: DragState,
    close_deadline: Option<Instant>,
    dismissed_on: Option<NaiveDate>,
    subscribers: Subscribers,
}

impl EntryController {
    /// Create a controller; call [`EntryController::initialize`] before
    /// feeding it input
    pub fn new<S, C>(config: WidgetConfig, store: S, clock: C) -> Self
    where
        S: KeyValueStore + 'static,
        C: Clock + 'static,
    {
        Self {
            config,
            store: Box::new(store),
            clock: Arc::new(clock),
            lifecycle: Lifecycle::Created,
            visibility: VisibilityState::default(),
            fetch: FetchState::default(),
            drag: DragState::default(),
            close_deadline: None,
            dismissed_on: None,
            subscribers: Subscribers::default(),
        }
    }

    /// Mount the widget
    ///
    /// Reads the stored dismissal date. A date equal to today hides the widget
    /// for the rest of the session and nothing else happens. Any other stored
    /// value is stale and removed. Returns an eager fetch when auto-hide needs
    /// the remote list to decide visibility.
    pub fn initialize(&mut self) -> Option<FetchRequest> {
        if self.lifecycle != Lifecycle::Created {
            return None;
        }
        self.lifecycle = Lifecycle::Mounted;

        let today = self.clock.today();
        let key = self.config.storage_key.clone();
        let stored = match self.store.get(&key) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to read dismissal date");
                None
            }
        };

        if let Some(value) = stored {
            if parse_date(&value) == Some(today) {
                tracing::debug!(key = %key, "Widget dismissed for today");
                self.dismissed_on = Some(today);
                self.visibility.hidden = true;
                return None;
            }

            tracing::debug!(key = %key, stored = %value, "Clearing stale dismissal date");
            if let Err(e) = self.store.remove(&key) {
                tracing::warn!(key = %key, error = %e, "Failed to clear dismissal date");
            }
        }

        self.recompute_visibility();
        self.pending_fetch()
    }

    /// Replace the configuration
    ///
    /// A different endpoint resets the fetch-once state and drops the list
    /// fetched from the old one. Returns an eager fetch under the same rule as
    /// [`EntryController::initialize`].
    pub fn set_config(&mut self, config: WidgetConfig) -> Option<FetchRequest> {
        let endpoint_changed = config.endpoint() != self.config.endpoint();
        self.config = config;

        if endpoint_changed {
            tracing::debug!(endpoint = ?self.config.endpoint(), "Agent endpoint changed");
            self.fetch = FetchState {
                generation: self.fetch.generation + 1,
                ..FetchState::default()
            };
        }

        self.recompute_visibility();
        self.pending_fetch()
    }

    /// Fetch that auto-hide still needs to decide visibility, if any
    ///
    /// Safe to call every frame: a request is handed out at most once per
    /// endpoint. Hosts call it after [`EntryController::tick`] so a widget
    /// whose dismissal just expired can load its list.
    pub fn pending_fetch(&mut self) -> Option<FetchRequest> {
        if self.is_active() && self.config.auto_hide {
            self.start_fetch()
        } else {
            None
        }
    }

    /// Replace only the static agent list
    pub fn set_agents(&mut self, agents: Vec<Agent>) {
        self.config.agents = agents;
        self.recompute_visibility();
    }

    /// Pointer entered the trigger or the panel
    ///
    /// Cancels a pending close and opens the panel. Returns a fetch the first
    /// time the panel opens with an endpoint configured.
    pub fn pointer_enter(&mut self, _now: Instant) -> Option<FetchRequest> {
        if !self.accepts_hover() {
            return None;
        }

        self.close_deadline = None;
        if !self.visibility.is_open {
            tracing::debug!("Panel opened");
        }
        self.visibility.is_open = true;

        self.start_fetch()
    }

    /// Pointer left the trigger or the panel
    ///
    /// Schedules the panel to close after the hover delay, replacing any
    /// earlier schedule.
    pub fn pointer_leave(&mut self, now: Instant) {
        if !self.accepts_hover() {
            return;
        }

        self.close_deadline = Some(now + self.config.hover_delay());
    }

    /// Advance timers to `now`
    ///
    /// Closes the panel once the close deadline has passed, and lifts a
    /// dismissal once its day is over. Returns true if anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.is_active() {
            return false;
        }

        let mut changed = false;

        if let Some(deadline) = self.close_deadline {
            if now >= deadline {
                self.close_deadline = None;
                if self.visibility.is_open {
                    tracing::debug!("Panel closed after hover delay");
                    self.visibility.is_open = false;
                    changed = true;
                }
            }
        }

        if let Some(day) = self.dismissed_on {
            if day != self.clock.today() {
                tracing::debug!(dismissed_on = %day, "Dismissal expired");
                self.dismissed_on = None;
                let key = self.config.storage_key.clone();
                if let Err(e) = self.store.remove(&key) {
                    tracing::warn!(key = %key, error = %e, "Failed to clear dismissal date");
                }
                let was_hidden = self.visibility.hidden;
                self.recompute_visibility();
                changed |= was_hidden != self.visibility.hidden;
            }
        }

        changed
    }

    /// Time at which [`EntryController::tick`] next has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        self.close_deadline
    }

    /// Pointer pressed on the trigger
    ///
    /// Closes the panel and suspends hover handling until the drag ends.
    pub fn drag_start(&mut self, pointer_y: f32, viewport_height: f32, widget_height: f32) {
        if !self.is_active() || self.visibility.hidden {
            return;
        }

        let center = self.drag.resolved_center_y(viewport_height, widget_height);
        self.drag.begin(pointer_y, center);
        self.visibility.is_dragging = true;
        self.visibility.is_open = false;
        self.close_deadline = None;
    }

    /// Pointer moved during a drag; returns the new widget center
    pub fn drag_move(
        &mut self,
        pointer_y: f32,
        viewport_height: f32,
        widget_height: f32,
    ) -> Option<f32> {
        if !self.visibility.is_dragging {
            return None;
        }

        Some(self.drag.follow(pointer_y, viewport_height, widget_height))
    }

    /// Pointer released; hover handling resumes
    pub fn drag_end(&mut self) {
        if self.visibility.is_dragging {
            tracing::debug!(center_y = ?self.drag.center_y(), "Drag finished");
        }
        self.visibility.is_dragging = false;
    }

    /// Vertical center to draw the widget at
    pub fn widget_center_y(&self, viewport_height: f32, widget_height: f32) -> f32 {
        self.drag.resolved_center_y(viewport_height, widget_height)
    }

    /// Handle a signal from the panel
    pub fn handle_panel_signal(&mut self, signal: PanelSignal) {
        if !self.is_active() || self.visibility.hidden {
            return;
        }

        match signal {
            PanelSignal::Selected(agent) => {
                tracing::debug!(title = %agent.title, "Agent selected");
                self.visibility.is_open = false;
                self.close_deadline = None;
                self.subscribers.emit(&WidgetEvent::AgentSelected(agent));
            }
            PanelSignal::CloseRequested => {
                self.visibility.show_confirm_dialog = true;
                self.visibility.is_open = false;
                self.close_deadline = None;
            }
        }
    }

    /// User confirmed hiding the widget for today
    ///
    /// Persists today's date, hides the widget and emits
    /// [`WidgetEvent::ComponentClosed`]. Does nothing unless the confirmation
    /// is showing.
    pub fn confirm_dismissal(&mut self) {
        if !self.is_active() || !self.visibility.show_confirm_dialog {
            return;
        }

        let today = self.clock.today();
        let key = self.config.storage_key.clone();
        let value = today.format(DATE_FORMAT).to_string();
        if let Err(e) = self.store.set(&key, &value) {
            tracing::warn!(key = %key, error = %e, "Failed to persist dismissal date");
        }

        tracing::info!(key = %key, date = %value, "Widget dismissed for today");
        self.dismissed_on = Some(today);
        self.visibility.show_confirm_dialog = false;
        self.visibility.is_open = false;
        self.visibility.hidden = true;
        self.subscribers.emit(&WidgetEvent::ComponentClosed);
    }

    /// User backed out of the confirmation; the panel stays closed
    pub fn cancel_dismissal(&mut self) {
        self.visibility.show_confirm_dialog = false;
    }

    /// Apply the outcome of a fetch
    ///
    /// Outcomes for a superseded endpoint are dropped. Failures are logged and
    /// keep whatever list was resolved before.
    pub fn complete_fetch(&mut self, outcome: FetchOutcome) {
        if outcome.request.generation != self.fetch.generation {
            tracing::debug!(url = %outcome.request.url, "Ignoring superseded fetch");
            return;
        }

        self.fetch.loading = false;
        match outcome.result {
            Ok(agents) => {
                tracing::info!(url = %outcome.request.url, count = agents.len(), "Agents loaded");
                self.fetch.fetched_agents = agents;
            }
            Err(e) => {
                tracing::warn!(url = %outcome.request.url, error = %e, "Failed to fetch agents");
            }
        }

        self.recompute_visibility();
    }

    /// Register a handler for outbound events
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&WidgetEvent) + Send + 'static,
    {
        self.subscribers.subscribe(handler)
    }

    /// Remove a handler
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Tear the widget down
    ///
    /// Ends any drag, cancels timers, drops all subscriptions and ignores late
    /// fetch outcomes. The controller accepts no input afterwards.
    pub fn unmount(&mut self) {
        self.lifecycle = Lifecycle::Unmounted;
        self.visibility.is_dragging = false;
        self.visibility.is_open = false;
        self.visibility.show_confirm_dialog = false;
        self.close_deadline = None;
        self.fetch.loading = false;
        self.fetch.generation += 1;
        self.subscribers.clear();
    }

    /// Agents the panel shows: the static list if non-empty, else the fetched one
    pub fn effective_agents(&self) -> &[Agent] {
        if self.config.agents.is_empty() {
            &self.fetch.fetched_agents
        } else {
            &self.config.agents
        }
    }

    /// Resolve the panel for the current state
    pub fn panel_view(&self) -> PanelView {
        render_panel(
            self.effective_agents(),
            &self.config.phone,
            self.fetch.loading,
        )
    }

    /// Current visibility flags
    pub fn visibility(&self) -> VisibilityState {
        self.visibility
    }

    /// Whether the widget is shown at all
    pub fn is_visible(&self) -> bool {
        self.is_active() && !self.visibility.hidden
    }

    /// Whether the panel is open
    pub fn is_open(&self) -> bool {
        self.visibility.is_open
    }

    /// Whether a fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.fetch.loading
    }

    /// Current configuration
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }

    fn accepts_hover(&self) -> bool {
        self.is_active()
            && !self.visibility.hidden
            && !self.visibility.is_dragging
            && !self.visibility.show_confirm_dialog
    }

    fn start_fetch(&mut self) -> Option<FetchRequest> {
        if self.fetch.loading || self.fetch.has_fetched_once || self.is_dismissed_today() {
            return None;
        }
        let url = self.config.endpoint()?.to_string();

        self.fetch.loading = true;
        self.fetch.has_fetched_once = true;
        Some(FetchRequest {
            url,
            generation: self.fetch.generation,
        })
    }

    fn is_dismissed_today(&self) -> bool {
        self.dismissed_on == Some(self.clock.today())
    }

    fn recompute_visibility(&mut self) {
        let hidden = if self.is_dismissed_today() {
            true
        } else if self.config.auto_hide {
            self.effective_agents().is_empty()
        } else {
            false
        };

        if hidden != self.visibility.hidden {
            tracing::debug!(hidden, "Widget visibility changed");
        }
        self.visibility.hidden = hidden;
        if hidden {
            self.visibility.is_open = false;
            self.close_deadline = None;
        }
    }
}

impl std::fmt::Debug for EntryController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryController")
            .field("lifecycle", &self.lifecycle)
            .field("visibility", &self.visibility)
            .field("fetch", &self.fetch)
            .field("drag", &self.drag)
            .field("close_deadline", &self.close_deadline)
            .field("dismissed_on", &self.dismissed_on)
            .field("subscribers", &self.subscribers)
            .finish()
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FixedClock, MemoryStore};
    use std::time::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    fn controller(config: WidgetConfig) -> EntryController {
        EntryController::new(config, MemoryStore::new(), FixedClock::new(today()))
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-05-17"), Some(today()));
        assert_eq!(parse_date(" 2024-05-17\n"), Some(today()));
        assert_eq!(parse_date("Fri May 17 2024"), None);
    }

    #[test]
    fn test_input_ignored_before_initialize() {
        let mut ctrl = controller(WidgetConfig::default());
        assert!(ctrl.pointer_enter(Instant::now()).is_none());
        assert!(!ctrl.is_open());
        assert!(!ctrl.is_visible());
    }

    #[test]
    fn test_initialize_runs_once() {
        let config = WidgetConfig {
            api_url: Some("http://agents".to_string()),
            auto_hide: true,
            ..Default::default()
        };
        let mut ctrl = controller(config);
        assert!(ctrl.initialize().is_some());
        assert!(ctrl.initialize().is_none());
    }

    #[test]
    fn test_drag_start_closes_panel_and_cancels_timer() {
        let mut ctrl = controller(WidgetConfig::default());
        ctrl.initialize();
        let now = Instant::now();

        ctrl.pointer_enter(now);
        ctrl.pointer_leave(now);
        ctrl.drag_start(300.0, 600.0, 100.0);

        assert!(!ctrl.is_open());
        assert!(ctrl.next_deadline().is_none());
        assert!(ctrl.visibility().is_dragging);

        // hover is suspended while dragging
        ctrl.pointer_enter(now + Duration::from_millis(10));
        assert!(!ctrl.is_open());

        ctrl.drag_end();
        ctrl.pointer_enter(now + Duration::from_millis(20));
        assert!(ctrl.is_open());
    }

    #[test]
    fn test_hover_ignored_while_confirm_showing() {
        let mut ctrl = controller(WidgetConfig::default());
        ctrl.initialize();
        let now = Instant::now();

        ctrl.pointer_enter(now);
        ctrl.handle_panel_signal(PanelSignal::CloseRequested);
        ctrl.pointer_enter(now);
        assert!(!ctrl.is_open());

        ctrl.cancel_dismissal();
        ctrl.pointer_enter(now);
        assert!(ctrl.is_open());
    }
}
