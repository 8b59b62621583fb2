// Host application state
// Receives widget events and keeps what the host page shows about them

use agent_entry_core::{Agent, WidgetEvent};
use std::sync::mpsc::{self, Receiver, Sender};

/// State of the page embedding the widget
///
/// The widget's subscription pushes events into a channel; the host drains
/// it once per frame on the UI thread.
#[derive(Debug)]
pub struct HostState {
    /// Incoming widget events
    events: Receiver<WidgetEvent>,
    /// Human-readable event log, newest last
    log: Vec<String>,
    /// Maximum number of log lines to keep (0 = unlimited)
    max_lines: usize,
    /// Agent picked most recently
    pub last_selected: Option<Agent>,
    /// The user hid the widget for today
    pub widget_closed: bool,
}

impl HostState {
    /// Create the host state and the sender to hand to the widget
    pub fn channel(max_lines: usize) -> (Sender<WidgetEvent>, Self) {
        let (tx, rx) = mpsc::channel();
        let state = Self {
            events: rx,
            log: Vec::new(),
            max_lines,
            last_selected: None,
            widget_closed: false,
        };
        (tx, state)
    }

    /// Apply every pending event; returns them for side effects such as
    /// opening the selected agent's URL
    pub fn drain(&mut self) -> Vec<WidgetEvent> {
        let events: Vec<WidgetEvent> = self.events.try_iter().collect();
        for event in &events {
            match event {
                WidgetEvent::AgentSelected(agent) => {
                    self.push_line(format!("Selected {} ({})", agent.title, agent.url));
                    self.last_selected = Some(agent.clone());
                }
                WidgetEvent::ComponentClosed => {
                    self.push_line("Widget hidden for today".to_string());
                    self.widget_closed = true;
                }
            }
        }
        events
    }

    /// Event log lines, oldest first
    pub fn log(&self) -> &[String] {
        &self.log
    }

    fn push_line(&mut self, line: String) {
        self.log.push(line);
        if self.max_lines > 0 && self.log.len() > self.max_lines {
            self.log.remove(0);
        }
    }
}
