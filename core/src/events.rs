// Outbound events
// Typed subscriptions replacing DOM event dispatch

use crate::state::Agent;

/// Events delivered to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// A panel row was clicked; carries a copy of the agent
    AgentSelected(Agent),
    /// The user confirmed hiding the widget for today
    ComponentClosed,
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&WidgetEvent) + Send>;

/// Registered event handlers
#[derive(Default)]
pub struct Subscribers {
    next_id: u64,
    handlers: Vec<(SubscriptionId, Handler)>,
}

impl Subscribers {
    /// Register a handler
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&WidgetEvent) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler; returns false if it was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(existing, _)| *existing != id);
        self.handlers.len() != before
    }

    /// Deliver an event to every handler in registration order
    pub fn emit(&mut self, event: &WidgetEvent) {
        for (_, handler) in self.handlers.iter_mut() {
            handler(event);
        }
    }

    /// Drop every handler
    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.handlers.len())
            .finish()
    }
}
