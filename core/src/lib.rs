//! Agent Entry Core Library
//!
//! Headless implementation of the floating agent entry widget: a trigger that
//! opens a panel of agent links on hover, can be dragged vertically, hides
//! itself when there is nothing to show, and can be dismissed for the rest of
//! the day. Hosts drive the [`controller::EntryController`] with pointer
//! events and draw the [`panel::PanelView`] it resolves.

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod fetch;
pub mod panel;
/// Agent model, persistence and clock abstractions
///
/// Everything the controller reads from or writes to its environment.
pub mod state;

pub use config::WidgetConfig;
pub use controller::EntryController;
pub use error::{ConfigError, FetchError, StorageError, WidgetError};
pub use events::{SubscriptionId, WidgetEvent};
pub use panel::{PanelSignal, PanelView};
pub use state::{Agent, Clock, KeyValueStore};
