// State module
// Agent model, dismissal persistence and the calendar clock

pub mod agent;
pub mod clock;
pub mod persistence;
pub mod visibility;

pub use agent::Agent;
pub use clock::{Clock, FixedClock, SystemClock};
pub use persistence::{FileStore, KeyValueStore, MemoryStore};
pub use visibility::{DragState, FetchState, VisibilityState};
