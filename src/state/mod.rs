// State management module
// Host-side record of what the embedded widget reported

pub mod host_state;

pub use host_state::HostState;
