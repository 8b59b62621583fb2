// UI module
// Host layout, the agent entry overlay and its building blocks

pub mod components;
pub mod entry;
pub mod layout;

pub use entry::AgentEntryWidget;
pub use layout::render_host_layout;
