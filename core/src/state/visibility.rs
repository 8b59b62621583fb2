// Transient widget state
// Visibility flags, fetch bookkeeping and the session-only drag position

use crate::state::Agent;

/// Visibility flags owned by the controller; reset on every launch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibilityState {
    /// Panel is shown
    pub is_open: bool,
    /// A drag of the trigger is in progress
    pub is_dragging: bool,
    /// The "hide for today?" confirmation is shown
    pub show_confirm_dialog: bool,
    /// The whole widget is hidden
    pub hidden: bool,
}

/// Remote list bookkeeping
#[derive(Debug, Clone, Default)]
pub struct FetchState {
    /// A request is in flight
    pub loading: bool,
    /// Last successfully resolved remote list
    pub fetched_agents: Vec<Agent>,
    /// A request was issued for the current endpoint
    pub has_fetched_once: bool,
    /// Bumped whenever the endpoint changes; completions for older
    /// generations are dropped
    pub generation: u64,
}

/// Vertical position of the widget
///
/// Only the vertical center is tracked. `None` means the resting position
/// (centered in the viewport). Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    /// Distance between the pointer and the widget center at drag start
    grab_offset: f32,
    /// Current center, if the user has moved the widget
    center_y: Option<f32>,
}

impl DragState {
    /// Current center, if moved
    pub fn center_y(&self) -> Option<f32> {
        self.center_y
    }

    /// Center to draw at for a given viewport
    pub fn resolved_center_y(&self, viewport_height: f32, widget_height: f32) -> f32 {
        let center = self.center_y.unwrap_or(viewport_height / 2.0);
        clamp_center(center, viewport_height, widget_height)
    }

    /// Remember where inside the widget the pointer grabbed it
    pub fn begin(&mut self, pointer_y: f32, current_center_y: f32) {
        self.grab_offset = pointer_y - current_center_y;
    }

    /// Follow the pointer, keeping the widget fully inside the viewport
    pub fn follow(&mut self, pointer_y: f32, viewport_height: f32, widget_height: f32) -> f32 {
        let center = clamp_center(pointer_y - self.grab_offset, viewport_height, widget_height);
        self.center_y = Some(center);
        center
    }
}

/// Clamp a center coordinate to `[h/2, viewport - h/2]`
///
/// When the viewport is shorter than the widget the center pins to `h/2`.
pub fn clamp_center(center_y: f32, viewport_height: f32, widget_height: f32) -> f32 {
    let half = (widget_height / 2.0).max(0.0);
    let max = (viewport_height - half).max(half);
    center_y.clamp(half, max)
}
