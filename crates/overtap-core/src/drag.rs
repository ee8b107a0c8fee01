//! Drag geometry: touch anchors, move deltas, screen bounds.

use serde::{Deserialize, Serialize};

/// Screen and marker dimensions, in pixels.
///
/// Screen dimensions are recorded from the initial screen size event; the
/// marker size is fixed at construction. All drag bounds derive from these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSizes {
    pub screen_width: i32,
    pub screen_height: i32,
    pub marker_size: i32,
}

impl ViewSizes {
    /// Horizontal drag bound. Positions are clamped into `[-bound, +bound]`
    /// so a marker centered at the bound still sits fully on screen.
    pub fn bound_x(&self) -> i32 {
        (self.screen_width / 2 - self.marker_size / 2).max(0)
    }

    /// Vertical drag bound.
    pub fn bound_y(&self) -> i32 {
        (self.screen_height / 2 - self.marker_size / 2).max(0)
    }
}

/// Raw payload of a drag start: element position plus raw pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragDown {
    pub x: i32,
    pub y: i32,
    pub raw_x: f32,
    pub raw_y: f32,
}

/// Raw payload of a drag move: current raw pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragMove {
    pub raw_x: f32,
    pub raw_y: f32,
}

/// Drag state of one draggable overlay element.
///
/// `(initial_x, initial_y)` is the element position when the drag began,
/// `(initial_touch_x, initial_touch_y)` the raw pointer position at that
/// moment, and `(x, y)` the current resolved position relative to the
/// screen center.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DragState {
    pub initial_x: i32,
    pub initial_y: i32,
    pub initial_touch_x: f32,
    pub initial_touch_y: f32,
    pub x: i32,
    pub y: i32,
}

/// Clamp `value` into `[min, max]`.
pub fn clamp_axis(value: i32, min: i32, max: i32) -> i32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Capability of overlay elements that can be dragged.
///
/// Both transitions are pure: they return the new [`DragState`] and leave
/// the element itself untouched.
pub trait Draggable {
    fn drag_state(&self) -> &DragState;

    /// Anchor a drag: remember where the element and the pointer are.
    fn on_drag_down(&self, down: &DragDown) -> DragState {
        DragState {
            initial_x: down.x,
            initial_y: down.y,
            initial_touch_x: down.raw_x,
            initial_touch_y: down.raw_y,
            ..*self.drag_state()
        }
    }

    /// Resolve a move delta against the anchor and clamp to screen bounds.
    fn on_drag_move(&self, mv: &DragMove, sizes: &ViewSizes) -> DragState {
        let state = self.drag_state();
        let new_x = state.initial_x + (mv.raw_x - state.initial_touch_x) as i32;
        let new_y = state.initial_y + (mv.raw_y - state.initial_touch_y) as i32;

        let bound_x = sizes.bound_x();
        let bound_y = sizes.bound_y();

        DragState {
            x: clamp_axis(new_x, -bound_x, bound_x),
            y: clamp_axis(new_y, -bound_y, bound_y),
            ..*state
        }
    }
}
