//! Pointer input accumulated between frames for orbit controls

use crate::core::types::Vec2;

/// Drag and scroll deltas gathered from host pointer events.
///
/// The host pushes events as they arrive; the camera controller drains the
/// accumulated deltas once per frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrbitInput {
    /// Pointer movement while dragging, in pixels
    drag: Vec2,
    /// Accumulated wheel delta (positive zooms out)
    scroll: f32,
    /// Whether the primary button is held
    dragging: bool,
}

impl OrbitInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Primary button pressed or released
    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Pointer moved by `(dx, dy)` pixels; only counted while dragging
    pub fn pointer_moved(&mut self, dx: f32, dy: f32) {
        if self.dragging {
            self.drag += Vec2::new(dx, dy);
        }
    }

    /// Wheel scrolled
    pub fn scrolled(&mut self, delta: f32) {
        self.scroll += delta;
    }

    /// Take the accumulated deltas, resetting them for the next frame
    pub fn take(&mut self) -> (Vec2, f32) {
        let out = (self.drag, self.scroll);
        self.drag = Vec2::ZERO;
        self.scroll = 0.0;
        out
    }
}
