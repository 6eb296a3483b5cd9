//! Drag-to-move and double-click tracking for the overlay body.
//!
//! Pointer positions are window-relative. While dragging, each motion event
//! yields `current - start`, the translation to apply to the window position
//! the platform last confirmed. Motion reported before a pending move lands
//! is still relative to that confirmed position, so repeated events never
//! stack their deltas.

use crate::geometry::Position;
use std::time::{Duration, Instant};

/// Two presses closer together than this count as a double-click
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug, Default, Clone)]
pub struct DragTracker {
    start: Option<Position>,
    delta: Position,
}

impl DragTracker {
    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    pub fn start_position(&self) -> Option<Position> {
        self.start
    }

    pub fn delta(&self) -> Position {
        self.delta
    }

    /// Left button down. Starts tracking unless the window is locked.
    pub fn press(&mut self, at: Position, locked: bool) -> bool {
        if locked {
            return false;
        }
        self.start = Some(at);
        self.delta = Position::ORIGIN;
        true
    }

    /// Pointer moved. Returns the translation to apply, if any.
    pub fn motion(&mut self, at: Position, locked: bool) -> Option<Position> {
        if locked {
            return None;
        }
        let start = self.start?;
        self.delta = at - start;
        (self.delta != Position::ORIGIN).then_some(self.delta)
    }

    /// Left button up
    pub fn release(&mut self) {
        self.start = None;
        self.delta = Position::ORIGIN;
    }
}

/// Detects double-clicks from a stream of press timestamps
#[derive(Debug, Default, Clone)]
pub struct ClickTracker {
    last_click: Option<Instant>,
}

impl ClickTracker {
    /// Record a press. Returns true if it completes a double-click.
    pub fn click(&mut self, now: Instant) -> bool {
        let is_double_click = self
            .last_click
            .is_some_and(|last| now.duration_since(last) < DOUBLE_CLICK_WINDOW);

        self.last_click = if is_double_click { None } else { Some(now) };
        is_double_click
    }
}
