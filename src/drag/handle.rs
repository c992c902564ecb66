//! A single draggable cable clamp

use crate::core::config::HandleConfig;
use crate::core::types::HandleId;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Clamp at the end of a cable
///
/// Only `position` moves; the anchor and terminal are fixed scene points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Handle {
    pub id: HandleId,
    /// Off-scene origin the cable is drawn from
    pub anchor: Vec2,
    /// Resting position while attached
    pub terminal: Vec2,
    pub position: Vec2,
    /// Set once this clamp's task is done; a disconnected clamp cannot be grabbed
    pub disconnected: bool,
    /// Whether the clamp was past the threshold at the last sample
    #[serde(skip)]
    pub(crate) was_off: bool,
}

impl Handle {
    pub fn new(id: HandleId, config: &HandleConfig) -> Self {
        Self {
            id,
            anchor: config.anchor,
            terminal: config.terminal,
            position: config.terminal,
            disconnected: false,
            was_off: false,
        }
    }

    /// Distance of the clamp from its terminal
    pub fn offset(&self) -> f32 {
        self.position.distance(self.terminal)
    }

    /// Clamp is at least `threshold` away from its terminal
    pub fn is_off_terminal(&self, threshold: f32) -> bool {
        self.offset() >= threshold
    }

    /// Put the clamp back on its terminal
    pub(crate) fn snap_back(&mut self) {
        self.position = self.terminal;
        self.was_off = false;
    }

    /// Move a clamp that must read as disconnected off its terminal
    ///
    /// Keeps the current position when it is already far enough; otherwise
    /// places the clamp on the terminal-to-anchor line exactly `threshold`
    /// away, inside the viewport.
    pub(crate) fn park(&mut self, threshold: f32, viewport: Vec2) {
        if !self.is_off_terminal(threshold) {
            let toward_anchor = (self.anchor - self.terminal).normalize_or_zero();
            let direction = if toward_anchor == Vec2::ZERO { Vec2::Y } else { toward_anchor };
            self.position = (self.terminal + direction * threshold).clamp(Vec2::ZERO, viewport);
        }
        self.was_off = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn negative() -> Handle {
        Handle::new(
            HandleId::Negative,
            &HandleConfig {
                terminal: Vec2::new(280.0, 150.0),
                anchor: Vec2::new(0.0, 700.0),
            },
        )
    }

    #[test]
    fn test_new_handle_rests_on_terminal() {
        let handle = negative();
        assert_eq!(handle.position, handle.terminal);
        assert_eq!(handle.offset(), 0.0);
        assert!(!handle.is_off_terminal(90.0));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let mut handle = negative();
        handle.position = Vec2::new(280.0 + 54.0, 150.0 + 72.0);
        assert!(handle.is_off_terminal(90.0));
        handle.position = Vec2::new(369.9, 150.0);
        assert!(!handle.is_off_terminal(90.0));
    }

    #[test]
    fn test_park_moves_toward_anchor() {
        let mut handle = negative();
        handle.park(90.0, Vec2::new(800.0, 569.0));
        assert!((handle.offset() - 90.0).abs() < 1e-3);
        assert!(handle.position.x < handle.terminal.x);
        assert!(handle.position.y > handle.terminal.y);
        assert!(handle.was_off);
    }

    #[test]
    fn test_park_keeps_far_position() {
        let mut handle = negative();
        handle.position = Vec2::new(500.0, 400.0);
        handle.park(90.0, Vec2::new(800.0, 569.0));
        assert_eq!(handle.position, Vec2::new(500.0, 400.0));
    }
}
