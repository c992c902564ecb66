//! Cable disconnect scene
//!
//! A continuous-space stand-in for a click task: instead of clicking a
//! region, the learner drags the required clamp far enough away from its
//! terminal. Pointer input arrives as `begin` / `move_to` / `release`,
//! one pointer at a time.

use crate::core::config::DragConfig;
use crate::core::types::HandleId;
use crate::drag::handle::Handle;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// What a pointer event means for the owning task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "signal", content = "handle")]
pub enum DragSignal {
    /// A clamp other than the required one was grabbed
    WrongHandle(HandleId),
    /// The required clamp crossed the disconnect threshold
    Disconnected(HandleId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CableScene {
    handles: [Handle; 2],
    viewport: Vec2,
    threshold: f32,
    required: HandleId,
    disabled: bool,
    dragging: Option<HandleId>,
}

impl CableScene {
    /// Both clamps on their terminals, nothing disconnected
    pub fn new(config: &DragConfig, required: HandleId) -> Self {
        Self {
            handles: HandleId::ALL.map(|id| Handle::new(id, config.handle(id))),
            viewport: config.viewport,
            threshold: config.disconnect_distance,
            required,
            disabled: false,
            dragging: None,
        }
    }

    pub fn handle(&self, id: HandleId) -> &Handle {
        &self.handles[id.index()]
    }

    pub fn handles(&self) -> &[Handle] {
        &self.handles
    }

    pub fn required(&self) -> HandleId {
        self.required
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Disabled scenes ignore grabs and never report success
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Clamp currently held by the pointer
    pub fn dragging(&self) -> Option<HandleId> {
        self.dragging
    }

    /// Derived on demand from the clamp position
    pub fn is_off_terminal(&self, id: HandleId) -> bool {
        self.handle(id).is_off_terminal(self.threshold)
    }

    /// Pointer down on a clamp
    ///
    /// Grabbing the wrong clamp reports it immediately but the drag still
    /// proceeds. Disconnected clamps and disabled scenes ignore the grab.
    pub fn begin(&mut self, id: HandleId) -> Option<DragSignal> {
        if self.disabled || self.handle(id).disconnected {
            return None;
        }
        if self.dragging.is_some() {
            self.release();
        }

        self.dragging = Some(id);
        if id != self.required {
            return Some(DragSignal::WrongHandle(id));
        }
        None
    }

    /// Pointer moved to a scene point while holding a clamp
    ///
    /// The clamp stays inside the viewport. Success fires only on the sample
    /// where the required clamp first crosses the threshold; later samples
    /// that stay past it are silent.
    pub fn move_to(&mut self, point: Vec2) -> Option<DragSignal> {
        let id = self.dragging?;
        let threshold = self.threshold;
        let position = point.clamp(Vec2::ZERO, self.viewport);

        let handle = &mut self.handles[id.index()];
        handle.position = position;
        let was_off = handle.was_off;
        let is_off = handle.is_off_terminal(threshold);
        handle.was_off = is_off;

        if id == self.required && is_off && !was_off && !self.disabled {
            return Some(DragSignal::Disconnected(id));
        }
        None
    }

    /// Pointer up; returns the clamp that was held
    ///
    /// A clamp that was not the required one snaps back onto its terminal.
    pub fn release(&mut self) -> Option<HandleId> {
        let id = self.dragging.take()?;
        if id != self.required {
            self.handles[id.index()].snap_back();
        }
        Some(id)
    }

    /// Mark a clamp as done; it can no longer be grabbed
    pub fn mark_disconnected(&mut self, id: HandleId) {
        self.handles[id.index()].disconnected = true;
    }

    /// Set up the scene for a new task
    ///
    /// `disconnected` flags come from the task sequence. Clamps still
    /// attached go back to their terminals; disconnected ones are kept (or
    /// parked) off their terminals.
    pub fn prepare_task(&mut self, required: HandleId, disconnected: [bool; 2]) {
        self.dragging = None;
        self.required = required;
        let (threshold, viewport) = (self.threshold, self.viewport);
        for handle in &mut self.handles {
            handle.disconnected = disconnected[handle.id.index()];
            if handle.disconnected {
                handle.park(threshold, viewport);
            } else {
                handle.snap_back();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(required: HandleId) -> CableScene {
        CableScene::new(&DragConfig::default(), required)
    }

    #[test]
    fn test_success_fires_once_at_threshold() {
        let mut scene = scene(HandleId::Negative);
        assert_eq!(scene.begin(HandleId::Negative), None);

        assert_eq!(scene.move_to(Vec2::new(369.9, 150.0)), None);
        assert_eq!(
            scene.move_to(Vec2::new(370.0, 150.0)),
            Some(DragSignal::Disconnected(HandleId::Negative))
        );
        assert_eq!(scene.move_to(Vec2::new(380.0, 150.0)), None);
        assert_eq!(scene.move_to(Vec2::new(400.0, 200.0)), None);
        assert!(scene.is_off_terminal(HandleId::Negative));
    }

    #[test]
    fn test_crossing_again_after_returning_fires_again() {
        let mut scene = scene(HandleId::Negative);
        scene.begin(HandleId::Negative);
        assert!(scene.move_to(Vec2::new(400.0, 150.0)).is_some());
        assert_eq!(scene.move_to(Vec2::new(290.0, 150.0)), None);
        assert!(scene.move_to(Vec2::new(400.0, 150.0)).is_some());
    }

    #[test]
    fn test_wrong_handle_reported_and_snapped_back() {
        let mut scene = scene(HandleId::Negative);
        assert_eq!(
            scene.begin(HandleId::Positive),
            Some(DragSignal::WrongHandle(HandleId::Positive))
        );
        // The wrong clamp still follows the pointer but never succeeds
        assert_eq!(scene.move_to(Vec2::new(580.0, 300.0)), None);
        assert_eq!(scene.handle(HandleId::Positive).position, Vec2::new(580.0, 300.0));

        assert_eq!(scene.release(), Some(HandleId::Positive));
        let positive = scene.handle(HandleId::Positive);
        assert_eq!(positive.position, positive.terminal);
    }

    #[test]
    fn test_required_handle_stays_where_released() {
        let mut scene = scene(HandleId::Negative);
        scene.begin(HandleId::Negative);
        scene.move_to(Vec2::new(300.0, 160.0));
        scene.release();
        assert_eq!(scene.handle(HandleId::Negative).position, Vec2::new(300.0, 160.0));
    }

    #[test]
    fn test_position_clamped_to_viewport() {
        let mut scene = scene(HandleId::Negative);
        scene.begin(HandleId::Negative);
        scene.move_to(Vec2::new(-50.0, 900.0));
        assert_eq!(scene.handle(HandleId::Negative).position, Vec2::new(0.0, 569.0));
    }

    #[test]
    fn test_disabled_scene_ignores_grab_and_success() {
        let mut scene = scene(HandleId::Negative);
        scene.set_disabled(true);
        assert_eq!(scene.begin(HandleId::Positive), None);
        assert_eq!(scene.dragging(), None);

        scene.set_disabled(false);
        scene.begin(HandleId::Negative);
        scene.set_disabled(true);
        assert_eq!(scene.move_to(Vec2::new(400.0, 150.0)), None);
    }

    #[test]
    fn test_disconnected_handle_cannot_be_grabbed() {
        let mut scene = scene(HandleId::Positive);
        scene.mark_disconnected(HandleId::Negative);
        assert_eq!(scene.begin(HandleId::Negative), None);
        assert_eq!(scene.dragging(), None);
    }

    #[test]
    fn test_move_without_grab_ignored() {
        let mut scene = scene(HandleId::Negative);
        assert_eq!(scene.move_to(Vec2::new(400.0, 150.0)), None);
        assert_eq!(scene.release(), None);
        let negative = scene.handle(HandleId::Negative);
        assert_eq!(negative.position, negative.terminal);
    }

    #[test]
    fn test_new_grab_releases_previous() {
        let mut scene = scene(HandleId::Negative);
        scene.begin(HandleId::Positive);
        scene.move_to(Vec2::new(600.0, 300.0));
        scene.begin(HandleId::Negative);
        assert_eq!(scene.dragging(), Some(HandleId::Negative));
        let positive = scene.handle(HandleId::Positive);
        assert_eq!(positive.position, positive.terminal);
    }

    #[test]
    fn test_prepare_task_parks_disconnected_and_resets_others() {
        let mut scene = scene(HandleId::Negative);
        scene.begin(HandleId::Negative);
        scene.move_to(Vec2::new(100.0, 400.0));
        scene.release();

        scene.prepare_task(HandleId::Positive, [true, false]);
        assert_eq!(scene.required(), HandleId::Positive);
        assert!(scene.handle(HandleId::Negative).disconnected);
        assert_eq!(scene.handle(HandleId::Negative).position, Vec2::new(100.0, 400.0));

        // Going back to the first task re-attaches the negative clamp
        scene.prepare_task(HandleId::Negative, [false, false]);
        let negative = scene.handle(HandleId::Negative);
        assert!(!negative.disconnected);
        assert_eq!(negative.position, negative.terminal);
    }

    #[test]
    fn test_reattached_handle_can_disconnect_again() {
        let mut scene = scene(HandleId::Positive);
        scene.prepare_task(HandleId::Negative, [true, false]);
        scene.prepare_task(HandleId::Negative, [false, false]);
        scene.begin(HandleId::Negative);
        assert_eq!(scene.move_to(Vec2::new(280.0, 200.0)), None);
        assert!(scene.move_to(Vec2::new(280.0, 240.0)).is_some());
    }
}
