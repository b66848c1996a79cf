//! Pointer tracking for dockable drags.

use dockyard_core::math::Vec2;

use crate::model::NodeId;
use crate::settings::DockSettings;

/// State of a dockable drag.
#[derive(Debug, Clone)]
pub struct DragState {
    /// The dockable being dragged.
    pub source: NodeId,
    /// Its owner when the drag began.
    pub source_owner: NodeId,
    /// Position where the drag started.
    pub start_pos: Vec2,
    /// Current drag position.
    pub current_pos: Vec2,
    /// Whether the minimum drag distance has been exceeded.
    pub is_active: bool,
}

impl DragState {
    pub fn new(source: NodeId, source_owner: NodeId, start_pos: Vec2) -> Self {
        Self {
            source,
            source_owner,
            start_pos,
            current_pos: start_pos,
            is_active: false,
        }
    }

    /// Move the pointer. Once active, a drag stays active.
    pub fn update(&mut self, pos: Vec2, settings: &DockSettings) {
        self.current_pos = pos;
        if !self.is_active && settings.exceeds_drag_distance(self.delta()) {
            self.is_active = true;
        }
    }

    pub fn delta(&self) -> Vec2 {
        self.current_pos - self.start_pos
    }
}

/// Manages the single drag in flight.
#[derive(Debug, Default)]
pub struct DragManager {
    drag_state: Option<DragState>,
}

impl DragManager {
    pub fn new() -> Self {
        Self { drag_state: None }
    }

    /// Start a pending drag; it activates once the pointer moves far enough.
    pub fn start(&mut self, source: NodeId, source_owner: NodeId, start_pos: Vec2) {
        self.drag_state = Some(DragState::new(source, source_owner, start_pos));
    }

    /// Update the current drag position.
    ///
    /// Returns true if the drag is active after the update.
    pub fn update(&mut self, pos: Vec2, settings: &DockSettings) -> bool {
        if let Some(ref mut state) = self.drag_state {
            state.update(pos, settings);
            state.is_active
        } else {
            false
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_state.as_ref().is_some_and(|s| s.is_active)
    }

    /// Check if there's a pending drag (pointer down but distance not exceeded).
    pub fn has_pending_drag(&self) -> bool {
        self.drag_state.as_ref().is_some_and(|s| !s.is_active)
    }

    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag_state.as_ref()
    }

    pub fn cancel_drag(&mut self) {
        self.drag_state = None;
    }

    /// End the drag and return its final state.
    pub fn end_drag(&mut self) -> Option<DragState> {
        self.drag_state.take()
    }

    /// Get the drag delta if there's an active drag.
    pub fn drag_delta(&self) -> Option<Vec2> {
        self.drag_state
            .as_ref()
            .filter(|s| s.is_active)
            .map(|s| s.delta())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_activates_past_distance() {
        let settings = DockSettings::default();
        let mut manager = DragManager::new();
        manager.start(NodeId(1), NodeId(0), Vec2::new(100.0, 100.0));

        assert!(manager.has_pending_drag());
        assert!(!manager.is_dragging());

        assert!(!manager.update(Vec2::new(102.0, 101.0), &settings));
        assert!(manager.drag_delta().is_none());

        assert!(manager.update(Vec2::new(110.0, 100.0), &settings));
        let delta = manager.drag_delta().unwrap();
        assert!((delta.x - 10.0).abs() < 0.001);
        assert!(delta.y.abs() < 0.001);

        // Coming back does not deactivate.
        assert!(manager.update(Vec2::new(100.0, 100.0), &settings));

        let final_state = manager.end_drag().unwrap();
        assert!(final_state.is_active);
        assert!(!manager.is_dragging());
    }

    #[test]
    fn test_per_axis_distance() {
        let settings = DockSettings::default().minimum_drag_distance(20.0, 2.0);
        let mut manager = DragManager::new();
        manager.start(NodeId(1), NodeId(0), Vec2::ZERO);
        assert!(!manager.update(Vec2::new(10.0, 0.0), &settings));
        assert!(manager.update(Vec2::new(10.0, 3.0), &settings));
    }

    #[test]
    fn test_cancel_drag() {
        let mut manager = DragManager::new();
        manager.start(NodeId(1), NodeId(0), Vec2::ZERO);
        manager.cancel_drag();

        assert!(!manager.has_pending_drag());
        assert!(!manager.is_dragging());
        assert!(manager.drag_state().is_none());
    }
}
