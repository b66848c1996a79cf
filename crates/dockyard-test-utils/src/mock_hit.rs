//! Scripted visual surface for drag resolution tests.

use dockyard::docking::{DockHit, VisualHitTester};
use dockyard::NodeId;
use dockyard_core::geometry::Rect;
use dockyard_core::math::Vec2;

#[derive(Debug, Clone, Copy)]
struct Area {
    dockable: NodeId,
    bounds: Rect,
    adorner: bool,
}

/// Rectangles registered back to front; the last one containing the
/// pointer is the topmost hit.
#[derive(Debug, Clone, Default)]
pub struct MockHitTester {
    areas: Vec<Area>,
}

impl MockHitTester {
    pub fn new() -> Self {
        Self::default()
    }

    /// A control bound to `dockable` that shows a local adorner over its bounds.
    pub fn with_adorner(mut self, dockable: NodeId, bounds: Rect) -> Self {
        self.areas.push(Area {
            dockable,
            bounds,
            adorner: true,
        });
        self
    }

    /// A control bound to `dockable` without a local adorner.
    pub fn with_area(mut self, dockable: NodeId, bounds: Rect) -> Self {
        self.areas.push(Area {
            dockable,
            bounds,
            adorner: false,
        });
        self
    }
}

impl VisualHitTester for MockHitTester {
    fn hit_test(&self, point: Vec2) -> Option<DockHit> {
        self.areas
            .iter()
            .rev()
            .find(|a| a.bounds.contains(point))
            .map(|a| DockHit {
                dockable: a.dockable,
                adorner: a.adorner.then_some(a.bounds),
            })
    }

    fn bounds(&self, dock: NodeId) -> Option<Rect> {
        self.areas
            .iter()
            .find(|a| a.dockable == dock)
            .map(|a| a.bounds)
    }
}
