//! Adorner zone detection for drop targets.

use dockyard_core::geometry::Rect;
use dockyard_core::math::Vec2;

use crate::model::{DockOperation, DockOperationMask};
use crate::settings::DEFAULT_EDGE_THRESHOLD;

/// Divides an adorner rectangle into drop zones.
///
/// With the default threshold of 0.25:
/// - Left: x < 25%
/// - Right: x > 75%
/// - Top: y < 25%
/// - Bottom: y > 75%
/// - Fill: everything else
///
/// An edge-only detector reports `None` for the middle band; global
/// adorners use it since they never tab-join.
#[derive(Debug, Clone, Copy)]
pub struct DropZoneDetector {
    /// Edge threshold as a fraction (0.0-0.5).
    pub edge_threshold: f32,
    /// Report the middle band as `Fill`.
    pub fill: bool,
}

impl Default for DropZoneDetector {
    fn default() -> Self {
        Self {
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            fill: true,
        }
    }
}

impl DropZoneDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Detector for global adorners: edges only.
    pub fn edges_only(threshold: f32) -> Self {
        Self {
            edge_threshold: threshold.clamp(0.0, 0.5),
            fill: false,
        }
    }

    pub fn with_edge_threshold(mut self, threshold: f32) -> Self {
        self.edge_threshold = threshold.clamp(0.0, 0.5);
        self
    }

    /// Detect which zone of `bounds` the cursor is in.
    ///
    /// Returns None if the cursor lies outside the bounds or the bounds have no area.
    pub fn detect_zone(&self, cursor: Vec2, bounds: Rect) -> Option<DockOperation> {
        if bounds.is_empty() || !bounds.contains(cursor) {
            return None;
        }
        let rel = bounds.relative(cursor)?;

        // Edges take priority over the middle.
        if rel.x < self.edge_threshold {
            Some(DockOperation::Left)
        } else if rel.x > 1.0 - self.edge_threshold {
            Some(DockOperation::Right)
        } else if rel.y < self.edge_threshold {
            Some(DockOperation::Top)
        } else if rel.y > 1.0 - self.edge_threshold {
            Some(DockOperation::Bottom)
        } else if self.fill {
            Some(DockOperation::Fill)
        } else {
            Some(DockOperation::None)
        }
    }

    /// Zone detection intersected with an allowed-operations mask.
    pub fn detect_allowed(
        &self,
        cursor: Vec2,
        bounds: Rect,
        allowed: DockOperationMask,
    ) -> Option<DockOperation> {
        self.detect_zone(cursor, bounds)
            .map(|op| if allowed.allows(op) { op } else { DockOperation::None })
    }

    /// Rectangle showing where the dropped content will appear.
    pub fn preview_bounds(&self, operation: DockOperation, target: Rect) -> Rect {
        // Double the band for visibility.
        let band = (self.edge_threshold * 2.0).max(0.1);
        match operation {
            DockOperation::Left => {
                Rect::new(target.x, target.y, target.width * band, target.height)
            }
            DockOperation::Right => {
                let width = target.width * band;
                Rect::new(target.right() - width, target.y, width, target.height)
            }
            DockOperation::Top => {
                Rect::new(target.x, target.y, target.width, target.height * band)
            }
            DockOperation::Bottom => {
                let height = target.height * band;
                Rect::new(target.x, target.bottom() - height, target.width, height)
            }
            _ => target,
        }
    }
}
