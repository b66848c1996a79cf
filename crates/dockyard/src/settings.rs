//! Engine configuration.
//!
//! Drag thresholds, global docking policy and window placement defaults are
//! gathered in [`DockSettings`], built once and handed to
//! [`Factory::with_settings`](crate::Factory::with_settings) and
//! [`DockingEngine::new`](crate::docking::DockingEngine::new).

use dockyard_core::math::Vec2;
use serde::{Deserialize, Serialize};

/// Minimum pointer travel (pixels) before a pending drag starts.
pub const DEFAULT_DRAG_DISTANCE: f32 = 4.0;

/// Fraction of a dock's extent treated as a local edge zone.
pub const DEFAULT_EDGE_THRESHOLD: f32 = 0.25;

/// Fraction of a global target's extent treated as a global edge band.
pub const DEFAULT_GLOBAL_EDGE_THRESHOLD: f32 = 0.1;

/// Tie-break preference between local and global drop targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GlobalDockingPreset {
    /// Local adorners win unless they offer nothing better than a tear-off.
    #[default]
    LocalFirst,
    /// A global operation wins whenever one is available.
    GlobalFirst,
}

/// Configuration shared by the factory and the docking engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockSettings {
    /// Horizontal travel needed before a pending drag starts.
    pub minimum_horizontal_drag_distance: f32,
    /// Vertical travel needed before a pending drag starts.
    pub minimum_vertical_drag_distance: f32,
    /// Resolve global (cross-dock) drop targets at all.
    pub enable_global_docking: bool,
    pub global_docking_preset: GlobalDockingPreset,
    /// Local edge zone size as a fraction of the hovered dock (0.0 - 0.5).
    pub edge_threshold: f32,
    /// Global edge band size as a fraction of the global target (0.0 - 0.5).
    pub global_edge_threshold: f32,
    /// Share given to the new content of an edge split.
    pub default_split_proportion: f64,
    /// Size of a floated window when the caller gives no placement.
    pub default_window_size: Vec2,
    /// Offset of a floated window from its host root's window or the origin.
    pub default_window_offset: Vec2,
    pub enable_window_magnetism: bool,
    /// Snap distance (pixels) between sibling window edges.
    pub window_magnetism_distance: f32,
    /// Let Fill put documents into tool docks and tools into document docks.
    pub allow_cross_kind_fill: bool,
    /// Number of dispatched events kept for inspection. Zero disables history.
    pub event_history_limit: usize,
}

impl Default for DockSettings {
    fn default() -> Self {
        Self {
            minimum_horizontal_drag_distance: DEFAULT_DRAG_DISTANCE,
            minimum_vertical_drag_distance: DEFAULT_DRAG_DISTANCE,
            enable_global_docking: true,
            global_docking_preset: GlobalDockingPreset::LocalFirst,
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            global_edge_threshold: DEFAULT_GLOBAL_EDGE_THRESHOLD,
            default_split_proportion: 0.5,
            default_window_size: Vec2::new(300.0, 400.0),
            default_window_offset: Vec2::new(32.0, 32.0),
            enable_window_magnetism: false,
            window_magnetism_distance: 16.0,
            allow_cross_kind_fill: false,
            event_history_limit: 0,
        }
    }
}

impl DockSettings {
    /// Set both drag distances.
    pub fn minimum_drag_distance(mut self, horizontal: f32, vertical: f32) -> Self {
        self.minimum_horizontal_drag_distance = horizontal;
        self.minimum_vertical_drag_distance = vertical;
        self
    }

    pub fn enable_global_docking(mut self, enabled: bool) -> Self {
        self.enable_global_docking = enabled;
        self
    }

    pub fn global_docking_preset(mut self, preset: GlobalDockingPreset) -> Self {
        self.global_docking_preset = preset;
        self
    }

    /// Set the local edge zone size, clamped to 0.0 - 0.5.
    pub fn edge_threshold(mut self, threshold: f32) -> Self {
        self.edge_threshold = threshold.clamp(0.0, 0.5);
        self
    }

    /// Set the global edge band size, clamped to 0.0 - 0.5.
    pub fn global_edge_threshold(mut self, threshold: f32) -> Self {
        self.global_edge_threshold = threshold.clamp(0.0, 0.5);
        self
    }

    /// Set the new-content share of an edge split, clamped to 0.0 - 1.0.
    pub fn default_split_proportion(mut self, proportion: f64) -> Self {
        self.default_split_proportion = proportion.clamp(0.0, 1.0);
        self
    }

    pub fn default_window_size(mut self, size: Vec2) -> Self {
        self.default_window_size = size;
        self
    }

    pub fn default_window_offset(mut self, offset: Vec2) -> Self {
        self.default_window_offset = offset;
        self
    }

    /// Enable snapping to sibling window edges within `distance` pixels.
    pub fn window_magnetism(mut self, enabled: bool, distance: f32) -> Self {
        self.enable_window_magnetism = enabled;
        self.window_magnetism_distance = distance.max(0.0);
        self
    }

    pub fn allow_cross_kind_fill(mut self, allow: bool) -> Self {
        self.allow_cross_kind_fill = allow;
        self
    }

    pub fn event_history_limit(mut self, limit: usize) -> Self {
        self.event_history_limit = limit;
        self
    }

    /// Check if a pointer delta exceeds the drag start distance on either axis.
    pub fn exceeds_drag_distance(&self, delta: Vec2) -> bool {
        delta.x.abs() > self.minimum_horizontal_drag_distance
            || delta.y.abs() > self.minimum_vertical_drag_distance
    }
}
