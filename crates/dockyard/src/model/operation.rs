//! Shared enums for dock operations and container geometry.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Arrangement axis of a proportional dock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Children laid out left to right (vertical splitter lines).
    #[default]
    Horizontal,
    /// Children laid out top to bottom (horizontal splitter lines).
    Vertical,
}

impl Orientation {
    /// Get the perpendicular orientation.
    pub fn perpendicular(&self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Orientation::Horizontal)
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, Orientation::Vertical)
    }
}

/// Edge affinity of a tab host. Decides which root edge list receives pinned tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Alignment {
    #[default]
    Unset,
    Left,
    Right,
    Top,
    Bottom,
}

impl Alignment {
    /// The edge a pinned tool lands on. `Unset` pins to the left edge.
    pub fn pin_edge(&self) -> Alignment {
        match self {
            Alignment::Unset => Alignment::Left,
            other => *other,
        }
    }
}

/// The discrete outcome of a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DockOperation {
    /// Rejected drop.
    #[default]
    None,
    /// Tab-join into the target.
    Fill,
    Left,
    Right,
    Top,
    Bottom,
    /// Tear off into a floating window.
    Window,
}

impl DockOperation {
    pub const ALL: [DockOperation; 7] = [
        DockOperation::None,
        DockOperation::Fill,
        DockOperation::Left,
        DockOperation::Right,
        DockOperation::Top,
        DockOperation::Bottom,
        DockOperation::Window,
    ];

    /// Mask bit for this operation. `None` maps to the empty mask.
    pub fn mask(&self) -> DockOperationMask {
        match self {
            DockOperation::None => DockOperationMask::empty(),
            DockOperation::Fill => DockOperationMask::FILL,
            DockOperation::Left => DockOperationMask::LEFT,
            DockOperation::Right => DockOperationMask::RIGHT,
            DockOperation::Top => DockOperationMask::TOP,
            DockOperation::Bottom => DockOperationMask::BOTTOM,
            DockOperation::Window => DockOperationMask::WINDOW,
        }
    }

    /// Orientation of the proportional dock an edge split creates.
    pub fn split_orientation(&self) -> Option<Orientation> {
        match self {
            DockOperation::Left | DockOperation::Right => Some(Orientation::Horizontal),
            DockOperation::Top | DockOperation::Bottom => Some(Orientation::Vertical),
            _ => None,
        }
    }

    /// Check if the new content goes before the existing content.
    pub fn is_before(&self) -> bool {
        matches!(self, DockOperation::Left | DockOperation::Top)
    }

    pub fn is_split(&self) -> bool {
        self.split_orientation().is_some()
    }

    /// Alignment given to a tool dock created by this split.
    pub fn alignment(&self) -> Alignment {
        match self {
            DockOperation::Left => Alignment::Left,
            DockOperation::Right => Alignment::Right,
            DockOperation::Top => Alignment::Top,
            DockOperation::Bottom => Alignment::Bottom,
            _ => Alignment::Unset,
        }
    }
}

bitflags! {
    /// Drop operations a container accepts for itself and its leaves.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct DockOperationMask: u8 {
        const FILL = 1 << 0;
        const LEFT = 1 << 1;
        const RIGHT = 1 << 2;
        const TOP = 1 << 3;
        const BOTTOM = 1 << 4;
        const WINDOW = 1 << 5;
        const SPLIT = Self::LEFT.bits() | Self::RIGHT.bits() | Self::TOP.bits() | Self::BOTTOM.bits();
        const ALL = Self::FILL.bits() | Self::SPLIT.bits() | Self::WINDOW.bits();
    }
}

impl Default for DockOperationMask {
    fn default() -> Self {
        DockOperationMask::ALL
    }
}

impl DockOperationMask {
    /// `DockOperation::None` is never allowed.
    pub fn allows(&self, operation: DockOperation) -> bool {
        operation != DockOperation::None && self.contains(operation.mask())
    }
}

bitflags! {
    /// Per-dockable capabilities.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct DockableFlags: u8 {
        const CAN_CLOSE = 1 << 0;
        const CAN_PIN = 1 << 1;
        const CAN_FLOAT = 1 << 2;
        const CAN_DRAG = 1 << 3;
        const CAN_DROP = 1 << 4;
    }
}

impl Default for DockableFlags {
    fn default() -> Self {
        DockableFlags::all()
    }
}
