//! Drop-target resolution.
//!
//! A drag moves through `Idle -> Pending -> Started -> Over* -> Dropped`
//! (or `Cancelled`). On every pointer move the [`DockingEngine`] asks the
//! host's [`VisualHitTester`] what lies under the pointer, derives a local
//! operation from the hit control's adorner and a global one from the
//! innermost global docking target above it, picks one by policy and
//! dry-runs the matching strategy.

mod drag;
mod drop_zone;
mod engine;

pub use drag::{DragManager, DragState};
pub use drop_zone::DropZoneDetector;
pub use engine::{DockHit, DockingEngine, DragPhase, DropScope, PendingDrop, VisualHitTester};
