//! Dockyard - a docking layout engine
//!
//! This crate manages a mutable tree of dockable panes and turns drag gestures
//! into tree rewrites:
//! - Arena-backed tree model with checked structural invariants
//! - A [`Factory`] that is the single mutation surface, with an event bus and
//!   cancelable, optionally async, close vetoes
//! - One strategy per drop operation (fill, edge splits, float to window)
//! - A drop-target resolver with a local versus global tie-break
//! - Floating window plumbing behind the [`HostWindow`] trait
//! - JSON layout persistence
//!
//! Rendering is left to the host: it supplies hit testing through
//! [`docking::VisualHitTester`] and native windows through [`HostWindow`].
//!
//! ## Quick Start
//!
//! ```rust
//! use dockyard::{Alignment, DockOperation, Factory};
//!
//! let mut factory = Factory::new();
//! let root = factory.create_root_dock("Root");
//! let tools = factory.create_tool_dock("Tools", Alignment::Left);
//! let explorer = factory.create_tool("Explorer", "Explorer");
//! let search = factory.create_tool("Search", "Search");
//!
//! factory.add_dockable(root, tools);
//! factory.add_dockable(tools, explorer);
//! factory.add_dockable(tools, search);
//! factory.init_layout(root);
//!
//! // Move "Search" into its own tool dock to the left of "Tools".
//! assert!(factory.split_to_dock(tools, search, DockOperation::Left));
//! assert!(factory.tree().validate(root).is_ok());
//! ```

#[cfg(feature = "docking")]
pub mod docking;
pub mod event;
pub mod factory;
pub mod locator;
pub mod model;
pub mod navigate;
pub mod serializer;
pub mod settings;
pub mod snapshot;
pub mod strategy;
pub mod window;

pub use event::{DockEvent, EventBus, SubscriptionId};
pub use factory::{CloseDecision, CloseTarget, CloseTicket, Factory};
pub use locator::{ContextLocator, HostWindowLocator, Locator};
pub use model::{
    Alignment, DockOperation, DockOperationMask, DockTree, DockWindow, Dockable, DockableFlags,
    InvariantViolation, Kind, KindTag, NodeId, Orientation, WindowId,
};
pub use serializer::{DockSerializer, JsonSerializer, SerializerError};
pub use settings::{DockSettings, GlobalDockingPreset};
pub use snapshot::LayoutSnapshot;
pub use strategy::{DockError, DockStrategy, FillStrategy, SplitStrategy, WindowStrategy};
pub use window::HostWindow;

#[cfg(feature = "docking")]
pub use docking::{DockHit, DockingEngine, DragPhase, DropScope, PendingDrop, VisualHitTester};
