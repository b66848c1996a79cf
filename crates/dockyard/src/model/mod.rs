//! Dockable tree model.
//!
//! Every dockable lives in a [`DockTree`] arena and is addressed by [`NodeId`].
//! Containers own their children through the membership lists of
//! [`DockState`]; the `owner` field on each dockable is a lookup-only
//! back-reference.

mod dockable;
mod id;
mod operation;
mod state;
mod tree;
mod window;

pub use dockable::{CloseHook, Context, Dockable, Kind, KindTag, Origin};
pub use id::{NodeId, WindowId};
pub use operation::{Alignment, DockOperation, DockOperationMask, DockableFlags, Orientation};
pub use state::{DockState, DocumentTemplate, Navigable, RootState, SplitterState, TabHost};
pub use tree::{Ancestors, DockTree, InvariantViolation, Membership, Slot};
pub use window::DockWindow;

pub(crate) use window::WindowDrag;
