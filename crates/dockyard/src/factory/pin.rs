//! Pin, hide and their inverses.
//!
//! Membership moves between a dock's visible list and either an edge-pinned
//! list of the root (tools in a tool dock), the dock's own pinned list, or its
//! hidden list. The prior position is kept in the dockable's `origin`.

use super::Factory;
use crate::event::DockEvent;
use crate::model::{Alignment, Kind, Membership, NodeId, Origin};

impl Factory {
    /// Pin a visible dockable.
    ///
    /// Tools of a tool dock go to the root edge list matching the dock's
    /// alignment (`Unset` pins left); the emptied tool dock is kept so the
    /// tool can return. Dockables of other docks become pinned tabs.
    pub fn pin_dockable(&mut self, dockable: NodeId) -> bool {
        let Some(node) = self.tree.get(dockable) else {
            return false;
        };
        if !node.can_pin() {
            return false;
        }
        let Some(slot) = self.tree.slot_of(dockable) else {
            return false;
        };
        if slot.membership != Membership::Visible {
            return false;
        }
        let Some(owner) = self.tree.get(slot.owner) else {
            return false;
        };
        let origin = Origin {
            dock: slot.owner,
            index: slot.index,
        };

        let tool_edge = match &owner.kind {
            Kind::ToolDock { tabs, .. } => Some(tabs.alignment.pin_edge()),
            _ => None,
        };

        if let Some(edge) = tool_edge {
            let Some(root) = self.tree.find_root(slot.owner) else {
                return false;
            };
            self.detach(dockable);
            self.attach(root, dockable, Membership::EdgePinned(edge), None);
            tracing::debug!("Pinned {} to the {:?} edge of {}", dockable, edge, root);
        } else {
            self.unlist(dockable);
            self.attach(slot.owner, dockable, Membership::Pinned, None);
            tracing::debug!("Pinned {} in {}", dockable, slot.owner);
        }
        if let Some(d) = self.tree.get_mut(dockable) {
            d.origin = Some(origin);
        }
        self.emit(DockEvent::DockablePinned { dockable });
        true
    }

    /// Return a pinned dockable to the dock and index it was pinned from.
    ///
    /// When that dock is gone, an edge-pinned tool falls back to the first tool
    /// dock of the same root with a matching alignment, then to any tool dock.
    /// Without a candidate nothing changes and false is returned.
    pub fn unpin_dockable(&mut self, dockable: NodeId) -> bool {
        let Some(slot) = self.tree.slot_of(dockable) else {
            return false;
        };
        let origin = self.tree.get(dockable).and_then(|d| d.origin);

        let (target, index) = match slot.membership {
            Membership::Pinned => (slot.owner, origin.map(|o| o.index)),
            Membership::EdgePinned(edge) => match self.unpin_target(slot.owner, edge, origin) {
                Some(found) => found,
                None => {
                    tracing::warn!("No dock to unpin {} into", dockable);
                    return false;
                }
            },
            _ => return false,
        };

        self.detach(dockable);
        self.attach(target, dockable, Membership::Visible, index);
        if let Some(d) = self.tree.get_mut(dockable) {
            d.origin = None;
        }
        self.set_active_dockable(dockable);
        tracing::debug!("Unpinned {} into {}", dockable, target);
        self.emit(DockEvent::DockableUnpinned { dockable });
        true
    }

    fn unpin_target(
        &self,
        root: NodeId,
        edge: Alignment,
        origin: Option<Origin>,
    ) -> Option<(NodeId, Option<usize>)> {
        if let Some(origin) = origin
            && self.tree.get(origin.dock).is_some_and(|d| d.is_dock())
            && self.tree.find_root(origin.dock) == Some(root)
        {
            return Some((origin.dock, Some(origin.index)));
        }

        let tool_docks: Vec<NodeId> = self
            .tree
            .descendants(root)
            .into_iter()
            .filter(|&n| {
                self.tree.find_root(n) == Some(root)
                    && matches!(self.tree.get(n).map(|d| &d.kind), Some(Kind::ToolDock { .. }))
            })
            .collect();
        tool_docks
            .iter()
            .copied()
            .find(|&n| {
                self.tree
                    .get(n)
                    .and_then(|d| d.tab_host())
                    .is_some_and(|t| t.alignment.pin_edge() == edge)
            })
            .or_else(|| tool_docks.first().copied())
            .map(|dock| (dock, None))
    }

    /// Check if a dockable sits in a pinned or edge-pinned list.
    pub fn is_dockable_pinned(&self, dockable: NodeId) -> bool {
        matches!(
            self.tree.slot_of(dockable).map(|s| s.membership),
            Some(Membership::Pinned | Membership::EdgePinned(_))
        )
    }

    /// Show an edge-pinned tool in its root's preview slot.
    pub fn preview_pinned_dockable(&mut self, dockable: NodeId) -> bool {
        let Some(slot) = self.tree.slot_of(dockable) else {
            return false;
        };
        if !matches!(slot.membership, Membership::EdgePinned(_)) {
            return false;
        }
        let Some(root) = self.tree.get_mut(slot.owner).and_then(|r| r.root_state_mut()) else {
            return false;
        };
        root.pinned_preview = Some(dockable);
        tracing::debug!("Previewing pinned {}", dockable);
        true
    }

    /// Clear the preview slot of `root`.
    pub fn hide_previewing_dockables(&mut self, root: NodeId) -> bool {
        let Some(state) = self.tree.get_mut(root).and_then(|r| r.root_state_mut()) else {
            return false;
        };
        state.pinned_preview.take().is_some()
    }

    /// Move a visible dockable to its owner's hidden list.
    pub fn hide_dockable(&mut self, dockable: NodeId) -> bool {
        let Some(slot) = self.tree.slot_of(dockable) else {
            return false;
        };
        if slot.membership != Membership::Visible
            || self.tree.get(dockable).is_some_and(|d| d.is_splitter())
        {
            return false;
        }
        self.unlist(dockable);
        self.attach(slot.owner, dockable, Membership::Hidden, None);
        if let Some(d) = self.tree.get_mut(dockable) {
            d.origin = Some(Origin {
                dock: slot.owner,
                index: slot.index,
            });
        }
        tracing::debug!("Hid {} in {}", dockable, slot.owner);
        self.emit(DockEvent::DockableHidden { dockable });
        true
    }

    /// Return a hidden dockable to its prior visible position.
    pub fn restore_dockable(&mut self, dockable: NodeId) -> bool {
        let Some(slot) = self.tree.slot_of(dockable) else {
            return false;
        };
        if slot.membership != Membership::Hidden {
            return false;
        }
        let index = self
            .tree
            .get(dockable)
            .and_then(|d| d.origin)
            .filter(|o| o.dock == slot.owner)
            .map(|o| o.index);
        self.unlist(dockable);
        self.attach(slot.owner, dockable, Membership::Visible, index);
        if let Some(d) = self.tree.get_mut(dockable) {
            d.origin = None;
        }
        self.set_active_dockable(dockable);
        tracing::debug!("Restored {} in {}", dockable, slot.owner);
        self.emit(DockEvent::DockableRestored { dockable });
        true
    }
}
