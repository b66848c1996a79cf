//! Add, remove, move, swap and collapse.

use dockyard_core::geometry::Rect;

use super::Factory;
use crate::event::DockEvent;
use crate::model::{DockOperation, Kind, Membership, NodeId, WindowId};
use crate::strategy::{DockStrategy, SplitStrategy, WindowStrategy};

impl Factory {
    /// Append a detached dockable to `dock`'s visible list.
    pub fn add_dockable(&mut self, dock: NodeId, dockable: NodeId) -> bool {
        self.insert_dockable(dock, usize::MAX, dockable)
    }

    /// Insert a detached dockable into `dock`'s visible list at `index` (clamped).
    pub fn insert_dockable(&mut self, dock: NodeId, index: usize, dockable: NodeId) -> bool {
        if !self.can_adopt(dock, dockable) {
            tracing::warn!("Rejected adding {} to {}", dockable, dock);
            return false;
        }
        self.attach(dock, dockable, Membership::Visible, Some(index));
        tracing::debug!("Added {} to {}", dockable, dock);
        self.emit(DockEvent::DockableAdded { dock, dockable });
        true
    }

    /// Check that `dockable` is a free node that `dock` may hold.
    fn can_adopt(&self, dock: NodeId, dockable: NodeId) -> bool {
        let (Some(target), Some(node)) = (self.tree.get(dock), self.tree.get(dockable)) else {
            return false;
        };
        target.is_dock()
            && node.owner.is_none()
            && self.tree.window_of_layout(dockable).is_none()
            && !self.tree.is_ancestor_or_self(dockable, dock)
    }

    /// Detach `dockable` from its owner.
    ///
    /// With `collapse`, an owner left empty is removed from its own parent
    /// (recursively) when it is collapsable and not a root, and a proportional
    /// dock left with a single child is unwrapped.
    pub fn remove_dockable(&mut self, dockable: NodeId, collapse: bool) -> bool {
        let root = self.tree.find_root(dockable);
        let Some(slot) = self.detach(dockable) else {
            return false;
        };
        tracing::debug!("Removed {} from {}", dockable, slot.owner);
        self.emit(DockEvent::DockableRemoved {
            dock: slot.owner,
            dockable,
        });
        self.rebalance(slot.owner);
        if collapse {
            self.collapse_dock(slot.owner);
        }
        if let Some(root) = root {
            self.repair_focus(root);
        }
        true
    }

    /// Relocate `dockable` from `source_dock` to `target_dock`, keeping its identity.
    ///
    /// With `source_dock == target_dock` this reorders the visible list.
    /// `index` defaults to the end of the target list.
    pub fn move_dockable(
        &mut self,
        source_dock: NodeId,
        target_dock: NodeId,
        dockable: NodeId,
        index: Option<usize>,
    ) -> bool {
        let Some(slot) = self.tree.slot_of(dockable) else {
            return false;
        };
        let Some(target) = self.tree.get(target_dock).and_then(|t| t.dock()) else {
            tracing::warn!("Rejected moving {} to non-dock {}", dockable, target_dock);
            return false;
        };
        let fill_allowed = target.allowed_operations.allows(DockOperation::Fill);
        if slot.owner != source_dock
            || self.tree.is_ancestor_or_self(dockable, target_dock)
            || (source_dock != target_dock && !fill_allowed)
        {
            tracing::warn!("Rejected moving {} to {}", dockable, target_dock);
            return false;
        }

        if source_dock == target_dock {
            if slot.membership != Membership::Visible {
                return false;
            }
            let Some(dock) = self.tree.get_mut(source_dock).and_then(|d| d.dock_mut()) else {
                return false;
            };
            dock.visible.remove(slot.index);
            let at = index.unwrap_or(dock.visible.len()).min(dock.visible.len());
            dock.visible.insert(at, dockable);
        } else {
            let root = self.tree.find_root(dockable);
            self.detach(dockable);
            self.attach(target_dock, dockable, Membership::Visible, index);
            let target_active = self.tree.get(target_dock).and_then(|t| t.dock()).and_then(|d| d.active);
            if target_active.is_none() {
                self.set_active_dockable(dockable);
            }
            self.rebalance(source_dock);
            self.collapse_dock(source_dock);
            if let Some(root) = root {
                self.repair_focus(root);
            }
        }

        tracing::debug!("Moved {} from {} to {}", dockable, source_dock, target_dock);
        self.emit(DockEvent::DockableMoved {
            source: source_dock,
            target: target_dock,
            dockable,
        });
        true
    }

    /// Exchange the visible positions of two dockables, within or across docks.
    pub fn swap_dockable(&mut self, first: NodeId, second: NodeId) -> bool {
        if first == second
            || self.tree.is_ancestor_or_self(first, second)
            || self.tree.is_ancestor_or_self(second, first)
        {
            return false;
        }
        let (Some(a), Some(b)) = (self.tree.slot_of(first), self.tree.slot_of(second)) else {
            return false;
        };
        if a.membership != Membership::Visible || b.membership != Membership::Visible {
            return false;
        }
        let roots = (self.tree.find_root(first), self.tree.find_root(second));

        if let Some(dock) = self.tree.get_mut(a.owner).and_then(|d| d.dock_mut()) {
            dock.visible[a.index] = second;
            if a.owner != b.owner && dock.active == Some(first) {
                dock.active = Some(second);
            }
        }
        if let Some(dock) = self.tree.get_mut(b.owner).and_then(|d| d.dock_mut()) {
            dock.visible[b.index] = first;
            if a.owner != b.owner && dock.active == Some(second) {
                dock.active = Some(first);
            }
        }
        if let Some(d) = self.tree.get_mut(first) {
            d.owner = Some(b.owner);
        }
        if let Some(d) = self.tree.get_mut(second) {
            d.owner = Some(a.owner);
        }

        if roots.0 != roots.1 {
            for root in [roots.0, roots.1].into_iter().flatten() {
                self.repair_focus(root);
            }
        }

        tracing::debug!("Swapped {} and {}", first, second);
        self.emit(DockEvent::DockableSwapped { first, second });
        true
    }

    /// Split `target` by docking `source` on the edge named by `operation`.
    pub fn split_to_dock(&mut self, target: NodeId, source: NodeId, operation: DockOperation) -> bool {
        if !operation.is_split() {
            return false;
        }
        let owner = self.tree.get(source).and_then(|s| s.owner);
        SplitStrategy::new(operation).execute(self, source, owner, target, true)
    }

    /// Like [`Factory::split_to_dock`] with an explicit share for the new content.
    pub fn split_to_dock_with(
        &mut self,
        target: NodeId,
        source: NodeId,
        operation: DockOperation,
        proportion: f64,
    ) -> bool {
        if !operation.is_split() {
            return false;
        }
        let owner = self.tree.get(source).and_then(|s| s.owner);
        SplitStrategy::new(operation)
            .with_proportion(proportion)
            .execute(self, source, owner, target, true)
    }

    /// Extract `dockable` into a new floating window.
    ///
    /// `placement` overrides the default window position and size.
    pub fn float_dockable(&mut self, dockable: NodeId, placement: Option<Rect>) -> Option<WindowId> {
        let owner = self.tree.get(dockable)?.owner?;
        let mut strategy = WindowStrategy::new(placement);
        if !strategy.execute(self, dockable, Some(owner), owner, true) {
            return None;
        }
        strategy.created_window()
    }

    /// Tidy `dock` after its content changed.
    ///
    /// Drops stray splitters, removes the dock when empty, unwraps a
    /// proportional dock holding a single child and closes a floating window
    /// whose layout ran empty. Returns true if the tree changed.
    pub fn collapse_dock(&mut self, dock: NodeId) -> bool {
        let Some(node) = self.tree.get(dock) else {
            return false;
        };
        let Some(state) = node.dock() else {
            return false;
        };
        let is_proportional = matches!(node.kind, Kind::ProportionalDock { .. });
        let is_root = node.is_root();
        let collapsable = state.is_collapsable;
        let owner = node.owner;

        let mut changed = false;
        if is_proportional {
            changed |= self.normalize_splitters(dock);
        }

        let Some(node) = self.tree.get(dock) else {
            return changed;
        };
        let Some(state) = node.dock() else {
            return changed;
        };
        let is_empty = state.visible.is_empty() && state.hidden.is_empty() && state.pinned.is_empty();

        if is_root {
            let edges_empty = node.root_state().is_some_and(|r| r.all_pinned().next().is_none());
            if is_empty
                && edges_empty
                && let Some(window) = self.tree.window_of_layout(dock)
            {
                tracing::debug!("Closing window {} with empty layout", window);
                self.discard_window(window);
                return true;
            }
            return changed;
        }

        let Some(owner) = owner else {
            return changed;
        };
        if !collapsable {
            return changed;
        }

        if is_empty {
            tracing::debug!("Collapsing empty {}", dock);
            self.detach(dock);
            self.emit(DockEvent::DockableRemoved { dock: owner, dockable: dock });
            self.destroy_subtree(dock);
            self.rebalance(owner);
            self.collapse_dock(owner);
            return true;
        }

        if is_proportional
            && self.tree.content_count(dock) == 1
            && state.hidden.is_empty()
            && state.pinned.is_empty()
        {
            return self.unwrap_proportional(dock) || changed;
        }
        changed
    }

    /// Replace a single-child proportional dock by its child.
    fn unwrap_proportional(&mut self, dock: NodeId) -> bool {
        let Some(node) = self.tree.get(dock) else {
            return false;
        };
        let proportion = node.proportion;
        let owner = node.owner;
        let Some(child) = node
            .visible()
            .iter()
            .copied()
            .find(|&c| self.tree.get(c).is_some_and(|d| !d.is_splitter()))
        else {
            return false;
        };

        self.detach(child);
        if !self.replace_in_owner(dock, child) {
            // Put the child back so nothing is lost.
            self.attach(dock, child, Membership::Visible, None);
            return false;
        }
        if let Some(d) = self.tree.get_mut(child) {
            d.proportion = proportion;
        }
        tracing::debug!("Unwrapped {} into its child {}", dock, child);
        self.destroy_subtree(dock);
        if let Some(owner) = owner {
            self.collapse_dock(owner);
        }
        true
    }

    /// Remove leading, trailing and doubled splitters of a proportional dock.
    fn normalize_splitters(&mut self, dock: NodeId) -> bool {
        let Some(visible) = self.tree.get(dock).map(|d| d.visible().to_vec()) else {
            return false;
        };
        let is_splitter = |n: NodeId| self.tree.get(n).is_some_and(|d| d.is_splitter());

        let mut kept: Vec<NodeId> = Vec::with_capacity(visible.len());
        let mut stray = Vec::new();
        for &child in &visible {
            let splitter = is_splitter(child);
            if splitter && kept.last().is_none_or(|&last| is_splitter(last)) {
                stray.push(child);
            } else {
                kept.push(child);
            }
        }
        while let Some(&last) = kept.last()
            && is_splitter(last)
        {
            kept.pop();
            stray.push(last);
        }

        for &splitter in &stray {
            self.detach(splitter);
            self.destroy_subtree(splitter);
        }
        !stray.is_empty()
    }

    /// Rescale finite proportions of a dock's content children to sum to one.
    pub(crate) fn rebalance(&mut self, dock: NodeId) {
        let Some(node) = self.tree.get(dock) else {
            return;
        };
        if !matches!(node.kind, Kind::ProportionalDock { .. }) {
            return;
        }
        let content: Vec<NodeId> = node
            .visible()
            .iter()
            .copied()
            .filter(|&c| self.tree.get(c).is_some_and(|d| !d.is_splitter()))
            .collect();
        let proportions: Vec<f64> = content
            .iter()
            .filter_map(|&c| self.tree.get(c).map(|d| d.proportion))
            .collect();
        if proportions.is_empty() || proportions.iter().any(|p| !p.is_finite()) {
            return;
        }
        let sum: f64 = proportions.iter().sum();
        if sum <= 0.0 || (sum - 1.0).abs() < 1e-9 {
            return;
        }
        for c in content {
            if let Some(d) = self.tree.get_mut(c) {
                d.proportion /= sum;
            }
        }
    }
}
