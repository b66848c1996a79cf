//! Activation, focus, lookup and the layout wiring pass.

use dockyard_core::profiling::profile_function;

use super::Factory;
use crate::event::DockEvent;
use crate::model::{Dockable, NodeId};

impl Factory {
    /// Make a visible dockable the active one of its owner and focus it on
    /// the nearest root.
    pub fn set_active_dockable(&mut self, dockable: NodeId) -> bool {
        let Some(owner) = self.tree.get(dockable).and_then(|d| d.owner) else {
            return false;
        };
        let Some(dock) = self.tree.get_mut(owner).and_then(|d| d.dock_mut()) else {
            return false;
        };
        if !dock.visible.contains(&dockable) {
            return false;
        }
        if dock.active != Some(dockable) {
            dock.active = Some(dockable);
            tracing::debug!("Active dockable of {} is now {}", owner, dockable);
            self.emit(DockEvent::ActiveDockableChanged {
                dock: owner,
                dockable: Some(dockable),
            });
        }
        if let Some(root) = self.tree.find_root(owner) {
            self.set_focused_dockable(root, Some(dockable));
        }
        true
    }

    /// Track `dockable` as the focused dockable of `dock`'s root.
    ///
    /// The owner of the focused dockable is flagged active; the previous
    /// owner loses the flag.
    pub fn set_focused_dockable(&mut self, dock: NodeId, dockable: Option<NodeId>) -> bool {
        let Some(root) = self.tree.find_root(dock) else {
            return false;
        };
        if let Some(node) = dockable
            && (node == root || self.tree.find_root(node) != Some(root))
        {
            return false;
        }
        let Some(previous) = self.tree.get(root).and_then(|r| r.dock()).map(|d| d.focused) else {
            return false;
        };
        if previous == dockable {
            return true;
        }

        let previous_owner = previous.and_then(|p| self.tree.get(p)).and_then(|p| p.owner);
        if let Some(state) = previous_owner.and_then(|o| self.tree.get_mut(o)).and_then(|o| o.dock_mut()) {
            state.is_active = false;
        }
        let new_owner = dockable.and_then(|n| self.tree.get(n)).and_then(|n| n.owner);
        if let Some(state) = new_owner.and_then(|o| self.tree.get_mut(o)).and_then(|o| o.dock_mut()) {
            state.is_active = true;
        }
        if let Some(state) = self.tree.get_mut(root).and_then(|r| r.dock_mut()) {
            state.focused = dockable;
        }
        self.emit(DockEvent::FocusedDockableChanged { root, dockable });
        true
    }

    /// Nearest root dock of `dockable`, inclusive.
    pub fn find_root(&self, dockable: NodeId) -> Option<NodeId> {
        self.tree.find_root(dockable)
    }

    /// First dockable below `root` (root excluded, window layouts included)
    /// matching `predicate`.
    pub fn find_dockable(&self, root: NodeId, predicate: impl Fn(&Dockable) -> bool) -> Option<NodeId> {
        self.tree
            .descendants(root)
            .into_iter()
            .skip(1)
            .find(|&n| self.tree.get(n).is_some_and(&predicate))
    }

    pub fn find_by_id(&self, root: NodeId, id: &str) -> Option<NodeId> {
        self.find_dockable(root, |d| d.id() == id)
    }

    /// Wire a freshly built or imported layout.
    ///
    /// Re-derives owners, resolves missing contexts and window hosts through
    /// the locators, picks default active dockables and focuses the deepest
    /// active leaf of each root that has no focus yet.
    pub fn init_layout(&mut self, root: NodeId) -> bool {
        profile_function!();

        if !self.tree.get(root).is_some_and(|r| r.is_root()) {
            return false;
        }
        if let Some(d) = self.tree.get_mut(root) {
            d.owner = None;
        }

        let nodes = self.tree.descendants(root);
        let mut roots = Vec::new();
        let mut windows = Vec::new();

        for &node in &nodes {
            let Some(dockable) = self.tree.get(node) else {
                continue;
            };
            let children = dockable.children();
            let anchored = dockable
                .root_state()
                .map(|r| r.windows.clone())
                .unwrap_or_default();
            if dockable.is_root() {
                roots.push(node);
            }
            let needs_context = dockable.context.is_none();
            let (id, tag) = (dockable.id.clone(), dockable.tag());

            for child in children {
                if let Some(c) = self.tree.get_mut(child) {
                    c.owner = Some(node);
                }
            }
            for &window in &anchored {
                let layout = self.tree.window_mut(window).and_then(|w| {
                    w.owner = Some(node);
                    w.layout
                });
                if let Some(layout) = layout
                    && let Some(l) = self.tree.get_mut(layout)
                {
                    l.owner = None;
                }
                windows.push(window);
            }
            if needs_context
                && let Some(context) = self.context_locator.resolve_for(&id, tag)
                && let Some(d) = self.tree.get_mut(node)
            {
                d.context = Some(context);
            }
            self.init_active(node);
        }

        for window in windows {
            self.ensure_host(window);
        }

        for layout_root in roots {
            let has_focus = self
                .tree
                .get(layout_root)
                .and_then(|r| r.dock())
                .is_some_and(|d| d.focused.is_some());
            if has_focus {
                self.repair_focus(layout_root);
                continue;
            }
            if let Some(leaf) = self.deepest_active(layout_root) {
                self.set_focused_dockable(layout_root, Some(leaf));
            }
        }

        tracing::debug!("Initialized layout {} ({} dockables)", root, nodes.len());
        true
    }

    /// Give a dock without a valid active dockable its default or first content child.
    fn init_active(&mut self, node: NodeId) {
        let Some(dock) = self.tree.get(node).and_then(|d| d.dock()) else {
            return;
        };
        if dock.active.is_some_and(|a| dock.visible.contains(&a)) {
            return;
        }
        let next = dock
            .default
            .filter(|d| dock.visible.contains(d))
            .or_else(|| {
                dock.visible
                    .iter()
                    .copied()
                    .find(|&c| self.tree.get(c).is_some_and(|d| !d.is_splitter()))
            });
        if let Some(state) = self.tree.get_mut(node).and_then(|d| d.dock_mut()) {
            state.active = next;
        }
    }

    /// Follow active dockables down from `root` to the innermost one.
    fn deepest_active(&self, root: NodeId) -> Option<NodeId> {
        let mut current = self.tree.get(root)?.dock()?.active?;
        while let Some(next) = self.tree.get(current).and_then(|d| d.dock()).and_then(|d| d.active) {
            current = next;
        }
        Some(current)
    }
}
