//! Per-dock navigation history and the recursive close cascade.

use crate::event::DockEvent;
use crate::factory::Factory;
use crate::model::{NodeId, WindowId};

enum Direction {
    Back,
    Forward,
}

impl Factory {
    /// Activate `target` in `dock`, pushing the current active dockable onto
    /// the back stack and clearing the forward stack.
    pub fn navigate_to(&mut self, dock: NodeId, target: NodeId) -> bool {
        let Some(state) = self.tree.get(dock).and_then(|d| d.dock()) else {
            return false;
        };
        if !state.visible.contains(&target) {
            return false;
        }
        let current = state.active;
        if current == Some(target) {
            return true;
        }
        if let Some(state) = self.tree.get_mut(dock).and_then(|d| d.dock_mut()) {
            if let Some(current) = current {
                state.history.back.push(current);
            }
            state.history.forward.clear();
        }
        self.set_active_dockable(target)
    }

    /// Navigate to the dockable with string id `id` anywhere below `dock`.
    pub fn navigate_to_id(&mut self, dock: NodeId, id: &str) -> bool {
        let Some(target) = self.find_by_id(dock, id) else {
            return false;
        };
        let Some(owner) = self.tree.get(target).and_then(|t| t.owner) else {
            return false;
        };
        self.navigate_to(owner, target)
    }

    pub fn go_back(&mut self, dock: NodeId) -> bool {
        self.step(dock, Direction::Back)
    }

    pub fn go_forward(&mut self, dock: NodeId) -> bool {
        self.step(dock, Direction::Forward)
    }

    pub fn can_go_back(&self, dock: NodeId) -> bool {
        self.valid_entry(dock, Direction::Back).is_some()
    }

    pub fn can_go_forward(&self, dock: NodeId) -> bool {
        self.valid_entry(dock, Direction::Forward).is_some()
    }

    /// Newest history entry still visible in `dock`.
    fn valid_entry(&self, dock: NodeId, direction: Direction) -> Option<NodeId> {
        let state = self.tree.get(dock)?.dock()?;
        let stack = match direction {
            Direction::Back => &state.history.back,
            Direction::Forward => &state.history.forward,
        };
        stack
            .iter()
            .rev()
            .copied()
            .find(|n| state.visible.contains(n) && state.active != Some(*n))
    }

    fn step(&mut self, dock: NodeId, direction: Direction) -> bool {
        let Some(state) = self.tree.get_mut(dock).and_then(|d| d.dock_mut()) else {
            return false;
        };
        let current = state.active;
        let (from, to) = match direction {
            Direction::Back => (&mut state.history.back, &mut state.history.forward),
            Direction::Forward => (&mut state.history.forward, &mut state.history.back),
        };
        let mut target = None;
        while let Some(entry) = from.pop() {
            // Entries that left the dock or are already active are dropped.
            if state.visible.contains(&entry) && current != Some(entry) {
                target = Some(entry);
                break;
            }
        }
        let Some(target) = target else {
            return false;
        };
        if let Some(current) = current {
            to.push(current);
        }
        self.set_active_dockable(target)
    }

    /// Run the close hooks of `dock` and everything it owns, window layouts
    /// included. Any veto aborts with no change; otherwise every window is
    /// exited and every owned dockable destroyed, leaving `dock` empty.
    pub fn close_layout(&mut self, dock: NodeId) -> bool {
        if !self.tree.get(dock).is_some_and(|d| d.is_dock()) {
            return false;
        }
        if !self.close_hooks_pass(dock) {
            tracing::debug!("Close of layout {} vetoed", dock);
            return false;
        }

        let windows = self.root_windows(dock);
        for window in windows {
            self.discard_window(window);
        }
        let children = self.tree.get(dock).map(|d| d.children()).unwrap_or_default();
        for child in children {
            let id = self.tree.get(child).map(|c| c.id.clone()).unwrap_or_default();
            self.detach(child);
            self.destroy_subtree(child);
            self.emit(DockEvent::DockableClosed { dockable: child, id });
        }
        if let Some(d) = self.tree.get_mut(dock) {
            if let Some(state) = d.dock_mut() {
                state.active = None;
                state.default = None;
                state.is_active = false;
                state.history.clear();
            }
            if let Some(root) = d.root_state_mut() {
                root.pinned_preview = None;
            }
        }
        if let Some(root) = self.tree.find_root(dock) {
            self.repair_focus(root);
        }
        tracing::debug!("Closed layout {}", dock);
        true
    }

    /// Present every window anchored on `root`.
    pub fn show_windows(&mut self, root: NodeId) -> bool {
        if !self.tree.get(root).is_some_and(|r| r.is_root()) {
            return false;
        }
        for window in self.root_windows(root) {
            self.present_window(window, false);
        }
        true
    }

    /// Exit the host of every window anchored on `root`.
    pub fn exit_windows(&mut self, root: NodeId) -> bool {
        if !self.tree.get(root).is_some_and(|r| r.is_root()) {
            return false;
        }
        for window in self.root_windows(root) {
            self.exit_window(window);
        }
        true
    }

    fn root_windows(&self, root: NodeId) -> Vec<WindowId> {
        self.tree
            .get(root)
            .and_then(|r| r.root_state())
            .map(|r| r.windows.clone())
            .unwrap_or_default()
    }
}
