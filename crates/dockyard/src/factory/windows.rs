//! Window registration on root docks.

use super::Factory;
use crate::event::DockEvent;
use crate::model::{NodeId, WindowId};

impl Factory {
    /// Give a detached window its layout root.
    pub fn set_window_layout(&mut self, window: WindowId, layout: NodeId) -> bool {
        let valid = self
            .tree
            .get(layout)
            .is_some_and(|l| l.is_root() && l.owner.is_none())
            && self.tree.window_of_layout(layout).is_none();
        if !valid {
            return false;
        }
        let Some(w) = self.tree.window_mut(window) else {
            return false;
        };
        if w.layout.is_some() {
            return false;
        }
        w.layout = Some(layout);
        true
    }

    /// Anchor a window on `root`.
    pub fn add_window(&mut self, root: NodeId, window: WindowId) -> bool {
        if !self.tree.get(root).is_some_and(|r| r.is_root()) {
            return false;
        }
        let Some(w) = self.tree.window(window) else {
            return false;
        };
        if w.owner.is_some() || w.layout.is_some_and(|l| self.tree.is_ancestor_or_self(l, root)) {
            return false;
        }
        if let Some(state) = self.tree.get_mut(root).and_then(|r| r.root_state_mut()) {
            state.windows.push(window);
        }
        if let Some(w) = self.tree.window_mut(window) {
            w.owner = Some(root);
        }
        tracing::debug!("Added window {} to {}", window, root);
        self.emit(DockEvent::WindowAdded { window, root });
        true
    }

    /// Unanchor a window from its root. The window and its layout survive.
    pub fn remove_window(&mut self, window: WindowId) -> bool {
        let Some(root) = self.tree.window(window).and_then(|w| w.owner) else {
            return false;
        };
        if let Some(state) = self.tree.get_mut(root).and_then(|r| r.root_state_mut()) {
            state.windows.retain(|&w| w != window);
        }
        if let Some(w) = self.tree.window_mut(window) {
            w.owner = None;
        }
        tracing::debug!("Removed window {} from {}", window, root);
        self.emit(DockEvent::WindowRemoved { window, root });
        true
    }

    /// Tear a window down without consulting vetoes.
    pub(crate) fn discard_window(&mut self, window: WindowId) {
        self.exit_window(window);
        self.remove_window(window);
        let layout = self.tree.window(window).and_then(|w| w.layout);
        if let Some(layout) = layout {
            self.destroy_subtree(layout);
        }
        self.tree.remove_window(window);
        tracing::debug!("Closed window {}", window);
        self.emit(DockEvent::WindowClosed { window });
    }
}
