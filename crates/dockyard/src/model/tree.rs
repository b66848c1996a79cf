//! Arena holding every dockable and window of one factory.

use dockyard_core::alloc::HashSet;
use indexmap::IndexMap;

use super::dockable::Dockable;
use super::id::{NodeId, WindowId};
use super::operation::Alignment;
use super::window::DockWindow;

/// Which list of its owner a dockable sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Visible,
    Hidden,
    Pinned,
    EdgePinned(Alignment),
}

/// Position of a dockable inside its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub owner: NodeId,
    pub membership: Membership,
    pub index: usize,
}

/// A broken structural invariant, reported by [`DockTree::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("{0} is reachable more than once (cycle or shared child)")]
    Cycle(NodeId),

    #[error("{child} is held by {holder} but its owner is {owner:?}")]
    OwnerMismatch {
        child: NodeId,
        holder: NodeId,
        owner: Option<NodeId>,
    },

    #[error("active dockable {active} of {dock} is not visible")]
    ActiveNotVisible { dock: NodeId, active: NodeId },

    #[error("{0} is referenced but missing from the arena")]
    Dangling(NodeId),

    #[error("window {window} layout is not a root dock")]
    WindowLayout { window: WindowId },

    #[error("window {window} is listed by {root} but owned by {owner:?}")]
    WindowOwner {
        window: WindowId,
        root: NodeId,
        owner: Option<NodeId>,
    },

    #[error("{0} tracks a focused dockable but is not a root dock")]
    FocusOutsideRoot(NodeId),

    #[error("root {root} focuses {focused}, which lives under another root")]
    FocusInOtherTree { root: NodeId, focused: NodeId },
}

/// Arena storage for dockables and windows.
#[derive(Debug, Default)]
pub struct DockTree {
    nodes: IndexMap<NodeId, Dockable>,
    windows: IndexMap<WindowId, DockWindow>,
    next_node: usize,
    next_window: usize,
}

impl DockTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, dockable: Dockable) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        self.nodes.insert(id, dockable);
        id
    }

    pub(crate) fn remove(&mut self, node: NodeId) -> Option<Dockable> {
        self.nodes.shift_remove(&node)
    }

    pub(crate) fn insert_window(&mut self, window: DockWindow) -> WindowId {
        let id = WindowId(self.next_window);
        self.next_window += 1;
        self.windows.insert(id, window);
        id
    }

    pub(crate) fn remove_window(&mut self, window: WindowId) -> Option<DockWindow> {
        self.windows.shift_remove(&window)
    }

    pub fn get(&self, node: NodeId) -> Option<&Dockable> {
        self.nodes.get(&node)
    }

    pub(crate) fn get_mut(&mut self, node: NodeId) -> Option<&mut Dockable> {
        self.nodes.get_mut(&node)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn window(&self, window: WindowId) -> Option<&DockWindow> {
        self.windows.get(&window)
    }

    pub(crate) fn window_mut(&mut self, window: WindowId) -> Option<&mut DockWindow> {
        self.windows.get_mut(&window)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Dockable)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    pub fn windows(&self) -> impl Iterator<Item = (WindowId, &DockWindow)> {
        self.windows.iter().map(|(id, w)| (*id, w))
    }

    /// Window whose layout is `root`, if `root` is a window layout.
    pub fn window_of_layout(&self, root: NodeId) -> Option<WindowId> {
        self.windows
            .iter()
            .find(|(_, w)| w.layout == Some(root))
            .map(|(id, _)| *id)
    }

    /// Locate `node` inside its owner.
    pub fn slot_of(&self, node: NodeId) -> Option<Slot> {
        let owner = self.get(node)?.owner?;
        let owner_node = self.get(owner)?;
        let dock = owner_node.dock()?;
        let lists = [
            (Membership::Visible, &dock.visible),
            (Membership::Hidden, &dock.hidden),
            (Membership::Pinned, &dock.pinned),
        ];
        for (membership, list) in lists {
            if let Some(index) = list.iter().position(|&c| c == node) {
                return Some(Slot {
                    owner,
                    membership,
                    index,
                });
            }
        }
        let root = owner_node.root_state()?;
        let edge = root.edge_of(node)?;
        let index = root.edge(edge).iter().position(|&c| c == node)?;
        Some(Slot {
            owner,
            membership: Membership::EdgePinned(edge),
            index,
        })
    }

    /// Owners of `node`, nearest first. Stops at window layout roots.
    pub fn ancestors(&self, node: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.get(node).and_then(|n| n.owner),
        }
    }

    /// True when `ancestor` is `node` or one of its owners.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        ancestor == node || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Nearest root dock, inclusive.
    pub fn find_root(&self, node: NodeId) -> Option<NodeId> {
        if self.get(node)?.is_root() {
            return Some(node);
        }
        self.ancestors(node)
            .find(|&a| self.get(a).is_some_and(|n| n.is_root()))
    }

    /// Main root reached by following window ownership out of floating layouts.
    pub fn host_root(&self, node: NodeId) -> Option<NodeId> {
        let mut root = self.find_root(node)?;
        let mut guard = 0;
        while let Some(window) = self.window_of_layout(root) {
            let Some(owner) = self.window(window).and_then(|w| w.owner) else {
                break;
            };
            root = self.find_root(owner)?;
            guard += 1;
            if guard > self.windows.len() {
                break;
            }
        }
        Some(root)
    }

    /// Depth-first pre-order walk of `start`, descending into window layouts.
    pub fn descendants(&self, start: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            if !seen.insert(node) {
                continue;
            }
            let Some(dockable) = self.get(node) else {
                continue;
            };
            out.push(node);
            let mut children = dockable.children();
            if let Some(root) = dockable.root_state() {
                children.extend(
                    root.windows
                        .iter()
                        .filter_map(|w| self.window(*w).and_then(|w| w.layout)),
                );
            }
            stack.extend(children.into_iter().rev());
        }
        out
    }

    /// Number of visible children that are not splitters.
    pub fn content_count(&self, dock: NodeId) -> usize {
        self.get(dock)
            .map(|d| {
                d.visible()
                    .iter()
                    .filter(|&&c| self.get(c).is_some_and(|n| !n.is_splitter()))
                    .count()
            })
            .unwrap_or(0)
    }

    /// Check every structural invariant reachable from `root`.
    pub fn validate(&self, root: NodeId) -> Result<(), InvariantViolation> {
        let mut seen = HashSet::new();
        self.validate_node(root, &mut seen)
    }

    fn validate_node(
        &self,
        node: NodeId,
        seen: &mut HashSet<NodeId>,
    ) -> Result<(), InvariantViolation> {
        if !seen.insert(node) {
            return Err(InvariantViolation::Cycle(node));
        }
        let dockable = self.get(node).ok_or(InvariantViolation::Dangling(node))?;

        if let Some(dock) = dockable.dock() {
            if let Some(active) = dock.active
                && !dock.visible.contains(&active)
            {
                return Err(InvariantViolation::ActiveNotVisible { dock: node, active });
            }
            if dock.focused.is_some() && !dockable.is_root() {
                return Err(InvariantViolation::FocusOutsideRoot(node));
            }
            if let Some(focused) = dock.focused
                && self.find_root(focused) != Some(node)
            {
                return Err(InvariantViolation::FocusInOtherTree { root: node, focused });
            }
        }

        for child in dockable.children() {
            let child_node = self.get(child).ok_or(InvariantViolation::Dangling(child))?;
            if child_node.owner != Some(node) {
                return Err(InvariantViolation::OwnerMismatch {
                    child,
                    holder: node,
                    owner: child_node.owner,
                });
            }
            self.validate_node(child, seen)?;
        }

        if let Some(root) = dockable.root_state() {
            for &window in &root.windows {
                let w = self
                    .window(window)
                    .ok_or(InvariantViolation::WindowLayout { window })?;
                if w.owner != Some(node) {
                    return Err(InvariantViolation::WindowOwner {
                        window,
                        root: node,
                        owner: w.owner,
                    });
                }
                let Some(layout) = w.layout else {
                    continue;
                };
                if !self.get(layout).is_some_and(|l| l.is_root()) {
                    return Err(InvariantViolation::WindowLayout { window });
                }
                self.validate_node(layout, seen)?;
            }
        }
        Ok(())
    }
}

/// Iterator over the owners of a dockable.
pub struct Ancestors<'a> {
    tree: &'a DockTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.get(current).and_then(|n| n.owner);
        Some(current)
    }
}
