//! Capability records composed into [`Kind`](super::Kind) variants.

use std::rc::Rc;

use super::id::{NodeId, WindowId};
use super::operation::{Alignment, DockOperationMask};

/// Back/forward history over a dock's active dockable.
#[derive(Debug, Clone, Default)]
pub struct Navigable {
    pub(crate) back: Vec<NodeId>,
    pub(crate) forward: Vec<NodeId>,
}

impl Navigable {
    pub fn back(&self) -> &[NodeId] {
        &self.back
    }

    pub fn forward(&self) -> &[NodeId] {
        &self.forward
    }

    pub(crate) fn clear(&mut self) {
        self.back.clear();
        self.forward.clear();
    }

    pub(crate) fn forget(&mut self, node: NodeId) {
        self.back.retain(|&n| n != node);
        self.forward.retain(|&n| n != node);
    }
}

/// State shared by every container.
#[derive(Debug, Clone)]
pub struct DockState {
    pub(crate) visible: Vec<NodeId>,
    pub(crate) hidden: Vec<NodeId>,
    pub(crate) pinned: Vec<NodeId>,
    pub(crate) active: Option<NodeId>,
    pub(crate) default: Option<NodeId>,
    pub(crate) focused: Option<NodeId>,
    pub(crate) is_active: bool,
    pub(crate) history: Navigable,
    /// Remove this dock from its parent once it runs out of content.
    pub is_collapsable: bool,
    /// Drop operations accepted on this dock and its leaves.
    pub allowed_operations: DockOperationMask,
    /// Shows the cross-window global adorner while dragging over this dock.
    pub global_dock_target: bool,
}

impl Default for DockState {
    fn default() -> Self {
        Self {
            visible: Vec::new(),
            hidden: Vec::new(),
            pinned: Vec::new(),
            active: None,
            default: None,
            focused: None,
            is_active: false,
            history: Navigable::default(),
            is_collapsable: true,
            allowed_operations: DockOperationMask::ALL,
            global_dock_target: false,
        }
    }
}

impl DockState {
    pub fn visible(&self) -> &[NodeId] {
        &self.visible
    }

    pub fn hidden(&self) -> &[NodeId] {
        &self.hidden
    }

    /// Dockables pinned in place (pinned tabs of a non-tool dock).
    pub fn pinned(&self) -> &[NodeId] {
        &self.pinned
    }

    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    pub fn default_dockable(&self) -> Option<NodeId> {
        self.default
    }

    /// Focused dockable; only tracked on root docks.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn history(&self) -> &Navigable {
        &self.history
    }
}

/// Leaf-creation callback of a document dock.
pub type DocumentTemplate = Rc<dyn Fn(usize) -> String>;

/// Tab presentation capability of document and tool docks.
#[derive(Clone, Default)]
pub struct TabHost {
    pub can_create_document: bool,
    /// Produces the title of a new document from a running counter.
    pub document_template: Option<DocumentTemplate>,
    pub alignment: Alignment,
    pub auto_hide: bool,
    pub(crate) created_documents: usize,
}

impl std::fmt::Debug for TabHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabHost")
            .field("can_create_document", &self.can_create_document)
            .field("has_document_template", &self.document_template.is_some())
            .field("alignment", &self.alignment)
            .field("auto_hide", &self.auto_hide)
            .finish()
    }
}

/// Edge-pinned lists and floating windows of a root dock.
#[derive(Debug, Clone, Default)]
pub struct RootState {
    pub(crate) left_pinned: Vec<NodeId>,
    pub(crate) right_pinned: Vec<NodeId>,
    pub(crate) top_pinned: Vec<NodeId>,
    pub(crate) bottom_pinned: Vec<NodeId>,
    pub(crate) pinned_preview: Option<NodeId>,
    pub(crate) windows: Vec<WindowId>,
}

impl RootState {
    pub fn left_pinned(&self) -> &[NodeId] {
        &self.left_pinned
    }

    pub fn right_pinned(&self) -> &[NodeId] {
        &self.right_pinned
    }

    pub fn top_pinned(&self) -> &[NodeId] {
        &self.top_pinned
    }

    pub fn bottom_pinned(&self) -> &[NodeId] {
        &self.bottom_pinned
    }

    /// The pinned tool currently shown in the pinned dock slot.
    pub fn pinned_preview(&self) -> Option<NodeId> {
        self.pinned_preview
    }

    pub fn windows(&self) -> &[WindowId] {
        &self.windows
    }

    pub fn edge(&self, edge: Alignment) -> &[NodeId] {
        match edge.pin_edge() {
            Alignment::Right => &self.right_pinned,
            Alignment::Top => &self.top_pinned,
            Alignment::Bottom => &self.bottom_pinned,
            _ => &self.left_pinned,
        }
    }

    pub(crate) fn edge_mut(&mut self, edge: Alignment) -> &mut Vec<NodeId> {
        match edge.pin_edge() {
            Alignment::Right => &mut self.right_pinned,
            Alignment::Top => &mut self.top_pinned,
            Alignment::Bottom => &mut self.bottom_pinned,
            _ => &mut self.left_pinned,
        }
    }

    /// The edge list holding `node`, if any.
    pub fn edge_of(&self, node: NodeId) -> Option<Alignment> {
        [
            Alignment::Left,
            Alignment::Right,
            Alignment::Top,
            Alignment::Bottom,
        ]
        .into_iter()
        .find(|&edge| self.edge(edge).contains(&node))
    }

    pub(crate) fn all_pinned(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.left_pinned
            .iter()
            .chain(&self.right_pinned)
            .chain(&self.top_pinned)
            .chain(&self.bottom_pinned)
            .copied()
    }
}

/// Resize behaviour of a splitter leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitterState {
    pub can_resize: bool,
}

impl Default for SplitterState {
    fn default() -> Self {
        Self { can_resize: true }
    }
}
