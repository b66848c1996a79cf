//! The dockable node type and its kind variants.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::id::NodeId;
use super::operation::{DockableFlags, Orientation};
use super::state::{DockState, RootState, SplitterState, TabHost};

/// Opaque host payload attached to a dockable (a view model, a document buffer...).
pub type Context = Rc<dyn Any>;

/// Synchronous close hook. Returning `false` vetoes the close.
pub type CloseHook = Rc<dyn Fn(&Dockable) -> bool>;

/// Discriminator of a [`Kind`]; also the persisted `$type` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KindTag {
    Document,
    Tool,
    Splitter,
    DocumentDock,
    ToolDock,
    ProportionalDock,
    RootDock,
}

impl KindTag {
    /// Name used as the locator fallback key.
    pub fn name(&self) -> &'static str {
        match self {
            KindTag::Document => "Document",
            KindTag::Tool => "Tool",
            KindTag::Splitter => "Splitter",
            KindTag::DocumentDock => "DocumentDock",
            KindTag::ToolDock => "ToolDock",
            KindTag::ProportionalDock => "ProportionalDock",
            KindTag::RootDock => "RootDock",
        }
    }

    /// Inverse of [`KindTag::name`].
    pub fn from_name(name: &str) -> Option<KindTag> {
        [
            KindTag::Document,
            KindTag::Tool,
            KindTag::Splitter,
            KindTag::DocumentDock,
            KindTag::ToolDock,
            KindTag::ProportionalDock,
            KindTag::RootDock,
        ]
        .into_iter()
        .find(|tag| tag.name() == name)
    }

    pub fn is_dock(&self) -> bool {
        matches!(
            self,
            KindTag::DocumentDock | KindTag::ToolDock | KindTag::ProportionalDock | KindTag::RootDock
        )
    }

    pub fn is_leaf(&self) -> bool {
        !self.is_dock()
    }

    /// Tab host kind that naturally holds this leaf.
    pub fn holder_kind(&self) -> Option<KindTag> {
        match self {
            KindTag::Document => Some(KindTag::DocumentDock),
            KindTag::Tool => Some(KindTag::ToolDock),
            _ => None,
        }
    }
}

impl fmt::Display for KindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tagged variant replacing the dockable interface hierarchy.
#[derive(Debug, Clone)]
pub enum Kind {
    Document,
    Tool,
    Splitter(SplitterState),
    DocumentDock { dock: DockState, tabs: TabHost },
    ToolDock { dock: DockState, tabs: TabHost },
    ProportionalDock { dock: DockState, orientation: Orientation },
    RootDock { dock: DockState, root: RootState },
}

impl Kind {
    pub fn tag(&self) -> KindTag {
        match self {
            Kind::Document => KindTag::Document,
            Kind::Tool => KindTag::Tool,
            Kind::Splitter(_) => KindTag::Splitter,
            Kind::DocumentDock { .. } => KindTag::DocumentDock,
            Kind::ToolDock { .. } => KindTag::ToolDock,
            Kind::ProportionalDock { .. } => KindTag::ProportionalDock,
            Kind::RootDock { .. } => KindTag::RootDock,
        }
    }
}

/// Where a pinned or hidden dockable returns to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin {
    pub dock: NodeId,
    pub index: usize,
}

/// A node of the layout tree.
///
/// Structural fields are crate-private: the [`Factory`](crate::Factory) is the
/// only mutation surface for membership and ownership.
pub struct Dockable {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) context: Option<Context>,
    /// Lookup-only back-reference to the containing dock.
    pub(crate) owner: Option<NodeId>,
    pub(crate) proportion: f64,
    pub(crate) flags: DockableFlags,
    pub(crate) on_close: Option<CloseHook>,
    pub(crate) origin: Option<Origin>,
    pub(crate) kind: Kind,
}

impl fmt::Debug for Dockable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dockable")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("owner", &self.owner)
            .field("proportion", &self.proportion)
            .field("flags", &self.flags)
            .field("has_context", &self.context.is_some())
            .field("kind", &self.kind)
            .finish()
    }
}

impl Dockable {
    pub(crate) fn new(id: impl Into<String>, title: impl Into<String>, kind: Kind) -> Self {
        let flags = match kind {
            Kind::Splitter(_) => DockableFlags::empty(),
            Kind::RootDock { .. } => DockableFlags::CAN_CLOSE | DockableFlags::CAN_DROP,
            _ => DockableFlags::all(),
        };
        Self {
            id: id.into(),
            title: title.into(),
            context: None,
            owner: None,
            proportion: f64::NAN,
            flags,
            on_close: None,
            origin: None,
            kind,
        }
    }

    /// Stable string key.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    pub fn set_context(&mut self, context: Option<Context>) {
        self.context = context;
    }

    /// Downcast the context payload.
    pub fn context_as<T: 'static>(&self) -> Option<&T> {
        self.context.as_ref().and_then(|c| c.downcast_ref::<T>())
    }

    pub fn owner(&self) -> Option<NodeId> {
        self.owner
    }

    /// Fractional size within the parent; NaN means unconstrained.
    pub fn proportion(&self) -> f64 {
        self.proportion
    }

    pub fn set_proportion(&mut self, proportion: f64) {
        self.proportion = proportion;
    }

    pub fn flags(&self) -> DockableFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: DockableFlags) {
        self.flags = flags;
    }

    pub fn can_close(&self) -> bool {
        self.flags.contains(DockableFlags::CAN_CLOSE)
    }

    pub fn can_pin(&self) -> bool {
        self.flags.contains(DockableFlags::CAN_PIN)
    }

    pub fn can_float(&self) -> bool {
        self.flags.contains(DockableFlags::CAN_FLOAT)
    }

    pub fn can_drag(&self) -> bool {
        self.flags.contains(DockableFlags::CAN_DRAG)
    }

    pub fn can_drop(&self) -> bool {
        self.flags.contains(DockableFlags::CAN_DROP)
    }

    /// Install the synchronous close hook.
    pub fn set_on_close(&mut self, hook: Option<CloseHook>) {
        self.on_close = hook;
    }

    /// Run the close hook. Dockables without one always allow closing.
    pub fn on_close(&self) -> bool {
        self.on_close.as_ref().is_none_or(|hook| hook(self))
    }

    pub fn origin(&self) -> Option<Origin> {
        self.origin
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn tag(&self) -> KindTag {
        self.kind.tag()
    }

    pub fn is_dock(&self) -> bool {
        self.tag().is_dock()
    }

    pub fn is_root(&self) -> bool {
        matches!(self.kind, Kind::RootDock { .. })
    }

    pub fn is_splitter(&self) -> bool {
        matches!(self.kind, Kind::Splitter(_))
    }

    pub fn dock(&self) -> Option<&DockState> {
        match &self.kind {
            Kind::DocumentDock { dock, .. }
            | Kind::ToolDock { dock, .. }
            | Kind::ProportionalDock { dock, .. }
            | Kind::RootDock { dock, .. } => Some(dock),
            _ => None,
        }
    }

    /// Mutable access to the container state. Membership lists stay crate-private.
    pub fn dock_mut(&mut self) -> Option<&mut DockState> {
        match &mut self.kind {
            Kind::DocumentDock { dock, .. }
            | Kind::ToolDock { dock, .. }
            | Kind::ProportionalDock { dock, .. }
            | Kind::RootDock { dock, .. } => Some(dock),
            _ => None,
        }
    }

    pub fn tab_host(&self) -> Option<&TabHost> {
        match &self.kind {
            Kind::DocumentDock { tabs, .. } | Kind::ToolDock { tabs, .. } => Some(tabs),
            _ => None,
        }
    }

    pub fn tab_host_mut(&mut self) -> Option<&mut TabHost> {
        match &mut self.kind {
            Kind::DocumentDock { tabs, .. } | Kind::ToolDock { tabs, .. } => Some(tabs),
            _ => None,
        }
    }

    pub fn root_state(&self) -> Option<&RootState> {
        match &self.kind {
            Kind::RootDock { root, .. } => Some(root),
            _ => None,
        }
    }

    pub(crate) fn root_state_mut(&mut self) -> Option<&mut RootState> {
        match &mut self.kind {
            Kind::RootDock { root, .. } => Some(root),
            _ => None,
        }
    }

    pub fn orientation(&self) -> Option<Orientation> {
        match &self.kind {
            Kind::ProportionalDock { orientation, .. } => Some(*orientation),
            _ => None,
        }
    }

    pub fn splitter(&self) -> Option<&SplitterState> {
        match &self.kind {
            Kind::Splitter(state) => Some(state),
            _ => None,
        }
    }

    /// Every dockable this node structurally owns, in membership order.
    pub fn children(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        if let Some(dock) = self.dock() {
            out.extend(&dock.visible);
            out.extend(&dock.hidden);
            out.extend(&dock.pinned);
        }
        if let Some(root) = self.root_state() {
            out.extend(root.all_pinned());
        }
        out
    }

    /// Visible children that carry content (splitters excluded by the caller's tree lookup).
    pub(crate) fn visible(&self) -> &[NodeId] {
        self.dock().map(|d| d.visible.as_slice()).unwrap_or(&[])
    }
}
