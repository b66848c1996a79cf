//! The factory: sole mutation surface of a dockable tree.
//!
//! Operations on invalid input are no-ops that return `false` (or `None`).
//! Every successful mutation is reported through the [`EventBus`].

mod close;
mod focus;
mod pin;
mod structure;
mod windows;

use dockyard_core::geometry::Rect;

use crate::event::{DockEvent, EventBus, SubscriptionId};
use crate::locator::{ContextLocator, HostWindowLocator};
use crate::model::{
    Alignment, DockState, DockTree, DockWindow, Dockable, Kind, KindTag, Membership, NodeId,
    Orientation, RootState, Slot, SplitterState, TabHost, WindowId,
};
use crate::settings::DockSettings;

pub use close::{CloseDecision, CloseTarget, CloseTicket, DockableClosingHandler, WindowClosingHandler};

/// Owns the dockable arena and applies every structural change.
pub struct Factory {
    pub(crate) tree: DockTree,
    pub(crate) settings: DockSettings,
    pub(crate) events: EventBus,
    pub(crate) context_locator: ContextLocator,
    pub(crate) host_window_locator: HostWindowLocator,
    pub(crate) dockable_closing: Option<DockableClosingHandler>,
    pub(crate) window_closing: Option<WindowClosingHandler>,
    generated: usize,
}

impl std::fmt::Debug for Factory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factory")
            .field("dockables", &self.tree.len())
            .field("settings", &self.settings)
            .field("events", &self.events)
            .field("context_locator", &self.context_locator)
            .field("host_window_locator", &self.host_window_locator)
            .field("has_dockable_closing", &self.dockable_closing.is_some())
            .field("has_window_closing", &self.window_closing.is_some())
            .finish()
    }
}

impl Default for Factory {
    fn default() -> Self {
        Self::with_settings(DockSettings::default())
    }
}

impl Factory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: DockSettings) -> Self {
        Self {
            tree: DockTree::new(),
            events: EventBus::with_history(settings.event_history_limit),
            settings,
            context_locator: ContextLocator::new(),
            host_window_locator: HostWindowLocator::new(),
            dockable_closing: None,
            window_closing: None,
            generated: 0,
        }
    }

    pub fn settings(&self) -> &DockSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: DockSettings) {
        self.events.set_history_limit(settings.event_history_limit);
        self.settings = settings;
    }

    /// Read-only view of the arena.
    pub fn tree(&self) -> &DockTree {
        &self.tree
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&mut DockEvent) + 'static) -> SubscriptionId {
        self.events.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    pub fn context_locator_mut(&mut self) -> &mut ContextLocator {
        &mut self.context_locator
    }

    pub fn host_window_locator_mut(&mut self) -> &mut HostWindowLocator {
        &mut self.host_window_locator
    }

    pub fn dockable(&self, node: NodeId) -> Option<&Dockable> {
        self.tree.get(node)
    }

    /// Mutable access to non-structural fields (title, flags, proportion, hooks).
    pub fn dockable_mut(&mut self, node: NodeId) -> Option<&mut Dockable> {
        self.tree.get_mut(node)
    }

    pub fn window(&self, window: WindowId) -> Option<&DockWindow> {
        self.tree.window(window)
    }

    /// Mutable access to window geometry and title.
    pub fn window_mut(&mut self, window: WindowId) -> Option<&mut DockWindow> {
        self.tree.window_mut(window)
    }

    // Creation

    pub fn create_document(&mut self, id: impl Into<String>, title: impl Into<String>) -> NodeId {
        self.create(id, title, Kind::Document)
    }

    pub fn create_tool(&mut self, id: impl Into<String>, title: impl Into<String>) -> NodeId {
        self.create(id, title, Kind::Tool)
    }

    pub fn create_document_dock(&mut self, id: impl Into<String>) -> NodeId {
        self.create(
            id,
            "",
            Kind::DocumentDock {
                dock: DockState::default(),
                tabs: TabHost::default(),
            },
        )
    }

    pub fn create_tool_dock(&mut self, id: impl Into<String>, alignment: Alignment) -> NodeId {
        self.create(
            id,
            "",
            Kind::ToolDock {
                dock: DockState::default(),
                tabs: TabHost {
                    alignment,
                    ..TabHost::default()
                },
            },
        )
    }

    pub fn create_proportional_dock(&mut self, id: impl Into<String>, orientation: Orientation) -> NodeId {
        self.create(
            id,
            "",
            Kind::ProportionalDock {
                dock: DockState::default(),
                orientation,
            },
        )
    }

    /// Splitters get a generated id.
    pub fn create_splitter(&mut self) -> NodeId {
        let id = self.generate_id(KindTag::Splitter);
        self.create(id, "", Kind::Splitter(SplitterState::default()))
    }

    /// Root docks are global docking targets unless told otherwise.
    pub fn create_root_dock(&mut self, id: impl Into<String>) -> NodeId {
        self.create(
            id,
            "",
            Kind::RootDock {
                dock: DockState {
                    global_dock_target: true,
                    ..DockState::default()
                },
                root: RootState::default(),
            },
        )
    }

    /// Create a detached window descriptor. Attach a layout with
    /// [`Factory::set_window_layout`] and register it with [`Factory::add_window`].
    pub fn create_dock_window(&mut self, id: impl Into<String>, bounds: Rect) -> WindowId {
        let window = self.tree.insert_window(DockWindow::new(id, bounds));
        tracing::debug!("Created window {}", window);
        window
    }

    /// Create a document through the dock's document template and append it.
    pub fn create_document_in(&mut self, dock: NodeId) -> Option<NodeId> {
        let (template, count) = {
            let tabs = self.tree.get_mut(dock)?.tab_host_mut()?;
            if !tabs.can_create_document {
                return None;
            }
            tabs.created_documents += 1;
            (tabs.document_template.clone(), tabs.created_documents)
        };
        let title = match template {
            Some(template) => template(count),
            None => format!("Document{}", count),
        };
        let id = self.generate_id(KindTag::Document);
        let document = self.create_document(id, title);
        self.add_dockable(dock, document);
        self.set_active_dockable(document);
        Some(document)
    }

    pub(crate) fn create(&mut self, id: impl Into<String>, title: impl Into<String>, kind: Kind) -> NodeId {
        let tag = kind.tag();
        let node = self.tree.insert(Dockable::new(id, title, kind));
        tracing::trace!("Created {} {}", tag, node);
        node
    }

    pub(crate) fn generate_id(&mut self, kind: KindTag) -> String {
        self.generated += 1;
        format!("{}-{}", kind.name(), self.generated)
    }

    pub(crate) fn generate_window_id(&mut self) -> String {
        self.generated += 1;
        format!("{}-{}", crate::locator::WINDOW_KIND, self.generated)
    }

    pub(crate) fn emit(&mut self, event: DockEvent) -> DockEvent {
        self.events.emit(event)
    }

    // Membership primitives. These keep `owner` and the lists in sync but
    // fire no events; public operations report their own.

    /// Remove `node` from its owner's list, keeping `owner` set.
    ///
    /// Reassigns the owner's active dockable when it was `node`.
    pub(crate) fn unlist(&mut self, node: NodeId) -> Option<Slot> {
        let slot = self.tree.slot_of(node)?;
        let was_active = {
            let owner = self.tree.get_mut(slot.owner)?;
            match slot.membership {
                Membership::EdgePinned(edge) => {
                    let root = owner.root_state_mut()?;
                    root.edge_mut(edge).remove(slot.index);
                    if root.pinned_preview == Some(node) {
                        root.pinned_preview = None;
                    }
                    false
                }
                membership => {
                    let dock = owner.dock_mut()?;
                    let list = match membership {
                        Membership::Visible => &mut dock.visible,
                        Membership::Hidden => &mut dock.hidden,
                        _ => &mut dock.pinned,
                    };
                    list.remove(slot.index);
                    dock.active == Some(node)
                }
            }
        };
        if was_active {
            let next = self.pick_active(slot.owner, slot.index);
            if let Some(dock) = self.tree.get_mut(slot.owner).and_then(|d| d.dock_mut()) {
                dock.active = next;
            }
            self.emit(DockEvent::ActiveDockableChanged {
                dock: slot.owner,
                dockable: next,
            });
        }
        Some(slot)
    }

    /// Remove `node` from its owner entirely.
    pub(crate) fn detach(&mut self, node: NodeId) -> Option<Slot> {
        let slot = self.unlist(node)?;
        if let Some(dock) = self.tree.get_mut(slot.owner).and_then(|d| d.dock_mut()) {
            dock.history.forget(node);
        }
        if let Some(dockable) = self.tree.get_mut(node) {
            dockable.owner = None;
        }
        Some(slot)
    }

    /// Insert `node` into one of `dock`'s lists at `index` (clamped) or at the end.
    pub(crate) fn attach(
        &mut self,
        dock: NodeId,
        node: NodeId,
        membership: Membership,
        index: Option<usize>,
    ) -> bool {
        let Some(owner) = self.tree.get_mut(dock) else {
            return false;
        };
        match membership {
            Membership::EdgePinned(edge) => {
                let Some(root) = owner.root_state_mut() else {
                    return false;
                };
                let list = root.edge_mut(edge);
                let at = index.unwrap_or(list.len()).min(list.len());
                list.insert(at, node);
            }
            membership => {
                let Some(state) = owner.dock_mut() else {
                    return false;
                };
                let list = match membership {
                    Membership::Visible => &mut state.visible,
                    Membership::Hidden => &mut state.hidden,
                    _ => &mut state.pinned,
                };
                let at = index.unwrap_or(list.len()).min(list.len());
                list.insert(at, node);
            }
        }
        if let Some(dockable) = self.tree.get_mut(node) {
            dockable.owner = Some(dock);
        }
        true
    }

    /// Nearest content dockable to a removed position, preferring the previous one.
    fn pick_active(&self, dock: NodeId, removed_index: usize) -> Option<NodeId> {
        let visible = self.tree.get(dock)?.visible();
        let split = removed_index.min(visible.len());
        visible[..split]
            .iter()
            .rev()
            .chain(&visible[split..])
            .copied()
            .find(|&n| self.tree.get(n).is_some_and(|d| !d.is_splitter()))
    }

    /// Put `replacement` into the exact slot `node` occupies and detach `node`.
    pub(crate) fn replace_in_owner(&mut self, node: NodeId, replacement: NodeId) -> bool {
        let Some(slot) = self.tree.slot_of(node) else {
            return false;
        };
        let Some(owner) = self.tree.get_mut(slot.owner) else {
            return false;
        };
        let replaced = match slot.membership {
            Membership::EdgePinned(edge) => owner
                .root_state_mut()
                .map(|root| root.edge_mut(edge)[slot.index] = replacement)
                .is_some(),
            membership => owner
                .dock_mut()
                .map(|dock| {
                    let list = match membership {
                        Membership::Visible => &mut dock.visible,
                        Membership::Hidden => &mut dock.hidden,
                        _ => &mut dock.pinned,
                    };
                    list[slot.index] = replacement;
                    if dock.active == Some(node) {
                        dock.active = Some(replacement);
                    }
                    if dock.default == Some(node) {
                        dock.default = Some(replacement);
                    }
                    dock.history.forget(node);
                })
                .is_some(),
        };
        if !replaced {
            return false;
        }
        if let Some(d) = self.tree.get_mut(replacement) {
            d.owner = Some(slot.owner);
        }
        if let Some(d) = self.tree.get_mut(node) {
            d.owner = None;
        }
        true
    }

    /// Drop `node`, its subtree and every window anchored inside it from the arena.
    pub(crate) fn destroy_subtree(&mut self, node: NodeId) -> Vec<NodeId> {
        let nodes = self.tree.descendants(node);
        let windows: Vec<WindowId> = nodes
            .iter()
            .filter_map(|&n| self.tree.get(n).and_then(|d| d.root_state()))
            .flat_map(|root| root.windows.iter().copied())
            .collect();
        for window in windows {
            if let Some(mut removed) = self.tree.remove_window(window) {
                if let Some(host) = removed.host.as_mut() {
                    host.exit();
                }
                self.emit(DockEvent::WindowClosed { window });
            }
        }
        for &n in &nodes {
            self.tree.remove(n);
        }
        nodes
    }

    /// Clear a root's focus when it no longer points inside that root.
    pub(crate) fn repair_focus(&mut self, root: NodeId) {
        let Some(focused) = self.tree.get(root).and_then(|r| r.dock()).and_then(|d| d.focused) else {
            return;
        };
        if self.tree.find_root(focused) == Some(root) && focused != root {
            return;
        }
        if let Some(dock) = self.tree.get_mut(root).and_then(|r| r.dock_mut()) {
            dock.focused = None;
        }
        if let Some(owner) = self.tree.get(focused).and_then(|f| f.owner)
            && let Some(dock) = self.tree.get_mut(owner).and_then(|d| d.dock_mut())
        {
            dock.is_active = false;
        }
        self.emit(DockEvent::FocusedDockableChanged { root, dockable: None });
    }
}
