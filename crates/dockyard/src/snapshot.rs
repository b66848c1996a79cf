//! Persisted layout shape.
//!
//! A snapshot is a nested tree of records tagged by a `"$type"` discriminator.
//! Owners, contexts, hooks and focus flags are not stored; references between
//! dockables (active, default, focused, pin origins) are stored by string id
//! and resolved on import, after which [`Factory::init_layout`] re-derives the
//! rest.

use dockyard_core::alloc::HashMap;
use dockyard_core::geometry::Rect;
use serde::{Deserialize, Serialize};

use crate::factory::Factory;
use crate::model::{
    Alignment, DockOperationMask, DockState, DockWindow, Dockable, DockableFlags, Kind, KindTag,
    NodeId, Orientation, Origin, RootState, SplitterState, TabHost, WindowId,
};
use crate::serializer::SerializerError;

pub const LAYOUT_SCHEMA_VERSION: u16 = 1;

fn default_schema_version() -> u16 {
    LAYOUT_SCHEMA_VERSION
}

fn yes() -> bool {
    true
}

/// A whole persisted layout: one main root and, through it, its windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    #[serde(default = "default_schema_version")]
    pub schema_version: u16,
    pub root: DockableSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockableSnapshot {
    /// One of the [`KindTag`] names.
    #[serde(rename = "$type")]
    pub kind: String,
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Absent means unset (NaN in the live tree).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proportion: Option<f64>,
    #[serde(default)]
    pub flags: DockableFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<OriginSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dock: Option<DockSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tabs: Option<TabsSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<RootSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub splitter: Option<SplitterSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginSnapshot {
    pub dock: String,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockSnapshot {
    #[serde(default)]
    pub visible: Vec<DockableSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hidden: Vec<DockableSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pinned: Vec<DockableSnapshot>,
    #[serde(default)]
    pub active: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focused: Option<String>,
    #[serde(default = "yes")]
    pub is_collapsable: bool,
    #[serde(default)]
    pub allowed_operations: DockOperationMask,
    #[serde(default)]
    pub global_dock_target: bool,
}

impl Default for DockSnapshot {
    fn default() -> Self {
        Self {
            visible: Vec::new(),
            hidden: Vec::new(),
            pinned: Vec::new(),
            active: None,
            default: None,
            focused: None,
            is_collapsable: true,
            allowed_operations: DockOperationMask::ALL,
            global_dock_target: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabsSnapshot {
    #[serde(default)]
    pub can_create_document: bool,
    #[serde(default)]
    pub alignment: Alignment,
    #[serde(default)]
    pub auto_hide: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootSnapshot {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub left_pinned: Vec<DockableSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub right_pinned: Vec<DockableSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_pinned: Vec<DockableSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bottom_pinned: Vec<DockableSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub windows: Vec<WindowSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitterSnapshot {
    #[serde(default = "yes")]
    pub can_resize: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSnapshot {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub topmost: bool,
    pub layout: Box<DockableSnapshot>,
}

/// Id references collected while building, resolved once every node exists.
#[derive(Default)]
struct Import {
    ids: HashMap<String, NodeId>,
    created: Vec<NodeId>,
    windows: Vec<WindowId>,
    refs: Vec<(NodeId, References)>,
}

struct References {
    active: Option<String>,
    default: Option<String>,
    focused: Option<String>,
    origin: Option<OriginSnapshot>,
}

impl Import {
    fn resolve(&self, id: &Option<String>) -> Option<NodeId> {
        id.as_ref().and_then(|id| self.ids.get(id).copied())
    }
}

impl Factory {
    /// Capture `root` and every window anchored on it.
    pub fn export_layout(&self, root: NodeId) -> Option<LayoutSnapshot> {
        if !self.tree.get(root)?.is_root() {
            return None;
        }
        Some(LayoutSnapshot {
            schema_version: LAYOUT_SCHEMA_VERSION,
            root: self.snapshot_of(root)?,
        })
    }

    /// Rebuild a layout from a snapshot and initialize it. Returns the new root.
    ///
    /// On error nothing is left behind in the tree.
    pub fn import_layout(&mut self, snapshot: &LayoutSnapshot) -> Result<NodeId, SerializerError> {
        let mut import = Import::default();
        let result = self.import_root(&snapshot.root, &mut import);
        match result {
            Ok(root) => {
                self.resolve_references(&import);
                self.init_layout(root);
                tracing::debug!(
                    "Imported layout {} ({} dockables, {} windows)",
                    root,
                    import.created.len(),
                    import.windows.len()
                );
                Ok(root)
            }
            Err(e) => {
                for window in import.windows {
                    self.tree.remove_window(window);
                }
                for node in import.created {
                    self.tree.remove(node);
                }
                tracing::warn!("Layout import failed: {}", e);
                Err(e)
            }
        }
    }

    fn import_root(
        &mut self,
        snapshot: &DockableSnapshot,
        import: &mut Import,
    ) -> Result<NodeId, SerializerError> {
        let root = self.import_node(snapshot, import)?;
        if !self.tree.get(root).is_some_and(|r| r.is_root()) {
            return Err(SerializerError::InvalidLayout(format!(
                "top-level dockable '{}' is a {}, expected a RootDock",
                snapshot.id, snapshot.kind
            )));
        }
        Ok(root)
    }

    fn snapshot_of(&self, node: NodeId) -> Option<DockableSnapshot> {
        let d = self.tree.get(node)?;
        let id_of = |n: Option<NodeId>| n.and_then(|n| self.tree.get(n)).map(|d| d.id.clone());
        let list = |nodes: &[NodeId]| -> Vec<DockableSnapshot> {
            nodes.iter().filter_map(|&n| self.snapshot_of(n)).collect()
        };

        let dock = d.dock().map(|state| DockSnapshot {
            visible: list(&state.visible),
            hidden: list(&state.hidden),
            pinned: list(&state.pinned),
            active: id_of(state.active),
            default: id_of(state.default),
            focused: id_of(state.focused),
            is_collapsable: state.is_collapsable,
            allowed_operations: state.allowed_operations,
            global_dock_target: state.global_dock_target,
        });
        let tabs = d.tab_host().map(|tabs| TabsSnapshot {
            can_create_document: tabs.can_create_document,
            alignment: tabs.alignment,
            auto_hide: tabs.auto_hide,
        });
        let root = d.root_state().map(|root| RootSnapshot {
            left_pinned: list(&root.left_pinned),
            right_pinned: list(&root.right_pinned),
            top_pinned: list(&root.top_pinned),
            bottom_pinned: list(&root.bottom_pinned),
            windows: root
                .windows
                .iter()
                .filter_map(|&w| {
                    let window = self.tree.window(w)?;
                    Some(WindowSnapshot {
                        id: window.id.clone(),
                        x: window.x,
                        y: window.y,
                        width: window.width,
                        height: window.height,
                        title: window.title.clone(),
                        topmost: window.topmost,
                        layout: Box::new(self.snapshot_of(window.layout?)?),
                    })
                })
                .collect(),
        });

        Some(DockableSnapshot {
            kind: d.tag().name().to_string(),
            id: d.id.clone(),
            title: d.title.clone(),
            proportion: (!d.proportion.is_nan()).then_some(d.proportion),
            flags: d.flags,
            origin: d.origin.and_then(|o| {
                Some(OriginSnapshot {
                    dock: self.tree.get(o.dock)?.id.clone(),
                    index: o.index,
                })
            }),
            dock,
            tabs,
            orientation: d.orientation(),
            root,
            splitter: d.splitter().map(|s| SplitterSnapshot {
                can_resize: s.can_resize,
            }),
        })
    }

    fn import_node(
        &mut self,
        snapshot: &DockableSnapshot,
        import: &mut Import,
    ) -> Result<NodeId, SerializerError> {
        let tag = KindTag::from_name(&snapshot.kind)
            .ok_or_else(|| SerializerError::UnknownKind(snapshot.kind.clone()))?;
        let dock_snapshot = snapshot.dock.clone().unwrap_or_default();
        let tabs = snapshot.tabs.clone().unwrap_or_default();
        let state = DockState {
            is_collapsable: dock_snapshot.is_collapsable,
            allowed_operations: dock_snapshot.allowed_operations,
            global_dock_target: dock_snapshot.global_dock_target,
            ..DockState::default()
        };
        let tab_host = TabHost {
            can_create_document: tabs.can_create_document,
            alignment: tabs.alignment,
            auto_hide: tabs.auto_hide,
            ..TabHost::default()
        };

        let kind = match tag {
            KindTag::Document => Kind::Document,
            KindTag::Tool => Kind::Tool,
            KindTag::Splitter => Kind::Splitter(SplitterState {
                can_resize: snapshot.splitter.as_ref().is_none_or(|s| s.can_resize),
            }),
            KindTag::DocumentDock => Kind::DocumentDock {
                dock: state,
                tabs: tab_host,
            },
            KindTag::ToolDock => Kind::ToolDock {
                dock: state,
                tabs: tab_host,
            },
            KindTag::ProportionalDock => Kind::ProportionalDock {
                dock: state,
                orientation: snapshot.orientation.ok_or_else(|| {
                    SerializerError::InvalidLayout(format!(
                        "proportional dock '{}' has no orientation",
                        snapshot.id
                    ))
                })?,
            },
            KindTag::RootDock => Kind::RootDock {
                dock: state,
                root: RootState::default(),
            },
        };

        let mut dockable = Dockable::new(snapshot.id.clone(), snapshot.title.clone(), kind);
        dockable.proportion = snapshot.proportion.unwrap_or(f64::NAN);
        dockable.flags = snapshot.flags;
        let node = self.tree.insert(dockable);
        import.created.push(node);
        import.ids.entry(snapshot.id.clone()).or_insert(node);
        import.refs.push((
            node,
            References {
                active: dock_snapshot.active.clone(),
                default: dock_snapshot.default.clone(),
                focused: dock_snapshot.focused.clone(),
                origin: snapshot.origin.clone(),
            },
        ));

        if !tag.is_dock() {
            return Ok(node);
        }

        let visible = self.import_list(node, &dock_snapshot.visible, import)?;
        let hidden = self.import_list(node, &dock_snapshot.hidden, import)?;
        let pinned = self.import_list(node, &dock_snapshot.pinned, import)?;
        if let Some(state) = self.tree.get_mut(node).and_then(|d| d.dock_mut()) {
            state.visible = visible;
            state.hidden = hidden;
            state.pinned = pinned;
        }

        if tag == KindTag::RootDock
            && let Some(root) = &snapshot.root
        {
            let left = self.import_list(node, &root.left_pinned, import)?;
            let right = self.import_list(node, &root.right_pinned, import)?;
            let top = self.import_list(node, &root.top_pinned, import)?;
            let bottom = self.import_list(node, &root.bottom_pinned, import)?;
            let mut windows = Vec::with_capacity(root.windows.len());
            for window in &root.windows {
                windows.push(self.import_window(node, window, import)?);
            }
            if let Some(state) = self.tree.get_mut(node).and_then(|d| d.root_state_mut()) {
                state.left_pinned = left;
                state.right_pinned = right;
                state.top_pinned = top;
                state.bottom_pinned = bottom;
                state.windows = windows;
            }
        }
        Ok(node)
    }

    fn import_list(
        &mut self,
        owner: NodeId,
        snapshots: &[DockableSnapshot],
        import: &mut Import,
    ) -> Result<Vec<NodeId>, SerializerError> {
        let mut nodes = Vec::with_capacity(snapshots.len());
        for snapshot in snapshots {
            let child = self.import_node(snapshot, import)?;
            if let Some(d) = self.tree.get_mut(child) {
                d.owner = Some(owner);
            }
            nodes.push(child);
        }
        Ok(nodes)
    }

    fn import_window(
        &mut self,
        root: NodeId,
        snapshot: &WindowSnapshot,
        import: &mut Import,
    ) -> Result<WindowId, SerializerError> {
        let layout = self.import_root(&snapshot.layout, import)?;
        let bounds = Rect::new(snapshot.x, snapshot.y, snapshot.width, snapshot.height);
        let window = self.tree.insert_window(DockWindow::new(snapshot.id.clone(), bounds));
        import.windows.push(window);
        if let Some(w) = self.tree.window_mut(window) {
            w.title = snapshot.title.clone();
            w.topmost = snapshot.topmost;
            w.layout = Some(layout);
            w.owner = Some(root);
        }
        Ok(window)
    }

    /// Resolve id references; dangling ids are dropped.
    fn resolve_references(&mut self, import: &Import) {
        for (node, refs) in &import.refs {
            let active = import.resolve(&refs.active);
            let default = import.resolve(&refs.default);
            let focused = import.resolve(&refs.focused);
            let origin = refs.origin.as_ref().and_then(|o| {
                Some(Origin {
                    dock: *import.ids.get(&o.dock)?,
                    index: o.index,
                })
            });
            let Some(d) = self.tree.get_mut(*node) else {
                continue;
            };
            d.origin = origin;
            let is_root = d.is_root();
            if let Some(state) = d.dock_mut() {
                state.active = active.filter(|n| state.visible.contains(n));
                state.default = default.filter(|n| state.visible.contains(n));
                if is_root {
                    state.focused = focused;
                }
            }
        }
    }
}
