use dockyard_core::geometry::Rect;
use dockyard_core::math::Vec2;

use super::{DockError, DockResult, DockStrategy, validate_common};
use crate::event::DockEvent;
use crate::factory::Factory;
use crate::model::{Alignment, DockOperation, KindTag, Membership, NodeId, WindowId};

/// Tear the source off into a floating window.
///
/// The window's layout is a new root dock holding the source, wrapped in a
/// new dock of the matching kind when the source is a leaf. The window is
/// anchored on the main root the source belonged to.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowStrategy {
    placement: Option<Rect>,
    created: Option<WindowId>,
}

impl WindowStrategy {
    pub fn new(placement: Option<Rect>) -> Self {
        Self {
            placement,
            created: None,
        }
    }

    /// Window created by the last committed execution.
    pub fn created_window(&self) -> Option<WindowId> {
        self.created
    }

    /// Default placement: offset from the window hosting the source, if any.
    fn default_bounds(factory: &Factory, source_root: Option<NodeId>) -> Rect {
        let settings = factory.settings();
        let anchor = source_root
            .and_then(|root| factory.tree().window_of_layout(root))
            .and_then(|w| factory.window(w))
            .map(|w| Vec2::new(w.x, w.y))
            .unwrap_or(Vec2::ZERO);
        let position = anchor + settings.default_window_offset;
        Rect::new(
            position.x,
            position.y,
            settings.default_window_size.x,
            settings.default_window_size.y,
        )
    }
}

impl DockStrategy for WindowStrategy {
    fn operation(&self) -> DockOperation {
        DockOperation::Window
    }

    fn validate(
        &self,
        factory: &Factory,
        source: NodeId,
        source_owner: Option<NodeId>,
        target: NodeId,
    ) -> DockResult<()> {
        let (src, _) = validate_common(factory, DockOperation::Window, source, source_owner, target)?;
        if factory.tree().host_root(source).is_none() {
            return Err(DockError::NodeNotFound(source));
        }
        if !src.is_dock() && src.tag().holder_kind().is_none() {
            return Err(DockError::KindMismatch);
        }
        Ok(())
    }

    fn apply(&mut self, factory: &mut Factory, source: NodeId, _target: NodeId) -> bool {
        let Some(src) = factory.dockable(source) else {
            return false;
        };
        let tag = src.tag();
        let title = src.title().to_string();
        let source_root = factory.find_root(source);
        let Some(host_root) = factory.tree().host_root(source) else {
            return false;
        };
        let bounds = self
            .placement
            .unwrap_or_else(|| Self::default_bounds(factory, source_root));

        factory.emit(DockEvent::DockableUndocked {
            dockable: source,
            operation: DockOperation::Window,
        });
        let Some(old) = factory.detach(source) else {
            return false;
        };
        factory.emit(DockEvent::DockableRemoved {
            dock: old.owner,
            dockable: source,
        });
        factory.rebalance(old.owner);

        let holder = match tag.holder_kind() {
            Some(KindTag::ToolDock) => {
                let id = factory.generate_id(KindTag::ToolDock);
                let holder = factory.create_tool_dock(id, Alignment::Unset);
                factory.attach(holder, source, Membership::Visible, None);
                holder
            }
            Some(_) => {
                let id = factory.generate_id(KindTag::DocumentDock);
                let holder = factory.create_document_dock(id);
                factory.attach(holder, source, Membership::Visible, None);
                holder
            }
            None => source,
        };
        if let Some(d) = factory.dockable_mut(source) {
            d.origin = None;
        }

        let id = factory.generate_id(KindTag::RootDock);
        let layout = factory.create_root_dock(id);
        factory.attach(layout, holder, Membership::Visible, None);
        if let Some(dock) = factory.dockable_mut(layout).and_then(|d| d.dock_mut()) {
            dock.active = Some(holder);
        }

        let id = factory.generate_window_id();
        let window = factory.create_dock_window(id, bounds);
        if let Some(w) = factory.window_mut(window) {
            w.title = title;
        }
        factory.set_window_layout(window, layout);
        factory.add_window(host_root, window);

        factory.collapse_dock(old.owner);
        if holder != source {
            factory.set_active_dockable(source);
        } else if let Some(first) = factory
            .dockable(source)
            .and_then(|d| d.dock())
            .and_then(|d| d.active)
        {
            factory.set_focused_dockable(layout, Some(first));
        }
        if let Some(root) = source_root {
            factory.repair_focus(root);
        }

        factory.present_window(window, false);
        tracing::debug!("Floated {} into window {}", source, window);
        factory.emit(DockEvent::DockableDocked {
            dockable: source,
            target: layout,
            operation: DockOperation::Window,
        });
        self.created = Some(window);
        true
    }
}
