use dockyard_core::geometry::Rect;
use dockyard_core::math::Vec2;
use dockyard_core::profiling::{profile_function, profile_scope};

use super::drag::DragManager;
use super::drop_zone::DropZoneDetector;
use crate::factory::Factory;
use crate::model::{DockOperation, NodeId};
use crate::settings::{DockSettings, GlobalDockingPreset};
use crate::strategy::{DockStrategy, WindowStrategy, strategy_for};

/// Where the drag gesture is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Pointer down on a dockable, minimum distance not yet exceeded.
    Pending,
    /// Dragging, but not over a valid target.
    Started,
    /// Dragging over a valid target; a pending drop is recorded.
    Over,
    Dropped,
    Cancelled,
}

/// What the host's visual surface reports under the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DockHit {
    /// Topmost bound dockable. A leaf resolves to its owning dock.
    pub dockable: NodeId,
    /// Local adorner geometry, if the hit control shows one.
    pub adorner: Option<Rect>,
}

/// Hit testing against the host's visual surface.
pub trait VisualHitTester {
    fn hit_test(&self, point: Vec2) -> Option<DockHit>;

    /// Screen bounds of a dock, used for global adorners.
    fn bounds(&self, dock: NodeId) -> Option<Rect>;
}

/// Which adorner produced a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropScope {
    Local,
    Global,
}

/// A validated drop recorded during `drag_over`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingDrop {
    pub source: NodeId,
    pub source_owner: NodeId,
    pub target: NodeId,
    pub operation: DockOperation,
    pub scope: DropScope,
    /// Where the dropped content would appear.
    pub preview: Option<Rect>,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    target: NodeId,
    operation: DockOperation,
    preview: Option<Rect>,
}

/// Resolves pointer positions during a drag into a target and operation.
#[derive(Debug)]
pub struct DockingEngine {
    settings: DockSettings,
    local: DropZoneDetector,
    global: DropZoneDetector,
    drag: DragManager,
    phase: DragPhase,
    pending: Option<PendingDrop>,
}

impl Default for DockingEngine {
    fn default() -> Self {
        Self::new(DockSettings::default())
    }
}

impl DockingEngine {
    pub fn new(settings: DockSettings) -> Self {
        Self {
            local: DropZoneDetector::new().with_edge_threshold(settings.edge_threshold),
            global: DropZoneDetector::edges_only(settings.global_edge_threshold),
            settings,
            drag: DragManager::new(),
            phase: DragPhase::Idle,
            pending: None,
        }
    }

    pub fn settings(&self) -> &DockSettings {
        &self.settings
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn pending(&self) -> Option<&PendingDrop> {
        self.pending.as_ref()
    }

    pub fn source(&self) -> Option<NodeId> {
        self.drag.drag_state().map(|s| s.source)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Pointer pressed on `source`. Fails for roots, splitters, detached
    /// dockables and dockables that cannot be dragged.
    pub fn begin_drag(&mut self, factory: &Factory, source: NodeId, point: Vec2) -> bool {
        let Some(node) = factory.dockable(source) else {
            return false;
        };
        let Some(owner) = node.owner() else {
            return false;
        };
        if node.is_root() || node.is_splitter() || !node.can_drag() {
            return false;
        }
        self.drag.start(source, owner, point);
        self.pending = None;
        self.phase = DragPhase::Pending;
        tracing::debug!("Drag pending on {}", source);
        true
    }

    /// Pointer moved. Returns the pending drop, if the pointer is over a
    /// valid target.
    pub fn drag_over(
        &mut self,
        factory: &mut Factory,
        hit_tester: &dyn VisualHitTester,
        point: Vec2,
    ) -> Option<PendingDrop> {
        profile_function!();

        if !self.drag.update(point, &self.settings) {
            return None;
        }
        let state = self.drag.drag_state()?;
        let (source, source_owner) = (state.source, state.source_owner);
        if self.phase == DragPhase::Pending {
            tracing::debug!("Drag started on {}", source);
        }

        self.pending = {
            profile_scope!("resolve_drop_target");
            self.resolve(factory, hit_tester, source, source_owner, point)
        };
        self.phase = if self.pending.is_some() {
            DragPhase::Over
        } else {
            DragPhase::Started
        };
        if let Some(pending) = &self.pending {
            tracing::trace!(
                "Drag over {:?}: {:?} onto {} ({:?})",
                point,
                pending.operation,
                pending.target,
                pending.scope
            );
        }
        self.pending
    }

    /// Pointer released. Commits the pending drop, if any.
    pub fn drop(&mut self, factory: &mut Factory) -> bool {
        profile_function!();

        self.drag.end_drag();
        let Some(pending) = self.pending.take() else {
            self.phase = DragPhase::Cancelled;
            tracing::debug!("Drop with no valid target");
            return false;
        };

        let mut strategy = Self::strategy(&pending);
        let done = strategy.execute(
            factory,
            pending.source,
            Some(pending.source_owner),
            pending.target,
            true,
        );
        self.phase = if done {
            DragPhase::Dropped
        } else {
            DragPhase::Cancelled
        };
        if done {
            tracing::debug!(
                "Dropped {} {:?} onto {}",
                pending.source,
                pending.operation,
                pending.target
            );
        } else {
            tracing::warn!(
                "Drop of {} {:?} onto {} failed",
                pending.source,
                pending.operation,
                pending.target
            );
        }
        done
    }

    /// Abort the drag. No strategy runs.
    pub fn cancel(&mut self) {
        if self.drag.end_drag().is_some() {
            tracing::debug!("Drag cancelled");
        }
        self.pending = None;
        self.phase = DragPhase::Cancelled;
    }

    fn strategy(pending: &PendingDrop) -> Box<dyn DockStrategy> {
        match pending.operation {
            DockOperation::Window => Box::new(WindowStrategy::new(pending.preview)),
            op => strategy_for(op),
        }
    }

    fn resolve(
        &self,
        factory: &mut Factory,
        hit_tester: &dyn VisualHitTester,
        source: NodeId,
        source_owner: NodeId,
        point: Vec2,
    ) -> Option<PendingDrop> {
        let hit = hit_tester.hit_test(point);
        let local = self.local_candidate(factory, hit, source_owner, point);
        let global = match hit {
            Some(hit) if self.settings.enable_global_docking => {
                self.global_candidate(factory, hit_tester, hit, point)
            }
            _ => None,
        };
        let has_adorner = hit.is_some_and(|h| h.adorner.is_some());
        let tears_off = local.is_some_and(|l| l.operation == DockOperation::Window);

        let (chosen, scope) = match global {
            None => (local, DropScope::Local),
            Some(_) if self.settings.global_docking_preset == GlobalDockingPreset::GlobalFirst => {
                (global, DropScope::Global)
            }
            Some(_) if !has_adorner || tears_off => (global, DropScope::Global),
            Some(_) => (local, DropScope::Local),
        };
        let chosen = chosen?;

        let pending = PendingDrop {
            source,
            source_owner,
            target: chosen.target,
            operation: chosen.operation,
            scope,
            preview: chosen.preview,
        };
        let mut strategy = Self::strategy(&pending);
        strategy
            .execute(factory, source, Some(source_owner), chosen.target, false)
            .then_some(pending)
    }

    /// Local operation from the hit control's adorner zones.
    ///
    /// No hit at all tears the source off into a window. A hit whose adorner
    /// does not contain the pointer does the same; a hit without an adorner
    /// has no local operation.
    fn local_candidate(
        &self,
        factory: &Factory,
        hit: Option<DockHit>,
        source_owner: NodeId,
        point: Vec2,
    ) -> Option<Candidate> {
        let tear_off = Candidate {
            target: source_owner,
            operation: DockOperation::Window,
            preview: Some(self.window_preview(point)),
        };
        let Some(hit) = hit else {
            return Some(tear_off);
        };
        let adorner = hit.adorner?;
        let target = Self::dock_for(factory, hit.dockable)?;
        let allowed = factory.dockable(target)?.dock()?.allowed_operations;
        match self.local.detect_allowed(point, adorner, allowed) {
            Some(DockOperation::None) => None,
            Some(operation) => Some(Candidate {
                target,
                operation,
                preview: Some(self.local.preview_bounds(operation, adorner)),
            }),
            None => Some(tear_off),
        }
    }

    /// Global operation from the innermost global docking target above the hit.
    fn global_candidate(
        &self,
        factory: &Factory,
        hit_tester: &dyn VisualHitTester,
        hit: DockHit,
        point: Vec2,
    ) -> Option<Candidate> {
        let tree = factory.tree();
        let scope = std::iter::once(hit.dockable)
            .chain(tree.ancestors(hit.dockable))
            .find(|n| {
                tree.get(*n)
                    .and_then(|d| d.dock())
                    .is_some_and(|d| d.global_dock_target)
            })?;
        let bounds = hit_tester.bounds(scope)?;
        let node = tree.get(scope)?;
        let state = node.dock()?;
        let operation = self
            .global
            .detect_allowed(point, bounds, state.allowed_operations)
            .filter(|op| op.is_split())?;

        // A root cannot be split; split its content instead.
        let target = if node.is_root() {
            state.active().or_else(|| {
                state
                    .visible()
                    .iter()
                    .copied()
                    .find(|n| tree.get(*n).is_some_and(|c| !c.is_splitter()))
            })?
        } else {
            scope
        };

        Some(Candidate {
            target,
            operation,
            preview: Some(self.global.preview_bounds(operation, bounds)),
        })
    }

    /// The dock a hit resolves to: the hit itself, or a leaf's owner.
    fn dock_for(factory: &Factory, node: NodeId) -> Option<NodeId> {
        let d = factory.dockable(node)?;
        if d.is_dock() { Some(node) } else { d.owner() }
    }

    fn window_preview(&self, point: Vec2) -> Rect {
        let size = self.settings.default_window_size;
        Rect::new(point.x, point.y, size.x, size.y)
    }
}
