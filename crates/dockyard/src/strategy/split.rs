use super::{DockError, DockResult, DockStrategy, validate_common};
use crate::event::DockEvent;
use crate::factory::Factory;
use crate::model::{DockOperation, KindTag, Membership, NodeId};

/// Split the target along one edge.
///
/// The target is replaced in its parent by a new proportional dock holding
/// `[holder, splitter, target]` (Left/Top) or `[target, splitter, holder]`
/// (Right/Bottom), where `holder` is the source itself when it is a dock or a
/// new dock of the matching kind wrapping a leaf source.
#[derive(Debug, Clone, Copy)]
pub struct SplitStrategy {
    operation: DockOperation,
    proportion: Option<f64>,
}

impl SplitStrategy {
    /// `operation` must be one of Left, Right, Top or Bottom.
    pub fn new(operation: DockOperation) -> Self {
        Self {
            operation,
            proportion: None,
        }
    }

    /// Share of the new content, overriding the configured default.
    pub fn with_proportion(mut self, proportion: f64) -> Self {
        self.proportion = Some(proportion.clamp(0.0, 1.0));
        self
    }

    /// Wrap a leaf in a fresh dock of its holder kind.
    fn make_holder(&self, factory: &mut Factory, source: NodeId) -> Option<NodeId> {
        let tag = factory.dockable(source)?.tag();
        let holder = match tag.holder_kind()? {
            KindTag::ToolDock => {
                let id = factory.generate_id(KindTag::ToolDock);
                factory.create_tool_dock(id, self.operation.alignment())
            }
            _ => {
                let id = factory.generate_id(KindTag::DocumentDock);
                factory.create_document_dock(id)
            }
        };
        factory.attach(holder, source, Membership::Visible, None);
        Some(holder)
    }
}

impl DockStrategy for SplitStrategy {
    fn operation(&self) -> DockOperation {
        self.operation
    }

    fn validate(
        &self,
        factory: &Factory,
        source: NodeId,
        source_owner: Option<NodeId>,
        target: NodeId,
    ) -> DockResult<()> {
        if !self.operation.is_split() {
            return Err(DockError::Rejected);
        }
        let (src, tgt) = validate_common(factory, self.operation, source, source_owner, target)?;
        if tgt.is_root() {
            return Err(DockError::SplitRoot);
        }
        if tgt.owner().is_none() {
            return Err(DockError::NodeNotFound(target));
        }
        if source_owner == Some(target) && factory.tree().content_count(target) <= 1 {
            return Err(DockError::SplitOnlyChild);
        }
        if !src.is_dock() && src.tag().holder_kind().is_none() {
            return Err(DockError::KindMismatch);
        }
        Ok(())
    }

    fn apply(&mut self, factory: &mut Factory, source: NodeId, target: NodeId) -> bool {
        let Some(orientation) = self.operation.split_orientation() else {
            return false;
        };
        let Some(src) = factory.dockable(source) else {
            return false;
        };
        let source_is_dock = src.is_dock();
        let root = factory.find_root(source);
        let share = self
            .proportion
            .unwrap_or(factory.settings().default_split_proportion);

        factory.emit(DockEvent::DockableUndocked {
            dockable: source,
            operation: self.operation,
        });
        let Some(old) = factory.detach(source) else {
            return false;
        };
        factory.emit(DockEvent::DockableRemoved {
            dock: old.owner,
            dockable: source,
        });
        factory.rebalance(old.owner);

        let holder = if source_is_dock {
            source
        } else {
            match self.make_holder(factory, source) {
                Some(holder) => holder,
                None => return false,
            }
        };
        if !source_is_dock
            && let Some(dock) = factory.dockable_mut(holder).and_then(|h| h.dock_mut())
        {
            dock.active = Some(source);
        }
        if let Some(d) = factory.dockable_mut(holder) {
            d.set_proportion(share);
            // Pinned or hidden origins no longer apply once docked elsewhere.
            d.origin = None;
        }

        let id = factory.generate_id(KindTag::ProportionalDock);
        let split = factory.create_proportional_dock(id, orientation);
        let target_proportion = factory.dockable(target).map(|t| t.proportion()).unwrap_or(f64::NAN);
        if !factory.replace_in_owner(target, split) {
            return false;
        }
        if let Some(d) = factory.dockable_mut(split) {
            d.set_proportion(target_proportion);
        }
        if let Some(d) = factory.dockable_mut(target) {
            d.set_proportion(1.0 - share);
        }

        let splitter = factory.create_splitter();
        let children = if self.operation.is_before() {
            [holder, splitter, target]
        } else {
            [target, splitter, holder]
        };
        for child in children {
            factory.attach(split, child, Membership::Visible, None);
        }
        if let Some(dock) = factory.dockable_mut(split).and_then(|d| d.dock_mut()) {
            dock.active = Some(holder);
        }

        factory.collapse_dock(old.owner);
        if source_is_dock {
            factory.set_active_dockable(holder);
        } else {
            factory.set_active_dockable(source);
        }
        if let Some(root) = root {
            factory.repair_focus(root);
        }

        tracing::debug!(
            "Split {} {:?} of {} ({} / {})",
            source,
            self.operation,
            target,
            share,
            1.0 - share
        );
        factory.emit(DockEvent::DockableDocked {
            dockable: source,
            target,
            operation: self.operation,
        });
        true
    }
}
