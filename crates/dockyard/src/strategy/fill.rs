use super::{DockError, DockResult, DockStrategy, validate_common};
use crate::event::DockEvent;
use crate::factory::Factory;
use crate::model::{DockOperation, KindTag, NodeId};

/// Tab-join the source into a document or tool dock.
///
/// A leaf joins as a new tab; a tab host source merges all of its visible
/// tabs into the target.
#[derive(Debug, Default, Clone, Copy)]
pub struct FillStrategy;

impl DockStrategy for FillStrategy {
    fn operation(&self) -> DockOperation {
        DockOperation::Fill
    }

    fn validate(
        &self,
        factory: &Factory,
        source: NodeId,
        source_owner: Option<NodeId>,
        target: NodeId,
    ) -> DockResult<()> {
        let (src, tgt) = validate_common(factory, DockOperation::Fill, source, source_owner, target)?;
        let target_tag = tgt.tag();
        if !matches!(target_tag, KindTag::DocumentDock | KindTag::ToolDock) {
            return Err(DockError::NotATabHost);
        }
        if source_owner == Some(target) {
            return Err(DockError::AlreadyInTarget);
        }

        let source_tag = src.tag();
        let cross_kind = factory.settings().allow_cross_kind_fill;
        let compatible = match source_tag {
            KindTag::Document | KindTag::Tool => {
                cross_kind || source_tag.holder_kind() == Some(target_tag)
            }
            KindTag::DocumentDock | KindTag::ToolDock => cross_kind || source_tag == target_tag,
            _ => false,
        };
        if !compatible {
            return Err(DockError::KindMismatch);
        }
        if src.is_dock() && src.visible().is_empty() {
            return Err(DockError::EmptySource);
        }
        Ok(())
    }

    fn apply(&mut self, factory: &mut Factory, source: NodeId, target: NodeId) -> bool {
        let Some(src) = factory.dockable(source) else {
            return false;
        };
        let is_dock = src.is_dock();
        let owner = src.owner();
        let tabs: Vec<NodeId> = src.visible().to_vec();
        let active = src.dock().and_then(|d| d.active);

        factory.emit(DockEvent::DockableUndocked {
            dockable: source,
            operation: DockOperation::Fill,
        });

        if is_dock {
            // Merge every tab, keeping the source's active one active.
            for tab in tabs {
                factory.move_dockable(source, target, tab, None);
            }
            if let Some(active) = active {
                factory.set_active_dockable(active);
            }
        } else {
            let Some(owner) = owner else {
                return false;
            };
            if !factory.move_dockable(owner, target, source, None) {
                return false;
            }
            factory.set_active_dockable(source);
        }

        tracing::debug!("Filled {} into {}", source, target);
        factory.emit(DockEvent::DockableDocked {
            dockable: source,
            target,
            operation: DockOperation::Fill,
        });
        true
    }
}
