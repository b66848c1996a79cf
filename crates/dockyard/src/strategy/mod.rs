//! One mutation strategy per [`DockOperation`].
//!
//! A strategy first validates a (source, target) pair and, when asked to
//! commit, rewrites the tree. Dry runs (`commit = false`) never mutate and
//! drive the drop preview of the docking engine.

mod fill;
mod split;
mod window;

pub use fill::FillStrategy;
pub use split::SplitStrategy;
pub use window::WindowStrategy;

use crate::factory::Factory;
use crate::model::{Dockable, DockOperation, NodeId};

/// Reasons a strategy rejects a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockError {
    /// Node not found in the tree.
    NodeNotFound(NodeId),
    /// The given source owner is not the source's actual owner.
    OwnerMismatch,
    /// Source and target are the same dockable.
    SelfDrop,
    /// The target lies inside the source.
    TargetInsideSource,
    /// Roots and splitters never move.
    Immovable,
    /// The target is not a dock.
    TargetNotDock,
    /// The target's allowed operations exclude this one.
    OperationNotAllowed(DockOperation),
    CannotDrag,
    CannotDrop,
    CannotFloat,
    /// Fill needs a document or tool dock.
    NotATabHost,
    /// Documents fill document docks and tools fill tool docks.
    KindMismatch,
    /// The source already sits in the target.
    AlreadyInTarget,
    /// A tab host source with no visible tabs has nothing to merge.
    EmptySource,
    /// Splitting a dock by its only child changes nothing.
    SplitOnlyChild,
    /// Roots cannot be wrapped in a proportional dock.
    SplitRoot,
    /// `DockOperation::None`.
    Rejected,
}

impl std::fmt::Display for DockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DockError::NodeNotFound(id) => write!(f, "Node {} not found", id),
            DockError::OwnerMismatch => write!(f, "Source owner does not match"),
            DockError::SelfDrop => write!(f, "Cannot drop a dockable onto itself"),
            DockError::TargetInsideSource => write!(f, "Target is inside the source"),
            DockError::Immovable => write!(f, "Roots and splitters cannot be moved"),
            DockError::TargetNotDock => write!(f, "Target is not a dock"),
            DockError::OperationNotAllowed(op) => write!(f, "Target does not allow {:?}", op),
            DockError::CannotDrag => write!(f, "Source cannot be dragged"),
            DockError::CannotDrop => write!(f, "Target does not accept drops"),
            DockError::CannotFloat => write!(f, "Source cannot float"),
            DockError::NotATabHost => write!(f, "Target is not a document or tool dock"),
            DockError::KindMismatch => write!(f, "Source kind does not match the target"),
            DockError::AlreadyInTarget => write!(f, "Source is already in the target"),
            DockError::EmptySource => write!(f, "Source has no visible tabs"),
            DockError::SplitOnlyChild => write!(f, "Cannot split a dock by its only child"),
            DockError::SplitRoot => write!(f, "Cannot split a root dock"),
            DockError::Rejected => write!(f, "Drop rejected"),
        }
    }
}

impl std::error::Error for DockError {}

/// Result type for strategy validation.
pub type DockResult<T> = Result<T, DockError>;

/// A tree rewrite for one drop operation.
pub trait DockStrategy {
    fn operation(&self) -> DockOperation;

    /// Check that the drop is legal without touching the tree.
    fn validate(
        &self,
        factory: &Factory,
        source: NodeId,
        source_owner: Option<NodeId>,
        target: NodeId,
    ) -> DockResult<()>;

    /// Rewrite the tree. Only called after `validate` succeeded.
    fn apply(&mut self, factory: &mut Factory, source: NodeId, target: NodeId) -> bool;

    /// Validate and, with `commit`, apply. Returns whether the drop is (or was) possible.
    fn execute(
        &mut self,
        factory: &mut Factory,
        source: NodeId,
        source_owner: Option<NodeId>,
        target: NodeId,
        commit: bool,
    ) -> bool {
        if let Err(e) = self.validate(factory, source, source_owner, target) {
            tracing::trace!("{:?} of {} onto {} rejected: {}", self.operation(), source, target, e);
            return false;
        }
        if !commit {
            return true;
        }
        self.apply(factory, source, target)
    }
}

/// Always rejects.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoneStrategy;

impl DockStrategy for NoneStrategy {
    fn operation(&self) -> DockOperation {
        DockOperation::None
    }

    fn validate(&self, _: &Factory, _: NodeId, _: Option<NodeId>, _: NodeId) -> DockResult<()> {
        Err(DockError::Rejected)
    }

    fn apply(&mut self, _: &mut Factory, _: NodeId, _: NodeId) -> bool {
        false
    }
}

/// The default strategy for an operation.
pub fn strategy_for(operation: DockOperation) -> Box<dyn DockStrategy> {
    match operation {
        DockOperation::None => Box::new(NoneStrategy),
        DockOperation::Fill => Box::new(FillStrategy),
        DockOperation::Window => Box::new(WindowStrategy::new(None)),
        split => Box::new(SplitStrategy::new(split)),
    }
}

/// Checks shared by every strategy.
pub(crate) fn validate_common(
    factory: &Factory,
    operation: DockOperation,
    source: NodeId,
    source_owner: Option<NodeId>,
    target: NodeId,
) -> DockResult<(&Dockable, &Dockable)> {
    let tree = factory.tree();
    let src = tree.get(source).ok_or(DockError::NodeNotFound(source))?;
    let tgt = tree.get(target).ok_or(DockError::NodeNotFound(target))?;

    if src.owner().is_none() || src.owner() != source_owner {
        return Err(DockError::OwnerMismatch);
    }
    if source == target {
        return Err(DockError::SelfDrop);
    }
    if src.is_root() || src.is_splitter() {
        return Err(DockError::Immovable);
    }
    if tree.is_ancestor_or_self(source, target) {
        return Err(DockError::TargetInsideSource);
    }
    let Some(state) = tgt.dock() else {
        return Err(DockError::TargetNotDock);
    };
    if !state.allowed_operations.allows(operation) {
        return Err(DockError::OperationNotAllowed(operation));
    }
    if !src.can_drag() {
        return Err(DockError::CannotDrag);
    }
    if operation == DockOperation::Window {
        if !src.can_float() {
            return Err(DockError::CannotFloat);
        }
    } else if !tgt.can_drop() {
        return Err(DockError::CannotDrop);
    }
    Ok((src, tgt))
}
