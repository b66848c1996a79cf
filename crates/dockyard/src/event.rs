//! Lifecycle events reported by the factory.

use std::collections::VecDeque;

use crate::model::{DockOperation, NodeId, WindowId};

/// Events emitted by the factory for every structural change.
///
/// Variants with a `cancel` field are cancelable: a subscriber sets it to
/// `true` and the factory reads it back right after dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum DockEvent {
    ActiveDockableChanged {
        dock: NodeId,
        dockable: Option<NodeId>,
    },
    FocusedDockableChanged {
        root: NodeId,
        dockable: Option<NodeId>,
    },
    DockableAdded {
        dock: NodeId,
        dockable: NodeId,
    },
    DockableRemoved {
        dock: NodeId,
        dockable: NodeId,
    },
    /// A close was requested. Fired after the dockable's own close hook passed.
    DockableClosing {
        dockable: NodeId,
        cancel: bool,
    },
    /// The dockable and its subtree were destroyed; only the string id remains.
    DockableClosed {
        dockable: NodeId,
        id: String,
    },
    DockableMoved {
        source: NodeId,
        target: NodeId,
        dockable: NodeId,
    },
    DockableDocked {
        dockable: NodeId,
        target: NodeId,
        operation: DockOperation,
    },
    DockableUndocked {
        dockable: NodeId,
        operation: DockOperation,
    },
    DockableSwapped {
        first: NodeId,
        second: NodeId,
    },
    DockablePinned {
        dockable: NodeId,
    },
    DockableUnpinned {
        dockable: NodeId,
    },
    DockableHidden {
        dockable: NodeId,
    },
    DockableRestored {
        dockable: NodeId,
    },
    WindowOpened {
        window: WindowId,
    },
    WindowClosing {
        window: WindowId,
        cancel: bool,
    },
    WindowClosed {
        window: WindowId,
    },
    WindowAdded {
        window: WindowId,
        root: NodeId,
    },
    WindowRemoved {
        window: WindowId,
        root: NodeId,
    },
    /// Setting `cancel` aborts the move before any position change.
    WindowMoveDragBegin {
        window: WindowId,
        cancel: bool,
    },
    WindowMoveDrag {
        window: WindowId,
        x: f32,
        y: f32,
    },
    WindowMoveDragEnd {
        window: WindowId,
    },
}

impl DockEvent {
    /// Stable variant name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            DockEvent::ActiveDockableChanged { .. } => "ActiveDockableChanged",
            DockEvent::FocusedDockableChanged { .. } => "FocusedDockableChanged",
            DockEvent::DockableAdded { .. } => "DockableAdded",
            DockEvent::DockableRemoved { .. } => "DockableRemoved",
            DockEvent::DockableClosing { .. } => "DockableClosing",
            DockEvent::DockableClosed { .. } => "DockableClosed",
            DockEvent::DockableMoved { .. } => "DockableMoved",
            DockEvent::DockableDocked { .. } => "DockableDocked",
            DockEvent::DockableUndocked { .. } => "DockableUndocked",
            DockEvent::DockableSwapped { .. } => "DockableSwapped",
            DockEvent::DockablePinned { .. } => "DockablePinned",
            DockEvent::DockableUnpinned { .. } => "DockableUnpinned",
            DockEvent::DockableHidden { .. } => "DockableHidden",
            DockEvent::DockableRestored { .. } => "DockableRestored",
            DockEvent::WindowOpened { .. } => "WindowOpened",
            DockEvent::WindowClosing { .. } => "WindowClosing",
            DockEvent::WindowClosed { .. } => "WindowClosed",
            DockEvent::WindowAdded { .. } => "WindowAdded",
            DockEvent::WindowRemoved { .. } => "WindowRemoved",
            DockEvent::WindowMoveDragBegin { .. } => "WindowMoveDragBegin",
            DockEvent::WindowMoveDrag { .. } => "WindowMoveDrag",
            DockEvent::WindowMoveDragEnd { .. } => "WindowMoveDragEnd",
        }
    }

    /// Check if a subscriber cancelled this event.
    pub fn is_cancelled(&self) -> bool {
        match self {
            DockEvent::DockableClosing { cancel, .. }
            | DockEvent::WindowClosing { cancel, .. }
            | DockEvent::WindowMoveDragBegin { cancel, .. } => *cancel,
            _ => false,
        }
    }

    /// Cancel a cancelable event. Other variants are left untouched.
    pub fn cancel(&mut self) {
        match self {
            DockEvent::DockableClosing { cancel, .. }
            | DockEvent::WindowClosing { cancel, .. }
            | DockEvent::WindowMoveDragBegin { cancel, .. } => *cancel = true,
            _ => {}
        }
    }

    pub fn is_cancelable(&self) -> bool {
        matches!(
            self,
            DockEvent::DockableClosing { .. }
                | DockEvent::WindowClosing { .. }
                | DockEvent::WindowMoveDragBegin { .. }
        )
    }
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&mut DockEvent)>;

/// Explicit subscription list dispatching [`DockEvent`]s in registration order.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
    history: VecDeque<DockEvent>,
    history_limit: usize,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .field("history", &self.history.len())
            .field("history_limit", &self.history_limit)
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the last `limit` dispatched events. Zero disables history.
    pub fn with_history(limit: usize) -> Self {
        Self {
            history_limit: limit,
            ..Self::default()
        }
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&mut DockEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns false when the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Dispatch to every subscriber and hand the event back so cancel flags can be read.
    pub fn emit(&mut self, mut event: DockEvent) -> DockEvent {
        tracing::trace!("Dispatching {}", event.name());
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&mut event);
        }
        if self.history_limit > 0 {
            if self.history.len() == self.history_limit {
                self.history.pop_front();
            }
            self.history.push_back(event.clone());
        }
        event
    }

    pub fn history(&self) -> impl Iterator<Item = &DockEvent> {
        self.history.iter()
    }

    /// Drain the recorded history.
    pub fn drain_history(&mut self) -> impl Iterator<Item = DockEvent> + '_ {
        self.history.drain(..)
    }

    pub fn set_history_limit(&mut self, limit: usize) {
        self.history_limit = limit;
        while self.history.len() > limit {
            self.history.pop_front();
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
