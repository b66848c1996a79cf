//! Vetoable close protocol for dockables and windows.
//!
//! A close runs in three steps so the caller may keep using the factory
//! while an asynchronous veto is pending:
//!
//! 1. [`Factory::request_close`] evaluates the synchronous vetoes (close
//!    hooks, then the cancelable event). Only if those pass is the async
//!    handler invoked.
//! 2. [`CloseTicket::resolve`] awaits the async handler, or returns at once
//!    when the outcome was already decided.
//! 3. [`Factory::complete_close`] re-validates the target and tears it down.
//!
//! An async handler that fails should resolve to `true` (cancel); the
//! factory does not catch panics inside handler futures.

use std::rc::Rc;

use futures_lite::future::{self, BoxedLocal};

use super::Factory;
use crate::event::DockEvent;
use crate::model::{DockWindow, Dockable, NodeId, WindowId};

/// Async veto for dockable closes. Resolves to `true` to cancel.
pub type DockableClosingHandler = Rc<dyn Fn(&Dockable) -> BoxedLocal<bool>>;

/// Async veto for window closes. Resolves to `true` to cancel.
pub type WindowClosingHandler = Rc<dyn Fn(&DockWindow) -> BoxedLocal<bool>>;

/// What a close request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTarget {
    Dockable(NodeId),
    Window(WindowId),
}

enum Veto {
    Decided { cancel: bool },
    Pending(BoxedLocal<bool>),
}

/// An in-flight close request.
#[must_use = "a close ticket does nothing until resolved and completed"]
pub struct CloseTicket {
    target: CloseTarget,
    id: String,
    veto: Veto,
}

impl std::fmt::Debug for CloseTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloseTicket")
            .field("target", &self.target)
            .field("id", &self.id)
            .field("pending", &self.is_pending())
            .finish()
    }
}

impl CloseTicket {
    pub fn target(&self) -> CloseTarget {
        self.target
    }

    /// Check if the outcome still depends on the async handler.
    pub fn is_pending(&self) -> bool {
        matches!(self.veto, Veto::Pending(_))
    }

    /// Synchronous short-circuit. Hands the ticket back while it is pending.
    pub fn try_resolve(self) -> Result<CloseDecision, CloseTicket> {
        match self.veto {
            Veto::Decided { cancel } => Ok(CloseDecision {
                target: self.target,
                id: self.id,
                cancel,
            }),
            Veto::Pending(_) => Err(self),
        }
    }

    /// Await the async handler, if any.
    pub async fn resolve(self) -> CloseDecision {
        let cancel = match self.veto {
            Veto::Decided { cancel } => cancel,
            Veto::Pending(pending) => pending.await,
        };
        CloseDecision {
            target: self.target,
            id: self.id,
            cancel,
        }
    }

    /// Resolve on the current thread, blocking only when a handler is pending.
    pub fn resolve_blocking(self) -> CloseDecision {
        match self.try_resolve() {
            Ok(decision) => decision,
            Err(ticket) => future::block_on(ticket.resolve()),
        }
    }
}

/// Final outcome of the veto chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseDecision {
    target: CloseTarget,
    id: String,
    cancel: bool,
}

impl CloseDecision {
    pub fn target(&self) -> CloseTarget {
        self.target
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel
    }
}

impl Factory {
    pub fn set_dockable_closing_async(&mut self, handler: Option<DockableClosingHandler>) {
        self.dockable_closing = handler;
    }

    pub fn set_window_closing_async(&mut self, handler: Option<WindowClosingHandler>) {
        self.window_closing = handler;
    }

    /// Start closing a dockable.
    ///
    /// Returns `None` when the dockable does not exist, cannot close, or is a
    /// window layout (close the window instead).
    pub fn request_close(&mut self, dockable: NodeId) -> Option<CloseTicket> {
        let node = self.tree.get(dockable)?;
        if !node.can_close() || self.tree.window_of_layout(dockable).is_some() {
            return None;
        }
        let id = node.id.clone();
        let target = CloseTarget::Dockable(dockable);

        if !self.close_hooks_pass(dockable) {
            tracing::debug!("Close of {} vetoed by a close hook", dockable);
            return Some(CloseTicket {
                target,
                id,
                veto: Veto::Decided { cancel: true },
            });
        }
        let event = self.emit(DockEvent::DockableClosing {
            dockable,
            cancel: false,
        });
        if event.is_cancelled() {
            tracing::debug!("Close of {} cancelled by a subscriber", dockable);
            return Some(CloseTicket {
                target,
                id,
                veto: Veto::Decided { cancel: true },
            });
        }

        let veto = match (&self.dockable_closing, self.tree.get(dockable)) {
            (Some(handler), Some(node)) => Veto::Pending(handler(node)),
            _ => Veto::Decided { cancel: false },
        };
        Some(CloseTicket { target, id, veto })
    }

    /// Start closing a window. Its layout's close hooks run first.
    pub fn request_window_close(&mut self, window: WindowId) -> Option<CloseTicket> {
        let w = self.tree.window(window)?;
        let id = w.id.clone();
        let layout = w.layout;
        let target = CloseTarget::Window(window);

        if let Some(layout) = layout
            && !self.close_hooks_pass(layout)
        {
            tracing::debug!("Close of window {} vetoed by a close hook", window);
            return Some(CloseTicket {
                target,
                id,
                veto: Veto::Decided { cancel: true },
            });
        }
        let event = self.emit(DockEvent::WindowClosing {
            window,
            cancel: false,
        });
        if event.is_cancelled() {
            tracing::debug!("Close of window {} cancelled by a subscriber", window);
            return Some(CloseTicket {
                target,
                id,
                veto: Veto::Decided { cancel: true },
            });
        }

        let veto = match (&self.window_closing, self.tree.window(window)) {
            (Some(handler), Some(w)) => Veto::Pending(handler(w)),
            _ => Veto::Decided { cancel: false },
        };
        Some(CloseTicket { target, id, veto })
    }

    /// Apply a close decision. Returns false when cancelled or when the target
    /// was removed or replaced while the decision was pending.
    pub fn complete_close(&mut self, decision: CloseDecision) -> bool {
        if decision.cancel {
            return false;
        }
        match decision.target {
            CloseTarget::Dockable(dockable) => {
                if self.tree.get(dockable).is_none_or(|d| d.id != decision.id) {
                    tracing::warn!("Close target {} vanished before completion", dockable);
                    return false;
                }
                if self.tree.get(dockable).is_some_and(|d| d.owner.is_some()) {
                    self.remove_dockable(dockable, true);
                }
                self.destroy_subtree(dockable);
                tracing::debug!("Closed {} ({})", dockable, decision.id);
                self.emit(DockEvent::DockableClosed {
                    dockable,
                    id: decision.id,
                });
                true
            }
            CloseTarget::Window(window) => {
                if self.tree.window(window).is_none_or(|w| w.id != decision.id) {
                    tracing::warn!("Close target {} vanished before completion", window);
                    return false;
                }
                self.discard_window(window);
                true
            }
        }
    }

    /// Close a dockable through the full protocol.
    ///
    /// Blocks on the async handler only when one is registered and the
    /// synchronous vetoes passed.
    pub fn close_dockable(&mut self, dockable: NodeId) -> bool {
        let Some(ticket) = self.request_close(dockable) else {
            return false;
        };
        let decision = ticket.resolve_blocking();
        self.complete_close(decision)
    }

    pub async fn close_dockable_async(&mut self, dockable: NodeId) -> bool {
        let Some(ticket) = self.request_close(dockable) else {
            return false;
        };
        let decision = ticket.resolve().await;
        self.complete_close(decision)
    }

    pub fn close_window(&mut self, window: WindowId) -> bool {
        let Some(ticket) = self.request_window_close(window) else {
            return false;
        };
        let decision = ticket.resolve_blocking();
        self.complete_close(decision)
    }

    pub async fn close_window_async(&mut self, window: WindowId) -> bool {
        let Some(ticket) = self.request_window_close(window) else {
            return false;
        };
        let decision = ticket.resolve().await;
        self.complete_close(decision)
    }

    /// Close every visible sibling of `dockable`. Returns how many closed.
    pub fn close_other_dockables(&mut self, dockable: NodeId) -> usize {
        self.close_siblings(dockable, |index, at| index != at)
    }

    /// Close every visible dockable of `dockable`'s owner, itself included.
    pub fn close_all_dockables(&mut self, dockable: NodeId) -> usize {
        self.close_siblings(dockable, |_, _| true)
    }

    /// Close the visible siblings before `dockable`.
    pub fn close_left_dockables(&mut self, dockable: NodeId) -> usize {
        self.close_siblings(dockable, |index, at| index < at)
    }

    /// Close the visible siblings after `dockable`.
    pub fn close_right_dockables(&mut self, dockable: NodeId) -> usize {
        self.close_siblings(dockable, |index, at| index > at)
    }

    fn close_siblings(&mut self, dockable: NodeId, select: impl Fn(usize, usize) -> bool) -> usize {
        let Some(owner) = self.tree.get(dockable).and_then(|d| d.owner) else {
            return 0;
        };
        let Some(visible) = self.tree.get(owner).map(|o| o.visible().to_vec()) else {
            return 0;
        };
        let Some(at) = visible.iter().position(|&n| n == dockable) else {
            return 0;
        };
        let targets: Vec<NodeId> = visible
            .into_iter()
            .enumerate()
            .filter(|&(index, n)| {
                select(index, at) && self.tree.get(n).is_some_and(|d| !d.is_splitter())
            })
            .map(|(_, n)| n)
            .collect();
        targets
            .into_iter()
            .filter(|&n| self.close_dockable(n))
            .count()
    }

    /// Run the close hook of `node` and of everything it owns; all must allow.
    pub(crate) fn close_hooks_pass(&self, node: NodeId) -> bool {
        self.tree
            .descendants(node)
            .into_iter()
            .all(|n| self.tree.get(n).is_none_or(|d| d.on_close()))
    }
}
