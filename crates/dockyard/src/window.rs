//! Host window adapter.
//!
//! A [`DockWindow`](crate::model::DockWindow) describes a floating layout; the
//! concrete OS window behind it is a [`HostWindow`] supplied by the
//! application through the [`HostWindowLocator`](crate::locator::HostWindowLocator).

use dockyard_core::geometry::Rect;
use dockyard_core::math::Vec2;

use crate::event::DockEvent;
use crate::factory::Factory;
use crate::locator::WINDOW_KIND;
use crate::model::{WindowDrag, WindowId};

/// A concrete window implementation.
pub trait HostWindow {
    /// Show the window, modal when `is_dialog` is set.
    fn present(&mut self, is_dialog: bool);

    fn exit(&mut self);

    fn set_position(&mut self, x: f32, y: f32);

    fn position(&self) -> (f32, f32);

    fn set_size(&mut self, width: f32, height: f32);

    fn size(&self) -> (f32, f32);

    fn set_title(&mut self, title: &str);

    fn set_topmost(&mut self, _topmost: bool) {}
}

impl Factory {
    /// Attach a host through the locator if the window has none yet.
    pub(crate) fn ensure_host(&mut self, window: WindowId) -> bool {
        let Some(w) = self.tree.window(window) else {
            return false;
        };
        if w.has_host() {
            return true;
        }
        let Some(host) = self.host_window_locator.resolve(w.id(), WINDOW_KIND) else {
            return false;
        };
        if let Some(w) = self.tree.window_mut(window) {
            w.host = Some(host);
        }
        true
    }

    /// Push descriptor geometry to the host and show it.
    ///
    /// `WindowOpened` fires even when no host is available, so headless
    /// layouts still observe the window lifecycle.
    pub fn present_window(&mut self, window: WindowId, is_dialog: bool) -> bool {
        if self.tree.window(window).is_none() {
            return false;
        }
        self.ensure_host(window);
        if let Some(w) = self.tree.window_mut(window) {
            let (x, y, width, height, topmost) = (w.x, w.y, w.width, w.height, w.topmost);
            let title = w.title.clone();
            if let Some(host) = w.host.as_mut() {
                host.set_position(x, y);
                host.set_size(width, height);
                host.set_title(&title);
                host.set_topmost(topmost);
                host.present(is_dialog);
            }
        }
        tracing::debug!("Presented window {} (dialog: {})", window, is_dialog);
        self.events.emit(DockEvent::WindowOpened { window });
        true
    }

    /// Copy the host's live geometry back into the descriptor.
    pub fn save_window(&mut self, window: WindowId) -> bool {
        let Some(w) = self.tree.window_mut(window) else {
            return false;
        };
        let Some(host) = w.host.as_ref() else {
            return false;
        };
        let (x, y) = host.position();
        let (width, height) = host.size();
        w.x = x;
        w.y = y;
        w.width = width;
        w.height = height;
        true
    }

    /// Save geometry and close the host. The descriptor stays in the tree.
    pub fn exit_window(&mut self, window: WindowId) -> bool {
        self.save_window(window);
        let Some(w) = self.tree.window_mut(window) else {
            return false;
        };
        w.drag = None;
        match w.host.as_mut() {
            Some(host) => {
                host.exit();
                true
            }
            None => false,
        }
    }

    /// Start an interactive move. Returns false if a subscriber cancelled it.
    pub fn begin_window_drag(&mut self, window: WindowId) -> bool {
        let Some(w) = self.tree.window(window) else {
            return false;
        };
        let start = Vec2::new(w.x, w.y);
        let event = self.events.emit(DockEvent::WindowMoveDragBegin {
            window,
            cancel: false,
        });
        if event.is_cancelled() {
            tracing::debug!("Drag of window {} cancelled", window);
            return false;
        }
        if let Some(w) = self.tree.window_mut(window) {
            w.drag = Some(WindowDrag { raw: start });
        }
        true
    }

    /// Apply a pointer delta to a window being moved.
    ///
    /// Returns the new position, snapped to sibling window edges when magnetism
    /// is enabled, or `None` when no drag is in progress.
    pub fn window_drag(&mut self, window: WindowId, delta: Vec2) -> Option<Vec2> {
        let raw = {
            let w = self.tree.window_mut(window)?;
            let drag = w.drag.as_mut()?;
            drag.raw += delta;
            drag.raw
        };
        let position = if self.settings.enable_window_magnetism {
            self.snap_window(window, raw)
        } else {
            raw
        };
        let w = self.tree.window_mut(window)?;
        w.x = position.x;
        w.y = position.y;
        if let Some(host) = w.host.as_mut() {
            host.set_position(position.x, position.y);
        }
        self.events.emit(DockEvent::WindowMoveDrag {
            window,
            x: position.x,
            y: position.y,
        });
        Some(position)
    }

    pub fn end_window_drag(&mut self, window: WindowId) -> bool {
        let Some(w) = self.tree.window_mut(window) else {
            return false;
        };
        if w.drag.take().is_none() {
            return false;
        }
        self.events.emit(DockEvent::WindowMoveDragEnd { window });
        true
    }

    fn snap_window(&self, window: WindowId, raw: Vec2) -> Vec2 {
        let Some(w) = self.tree.window(window) else {
            return raw;
        };
        let moving = Rect::new(raw.x, raw.y, w.width, w.height);
        let siblings: Vec<Rect> = self
            .tree
            .windows()
            .filter(|(id, _)| *id != window)
            .map(|(_, other)| other.bounds())
            .collect();
        snap_to_edges(moving, &siblings, self.settings.window_magnetism_distance)
    }
}

/// Snap `moving` so its edges meet the nearest sibling edge within `distance`.
pub(crate) fn snap_to_edges(moving: Rect, siblings: &[Rect], distance: f32) -> Vec2 {
    let mut best_x: Option<f32> = None;
    let mut best_y: Option<f32> = None;

    let consider = |best: &mut Option<f32>, offset: f32| {
        if offset.abs() <= distance && best.is_none_or(|b| offset.abs() < b.abs()) {
            *best = Some(offset);
        }
    };

    for other in siblings {
        let overlaps_y = moving.y < other.bottom() && moving.bottom() > other.y;
        let overlaps_x = moving.x < other.right() && moving.right() > other.x;
        if overlaps_y {
            consider(&mut best_x, other.right() - moving.x);
            consider(&mut best_x, other.x - moving.right());
            consider(&mut best_x, other.x - moving.x);
            consider(&mut best_x, other.right() - moving.right());
        }
        if overlaps_x {
            consider(&mut best_y, other.bottom() - moving.y);
            consider(&mut best_y, other.y - moving.bottom());
            consider(&mut best_y, other.y - moving.y);
            consider(&mut best_y, other.bottom() - moving.bottom());
        }
    }

    Vec2::new(
        moving.x + best_x.unwrap_or(0.0),
        moving.y + best_y.unwrap_or(0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_right_edge() {
        let sibling = Rect::new(0.0, 0.0, 100.0, 100.0);
        let moving = Rect::new(106.0, 10.0, 50.0, 50.0);
        let snapped = snap_to_edges(moving, &[sibling], 8.0);
        assert_eq!(snapped, Vec2::new(100.0, 10.0));
    }

    #[test]
    fn test_no_snap_outside_distance() {
        let sibling = Rect::new(0.0, 0.0, 100.0, 100.0);
        let moving = Rect::new(130.0, 10.0, 50.0, 50.0);
        let snapped = snap_to_edges(moving, &[sibling], 8.0);
        assert_eq!(snapped, Vec2::new(130.0, 10.0));
    }

    #[test]
    fn test_no_snap_without_overlap() {
        let sibling = Rect::new(0.0, 0.0, 100.0, 100.0);
        let moving = Rect::new(104.0, 300.0, 50.0, 50.0);
        let snapped = snap_to_edges(moving, &[sibling], 8.0);
        assert_eq!(snapped, Vec2::new(104.0, 300.0));
    }
}
