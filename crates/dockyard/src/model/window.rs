//! Floating window descriptor.

use std::fmt;

use dockyard_core::geometry::Rect;
use dockyard_core::math::Vec2;

use super::id::NodeId;
use crate::window::HostWindow;

/// In-progress interactive move of a window.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WindowDrag {
    /// Unsnapped position accumulated from pointer deltas.
    pub(crate) raw: Vec2,
}

/// A floating window holding an independent root dock.
pub struct DockWindow {
    pub(crate) id: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub title: String,
    pub topmost: bool,
    pub(crate) layout: Option<NodeId>,
    /// Root dock whose `windows` list holds this window.
    pub(crate) owner: Option<NodeId>,
    pub(crate) host: Option<Box<dyn HostWindow>>,
    pub(crate) drag: Option<WindowDrag>,
}

impl fmt::Debug for DockWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DockWindow")
            .field("id", &self.id)
            .field("bounds", &self.bounds())
            .field("title", &self.title)
            .field("topmost", &self.topmost)
            .field("layout", &self.layout)
            .field("owner", &self.owner)
            .field("has_host", &self.host.is_some())
            .finish()
    }
}

impl DockWindow {
    pub(crate) fn new(id: impl Into<String>, bounds: Rect) -> Self {
        Self {
            id: id.into(),
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
            title: String::new(),
            topmost: false,
            layout: None,
            owner: None,
            host: None,
            drag: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn layout(&self) -> Option<NodeId> {
        self.layout
    }

    pub fn owner(&self) -> Option<NodeId> {
        self.owner
    }

    pub fn has_host(&self) -> bool {
        self.host.is_some()
    }

    pub fn host(&self) -> Option<&dyn HostWindow> {
        self.host.as_deref()
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}
