//! String-keyed factory maps resolving host objects during layout wiring.

use dockyard_core::alloc::HashMap;

use crate::model::{Context, KindTag};
use crate::window::HostWindow;

/// Maps a dockable id or kind name to a constructor.
///
/// Resolution order is id, then kind name, then the default constructor.
pub struct Locator<T> {
    entries: HashMap<String, Box<dyn Fn() -> T>>,
    default: Option<Box<dyn Fn() -> T>>,
}

impl<T> Default for Locator<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::default(),
            default: None,
        }
    }
}

impl<T> std::fmt::Debug for Locator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Locator")
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .field("has_default", &self.default.is_some())
            .finish()
    }
}

impl<T> Locator<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor for an id or a kind name such as `"Document"`.
    pub fn register(&mut self, key: impl Into<String>, make: impl Fn() -> T + 'static) {
        self.entries.insert(key.into(), Box::new(make));
    }

    pub fn with(mut self, key: impl Into<String>, make: impl Fn() -> T + 'static) -> Self {
        self.register(key, make);
        self
    }

    pub fn set_default(&mut self, make: impl Fn() -> T + 'static) {
        self.default = Some(Box::new(make));
    }

    pub fn unregister(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.default.is_none()
    }

    /// Resolve by `id`, then by `kind`, then the default constructor.
    pub fn resolve(&self, id: &str, kind: &str) -> Option<T> {
        self.entries
            .get(id)
            .or_else(|| self.entries.get(kind))
            .or(self.default.as_ref())
            .map(|make| make())
    }
}

/// Resolves the opaque context of a dockable.
pub type ContextLocator = Locator<Context>;

/// Resolves the concrete host behind a floating window.
pub type HostWindowLocator = Locator<Box<dyn HostWindow>>;

/// Key used for window hosts when no id-specific entry exists.
pub const WINDOW_KIND: &str = "DockWindow";

impl ContextLocator {
    /// Resolve the context for a dockable of the given kind.
    pub fn resolve_for(&self, id: &str, kind: KindTag) -> Option<Context> {
        self.resolve(id, kind.name())
    }
}
