//! Optimized collection types for Dockyard.
//!
//! Re-exports AHash-backed maps and sets. Locator tables and lookup caches in
//! the engine use these instead of the std SipHash collections.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

/// Type alias for the standard HashMap with AHash for better performance.
pub type AHashMap<K, V> = ahash::AHashMap<K, V>;

/// Type alias for the standard HashSet with AHash for better performance.
pub type AHashSet<T> = ahash::AHashSet<T>;
