//! Math types used for pointer positions and window coordinates.
//!
//! Re-exports the SIMD-accelerated [`glam`] types. The engine only needs 2D
//! vectors, but the whole crate is re-exported so hosts can share one version.
//!
//! ```
//! use dockyard_core::math::Vec2;
//!
//! let pressed = Vec2::new(10.0, 20.0);
//! let pointer = Vec2::new(13.0, 24.0);
//! assert_eq!((pointer - pressed).length(), 5.0);
//! ```
//!
//! [`glam`]: https://docs.rs/glam

pub mod fast {
    pub use glam::*;
}

pub use fast::*;
