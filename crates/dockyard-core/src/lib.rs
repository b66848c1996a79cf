//! Dockyard Core
//!
//! Shared utilities for the Dockyard docking engine: hash collections, math and
//! geometry primitives, logging setup and profiling scopes.

pub mod alloc;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
