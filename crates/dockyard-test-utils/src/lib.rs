//! Test utilities for Dockyard.
//!
//! - [`MockHosts`] hands out host windows that record every call, so tests can
//!   check what the factory asked the windowing layer to do.
//! - [`MockHitTester`] is a scripted visual surface for drag resolution.
//! - [`fixtures`] builds the canned layouts used across tests and benches.
//!
//! # Example
//!
//! ```rust
//! use dockyard::Factory;
//! use dockyard_test_utils::{MockHosts, fixtures};
//!
//! let mut factory = Factory::new();
//! let hosts = MockHosts::new();
//! hosts.install(&mut factory);
//!
//! let layout = fixtures::tool_layout(&mut factory);
//! let window = factory.float_dockable(layout.tool2, None).unwrap();
//!
//! assert!(factory.window(window).unwrap().has_host());
//! assert_eq!(hosts.count_presents(), 1);
//! ```
//!
//! # Design
//!
//! Mocks use `parking_lot::Mutex` behind an `Arc` for interior mutability:
//! the factory owns the boxed hosts while the test keeps a handle to the
//! shared call log.

pub mod fixtures;
pub mod mock_hit;
pub mod mock_host;

pub use mock_hit::MockHitTester;
pub use mock_host::{HostCall, MockHostWindow, MockHosts};
