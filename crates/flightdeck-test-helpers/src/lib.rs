//! Shared test utilities for OpenFlightDeck.
//!
//! This crate provides common test helpers and mock ports to reduce code
//! duplication across the test suite.
//!
//! # Modules
//!
//! - [`mod@must`] - Panic helpers that keep failure locations on the test line
//! - [`mock`] - In-memory implementations of the engine's ports
//! - [`prelude`] - Convenience re-exports
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! flightdeck-test-helpers = { path = "crates/flightdeck-test-helpers" }
//! ```
//!
//! Then import the prelude:
//!
//! ```rust,ignore
//! use flightdeck_test_helpers::prelude::*;
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::unwrap_used, clippy::panic)]

pub mod mock;
pub mod must;
pub mod prelude;

pub use mock::{MemorySettingsService, RecordingSink};
pub use must::{must, must_some};
