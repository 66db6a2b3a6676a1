//! One-line import for test modules.
//!
//! ```
//! use flightdeck_test_helpers::prelude::*;
//! ```

pub use crate::mock::{MemorySettingsService, RecordingSink};
pub use crate::must::{must, must_some};
