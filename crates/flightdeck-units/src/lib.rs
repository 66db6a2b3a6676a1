//! Display-Unit Conversion for OpenFlightDeck
//!
//! This crate resolves how a raw device value should be rescaled for display,
//! given the user's unit preference (imperial, metric, or the OSD's own unit
//! code) and the unit a form field declares for its setting.
//!
//! # Overview
//!
//! The conversion system is a pure lookup, keyed twice:
//!
//! - **Display selector**: an integer derived from [`UnitPreferences`].
//!   Imperial is selector 0, metric is 1, and OSD mode delegates to the
//!   device's own OSD unit code. A preference of [`UnitSystem::None`]
//!   resolves to no selector at all, which disables conversion entirely.
//! - **Source unit**: the unit the raw value is stored in ([`SourceUnit`]),
//!   e.g. centimeters or centimeters per second.
//!
//! A selector-specific bucket is consulted first, then the default
//! (imperial-style) bucket. A miss means the value passes through unchanged.
//!
//! # Example
//!
//! ```
//! use flightdeck_units::{resolve_conversion, SourceUnit, UnitPreferences};
//!
//! let prefs = UnitPreferences::metric();
//! let entry = resolve_conversion(&prefs, SourceUnit::Cm)
//!     .ok_or("metric table must convert centimeters")?;
//!
//! assert_eq!(entry.unit_name, "m");
//! assert!((250.0 / entry.multiplier - 2.5).abs() < 1e-9);
//! # Ok::<(), &str>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod convert;
pub mod error;
pub mod preferences;

pub use convert::{decimals_for_multiplier, resolve, resolve_conversion, ConversionEntry};
pub use error::UnitError;
pub use preferences::{SourceUnit, UnitPreferences, UnitSystem};
