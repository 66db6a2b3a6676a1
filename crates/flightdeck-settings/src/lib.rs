//! Setting descriptors and the display-value codec
//!
//! This crate holds the catalog shape of one device parameter
//! ([`SettingDescriptor`]) and the codec that turns a raw stored value into a
//! rendering instruction for a form field, and a user-edited field value back
//! into a raw stored value.
//!
//! The codec is pure: the asynchronous fetch/store of settings lives behind
//! ports in `flightdeck-engine`, and this crate never talks to a device.
//!
//! # Example
//!
//! ```
//! use flightdeck_settings::{
//!     decode_for_display, DisplayField, FieldFormat, NoLocalizer, SettingDescriptor,
//!     SettingValue,
//! };
//!
//! let descriptor = SettingDescriptor::numeric("nav_wp_radius", 10.0, 10_000.0);
//! let raw = SettingValue::Number(250.0);
//!
//! let field = decode_for_display(&descriptor, &raw, &FieldFormat::default(), &NoLocalizer)?;
//! match field {
//!     DisplayField::Number { value, decimals, .. } => {
//!         assert_eq!(value, 250.0);
//!         assert_eq!(decimals, 0);
//!     }
//!     other => panic!("expected a number field, got {other:?}"),
//! }
//! # Ok::<(), flightdeck_settings::SettingsError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]

pub mod codec;
pub mod types;
pub mod validation;

pub use codec::{
    apply_conversion, decode_for_display, encode_for_storage, DisplayField, FieldFormat,
    FieldInput, SelectOption,
};
pub use types::{
    Localizer, NoLocalizer, SettingDescriptor, SettingKind, SettingValue, ValueTable,
};
pub use validation::validate_descriptor;

use thiserror::Error;

/// Error type for descriptor validation and value coding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// A raw or edited value did not match the descriptor's kind.
    #[error("Type mismatch for setting '{name}': expected {expected}")]
    TypeMismatch {
        /// Name of the offending setting.
        name: String,
        /// What the descriptor's kind called for.
        expected: &'static str,
    },

    /// A descriptor failed structural validation.
    #[error("Invalid descriptor '{name}': {reason}")]
    InvalidDescriptor {
        /// Name of the offending setting.
        name: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// A specialized `Result` type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
