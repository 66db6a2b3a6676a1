//! OpenFlightDeck Settings Engine
//!
//! This crate drives the synchronization between a device's settings catalog
//! and a dynamic user-facing form. It sits between two ports: the settings
//! service that fetches and stores a parameter by name, and the rendering
//! sink that displays field instructions and reports user edits.
//!
//! # Architecture
//!
//! - [`ports`]: the contracts for the external collaborators
//!   ([`ports::SettingsPort`], [`ports::FormSink`]).
//! - [`binding`]: per-field orchestration (descriptor fetch, value decode,
//!   unit conversion, field population, and the inverse save path).
//! - [`sync`]: whole-form load/save over an ordered field list, strictly
//!   sequential because the settings service is a single shared session.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use flightdeck_engine::prelude::*;
//! use flightdeck_units::UnitPreferences;
//!
//! # async fn run(service: Arc<dyn SettingsPort>, sink: &mut dyn FormSink) -> Result<(), SyncError> {
//! let engine = SyncEngine::new(service);
//! let mut fields = vec![
//!     FieldBinding::new("rth-altitude", "nav_rth_altitude").with_unit(SourceUnit::Cm),
//!     FieldBinding::new("craft-name", "craft_name"),
//! ];
//!
//! // Snapshot the unit preference once per cycle; never cache it across cycles.
//! let prefs = UnitPreferences::metric();
//! let report = engine.load_all(&mut fields, sink, &prefs).await?;
//! assert_eq!(report.outcomes.len(), fields.len());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]

pub mod binding;
pub mod ports;
pub mod prelude;
pub mod sync;

pub use binding::{FieldBinding, FieldState, FormBinding};
pub use ports::{FetchedSetting, FieldRender, FormSink, PortError, SettingsPort};
pub use sync::{FieldOutcome, SyncEngine, SyncError, SyncFailure, SyncReport};
