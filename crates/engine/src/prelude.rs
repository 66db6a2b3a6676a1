//! Prelude module for common engine types
//!
//! Import everything a host typically needs to wire a settings form:
//!
//! ```
//! use flightdeck_engine::prelude::*;
//! ```

pub use crate::binding::{FieldBinding, FieldState, FormBinding};
pub use crate::ports::{FetchedSetting, FieldRender, FormSink, PortError, SettingsPort};
pub use crate::sync::{FieldOutcome, SyncEngine, SyncError, SyncFailure, SyncReport};

pub use flightdeck_settings::{
    DisplayField, FieldFormat, FieldInput, Localizer, NoLocalizer, SelectOption,
    SettingDescriptor, SettingKind, SettingValue, ValueTable,
};
pub use flightdeck_units::{SourceUnit, UnitPreferences, UnitSystem};
