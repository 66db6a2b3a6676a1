//! Port traits for the engine's external collaborators
//!
//! These traits separate the synchronization logic from the transport and
//! rendering infrastructure. The engine never owns a wire protocol or a
//! widget tree; it talks to both through these contracts.

use async_trait::async_trait;
use thiserror::Error;

use flightdeck_settings::{DisplayField, FieldInput, SettingDescriptor, SettingValue};

/// Communication failure reported by the settings service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PortError {
    /// Transient failure of a single fetch or store call.
    ///
    /// The current field records the failure and the pass moves on to the
    /// next field.
    #[error("Settings service error: {0}")]
    Io(String),

    /// Session-level failure.
    ///
    /// The shared device session is gone; the remainder of a load/save pass
    /// is aborted because every further call would fail the same way.
    #[error("Settings session failed: {0}")]
    Fatal(String),
}

impl PortError {
    /// Whether this failure poisons the whole session.
    pub fn is_fatal(&self) -> bool {
        matches!(self, PortError::Fatal(_))
    }
}

/// A descriptor and its current raw value, fetched together.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedSetting {
    /// The catalog shape of the parameter.
    pub descriptor: SettingDescriptor,
    /// The raw stored value at fetch time.
    pub value: SettingValue,
}

/// Settings service abstraction (the device transport).
///
/// Calls are asynchronous and may suspend; the service is a single shared
/// session resource, so the engine never issues concurrent calls against it.
#[async_trait]
pub trait SettingsPort: Send + Sync {
    /// Fetch a setting's descriptor and current value by name.
    ///
    /// `Ok(None)` means the setting does not exist on this device. That is
    /// not an error: the corresponding field is removed from the active
    /// form.
    async fn get_setting(&self, name: &str) -> Result<Option<FetchedSetting>, PortError>;

    /// Store a raw value for a setting by name.
    async fn set_setting(&self, name: &str, value: SettingValue) -> Result<(), PortError>;
}

/// One instruction for the rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRender {
    /// Remove the field (and its container) from the active form.
    Hide,
    /// Populate the field with a decoded display instruction.
    Show(DisplayField),
    /// Wrap the field with a display-unit label (e.g. "m", "mph").
    UnitWrap(&'static str),
}

/// Rendering surface abstraction.
///
/// The sink owns layout and styling; the engine only hands it instructions
/// and reads back the current user-edited state of a field.
pub trait FormSink: Send {
    /// Apply a rendering instruction to a field.
    fn apply(&mut self, field_id: &str, render: FieldRender);

    /// Current user-edited state of a field, if the field holds a value.
    fn read(&self, field_id: &str) -> Option<FieldInput>;
}
