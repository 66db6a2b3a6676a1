//! In-memory mock implementations of the engine's ports.
//!
//! [`MemorySettingsService`] is a HashMap-backed settings service with
//! per-name failure injection and a recorded write log; [`RecordingSink`]
//! is a rendering surface that remembers every instruction and echoes shown
//! values back as field inputs, so save-after-load behaves like an untouched
//! form until a test scripts an edit with [`RecordingSink::type_into`].

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::Mutex;

use flightdeck_engine::ports::{FetchedSetting, FieldRender, FormSink, PortError, SettingsPort};
use flightdeck_settings::{DisplayField, FieldInput, SettingDescriptor, SettingValue};

#[derive(Default)]
struct ServiceState {
    catalog: HashMap<String, FetchedSetting>,
    failing: HashSet<String>,
    fatal: bool,
    writes: Vec<(String, SettingValue)>,
}

/// HashMap-backed settings service for tests.
#[derive(Default)]
pub struct MemorySettingsService {
    state: Mutex<ServiceState>,
}

impl MemorySettingsService {
    /// Empty service knowing no settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a setting the device "has".
    pub fn insert(&self, descriptor: SettingDescriptor, value: impl Into<SettingValue>) {
        let mut state = self.state.lock();
        state.catalog.insert(
            descriptor.name.clone(),
            FetchedSetting {
                descriptor,
                value: value.into(),
            },
        );
    }

    /// Make every call touching `name` fail transiently.
    pub fn fail_on(&self, name: &str) {
        self.state.lock().failing.insert(name.to_string());
    }

    /// Make every further call fail with a session-level error.
    pub fn fail_fatally(&self) {
        self.state.lock().fatal = true;
    }

    /// Every write the engine performed, in order.
    pub fn writes(&self) -> Vec<(String, SettingValue)> {
        self.state.lock().writes.clone()
    }

    /// Current stored value of a setting, if the device has it.
    pub fn value_of(&self, name: &str) -> Option<SettingValue> {
        self.state
            .lock()
            .catalog
            .get(name)
            .map(|fetched| fetched.value.clone())
    }

    fn check_failures(state: &ServiceState, name: &str) -> Result<(), PortError> {
        if state.fatal {
            return Err(PortError::Fatal("injected session failure".to_string()));
        }
        if state.failing.contains(name) {
            return Err(PortError::Io(format!("injected failure for '{name}'")));
        }
        Ok(())
    }
}

#[async_trait]
impl SettingsPort for MemorySettingsService {
    async fn get_setting(&self, name: &str) -> Result<Option<FetchedSetting>, PortError> {
        let state = self.state.lock();
        Self::check_failures(&state, name)?;
        Ok(state.catalog.get(name).cloned())
    }

    async fn set_setting(&self, name: &str, value: SettingValue) -> Result<(), PortError> {
        let mut state = self.state.lock();
        Self::check_failures(&state, name)?;
        if let Some(fetched) = state.catalog.get_mut(name) {
            fetched.value = value.clone();
        }
        state.writes.push((name.to_string(), value));
        Ok(())
    }
}

/// Rendering sink that records instructions and scripts user input.
#[derive(Debug, Default)]
pub struct RecordingSink {
    applied: Vec<(String, FieldRender)>,
    inputs: HashMap<String, FieldInput>,
}

impl RecordingSink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a user edit into a field.
    pub fn type_into(&mut self, field_id: &str, input: FieldInput) {
        self.inputs.insert(field_id.to_string(), input);
    }

    /// Every instruction applied, in order.
    pub fn applied(&self) -> &[(String, FieldRender)] {
        &self.applied
    }

    /// Ids that received a `Hide` instruction.
    pub fn hidden(&self) -> Vec<&str> {
        self.applied
            .iter()
            .filter(|(_, render)| *render == FieldRender::Hide)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// The most recent `Show` instruction for a field.
    pub fn last_shown(&self, field_id: &str) -> Option<&DisplayField> {
        self.applied.iter().rev().find_map(|(id, render)| match render {
            FieldRender::Show(display) if id == field_id => Some(display),
            _ => None,
        })
    }

    /// The unit label a field was wrapped with, if any.
    pub fn unit_wrap(&self, field_id: &str) -> Option<&'static str> {
        self.applied.iter().rev().find_map(|(id, render)| match render {
            FieldRender::UnitWrap(name) if id == field_id => Some(*name),
            _ => None,
        })
    }

    fn echo(display: &DisplayField) -> Option<FieldInput> {
        match display {
            DisplayField::Number { value, .. } => Some(FieldInput::Number(*value)),
            DisplayField::Text { value } => Some(FieldInput::Text(value.clone())),
            DisplayField::Checkbox { checked } => Some(FieldInput::Checked(*checked)),
            DisplayField::Select { options } => options
                .iter()
                .find(|option| option.selected)
                .map(|option| FieldInput::SelectedIndex(option.index)),
        }
    }
}

impl FormSink for RecordingSink {
    fn apply(&mut self, field_id: &str, render: FieldRender) {
        match &render {
            FieldRender::Hide => {
                self.inputs.remove(field_id);
            }
            FieldRender::Show(display) => {
                if let Some(input) = Self::echo(display) {
                    self.inputs.insert(field_id.to_string(), input);
                }
            }
            FieldRender::UnitWrap(_) => {}
        }
        self.applied.push((field_id.to_string(), render));
    }

    fn read(&self, field_id: &str) -> Option<FieldInput> {
        self.inputs.get(field_id).cloned()
    }
}
