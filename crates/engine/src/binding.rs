//! Per-field binding and the load/save pipeline
//!
//! A [`FieldBinding`] is the static declaration of one form field (which
//! setting it edits, what unit the schema declares, display hints) plus the
//! runtime state attached during a render cycle. [`FormBinding`] runs the
//! per-field pipeline: descriptor fetch, value decode, unit conversion,
//! field population, and the inverse on save.

use std::sync::Arc;

use tracing::debug;

use flightdeck_settings::{
    apply_conversion, decode_for_display, encode_for_storage, validate_descriptor, FieldFormat,
    Localizer, NoLocalizer, SettingDescriptor, SettingKind, SettingValue,
};
use flightdeck_units::{resolve_conversion, SourceUnit, UnitPreferences};

use crate::ports::{FieldRender, FormSink, SettingsPort};
use crate::sync::SyncError;

/// Lifecycle of one field within a render cycle.
///
/// `Unbound → Loading → {Hidden | Bound}`. Saving does not transition state
/// (it is idempotent and repeatable on a bound field), and `Hidden` is
/// terminal for the cycle. Teardown returns the field to `Unbound`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldState {
    /// No load has run yet, or the form was torn down.
    Unbound,
    /// A load is in flight.
    Loading,
    /// The setting is unavailable on this device; the field left the form.
    Hidden,
    /// Loaded and editable.
    Bound {
        /// The descriptor fetched for this cycle.
        descriptor: SettingDescriptor,
        /// Multiplier attached during load, consumed during save.
        active_multiplier: f64,
    },
}

/// Declaration and runtime state of one form field.
///
/// Bindings are statically declared by the caller in document order; the
/// engine takes a sequence, it never scans a live widget tree.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldBinding {
    /// Identifier the rendering sink knows this field by.
    pub id: String,
    /// Name of the setting this field edits.
    pub setting_name: String,
    /// Unit tag from the form schema; absent means no conversion applies.
    pub declared_unit: Option<SourceUnit>,
    /// Display hints (checkbox rendering, step, explicit multiplier).
    pub format: FieldFormat,
    /// Save this field immediately on every user edit.
    pub live_update: bool,
    state: FieldState,
}

impl FieldBinding {
    /// Declare a field editing `setting_name`, rendered as `id`.
    pub fn new(id: impl Into<String>, setting_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            setting_name: setting_name.into(),
            declared_unit: None,
            format: FieldFormat::default(),
            live_update: false,
            state: FieldState::Unbound,
        }
    }

    /// Declare the unit the raw value is stored in.
    pub fn with_unit(mut self, unit: SourceUnit) -> Self {
        self.declared_unit = Some(unit);
        self
    }

    /// Render a boolean-like table as a checkbox.
    pub fn as_checkbox(mut self) -> Self {
        self.format.checkbox = true;
        self
    }

    /// Declare an input step for float settings.
    pub fn with_step(mut self, step: f64) -> Self {
        self.format.step = Some(step);
        self
    }

    /// Declare an explicit display multiplier for numeric settings.
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.format.multiplier = Some(multiplier);
        self
    }

    /// Save on every user edit.
    pub fn live(mut self) -> Self {
        self.live_update = true;
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &FieldState {
        &self.state
    }

    /// Whether the field completed a load this cycle.
    pub fn is_bound(&self) -> bool {
        matches!(self.state, FieldState::Bound { .. })
    }

    /// Whether the field was removed from the active form this cycle.
    pub fn is_hidden(&self) -> bool {
        self.state == FieldState::Hidden
    }

    /// Tear the field down, dropping the attached descriptor and multiplier.
    pub fn reset(&mut self) {
        self.state = FieldState::Unbound;
    }
}

/// Per-field orchestration over the two ports.
pub struct FormBinding {
    service: Arc<dyn SettingsPort>,
    localizer: Arc<dyn Localizer + Send + Sync>,
}

impl FormBinding {
    /// Bind against a settings service, with labels left unlocalized.
    pub fn new(service: Arc<dyn SettingsPort>) -> Self {
        Self {
            service,
            localizer: Arc::new(NoLocalizer),
        }
    }

    /// Use a host-supplied label localizer.
    pub fn with_localizer(mut self, localizer: Arc<dyn Localizer + Send + Sync>) -> Self {
        self.localizer = localizer;
        self
    }

    /// Load one field: fetch, decode, convert, populate.
    ///
    /// A setting the service does not know hides the field and succeeds.
    /// The unit conversion runs only for generic numeric settings whose
    /// binding declares a unit that resolves under `prefs`; the resulting
    /// multiplier is recorded on the field for the save path, and the sink
    /// is told to wrap the field with the display-unit name.
    pub async fn load_field(
        &self,
        field: &mut FieldBinding,
        sink: &mut dyn FormSink,
        prefs: &UnitPreferences,
    ) -> Result<(), SyncError> {
        field.state = FieldState::Loading;

        let fetched = match self.service.get_setting(&field.setting_name).await {
            Ok(fetched) => fetched,
            Err(err) => {
                field.state = FieldState::Unbound;
                return Err(err.into());
            }
        };

        let Some(fetched) = fetched else {
            debug!(setting = %field.setting_name, "setting unavailable on this device, hiding field");
            field.state = FieldState::Hidden;
            sink.apply(&field.id, FieldRender::Hide);
            return Ok(());
        };

        validate_descriptor(&fetched.descriptor)?;

        let mut display = decode_for_display(
            &fetched.descriptor,
            &fetched.value,
            &field.format,
            self.localizer.as_ref(),
        )?;

        // Explicit per-field multipliers only apply to the generic numeric
        // kind; everything else stores display units directly.
        let mut active_multiplier = match fetched.descriptor.kind {
            SettingKind::Numeric => field.format.multiplier.unwrap_or(1.0),
            SettingKind::Table | SettingKind::Text | SettingKind::Float => 1.0,
        };

        let mut unit_name = None;
        if fetched.descriptor.kind == SettingKind::Numeric {
            if let Some(unit) = field.declared_unit {
                if let Some(entry) = resolve_conversion(prefs, unit) {
                    apply_conversion(&mut display, entry);
                    active_multiplier *= entry.multiplier;
                    unit_name = Some(entry.unit_name);
                }
            }
        }

        sink.apply(&field.id, FieldRender::Show(display));
        if let Some(name) = unit_name {
            sink.apply(&field.id, FieldRender::UnitWrap(name));
        }

        debug!(
            setting = %field.setting_name,
            multiplier = active_multiplier,
            unit = unit_name.unwrap_or(""),
            "field bound"
        );
        field.state = FieldState::Bound {
            descriptor: fetched.descriptor,
            active_multiplier,
        };
        Ok(())
    }

    /// Save one field: read, encode, store.
    ///
    /// A field that never bound this cycle is a no-op (`Ok(None)`), not an
    /// error: the field was hidden or its load failed, and there is nothing
    /// trustworthy to write. Returns the raw value written otherwise.
    pub async fn save_field(
        &self,
        field: &FieldBinding,
        sink: &dyn FormSink,
    ) -> Result<Option<SettingValue>, SyncError> {
        let FieldState::Bound {
            descriptor,
            active_multiplier,
        } = &field.state
        else {
            debug!(setting = %field.setting_name, "field never bound, skipping save");
            return Ok(None);
        };

        let input = sink
            .read(&field.id)
            .ok_or_else(|| SyncError::MissingInput(field.id.clone()))?;

        let raw = encode_for_storage(descriptor, &input, *active_multiplier)?;
        self.service
            .set_setting(&field.setting_name, raw.clone())
            .await?;
        debug!(setting = %field.setting_name, "field saved");
        Ok(Some(raw))
    }

    /// React to a sink-reported user edit.
    ///
    /// Saves the single field immediately when it was declared
    /// [`FieldBinding::live`]; otherwise does nothing until the next
    /// whole-form save.
    pub async fn notify_edit(
        &self,
        field: &FieldBinding,
        sink: &dyn FormSink,
    ) -> Result<Option<SettingValue>, SyncError> {
        if !field.live_update {
            return Ok(None);
        }
        self.save_field(field, sink).await
    }
}

impl std::fmt::Debug for FormBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormBinding").finish_non_exhaustive()
    }
}
