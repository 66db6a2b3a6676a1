//! Whole-form synchronization
//!
//! [`SyncEngine`] drives load-all / save-all over an ordered field list.
//! Processing is strictly sequential in declaration order: the settings
//! service is a single shared session resource, and concurrent calls against
//! it are undefined behavior by contract with that collaborator. Sequential
//! order also keeps display-order dependencies deterministic (a parent
//! container hidden by an earlier field stays hidden before later fields
//! render into it).

use std::sync::Arc;

use tracing::{info, warn};

use flightdeck_settings::{FieldInput, Localizer, SettingsError, SettingValue};
use flightdeck_units::UnitPreferences;

use crate::binding::{FieldBinding, FormBinding};
use crate::ports::{FormSink, PortError, SettingsPort};

/// Error produced by a load/save pass.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyncError {
    /// The settings service failed a fetch or store call.
    #[error("Settings service error: {0}")]
    Port(#[from] PortError),

    /// A value failed to decode or encode against its descriptor.
    #[error("Value codec error: {0}")]
    Codec(#[from] SettingsError),

    /// The sink had no readable input for a bound field at save time.
    #[error("No input available for field '{0}'")]
    MissingInput(String),
}

impl SyncError {
    /// Whether this error aborts the remainder of a pass.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SyncError::Port(PortError::Fatal(_)))
    }
}

/// A load/save pass that recorded at least one field failure.
///
/// Carries the per-field outcomes alongside the error, so callers of a
/// failed pass still see which fields loaded, hid, saved or failed before
/// (and, for transient errors, after) the failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{error}")]
pub struct SyncFailure {
    /// The first transient error of the pass, or the fatal error that
    /// aborted it.
    pub error: SyncError,
    /// Outcomes recorded up to the point the pass ended.
    pub report: SyncReport,
}

impl SyncFailure {
    /// Whether the pass was aborted by a session-level error.
    pub fn is_fatal(&self) -> bool {
        self.error.is_fatal()
    }
}

impl From<SyncFailure> for SyncError {
    fn from(failure: SyncFailure) -> Self {
        failure.error
    }
}

/// What happened to one field during a pass.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome {
    /// Loaded and bound.
    Loaded,
    /// Setting unavailable; field removed from the form.
    Hidden,
    /// Saved successfully.
    Saved,
    /// Save skipped because the field never bound this cycle.
    Skipped,
    /// The field's operation failed; later fields still ran.
    Failed(SyncError),
}

/// Per-field outcomes of a completed (or fatally aborted) pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    /// `(field id, outcome)` in declaration order.
    pub outcomes: Vec<(String, FieldOutcome)>,
}

impl SyncReport {
    /// Ids of fields that were hidden during a load pass.
    pub fn hidden(&self) -> impl Iterator<Item = &str> {
        self.outcomes.iter().filter_map(|(id, outcome)| {
            (*outcome == FieldOutcome::Hidden).then_some(id.as_str())
        })
    }

    /// Number of fields that completed the pass successfully.
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| {
                matches!(outcome, FieldOutcome::Loaded | FieldOutcome::Saved)
            })
            .count()
    }
}

/// Drives the whole field set against the two ports.
#[derive(Debug)]
pub struct SyncEngine {
    binding: FormBinding,
}

impl SyncEngine {
    /// Build an engine over a settings service.
    pub fn new(service: Arc<dyn SettingsPort>) -> Self {
        Self {
            binding: FormBinding::new(service),
        }
    }

    /// Use a host-supplied label localizer.
    pub fn with_localizer(mut self, localizer: Arc<dyn Localizer + Send + Sync>) -> Self {
        self.binding = self.binding.with_localizer(localizer);
        self
    }

    /// Per-field pipeline, for hosts that drive single fields themselves.
    pub fn binding(&self) -> &FormBinding {
        &self.binding
    }

    /// Load every field, one at a time, in declaration order.
    ///
    /// A transient failure is recorded against its field and the pass keeps
    /// going; the first such failure is returned once the pass completes.
    /// A fatal session error aborts the remainder immediately. Fields that
    /// already loaded are not rolled back either way, and the returned
    /// [`SyncFailure`] carries the outcomes recorded so far.
    pub async fn load_all(
        &self,
        fields: &mut [FieldBinding],
        sink: &mut dyn FormSink,
        prefs: &UnitPreferences,
    ) -> Result<SyncReport, SyncFailure> {
        info!(fields = fields.len(), "loading settings form");
        let mut report = SyncReport::default();
        let mut first_error: Option<SyncError> = None;

        for field in fields.iter_mut() {
            match self.binding.load_field(field, sink, prefs).await {
                Ok(()) => {
                    let outcome = if field.is_hidden() {
                        FieldOutcome::Hidden
                    } else {
                        FieldOutcome::Loaded
                    };
                    report.outcomes.push((field.id.clone(), outcome));
                }
                Err(err) => {
                    warn!(field = %field.id, error = %err, "field load failed");
                    let fatal = err.is_fatal();
                    report
                        .outcomes
                        .push((field.id.clone(), FieldOutcome::Failed(err.clone())));
                    if fatal {
                        return Err(SyncFailure { error: err, report });
                    }
                    first_error.get_or_insert(err);
                }
            }
        }

        match first_error {
            Some(err) => Err(SyncFailure { error: err, report }),
            None => {
                info!(loaded = report.succeeded(), "settings form loaded");
                Ok(report)
            }
        }
    }

    /// Save every field, one at a time, in declaration order.
    ///
    /// Failure semantics mirror [`SyncEngine::load_all`]; fields that never
    /// bound are skipped silently, and already-written fields are not rolled
    /// back (there are no transactional semantics across the set).
    pub async fn save_all(
        &self,
        fields: &[FieldBinding],
        sink: &dyn FormSink,
    ) -> Result<SyncReport, SyncFailure> {
        info!(fields = fields.len(), "saving settings form");
        let mut report = SyncReport::default();
        let mut first_error: Option<SyncError> = None;

        for field in fields.iter() {
            match self.binding.save_field(field, sink).await {
                Ok(Some(_)) => report.outcomes.push((field.id.clone(), FieldOutcome::Saved)),
                Ok(None) => report
                    .outcomes
                    .push((field.id.clone(), FieldOutcome::Skipped)),
                Err(err) => {
                    warn!(field = %field.id, error = %err, "field save failed");
                    let fatal = err.is_fatal();
                    report
                        .outcomes
                        .push((field.id.clone(), FieldOutcome::Failed(err.clone())));
                    if fatal {
                        return Err(SyncFailure { error: err, report });
                    }
                    first_error.get_or_insert(err);
                }
            }
        }

        match first_error {
            Some(err) => Err(SyncFailure { error: err, report }),
            None => Ok(report),
        }
    }

    /// Forward a sink-reported user edit to the field that owns it.
    ///
    /// Saves immediately when that field was declared live; unknown ids and
    /// non-live fields are ignored.
    pub async fn notify_edit(
        &self,
        fields: &[FieldBinding],
        sink: &dyn FormSink,
        field_id: &str,
    ) -> Result<Option<SettingValue>, SyncError> {
        let Some(field) = fields.iter().find(|field| field.id == field_id) else {
            return Ok(None);
        };
        self.binding.notify_edit(field, sink).await
    }

    /// Current display value of the bound field editing `setting_name`.
    pub fn display_value(
        fields: &[FieldBinding],
        sink: &dyn FormSink,
        setting_name: &str,
    ) -> Option<FieldInput> {
        fields
            .iter()
            .find(|field| field.setting_name == setting_name && field.is_bound())
            .and_then(|field| sink.read(&field.id))
    }

    /// Tear the form down, unbinding every field.
    pub fn teardown(fields: &mut [FieldBinding]) {
        for field in fields.iter_mut() {
            field.reset();
        }
    }
}
