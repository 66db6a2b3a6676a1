//! Raw-to-display value codec
//!
//! [`decode_for_display`] turns a descriptor plus raw stored value into a
//! rendering instruction; [`encode_for_storage`] is the exact inverse, taking
//! the user-edited field state back to the raw value the service expects.
//! [`apply_conversion`] rescales an already-decoded numeric instruction by a
//! resolved unit-conversion entry.

use flightdeck_units::{decimals_for_multiplier, ConversionEntry};

use crate::types::{Localizer, SettingDescriptor, SettingKind, SettingValue};
use crate::{SettingsError, SettingsResult};

/// Per-field display hints supplied by the form schema.
///
/// These are declared statically alongside the field binding; none of them
/// come from the device catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FieldFormat {
    /// Render a two-entry on/off table as a checkbox instead of a selector.
    pub checkbox: bool,
    /// Declared step for float fields (defaults to 0.01).
    pub step: Option<f64>,
    /// Explicit per-field multiplier for generic numeric fields.
    pub multiplier: Option<f64>,
}

/// One selectable option of a table field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// The table index this option encodes to.
    pub index: i64,
    /// Resolved display label.
    pub label: String,
    /// Whether this option matches the stored raw value.
    pub selected: bool,
}

/// A rendering instruction for one form field.
///
/// This is what the engine hands to the rendering sink; the sink owns layout
/// and styling, the instruction owns values, bounds and precision.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayField {
    /// Numeric input with precision and optional bounds/step.
    Number {
        /// Display value, already rescaled and rounded.
        value: f64,
        /// Decimal places the sink should format with.
        decimals: u32,
        /// Rescaled lower bound, when the catalog declares one.
        min: Option<f64>,
        /// Rescaled upper bound, when the catalog declares one.
        max: Option<f64>,
        /// Input step, when one applies.
        step: Option<f64>,
    },
    /// Free-form text input.
    Text {
        /// The raw string value.
        value: String,
    },
    /// On/off toggle for a boolean-like table.
    Checkbox {
        /// Whether the stored index is the "on" index.
        checked: bool,
    },
    /// Index selector for a table setting.
    Select {
        /// One option per index in the descriptor's range.
        options: Vec<SelectOption>,
    },
}

/// The user-edited state of a form field, as reported by the rendering sink.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    /// Numeric input contents.
    Number(f64),
    /// Text input contents.
    Text(String),
    /// Checkbox state.
    Checked(bool),
    /// Selected table index.
    SelectedIndex(i64),
}

/// Round to a fixed number of decimal places, half away from zero.
fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn expect_number(descriptor: &SettingDescriptor, raw: &SettingValue) -> SettingsResult<f64> {
    raw.as_number().ok_or_else(|| SettingsError::TypeMismatch {
        name: descriptor.name.clone(),
        expected: "number",
    })
}

/// Decode a raw stored value into a rendering instruction.
///
/// Kind dispatch is exhaustive:
///
/// - `Table`: one option per index in the descriptor's range, label via the
///   value table and `localizer` with index-string fallback, exactly one
///   option selected. With [`FieldFormat::checkbox`] the field renders as a
///   toggle instead (checked ⇔ stored index > 0).
/// - `Text`: passes through unmodified.
/// - `Float`: fixed 2-decimal display, declared or 0.01 step, unscaled
///   bounds. Floats are not subject to the unit-conversion table.
/// - `Numeric`: with an explicit per-field multiplier `m`, the display value
///   is `raw / m` at `decimals_for_multiplier(m)` places and the bounds are
///   rescaled and rounded the same way; `m = 1` yields 0 decimal places.
pub fn decode_for_display(
    descriptor: &SettingDescriptor,
    raw: &SettingValue,
    format: &FieldFormat,
    localizer: &dyn Localizer,
) -> SettingsResult<DisplayField> {
    match descriptor.kind {
        SettingKind::Table => {
            let stored = expect_number(descriptor, raw)?;
            if format.checkbox {
                return Ok(DisplayField::Checkbox {
                    checked: stored > 0.0,
                });
            }

            let stored_index = stored as i64;
            let (min, max) = descriptor.index_range();
            let options = (min..=max)
                .map(|index| {
                    let label = descriptor
                        .table
                        .as_ref()
                        .and_then(|table| table.label(index))
                        .map(|key| localizer.localize(key).unwrap_or_else(|| key.to_string()))
                        .unwrap_or_else(|| index.to_string());
                    SelectOption {
                        index,
                        label,
                        selected: index == stored_index,
                    }
                })
                .collect();
            Ok(DisplayField::Select { options })
        }
        SettingKind::Text => {
            let value = match raw {
                SettingValue::Text(s) => s.clone(),
                SettingValue::Number(n) => n.to_string(),
            };
            Ok(DisplayField::Text { value })
        }
        SettingKind::Float => Ok(DisplayField::Number {
            value: round_to(expect_number(descriptor, raw)?, 2),
            decimals: 2,
            min: descriptor.min,
            max: descriptor.max,
            step: Some(format.step.unwrap_or(0.01)),
        }),
        SettingKind::Numeric => {
            let multiplier = format.multiplier.unwrap_or(1.0);
            let decimals = decimals_for_multiplier(multiplier);
            Ok(DisplayField::Number {
                value: round_to(expect_number(descriptor, raw)? / multiplier, decimals),
                decimals,
                min: descriptor.min.map(|b| round_to(b / multiplier, decimals)),
                max: descriptor.max.map(|b| round_to(b / multiplier, decimals)),
                step: None,
            })
        }
    }
}

/// Rescale a decoded numeric instruction by a resolved conversion entry.
///
/// Value and bounds are divided by the entry's multiplier and rounded to 2
/// decimal places; the step becomes 0.01 (or 1 for a unity multiplier).
/// Non-numeric instructions are left untouched: the conversion table only
/// ever applies to generic numeric fields.
pub fn apply_conversion(field: &mut DisplayField, entry: ConversionEntry) {
    if let DisplayField::Number {
        value,
        decimals,
        min,
        max,
        step,
    } = field
    {
        let m = entry.multiplier;
        *value = round_to(*value / m, 2);
        *min = min.map(|b| round_to(b / m, 2));
        *max = max.map(|b| round_to(b / m, 2));
        *step = Some(if m != 1.0 { 0.01 } else { 1.0 });
        *decimals = 2;
    }
}

/// Encode a user-edited field state back to the raw storage value.
///
/// `active_multiplier` is whatever was attached to the field during load
/// (explicit per-field multiplier, unit conversion, or both composed), and
/// defaults to 1 when nothing was attached.
pub fn encode_for_storage(
    descriptor: &SettingDescriptor,
    input: &FieldInput,
    active_multiplier: f64,
) -> SettingsResult<SettingValue> {
    let mismatch = |expected: &'static str| SettingsError::TypeMismatch {
        name: descriptor.name.clone(),
        expected,
    };

    match descriptor.kind {
        SettingKind::Table => match input {
            FieldInput::Checked(true) => Ok(SettingValue::Number(1.0)),
            FieldInput::Checked(false) => Ok(SettingValue::Number(0.0)),
            FieldInput::SelectedIndex(index) => Ok(SettingValue::Number(*index as f64)),
            FieldInput::Number(n) => Ok(SettingValue::Number(n.trunc())),
            FieldInput::Text(_) => Err(mismatch("table index")),
        },
        SettingKind::Text => match input {
            FieldInput::Text(s) => Ok(SettingValue::Text(s.clone())),
            _ => Err(mismatch("string")),
        },
        SettingKind::Float | SettingKind::Numeric => {
            let display = match input {
                FieldInput::Number(n) => *n,
                FieldInput::Text(s) => s.trim().parse::<f64>().map_err(|_| mismatch("number"))?,
                _ => return Err(mismatch("number")),
            };
            Ok(SettingValue::Number(display * active_multiplier))
        }
    }
}
