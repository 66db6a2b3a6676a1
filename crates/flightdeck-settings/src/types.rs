//! Catalog type definitions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The type of one device parameter.
///
/// The catalog is closed: every kind is handled exhaustively, and there is no
/// fallback-by-default dispatch on strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingKind {
    /// Discrete enumerated integer range; the raw value is an index.
    Table,
    /// Free-form string; passes through the codec unmodified.
    Text,
    /// Floating point with fixed 2-decimal display precision.
    Float,
    /// Generic integer-backed numeric value (the catalog's default kind).
    Numeric,
}

/// Ordered mapping from table index to display label.
///
/// Labels may be localization keys; resolution goes through a [`Localizer`].
/// A missing or empty label for a valid index falls back to the index's
/// decimal string, which is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueTable {
    values: BTreeMap<i64, String>,
}

impl ValueTable {
    /// Build a table from `(index, label)` pairs.
    pub fn new(entries: impl IntoIterator<Item = (i64, impl Into<String>)>) -> Self {
        Self {
            values: entries
                .into_iter()
                .map(|(index, label)| (index, label.into()))
                .collect(),
        }
    }

    /// Raw (possibly localization-key) label for an index, if one exists.
    ///
    /// Empty labels are treated as absent.
    pub fn label(&self, index: i64) -> Option<&str> {
        self.values
            .get(&index)
            .map(String::as_str)
            .filter(|label| !label.is_empty())
    }

    /// Number of labeled indices.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table has no labels at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The catalog shape for one parameter.
///
/// Fetched once per field-binding cycle from the settings service and
/// immutable for the duration of a render cycle; the engine never persists
/// descriptors itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingDescriptor {
    /// Unique catalog-wide key identifying exactly one device parameter.
    pub name: String,
    /// The parameter's kind.
    pub kind: SettingKind,
    /// Lower bound; present for numeric kinds, absent for text and
    /// unconstrained tables.
    #[serde(default)]
    pub min: Option<f64>,
    /// Upper bound; see `min`.
    #[serde(default)]
    pub max: Option<f64>,
    /// Optional enumerated labels for `Table` kind.
    #[serde(default)]
    pub table: Option<ValueTable>,
}

impl SettingDescriptor {
    /// Generic numeric descriptor with bounds.
    pub fn numeric(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            kind: SettingKind::Numeric,
            min: Some(min),
            max: Some(max),
            table: None,
        }
    }

    /// Float descriptor with bounds.
    pub fn float(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            kind: SettingKind::Float,
            min: Some(min),
            max: Some(max),
            table: None,
        }
    }

    /// Free-form string descriptor.
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SettingKind::Text,
            min: None,
            max: None,
            table: None,
        }
    }

    /// Table descriptor over the index range `[min, max]`.
    pub fn table(name: impl Into<String>, min: i64, max: i64, table: ValueTable) -> Self {
        Self {
            name: name.into(),
            kind: SettingKind::Table,
            min: Some(min as f64),
            max: Some(max as f64),
            table: Some(table),
        }
    }

    /// Attach or replace the value table.
    pub fn with_table(mut self, table: ValueTable) -> Self {
        self.table = Some(table);
        self
    }

    /// The integer index range for table kinds, defaulting to `[0, 0]` when
    /// bounds are absent.
    pub fn index_range(&self) -> (i64, i64) {
        let min = self.min.unwrap_or(0.0) as i64;
        let max = self.max.unwrap_or(0.0) as i64;
        (min, max)
    }
}

/// A raw value as stored and transmitted by the settings service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// Numeric raw value (table indices included).
    Number(f64),
    /// String raw value.
    Text(String),
}

impl SettingValue {
    /// Numeric view of the value, if it is numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            SettingValue::Number(n) => Some(*n),
            SettingValue::Text(_) => None,
        }
    }

    /// String view of the value, if it is a string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SettingValue::Number(_) => None,
            SettingValue::Text(s) => Some(s),
        }
    }
}

impl From<f64> for SettingValue {
    fn from(n: f64) -> Self {
        SettingValue::Number(n)
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        SettingValue::Text(s.to_string())
    }
}

/// Opaque label-localization collaborator.
///
/// Table labels may be localization keys; a host supplies its own lookup.
/// Returning `None` leaves the raw label in place.
pub trait Localizer {
    /// Resolve a localization key to a display string, if known.
    fn localize(&self, key: &str) -> Option<String>;
}

/// Identity localizer: every key is left as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocalizer;

impl Localizer for NoLocalizer {
    fn localize(&self, _key: &str) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_label_is_absent() {
        let table = ValueTable::new([(0, "OFF"), (1, "")]);
        assert_eq!(table.label(0), Some("OFF"));
        assert_eq!(table.label(1), None);
        assert_eq!(table.label(7), None);
    }

    #[test]
    fn test_index_range_defaults_to_zero() {
        let desc = SettingDescriptor::text("craft_name");
        assert_eq!(desc.index_range(), (0, 0));
    }

    #[test]
    fn test_table_descriptor_carries_integer_bounds() {
        let desc = SettingDescriptor::table("osd_unit_mode", 0, 4, ValueTable::default());
        assert_eq!(desc.index_range(), (0, 4));
        assert_eq!(desc.kind, SettingKind::Table);
    }

    #[test]
    fn test_setting_value_views() {
        assert_eq!(SettingValue::Number(3.5).as_number(), Some(3.5));
        assert_eq!(SettingValue::Number(3.5).as_text(), None);
        assert_eq!(SettingValue::from("abc").as_text(), Some("abc"));
    }

    #[test]
    fn test_descriptor_serde_round_trip() -> Result<(), serde_json::Error> {
        let desc = SettingDescriptor::table(
            "failsafe_procedure",
            0,
            2,
            ValueTable::new([(0, "LAND"), (1, "DROP"), (2, "RTH")]),
        );
        let json = serde_json::to_string(&desc)?;
        let back: SettingDescriptor = serde_json::from_str(&json)?;
        assert_eq!(back, desc);
        Ok(())
    }

    #[test]
    fn test_descriptor_deserializes_without_bounds() -> Result<(), serde_json::Error> {
        let desc: SettingDescriptor =
            serde_json::from_str(r#"{"name":"craft_name","kind":"text"}"#)?;
        assert_eq!(desc.kind, SettingKind::Text);
        assert_eq!(desc.min, None);
        assert_eq!(desc.table, None);
        Ok(())
    }
}
