//! User unit preferences and source-unit tags.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnitError;

/// The user's chosen unit system.
///
/// `Osd` defers to the unit code the device's on-screen display is already
/// configured with, so the form and the OSD agree on what the pilot sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// No conversion; raw device values are shown as-is.
    #[default]
    None,
    /// Follow the device's OSD unit code.
    Osd,
    /// Imperial units (feet, mph).
    Imperial,
    /// Metric units (meters, km/h).
    Metric,
}

/// Immutable snapshot of the unit preference for one load cycle.
///
/// The preference is process-wide mutable state in the host application, so
/// callers take a snapshot per cycle and pass it in explicitly. It must be
/// re-resolved on every load cycle, never cached across cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnitPreferences {
    /// The selected unit system.
    pub unit_type: UnitSystem,
    /// The device's OSD unit code, consulted when `unit_type` is
    /// [`UnitSystem::Osd`].
    #[serde(default)]
    pub osd_units: i32,
}

impl UnitPreferences {
    /// Snapshot with conversion disabled.
    pub const fn none() -> Self {
        Self {
            unit_type: UnitSystem::None,
            osd_units: 0,
        }
    }

    /// Imperial snapshot.
    pub const fn imperial() -> Self {
        Self {
            unit_type: UnitSystem::Imperial,
            osd_units: 0,
        }
    }

    /// Metric snapshot.
    pub const fn metric() -> Self {
        Self {
            unit_type: UnitSystem::Metric,
            osd_units: 0,
        }
    }

    /// Snapshot following the device OSD unit code.
    pub const fn osd(osd_units: i32) -> Self {
        Self {
            unit_type: UnitSystem::Osd,
            osd_units,
        }
    }

    /// Resolve the integer display selector for the conversion table.
    ///
    /// Imperial maps to selector 0 and metric to 1 (the OSD's own codes for
    /// those systems, reused so one table serves both paths). OSD mode
    /// delegates to the stored OSD unit code. `None` yields no selector,
    /// which disables conversion for the whole cycle.
    pub fn display_selector(&self) -> Option<i32> {
        match self.unit_type {
            UnitSystem::None => None,
            UnitSystem::Osd => Some(self.osd_units),
            UnitSystem::Imperial => Some(0),
            UnitSystem::Metric => Some(1),
        }
    }
}

/// The unit a raw setting value is stored in, as declared by the form schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceUnit {
    /// Distance in centimeters.
    Cm,
    /// Speed in centimeters per second.
    Cms,
    /// Time in milliseconds.
    Ms,
}

impl SourceUnit {
    /// The schema tag for this unit.
    pub const fn as_str(self) -> &'static str {
        match self {
            SourceUnit::Cm => "cm",
            SourceUnit::Cms => "cms",
            SourceUnit::Ms => "ms",
        }
    }
}

impl FromStr for SourceUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cm" => Ok(SourceUnit::Cm),
            "cms" => Ok(SourceUnit::Cms),
            "ms" => Ok(SourceUnit::Ms),
            other => Err(UnitError::UnknownUnit(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_for_fixed_systems() {
        assert_eq!(UnitPreferences::imperial().display_selector(), Some(0));
        assert_eq!(UnitPreferences::metric().display_selector(), Some(1));
    }

    #[test]
    fn test_selector_follows_osd_code() {
        assert_eq!(UnitPreferences::osd(4).display_selector(), Some(4));
        assert_eq!(UnitPreferences::osd(2).display_selector(), Some(2));
    }

    #[test]
    fn test_none_disables_conversion() {
        assert_eq!(UnitPreferences::none().display_selector(), None);
    }

    #[test]
    fn test_source_unit_round_trips_through_tag() -> Result<(), UnitError> {
        for unit in [SourceUnit::Cm, SourceUnit::Cms, SourceUnit::Ms] {
            assert_eq!(unit.as_str().parse::<SourceUnit>()?, unit);
        }
        Ok(())
    }

    #[test]
    fn test_unknown_tag_is_an_error() {
        let parsed = "parsecs".parse::<SourceUnit>();
        assert_eq!(parsed, Err(UnitError::UnknownUnit("parsecs".to_string())));
    }

    #[test]
    fn test_preferences_deserialize_without_osd_code() -> Result<(), serde_json::Error> {
        let prefs: UnitPreferences = serde_json::from_str(r#"{"unit_type":"metric"}"#)?;
        assert_eq!(prefs.unit_type, UnitSystem::Metric);
        assert_eq!(prefs.osd_units, 0);
        Ok(())
    }
}
