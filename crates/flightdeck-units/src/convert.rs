//! The static conversion table and display-precision rule.

use crate::preferences::{SourceUnit, UnitPreferences};

/// One resolved conversion: how to rescale a raw value and what to call it.
///
/// `display = raw / multiplier`; `raw = display * multiplier`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionEntry {
    /// Divisor applied to the raw value for display.
    pub multiplier: f64,
    /// Display name for the converted unit (the label wrap on the field).
    pub unit_name: &'static str,
}

impl ConversionEntry {
    const fn new(multiplier: f64, unit_name: &'static str) -> Self {
        Self {
            multiplier,
            unit_name,
        }
    }
}

// Selector buckets mirror the OSD unit codes: 0 imperial, 1 metric,
// 2 metric with m/s speeds, 4 aviation (knots). Anything not covered by a
// selector bucket falls back to the imperial-style default bucket.
const METRIC_CM: ConversionEntry = ConversionEntry::new(100.0, "m");
const METRIC_CMS: ConversionEntry = ConversionEntry::new(27.77777777777778, "Km/h");
const AVIATION_CMS: ConversionEntry = ConversionEntry::new(51.44444444444457, "Kt");
const DEFAULT_CM: ConversionEntry = ConversionEntry::new(30.48, "ft");
const DEFAULT_CMS: ConversionEntry = ConversionEntry::new(44.704, "mph");
const DEFAULT_MS: ConversionEntry = ConversionEntry::new(1000.0, "sec");

/// Resolve a conversion for a display selector and source unit.
///
/// The selector-specific bucket wins; the default bucket backs it up. The
/// default bucket covers every known [`SourceUnit`], so a resolved selector
/// always finds an entry today, but callers must treat `None` as
/// "no conversion, pass the value through" all the same.
///
/// # Example
///
/// ```
/// use flightdeck_units::{resolve, SourceUnit};
///
/// // Selector 4 (aviation OSD code) shows speeds in knots...
/// let kt = resolve(4, SourceUnit::Cms).ok_or("missing entry")?;
/// assert_eq!(kt.unit_name, "Kt");
///
/// // ...but distances fall through to the default bucket.
/// let ft = resolve(4, SourceUnit::Cm).ok_or("missing entry")?;
/// assert_eq!(ft.unit_name, "ft");
/// # Ok::<(), &str>(())
/// ```
pub fn resolve(selector: i32, unit: SourceUnit) -> Option<ConversionEntry> {
    let bucketed = match (selector, unit) {
        (1, SourceUnit::Cm) | (2, SourceUnit::Cm) => Some(METRIC_CM),
        (1, SourceUnit::Cms) => Some(METRIC_CMS),
        (4, SourceUnit::Cms) => Some(AVIATION_CMS),
        _ => None,
    };

    bucketed.or(match unit {
        SourceUnit::Cm => Some(DEFAULT_CM),
        SourceUnit::Cms => Some(DEFAULT_CMS),
        SourceUnit::Ms => Some(DEFAULT_MS),
    })
}

/// Resolve a conversion straight from a preference snapshot.
///
/// Returns `None` when the preference disables conversion
/// ([`crate::UnitSystem::None`]) or nothing matches the unit.
pub fn resolve_conversion(prefs: &UnitPreferences, unit: SourceUnit) -> Option<ConversionEntry> {
    prefs
        .display_selector()
        .and_then(|selector| resolve(selector, unit))
}

/// Display decimals derived from a plain (non-unit) field multiplier.
///
/// A multiplier of 100 yields 2 decimals, 10 yields 1, and 1 yields 0. The
/// fractional part of `log10` is truncated, so a non-power-of-10 multiplier
/// like 44.704 yields 1 decimal; this matches the legacy configurator and is
/// kept on purpose. Multipliers at or below zero yield 0 decimals.
pub fn decimals_for_multiplier(multiplier: f64) -> u32 {
    if multiplier <= 0.0 {
        return 0;
    }
    multiplier.log10().floor().max(0.0) as u32
}
