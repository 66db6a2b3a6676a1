//! Descriptor validation

use crate::types::{SettingDescriptor, SettingKind};
use crate::{SettingsError, SettingsResult};

/// Structurally validate a descriptor fetched from the settings service.
///
/// The engine treats descriptors as trusted catalog data, but a transport
/// glitch can hand back nonsense; validating up front keeps the codec free of
/// defensive branches.
pub fn validate_descriptor(descriptor: &SettingDescriptor) -> SettingsResult<()> {
    let invalid = |reason: String| SettingsError::InvalidDescriptor {
        name: descriptor.name.clone(),
        reason,
    };

    if descriptor.name.is_empty() {
        return Err(SettingsError::InvalidDescriptor {
            name: String::new(),
            reason: "name cannot be empty".to_string(),
        });
    }

    if let (Some(min), Some(max)) = (descriptor.min, descriptor.max) {
        if min > max {
            return Err(invalid(format!("min {} exceeds max {}", min, max)));
        }
    }

    match descriptor.kind {
        SettingKind::Table => {
            let (min, max) = descriptor.index_range();
            if max < min {
                return Err(invalid(format!(
                    "table index range [{}, {}] is inverted",
                    min, max
                )));
            }
        }
        SettingKind::Text => {
            if descriptor.table.is_some() {
                return Err(invalid("text settings cannot carry a value table".to_string()));
            }
        }
        SettingKind::Float | SettingKind::Numeric => {
            if descriptor.table.is_some() {
                return Err(invalid(
                    "numeric settings cannot carry a value table".to_string(),
                ));
            }
        }
    }

    Ok(())
}
