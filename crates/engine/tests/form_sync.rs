//! End-to-end form synchronization against in-memory ports.

use std::sync::Arc;

use flightdeck_engine::prelude::*;
use flightdeck_settings::{DisplayField, FieldInput, SettingDescriptor, SettingValue, ValueTable};
use flightdeck_units::{SourceUnit, UnitPreferences};
use flightdeck_test_helpers::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn shown_number(sink: &RecordingSink, field_id: &str) -> f64 {
    match must_some(sink.last_shown(field_id), "field must have rendered") {
        DisplayField::Number { value, .. } => *value,
        other => panic!("expected a number field for '{field_id}', got {other:?}"),
    }
}

#[tokio::test]
async fn test_metric_centimeters_render_as_meters() -> Result<(), SyncError> {
    init_tracing();
    let service = Arc::new(MemorySettingsService::new());
    service.insert(
        SettingDescriptor::numeric("nav_rth_altitude", 0.0, 65_000.0),
        250.0,
    );
    let engine = SyncEngine::new(service);
    let mut fields = vec![FieldBinding::new("rth-alt", "nav_rth_altitude").with_unit(SourceUnit::Cm)];
    let mut sink = RecordingSink::new();

    engine
        .load_all(&mut fields, &mut sink, &UnitPreferences::metric())
        .await?;

    assert_eq!(shown_number(&sink, "rth-alt"), 2.5);
    assert_eq!(sink.unit_wrap("rth-alt"), Some("m"));
    Ok(())
}

#[tokio::test]
async fn test_imperial_cm_per_second_renders_as_mph() -> Result<(), SyncError> {
    init_tracing();
    let service = Arc::new(MemorySettingsService::new());
    service.insert(
        SettingDescriptor::numeric("nav_auto_speed", 10.0, 20_000.0),
        4470.0,
    );
    let engine = SyncEngine::new(service);
    let mut fields =
        vec![FieldBinding::new("auto-speed", "nav_auto_speed").with_unit(SourceUnit::Cms)];
    let mut sink = RecordingSink::new();

    engine
        .load_all(&mut fields, &mut sink, &UnitPreferences::imperial())
        .await?;

    // 4470 cm/s over the 44.704 mph multiplier, rounded to two decimals.
    let shown = shown_number(&sink, "auto-speed");
    assert!((shown - 100.0).abs() <= 0.01, "got {shown}");
    assert_eq!(sink.unit_wrap("auto-speed"), Some("mph"));
    Ok(())
}

#[tokio::test]
async fn test_no_preference_passes_raw_values_through() -> Result<(), SyncError> {
    init_tracing();
    let service = Arc::new(MemorySettingsService::new());
    service.insert(
        SettingDescriptor::numeric("nav_auto_speed", 10.0, 20_000.0),
        4470.0,
    );
    let engine = SyncEngine::new(service);
    let mut fields =
        vec![FieldBinding::new("auto-speed", "nav_auto_speed").with_unit(SourceUnit::Cms)];
    let mut sink = RecordingSink::new();

    engine
        .load_all(&mut fields, &mut sink, &UnitPreferences::none())
        .await?;

    assert_eq!(shown_number(&sink, "auto-speed"), 4470.0);
    assert_eq!(sink.unit_wrap("auto-speed"), None);
    Ok(())
}

#[tokio::test]
async fn test_unknown_setting_is_excluded_from_form_and_save() -> Result<(), SyncError> {
    init_tracing();
    let service = Arc::new(MemorySettingsService::new());
    service.insert(SettingDescriptor::text("craft_name"), "SkyHawk");
    let engine = SyncEngine::new(Arc::clone(&service) as Arc<dyn SettingsPort>);
    let mut fields = vec![
        FieldBinding::new("foo-field", "foo"),
        FieldBinding::new("craft-name", "craft_name"),
    ];
    let mut sink = RecordingSink::new();

    engine
        .load_all(&mut fields, &mut sink, &UnitPreferences::metric())
        .await?;
    engine.save_all(&fields, &sink).await?;

    assert_eq!(sink.hidden(), vec!["foo-field"]);
    let written: Vec<String> = service
        .writes()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(written, vec!["craft_name"]);
    Ok(())
}

#[tokio::test]
async fn test_save_then_reload_is_idempotent_on_display_values(
) -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let service = Arc::new(MemorySettingsService::new());
    // Descriptors straight off the wire, the way a transport would hand
    // them over.
    let radius: SettingDescriptor = serde_json::from_value(serde_json::json!({
        "name": "nav_wp_radius",
        "kind": "numeric",
        "min": 10.0,
        "max": 10000.0,
        "table": null
    }))?;
    service.insert(radius, 250.0);
    service.insert(
        SettingDescriptor::numeric("nav_auto_speed", 10.0, 20_000.0),
        4470.0,
    );

    let engine = SyncEngine::new(Arc::clone(&service) as Arc<dyn SettingsPort>);
    let mut fields = vec![
        FieldBinding::new("wp-radius", "nav_wp_radius").with_unit(SourceUnit::Cm),
        FieldBinding::new("auto-speed", "nav_auto_speed").with_unit(SourceUnit::Cms),
    ];
    let mut sink = RecordingSink::new();
    let prefs = UnitPreferences::imperial();

    engine.load_all(&mut fields, &mut sink, &prefs).await?;
    let radius_before = shown_number(&sink, "wp-radius");
    let speed_before = shown_number(&sink, "auto-speed");

    engine.save_all(&fields, &sink).await?;
    SyncEngine::teardown(&mut fields);
    engine.load_all(&mut fields, &mut sink, &prefs).await?;

    // The display rounds to two decimals, so a save/reload cycle may drift
    // by at most half a display step.
    assert!((shown_number(&sink, "wp-radius") - radius_before).abs() <= 0.01);
    assert!((shown_number(&sink, "auto-speed") - speed_before).abs() <= 0.01);
    Ok(())
}

#[tokio::test]
async fn test_boolean_table_round_trips_through_a_checkbox() -> Result<(), SyncError> {
    init_tracing();
    let service = Arc::new(MemorySettingsService::new());
    service.insert(
        SettingDescriptor::table(
            "osd_units_auto",
            0,
            1,
            ValueTable::new([(0_i64, "Off"), (1_i64, "On")]),
        ),
        1.0,
    );
    let engine = SyncEngine::new(Arc::clone(&service) as Arc<dyn SettingsPort>);
    let mut fields = vec![FieldBinding::new("units-auto", "osd_units_auto").as_checkbox()];
    let mut sink = RecordingSink::new();

    engine
        .load_all(&mut fields, &mut sink, &UnitPreferences::metric())
        .await?;
    assert_eq!(
        must_some(sink.last_shown("units-auto"), "checkbox must render"),
        &DisplayField::Checkbox { checked: true }
    );

    sink.type_into("units-auto", FieldInput::Checked(false));
    engine.save_all(&fields, &sink).await?;
    assert_eq!(
        service.value_of("osd_units_auto"),
        Some(SettingValue::Number(0.0))
    );

    sink.type_into("units-auto", FieldInput::Checked(true));
    engine.save_all(&fields, &sink).await?;
    assert_eq!(
        service.value_of("osd_units_auto"),
        Some(SettingValue::Number(1.0))
    );
    Ok(())
}
