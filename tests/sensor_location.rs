// tests/sensor_location.rs
//! Resolve/Get/Set behaviour against the in-memory store

use fake_gps::{
    sensor::{LATITUDE_PROPERTY, LONGITUDE_PROPERTY, SENSOR_ROOT},
    CoordinatePair, FakeGpsError, MemoryStore, SensorLayout, SensorLocation,
};

/// Register devices under the sensor root in the given order.
/// Devices named `fake*` get the FakeGPS parameters subkey.
fn store_with_devices(devices: &[&str]) -> MemoryStore {
    let store = MemoryStore::new();
    let layout = SensorLayout::default();
    store.insert_key(SENSOR_ROOT).unwrap();

    for device in devices {
        if device.starts_with("fake") {
            store.insert_key(&layout.device_path(device)).unwrap();
        } else {
            store
                .insert_key(&format!(r"{}\{}\Device Parameters", SENSOR_ROOT, device))
                .unwrap();
        }
    }
    store
}

fn fake_path(device: &str) -> String {
    SensorLayout::default().device_path(device)
}

fn permutations(items: &[&'static str]) -> Vec<Vec<&'static str>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut result = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let first = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, first);
            result.push(tail);
        }
    }
    result
}

#[test]
fn test_resolve_finds_single_match_in_any_order() {
    for order in permutations(&["accel", "fake0", "light", "compass"]) {
        let sensor = SensorLocation::new(store_with_devices(&order));
        assert_eq!(sensor.resolve().unwrap(), fake_path("fake0"), "order {:?}", order);
    }
}

#[test]
fn test_resolve_returns_first_match_in_enumeration_order() {
    let sensor = SensorLocation::new(store_with_devices(&["light", "fake2", "fake1"]));
    assert_eq!(sensor.resolve().unwrap(), fake_path("fake2"));

    let sensor = SensorLocation::new(store_with_devices(&["fake1", "light", "fake2"]));
    assert_eq!(sensor.resolve().unwrap(), fake_path("fake1"));
}

#[test]
fn test_resolve_without_matching_device_is_not_found() {
    let sensor = SensorLocation::new(store_with_devices(&["accel", "light"]));
    let err = sensor.resolve().unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains(SENSOR_ROOT));
}

#[test]
fn test_resolve_does_not_create_keys() {
    let store = store_with_devices(&["accel", "light"]);
    let before = store.snapshot();

    let _ = SensorLocation::new(store.clone()).resolve();
    assert_eq!(store.snapshot(), before);
}

#[test]
fn test_resolve_with_unreadable_root_is_not_found() {
    let store = store_with_devices(&["fake0"]);
    store.deny_access(SENSOR_ROOT).unwrap();

    let err = SensorLocation::new(store).resolve().unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_resolve_skips_unreadable_candidate() {
    let store = store_with_devices(&["fake0", "fake1"]);
    store.deny_access(&fake_path("fake0")).unwrap();

    assert_eq!(SensorLocation::new(store).resolve().unwrap(), fake_path("fake1"));
}

#[test]
fn test_resolve_follows_enumeration_changes_between_calls() {
    let store = store_with_devices(&["fake0", "fake1"]);
    let sensor = SensorLocation::new(store.clone());
    assert_eq!(sensor.resolve().unwrap(), fake_path("fake0"));

    store.remove_key(&format!(r"{}\fake0", SENSOR_ROOT)).unwrap();
    assert_eq!(sensor.resolve().unwrap(), fake_path("fake1"));
}

#[test]
fn test_custom_layout() {
    let store = MemoryStore::new();
    store.insert_key(r"Test\Sensors\dev\Params").unwrap();

    let sensor = SensorLocation::with_layout(store, SensorLayout::new(r"Test\Sensors", "Params"));
    assert_eq!(sensor.resolve().unwrap(), r"Test\Sensors\dev\Params");
}

#[test]
fn test_set_then_get_returns_rounded_pair() {
    let pairs = [
        CoordinatePair::new(37.4221234, -122.0839999),
        CoordinatePair::new(-33.868820, 151.209290),
        CoordinatePair::new(90.0, -180.0),
        CoordinatePair::new(0.0, 0.0),
        CoordinatePair::new(-0.000004, 179.999996),
    ];
    let sensor = SensorLocation::new(store_with_devices(&["light", "fake0"]));

    for pair in pairs {
        sensor.set(pair).unwrap();
        assert_eq!(sensor.get().unwrap(), pair.rounded(), "pair {:?}", pair);
    }
}

#[test]
fn test_set_formats_invariant_fixed_point() {
    let store = store_with_devices(&["fake0"]);
    SensorLocation::new(store.clone())
        .set(CoordinatePair::new(37.4221234, -122.0839999))
        .unwrap();

    assert_eq!(store.value(&fake_path("fake0"), LATITUDE_PROPERTY).as_deref(), Some("37.42212"));
    assert_eq!(store.value(&fake_path("fake0"), LONGITUDE_PROPERTY).as_deref(), Some("-122.08400"));
}

#[test]
fn test_set_is_idempotent() {
    let store = store_with_devices(&["fake0"]);
    let sensor = SensorLocation::new(store.clone());
    let pair = CoordinatePair::new(51.5007292, -0.1246254);

    sensor.set(pair).unwrap();
    let once = store.snapshot();
    sensor.set(pair).unwrap();
    assert_eq!(store.snapshot(), once);
}

#[test]
fn test_set_replaces_existing_values() {
    let store = store_with_devices(&["fake0"]);
    store.insert_value(&fake_path("fake0"), LATITUDE_PROPERTY, "1.00000").unwrap();
    store.insert_value(&fake_path("fake0"), LONGITUDE_PROPERTY, "2.00000").unwrap();

    let sensor = SensorLocation::new(store);
    sensor.set(CoordinatePair::new(3.0, 4.0)).unwrap();
    assert_eq!(sensor.get().unwrap(), CoordinatePair::new(3.0, 4.0));
}

#[test]
fn test_set_with_nan_or_infinity_is_invalid_value() {
    let sensor = SensorLocation::new(store_with_devices(&["fake0"]));

    for pair in [
        CoordinatePair::new(f64::NAN, 0.0),
        CoordinatePair::new(0.0, f64::INFINITY),
        CoordinatePair::new(f64::NEG_INFINITY, f64::NAN),
    ] {
        let err = sensor.set(pair).unwrap_err();
        assert!(matches!(err, FakeGpsError::InvalidValue(_)), "pair {:?}", pair);
    }
}

#[test]
fn test_set_does_not_range_check() {
    // Range validation belongs to the caller; out-of-range values are written as given
    let store = store_with_devices(&["fake0"]);
    SensorLocation::new(store.clone())
        .set(CoordinatePair::new(91.0, 0.0))
        .unwrap();

    assert_eq!(store.value(&fake_path("fake0"), LATITUDE_PROPERTY).as_deref(), Some("91.00000"));
}

#[test]
fn test_set_huge_value_is_written_as_finite_text() {
    let store = store_with_devices(&["fake0"]);
    let sensor = SensorLocation::new(store.clone());
    sensor.set(CoordinatePair::new(1e305, 0.0)).unwrap();

    let stored = store.value(&fake_path("fake0"), LATITUDE_PROPERTY).unwrap();
    assert!(!stored.contains("inf"));
    assert!(stored.ends_with(".00000"));

    let pair = sensor.get().unwrap();
    assert!(pair.latitude.is_finite());
    assert_eq!(pair.latitude, 1e305);
}

#[test]
fn test_set_without_device_is_not_found() {
    let store = store_with_devices(&["accel"]);
    let before = store.snapshot();

    let err = SensorLocation::new(store.clone())
        .set(CoordinatePair::new(1.0, 2.0))
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.snapshot(), before);
}

#[test]
fn test_set_longitude_failure_keeps_latitude() {
    let store = store_with_devices(&["fake0"]);
    store.insert_value(&fake_path("fake0"), LATITUDE_PROPERTY, "10.00000").unwrap();
    store.insert_value(&fake_path("fake0"), LONGITUDE_PROPERTY, "20.00000").unwrap();
    store.fail_writes_to(LONGITUDE_PROPERTY).unwrap();

    let err = SensorLocation::new(store.clone())
        .set(CoordinatePair::new(11.0, 21.0))
        .unwrap_err();
    assert!(matches!(err, FakeGpsError::Store(_)));

    // The two writes are independent: the new latitude stays next to the old longitude
    assert_eq!(store.value(&fake_path("fake0"), LATITUDE_PROPERTY).as_deref(), Some("11.00000"));
    assert_eq!(store.value(&fake_path("fake0"), LONGITUDE_PROPERTY).as_deref(), Some("20.00000"));
}

#[test]
fn test_set_latitude_failure_reports_cause() {
    let store = store_with_devices(&["fake0"]);
    store.fail_writes_to(LATITUDE_PROPERTY).unwrap();

    let err = SensorLocation::new(store)
        .set(CoordinatePair::new(1.0, 2.0))
        .unwrap_err();
    match err {
        FakeGpsError::Store(msg) => assert!(msg.contains("sensor_property_latitude")),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_get_with_missing_longitude_is_not_found() {
    let store = store_with_devices(&["fake0"]);
    store.insert_value(&fake_path("fake0"), LATITUDE_PROPERTY, "10.00000").unwrap();

    let err = SensorLocation::new(store).get().unwrap_err();
    assert!(err.is_not_found());
    let msg = err.to_string();
    assert!(msg.contains(LONGITUDE_PROPERTY));
    assert!(!msg.contains(LATITUDE_PROPERTY));
}

#[test]
fn test_get_with_no_values_names_both() {
    let sensor = SensorLocation::new(store_with_devices(&["fake0"]));

    let msg = sensor.get().unwrap_err().to_string();
    assert!(msg.contains(LATITUDE_PROPERTY));
    assert!(msg.contains(LONGITUDE_PROPERTY));
}

#[test]
fn test_get_without_device_is_not_found() {
    let sensor = SensorLocation::new(store_with_devices(&[]));
    assert!(sensor.get().unwrap_err().is_not_found());
}

#[test]
fn test_get_reads_values_written_elsewhere() {
    let store = store_with_devices(&["fake0"]);
    store.insert_value(&fake_path("fake0"), "sensor_property_latitude", "-12.5").unwrap();
    store.insert_value(&fake_path("fake0"), "sensor_property_longitude", "130").unwrap();

    let pair = SensorLocation::new(store).get().unwrap();
    assert_eq!(pair, CoordinatePair::new(-12.5, 130.0));
}
