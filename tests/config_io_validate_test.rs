use gridsense::Config;
use gridsense::error::GridsenseError;

#[test]
fn save_and_reload_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gridsense_config.yaml");

    let mut config = Config::default();
    config.griddy.settlement_point = "LZ_NORTH".to_string();
    config.thresholds.high_price_cents = 3.5;
    config.save_to_file(&path).unwrap();

    let reloaded = Config::from_file(&path).unwrap();
    assert_eq!(reloaded.griddy.settlement_point, "LZ_NORTH");
    assert_eq!(reloaded.thresholds.high_price_cents, 3.5);
    assert!(reloaded.validate().is_ok());
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Config::from_file("/definitely/not/here.yaml").unwrap_err();
    assert!(matches!(err, GridsenseError::Io { .. }));
}

#[test]
fn malformed_yaml_is_a_serialization_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    std::fs::write(&path, "griddy: [not, a, mapping").unwrap();

    let err = Config::from_file(&path).unwrap_err();
    assert!(matches!(err, GridsenseError::Serialization { .. }));
}

#[test]
fn loaded_config_with_inverted_thresholds_fails_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gridsense_config.yaml");

    let mut config = Config::default();
    config.thresholds.low_price_percentage = 90.0;
    config.save_to_file(&path).unwrap();

    let reloaded = Config::from_file(&path).unwrap();
    let err = reloaded.validate().unwrap_err();
    assert!(matches!(err, GridsenseError::Validation { .. }));
}
