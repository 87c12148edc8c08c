//! Config loading from disk.

use std::{fs, time::Duration};

use skyview::{
    constants::{DEFAULT_CONFIG_CONTENT, DEFAULT_UPDATE_RATE, DEFAULT_WIDGET_ERROR},
    options::Config,
};

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();

    assert!(Config::load(&dir.path().join("nope.toml")).is_err());
}

#[test]
fn shipped_default_config_parses_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("skyview.toml");
    fs::write(&path, DEFAULT_CONFIG_CONTENT).unwrap();

    // Everything in the shipped file is commented out, so loading it must
    // behave exactly like an empty config.
    let config = Config::load(&path).unwrap();
    assert_eq!(config.update_rate().unwrap(), DEFAULT_UPDATE_RATE);
    assert_eq!(
        config.render_settings().unwrap().error_message,
        DEFAULT_WIDGET_ERROR
    );
}

#[test]
fn values_survive_a_disk_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("skyview.toml");
    fs::write(
        &path,
        r#"
            [strings]
            widget_error = "Sin datos"

            [refresh]
            rate = "90s"
        "#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.update_rate().unwrap(), Duration::from_secs(90));
    assert_eq!(config.render_settings().unwrap().error_message, "Sin datos");
}

#[test]
fn garbage_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("skyview.toml");
    fs::write(&path, "this is not a config file").unwrap();

    assert!(Config::load(&path).is_err());
}
