//! Configuration file loading tests

use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use export_rename::config::{ConfigOverrides, SessionSettings, TomlConfig};
use export_rename::{CollisionPolicy, Error};

#[test]
fn test_explicit_config_file_loaded() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("rename.toml");
    fs::write(
        &path,
        r#"
output_dir = "/music/voice"
write_log = true
on_collision = "overwrite"
"#,
    )
    .unwrap();

    let (config, source) = TomlConfig::load_or_default(Some(&path)).unwrap();

    assert_eq!(source, Some(path));
    assert_eq!(config.output_dir, Some(PathBuf::from("/music/voice")));
    assert_eq!(config.write_log, Some(true));
    assert_eq!(config.on_collision, Some(CollisionPolicy::Overwrite));
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn test_explicit_config_file_missing_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.toml");

    let result = TomlConfig::load_or_default(Some(&path));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_invalid_toml_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    fs::write(&path, "write_log = \"sometimes\"").unwrap();

    match TomlConfig::load(&path) {
        Err(Error::Config(message)) => assert!(message.contains("broken.toml")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_default_config_file_found_via_xdg() {
    let temp_dir = TempDir::new().unwrap();
    let config_dir = temp_dir.path().join("export-rename");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "convert_mpga_to_mp3 = true\n").unwrap();

    let previous = std::env::var_os("XDG_CONFIG_HOME");
    std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    let loaded = TomlConfig::load_or_default(None);
    match previous {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }

    let (config, source) = loaded.unwrap();
    assert_eq!(source, Some(config_dir.join("config.toml")));
    assert_eq!(config.convert_mpga_to_mp3, Some(true));
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_no_default_config_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();

    let previous = std::env::var_os("XDG_CONFIG_HOME");
    std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    let loaded = TomlConfig::load_or_default(None);
    match previous {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }

    let (config, source) = loaded.unwrap();
    assert_eq!(source, None);
    assert_eq!(config, TomlConfig::default());
}

#[test]
fn test_file_values_fill_gaps_left_by_cli() {
    let toml_config: TomlConfig = toml::from_str(
        r#"
input_dir = "/exports"
convert_mpga_to_mp3 = false
log_file_name = "summary.log"
"#,
    )
    .unwrap();
    let overrides = ConfigOverrides {
        output_dir: Some(PathBuf::from("/cli-out")),
        assume_yes: true,
        ..Default::default()
    };

    let settings = SessionSettings::resolve(overrides, &toml_config).unwrap();

    assert_eq!(settings.input_dir, Some(PathBuf::from("/exports")));
    assert_eq!(settings.output_dir, Some(PathBuf::from("/cli-out")));
    assert_eq!(settings.convert_mpga_to_mp3, Some(false));
    assert_eq!(settings.on_collision, CollisionPolicy::Suffix);
    assert_eq!(settings.log_file_name, "summary.log");
    assert!(settings.assume_yes);
}
