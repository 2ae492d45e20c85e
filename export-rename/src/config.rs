//! Configuration for export-rename
//!
//! # Settings Sources Priority
//!
//! 1. Command-line arguments
//! 2. Environment variables (`EXPORT_RENAME_*`, read by the CLI parser)
//! 3. TOML configuration file
//! 4. Interactive prompt, or a built-in default for settings that are never
//!    prompted for
//!
//! The TOML file is optional. It is taken from `--config` when given, otherwise
//! from `<config dir>/export-rename/config.toml` if that exists.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::services::rename_processor::CollisionPolicy;
use crate::{Error, Result};

/// Manifest file expected in the input directory
pub const MANIFEST_FILE_NAME: &str = "metadata.json";

/// Results log written to the output directory
pub const DEFAULT_LOG_FILE_NAME: &str = "results.log";

/// Defaults loaded from the TOML configuration file
///
/// ```toml
/// input_dir = "/home/me/exports/voice"
/// output_dir = "/home/me/Music/voice"
/// convert_mpga_to_mp3 = true
/// write_log = true
/// on_collision = "suffix"
///
/// [logging]
/// level = "info"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub input_dir: Option<PathBuf>,

    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    #[serde(default)]
    pub convert_mpga_to_mp3: Option<bool>,

    #[serde(default)]
    pub write_log: Option<bool>,

    #[serde(default)]
    pub on_collision: Option<CollisionPolicy>,

    /// Results log file name (default: `results.log`)
    #[serde(default)]
    pub log_file_name: Option<String>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log filter directive (trace, debug, info, warn, error, or a full
    /// `EnvFilter` directive)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl TomlConfig {
    /// Load and parse a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse TOML {}: {}", path.display(), e)))
    }

    /// Load the explicit config file, else the default one if present
    ///
    /// Returns the configuration and the file it came from, if any. An explicit
    /// path that does not exist is an error; a missing default file is not.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            let config = Self::load(path)?;
            info!("Loaded TOML configuration from {}", path.display());
            return Ok((config, Some(path.to_path_buf())));
        }

        match default_config_path() {
            Some(path) if path.is_file() => {
                let config = Self::load(&path)?;
                info!("Loaded TOML configuration from {}", path.display());
                Ok((config, Some(path)))
            }
            _ => Ok((Self::default(), None)),
        }
    }
}

/// Platform configuration file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("export-rename").join("config.toml"))
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub convert_mpga_to_mp3: Option<bool>,
    pub write_log: Option<bool>,
    pub on_collision: Option<CollisionPolicy>,
    /// Answer the pre-flight confirmation with "yes"
    pub assume_yes: bool,
}

/// Settings known before the session starts
///
/// `None` fields are asked for interactively.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub convert_mpga_to_mp3: Option<bool>,
    pub write_log: Option<bool>,
    pub assume_yes: bool,
    pub on_collision: CollisionPolicy,
    pub log_file_name: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            input_dir: None,
            output_dir: None,
            convert_mpga_to_mp3: None,
            write_log: None,
            assume_yes: false,
            on_collision: CollisionPolicy::default(),
            log_file_name: DEFAULT_LOG_FILE_NAME.to_string(),
        }
    }
}

impl SessionSettings {
    /// Merge overrides over file configuration
    pub fn resolve(overrides: ConfigOverrides, toml_config: &TomlConfig) -> Result<Self> {
        let log_file_name = toml_config
            .log_file_name
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_FILE_NAME.to_string());
        validate_log_file_name(&log_file_name)?;

        Ok(Self {
            input_dir: overrides.input_dir.or_else(|| toml_config.input_dir.clone()),
            output_dir: overrides
                .output_dir
                .or_else(|| toml_config.output_dir.clone()),
            convert_mpga_to_mp3: overrides
                .convert_mpga_to_mp3
                .or(toml_config.convert_mpga_to_mp3),
            write_log: overrides.write_log.or(toml_config.write_log),
            assume_yes: overrides.assume_yes,
            on_collision: overrides
                .on_collision
                .or(toml_config.on_collision)
                .unwrap_or_default(),
            log_file_name,
        })
    }
}

/// The log file name must be a plain file name inside the output directory
fn validate_log_file_name(name: &str) -> Result<()> {
    let path = Path::new(name);
    let is_plain = !name.is_empty()
        && path.file_name().map(|f| f == path.as_os_str()).unwrap_or(false);
    if is_plain {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "log_file_name must be a plain file name, got {:?}",
            name
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: TomlConfig = toml::from_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_full_toml_parses() {
        let config: TomlConfig = toml::from_str(
            r#"
            input_dir = "/exports"
            output_dir = "/music"
            convert_mpga_to_mp3 = true
            write_log = false
            on_collision = "fail"
            log_file_name = "rename.log"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.input_dir, Some(PathBuf::from("/exports")));
        assert_eq!(config.convert_mpga_to_mp3, Some(true));
        assert_eq!(config.write_log, Some(false));
        assert_eq!(config.on_collision, Some(CollisionPolicy::Fail));
        assert_eq!(config.log_file_name.as_deref(), Some("rename.log"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(toml::from_str::<TomlConfig>("input_directory = \"/x\"").is_err());
        assert!(toml::from_str::<TomlConfig>("on_collision = \"rename\"").is_err());
    }

    #[test]
    fn test_overrides_take_priority() {
        let toml_config = TomlConfig {
            input_dir: Some(PathBuf::from("/from-toml")),
            output_dir: Some(PathBuf::from("/out-toml")),
            convert_mpga_to_mp3: Some(true),
            on_collision: Some(CollisionPolicy::Overwrite),
            ..Default::default()
        };
        let overrides = ConfigOverrides {
            input_dir: Some(PathBuf::from("/from-cli")),
            convert_mpga_to_mp3: Some(false),
            ..Default::default()
        };

        let settings = SessionSettings::resolve(overrides, &toml_config).unwrap();
        assert_eq!(settings.input_dir, Some(PathBuf::from("/from-cli")));
        assert_eq!(settings.output_dir, Some(PathBuf::from("/out-toml")));
        assert_eq!(settings.convert_mpga_to_mp3, Some(false));
        assert_eq!(settings.write_log, None);
        assert_eq!(settings.on_collision, CollisionPolicy::Overwrite);
        assert_eq!(settings.log_file_name, DEFAULT_LOG_FILE_NAME);
    }

    #[test]
    fn test_log_file_name_must_be_plain() {
        for bad in ["", "../results.log", "logs/results.log", "/tmp/results.log"] {
            let toml_config = TomlConfig {
                log_file_name: Some(bad.to_string()),
                ..Default::default()
            };
            let result = SessionSettings::resolve(ConfigOverrides::default(), &toml_config);
            assert!(matches!(result, Err(Error::Config(_))), "accepted {:?}", bad);
        }
    }
}
