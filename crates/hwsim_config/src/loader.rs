//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::HwsimConfig;
use std::path::Path;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE_NAME: &str = "hwsim.toml";

/// Loads `<dir>/hwsim.toml`, or returns the default configuration if the
/// file does not exist.
pub fn load_config(dir: &Path) -> Result<HwsimConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.is_file() {
        return Ok(HwsimConfig::default());
    }
    load_config_file(&config_path)
}

/// Loads and validates the configuration file at `path`.
pub fn load_config_file(path: &Path) -> Result<HwsimConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates an `hwsim.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<HwsimConfig, ConfigError> {
    let config: HwsimConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that configuration values are usable.
fn validate_config(config: &HwsimConfig) -> Result<(), ConfigError> {
    if config.simulation.max_call_depth == 0 {
        return Err(ConfigError::ValidationError(
            "simulation.max_call_depth must be positive".to_string(),
        ));
    }
    if let Some(path) = &config.output.waveform {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "output.waveform must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OutputFormat, DEFAULT_MAX_CALL_DEPTH};
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn empty_config_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.simulation.max_call_depth, DEFAULT_MAX_CALL_DEPTH);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.output.waveform.is_none());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[simulation]
max_call_depth = 64

[output]
format = "json"
waveform = "out/trace.vcd"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.simulation.max_call_depth, 64);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(
            config.output.waveform,
            Some(PathBuf::from("out/trace.vcd"))
        );
    }

    #[test]
    fn zero_call_depth_rejected() {
        let err = load_config_from_str("[simulation]\nmax_call_depth = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn empty_waveform_path_rejected() {
        let err = load_config_from_str("[output]\nwaveform = \"\"").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn unknown_format_rejected() {
        let err = load_config_from_str("[output]\nformat = \"xml\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn unknown_field_rejected() {
        let err = load_config_from_str("[simulation]\ncycles = 3").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn missing_file_yields_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.simulation.max_call_depth, DEFAULT_MAX_CALL_DEPTH);
    }

    #[test]
    fn load_from_directory() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "[simulation]\nmax_call_depth = 12\n",
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.simulation.max_call_depth, 12);
    }

    #[test]
    fn explicit_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_config_file(&tmp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
