// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::config::consts::DEFAULT_LOG_FILTER;
use crate::config::ResolvedOptions;
use crate::errors::ConfigError;

/// Top-level configuration for the bridge binary.
///
/// # Example
/// ```yaml
/// logging:
///   filter: "info,sk_to_n2k=debug"
/// conversions:
///   ENGINE_PARAMETERS:
///     enabled: true
///     engines:
///       - signalkId: port
///         instanceId: 0
///   SYSTEM_TIME:
///     enabled: true
///     interval_ms: 1000
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub conversions: ResolvedOptions,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

/// File formats accepted by [`load_config`], picked by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "toml" => Ok(ConfigFormat::Toml),
            "json" => Ok(ConfigFormat::Json),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Parse configuration text in the given format.
pub fn parse_config(content: &str, format: ConfigFormat, origin: &str) -> Result<BridgeConfig, ConfigError> {
    let parse_error = |reason: String| ConfigError::Parse {
        path: origin.to_string(),
        reason,
    };

    match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string())),
        ConfigFormat::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string())),
        ConfigFormat::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string())),
    }
}

/// Load a config from a YAML, TOML or JSON file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<BridgeConfig, ConfigError> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    parse_config(&content, format, &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_yaml_config() {
        let file = write_temp(
            ".yaml",
            r#"
logging:
  filter: debug
conversions:
  ENGINE_PARAMETERS:
    enabled: true
    engines:
      - signalkId: port
        instanceId: 0
"#,
        );

        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.logging.filter, "debug");
        let engine = cfg.conversions.enabled("ENGINE_PARAMETERS").unwrap();
        assert_eq!(engine.option_key(), "ENGINE_PARAMETERS");
        assert!(engine.settings.contains_key("engines"));
    }

    #[test]
    fn loads_toml_config() {
        let file = write_temp(
            ".toml",
            r#"
[conversions.SYSTEM_TIME]
enabled = true
interval_ms = 500
"#,
        );

        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.logging.filter, DEFAULT_LOG_FILTER);
        let options = cfg.conversions.enabled("SYSTEM_TIME").unwrap();
        assert_eq!(options.setting::<u64>("interval_ms").unwrap(), 500);
    }

    #[test]
    fn loads_json_config() {
        let file = write_temp(
            ".json",
            r#"{ "conversions": { "SYSTEM_TIME": { "enabled": false } } }"#,
        );

        let cfg = load_config(file.path()).unwrap();
        assert!(cfg.conversions.get("SYSTEM_TIME").is_some());
        assert!(cfg.conversions.enabled("SYSTEM_TIME").is_none());
    }

    #[test]
    fn empty_sections_default() {
        let cfg = parse_config("{}", ConfigFormat::Yaml, "inline").unwrap();
        assert!(cfg.conversions.is_empty());
        assert_eq!(cfg.logging.filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn rejects_unknown_extension() {
        let file = write_temp(".ini", "x=1");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(ref ext) if ext == "ini"));
    }

    #[test]
    fn reports_parse_errors_with_origin() {
        let err = parse_config("conversions: [", ConfigFormat::Yaml, "broken.yaml").unwrap_err();
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config("/nonexistent/bridge.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
