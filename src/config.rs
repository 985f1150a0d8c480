//! On-disk configuration (JSON under the XDG config dir)
//!
//! Every field is optional in the file. A missing file means defaults; the
//! file is never written by the app.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::constants::{timing, tool};
use crate::controller::Timings;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Adjustment program, looked up on PATH unless it is a path
    #[serde(default = "default_tool")]
    pub tool: String,
    /// Backend passed with `-m`
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_tool() -> String {
    tool::DEFAULT_PROGRAM.to_string()
}

fn default_method() -> String {
    tool::DEFAULT_METHOD.to_string()
}

fn default_debounce_ms() -> u64 {
    timing::DEBOUNCE_MS
}

fn default_timeout_ms() -> u64 {
    timing::TOOL_TIMEOUT_MS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tool: default_tool(),
            method: default_method(),
            debounce_ms: default_debounce_ms(),
            timeout_ms: default_timeout_ms(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::config::FILENAME);
        path
    }

    /// Load from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config = Self::parse(&contents)
            .with_context(|| format!("Failed to parse config {:?}", path))?;

        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tool.trim().is_empty() {
            bail!("tool must not be empty");
        }
        if self.method.trim().is_empty() {
            bail!("method must not be empty");
        }
        if self.debounce_ms == 0 {
            bail!("debounce_ms must be greater than zero");
        }
        if self.timeout_ms == 0 {
            bail!("timeout_ms must be greater than zero");
        }
        Ok(())
    }

    pub fn timings(&self) -> Timings {
        Timings {
            debounce: Duration::from_millis(self.debounce_ms),
            deadline: Duration::from_millis(self.timeout_ms),
        }
    }

    pub fn tool(&self) -> crate::tool::Tool {
        crate::tool::Tool::new(&self.tool, &self.method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.tool, "redshift");
        assert_eq!(config.method, "randr");
        assert_eq!(
            config.timings(),
            Timings {
                debounce: Duration::from_millis(250),
                deadline: Duration::from_secs(3),
            }
        );
    }

    #[test]
    fn test_parse_partial_fills_defaults() {
        let config = Config::parse(r#"{ "method": "vidmode", "timeout_ms": 5000 }"#).unwrap();
        assert_eq!(config.method, "vidmode");
        assert_eq!(config.timeout_ms, 5000);
        assert_eq!(config.tool, "redshift");
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_parse_empty_object() {
        assert_eq!(Config::parse("{}").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_rejects_zero_timings() {
        assert!(Config::parse(r#"{ "debounce_ms": 0 }"#).is_err());
        assert!(Config::parse(r#"{ "timeout_ms": 0 }"#).is_err());
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(Config::parse("{ tool = redshift }").is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("screen-dimmer-no-such-config.json");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir()
            .join(format!("screen-dimmer-config-{}.json", std::process::id()));
        fs::write(&path, r#"{ "tool": "/usr/bin/redshift", "debounce_ms": 100 }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(config.tool, "/usr/bin/redshift");
        assert_eq!(config.timings().debounce, Duration::from_millis(100));
        assert_eq!(config.tool().name(), "redshift");
    }
}
