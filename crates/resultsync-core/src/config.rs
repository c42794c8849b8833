//! Controller and logging configuration.
//!
//! Configuration is injected at controller construction instead of living in
//! process-wide globals. It can be built in code or loaded from TOML:
//!
//! ```toml
//! name = "inbox"
//! max_cycles_per_drain = 8
//!
//! [log]
//! verbosity = "debug"
//! name_filter = ["controller", "diff"]
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ResultSyncError};

fn default_name() -> String {
    "results".to_string()
}

fn default_max_cycles_per_drain() -> usize {
    16
}

/// Log verbosity, from silent to everything
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// Level name as understood by `EnvFilter` directives
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Off => "off",
            Verbosity::Error => "error",
            Verbosity::Warn => "warn",
            Verbosity::Info => "info",
            Verbosity::Debug => "debug",
            Verbosity::Trace => "trace",
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Verbosity {
    type Err = ResultSyncError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(Verbosity::Off),
            "error" => Ok(Verbosity::Error),
            "warn" => Ok(Verbosity::Warn),
            "info" => Ok(Verbosity::Info),
            "debug" => Ok(Verbosity::Debug),
            "trace" => Ok(Verbosity::Trace),
            other => Err(ResultSyncError::InvalidConfig {
                reason: format!("unknown verbosity '{}'", other),
            }),
        }
    }
}

/// Which modules log, and how much
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub verbosity: Verbosity,
    /// Module names under `resultsync_core` to enable; `None` enables all
    pub name_filter: Option<Vec<String>>,
}

impl LogConfig {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            name_filter: None,
        }
    }

    /// Restrict logging to the named modules
    pub fn with_name_filter<I, T>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.name_filter = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Render as `EnvFilter` directives
    ///
    /// Without a name filter this is `resultsync_core=<level>`; with one,
    /// each name becomes `resultsync_core::<name>=<level>`.
    pub fn env_filter_directives(&self) -> String {
        let level = self.verbosity.as_str();
        match &self.name_filter {
            None => format!("resultsync_core={}", level),
            Some(names) if names.is_empty() => "resultsync_core=off".to_string(),
            Some(names) => names
                .iter()
                .map(|name| format!("resultsync_core::{}={}", name, level))
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

/// Settings injected into a [`ResultsController`](crate::ResultsController)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Name carried on every log event of this controller
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default)]
    pub log: LogConfig,

    /// Upper bound on cycles run by one `process_pending` call
    #[serde(default = "default_max_cycles_per_drain")]
    pub max_cycles_per_drain: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log: LogConfig::default(),
            max_cycles_per_drain: default_max_cycles_per_drain(),
        }
    }
}

impl ControllerConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// Returns [`ResultSyncError::InvalidConfig`] if the document does not
    /// parse or fails validation.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: ControllerConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    ///
    /// Returns [`ResultSyncError::Io`] if the file cannot be read, otherwise
    /// as [`ControllerConfig::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// # Errors
    ///
    /// Returns [`ResultSyncError::InvalidConfig`] for an empty name or a zero
    /// cycle bound.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ResultSyncError::InvalidConfig {
                reason: "controller name must not be empty".to_string(),
            });
        }
        if self.max_cycles_per_drain == 0 {
            return Err(ResultSyncError::InvalidConfig {
                reason: "max_cycles_per_drain must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ControllerConfig::default();
        assert_eq!(config.name, "results");
        assert_eq!(config.log.verbosity, Verbosity::Info);
        assert_eq!(config.log.name_filter, None);
        assert_eq!(config.max_cycles_per_drain, 16);
    }

    #[test]
    fn test_parse_full_document() {
        let config = ControllerConfig::from_toml_str(
            r#"
            name = "inbox"
            max_cycles_per_drain = 4

            [log]
            verbosity = "debug"
            name_filter = ["controller"]
            "#,
        )
        .unwrap();
        assert_eq!(config.name, "inbox");
        assert_eq!(config.max_cycles_per_drain, 4);
        assert_eq!(config.log.verbosity, Verbosity::Debug);
        assert_eq!(
            config.log.env_filter_directives(),
            "resultsync_core::controller=debug"
        );
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ControllerConfig::from_toml_str("").unwrap();
        assert_eq!(config, ControllerConfig::default());
    }

    #[test]
    fn test_zero_cycle_bound_rejected() {
        let err = ControllerConfig::from_toml_str("max_cycles_per_drain = 0").unwrap_err();
        assert!(matches!(err, ResultSyncError::InvalidConfig { .. }));
    }

    #[test]
    fn test_unknown_verbosity_rejected() {
        assert!(ControllerConfig::from_toml_str("[log]\nverbosity = \"loud\"").is_err());
        assert!("loud".parse::<Verbosity>().is_err());
        assert_eq!("WARN".parse::<Verbosity>().unwrap(), Verbosity::Warn);
    }

    #[test]
    fn test_directives_without_filter() {
        let log = LogConfig::new(Verbosity::Trace);
        assert_eq!(log.env_filter_directives(), "resultsync_core=trace");
        let log = LogConfig::new(Verbosity::Warn).with_name_filter(["diff", "snapshot"]);
        assert_eq!(
            log.env_filter_directives(),
            "resultsync_core::diff=warn,resultsync_core::snapshot=warn"
        );
    }
}
