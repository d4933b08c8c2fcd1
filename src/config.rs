//! Column configuration.
//!
//! Controls storage sizing and how raw text is turned into packed times.
//! Serializable so it can be loaded from JSON or (with the `toml` feature)
//! TOML alongside the rest of a host's settings.
//!
//! ```rust
//! use timecol::ColumnConfig;
//!
//! let json = r#"{
//!     "default_capacity": 1024,
//!     "missing_indicators": ["NA", "?"],
//!     "missing_case_sensitive": false
//! }"#;
//! let config = ColumnConfig::from_json(json).unwrap();
//! assert_eq!(config.default_capacity, 1024);
//! assert_eq!(config.compact_slack, 100);
//! ```

use crate::error::{ColumnError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnConfig {
    /// Capacity of a freshly created or cleared column
    #[serde(default = "ColumnConfig::default_capacity")]
    pub default_capacity: usize,

    /// Spare slots left behind by `compact`
    #[serde(default = "ColumnConfig::default_compact_slack")]
    pub compact_slack: usize,

    /// Text treated as a missing value, in addition to blank text and `-1`
    #[serde(default = "ColumnConfig::default_missing_indicators")]
    pub missing_indicators: Vec<String>,

    #[serde(default = "ColumnConfig::default_missing_case_sensitive")]
    pub missing_case_sensitive: bool,

    /// chrono format strings tried in order when parsing time text
    #[serde(default = "ColumnConfig::default_time_formats")]
    pub time_formats: Vec<String>,

    /// Rendered in place of a missing value
    #[serde(default)]
    pub missing_display: String,
}

impl ColumnConfig {
    const fn default_capacity() -> usize {
        128
    }

    const fn default_compact_slack() -> usize {
        100
    }

    const fn default_missing_case_sensitive() -> bool {
        true
    }

    fn default_missing_indicators() -> Vec<String> {
        ["NaN", "*", "NA", "null", "N/A"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn default_time_formats() -> Vec<String> {
        [
            "%H%M",
            "%H:%M",
            "%H:%M:%S",
            "%H:%M:%S%.f",
            "%I:%M %p",
            "%I:%M:%S %p",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    pub fn with_default_capacity(mut self, capacity: usize) -> Self {
        self.default_capacity = capacity;
        self
    }

    pub fn with_compact_slack(mut self, slack: usize) -> Self {
        self.compact_slack = slack;
        self
    }

    pub fn with_missing_indicators<I, S>(mut self, indicators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.missing_indicators = indicators.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_missing_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.missing_case_sensitive = case_sensitive;
        self
    }

    /// Replace the accepted time formats. Tried in the given order.
    pub fn with_time_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.time_formats = formats.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_missing_display(mut self, placeholder: impl Into<String>) -> Self {
        self.missing_display = placeholder.into();
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.time_formats.is_empty() {
            return Err(ColumnError::InvalidConfig(
                "At least one time format is required".into(),
            ));
        }

        if let Some(fmt) = self.time_formats.iter().find(|f| f.trim().is_empty()) {
            return Err(ColumnError::InvalidConfig(format!(
                "Time format must not be blank, got: {:?}",
                fmt
            )));
        }

        if self.missing_indicators.iter().any(|s| s.trim().is_empty()) {
            return Err(ColumnError::InvalidConfig(
                "Blank text is always missing; remove empty missing indicators".into(),
            ));
        }

        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ColumnConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: ColumnConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a file, choosing the format by extension.
    ///
    /// `.toml` files need the `toml` feature; everything else is read as JSON.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        log::debug!("Loading column configuration from {}", path.display());

        match path.extension().and_then(|ext| ext.to_str()) {
            #[cfg(feature = "toml")]
            Some("toml") => Self::from_toml(&contents),
            #[cfg(not(feature = "toml"))]
            Some("toml") => Err(ColumnError::ConfigFormat(format!(
                "{}: TOML support requires the 'toml' feature",
                path.display()
            ))),
            _ => Self::from_json(&contents),
        }
    }
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            default_capacity: Self::default_capacity(),
            compact_slack: Self::default_compact_slack(),
            missing_indicators: Self::default_missing_indicators(),
            missing_case_sensitive: Self::default_missing_case_sensitive(),
            time_formats: Self::default_time_formats(),
            missing_display: String::new(),
        }
    }
}
