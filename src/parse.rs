//! Text to packed-time conversion.

use crate::config::ColumnConfig;
use crate::error::{ColumnError, Result};
use crate::packed::{self, MISSING};
use chrono::NaiveTime;
use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// Always treated as missing, whatever the configured indicators are.
const LEGACY_MISSING: &str = "-1";

/// Short time text is left-padded with zeros to this many characters.
const CANONICAL_WIDTH: usize = 4;

static DEFAULT_PARSER: Lazy<Arc<TimeParser>> =
    Lazy::new(|| Arc::new(TimeParser::from_config(&ColumnConfig::default())));

/// Converts raw cell text into packed times.
///
/// Built once from a [`ColumnConfig`] and shared between a column and its
/// copies.
#[derive(Debug, Clone)]
pub struct TimeParser {
    missing: FxHashSet<String>,
    case_sensitive: bool,
    formats: Vec<String>,
    missing_display: String,
}

impl TimeParser {
    pub fn from_config(config: &ColumnConfig) -> Self {
        let case_sensitive = config.missing_case_sensitive;
        let missing = config
            .missing_indicators
            .iter()
            .map(|s| {
                if case_sensitive {
                    s.clone()
                } else {
                    s.to_lowercase()
                }
            })
            .collect();

        Self {
            missing,
            case_sensitive,
            formats: config.time_formats.clone(),
            missing_display: config.missing_display.clone(),
        }
    }

    /// Parser built from the default configuration.
    pub fn shared_default() -> Arc<TimeParser> {
        Arc::clone(&DEFAULT_PARSER)
    }

    /// Returns true if `text` denotes a missing value.
    pub fn is_missing_text(&self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() || text == LEGACY_MISSING {
            return true;
        }
        if self.case_sensitive {
            self.missing.contains(text)
        } else {
            self.missing.contains(&text.to_lowercase())
        }
    }

    /// Parses `text` into a packed time.
    ///
    /// Blank text, `-1` and configured missing indicators yield
    /// [`MISSING`]. Text shorter than four characters is zero-padded on the
    /// left first, so `"900"` reads as `09:00`.
    pub fn parse_text(&self, text: &str) -> Result<i32> {
        if self.is_missing_text(text) {
            return Ok(MISSING);
        }
        self.parse_time(text).map(packed::pack)
    }

    /// `None` is treated like blank text.
    pub fn parse_optional(&self, text: Option<&str>) -> Result<i32> {
        match text {
            Some(text) => self.parse_text(text),
            None => Ok(MISSING),
        }
    }

    fn parse_time(&self, text: &str) -> Result<NaiveTime> {
        let text = text.trim();
        let padded = pad_start(text, CANONICAL_WIDTH, '0');

        let mut last_err = None;
        for fmt in &self.formats {
            match NaiveTime::parse_from_str(&padded, fmt) {
                Ok(time) => return Ok(time),
                Err(e) => last_err = Some(e),
            }
        }

        let reason = match last_err {
            Some(e) => e.to_string(),
            None => "no time formats configured".to_string(),
        };
        Err(ColumnError::parse(text, reason))
    }

    pub fn missing_display(&self) -> &str {
        &self.missing_display
    }
}

impl Default for TimeParser {
    fn default() -> Self {
        Self::from_config(&ColumnConfig::default())
    }
}

fn pad_start(text: &str, width: usize, fill: char) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let mut out = String::with_capacity(width);
    out.extend(std::iter::repeat_n(fill, width - len));
    out.push_str(text);
    out
}
