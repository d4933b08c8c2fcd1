//! Error types for column operations.
//!
//! Every failure a column can produce is deterministic input validation, so
//! nothing here is retried internally. Hosts decide whether a bad row aborts a
//! bulk load or is skipped.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ColumnError>;

/// Errors raised by the packed-time codec and the time column.
#[derive(Debug, Error)]
pub enum ColumnError {
    /// Text was non-empty, not a missing indicator, and not a valid time.
    #[error("cannot parse '{text}' as a time of day: {reason}")]
    Parse { text: String, reason: String },

    /// An integer outside the packed range was presented for decoding.
    #[error("invalid packed time encoding: {0:#010x}")]
    InvalidEncoding(i32),

    /// Indexed access outside `[0, len)`.
    #[error("column '{column}' index {index} out of range for length {len}")]
    IndexOutOfRange {
        column: String,
        index: usize,
        len: usize,
    },

    /// A value could not be appended to a column.
    #[error("column '{column}': failed to append '{value}': {source}")]
    Append {
        column: String,
        value: String,
        #[source]
        source: Box<ColumnError>,
    },

    #[error("invalid column configuration: {0}")]
    InvalidConfig(String),

    #[error("configuration format error: {0}")]
    ConfigFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ColumnError {
    pub fn parse(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            text: text.into(),
            reason: reason.into(),
        }
    }

    pub fn index_out_of_range(column: impl Into<String>, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            column: column.into(),
            index,
            len,
        }
    }

    /// Wraps `source` with the column name and the offending input.
    pub fn append(column: impl Into<String>, value: impl Into<String>, source: ColumnError) -> Self {
        Self::Append {
            column: column.into(),
            value: value.into(),
            source: Box::new(source),
        }
    }

    /// Returns true when the error was caused by bad input text, either
    /// directly or wrapped by an append.
    pub fn is_parse_error(&self) -> bool {
        match self {
            ColumnError::Parse { .. } => true,
            ColumnError::Append { source, .. } => source.is_parse_error(),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for ColumnError {
    fn from(e: serde_json::Error) -> Self {
        ColumnError::ConfigFormat(e.to_string())
    }
}

#[cfg(feature = "toml")]
impl From<toml::de::Error> for ColumnError {
    fn from(e: toml::de::Error) -> Self {
        ColumnError::ConfigFormat(e.to_string())
    }
}

#[cfg(feature = "toml")]
impl From<toml::ser::Error> for ColumnError {
    fn from(e: toml::ser::Error) -> Self {
        ColumnError::ConfigFormat(e.to_string())
    }
}
