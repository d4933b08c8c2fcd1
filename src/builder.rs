//! Column builder for bulk construction.
//!
//! ```rust
//! use timecol::{ColumnConfig, TimeColumnBuilder};
//!
//! let col = TimeColumnBuilder::new("shift_start")
//!     .config(ColumnConfig::default().with_missing_indicators(["?"]))
//!     .capacity(4)
//!     .build_from_cells(["0700", "?", "1500", "2300"])?;
//!
//! assert_eq!(col.size(), 4);
//! assert_eq!(col.get_string(1)?, "");
//! # Ok::<(), timecol::ColumnError>(())
//! ```

use crate::config::ColumnConfig;
use crate::error::Result;
use crate::parse::TimeParser;
use crate::time_column::TimeColumn;
use std::path::Path;
use std::sync::Arc;

/// Builder for [`TimeColumn`] with custom configuration and sizing.
#[derive(Debug)]
pub struct TimeColumnBuilder {
    name: String,
    capacity: Option<usize>,
    config: ColumnConfig,
    compact: bool,
}

impl TimeColumnBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capacity: None,
            config: ColumnConfig::default(),
            compact: false,
        }
    }

    /// Initial capacity. Defaults to the configuration's `default_capacity`.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn config(mut self, config: ColumnConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON or TOML file.
    pub fn config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        self.config = ColumnConfig::from_path(path)?;
        Ok(self)
    }

    /// Compact storage after [`build_from_cells`](Self::build_from_cells)
    /// or [`build_from_packed`](Self::build_from_packed) finishes.
    pub fn compact_after_load(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Builds an empty column.
    pub fn build(self) -> Result<TimeColumn> {
        self.config.validate()?;
        let capacity = self.capacity.unwrap_or(self.config.default_capacity);
        let parser = if self.config == ColumnConfig::default() {
            TimeParser::shared_default()
        } else {
            Arc::new(TimeParser::from_config(&self.config))
        };
        Ok(TimeColumn::with_parts(
            self.name,
            capacity,
            parser,
            &self.config,
        ))
    }

    /// Builds a column and appends every cell in order.
    ///
    /// Stops at the first cell that fails to parse.
    pub fn build_from_cells<I, S>(self, cells: I) -> Result<TimeColumn>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let compact = self.compact;
        let mut col = self.build()?;
        for cell in cells {
            col.add_cell(cell.as_ref())?;
        }
        if compact {
            col.compact();
        }
        Ok(col)
    }

    /// Builds a column from already packed values.
    pub fn build_from_packed<I>(self, values: I) -> Result<TimeColumn>
    where
        I: IntoIterator<Item = i32>,
    {
        let compact = self.compact;
        let mut col = self.build()?;
        for value in values {
            col.add(value);
        }
        if compact {
            col.compact();
        }
        Ok(col)
    }
}
