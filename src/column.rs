//! Host column contract.
//!
//! A table holds columns of differing encodings behind [`Column`] so it can
//! size, clear, copy, render and reorder them uniformly.

use crate::error::Result;
use std::cmp::Ordering;
use std::fmt;

/// Discriminator a host table uses to dispatch on column encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ColumnType {
    /// Packed time of day, see [`crate::packed`].
    LocalTime,
}

impl ColumnType {
    /// The raw value stored for a missing entry.
    pub fn missing_value(self) -> i64 {
        match self {
            ColumnType::LocalTime => crate::packed::MISSING as i64,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColumnType::LocalTime => "local_time",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compares two row positions by the values stored at them.
pub type RowComparator<'a> = Box<dyn Fn(usize, usize) -> Ordering + 'a>;

/// Operations every column offers to a host table.
pub trait Column: fmt::Debug {
    /// Returns the identifying label of the column.
    fn name(&self) -> &str;

    fn column_type(&self) -> ColumnType;

    /// Returns the number of stored rows.
    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Removes every row.
    fn clear(&mut self);

    /// A column of the same kind and name with no rows.
    fn empty_copy(&self) -> Box<dyn Column>;

    /// Converts `text` and appends it.
    fn add_cell(&mut self, text: &str) -> Result<()>;

    /// Renders the value at `row`.
    fn get_string(&self, row: usize) -> Result<String>;

    /// Comparator over row positions of this column.
    ///
    /// Both rows must be in range.
    fn row_comparator(&self) -> RowComparator<'_>;

    /// A new column holding this column's values in ascending order.
    fn sort_ascending(&self) -> Box<dyn Column>;

    /// A new column holding this column's values in descending order.
    fn sort_descending(&self) -> Box<dyn Column>;

    /// Number of distinct stored values, missing counted once.
    fn count_unique(&self) -> usize;

    /// Row positions ordered by this column's values.
    ///
    /// The sort is stable, so rows with equal values keep their original
    /// relative order. A host applies the permutation to every parallel
    /// column to reorder the table consistently.
    fn sorted_rows(&self, descending: bool) -> Vec<usize> {
        let cmp = self.row_comparator();
        let mut rows: Vec<usize> = (0..self.size()).collect();
        if descending {
            rows.sort_by(|&a, &b| cmp(b, a));
        } else {
            rows.sort_by(|&a, &b| cmp(a, b));
        }
        rows
    }
}
