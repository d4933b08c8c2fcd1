//! Time-of-day column backed by packed `i32` values.
//!
//! Values are appended either as raw text, which goes through the column's
//! [`TimeParser`], or as already packed integers. Missing entries are stored
//! as [`MISSING`] and take part in sorting and equality like any other value.
//!
//! ```rust
//! use chrono::NaiveTime;
//! use timecol::TimeColumn;
//!
//! let mut col = TimeColumn::create("departure");
//! col.add_cell("900")?;
//! col.add_cell("")?;
//! col.add_cell("1430")?;
//!
//! let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
//! assert_eq!(col.size(), 3);
//! assert!(col.is_equal_to(nine).contains(0));
//! assert_eq!(col.get_string(2)?, "14:30");
//! # Ok::<(), timecol::ColumnError>(())
//! ```
//!
//! A column is meant for a single owner. The built-in cursor
//! (`has_next`/`next_value`/`reset`) is one shared traversal; use
//! [`TimeColumn::scan`] for independent passes. Wrap the column in
//! `SyncTimeColumn` (feature `sync`) to share it between threads.

use crate::column::{Column, ColumnType, RowComparator};
use crate::config::ColumnConfig;
use crate::error::{ColumnError, Result};
use crate::packed::{self, MISSING};
use crate::parse::TimeParser;
use chrono::NaiveTime;
use roaring::RoaringTreemap;
use rustc_hash::FxHashSet;
use std::cmp::Ordering;
use std::sync::Arc;

/// Smallest capacity a full column grows to.
const MIN_GROWTH: usize = 8;

#[derive(Debug, Clone)]
pub struct TimeColumn {
    name: String,
    data: Vec<i32>,
    // Position of the built-in forward cursor.
    cursor: usize,
    parser: Arc<TimeParser>,
    default_capacity: usize,
    compact_slack: usize,
}

impl TimeColumn {
    /// Creates an empty column with the default configuration.
    pub fn create(name: impl Into<String>) -> Self {
        let config = ColumnConfig::default();
        Self::with_parts(
            name.into(),
            config.default_capacity,
            TimeParser::shared_default(),
            &config,
        )
    }

    /// Creates an empty column with room for `capacity` values.
    pub fn with_capacity(name: impl Into<String>, capacity: usize) -> Self {
        Self::with_parts(
            name.into(),
            capacity,
            TimeParser::shared_default(),
            &ColumnConfig::default(),
        )
    }

    /// Creates an empty column using `config` for sizing and text parsing.
    pub fn with_config(name: impl Into<String>, config: &ColumnConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_parts(
            name.into(),
            config.default_capacity,
            Arc::new(TimeParser::from_config(config)),
            config,
        ))
    }

    pub(crate) fn with_parts(
        name: String,
        capacity: usize,
        parser: Arc<TimeParser>,
        config: &ColumnConfig,
    ) -> Self {
        Self {
            name,
            data: Vec::with_capacity(capacity),
            cursor: 0,
            parser,
            default_capacity: config.default_capacity,
            compact_slack: config.compact_slack,
        }
    }

    /// Builds a column from already packed values.
    pub fn from_packed<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        let mut col = Self::create(name);
        for value in values {
            col.add(value);
        }
        col
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        ColumnType::LocalTime
    }

    /// Number of stored values.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of values the column holds before it has to grow.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// The stored packed values in row order.
    pub fn values(&self) -> &[i32] {
        &self.data
    }

    pub fn parser(&self) -> &TimeParser {
        &self.parser
    }

    /// Appends a packed value, doubling the storage first when it is full.
    pub fn add(&mut self, packed: i32) {
        if self.data.len() == self.data.capacity() {
            self.grow();
        }
        self.data.push(packed);
    }

    pub fn add_time(&mut self, time: NaiveTime) {
        self.add(packed::pack(time));
    }

    pub fn add_missing(&mut self) {
        self.add(MISSING);
    }

    fn grow(&mut self) {
        let old = self.data.capacity();
        let new = (old * 2).max(MIN_GROWTH);
        self.data.reserve_exact(new - self.data.len());
        log::trace!(
            "column '{}' grew from {} to {} slots",
            self.name,
            old,
            self.data.capacity()
        );
    }

    /// Converts text to a packed time without storing it.
    pub fn convert(&self, text: &str) -> Result<i32> {
        self.parser.parse_text(text)
    }

    /// Parses `text` and appends the result.
    ///
    /// Rejected text is reported as [`ColumnError::Append`] naming this
    /// column and the input; nothing is appended in that case.
    pub fn add_cell(&mut self, text: &str) -> Result<()> {
        match self.parser.parse_text(text) {
            Ok(value) => {
                self.add(value);
                Ok(())
            }
            Err(e) => {
                log::warn!("column '{}' rejected cell {:?}: {}", self.name, text, e);
                Err(ColumnError::append(&self.name, text, e))
            }
        }
    }

    /// Like [`add_cell`](Self::add_cell); `None` appends a missing value.
    pub fn add_optional_cell(&mut self, text: Option<&str>) -> Result<()> {
        match text {
            Some(text) => self.add_cell(text),
            None => {
                self.add_missing();
                Ok(())
            }
        }
    }

    /// Returns the packed value at `index`.
    pub fn get(&self, index: usize) -> Result<i32> {
        self.data.get(index).copied().ok_or_else(|| {
            ColumnError::index_out_of_range(&self.name, index, self.data.len())
        })
    }

    /// Returns the decoded time at `index`, `None` when it is missing.
    pub fn get_time(&self, index: usize) -> Result<Option<NaiveTime>> {
        let value = self.get(index)?;
        if packed::is_missing(value) {
            return Ok(None);
        }
        packed::unpack(value).map(Some)
    }

    /// Renders the value at `row` for display.
    pub fn get_string(&self, row: usize) -> Result<String> {
        packed::display_with(self.get(row)?, self.parser.missing_display())
    }

    /// Rebuilds storage to the current size plus a fixed slack.
    ///
    /// Call once appends are finished to release the growth overhead.
    pub fn compact(&mut self) {
        let before = self.data.capacity();
        let mut compacted = Vec::with_capacity(self.data.len() + self.compact_slack);
        compacted.extend_from_slice(&self.data);
        self.data = compacted;
        log::debug!(
            "compacted column '{}' from {} to {} slots ({} values)",
            self.name,
            before,
            self.data.capacity(),
            self.data.len()
        );
    }

    /// Drops every value and returns to the default capacity.
    pub fn clear(&mut self) {
        log::debug!("clearing column '{}' ({} values)", self.name, self.data.len());
        self.data = Vec::with_capacity(self.default_capacity);
        self.cursor = 0;
    }

    /// A new column with the same name and configuration and no values.
    pub fn empty_copy(&self) -> TimeColumn {
        Self {
            name: self.name.clone(),
            data: Vec::with_capacity(self.default_capacity),
            cursor: 0,
            parser: Arc::clone(&self.parser),
            default_capacity: self.default_capacity,
            compact_slack: self.compact_slack,
        }
    }

    fn copy(&self) -> TimeColumn {
        let mut copy = self.empty_copy();
        copy.data = self.data.clone();
        copy
    }

    // ===== Built-in cursor =====

    pub fn has_next(&self) -> bool {
        self.cursor < self.data.len()
    }

    /// Returns the value under the cursor and advances it.
    ///
    /// Returns `None` once the cursor is exhausted.
    pub fn next_value(&mut self) -> Option<i32> {
        let value = self.data.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(value)
    }

    /// Rewinds the cursor to the first row.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Independent forward pass over the stored values.
    pub fn scan(&self) -> impl ExactSizeIterator<Item = i32> + '_ {
        self.data.iter().copied()
    }

    // ===== Sorting =====

    /// A copy of this column with its values in ascending order.
    ///
    /// Missing values sort first, since [`MISSING`] is `i32::MIN`.
    pub fn sort_ascending(&self) -> TimeColumn {
        let mut copy = self.copy();
        copy.data.sort_unstable();
        copy
    }

    /// A copy of this column with its values in descending order.
    ///
    /// Missing values sort last.
    pub fn sort_descending(&self) -> TimeColumn {
        let mut copy = self.copy();
        copy.data.sort_unstable_by(|a, b| b.cmp(a));
        copy
    }

    /// Compares the values stored at rows `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if either row is out of range.
    pub fn compare_rows(&self, a: usize, b: usize) -> Ordering {
        self.data[a].cmp(&self.data[b])
    }

    /// Comparator over row positions, for reordering parallel columns.
    pub fn row_comparator(&self) -> impl Fn(usize, usize) -> Ordering + '_ {
        move |a, b| self.compare_rows(a, b)
    }

    // ===== Queries =====

    /// Rows whose value equals `time`.
    pub fn is_equal_to(&self, time: NaiveTime) -> RoaringTreemap {
        self.is_equal_to_packed(packed::pack(time))
    }

    /// Rows whose stored value equals `packed`.
    ///
    /// Scans by index and leaves the built-in cursor untouched.
    pub fn is_equal_to_packed(&self, packed: i32) -> RoaringTreemap {
        let mut rows = RoaringTreemap::new();
        for (row, &value) in self.data.iter().enumerate() {
            if value == packed {
                rows.insert(row as u64);
            }
        }
        rows
    }

    /// Rows holding a missing value.
    pub fn missing_rows(&self) -> RoaringTreemap {
        self.is_equal_to_packed(MISSING)
    }

    /// Number of distinct values; all missing entries count as one.
    pub fn count_unique(&self) -> usize {
        self.data.iter().copied().collect::<FxHashSet<i32>>().len()
    }
}

impl Column for TimeColumn {
    fn name(&self) -> &str {
        TimeColumn::name(self)
    }

    fn column_type(&self) -> ColumnType {
        TimeColumn::column_type(self)
    }

    fn size(&self) -> usize {
        TimeColumn::size(self)
    }

    fn clear(&mut self) {
        TimeColumn::clear(self)
    }

    fn empty_copy(&self) -> Box<dyn Column> {
        Box::new(TimeColumn::empty_copy(self))
    }

    fn add_cell(&mut self, text: &str) -> Result<()> {
        TimeColumn::add_cell(self, text)
    }

    fn get_string(&self, row: usize) -> Result<String> {
        TimeColumn::get_string(self, row)
    }

    fn row_comparator(&self) -> RowComparator<'_> {
        Box::new(TimeColumn::row_comparator(self))
    }

    fn sort_ascending(&self) -> Box<dyn Column> {
        Box::new(TimeColumn::sort_ascending(self))
    }

    fn sort_descending(&self) -> Box<dyn Column> {
        Box::new(TimeColumn::sort_descending(self))
    }

    fn count_unique(&self) -> usize {
        TimeColumn::count_unique(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn sample() -> TimeColumn {
        let mut col = TimeColumn::create("arrival");
        for text in ["900", "", "1430", "-1"] {
            col.add_cell(text).unwrap();
        }
        col
    }

    #[test]
    fn test_new_column_is_empty() {
        let col = TimeColumn::create("arrival");
        assert!(col.is_empty());
        assert_eq!(col.size(), 0);
        assert_eq!(col.name(), "arrival");
        assert_eq!(col.column_type(), ColumnType::LocalTime);
        assert!(col.capacity() >= 128);
    }

    #[test]
    fn test_sample_values() {
        let col = sample();
        assert_eq!(col.size(), 4);
        assert_eq!(col.get_time(0).unwrap(), Some(hm(9, 0)));
        assert_eq!(col.get(1).unwrap(), MISSING);
        assert_eq!(col.get_time(2).unwrap(), Some(hm(14, 30)));
        assert_eq!(col.get(3).unwrap(), MISSING);
        assert_eq!(col.get_time(3).unwrap(), None);
    }

    #[test]
    fn test_get_out_of_range() {
        let col = sample();
        let err = col.get(4).unwrap_err();
        assert!(matches!(
            err,
            ColumnError::IndexOutOfRange { index: 4, len: 4, .. }
        ));
        assert!(col.get_string(10).is_err());
    }

    #[test]
    fn test_add_cell_rejects_bad_text_without_appending() {
        let mut col = sample();
        let err = col.add_cell("25:99").unwrap_err();
        match &err {
            ColumnError::Append { column, value, .. } => {
                assert_eq!(column, "arrival");
                assert_eq!(value, "25:99");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.is_parse_error());
        assert_eq!(col.size(), 4);
    }

    #[test]
    fn test_add_optional_cell() {
        let mut col = TimeColumn::create("t");
        col.add_optional_cell(None).unwrap();
        col.add_optional_cell(Some("0815")).unwrap();
        assert_eq!(col.get(0).unwrap(), MISSING);
        assert_eq!(col.get_time(1).unwrap(), Some(hm(8, 15)));
    }

    #[test]
    fn test_growth_from_zero_capacity() {
        let mut col = TimeColumn::with_capacity("t", 0);
        assert_eq!(col.capacity(), 0);
        for i in 0..1000 {
            col.add(i);
        }
        assert_eq!(col.size(), 1000);
        assert!(col.values().iter().copied().eq(0..1000));
    }

    #[test]
    fn test_growth_doubles() {
        let mut col = TimeColumn::with_capacity("t", 16);
        for i in 0..16 {
            col.add(i);
        }
        let before = col.capacity();
        col.add(16);
        assert!(col.capacity() >= before * 2);
    }

    #[test]
    fn test_compact_preserves_values() {
        let mut col = TimeColumn::with_capacity("t", 0);
        for i in 0..5000 {
            col.add(i * 3);
        }
        let before = col.values().to_vec();
        let capacity_before = col.capacity();

        col.compact();

        assert_eq!(col.values(), before.as_slice());
        assert!(col.capacity() >= 5000 + 100);
        assert!(col.capacity() < capacity_before);
    }

    #[test]
    fn test_clear_resets_to_default_capacity() {
        let mut col = TimeColumn::with_capacity("t", 4);
        for i in 0..100 {
            col.add(i);
        }
        col.clear();
        assert!(col.is_empty());
        assert!(col.capacity() >= 128);
        assert!(!col.has_next());
    }

    #[test]
    fn test_empty_copy_is_independent() {
        let col = sample();
        let mut copy = col.empty_copy();
        assert_eq!(copy.name(), "arrival");
        assert!(copy.is_empty());
        copy.add_time(hm(1, 0));
        assert_eq!(col.size(), 4);
    }

    #[test]
    fn test_cursor_iteration() {
        let mut col = sample();
        let mut seen = Vec::new();
        while col.has_next() {
            seen.push(col.next_value().unwrap());
        }
        assert_eq!(seen, col.values());
        assert_eq!(col.next_value(), None);

        col.reset();
        assert!(col.has_next());
        assert_eq!(col.next_value(), Some(packed::pack(hm(9, 0))));
    }

    #[test]
    fn test_scan_does_not_move_cursor() {
        let mut col = sample();
        col.next_value();
        let all: Vec<i32> = col.scan().collect();
        assert_eq!(all.len(), 4);
        assert_eq!(col.next_value(), Some(MISSING));
    }

    #[test]
    fn test_sort_ascending_places_missing_first() {
        let col = sample();
        let sorted = col.sort_ascending();
        assert_eq!(sorted.values()[..2], [MISSING, MISSING]);
        assert_eq!(sorted.get_time(2).unwrap(), Some(hm(9, 0)));
        assert_eq!(sorted.get_time(3).unwrap(), Some(hm(14, 30)));
        // Source keeps its order.
        assert_eq!(col.get_time(0).unwrap(), Some(hm(9, 0)));
    }

    #[test]
    fn test_sort_descending_places_missing_last() {
        let col = sample();
        let sorted = col.sort_descending();
        assert_eq!(sorted.get_time(0).unwrap(), Some(hm(14, 30)));
        assert_eq!(sorted.get_time(1).unwrap(), Some(hm(9, 0)));
        assert_eq!(sorted.values()[2..], [MISSING, MISSING]);
    }

    #[test]
    fn test_sorted_copy_grows_independently() {
        let col = sample();
        let mut sorted = col.sort_ascending();
        sorted.add_time(hm(23, 0));
        assert_eq!(sorted.size(), 5);
        assert_eq!(col.size(), 4);
    }

    #[test]
    fn test_row_comparator() {
        let col = sample();
        let cmp = col.row_comparator();
        assert_eq!(cmp(0, 2), Ordering::Less);
        assert_eq!(cmp(2, 0), Ordering::Greater);
        assert_eq!(cmp(1, 3), Ordering::Equal);
        assert_eq!(cmp(1, 0), Ordering::Less);
    }

    #[test]
    fn test_sorted_rows_is_stable() {
        let col = sample();
        assert_eq!(Column::sorted_rows(&col, false), vec![1, 3, 0, 2]);
        assert_eq!(Column::sorted_rows(&col, true), vec![2, 0, 1, 3]);
    }

    #[test]
    fn test_is_equal_to() {
        let mut col = sample();
        col.add_time(hm(9, 0));

        let rows = col.is_equal_to(hm(9, 0));
        assert_eq!(rows.iter().collect::<Vec<_>>(), vec![0, 4]);
        assert_eq!(col.is_equal_to(hm(9, 0)), rows);
        assert!(col.is_equal_to(hm(10, 0)).is_empty());
        assert_eq!(col.missing_rows().iter().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_count_unique() {
        let mut col = sample();
        col.add_time(hm(9, 0));
        assert_eq!(col.count_unique(), 3);
        assert_eq!(TimeColumn::create("t").count_unique(), 0);
    }

    #[test]
    fn test_get_string_uses_configured_placeholder() {
        let config = ColumnConfig::default().with_missing_display("NA");
        let mut col = TimeColumn::with_config("t", &config).unwrap();
        col.add_cell("").unwrap();
        col.add_cell("2359").unwrap();
        assert_eq!(col.get_string(0).unwrap(), "NA");
        assert_eq!(col.get_string(1).unwrap(), "23:59");
        assert_eq!(sample().get_string(1).unwrap(), "");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ColumnConfig::default().with_time_formats(Vec::<String>::new());
        assert!(TimeColumn::with_config("t", &config).is_err());
    }

    #[test]
    fn test_from_packed() {
        let col = TimeColumn::from_packed("t", [3, MISSING, 1]);
        assert_eq!(col.values(), &[3, MISSING, 1]);
    }

    #[test]
    fn test_dyn_column_contract() {
        let mut col: Box<dyn Column> = Box::new(sample());
        assert_eq!(col.column_type(), ColumnType::LocalTime);
        assert_eq!(col.size(), 4);
        assert_eq!(col.get_string(2).unwrap(), "14:30");

        let sorted = col.sort_descending();
        assert_eq!(sorted.get_string(0).unwrap(), "14:30");
        assert_eq!(col.empty_copy().size(), 0);

        col.add_cell("0600").unwrap();
        assert_eq!(col.size(), 5);
        col.clear();
        assert!(col.is_empty());
    }
}
