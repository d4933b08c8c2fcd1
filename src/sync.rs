//! Thread-safe wrapper for shared column access.
//!
//! `SyncTimeColumn` wraps a [`TimeColumn`] in `Arc<RwLock<_>>` so several
//! threads can read while appends, growth and compaction get exclusive
//! access. Enable the `sync` feature to use it:
//!
//! ```toml
//! [dependencies]
//! timecol = { version = "0.1", features = ["sync"] }
//! ```
//!
//! ```rust
//! use timecol::SyncTimeColumn;
//! use std::thread;
//!
//! let col = SyncTimeColumn::create("arrival");
//! let writer = col.clone();
//!
//! thread::spawn(move || writer.add_cell("0930").unwrap())
//!     .join()
//!     .unwrap();
//!
//! assert_eq!(col.size(), 1);
//! ```

use crate::error::Result;
use crate::time_column::TimeColumn;
use chrono::NaiveTime;
use parking_lot::RwLock;
use roaring::RoaringTreemap;
use std::sync::Arc;

/// Thread-safe handle to a [`TimeColumn`].
///
/// Queries take the read lock and never touch the column's built-in
/// cursor, so concurrent readers cannot disturb each other.
#[derive(Debug, Clone)]
pub struct SyncTimeColumn {
    inner: Arc<RwLock<TimeColumn>>,
}

impl SyncTimeColumn {
    pub fn new(column: TimeColumn) -> Self {
        Self {
            inner: Arc::new(RwLock::new(column)),
        }
    }

    pub fn create(name: impl Into<String>) -> Self {
        Self::new(TimeColumn::create(name))
    }

    pub fn add(&self, packed: i32) {
        self.inner.write().add(packed)
    }

    pub fn add_cell(&self, text: &str) -> Result<()> {
        self.inner.write().add_cell(text)
    }

    pub fn get(&self, index: usize) -> Result<i32> {
        self.inner.read().get(index)
    }

    pub fn get_string(&self, row: usize) -> Result<String> {
        self.inner.read().get_string(row)
    }

    pub fn size(&self) -> usize {
        self.inner.read().size()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn compact(&self) {
        self.inner.write().compact()
    }

    pub fn clear(&self) {
        self.inner.write().clear()
    }

    pub fn is_equal_to(&self, time: NaiveTime) -> RoaringTreemap {
        self.inner.read().is_equal_to(time)
    }

    pub fn sort_ascending(&self) -> TimeColumn {
        self.inner.read().sort_ascending()
    }

    pub fn sort_descending(&self) -> TimeColumn {
        self.inner.read().sort_descending()
    }

    pub fn count_unique(&self) -> usize {
        self.inner.read().count_unique()
    }

    /// Runs `f` with shared access to the column.
    pub fn read<R>(&self, f: impl FnOnce(&TimeColumn) -> R) -> R {
        f(&self.inner.read())
    }

    /// Runs `f` with exclusive access to the column.
    pub fn write<R>(&self, f: impl FnOnce(&mut TimeColumn) -> R) -> R {
        f(&mut self.inner.write())
    }
}
