//! Packed time-of-day column for column-oriented in-memory tables.
//!
//! Times are stored as 32-bit packed integers whose ordering matches
//! chronological ordering, with a single sentinel for missing values.
//!
//! ```rust
//! use chrono::NaiveTime;
//! use timecol::{Column, TimeColumn};
//!
//! let mut col = TimeColumn::create("departure");
//! for cell in ["900", "", "1430", "-1"] {
//!     col.add_cell(cell)?;
//! }
//!
//! let sorted = col.sort_ascending();
//! assert_eq!(sorted.get_string(3)?, "14:30");
//!
//! let rows = col.is_equal_to(NaiveTime::from_hms_opt(9, 0, 0).unwrap());
//! assert_eq!(rows.iter().collect::<Vec<_>>(), vec![0]);
//!
//! // Row permutation for reordering parallel columns.
//! assert_eq!(col.sorted_rows(false), vec![1, 3, 0, 2]);
//! # Ok::<(), timecol::ColumnError>(())
//! ```

pub mod builder;
pub mod column;
pub mod config;
pub mod error;
pub mod packed;
pub mod parse;
pub mod time_column;

#[cfg(feature = "sync")]
pub mod sync;

pub use builder::TimeColumnBuilder;
pub use column::{Column, ColumnType, RowComparator};
pub use config::ColumnConfig;
pub use error::{ColumnError, Result};
pub use packed::{MISSING, PackedTime};
pub use parse::TimeParser;
pub use time_column::TimeColumn;

#[cfg(feature = "sync")]
pub use sync::SyncTimeColumn;

pub use roaring::RoaringTreemap;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{Column, ColumnConfig, ColumnError, ColumnType, Result, TimeColumn};

    pub use crate::packed::{MISSING, is_missing, pack, unpack};

    pub use chrono::NaiveTime;

    pub use roaring::RoaringTreemap;

    #[cfg(feature = "sync")]
    pub use crate::SyncTimeColumn;
}
