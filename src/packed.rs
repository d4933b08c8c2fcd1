//! Packed time-of-day codec.
//!
//! A time of day is stored in a single `i32` laid out as
//!
//! ```text
//!  31      24 23      16 15                    0
//! +----------+----------+-----------------------+
//! |   hour   |  minute  |  millisecond of minute |
//! +----------+----------+-----------------------+
//! ```
//!
//! Every valid encoding is non-negative and integer ordering matches
//! chronological ordering, so packed values can be sorted and compared
//! without decoding. [`MISSING`] (`i32::MIN`) is reserved for absent values
//! and sorts before every real time.

use crate::error::{ColumnError, Result};
use chrono::{NaiveTime, Timelike};
use std::cmp::Ordering;
use std::fmt;

/// Sentinel stored in place of a missing time.
pub const MISSING: i32 = i32::MIN;

/// Placeholder rendered for [`MISSING`] by [`to_display_string`].
pub const MISSING_DISPLAY: &str = "";

const HOUR_SHIFT: u32 = 24;
const MINUTE_SHIFT: u32 = 16;
const MILLIS_MASK: i32 = 0xFFFF;
const MILLIS_PER_MINUTE: i32 = 60_000;

/// Packs a time of day.
///
/// Sub-millisecond precision is truncated. A leap second folds onto
/// `:59.999` of the same minute.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use timecol::packed::{pack, unpack};
///
/// let t = NaiveTime::from_hms_milli_opt(14, 30, 5, 250).unwrap();
/// assert_eq!(unpack(pack(t)).unwrap(), t);
/// ```
pub fn pack(time: NaiveTime) -> i32 {
    let millis = (time.nanosecond() / 1_000_000).min(999);
    let millis_of_minute = time.second() * 1000 + millis;
    ((time.hour() as i32) << HOUR_SHIFT)
        | ((time.minute() as i32) << MINUTE_SHIFT)
        | millis_of_minute as i32
}

/// Unpacks a value produced by [`pack`].
///
/// Fails with [`ColumnError::InvalidEncoding`] for [`MISSING`] and for any
/// integer that no valid time packs to.
pub fn unpack(packed: i32) -> Result<NaiveTime> {
    if !is_valid_packed(packed) {
        return Err(ColumnError::InvalidEncoding(packed));
    }
    NaiveTime::from_hms_milli_opt(
        hour_of(packed),
        minute_of(packed),
        second_of(packed),
        millisecond_of(packed),
    )
    .ok_or(ColumnError::InvalidEncoding(packed))
}

/// Returns true for the missing-value sentinel.
#[inline]
pub fn is_missing(packed: i32) -> bool {
    packed == MISSING
}

/// Returns true when `packed` decodes to a real time of day.
pub fn is_valid_packed(packed: i32) -> bool {
    packed >= 0
        && hour_of(packed) <= 23
        && minute_of(packed) <= 59
        && (packed & MILLIS_MASK) < MILLIS_PER_MINUTE
}

#[inline]
pub fn hour_of(packed: i32) -> u32 {
    ((packed >> HOUR_SHIFT) & 0xFF) as u32
}

#[inline]
pub fn minute_of(packed: i32) -> u32 {
    ((packed >> MINUTE_SHIFT) & 0xFF) as u32
}

#[inline]
pub fn second_of(packed: i32) -> u32 {
    (packed & MILLIS_MASK) as u32 / 1000
}

#[inline]
pub fn millisecond_of(packed: i32) -> u32 {
    (packed & MILLIS_MASK) as u32 % 1000
}

/// Renders a packed value as `HH:MM`, `HH:MM:SS` or `HH:MM:SS.mmm`,
/// using the shortest form that loses nothing.
///
/// [`MISSING`] renders as [`MISSING_DISPLAY`]. Any other invalid integer
/// fails with [`ColumnError::InvalidEncoding`].
pub fn to_display_string(packed: i32) -> Result<String> {
    display_with(packed, MISSING_DISPLAY)
}

/// Same as [`to_display_string`] with a caller-chosen placeholder for
/// missing values.
pub fn display_with(packed: i32, missing: &str) -> Result<String> {
    if is_missing(packed) {
        return Ok(missing.to_string());
    }
    if !is_valid_packed(packed) {
        return Err(ColumnError::InvalidEncoding(packed));
    }

    let (h, m, s, ms) = (
        hour_of(packed),
        minute_of(packed),
        second_of(packed),
        millisecond_of(packed),
    );
    Ok(match (s, ms) {
        (0, 0) => format!("{:02}:{:02}", h, m),
        (_, 0) => format!("{:02}:{:02}:{:02}", h, m, s),
        _ => format!("{:02}:{:02}:{:02}.{:03}", h, m, s, ms),
    })
}

/// Typed wrapper around a packed time, possibly [`MISSING`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedTime(i32);

impl PackedTime {
    pub const MISSING: PackedTime = PackedTime(MISSING);

    pub fn new(time: NaiveTime) -> Self {
        Self(pack(time))
    }

    pub fn raw(self) -> i32 {
        self.0
    }

    pub fn is_missing(self) -> bool {
        is_missing(self.0)
    }

    /// Decodes the value, or `None` when missing.
    pub fn time(self) -> Option<NaiveTime> {
        unpack(self.0).ok()
    }
}

impl From<NaiveTime> for PackedTime {
    fn from(time: NaiveTime) -> Self {
        Self::new(time)
    }
}

impl TryFrom<i32> for PackedTime {
    type Error = ColumnError;

    fn try_from(raw: i32) -> Result<Self> {
        if is_missing(raw) || is_valid_packed(raw) {
            Ok(Self(raw))
        } else {
            Err(ColumnError::InvalidEncoding(raw))
        }
    }
}

impl PartialOrd for PackedTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PackedTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl fmt::Display for PackedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Construction guarantees a valid or missing value.
        match display_with(self.0, MISSING_DISPLAY) {
            Ok(s) => f.write_str(&s),
            Err(_) => write!(f, "<invalid {:#010x}>", self.0),
        }
    }
}
