//! The logarithm table: rows `1.01` through `2.00` and their common logs.
//!
//! Logarithms are computed with integer fixed-point arithmetic so the
//! ground-truth text is identical on every platform.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::decimal::{round_digits_at, Decimal};
use crate::error::TableError;

/// Smallest table index (argument `1.01`).
pub const MIN_INDEX: u32 = 1;

/// Largest table index (argument `2.00`).
pub const MAX_INDEX: u32 = 100;

/// Fractional digits in [`logarithm_text`].
pub const LOG_FRACTION_DIGITS: usize = 20;

/// A row of the table, representing the argument `1 + index/100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TableIndex(u32);

impl TableIndex {
    /// Validate a raw index.
    pub fn new(index: u32) -> Result<Self, TableError> {
        if (MIN_INDEX..=MAX_INDEX).contains(&index) {
            Ok(Self(index))
        } else {
            Err(TableError::IndexOutOfRange { index })
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// The argument text, e.g. `"1.37"`.
    pub fn argument_text(self) -> String {
        let hundredths = 100 + self.0;
        format!("{}.{:02}", hundredths / 100, hundredths % 100)
    }

    /// The common logarithm of the argument as decimal text.
    pub fn logarithm_text(self) -> String {
        log10_text(self.0)
    }
}

impl TryFrom<u32> for TableIndex {
    type Error = TableError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TableIndex> for u32 {
    fn from(index: TableIndex) -> Self {
        index.0
    }
}

impl fmt::Display for TableIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An inclusive, validated range of table indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRange {
    min: TableIndex,
    max: TableIndex,
}

impl IndexRange {
    pub fn new(min: u32, max: u32) -> Result<Self, TableError> {
        let min = TableIndex::new(min)?;
        let max = TableIndex::new(max)?;
        if min > max {
            return Err(TableError::InvertedRange {
                min: min.get(),
                max: max.get(),
            });
        }
        Ok(Self { min, max })
    }

    /// The whole table, `1..=100`.
    pub fn full() -> Self {
        Self {
            min: TableIndex(MIN_INDEX),
            max: TableIndex(MAX_INDEX),
        }
    }

    pub fn min(&self) -> TableIndex {
        self.min
    }

    pub fn max(&self) -> TableIndex {
        self.max
    }

    pub fn len(&self) -> usize {
        (self.max.0 - self.min.0 + 1) as usize
    }

    /// Always false; a validated range holds at least one index.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, index: TableIndex) -> bool {
        self.bounds().contains(&index.0)
    }

    /// Indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = TableIndex> {
        self.bounds().map(TableIndex)
    }

    fn bounds(&self) -> RangeInclusive<u32> {
        self.min.0..=self.max.0
    }
}

impl Default for IndexRange {
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Display for IndexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

/// The argument text for `index`.
///
/// Shorthand for `TableIndex::argument_text`.
pub fn argument_text(index: TableIndex) -> String {
    index.argument_text()
}

/// The logarithm text for `index`.
///
/// Shorthand for `TableIndex::logarithm_text`.
pub fn logarithm_text(index: TableIndex) -> String {
    index.logarithm_text()
}

/// One printed row of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub index: TableIndex,
    pub argument: String,
    pub logarithm: String,
}

/// Rows of the table over a range.
#[derive(Debug, Clone)]
pub struct LogTable {
    range: IndexRange,
}

impl LogTable {
    pub fn new(range: IndexRange) -> Self {
        Self { range }
    }

    pub fn range(&self) -> IndexRange {
        self.range
    }

    /// Rows with the logarithm at full precision.
    pub fn rows(&self) -> impl Iterator<Item = TableRow> + '_ {
        self.range.iter().map(|index| TableRow {
            index,
            argument: index.argument_text(),
            logarithm: index.logarithm_text(),
        })
    }

    /// Rows with the logarithm rounded to `significant` digits.
    ///
    /// # Panics
    ///
    /// Panics if `significant` is zero.
    pub fn rounded_rows(&self, significant: usize) -> impl Iterator<Item = TableRow> + '_ {
        self.rows().map(move |row| {
            let logarithm = round_text(&row.logarithm, significant);
            TableRow { logarithm, ..row }
        })
    }
}

/// Round text this module produced itself.
pub(crate) fn round_text(text: &str, significant: usize) -> String {
    match text.parse::<Decimal>() {
        Ok(decimal) => decimal.round_to_significant(significant).to_string(),
        // Table text is always well formed.
        Err(_) => text.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Fixed-point logarithms
// ---------------------------------------------------------------------------

const SCALE: u128 = 10u128.pow(30);

/// `ln((d + n) / (d - n))` scaled by `SCALE`, via `2 * atanh(n / d)`.
///
/// Requires `n < d` and `n * n * SCALE` well inside `u128`; the table only
/// uses `n <= 100`, `d <= 300`.
fn ln_ratio(n: u128, d: u128) -> u128 {
    let n2 = n * n;
    let d2 = d * d;
    let mut term = SCALE * n / d;
    let mut sum = 0;
    let mut k = 1;
    while term > 0 {
        sum += term / k;
        term = term * n2 / d2;
        k += 2;
    }
    2 * sum
}

/// `ln(10) = 3 ln(2) + ln(5/4)`, scaled by `SCALE`.
fn ln_ten() -> u128 {
    3 * ln_ratio(1, 3) + ln_ratio(1, 9)
}

/// Decimal expansion of `num / den` with `fraction_digits` digits, truncated.
fn long_divide(num: u128, den: u128, fraction_digits: usize) -> String {
    let mut out = (num / den).to_string();
    out.push('.');
    let mut rem = num % den;
    for _ in 0..fraction_digits {
        rem *= 10;
        out.push(char::from(b'0' + (rem / den) as u8));
        rem %= den;
    }
    out
}

/// `log10(1 + index/100)`, rounded half-up to `LOG_FRACTION_DIGITS` places.
fn log10_text(index: u32) -> String {
    // a = (100 + i) / 100, so (a - 1) / (a + 1) = i / (200 + i).
    let n = u128::from(index);
    let ln_a = ln_ratio(n, 200 + n);
    let raw = long_divide(ln_a, ln_ten(), LOG_FRACTION_DIGITS + 1);

    let (int_part, frac_part) = raw.split_once('.').unwrap_or((raw.as_str(), ""));
    let digits: Vec<u8> = int_part.bytes().chain(frac_part.bytes()).collect();
    let carried = round_digits_at(&digits, int_part.len(), digits.len() - 1);

    let (int_digits, frac_digits) = carried.digits.split_at(carried.point);
    format!(
        "{}.{}",
        String::from_utf8_lossy(int_digits),
        String::from_utf8_lossy(frac_digits)
    )
}
