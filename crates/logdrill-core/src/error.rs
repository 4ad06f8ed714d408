//! Error types for the logdrill core.
//!
//! Answer checking never fails (a bad answer is just a mismatch), so these
//! errors only cover configuration and ground-truth text handed to the
//! library by its callers.

use thiserror::Error;

/// Errors raised when building table indices and ranges.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The index lies outside the table.
    #[error("table index {index} is outside 1..=100")]
    IndexOutOfRange { index: u32 },

    /// The range bounds are inverted.
    #[error("range minimum {min} is greater than maximum {max}")]
    InvertedRange { min: u32, max: u32 },
}

/// Errors raised when parsing decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecimalError {
    /// The text contains no digits at all.
    #[error("decimal text is empty")]
    Empty,

    /// A character other than an ASCII digit or the decimal point.
    #[error("unexpected character {ch:?} at position {position}")]
    UnexpectedChar { ch: char, position: usize },

    /// More than one decimal point.
    #[error("second decimal point at position {position}")]
    SecondPoint { position: usize },
}
