//! Answer checking against ground-truth decimal text.
//!
//! An answer is accepted when it agrees with the correctly rounded truth on
//! every digit it supplies, and supplies at least the minimum number of
//! significant digits (missing trailing digits count as zeros). The decimal
//! point has to sit at the same position in both, so an answer of the wrong
//! magnitude never passes.

use crate::decimal::{digit_at, round_digits_at, split_point};

/// Significant digits an answer must be correct to.
pub const MIN_SIGNIFICANT_DIGITS: usize = 3;

/// Compares typed answers with ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validator {
    min_significant: usize,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            min_significant: MIN_SIGNIFICANT_DIGITS,
        }
    }
}

impl Validator {
    /// A validator requiring `min_significant` correct significant digits.
    ///
    /// # Panics
    ///
    /// Panics if `min_significant` is zero.
    pub fn with_min_significant(min_significant: usize) -> Self {
        assert!(
            min_significant > 0,
            "significant digit count must be positive"
        );
        Self { min_significant }
    }

    pub fn min_significant(&self) -> usize {
        self.min_significant
    }

    /// Check `input` against `correct`.
    ///
    /// Never fails: characters that are not digits simply fail to match.
    pub fn validate(&self, input: &str, correct: &str) -> bool {
        let padded;
        let input = if input.starts_with('.') {
            padded = format!("0{input}");
            padded.as_str()
        } else {
            input
        };

        let (typed, typed_point) = split_point(input);
        let (truth, truth_point) = split_point(correct);
        if typed_point != truth_point {
            return false;
        }

        let window = self.compared_length(&typed, truth.len());
        let rounded = round_digits_at(&truth, truth_point, window);
        if rounded.grew {
            // Rounding moved the truth up a decade; the point no longer lines up.
            return false;
        }

        (0..window)
            .rev()
            .all(|position| digit_at(&typed, position) == rounded.digits[position])
    }

    /// Number of leading digit positions an answer is judged on.
    ///
    /// Every typed digit counts, and the window reaches at least the
    /// minimum significant digits. An answer of only zeros is judged across
    /// the full truth instead.
    fn compared_length(&self, typed: &[u8], truth_len: usize) -> usize {
        let mut position = 0;
        let mut significant = 0;
        let mut seen = false;

        while position < typed.len() || (seen && significant < self.min_significant) {
            if digit_at(typed, position) != b'0' {
                seen = true;
            }
            if seen {
                significant += 1;
            }
            position += 1;
        }

        if seen {
            position
        } else {
            typed.len().max(truth_len)
        }
    }
}

/// Check `input` against `correct` at [`MIN_SIGNIFICANT_DIGITS`].
pub fn validate(input: &str, correct: &str) -> bool {
    Validator::default().validate(input, correct)
}
