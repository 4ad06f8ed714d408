//! Significant-digit rounding on decimal text.
//!
//! Values are kept as ASCII digit buffers plus the position of the decimal
//! point, so rounding is plain right-to-left carry propagation and never
//! goes through a binary float.

use std::fmt;
use std::str::FromStr;

use crate::error::DecimalError;

/// A non-negative decimal number held as text.
///
/// `point` is the number of digits in front of the decimal point. A value
/// without a point has `point == digits.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decimal {
    digits: Vec<u8>,
    point: usize,
}

impl Decimal {
    /// The digits of the value, without the decimal point.
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    /// Number of digits in front of the decimal point.
    pub fn point(&self) -> usize {
        self.point
    }

    /// Position of the first non-zero digit, if there is one.
    pub fn first_significant(&self) -> Option<usize> {
        self.digits.iter().position(|&d| d != b'0')
    }

    /// Round half-up to `significant` significant digits.
    ///
    /// Positions past the end of the value read as zero, so rounding a short
    /// value pads it (`1.5` to 3 digits is `1.50`). A value with no non-zero
    /// digit is returned unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `significant` is zero.
    pub fn round_to_significant(&self, significant: usize) -> Decimal {
        assert!(significant > 0, "significant digit count must be positive");

        let Some(first) = self.first_significant() else {
            return self.clone();
        };

        let carried = round_digits_at(&self.digits, self.point, first + significant);
        let mut digits = carried.digits;

        // A carry that reaches past the first significant digit makes one
        // more digit significant; drop the surplus fractional zero.
        let shifted_first = first + usize::from(carried.grew);
        let new_first = digits
            .iter()
            .position(|&d| d != b'0')
            .unwrap_or(shifted_first);
        if new_first < shifted_first && digits.len() > carried.point {
            digits.pop();
        }

        Decimal {
            digits,
            point: carried.point,
        }
    }
}

impl FromStr for Decimal {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut digits = Vec::with_capacity(s.len());
        let mut point = None;

        for (position, ch) in s.chars().enumerate() {
            match ch {
                '0'..='9' => digits.push(ch as u8),
                '.' if point.is_none() => point = Some(digits.len()),
                '.' => return Err(DecimalError::SecondPoint { position }),
                other => return Err(DecimalError::UnexpectedChar { ch: other, position }),
            }
        }

        if digits.is_empty() {
            return Err(DecimalError::Empty);
        }

        let point = point.unwrap_or(digits.len());
        Ok(Decimal { digits, point })
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = |bytes: &[u8]| bytes.iter().map(|&b| char::from(b)).collect::<String>();

        if self.point >= self.digits.len() {
            // Integer: positions cut off by rounding still hold magnitude.
            let zeros = "0".repeat(self.point - self.digits.len());
            return write!(f, "{}{zeros}", text(&self.digits));
        }

        let (int_part, frac_part) = self.digits.split_at(self.point);
        let int_part = if int_part.is_empty() {
            "0".to_string()
        } else {
            text(int_part)
        };
        write!(f, "{int_part}.{}", text(frac_part))
    }
}

/// Round decimal text to `significant` significant digits.
///
/// # Errors
///
/// Returns `DecimalError` if `value` is not plain decimal text.
///
/// # Panics
///
/// Panics if `significant` is zero.
pub fn round_to_significant(value: &str, significant: usize) -> Result<String, DecimalError> {
    let decimal: Decimal = value.parse()?;
    Ok(decimal.round_to_significant(significant).to_string())
}

/// Digits after rounding at a fixed length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Carried {
    pub digits: Vec<u8>,
    pub point: usize,
    /// The carry ran off the front and a leading `1` was added.
    pub grew: bool,
}

/// Split text at its first decimal point without validating anything else.
///
/// Bytes that are not digits are kept in place so they can fail a later
/// comparison instead of aborting it.
pub(crate) fn split_point(text: &str) -> (Vec<u8>, usize) {
    match text.bytes().position(|b| b == b'.') {
        Some(pos) => {
            let mut digits = Vec::with_capacity(text.len() - 1);
            digits.extend_from_slice(&text.as_bytes()[..pos]);
            digits.extend_from_slice(&text.as_bytes()[pos + 1..]);
            (digits, pos)
        }
        None => (text.as_bytes().to_vec(), text.len()),
    }
}

/// Digit at `position`, reading zero past the end.
pub(crate) fn digit_at(digits: &[u8], position: usize) -> u8 {
    digits.get(position).copied().unwrap_or(b'0')
}

/// Keep the first `cut` digits and round half-up on the digit at `cut`.
pub(crate) fn round_digits_at(digits: &[u8], point: usize, cut: usize) -> Carried {
    let mut kept: Vec<u8> = (0..cut).map(|i| digit_at(digits, i)).collect();
    let mut carry = matches!(digits.get(cut), Some(b'5'..=b'9'));

    for digit in kept.iter_mut().rev() {
        if !carry {
            break;
        }
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            carry = false;
        }
    }

    let mut point = point;
    if carry {
        kept.insert(0, b'1');
        point += 1;
    }

    Carried {
        digits: kept,
        point,
        grew: carry,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(value: &str, n: usize) -> String {
        round_to_significant(value, n).unwrap()
    }

    #[test]
    fn parse_and_display() {
        let d: Decimal = "0.30103".parse().unwrap();
        assert_eq!(d.point(), 1);
        assert_eq!(d.digits(), b"030103");
        assert_eq!(d.to_string(), "0.30103");

        let d: Decimal = ".5".parse().unwrap();
        assert_eq!(d.point(), 0);
        assert_eq!(d.to_string(), "0.5");

        let d: Decimal = "42".parse().unwrap();
        assert_eq!(d.point(), 2);
        assert_eq!(d.to_string(), "42");
    }

    #[test]
    fn parse_rejects_malformed_text() {
        assert_eq!("".parse::<Decimal>(), Err(DecimalError::Empty));
        assert_eq!(".".parse::<Decimal>(), Err(DecimalError::Empty));
        assert_eq!(
            "1.2.3".parse::<Decimal>(),
            Err(DecimalError::SecondPoint { position: 3 })
        );
        assert_eq!(
            "1,5".parse::<Decimal>(),
            Err(DecimalError::UnexpectedChar { ch: ',', position: 1 })
        );
        assert!(round_to_significant("-1.5", 2).is_err());
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(round("0.30102999566398119521", 3), "0.301");
        assert_eq!(round("0.13672056715640676856", 3), "0.137");
        assert_eq!(round("0.125", 2), "0.13");
        assert_eq!(round("0.124999", 2), "0.12");
        assert_eq!(round("0.04545", 2), "0.045");
    }

    #[test]
    fn leading_zeros_are_not_significant() {
        assert_eq!(round("0.00432137378264257428", 3), "0.00432");
        assert_eq!(round("0.0043", 3), "0.00430");
    }

    #[test]
    fn carry_propagates_through_nines() {
        assert_eq!(round("1.2996", 3), "1.30");
        assert_eq!(round("0.0999", 2), "0.10");
        assert_eq!(round("0.95", 1), "1");
    }

    #[test]
    fn carry_prepends_new_leading_digit() {
        assert_eq!(round("9.995", 3), "10.0");
        assert_eq!(round("9.99", 2), "10");
        assert_eq!(round("999", 2), "1000");
    }

    #[test]
    fn integer_positions_keep_magnitude() {
        assert_eq!(round("12345", 3), "12300");
        assert_eq!(round("12355", 3), "12400");
    }

    #[test]
    fn short_values_are_padded() {
        assert_eq!(round("1.5", 3), "1.50");
        assert_eq!(round("2", 3), "2.00");
    }

    #[test]
    fn all_zero_value_is_unchanged() {
        assert_eq!(round("0.000", 2), "0.000");
    }

    #[test]
    fn rounding_is_idempotent() {
        let values = [
            "0.30102999566398119521",
            "0.00432137378264257428",
            "9.995",
            "0.0999",
            "999",
            "12345",
            "1.5",
            "0.95",
            "0.000",
            "1.99999999",
        ];
        for value in values {
            for n in 1..=6 {
                let once = round(value, n);
                assert_eq!(round(&once, n), once, "value {value}, n {n}");
            }
        }
    }

    #[test]
    #[should_panic(expected = "significant digit count must be positive")]
    fn zero_significant_digits_is_a_contract_violation() {
        let _ = round("1.5", 0);
    }

    #[test]
    fn split_point_keeps_foreign_bytes() {
        assert_eq!(split_point("1.3x"), (b"13x".to_vec(), 1));
        assert_eq!(split_point("137"), (b"137".to_vec(), 3));
        assert_eq!(split_point(""), (Vec::new(), 0));
    }

    #[test]
    fn round_digits_at_reports_growth() {
        let carried = round_digits_at(b"999", 1, 2);
        assert_eq!(carried.digits, b"100".to_vec());
        assert_eq!(carried.point, 2);
        assert!(carried.grew);

        let carried = round_digits_at(b"137", 1, 5);
        assert_eq!(carried.digits, b"13700".to_vec());
        assert!(!carried.grew);
    }
}
