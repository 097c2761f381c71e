//! Luhn (mod 10) checksum.
//!
//! Digits are weighted from the right: every second digit is doubled and
//! reduced to a single digit, the rest are taken as-is. A number is valid
//! when the weighted sum is a multiple of 10.

use crate::number::clean_number;
use crate::{MAX_DIGITS, MIN_DIGITS};

/// Validates a raw card number.
///
/// Spaces are stripped first. The cleaned number must be 13-19 ASCII digits
/// and pass the Luhn checksum. Malformed input returns `false`.
///
/// # Example
/// ```
/// use datacap_card::validate;
///
/// assert!(validate("4111 1111 1111 1111"));
/// assert!(!validate("4111111111111112"));
/// assert!(!validate("4111-1111-1111-1111"));
/// ```
pub fn validate(raw: &str) -> bool {
    is_valid_cleaned(&clean_number(raw))
}

/// Length and checksum test on an already cleaned number.
pub(crate) fn is_valid_cleaned(cleaned: &str) -> bool {
    let len = cleaned.chars().count();
    if !(MIN_DIGITS..=MAX_DIGITS).contains(&len) {
        return false;
    }

    luhn_sum(cleaned).is_some_and(|sum| sum % 10 == 0)
}

/// Computes the check digit that makes `partial` followed by it Luhn-valid.
///
/// Returns `None` if `partial` contains anything other than ASCII digits.
///
/// # Example
/// ```
/// use datacap_card::luhn_check_digit;
///
/// assert_eq!(luhn_check_digit("411111111111111"), Some(1));
/// assert_eq!(luhn_check_digit("41x"), None);
/// ```
pub fn luhn_check_digit(partial: &str) -> Option<u8> {
    if !partial.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // With a trailing 0 every payload digit sits at its final index and the
    // check position contributes nothing.
    let sum = luhn_sum(&format!("{partial}0"))?;
    u8::try_from((10 - sum % 10) % 10).ok()
}

/// Weighted sum over the digits, or `None` at the first non-digit.
#[inline]
fn luhn_sum(digits: &str) -> Option<u32> {
    digits
        .chars()
        .rev()
        .enumerate()
        .try_fold(0u32, |sum, (idx, c)| {
            let digit = c.to_digit(10)?;
            let contribution = match (idx % 2 == 1, digit) {
                (true, 9) => 9,
                (true, d) => (d * 2) % 9,
                (false, d) => d,
            };
            Some(sum + contribution)
        })
}
