//! Live input formatting.
//!
//! These helpers run on every keystroke of the card number field: they
//! group digits the way the network prints them and cap the input length.

use crate::brand::detect_brand_cleaned;
use crate::number::clean_number;
use crate::{CardBrand, MAX_DIGITS};

/// Groups a raw number for display using `brand`'s pattern.
///
/// Spaces are stripped, the input is truncated to `brand.max_digits()`, and
/// a single space is inserted at each group boundary.
///
/// # Example
/// ```
/// use datacap_card::{format_grouped, CardBrand};
///
/// assert_eq!(format_grouped("4111111111111111", CardBrand::Visa), "4111 1111 1111 1111");
/// assert_eq!(format_grouped("378282246310005", CardBrand::AmericanExpress), "3782 822463 10005");
/// assert_eq!(format_grouped("36700102000000", CardBrand::DinersClub), "3670 010200 0000");
/// ```
pub fn format_grouped(raw: &str, brand: CardBrand) -> String {
    let cleaned = clean_number(raw);
    let boundaries = group_boundaries(brand);

    let mut formatted = String::with_capacity(cleaned.len() + boundaries.len());
    for (index, character) in cleaned.chars().take(brand.max_digits()).enumerate() {
        if boundaries.contains(&index) {
            formatted.push(' ');
        }
        formatted.push(character);
    }
    formatted
}

/// Formats partial input with the brand detected from it.
pub fn format_input(raw: &str) -> String {
    let cleaned = clean_number(raw);
    format_grouped(&cleaned, detect_brand_cleaned(&cleaned))
}

/// Maximum digit count for the brand detected from partial input.
///
/// Empty input allows the full 19 digits until a prefix is known.
pub fn max_digits(raw: &str) -> usize {
    let cleaned = clean_number(raw);
    if cleaned.is_empty() {
        MAX_DIGITS
    } else {
        detect_brand_cleaned(&cleaned).max_digits()
    }
}

/// Keystroke gate: digits only, and no longer than the detected brand allows.
pub fn accepts_input(raw: &str) -> bool {
    let cleaned = clean_number(raw);
    cleaned.bytes().all(|b| b.is_ascii_digit()) && cleaned.len() <= max_digits(&cleaned)
}

/// Character offsets (into the digit string) that start a new group.
fn group_boundaries(brand: CardBrand) -> Vec<usize> {
    let pattern = brand.group_pattern();
    pattern[..pattern.len() - 1]
        .iter()
        .scan(0, |offset, width| {
            *offset += width;
            Some(*offset)
        })
        .collect()
}
