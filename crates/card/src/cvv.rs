//! Card verification value checks.

use crate::CardBrand;

/// True if `cvv` is all digits and exactly as long as `brand` expects.
///
/// # Example
/// ```
/// use datacap_card::{validate_cvv, CardBrand};
///
/// assert!(validate_cvv("123", CardBrand::Visa));
/// assert!(validate_cvv("1234", CardBrand::AmericanExpress));
/// assert!(!validate_cvv("123", CardBrand::AmericanExpress));
/// ```
pub fn validate_cvv(cvv: &str, brand: CardBrand) -> bool {
    cvv.len() == brand.cvv_length() && is_digits(cvv)
}

/// Keystroke gate for the CVV field.
pub fn cvv_accepts_input(partial: &str, brand: CardBrand) -> bool {
    partial.len() <= brand.cvv_length() && is_digits(partial)
}

fn is_digits(value: &str) -> bool {
    value.bytes().all(|b| b.is_ascii_digit())
}
