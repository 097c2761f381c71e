//! Masked display form of a card number.

use crate::brand::detect_brand_cleaned;
use crate::number::clean_number;
use crate::CardBrand;

/// Masks a raw card number, keeping only the last four digits.
///
/// Brand and last four are taken from the space-stripped input, the same
/// string `validate` checks. Input shorter than four characters after
/// cleaning is returned unchanged.
///
/// # Example
/// ```
/// use datacap_card::mask_number;
///
/// assert_eq!(mask_number("4111111111111111"), "**** **** **** 1111");
/// assert_eq!(mask_number("378282246310005"), "**** ****** *0005");
/// assert_eq!(mask_number("36700102000000"), "**** ****** 0000");
/// assert_eq!(mask_number("12"), "12");
/// ```
pub fn mask_number(raw: &str) -> String {
    let cleaned = clean_number(raw);
    let count = cleaned.chars().count();
    if count < 4 {
        return raw.to_string();
    }

    let last4: String = cleaned.chars().skip(count - 4).collect();
    mask_with(detect_brand_cleaned(&cleaned), &last4)
}

/// Applies the brand's asterisk grouping around `last4`.
pub(crate) fn mask_with(brand: CardBrand, last4: &str) -> String {
    match brand {
        CardBrand::AmericanExpress => format!("**** ****** *{last4}"),
        CardBrand::DinersClub => format!("**** ****** {last4}"),
        _ => format!("**** **** **** {last4}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_layouts() {
        assert_eq!(mask_number("5555555555554444"), "**** **** **** 4444");
        assert_eq!(mask_number("6011111111111117"), "**** **** **** 1117");
        assert_eq!(mask_number("9999999999999999"), "**** **** **** 9999");
        assert_eq!(mask_number("371449635398431"), "**** ****** *8431");
        assert_eq!(mask_number("30569309025904"), "**** ****** 5904");
    }

    #[test]
    fn test_spaces_are_stripped_before_taking_last4() {
        assert_eq!(mask_number("4111 1111 1111 11 11"), "**** **** **** 1111");
    }

    #[test]
    fn test_short_input_is_returned_unchanged() {
        assert_eq!(mask_number(""), "");
        assert_eq!(mask_number("1 2 3"), "1 2 3");
    }

    #[test]
    fn test_masks_even_invalid_numbers() {
        // Masking does not validate; callers gate on `validate` first
        assert_eq!(mask_number("4111111111111112"), "**** **** **** 1112");
        assert_eq!(mask_number("abcd"), "**** **** **** abcd");
    }

    #[test]
    fn test_idempotent() {
        let once = mask_number("378282246310005");
        assert_eq!(once, mask_number("378282246310005"));
    }
}
