//! Input cleaning and the checked `CardNumber` type.

use std::fmt;
use std::str::FromStr;

use crate::brand::detect_brand_cleaned;
use crate::mask::mask_with;
use crate::{luhn, CardBrand, CardError, Result, MAX_DIGITS, MIN_DIGITS};

/// Removes every space character from raw input.
///
/// Only `' '` is stripped. Hyphens, tabs and other separators are kept so
/// that the digit check rejects them.
pub fn clean_number(raw: &str) -> String {
    raw.chars().filter(|&c| c != ' ').collect()
}

/// A card number that passed the length, digit and Luhn checks.
///
/// `Display` and `Debug` print the masked form only.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CardNumber {
    digits: String,
    brand: CardBrand,
}

impl CardNumber {
    /// Parses and validates a raw card number.
    ///
    /// # Example
    /// ```
    /// use datacap_card::{CardBrand, CardNumber};
    ///
    /// let card = CardNumber::parse("4111 1111 1111 1111").unwrap();
    /// assert_eq!(card.brand(), CardBrand::Visa);
    /// assert_eq!(card.to_string(), "**** **** **** 1111");
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let cleaned = clean_number(raw);

        if let Some((position, character)) = cleaned
            .chars()
            .enumerate()
            .find(|(_, c)| !c.is_ascii_digit())
        {
            return Err(CardError::InvalidCharacter { position, character });
        }

        let len = cleaned.len();
        if !(MIN_DIGITS..=MAX_DIGITS).contains(&len) {
            return Err(CardError::InvalidLength(len));
        }

        if !luhn::is_valid_cleaned(&cleaned) {
            return Err(CardError::ChecksumFailed);
        }

        let brand = detect_brand_cleaned(&cleaned);
        Ok(Self { digits: cleaned, brand })
    }

    /// The cleaned digit string. Only hand this to the token request.
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Brand detected from the same digits that passed validation.
    pub fn brand(&self) -> CardBrand {
        self.brand
    }

    /// Last four digits.
    pub fn last4(&self) -> &str {
        // digits are ASCII and at least MIN_DIGITS long
        &self.digits[self.digits.len() - 4..]
    }

    /// Brand-aware masked form.
    pub fn masked(&self) -> String {
        mask_with(self.brand, self.last4())
    }
}

impl FromStr for CardNumber {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardNumber")
            .field("masked", &self.masked())
            .field("brand", &self.brand)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_only_strips_spaces() {
        assert_eq!(clean_number("4111 1111 1111 1111"), "4111111111111111");
        assert_eq!(clean_number("4111-1111"), "4111-1111");
        assert_eq!(clean_number("4111\t1111"), "4111\t1111");
    }

    #[test]
    fn test_parse_valid() {
        let card = CardNumber::parse("3782 822463 10005").unwrap();
        assert_eq!(card.digits(), "378282246310005");
        assert_eq!(card.brand(), CardBrand::AmericanExpress);
        assert_eq!(card.last4(), "0005");
        assert_eq!(card.masked(), "**** ****** *0005");
    }

    #[test]
    fn test_parse_rejects_hyphens() {
        let err = CardNumber::parse("4111-1111-1111-1111").unwrap_err();
        assert_eq!(err, CardError::InvalidCharacter { position: 4, character: '-' });
    }

    #[test]
    fn test_parse_rejects_length() {
        assert_eq!(CardNumber::parse("123").unwrap_err(), CardError::InvalidLength(3));
        assert_eq!(
            CardNumber::parse("41111111111111111111").unwrap_err(),
            CardError::InvalidLength(20)
        );
    }

    #[test]
    fn test_parse_rejects_checksum() {
        assert_eq!(
            CardNumber::parse("4111111111111112").unwrap_err(),
            CardError::ChecksumFailed
        );
    }

    #[test]
    fn test_debug_and_display_are_masked() {
        let card: CardNumber = "5555555555554444".parse().unwrap();
        let debug = format!("{card:?}");
        assert!(!debug.contains("5555555555554444"));
        assert!(debug.contains("**** **** **** 4444"));
        assert_eq!(card.to_string(), "**** **** **** 4444");
    }
}
