//! Card network detection from BIN prefixes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::number::clean_number;

/// Card network, derived purely from the leading digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardBrand {
    /// Visa
    Visa,
    /// Mastercard
    Mastercard,
    /// American Express
    AmericanExpress,
    /// Discover
    Discover,
    /// Diners Club
    DinersClub,
    /// No prefix rule matched
    Unknown,
}

const GROUPS_DEFAULT: &[usize] = &[4, 4, 4, 4];
const GROUPS_AMEX: &[usize] = &[4, 6, 5];
const GROUPS_DINERS: &[usize] = &[4, 6, 4];

impl CardBrand {
    /// All brands, `Unknown` last.
    pub const ALL: [CardBrand; 6] = [
        CardBrand::Visa,
        CardBrand::Mastercard,
        CardBrand::AmericanExpress,
        CardBrand::Discover,
        CardBrand::DinersClub,
        CardBrand::Unknown,
    ];

    /// Human readable name, as attached to token records.
    pub fn display_name(self) -> &'static str {
        match self {
            CardBrand::Visa => "Visa",
            CardBrand::Mastercard => "Mastercard",
            CardBrand::AmericanExpress => "American Express",
            CardBrand::Discover => "Discover",
            CardBrand::DinersClub => "Diners Club",
            CardBrand::Unknown => "Unknown",
        }
    }

    /// Short label for input placeholders. Empty for `Unknown`.
    pub fn short_label(self) -> &'static str {
        match self {
            CardBrand::Visa => "Visa",
            CardBrand::Mastercard => "Mastercard",
            CardBrand::AmericanExpress => "Amex",
            CardBrand::Discover => "Discover",
            CardBrand::DinersClub => "Diners",
            CardBrand::Unknown => "",
        }
    }

    /// Digit groups used for live input formatting.
    pub fn group_pattern(self) -> &'static [usize] {
        match self {
            CardBrand::AmericanExpress => GROUPS_AMEX,
            CardBrand::DinersClub => GROUPS_DINERS,
            _ => GROUPS_DEFAULT,
        }
    }

    /// Maximum number of digits accepted while typing.
    pub fn max_digits(self) -> usize {
        self.group_pattern().iter().sum()
    }

    /// Expected CVV length.
    pub fn cvv_length(self) -> usize {
        match self {
            CardBrand::AmericanExpress => 4,
            _ => 3,
        }
    }

    /// Looks a brand up by display name or variant name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim();
        Self::ALL.into_iter().find(|brand| {
            brand.display_name().eq_ignore_ascii_case(wanted)
                || format!("{brand:?}").eq_ignore_ascii_case(wanted)
                || (!brand.short_label().is_empty() && brand.short_label().eq_ignore_ascii_case(wanted))
        })
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Detects the card brand of a raw number.
///
/// Spaces are stripped first. Rules are tried in order and the first match
/// wins; anything else is `Unknown`.
///
/// # Example
/// ```
/// use datacap_card::{detect_brand, CardBrand};
///
/// assert_eq!(detect_brand("4111 1111 1111 1111"), CardBrand::Visa);
/// assert_eq!(detect_brand("2221000000000009"), CardBrand::Mastercard);
/// assert_eq!(detect_brand("9999999999999999"), CardBrand::Unknown);
/// ```
pub fn detect_brand(raw: &str) -> CardBrand {
    detect_brand_cleaned(&clean_number(raw))
}

/// Brand rules on an already cleaned number.
pub(crate) fn detect_brand_cleaned(cleaned: &str) -> CardBrand {
    let in_range = |width: usize, low: u32, high: u32| {
        leading_number(cleaned, width).is_some_and(|n| (low..=high).contains(&n))
    };

    if cleaned.starts_with('4') {
        CardBrand::Visa
    } else if in_range(2, 51, 55) || in_range(4, 2221, 2720) {
        CardBrand::Mastercard
    } else if cleaned.starts_with("34") || cleaned.starts_with("37") {
        CardBrand::AmericanExpress
    } else if cleaned.starts_with("6011") || cleaned.starts_with("65") || in_range(3, 644, 649) {
        CardBrand::Discover
    } else if cleaned.starts_with("36") || cleaned.starts_with("38") || in_range(3, 300, 305) {
        CardBrand::DinersClub
    } else {
        CardBrand::Unknown
    }
}

/// The first `width` characters as a number, if they exist and are all digits.
#[inline]
fn leading_number(cleaned: &str, width: usize) -> Option<u32> {
    let prefix = cleaned.get(..width)?;
    if prefix.bytes().all(|b| b.is_ascii_digit()) {
        prefix.parse().ok()
    } else {
        None
    }
}
