//! Card data collected from the form, and the token records produced from it.

use std::fmt;

use chrono::{DateTime, Utc};
use datacap_card::{clean_number, mask_number, Expiry};
use serde::{Deserialize, Serialize};

use crate::error::{TokenError, TokenResult};

/// Response code of an approved tokenization
pub const APPROVED_CODE: &str = "00";

/// Card details as entered. Lives only for the duration of a token request.
///
/// `Debug` prints the masked number and hides the CVV.
#[derive(Clone, PartialEq, Eq)]
pub struct CardData {
    /// Card number as typed (may contain spaces)
    pub card_number: String,
    /// Two-digit month
    pub expiration_month: String,
    /// Two-digit year
    pub expiration_year: String,
    /// Card verification value
    pub cvv: String,
}

impl CardData {
    /// Create card data from already split fields
    pub fn new(
        card_number: impl Into<String>,
        expiration_month: impl Into<String>,
        expiration_year: impl Into<String>,
        cvv: impl Into<String>,
    ) -> Self {
        Self {
            card_number: card_number.into(),
            expiration_month: expiration_month.into(),
            expiration_year: expiration_year.into(),
            cvv: cvv.into(),
        }
    }

    /// Build card data from the three form fields, splitting `MM/YY`.
    ///
    /// Empty fields map to the matching invalid-field error.
    pub fn from_form(card_number: &str, expiration: &str, cvv: &str) -> TokenResult<Self> {
        if card_number.trim().is_empty() {
            return Err(TokenError::InvalidCardNumber);
        }
        if cvv.trim().is_empty() {
            return Err(TokenError::InvalidCvv);
        }

        let expiry = Expiry::parse(expiration)?;
        Ok(Self::new(
            card_number,
            expiry.month_str(),
            expiry.year_str(),
            cvv.trim(),
        ))
    }

    /// Card number with spaces removed
    pub fn cleaned_number(&self) -> String {
        clean_number(&self.card_number)
    }

    /// Masked form of the card number
    pub fn masked_number(&self) -> String {
        mask_number(&self.card_number)
    }

    /// `MM/YY`
    pub fn expiration_date(&self) -> String {
        format!("{}/{}", self.expiration_month, self.expiration_year)
    }

    /// Parsed expiry
    pub fn expiry(&self) -> TokenResult<Expiry> {
        Expiry::parse(&self.expiration_date()).map_err(TokenError::from)
    }
}

impl fmt::Debug for CardData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardData")
            .field("card_number", &self.masked_number())
            .field("expiration", &self.expiration_date())
            .field("cvv", &"***")
            .finish()
    }
}

/// Result of a tokenization request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Opaque token standing in for the card
    pub token: String,
    /// Masked card number for display
    pub masked_card_number: String,
    /// Brand display name
    pub card_type: String,
    /// `MM/YY`
    pub expiration_date: String,
    /// Endpoint response code (`"00"` on approval)
    pub response_code: String,
    /// Endpoint response message
    pub response_message: String,
    /// When the token was issued
    pub timestamp: DateTime<Utc>,
}

impl Token {
    /// Approved when the response code is `"00"` or absent
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.response_code.is_empty() || self.response_code == APPROVED_CODE
    }

    /// Record suitable for keeping on the device
    #[must_use]
    pub fn to_saved(&self) -> SavedToken {
        SavedToken::from(self)
    }
}

/// A token as kept for later transactions; no response details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedToken {
    /// Opaque token
    pub token: String,
    /// Masked card number
    pub masked_card_number: String,
    /// Brand display name
    pub card_type: String,
    /// `MM/YY`
    pub expiration_date: String,
    /// When the token was issued
    pub timestamp: DateTime<Utc>,
}

impl From<&Token> for SavedToken {
    fn from(token: &Token) -> Self {
        Self {
            token: token.token.clone(),
            masked_card_number: token.masked_card_number.clone(),
            card_type: token.card_type.clone(),
            expiration_date: token.expiration_date.clone(),
            timestamp: token.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_token(code: &str) -> Token {
        Token {
            token: "tok_123".into(),
            masked_card_number: "**** **** **** 1111".into(),
            card_type: "Visa".into(),
            expiration_date: "12/30".into(),
            response_code: code.into(),
            response_message: "Success".into(),
            timestamp: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn test_from_form() {
        let card = CardData::from_form("4111 1111 1111 1111", "09/29", "123").unwrap();
        assert_eq!(card.expiration_month, "09");
        assert_eq!(card.expiration_year, "29");
        assert_eq!(card.cleaned_number(), "4111111111111111");
        assert_eq!(card.expiration_date(), "09/29");
    }

    #[test]
    fn test_from_form_rejects_missing_fields() {
        assert!(matches!(
            CardData::from_form("", "09/29", "123"),
            Err(TokenError::InvalidCardNumber)
        ));
        assert!(matches!(
            CardData::from_form("4111111111111111", "9/29", "123"),
            Err(TokenError::InvalidExpirationDate)
        ));
        assert!(matches!(
            CardData::from_form("4111111111111111", "09/29", " "),
            Err(TokenError::InvalidCvv)
        ));
    }

    #[test]
    fn test_debug_is_redacted() {
        let card = CardData::new("4111111111111111", "09", "29", "123");
        let debug = format!("{card:?}");
        assert!(!debug.contains("4111111111111111"));
        assert!(!debug.contains("123\""));
        assert!(debug.contains("**** **** **** 1111"));
    }

    #[test]
    fn test_approval() {
        assert!(sample_token("00").is_approved());
        assert!(sample_token("").is_approved());
        assert!(!sample_token("999").is_approved());
    }

    #[test]
    fn test_saved_token_json() {
        let saved = sample_token("00").to_saved();
        let json = serde_json::to_value(&saved).unwrap();
        assert_eq!(json["maskedCardNumber"], "**** **** **** 1111");
        assert_eq!(json["cardType"], "Visa");
        assert!(json.get("responseCode").is_none());

        let back: SavedToken = serde_json::from_value(json).unwrap();
        assert_eq!(back, saved);
    }
}
