//! Error types for the tokenization flow

use datacap_card::CardError;
use thiserror::Error;

/// Result type alias for tokenization operations
pub type TokenResult<T> = Result<T, TokenError>;

/// Tokenization errors
#[derive(Error, Debug)]
pub enum TokenError {
    /// Public key missing or malformed for the active mode
    #[error("Invalid public key provided")]
    InvalidPublicKey,

    /// Card number failed validation
    #[error("Invalid card number")]
    InvalidCardNumber,

    /// Expiry unparseable, expired or too far ahead
    #[error("Invalid expiration date")]
    InvalidExpirationDate,

    /// CVV has the wrong shape for the brand
    #[error("Invalid CVV")]
    InvalidCvv,

    /// Transport failure or unexpected HTTP status
    #[error("Network error: {0}")]
    Network(String),

    /// Endpoint declined or returned an unusable response
    #[error("Tokenization failed: {0}")]
    TokenizationFailed(String),

    /// The user backed out of card entry
    #[error("User cancelled the operation")]
    UserCancelled,

    /// Remote mode without endpoint or key
    #[error("API endpoint and key must be configured")]
    MissingApiConfiguration,

    /// Configuration file or environment problem
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Sale amount is zero, negative, malformed or above the limit
    #[error("Invalid amount")]
    InvalidAmount,

    /// Sale attempted without a token
    #[error("A saved token is required")]
    MissingToken,

    /// Sale endpoint returned something other than a JSON object
    #[error("Invalid response from server")]
    InvalidResponse,
}

/// Stable numeric codes for host error reporting.
/// Range: 21xxx for tokenization errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenErrorCode {
    /// Invalid public key
    InvalidPublicKey = 21001,
    /// Invalid card number
    InvalidCardNumber = 21002,
    /// Invalid expiration date
    InvalidExpirationDate = 21003,
    /// Invalid CVV
    InvalidCvv = 21004,
    /// Network error
    Network = 21005,
    /// Tokenization failed
    TokenizationFailed = 21006,
    /// User cancelled
    UserCancelled = 21007,
    /// Missing API configuration
    MissingApiConfiguration = 21008,
    /// Configuration error
    Config = 21009,
    /// JSON error
    Json = 21010,
    /// Invalid amount
    InvalidAmount = 21011,
    /// Missing token
    MissingToken = 21012,
    /// Invalid sale response
    InvalidResponse = 21013,
}

impl TokenError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a tokenization failure
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::TokenizationFailed(msg.into())
    }

    /// Returns the error code for this error
    #[must_use]
    pub fn code(&self) -> TokenErrorCode {
        match self {
            Self::InvalidPublicKey => TokenErrorCode::InvalidPublicKey,
            Self::InvalidCardNumber => TokenErrorCode::InvalidCardNumber,
            Self::InvalidExpirationDate => TokenErrorCode::InvalidExpirationDate,
            Self::InvalidCvv => TokenErrorCode::InvalidCvv,
            Self::Network(_) => TokenErrorCode::Network,
            Self::TokenizationFailed(_) => TokenErrorCode::TokenizationFailed,
            Self::UserCancelled => TokenErrorCode::UserCancelled,
            Self::MissingApiConfiguration => TokenErrorCode::MissingApiConfiguration,
            Self::Config(_) => TokenErrorCode::Config,
            Self::Json(_) => TokenErrorCode::Json,
            Self::InvalidAmount => TokenErrorCode::InvalidAmount,
            Self::MissingToken => TokenErrorCode::MissingToken,
            Self::InvalidResponse => TokenErrorCode::InvalidResponse,
        }
    }

    /// Check if the user can fix this by correcting the card or sale form
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCardNumber
                | Self::InvalidExpirationDate
                | Self::InvalidCvv
                | Self::InvalidAmount
                | Self::MissingToken
        )
    }

    /// Check if retrying the same request could succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<CardError> for TokenError {
    fn from(err: CardError) -> Self {
        if err.is_number_error() {
            return Self::InvalidCardNumber;
        }
        match err {
            CardError::InvalidCvv => Self::InvalidCvv,
            _ => Self::InvalidExpirationDate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(TokenError::InvalidCardNumber.to_string(), "Invalid card number");
        assert_eq!(
            TokenError::Network("HTTP 502".into()).to_string(),
            "Network error: HTTP 502"
        );
        assert_eq!(
            TokenError::failed("Declined").to_string(),
            "Tokenization failed: Declined"
        );
        assert_eq!(
            TokenError::MissingApiConfiguration.to_string(),
            "API endpoint and key must be configured"
        );
    }

    #[test]
    fn test_from_card_error() {
        assert!(matches!(
            TokenError::from(CardError::ChecksumFailed),
            TokenError::InvalidCardNumber
        ));
        assert!(matches!(
            TokenError::from(CardError::Expired),
            TokenError::InvalidExpirationDate
        ));
        assert!(matches!(TokenError::from(CardError::InvalidCvv), TokenError::InvalidCvv));
        assert!(matches!(
            TokenError::from(CardError::InvalidLength(12)),
            TokenError::InvalidCardNumber
        ));
        assert!(matches!(
            TokenError::from(CardError::InvalidCharacter { position: 4, character: '-' }),
            TokenError::InvalidCardNumber
        ));
        assert!(matches!(
            TokenError::from(CardError::InvalidExpiry("13/30".into())),
            TokenError::InvalidExpirationDate
        ));
    }

    #[test]
    fn test_classification() {
        assert!(TokenError::InvalidCvv.is_input_error());
        assert!(!TokenError::UserCancelled.is_input_error());
        assert!(TokenError::Network("timeout".into()).is_retryable());
        assert!(!TokenError::failed("Declined").is_retryable());
        assert_eq!(TokenError::UserCancelled.code() as u32, 21007);
        assert!(TokenError::InvalidAmount.is_input_error());
        assert_eq!(TokenError::InvalidResponse.code() as u32, 21013);
        assert_eq!(
            TokenError::InvalidResponse.to_string(),
            "Invalid response from server"
        );
    }
}
