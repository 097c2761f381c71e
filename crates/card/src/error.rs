//! Error types for the card crate.

use thiserror::Error;

/// Result type alias for card operations.
pub type Result<T> = std::result::Result<T, CardError>;

/// Errors raised by the strict parsers (`CardNumber::parse`, `Expiry::parse`).
///
/// The boolean helpers (`validate`, `detect_brand`, ...) never produce these;
/// they degrade to `false` / `Unknown` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    /// A non-digit character was found after stripping spaces
    #[error("Invalid character {character:?} at position {position}")]
    InvalidCharacter {
        /// Zero-based position in the cleaned number
        position: usize,
        /// The offending character
        character: char,
    },

    /// Cleaned number is outside 13..=19 digits
    #[error("Invalid card number length: {0} digits (expected 13-19)")]
    InvalidLength(usize),

    /// Luhn checksum did not validate
    #[error("Card number failed checksum validation")]
    ChecksumFailed,

    /// Expiry could not be parsed as MM/YY
    #[error("Invalid expiration date: {0}")]
    InvalidExpiry(String),

    /// Expiry month is in the past
    #[error("Card has expired")]
    Expired,

    /// Expiry is further out than issuers allow
    #[error("Expiration date is too far in the future")]
    ExpiryTooFar,

    /// CVV has the wrong length or non-digit characters
    #[error("Invalid CVV")]
    InvalidCvv,
}

/// Error code for integration with host error reporting.
/// Range: 20xxx for card errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardErrorCode {
    /// Non-digit character
    InvalidCharacter = 20001,
    /// Length out of range
    InvalidLength = 20002,
    /// Luhn failure
    ChecksumFailed = 20003,
    /// Unparseable expiry
    InvalidExpiry = 20004,
    /// Expired card
    Expired = 20005,
    /// Expiry too far ahead
    ExpiryTooFar = 20006,
    /// Bad CVV
    InvalidCvv = 20007,
}

impl CardError {
    /// Returns the error code for this error.
    pub fn code(&self) -> CardErrorCode {
        match self {
            CardError::InvalidCharacter { .. } => CardErrorCode::InvalidCharacter,
            CardError::InvalidLength(_) => CardErrorCode::InvalidLength,
            CardError::ChecksumFailed => CardErrorCode::ChecksumFailed,
            CardError::InvalidExpiry(_) => CardErrorCode::InvalidExpiry,
            CardError::Expired => CardErrorCode::Expired,
            CardError::ExpiryTooFar => CardErrorCode::ExpiryTooFar,
            CardError::InvalidCvv => CardErrorCode::InvalidCvv,
        }
    }

    /// True for errors about the card number itself (as opposed to expiry/CVV).
    pub fn is_number_error(&self) -> bool {
        matches!(
            self,
            CardError::InvalidCharacter { .. } | CardError::InvalidLength(_) | CardError::ChecksumFailed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CardError::ChecksumFailed.code() as u32, 20003);
        assert_eq!(CardError::InvalidCvv.code() as u32, 20007);
    }

    #[test]
    fn test_number_error_classification() {
        assert!(CardError::InvalidLength(3).is_number_error());
        assert!(!CardError::Expired.is_number_error());
    }

    #[test]
    fn test_display() {
        let err = CardError::InvalidCharacter { position: 4, character: '-' };
        assert_eq!(err.to_string(), "Invalid character '-' at position 4");
    }
}
