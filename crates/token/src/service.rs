//! Token request flow: validate the card, tokenize, check approval

use chrono::{NaiveDate, Utc};
use datacap_card::{validate_cvv, CardNumber};
use tracing::{debug, info, warn};

use crate::error::{TokenError, TokenResult};
use crate::model::{CardData, Token};
use crate::tokenizer::Tokenizer;

/// Validates card data and hands it to a tokenizer
#[derive(Debug)]
pub struct TokenService<T> {
    tokenizer: T,
}

impl<T: Tokenizer> TokenService<T> {
    /// Wrap a tokenizer
    pub fn new(tokenizer: T) -> Self {
        Self { tokenizer }
    }

    /// Underlying tokenizer
    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    /// Validate `card` against today's date and tokenize it
    pub fn request_token(&self, card: &CardData) -> TokenResult<Token> {
        self.request_token_at(card, Utc::now().date_naive())
    }

    /// Validate `card` against `today` and tokenize it.
    ///
    /// Checks run in order: number, expiry, CVV. The first failure wins.
    pub fn request_token_at(&self, card: &CardData, today: NaiveDate) -> TokenResult<Token> {
        let masked = card.masked_number();
        debug!(card = %masked, mode = %self.tokenizer.mode(), "Token requested");

        check_card(card, today)?;

        let token = self.tokenizer.tokenize(card)?;
        if !token.is_approved() {
            warn!(
                card = %masked,
                code = %token.response_code,
                "Tokenization not approved"
            );
            return Err(TokenError::TokenizationFailed(token.response_message));
        }

        info!(card = %masked, brand = %token.card_type, "Token issued");
        Ok(token)
    }
}

/// Run the number, expiry and CVV checks in that order.
///
/// Returns the parsed number so callers can reuse its brand.
pub fn check_card(card: &CardData, today: NaiveDate) -> TokenResult<CardNumber> {
    let masked = card.masked_number();

    let number = CardNumber::parse(&card.card_number).map_err(|e| {
        warn!(card = %masked, error = %e, "Card number rejected");
        TokenError::InvalidCardNumber
    })?;

    card.expiry()?.check_at(today).map_err(|e| {
        warn!(card = %masked, error = %e, "Expiry rejected");
        TokenError::InvalidExpirationDate
    })?;

    if !validate_cvv(&card.cvv, number.brand()) {
        warn!(card = %masked, brand = %number.brand(), "CVV rejected");
        return Err(TokenError::InvalidCvv);
    }

    Ok(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use crate::tokenizer::DemoTokenizer;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn service() -> TokenService<DemoTokenizer> {
        TokenService::new(DemoTokenizer)
    }

    #[test]
    fn test_demo_flow() {
        let card = CardData::new("4111 1111 1111 1111", "12", "28", "123");
        let token = service().request_token_at(&card, today()).unwrap();
        assert!(token.token.starts_with("DC_"));
        assert_eq!(token.card_type, "Visa");
        assert_eq!(token.expiration_date, "12/28");
    }

    #[test]
    fn test_number_checked_first() {
        let card = CardData::new("4111 1111 1111 1112", "00", "00", "");
        assert!(matches!(
            service().request_token_at(&card, today()),
            Err(TokenError::InvalidCardNumber)
        ));
    }

    #[test]
    fn test_check_card_rejects_each_number_failure() {
        for number in ["4111-1111-1111-1111", "411111111111", "4111111111111112"] {
            let card = CardData::new(number, "12", "28", "123");
            assert!(
                matches!(check_card(&card, today()), Err(TokenError::InvalidCardNumber)),
                "{number} should be rejected"
            );
        }

        let card = CardData::new("3782 822463 10005", "12", "28", "1234");
        let number = check_card(&card, today()).unwrap();
        assert_eq!(number.digits(), "378282246310005");
    }

    #[test]
    fn test_expired_card() {
        let card = CardData::new("4111111111111111", "09", "26", "123");
        assert!(matches!(
            service().request_token_at(&card, today()),
            Err(TokenError::InvalidExpirationDate)
        ));

        let this_month = CardData::new("4111111111111111", "10", "26", "123");
        assert!(service().request_token_at(&this_month, today()).is_ok());
    }

    #[test]
    fn test_cvv_length_follows_brand() {
        let amex_short = CardData::new("378282246310005", "12", "28", "123");
        assert!(matches!(
            service().request_token_at(&amex_short, today()),
            Err(TokenError::InvalidCvv)
        ));

        let amex = CardData::new("378282246310005", "12", "28", "1234");
        assert!(service().request_token_at(&amex, today()).is_ok());
    }

    struct Declining;

    impl Tokenizer for Declining {
        fn tokenize(&self, card: &CardData) -> TokenResult<Token> {
            let mut token = DemoTokenizer.tokenize(card)?;
            token.response_code = "05".into();
            token.response_message = "Do not honor".into();
            Ok(token)
        }

        fn mode(&self) -> Mode {
            Mode::Certification
        }
    }

    #[test]
    fn test_declined_token() {
        let card = CardData::new("5555555555554444", "12", "28", "123");
        let result = TokenService::new(Declining).request_token_at(&card, today());
        assert!(matches!(result, Err(TokenError::TokenizationFailed(m)) if m == "Do not honor"));
    }
}
