//! Wire model for the tokenization endpoint

use std::fmt;

use chrono::{DateTime, Utc};
use datacap_card::detect_brand;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::{Mode, TokenConfig};
use crate::error::{TokenError, TokenResult};
use crate::model::{CardData, Token, APPROVED_CODE};

/// Request correlation ID header
pub const X_REQUEST_ID: &str = "X-Request-ID";

/// Header flagging certification traffic
pub const X_CERTIFICATION_MODE: &str = "X-Certification-Mode";

/// JSON body posted to the tokenization endpoint.
///
/// `Debug` redacts the card number and CVV.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    /// Public key of the active mode
    pub public_key: String,
    /// Card number without spaces
    pub card_number: String,
    /// Two-digit month
    pub expiration_month: String,
    /// Two-digit year
    pub expiration_year: String,
    /// Card verification value
    pub cvv: String,
    /// True when posting to the certification environment
    pub is_certification: bool,
    /// Correlation ID sent as a header, not in the body
    #[serde(skip)]
    pub request_id: Uuid,
}

impl TokenRequest {
    /// Build a request for `card` with the key and mode from `config`
    pub fn new(config: &TokenConfig, card: &CardData) -> TokenResult<Self> {
        let public_key = config
            .public_key()
            .ok_or(TokenError::MissingApiConfiguration)?;

        Ok(Self {
            public_key: public_key.to_string(),
            card_number: card.cleaned_number(),
            expiration_month: card.expiration_month.clone(),
            expiration_year: card.expiration_year.clone(),
            cvv: card.cvv.clone(),
            is_certification: config.mode == Mode::Certification,
            request_id: Uuid::new_v4(),
        })
    }

    /// Headers to send with the body
    pub fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Authorization".to_string(), self.public_key.clone()),
            (X_REQUEST_ID.to_string(), self.request_id.to_string()),
        ];
        if self.is_certification {
            headers.push((X_CERTIFICATION_MODE.to_string(), "true".to_string()));
        }
        headers
    }

    /// Serialized body
    pub fn to_json(&self) -> TokenResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRequest")
            .field("card_number", &datacap_card::mask_number(&self.card_number))
            .field("expiration_month", &self.expiration_month)
            .field("expiration_year", &self.expiration_year)
            .field("cvv", &"***")
            .field("is_certification", &self.is_certification)
            .field("request_id", &self.request_id)
            .finish_non_exhaustive()
    }
}

/// Read `key` from a JSON object if it holds a string; other types count as absent
pub(crate) fn str_field(body: &Value, key: &str) -> Option<String> {
    body.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Turn an HTTP status and body into a token or the matching error.
///
/// Each field is read on its own, so a field of an unexpected type falls
/// back to its default instead of failing the whole response.
pub fn interpret_response(
    status: u16,
    body: &str,
    card: &CardData,
    now: DateTime<Utc>,
) -> TokenResult<Token> {
    let parsed = serde_json::from_str::<Value>(body)
        .ok()
        .filter(Value::is_object);

    if status != 200 {
        debug!(status, "Tokenization endpoint returned an error status");
        return Err(match parsed.as_ref().and_then(|json| str_field(json, "error")) {
            Some(message) => TokenError::TokenizationFailed(message),
            None => TokenError::Network(format!("HTTP {status}")),
        });
    }

    let json = parsed.ok_or_else(|| TokenError::failed("Invalid response format"))?;

    if let Some(message) = str_field(&json, "error") {
        return Err(TokenError::TokenizationFailed(message));
    }

    let token = str_field(&json, "token")
        .filter(|t| !t.is_empty())
        .ok_or_else(|| TokenError::failed("Missing token in response"))?;

    let local_last4: String = {
        let cleaned = card.cleaned_number();
        let skip = cleaned.chars().count().saturating_sub(4);
        cleaned.chars().skip(skip).collect()
    };
    if let Some(remote) = str_field(&json, "last4") {
        if remote != local_last4 {
            warn!(remote_last4 = %remote, "Endpoint reported different last four digits");
        }
    }

    let card_type = str_field(&json, "brand")
        .unwrap_or_else(|| detect_brand(&card.card_number).display_name().to_string());

    Ok(Token {
        token,
        masked_card_number: card.masked_number(),
        card_type,
        expiration_date: card.expiration_date(),
        response_code: str_field(&json, "responseCode")
            .unwrap_or_else(|| APPROVED_CODE.to_string()),
        response_message: str_field(&json, "responseMessage")
            .unwrap_or_else(|| "Success".to_string()),
        timestamp: now,
    })
}
