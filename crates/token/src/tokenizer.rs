//! Tokenizers: offline demo tokens and remote endpoints behind a transport

use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use datacap_card::detect_brand;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::config::{Mode, TokenConfig};
use crate::error::{TokenError, TokenResult};
use crate::model::{CardData, Token, APPROVED_CODE};
use crate::request::{interpret_response, TokenRequest};

/// Turns validated card data into a token
pub trait Tokenizer: Send + Sync {
    /// Tokenize `card`. Input has already been validated by the caller.
    fn tokenize(&self, card: &CardData) -> TokenResult<Token>;

    /// Mode this tokenizer serves
    fn mode(&self) -> Mode;
}

/// Offline tokenizer returning `DC_...DEMO` tokens
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoTokenizer;

impl DemoTokenizer {
    /// Tokenize with an explicit issue time
    pub fn tokenize_at(&self, card: &CardData, now: DateTime<Utc>) -> Token {
        let mut hasher = Sha256::new();
        hasher.update(card.cleaned_number().as_bytes());
        hasher.update(card.expiration_date().as_bytes());
        hasher.update(now.timestamp_nanos_opt().unwrap_or_default().to_be_bytes());
        let encoded = URL_SAFE_NO_PAD.encode(hasher.finalize());
        let body: String = encoded.chars().take(20).collect();

        Token {
            token: format!("DC_{body}...DEMO"),
            masked_card_number: card.masked_number(),
            card_type: detect_brand(&card.card_number).display_name().to_string(),
            expiration_date: card.expiration_date(),
            response_code: APPROVED_CODE.to_string(),
            response_message: "Demo Mode - Success".to_string(),
            timestamp: now,
        }
    }
}

impl Tokenizer for DemoTokenizer {
    fn tokenize(&self, card: &CardData) -> TokenResult<Token> {
        Ok(self.tokenize_at(card, Utc::now()))
    }

    fn mode(&self) -> Mode {
        Mode::Demo
    }
}

/// Raw HTTP outcome handed back by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
}

/// Network collaborator that POSTs a JSON body
pub trait Transport: Send + Sync {
    /// Send `body` to `endpoint` with `headers`; connection failures map to
    /// [`TokenError::Network`]
    fn post(
        &self,
        endpoint: &str,
        headers: &[(String, String)],
        body: &str,
        timeout: Duration,
    ) -> TokenResult<TransportResponse>;
}

/// Tokenizer posting to the certification or production endpoint
#[derive(Debug)]
pub struct RemoteTokenizer<T> {
    config: TokenConfig,
    transport: T,
}

impl<T: Transport> RemoteTokenizer<T> {
    /// Create a tokenizer for a remote mode; the configuration must validate
    pub fn new(config: TokenConfig, transport: T) -> TokenResult<Self> {
        if !config.mode.is_remote() {
            return Err(TokenError::config("remote tokenizer needs certification or production mode"));
        }
        config.validate()?;
        Ok(Self { config, transport })
    }

    /// Configuration in use
    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Build the request that `tokenize` would send
    pub fn prepare(&self, card: &CardData) -> TokenResult<TokenRequest> {
        TokenRequest::new(&self.config, card)
    }
}

impl<T: Transport> Tokenizer for RemoteTokenizer<T> {
    fn tokenize(&self, card: &CardData) -> TokenResult<Token> {
        let endpoint = self
            .config
            .endpoint()
            .ok_or(TokenError::MissingApiConfiguration)?;
        let request = self.prepare(card)?;
        let body = request.to_json()?;

        debug!(
            endpoint,
            request_id = %request.request_id,
            mode = %self.config.mode,
            "Posting tokenization request"
        );
        let response = self.transport.post(
            endpoint,
            &request.headers(),
            &body,
            Duration::from_secs(self.config.timeout_secs),
        )?;

        interpret_response(response.status, &response.body, card, Utc::now())
    }

    fn mode(&self) -> Mode {
        self.config.mode
    }
}
