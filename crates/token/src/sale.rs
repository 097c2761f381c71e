//! Sales paid with a previously issued token

use std::fmt;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{Mode, TokenConfig};
use crate::error::{TokenError, TokenResult};
use crate::model::APPROVED_CODE;
use crate::request::{str_field, X_REQUEST_ID};
use crate::tokenizer::Transport;

/// Largest amount a single sale may carry, in cents ($99,999.99)
pub const MAX_AMOUNT_CENTS: u64 = 9_999_999;

/// Currency sent with every sale
pub const CURRENCY: &str = "USD";

/// A positive sale amount in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    /// Amount from cents; zero and anything above [`MAX_AMOUNT_CENTS`] are rejected
    pub fn from_cents(cents: u64) -> TokenResult<Self> {
        if cents == 0 || cents > MAX_AMOUNT_CENTS {
            return Err(TokenError::InvalidAmount);
        }
        Ok(Self(cents))
    }

    /// Amount from a dollar value, rounded to the nearest cent
    pub fn from_dollars(dollars: f64) -> TokenResult<Self> {
        if !dollars.is_finite() || dollars <= 0.0 {
            return Err(TokenError::InvalidAmount);
        }
        let cents = (dollars * 100.0).round();
        if cents > MAX_AMOUNT_CENTS as f64 {
            return Err(TokenError::InvalidAmount);
        }
        Self::from_cents(cents as u64)
    }

    /// Parse `12`, `12.5`, `12.50` or `$12.50`. More than two decimals is an error.
    ///
    /// # Example
    /// ```
    /// use datacap_token::sale::Amount;
    ///
    /// assert_eq!(Amount::parse("$12.5").unwrap().cents(), 1250);
    /// assert!(Amount::parse("0.001").is_err());
    /// ```
    pub fn parse(input: &str) -> TokenResult<Self> {
        let trimmed = input.trim();
        let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);
        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || fraction.len() > 2 || !all_digits(whole) || !all_digits(fraction) {
            return Err(TokenError::InvalidAmount);
        }

        let whole: u64 = whole.parse().map_err(|_| TokenError::InvalidAmount)?;
        let fraction: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| TokenError::InvalidAmount)? * 10,
            _ => fraction.parse().map_err(|_| TokenError::InvalidAmount)?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .ok_or(TokenError::InvalidAmount)?;
        Self::from_cents(cents)
    }

    /// Value in cents
    pub fn cents(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Outcome of a sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Response code `"00"`
    Approved,
    /// Any other response code, or none
    Declined,
}

/// A processed sale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Processor transaction ID
    pub id: String,
    /// Amount charged
    pub amount: Amount,
    /// Token the sale was paid with
    pub token: String,
    /// Masked card as reported by the processor
    pub masked_card: String,
    /// Card type as reported by the processor
    pub card_type: String,
    /// Approved or declined
    pub status: TransactionStatus,
    /// Processor response code, if any
    pub response_code: Option<String>,
    /// Processor response message, if any
    pub response_message: Option<String>,
    /// When the sale was processed
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// True for approved sales
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.status == TransactionStatus::Approved
    }
}

/// JSON body posted to the sale endpoint.
///
/// `Debug` leaves out the API key.
#[derive(Clone, Serialize)]
pub struct SaleRequest {
    /// Token to charge
    pub token: String,
    /// Amount in cents
    pub amount: Amount,
    /// Always [`CURRENCY`]
    pub currency: &'static str,
    /// True in certification mode
    pub test: bool,
    /// Key sent as HTTP Basic credentials
    #[serde(skip)]
    pub api_key: String,
    /// Correlation ID sent as a header
    #[serde(skip)]
    pub request_id: Uuid,
}

impl SaleRequest {
    /// Build a sale request with the key and mode from `config`
    pub fn new(config: &TokenConfig, token: &str, amount: Amount) -> TokenResult<Self> {
        let api_key = config
            .public_key()
            .ok_or(TokenError::MissingApiConfiguration)?;

        Ok(Self {
            token: token.to_string(),
            amount,
            currency: CURRENCY,
            test: config.mode == Mode::Certification,
            api_key: api_key.to_string(),
            request_id: Uuid::new_v4(),
        })
    }

    /// Headers to send with the body
    pub fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            (
                "Authorization".to_string(),
                format!("Basic {}", STANDARD.encode(self.api_key.as_bytes())),
            ),
            (X_REQUEST_ID.to_string(), self.request_id.to_string()),
        ]
    }

    /// Serialized body
    pub fn to_json(&self) -> TokenResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Debug for SaleRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaleRequest")
            .field("token", &self.token)
            .field("amount", &self.amount)
            .field("currency", &self.currency)
            .field("test", &self.test)
            .field("request_id", &self.request_id)
            .finish_non_exhaustive()
    }
}

/// Turn a sale endpoint response into a transaction.
///
/// Any JSON object yields a transaction, approved only for response code
/// `"00"`. Fields of an unexpected type fall back to their defaults.
pub fn interpret_sale_response(
    status: u16,
    body: &str,
    request: &SaleRequest,
    now: DateTime<Utc>,
) -> TokenResult<Transaction> {
    let Some(json) = serde_json::from_str::<Value>(body).ok().filter(Value::is_object) else {
        debug!(status, "Sale endpoint returned a non-object body");
        return Err(if (200..300).contains(&status) {
            TokenError::InvalidResponse
        } else {
            TokenError::Network(format!("HTTP {status}"))
        });
    };

    let response_code = str_field(&json, "responseCode");
    let status = if response_code.as_deref() == Some(APPROVED_CODE) {
        TransactionStatus::Approved
    } else {
        TransactionStatus::Declined
    };

    Ok(Transaction {
        id: str_field(&json, "transactionId").unwrap_or_else(|| Uuid::new_v4().to_string()),
        amount: request.amount,
        token: request.token.clone(),
        masked_card: str_field(&json, "maskedCard").unwrap_or_else(|| "****".to_string()),
        card_type: str_field(&json, "cardType").unwrap_or_else(|| "Unknown".to_string()),
        status,
        response_code,
        response_message: str_field(&json, "responseMessage"),
        timestamp: now,
    })
}

/// Charges a token
pub trait PaymentProcessor: Send + Sync {
    /// Run a sale for `amount` against `token`
    fn process_sale(&self, token: &str, amount: Amount) -> TokenResult<Transaction>;

    /// Mode this processor serves
    fn mode(&self) -> Mode;
}

/// Offline processor approving every sale
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoProcessor;

impl DemoProcessor {
    /// Approve a sale with an explicit processing time
    pub fn process_sale_at(&self, token: &str, amount: Amount, now: DateTime<Utc>) -> Transaction {
        let id: String = Uuid::new_v4()
            .simple()
            .to_string()
            .to_uppercase()
            .chars()
            .take(8)
            .collect();

        Transaction {
            id: format!("DEMO-{id}"),
            amount,
            token: token.to_string(),
            masked_card: "****DEMO".to_string(),
            card_type: "Demo Card".to_string(),
            status: TransactionStatus::Approved,
            response_code: Some(APPROVED_CODE.to_string()),
            response_message: Some("Demo transaction approved".to_string()),
            timestamp: now,
        }
    }
}

impl PaymentProcessor for DemoProcessor {
    fn process_sale(&self, token: &str, amount: Amount) -> TokenResult<Transaction> {
        Ok(self.process_sale_at(token, amount, Utc::now()))
    }

    fn mode(&self) -> Mode {
        Mode::Demo
    }
}

/// Processor posting to the certification or production sale endpoint
#[derive(Debug)]
pub struct RemoteProcessor<T> {
    config: TokenConfig,
    transport: T,
}

impl<T: Transport> RemoteProcessor<T> {
    /// Create a processor for a remote mode; the configuration must validate
    pub fn new(config: TokenConfig, transport: T) -> TokenResult<Self> {
        if !config.mode.is_remote() {
            return Err(TokenError::config("remote processor needs certification or production mode"));
        }
        config.validate()?;
        Ok(Self { config, transport })
    }

    /// Build the request that `process_sale` would send
    pub fn prepare(&self, token: &str, amount: Amount) -> TokenResult<SaleRequest> {
        SaleRequest::new(&self.config, token, amount)
    }
}

impl<T: Transport> PaymentProcessor for RemoteProcessor<T> {
    fn process_sale(&self, token: &str, amount: Amount) -> TokenResult<Transaction> {
        let endpoint = self
            .config
            .sale_endpoint()
            .ok_or(TokenError::MissingApiConfiguration)?;
        let request = self.prepare(token, amount)?;
        let body = request.to_json()?;

        debug!(
            endpoint,
            request_id = %request.request_id,
            amount = %amount,
            "Posting sale request"
        );
        let response = self.transport.post(
            endpoint,
            &request.headers(),
            &body,
            Duration::from_secs(self.config.timeout_secs),
        )?;

        interpret_sale_response(response.status, &response.body, &request, Utc::now())
    }

    fn mode(&self) -> Mode {
        self.config.mode
    }
}

/// Checks sale input and hands it to a processor
#[derive(Debug)]
pub struct SaleService<P> {
    processor: P,
}

impl<P: PaymentProcessor> SaleService<P> {
    /// Wrap a processor
    pub fn new(processor: P) -> Self {
        Self { processor }
    }

    /// Charge `amount` to `token`. A declined sale is returned, not an error.
    pub fn process_sale(&self, token: &str, amount: Amount) -> TokenResult<Transaction> {
        let token = token.trim();
        if token.is_empty() {
            return Err(TokenError::MissingToken);
        }

        debug!(amount = %amount, mode = %self.processor.mode(), "Sale requested");
        let transaction = self.processor.process_sale(token, amount)?;

        if transaction.is_approved() {
            info!(id = %transaction.id, amount = %amount, "Sale approved");
        } else {
            warn!(
                id = %transaction.id,
                code = transaction.response_code.as_deref().unwrap_or("-"),
                "Sale declined"
            );
        }
        Ok(transaction)
    }
}
