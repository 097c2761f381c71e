//! Card tokenization flow for Datacap endpoints.
//!
//! This crate provides:
//! - `TokenConfig`: mode, endpoints and per-mode public keys, loaded from
//!   TOML with `DATACAP_*` overrides
//! - `CardData`, `Token` and `SavedToken` models
//! - The endpoint wire model and response interpretation
//! - `DemoTokenizer` for offline tokens and `RemoteTokenizer` over a
//!   caller-supplied `Transport`
//! - `TokenService`, which validates card data before tokenizing
//! - `SaleService`, which charges a saved token through a `PaymentProcessor`
//!
//! Raw card numbers never reach the logs; every `Debug` impl that could
//! print one masks it.
//!
//! # Example
//!
//! ```
//! use datacap_token::prelude::*;
//!
//! let service = TokenService::new(DemoTokenizer);
//! let card = CardData::from_form("4111 1111 1111 1111", "12/40", "123").unwrap();
//! let token = service.request_token(&card).unwrap();
//! assert!(token.token.ends_with("...DEMO"));
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod model;
pub mod request;
pub mod sale;
pub mod service;
pub mod tokenizer;

pub use config::{Config, Mode, TokenConfig};
pub use error::{TokenError, TokenErrorCode, TokenResult};
pub use model::{CardData, SavedToken, Token};
pub use request::{interpret_response, TokenRequest};
pub use sale::{
    interpret_sale_response, Amount, DemoProcessor, PaymentProcessor, RemoteProcessor, SaleRequest,
    SaleService, Transaction, TransactionStatus,
};
pub use service::{check_card, TokenService};
pub use tokenizer::{DemoTokenizer, RemoteTokenizer, Tokenizer, Transport, TransportResponse};

/// Prelude for common imports
pub mod prelude {
    pub use crate::config::{Config, Mode, TokenConfig};
    pub use crate::error::{TokenError, TokenResult};
    pub use crate::model::{CardData, SavedToken, Token};
    pub use crate::sale::{Amount, DemoProcessor, PaymentProcessor, RemoteProcessor, SaleService, Transaction};
    pub use crate::service::{check_card, TokenService};
    pub use crate::tokenizer::{DemoTokenizer, RemoteTokenizer, Tokenizer, Transport, TransportResponse};
}
