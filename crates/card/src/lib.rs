//! Card number validation and classification for Datacap tokenization.
//!
//! This crate provides:
//! - Luhn validation with 13-19 digit length bounds
//! - Card brand detection from BIN prefixes
//! - Brand-aware masking that reveals only the last four digits
//! - Live input grouping (4-4-4-4, 4-6-5, 4-6-4)
//! - Expiry and CVV checks
//! - Batch checks with optional parallelism
//! - WASM bindings for browser usage
//!
//! Every function is pure: no I/O, no shared state, safe to call from any
//! thread. Malformed input yields `false`, `Unknown` or the unchanged input
//! rather than an error; the strict `CardNumber` and `Expiry` parsers are
//! there for callers who want a `Result`.
//!
//! # Example
//!
//! ```
//! use datacap_card::{detect_brand, mask_number, validate, CardBrand};
//!
//! let raw = "3782 822463 10005";
//! assert!(validate(raw));
//! assert_eq!(detect_brand(raw), CardBrand::AmericanExpress);
//! assert_eq!(mask_number(raw), "**** ****** *0005");
//! ```

#![warn(missing_docs)]

mod brand;
mod cvv;
mod error;
mod expiry;
mod format;
mod luhn;
mod mask;
mod number;
pub mod batch;

#[cfg(feature = "wasm")]
mod wasm;

pub use batch::{check_numbers, summarize, BatchSummary, CardCheck};
pub use brand::{detect_brand, CardBrand};
pub use cvv::{cvv_accepts_input, validate_cvv};
pub use error::{CardError, CardErrorCode, Result};
pub use expiry::{Expiry, MAX_YEARS_AHEAD};
pub use format::{accepts_input, format_grouped, format_input, max_digits};
pub use luhn::{luhn_check_digit, validate};
pub use mask::mask_number;
pub use number::{clean_number, CardNumber};

/// Shortest card number accepted by `validate`.
pub const MIN_DIGITS: usize = 13;

/// Longest card number accepted by `validate`.
pub const MAX_DIGITS: usize = 19;
