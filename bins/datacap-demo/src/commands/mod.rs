//! CLI command implementations
//!
//! Each command returns `Ok(false)` when the input was rejected, so the
//! binary can exit non-zero without printing an error.

pub mod check;
pub mod config;
pub mod inspect;
pub mod sale;
pub mod tokenize;
pub mod validate;
