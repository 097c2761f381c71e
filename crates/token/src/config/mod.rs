//! Tokenization configuration
//!
//! TOML file plus `DATACAP_*` environment overrides.

mod loader;
mod schema;

pub use loader::{apply_env_overrides, Config, ENV_ENDPOINT, ENV_MODE, ENV_PUBLIC_KEY};
pub use schema::*;
