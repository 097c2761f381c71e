//! Configuration schema definitions

use serde::{Deserialize, Serialize};

use crate::error::{TokenError, TokenResult};

/// Certification (test) tokenization endpoint
pub const CERTIFICATION_ENDPOINT: &str = "https://token-cert.dcap.com/v1/tokenize";

/// Production tokenization endpoint
pub const PRODUCTION_ENDPOINT: &str = "https://token.dcap.com/v1/tokenize";

/// Certification sale endpoint
pub const CERTIFICATION_SALE_ENDPOINT: &str = "https://pay-cert.dcap.com/v2/sale";

/// Production sale endpoint
pub const PRODUCTION_SALE_ENDPOINT: &str = "https://pay.dcap.com/v2/sale";

/// Tokenization mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Offline mock tokens, no endpoint involved
    #[default]
    Demo,
    /// Certification environment
    Certification,
    /// Production environment
    Production,
}

impl Mode {
    /// Parse a mode name (accepts short forms)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "demo" => Some(Self::Demo),
            "certification" | "cert" => Some(Self::Certification),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Demo => "demo",
            Self::Certification => "certification",
            Self::Production => "production",
        }
    }

    /// True for modes that talk to a tokenization endpoint
    pub fn is_remote(self) -> bool {
        !matches!(self, Self::Demo)
    }

    /// Built-in endpoint for this mode
    pub fn default_endpoint(self) -> Option<&'static str> {
        match self {
            Self::Demo => None,
            Self::Certification => Some(CERTIFICATION_ENDPOINT),
            Self::Production => Some(PRODUCTION_ENDPOINT),
        }
    }

    /// Built-in sale endpoint for this mode
    pub fn default_sale_endpoint(self) -> Option<&'static str> {
        match self {
            Self::Demo => None,
            Self::Certification => Some(CERTIFICATION_SALE_ENDPOINT),
            Self::Production => Some(PRODUCTION_SALE_ENDPOINT),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root tokenization configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Active mode
    #[serde(default)]
    pub mode: Mode,

    /// Public key for the certification environment
    #[serde(default)]
    pub certification_public_key: Option<String>,

    /// Public key for the production environment
    #[serde(default)]
    pub production_public_key: Option<String>,

    /// Endpoint override for the active remote mode
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Sale endpoint override for the active remote mode
    #[serde(default)]
    pub sale_endpoint: Option<String>,

    /// Request timeout handed to transports, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            certification_public_key: None,
            production_public_key: None,
            endpoint: None,
            sale_endpoint: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

impl TokenConfig {
    /// Builder-style method to set the mode
    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder-style method to set the key for the current mode
    #[must_use]
    pub fn with_public_key(mut self, key: impl Into<String>) -> Self {
        self.set_public_key(key.into());
        self
    }

    /// Builder-style method to override the endpoint
    #[must_use]
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = Some(url.into());
        self
    }

    /// Store `key` as the public key of the current mode. No-op in demo mode.
    pub fn set_public_key(&mut self, key: String) {
        match self.mode {
            Mode::Demo => {}
            Mode::Certification => self.certification_public_key = Some(key),
            Mode::Production => self.production_public_key = Some(key),
        }
    }

    /// Public key of the current mode
    pub fn public_key(&self) -> Option<&str> {
        match self.mode {
            Mode::Demo => None,
            Mode::Certification => self.certification_public_key.as_deref(),
            Mode::Production => self.production_public_key.as_deref(),
        }
    }

    /// Endpoint of the current mode (override first)
    pub fn endpoint(&self) -> Option<&str> {
        if !self.mode.is_remote() {
            return None;
        }
        self.endpoint.as_deref().or(self.mode.default_endpoint())
    }

    /// Sale endpoint of the current mode (override first)
    pub fn sale_endpoint(&self) -> Option<&str> {
        if !self.mode.is_remote() {
            return None;
        }
        self.sale_endpoint
            .as_deref()
            .or(self.mode.default_sale_endpoint())
    }

    /// Validate the configuration
    pub fn validate(&self) -> TokenResult<()> {
        if self.timeout_secs == 0 {
            return Err(TokenError::config("timeout_secs cannot be zero"));
        }

        if !self.mode.is_remote() {
            return Ok(());
        }

        let endpoint = self.endpoint().ok_or(TokenError::MissingApiConfiguration)?;
        if !is_http_url(endpoint) {
            return Err(TokenError::config("endpoint must start with http:// or https://"));
        }
        if self.sale_endpoint().is_some_and(|url| !is_http_url(url)) {
            return Err(TokenError::config("sale_endpoint must start with http:// or https://"));
        }

        match self.public_key() {
            None => Err(TokenError::MissingApiConfiguration),
            Some(key) if key.trim().is_empty() || key.chars().any(char::is_whitespace) => {
                Err(TokenError::InvalidPublicKey)
            }
            Some(_) => Ok(()),
        }
    }

    /// Copy with public keys reduced to their last four characters
    #[must_use]
    pub fn redacted(&self) -> Self {
        Self {
            certification_public_key: self.certification_public_key.as_deref().map(redact_key),
            production_public_key: self.production_public_key.as_deref().map(redact_key),
            ..self.clone()
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn redact_key(key: &str) -> String {
    let count = key.chars().count();
    if count <= 4 {
        "*".repeat(count)
    } else {
        let tail: String = key.chars().skip(count - 4).collect();
        format!("****{tail}")
    }
}
