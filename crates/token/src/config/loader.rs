//! Configuration file loading

use super::schema::{Mode, TokenConfig};
use crate::error::{TokenError, TokenResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable selecting the mode
pub const ENV_MODE: &str = "DATACAP_MODE";
/// Environment variable holding the public key for the active mode
pub const ENV_PUBLIC_KEY: &str = "DATACAP_PUBLIC_KEY";
/// Environment variable overriding the endpoint
pub const ENV_ENDPOINT: &str = "DATACAP_ENDPOINT";

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed settings
    pub settings: TokenConfig,
    /// File the settings came from, if any
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path (or the standard locations),
    /// then apply environment overrides
    pub fn load(path: Option<&Path>) -> TokenResult<Self> {
        let mut config = Self::load_file(path)?;
        apply_env_overrides(&mut config.settings, |name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Load from file only, without environment overrides
    pub fn load_file(path: Option<&Path>) -> TokenResult<Self> {
        let config_path = path.map(Path::to_path_buf).or_else(find_config_file);

        let settings = if let Some(ref p) = config_path {
            debug!(path = %p.display(), "Loading tokenization config");
            load_config_file(p)?
        } else {
            debug!("No config file found, using defaults");
            TokenConfig::default()
        };

        Ok(Self {
            settings,
            path: config_path,
        })
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> TokenResult<TokenConfig> {
        toml::from_str(content)
            .map_err(|e| TokenError::config(format!("Failed to parse config: {e}")))
    }
}

/// Apply `DATACAP_*` overrides read through `lookup`
pub fn apply_env_overrides<F>(settings: &mut TokenConfig, lookup: F) -> TokenResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(name) = lookup(ENV_MODE) {
        settings.mode = Mode::from_name(&name)
            .ok_or_else(|| TokenError::config(format!("{ENV_MODE}: unknown mode '{name}'")))?;
    }

    if let Some(key) = lookup(ENV_PUBLIC_KEY) {
        settings.set_public_key(key);
    }

    if let Some(endpoint) = lookup(ENV_ENDPOINT) {
        settings.endpoint = Some(endpoint);
    }

    Ok(())
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = [
        ".datacap-token.toml",
        "datacap-token.toml",
        ".config/datacap-token.toml",
    ];

    for candidate in candidates {
        let path = Path::new(candidate);
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    dirs::config_dir()
        .map(|dir| dir.join("datacap").join("token.toml"))
        .filter(|path| path.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> TokenResult<TokenConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        TokenError::config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;

    toml::from_str(&content).map_err(|e| {
        TokenError::config(format!("Failed to parse config file {}: {}", path.display(), e))
    })
}
