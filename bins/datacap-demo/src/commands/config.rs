//! Config command - show the effective tokenization configuration

use crate::output::{is_json, print_json};
use anyhow::Result;
use datacap_token::Config;
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::Path;

/// Print the loaded configuration with public keys redacted
pub fn run(config_path: Option<&Path>, format: &str) -> Result<bool> {
    let config = Config::load(config_path)?;
    let settings = config.settings.redacted();
    let source = config
        .path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    let valid = config.settings.validate();

    if is_json(format) {
        print_json(&json!({
            "source": source,
            "settings": settings,
            "endpoint": settings.endpoint(),
            "saleEndpoint": settings.sale_endpoint(),
            "valid": valid.is_ok(),
            "problem": valid.as_ref().err().map(ToString::to_string),
        }))?;
        return Ok(true);
    }

    println!("{}", "Tokenization configuration".bold());
    println!("  Source:       {}", source.dimmed());
    println!("  Mode:         {}", settings.mode);
    println!(
        "  Endpoint:     {}",
        settings.endpoint().unwrap_or("(none, demo tokens are local)")
    );
    println!(
        "  Sale:         {}",
        settings.sale_endpoint().unwrap_or("(none, demo sales are local)")
    );
    println!(
        "  Cert key:     {}",
        settings.certification_public_key.as_deref().unwrap_or("-")
    );
    println!(
        "  Prod key:     {}",
        settings.production_public_key.as_deref().unwrap_or("-")
    );
    println!("  Timeout:      {}s", settings.timeout_secs);
    match valid {
        Ok(()) => println!("  Status:       {}", "✓ ready".green()),
        Err(e) => println!("  Status:       {} {}", "✗".red(), e),
    }

    Ok(true)
}
