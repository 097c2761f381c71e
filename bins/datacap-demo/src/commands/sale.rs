//! Sale command - charge a saved token

use crate::output::{is_json, print_json};
use anyhow::{Context, Result};
use datacap_token::prelude::*;
use datacap_token::SaleRequest;
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::Path;

/// Run a demo sale, or validate and prepare the request for a remote mode
pub fn run(
    token: &str,
    amount: &str,
    mode: Option<&str>,
    config_path: Option<&Path>,
    format: &str,
) -> Result<bool> {
    let mut settings = Config::load(config_path)?.settings;
    if let Some(name) = mode {
        settings.mode =
            Mode::from_name(name).with_context(|| format!("Unknown mode '{name}'"))?;
    }

    let outcome = Amount::parse(amount).and_then(|amount| {
        if settings.mode.is_remote() {
            settings.validate()?;
            if token.trim().is_empty() {
                return Err(TokenError::MissingToken);
            }
            let request = SaleRequest::new(&settings, token.trim(), amount)?;
            Ok(Outcome::Prepared(request))
        } else {
            let transaction = SaleService::new(DemoProcessor).process_sale(token, amount)?;
            Ok(Outcome::Processed(transaction))
        }
    });

    match outcome {
        Ok(Outcome::Processed(transaction)) => {
            print_transaction(&transaction, format)?;
            Ok(transaction.is_approved())
        }
        Ok(Outcome::Prepared(request)) => {
            print_prepared(&settings, &request, format)?;
            Ok(true)
        }
        Err(e) if e.is_input_error() => {
            if is_json(format) {
                print_json(&json!({ "error": e.to_string(), "code": e.code() as u32 }))?;
            } else {
                println!("{} {}", "✗".red(), e.to_string().red());
            }
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

enum Outcome {
    Processed(Transaction),
    Prepared(SaleRequest),
}

fn print_transaction(transaction: &Transaction, format: &str) -> Result<()> {
    if is_json(format) {
        return print_json(transaction);
    }

    if transaction.is_approved() {
        println!("{} {}", "✓".green(), "Sale approved".bold());
    } else {
        println!("{} {}", "✗".red(), "Sale declined".bold());
    }
    println!("  Transaction: {}", transaction.id.cyan());
    println!("  Amount:      {}", transaction.amount);
    println!("  Card:        {} ({})", transaction.masked_card, transaction.card_type);
    println!(
        "  Response:    {} {}",
        transaction.response_code.as_deref().unwrap_or("-"),
        transaction.response_message.as_deref().unwrap_or_default().dimmed()
    );
    Ok(())
}

fn print_prepared(settings: &TokenConfig, request: &SaleRequest, format: &str) -> Result<()> {
    let endpoint = settings.sale_endpoint().unwrap_or_default();

    let headers: Vec<(String, String)> = request
        .headers()
        .into_iter()
        .map(|(name, value)| {
            if name == "Authorization" {
                (name, "Basic ****".to_string())
            } else {
                (name, value)
            }
        })
        .collect();
    let body = serde_json::to_value(request)?;

    if is_json(format) {
        return print_json(&json!({
            "mode": settings.mode,
            "endpoint": endpoint,
            "sent": false,
            "headers": headers,
            "body": body,
        }));
    }

    println!(
        "{} Sale prepared for {} mode {}",
        "→".blue(),
        settings.mode.to_string().bold(),
        "(not sent: no transport configured)".dimmed()
    );
    println!("  POST {endpoint}");
    for (name, value) in &headers {
        println!("  {name}: {value}");
    }
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
