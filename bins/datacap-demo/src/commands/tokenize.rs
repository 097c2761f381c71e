//! Tokenize command - run the token request flow

use crate::output::{is_json, print_json};
use anyhow::{Context, Result};
use chrono::Utc;
use datacap_token::prelude::*;
use datacap_token::TokenRequest;
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::Path;

/// Card fields as given on the command line
pub struct CardArgs<'a> {
    pub number: &'a str,
    pub expiry: &'a str,
    pub cvv: &'a str,
}

/// Tokenize in demo mode, or validate and prepare the request for a remote mode
pub fn run(
    args: CardArgs<'_>,
    mode: Option<&str>,
    config_path: Option<&Path>,
    format: &str,
) -> Result<bool> {
    let mut settings = Config::load(config_path)?.settings;
    if let Some(name) = mode {
        settings.mode =
            Mode::from_name(name).with_context(|| format!("Unknown mode '{name}'"))?;
    }

    let outcome = CardData::from_form(args.number, args.expiry, args.cvv).and_then(|card| {
        if settings.mode.is_remote() {
            settings.validate()?;
            check_card(&card, Utc::now().date_naive())?;
            let request = TokenRequest::new(&settings, &card)?;
            Ok(Outcome::Prepared { card, request })
        } else {
            let token = TokenService::new(DemoTokenizer).request_token(&card)?;
            Ok(Outcome::Issued(token))
        }
    });

    match outcome {
        Ok(Outcome::Issued(token)) => {
            print_token(&token, format)?;
            Ok(true)
        }
        Ok(Outcome::Prepared { card, request }) => {
            print_prepared(&settings, &card, &request, format)?;
            Ok(true)
        }
        Err(e) if e.is_input_error() || matches!(e, TokenError::TokenizationFailed(_)) => {
            print_rejection(&e, format)?;
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

enum Outcome {
    Issued(Token),
    Prepared { card: CardData, request: TokenRequest },
}

fn print_token(token: &Token, format: &str) -> Result<()> {
    if is_json(format) {
        return print_json(token);
    }

    println!("{} {}", "✓".green(), "Token issued".bold());
    println!("  Token:     {}", token.token.cyan());
    println!("  Card:      {} ({})", token.masked_card_number, token.card_type);
    println!("  Expires:   {}", token.expiration_date);
    println!(
        "  Response:  {} {}",
        token.response_code,
        token.response_message.dimmed()
    );
    Ok(())
}

fn print_prepared(
    settings: &TokenConfig,
    card: &CardData,
    request: &TokenRequest,
    format: &str,
) -> Result<()> {
    let redacted = settings.redacted();
    let public_key = redacted.public_key().unwrap_or_default();
    let endpoint = settings.endpoint().unwrap_or_default();

    let headers: Vec<(String, String)> = request
        .headers()
        .into_iter()
        .map(|(name, value)| {
            if name == "Authorization" {
                (name, public_key.to_string())
            } else {
                (name, value)
            }
        })
        .collect();

    let body = json!({
        "publicKey": public_key,
        "cardNumber": card.masked_number(),
        "expirationMonth": request.expiration_month,
        "expirationYear": request.expiration_year,
        "cvv": "***",
        "isCertification": request.is_certification,
    });

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
        "{} Request prepared for {} mode {}",
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

fn print_rejection(error: &TokenError, format: &str) -> Result<()> {
    if is_json(format) {
        return print_json(&json!({
            "error": error.to_string(),
            "code": error.code() as u32,
        }));
    }

    println!("{} {}", "✗".red(), error.to_string().red());
    Ok(())
}
