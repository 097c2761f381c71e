//! JSON output shapes and shared printing helpers

use datacap_card::{BatchSummary, CardBrand, CardCheck};
use serde::Serialize;

/// True when the global `--format` asks for JSON
pub fn is_json(format: &str) -> bool {
    format == "json"
}

/// Print `value` as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One validated number
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonValidation {
    pub masked: String,
    pub brand: CardBrand,
    pub valid: bool,
}

/// Brand details for `brand`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonBrand {
    pub brand: CardBrand,
    pub name: &'static str,
    pub label: &'static str,
    pub max_digits: usize,
    pub cvv_length: usize,
}

impl From<CardBrand> for JsonBrand {
    fn from(brand: CardBrand) -> Self {
        Self {
            brand,
            name: brand.display_name(),
            label: brand.short_label(),
            max_digits: brand.max_digits(),
            cvv_length: brand.cvv_length(),
        }
    }
}

/// Batch check report
#[derive(Debug, Serialize)]
pub struct JsonCheckReport<'a> {
    pub results: &'a [CardCheck],
    pub summary: &'a BatchSummary,
}
