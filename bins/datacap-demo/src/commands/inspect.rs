//! Brand, mask and format commands

use crate::output::{is_json, print_json, JsonBrand};
use anyhow::Result;
use datacap_card::{detect_brand, format_grouped, format_input, mask_number, max_digits, CardBrand};
use owo_colors::OwoColorize;
use serde_json::json;

/// Print the detected brand
pub fn brand(number: &str, format: &str) -> Result<bool> {
    let brand = detect_brand(number);

    if is_json(format) {
        print_json(&JsonBrand::from(brand))?;
        return Ok(true);
    }

    println!("{}", brand.display_name().bold());
    println!("  Max digits:  {}", brand.max_digits());
    println!("  CVV length:  {}", brand.cvv_length());
    Ok(true)
}

/// Print the masked number
pub fn mask(number: &str, format: &str) -> Result<bool> {
    let masked = mask_number(number);

    if is_json(format) {
        print_json(&json!({ "masked": masked }))?;
    } else {
        println!("{masked}");
    }
    Ok(true)
}

/// Print the number grouped for its brand, or for `brand` when given
pub fn format(number: &str, brand: Option<CardBrand>, format: &str) -> Result<bool> {
    let (formatted, brand, max) = match brand {
        Some(brand) => (format_grouped(number, brand), brand, brand.max_digits()),
        None => (format_input(number), detect_brand(number), max_digits(number)),
    };

    if is_json(format) {
        print_json(&json!({
            "formatted": formatted,
            "brand": brand,
            "maxDigits": max,
        }))?;
    } else {
        println!("{formatted}");
    }
    Ok(true)
}
