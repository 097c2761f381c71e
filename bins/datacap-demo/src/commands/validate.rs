//! Validate command - Luhn and length checks

use crate::output::{is_json, print_json, JsonValidation};
use anyhow::Result;
use datacap_card::{detect_brand, mask_number, validate};
use owo_colors::OwoColorize;

/// Validate each number; succeeds only if all are valid
pub fn run(numbers: &[String], format: &str) -> Result<bool> {
    let results: Vec<JsonValidation> = numbers
        .iter()
        .map(|raw| JsonValidation {
            masked: mask_number(raw),
            brand: detect_brand(raw),
            valid: validate(raw),
        })
        .collect();

    let all_valid = results.iter().all(|r| r.valid);

    if is_json(format) {
        print_json(&results)?;
        return Ok(all_valid);
    }

    for result in &results {
        if result.valid {
            println!(
                "{} {}  {}",
                "✓".green(),
                result.masked,
                result.brand.display_name().dimmed()
            );
        } else {
            println!("{} {}  {}", "✗".red(), result.masked, "invalid".red());
        }
    }

    Ok(all_valid)
}
