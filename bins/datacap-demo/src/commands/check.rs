//! Check command - batch validation with a per-brand summary

use crate::output::{is_json, print_json, JsonCheckReport};
use anyhow::{bail, Context, Result};
use datacap_card::{check_numbers, summarize};
use owo_colors::OwoColorize;
use std::path::Path;
use tracing::debug;

/// Check numbers from the arguments and/or a file; succeeds if none are invalid
pub fn run(numbers: &[String], file: Option<&Path>, format: &str) -> Result<bool> {
    let mut inputs: Vec<String> = numbers.to_vec();
    if let Some(path) = file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        inputs.extend(parse_lines(&content));
    }

    if inputs.is_empty() {
        bail!("No card numbers given; pass them as arguments or with --file");
    }

    debug!(count = inputs.len(), "Checking card numbers");
    let results = check_numbers(&inputs);
    let summary = summarize(&results);

    if is_json(format) {
        print_json(&JsonCheckReport {
            results: &results,
            summary: &summary,
        })?;
        return Ok(summary.invalid == 0);
    }

    for check in &results {
        let status = if check.valid {
            "✓".green().to_string()
        } else {
            "✗".red().to_string()
        };
        println!(
            "{:>4}  {} {:<22} {}",
            check.index + 1,
            status,
            check.masked,
            check.brand.display_name().dimmed()
        );
    }

    println!();
    println!(
        "  Total: {}  Valid: {}  Invalid: {}",
        summary.total,
        summary.valid.to_string().green(),
        if summary.invalid > 0 {
            summary.invalid.to_string().red().to_string()
        } else {
            summary.invalid.to_string()
        }
    );
    for (brand, count) in &summary.by_brand {
        println!("    {:<18} {}", brand.display_name(), count);
    }

    Ok(summary.invalid == 0)
}

/// One number per line; blank lines and `#` comments are skipped
fn parse_lines(content: &str) -> impl Iterator<Item = String> + '_ {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
}
