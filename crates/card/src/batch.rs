//! Batch card checks with optional parallelism.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::brand::detect_brand_cleaned;
use crate::mask::mask_number;
use crate::number::clean_number;
use crate::{luhn, CardBrand};

/// Result of checking a single card number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardCheck {
    /// Position of the number in the input
    pub index: usize,
    /// Luhn and length check outcome
    pub valid: bool,
    /// Detected brand
    pub brand: CardBrand,
    /// Masked display form
    pub masked: String,
}

/// Aggregate counts over a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Numbers checked
    pub total: usize,
    /// Numbers that passed validation
    pub valid: usize,
    /// Numbers that failed validation
    pub invalid: usize,
    /// Valid numbers per brand
    pub by_brand: BTreeMap<CardBrand, usize>,
}

/// Checks one raw number. Validity, brand and mask come from one cleaned string.
pub fn check_number(index: usize, raw: &str) -> CardCheck {
    let cleaned = clean_number(raw);
    CardCheck {
        index,
        valid: luhn::is_valid_cleaned(&cleaned),
        brand: detect_brand_cleaned(&cleaned),
        masked: mask_number(&cleaned),
    }
}

/// Checks many numbers; output order matches input order.
///
/// # Example
/// ```
/// use datacap_card::{check_numbers, CardBrand};
///
/// let results = check_numbers(&["4111111111111111", "4111111111111112"]);
/// assert!(results[0].valid);
/// assert!(!results[1].valid);
/// assert_eq!(results[1].brand, CardBrand::Visa);
/// ```
pub fn check_numbers<S: AsRef<str> + Sync>(numbers: &[S]) -> Vec<CardCheck> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        numbers
            .par_iter()
            .enumerate()
            .map(|(index, raw)| check_number(index, raw.as_ref()))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        numbers
            .iter()
            .enumerate()
            .map(|(index, raw)| check_number(index, raw.as_ref()))
            .collect()
    }
}

/// Summarizes a batch of checks.
pub fn summarize(checks: &[CardCheck]) -> BatchSummary {
    checks.iter().fold(BatchSummary::default(), |mut summary, check| {
        summary.total += 1;
        if check.valid {
            summary.valid += 1;
            *summary.by_brand.entry(check.brand).or_insert(0) += 1;
        } else {
            summary.invalid += 1;
        }
        summary
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<&'static str> {
        vec![
            "4111 1111 1111 1111",
            "378282246310005",
            "4111111111111112",
            "123",
            "36700102000000",
        ]
    }

    #[test]
    fn test_order_is_preserved() {
        let results = check_numbers(&sample());
        let indexes: Vec<usize> = results.iter().map(|r| r.index).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_results() {
        let results = check_numbers(&sample());
        assert!(results[0].valid);
        assert_eq!(results[0].masked, "**** **** **** 1111");
        assert_eq!(results[1].brand, CardBrand::AmericanExpress);
        assert!(!results[2].valid);
        assert!(!results[3].valid);
        assert_eq!(results[3].masked, "123");
        assert_eq!(results[4].masked, "**** ****** 0000");
    }

    #[test]
    fn test_summary() {
        let summary = summarize(&check_numbers(&sample()));
        assert_eq!(summary.total, 5);
        assert_eq!(summary.valid, 3);
        assert_eq!(summary.invalid, 2);
        assert_eq!(summary.by_brand.get(&CardBrand::Visa), Some(&1));
        assert_eq!(summary.by_brand.get(&CardBrand::DinersClub), Some(&1));
    }

    #[test]
    fn test_empty_batch() {
        let results = check_numbers::<&str>(&[]);
        assert!(results.is_empty());
        assert_eq!(summarize(&results), BatchSummary::default());
    }

    #[test]
    fn test_serializes_to_json() {
        let json = serde_json::to_value(check_number(0, "4111111111111111")).unwrap();
        assert_eq!(json["brand"], "Visa");
        assert_eq!(json["valid"], true);
    }
}
