//! WASM bindings for the card crate.
//!
//! These let a web or hybrid host run the same checks as native callers.

use crate::{check_numbers, detect_brand, format_input, mask_number, validate, validate_cvv};
use wasm_bindgen::prelude::*;

/// Validate a card number (length, digits, Luhn).
#[wasm_bindgen(js_name = validateCardNumber)]
pub fn validate_card_number(raw: &str) -> bool {
    validate(raw)
}

/// Detect the brand and return its display name.
#[wasm_bindgen(js_name = detectBrand)]
pub fn detect_brand_name(raw: &str) -> String {
    detect_brand(raw).display_name().to_string()
}

/// Masked display form.
#[wasm_bindgen(js_name = maskNumber)]
pub fn mask(raw: &str) -> String {
    mask_number(raw)
}

/// Group partial input for the card number field.
#[wasm_bindgen(js_name = formatInput)]
pub fn format(raw: &str) -> String {
    format_input(raw)
}

/// Validate a CVV against the brand of `card_number`.
#[wasm_bindgen(js_name = validateCvv)]
pub fn cvv(card_number: &str, cvv: &str) -> bool {
    validate_cvv(cvv, detect_brand(card_number))
}

/// Check a JSON array of card numbers.
///
/// # Returns
/// JSON string of `CardCheck` results
#[wasm_bindgen(js_name = checkNumbers)]
pub fn check_numbers_json(numbers_json: &str) -> Result<String, JsValue> {
    let numbers: Vec<String> = serde_json::from_str(numbers_json)
        .map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))?;

    serde_json::to_string(&check_numbers(&numbers))
        .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
}
