//! Language utilities for translation service language codes
//!
//! Target codes follow the service convention: an ISO 639-1 base code,
//! optionally followed by a regional or script variant (`EN-US`, `PT-BR`,
//! `ZH-HANS`). Codes are case-insensitive.

use anyhow::{Result, anyhow};
use isolang::Language;

/// Split a code into its base subtag and optional variant, both upper-cased
fn split_code(code: &str) -> (String, Option<String>) {
    let normalized = code.trim().to_uppercase();
    match normalized.split_once('-') {
        Some((base, variant)) => (base.to_string(), Some(variant.to_string())),
        None => (normalized, None),
    }
}

/// Validate a language code and return it in canonical upper-case form
pub fn validate_language_code(code: &str) -> Result<String> {
    let (base, variant) = split_code(code);

    if base.len() != 2 || Language::from_639_1(&base.to_lowercase()).is_none() {
        return Err(anyhow!("Invalid language code: {}", code));
    }

    match variant {
        Some(variant) if variant.is_empty() || !variant.chars().all(|c| c.is_ascii_alphanumeric()) => {
            Err(anyhow!("Invalid language variant in code: {}", code))
        }
        Some(variant) => Ok(format!("{}-{}", base, variant)),
        None => Ok(base),
    }
}

/// Check if two language codes name the same base language
///
/// `EN-US` and `en` match; `PT-BR` and `PT-PT` match as well.
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    let (base1, _) = split_code(code1);
    let (base2, _) = split_code(code2);
    !base1.is_empty() && base1 == base2
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let canonical = validate_language_code(code)?;
    let (base, _) = split_code(&canonical);
    let lang = Language::from_639_1(&base.to_lowercase())
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;

    Ok(lang.to_name().to_string())
}

/// File stem used for the translated document of a target language
pub fn output_file_stem(code: &str) -> String {
    code.trim().to_lowercase()
}
