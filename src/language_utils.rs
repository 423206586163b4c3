//! Language code handling for provider requests
//!
//! The translation endpoint expects ISO 639-1 codes ("en", "ja"), while
//! operators may write ISO 639-2 codes in the config file ("eng", "jpn",
//! or the bibliographic "fre"/"ger" forms). Everything is normalized here
//! before it reaches a provider.

use anyhow::{Result, anyhow};
use isolang::Language;

/// ISO 639-2/B codes that differ from their ISO 639-2/T counterpart
const BIBLIOGRAPHIC_CODES: &[(&str, &str)] = &[
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Resolve a user-supplied language code to an `isolang::Language`
fn resolve(code: &str) -> Option<Language> {
    let normalized = code.trim().to_lowercase();

    match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => {
            let terminology = BIBLIOGRAPHIC_CODES
                .iter()
                .find(|(bibliographic, _)| *bibliographic == normalized)
                .map(|(_, terminology)| *terminology)
                .unwrap_or(normalized.as_str());
            Language::from_639_3(terminology)
        }
        _ => None,
    }
}

/// Validate that a code names a known ISO 639-1 or ISO 639-2 language
pub fn validate_language_code(code: &str) -> Result<()> {
    resolve(code)
        .map(|_| ())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Code sent to the translation provider: ISO 639-1 when one exists,
/// ISO 639-3 otherwise
pub fn provider_language_code(code: &str) -> Result<String> {
    let language = resolve(code)
        .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))?;

    Ok(language
        .to_639_1()
        .map(str::to_string)
        .unwrap_or_else(|| language.to_639_3().to_string()))
}

/// English display name for a code, used in the run banner
pub fn get_language_name(code: &str) -> Result<String> {
    let language = resolve(code)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;

    Ok(language.to_name().to_string())
}
