use anyhow::{Result, anyhow};
use isolang::Language;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Language utilities for ISO language code handling
///
/// Input records declare their language with whatever code the upstream
/// producer used: ISO 639-1 (2-letter), ISO 639-2/T or the bibliographic
/// 639-2/B variant, in any case. The normalizer needs to answer one question
/// reliably - "is this already the canonical language?" - and the service
/// clients need the 2-letter form their APIs accept.
/// ISO 639-2/B codes that differ from the 639-2/T code isolang knows
static PART2B_TO_PART2T: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("alb", "sqi"), // Albanian
        ("arm", "hye"), // Armenian
        ("baq", "eus"), // Basque
        ("bur", "mya"), // Burmese
        ("chi", "zho"), // Chinese
        ("cze", "ces"), // Czech
        ("dut", "nld"), // Dutch
        ("fre", "fra"), // French
        ("geo", "kat"), // Georgian
        ("ger", "deu"), // German
        ("gre", "ell"), // Greek
        ("ice", "isl"), // Icelandic
        ("mac", "mkd"), // Macedonian
        ("may", "msa"), // Malay
        ("per", "fas"), // Persian
        ("rum", "ron"), // Romanian
        ("slo", "slk"), // Slovak
        ("wel", "cym"), // Welsh
    ])
});

/// Resolve a declared language code to an isolang Language
fn resolve(code: &str) -> Option<Language> {
    let code = code.trim().to_lowercase();
    match code.len() {
        2 => Language::from_639_1(&code),
        3 => {
            let part2t = PART2B_TO_PART2T.get(code.as_str()).copied().unwrap_or(&code);
            Language::from_639_3(part2t)
        }
        _ => None,
    }
}

/// Validate that a code is a known ISO 639-1 or ISO 639-2 language code
pub fn validate_language_code(code: &str) -> Result<()> {
    resolve(code)
        .map(|_| ())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Normalize a language code to the ISO 639-1 (2-letter) form service APIs
/// expect, falling back to ISO 639-2/T when no 2-letter code exists
pub fn normalize_for_api(code: &str) -> Result<String> {
    let lang = resolve(code).ok_or_else(|| anyhow!("Invalid language code: {}", code))?;
    match lang.to_639_1() {
        Some(part1) => Ok(part1.to_string()),
        None => Ok(lang.to_639_3().to_string()),
    }
}

/// Check if two language codes refer to the same language.
///
/// Unknown codes never match anything, including themselves - the caller
/// decides what to do with a record whose declared language is garbage.
pub fn codes_match(code1: &str, code2: &str) -> bool {
    match (resolve(code1), resolve(code2)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Get the English language name for a code, for diagnostics
pub fn language_name(code: &str) -> Result<String> {
    let lang = resolve(code).ok_or_else(|| anyhow!("Invalid language code: {}", code))?;
    Ok(lang.to_name().to_string())
}
