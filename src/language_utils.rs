use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for subtitle language prefixes
///
/// YouTube accepts ISO 639-1 codes ("en") as well as locale tags
/// ("pt-BR", "zh-Hans"). Only the primary subtag is checked against ISO 639.
/// Language code type
#[derive(Debug, PartialEq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-3 (3-letter) code
    Part3,
    /// ISO code followed by a region or script subtag
    Locale,
}

/// Split a language tag into its primary subtag and the optional remainder
fn split_tag(code: &str) -> (&str, Option<&str>) {
    match code.split_once(['-', '_']) {
        Some((primary, rest)) => (primary, Some(rest)),
        None => (code, None),
    }
}

fn lookup(primary: &str) -> Option<Language> {
    let primary = primary.to_lowercase();
    match primary.len() {
        2 => Language::from_639_1(&primary),
        3 => Language::from_639_3(&primary),
        _ => None,
    }
}

/// Validate if a language tag starts with a known ISO 639-1 or ISO 639-3 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let trimmed = code.trim();
    let (primary, rest) = split_tag(trimmed);

    if lookup(primary).is_none() {
        return Err(anyhow!("Invalid language code: {}", code));
    }

    match (rest, primary.len()) {
        (Some(region), _) if !region.is_empty() && region.chars().all(|c| c.is_ascii_alphanumeric()) => {
            Ok(LanguageCodeType::Locale)
        }
        (Some(_), _) => Err(anyhow!("Invalid language code: {}", code)),
        (None, 2) => Ok(LanguageCodeType::Part1),
        (None, _) => Ok(LanguageCodeType::Part3),
    }
}

/// Normalize a language tag the way YouTube spells it
///
/// The primary subtag is lowercased and joined to the region or script
/// subtag with a hyphen. The subtag keeps its original case.
pub fn normalize_language_tag(code: &str) -> String {
    let trimmed = code.trim();
    match split_tag(trimmed) {
        (primary, Some(rest)) => format!("{}-{}", primary.to_lowercase(), rest),
        (primary, None) => primary.to_lowercase(),
    }
}

/// Get the language name from a code or locale tag
pub fn get_language_name(code: &str) -> Result<String> {
    let (primary, _) = split_tag(code.trim());
    let lang = lookup(primary)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;

    Ok(lang.to_name().to_string())
}
