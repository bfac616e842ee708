//! Demonstration phrases shown when the translation service is unreachable.

use super::interface::TranslationResult;

pub const UNAVAILABLE_MESSAGE: &str = "Translation not available for this language pair.";

static PHRASES: [(&str, &str); 8] = [
    ("en-asl", "👋 Hello! How are you today?"),
    ("en-bsl", "👋 Hello! How are you today? (BSL)"),
    ("de-asl", "👋 Hallo! Wie geht es dir heute?"),
    ("fr-asl", "👋 Bonjour! Comment allez-vous aujourd'hui?"),
    ("asl-en", "Hello! How are you today?"),
    ("bsl-en", "Hello! How are you today? (BSL)"),
    ("dgs-de", "Hallo! Wie geht es dir heute?"),
    ("lsf-fr", "Bonjour! Comment allez-vous aujourd'hui?"),
];

/// Keys present in the table, in declaration order.
pub fn keys() -> impl Iterator<Item = &'static str> {
    PHRASES.iter().map(|(key, _)| *key)
}

pub fn phrase(key: &str) -> Option<&'static str> {
    PHRASES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, phrase)| *phrase)
}

/// Fallback result for a language pair; always tagged as fallback.
pub fn fallback_result(source_language: &str, target_language: &str) -> TranslationResult {
    let key = format!("{}-{}", source_language, target_language);
    TranslationResult::fallback(phrase(&key).unwrap_or(UNAVAILABLE_MESSAGE))
}
