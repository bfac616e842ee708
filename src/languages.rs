//! Static catalog of supported spoken and sign languages.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageKind {
    Spoken,
    Sign,
}

impl LanguageKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "spoken" => Some(LanguageKind::Spoken),
            "sign" => Some(LanguageKind::Sign),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageDescriptor {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
    pub flag: &'static str,
    #[serde(rename = "type")]
    pub kind: LanguageKind,
}

const fn spoken(
    code: &'static str,
    name: &'static str,
    native_name: &'static str,
    flag: &'static str,
) -> LanguageDescriptor {
    LanguageDescriptor {
        code,
        name,
        native_name,
        flag,
        kind: LanguageKind::Spoken,
    }
}

const fn sign(code: &'static str, name: &'static str, native_name: &'static str) -> LanguageDescriptor {
    LanguageDescriptor {
        code,
        name,
        native_name,
        flag: "🤟",
        kind: LanguageKind::Sign,
    }
}

static CATALOG: [LanguageDescriptor; 16] = [
    spoken("en", "English", "English", "🇺🇸"),
    spoken("de", "German", "Deutsch", "🇩🇪"),
    spoken("fr", "French", "Français", "🇫🇷"),
    spoken("es", "Spanish", "Español", "🇪🇸"),
    spoken("it", "Italian", "Italiano", "🇮🇹"),
    spoken("pt", "Portuguese", "Português", "🇵🇹"),
    spoken("ru", "Russian", "Русский", "🇷🇺"),
    spoken("zh", "Chinese", "中文", "🇨🇳"),
    spoken("ja", "Japanese", "日本語", "🇯🇵"),
    spoken("ko", "Korean", "한국어", "🇰🇷"),
    sign("asl", "American Sign Language", "American Sign Language"),
    sign("bsl", "British Sign Language", "British Sign Language"),
    sign("isl", "International Sign Language", "International Sign Language"),
    sign("auslan", "Australian Sign Language", "Australian Sign Language"),
    sign("lsf", "French Sign Language", "Langue des Signes Française"),
    sign("dgs", "German Sign Language", "Deutsche Gebärdensprache"),
];

/// Every catalog entry in declaration order.
pub fn all() -> &'static [LanguageDescriptor] {
    &CATALOG
}

/// Exact, case-sensitive lookup by code.
pub fn lookup(code: &str) -> Option<&'static LanguageDescriptor> {
    CATALOG.iter().find(|lang| lang.code == code)
}

pub fn is_supported(code: &str) -> bool {
    lookup(code).is_some()
}

pub fn list_by_kind(kind: LanguageKind) -> Vec<&'static LanguageDescriptor> {
    CATALOG.iter().filter(|lang| lang.kind == kind).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguagePair {
    pub source: &'static str,
    pub target: &'static str,
    pub name: &'static str,
}

static DEFAULT_PAIRS: [LanguagePair; 8] = [
    LanguagePair { source: "en", target: "asl", name: "English → ASL" },
    LanguagePair { source: "asl", target: "en", name: "ASL → English" },
    LanguagePair { source: "en", target: "bsl", name: "English → BSL" },
    LanguagePair { source: "bsl", target: "en", name: "BSL → English" },
    LanguagePair { source: "de", target: "dgs", name: "German → DGS" },
    LanguagePair { source: "dgs", target: "de", name: "DGS → German" },
    LanguagePair { source: "fr", target: "lsf", name: "French → LSF" },
    LanguagePair { source: "lsf", target: "fr", name: "LSF → French" },
];

/// Language pairs offered for quick selection.
pub fn default_pairs() -> &'static [LanguagePair] {
    &DEFAULT_PAIRS
}

/// Language codes reported by the remote service.
///
/// Note this carries bare codes, not descriptors; [`SupportedLanguages::builtin`]
/// is the shorter list used when the service cannot be reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedLanguages {
    #[serde(default)]
    pub spoken: Vec<String>,
    #[serde(default)]
    pub sign: Vec<String>,
}

impl SupportedLanguages {
    pub fn builtin() -> Self {
        Self {
            spoken: codes(&["en", "de", "fr", "es", "it", "pt", "ru", "zh", "ja", "ko"]),
            sign: codes(&["asl", "bsl", "isl", "auslan", "lsf", "dgs"]),
        }
    }
}

fn codes(list: &[&str]) -> Vec<String> {
    list.iter().map(|c| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_are_unique() {
        let codes: HashSet<_> = all().iter().map(|l| l.code).collect();
        assert_eq!(codes.len(), all().len());
    }

    #[test]
    fn list_by_kind_keeps_declaration_order() {
        let sign: Vec<_> = list_by_kind(LanguageKind::Sign).iter().map(|l| l.code).collect();
        assert_eq!(sign, vec!["asl", "bsl", "isl", "auslan", "lsf", "dgs"]);

        let spoken = list_by_kind(LanguageKind::Spoken);
        assert_eq!(spoken.len(), 10);
        assert_eq!(spoken[0].code, "en");
        assert_eq!(spoken[9].code, "ko");
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(lookup("dgs").unwrap().native_name, "Deutsche Gebärdensprache");
        assert!(lookup("DGS").is_none());
        assert!(lookup("xx").is_none());
    }

    #[test]
    fn default_pairs_use_catalog_codes() {
        for pair in default_pairs() {
            assert!(is_supported(pair.source), "{}", pair.source);
            assert!(is_supported(pair.target), "{}", pair.target);
        }
    }

    #[test]
    fn builtin_supported_languages_are_codes() {
        let builtin = SupportedLanguages::builtin();
        assert_eq!(builtin.spoken.len(), 10);
        assert_eq!(builtin.sign, vec!["asl", "bsl", "isl", "auslan", "lsf", "dgs"]);
    }

    #[test]
    fn descriptor_serializes_for_ui() {
        let value = serde_json::to_value(lookup("asl").unwrap()).unwrap();
        assert_eq!(value["nativeName"], "American Sign Language");
        assert_eq!(value["type"], "sign");
    }
}
