//! Supported languages
//!
//! The set of languages is fixed at compile time. `auto` is a sentinel that
//! asks the model to detect the source language; it is a valid source
//! selection and never a valid target.

use crate::error::{TranslateError, TranslateResult};
use serde::Serialize;

/// A selectable language: ISO 639-1 code plus the name shown to users and
/// written into prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

impl Language {
    /// True for the detection sentinel
    pub fn is_auto(&self) -> bool {
        self.code == AUTO.code
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// Detection sentinel
pub const AUTO: Language = Language {
    code: "auto",
    name: "Detect Language",
};

/// Selection order as presented to users
pub const LANGUAGES: &[Language] = &[
    AUTO,
    Language { code: "en", name: "English" },
    Language { code: "es", name: "Spanish" },
    Language { code: "fr", name: "French" },
    Language { code: "de", name: "German" },
    Language { code: "it", name: "Italian" },
    Language { code: "pt", name: "Portuguese" },
    Language { code: "ru", name: "Russian" },
    Language { code: "zh", name: "Chinese" },
    Language { code: "ja", name: "Japanese" },
    Language { code: "ko", name: "Korean" },
    Language { code: "ar", name: "Arabic" },
];

/// Source selected when a session starts
pub const DEFAULT_SOURCE: Language = AUTO;

/// Target selected when a session starts, and the fallback whenever a swap
/// would otherwise put `auto` on the target side
pub const DEFAULT_TARGET: Language = Language {
    code: "en",
    name: "English",
};

/// Normalize a language code by stripping region or script subtags
///
/// - `en-US` → `en`
/// - `zh_Hans` → `zh`
/// - `FR` → `fr`
pub fn normalize_code(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Look up a language by code, tolerating case and region subtags
pub fn find(code: &str) -> Option<Language> {
    let normalized = normalize_code(code);
    LANGUAGES.iter().copied().find(|l| l.code == normalized)
}

/// Look up any language, the sentinel included
pub fn source_language(code: &str) -> TranslateResult<Language> {
    find(code).ok_or_else(|| {
        TranslateError::Validation(format!("Unsupported source language: {}", code))
    })
}

/// Look up a concrete language; `auto` is refused
pub fn target_language(code: &str) -> TranslateResult<Language> {
    let language = find(code).ok_or_else(|| {
        TranslateError::Validation(format!("Unsupported target language: {}", code))
    })?;

    if language.is_auto() {
        return Err(TranslateError::Validation(
            "Target language cannot be auto-detected".to_string(),
        ));
    }

    Ok(language)
}

/// Languages offered on the source side
pub fn source_languages() -> &'static [Language] {
    LANGUAGES
}

/// Languages offered on the target side (everything but the sentinel)
pub fn target_languages() -> impl Iterator<Item = Language> {
    LANGUAGES.iter().copied().filter(|l| !l.is_auto())
}
