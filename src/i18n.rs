//! Translation lookup and template substitution.
//!
//! Translation files are hand-written YAML, and the same logical key may be
//! written either as a plain string shared by every language or as a map of
//! per-language strings:
//!
//! ```yaml
//! siteName: Chislon Chow              # Literal
//! heroTitle:                          # Localized
//!   en: Find your footing
//!   zh: 找回自己的步伐
//! ```
//!
//! Both shapes are kept as a [`TranslationValue`] and resolved through
//! [`resolve`]. Resolution never fails: a missing entry degrades to the
//! caller's fallback, which is usually `""` and shows up as blank text.
//!
//! ## Catalog files
//!
//! [`Translations::load`] merges, in order (later keys win):
//!
//! ```text
//! translations/general.yaml
//! translations/home.yaml
//! translations/articles.yaml
//! translations/article-categories.yaml
//! ```
//!
//! Category entries are normalized so both languages always resolve:
//! `en` falls back to the key, `zh` falls back to `en`.

use crate::types::Language;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{error, warn};

/// Files merged into the catalog, in override order.
const TRANSLATION_FILES: &[&str] = &["general.yaml", "home.yaml", "articles.yaml"];
const CATEGORY_FILE: &str = "article-categories.yaml";

/// Key whose value gets `{year}` filled in at load time.
const COPYRIGHT_KEY: &str = "footerCopyrightText";

/// A translation entry as written in YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TranslationValue {
    /// Same text in every language.
    Literal(String),
    /// Per-language text; languages may be missing.
    Localized(BTreeMap<Language, String>),
}

impl TranslationValue {
    pub fn localized(en: &str, zh: &str) -> Self {
        TranslationValue::Localized(BTreeMap::from([
            (Language::En, en.to_string()),
            (Language::Zh, zh.to_string()),
        ]))
    }

    /// Convert a raw YAML value. Returns `None` for shapes that are neither
    /// a string nor a mapping; non-string languages inside a mapping are dropped.
    fn from_yaml(value: &serde_yaml::Value) -> Option<Self> {
        match value {
            serde_yaml::Value::String(s) => Some(TranslationValue::Literal(s.clone())),
            serde_yaml::Value::Mapping(map) => {
                let langs = map
                    .iter()
                    .filter_map(|(k, v)| {
                        let lang = Language::parse(k.as_str()?)?;
                        Some((lang, v.as_str()?.to_string()))
                    })
                    .collect();
                Some(TranslationValue::Localized(langs))
            }
            _ => None,
        }
    }

    fn map_text(self, f: impl Fn(&str) -> String) -> Self {
        match self {
            TranslationValue::Literal(s) => TranslationValue::Literal(f(&s)),
            TranslationValue::Localized(map) => TranslationValue::Localized(
                map.into_iter().map(|(lang, s)| (lang, f(&s))).collect(),
            ),
        }
    }
}

/// Resolve the display string for `lang`.
///
/// - `None` → `fallback`
/// - `Localized` with a value for `lang` → that value
/// - `Literal` → the literal, whatever `lang` is
/// - otherwise → `fallback`
pub fn resolve<'a>(entry: Option<&'a TranslationValue>, lang: Language, fallback: &'a str) -> &'a str {
    match entry {
        Some(TranslationValue::Localized(map)) => {
            map.get(&lang).map(String::as_str).unwrap_or(fallback)
        }
        Some(TranslationValue::Literal(s)) => s,
        None => fallback,
    }
}

/// Replace every `{key}` token in `template` with its value.
///
/// Tokens without a replacement are left as-is.
///
/// ```
/// use practice_site::i18n::substitute;
/// let s = substitute("Page {currentPage} of {totalPages}", &[("currentPage", "2"), ("totalPages", "5")]);
/// assert_eq!(s, "Page 2 of 5");
/// ```
pub fn substitute(template: &str, replacements: &[(&str, &str)]) -> String {
    replacements
        .iter()
        .fold(template.to_string(), |acc, (key, value)| {
            acc.replace(&format!("{{{key}}}"), value)
        })
}

/// The merged translation catalog for the whole site.
#[derive(Debug, Clone, Default)]
pub struct Translations {
    entries: BTreeMap<String, TranslationValue>,
}

impl Translations {
    /// Load and merge all translation files under `<root>/translations/`.
    ///
    /// Missing or unparseable files are logged and contribute nothing.
    pub fn load(root: &Path, year: i32) -> Self {
        let dir = root.join("translations");
        let mut translations = Translations::default();

        for file in TRANSLATION_FILES {
            for (key, value) in read_entries(&dir.join(file)) {
                translations.entries.insert(key, value);
            }
        }

        let year = year.to_string();
        if let Some(value) = translations.entries.remove(COPYRIGHT_KEY) {
            let value = value.map_text(|s| substitute(s, &[("year", year.as_str())]));
            translations.entries.insert(COPYRIGHT_KEY.to_string(), value);
        }

        for (key, value) in read_entries(&dir.join(CATEGORY_FILE)) {
            let normalized = normalize_category(&key, value);
            translations.entries.insert(key, normalized);
        }

        translations
    }

    /// Build a catalog from in-memory entries.
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, TranslationValue)>,
        K: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&TranslationValue> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolved text for `key`, or `""`.
    pub fn text(&self, key: &str, lang: Language) -> &str {
        resolve(self.get(key), lang, "")
    }

    /// Resolved text for `key`, or `fallback` when missing.
    pub fn text_or<'a>(&'a self, key: &str, lang: Language, fallback: &'a str) -> &'a str {
        resolve(self.get(key), lang, fallback)
    }

    /// Resolved text for `key` with `{placeholder}` substitution applied.
    pub fn format(&self, key: &str, lang: Language, replacements: &[(&str, &str)]) -> String {
        substitute(self.text(key, lang), replacements)
    }

    pub fn site_name(&self, lang: Language) -> &str {
        self.text("siteName", lang)
    }

    /// Display label for a category key. Falls back to the key itself when
    /// there is no translation or it resolves to an empty string.
    pub fn category_label<'a>(&'a self, key: &'a str, lang: Language) -> &'a str {
        match resolve(self.get(key), lang, key) {
            "" => key,
            label => label,
        }
    }
}

/// Read a flat `key: value` YAML file into translation entries.
fn read_entries(path: &Path) -> Vec<(String, TranslationValue)> {
    if !path.exists() {
        warn!(path = %path.display(), "translation file not found");
        return Vec::new();
    }
    let parsed = fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|s| {
            serde_yaml::from_str::<Option<BTreeMap<String, serde_yaml::Value>>>(&s)
                .map_err(|e| e.to_string())
        });
    let raw = match parsed {
        Ok(raw) => raw.unwrap_or_default(),
        Err(err) => {
            error!(path = %path.display(), %err, "failed to load translation file");
            return Vec::new();
        }
    };

    raw.into_iter()
        .filter_map(|(key, value)| match TranslationValue::from_yaml(&value) {
            Some(v) => Some((key, v)),
            None => {
                warn!(path = %path.display(), key = %key, "skipping translation with unsupported value");
                None
            }
        })
        .collect()
}

/// Category labels always resolve in both languages: `en` defaults to the
/// key, `zh` defaults to the English label.
fn normalize_category(key: &str, value: TranslationValue) -> TranslationValue {
    let non_empty = |s: Option<&String>| s.filter(|s| !s.is_empty()).cloned();
    let (en, zh) = match value {
        TranslationValue::Localized(map) => (
            non_empty(map.get(&Language::En)),
            non_empty(map.get(&Language::Zh)),
        ),
        TranslationValue::Literal(s) => (non_empty(Some(&s)), None),
    };
    let en = en.unwrap_or_else(|| key.to_string());
    let zh = zh.unwrap_or_else(|| en.clone());
    TranslationValue::localized(&en, &zh)
}
