//! Shared types used across the content store, catalog, and generator.
//!
//! Everything here is plain data: loaded once from YAML, then passed by
//! reference to the catalog and the page renderers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A language the site is published in.
///
/// English is served from the site root, Chinese from `/zh/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Zh,
}

impl Language {
    /// All published languages, in output order.
    pub const ALL: [Language; 2] = [Language::En, Language::Zh];

    /// The language code used in YAML keys and URLs.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    /// Value for the `<html lang>` attribute.
    pub fn html_lang(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh-Hant",
        }
    }

    /// Parse a language code (`en`, `zh`, or a region-tagged form like `zh-TW`).
    pub fn parse(value: &str) -> Option<Self> {
        let primary = value
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "en" => Some(Language::En),
            "zh" => Some(Language::Zh),
            _ => None,
        }
    }

    /// The other published language (for language toggles and hreflang pairs).
    pub fn other(self) -> Self {
        match self {
            Language::En => Language::Zh,
            Language::Zh => Language::En,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Text available in each published language.
///
/// Content files are expected to provide both languages, but a missing one
/// is tolerated here and only shows up as an empty string when rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zh: Option<String>,
}

impl LocalizedText {
    pub fn new(en: &str, zh: &str) -> Self {
        Self {
            en: Some(en.to_string()),
            zh: Some(zh.to_string()),
        }
    }

    /// Text for `lang`, or `""` when that language is missing.
    pub fn get(&self, lang: Language) -> &str {
        self.get_opt(lang).unwrap_or_default()
    }

    pub fn get_opt(&self, lang: Language) -> Option<&str> {
        match lang {
            Language::En => self.en.as_deref(),
            Language::Zh => self.zh.as_deref(),
        }
    }

    /// True when neither language has any non-whitespace text.
    pub fn is_blank(&self) -> bool {
        Language::ALL
            .iter()
            .all(|&lang| self.get(lang).trim().is_empty())
    }
}

/// Summary record for an article, used by index pages and the catalog.
///
/// Hidden articles never become an `ArticleListItem`; the content store drops
/// them while loading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleListItem {
    /// Directory name under `articles/`, also the URL segment.
    pub slug: String,
    pub title: LocalizedText,
    pub description: LocalizedText,
    /// Category keys in file order.
    pub categories: Vec<String>,
    pub pinned: bool,
    /// Eligible for the home page highlight list.
    pub frontpage_display: bool,
    /// ISO date (`YYYY-MM-DD`) as written in the metadata file.
    pub date_updated: String,
    pub date_updated_shown: bool,
    pub hidden: bool,
}

impl ArticleListItem {
    /// The parsed `date_updated`, if it is a valid ISO date.
    pub fn updated_on(&self) -> Option<chrono::NaiveDate> {
        chrono::NaiveDate::parse_from_str(self.date_updated.trim(), "%Y-%m-%d").ok()
    }
}

/// A full article: the list summary plus its body and optional image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    #[serde(flatten)]
    pub summary: ArticleListItem,
    /// Markdown body per language.
    pub content: LocalizedText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_caption: Option<LocalizedText>,
}

impl std::ops::Deref for Article {
    type Target = ArticleListItem;

    fn deref(&self) -> &ArticleListItem {
        &self.summary
    }
}
