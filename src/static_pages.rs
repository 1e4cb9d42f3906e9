//! Static pages (`static-pages/profile.yaml`, `static-pages/faq.yaml`).
//!
//! Unlike articles, these pages are part of the site skeleton: a missing or
//! malformed file is a build error, not something to skip.

use crate::types::{Language, LocalizedText};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StaticPageError {
    #[error("static page file not found for {kind}: {path}")]
    NotFound { kind: PageKind, path: PathBuf },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error in {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("invalid static page {path}: {field}.{lang} must be a string")]
    MissingText {
        path: PathBuf,
        field: &'static str,
        lang: Language,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Profile,
    Faq,
}

impl PageKind {
    pub const ALL: [PageKind; 2] = [PageKind::Profile, PageKind::Faq];

    pub fn file_stem(self) -> &'static str {
        match self {
            PageKind::Profile => "profile",
            PageKind::Faq => "faq",
        }
    }

    /// Unlocalized route, e.g. `/profile`.
    pub fn route(self) -> &'static str {
        match self {
            PageKind::Profile => "/profile",
            PageKind::Faq => "/faq",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// A static page with a title and markdown body in both languages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StaticPage {
    pub title: LocalizedText,
    pub markdown_content: LocalizedText,
}

/// Load and validate `<root>/static-pages/<kind>.yaml`.
pub fn load_static_page(root: &Path, kind: PageKind) -> Result<StaticPage, StaticPageError> {
    let path = root
        .join("static-pages")
        .join(format!("{}.yaml", kind.file_stem()));
    if !path.is_file() {
        return Err(StaticPageError::NotFound { kind, path });
    }

    let text = fs::read_to_string(&path)?;
    let page: StaticPage = serde_yaml::from_str(&text).map_err(|source| StaticPageError::Yaml {
        path: path.clone(),
        source,
    })?;

    for (field, text) in [("title", &page.title), ("markdown_content", &page.markdown_content)] {
        for lang in Language::ALL {
            if text.get_opt(lang).is_none() {
                return Err(StaticPageError::MissingText {
                    path: path.clone(),
                    field,
                    lang,
                });
            }
        }
    }
    Ok(page)
}
