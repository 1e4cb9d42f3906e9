//! Article content store.
//!
//! Reads the article directory tree and turns it into typed records:
//!
//! ```text
//! content/articles/
//! ├── coping-with-anxiety/
//! │   ├── metadata.yaml   # title, description, categories, flags, date
//! │   └── content.yaml    # markdown body, optional image
//! └── grief-and-loss/
//!     ├── metadata.yaml
//!     └── content.yaml
//! ```
//!
//! ## Failure policy
//!
//! A broken content file must never take the site down. Every file-level
//! problem is logged and the affected article is skipped:
//!
//! - [`ContentStore::list_items`] returns whatever loaded, or an empty list
//!   if the articles directory itself is missing or unreadable.
//! - [`ContentStore::get_by_slug`] returns [`NotFound`] for malformed slugs,
//!   hidden articles, and missing or invalid files.
//!
//! Hidden articles are dropped here, at the load boundary, so nothing
//! downstream needs to check the flag again.
//!
//! ## Ordering
//!
//! The list comes back in canonical order: pinned articles first, then by
//! `date_updated`, newest first. Articles with an unparseable date go last
//! within their group. Remaining ties keep directory-name order.

use crate::cache::{CacheStats, ContentCache};
use crate::slug::is_valid_slug;
use crate::types::{Article, ArticleListItem, LocalizedText};
use serde::{Deserialize, Deserializer};
use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, warn};
use walkdir::WalkDir;

const METADATA_FILE: &str = "metadata.yaml";
const CONTENT_FILE: &str = "content.yaml";

/// Why a single article could not be loaded.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("invalid slug format: {0:?}")]
    InvalidSlug(String),
    #[error("{0} not found")]
    Missing(PathBuf),
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("YAML error in {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("{path}: missing required field `{field}`")]
    MissingField { path: PathBuf, field: &'static str },
}

/// An article that does not exist, is hidden, or failed to load.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("article not found: {slug}")]
pub struct NotFound {
    pub slug: String,
}

/// Raw `metadata.yaml`. Fields are loose so one odd value does not reject
/// the whole file: display flags count only when literally `true`, `hidden`
/// counts whenever it is truthy, and a `categories` value that is not a list
/// of strings becomes empty.
#[derive(Debug, Deserialize)]
struct MetadataFile {
    title: Option<LocalizedText>,
    description: Option<LocalizedText>,
    #[serde(default, deserialize_with = "string_list")]
    categories: Vec<String>,
    #[serde(default, deserialize_with = "flag")]
    pinned: bool,
    #[serde(default, deserialize_with = "loose_string")]
    date_updated: String,
    #[serde(default, deserialize_with = "flag")]
    date_updated_shown: bool,
    #[serde(default, deserialize_with = "truthy")]
    hidden: bool,
    #[serde(default, deserialize_with = "flag")]
    frontpage_display: bool,
}

/// Raw `content.yaml`.
#[derive(Debug, Deserialize)]
struct ContentFile {
    content: Option<LocalizedText>,
    #[serde(rename = "imageUrl")]
    image_url: Option<String>,
    #[serde(rename = "imageCaption")]
    image_caption: Option<LocalizedText>,
}

fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(matches!(
        serde_yaml::Value::deserialize(d)?,
        serde_yaml::Value::Bool(true)
    ))
}

/// Any value other than `null`, `false`, `0`, `NaN` or `""` counts as set.
fn truthy<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    use serde_yaml::Value;
    Ok(match Value::deserialize(d)? {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => true,
    })
}

fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match serde_yaml::Value::deserialize(d)? {
        serde_yaml::Value::Sequence(seq) => seq
            .into_iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect(),
        _ => Vec::new(),
    })
}

fn loose_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match serde_yaml::Value::deserialize(d)? {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Loads articles from `<root>/articles/`, memoizing through a [`ContentCache`].
#[derive(Debug)]
pub struct ContentStore {
    articles_dir: PathBuf,
    cache: ContentCache,
}

impl ContentStore {
    /// A store over `<content_root>/articles`.
    pub fn new(content_root: &Path, cache: ContentCache) -> Self {
        Self {
            articles_dir: content_root.join("articles"),
            cache,
        }
    }

    pub fn articles_dir(&self) -> &Path {
        &self.articles_dir
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop anything the cache holds so the next call re-reads the files.
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }

    /// All visible articles in canonical order. Never fails; problems are
    /// logged and the affected articles left out.
    pub fn list_items(&self) -> Vec<ArticleListItem> {
        if let Some(items) = self.cache.list() {
            return items;
        }
        let items = self.load_list();
        self.cache.store_list(&items);
        items
    }

    /// The full article for `slug`.
    pub fn get_by_slug(&self, slug: &str) -> Result<Article, NotFound> {
        if let Some(article) = self.cache.article(slug) {
            return Ok(article);
        }
        match self.load_article(slug) {
            Ok(Some(article)) => {
                self.cache.store_article(&article);
                Ok(article)
            }
            Ok(None) => {
                debug!(slug, "article is hidden");
                Err(NotFound {
                    slug: slug.to_string(),
                })
            }
            Err(err) => {
                warn!(slug, %err, "article not available");
                Err(NotFound {
                    slug: slug.to_string(),
                })
            }
        }
    }

    fn load_list(&self) -> Vec<ArticleListItem> {
        if !self.articles_dir.is_dir() {
            warn!(dir = %self.articles_dir.display(), "articles directory not found");
            return Vec::new();
        }

        let mut items = Vec::new();
        for slug in self.article_dirs() {
            match self.read_metadata(&slug) {
                Ok(item) if item.hidden => debug!(slug, "skipping hidden article"),
                Ok(item) => items.push(item),
                Err(err) => warn!(slug, %err, "skipping article"),
            }
        }

        items.sort_by_key(|item| (Reverse(item.pinned), Reverse(item.updated_on())));
        items
    }

    /// Directory names directly under the articles directory, sorted.
    fn article_dirs(&self) -> Vec<String> {
        let mut slugs = Vec::new();
        let walker = WalkDir::new(&self.articles_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    error!(dir = %self.articles_dir.display(), %err, "failed to read articles directory");
                    if err.depth() == 0 {
                        return Vec::new();
                    }
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            slugs.push(name);
        }
        slugs
    }

    /// Read and validate `metadata.yaml` for `slug`. Hidden articles are
    /// returned with `hidden = true`; callers decide what to do with them.
    fn read_metadata(&self, slug: &str) -> Result<ArticleListItem, ContentError> {
        if !is_valid_slug(slug) {
            return Err(ContentError::InvalidSlug(slug.to_string()));
        }
        let path = self.articles_dir.join(slug).join(METADATA_FILE);
        let raw: MetadataFile = read_yaml(&path)?;

        let title = raw.title.ok_or_else(|| ContentError::MissingField {
            path: path.clone(),
            field: "title",
        })?;
        let description = raw.description.ok_or_else(|| ContentError::MissingField {
            path: path.clone(),
            field: "description",
        })?;

        Ok(ArticleListItem {
            slug: slug.to_string(),
            title,
            description,
            categories: raw.categories,
            pinned: raw.pinned,
            frontpage_display: raw.frontpage_display,
            date_updated: raw.date_updated,
            date_updated_shown: raw.date_updated_shown,
            hidden: raw.hidden,
        })
    }

    /// `Ok(None)` means the article exists but is hidden.
    fn load_article(&self, slug: &str) -> Result<Option<Article>, ContentError> {
        let summary = self.read_metadata(slug)?;
        if summary.hidden {
            return Ok(None);
        }

        let path = self.articles_dir.join(slug).join(CONTENT_FILE);
        let raw: ContentFile = read_yaml(&path)?;
        let content = raw.content.ok_or(ContentError::MissingField {
            path,
            field: "content",
        })?;

        Ok(Some(Article {
            summary,
            content,
            image_url: raw.image_url,
            image_caption: raw.image_caption,
        }))
    }
}

fn read_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ContentError> {
    if !path.is_file() {
        return Err(ContentError::Missing(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&text).map_err(|source| ContentError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}
