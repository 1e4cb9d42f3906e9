//! Everything loaded from a content root before any page is rendered.

use crate::cache::ContentCache;
use crate::config::{self, ConfigError, PaginationConfig, RuntimeMode, SiteConfig};
use crate::content::ContentStore;
use crate::i18n::Translations;
use crate::markdown::extract_faq;
use crate::notification::{Notification, load_notification};
use crate::static_pages::{PageKind, StaticPage, StaticPageError, load_static_page};
use crate::types::{ArticleListItem, Language};
use chrono::Datelike;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A content root with its config, translations, and article store.
#[derive(Debug)]
pub struct Site {
    pub root: PathBuf,
    pub config: SiteConfig,
    /// Effective mode: the `--dev` override if given, otherwise `[build] mode`.
    pub mode: RuntimeMode,
    pub pagination: PaginationConfig,
    pub translations: Translations,
    pub store: ContentStore,
}

impl Site {
    /// Load `root`, using the current year for `{year}` in translations.
    pub fn load(root: &Path, mode: Option<RuntimeMode>) -> Result<Self, ConfigError> {
        Self::load_for_year(root, mode, chrono::Local::now().year())
    }

    pub fn load_for_year(
        root: &Path,
        mode: Option<RuntimeMode>,
        year: i32,
    ) -> Result<Self, ConfigError> {
        let config = config::load_config(root)?;
        let mode = mode.unwrap_or(config.build.mode);
        debug!(root = %root.display(), %mode, "loading site");

        Ok(Self {
            root: root.to_path_buf(),
            pagination: config::load_pagination(root),
            translations: Translations::load(root, year),
            store: ContentStore::new(root, ContentCache::new(mode.cache_policy())),
            config,
            mode,
        })
    }

    pub fn base_url(&self) -> &str {
        self.config.site.base_url()
    }

    /// Load everything a build would render, without writing anything.
    pub fn inventory(&self) -> Result<Inventory, StaticPageError> {
        let pages = PageKind::ALL
            .into_iter()
            .map(|kind| load_static_page(&self.root, kind).map(|page| (kind, page)))
            .collect::<Result<Vec<_>, _>>()?;
        let faq_questions = pages
            .iter()
            .find(|(kind, _)| *kind == PageKind::Faq)
            .map_or(0, |(_, page)| {
                extract_faq(page.markdown_content.get(Language::En)).len()
            });

        Ok(Inventory {
            articles: self.store.list_items(),
            pages,
            faq_questions,
            notification: load_notification(&self.root),
        })
    }
}

/// Content summary printed by `check`.
#[derive(Debug)]
pub struct Inventory {
    pub articles: Vec<ArticleListItem>,
    pub pages: Vec<(PageKind, StaticPage)>,
    /// Question/answer pairs on the English FAQ page.
    pub faq_questions: usize,
    pub notification: Option<Notification>,
}
