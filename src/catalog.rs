//! Article catalog: filter, sort, and paginate the article list.
//!
//! Everything here is a pure function of its inputs. [`compute_view`] takes
//! the full list from the content store plus a [`CatalogQuery`] and returns the
//! slice for one page together with the pagination numbers the listing page
//! shows. [`CatalogState`] wraps the query with the page number and owns the
//! rules for how interactive changes move between states.
//!
//! ## Pipeline
//!
//! 1. **Filter**: with no category selected every item passes; otherwise an
//!    item passes if it has at least one selected category.
//! 2. **Partition + sort**: under [`PriorityMode::Pinned`] or
//!    [`PriorityMode::Frontpage`] the items carrying that flag come first.
//!    Each group is sorted by title in the query language.
//! 3. **Paginate**: a fixed-size window. Pages are 1-based and not clamped;
//!    a page past the end is simply empty. Page numbers coming from URLs go
//!    through [`resolve_page_param`] first.
//!
//! ## Title collation
//!
//! Titles compare case- and accent-insensitively through a [`TitleCollator`].
//! English text is decomposed (NFD), combining marks are dropped, and the
//! rest is lowercased. Chinese text goes through the ICU `zh` collation
//! (pinyin order) at primary strength. Sorting is stable in both directions,
//! so equal titles keep their canonical order.

use crate::i18n::{Translations, substitute};
use crate::types::{ArticleListItem, Language};
use icu_collator::{Collator, CollatorOptions, Strength};
use icu_locid::locale;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use tracing::warn;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Which flag, if any, pulls articles to the front of the list.
///
/// Exactly one mode is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityMode {
    #[default]
    Pinned,
    Frontpage,
    /// Title order only.
    Plain,
}

impl PriorityMode {
    /// Parse a CLI value: `pinned`, `frontpage`, or `none`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pinned" => Some(PriorityMode::Pinned),
            "frontpage" => Some(PriorityMode::Frontpage),
            "none" | "plain" => Some(PriorityMode::Plain),
            _ => None,
        }
    }

    /// Whether `item` belongs to the priority group. `None` in plain mode.
    fn prioritizes(self, item: &ArticleListItem) -> Option<bool> {
        match self {
            PriorityMode::Pinned => Some(item.pinned),
            PriorityMode::Frontpage => Some(item.frontpage_display),
            PriorityMode::Plain => None,
        }
    }
}

impl fmt::Display for PriorityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PriorityMode::Pinned => "pinned",
            PriorityMode::Frontpage => "frontpage",
            PriorityMode::Plain => "none",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Filter and sort settings for one catalog view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Selected category keys. Empty means no filtering.
    pub categories: BTreeSet<String>,
    pub priority: PriorityMode,
    pub direction: SortDirection,
    /// Language whose titles are compared.
    pub language: Language,
}

impl CatalogQuery {
    pub fn new(language: Language) -> Self {
        Self {
            categories: BTreeSet::new(),
            priority: PriorityMode::default(),
            direction: SortDirection::default(),
            language,
        }
    }

    fn admits(&self, item: &ArticleListItem) -> bool {
        self.categories.is_empty() || item.categories.iter().any(|c| self.categories.contains(c))
    }
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self::new(Language::En)
    }
}

/// One page of the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView<'a> {
    pub page: usize,
    pub page_items: Vec<&'a ArticleListItem>,
    pub total_pages: usize,
    /// Items left after filtering, across all pages.
    pub total_items: usize,
    /// 1-based position of the first item on this page; 0 when empty.
    pub start_index: usize,
    /// 1-based position of the last item on this page; 0 when empty.
    pub end_index: usize,
}

impl CatalogView<'_> {
    pub fn is_empty(&self) -> bool {
        self.page_items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Filter, sort, and slice `items` for `page` (1-based).
///
/// A `page_size` of 0 is treated as 1.
pub fn compute_view<'a>(
    items: &'a [ArticleListItem],
    query: &CatalogQuery,
    page: usize,
    page_size: usize,
) -> CatalogView<'a> {
    let page_size = page_size.max(1);
    let ordered = sorted_matches(items, query);
    let total_items = ordered.len();

    let offset = page.saturating_sub(1).saturating_mul(page_size);
    let page_items: Vec<_> = ordered.into_iter().skip(offset).take(page_size).collect();
    let (start_index, end_index) = if page_items.is_empty() {
        (0, 0)
    } else {
        (offset + 1, offset + page_items.len())
    };

    CatalogView {
        page,
        page_items,
        total_pages: total_pages(total_items, page_size),
        total_items,
        start_index,
        end_index,
    }
}

/// Filtered items in display order, before pagination.
pub fn sorted_matches<'a>(items: &'a [ArticleListItem], query: &CatalogQuery) -> Vec<&'a ArticleListItem> {
    let matching: Vec<&ArticleListItem> = items.iter().filter(|item| query.admits(item)).collect();

    let (mut front, mut rest): (Vec<_>, Vec<_>) = matching
        .into_iter()
        .partition(|item| query.priority.prioritizes(item).unwrap_or(false));
    sort_by_title(&mut front, query);
    sort_by_title(&mut rest, query);

    front.extend(rest);
    front
}

fn sort_by_title(items: &mut [&ArticleListItem], query: &CatalogQuery) {
    let lang = query.language;
    let collator = TitleCollator::new(lang);
    items.sort_by(|a, b| {
        let order = collator.compare(a.title.get(lang), b.title.get(lang));
        match query.direction {
            SortDirection::Ascending => order,
            SortDirection::Descending => order.reverse(),
        }
    });
}

/// Case- and accent-folded form of `text` used for English title ordering.
pub fn collation_key(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Locale-aware text comparison for one language.
pub struct TitleCollator {
    icu: Option<Collator>,
}

impl TitleCollator {
    /// ICU `zh` collation for Chinese, folded-key comparison for English.
    ///
    /// Falls back to the folded key if the ICU data cannot be loaded.
    pub fn new(lang: Language) -> Self {
        let icu = match lang {
            Language::En => None,
            Language::Zh => {
                let mut options = CollatorOptions::new();
                options.strength = Some(Strength::Primary);
                match Collator::try_new(&locale!("zh").into(), options) {
                    Ok(collator) => Some(collator),
                    Err(err) => {
                        warn!(%err, "zh collation unavailable, using folded keys");
                        None
                    }
                }
            }
        };
        Self { icu }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.icu {
            Some(collator) => collator.compare(a, b),
            None => collation_key(a).cmp(&collation_key(b)),
        }
    }
}

/// Number of pages for `total_items`. Always at least 1, so an empty
/// catalog still has a (blank) first page.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}

/// Validate a page number taken from a URL segment.
///
/// Returns `None` for anything that is not an integer in `1..=total_pages`;
/// the caller answers those with a not-found page.
pub fn resolve_page_param(raw: &str, total_pages: usize) -> Option<usize> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|page| (1..=total_pages).contains(page))
}

// ============================================================================
// Interactive state
// ============================================================================

/// Catalog query plus the current page, with the transition rules of the
/// listing controls.
///
/// Any change to filters, priority, or direction returns to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogState {
    pub query: CatalogQuery,
    pub page: usize,
}

impl CatalogState {
    /// Default state: no filters, pinned first, ascending, page 1.
    pub fn new(language: Language) -> Self {
        Self {
            query: CatalogQuery::new(language),
            page: 1,
        }
    }

    /// Pinned-first on, or off (back to plain) if it was already on.
    pub fn toggle_pinned(&mut self) {
        self.toggle_priority(PriorityMode::Pinned);
    }

    /// Frontpage-first on, or off (back to plain) if it was already on.
    pub fn toggle_frontpage(&mut self) {
        self.toggle_priority(PriorityMode::Frontpage);
    }

    fn toggle_priority(&mut self, mode: PriorityMode) {
        self.query.priority = if self.query.priority == mode {
            PriorityMode::Plain
        } else {
            mode
        };
        self.page = 1;
    }

    pub fn toggle_direction(&mut self) {
        self.query.direction = self.query.direction.reversed();
        self.page = 1;
    }

    pub fn set_direction(&mut self, direction: SortDirection) {
        if self.query.direction != direction {
            self.query.direction = direction;
            self.page = 1;
        }
    }

    /// Select `key` if it is not selected, otherwise deselect it.
    pub fn toggle_category(&mut self, key: &str) {
        if !self.query.categories.remove(key) {
            self.query.categories.insert(key.to_string());
        }
        self.page = 1;
    }

    pub fn clear_categories(&mut self) {
        if !self.query.categories.is_empty() {
            self.query.categories.clear();
            self.page = 1;
        }
    }

    /// Move to `page`. Nothing else changes.
    pub fn navigate_to(&mut self, page: usize) {
        self.page = page;
    }

    pub fn view<'a>(&self, items: &'a [ArticleListItem], page_size: usize) -> CatalogView<'a> {
        compute_view(items, &self.query, self.page, page_size)
    }
}

// ============================================================================
// Category filter controls
// ============================================================================

/// A category that can be selected in the filter menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    pub key: String,
    pub label: String,
}

/// Distinct categories used by `items`, labelled in `lang` and sorted by label.
pub fn category_filters(items: &[ArticleListItem], translations: &Translations, lang: Language) -> Vec<CategoryFilter> {
    let keys: BTreeSet<&str> = items
        .iter()
        .flat_map(|item| item.categories.iter().map(String::as_str))
        .collect();

    let mut filters: Vec<CategoryFilter> = keys
        .into_iter()
        .map(|key| CategoryFilter {
            key: key.to_string(),
            label: translations.category_label(key, lang).to_string(),
        })
        .collect();
    let collator = TitleCollator::new(lang);
    filters.sort_by(|a, b| collator.compare(&a.label, &b.label));
    filters
}

/// Text on the filter button: a placeholder with nothing selected, the label
/// of a single selection, or a count for several.
pub fn filter_summary(
    state: &CatalogState,
    filters: &[CategoryFilter],
    translations: &Translations,
    lang: Language,
) -> String {
    let selected = &state.query.categories;
    match selected.len() {
        0 => translations.text("selectCategoriesPlaceholder", lang).to_string(),
        1 => {
            let key = selected.iter().next().map(String::as_str).unwrap_or_default();
            filters
                .iter()
                .find(|f| f.key == key)
                .map_or(key, |f| f.label.as_str())
                .to_string()
        }
        count => substitute(
            translations.text("categoriesSelected", lang),
            &[("count", count.to_string().as_str())],
        ),
    }
}
