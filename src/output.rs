//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every article is
//! shown first by its positional index and title, with the slug, date, and
//! categories as indented context lines. This makes `check` and `list` read
//! like a content inventory while still pointing back to the directories on
//! disk.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Articles
//! 001 Coping with Anxiety (pinned, frontpage)
//!     Source: articles/coping-with-anxiety/
//!     Updated: 2024-05-01
//!     Categories: anxiety, stress
//!
//! Pages
//!     profile: Profile
//!     faq: Frequently Asked Questions (2 questions)
//!
//! Translations: 61 keys
//! Pagination: 2 per page, 2 pages
//! Notification: Holiday hours (8s)
//! ```
//!
//! ## List
//!
//! ```text
//! Articles (pinned first, ascending, en)
//! 001 Coping with Anxiety (pinned)
//!     Slug: coping-with-anxiety
//! 002 Burnout at Work
//!     Slug: burnout-at-work
//! Page 1 of 2, showing 1-2 of 4
//! ```
//!
//! ## Build
//!
//! ```text
//! home → index.html
//! listing → articles/page/1/index.html
//! article → article/coping-with-anxiety/index.html
//! ...
//! Generated 19 pages: 4 articles and 2 listing pages per language
//! Sitemap: 16 URLs
//! Cache: 8 cached, 5 loaded (13 total)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::catalog::{CatalogState, CatalogView, PriorityMode, SortDirection};
use crate::generate::GenerateReport;
use crate::site::{Inventory, Site};
use crate::static_pages::PageKind;
use crate::types::{ArticleListItem, Language};

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Index and title, with the article's flags in parentheses.
///
/// ```text
/// 001 Coping with Anxiety (pinned, frontpage)
/// 002 Grief and Loss
/// ```
fn article_header(index: usize, item: &ArticleListItem, lang: Language) -> String {
    let mut flags = Vec::new();
    if item.pinned {
        flags.push("pinned");
    }
    if item.frontpage_display {
        flags.push("frontpage");
    }
    let title = truncate(item.title.get(lang), 60);
    if flags.is_empty() {
        format!("{} {}", format_index(index), title)
    } else {
        format!("{} {} ({})", format_index(index), title, flags.join(", "))
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max).collect();
        format!("{kept}...")
    }
}

fn describe_query(state: &CatalogState) -> String {
    let priority = match state.query.priority {
        PriorityMode::Pinned => "pinned first",
        PriorityMode::Frontpage => "frontpage first",
        PriorityMode::Plain => "no priority",
    };
    let direction = match state.query.direction {
        SortDirection::Ascending => "ascending",
        SortDirection::Descending => "descending",
    };
    format!("{priority}, {direction}, {}", state.query.language)
}

// ============================================================================
// Check
// ============================================================================

/// Format the content inventory for `check`.
pub fn format_check_output(site: &Site, inventory: &Inventory) -> Vec<String> {
    let mut lines = vec!["Articles".to_string()];

    if inventory.articles.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, item) in inventory.articles.iter().enumerate() {
        lines.push(article_header(i + 1, item, Language::En));
        lines.push(format!("{}Source: articles/{}/", indent(1), item.slug));
        lines.push(format!("{}Updated: {}", indent(1), item.date_updated));
        if !item.categories.is_empty() {
            lines.push(format!(
                "{}Categories: {}",
                indent(1),
                item.categories.join(", ")
            ));
        }
    }

    lines.push(String::new());
    lines.push("Pages".to_string());
    for (kind, page) in &inventory.pages {
        let title = page.title.get(Language::En);
        match kind {
            PageKind::Faq => lines.push(format!(
                "{}{}: {} ({} questions)",
                indent(1),
                kind,
                title,
                inventory.faq_questions
            )),
            PageKind::Profile => lines.push(format!("{}{}: {}", indent(1), kind, title)),
        }
    }

    lines.push(String::new());
    lines.push(format!("Translations: {} keys", site.translations.len()));
    let per_page = site.pagination.articles_per_page;
    lines.push(format!(
        "Pagination: {} per page, {} pages",
        per_page,
        crate::catalog::total_pages(inventory.articles.len(), per_page)
    ));
    lines.push(match &inventory.notification {
        Some(n) => format!(
            "Notification: {} ({}s)",
            n.title.get(Language::En),
            n.duration_seconds
        ),
        None => "Notification: off".to_string(),
    });
    lines
}

pub fn print_check_output(site: &Site, inventory: &Inventory) {
    for line in format_check_output(site, inventory) {
        println!("{}", line);
    }
}

// ============================================================================
// List
// ============================================================================

/// Format one catalog page for `list`.
pub fn format_list_output(state: &CatalogState, view: &CatalogView<'_>) -> Vec<String> {
    let lang = state.query.language;
    let mut lines = vec![format!("Articles ({})", describe_query(state))];

    if !state.query.categories.is_empty() {
        let selected: Vec<&str> = state.query.categories.iter().map(String::as_str).collect();
        lines.push(format!("Categories: {}", selected.join(", ")));
    }

    if view.is_empty() {
        lines.push(format!("{}(no articles)", indent(1)));
    }
    for (i, item) in view.page_items.iter().enumerate() {
        lines.push(article_header(view.start_index + i, item, lang));
        lines.push(format!("{}Slug: {}", indent(1), item.slug));
    }

    lines.push(format!(
        "Page {} of {}, showing {}-{} of {}",
        view.page, view.total_pages, view.start_index, view.end_index, view.total_items
    ));
    lines
}

pub fn print_list_output(state: &CatalogState, view: &CatalogView<'_>) {
    for line in format_list_output(state, view) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

/// Format a build report: one line per page, then totals.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .pages
        .iter()
        .map(|page| format!("{} \u{2192} {}", page.kind, page.file))
        .collect();

    lines.push(format!(
        "Generated {} pages: {} articles and {} listing pages per language",
        report.pages.len(),
        report.articles,
        report.listing_pages
    ));
    lines.push(format!("Sitemap: {} URLs", report.sitemap_urls));
    if report.public_files > 0 {
        lines.push(format!("Public: {} files copied", report.public_files));
    }
    lines.push(format!("Cache: {}", report.cache));
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
