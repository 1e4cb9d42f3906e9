//! HTML site generation.
//!
//! Takes a loaded [`Site`] and writes the complete static site, once per
//! language. English pages live at the root and Chinese pages under `/zh/`.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): hero, notification banner, featured articles
//! - **Profile** (`/profile/index.html`) and **FAQ** (`/faq/index.html`)
//! - **Listing** (`/articles/page/<n>/index.html`): one page per catalog page
//!   in the default state (pinned first, titles ascending)
//! - **Articles** (`/article/<slug>/index.html`): one page per listed article
//! - **Redirect** (`/articles/index.html`): forwards to listing page 1
//! - **Not found** (`/404.html`): both languages on one page
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── 404.html
//! ├── style.css
//! ├── sitemap.xml
//! ├── profile/index.html
//! ├── faq/index.html
//! ├── articles/
//! │   ├── index.html              # redirect
//! │   └── page/1/index.html
//! ├── article/<slug>/index.html
//! ├── zh/...                      # same tree for Chinese
//! └── <everything in content/public/>
//! ```
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! All translated text and content strings go through maud's escaping; only
//! markdown output (already sanitized) and JSON-LD are inserted pre-escaped.

use crate::cache::CacheStats;
use crate::catalog::{
    self, CatalogQuery, CatalogState, CatalogView, CategoryFilter, PriorityMode, category_filters,
    filter_summary, sorted_matches,
};
use crate::config::{ConfigError, RuntimeMode};
use crate::markdown::{extract_faq, render_markdown};
use crate::notification::{Notification, load_notification};
use crate::paths::{
    absolute_url, article_path, articles_index_path, articles_page_path, home_path, index_file,
    inquiry_mailto, localized_path,
};
use crate::seo::{article_schema, faq_schema, item_list_schema, json_ld, service_schema};
use crate::site::Site;
use crate::sitemap::{render_sitemap, sitemap_entries};
use crate::static_pages::{PageKind, StaticPage, StaticPageError, load_static_page};
use crate::types::{Article, ArticleListItem, Language};
use chrono::NaiveDate;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    StaticPage(#[from] StaticPageError),
}

const CSS: &str = include_str!("../static/style.css");

/// Header navigation: unlocalized route and translation key of its label.
const NAV_LINKS: &[(&str, &str)] = &[
    ("/", "home"),
    ("/profile", "profile"),
    ("/faq", "faq"),
    ("/articles/page/1", "articles"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageType {
    Home,
    Profile,
    Faq,
    Redirect,
    Listing,
    Article,
    NotFound,
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PageType::Home => "home",
            PageType::Profile => "profile",
            PageType::Faq => "faq",
            PageType::Redirect => "redirect",
            PageType::Listing => "listing",
            PageType::Article => "article",
            PageType::NotFound => "not found",
        })
    }
}

/// One written HTML file, relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub file: String,
    pub kind: PageType,
}

/// What a build produced, for CLI output.
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    pub pages: Vec<GeneratedPage>,
    /// Articles listed (and rendered) per language.
    pub articles: usize,
    /// Listing pages per language.
    pub listing_pages: usize,
    pub sitemap_urls: usize,
    pub public_files: usize,
    pub cache: CacheStats,
}

impl GenerateReport {
    pub fn count(&self, kind: PageType) -> usize {
        self.pages.iter().filter(|p| p.kind == kind).count()
    }
}

/// Load the content root at `source` and write the site to `output`.
///
/// `mode` overrides `[build] mode` from `config.toml` when given.
pub fn generate(
    source: &Path,
    output: &Path,
    mode: Option<RuntimeMode>,
) -> Result<GenerateReport, GenerateError> {
    let site = Site::load(source, mode)?;
    generate_site(&site, output, chrono::Local::now().date_naive())
}

/// Write the full site for an already loaded [`Site`].
///
/// `today` is the `lastmod` of non-article sitemap entries.
pub fn generate_site(
    site: &Site,
    output: &Path,
    today: NaiveDate,
) -> Result<GenerateReport, GenerateError> {
    let profile = load_static_page(&site.root, PageKind::Profile)?;
    let faq = load_static_page(&site.root, PageKind::Faq)?;
    let notification = load_notification(&site.root);
    let items = site.store.list_items();
    let page_size = site.pagination.articles_per_page;
    let total_pages = catalog::total_pages(items.len(), page_size);

    fs::create_dir_all(output)?;
    let mut report = GenerateReport {
        listing_pages: total_pages,
        ..GenerateReport::default()
    };

    for lang in Language::ALL {
        let ctx = PageContext { site, lang };

        write_page(
            output,
            &home_path(lang),
            PageType::Home,
            render_home(&ctx, &items, notification.as_ref()),
            &mut report,
        )?;
        write_page(
            output,
            &localized_path(PageKind::Profile.route(), lang),
            PageType::Profile,
            render_static_page(&ctx, PageKind::Profile, &profile),
            &mut report,
        )?;
        write_page(
            output,
            &localized_path(PageKind::Faq.route(), lang),
            PageType::Faq,
            render_static_page(&ctx, PageKind::Faq, &faq),
            &mut report,
        )?;
        write_page(
            output,
            &articles_index_path(lang),
            PageType::Redirect,
            render_redirect(&ctx, &articles_page_path(1, lang)),
            &mut report,
        )?;

        let filters = category_filters(&items, &site.translations, lang);
        let mut state = CatalogState::new(lang);
        for page in 1..=total_pages {
            state.navigate_to(page);
            let view = state.view(&items, page_size);
            write_page(
                output,
                &articles_page_path(page, lang),
                PageType::Listing,
                render_listing(&ctx, &state, &view, &filters, page_size),
                &mut report,
            )?;
        }

        let mut rendered = 0;
        for item in &items {
            match site.store.get_by_slug(&item.slug) {
                Ok(article) => {
                    write_page(
                        output,
                        &article_path(&item.slug, lang),
                        PageType::Article,
                        render_article(&ctx, &article),
                        &mut report,
                    )?;
                    rendered += 1;
                }
                Err(err) => warn!(%err, "listed article could not be loaded, page skipped"),
            }
        }
        report.articles = rendered;
    }

    fs::write(output.join("404.html"), render_not_found(site).into_string())?;
    report.pages.push(GeneratedPage {
        file: "404.html".to_string(),
        kind: PageType::NotFound,
    });

    fs::write(output.join("style.css"), CSS)?;

    let entries = sitemap_entries(site.base_url(), &items, today);
    fs::write(output.join("sitemap.xml"), render_sitemap(&entries))?;
    report.sitemap_urls = entries.len();

    let public = site.root.join("public");
    if public.is_dir() {
        report.public_files = copy_dir_recursive(&public, output)?;
    }

    report.cache = site.store.cache_stats();
    info!(
        pages = report.pages.len(),
        output = %output.display(),
        "site generated"
    );
    Ok(report)
}

fn write_page(
    output: &Path,
    path: &str,
    kind: PageType,
    markup: Markup,
    report: &mut GenerateReport,
) -> std::io::Result<()> {
    let file = index_file(path);
    let target = output.join(&file);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, markup.into_string())?;
    debug!(file = %file, %kind, "wrote page");
    report.pages.push(GeneratedPage { file, kind });
    Ok(())
}

/// Copy `src` into `dst`, returning the number of files copied.
fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<usize> {
    let mut copied = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copied += copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
            copied += 1;
        }
    }
    Ok(copied)
}

// ============================================================================
// Page context and metadata
// ============================================================================

/// The site plus the language being rendered.
struct PageContext<'a> {
    site: &'a Site,
    lang: Language,
}

impl PageContext<'_> {
    fn t(&self, key: &str) -> &str {
        self.site.translations.text(key, self.lang)
    }

    fn format(&self, key: &str, replacements: &[(&str, &str)]) -> String {
        self.site.translations.format(key, self.lang, replacements)
    }

    fn site_name(&self) -> &str {
        self.site.translations.site_name(self.lang)
    }

    fn category_label<'a>(&'a self, key: &'a str) -> &'a str {
        self.site.translations.category_label(key, self.lang)
    }
}

/// Head metadata for one page.
struct PageMeta {
    title: String,
    description: String,
    /// Unlocalized route for canonical and hreflang links.
    route: Option<String>,
    robots: Option<&'static str>,
    schema: Option<Value>,
}

impl PageMeta {
    fn new(title: String, description: String, route: &str) -> Self {
        Self {
            title,
            description,
            route: Some(route.to_string()),
            robots: None,
            schema: None,
        }
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(ctx: &PageContext<'_>, meta: &PageMeta, body_class: &str, content: Markup) -> Markup {
    let base_url = ctx.site.base_url();
    html! {
        (DOCTYPE)
        html lang=(ctx.lang.html_lang()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (meta.title) }
                @if !meta.description.is_empty() {
                    meta name="description" content=(meta.description);
                }
                @if let Some(robots) = meta.robots {
                    meta name="robots" content=(robots);
                }
                @if let Some(route) = &meta.route {
                    link rel="canonical" href=(absolute_url(base_url, &localized_path(route, ctx.lang)));
                    @for lang in Language::ALL {
                        link rel="alternate" hreflang=(lang.code()) href=(absolute_url(base_url, &localized_path(route, lang)));
                    }
                }
                link rel="stylesheet" href="/style.css";
                @if let Some(schema) = &meta.schema {
                    script type="application/ld+json" { (PreEscaped(json_ld(schema))) }
                }
            }
            body class=(body_class) {
                (site_header(ctx, meta.route.as_deref()))
                main { (content) }
                (site_footer(ctx))
            }
        }
    }
}

/// Renders the site header with navigation and the language toggle
fn site_header(ctx: &PageContext<'_>, route: Option<&str>) -> Markup {
    let header_name = match ctx.t("headerSiteName") {
        "" => ctx.site_name(),
        name => name,
    };
    let toggle_target = localized_path(route.unwrap_or("/"), ctx.lang.other());
    html! {
        header.site-header {
            a.site-name href=(home_path(ctx.lang)) { (header_name) }
            nav.site-nav aria-label=(ctx.t("mainNavigationLabel")) {
                ul {
                    @for (nav_route, key) in NAV_LINKS {
                        @let current = route == Some(*nav_route);
                        li {
                            a href=(localized_path(nav_route, ctx.lang))
                                aria-current=[current.then_some("page")] {
                                (ctx.site.translations.text_or(key, ctx.lang, key))
                            }
                        }
                    }
                }
            }
            a.language-toggle href=(toggle_target) hreflang=(ctx.lang.other().code()) {
                (ctx.t("languageToggle"))
            }
        }
    }
}

fn site_footer(ctx: &PageContext<'_>) -> Markup {
    let email = &ctx.site.config.site.contact_email;
    html! {
        footer.site-footer {
            @if !email.is_empty() {
                p {
                    (ctx.t("contactEmailLabel")) ": "
                    a href=(inquiry_mailto(email, &ctx.site.translations, ctx.lang)) { (email) }
                }
            }
            p { (ctx.t("footerDisclaimer")) }
            p { (ctx.t("footerCopyrightText")) }
        }
    }
}

/// Card for an article in listings and the home page highlights
fn article_card(ctx: &PageContext<'_>, item: &ArticleListItem) -> Markup {
    let title = item.title.get(ctx.lang);
    let href = article_path(&item.slug, ctx.lang);
    let read_label = ctx.t("readArticleLabel");
    html! {
        article.article-card {
            h3 { a href=(href) { (title) } }
            @if item.pinned {
                span.badge.pinned { (ctx.t("pinnedArticle")) }
            }
            p { (item.description.get(ctx.lang)) }
            (category_badges(ctx, &item.categories))
            a.read-more href=(href) aria-label=(format!("{read_label}: {title}")) { (read_label) }
        }
    }
}

fn category_badges(ctx: &PageContext<'_>, categories: &[String]) -> Markup {
    html! {
        @if !categories.is_empty() {
            ul.categories {
                @for key in categories {
                    li.badge data-category=(key) { (ctx.category_label(key)) }
                }
            }
        }
    }
}

/// `updated_on` formatted for `lang`, or the raw string if it is not a date.
fn display_date(item: &ArticleListItem, lang: Language) -> String {
    match item.updated_on() {
        Some(date) => match lang {
            Language::En => date.format("%B %-d, %Y").to_string(),
            Language::Zh => date.format("%Y年%-m月%-d日").to_string(),
        },
        None => item.date_updated.clone(),
    }
}

// ============================================================================
// Pages
// ============================================================================

fn render_home(ctx: &PageContext<'_>, items: &[ArticleListItem], notification: Option<&Notification>) -> Markup {
    let email = &ctx.site.config.site.contact_email;
    let mut by_title = CatalogQuery::new(ctx.lang);
    by_title.priority = PriorityMode::Plain;
    let featured: Vec<&ArticleListItem> = sorted_matches(items, &by_title)
        .into_iter()
        .filter(|i| i.frontpage_display)
        .collect();

    let mut meta = PageMeta::new(
        match ctx.t("homePageTitle") {
            "" => ctx.site_name().to_string(),
            title => format!("{title} | {}", ctx.site_name()),
        },
        ctx.t("homePageMetaDescription").to_string(),
        "/",
    );
    meta.schema = Some(service_schema(ctx.lang, &ctx.site.translations, &ctx.site.config.site));

    let content = html! {
        section.hero {
            h1 { (ctx.t("heroTitle")) }
            p { (ctx.t("heroSubtitle")) }
            div.hero-actions {
                @if !email.is_empty() {
                    a.button href=(inquiry_mailto(email, &ctx.site.translations, ctx.lang)) { (ctx.t("heroButton")) }
                }
                a.button.secondary href=(articles_page_path(1, ctx.lang)) { (ctx.t("heroButtonSecondary")) }
            }
        }
        @if let Some(n) = notification {
            aside.notification role="status" data-duration-seconds=(n.duration_seconds.to_string()) {
                @let title = n.title.get(ctx.lang);
                @if !title.is_empty() {
                    strong { (title) }
                }
                (PreEscaped(n.description_html.get(ctx.lang)))
            }
        }
        @if !featured.is_empty() {
            section.featured {
                h2 { (ctx.t("pageBottomSectionTitle")) }
                div.article-grid {
                    @for item in &featured {
                        (article_card(ctx, item))
                    }
                }
                p { a href=(articles_page_path(1, ctx.lang)) { (ctx.t("ctaButtonArticles")) } }
            }
        }
    };
    base_document(ctx, &meta, "home", content)
}

fn render_static_page(ctx: &PageContext<'_>, kind: PageKind, page: &StaticPage) -> Markup {
    let title = page.title.get(ctx.lang);
    let markdown = page.markdown_content.get(ctx.lang);

    let mut meta = PageMeta::new(
        format!("{title} | {}", ctx.site_name()),
        String::new(),
        kind.route(),
    );
    if kind == PageKind::Faq {
        meta.schema = faq_schema(&extract_faq(markdown));
    }

    let content = html! {
        article.prose {
            h1 { (title) }
            (PreEscaped(render_markdown(markdown)))
        }
    };
    base_document(ctx, &meta, kind.file_stem(), content)
}

/// Listing page for `view`, with the toolbar state shown as text.
fn render_listing(
    ctx: &PageContext<'_>,
    state: &CatalogState,
    view: &CatalogView<'_>,
    filters: &[CategoryFilter],
    page_size: usize,
) -> Markup {
    let page = view.page.to_string();
    let total = view.total_pages.to_string();
    let site_name = ctx.site_name();

    let mut meta = PageMeta::new(
        ctx.format(
            "articlesListMetaPageTitle",
            &[("pageNumber", page.as_str()), ("siteName", site_name)],
        ),
        ctx.format(
            "articlesListMetaDescription",
            &[("siteName", site_name), ("pageNumber", page.as_str())],
        ),
        &format!("/articles/page/{}", view.page),
    );
    meta.robots = Some(if view.page == 1 {
        "index, follow"
    } else {
        "noindex, follow, noarchive, nosnippet"
    });
    meta.schema = Some(item_list_schema(
        &view.page_items,
        ctx.lang,
        view.page,
        page_size,
        ctx.site.base_url(),
    ));

    let heading = ctx
        .site
        .translations
        .text_or("articlesPageTitle", ctx.lang, ctx.t("articles"));
    let page_info = ctx.format(
        "paginationPageInfo",
        &[("currentPage", page.as_str()), ("totalPages", total.as_str())],
    );
    let items_info = ctx.format(
        "paginationItemsInfo",
        &[
            ("startIndex", view.start_index.to_string().as_str()),
            ("endIndex", view.end_index.to_string().as_str()),
            ("totalItems", view.total_items.to_string().as_str()),
        ],
    );
    let summary = filter_summary(state, filters, &ctx.site.translations, ctx.lang);

    let content = html! {
        header.listing-header {
            h1 {
                (heading)
                @if view.total_items > 0 {
                    " - " (page_info)
                }
            }
            p { (ctx.format("articlesListPageBodyDescription", &[("siteName", site_name)])) }
        }
        div.toolbar role="toolbar" aria-label=(ctx.t("articleControlsToolbarLabel")) {
            span.filter-label { (ctx.t("filterLabel")) }
            span.filter-summary { (summary) }
            @if filters.is_empty() {
                span { (ctx.t("noCategoriesAvailable")) }
            } @else {
                ul.categories {
                    @for f in filters {
                        li.badge data-category=(f.key) { (f.label) }
                    }
                }
            }
            span.sort-label { (ctx.t("sortLabel")) }
        }
        @if view.is_empty() {
            p.empty { (ctx.t("noArticlesFound")) }
        } @else {
            div.article-grid aria-live="polite" aria-label=(ctx.t("articlesListAriaLabel")) {
                @for item in &view.page_items {
                    (article_card(ctx, item))
                }
            }
        }
        @if view.total_items > 0 {
            nav.pagination {
                @if view.has_previous() {
                    a.previous href=(articles_page_path(view.page - 1, ctx.lang)) rel="prev" aria-label=(ctx.t("paginationPrevious")) { "←" }
                }
                div.info {
                    span { (page_info) }
                    span { (items_info) }
                }
                @if view.has_next() {
                    a.next href=(articles_page_path(view.page + 1, ctx.lang)) rel="next" aria-label=(ctx.t("paginationNext")) { "→" }
                }
            }
        }
    };
    base_document(ctx, &meta, "listing", content)
}

fn render_article(ctx: &PageContext<'_>, article: &Article) -> Markup {
    let title = article.title.get(ctx.lang);
    let mut meta = PageMeta::new(
        format!("{title} | {}", ctx.site_name()),
        article.description.get(ctx.lang).to_string(),
        &format!("/article/{}", article.slug),
    );
    meta.schema = Some(article_schema(article, ctx.lang, &ctx.site.config.site));

    let content = html! {
        article.prose {
            header {
                h1 { (title) }
                @if article.date_updated_shown {
                    p.article-meta {
                        (ctx.t("updatedOn")) " "
                        time datetime=(article.date_updated) { (display_date(article, ctx.lang)) }
                    }
                }
                (category_badges(ctx, &article.categories))
            }
            @if let Some(url) = &article.image_url {
                figure {
                    img src=(url) alt=(title);
                    @if let Some(caption) = &article.image_caption {
                        figcaption { (caption.get(ctx.lang)) }
                    }
                }
            }
            (PreEscaped(render_markdown(article.content.get(ctx.lang))))
        }
    };
    base_document(ctx, &meta, "article", content)
}

/// Minimal page that forwards to `target`.
fn render_redirect(ctx: &PageContext<'_>, target: &str) -> Markup {
    let absolute = absolute_url(ctx.site.base_url(), target);
    html! {
        (DOCTYPE)
        html lang=(ctx.lang.html_lang()) {
            head {
                meta charset="UTF-8";
                meta http-equiv="refresh" content=(format!("0; url={target}"));
                meta name="robots" content="noindex";
                link rel="canonical" href=(absolute);
                title { (ctx.site_name()) }
            }
            body {
                p { a href=(target) { (absolute) } }
            }
        }
    }
}

/// Root `404.html`, with the message in every language.
fn render_not_found(site: &Site) -> Markup {
    let ctx = PageContext {
        site,
        lang: Language::En,
    };
    let meta = PageMeta {
        title: format!("{} | {}", ctx.t("notFoundTitle"), ctx.site_name()),
        description: String::new(),
        route: None,
        robots: Some("noindex"),
        schema: None,
    };
    let content = html! {
        div.not-found {
            @for lang in Language::ALL {
                section lang=(lang.html_lang()) {
                    h1 { (site.translations.text("notFoundTitle", lang)) }
                    p { (site.translations.text("notFoundMessage", lang)) }
                    a.button href=(home_path(lang)) { (site.translations.text("notFoundGoHome", lang)) }
                }
            }
        }
    };
    base_document(&ctx, &meta, "not-found", content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{article, list_item, setup_fixtures};
    use tempfile::TempDir;

    fn fixture_site() -> (TempDir, Site) {
        let tmp = setup_fixtures();
        let site = Site::load_for_year(tmp.path(), None, 2025).unwrap();
        (tmp, site)
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn read(output: &Path, file: &str) -> String {
        fs::read_to_string(output.join(file))
            .unwrap_or_else(|e| panic!("could not read {file}: {e}"))
    }

    // =========================================================================
    // Components
    // =========================================================================

    #[test]
    fn base_document_includes_doctype_and_lang() {
        let (_tmp, site) = fixture_site();
        let ctx = PageContext {
            site: &site,
            lang: Language::Zh,
        };
        let meta = PageMeta::new("T".to_string(), "D".to_string(), "/faq");
        let html = base_document(&ctx, &meta, "faq", html! { p { "test" } }).into_string();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<html lang="zh-Hant">"#));
        assert!(html.contains(r#"<link rel="canonical" href="https://therapy.example.org/zh/faq/">"#));
        assert!(html.contains(r#"hreflang="en" href="https://therapy.example.org/faq/""#));
        assert!(html.contains(r#"<body class="faq">"#));
    }

    #[test]
    fn header_marks_current_nav_item_and_toggles_language() {
        let (_tmp, site) = fixture_site();
        let ctx = PageContext {
            site: &site,
            lang: Language::En,
        };
        let html = site_header(&ctx, Some("/profile")).into_string();

        assert!(html.contains(r#"<a href="/profile/" aria-current="page">Profile</a>"#));
        assert!(html.contains(r#"<a href="/faq/">FAQ</a>"#));
        assert!(html.contains(r#"href="/zh/profile/""#));
        assert!(html.contains(">中文</a>"));
        assert!(html.contains(">Jamie Doe</a>"));
    }

    #[test]
    fn article_card_shows_pinned_badge_and_labels() {
        let (_tmp, site) = fixture_site();
        let ctx = PageContext {
            site: &site,
            lang: Language::Zh,
        };
        let mut item = list_item("coping", "Coping");
        item.pinned = true;
        item.categories = vec!["anxiety".to_string(), "work".to_string()];
        let html = article_card(&ctx, &item).into_string();

        assert!(html.contains(r#"href="/zh/article/coping/""#));
        assert!(html.contains("置頂"));
        assert!(html.contains("焦慮"));
        assert!(html.contains(">work</li>"));
        assert!(html.contains(r#"aria-label="閱讀文章: Coping 中文""#));
    }

    #[test]
    fn home_highlights_follow_title_order() {
        let (_tmp, site) = fixture_site();
        let ctx = PageContext {
            site: &site,
            lang: Language::En,
        };
        let mut zebra = list_item("zebra", "Zebra");
        zebra.frontpage_display = true;
        zebra.pinned = true;
        let mut apple = list_item("apple", "Apple");
        apple.frontpage_display = true;
        let hidden_from_home = list_item("banana", "Banana");
        let html = render_home(&ctx, &[zebra, apple, hidden_from_home], None).into_string();

        let zebra_at = html.find(">Zebra</a>").unwrap();
        let apple_at = html.find(">Apple</a>").unwrap();
        assert!(apple_at < zebra_at);
        assert!(!html.contains("Banana"));
    }

    #[test]
    fn display_date_per_language() {
        let mut item = list_item("a", "A");
        item.date_updated = "2024-03-09".to_string();
        assert_eq!(display_date(&item, Language::En), "March 9, 2024");
        assert_eq!(display_date(&item, Language::Zh), "2024年3月9日");
        item.date_updated = "spring".to_string();
        assert_eq!(display_date(&item, Language::En), "spring");
    }

    #[test]
    fn html_escape_in_maud() {
        let (_tmp, site) = fixture_site();
        let ctx = PageContext {
            site: &site,
            lang: Language::En,
        };
        let item = list_item("x", "<script>alert('xss')</script>");
        let html = article_card(&ctx, &item).into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn article_page_hides_date_when_not_shown() {
        let (_tmp, site) = fixture_site();
        let ctx = PageContext {
            site: &site,
            lang: Language::En,
        };
        let mut a = article("quiet", "Quiet");
        a.summary.date_updated_shown = false;
        let html = render_article(&ctx, &a).into_string();
        assert!(!html.contains("<time"));

        a.summary.date_updated_shown = true;
        let html = render_article(&ctx, &a).into_string();
        assert!(html.contains(r#"<time datetime="2024-01-01">January 1, 2024</time>"#));
    }

    // =========================================================================
    // Full build
    // =========================================================================

    #[test]
    fn generate_writes_every_page_for_both_languages() {
        let (_tmp, site) = fixture_site();
        let out = TempDir::new().unwrap();
        let report = generate_site(&site, out.path(), day()).unwrap();

        // 4 visible articles, 2 per page.
        assert_eq!(report.articles, 4);
        assert_eq!(report.listing_pages, 2);
        assert_eq!(report.count(PageType::Article), 8);
        assert_eq!(report.count(PageType::Listing), 4);
        assert_eq!(report.count(PageType::Home), 2);
        assert_eq!(report.count(PageType::NotFound), 1);

        for file in [
            "index.html",
            "zh/index.html",
            "profile/index.html",
            "zh/faq/index.html",
            "articles/index.html",
            "articles/page/1/index.html",
            "zh/articles/page/2/index.html",
            "article/coping-with-anxiety/index.html",
            "zh/article/burnout-at-work/index.html",
            "404.html",
            "style.css",
            "sitemap.xml",
            "robots.txt",
            "images/coping.gif",
        ] {
            assert!(out.path().join(file).is_file(), "missing {file}");
        }
        assert!(!out.path().join("article/private-draft").exists());
        assert!(!out.path().join("article/broken-entry").exists());
        assert!(!out.path().join("articles/page/3").exists());
        assert_eq!(report.public_files, 2);
    }

    #[test]
    fn listing_pages_follow_default_catalog_state() {
        let (_tmp, site) = fixture_site();
        let out = TempDir::new().unwrap();
        generate_site(&site, out.path(), day()).unwrap();

        let first = read(out.path(), "articles/page/1/index.html");
        let coping = first.find("Coping with Anxiety").unwrap();
        let burnout = first.find("Burnout at Work").unwrap();
        assert!(coping < burnout);
        assert!(!first.contains("Grief and Loss"));
        assert!(first.contains("Articles - Page 1 of 2"));
        assert!(first.contains("Showing 1-2 of 4"));
        assert!(first.contains(r#"<meta name="robots" content="index, follow">"#));
        assert!(first.contains("<title>Articles - Page 1 | Jamie Doe Psychotherapy</title>"));
        assert!(first.contains(r#"href="/articles/page/2/" rel="next""#));

        let second = read(out.path(), "articles/page/2/index.html");
        let grief = second.find("Grief and Loss").unwrap();
        let sleep = second.find("Sleep Hygiene").unwrap();
        assert!(grief < sleep);
        assert!(second.contains("Showing 3-4 of 4"));
        assert!(second.contains("noindex, follow, noarchive, nosnippet"));
        assert!(second.contains(r#""position": 3"#));
    }

    #[test]
    fn listing_toolbar_lists_category_labels() {
        let (_tmp, site) = fixture_site();
        let out = TempDir::new().unwrap();
        generate_site(&site, out.path(), day()).unwrap();

        let zh = read(out.path(), "zh/articles/page/1/index.html");
        assert!(zh.contains("所有類別"));
        assert!(zh.contains(r#"data-category="sleep">睡眠</li>"#));
        assert!(zh.contains(r#"data-category="grief">Grief</li>"#));
    }

    #[test]
    fn home_page_has_banner_highlights_and_mailto() {
        let (_tmp, site) = fixture_site();
        let out = TempDir::new().unwrap();
        generate_site(&site, out.path(), day()).unwrap();

        let home = read(out.path(), "index.html");
        assert!(home.contains("Holiday hours"));
        assert!(home.contains("<strong>December 24 to 26</strong>"));
        assert!(home.contains(r#"data-duration-seconds="8""#));
        assert!(home.contains("mailto:hello@therapy.example.org?subject=Therapy%20inquiry"));
        assert!(home.contains("Coping with Anxiety"));
        assert!(home.contains("Sleep Hygiene"));
        assert!(!home.contains("Burnout at Work"));
        assert!(home.contains(r#""@type": "Service""#));
        assert!(home.contains("© 2025 Jamie Doe"));
    }

    #[test]
    fn article_page_renders_sanitized_markdown_and_schema() {
        let (_tmp, site) = fixture_site();
        let out = TempDir::new().unwrap();
        generate_site(&site, out.path(), day()).unwrap();

        let coping = read(out.path(), "article/coping-with-anxiety/index.html");
        assert!(coping.contains("<h2>Grounding</h2>"));
        assert!(coping.contains(r#"<img src="/images/coping.gif" alt="Coping with Anxiety">"#));
        assert!(coping.contains("<figcaption>A quiet morning</figcaption>"));
        assert!(coping.contains("Updated on"));
        assert!(coping.contains(r#""headline": "Coping with Anxiety""#));

        let burnout = read(out.path(), "article/burnout-at-work/index.html");
        assert!(!burnout.contains("<script>alert"));

        let grief = read(out.path(), "zh/article/grief-and-loss/index.html");
        assert!(grief.contains("哀傷是愛的代價。"));
        assert!(!grief.contains("<time"));
    }

    #[test]
    fn faq_page_embeds_faq_schema() {
        let (_tmp, site) = fixture_site();
        let out = TempDir::new().unwrap();
        generate_site(&site, out.path(), day()).unwrap();

        let faq = read(out.path(), "faq/index.html");
        assert!(faq.contains(r#""@type": "FAQPage""#));
        assert!(faq.contains(r#""name": "How long is a session?""#));
        assert!(faq.contains(r#""name": "Do you offer online sessions?""#));

        let profile = read(out.path(), "profile/index.html");
        assert!(!profile.contains("application/ld+json"));
    }

    #[test]
    fn redirect_and_not_found_pages() {
        let (_tmp, site) = fixture_site();
        let out = TempDir::new().unwrap();
        generate_site(&site, out.path(), day()).unwrap();

        let redirect = read(out.path(), "zh/articles/index.html");
        assert!(redirect.contains(r#"content="0; url=/zh/articles/page/1/""#));

        let not_found = read(out.path(), "404.html");
        assert!(not_found.contains("Page not found"));
        assert!(not_found.contains("找不到頁面"));
        assert!(not_found.contains(r#"href="/zh/""#));
        assert!(not_found.contains(r#"<meta name="robots" content="noindex">"#));
    }

    #[test]
    fn sitemap_lists_visible_articles_only() {
        let (_tmp, site) = fixture_site();
        let out = TempDir::new().unwrap();
        let report = generate_site(&site, out.path(), day()).unwrap();

        let xml = read(out.path(), "sitemap.xml");
        assert!(xml.contains("<loc>https://therapy.example.org/zh/article/sleep-hygiene/</loc>"));
        assert!(xml.contains("<lastmod>2024-06-15</lastmod>"));
        assert!(!xml.contains("private-draft"));
        assert_eq!(report.sitemap_urls, 8 + 2 * 4);
    }

    #[test]
    fn production_build_reuses_loaded_content() {
        let (_tmp, site) = fixture_site();
        let out = TempDir::new().unwrap();
        let report = generate_site(&site, out.path(), day()).unwrap();
        assert!(report.cache.hits > 0);
    }

    #[test]
    fn missing_static_page_fails_build() {
        let (tmp, site) = fixture_site();
        fs::remove_file(tmp.path().join("static-pages/faq.yaml")).unwrap();
        let out = TempDir::new().unwrap();
        let err = generate_site(&site, out.path(), day()).unwrap_err();
        assert!(matches!(err, GenerateError::StaticPage(_)));
    }

    #[test]
    fn empty_catalog_still_has_first_listing_page() {
        let (tmp, site) = fixture_site();
        fs::remove_dir_all(tmp.path().join("articles")).unwrap();
        let out = TempDir::new().unwrap();
        let report = generate_site(&site, out.path(), day()).unwrap();

        assert_eq!(report.listing_pages, 1);
        let page = read(out.path(), "articles/page/1/index.html");
        assert!(page.contains("No articles found."));
        assert!(!page.contains("Page 1 of 1"));
    }
}
