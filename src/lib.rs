//! # Practice Site
//!
//! A static site generator for a bilingual (English / Traditional Chinese)
//! psychotherapy practice. Articles, static pages, and UI strings live in
//! YAML files; every build writes the English site at `/` and the Chinese
//! site at `/zh/`.
//!
//! # Architecture
//!
//! ```text
//! content/  →  Site (config, translations, ContentStore)  →  generate  →  dist/
//! ```
//!
//! Three small cores sit under the generator:
//!
//! - **Content store**: reads `articles/<slug>/{metadata,content}.yaml` into
//!   typed records, drops hidden or malformed articles, and keeps a canonical
//!   order (pinned first, newest first).
//! - **Catalog**: filters by category, pulls pinned or frontpage articles to
//!   the front, sorts titles accent- and case-insensitively (pinyin order
//!   for Chinese), and paginates.
//! - **Translations**: resolves keys to per-language strings with a fallback
//!   and `{placeholder}` substitution.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | `Language`, `LocalizedText`, article records |
//! | [`slug`] | Slug validation for article directories |
//! | [`content`] | `ContentStore`: listing and per-slug article loading |
//! | [`cache`] | Per-build memoization of loaded content |
//! | [`catalog`] | Filter, sort, paginate; listing control state |
//! | [`i18n`] | Translation loading, lookup, and substitution |
//! | [`config`] | `config.toml` layering and validation, pagination config |
//! | [`static_pages`] | Profile and FAQ pages |
//! | [`notification`] | Home page banner |
//! | [`markdown`] | Sanitized markdown rendering and FAQ extraction |
//! | [`paths`] | Localized routes, absolute URLs, mail links |
//! | [`seo`] | Schema.org JSON-LD |
//! | [`sitemap`] | `sitemap.xml` with hreflang alternates |
//! | [`site`] | Everything loaded from one content root |
//! | [`generate`] | HTML output with Maud |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Content Errors Stay Local
//!
//! A broken article never breaks a build. The store logs the problem and
//! leaves that one article out of the listing; a direct lookup answers
//! not-found. Site configuration and the static pages are different: a bad
//! `config.toml` or a missing `faq.yaml` stops the build with an error.
//!
//! ## Static Listing Pages
//!
//! The generator writes one listing page per catalog page in the default
//! state. Filtering and alternative sort orders are the same [`catalog`]
//! functions, reachable from the `list` command.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod content;
pub mod generate;
pub mod i18n;
pub mod markdown;
pub mod notification;
pub mod output;
pub mod paths;
pub mod seo;
pub mod site;
pub mod sitemap;
pub mod slug;
pub mod static_pages;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
