//! `sitemap.xml` with hreflang alternates.
//!
//! Lists the home, profile, FAQ and first listing page in both languages,
//! then both language versions of every listed article. Static pages carry
//! the build date as `lastmod`; articles carry their `date_updated`.

use crate::paths::{absolute_url, article_path, localized_path};
use crate::types::{ArticleListItem, Language};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::fmt::Write as _;

const STATIC_ROUTES: &[&str] = &["/", "/profile", "/faq", "/articles/page/1"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: String,
    /// `(hreflang, href)` pairs, the entry's own language first.
    pub alternates: Vec<(Language, String)>,
}

/// Build sitemap entries. Duplicate `loc`s keep the first entry.
pub fn sitemap_entries(
    base_url: &str,
    articles: &[ArticleListItem],
    today: NaiveDate,
) -> Vec<SitemapEntry> {
    let today = today.format("%Y-%m-%d").to_string();
    let mut entries = Vec::new();

    for lang in Language::ALL {
        for route in STATIC_ROUTES {
            entries.push(entry(base_url, lang, &today, |l| localized_path(route, l)));
        }
    }

    for article in articles {
        let lastmod = article
            .updated_on()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| today.clone());
        for lang in Language::ALL {
            entries.push(entry(base_url, lang, &lastmod, |l| article_path(&article.slug, l)));
        }
    }

    let mut seen = HashSet::new();
    entries.retain(|e| seen.insert(e.loc.clone()));
    entries
}

fn entry(base_url: &str, lang: Language, lastmod: &str, path_for: impl Fn(Language) -> String) -> SitemapEntry {
    SitemapEntry {
        loc: absolute_url(base_url, &path_for(lang)),
        lastmod: lastmod.to_string(),
        alternates: [lang, lang.other()]
            .into_iter()
            .map(|l| (l, absolute_url(base_url, &path_for(l))))
            .collect(),
    }
}

/// Render entries as a sitemap XML document.
pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\"\n        \
         xmlns:xhtml=\"http://www.w3.org/1999/xhtml\">\n",
    );
    for e in entries {
        xml.push_str("  <url>\n");
        let _ = writeln!(xml, "    <loc>{}</loc>", escape_xml(&e.loc));
        let _ = writeln!(xml, "    <lastmod>{}</lastmod>", escape_xml(&e.lastmod));
        for (lang, href) in &e.alternates {
            let _ = writeln!(
                xml,
                "    <xhtml:link rel=\"alternate\" hreflang=\"{}\" href=\"{}\" />",
                lang.code(),
                escape_xml(href)
            );
        }
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
