//! Schema.org JSON-LD for article, listing, FAQ, and home pages.

use crate::config::SiteSection;
use crate::i18n::Translations;
use crate::markdown::FaqEntry;
use crate::paths::{absolute_url, article_path, home_path, localized_path};
use crate::types::{Article, ArticleListItem, Language};
use serde_json::{Value, json};

const CONTEXT: &str = "https://schema.org";

/// `Article` schema for a single article page.
pub fn article_schema(article: &Article, lang: Language, site: &SiteSection) -> Value {
    let base_url = site.base_url();
    let mut schema = json!({
        "@context": CONTEXT,
        "@type": "Article",
        "mainEntityOfPage": {
            "@type": "WebPage",
            "@id": absolute_url(base_url, &article_path(&article.slug, lang)),
        },
        "headline": article.title.get(lang),
        "description": article.description.get(lang),
        "author": {
            "@type": "Person",
            "name": site.author,
            "url": absolute_url(base_url, &localized_path("/profile", Language::En)),
        },
        "publisher": {
            "@type": "Organization",
            "name": site.author,
        },
        "datePublished": article.date_updated,
        "dateModified": article.date_updated,
    });
    if let Some(image) = &article.image_url {
        schema["image"] = json!([absolute_url(base_url, image)]);
    }
    schema
}

/// `ItemList` schema for one listing page. Positions continue across pages.
pub fn item_list_schema(
    items: &[&ArticleListItem],
    lang: Language,
    page: usize,
    page_size: usize,
    base_url: &str,
) -> Value {
    let offset = page.saturating_sub(1) * page_size;
    let elements: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            json!({
                "@type": "ListItem",
                "position": offset + i + 1,
                "item": {
                    "@type": "Article",
                    "url": absolute_url(base_url, &article_path(&item.slug, lang)),
                    "name": item.title.get(lang),
                },
            })
        })
        .collect();

    json!({
        "@context": CONTEXT,
        "@type": "ItemList",
        "itemListElement": elements,
    })
}

/// `FAQPage` schema, or `None` when the page has no question/answer pairs.
pub fn faq_schema(entries: &[FaqEntry]) -> Option<Value> {
    if entries.is_empty() {
        return None;
    }
    let questions: Vec<Value> = entries
        .iter()
        .map(|entry| {
            json!({
                "@type": "Question",
                "name": entry.question,
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": entry.answer_html,
                },
            })
        })
        .collect();

    Some(json!({
        "@context": CONTEXT,
        "@type": "FAQPage",
        "mainEntity": questions,
    }))
}

/// `Service` schema for the home page, with the practitioner as provider.
pub fn service_schema(lang: Language, translations: &Translations, site: &SiteSection) -> Value {
    let base_url = site.base_url();
    json!({
        "@context": CONTEXT,
        "@type": "Service",
        "name": translations.text("homePageTitle", lang),
        "description": translations.text("homePageMetaDescription", lang),
        "url": absolute_url(base_url, &home_path(lang)),
        "provider": {
            "@type": "Person",
            "name": site.author,
            "jobTitle": site.job_title,
            "url": absolute_url(base_url, &localized_path("/profile", Language::En)),
            "knowsLanguage": site.known_languages,
        },
        "areaServed": {
            "@type": "Place",
            "name": site.area_served,
        },
        "serviceType": ["Psychotherapy", "Mental Health Service"],
    })
}

/// Serialize `schema` for embedding in a `<script type="application/ld+json">`.
///
/// `</` is escaped so text content cannot close the script element.
pub fn json_ld(schema: &Value) -> String {
    serde_json::to_string_pretty(schema)
        .unwrap_or_default()
        .replace("</", "<\\/")
}
