//! URL paths for every page of the site.
//!
//! English pages live at the root, Chinese pages under `/zh/`. Every page
//! path ends in a slash because each page is written as `<dir>/index.html`.

use crate::i18n::Translations;
use crate::types::Language;

/// Localize `base` (`"/"`, `"/profile"`, `"/articles/page/1"`) for `lang`.
///
/// ```
/// use practice_site::paths::localized_path;
/// use practice_site::types::Language;
///
/// assert_eq!(localized_path("/profile", Language::En), "/profile/");
/// assert_eq!(localized_path("/profile", Language::Zh), "/zh/profile/");
/// assert_eq!(localized_path("/", Language::Zh), "/zh/");
/// ```
pub fn localized_path(base: &str, lang: Language) -> String {
    let slashed = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    };
    match lang {
        Language::En => slashed,
        Language::Zh if slashed == "/" => "/zh/".to_string(),
        Language::Zh => format!("/zh/{}", slashed.trim_start_matches('/')),
    }
}

pub fn home_path(lang: Language) -> String {
    localized_path("/", lang)
}

pub fn article_path(slug: &str, lang: Language) -> String {
    localized_path(&format!("/article/{slug}"), lang)
}

/// The article listing page `page` (1-based).
pub fn articles_page_path(page: usize, lang: Language) -> String {
    localized_path(&format!("/articles/page/{page}"), lang)
}

pub fn articles_index_path(lang: Language) -> String {
    localized_path("/articles", lang)
}

/// Join an absolute site path onto `base_url`.
pub fn absolute_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Output file for a page path, relative to the output root.
///
/// `"/zh/profile/"` becomes `"zh/profile/index.html"`.
pub fn index_file(path: &str) -> String {
    let dir = path.trim_matches('/');
    if dir.is_empty() {
        "index.html".to_string()
    } else {
        format!("{dir}/index.html")
    }
}

/// `mailto:` link for the hero inquiry button, with a subject and body from
/// the `heroMailSubject` / `heroMailBodyTemplate` translations.
pub fn inquiry_mailto(email: &str, translations: &Translations, lang: Language) -> String {
    let subject = translations.text("heroMailSubject", lang);
    let body = translations.text("heroMailBodyTemplate", lang);
    format!(
        "mailto:{email}?subject={}&body={}",
        urlencoding::encode(subject),
        urlencoding::encode(body)
    )
}
