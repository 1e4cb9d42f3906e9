//! Home page notification banner (`config/notification.yaml`).
//!
//! ```yaml
//! enabled: true
//! duration_seconds: 8
//! title:
//!   en: Holiday hours
//!   zh: 假期時間
//! description_markdown:
//!   en: The practice is closed **Dec 24–26**.
//!   zh: 診所於 **12月24至26日** 休息。
//! ```
//!
//! The banner is optional. Any problem with the file means no banner, never
//! a failed build.

use crate::markdown::render_markdown;
use crate::types::{Language, LocalizedText};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{error, warn};

/// A banner ready to render: titles as plain text, descriptions as HTML.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: LocalizedText,
    pub description_html: LocalizedText,
    /// Display time; fractional seconds are allowed.
    pub duration_seconds: f64,
}

#[derive(Debug, Deserialize)]
struct RawNotification {
    enabled: Option<bool>,
    #[serde(default)]
    title: LocalizedText,
    #[serde(default)]
    description_markdown: LocalizedText,
    duration_seconds: Option<f64>,
}

/// Load the banner from `<root>/config/notification.yaml`.
///
/// Returns `None` when the file is missing or invalid, when `enabled` is
/// `false`, when `duration_seconds` is missing, not finite or not positive, or when no
/// title or description text is present in either language.
pub fn load_notification(root: &Path) -> Option<Notification> {
    let path = root.join("config").join("notification.yaml");
    if !path.exists() {
        warn!(path = %path.display(), "notification config not found");
        return None;
    }

    let parsed = fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|s| {
            serde_yaml::from_str::<Option<RawNotification>>(&s).map_err(|e| e.to_string())
        });
    let raw = match parsed {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            error!(path = %path.display(), %err, "failed to load notification config");
            return None;
        }
    };

    if raw.enabled == Some(false) {
        return None;
    }
    let duration_seconds = raw
        .duration_seconds
        .filter(|d| d.is_finite() && *d > 0.0)?;

    if raw.title.is_blank() && raw.description_markdown.is_blank() {
        warn!(path = %path.display(), "notification enabled but no content provided");
        return None;
    }

    let description_html = LocalizedText::new(
        &render_description(&raw.description_markdown, Language::En),
        &render_description(&raw.description_markdown, Language::Zh),
    );

    Some(Notification {
        title: raw.title,
        description_html,
        duration_seconds,
    })
}

fn render_description(markdown: &LocalizedText, lang: Language) -> String {
    let text = markdown.get(lang);
    if text.trim().is_empty() {
        String::new()
    } else {
        render_markdown(text)
    }
}
