//! Markdown rendering for article bodies, static pages, and the banner.
//!
//! Content is trusted less than code: raw HTML in markdown is escaped and
//! shown as text, except for a short allowlist of inline tags (`<sub>`,
//! `<sup>`, `<br>`). Link targets with a scheme other than `http`, `https`,
//! `mailto`, or `tel` are dropped.

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html as md_html};

const ALLOWED_TAGS: &[&str] = &["sub", "sup", "br"];
const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH
}

/// Render markdown to sanitized HTML.
pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options()).map(sanitize_event);
    let mut html = String::with_capacity(markdown.len() * 3 / 2);
    md_html::push_html(&mut html, parser);
    html
}

fn sanitize_event(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) if !is_allowed_tag(&raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if !is_safe_url(&dest_url) => Event::Start(Tag::Link {
            link_type,
            dest_url: CowStr::Borrowed(""),
            title,
            id,
        }),
        other => other,
    }
}

/// True for a single bare allowlisted tag such as `<sup>`, `</sup>`, `<br />`.
fn is_allowed_tag(raw: &str) -> bool {
    let tag = raw.trim();
    let Some(inner) = tag.strip_prefix('<').and_then(|t| t.strip_suffix('>')) else {
        return false;
    };
    let name = inner
        .trim_start_matches('/')
        .trim_end_matches('/')
        .trim()
        .to_ascii_lowercase();
    ALLOWED_TAGS.contains(&name.as_str())
}

fn is_safe_url(url: &str) -> bool {
    let url = url.trim();
    match url.split_once(':') {
        // A colon after the first `/`, `?` or `#` is not a scheme separator.
        Some((scheme, _)) if !scheme.contains(['/', '?', '#']) => {
            SAFE_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str())
        }
        _ => true,
    }
}

// ============================================================================
// FAQ extraction
// ============================================================================

/// One question and its rendered answer from an FAQ page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqEntry {
    pub question: String,
    /// Sanitized HTML of the blocks following the question heading.
    pub answer_html: String,
}

/// Split FAQ markdown into question/answer pairs.
///
/// Every `###` heading starts a question. The top-level blocks after it, up
/// to the next heading of level 3 or higher, are its answer. A level 1 or 2
/// heading ends the current question without starting a new one. Pairs with
/// an empty question or no answer are dropped.
pub fn extract_faq(markdown: &str) -> Vec<FaqEntry> {
    let mut pairs: Vec<(String, Vec<&str>)> = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;
    let mut question_text: Option<String> = None;
    let mut depth = 0usize;

    for (event, range) in Parser::new_ext(markdown, options()).into_offset_iter() {
        match event {
            Event::Start(tag) => {
                if depth == 0 {
                    match tag {
                        Tag::Heading { level, .. } if level <= HeadingLevel::H3 => {
                            pairs.extend(current.take());
                            if level == HeadingLevel::H3 {
                                question_text = Some(String::new());
                            }
                        }
                        _ => {
                            if let Some((_, blocks)) = current.as_mut() {
                                blocks.push(&markdown[range]);
                            }
                        }
                    }
                }
                depth += 1;
            }
            Event::End(end) => {
                depth = depth.saturating_sub(1);
                if depth == 0 && matches!(end, TagEnd::Heading(_)) {
                    if let Some(text) = question_text.take() {
                        current = Some((text.trim().to_string(), Vec::new()));
                    }
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(q) = question_text.as_mut() {
                    q.push_str(&text);
                }
            }
            Event::Rule if depth == 0 => {
                if let Some((_, blocks)) = current.as_mut() {
                    blocks.push(&markdown[range]);
                }
            }
            _ => {}
        }
    }
    pairs.extend(current);

    pairs
        .into_iter()
        .filter(|(question, blocks)| !question.is_empty() && !blocks.is_empty())
        .map(|(question, blocks)| FaqEntry {
            question,
            answer_html: render_markdown(&blocks.join("\n\n")),
        })
        .collect()
}
