//! Article slug validation.
//!
//! A slug is the name of an article's directory under `articles/` and the
//! last segment of its URL (`/article/<slug>/`). Only ASCII letters, digits,
//! `_` and `-` are allowed, so a slug can never escape the articles
//! directory or need URL escaping.

/// True if `slug` is non-empty and matches `^[A-Za-z0-9_-]+$`.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_letters_digits_dash_underscore() {
        assert!(is_valid_slug("coping-with-anxiety"));
        assert!(is_valid_slug("CBT_101"));
        assert!(is_valid_slug("2024"));
    }

    #[test]
    fn rejects_empty() {
        assert!(!is_valid_slug(""));
    }

    #[test]
    fn rejects_path_traversal() {
        assert!(!is_valid_slug(".."));
        assert!(!is_valid_slug("../secrets"));
        assert!(!is_valid_slug("a/b"));
    }

    #[test]
    fn rejects_spaces_and_non_ascii() {
        assert!(!is_valid_slug("two words"));
        assert!(!is_valid_slug("焦慮"));
        assert!(!is_valid_slug("café"));
    }
}
