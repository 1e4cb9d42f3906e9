//! Shared test utilities for the practice-site test suite.
//!
//! Provides record builders, content-tree fixture writers, and lookup helpers
//! that work with the loaded content types (`ArticleListItem`, `Article`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let store = ContentStore::new(tmp.path(), ContentCache::default());
//! let items = store.list_items();
//!
//! let item = find_item(&items, "coping-with-anxiety");
//! assert!(item.pinned);
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::types::{Article, ArticleListItem, LocalizedText};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

// =========================================================================
// Article fixtures
// =========================================================================

/// Builder for an on-disk article directory.
///
/// Titles get a Chinese variant of `"<title> 中文"`, the body is
/// `"<title> body text"`.
#[derive(Debug, Clone)]
pub struct ArticleFixture {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub categories: Vec<String>,
    pub pinned: bool,
    pub frontpage: bool,
    pub hidden: bool,
    pub image: Option<String>,
}

impl ArticleFixture {
    pub fn new(slug: &str, title: &str) -> Self {
        Self {
            slug: slug.to_string(),
            title: title.to_string(),
            date: "2024-01-01".to_string(),
            categories: Vec::new(),
            pinned: false,
            frontpage: false,
            hidden: false,
            image: None,
        }
    }

    pub fn date(mut self, date: &str) -> Self {
        self.date = date.to_string();
        self
    }

    pub fn categories(mut self, categories: &[&str]) -> Self {
        self.categories = categories.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }

    pub fn frontpage(mut self) -> Self {
        self.frontpage = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn image(mut self, url: &str) -> Self {
        self.image = Some(url.to_string());
        self
    }
}

/// Write `articles/<slug>/metadata.yaml` and `content.yaml` under `root`.
pub fn write_article(root: &Path, fixture: &ArticleFixture) {
    let categories = if fixture.categories.is_empty() {
        "[]".to_string()
    } else {
        format!("[{}]", fixture.categories.join(", "))
    };
    let metadata = format!(
        "title:\n  en: \"{title}\"\n  zh: \"{title} 中文\"\n\
         description:\n  en: \"About {title}\"\n  zh: \"關於 {title}\"\n\
         categories: {categories}\n\
         pinned: {pinned}\n\
         frontpage_display: {frontpage}\n\
         hidden: {hidden}\n\
         date_updated: \"{date}\"\n\
         date_updated_shown: true\n",
        title = fixture.title,
        categories = categories,
        pinned = fixture.pinned,
        frontpage = fixture.frontpage,
        hidden = fixture.hidden,
        date = fixture.date,
    );

    let mut content = format!(
        "content:\n  en: |\n    {title} body text.\n  zh: |\n    {title} 正文。\n",
        title = fixture.title
    );
    if let Some(url) = &fixture.image {
        content.push_str(&format!(
            "imageUrl: \"{url}\"\nimageCaption:\n  en: Image caption\n  zh: 圖片說明\n"
        ));
    }

    let dir = format!("articles/{}", fixture.slug);
    write_file(root, &format!("{dir}/metadata.yaml"), &metadata);
    write_file(root, &format!("{dir}/content.yaml"), &content);
}

// =========================================================================
// In-memory records
// =========================================================================

/// A visible, unpinned list item dated 2024-01-01.
pub fn list_item(slug: &str, title_en: &str) -> ArticleListItem {
    ArticleListItem {
        slug: slug.to_string(),
        title: LocalizedText::new(title_en, &format!("{title_en} 中文")),
        description: LocalizedText::new(&format!("About {title_en}"), &format!("關於 {title_en}")),
        categories: Vec::new(),
        pinned: false,
        frontpage_display: false,
        date_updated: "2024-01-01".to_string(),
        date_updated_shown: true,
        hidden: false,
    }
}

/// A list item with the given categories.
pub fn categorized_item(slug: &str, title_en: &str, categories: &[&str]) -> ArticleListItem {
    ArticleListItem {
        categories: categories.iter().map(|c| c.to_string()).collect(),
        ..list_item(slug, title_en)
    }
}

/// A full article wrapping [`list_item`].
pub fn article(slug: &str, title_en: &str) -> Article {
    Article {
        summary: list_item(slug, title_en),
        content: LocalizedText::new(&format!("{title_en} body text."), &format!("{title_en} 正文。")),
        image_url: None,
        image_caption: None,
    }
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find a list item by slug. Panics if not found.
pub fn find_item<'a>(items: &'a [ArticleListItem], slug: &str) -> &'a ArticleListItem {
    items.iter().find(|i| i.slug == slug).unwrap_or_else(|| {
        let slugs = slugs(items);
        panic!("article '{slug}' not found. Available: {slugs:?}")
    })
}

/// All slugs in list order.
pub fn slugs(items: &[ArticleListItem]) -> Vec<&str> {
    items.iter().map(|i| i.slug.as_str()).collect()
}

/// All titles in `lang`, in list order.
pub fn titles(items: &[ArticleListItem], lang: crate::types::Language) -> Vec<&str> {
    items.iter().map(|i| i.title.get(lang)).collect()
}
