//! End-to-end build of the fixture content root.

use practice_site::config::RuntimeMode;
use practice_site::generate::{PageType, generate};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

fn fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    for entry in WalkDir::new(&source) {
        let entry = entry.unwrap();
        let relative = entry.path().strip_prefix(&source).unwrap();
        let target = tmp.path().join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).unwrap();
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
    tmp
}

fn html_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "html"))
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}

#[test]
fn build_writes_bilingual_site() {
    let content = fixtures();
    let out = TempDir::new().unwrap();
    let report = generate(content.path(), out.path(), None).unwrap();

    assert_eq!(
        html_files(out.path()),
        vec![
            "404.html",
            "article/burnout-at-work/index.html",
            "article/coping-with-anxiety/index.html",
            "article/grief-and-loss/index.html",
            "article/sleep-hygiene/index.html",
            "articles/index.html",
            "articles/page/1/index.html",
            "articles/page/2/index.html",
            "faq/index.html",
            "index.html",
            "profile/index.html",
            "zh/article/burnout-at-work/index.html",
            "zh/article/coping-with-anxiety/index.html",
            "zh/article/grief-and-loss/index.html",
            "zh/article/sleep-hygiene/index.html",
            "zh/articles/index.html",
            "zh/articles/page/1/index.html",
            "zh/articles/page/2/index.html",
            "zh/faq/index.html",
            "zh/index.html",
            "zh/profile/index.html",
        ]
    );
    assert_eq!(report.pages.len(), 21);
    assert_eq!(report.count(PageType::Article), 8);
}

#[test]
fn chinese_pages_link_within_chinese_site() {
    let content = fixtures();
    let out = TempDir::new().unwrap();
    generate(content.path(), out.path(), None).unwrap();

    let page = fs::read_to_string(out.path().join("zh/articles/page/1/index.html")).unwrap();
    assert!(page.contains(r#"<html lang="zh-Hant">"#));
    assert!(page.contains(r#"href="/zh/article/coping-with-anxiety/""#));
    assert!(page.contains("應對焦慮"));
    assert!(page.contains("第 1 / 2 頁"));
    // language toggle points at the English version of the same page
    assert!(page.contains(r#"href="/articles/page/1/" hreflang="en""#));
}

#[test]
fn development_build_matches_production_output() {
    let content = fixtures();
    let prod = TempDir::new().unwrap();
    let dev = TempDir::new().unwrap();

    let prod_report = generate(content.path(), prod.path(), None).unwrap();
    let dev_report = generate(content.path(), dev.path(), Some(RuntimeMode::Development)).unwrap();

    assert_eq!(dev_report.cache.hits, 0);
    assert!(prod_report.cache.hits > 0);
    for file in html_files(prod.path()) {
        let a = fs::read_to_string(prod.path().join(&file)).unwrap();
        let b = fs::read_to_string(dev.path().join(&file)).unwrap();
        assert_eq!(a, b, "{file} differs between modes");
    }
}

#[test]
fn invalid_config_stops_the_build() {
    let content = fixtures();
    fs::write(
        content.path().join("config.toml"),
        "[site]\nbase_url = \"ftp://nope\"\n",
    )
    .unwrap();
    let out = TempDir::new().unwrap();
    assert!(generate(content.path(), out.path(), None).is_err());
    assert!(!out.path().join("index.html").exists());
}
