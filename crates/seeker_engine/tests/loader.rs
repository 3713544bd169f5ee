use std::cell::RefCell;
use std::collections::HashMap;

use pretty_assertions::assert_eq;
use seeker_engine::{
    scrape_article, search, ExtractionConfig, FailureKind, FetchError, HtmlPage, PageError,
    PageLoader, SearchStatus,
};

/// Serves canned pages by URL and remembers what was requested.
#[derive(Default)]
struct FakeLoader {
    pages: HashMap<String, String>,
    requested: RefCell<Vec<String>>,
}

impl FakeLoader {
    fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }
}

impl PageLoader for FakeLoader {
    fn load(&self, url: &str) -> Result<HtmlPage, FetchError> {
        self.requested.borrow_mut().push(url.to_string());
        let html = self
            .pages
            .get(url)
            .ok_or_else(|| FetchError::new(FailureKind::HttpStatus(404), "not found"))?;
        HtmlPage::parse(html, url).map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }
}

/// Fails every load the same way.
struct UnreachableLoader(FailureKind);

impl PageLoader for UnreachableLoader {
    fn load(&self, url: &str) -> Result<HtmlPage, FetchError> {
        Err(FetchError::new(self.0.clone(), format!("{url} unreachable")))
    }
}

#[test]
fn search_loads_the_encoded_search_url() {
    let loader = FakeLoader::default().with_page(
        "https://grokipedia.com/search?q=rust+lang",
        r#"<html><body><a href="/page/Rust">Rust language</a></body></html>"#,
    );

    let set = search(&loader, &ExtractionConfig::browser(), "rust lang");

    assert_eq!(
        loader.requested.borrow().as_slice(),
        ["https://grokipedia.com/search?q=rust+lang".to_string()]
    );
    assert_eq!(set.status(), SearchStatus::Success);
    assert_eq!(set.query, "rust lang");
    assert_eq!(set.results[0].url, "https://grokipedia.com/page/Rust");
}

#[test]
fn failed_search_load_is_reported_in_the_result_set() {
    let set = search(&FakeLoader::default(), &ExtractionConfig::browser(), "rust");

    assert_eq!(set.status(), SearchStatus::Error);
    assert!(set.results.is_empty());
    assert_eq!(set.error(), Some("Search failed: http status 404: not found"));
    assert_eq!(set.message(), "Search failed: http status 404: not found");
}

#[test]
fn invalid_search_url_is_reported_without_loading() {
    let config = ExtractionConfig {
        search_url: "not a url".to_string(),
        ..ExtractionConfig::browser()
    };
    let loader = FakeLoader::default();

    let set = search(&loader, &config, "rust");

    assert!(loader.requested.borrow().is_empty());
    assert_eq!(set.status(), SearchStatus::Error);
    assert!(set.error().unwrap().starts_with("Search failed: invalid url"));
}

#[test]
fn article_is_scraped_through_the_loader() {
    let url = "https://grokipedia.com/page/Rust";
    let loader = FakeLoader::default().with_page(
        url,
        r#"<html><head><title>Rust</title></head><body><article><h1 id="rust">Rust</h1></article></body></html>"#,
    );

    let doc = scrape_article(&loader, &ExtractionConfig::browser(), url);

    assert_eq!(doc.url, url);
    assert_eq!(doc.title, "Rust");
    assert_eq!(doc.sections.len(), 1);
    assert_eq!(doc.error, None);
}

#[test]
fn failed_article_load_keeps_only_url_and_error() {
    let url = "https://grokipedia.com/page/Missing";

    let doc = scrape_article(&FakeLoader::default(), &ExtractionConfig::browser(), url);

    assert_eq!(doc.url, url);
    assert_eq!(doc.title, "");
    assert!(doc.sections.is_empty());
    assert_eq!(
        doc.error.as_deref(),
        Some("Article scraping failed: http status 404: not found")
    );
}

#[test]
fn raw_bytes_are_decoded_before_parsing() {
    let bytes = b"<html><head><meta charset=\"windows-1252\"><title>Caf\xe9</title></head></html>";

    let page = HtmlPage::from_bytes(bytes, None, "https://grokipedia.com/page/Cafe").unwrap();

    assert_eq!(seeker_engine::document_title(&page).unwrap(), "Caf\u{e9}");
}

#[test]
fn invalid_utf8_declared_as_utf8_is_a_decode_error() {
    let result = HtmlPage::from_bytes(
        b"<html><title>\xff\xfe broken</title></html>",
        Some("text/html; charset=utf-8"),
        "https://grokipedia.com/page/Broken",
    );

    assert!(matches!(result, Err(PageError::Decode(_))));
}

#[test]
fn transport_failures_keep_their_kind_in_the_error() {
    let config = ExtractionConfig::browser();

    let timed_out = search(&UnreachableLoader(FailureKind::Timeout), &config, "rust");
    let refused = scrape_article(
        &UnreachableLoader(FailureKind::Network),
        &config,
        "https://grokipedia.com/page/Rust",
    );

    assert_eq!(
        timed_out.error(),
        Some("Search failed: timeout: https://grokipedia.com/search?q=rust unreachable")
    );
    assert_eq!(
        refused.error.as_deref(),
        Some("Article scraping failed: network error: https://grokipedia.com/page/Rust unreachable")
    );
}
