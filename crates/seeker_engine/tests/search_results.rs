use std::sync::Once;

use pretty_assertions::assert_eq;
use seeker_engine::{
    CandidateExtractor, ExtractionConfig, HtmlPage, ResultExtractor, SearchResultSet, SearchStatus,
    SourceStrategy,
};

const SEARCH_URL: &str = "https://grokipedia.com/search?q=rust";

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(seeker_logging::initialize_for_tests);
}

fn extract_with(config: ExtractionConfig, html: &str, term: &str) -> SearchResultSet {
    init_logging();
    let page = HtmlPage::parse(html, SEARCH_URL).unwrap();
    CandidateExtractor::new(config).extract(&page, term)
}

fn extract(html: &str, term: &str) -> SearchResultSet {
    extract_with(ExtractionConfig::browser(), html, term)
}

fn urls(set: &SearchResultSet) -> Vec<&str> {
    set.results.iter().map(|c| c.url.as_str()).collect()
}

#[test]
fn qualifying_anchors_are_capped_and_disqualified_ones_dropped() {
    let disqualified = [
        r##"<a href="#top">Back to top</a>"##,
        r#"<a href="javascript:void(0)">Click here</a>"#,
        r#"<a href="mailto:team@grokipedia.com">Email us</a>"#,
        r#"<a href="/legal/terms">Terms of use</a>"#,
        r#"<a href="/images/logo.png">Logo image</a>"#,
        r#"<a href="/LOGIN">Sign in now</a>"#,
        r#"<a href="/toggle-theme">Dark mode</a>"#,
        r#"<a href="https://other.org/about">Elsewhere</a>"#,
        r#"<a href="/page/X">X</a>"#,
    ];
    let qualifying: Vec<String> = (0..25)
        .map(|i| format!(r#"<p><a href="/page/Topic_{i}">Topic {i}</a></p>"#))
        .collect();
    let html = format!(
        "<html><body><div>{}</div><div>{}</div></body></html>",
        disqualified.join(""),
        qualifying.join("")
    );

    let set = extract(&html, "rust");

    assert_eq!(set.status(), SearchStatus::Success);
    assert_eq!(set.results.len(), 20);
    let expected: Vec<String> = (0..20)
        .map(|i| format!("https://grokipedia.com/page/Topic_{i}"))
        .collect();
    assert_eq!(urls(&set), expected.iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(set.message(), "Found 20 search results");
    for bad in ["#top", "javascript:", "mailto:", "/legal/", "/images/", "LOGIN", "toggle", "other.org"] {
        assert!(urls(&set).iter().all(|url| !url.contains(bad)), "{bad} leaked");
    }
}

#[test]
fn urls_differing_by_case_or_trailing_slash_collapse_to_first_seen() {
    let html = r#"<html><body>
        <a href="https://GROKIPEDIA.com/page/Rust/">Rust language</a>
        <a href="/page/Rust">Rust again</a>
        <a href="HTTPS://grokipedia.com/page/Rust">Rust third time</a>
        <a href="/page/rust">Lowercase rust</a>
    </body></html>"#;

    let set = extract(html, "rust");

    assert_eq!(set.results.len(), 2);
    assert_eq!(set.results[0].title, "Rust language");
    assert_eq!(set.results[0].url, "https://GROKIPEDIA.com/page/Rust/");
    assert_eq!(set.results[1].url, "https://grokipedia.com/page/rust");
}

#[test]
fn extraction_is_idempotent() {
    let html = r#"<html><head><title>rust - Search</title>
        <script type="application/json">{"props":{"results":[{"title":"From JSON","url":"/page/Json"}]}}</script>
        </head><body><div class="search-results"><a href="/page/Rust">Rust</a> the language</div>
        <a href="/page/Cargo">Cargo</a></body></html>"#;
    let page = HtmlPage::parse(html, SEARCH_URL).unwrap();
    let extractor = CandidateExtractor::default();

    let first = extractor.extract(&page, "rust");
    let second = extractor.extract(&page, "rust");

    assert_eq!(first, second);
    assert_eq!(first.results.len(), 3);
}

#[test]
fn pool_order_follows_strategy_priority() {
    let html = r#"<html><head>
        <script type="application/json">{"data":[{"title":"Embedded","url":"/page/Embedded"}]}</script>
        </head><body>
        <a href="/page/Loose">Loose link</a>
        <ul class="result-list"><li><a href="/page/Boxed">Boxed result</a></li></ul>
        </body></html>"#;

    let set = extract(html, "rust");

    let order: Vec<(&str, SourceStrategy)> = set
        .results
        .iter()
        .map(|c| (c.title.as_str(), c.source))
        .collect();
    assert_eq!(
        order,
        vec![
            ("Boxed result", SourceStrategy::ResultContainer),
            ("Embedded", SourceStrategy::EmbeddedJson),
            ("Loose link", SourceStrategy::AnchorScan),
        ]
    );
    assert_eq!(set.results[1].url, "https://grokipedia.com/page/Embedded");
}

#[test]
fn empty_page_reports_no_results() {
    let html = r#"<html><head><title>Search</title>
        <script type="application/json">{"config":{"theme":"dark"}}</script>
        </head><body><p>Nothing matched your query.</p></body></html>"#;

    let set = extract(html, "rust");

    assert_eq!(set.status(), SearchStatus::NoResults);
    assert!(set.results.is_empty());
    assert_eq!(set.message(), "No search results found");
    assert_eq!(set.error(), None);
}

#[test]
fn skeleton_placeholders_short_circuit_as_loading() {
    let html = r#"<html><body>
        <div class="animate-pulse h-4"></div><div class="animate-pulse h-4"></div>
        <div>Search yielded 2 results:</div><div>Never reached</div>
    </body></html>"#;

    let set = extract(html, "rust");

    assert_eq!(set.status(), SearchStatus::Loading);
    assert!(set.results.is_empty());
    assert_eq!(set.message(), "Page is still loading search results");
}

#[test]
fn embedded_json_wins_over_loading_placeholders() {
    let html = r#"<html><head>
        <script type="application/json">{"results":[{"name":"Rust","link":"/page/Rust","snippet":"A language"}]}</script>
        </head><body><div class="animate-pulse"></div></body></html>"#;

    let set = extract(html, "rust");

    assert_eq!(set.status(), SearchStatus::Success);
    assert_eq!(set.results[0].snippet, "A language");
}

#[test]
fn plain_text_results_are_used_when_nothing_structural_exists() {
    let html = r#"<html><body>
        <div>Search for "rust" yielded 3 results:</div>
        <div>Rust (programming language)</div>
        <div>2</div>
        <div>Rustacean</div>
        <div>Next</div>
    </body></html>"#;

    let set = extract(html, "rust");

    assert_eq!(set.status(), SearchStatus::Success);
    let titles: Vec<&str> = set.results.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Rust (programming language)", "Rustacean"]);
    assert_eq!(
        set.results[0].url,
        "https://grokipedia.com/page/Rust_programming_language"
    );
    assert_eq!(set.results[0].snippet, "Search result for 'rust'");
}

#[test]
fn relaxed_scan_finds_term_in_offsite_links_with_context() {
    let html = r#"<html><body>
        <p>Read more: <a href="https://blog.example.org/posts/intro">An introduction to Rust programming</a> today</p>
        <p><a href="https://blog.example.org/posts/other">Something unrelated entirely</a></p>
    </body></html>"#;

    let set = extract(html, "RUST");

    assert_eq!(set.results.len(), 1);
    let hit = &set.results[0];
    assert_eq!(hit.url, "https://blog.example.org/posts/intro");
    assert_eq!(hit.source, SourceStrategy::RelaxedAnchor);
    assert_eq!(hit.snippet, "Read more:  today");
}

#[test]
fn anchors_without_snippet_get_surrounding_context() {
    let html = r#"<html><body><ul>
        <li><a href="/page/Rust">Rust</a> - a systems language</li>
        <li><a href="/page/Go">Golang</a></li>
    </ul></body></html>"#;

    let set = extract(html, "rust");

    assert_eq!(set.results[0].snippet, "- a systems language");
    assert!(set.results[1].snippet.starts_with("Rust - a systems language"));
}

#[test]
fn later_duplicate_backfills_missing_snippet() {
    let html = r#"<html><head>
        <script type="application/json">{"results":[{"title":"Rust (JSON)","url":"https://grokipedia.com/page/Rust","description":"From JSON"}]}</script>
        </head><body><div class="results"><a href="/page/Rust">Rust</a></div></body></html>"#;

    let set = extract(html, "rust");

    assert_eq!(set.results.len(), 1);
    assert_eq!(set.results[0].title, "Rust");
    assert_eq!(set.results[0].snippet, "From JSON");
}

#[test]
fn page_info_comes_from_title_and_description() {
    let html = r#"<html><head><title>rust - Grokipedia</title>
        <meta name="description" content="Search the encyclopedia"></head>
        <body></body></html>"#;

    let set = extract(html, "rust");

    assert_eq!(set.page_info.title, "rust - Grokipedia");
    assert_eq!(set.page_info.description, "Search the encyclopedia");
}

#[test]
fn broken_configured_selector_degrades_to_error_status() {
    let config = ExtractionConfig {
        loading_selectors: vec!["div[".to_string()],
        ..ExtractionConfig::browser()
    };

    let set = extract_with(config, "<html><body><p>empty</p></body></html>", "rust");

    assert_eq!(set.status(), SearchStatus::Error);
    assert!(set.results.is_empty());
    assert!(set.error().unwrap().contains("invalid selector"));
    assert!(set.message().starts_with("Extraction failed"));
}

#[test]
fn static_preset_ignores_short_link_texts() {
    let html = r#"<html><body>
        <a href="/page/Go">Go lang</a>
        <a href="/page/Rust_programming_language">Rust programming language</a>
    </body></html>"#;

    let browser = extract(html, "rust");
    let static_html = extract_with(ExtractionConfig::static_html(), html, "rust");

    assert_eq!(browser.results.len(), 2);
    assert_eq!(static_html.results.len(), 1);
    assert_eq!(static_html.results[0].title, "Rust programming language");
}

#[test]
fn result_set_serializes_with_stable_field_names() {
    let html = r#"<html><head><title>T</title></head><body><a href="/page/Rust">Rust</a></body></html>"#;

    let value = serde_json::to_value(extract(html, "rust")).unwrap();

    assert_eq!(value["query"], "rust");
    assert_eq!(value["status"], "success");
    assert_eq!(value["pageInfo"]["title"], "T");
    assert_eq!(value["results"][0]["url"], "https://grokipedia.com/page/Rust");
    assert!(value["results"][0].get("source").is_none());
    assert!(value.get("error").is_none());
}

#[test]
fn rendered_result_class_matches_regardless_of_case() {
    let html = r#"<html><body>
        <div class="animate-pulse"></div>
        <div class="SearchResults"><p>Nothing matched your query.</p></div>
    </body></html>"#;

    let set = extract(html, "rust");

    assert_eq!(set.status(), SearchStatus::NoResults);
}
