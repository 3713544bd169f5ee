//! Seeker engine: search-result and article extraction over page snapshots.
mod anchors;
mod article;
mod candidates;
mod config;
mod decode;
mod dedupe;
mod json_scan;
mod loader;
mod page;
mod snippet;
mod text;
mod text_fallback;
mod types;

pub use anchors::{broad_anchor_scan, relaxed_anchor_scan, result_container_scan};
pub use article::{ArticleExtractor, ArticleStructurer};
pub use candidates::{CandidateExtractor, ExtractError, ResultExtractor, Strategy};
pub use config::{ConfigError, ExtractionConfig};
pub use decode::{decode_html, DecodeError, DecodedHtml};
pub use dedupe::{absolutize_url, dedupe_candidates, dedupe_key};
pub use json_scan::{scan_json_payload, scan_json_payloads};
pub use loader::{scrape_article, search, search_url, PageLoader};
pub use page::{
    body_text, document_title, meta_content, HtmlElement, HtmlPage, PageElement, PageError,
    PageSnapshot,
};
pub use snippet::{element_context, snippet_from_context};
pub use text_fallback::parse_text_results;
pub use types::{
    ArticleDocument, Candidate, FailureKind, FetchError, PageInfo, SearchResultSet, SearchStatus,
    Section, SourceStrategy, TocEntry,
};
