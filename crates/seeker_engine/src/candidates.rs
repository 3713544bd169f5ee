use seeker_logging::{seeker_debug, seeker_info, seeker_warn};

use crate::anchors::{broad_anchor_scan, relaxed_anchor_scan, result_container_scan};
use crate::config::ExtractionConfig;
use crate::dedupe::dedupe_candidates;
use crate::json_scan::scan_json_payloads;
use crate::page::{body_text, document_title, meta_content, PageError, PageSnapshot};
use crate::snippet::fill_missing_snippets;
use crate::text_fallback::parse_text_results;
use crate::types::{Candidate, PageInfo, SearchResultSet};

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("{strategy:?} failed: {source}")]
    Strategy {
        strategy: Strategy,
        #[source]
        source: PageError,
    },
}

/// Discovery strategies in pool priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    ResultContainers,
    EmbeddedJson,
    BroadAnchors,
    TextFallback,
    RelaxedAnchors,
}

impl Strategy {
    /// Fallbacks only run while nothing has been found.
    fn is_fallback(self) -> bool {
        matches!(self, Strategy::TextFallback | Strategy::RelaxedAnchors)
    }
}

#[derive(Debug)]
enum Outcome {
    Found(Vec<Candidate>),
    Empty,
    Failed(ExtractError),
}

enum Step {
    Run(Strategy),
    /// Stop with `loading` if nothing was found and the page is still rendering.
    LoadingCheck,
}

const PIPELINE: &[Step] = &[
    Step::Run(Strategy::ResultContainers),
    Step::Run(Strategy::EmbeddedJson),
    Step::Run(Strategy::BroadAnchors),
    Step::LoadingCheck,
    Step::Run(Strategy::TextFallback),
    Step::Run(Strategy::RelaxedAnchors),
];

/// Pull search results out of a page snapshot.
pub trait ResultExtractor {
    fn extract<P: PageSnapshot>(&self, page: &P, search_term: &str) -> SearchResultSet;
}

/// Runs every discovery strategy in priority order, pools what they find,
/// deduplicates by normalized URL and fills missing snippets.
#[derive(Debug, Clone, Default)]
pub struct CandidateExtractor {
    config: ExtractionConfig,
}

impl CandidateExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    fn run<P: PageSnapshot>(&self, strategy: Strategy, page: &P, search_term: &str) -> Outcome {
        let config = &self.config;
        let result = match strategy {
            Strategy::ResultContainers if config.container_keywords.is_empty() => Ok(Vec::new()),
            Strategy::ResultContainers => result_container_scan(page, config),
            Strategy::EmbeddedJson => Ok(scan_json_payloads(
                page.script_payloads(),
                config.max_json_depth,
            )),
            Strategy::BroadAnchors => broad_anchor_scan(page, config),
            Strategy::TextFallback => body_text(page).map(|text| {
                parse_text_results(&text, search_term, page.page_url(), config)
            }),
            Strategy::RelaxedAnchors => relaxed_anchor_scan(page, search_term, config),
        };
        match result {
            Ok(found) if found.is_empty() => Outcome::Empty,
            Ok(found) => Outcome::Found(found),
            Err(source) => Outcome::Failed(ExtractError::Strategy { strategy, source }),
        }
    }

    fn is_loading<P: PageSnapshot>(&self, page: &P) -> Result<bool, PageError> {
        let placeholders = count_matches(page, &self.config.loading_selectors)?;
        if placeholders == 0 {
            return Ok(false);
        }
        Ok(count_matches(page, &self.config.rendered_content_selectors)? == 0)
    }
}

impl ResultExtractor for CandidateExtractor {
    fn extract<P: PageSnapshot>(&self, page: &P, search_term: &str) -> SearchResultSet {
        let page_info = page_info(page);
        let mut pool: Vec<Candidate> = Vec::new();

        for step in PIPELINE {
            match *step {
                Step::LoadingCheck => {
                    if !pool.is_empty() {
                        continue;
                    }
                    match self.is_loading(page) {
                        Ok(true) => {
                            seeker_warn!("results for '{search_term}' are still rendering");
                            return SearchResultSet::loading(search_term, page_info);
                        }
                        Ok(false) => {}
                        Err(err) => return fail(search_term, &err.to_string()),
                    }
                }
                Step::Run(strategy) => {
                    if strategy.is_fallback() && !pool.is_empty() {
                        continue;
                    }
                    match self.run(strategy, page, search_term) {
                        Outcome::Found(found) => {
                            seeker_debug!("{strategy:?} found {} candidates", found.len());
                            pool.extend(found);
                        }
                        Outcome::Empty => seeker_debug!("{strategy:?} found nothing"),
                        Outcome::Failed(err) => return fail(search_term, &err.to_string()),
                    }
                }
            }
        }

        let mut results = dedupe_candidates(pool, page.page_url());
        results.truncate(self.config.max_results);
        fill_missing_snippets(&mut results);
        let set = SearchResultSet::from_candidates(search_term, results, page_info);
        seeker_info!("search '{search_term}': {} ({})", set.status(), set.message());
        set
    }
}

fn fail(search_term: &str, error: &str) -> SearchResultSet {
    seeker_warn!("search '{search_term}' extraction failed: {error}");
    SearchResultSet::failed(search_term, format!("Extraction failed: {error}"))
}

fn count_matches<P: PageSnapshot>(page: &P, selectors: &[String]) -> Result<usize, PageError> {
    let mut total = 0;
    for selector in selectors {
        total += page.query(selector)?.len();
    }
    Ok(total)
}

/// Title and description of the search page itself. Missing values stay empty.
fn page_info<P: PageSnapshot>(page: &P) -> PageInfo {
    PageInfo {
        title: document_title(page).unwrap_or_default(),
        description: meta_content(page, "description").unwrap_or_default(),
    }
}
