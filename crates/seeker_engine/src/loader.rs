use url::Url;

use seeker_logging::seeker_warn;

use crate::article::{ArticleExtractor, ArticleStructurer};
use crate::candidates::{CandidateExtractor, ResultExtractor};
use crate::config::ExtractionConfig;
use crate::page::HtmlPage;
use crate::types::{ArticleDocument, FailureKind, FetchError, SearchResultSet};

/// Produces page snapshots. Navigation, waiting and transport belong to the
/// implementor; a failed load is reported, never retried here.
pub trait PageLoader {
    fn load(&self, url: &str) -> Result<HtmlPage, FetchError>;
}

/// URL of the search page for `term`.
pub fn search_url(config: &ExtractionConfig, term: &str) -> Result<String, FetchError> {
    let mut url = Url::parse(&config.search_url)
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
    url.query_pairs_mut().clear().append_pair("q", term);
    Ok(url.into())
}

/// Load the search page for `term` and extract its results. A failed load
/// becomes an `error` result set.
pub fn search(loader: &dyn PageLoader, config: &ExtractionConfig, term: &str) -> SearchResultSet {
    let page = search_url(config, term).and_then(|url| loader.load(&url));
    match page {
        Ok(page) => CandidateExtractor::new(config.clone()).extract(&page, term),
        Err(err) => {
            seeker_warn!("search '{term}' could not load: {err}");
            SearchResultSet::failed(term, format!("Search failed: {err}"))
        }
    }
}

/// Load and structure one article. A failed load yields a document holding
/// only the url and the error.
pub fn scrape_article(loader: &dyn PageLoader, config: &ExtractionConfig, url: &str) -> ArticleDocument {
    match loader.load(url) {
        Ok(page) => ArticleStructurer::new(config.clone()).extract_article(&page),
        Err(err) => {
            seeker_warn!("article {url} could not load: {err}");
            ArticleDocument::failed(url, format!("Article scraping failed: {err}"))
        }
    }
}
