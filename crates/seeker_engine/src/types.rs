use std::fmt;

use serde::Serialize;

/// Which discovery strategy produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceStrategy {
    ResultContainer,
    EmbeddedJson,
    AnchorScan,
    TextFallback,
    RelaxedAnchor,
}

/// A provisionally discovered search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub title: String,
    pub url: String,
    pub snippet: String,
    #[serde(skip)]
    pub source: SourceStrategy,
    /// Text surrounding the anchor this candidate came from, used when no snippet is known.
    #[serde(skip)]
    pub(crate) context: Option<String>,
}

impl Candidate {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
        source: SourceStrategy,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
            source,
            context: None,
        }
    }

    pub(crate) fn with_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Success,
    NoResults,
    Loading,
    Error,
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStatus::Success => write!(f, "success"),
            SearchStatus::NoResults => write!(f, "no_results"),
            SearchStatus::Loading => write!(f, "loading"),
            SearchStatus::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub title: String,
    pub description: String,
}

/// Outcome of one search extraction. The status is derived from how the
/// result set was built and cannot be assigned by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultSet {
    pub query: String,
    pub results: Vec<Candidate>,
    status: SearchStatus,
    message: String,
    pub page_info: PageInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl SearchResultSet {
    /// `success` when any candidates survived, `no_results` otherwise.
    pub(crate) fn from_candidates(query: &str, results: Vec<Candidate>, page_info: PageInfo) -> Self {
        let (status, message) = if results.is_empty() {
            (SearchStatus::NoResults, "No search results found".to_string())
        } else {
            (
                SearchStatus::Success,
                format!("Found {} search results", results.len()),
            )
        };
        Self {
            query: query.to_string(),
            results,
            status,
            message,
            page_info,
            error: None,
        }
    }

    pub(crate) fn loading(query: &str, page_info: PageInfo) -> Self {
        Self {
            query: query.to_string(),
            results: Vec::new(),
            status: SearchStatus::Loading,
            message: "Page is still loading search results".to_string(),
            page_info,
            error: None,
        }
    }

    /// Result set for a search whose extraction or upstream fetch failed.
    pub fn failed(query: &str, error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            query: query.to_string(),
            results: Vec::new(),
            status: SearchStatus::Error,
            message: error.clone(),
            page_info: PageInfo::default(),
            error: Some(error),
        }
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub level: u8,
    pub text: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TocEntry {
    pub text: String,
    pub section_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDocument {
    pub url: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub content: String,
    pub sections: Vec<Section>,
    pub table_of_contents: Vec<TocEntry>,
    pub references: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ArticleDocument {
    pub fn failed(url: &str, error: impl Into<String>) -> Self {
        Self {
            url: url.to_string(),
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Decode => write!(f, "decode error"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
