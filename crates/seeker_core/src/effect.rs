use crate::JobId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Load the search page for `query` and extract its results.
    RunSearch { job_id: JobId, query: String },
    /// Scrape one result article; `slot` is its position in the report.
    FetchArticle {
        job_id: JobId,
        slot: usize,
        url: String,
    },
}
