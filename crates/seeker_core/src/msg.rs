use seeker_engine::{ArticleDocument, SearchResultSet};

use crate::{JobId, SearchRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Start a new job. Blank queries are ignored.
    SearchSubmitted(SearchRequest),
    /// Search extraction finished for a job.
    SearchCompleted {
        job_id: JobId,
        result: SearchResultSet,
        finished_utc: String,
    },
    /// One article of a job was scraped.
    ArticleCompleted {
        job_id: JobId,
        slot: usize,
        article: ArticleDocument,
        finished_utc: String,
    },
    /// Drop a job and its report.
    JobCleared { job_id: JobId },
}
