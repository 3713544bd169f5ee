use serde::Serialize;

use crate::{JobId, JobStage, ScrapeReport};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub jobs: Vec<JobView>,
    pub running_jobs: usize,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobView {
    pub job_id: JobId,
    pub query: String,
    pub stage: JobStage,
    pub progress: String,
    pub error: Option<String>,
    pub result_count: usize,
    pub articles_done: usize,
    pub articles_total: usize,
}

/// What a poller sees for one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    pub is_running: bool,
    pub progress: String,
    pub result: Option<ScrapeReport>,
    pub error: Option<String>,
}
