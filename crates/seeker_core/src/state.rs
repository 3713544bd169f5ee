use std::collections::BTreeMap;

use seeker_engine::{ArticleDocument, SearchResultSet, SearchStatus};
use seeker_logging::{seeker_debug, seeker_info, seeker_warn};
use serde::Serialize;

use crate::view_model::{AppViewModel, JobStatus, JobView};

pub type JobId = u64;

/// Articles scraped per job unless the request says otherwise.
pub const DEFAULT_MAX_ARTICLES: usize = 3;

/// What a caller asks one job to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub scrape_articles: bool,
    pub max_articles: usize,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            scrape_articles: true,
            max_articles: DEFAULT_MAX_ARTICLES,
        }
    }

    pub fn search_only(query: impl Into<String>) -> Self {
        Self {
            scrape_articles: false,
            ..Self::new(query)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobStage {
    #[default]
    Searching,
    ScrapingArticles,
    Completed,
    Failed,
}

impl JobStage {
    pub fn is_running(self) -> bool {
        matches!(self, JobStage::Searching | JobStage::ScrapingArticles)
    }
}

/// Final output of a finished job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeReport {
    pub search_query: String,
    pub search_results: SearchResultSet,
    pub articles: Vec<ArticleDocument>,
    pub scraped_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Job {
    request: SearchRequest,
    stage: JobStage,
    progress: String,
    error: Option<String>,
    search: Option<SearchResultSet>,
    /// One slot per requested article, filled as scrapes complete.
    articles: Vec<Option<ArticleDocument>>,
    report: Option<ScrapeReport>,
}

impl Job {
    fn new(request: SearchRequest) -> Self {
        Self {
            progress: format!("Searching for \"{}\"...", request.query),
            request,
            stage: JobStage::Searching,
            error: None,
            search: None,
            articles: Vec::new(),
            report: None,
        }
    }

    fn articles_done(&self) -> usize {
        self.articles.iter().filter(|slot| slot.is_some()).count()
    }

    fn finish(&mut self, finished_utc: String) {
        let Some(search) = self.search.take() else {
            return;
        };
        // Articles that failed to scrape are left out of the report.
        let articles = std::mem::take(&mut self.articles)
            .into_iter()
            .flatten()
            .filter(|article| article.error.is_none())
            .collect();
        self.report = Some(ScrapeReport {
            search_query: self.request.query.clone(),
            search_results: search,
            articles,
            scraped_at: finished_utc,
        });
        self.stage = JobStage::Completed;
        self.progress = "Search completed successfully".to_string();
    }
}

/// Every job known to this instance, keyed by id. Ids are never reused.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    jobs: BTreeMap<JobId, Job>,
    last_job_id: JobId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let jobs: Vec<JobView> = self
            .jobs
            .iter()
            .map(|(&job_id, job)| JobView {
                job_id,
                query: job.request.query.clone(),
                stage: job.stage,
                progress: job.progress.clone(),
                error: job.error.clone(),
                result_count: job
                    .report
                    .as_ref()
                    .map(|report| &report.search_results)
                    .or(job.search.as_ref())
                    .map_or(0, |set| set.results.len()),
                articles_done: job.articles_done(),
                articles_total: job.articles.len(),
            })
            .collect();
        AppViewModel {
            running_jobs: jobs.iter().filter(|job| job.stage.is_running()).count(),
            jobs,
            dirty: self.dirty,
        }
    }

    /// Polling view of one job: running flag, progress text, report, error.
    pub fn status(&self, job_id: JobId) -> Option<JobStatus> {
        self.jobs.get(&job_id).map(|job| JobStatus {
            is_running: job.stage.is_running(),
            progress: job.progress.clone(),
            result: job.report.clone(),
            error: job.error.clone(),
        })
    }

    pub fn report(&self, job_id: JobId) -> Option<&ScrapeReport> {
        self.jobs.get(&job_id).and_then(|job| job.report.as_ref())
    }

    /// Returns whether anything changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Register a job for `request`. Blank queries create nothing.
    pub(crate) fn submit(&mut self, mut request: SearchRequest) -> Option<(JobId, String)> {
        request.query = request.query.trim().to_string();
        if request.query.is_empty() {
            seeker_debug!("ignoring blank search submission");
            return None;
        }
        self.last_job_id += 1;
        let job_id = self.last_job_id;
        let query = request.query.clone();
        seeker_info!("job {job_id}: searching for '{query}'");
        self.jobs.insert(job_id, Job::new(request));
        self.dirty = true;
        Some((job_id, query))
    }

    /// Record the search outcome. Returns the articles to scrape as
    /// `(slot, url)` pairs; empty when the job finished here.
    pub(crate) fn apply_search(
        &mut self,
        job_id: JobId,
        result: SearchResultSet,
        finished_utc: String,
    ) -> Vec<(usize, String)> {
        let Some(job) = self.jobs.get_mut(&job_id) else {
            seeker_debug!("search result for unknown job {job_id} dropped");
            return Vec::new();
        };
        if job.stage != JobStage::Searching {
            seeker_debug!("duplicate search result for job {job_id} dropped");
            return Vec::new();
        }
        self.dirty = true;

        if result.status() == SearchStatus::Error {
            let error = result.error().unwrap_or(result.message()).to_string();
            seeker_warn!("job {job_id} failed: {error}");
            job.stage = JobStage::Failed;
            job.progress = "Search failed".to_string();
            job.error = Some(error);
            return Vec::new();
        }

        let targets: Vec<(usize, String)> = if job.request.scrape_articles {
            result
                .results
                .iter()
                .take(job.request.max_articles)
                .map(|candidate| candidate.url.clone())
                .enumerate()
                .collect()
        } else {
            Vec::new()
        };
        let found = result.results.len();
        job.search = Some(result);

        if targets.is_empty() {
            job.finish(finished_utc);
            seeker_info!("job {job_id}: completed with {found} results");
            return targets;
        }
        job.articles = vec![None; targets.len()];
        job.stage = JobStage::ScrapingArticles;
        job.progress = format!(
            "Found {found} results. Scraping up to {} articles...",
            job.request.max_articles
        );
        targets
    }

    /// Record one scraped article; the job finishes once every slot is filled.
    pub(crate) fn apply_article(
        &mut self,
        job_id: JobId,
        slot: usize,
        article: ArticleDocument,
        finished_utc: String,
    ) {
        let Some(job) = self.jobs.get_mut(&job_id) else {
            seeker_debug!("article for unknown job {job_id} dropped");
            return;
        };
        if job.stage != JobStage::ScrapingArticles {
            seeker_debug!("article for job {job_id} arrived outside scraping, dropped");
            return;
        }
        let Some(entry) = job.articles.get_mut(slot).filter(|entry| entry.is_none()) else {
            seeker_debug!("article slot {slot} of job {job_id} invalid or already filled");
            return;
        };
        if let Some(error) = &article.error {
            seeker_warn!("job {job_id}: article {} skipped: {error}", article.url);
        }
        *entry = Some(article);
        self.dirty = true;

        let done = job.articles_done();
        let total = job.articles.len();
        if done == total {
            job.finish(finished_utc);
            seeker_info!("job {job_id}: completed with {total} articles attempted");
        } else {
            job.progress = format!("Scraping article {}/{total}...", done + 1);
        }
    }

    /// Forget a job. Results that arrive for it afterwards are dropped.
    pub(crate) fn clear(&mut self, job_id: JobId) -> bool {
        let removed = self.jobs.remove(&job_id).is_some();
        if removed {
            seeker_info!("job {job_id} cleared");
            self.dirty = true;
        }
        removed
    }
}
