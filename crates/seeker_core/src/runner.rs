use std::collections::VecDeque;
use std::sync::Arc;

use chrono::Utc;
use seeker_engine::{scrape_article, search, ExtractionConfig, PageLoader};
use seeker_logging::seeker_info;

use crate::{update, AppState, Effect, Msg};

/// Source of completion timestamps.
pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;

/// Current time as an RFC 3339 UTC string.
pub fn utc_now() -> String {
    Utc::now().to_rfc3339()
}

/// Executes effects against a page loader, one at a time, on the calling thread.
pub struct EffectRunner<L> {
    loader: L,
    config: ExtractionConfig,
    clock: Clock,
}

impl<L: PageLoader> EffectRunner<L> {
    pub fn new(loader: L, config: ExtractionConfig) -> Self {
        Self {
            loader,
            config,
            clock: Arc::new(utc_now),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Perform one effect and report its outcome as a message.
    pub fn run(&self, effect: Effect) -> Msg {
        match effect {
            Effect::RunSearch { job_id, query } => {
                seeker_info!("RunSearch job_id={} query={}", job_id, query);
                let result = search(&self.loader, &self.config, &query);
                Msg::SearchCompleted {
                    job_id,
                    result,
                    finished_utc: (self.clock)(),
                }
            }
            Effect::FetchArticle { job_id, slot, url } => {
                seeker_info!("FetchArticle job_id={} slot={} url={}", job_id, slot, url);
                let article = scrape_article(&self.loader, &self.config, &url);
                Msg::ArticleCompleted {
                    job_id,
                    slot,
                    article,
                    finished_utc: (self.clock)(),
                }
            }
        }
    }

    /// Apply `msg` and keep feeding effect outcomes back into `update` until
    /// nothing is left to do.
    pub fn dispatch(&self, state: AppState, msg: Msg) -> AppState {
        let mut queue = VecDeque::from([msg]);
        let mut state = state;
        while let Some(msg) = queue.pop_front() {
            let (next, effects) = update(state, msg);
            state = next;
            queue.extend(effects.into_iter().map(|effect| self.run(effect)));
        }
        state
    }
}
