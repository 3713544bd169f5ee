use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SearchSubmitted(request) => match state.submit(request) {
            Some((job_id, query)) => vec![Effect::RunSearch { job_id, query }],
            None => Vec::new(),
        },
        Msg::SearchCompleted {
            job_id,
            result,
            finished_utc,
        } => state
            .apply_search(job_id, result, finished_utc)
            .into_iter()
            .map(|(slot, url)| Effect::FetchArticle { job_id, slot, url })
            .collect(),
        Msg::ArticleCompleted {
            job_id,
            slot,
            article,
            finished_utc,
        } => {
            state.apply_article(job_id, slot, article, finished_utc);
            Vec::new()
        }
        Msg::JobCleared { job_id } => {
            state.clear(job_id);
            Vec::new()
        }
    };

    (state, effects)
}
