//! Seeker core: per-request search jobs as a pure state machine, plus a
//! synchronous runner that executes their effects.
mod effect;
mod msg;
mod runner;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use runner::{utc_now, Clock, EffectRunner};
pub use state::{AppState, JobId, JobStage, ScrapeReport, SearchRequest, DEFAULT_MAX_ARTICLES};
pub use update::update;
pub use view_model::{AppViewModel, JobStatus, JobView};
