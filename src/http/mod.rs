//! Axum surface: the stats query and the registration endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use chrono::{DateTime, Utc};

use crate::tracker::Tracker;

mod cache;
mod handlers;

pub use cache::ResponseCache;

/// Source of "now" for the handlers.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<Tracker>,
    pub cache: Arc<ResponseCache>,
    pub clock: Clock,
}

impl AppState {
    pub fn new(tracker: Tracker, cache_ttl: Duration) -> Self {
        Self {
            tracker: Arc::new(tracker),
            cache: Arc::new(ResponseCache::new(cache_ttl)),
            clock: Arc::new(Utc::now),
        }
    }

    #[cfg(test)]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/summoner", post(handlers::register))
        .route("/summoner/{queue}/{name}/{tag}", get(handlers::queue_stats))
        .with_state(state)
}
