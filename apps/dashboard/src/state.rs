use std::sync::Arc;

use crate::api_client::RankingApi;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Scoring service client. `HttpRankingApi` in production, a fake in tests.
    pub api: Arc<dyn RankingApi>,
}
