/// Scoring service client — the single point of entry for backend calls.
///
/// The controller only sees the `RankingApi` trait; `HttpRankingApi` is the
/// production implementation and tests substitute a scripted fake.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::candidate::{AnalyzeRequest, ApiEnvelope, RankingRequest};

pub const ANALYZE_PATH: &str = "/api/analyze";
pub const RANKING_PATH: &str = "/api/ranking";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Backend operations the ranking controller depends on.
#[async_trait]
pub trait RankingApi: Send + Sync {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<ApiEnvelope, ApiError>;

    async fn rank(&self, request: &RankingRequest) -> Result<ApiEnvelope, ApiError>;
}

/// reqwest-backed client for the scoring service.
#[derive(Clone)]
pub struct HttpRankingApi {
    client: Client,
    base_url: String,
}

impl HttpRankingApi {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POSTs a JSON body and parses the reply as an envelope whatever the status code.
    async fn post_json<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiEnvelope, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        let envelope: ApiEnvelope = serde_json::from_str(&text).map_err(|e| {
            warn!("Scoring service returned non-JSON body (status {status}): {e}");
            ApiError::Parse(e)
        })?;

        debug!("POST {url} -> {status}, success={}", envelope.success);
        Ok(envelope)
    }
}

#[async_trait]
impl RankingApi for HttpRankingApi {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<ApiEnvelope, ApiError> {
        self.post_json(ANALYZE_PATH, request).await
    }

    async fn rank(&self, request: &RankingRequest) -> Result<ApiEnvelope, ApiError> {
        self.post_json(RANKING_PATH, request).await
    }
}

#[cfg(test)]
pub mod fake {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// A recorded backend call.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Analyze(AnalyzeRequest),
        Rank(RankingRequest),
    }

    /// Scripted stand-in for the scoring service. Replies are consumed in order;
    /// `None` simulates an unreachable or non-JSON backend.
    #[derive(Default)]
    pub struct FakeApi {
        replies: Mutex<VecDeque<Option<ApiEnvelope>>>,
        calls: Mutex<Vec<Call>>,
    }

    impl FakeApi {
        pub fn replying(reply: ApiEnvelope) -> Self {
            let api = Self::default();
            api.push(Some(reply));
            api
        }

        pub fn unreachable() -> Self {
            let api = Self::default();
            api.push(None);
            api
        }

        pub fn push(&self, reply: Option<ApiEnvelope>) {
            self.replies.lock().unwrap().push_back(reply);
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn next_reply(&self, call: Call) -> Result<ApiEnvelope, ApiError> {
            self.calls.lock().unwrap().push(call);
            match self.replies.lock().unwrap().pop_front().flatten() {
                Some(envelope) => Ok(envelope),
                None => Err(ApiError::Parse(
                    serde_json::from_str::<ApiEnvelope>("<html>").unwrap_err(),
                )),
            }
        }
    }

    #[async_trait]
    impl RankingApi for FakeApi {
        async fn analyze(&self, request: &AnalyzeRequest) -> Result<ApiEnvelope, ApiError> {
            self.next_reply(Call::Analyze(request.clone()))
        }

        async fn rank(&self, request: &RankingRequest) -> Result<ApiEnvelope, ApiError> {
            self.next_reply(Call::Rank(request.clone()))
        }
    }
}
