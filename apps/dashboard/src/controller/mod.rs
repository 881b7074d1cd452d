//! Ranking controller — mediates between form input, the scoring service and
//! the rendered regions of a `Page`.
//!
//! Both flows follow the same shape:
//! 1. validate locally (no network call on failure)
//! 2. engage the busy guard and show a loading placeholder
//! 3. one awaited backend call
//! 4. render the typed result or the error into the same region
//!
//! The guard outlives the final render and restores the triggering control on
//! every exit path.

pub mod page;

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::api_client::{ApiError, RankingApi};
use crate::models::candidate::{
    AnalyzeRequest, ApiEnvelope, CandidateResult, RankingList, RankingRequest,
};
use crate::render;

use self::page::{BusyGuard, Control, Page, Region};

pub const ANALYZE_LABEL: &str = "Analyze Candidate";
pub const RANK_LABEL: &str = "Run Batch Ranking Algorithm";

pub const EMPTY_RESUME: &str = "Please enter resume text to proceed.";
pub const INVALID_BATCH_JSON: &str = "Invalid JSON format. Please verify your input syntax.";
pub const EMPTY_BATCH: &str = "Please provide a non-empty array of candidate objects.";

/// Per-flow wording for busy states and error fallbacks.
pub struct FlowText {
    pub control: Control,
    pub region: Region,
    pub idle_label: &'static str,
    pub busy_label: &'static str,
    pub loading: &'static str,
    pub backend_fallback: &'static str,
    pub transport: &'static str,
    pub malformed: &'static str,
}

pub const ANALYSIS: FlowText = FlowText {
    control: Control::Analyze,
    region: Region::Results,
    idle_label: ANALYZE_LABEL,
    busy_label: "Processing...",
    loading: "Analyzing expertise, matching patterns, and calculating scores...",
    backend_fallback: "Analysis failed",
    transport: "Network or server error. Please try again.",
    malformed: "Data rendering error. The AI response might be missing some fields.",
};

pub const RANKING: FlowText = FlowText {
    control: Control::Rank,
    region: Region::Ranking,
    idle_label: RANK_LABEL,
    busy_label: "Ranking Candidates...",
    loading: "Batch processing candidates...",
    backend_fallback: "Ranking failed",
    transport: "Network error. Please try again.",
    malformed: "Network error. Please try again.",
};

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("Validation error: {0}")]
    Validation(&'static str),

    /// `success: false`; carries the service's message when it sent one.
    #[error("Backend reported failure: {0:?}")]
    Backend(Option<String>),

    #[error("Transport error: {0}")]
    Transport(#[from] ApiError),

    #[error("Malformed success payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

impl ControllerError {
    /// Message shown to the user in the flow's region.
    pub fn user_message(&self, flow: &FlowText) -> String {
        match self {
            ControllerError::Validation(msg) => msg.to_string(),
            ControllerError::Backend(Some(msg)) if !msg.is_empty() => msg.clone(),
            ControllerError::Backend(_) => flow.backend_fallback.to_string(),
            ControllerError::Transport(_) => flow.transport.to_string(),
            ControllerError::MalformedPayload(_) => flow.malformed.to_string(),
        }
    }
}

/// Raw values of the single-analysis form.
#[derive(Debug, Clone, Default)]
pub struct AnalysisForm {
    pub resume_text: String,
    pub job_description: Option<String>,
    pub use_ai: bool,
}

impl AnalysisForm {
    /// Trims inputs and rejects an empty resume.
    pub fn into_request(self) -> Result<AnalyzeRequest, ControllerError> {
        let resume_text = self.resume_text.trim();
        if resume_text.is_empty() {
            return Err(ControllerError::Validation(EMPTY_RESUME));
        }
        Ok(AnalyzeRequest {
            resume_text: resume_text.to_string(),
            job_description: self
                .job_description
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            use_ai: self.use_ai,
        })
    }
}

/// Parses batch input into a non-empty list of candidate objects.
pub fn parse_batch(input: &str) -> Result<Vec<Value>, ControllerError> {
    let value: Value = serde_json::from_str(input.trim())
        .map_err(|_| ControllerError::Validation(INVALID_BATCH_JSON))?;
    match value {
        Value::Array(candidates) if !candidates.is_empty() => Ok(candidates),
        _ => Err(ControllerError::Validation(EMPTY_BATCH)),
    }
}

/// Explicit controller instance: the backend client and the page are injected.
pub struct RankingController<P: Page> {
    api: Arc<dyn RankingApi>,
    page: P,
}

impl<P: Page> RankingController<P> {
    pub fn new(api: Arc<dyn RankingApi>, page: P) -> Self {
        Self { api, page }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Submits one resume for analysis and renders the outcome into the results region.
    pub async fn analyze(&self, form: AnalysisForm) -> Result<CandidateResult, ControllerError> {
        let request = match form.into_request() {
            Ok(request) => request,
            Err(e) => return self.finish(&ANALYSIS, Err(e), render::render_result),
        };

        let _busy = self.engage(&ANALYSIS);
        info!(
            "Submitting analysis ({} chars, use_ai={})",
            request.resume_text.len(),
            request.use_ai
        );
        let outcome = match self.api.analyze(&request).await {
            Ok(envelope) => unwrap_envelope(envelope),
            Err(e) => Err(e.into()),
        };
        self.finish(&ANALYSIS, outcome, render::render_result)
    }

    /// Submits a batch of candidates and renders the ranking table.
    pub async fn rank(&self, batch_input: &str) -> Result<RankingList, ControllerError> {
        let request = match parse_batch(batch_input) {
            Ok(candidates) => RankingRequest { candidates },
            Err(e) => return self.finish(&RANKING, Err(e), render_ranking),
        };

        let _busy = self.engage(&RANKING);
        info!("Submitting {} candidates for ranking", request.candidates.len());
        let outcome = match self.api.rank(&request).await {
            Ok(envelope) => unwrap_envelope(envelope),
            Err(e) => Err(e.into()),
        };
        self.finish(&RANKING, outcome, render_ranking)
    }

    fn engage(&self, flow: &FlowText) -> BusyGuard<'_, P> {
        let guard = BusyGuard::engage(&self.page, flow.control, flow.busy_label, flow.idle_label);
        self.page.set_region(flow.region, render::render_loading(flow.loading));
        guard
    }

    fn finish<T>(
        &self,
        flow: &FlowText,
        outcome: Result<T, ControllerError>,
        render_ok: impl FnOnce(&T) -> String,
    ) -> Result<T, ControllerError> {
        match &outcome {
            Ok(value) => self.page.set_region(flow.region, render_ok(value)),
            Err(e) => {
                warn!("{:?} flow failed: {e}", flow.control);
                self.page
                    .set_region(flow.region, render::render_error(&e.user_message(flow)));
            }
        }
        outcome
    }
}

fn render_ranking(list: &RankingList) -> String {
    render::render_ranking_table(list)
}

fn unwrap_envelope<T: serde::de::DeserializeOwned>(
    envelope: ApiEnvelope,
) -> Result<T, ControllerError> {
    if !envelope.success {
        return Err(ControllerError::Backend(envelope.error));
    }
    Ok(envelope.decode_data()?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::page::{ControlState, MemoryPage, PageEvent};
    use super::*;
    use crate::api_client::fake::{Call, FakeApi};

    fn jane() -> Value {
        json!({
            "name": "Jane Doe",
            "university": "MIT",
            "uni_tier_score": 9,
            "python_score": 8,
            "python_experience_years": 5,
            "final_rank_score": 8.3,
            "evidence_quote": "5 years Python"
        })
    }

    fn controller(api: &Arc<FakeApi>) -> RankingController<MemoryPage> {
        RankingController::new(api.clone(), MemoryPage::new(ANALYZE_LABEL, RANK_LABEL))
    }

    fn form(text: &str) -> AnalysisForm {
        AnalysisForm {
            resume_text: text.to_string(),
            job_description: Some("  Senior Python engineer ".to_string()),
            use_ai: true,
        }
    }

    #[tokio::test]
    async fn test_analyze_issues_one_request_with_trimmed_inputs() {
        let api = Arc::new(FakeApi::replying(ApiEnvelope::ok(jane())));
        let ctl = controller(&api);

        ctl.analyze(form("  5 years Python, MIT \n")).await.unwrap();

        assert_eq!(
            api.calls(),
            vec![Call::Analyze(AnalyzeRequest {
                resume_text: "5 years Python, MIT".to_string(),
                job_description: "Senior Python engineer".to_string(),
                use_ai: true,
            })]
        );
    }

    #[tokio::test]
    async fn test_analyze_missing_job_description_defaults_empty() {
        let api = Arc::new(FakeApi::replying(ApiEnvelope::ok(jane())));
        let ctl = controller(&api);

        let mut f = form("resume");
        f.job_description = None;
        f.use_ai = false;
        ctl.analyze(f).await.unwrap();

        match &api.calls()[0] {
            Call::Analyze(request) => {
                assert_eq!(request.job_description, "");
                assert!(!request.use_ai);
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_blank_resume_is_rejected_locally() {
        let api = Arc::new(FakeApi::default());
        let ctl = controller(&api);

        let err = ctl.analyze(form(" \t\n ")).await.unwrap_err();

        assert!(matches!(err, ControllerError::Validation(EMPTY_RESUME)));
        assert!(api.calls().is_empty());
        let snapshot = ctl.page().snapshot();
        assert!(snapshot.results.contains(EMPTY_RESUME));
        assert!(!snapshot
            .events
            .iter()
            .any(|e| matches!(e, PageEvent::Control(..))));
    }

    #[tokio::test]
    async fn test_analyze_success_renders_example() {
        let api = Arc::new(FakeApi::replying(ApiEnvelope::ok(jane())));
        let ctl = controller(&api);

        let candidate = ctl.analyze(form("5 years Python, MIT")).await.unwrap();
        assert_eq!(candidate.name, "Jane Doe");

        let results = ctl.page().snapshot().results;
        assert!(results.contains(r#"result-score score-high">8.3<"#));
        assert!(results.contains("Jane Doe"));
        assert!(results.contains("9/10"));
        assert!(results.contains("8/10"));
        assert!(results.contains("5 Years"));
    }

    #[tokio::test]
    async fn test_analyze_busy_then_restored() {
        let api = Arc::new(FakeApi::replying(ApiEnvelope::ok(jane())));
        let ctl = controller(&api);

        ctl.analyze(form("resume")).await.unwrap();

        let events = ctl.page().snapshot().events;
        assert_eq!(events.len(), 4);
        assert_eq!(
            events[0],
            PageEvent::Control(Control::Analyze, ControlState::busy("Processing..."))
        );
        assert!(matches!(
            &events[1],
            PageEvent::Region(Region::Results, html) if html.contains("loading")
        ));
        assert!(matches!(
            &events[2],
            PageEvent::Region(Region::Results, html) if html.contains("result-card")
        ));
        assert_eq!(
            events[3],
            PageEvent::Control(Control::Analyze, ControlState::idle(ANALYZE_LABEL))
        );
    }

    #[tokio::test]
    async fn test_rank_failure_rendered_before_control_restored() {
        let api = Arc::new(FakeApi::unreachable());
        let ctl = controller(&api);

        ctl.rank(r#"[{"resume_text": "a"}]"#).await.unwrap_err();

        let events = ctl.page().snapshot().events;
        assert!(matches!(
            &events[2],
            PageEvent::Region(Region::Ranking, html) if html.contains(RANKING.transport)
        ));
        assert_eq!(
            events.last(),
            Some(&PageEvent::Control(Control::Rank, ControlState::idle(RANK_LABEL)))
        );
    }

    #[tokio::test]
    async fn test_analyze_backend_error_shown_verbatim() {
        let api = Arc::new(FakeApi::replying(ApiEnvelope::failed(Some("Quota exceeded"))));
        let ctl = controller(&api);

        let err = ctl.analyze(form("resume")).await.unwrap_err();

        assert!(matches!(err, ControllerError::Backend(_)));
        let snapshot = ctl.page().snapshot();
        assert!(snapshot.results.contains("Quota exceeded"));
        assert_eq!(snapshot.analyze, ControlState::idle(ANALYZE_LABEL));
    }

    #[tokio::test]
    async fn test_analyze_backend_error_fallback() {
        let api = Arc::new(FakeApi::replying(ApiEnvelope::failed(None)));
        let ctl = controller(&api);

        ctl.analyze(form("resume")).await.unwrap_err();

        assert!(ctl.page().snapshot().results.contains("Analysis failed"));
    }

    #[tokio::test]
    async fn test_analyze_transport_failure_restores_control() {
        let api = Arc::new(FakeApi::unreachable());
        let ctl = controller(&api);

        let err = ctl.analyze(form("resume")).await.unwrap_err();

        assert!(matches!(err, ControllerError::Transport(_)));
        let snapshot = ctl.page().snapshot();
        assert!(snapshot.results.contains(ANALYSIS.transport));
        assert_eq!(snapshot.analyze, ControlState::idle(ANALYZE_LABEL));
    }

    #[tokio::test]
    async fn test_analyze_malformed_success_payload() {
        let mut partial = jane();
        partial.as_object_mut().unwrap().remove("final_rank_score");
        let api = Arc::new(FakeApi::replying(ApiEnvelope::ok(partial)));
        let ctl = controller(&api);

        let err = ctl.analyze(form("resume")).await.unwrap_err();

        assert!(matches!(err, ControllerError::MalformedPayload(_)));
        assert!(ctl.page().snapshot().results.contains(ANALYSIS.malformed));
    }

    #[tokio::test]
    async fn test_analyze_escapes_script_name() {
        let mut hostile = jane();
        hostile["name"] = json!("<script>alert('x')</script>");
        let api = Arc::new(FakeApi::replying(ApiEnvelope::ok(hostile)));
        let ctl = controller(&api);

        ctl.analyze(form("resume")).await.unwrap();

        let results = ctl.page().snapshot().results;
        assert!(!results.contains("<script>"));
        assert!(results.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_parse_batch_rejections() {
        assert!(matches!(
            parse_batch("[]"),
            Err(ControllerError::Validation(EMPTY_BATCH))
        ));
        assert!(matches!(
            parse_batch(r#"{"name": "A"}"#),
            Err(ControllerError::Validation(EMPTY_BATCH))
        ));
        assert!(matches!(
            parse_batch("[{name: A}"),
            Err(ControllerError::Validation(INVALID_BATCH_JSON))
        ));
        assert!(matches!(
            parse_batch(""),
            Err(ControllerError::Validation(INVALID_BATCH_JSON))
        ));
        assert_eq!(parse_batch(r#" [{"name": "A"}] "#).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rank_empty_array_no_call() {
        let api = Arc::new(FakeApi::default());
        let ctl = controller(&api);

        ctl.rank("[]").await.unwrap_err();

        assert!(api.calls().is_empty());
        assert!(ctl.page().snapshot().ranking.contains(EMPTY_BATCH));
    }

    #[tokio::test]
    async fn test_rank_invalid_json_no_call() {
        let api = Arc::new(FakeApi::default());
        let ctl = controller(&api);

        ctl.rank("not json").await.unwrap_err();

        assert!(api.calls().is_empty());
        assert!(ctl.page().snapshot().ranking.contains(INVALID_BATCH_JSON));
    }

    #[tokio::test]
    async fn test_rank_forwards_candidates_and_renders_in_order() {
        let mut second = jane();
        second["name"] = json!("John Roe");
        second["final_rank_score"] = json!(6.25);
        let api = Arc::new(FakeApi::replying(ApiEnvelope::ok(json!([jane(), second]))));
        let ctl = controller(&api);

        let input = r#"[{"resume_text": "a"}, {"resume_text": "b"}]"#;
        let list = ctl.rank(input).await.unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(
            api.calls(),
            vec![Call::Rank(RankingRequest {
                candidates: vec![json!({"resume_text": "a"}), json!({"resume_text": "b"})],
            })]
        );

        let snapshot = ctl.page().snapshot();
        let jane_at = snapshot.ranking.find("Jane Doe").unwrap();
        let john_at = snapshot.ranking.find("John Roe").unwrap();
        assert!(jane_at < john_at);
        assert!(snapshot.ranking.contains(r#"rank-1">1<"#));
        assert!(snapshot.ranking.contains(r#"rank-2">2<"#));
        assert!(snapshot.ranking.contains("width: 62.5%"));
        assert_eq!(snapshot.rank, ControlState::idle(RANK_LABEL));
    }

    #[tokio::test]
    async fn test_rank_empty_result_placeholder() {
        let api = Arc::new(FakeApi::replying(ApiEnvelope::ok(json!([]))));
        let ctl = controller(&api);

        ctl.rank(r#"[{"resume_text": "a"}]"#).await.unwrap();

        assert!(ctl.page().snapshot().ranking.contains(render::NO_CANDIDATES));
    }

    #[tokio::test]
    async fn test_rank_failures_render_in_table_region() {
        let api = Arc::new(FakeApi::default());
        api.push(Some(ApiEnvelope::failed(None)));
        api.push(None);
        api.push(Some(ApiEnvelope::ok(json!({"not": "a list"}))));
        let ctl = controller(&api);
        let input = r#"[{"resume_text": "a"}]"#;

        ctl.rank(input).await.unwrap_err();
        assert!(ctl.page().snapshot().ranking.contains("Ranking failed"));

        ctl.rank(input).await.unwrap_err();
        assert!(ctl.page().snapshot().ranking.contains(RANKING.transport));

        ctl.rank(input).await.unwrap_err();
        let snapshot = ctl.page().snapshot();
        assert!(snapshot.ranking.contains(RANKING.transport));
        assert!(snapshot.results.is_empty());
        assert_eq!(snapshot.rank, ControlState::idle(RANK_LABEL));
    }
}
