//! Axum handlers for the dashboard pages.
//!
//! Every submission builds a fresh page, runs the ranking controller against
//! it and returns the whole document. Controller failures are part of the
//! rendered page, so these handlers answer 200 unless the request itself is
//! unreadable.

use axum::{
    extract::{Multipart, State},
    response::Html,
    Form,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;

use crate::controller::page::MemoryPage;
use crate::controller::{AnalysisForm, RankingController, ANALYZE_LABEL, RANK_LABEL};
use crate::errors::AppError;
use crate::render::shell::{render_dashboard, FormEcho};
use crate::state::AppState;
use crate::upload::{resolve_resume_text, ResumeUpload};

#[derive(Debug, Deserialize)]
pub struct RankingForm {
    #[serde(default)]
    pub batch_data: String,
}

fn new_controller(state: &AppState) -> RankingController<MemoryPage> {
    RankingController::new(state.api.clone(), MemoryPage::new(ANALYZE_LABEL, RANK_LABEL))
}

fn respond(controller: &RankingController<MemoryPage>, echo: &FormEcho) -> Html<String> {
    Html(render_dashboard(&controller.page().snapshot(), echo))
}

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Html<String> {
    respond(&new_controller(&state), &FormEcho::default())
}

/// POST /ui/analyze
///
/// Multipart form: `resume_text`, `job_description`, `use_ai`, and any number
/// of `resume_files` parts. The first PDF with extractable text replaces
/// `resume_text`; unusable files are skipped.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let mut echo = FormEcho::default();
    let mut uploads: Vec<ResumeUpload> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume_text" => echo.resume_text = field.text().await?,
            "job_description" => echo.job_description = field.text().await?,
            "use_ai" => echo.use_ai = matches!(field.text().await?.as_str(), "on" | "true"),
            "resume_files" | "resume_file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data: Bytes = field.bytes().await?;
                if !filename.is_empty() && !data.is_empty() {
                    uploads.push(ResumeUpload { filename, data });
                }
            }
            _ => {}
        }
    }

    let controller = new_controller(&state);
    let resume_text = resolve_resume_text(uploads, echo.resume_text.clone()).await;

    let form = AnalysisForm {
        resume_text,
        job_description: Some(echo.job_description.clone()),
        use_ai: echo.use_ai,
    };
    if let Ok(candidate) = controller.analyze(form).await {
        info!("Analysis rendered (score {:.2})", candidate.final_rank_score);
    }

    Ok(respond(&controller, &echo))
}

/// POST /ui/ranking
pub async fn handle_ranking(
    State(state): State<AppState>,
    Form(form): Form<RankingForm>,
) -> Html<String> {
    let controller = new_controller(&state);

    if let Ok(list) = controller.rank(&form.batch_data).await {
        info!("Ranking rendered ({} candidates)", list.len());
    }

    let echo = FormEcho {
        batch_data: form.batch_data,
        ..Default::default()
    };
    respond(&controller, &echo)
}
