//! Full dashboard document: both forms plus the current contents of the
//! results and ranking regions.

use super::escape_html;
use crate::controller::page::{ControlState, PageSnapshot};

/// Values echoed back into the forms after a submission.
#[derive(Debug, Clone, Default)]
pub struct FormEcho {
    pub resume_text: String,
    pub job_description: String,
    pub use_ai: bool,
    pub batch_data: String,
}

pub fn render_dashboard(page: &PageSnapshot, echo: &FormEcho) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Ranking Dashboard</title>
</head>
<body>
    <main class="dashboard">
        <section class="panel">
            <h2>Analyze a Resume</h2>
            <form method="post" action="/ui/analyze" enctype="multipart/form-data">
                <textarea id="resumeText" name="resume_text" placeholder="Paste resume text...">{resume}</textarea>
                <input type="file" name="resume_files" accept="application/pdf,.pdf" multiple>
                <textarea id="jobDescription" name="job_description" placeholder="Job description (optional)">{jd}</textarea>
                <label><input type="checkbox" id="useAI" name="use_ai"{checked}> Use AI analysis</label>
                {analyze_button}
            </form>
            <div id="resultsContainer">{results}</div>
        </section>
        <section class="panel">
            <h2>Batch Ranking</h2>
            <form method="post" action="/ui/ranking">
                <textarea id="batchData" name="batch_data" placeholder='[{{"resume_text": "..."}}]'>{batch}</textarea>
                {rank_button}
            </form>
            <div id="rankingTable">{ranking}</div>
        </section>
    </main>
</body>
</html>"#,
        resume = escape_html(&echo.resume_text),
        jd = escape_html(&echo.job_description),
        checked = if echo.use_ai { " checked" } else { "" },
        analyze_button = render_button("analyzeBtn", &page.analyze),
        results = page.results,
        batch = escape_html(&echo.batch_data),
        rank_button = render_button("rankBtn", &page.rank),
        ranking = page.ranking,
    )
}

fn render_button(id: &str, state: &ControlState) -> String {
    format!(
        r#"<button type="submit" id="{id}" class="btn-primary"{disabled}>{label}</button>"#,
        disabled = if state.disabled { " disabled" } else { "" },
        label = escape_html(&state.label),
    )
}
