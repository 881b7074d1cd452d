//! PDF resume uploads: the extracted text stands in for pasted resume text.
//!
//! Uploads are best effort. Files that are not PDFs, fail to parse or carry no
//! text are skipped, and the submission falls back to the pasted text.

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Only PDF files are allowed.")]
    NotPdf,

    #[error("Could not extract text from PDF.")]
    NoText,

    #[error("Failed to extract text from PDF: {0}")]
    Extract(String),
}

/// One file part of the analyze form.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub filename: String,
    pub data: Bytes,
}

/// True for `name.pdf` in any letter case.
pub fn is_pdf_filename(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("pdf"))
}

/// Extracts trimmed text from an uploaded resume.
///
/// Extraction runs on the blocking pool; a panic inside the PDF parser is
/// reported as an extraction failure.
pub async fn extract_resume_text(filename: &str, data: Bytes) -> Result<String, UploadError> {
    if !is_pdf_filename(filename) {
        return Err(UploadError::NotPdf);
    }

    debug!("Extracting text from {filename} ({} bytes)", data.len());
    let text = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&data).map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| UploadError::Extract(e.to_string()))?
    .map_err(|e| {
        warn!("PDF extraction failed for {filename}: {e}");
        UploadError::Extract(e)
    })?;

    let text = text.trim();
    if text.is_empty() {
        return Err(UploadError::NoText);
    }
    Ok(text.to_string())
}

/// Text to analyze for one submission: the first upload that yields text,
/// otherwise `pasted`.
pub async fn resolve_resume_text(uploads: Vec<ResumeUpload>, pasted: String) -> String {
    for upload in uploads {
        match extract_resume_text(&upload.filename, upload.data).await {
            Ok(text) => {
                debug!("Using text of {} ({} chars)", upload.filename, text.len());
                return text;
            }
            Err(e) => warn!("Skipping upload {}: {e}", upload.filename),
        }
    }
    pasted
}
