//! Axum route handlers for markup and PDF downloads.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::formatting::{FormattingOptions, Template, TemplatePreset};
use crate::models::resume::ResumeRecord;
use crate::render::render;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RenderRequest {
    pub resume_data: ResumeRecord,
    pub formatting_options: FormattingOptions,
}

#[derive(Debug, Serialize)]
pub struct StarterResponse {
    pub resume_data: ResumeRecord,
    pub formatting_options: FormattingOptions,
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Rejects options outside their documented ranges; the renderer never clamps.
pub fn validate_options(options: &FormattingOptions) -> Result<(), AppError> {
    let violations = options.range_violations();
    if violations.is_empty() {
        return Ok(());
    }
    Err(AppError::Validation(
        violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; "),
    ))
}

/// `resume_YYYYmmdd_HHMMSS.<ext>`
pub fn download_filename(extension: &str, at: DateTime<Utc>) -> String {
    format!("resume_{}.{extension}", at.format("%Y%m%d_%H%M%S"))
}

fn attachment(content_type: &'static str, filename: &str, body: impl Into<Body>) -> Response {
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body.into(),
    )
        .into_response()
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<TemplatePreset>> {
    Json(Template::ALL.iter().map(|t| t.preset()).collect())
}

/// GET /api/v1/resumes/sample
pub async fn handle_sample() -> Json<StarterResponse> {
    Json(StarterResponse {
        resume_data: ResumeRecord::sample(),
        formatting_options: FormattingOptions::default(),
    })
}

/// GET /api/v1/resumes/blank
pub async fn handle_blank() -> Json<StarterResponse> {
    Json(StarterResponse {
        resume_data: ResumeRecord::blank(),
        formatting_options: FormattingOptions::default(),
    })
}

/// POST /api/v1/render/tex
///
/// Returns the generated LaTeX source as a plain-text download.
pub async fn handle_render_tex(Json(req): Json<RenderRequest>) -> Result<Response, AppError> {
    validate_options(&req.formatting_options)?;

    let markup = render(&req.resume_data, &req.formatting_options);
    info!("Rendered {} bytes of LaTeX", markup.len());

    Ok(attachment(
        "text/plain; charset=utf-8",
        &download_filename("tex", Utc::now()),
        markup,
    ))
}

/// POST /api/v1/render/pdf
///
/// Renders, then compiles with the configured TeX engine. Compiler diagnostics
/// are returned in the error body when the document does not build.
pub async fn handle_render_pdf(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Result<Response, AppError> {
    validate_options(&req.formatting_options)?;

    let markup = render(&req.resume_data, &req.formatting_options);
    debug!(
        "Waiting for a compile slot ({} max, {} free)",
        state.config.max_concurrent_compiles,
        state.compile_permits.available_permits()
    );

    let _permit = state
        .compile_permits
        .acquire()
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Compile semaphore closed: {e}")))?;

    let pdf = state.compiler.compile(&markup).await?;

    Ok(attachment(
        "application/pdf",
        &download_filename("pdf", Utc::now()),
        pdf,
    ))
}
