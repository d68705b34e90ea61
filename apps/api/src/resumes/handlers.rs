use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::formatting::FormattingOptions;
use crate::models::resume::ResumeRecord;
use crate::models::saved::{SavedResumeRow, SavedResumeSummary};
use crate::render::handlers::validate_options;
use crate::resumes::store::{self, ResumeDocument};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SaveResumeRequest {
    pub user_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub resume_data: ResumeRecord,
    #[serde(default)]
    pub formatting_options: FormattingOptions,
}

impl SaveResumeRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name cannot be empty".to_string()));
        }
        validate_options(&self.formatting_options)
    }

    fn document(&self) -> ResumeDocument<'_> {
        ResumeDocument {
            name: self.name.trim(),
            description: &self.description,
            resume_data: &self.resume_data,
            formatting_options: &self.formatting_options,
        }
    }
}

/// POST /api/v1/resumes
pub async fn handle_save_resume(
    State(state): State<AppState>,
    Json(req): Json<SaveResumeRequest>,
) -> Result<(StatusCode, Json<SavedResumeSummary>), AppError> {
    req.validate()?;
    let summary = store::insert_resume(&state.db, req.user_id, req.document()).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<SavedResumeSummary>>, AppError> {
    let resumes = store::list_resumes(&state.db, params.user_id).await?;
    Ok(Json(resumes))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<SavedResumeRow>, AppError> {
    let resume = store::get_resume(&state.db, params.user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    Ok(Json(resume))
}

/// PUT /api/v1/resumes/:id
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SaveResumeRequest>,
) -> Result<Json<SavedResumeSummary>, AppError> {
    req.validate()?;
    let summary = store::update_resume(&state.db, req.user_id, id, req.document())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    Ok(Json(summary))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    if store::delete_resume(&state.db, params.user_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Resume {id} not found")))
    }
}
