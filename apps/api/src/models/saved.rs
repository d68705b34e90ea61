use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::formatting::FormattingOptions;
use crate::models::resume::ResumeRecord;

/// A saved résumé document as stored in `saved_resumes`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SavedResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub resume_data: Json<ResumeRecord>,
    pub formatting_options: Json<FormattingOptions>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing projection — everything except the payload.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SavedResumeSummary {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
