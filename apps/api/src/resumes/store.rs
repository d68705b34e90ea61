//! Saved résumé persistence — one row per document, owned by a user id.
//!
//! Ownership is enforced in every query: a document id only resolves for the
//! user that saved it.

use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::formatting::FormattingOptions;
use crate::models::resume::ResumeRecord;
use crate::models::saved::{SavedResumeRow, SavedResumeSummary};

/// Fields written on save and update.
pub struct ResumeDocument<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub resume_data: &'a ResumeRecord,
    pub formatting_options: &'a FormattingOptions,
}

pub async fn insert_resume(
    pool: &PgPool,
    user_id: Uuid,
    doc: ResumeDocument<'_>,
) -> Result<SavedResumeSummary, sqlx::Error> {
    let id = Uuid::new_v4();
    let summary = sqlx::query_as::<_, SavedResumeSummary>(
        r#"
        INSERT INTO saved_resumes
            (id, user_id, name, description, resume_data, formatting_options)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, name, description, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(doc.name)
    .bind(doc.description)
    .bind(Json(doc.resume_data))
    .bind(Json(doc.formatting_options))
    .fetch_one(pool)
    .await?;

    info!("Saved resume {id} '{}' for user {user_id}", doc.name);
    Ok(summary)
}

/// Newest first.
pub async fn list_resumes(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<SavedResumeSummary>, sqlx::Error> {
    sqlx::query_as::<_, SavedResumeSummary>(
        r#"
        SELECT id, name, description, created_at, updated_at
        FROM saved_resumes
        WHERE user_id = $1
        ORDER BY updated_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn get_resume(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> Result<Option<SavedResumeRow>, sqlx::Error> {
    sqlx::query_as::<_, SavedResumeRow>(
        "SELECT * FROM saved_resumes WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Overwrites a document in place. `None` if it does not exist for this user.
pub async fn update_resume(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    doc: ResumeDocument<'_>,
) -> Result<Option<SavedResumeSummary>, sqlx::Error> {
    let summary = sqlx::query_as::<_, SavedResumeSummary>(
        r#"
        UPDATE saved_resumes
        SET name = $3,
            description = $4,
            resume_data = $5,
            formatting_options = $6,
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING id, name, description, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(doc.name)
    .bind(doc.description)
    .bind(Json(doc.resume_data))
    .bind(Json(doc.formatting_options))
    .fetch_optional(pool)
    .await?;

    if summary.is_some() {
        info!("Updated resume {id} for user {user_id}");
    }
    Ok(summary)
}

/// Returns `true` if a row was deleted.
pub async fn delete_resume(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM saved_resumes WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    let deleted = result.rows_affected() > 0;
    if deleted {
        info!("Deleted resume {id} for user {user_id}");
    }
    Ok(deleted)
}
