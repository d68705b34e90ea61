pub mod health;

use axum::{routing::get, routing::post, Router};

use crate::render::handlers as render;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/templates", get(render::handle_list_templates))
        // Markup + PDF export
        .route("/api/v1/render/tex", post(render::handle_render_tex))
        .route("/api/v1/render/pdf", post(render::handle_render_pdf))
        // Starter records
        .route("/api/v1/resumes/sample", get(render::handle_sample))
        .route("/api/v1/resumes/blank", get(render::handle_blank))
        // Saved documents
        .route(
            "/api/v1/resumes",
            get(resumes::handle_list_resumes).post(resumes::handle_save_resume),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume)
                .put(resumes::handle_update_resume)
                .delete(resumes::handle_delete_resume),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use bytes::Bytes;
    use sqlx::postgres::PgPoolOptions;
    use tokio::sync::Semaphore;
    use tower::ServiceExt;

    use super::*;
    use crate::compiler::{CompileFailure, DocumentCompiler};
    use crate::config::Config;
    use crate::models::resume::ResumeRecord;

    /// Echoes the markup back as the "PDF", or fails if it contains `FAIL`.
    struct EchoCompiler;

    #[async_trait]
    impl DocumentCompiler for EchoCompiler {
        async fn compile(&self, markup: &str) -> Result<Bytes, CompileFailure> {
            if markup.contains("FAIL") {
                return Err(CompileFailure::CompilationFailed {
                    log: "! LaTeX Error: boom".into(),
                });
            }
            Ok(Bytes::from(markup.to_owned()))
        }
    }

    fn test_router() -> Router {
        let config = Config {
            database_url: "postgres://unused@localhost/unused".into(),
            port: 0,
            rust_log: "info".into(),
            latex_compiler: "pdflatex".into(),
            latex_extra_args: Vec::new(),
            compile_work_dir: None,
            compile_timeout: std::time::Duration::from_secs(30),
            max_concurrent_compiles: 1,
        };
        // Never connects; render routes do not touch the database.
        let db = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .unwrap();
        build_router(AppState {
            db,
            config,
            compiler: Arc::new(EchoCompiler),
            compile_permits: Arc::new(Semaphore::new(1)),
        })
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_compiler_and_free_slots() {
        let response = test_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "resume-builder");
        assert_eq!(json["compiler"], "pdflatex");
        assert_eq!(json["compile_slots_free"], 1);
    }

    #[tokio::test]
    async fn test_render_tex_returns_attachment() {
        let body = serde_json::json!({
            "resume_data": { "personal_info": { "name": "Ada & Co" } },
            "formatting_options": { "font_size": 12 }
        });
        let response = test_router()
            .oneshot(post_json("/api/v1/render/tex", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"resume_"));
        assert!(disposition.ends_with(".tex\""));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let markup = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(markup.contains("[a4paper, 12pt]"));
        assert!(markup.contains(r"Ada \& Co"));
    }

    #[tokio::test]
    async fn test_render_rejects_out_of_range_options() {
        let body = serde_json::json!({ "formatting_options": { "margin_top": 2.0 } });
        let response = test_router()
            .oneshot(post_json("/api/v1/render/tex", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_render_pdf_uses_compiler() {
        let body = serde_json::json!({ "resume_data": ResumeRecord::sample() });
        let response = test_router()
            .oneshot(post_json("/api/v1/render/pdf", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    }

    #[tokio::test]
    async fn test_render_pdf_surfaces_compiler_log() {
        let body = serde_json::json!({
            "resume_data": { "professional_summary": "FAIL" }
        });
        let response = test_router()
            .oneshot(post_json("/api/v1/render/pdf", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"]["log"], "! LaTeX Error: boom");
    }

    #[tokio::test]
    async fn test_templates_listed() {
        let response = test_router()
            .oneshot(Request::get("/api/v1/templates").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 3);
        assert_eq!(json[0]["name"], "Standard Single-Column");
    }

    #[tokio::test]
    async fn test_sample_route_not_shadowed_by_id_route() {
        let response = test_router()
            .oneshot(Request::get("/api/v1/resumes/sample").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["resume_data"]["personal_info"]["name"], "John Doe");
    }
}
