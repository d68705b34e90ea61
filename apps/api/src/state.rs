use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::Semaphore;

use crate::compiler::DocumentCompiler;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Pluggable compiler backend. Default: `LatexCompiler` running `config.latex_compiler`.
    pub compiler: Arc<dyn DocumentCompiler>,
    /// Bounds concurrent compiler subprocesses to `config.max_concurrent_compiles`.
    pub compile_permits: Arc<Semaphore>,
}
