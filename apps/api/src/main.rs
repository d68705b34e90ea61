mod compiler;
mod config;
mod db;
mod errors;
mod models;
mod render;
mod resumes;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Semaphore;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::compiler::LatexCompiler;
use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Builder API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;

    // Initialize the LaTeX compiler backend
    let mut compiler = LatexCompiler::new(config.latex_compiler.clone())
        .with_extra_args(config.latex_extra_args.clone())
        .with_timeout(config.compile_timeout);
    if let Some(dir) = &config.compile_work_dir {
        compiler = compiler.with_work_root(dir);
    }
    info!(
        "LaTeX compiler: {} (timeout {}s, max {} concurrent)",
        compiler.program(),
        compiler.timeout().as_secs(),
        config.max_concurrent_compiles
    );

    // Build app state
    let state = AppState {
        db,
        compiler: Arc::new(compiler),
        compile_permits: Arc::new(Semaphore::new(config.max_concurrent_compiles)),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the editor's deployment origin is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
