use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::compiler::{DEFAULT_COMPILER, DEFAULT_COMPILE_TIMEOUT};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// TeX engine executable, looked up on `PATH` unless absolute.
    pub latex_compiler: String,
    /// Extra engine flags, whitespace-separated in `LATEX_EXTRA_ARGS` (e.g. `-halt-on-error`).
    pub latex_extra_args: Vec<String>,
    /// Parent directory for per-compile scratch dirs; system temp dir when unset.
    pub compile_work_dir: Option<PathBuf>,
    pub compile_timeout: Duration,
    /// Upper bound on simultaneous compiler subprocesses.
    pub max_concurrent_compiles: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let compile_timeout_secs = optional_env("COMPILE_TIMEOUT_SECS")
            .map(|v| v.parse::<u64>())
            .transpose()
            .context("COMPILE_TIMEOUT_SECS must be a whole number of seconds")?
            .unwrap_or(DEFAULT_COMPILE_TIMEOUT.as_secs());

        let max_concurrent_compiles = optional_env("MAX_CONCURRENT_COMPILES")
            .map(|v| v.parse::<usize>())
            .transpose()
            .context("MAX_CONCURRENT_COMPILES must be a positive integer")?
            .unwrap_or(2);
        if max_concurrent_compiles == 0 {
            anyhow::bail!("MAX_CONCURRENT_COMPILES must be at least 1");
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            latex_compiler: optional_env("LATEX_COMPILER")
                .unwrap_or_else(|| DEFAULT_COMPILER.to_string()),
            latex_extra_args: optional_env("LATEX_EXTRA_ARGS")
                .map(|v| v.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
            compile_work_dir: optional_env("COMPILE_WORK_DIR").map(PathBuf::from),
            compile_timeout: Duration::from_secs(compile_timeout_secs),
            max_concurrent_compiles,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
