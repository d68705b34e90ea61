//! Compiler Invoker — turns LaTeX source into a PDF by shelling out to a TeX engine.
//!
//! Every call gets its own temporary directory. The directory guard is dropped on
//! every return path, so nothing is left behind on success, failure, or timeout.
//!
//! `AppState` holds an `Arc<dyn DocumentCompiler>`; `LatexCompiler` is the only
//! production backend.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Upper bound on a single compiler run.
pub const DEFAULT_COMPILE_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_COMPILER: &str = "pdflatex";

const SOURCE_FILE: &str = "resume.tex";
const OUTPUT_FILE: &str = "resume.pdf";

// ────────────────────────────────────────────────────────────────────────────
// Failure taxonomy
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CompileFailure {
    /// Non-zero exit or no output file. Carries the compiler's stdout + stderr.
    #[error("LaTeX compilation failed")]
    CompilationFailed { log: String },

    #[error("LaTeX compilation timed out after {}s", .after.as_secs())]
    Timeout { after: Duration },

    #[error("LaTeX compiler '{program}' not found; install TeX Live or MiKTeX")]
    ToolchainMissing { program: String },

    #[error("Unexpected compilation error: {0}")]
    UnexpectedError(String),
}

impl From<std::io::Error> for CompileFailure {
    fn from(e: std::io::Error) -> Self {
        CompileFailure::UnexpectedError(e.to_string())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Compiles document source into a binary artifact.
#[async_trait]
pub trait DocumentCompiler: Send + Sync {
    async fn compile(&self, markup: &str) -> Result<Bytes, CompileFailure>;
}

// ────────────────────────────────────────────────────────────────────────────
// LatexCompiler
// ────────────────────────────────────────────────────────────────────────────

/// Runs `<program> [extra_args] -interaction=nonstopmode -output-directory <dir> <dir>/resume.tex`.
#[derive(Debug, Clone)]
pub struct LatexCompiler {
    program: String,
    extra_args: Vec<String>,
    timeout: Duration,
    /// Parent for per-call temp dirs. `None` uses the system temp dir.
    work_root: Option<PathBuf>,
}

impl Default for LatexCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_COMPILER)
    }
}

impl LatexCompiler {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            extra_args: Vec::new(),
            timeout: DEFAULT_COMPILE_TIMEOUT,
            work_root: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Arguments placed before the fixed batch-mode arguments.
    pub fn with_extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_work_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.work_root = Some(root.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn make_workdir(&self) -> std::io::Result<tempfile::TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("resume-build-");
        match &self.work_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
    }

    async fn run_in(&self, dir: &Path, markup: &str) -> Result<Bytes, CompileFailure> {
        let source = dir.join(SOURCE_FILE);
        let output = dir.join(OUTPUT_FILE);
        tokio::fs::write(&source, markup).await?;

        let mut child = Command::new(&self.program)
            .args(&self.extra_args)
            .arg("-interaction=nonstopmode")
            .arg("-output-directory")
            .arg(dir)
            .arg(&source)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => CompileFailure::ToolchainMissing {
                    program: self.program.clone(),
                },
                _ => CompileFailure::UnexpectedError(format!(
                    "failed to start '{}': {e}",
                    self.program
                )),
            })?;

        // Drain both pipes concurrently so a chatty compiler cannot block on a full pipe.
        let mut stdout = spawn_reader(child.stdout.take());
        let mut stderr = spawn_reader(child.stderr.take());

        // One deadline for exit and both pipes: a helper left behind by the
        // compiler can hold the pipes open after the compiler itself exits.
        let finished = tokio::time::timeout(self.timeout, async {
            let status = child.wait().await?;
            let (out, err) = tokio::join!(collect(&mut stdout), collect(&mut stderr));
            Ok::<_, std::io::Error>((status, format!("{out}\n{err}")))
        })
        .await;

        let (status, log) = match finished {
            Ok(result) => result?,
            Err(_) => {
                stdout.abort();
                stderr.abort();
                if let Ok(None) = child.try_wait() {
                    if let Err(e) = child.kill().await {
                        warn!("Failed to kill timed-out compiler: {e}");
                    }
                }
                return Err(CompileFailure::Timeout {
                    after: self.timeout,
                });
            }
        };

        if status.success() && tokio::fs::try_exists(&output).await.unwrap_or(false) {
            let pdf = tokio::fs::read(&output).await?;
            return Ok(Bytes::from(pdf));
        }

        let log = if log.trim().is_empty() {
            format!("{} exited with {status} without producing {OUTPUT_FILE}", self.program)
        } else {
            log
        };
        Err(CompileFailure::CompilationFailed { log })
    }
}

#[async_trait]
impl DocumentCompiler for LatexCompiler {
    async fn compile(&self, markup: &str) -> Result<Bytes, CompileFailure> {
        let started = Instant::now();
        let workdir = self.make_workdir()?;
        debug!("Compiling in {}", workdir.path().display());

        let result = self.run_in(workdir.path(), markup).await;

        // Explicit close so removal errors are at least logged; the guard would
        // remove the directory on drop regardless.
        if let Err(e) = workdir.close() {
            warn!("Failed to remove compile directory: {e}");
        }

        match &result {
            Ok(pdf) => info!(
                bytes = pdf.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "LaTeX compilation succeeded"
            ),
            Err(e) => warn!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                "LaTeX compilation failed: {e}"
            ),
        }
        result
    }
}

fn spawn_reader<R>(pipe: Option<R>) -> JoinHandle<String>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf).await;
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

async fn collect(handle: &mut JoinHandle<String>) -> String {
    handle.await.unwrap_or_default()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    /// A fake compiler: `sh -c <script> fake-tex <fixed args…>`.
    /// Inside the script `$3` is the output directory.
    fn fake_compiler(script: &str, root: &Path) -> LatexCompiler {
        LatexCompiler::new("sh")
            .with_extra_args(["-c", script, "fake-tex"])
            .with_work_root(root)
    }

    fn is_empty_dir(path: &Path) -> bool {
        std::fs::read_dir(path).unwrap().next().is_none()
    }

    #[tokio::test]
    async fn test_success_returns_output_bytes() {
        let root = tempfile::tempdir().unwrap();
        let compiler = fake_compiler(
            r#"test -f "$4" && printf '%%PDF-1.4 fake' > "$3/resume.pdf""#,
            root.path(),
        );

        let pdf = compiler.compile("\\documentclass{article}").await.unwrap();
        assert_eq!(&pdf[..], b"%PDF-1.4 fake");
        assert!(is_empty_dir(root.path()));
    }

    #[tokio::test]
    async fn test_source_written_under_fixed_name() {
        let root = tempfile::tempdir().unwrap();
        let compiler = fake_compiler(
            r#"[ "$(basename "$4")" = resume.tex ] && cp "$4" "$3/resume.pdf""#,
            root.path(),
        );

        let pdf = compiler.compile("hello markup").await.unwrap();
        assert_eq!(&pdf[..], b"hello markup");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_compilation_failed_with_log() {
        let root = tempfile::tempdir().unwrap();
        let compiler = fake_compiler(
            "echo '! Undefined control sequence.'; echo 'l.12 \\foo' >&2; exit 1",
            root.path(),
        );

        match compiler.compile("bad").await {
            Err(CompileFailure::CompilationFailed { log }) => {
                assert!(log.contains("Undefined control sequence"));
                assert!(log.contains("l.12"));
            }
            other => panic!("expected CompilationFailed, got {other:?}"),
        }
        assert!(is_empty_dir(root.path()));
    }

    #[tokio::test]
    async fn test_zero_exit_without_output_is_failure() {
        let root = tempfile::tempdir().unwrap();
        let compiler = fake_compiler("exit 0", root.path());

        match compiler.compile("x").await {
            Err(CompileFailure::CompilationFailed { log }) => {
                assert!(!log.trim().is_empty());
                assert!(log.contains("resume.pdf"));
            }
            other => panic!("expected CompilationFailed, got {other:?}"),
        }
        assert!(is_empty_dir(root.path()));
    }

    #[tokio::test]
    async fn test_timeout_kills_and_cleans_up() {
        let root = tempfile::tempdir().unwrap();
        let compiler =
            fake_compiler("exec sleep 30", root.path()).with_timeout(Duration::from_millis(200));

        let started = Instant::now();
        match compiler.compile("x").await {
            Err(CompileFailure::Timeout { after }) => {
                assert_eq!(after, Duration::from_millis(200))
            }
            other => panic!("expected Timeout, got {other:?}"),
        }
        assert!(started.elapsed() < Duration::from_secs(10));
        assert!(is_empty_dir(root.path()));
    }

    #[tokio::test]
    async fn test_timeout_covers_pipes_held_by_leftover_helper() {
        let root = tempfile::tempdir().unwrap();
        // The shell exits at once; the backgrounded sleep keeps stdout open.
        let compiler = fake_compiler("sleep 5 & exit 1", root.path())
            .with_timeout(Duration::from_millis(300));

        let started = Instant::now();
        match compiler.compile("x").await {
            Err(CompileFailure::Timeout { after }) => {
                assert_eq!(after, Duration::from_millis(300))
            }
            other => panic!("expected Timeout, got {other:?}"),
        }
        assert!(started.elapsed() < Duration::from_secs(3));
        assert!(is_empty_dir(root.path()));
    }

    #[tokio::test]
    async fn test_missing_program_is_toolchain_missing() {
        let root = tempfile::tempdir().unwrap();
        let compiler = LatexCompiler::new("definitely-not-a-tex-engine-7f3a")
            .with_work_root(root.path());

        match compiler.compile("x").await {
            Err(CompileFailure::ToolchainMissing { program }) => {
                assert_eq!(program, "definitely-not-a-tex-engine-7f3a")
            }
            other => panic!("expected ToolchainMissing, got {other:?}"),
        }
        assert!(is_empty_dir(root.path()));
    }

    #[tokio::test]
    async fn test_unusable_work_root_is_unexpected_error() {
        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("does-not-exist");
        let compiler = LatexCompiler::default().with_work_root(missing);

        assert!(matches!(
            compiler.compile("x").await,
            Err(CompileFailure::UnexpectedError(_))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_compiles_use_separate_directories() {
        let root = tempfile::tempdir().unwrap();
        let compiler = fake_compiler(r#"cp "$4" "$3/resume.pdf""#, root.path());

        let (a, b) = tokio::join!(compiler.compile("first"), compiler.compile("second"));
        assert_eq!(&a.unwrap()[..], b"first");
        assert_eq!(&b.unwrap()[..], b"second");
        assert!(is_empty_dir(root.path()));
    }

    #[test]
    fn test_defaults() {
        let compiler = LatexCompiler::default();
        assert_eq!(compiler.program(), "pdflatex");
        assert_eq!(compiler.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_failure_messages() {
        let timeout = CompileFailure::Timeout {
            after: Duration::from_secs(30),
        };
        assert_eq!(timeout.to_string(), "LaTeX compilation timed out after 30s");
        let missing = CompileFailure::ToolchainMissing {
            program: "pdflatex".into(),
        };
        assert!(missing.to_string().contains("pdflatex"));
    }
}
