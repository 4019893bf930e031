use crate::config::RendererConfig;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Errors surfaced by the rendering collaborator. All are terminal for the
/// request that triggered them; nothing is retried.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("failed to create temporary directory for rendering: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("failed to write markup for rendering: {0}")]
    WriteMarkup(#[source] std::io::Error),
    #[error("failed to launch renderer '{binary}': {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },
    #[error("renderer exited with status {status}: {stderr}")]
    RendererExit { status: i32, stderr: String },
    #[error("renderer did not finish within {0} seconds")]
    Timeout(u64),
    #[error("failed to read generated PDF: {0}")]
    ReadPdf(#[source] std::io::Error),
}

/// Boundary to the external rasterization collaborator: markup in, binary
/// document out. Injected at handler construction so tests can swap in a
/// fake without a browser on the machine.
#[async_trait]
pub trait PdfEngine: Send + Sync {
    async fn render(&self, html: &str) -> Result<Vec<u8>, PdfError>;
}

/// Renders markup through a headless Chromium binary. Page format and
/// margins come from the `@page` rule embedded in the markup itself; the
/// engine only paginates.
pub struct ChromiumPdfEngine {
    binary: PathBuf,
    timeout: Duration,
}

impl ChromiumPdfEngine {
    pub fn new(config: &RendererConfig) -> Self {
        Self {
            binary: PathBuf::from(&config.chromium_binary),
            timeout: Duration::from_secs(config.pdf_timeout_secs),
        }
    }
}

#[async_trait]
impl PdfEngine for ChromiumPdfEngine {
    async fn render(&self, html: &str) -> Result<Vec<u8>, PdfError> {
        let workdir = tempfile::tempdir().map_err(PdfError::TempDir)?;
        let input = workdir.path().join("protokoll.html");
        let output = workdir.path().join("protokoll.pdf");

        tokio::fs::write(&input, html)
            .await
            .map_err(PdfError::WriteMarkup)?;

        let mut command = Command::new(&self.binary);
        command
            .arg("--headless")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--no-pdf-header-footer")
            .arg(format!("--print-to-pdf={}", output.display()))
            .arg(&input)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            // The child must not outlive a fired timeout.
            .kill_on_drop(true);

        debug!(binary = %self.binary.display(), "invoking headless renderer");

        let result = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| PdfError::Timeout(self.timeout.as_secs()))?
            .map_err(|source| PdfError::Spawn {
                binary: self.binary.display().to_string(),
                source,
            })?;

        if !result.status.success() {
            return Err(PdfError::RendererExit {
                status: result.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        tokio::fs::read(&output).await.map_err(PdfError::ReadPdf)
    }
}
