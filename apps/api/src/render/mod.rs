//! PDF export: renders editor markup to a PDF byte stream with a headless
//! browser.
//!
//! Flow: wrap_document → write page into a temp dir → `<browser> --headless
//! --print-to-pdf` → read the PDF back. The temp dir is removed on drop.

pub mod handlers;
pub mod template;

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

use crate::render::template::wrap_document;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to launch browser '{bin}': {source}")]
    Spawn {
        bin: String,
        source: std::io::Error,
    },

    #[error("browser exited with status {status:?}: {stderr}")]
    Browser { status: Option<i32>, stderr: String },

    #[error("browser did not finish within {0}s")]
    Timeout(u64),

    #[error("browser produced no PDF output")]
    EmptyOutput,
}

/// Stateless HTML → PDF converter. Cheap to clone; every call launches its
/// own browser process.
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    browser_bin: String,
    timeout: Duration,
}

impl PdfRenderer {
    pub fn new(browser_bin: impl Into<String>, timeout: Duration) -> Self {
        Self {
            browser_bin: browser_bin.into(),
            timeout,
        }
    }

    pub async fn render(&self, content: &str) -> Result<Bytes, RenderError> {
        let dir = tempfile::tempdir()?;
        let page = dir.path().join("resume.html");
        let pdf = dir.path().join("resume.pdf");

        tokio::fs::write(&page, wrap_document(content)).await?;

        let mut command = Command::new(&self.browser_bin);
        command
            .args(browser_args(&page, &pdf))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!("Launching {} for PDF export", self.browser_bin);
        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| RenderError::Timeout(self.timeout.as_secs()))?
            .map_err(|source| RenderError::Spawn {
                bin: self.browser_bin.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(RenderError::Browser {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let bytes = match tokio::fs::read(&pdf).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RenderError::EmptyOutput)
            }
            Err(e) => return Err(e.into()),
        };
        if bytes.is_empty() {
            return Err(RenderError::EmptyOutput);
        }

        info!("Rendered PDF ({} bytes)", bytes.len());
        Ok(Bytes::from(bytes))
    }
}

fn browser_args(page: &Path, pdf: &Path) -> Vec<String> {
    vec![
        "--headless".to_string(),
        "--disable-gpu".to_string(),
        "--no-sandbox".to_string(),
        "--disable-setuid-sandbox".to_string(),
        "--no-pdf-header-footer".to_string(),
        format!("--print-to-pdf={}", pdf.display()),
        format!("file://{}", page.display()),
    ]
}
