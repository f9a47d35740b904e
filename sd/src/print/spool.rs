//! Spool-directory print surface
//!
//! Each job becomes a standalone HTML file in the spool directory, handed to
//! an external print command (e.g. `lp`, or a headless browser wrapper) as
//! its last argument.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::surface::{PrintSurface, SurfaceOpener};
use crate::error::DocumentError;

/// Opens [`SpoolSurface`]s in a directory
#[derive(Debug, Clone)]
pub struct SpoolOpener {
    dir: PathBuf,
    command: Vec<String>,
    keep_spool: bool,
}

impl SpoolOpener {
    /// `command` is the program followed by its leading arguments
    pub fn new(dir: impl Into<PathBuf>, command: Vec<String>) -> Self {
        Self {
            dir: dir.into(),
            command,
            keep_spool: false,
        }
    }

    /// Leave spooled files behind after the job
    pub fn keep_spool(mut self, keep: bool) -> Self {
        self.keep_spool = keep;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SurfaceOpener for SpoolOpener {
    type Surface = SpoolSurface;

    fn open(&self) -> Result<SpoolSurface, DocumentError> {
        debug!(dir = ?self.dir, "SpoolOpener::open: called");
        if self.command.is_empty() {
            return Err(DocumentError::BlockedPrintSurface {
                reason: "no print command configured".to_string(),
            });
        }

        std::fs::create_dir_all(&self.dir).map_err(|e| DocumentError::BlockedPrintSurface {
            reason: format!("cannot create spool directory {}: {}", self.dir.display(), e),
        })?;

        let path = self.dir.join(format!("{}.html", Uuid::now_v7()));
        debug!(?path, "SpoolOpener::open: new spool file");
        Ok(SpoolSurface {
            path,
            command: self.command.clone(),
            keep_spool: self.keep_spool,
            stylesheet: String::new(),
            written: false,
        })
    }
}

/// One spooled print job
#[derive(Debug)]
pub struct SpoolSurface {
    path: PathBuf,
    command: Vec<String>,
    keep_spool: bool,
    stylesheet: String,
    written: bool,
}

impl SpoolSurface {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Wrap a letter body into a standalone printable document
pub fn standalone_document(stylesheet: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"id\">\n<head>\n<meta charset=\"utf-8\">\n<style>\n{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        stylesheet, body
    )
}

#[async_trait]
impl PrintSurface for SpoolSurface {
    async fn inject_stylesheet(&mut self, css: &str) -> Result<(), DocumentError> {
        self.stylesheet.push_str(css);
        Ok(())
    }

    async fn write_body(&mut self, markup: &str) -> Result<(), DocumentError> {
        debug!(path = ?self.path, "SpoolSurface::write_body: called");
        tokio::fs::write(&self.path, standalone_document(&self.stylesheet, markup)).await?;
        self.written = true;
        Ok(())
    }

    async fn print(&mut self) -> Result<(), DocumentError> {
        if !self.written {
            return Err(DocumentError::PrintFailed {
                message: "nothing written to the print surface".to_string(),
            });
        }

        let (program, args) = self.command.split_first().ok_or_else(|| DocumentError::PrintFailed {
            message: "no print command configured".to_string(),
        })?;

        debug!(%program, ?args, path = ?self.path, "SpoolSurface::print: running print command");
        // A cancelled print must not leave the command running
        let status = Command::new(program)
            .args(args)
            .arg(&self.path)
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| DocumentError::PrintFailed {
                message: format!("failed to run {}: {}", program, e),
            })?;

        if !status.success() {
            return Err(DocumentError::PrintFailed {
                message: format!("{} exited with {}", program, status),
            });
        }

        info!(path = %self.path.display(), "Spooled document sent to printer");
        Ok(())
    }

    fn close(&mut self) {
        if self.keep_spool || !self.written {
            debug!(path = ?self.path, "SpoolSurface::close: leaving spool file");
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = ?self.path, "SpoolSurface::close: removed spool file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "Failed to remove spool file"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_empty_command_is_blocked() {
        let dir = TempDir::new().unwrap();
        let err = SpoolOpener::new(dir.path(), vec![]).open().unwrap_err();
        assert!(matches!(err, DocumentError::BlockedPrintSurface { .. }));
    }

    #[test]
    fn test_spool_names_are_unique() {
        let dir = TempDir::new().unwrap();
        let opener = SpoolOpener::new(dir.path(), vec!["true".to_string()]);
        let a = opener.open().unwrap();
        let b = opener.open().unwrap();
        assert_ne!(a.path(), b.path());
        assert_eq!(a.path().extension().and_then(|e| e.to_str()), Some("html"));
    }

    #[test]
    fn test_standalone_document() {
        let doc = standalone_document("body { margin: 0; }\n", "<p>Surat</p>");
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<style>\nbody { margin: 0; }\n</style>"));
        assert!(doc.contains("<body>\n<p>Surat</p>\n</body>"));
    }

    #[tokio::test]
    async fn test_close_removes_file_unless_kept() {
        let dir = TempDir::new().unwrap();

        let mut surface = SpoolOpener::new(dir.path(), vec!["true".to_string()]).open().unwrap();
        surface.write_body("<p>x</p>").await.unwrap();
        let path = surface.path().to_path_buf();
        assert!(path.exists());
        surface.close();
        assert!(!path.exists());

        let mut kept = SpoolOpener::new(dir.path(), vec!["true".to_string()])
            .keep_spool(true)
            .open()
            .unwrap();
        kept.write_body("<p>x</p>").await.unwrap();
        kept.close();
        assert!(kept.path().exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_cancelled_print_kills_command() {
        let dir = TempDir::new().unwrap();
        let command = ["sh", "-c", r#"sleep 1; touch "$0.done""#].map(String::from).to_vec();
        let mut surface = SpoolOpener::new(dir.path(), command).open().unwrap();
        surface.write_body("<p>x</p>").await.unwrap();
        let marker = PathBuf::from(format!("{}.done", surface.path().display()));

        let result = tokio::time::timeout(Duration::from_millis(200), surface.print()).await;
        assert!(result.is_err(), "print should still be running");

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(!marker.exists(), "print command kept running after cancellation");
    }
}
