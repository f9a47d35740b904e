//! Driving final markup to a print surface

use tracing::{debug, info, warn};

use super::layout::PrintLayout;
use super::surface::{PrintSurface, SurfaceGuard, SurfaceOpener};
use crate::error::DocumentError;

/// Prints final markup through surfaces from an opener
#[derive(Debug, Clone)]
pub struct PrintMaterializer<O> {
    opener: O,
    layout: PrintLayout,
}

impl<O: SurfaceOpener> PrintMaterializer<O> {
    pub fn new(opener: O) -> Self {
        Self::with_layout(opener, PrintLayout::default())
    }

    pub fn with_layout(opener: O, layout: PrintLayout) -> Self {
        Self { opener, layout }
    }

    pub fn layout(&self) -> &PrintLayout {
        &self.layout
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }

    /// Print `markup` on a new surface.
    ///
    /// A refused surface fails with `BlockedPrintSurface` before anything is
    /// written. Once open, the surface is closed on every path: success,
    /// print failure, or the future being dropped during the settle delay.
    pub async fn print(&self, markup: &str) -> Result<(), DocumentError> {
        debug!(markup_len = markup.len(), "PrintMaterializer::print: called");
        let surface = self.opener.open().map_err(|e| match e {
            DocumentError::BlockedPrintSurface { .. } => e,
            other => DocumentError::BlockedPrintSurface {
                reason: other.to_string(),
            },
        })?;

        let mut guard = SurfaceGuard::new(surface);
        let result = self.drive(&mut guard, markup).await;
        guard.close();

        match &result {
            Ok(()) => info!("Print job issued"),
            Err(e) => warn!(error = %e, "Print job failed"),
        }
        result
    }

    async fn drive<S: PrintSurface>(&self, guard: &mut SurfaceGuard<S>, markup: &str) -> Result<(), DocumentError> {
        let css = self.layout.stylesheet();
        guard.surface()?.inject_stylesheet(&css).await?;
        guard.surface()?.write_body(markup).await?;

        debug!(delay = ?self.layout.settle_delay, "PrintMaterializer::drive: waiting for layout");
        tokio::time::sleep(self.layout.settle_delay).await;

        guard.surface()?.print().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct Journal(Arc<Mutex<Vec<String>>>);

    impl Journal {
        fn push(&self, event: impl Into<String>) {
            self.0.lock().unwrap().push(event.into());
        }

        fn events(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    struct FakeSurface {
        journal: Journal,
        fail_print: bool,
    }

    #[async_trait]
    impl PrintSurface for FakeSurface {
        async fn inject_stylesheet(&mut self, css: &str) -> Result<(), DocumentError> {
            self.journal.push(format!("css:{}", css.lines().next().unwrap_or_default()));
            Ok(())
        }

        async fn write_body(&mut self, markup: &str) -> Result<(), DocumentError> {
            self.journal.push(format!("body:{}", markup));
            Ok(())
        }

        async fn print(&mut self) -> Result<(), DocumentError> {
            if self.fail_print {
                return Err(DocumentError::PrintFailed {
                    message: "printer offline".to_string(),
                });
            }
            self.journal.push("print");
            Ok(())
        }

        fn close(&mut self) {
            self.journal.push("close");
        }
    }

    struct FakeOpener {
        journal: Journal,
        blocked: bool,
        fail_print: bool,
    }

    impl SurfaceOpener for FakeOpener {
        type Surface = FakeSurface;

        fn open(&self) -> Result<FakeSurface, DocumentError> {
            if self.blocked {
                return Err(DocumentError::BlockedPrintSurface {
                    reason: "popup blocked".to_string(),
                });
            }
            self.journal.push("open");
            Ok(FakeSurface {
                journal: self.journal.clone(),
                fail_print: self.fail_print,
            })
        }
    }

    fn materializer(journal: &Journal, blocked: bool, fail_print: bool) -> PrintMaterializer<FakeOpener> {
        let layout = PrintLayout {
            settle_delay: Duration::ZERO,
            ..PrintLayout::default()
        };
        PrintMaterializer::with_layout(
            FakeOpener {
                journal: journal.clone(),
                blocked,
                fail_print,
            },
            layout,
        )
    }

    #[tokio::test]
    async fn test_print_sequence() {
        let journal = Journal::default();
        materializer(&journal, false, false).print("<p>Surat</p>").await.unwrap();

        assert_eq!(
            journal.events(),
            vec![
                "open",
                "css:@page { size: A4; margin: 20mm; }",
                "body:<p>Surat</p>",
                "print",
                "close",
            ]
        );
    }

    #[tokio::test]
    async fn test_blocked_surface_prints_nothing() {
        let journal = Journal::default();
        let err = materializer(&journal, true, false).print("<p>x</p>").await.unwrap_err();

        assert!(matches!(err, DocumentError::BlockedPrintSurface { .. }));
        assert!(journal.events().is_empty());
    }

    #[tokio::test]
    async fn test_print_failure_still_closes() {
        let journal = Journal::default();
        let err = materializer(&journal, false, true).print("<p>x</p>").await.unwrap_err();

        assert!(matches!(err, DocumentError::PrintFailed { .. }));
        assert_eq!(journal.events().last().map(String::as_str), Some("close"));
    }

    #[tokio::test]
    async fn test_cancelled_print_closes_surface() {
        let journal = Journal::default();
        let layout = PrintLayout {
            settle_delay: Duration::from_secs(30),
            ..PrintLayout::default()
        };
        let materializer = Arc::new(PrintMaterializer::with_layout(
            FakeOpener {
                journal: journal.clone(),
                blocked: false,
                fail_print: false,
            },
            layout,
        ));

        let task = {
            let materializer = materializer.clone();
            tokio::spawn(async move { materializer.print("<p>x</p>").await })
        };

        // Wait until the body is written and the task sits in the settle delay
        for _ in 0..200 {
            if journal.events().iter().any(|e| e.starts_with("body:")) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());

        let events = journal.events();
        assert!(!events.contains(&"print".to_string()));
        assert_eq!(events.last().map(String::as_str), Some("close"));
    }
}
