//! Print path: service gating, surface lifecycle, spooling

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;
use suratdesa::print::SpoolOpener;
use suratdesa::{
    DocumentError, DocumentKind, DocumentService, DocumentTypeTag, FixedClock, LetterRecord, MemoryTemplateStore,
    PrintLayout, PrintMaterializer, PrintSurface, RenderMode, SurfaceOpener, Template,
};
use tempfile::TempDir;

#[derive(Clone, Default)]
struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    fn push(&self, event: impl Into<String>) {
        self.0.lock().expect("journal lock").push(event.into());
    }

    fn events(&self) -> Vec<String> {
        self.0.lock().expect("journal lock").clone()
    }
}

struct RecordingSurface {
    journal: Journal,
}

#[async_trait]
impl PrintSurface for RecordingSurface {
    async fn inject_stylesheet(&mut self, _css: &str) -> Result<(), DocumentError> {
        self.journal.push("css");
        Ok(())
    }

    async fn write_body(&mut self, markup: &str) -> Result<(), DocumentError> {
        self.journal.push(format!("body:{}", markup));
        Ok(())
    }

    async fn print(&mut self) -> Result<(), DocumentError> {
        self.journal.push("print");
        Ok(())
    }

    fn close(&mut self) {
        self.journal.push("close");
    }
}

struct RecordingOpener {
    journal: Journal,
    refuse: bool,
}

impl SurfaceOpener for RecordingOpener {
    type Surface = RecordingSurface;

    fn open(&self) -> Result<RecordingSurface, DocumentError> {
        if self.refuse {
            return Err(DocumentError::PrintFailed {
                message: "window.open returned null".to_string(),
            });
        }
        self.journal.push("open");
        Ok(RecordingSurface {
            journal: self.journal.clone(),
        })
    }
}

fn materializer(journal: &Journal, refuse: bool, settle: Duration) -> PrintMaterializer<RecordingOpener> {
    PrintMaterializer::with_layout(
        RecordingOpener {
            journal: journal.clone(),
            refuse,
        },
        PrintLayout {
            settle_delay: settle,
            ..PrintLayout::default()
        },
    )
}

fn service(markup: &str) -> DocumentService<MemoryTemplateStore> {
    let store = MemoryTemplateStore::new().with(Template::new(DocumentKind::PengantarSkck, markup).as_default());
    DocumentService::new(store)
        .expect("renderer")
        .with_clock(FixedClock(NaiveDate::from_ymd_opt(2025, 8, 17).expect("date")))
}

fn skck_record() -> (DocumentTypeTag, LetterRecord) {
    let tag = DocumentTypeTag::Known(DocumentKind::PengantarSkck);
    let record = LetterRecord::from_json(
        &tag,
        json!({"pemohonNIK": {"namaLengkap": "Budi"}, "tujuanPembuatan": "Melamar kerja"}),
    )
    .expect("record");
    (tag, record)
}

#[tokio::test]
async fn test_service_prints_final_markup() {
    let journal = Journal::default();
    let (tag, record) = skck_record();

    let doc = service("<p>{{pemohon.namaLengkap}}: {{tujuanPembuatan}}</p>")
        .print(&tag, &record, &materializer(&journal, false, Duration::ZERO), false)
        .await
        .expect("print");

    assert_eq!(doc.mode, RenderMode::Final);
    assert_eq!(
        journal.events(),
        vec!["open", "css", "body:<p>Budi: Melamar kerja</p>", "print", "close"]
    );
}

#[tokio::test]
async fn test_unresolved_tokens_stop_the_job() {
    let journal = Journal::default();
    let (tag, record) = skck_record();
    let svc = service("<p>{{pemohon.namaLengkap}} {{stempelDesa}}</p>");

    let err = svc
        .print(&tag, &record, &materializer(&journal, false, Duration::ZERO), false)
        .await
        .expect_err("unresolved");
    match err {
        DocumentError::UnresolvedVariables { tokens } => assert_eq!(tokens, vec!["stempelDesa"]),
        other => panic!("unexpected {:?}", other),
    }
    assert!(journal.events().is_empty());

    svc.print(&tag, &record, &materializer(&journal, false, Duration::ZERO), true)
        .await
        .expect("allowed");
    assert!(journal.events().contains(&"body:<p>Budi {{stempelDesa}}</p>".to_string()));
}

#[tokio::test]
async fn test_preview_documents_are_not_printed() {
    let journal = Journal::default();
    let (tag, record) = skck_record();
    let svc = service("<p>{{pemohon.namaLengkap}}</p>");
    let preview = svc.render(&tag, &record, RenderMode::Preview).expect("preview");

    let err = svc
        .print_document(preview, &materializer(&journal, false, Duration::ZERO), true)
        .await
        .expect_err("preview rejected");
    assert!(matches!(err, DocumentError::RenderFailure { .. }));
    assert!(journal.events().is_empty());
}

#[tokio::test]
async fn test_refused_surface_is_blocked() {
    let journal = Journal::default();
    let err = materializer(&journal, true, Duration::ZERO)
        .print("<p>x</p>")
        .await
        .expect_err("blocked");

    assert!(matches!(err, DocumentError::BlockedPrintSurface { .. }));
    assert!(err.is_blocking());
    assert!(journal.events().is_empty());
}

#[tokio::test]
async fn test_timed_out_print_closes_surface() {
    let journal = Journal::default();
    let m = materializer(&journal, false, Duration::from_secs(30));

    let result = tokio::time::timeout(Duration::from_millis(50), m.print("<p>x</p>")).await;

    assert!(result.is_err(), "print should still be settling");
    assert_eq!(journal.events(), vec!["open", "css", "body:<p>x</p>", "close"]);
}

#[tokio::test]
async fn test_spool_runs_command_and_cleans_up() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let opener = SpoolOpener::new(dir.path(), vec!["true".to_string()]);
    let m = PrintMaterializer::with_layout(
        opener,
        PrintLayout {
            settle_delay: Duration::ZERO,
            ..PrintLayout::default()
        },
    );

    m.print("<p>Surat</p>").await.expect("print");

    let left: Vec<_> = std::fs::read_dir(dir.path()).expect("read dir").collect();
    assert!(left.is_empty(), "spool file should be removed");
}

#[tokio::test]
async fn test_spool_failing_command_is_print_failure() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let opener = SpoolOpener::new(dir.path(), vec!["false".to_string()]).keep_spool(true);
    let m = PrintMaterializer::with_layout(
        opener,
        PrintLayout {
            settle_delay: Duration::ZERO,
            ..PrintLayout::default()
        },
    );

    let err = m.print("<p>Surat</p>").await.expect_err("false exits non-zero");
    assert!(matches!(err, DocumentError::PrintFailed { .. }));

    let kept: Vec<_> = std::fs::read_dir(dir.path()).expect("read dir").collect();
    assert_eq!(kept.len(), 1);
}
