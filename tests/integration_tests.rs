use async_trait::async_trait;
use pagepress::{
    ExportEngine, ExportError, ExportJob, FailureKind, LocalStorage, PageRenderer, PageServer,
    PrintLayout, RenderRequest, Result,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn job_for(out_path: &str) -> ExportJob {
    ExportJob {
        request: RenderRequest {
            url: "http://localhost:4321/capability-statement.html".to_string(),
            layout: PrintLayout::default(),
            nav_timeout: Duration::from_secs(5),
            settle: Duration::from_millis(0),
        },
        out_path: out_path.to_string(),
    }
}

#[derive(Clone, Default)]
struct TrackedServer {
    stopped: Arc<AtomicBool>,
}

#[async_trait]
impl PageServer for TrackedServer {
    async fn start(&mut self) -> Result<()> {
        Ok(())
    }

    async fn wait_ready(&mut self) -> Result<()> {
        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        self.stopped.store(true, Ordering::SeqCst);
        Ok(())
    }
}

struct FixtureRenderer {
    pdf: Option<Vec<u8>>,
}

impl FixtureRenderer {
    fn with_pdf(bytes: &[u8]) -> Self {
        Self {
            pdf: Some(bytes.to_vec()),
        }
    }

    fn not_found() -> Self {
        Self { pdf: None }
    }
}

#[async_trait]
impl PageRenderer for FixtureRenderer {
    async fn render(&self, request: &RenderRequest) -> Result<Vec<u8>> {
        match &self.pdf {
            Some(bytes) => Ok(bytes.clone()),
            None => Err(ExportError::NavigationError {
                url: request.url.clone(),
                reason: "HTTP 404".to_string(),
            }),
        }
    }
}

#[tokio::test]
async fn test_flow_produces_pdf_file_with_signature() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let server = TrackedServer::default();
    let stopped = server.stopped.clone();

    let engine = ExportEngine::new(
        server,
        FixtureRenderer::with_pdf(b"%PDF-1.7 fixture body"),
        storage,
    );
    let report = engine
        .run(job_for("assets/policies/capability.pdf"))
        .await
        .unwrap();

    assert_eq!(report.out_path, "assets/policies/capability.pdf");
    assert!(stopped.load(Ordering::SeqCst));

    let written = temp_dir.path().join("assets/policies/capability.pdf");
    let bytes = std::fs::read(written).unwrap();
    assert!(!bytes.is_empty());
    assert!(bytes.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn test_missing_page_fails_as_navigation_and_cleans_up() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let server = TrackedServer::default();
    let stopped = server.stopped.clone();

    let engine = ExportEngine::new(server, FixtureRenderer::not_found(), storage);
    let result = engine.run(job_for("capability.pdf")).await;

    let err = result.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Navigation);
    assert!(stopped.load(Ordering::SeqCst));
    assert!(!temp_dir.path().join("capability.pdf").exists());
}

#[tokio::test]
async fn test_rerun_overwrites_output_path() {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path().to_str().unwrap().to_string();

    for body in [b"%PDF-1.7 first".as_slice(), b"%PDF-1.7 second".as_slice()] {
        let engine = ExportEngine::new(
            TrackedServer::default(),
            FixtureRenderer::with_pdf(body),
            LocalStorage::new(base.clone()),
        );
        engine.run(job_for("capability.pdf")).await.unwrap();
    }

    let bytes = std::fs::read(temp_dir.path().join("capability.pdf")).unwrap();
    assert_eq!(bytes, b"%PDF-1.7 second");
}

mod real_browser {
    use super::*;
    use httpmock::prelude::*;
    use pagepress::ChromeRenderer;

    const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html>
  <head><title>Capability Statement</title></head>
  <body>
    <nav class="navbar"><a class="btn">Download</a></nav>
    <div class="hero-illustration">decoration</div>
    <h1>Capability Statement</h1>
    <p>Body copy that must survive into the PDF.</p>
  </body>
</html>"#;

    #[tokio::test]
    #[ignore = "requires a local Chrome/Chromium install"]
    async fn test_end_to_end_render_against_real_chrome() {
        let page_host = MockServer::start();
        page_host.mock(|when, then| {
            when.method(GET).path("/capability-statement.html");
            then.status(200)
                .header("Content-Type", "text/html")
                .body(PAGE_HTML);
        });

        let request = RenderRequest {
            url: page_host.url("/capability-statement.html"),
            layout: PrintLayout::default(),
            nav_timeout: Duration::from_secs(30),
            settle: Duration::from_millis(200),
        };

        let renderer = ChromeRenderer::new(std::env::var("CHROME_PATH").ok());
        let pdf = renderer.render(&request).await.unwrap();

        assert!(pdf.starts_with(b"%PDF-"));
        assert!(pdf.len() > 1_000);
    }
}
