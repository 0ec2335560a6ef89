use crate::domain::model::{ExportJob, ExportReport};
use crate::domain::ports::{PageRenderer, PageServer, Storage};
use crate::utils::error::Result;

/// Sequences the export flow: start server, wait for readiness, render,
/// write. The server is stopped on every path out of `run`; the browser
/// lifetime is the renderer's responsibility.
pub struct ExportEngine<S: PageServer, R: PageRenderer, T: Storage> {
    server: S,
    renderer: R,
    storage: T,
}

impl<S: PageServer, R: PageRenderer, T: Storage> ExportEngine<S, R, T> {
    pub fn new(server: S, renderer: R, storage: T) -> Self {
        Self {
            server,
            renderer,
            storage,
        }
    }

    pub async fn run(mut self, job: ExportJob) -> Result<ExportReport> {
        let outcome = self.execute(&job).await;

        // Cleanup invariant: the subprocess dies whether or not any step
        // above succeeded. A failed stop must not mask the real outcome.
        if let Err(e) = self.server.stop().await {
            tracing::warn!("Static server shutdown failed: {}", e);
        }

        outcome
    }

    async fn execute(&mut self, job: &ExportJob) -> Result<ExportReport> {
        tracing::info!("Starting static server");
        self.server.start().await?;

        tracing::info!("Waiting for static server readiness");
        self.server.wait_ready().await?;

        tracing::info!("Rendering {}", job.request.url);
        let pdf = self.renderer.render(&job.request).await?;
        tracing::debug!("Rendered {} bytes of PDF", pdf.len());

        self.storage.write_file(&job.out_path, &pdf).await?;

        Ok(ExportReport {
            out_path: job.out_path.clone(),
            bytes_written: pdf.len(),
        })
    }
}
