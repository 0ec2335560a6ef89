use crate::domain::model::RenderRequest;
use crate::utils::error::Result;
use async_trait::async_trait;

/// The static file server the browser navigates against. Implementations
/// own the underlying process; `stop` must be safe to call on every exit
/// path, including before `start` or after a failed `wait_ready`.
#[async_trait]
pub trait PageServer: Send + Sync {
    async fn start(&mut self) -> Result<()>;

    /// Block until the server answers HTTP, or fail with a
    /// dependency-start error once the bounded deadline passes.
    async fn wait_ready(&mut self) -> Result<()>;

    async fn stop(&mut self) -> Result<()>;
}

/// Renders one page to PDF bytes. Implementations must release the
/// browser process on both the success and the error path.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render(&self, request: &RenderRequest) -> Result<Vec<u8>>;
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
