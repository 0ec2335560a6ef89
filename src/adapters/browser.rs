use crate::domain::model::{PrintLayout, RenderRequest};
use crate::domain::ports::PageRenderer;
use crate::utils::error::{ExportError, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetEmulatedMediaParams;
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;

/// Headless Chrome renderer. Each render launches a fresh browser and
/// tears it down on every exit path, so a navigation failure cannot leak
/// a Chrome process.
pub struct ChromeRenderer {
    chrome_path: Option<String>,
}

impl ChromeRenderer {
    pub fn new(chrome_path: Option<String>) -> Self {
        Self { chrome_path }
    }

    async fn launch(&self) -> Result<(Browser, JoinHandle<()>)> {
        // Sandboxing is off so the renderer works inside containers and
        // CI runners without extra privileges.
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-setuid-sandbox");
        if let Some(path) = &self.chrome_path {
            builder = builder.chrome_executable(path);
        }
        let config = builder
            .build()
            .map_err(|reason| ExportError::BrowserLaunchError { reason })?;

        let (browser, mut handler) =
            Browser::launch(config)
                .await
                .map_err(|e| ExportError::BrowserLaunchError {
                    reason: e.to_string(),
                })?;

        // The handler drives all CDP traffic; it runs until the browser
        // connection closes.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok((browser, handler_task))
    }

    async fn drive(browser: &Browser, request: &RenderRequest) -> Result<Vec<u8>> {
        let page = browser.new_page("about:blank").await.map_err(|e| {
            ExportError::BrowserLaunchError {
                reason: format!("could not open a page: {}", e),
            }
        })?;

        // Screen media keeps the site's on-screen CSS in effect even
        // though the output is print-formatted.
        page.execute(SetEmulatedMediaParams::builder().media("screen").build())
            .await
            .map_err(|e| ExportError::NavigationError {
                url: request.url.clone(),
                reason: format!("media emulation failed: {}", e),
            })?;

        navigate(&page, request).await?;

        if !request.settle.is_zero() {
            // Load fired, but late asset fetches may still be in flight.
            tokio::time::sleep(request.settle).await;
        }

        page.evaluate(request.layout.injection_script())
            .await
            .map_err(|e| ExportError::PdfRenderError {
                reason: format!("style injection failed: {}", e),
            })?;

        let pdf = page
            .pdf(pdf_params(&request.layout))
            .await
            .map_err(|e| ExportError::PdfRenderError {
                reason: e.to_string(),
            })?;

        Ok(pdf)
    }
}

#[async_trait]
impl PageRenderer for ChromeRenderer {
    async fn render(&self, request: &RenderRequest) -> Result<Vec<u8>> {
        let (mut browser, handler_task) = self.launch().await?;

        let outcome = Self::drive(&browser, request).await;

        if let Err(e) = browser.close().await {
            tracing::debug!("Browser close failed, process will be killed on drop: {}", e);
        }
        let _ = browser.wait().await;
        handler_task.abort();

        outcome
    }
}

async fn navigate(page: &Page, request: &RenderRequest) -> Result<()> {
    let navigation = async {
        page.goto(request.url.as_str()).await?;
        page.wait_for_navigation().await?;
        Ok::<_, chromiumoxide::error::CdpError>(())
    };

    match tokio::time::timeout(request.nav_timeout, navigation).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(ExportError::NavigationError {
            url: request.url.clone(),
            reason: e.to_string(),
        }),
        Err(_) => Err(ExportError::NavigationError {
            url: request.url.clone(),
            reason: format!("timed out after {:?}", request.nav_timeout),
        }),
    }
}

fn mm_to_inches(mm: f64) -> f64 {
    mm / 25.4
}

fn pdf_params(layout: &PrintLayout) -> PrintToPdfParams {
    let (width_mm, height_mm) = layout.paper.dimensions_mm();

    PrintToPdfParams::builder()
        .print_background(layout.print_background)
        .paper_width(mm_to_inches(width_mm))
        .paper_height(mm_to_inches(height_mm))
        .margin_top(mm_to_inches(layout.margins.top_mm))
        .margin_right(mm_to_inches(layout.margins.right_mm))
        .margin_bottom(mm_to_inches(layout.margins.bottom_mm))
        .margin_left(mm_to_inches(layout.margins.left_mm))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_to_inches() {
        assert!((mm_to_inches(25.4) - 1.0).abs() < 1e-9);
        assert!((mm_to_inches(210.0) - 8.2677).abs() < 1e-3);
    }

    #[test]
    fn test_pdf_params_mirror_the_layout() {
        let layout = PrintLayout::default();
        let params = pdf_params(&layout);

        assert_eq!(params.print_background, Some(true));
        assert!((params.paper_width.unwrap() - 8.2677).abs() < 1e-3);
        assert!((params.paper_height.unwrap() - 11.6929).abs() < 1e-3);
        assert!((params.margin_top.unwrap() - 14.0 / 25.4).abs() < 1e-9);
        assert!((params.margin_bottom.unwrap() - 16.0 / 25.4).abs() < 1e-9);
    }

    #[test]
    fn test_pdf_params_without_background() {
        let layout = PrintLayout {
            print_background: false,
            ..PrintLayout::default()
        };
        assert_eq!(pdf_params(&layout).print_background, Some(false));
    }
}
