use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Supported print formats. Dimensions are physical paper sizes in mm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    A4,
    Letter,
    Legal,
}

impl PaperSize {
    pub fn dimensions_mm(&self) -> (f64, f64) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
        }
    }

    /// Keyword accepted by the CSS `@page size` descriptor.
    pub fn css_keyword(&self) -> &'static str {
        match self {
            PaperSize::A4 => "A4",
            PaperSize::Letter => "letter",
            PaperSize::Legal => "legal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top_mm: f64,
    pub right_mm: f64,
    pub bottom_mm: f64,
    pub left_mm: f64,
}

impl Margins {
    /// CSS shorthand, clockwise from top.
    pub fn css(&self) -> String {
        format!(
            "{}mm {}mm {}mm {}mm",
            self.top_mm, self.right_mm, self.bottom_mm, self.left_mm
        )
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top_mm: 14.0,
            right_mm: 14.0,
            bottom_mm: 16.0,
            left_mm: 14.0,
        }
    }
}

/// Print-time styling applied to the page before export: page geometry
/// plus a set of selectors that must not appear in the PDF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintLayout {
    pub paper: PaperSize,
    pub margins: Margins,
    pub hidden_selectors: Vec<String>,
    pub print_background: bool,
}

impl Default for PrintLayout {
    fn default() -> Self {
        Self {
            paper: PaperSize::A4,
            margins: Margins::default(),
            hidden_selectors: vec![".navbar .btn".to_string(), ".hero-illustration".to_string()],
            print_background: true,
        }
    }
}

impl PrintLayout {
    /// Stylesheet injected ahead of printing. The `@page` rule keeps the
    /// in-page pagination in sync with the printToPDF paper settings.
    pub fn stylesheet(&self) -> String {
        let mut css = format!(
            "@page {{ size: {}; margin: {}; }}\n",
            self.paper.css_keyword(),
            self.margins.css()
        );
        for selector in &self.hidden_selectors {
            css.push_str(&format!("{} {{ display: none !important; }}\n", selector));
        }
        css
    }

    /// JavaScript that appends the stylesheet to `document.head`, the
    /// same mechanism as a devtools add-style-tag.
    pub fn injection_script(&self) -> String {
        let payload = serde_json::Value::String(self.stylesheet()).to_string();
        format!(
            "(() => {{ const style = document.createElement('style'); \
             style.textContent = {}; document.head.appendChild(style); }})()",
            payload
        )
    }
}

/// Everything the renderer needs: where to go and how to print it.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub url: String,
    pub layout: PrintLayout,
    pub nav_timeout: Duration,
    /// Grace period after the load event, standing in for a network-idle
    /// wait the protocol client does not expose directly.
    pub settle: Duration,
}

#[derive(Debug, Clone)]
pub struct ExportJob {
    pub request: RenderRequest,
    pub out_path: String,
}

#[derive(Debug, Clone)]
pub struct ExportReport {
    pub out_path: String,
    pub bytes_written: usize,
}
