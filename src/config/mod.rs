pub mod toml_config;

use crate::domain::model::{ExportJob, Margins, PaperSize, PrintLayout, RenderRequest};
use crate::utils::error::{ExportError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, validate_positive_number,
    validate_range, validate_url, validate_url_path, Validate,
};
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "pagepress")]
#[command(about = "Renders a static site page to a paginated PDF through headless Chrome")]
pub struct CliConfig {
    /// TCP port for the local static file server
    #[arg(long, env = "PDF_PORT", default_value_t = 4321)]
    pub port: u16,

    /// Directory tree served as static files
    #[arg(long, env = "PUBLISH_DIR", default_value = ".")]
    pub publish_dir: String,

    /// URL path of the page to render
    #[arg(long, env = "CAP_PAGE", default_value = "/capability-statement.html")]
    pub page_path: String,

    /// Output file path for the generated PDF
    #[arg(
        long,
        env = "OUT_PDF",
        default_value = "assets/policies/Sorellon-Capability-Statement.pdf"
    )]
    pub out_pdf: String,

    /// Static server command; `{dir}` and `{port}` are substituted
    #[arg(
        long,
        env = "PDF_SERVER_CMD",
        default_value = "npx http-server {dir} -p {port} -c-1 --silent"
    )]
    pub server_command: String,

    /// Chrome/Chromium binary override (auto-detected when unset)
    #[arg(long, env = "CHROME_PATH")]
    pub chrome_path: Option<String>,

    /// Print format
    #[arg(long, value_enum, default_value = "a4")]
    pub paper: PaperSize,

    /// Page margins in mm: top,right,bottom,left
    #[arg(long, value_delimiter = ',', default_values_t = [14.0, 14.0, 16.0, 14.0])]
    pub margins_mm: Vec<f64>,

    /// CSS selectors hidden in the PDF output
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = [String::from(".navbar .btn"), String::from(".hero-illustration")]
    )]
    pub hide: Vec<String>,

    /// Skip background graphics in the PDF
    #[arg(long)]
    pub no_background: bool,

    /// Navigation timeout; generous to tolerate slow asset loads
    #[arg(long, default_value_t = 120)]
    pub nav_timeout_secs: u64,

    /// How long to wait for the static server to answer HTTP
    #[arg(long, default_value_t = 15)]
    pub ready_timeout_secs: u64,

    /// Quiet period after the load event, as a network-idle proxy
    #[arg(long, default_value_t = 500)]
    pub settle_ms: u64,

    /// Treat any failure as fatal, with distinct exit codes per kind
    #[arg(long, env = "PDF_STRICT")]
    pub strict: bool,

    /// Optional TOML file overriding flags and environment variables
    #[arg(long, env = "PDF_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn page_url(&self) -> String {
        format!("http://localhost:{}{}", self.port, self.page_path)
    }

    pub fn layout(&self) -> PrintLayout {
        let margins = match self.margins_mm.as_slice() {
            [top, right, bottom, left] => Margins {
                top_mm: *top,
                right_mm: *right,
                bottom_mm: *bottom,
                left_mm: *left,
            },
            _ => Margins::default(),
        };

        PrintLayout {
            paper: self.paper,
            margins,
            hidden_selectors: self.hide.clone(),
            print_background: !self.no_background,
        }
    }

    /// The explicit job value handed to the engine; the orchestration
    /// logic never reads ambient environment state itself.
    pub fn export_job(&self) -> ExportJob {
        ExportJob {
            request: RenderRequest {
                url: self.page_url(),
                layout: self.layout(),
                nav_timeout: Duration::from_secs(self.nav_timeout_secs),
                settle: Duration::from_millis(self.settle_ms),
            },
            out_path: self.out_pdf.clone(),
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(ExportError::InvalidConfigValueError {
                field: "port".to_string(),
                value: "0".to_string(),
                reason: "Port 0 would be chosen by the OS; the page URL needs a fixed port"
                    .to_string(),
            });
        }

        validate_path("publish_dir", &self.publish_dir)?;
        validate_url_path("page_path", &self.page_path)?;
        validate_url("page_url", &self.page_url())?;
        validate_non_empty_string("out_pdf", &self.out_pdf)?;
        validate_file_extension("out_pdf", &self.out_pdf, "pdf")?;
        validate_non_empty_string("server_command", &self.server_command)?;
        validate_positive_number("nav_timeout_secs", self.nav_timeout_secs, 1)?;
        validate_positive_number("ready_timeout_secs", self.ready_timeout_secs, 1)?;
        validate_range("settle_ms", self.settle_ms, 0, 60_000)?;

        if self.margins_mm.len() != 4 {
            return Err(ExportError::InvalidConfigValueError {
                field: "margins_mm".to_string(),
                value: format!("{:?}", self.margins_mm),
                reason: "Expected four values: top,right,bottom,left".to_string(),
            });
        }
        for margin in &self.margins_mm {
            validate_range("margins_mm", *margin, 0.0, 100.0)?;
        }

        Ok(())
    }
}
