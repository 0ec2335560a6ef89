use crate::config::CliConfig;
use crate::domain::model::PaperSize;
use crate::utils::error::{ExportError, Result};
use serde::{Deserialize, Serialize};
use std::fs;

/// Optional TOML layer on top of flags and environment variables.
/// Values present in the file win over CLI/env values, so a checked-in
/// `pagepress.toml` pins the layout regardless of the caller's shell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerSection>,
    pub page: Option<PageSection>,
    pub pdf: Option<PdfSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub port: Option<u16>,
    pub publish_dir: Option<String>,
    pub command: Option<String>,
    pub ready_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSection {
    pub path: Option<String>,
    pub nav_timeout_secs: Option<u64>,
    pub settle_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PdfSection {
    pub out_path: Option<String>,
    pub paper: Option<PaperSize>,
    pub margins_mm: Option<Vec<f64>>,
    pub hide: Option<Vec<String>>,
    pub print_background: Option<bool>,
}

impl FileConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| ExportError::InvalidConfigValueError {
            field: "config".to_string(),
            value: path.to_string(),
            reason: format!("Cannot read file: {}", e),
        })?;
        Ok(toml::from_str(&text)?)
    }

    pub fn apply(self, config: &mut CliConfig) {
        if let Some(server) = self.server {
            if let Some(port) = server.port {
                config.port = port;
            }
            if let Some(publish_dir) = server.publish_dir {
                config.publish_dir = publish_dir;
            }
            if let Some(command) = server.command {
                config.server_command = command;
            }
            if let Some(ready_timeout_secs) = server.ready_timeout_secs {
                config.ready_timeout_secs = ready_timeout_secs;
            }
        }

        if let Some(page) = self.page {
            if let Some(path) = page.path {
                config.page_path = path;
            }
            if let Some(nav_timeout_secs) = page.nav_timeout_secs {
                config.nav_timeout_secs = nav_timeout_secs;
            }
            if let Some(settle_ms) = page.settle_ms {
                config.settle_ms = settle_ms;
            }
        }

        if let Some(pdf) = self.pdf {
            if let Some(out_path) = pdf.out_path {
                config.out_pdf = out_path;
            }
            if let Some(paper) = pdf.paper {
                config.paper = paper;
            }
            if let Some(margins_mm) = pdf.margins_mm {
                config.margins_mm = margins_mm;
            }
            if let Some(hide) = pdf.hide {
                config.hide = hide;
            }
            if let Some(print_background) = pdf.print_background {
                config.no_background = !print_background;
            }
        }
    }
}
