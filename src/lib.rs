pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{browser::ChromeRenderer, server::SpawnedServer, storage::LocalStorage};
pub use config::{toml_config::FileConfig, CliConfig};
pub use core::exporter::ExportEngine;
pub use domain::model::{ExportJob, ExportReport, Margins, PaperSize, PrintLayout, RenderRequest};
pub use domain::ports::{PageRenderer, PageServer, Storage};
pub use utils::error::{ExportError, FailureKind, Result};
