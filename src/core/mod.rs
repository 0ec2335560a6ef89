pub mod exporter;

pub use crate::domain::model::{ExportJob, ExportReport};
pub use crate::domain::ports::{PageRenderer, PageServer, Storage};
pub use crate::utils::error::Result;
