use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Config file error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Failed to start static server `{command}`: {reason}")]
    ServerSpawnError { command: String, reason: String },

    #[error("Static server at {url} not ready after {waited_ms}ms")]
    ServerReadyError { url: String, waited_ms: u64 },

    #[error("Failed to launch headless browser: {reason}")]
    BrowserLaunchError { reason: String },

    #[error("Navigation to {url} failed: {reason}")]
    NavigationError { url: String, reason: String },

    #[error("PDF rendering failed: {reason}")]
    PdfRenderError { reason: String },

    #[error("Invalid value for `{field}` ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

/// Closed set of failure categories, so callers can decide whether a
/// missing PDF is fatal without parsing error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Config,
    DependencyStart,
    Navigation,
    Export,
}

impl ExportError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ExportError::TomlError(_)
            | ExportError::InvalidConfigValueError { .. }
            | ExportError::MissingConfigError { .. } => FailureKind::Config,
            ExportError::HttpError(_)
            | ExportError::ServerSpawnError { .. }
            | ExportError::ServerReadyError { .. }
            | ExportError::BrowserLaunchError { .. } => FailureKind::DependencyStart,
            ExportError::NavigationError { .. } => FailureKind::Navigation,
            ExportError::IoError(_) | ExportError::PdfRenderError { .. } => FailureKind::Export,
        }
    }

    /// Exit code used in strict mode. Best-effort mode never exits non-zero.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            FailureKind::Config => 2,
            FailureKind::DependencyStart => 3,
            FailureKind::Navigation => 4,
            FailureKind::Export => 5,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ExportError::TomlError(_) => "Check the --config file for syntax errors",
            ExportError::InvalidConfigValueError { .. }
            | ExportError::MissingConfigError { .. } => {
                "Check CLI flags and PDF_* environment variables"
            }
            ExportError::ServerSpawnError { .. } => {
                "Check that the static server binary is installed and on PATH"
            }
            ExportError::ServerReadyError { .. } => {
                "Check that the port is free and increase --ready-timeout-secs on loaded machines"
            }
            ExportError::BrowserLaunchError { .. } => {
                "Install Chrome/Chromium or point CHROME_PATH at the binary"
            }
            ExportError::NavigationError { .. } => {
                "Check that the page path exists under the publish directory"
            }
            ExportError::IoError(_) | ExportError::PdfRenderError { .. } => {
                "Check that the output path is writable"
            }
            ExportError::HttpError(_) => "Check the local HTTP environment and proxy settings",
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kinds_map_to_distinct_exit_codes() {
        let spawn = ExportError::ServerSpawnError {
            command: "npx http-server".to_string(),
            reason: "not found".to_string(),
        };
        let nav = ExportError::NavigationError {
            url: "http://localhost:4321/x.html".to_string(),
            reason: "timed out".to_string(),
        };
        let export = ExportError::PdfRenderError {
            reason: "print failed".to_string(),
        };
        let config = ExportError::MissingConfigError {
            field: "out_pdf".to_string(),
        };

        assert_eq!(spawn.kind(), FailureKind::DependencyStart);
        assert_eq!(nav.kind(), FailureKind::Navigation);
        assert_eq!(export.kind(), FailureKind::Export);
        assert_eq!(config.kind(), FailureKind::Config);

        let codes = [
            config.exit_code(),
            spawn.exit_code(),
            nav.exit_code(),
            export.exit_code(),
        ];
        assert_eq!(codes, [2, 3, 4, 5]);
    }

    #[test]
    fn test_ready_timeout_is_dependency_start() {
        let err = ExportError::ServerReadyError {
            url: "http://localhost:4321/".to_string(),
            waited_ms: 15000,
        };
        assert_eq!(err.kind(), FailureKind::DependencyStart);
        assert!(err.to_string().contains("15000ms"));
    }
}
