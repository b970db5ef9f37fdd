//! # CLI Error Type
//!
//! Failures outside the pure core: settings, the catalog file, output.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Settings::load ── ConfigError ──────┐                                  │
//! │  load_catalog ──── io / toml ────────┤                                  │
//! │  Catalog::* ────── CoreError ────────┼──► CliError ──► code + message   │
//! │  render ────────── serde_json ───────┘          │                       │
//! │                                                 ▼                       │
//! │                          stderr (text or JSON) + process exit code      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use recargo_core::CoreError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid settings: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Cannot read catalog {path}: {source}")]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse catalog {path}: {source}")]
    CatalogParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Cannot encode output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Machine-readable error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Plan id does not exist
    NotFound,
    /// Request or catalog record out of range
    ValidationError,
    /// Plan exists but cannot be used as requested
    BusinessLogic,
    /// Settings or catalog file unusable
    ConfigError,
    Internal,
}

impl ErrorCode {
    /// Process exit status for this category.
    pub fn exit_status(self) -> u8 {
        match self {
            ErrorCode::NotFound => 3,
            ErrorCode::ValidationError => 4,
            ErrorCode::BusinessLogic => 5,
            ErrorCode::ConfigError => 6,
            ErrorCode::Internal => 1,
        }
    }
}

impl CliError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CliError::Settings(_) | CliError::CatalogRead { .. } | CliError::CatalogParse { .. } => {
                ErrorCode::ConfigError
            }
            CliError::Core(err) => match err {
                CoreError::PlanNotFound(_) => ErrorCode::NotFound,
                CoreError::Validation(_) => ErrorCode::ValidationError,
                CoreError::PlanInactive(_) | CoreError::InstallmentMismatch { .. } => {
                    ErrorCode::BusinessLogic
                }
                // Only raised while validating the catalog file.
                CoreError::UnknownCompany { .. } | CoreError::UnknownCard { .. } => {
                    ErrorCode::ConfigError
                }
            },
            CliError::Json(_) => ErrorCode::Internal,
        }
    }
}

/// What `--json` prints when a command fails.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&CliError> for ErrorReport {
    fn from(err: &CliError) -> Self {
        ErrorReport {
            code: err.code(),
            message: err.to_string(),
        }
    }
}
