//! # App Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command Function → Result<T, AppError>                                 │
//! │         │                                                               │
//! │         ├── catalog file unreadable?  ── AppError::Io ──────────┐       │
//! │         ├── catalog file malformed?   ── AppError::Json ────────┤       │
//! │         ├── bad `ID=QTY` argument?    ── AppError::InvalidArgument ─┤   │
//! │         └── order rejected?           ── AppError::Validation ──┤       │
//! │                                                                 ▼       │
//! │                                     stderr: "error[CODE]: message"      │
//! │                                     exit code per ErrorCode             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use shop_core::ValidationError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error codes for machine-readable output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Equipment id not in the catalog
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Not enough stock for a line
    InsufficientStock,

    /// Rental asked for purchase-only equipment
    NotRentalEligible,

    /// Empty cart submitted
    EmptyCart,

    /// Catalog or batch file could not be read or parsed
    InvalidFile,

    /// Bad command-line value
    InvalidArgument,
}

impl ErrorCode {
    /// The wire name, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InsufficientStock => "INSUFFICIENT_STOCK",
            ErrorCode::NotRentalEligible => "NOT_RENTAL_ELIGIBLE",
            ErrorCode::EmptyCart => "EMPTY_CART",
            ErrorCode::InvalidFile => "INVALID_FILE",
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
        }
    }

    /// Process exit status for this code.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorCode::InvalidArgument => 2,
            ErrorCode::InvalidFile => 3,
            _ => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("cannot write output: {0}")]
    Output(#[from] std::io::Error),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation(err) => match err {
                ValidationError::EquipmentNotFound(_) => ErrorCode::NotFound,
                ValidationError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
                ValidationError::NotRentalEligible(_) => ErrorCode::NotRentalEligible,
                ValidationError::EmptyCart => ErrorCode::EmptyCart,
                _ => ErrorCode::ValidationError,
            },
            AppError::Io { .. } | AppError::Json { .. } => ErrorCode::InvalidFile,
            AppError::InvalidArgument(_) => ErrorCode::InvalidArgument,
            AppError::Output(_) => ErrorCode::InvalidFile,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }
}

pub type AppResult<T> = Result<T, AppError>;
