//! Utility module - logging setup
//!
//! Error types live in `shared::error` and are re-exported here.

pub mod logger;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
