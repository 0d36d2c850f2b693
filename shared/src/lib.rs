//! Shared types for the quoting workspace
//!
//! Data model and error types used by the engine, the client-facing view,
//! the document generators and the persistence layer.

pub mod error;
pub mod quote;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use quote::*;
