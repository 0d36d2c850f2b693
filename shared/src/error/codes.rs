//! Unified error codes for the quoting workspace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Line item errors
//! - 5xxx: Quote errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Input could not be parsed
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 4xxx: Line Item ====================
    /// Price or amount is not a finite, non-negative number
    InvalidAmount = 4001,
    /// Quantity is not positive or exceeds the maximum
    InvalidQuantity = 4002,
    /// Discount percentage outside [0, 100]
    InvalidDiscount = 4003,
    /// Recurrence count is zero or exceeds the maximum
    InvalidRecurrence = 4004,
    /// Setup fee is negative or not finite
    InvalidSetupFee = 4005,

    // ==================== 5xxx: Quote ====================
    /// Global discount percentage outside [0, 100]
    InvalidGlobalDiscount = 5001,
    /// Tax percentage outside [0, 100]
    InvalidTaxRate = 5002,
    /// Persisted totals do not match a recomputation
    SnapshotMismatch = 5003,

    // ==================== 9xxx: System ====================
    /// Configuration error
    ConfigError = 9002,
    /// I/O error
    IoError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::InvalidFormat => "Input could not be parsed",
            ErrorCode::RequiredField => "Required field is missing",

            // Line item
            ErrorCode::InvalidAmount => "Amount must be a finite, non-negative number",
            ErrorCode::InvalidQuantity => "Quantity must be positive and within bounds",
            ErrorCode::InvalidDiscount => "Discount percentage must be between 0 and 100",
            ErrorCode::InvalidRecurrence => "Recurrence count must be positive and within bounds",
            ErrorCode::InvalidSetupFee => "Setup fee must be a finite, non-negative number",

            // Quote
            ErrorCode::InvalidGlobalDiscount => {
                "Global discount percentage must be between 0 and 100"
            }
            ErrorCode::InvalidTaxRate => "Tax percentage must be between 0 and 100",
            ErrorCode::SnapshotMismatch => "Persisted totals do not match recomputed totals",

            // System
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::IoError => "I/O error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),

            // Line item
            4001 => Ok(ErrorCode::InvalidAmount),
            4002 => Ok(ErrorCode::InvalidQuantity),
            4003 => Ok(ErrorCode::InvalidDiscount),
            4004 => Ok(ErrorCode::InvalidRecurrence),
            4005 => Ok(ErrorCode::InvalidSetupFee),

            // Quote
            5001 => Ok(ErrorCode::InvalidGlobalDiscount),
            5002 => Ok(ErrorCode::InvalidTaxRate),
            5003 => Ok(ErrorCode::SnapshotMismatch),

            // System
            9002 => Ok(ErrorCode::ConfigError),
            9003 => Ok(ErrorCode::IoError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}
