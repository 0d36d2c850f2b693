//! Quote Engine - financial core of the quoting tool
//!
//! # Overview
//!
//! Turns a list of configured line items into every number a quote shows:
//!
//! - **Money** (`money`): Decimal arithmetic, rounding, validation, currency display
//! - **Pricing** (`pricing`): line item editing, totals, commercial metrics, billing schedule
//! - **Quote** (`quote`): editor report, client view, persisted snapshots
//!
//! Every calculator is a pure function over an immutable item snapshot.
//!
//! # Module layout
//!
//! ```text
//! quote-engine/src/
//! ├── core/          # configuration
//! ├── money/         # Decimal helpers and formatting
//! ├── pricing/       # calculators
//! ├── quote/         # quote-level surfaces
//! └── utils/         # logging
//! ```

pub mod core;
pub mod money;
pub mod pricing;
pub mod quote;
pub mod utils;

// Re-export public types
pub use core::Config;
pub use money::{CurrencyFormat, format_currency};
pub use pricing::{
    ScheduleOptions, SteppingMode, build_line_item, compute_commercial_metrics, compute_totals,
    generate_billing_schedule,
};
pub use quote::{QuoteInput, QuoteReport, build_client_quote, build_report, verify_snapshot};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, read configuration and start logging
pub fn setup_environment() -> Config {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        Some(config.log_json),
        config.log_dir.as_deref(),
    );
    config
}
