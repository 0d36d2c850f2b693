//! Quote-level surfaces built on the calculators
//!
//! - [`QuoteInput`] / [`QuoteReport`]: editor view of a quote
//! - [`build_client_quote`]: shareable client projection
//! - [`save_snapshot`] / [`verify_snapshot`]: persistence consistency

mod client_view;
mod input;
mod snapshot;

pub use client_view::build_client_quote;
pub use input::{DEFAULT_TAX_RATE, FormattedTotals, QuoteInput, QuoteReport, build_report};
pub use snapshot::{QuoteSnapshot, reload_snapshot, save_snapshot, verify_snapshot};
