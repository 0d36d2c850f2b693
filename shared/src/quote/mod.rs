//! Quote data model
//!
//! Types consumed by every surface that shows quote money:
//! - Line items and addons (input to the engine)
//! - Totals, commercial metrics and billing schedule (engine output)
//! - Client-facing projections and persistence rows

pub mod catalog;
pub mod client;
pub mod interval;
pub mod line_item;
pub mod record;
pub mod schedule;
pub mod totals;

// Re-exports
pub use catalog::{CatalogService, ParameterImpact, VariantOption};
pub use client::{ClientLineItem, ClientQuote};
pub use interval::{RecurringInterval, UnknownInterval};
pub use line_item::{Addon, Cadence, LineItem};
pub use record::{AddonRecord, LineItemRecord, QuoteTotalsRecord, items_from_records, to_records};
pub use schedule::{BillingSchedule, BillingScheduleEvent, ChargeKind, ScheduleLine};
pub use totals::{ClientQuoteTotals, CommercialMetrics, QuoteTotals, RecurringDetail};
