//! Quote Financial Engine
//!
//! Pure calculations over an immutable line item snapshot:
//! - Line item configuration and editing operations
//! - Totals split by billing cadence
//! - Internal commercial metrics
//! - Simulated billing schedule

mod charges;
mod line_item;
mod metrics;
mod schedule;
mod totals;

pub use charges::*;
pub use line_item::*;
pub use metrics::*;
pub use schedule::*;
pub use totals::*;
