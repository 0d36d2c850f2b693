//! Shareable client view

use crate::pricing::{ScheduleOptions, compute_totals, generate_billing_schedule};
use chrono::NaiveDate;
use shared::quote::{ClientLineItem, ClientQuote, LineItem};

/// Project a quote for the client
///
/// Same calculators as the editor, so totals and schedule match it exactly;
/// commercial metrics and internal notes are dropped.
pub fn build_client_quote(
    items: &[LineItem],
    global_discount_pct: f64,
    global_tax_pct: f64,
    start_date: NaiveDate,
    options: &ScheduleOptions,
) -> ClientQuote {
    let totals = compute_totals(items, global_discount_pct, global_tax_pct);
    let schedule = generate_billing_schedule(items, global_tax_pct, start_date, options);

    ClientQuote {
        items: items.iter().map(ClientLineItem::from).collect(),
        totals: totals.for_client(),
        schedule,
    }
}
