//! Quote totals calculator
//!
//! Calculation flow:
//! 1. Classify every charge ([`collect_charges`])
//! 2. One-time charges sum into `subtotal_one_time`
//! 3. Recurring contributions sum into the bucket of their own interval
//! 4. Global discount and tax apply to the one-time subtotal only
//! 5. Commercial metrics split the discounted one-time total

use super::charges::collect_charges;
use super::metrics::compute_commercial_metrics;
use crate::money::{apply_percentage, to_decimal, to_f64};
use rust_decimal::prelude::*;
use shared::quote::{LineItem, QuoteTotals, RecurringInterval};

/// Compute the full totals breakdown of a quote
///
/// Never fails: out-of-range inputs still produce numbers, validation is the
/// editing surface's job.
pub fn compute_totals(
    items: &[LineItem],
    global_discount_pct: f64,
    global_tax_pct: f64,
) -> QuoteTotals {
    let charges = collect_charges(items);

    let subtotal_one_time: Decimal = charges.one_time.iter().map(|c| c.amount).sum();

    let mut recurring = [Decimal::ZERO; 3];
    for contribution in &charges.recurring {
        recurring[contribution.interval.index()] += contribution.amount;
    }

    let discount_amount = apply_percentage(subtotal_one_time, to_decimal(global_discount_pct));
    let total_one_time = subtotal_one_time - discount_amount;
    let tax_amount = apply_percentage(total_one_time, to_decimal(global_tax_pct));
    let grand_total = total_one_time + tax_amount;

    let annual_recurring: Decimal = RecurringInterval::ALL
        .iter()
        .map(|interval| recurring[interval.index()] * Decimal::from(interval.periods_per_year()))
        .sum();

    let totals = QuoteTotals {
        subtotal_one_time: to_f64(subtotal_one_time),
        subtotal_recurring_monthly: to_f64(recurring[RecurringInterval::Month.index()]),
        subtotal_recurring_quarterly: to_f64(recurring[RecurringInterval::Quarter.index()]),
        subtotal_recurring_yearly: to_f64(recurring[RecurringInterval::Year.index()]),
        discount_amount: to_f64(discount_amount),
        total_one_time: to_f64(total_one_time),
        tax_amount: to_f64(tax_amount),
        grand_total: to_f64(grand_total),
        annual_recurring: to_f64(annual_recurring),
        recurring_details: charges.recurring.iter().map(|c| c.to_detail()).collect(),
        commercial_metrics: compute_commercial_metrics(to_f64(total_one_time)),
    };

    tracing::debug!(
        items = items.len(),
        subtotal_one_time = totals.subtotal_one_time,
        grand_total = totals.grand_total,
        annual_recurring = totals.annual_recurring,
        "Quote totals computed"
    );

    totals
}
