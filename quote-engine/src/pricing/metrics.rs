//! Commercial metrics
//!
//! Internal allocation of the taxable base into variable costs, tooling and
//! margin. Operator-only: never part of the client view.

use crate::money::{apply_percentage, round2, to_decimal, to_f64};
use rust_decimal::prelude::*;
use shared::quote::CommercialMetrics;

/// Share of the base budgeted for variable costs
pub const VARIABLE_COSTS_PCT: Decimal = Decimal::from_parts(40, 0, 0, false, 0);
/// Share of the base budgeted for tooling
pub const TOOLING_PCT: Decimal = Decimal::from_parts(10, 0, 0, false, 0);
/// Share of the base expected as margin
pub const MARGIN_PCT: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
/// Modelling VAT rate, fixed regardless of the quote tax setting
pub const INTERNAL_VAT_PCT: Decimal = Decimal::from_parts(22, 0, 0, false, 0);

/// Split a taxable base into budget, margin and internal VAT
///
/// The base is rounded to cents first; the three shares then sum back to it
/// within one cent.
pub fn compute_commercial_metrics(taxable_base: f64) -> CommercialMetrics {
    let base = round2(to_decimal(taxable_base));
    let vat = apply_percentage(base, INTERNAL_VAT_PCT);

    CommercialMetrics {
        budget_variable_costs: to_f64(apply_percentage(base, VARIABLE_COSTS_PCT)),
        budget_tooling: to_f64(apply_percentage(base, TOOLING_PCT)),
        vat: to_f64(vat),
        expected_margin: to_f64(apply_percentage(base, MARGIN_PCT)),
        total_taxable_base: to_f64(base),
        final_client_price: to_f64(base + vat),
    }
}
