//! Persistence rows for saved quotes
//!
//! Flat snapshot fields on the quote record, plus per-line-item and per-addon
//! tables keyed by quote id. Row types derive `sqlx::FromRow` behind the `db`
//! feature; the persistence layer computes nothing itself.

use super::{Addon, LineItem, QuoteTotals, RecurringInterval};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Totals snapshot written at save time
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct QuoteTotalsRecord {
    pub quote_id: String,
    pub global_discount_percentage: f64,
    pub global_tax_percentage: f64,
    pub subtotal_one_time: f64,
    pub total_recurring_monthly: f64,
    pub total_recurring_quarterly: f64,
    pub total_recurring_yearly: f64,
    pub discount_amount: f64,
    pub total_one_time: f64,
    pub tax_amount: f64,
    pub grand_total: f64,
    pub annual_recurring: f64,
    // === Commercial metrics (operator-only columns) ===
    pub budget_variable_costs: f64,
    pub budget_tooling: f64,
    pub internal_vat: f64,
    pub expected_margin: f64,
    pub total_taxable_base: f64,
    pub final_client_price: f64,
}

impl QuoteTotalsRecord {
    /// Map computed totals 1:1 onto the snapshot columns
    pub fn from_totals(
        quote_id: impl Into<String>,
        totals: &QuoteTotals,
        global_discount_percentage: f64,
        global_tax_percentage: f64,
    ) -> Self {
        let metrics = &totals.commercial_metrics;
        Self {
            quote_id: quote_id.into(),
            global_discount_percentage,
            global_tax_percentage,
            subtotal_one_time: totals.subtotal_one_time,
            total_recurring_monthly: totals.subtotal_recurring_monthly,
            total_recurring_quarterly: totals.subtotal_recurring_quarterly,
            total_recurring_yearly: totals.subtotal_recurring_yearly,
            discount_amount: totals.discount_amount,
            total_one_time: totals.total_one_time,
            tax_amount: totals.tax_amount,
            grand_total: totals.grand_total,
            annual_recurring: totals.annual_recurring,
            budget_variable_costs: metrics.budget_variable_costs,
            budget_tooling: metrics.budget_tooling,
            internal_vat: metrics.vat,
            expected_margin: metrics.expected_margin,
            total_taxable_base: metrics.total_taxable_base,
            final_client_price: metrics.final_client_price,
        }
    }

    /// Named monetary columns, in a stable order (used for snapshot comparison)
    pub fn amounts(&self) -> [(&'static str, f64); 15] {
        [
            ("subtotal_one_time", self.subtotal_one_time),
            ("total_recurring_monthly", self.total_recurring_monthly),
            ("total_recurring_quarterly", self.total_recurring_quarterly),
            ("total_recurring_yearly", self.total_recurring_yearly),
            ("discount_amount", self.discount_amount),
            ("total_one_time", self.total_one_time),
            ("tax_amount", self.tax_amount),
            ("grand_total", self.grand_total),
            ("annual_recurring", self.annual_recurring),
            ("budget_variable_costs", self.budget_variable_costs),
            ("budget_tooling", self.budget_tooling),
            ("internal_vat", self.internal_vat),
            ("expected_margin", self.expected_margin),
            ("total_taxable_base", self.total_taxable_base),
            ("final_client_price", self.final_client_price),
        ]
    }
}

/// Per-line-item row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct LineItemRecord {
    pub quote_id: String,
    pub id: String,
    pub sort_order: i32,
    pub service_id: Option<String>,
    pub service_name: String,
    pub variant_name: Option<String>,
    pub unit_price: f64,
    pub quantity: f64,
    pub line_total: f64,
    pub setup_fee: f64,
    pub discount_percentage: f64,
    pub discount_amount: f64,
    pub is_recurring: bool,
    /// Canonical interval string ("month" | "quarter" | "year")
    pub recurring_interval: Option<String>,
    pub recurring_count: Option<i32>,
    pub internal_note: Option<String>,
}

/// Per-addon row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AddonRecord {
    pub quote_id: String,
    pub line_item_id: String,
    pub id: String,
    pub sort_order: i32,
    pub name: String,
    pub unit_price: f64,
    pub quantity: f64,
    pub line_total: f64,
    pub is_recurring: bool,
    pub recurring_interval: Option<String>,
    pub recurring_count: Option<i32>,
}

fn interval_to_column(interval: Option<RecurringInterval>) -> Option<String> {
    interval.map(|i| i.as_str().to_string())
}

fn interval_from_column(value: Option<&str>, row_id: &str) -> Option<RecurringInterval> {
    let raw = value?;
    match raw.parse() {
        Ok(interval) => Some(interval),
        Err(e) => {
            tracing::warn!(row_id = %row_id, error = %e, "Ignoring unknown interval in stored row");
            None
        }
    }
}

fn count_to_column(count: Option<u32>) -> Option<i32> {
    count.map(|c| i32::try_from(c).unwrap_or(i32::MAX))
}

fn count_from_column(count: Option<i32>) -> Option<u32> {
    count.and_then(|c| u32::try_from(c).ok())
}

/// Split line items into their persistence rows, preserving list order
pub fn to_records(quote_id: &str, items: &[LineItem]) -> (Vec<LineItemRecord>, Vec<AddonRecord>) {
    let mut lines = Vec::with_capacity(items.len());
    let mut addons = Vec::new();

    for (idx, item) in items.iter().enumerate() {
        lines.push(LineItemRecord {
            quote_id: quote_id.to_string(),
            id: item.id.clone(),
            sort_order: idx as i32,
            service_id: item.service_id.clone(),
            service_name: item.service_name.clone(),
            variant_name: item.variant_name.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
            line_total: item.line_total,
            setup_fee: item.setup_fee,
            discount_percentage: item.discount_percentage,
            discount_amount: item.discount_amount,
            is_recurring: item.is_recurring,
            recurring_interval: interval_to_column(item.recurring_interval),
            recurring_count: count_to_column(item.recurring_count),
            internal_note: item.internal_note.clone(),
        });

        for (addon_idx, addon) in item.addons.iter().enumerate() {
            addons.push(AddonRecord {
                quote_id: quote_id.to_string(),
                line_item_id: item.id.clone(),
                id: addon.id.clone(),
                sort_order: addon_idx as i32,
                name: addon.name.clone(),
                unit_price: addon.unit_price,
                quantity: addon.quantity,
                line_total: addon.line_total,
                is_recurring: addon.is_recurring,
                recurring_interval: interval_to_column(addon.recurring_interval),
                recurring_count: count_to_column(addon.recurring_count),
            });
        }
    }

    (lines, addons)
}

/// Rebuild line items from stored rows (rows may arrive in any order)
///
/// Addon rows whose parent is missing are dropped with a warning.
pub fn items_from_records(lines: &[LineItemRecord], addons: &[AddonRecord]) -> Vec<LineItem> {
    let mut addons_by_parent: HashMap<&str, Vec<&AddonRecord>> = HashMap::new();
    for addon in addons {
        addons_by_parent
            .entry(addon.line_item_id.as_str())
            .or_default()
            .push(addon);
    }

    let mut sorted: Vec<&LineItemRecord> = lines.iter().collect();
    sorted.sort_by_key(|line| line.sort_order);

    let items: Vec<LineItem> = sorted
        .into_iter()
        .map(|line| {
            let mut children = addons_by_parent.remove(line.id.as_str()).unwrap_or_default();
            children.sort_by_key(|addon| addon.sort_order);

            LineItem {
                id: line.id.clone(),
                service_id: line.service_id.clone(),
                service_name: line.service_name.clone(),
                variant_name: line.variant_name.clone(),
                unit_price: line.unit_price,
                quantity: line.quantity,
                line_total: line.line_total,
                setup_fee: line.setup_fee,
                discount_percentage: line.discount_percentage,
                discount_amount: line.discount_amount,
                is_recurring: line.is_recurring,
                recurring_interval: interval_from_column(line.recurring_interval.as_deref(), &line.id),
                recurring_count: count_from_column(line.recurring_count),
                addons: children
                    .into_iter()
                    .map(|addon| Addon {
                        id: addon.id.clone(),
                        name: addon.name.clone(),
                        unit_price: addon.unit_price,
                        quantity: addon.quantity,
                        line_total: addon.line_total,
                        is_recurring: addon.is_recurring,
                        recurring_interval: interval_from_column(
                            addon.recurring_interval.as_deref(),
                            &addon.id,
                        ),
                        recurring_count: count_from_column(addon.recurring_count),
                    })
                    .collect(),
                internal_note: line.internal_note.clone(),
            }
        })
        .collect();

    for (parent, orphans) in addons_by_parent {
        tracing::warn!(line_item_id = %parent, count = orphans.len(), "Dropping addon rows without a parent line item");
    }

    items
}
