//! Persisted quote snapshots
//!
//! Totals are stored alongside the rows they were computed from. Reloading
//! recomputes from the rows and must land within one cent of every stored total.

use crate::money::within_tolerance;
use crate::pricing::compute_totals;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::quote::{
    AddonRecord, LineItem, LineItemRecord, QuoteTotals, QuoteTotalsRecord, items_from_records,
    to_records,
};

/// Everything written for one saved quote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteSnapshot {
    pub totals: QuoteTotalsRecord,
    pub lines: Vec<LineItemRecord>,
    pub addons: Vec<AddonRecord>,
    /// Save time (Unix millis)
    pub saved_at: i64,
}

/// Compute totals and rows from one item snapshot
pub fn save_snapshot(
    quote_id: &str,
    items: &[LineItem],
    global_discount_pct: f64,
    global_tax_pct: f64,
) -> QuoteSnapshot {
    let totals = compute_totals(items, global_discount_pct, global_tax_pct);
    let (lines, addons) = to_records(quote_id, items);

    tracing::info!(
        quote_id = %quote_id,
        lines = lines.len(),
        addons = addons.len(),
        grand_total = totals.grand_total,
        "Quote snapshot prepared"
    );

    QuoteSnapshot {
        totals: QuoteTotalsRecord::from_totals(quote_id, &totals, global_discount_pct, global_tax_pct),
        lines,
        addons,
        saved_at: shared::util::now_millis(),
    }
}

/// Recompute totals from reloaded items and compare with the stored record
///
/// Returns the recomputed totals, or `SnapshotMismatch` listing every column
/// off by more than one cent.
pub fn verify_snapshot(record: &QuoteTotalsRecord, items: &[LineItem]) -> AppResult<QuoteTotals> {
    let totals = compute_totals(
        items,
        record.global_discount_percentage,
        record.global_tax_percentage,
    );
    let recomputed = QuoteTotalsRecord::from_totals(
        record.quote_id.clone(),
        &totals,
        record.global_discount_percentage,
        record.global_tax_percentage,
    );

    let mismatched: Vec<&'static str> = record
        .amounts()
        .iter()
        .zip(recomputed.amounts().iter())
        .filter(|((_, stored), (_, fresh))| !within_tolerance(*stored, *fresh))
        .map(|((name, _), _)| *name)
        .collect();

    if mismatched.is_empty() {
        return Ok(totals);
    }

    tracing::warn!(
        quote_id = %record.quote_id,
        fields = ?mismatched,
        "Stored totals differ from recomputed totals"
    );
    Err(AppError::with_message(
        ErrorCode::SnapshotMismatch,
        format!(
            "stored totals of quote {} do not match its line items",
            record.quote_id
        ),
    )
    .with_detail("quote_id", record.quote_id.clone())
    .with_detail("fields", mismatched))
}

/// Rebuild line items from a snapshot and check them against its totals
pub fn reload_snapshot(snapshot: &QuoteSnapshot) -> AppResult<Vec<LineItem>> {
    let items = items_from_records(&snapshot.lines, &snapshot.addons);
    verify_snapshot(&snapshot.totals, &items)?;
    Ok(items)
}
