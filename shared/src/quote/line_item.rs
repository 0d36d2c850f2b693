//! Quote line items and addons

use super::RecurringInterval;
use serde::{Deserialize, Serialize};

/// Recurrence settings resolved with defaults applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    pub interval: RecurringInterval,
    /// Number of billing occurrences to simulate
    pub count: u32,
}

/// Resolve recurrence settings for a recurring entity.
///
/// A missing interval is treated as monthly; a missing count falls back to the
/// interval's default (12 monthly, 4 quarterly, 1 yearly).
fn resolve_cadence(
    is_recurring: bool,
    interval: Option<RecurringInterval>,
    count: Option<u32>,
) -> Option<Cadence> {
    if !is_recurring {
        return None;
    }
    let interval = interval.unwrap_or(RecurringInterval::Month);
    Some(Cadence {
        interval,
        count: count.unwrap_or_else(|| interval.default_count()),
    })
}

/// Addon attached to a line item
///
/// Cadence is independent of the parent: a recurring addon may sit on a
/// one-time item and vice versa.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Addon {
    pub id: String,
    pub name: String,
    pub unit_price: f64,
    pub quantity: f64,
    /// unit_price × quantity
    pub line_total: f64,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_interval: Option<RecurringInterval>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_count: Option<u32>,
}

impl Addon {
    /// Recurrence settings with defaults applied, `None` for one-time addons
    pub fn cadence(&self) -> Option<Cadence> {
        resolve_cadence(self.is_recurring, self.recurring_interval, self.recurring_count)
    }
}

/// Quoted service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub id: String,
    /// Catalog service reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    pub service_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_name: Option<String>,

    // === Pricing ===
    pub unit_price: f64,
    pub quantity: f64,
    /// unit_price × quantity, before the item discount
    pub line_total: f64,
    /// One-time fee, billed even when the item itself recurs
    #[serde(default)]
    pub setup_fee: f64,

    // === Discount ===
    /// Item discount percentage (0-100)
    #[serde(default)]
    pub discount_percentage: f64,
    /// Absolute discount, frozen at the moment the discount was set
    #[serde(default)]
    pub discount_amount: f64,

    // === Recurrence ===
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_interval: Option<RecurringInterval>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_count: Option<u32>,

    #[serde(default)]
    pub addons: Vec<Addon>,

    /// Operator-only note, never shown to the client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_note: Option<String>,
}

impl LineItem {
    /// Recurrence settings with defaults applied, `None` for one-time items
    pub fn cadence(&self) -> Option<Cadence> {
        resolve_cadence(self.is_recurring, self.recurring_interval, self.recurring_count)
    }

    /// Display name including the variant, e.g. "Hosting (Pro)"
    pub fn display_name(&self) -> String {
        match &self.variant_name {
            Some(variant) if !variant.is_empty() => format!("{} ({})", self.service_name, variant),
            _ => self.service_name.clone(),
        }
    }
}
