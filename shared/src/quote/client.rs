//! Client-facing quote projection
//!
//! Carries no operator-only data: no commercial metrics, no internal notes.

use super::{Addon, BillingSchedule, ClientQuoteTotals, LineItem, RecurringInterval};
use serde::{Deserialize, Serialize};

/// Line item as shown on the shareable client view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientLineItem {
    pub id: String,
    pub service_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_name: Option<String>,
    pub unit_price: f64,
    pub quantity: f64,
    pub line_total: f64,
    pub setup_fee: f64,
    pub discount_percentage: f64,
    pub discount_amount: f64,
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_interval: Option<RecurringInterval>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_count: Option<u32>,
    pub addons: Vec<Addon>,
}

impl From<&LineItem> for ClientLineItem {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.clone(),
            service_name: item.service_name.clone(),
            variant_name: item.variant_name.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
            line_total: item.line_total,
            setup_fee: item.setup_fee,
            discount_percentage: item.discount_percentage,
            discount_amount: item.discount_amount,
            is_recurring: item.is_recurring,
            recurring_interval: item.recurring_interval,
            recurring_count: item.recurring_count,
            addons: item.addons.clone(),
        }
    }
}

impl From<&ClientLineItem> for LineItem {
    fn from(item: &ClientLineItem) -> Self {
        Self {
            id: item.id.clone(),
            service_id: None,
            service_name: item.service_name.clone(),
            variant_name: item.variant_name.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
            line_total: item.line_total,
            setup_fee: item.setup_fee,
            discount_percentage: item.discount_percentage,
            discount_amount: item.discount_amount,
            is_recurring: item.is_recurring,
            recurring_interval: item.recurring_interval,
            recurring_count: item.recurring_count,
            addons: item.addons.clone(),
            internal_note: None,
        }
    }
}

/// Everything the client-facing read path renders
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientQuote {
    pub items: Vec<ClientLineItem>,
    pub totals: ClientQuoteTotals,
    pub schedule: BillingSchedule,
}
