//! Charge extraction
//!
//! Flattens line items into one-time charges and recurring contributions.
//! Totals and the billing schedule both read from here, so every amount is
//! classified in exactly one place.

use crate::money::{to_decimal, to_f64};
use rust_decimal::prelude::*;
use shared::quote::{LineItem, RecurringDetail, RecurringInterval};

/// Source of a one-time charge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OneTimeSource {
    /// Net amount of a non-recurring item
    Item,
    /// Setup fee of any item
    SetupFee,
    /// Non-recurring addon
    Addon,
}

/// A charge billed once, on the initial payment
#[derive(Debug, Clone, PartialEq)]
pub struct OneTimeCharge {
    pub name: String,
    pub amount: Decimal,
    pub source: OneTimeSource,
}

/// A charge billed `count` times on `interval`
#[derive(Debug, Clone, PartialEq)]
pub struct RecurringContribution {
    pub name: String,
    /// Parent service name, set for addons
    pub parent_name: Option<String>,
    pub amount: Decimal,
    pub interval: RecurringInterval,
    pub count: u32,
    pub is_addon: bool,
}

impl RecurringContribution {
    /// Display row for the totals breakdown
    pub fn to_detail(&self) -> RecurringDetail {
        RecurringDetail {
            name: self.name.clone(),
            parent_name: self.parent_name.clone(),
            amount: to_f64(self.amount),
            interval: self.interval,
            count: self.count,
            is_addon: self.is_addon,
        }
    }
}

/// Every charge of a quote, in line item order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteCharges {
    pub one_time: Vec<OneTimeCharge>,
    pub recurring: Vec<RecurringContribution>,
}

/// Item total net of its own (frozen) discount
#[inline]
pub fn item_net_total(item: &LineItem) -> Decimal {
    to_decimal(item.line_total) - to_decimal(item.discount_amount)
}

/// Classify every amount of every item
///
/// - Non-recurring item: net amount is one-time
/// - Recurring item: net amount recurs on the item's own interval
/// - Setup fees: always one-time
/// - Addons: one-time or recurring on the addon's own interval, whatever the parent does
pub fn collect_charges(items: &[LineItem]) -> QuoteCharges {
    let mut charges = QuoteCharges::default();

    for item in items {
        let net = item_net_total(item);

        match item.cadence() {
            Some(cadence) => charges.recurring.push(RecurringContribution {
                name: item.service_name.clone(),
                parent_name: None,
                amount: net,
                interval: cadence.interval,
                count: cadence.count,
                is_addon: false,
            }),
            None => charges.one_time.push(OneTimeCharge {
                name: item.service_name.clone(),
                amount: net,
                source: OneTimeSource::Item,
            }),
        }

        let setup_fee = to_decimal(item.setup_fee);
        if !setup_fee.is_zero() {
            charges.one_time.push(OneTimeCharge {
                name: format!("Setup: {}", item.service_name),
                amount: setup_fee,
                source: OneTimeSource::SetupFee,
            });
        }

        for addon in &item.addons {
            let amount = to_decimal(addon.line_total);
            match addon.cadence() {
                Some(cadence) => charges.recurring.push(RecurringContribution {
                    name: addon.name.clone(),
                    parent_name: Some(item.service_name.clone()),
                    amount,
                    interval: cadence.interval,
                    count: cadence.count,
                    is_addon: true,
                }),
                None => charges.one_time.push(OneTimeCharge {
                    name: addon.name.clone(),
                    amount,
                    source: OneTimeSource::Addon,
                }),
            }
        }
    }

    charges
}
