//! Line item configuration and editing
//!
//! Every derived amount (`line_total`, `discount_amount`) is recomputed here
//! with Decimal and stored rounded to cents, so the calculators downstream only
//! ever read amounts.

use crate::money::{apply_percentage, to_decimal, to_f64};
use rust_decimal::prelude::*;
use shared::quote::{Addon, CatalogService, LineItem, ParameterImpact, RecurringInterval, VariantOption};
use shared::util::new_id;

/// `max(0, base + variant modifier + Σ parameter impact × value)`
pub fn configured_unit_price(
    service: &CatalogService,
    variant: Option<&VariantOption>,
    parameters: &[ParameterImpact],
) -> Decimal {
    let mut price = to_decimal(service.base_price);
    if let Some(variant) = variant {
        price += to_decimal(variant.price_modifier);
    }
    for param in parameters {
        price += to_decimal(param.price_impact) * to_decimal(param.value);
    }
    price.max(Decimal::ZERO)
}

/// `unit_price × quantity`
#[inline]
fn line_total(unit_price: f64, quantity: f64) -> f64 {
    to_f64(to_decimal(unit_price) * to_decimal(quantity))
}

/// Configure a new line item from the catalog
///
/// Recurring services start on the catalog's default cadence, falling back to
/// monthly with the interval's default count.
pub fn build_line_item(
    service: &CatalogService,
    variant: Option<&VariantOption>,
    parameters: &[ParameterImpact],
    quantity: f64,
) -> LineItem {
    let unit_price = to_f64(configured_unit_price(service, variant, parameters));

    let (recurring_interval, recurring_count) = if service.is_recurring {
        let interval = service.default_interval.unwrap_or(RecurringInterval::Month);
        let count = service.default_count.unwrap_or_else(|| interval.default_count());
        (Some(interval), Some(count))
    } else {
        (None, None)
    };

    let item = LineItem {
        id: new_id(),
        service_id: Some(service.id.clone()),
        service_name: service.name.clone(),
        variant_name: variant.map(|v| v.name.clone()),
        unit_price,
        quantity,
        line_total: line_total(unit_price, quantity),
        setup_fee: service.setup_fee,
        discount_percentage: 0.0,
        discount_amount: 0.0,
        is_recurring: service.is_recurring,
        recurring_interval,
        recurring_count,
        addons: vec![],
        internal_note: None,
    };

    tracing::debug!(
        service = %item.service_name,
        unit_price = item.unit_price,
        quantity = item.quantity,
        line_total = item.line_total,
        "Line item configured"
    );
    item
}

/// Create an addon; recurring addons start with the interval's default count
pub fn build_addon(
    name: impl Into<String>,
    unit_price: f64,
    quantity: f64,
    recurrence: Option<RecurringInterval>,
) -> Addon {
    Addon {
        id: new_id(),
        name: name.into(),
        unit_price,
        quantity,
        line_total: line_total(unit_price, quantity),
        is_recurring: recurrence.is_some(),
        recurring_interval: recurrence,
        recurring_count: recurrence.map(RecurringInterval::default_count),
    }
}

/// Set the item discount percentage and recompute its amount
pub fn set_discount(item: &mut LineItem, discount_pct: f64) {
    item.discount_percentage = discount_pct;
    item.discount_amount = to_f64(apply_percentage(
        to_decimal(item.line_total),
        to_decimal(discount_pct),
    ));
}

/// Override the discount amount, leaving the stored percentage untouched
pub fn override_discount_amount(item: &mut LineItem, amount: f64) {
    item.discount_amount = amount;
}

/// Change the quantity and recompute `line_total`
///
/// `discount_amount` stays frozen; it is only recomputed by [`set_discount`]
/// or [`reconfigure`].
pub fn edit_quantity(item: &mut LineItem, quantity: f64) {
    item.quantity = quantity;
    item.line_total = line_total(item.unit_price, quantity);
}

/// Turn recurrence on (with the interval's default count) or off
pub fn set_recurrence(item: &mut LineItem, recurrence: Option<RecurringInterval>) {
    item.is_recurring = recurrence.is_some();
    item.recurring_interval = recurrence;
    item.recurring_count = recurrence.map(RecurringInterval::default_count);
}

/// Change the number of simulated occurrences
pub fn set_recurring_count(item: &mut LineItem, count: u32) {
    item.recurring_count = Some(count);
}

/// Apply a new configuration from the configuration screen
///
/// Replaces price and addons, recomputes every line total and reapplies the
/// stored discount percentage to the new line total.
pub fn reconfigure(item: &mut LineItem, unit_price: f64, mut addons: Vec<Addon>) {
    for addon in &mut addons {
        addon.line_total = line_total(addon.unit_price, addon.quantity);
    }
    item.unit_price = unit_price;
    item.line_total = line_total(unit_price, item.quantity);
    item.addons = addons;
    set_discount(item, item.discount_percentage);
}

/// Change an addon's quantity and recompute its line total
pub fn edit_addon_quantity(addon: &mut Addon, quantity: f64) {
    addon.quantity = quantity;
    addon.line_total = line_total(addon.unit_price, quantity);
}

/// Change the number of simulated occurrences of a recurring addon
pub fn set_addon_recurring_count(addon: &mut Addon, count: u32) {
    addon.recurring_count = Some(count);
}
