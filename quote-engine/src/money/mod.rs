//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted to `f64`
//! for storage/serialization. Every percentage in the engine goes through
//! [`apply_percentage`] so the editor, the client view and document output round
//! identically.

mod format;

pub use format::{CurrencyFormat, format_currency};

use rust_decimal::prelude::*;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::quote::{Addon, LineItem};

/// Rounding strategy for monetary values (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed unit price or setup fee (€1,000,000)
const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per item or addon
const MAX_QUANTITY: f64 = 9999.0;
/// Maximum simulated occurrences for one recurring entity (10 years monthly)
pub const MAX_RECURRING_COUNT: u32 = 120;

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str, code: ErrorCode) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::invalid_field(
            code,
            field_name,
            format!("{} must be a finite number, got {}", field_name, value),
        ));
    }
    Ok(())
}

fn require_price(value: f64, field_name: &str, code: ErrorCode) -> AppResult<()> {
    require_finite(value, field_name, code)?;
    if value < 0.0 {
        return Err(AppError::invalid_field(
            code,
            field_name,
            format!("{} must be non-negative, got {}", field_name, value),
        ));
    }
    if value > MAX_PRICE {
        return Err(AppError::invalid_field(
            code,
            field_name,
            format!(
                "{} exceeds maximum allowed ({}), got {}",
                field_name, MAX_PRICE, value
            ),
        ));
    }
    Ok(())
}

fn require_quantity(value: f64, field_name: &str) -> AppResult<()> {
    require_finite(value, field_name, ErrorCode::InvalidQuantity)?;
    if value <= 0.0 {
        return Err(AppError::invalid_field(
            ErrorCode::InvalidQuantity,
            field_name,
            format!("{} must be positive, got {}", field_name, value),
        ));
    }
    if value > MAX_QUANTITY {
        return Err(AppError::invalid_field(
            ErrorCode::InvalidQuantity,
            field_name,
            format!(
                "{} exceeds maximum allowed ({}), got {}",
                field_name, MAX_QUANTITY, value
            ),
        ));
    }
    Ok(())
}

fn require_recurring_count(
    is_recurring: bool,
    count: Option<u32>,
    field_name: &str,
) -> AppResult<()> {
    if !is_recurring {
        return Ok(());
    }
    match count {
        Some(0) => Err(AppError::invalid_field(
            ErrorCode::InvalidRecurrence,
            field_name,
            format!("{} must be positive for a recurring entry", field_name),
        )),
        Some(c) if c > MAX_RECURRING_COUNT => Err(AppError::invalid_field(
            ErrorCode::InvalidRecurrence,
            field_name,
            format!(
                "{} exceeds maximum allowed ({}), got {}",
                field_name, MAX_RECURRING_COUNT, c
            ),
        )),
        _ => Ok(()),
    }
}

fn require_percentage(value: f64, field_name: &str, code: ErrorCode) -> AppResult<()> {
    require_finite(value, field_name, code)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(AppError::invalid_field(
            code,
            field_name,
            format!("{} must be between 0 and 100, got {}", field_name, value),
        ));
    }
    Ok(())
}

/// Validate an addon before it is attached to a line item
pub fn validate_addon(addon: &Addon) -> AppResult<()> {
    if addon.name.trim().is_empty() {
        return Err(AppError::invalid_field(
            ErrorCode::RequiredField,
            "name",
            "addon name is required",
        ));
    }
    require_price(addon.unit_price, "unit_price", ErrorCode::InvalidAmount)?;
    require_quantity(addon.quantity, "quantity")?;
    require_price(addon.line_total, "line_total", ErrorCode::InvalidAmount)?;
    require_recurring_count(addon.is_recurring, addon.recurring_count, "recurring_count")?;
    Ok(())
}

/// Validate a line item built by the editing surface
///
/// The calculators never call this; a quote must stay renderable mid-edit.
pub fn validate_line_item(item: &LineItem) -> AppResult<()> {
    if item.service_name.trim().is_empty() {
        return Err(AppError::invalid_field(
            ErrorCode::RequiredField,
            "service_name",
            "service_name is required",
        ));
    }

    require_price(item.unit_price, "unit_price", ErrorCode::InvalidAmount)?;
    require_quantity(item.quantity, "quantity")?;
    require_price(item.line_total, "line_total", ErrorCode::InvalidAmount)?;
    require_price(item.setup_fee, "setup_fee", ErrorCode::InvalidSetupFee)?;
    require_percentage(
        item.discount_percentage,
        "discount_percentage",
        ErrorCode::InvalidDiscount,
    )?;

    // discount_amount may be overridden, but never beyond the line total
    require_finite(item.discount_amount, "discount_amount", ErrorCode::InvalidDiscount)?;
    if item.discount_amount < 0.0 || item.discount_amount > item.line_total {
        return Err(AppError::invalid_field(
            ErrorCode::InvalidDiscount,
            "discount_amount",
            format!(
                "discount_amount must be between 0 and the line total ({}), got {}",
                item.line_total, item.discount_amount
            ),
        ));
    }

    require_recurring_count(item.is_recurring, item.recurring_count, "recurring_count")?;

    for (idx, addon) in item.addons.iter().enumerate() {
        validate_addon(addon).map_err(|e| e.with_detail("addon_index", idx))?;
    }

    Ok(())
}

/// Validate quote-level discount and tax settings
pub fn validate_quote_settings(global_discount_pct: f64, global_tax_pct: f64) -> AppResult<()> {
    require_percentage(
        global_discount_pct,
        "global_discount_percentage",
        ErrorCode::InvalidGlobalDiscount,
    )?;
    require_percentage(
        global_tax_pct,
        "global_tax_percentage",
        ErrorCode::InvalidTaxRate,
    )?;
    Ok(())
}

/// Convert f64 to Decimal for calculation
///
/// Input values should be pre-validated at the editing boundary.
/// If NaN/Infinity somehow reaches here, logs an error and returns ZERO
/// so the quote stays renderable.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "f64 not representable as Decimal (non-finite or out of range), defaulting to zero");
        Decimal::ZERO
    })
}

/// Round to 2 decimal places, half away from zero
///
/// The single rounding boundary shared by calculations and formatting.
#[inline]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round2(value).to_f64().unwrap_or_default()
}

/// `round2(base * pct / 100)`, zero when the product overflows
#[inline]
pub fn apply_percentage(base: Decimal, pct: Decimal) -> Decimal {
    match base.checked_mul(pct) {
        Some(product) => round2(product / Decimal::ONE_HUNDRED),
        None => {
            tracing::error!(base = %base, pct = %pct, "Percentage overflow in monetary calculation, defaulting to zero");
            Decimal::ZERO
        }
    }
}

/// [`apply_percentage`] over storage values
pub fn percentage_of(base: f64, pct: f64) -> f64 {
    to_f64(apply_percentage(to_decimal(base), to_decimal(pct)))
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}

/// True when two values differ by at most one cent
pub fn within_tolerance(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff <= MONEY_TOLERANCE
}
