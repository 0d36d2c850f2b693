//! Billing schedule generator
//!
//! Simulates the payment calendar of a quote:
//! - One initial payment on the start date with every one-time charge
//! - Recurring payments stepped forward from the start date
//!
//! Amounts are pre-discount: the global discount belongs to the totals, not to
//! the calendar. Zero-amount charges are never billed.

use super::charges::{QuoteCharges, RecurringContribution, collect_charges};
use crate::money::{MAX_RECURRING_COUNT, apply_percentage, round2, to_decimal, to_f64};
use chrono::{Months, NaiveDate};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use shared::error::AppError;
use shared::quote::{
    BillingSchedule, BillingScheduleEvent, ChargeKind, LineItem, RecurringInterval, ScheduleLine,
};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Label of the first event
pub const INITIAL_PAYMENT_LABEL: &str = "Initial payment";

/// How recurring payments are dated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SteppingMode {
    /// Every payment steps on the interval of the first recurring contribution.
    /// Mixed-cadence quotes are simplified (a quarterly charge lands monthly).
    #[default]
    PrimaryInterval,
    /// Each contribution steps on its own interval; same-date charges merge.
    PerContribution,
}

impl SteppingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PrimaryInterval => "primary",
            Self::PerContribution => "per_contribution",
        }
    }
}

impl fmt::Display for SteppingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SteppingMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "primary" | "primary_interval" => Ok(Self::PrimaryInterval),
            "per_contribution" => Ok(Self::PerContribution),
            other => Err(AppError::config(format!(
                "unknown schedule stepping mode: {}",
                other
            ))
            .with_detail("value", other)),
        }
    }
}

/// Schedule generation options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleOptions {
    pub stepping: SteppingMode,
}

/// `start + steps × interval`, clamping the day to the target month's end
///
/// Out-of-range dates saturate at `NaiveDate::MAX` so the calendar keeps its order.
pub fn step_date(start: NaiveDate, interval: RecurringInterval, steps: u32) -> NaiveDate {
    let months = interval.months_per_step().saturating_mul(steps);
    start
        .checked_add_months(Months::new(months))
        .unwrap_or_else(|| {
            tracing::error!(start = %start, months, "Billing date out of range");
            NaiveDate::MAX
        })
}

/// Generate the payment calendar of a quote
///
/// `tax_rate_pct` applies to each event subtotal.
pub fn generate_billing_schedule(
    items: &[LineItem],
    tax_rate_pct: f64,
    start_date: NaiveDate,
    options: &ScheduleOptions,
) -> BillingSchedule {
    let QuoteCharges {
        one_time,
        recurring,
    } = collect_charges(items);
    let tax_rate = to_decimal(tax_rate_pct);

    let initial: Vec<ScheduleLine> = one_time
        .iter()
        .map(|c| line(&c.name, c.amount, ChargeKind::OneTime))
        .filter(|l| l.amount != 0.0)
        .collect();

    // Cadence comes from the first contribution, billable or not
    let primary_interval = recurring.first().map(|c| c.interval);
    let recurring: Vec<RecurringContribution> = recurring
        .into_iter()
        .filter(|c| !round2(c.amount).is_zero() && c.count > 0)
        .map(cap_occurrences)
        .collect();

    let mut events = Vec::new();
    if !initial.is_empty() {
        events.push(build_event(start_date, INITIAL_PAYMENT_LABEL.to_string(), initial, tax_rate));
    }

    let recurring_dates = match options.stepping {
        SteppingMode::PrimaryInterval => match primary_interval {
            Some(interval) => step_on_primary_interval(&recurring, interval, start_date),
            None => vec![],
        },
        SteppingMode::PerContribution => step_per_contribution(&recurring, start_date),
    };
    for (idx, (date, lines)) in recurring_dates.into_iter().enumerate() {
        events.push(build_event(date, format!("Payment #{}", idx + 1), lines, tax_rate));
    }

    let total_contract_value: Decimal = events.iter().map(|e| to_decimal(e.total)).sum();
    let schedule = BillingSchedule {
        events,
        total_contract_value: to_f64(total_contract_value),
    };

    tracing::debug!(
        items = items.len(),
        events = schedule.events.len(),
        stepping = %options.stepping,
        total_contract_value = schedule.total_contract_value,
        "Billing schedule generated"
    );

    schedule
}

/// [`generate_billing_schedule`] starting today
pub fn generate_billing_schedule_from_today(
    items: &[LineItem],
    tax_rate_pct: f64,
    options: &ScheduleOptions,
) -> BillingSchedule {
    generate_billing_schedule(items, tax_rate_pct, shared::util::today(), options)
}

/// Limit simulated occurrences to [`MAX_RECURRING_COUNT`]
fn cap_occurrences(mut contribution: RecurringContribution) -> RecurringContribution {
    if contribution.count > MAX_RECURRING_COUNT {
        tracing::warn!(
            name = %contribution.name,
            count = contribution.count,
            max = MAX_RECURRING_COUNT,
            "Recurring count capped for schedule simulation"
        );
        contribution.count = MAX_RECURRING_COUNT;
    }
    contribution
}

/// Occurrence `i` bills every contribution with `count > i`, dated on the
/// primary interval.
fn step_on_primary_interval(
    recurring: &[RecurringContribution],
    primary: RecurringInterval,
    start_date: NaiveDate,
) -> Vec<(NaiveDate, Vec<ScheduleLine>)> {
    if recurring.iter().any(|c| c.interval != primary) {
        tracing::debug!(
            primary = %primary,
            "Mixed-cadence quote stepped on primary interval"
        );
    }

    let max_occurrences = recurring.iter().map(|c| c.count).max().unwrap_or(0);
    (0..max_occurrences)
        .map(|occurrence| {
            let lines = recurring
                .iter()
                .filter(|c| c.count > occurrence)
                .map(|c| line(&c.name, c.amount, ChargeKind::Recurring))
                .collect();
            (step_date(start_date, primary, occurrence + 1), lines)
        })
        .collect()
}

/// Occurrence `k` of each contribution lands `k + 1` of its own steps after
/// the start; charges falling on the same date share one event.
fn step_per_contribution(
    recurring: &[RecurringContribution],
    start_date: NaiveDate,
) -> Vec<(NaiveDate, Vec<ScheduleLine>)> {
    let mut by_date: BTreeMap<NaiveDate, Vec<ScheduleLine>> = BTreeMap::new();
    for contribution in recurring {
        for occurrence in 0..contribution.count {
            let date = step_date(start_date, contribution.interval, occurrence + 1);
            by_date.entry(date).or_default().push(line(
                &contribution.name,
                contribution.amount,
                ChargeKind::Recurring,
            ));
        }
    }
    by_date.into_iter().collect()
}

fn line(name: &str, amount: Decimal, kind: ChargeKind) -> ScheduleLine {
    ScheduleLine {
        name: name.to_string(),
        amount: to_f64(amount),
        kind,
    }
}

/// Subtotal is the sum of the displayed (rounded) line amounts
fn build_event(
    date: NaiveDate,
    label: String,
    items: Vec<ScheduleLine>,
    tax_rate: Decimal,
) -> BillingScheduleEvent {
    let subtotal: Decimal = items.iter().map(|l| to_decimal(l.amount)).sum();
    let vat = apply_percentage(subtotal, tax_rate);
    BillingScheduleEvent {
        date,
        label,
        items,
        subtotal: to_f64(subtotal),
        vat: to_f64(vat),
        total: to_f64(subtotal + vat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::quote::Addon;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(name: &str, total: f64) -> LineItem {
        LineItem {
            id: name.to_lowercase(),
            service_id: None,
            service_name: name.to_string(),
            variant_name: None,
            unit_price: total,
            quantity: 1.0,
            line_total: total,
            setup_fee: 0.0,
            discount_percentage: 0.0,
            discount_amount: 0.0,
            is_recurring: false,
            recurring_interval: None,
            recurring_count: None,
            addons: vec![],
            internal_note: None,
        }
    }

    fn recurring_item(
        name: &str,
        total: f64,
        interval: RecurringInterval,
        count: Option<u32>,
    ) -> LineItem {
        LineItem {
            is_recurring: true,
            recurring_interval: Some(interval),
            recurring_count: count,
            ..item(name, total)
        }
    }

    fn addon(name: &str, total: f64, interval: Option<RecurringInterval>, count: Option<u32>) -> Addon {
        Addon {
            id: name.to_lowercase(),
            name: name.to_string(),
            unit_price: total,
            quantity: 1.0,
            line_total: total,
            is_recurring: interval.is_some(),
            recurring_interval: interval,
            recurring_count: count,
        }
    }

    fn primary() -> ScheduleOptions {
        ScheduleOptions::default()
    }

    fn per_contribution() -> ScheduleOptions {
        ScheduleOptions {
            stepping: SteppingMode::PerContribution,
        }
    }

    // ========================================================================
    // Primary interval stepping
    // ========================================================================

    #[test]
    fn test_monthly_item_three_payments() {
        let items = vec![recurring_item("Maintenance", 100.0, RecurringInterval::Month, Some(3))];
        let schedule = generate_billing_schedule(&items, 22.0, date(2025, 1, 15), &primary());

        assert_eq!(schedule.events.len(), 3);
        let dates: Vec<NaiveDate> = schedule.events.iter().map(|e| e.date).collect();
        assert_eq!(
            dates,
            vec![date(2025, 2, 15), date(2025, 3, 15), date(2025, 4, 15)]
        );
        assert_eq!(schedule.events[0].label, "Payment #1");
        assert_eq!(schedule.events[2].label, "Payment #3");
        for event in &schedule.events {
            assert_eq!(event.subtotal, 100.0);
            assert_eq!(event.vat, 22.0);
            assert_eq!(event.total, 122.0);
        }
        assert_eq!(schedule.total_contract_value, 366.0);
    }

    #[test]
    fn test_initial_payment_collects_one_time_charges() {
        let mut web = item("Website", 1000.0);
        web.setup_fee = 200.0;
        web.addons.push(addon("Logo", 150.0, None, None));
        let mut support = recurring_item("Support", 50.0, RecurringInterval::Month, Some(2));
        support.setup_fee = 30.0;

        let schedule =
            generate_billing_schedule(&[web, support], 10.0, date(2025, 1, 1), &primary());

        let initial = &schedule.events[0];
        assert_eq!(initial.label, INITIAL_PAYMENT_LABEL);
        assert_eq!(initial.date, date(2025, 1, 1));
        let names: Vec<&str> = initial.items.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Website", "Setup: Website", "Logo", "Setup: Support"]);
        assert!(initial.items.iter().all(|l| l.kind == ChargeKind::OneTime));
        assert_eq!(initial.subtotal, 1380.0);
        assert_eq!(initial.vat, 138.0);

        assert_eq!(schedule.events.len(), 3);
        assert_eq!(schedule.events[1].items[0].kind, ChargeKind::Recurring);
    }

    #[test]
    fn test_each_contribution_billed_exactly_count_times() {
        let mut web = item("Website", 500.0);
        web.addons.push(addon("Hosting", 20.0, Some(RecurringInterval::Month), Some(6)));
        let items = vec![
            web,
            recurring_item("Maintenance", 80.0, RecurringInterval::Month, Some(12)),
            recurring_item("Backups", 5.0, RecurringInterval::Month, Some(3)),
        ];

        let schedule = generate_billing_schedule(&items, 22.0, date(2025, 3, 1), &primary());

        assert_eq!(schedule.occurrences_of("Hosting"), 6);
        assert_eq!(schedule.occurrences_of("Maintenance"), 12);
        assert_eq!(schedule.occurrences_of("Backups"), 3);
        assert_eq!(schedule.occurrences_of("Website"), 1);
        // Initial + 12 recurring
        assert_eq!(schedule.events.len(), 13);
    }

    #[test]
    fn test_default_counts_when_missing() {
        let items = vec![recurring_item("Audit", 300.0, RecurringInterval::Quarter, None)];
        let schedule = generate_billing_schedule(&items, 0.0, date(2025, 1, 1), &primary());

        assert_eq!(schedule.events.len(), 4);
        assert_eq!(schedule.events[3].date, date(2026, 1, 1));
    }

    #[test]
    fn test_yearly_addon_on_one_time_item() {
        let mut web = item("Website", 2000.0);
        web.addons.push(addon("Domain", 15.0, Some(RecurringInterval::Year), None));

        let schedule = generate_billing_schedule(&[web], 22.0, date(2025, 6, 1), &primary());

        assert_eq!(schedule.events.len(), 2);
        assert_eq!(schedule.events[0].subtotal, 2000.0);
        assert_eq!(schedule.events[1].date, date(2026, 6, 1));
        assert_eq!(schedule.events[1].items[0].name, "Domain");
        assert_eq!(schedule.events[1].total, 18.3);
    }

    #[test]
    fn test_mixed_cadence_uses_first_interval() {
        let items = vec![
            recurring_item("Support", 100.0, RecurringInterval::Month, Some(2)),
            recurring_item("Review", 400.0, RecurringInterval::Quarter, Some(2)),
        ];
        let schedule = generate_billing_schedule(&items, 0.0, date(2025, 1, 1), &primary());

        assert_eq!(schedule.events.len(), 2);
        assert_eq!(schedule.events[0].date, date(2025, 2, 1));
        assert_eq!(schedule.events[1].date, date(2025, 3, 1));
        assert_eq!(schedule.events[1].subtotal, 500.0);
    }

    #[test]
    fn test_zero_amount_first_contribution_still_sets_cadence() {
        let items = vec![
            recurring_item("Free tier", 0.0, RecurringInterval::Month, Some(12)),
            recurring_item("Licence", 100.0, RecurringInterval::Year, Some(2)),
        ];
        let schedule = generate_billing_schedule(&items, 0.0, date(2025, 1, 1), &primary());

        let dates: Vec<NaiveDate> = schedule.events.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![date(2025, 2, 1), date(2025, 3, 1)]);
        assert_eq!(schedule.occurrences_of("Licence"), 2);
        assert_eq!(schedule.occurrences_of("Free tier"), 0);
    }

    #[test]
    fn test_huge_count_is_capped() {
        let items = vec![recurring_item("Support", 10.0, RecurringInterval::Month, Some(u32::MAX))];

        let schedule = generate_billing_schedule(&items, 0.0, date(2025, 1, 1), &primary());
        assert_eq!(schedule.events.len(), MAX_RECURRING_COUNT as usize);

        let schedule =
            generate_billing_schedule(&items, 0.0, date(2025, 1, 1), &per_contribution());
        assert_eq!(schedule.occurrences_of("Support"), MAX_RECURRING_COUNT as usize);
    }

    #[test]
    fn test_month_end_is_clamped() {
        let items = vec![recurring_item("Support", 10.0, RecurringInterval::Month, Some(2))];
        let schedule = generate_billing_schedule(&items, 0.0, date(2025, 1, 31), &primary());

        assert_eq!(schedule.events[0].date, date(2025, 2, 28));
        assert_eq!(schedule.events[1].date, date(2025, 3, 31));
    }

    // ========================================================================
    // Empty and zero-amount quotes
    // ========================================================================

    #[test]
    fn test_empty_quote_has_no_events() {
        let schedule = generate_billing_schedule(&[], 22.0, date(2025, 1, 1), &primary());
        assert!(schedule.is_empty());
        assert_eq!(schedule.total_contract_value, 0.0);
    }

    #[test]
    fn test_zero_amount_quote_has_no_events() {
        let items = vec![
            item("Free consultation", 0.0),
            recurring_item("Free tier", 0.0, RecurringInterval::Month, Some(12)),
        ];
        let schedule = generate_billing_schedule(&items, 22.0, date(2025, 1, 1), &primary());
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_fully_discounted_item_not_billed() {
        let mut web = item("Website", 500.0);
        web.discount_percentage = 100.0;
        web.discount_amount = 500.0;
        let schedule = generate_billing_schedule(&[web], 22.0, date(2025, 1, 1), &primary());
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_zero_count_contributes_nothing() {
        let items = vec![recurring_item("Support", 100.0, RecurringInterval::Month, Some(0))];
        let schedule = generate_billing_schedule(&items, 22.0, date(2025, 1, 1), &primary());
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_contract_value_sums_event_totals() {
        let mut web = item("Website", 999.99);
        web.setup_fee = 0.01;
        let items = vec![
            web,
            recurring_item("Support", 33.33, RecurringInterval::Month, Some(5)),
        ];
        let schedule = generate_billing_schedule(&items, 22.0, date(2025, 1, 1), &primary());

        let sum: Decimal = schedule.events.iter().map(|e| to_decimal(e.total)).sum();
        assert_eq!(to_f64(sum), schedule.total_contract_value);
        for event in &schedule.events {
            let line_sum: Decimal = event.items.iter().map(|l| to_decimal(l.amount)).sum();
            assert_eq!(to_f64(line_sum), event.subtotal);
        }
    }

    // ========================================================================
    // Per-contribution stepping
    // ========================================================================

    #[test]
    fn test_per_contribution_dates_each_interval() {
        let items = vec![
            recurring_item("Support", 100.0, RecurringInterval::Month, Some(3)),
            recurring_item("Review", 400.0, RecurringInterval::Quarter, Some(2)),
        ];
        let schedule =
            generate_billing_schedule(&items, 0.0, date(2025, 1, 1), &per_contribution());

        let dates: Vec<NaiveDate> = schedule.events.iter().map(|e| e.date).collect();
        assert_eq!(
            dates,
            vec![
                date(2025, 2, 1),
                date(2025, 3, 1),
                date(2025, 4, 1),
                date(2025, 7, 1)
            ]
        );
        // Month 3 and the first quarter coincide
        assert_eq!(schedule.events[2].subtotal, 500.0);
        assert_eq!(schedule.events[3].label, "Payment #4");
        assert_eq!(schedule.occurrences_of("Support"), 3);
        assert_eq!(schedule.occurrences_of("Review"), 2);
    }

    #[test]
    fn test_per_contribution_keeps_initial_payment() {
        let mut web = item("Website", 1000.0);
        web.addons.push(addon("Domain", 15.0, Some(RecurringInterval::Year), Some(2)));
        let schedule =
            generate_billing_schedule(&[web], 0.0, date(2025, 1, 1), &per_contribution());

        assert_eq!(schedule.events.len(), 3);
        assert_eq!(schedule.events[0].label, INITIAL_PAYMENT_LABEL);
        assert_eq!(schedule.events[2].date, date(2027, 1, 1));
    }

    #[test]
    fn test_stepping_mode_parse() {
        assert_eq!(
            "primary".parse::<SteppingMode>().unwrap(),
            SteppingMode::PrimaryInterval
        );
        assert_eq!(
            "per-contribution".parse::<SteppingMode>().unwrap(),
            SteppingMode::PerContribution
        );

        let err = "weekly".parse::<SteppingMode>().unwrap_err();
        assert_eq!(err.code, shared::error::ErrorCode::ConfigError);
        assert_eq!(err.details.unwrap().get("value").unwrap(), "weekly");
        assert_eq!(SteppingMode::default(), SteppingMode::PrimaryInterval);
    }

    #[test]
    fn test_step_date_overflow_saturates() {
        assert_eq!(
            step_date(NaiveDate::MAX, RecurringInterval::Year, 1),
            NaiveDate::MAX
        );
    }
}
