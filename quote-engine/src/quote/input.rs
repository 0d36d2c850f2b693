//! Quote input and editor report

use crate::money::{CurrencyFormat, format_currency, validate_line_item, validate_quote_settings};
use crate::pricing::{ScheduleOptions, compute_totals, generate_billing_schedule};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::error::AppResult;
use shared::quote::{BillingSchedule, LineItem, QuoteTotals};

/// Italian standard VAT rate, used when the input omits one
pub const DEFAULT_TAX_RATE: f64 = 22.0;

fn default_tax_rate() -> f64 {
    DEFAULT_TAX_RATE
}

/// A quote as handed to the engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<String>,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub global_discount_percentage: f64,
    #[serde(default = "default_tax_rate")]
    pub global_tax_percentage: f64,
    /// Schedule anchor; today when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

impl QuoteInput {
    /// Validate settings and every item; item errors carry `item_index`
    pub fn validate(&self) -> AppResult<()> {
        validate_quote_settings(self.global_discount_percentage, self.global_tax_percentage)?;
        for (idx, item) in self.items.iter().enumerate() {
            validate_line_item(item).map_err(|e| e.with_detail("item_index", idx))?;
        }
        Ok(())
    }

    pub fn start_date_or_today(&self) -> NaiveDate {
        self.start_date.unwrap_or_else(shared::util::today)
    }
}

/// Display strings for document output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormattedTotals {
    pub grand_total: String,
    pub annual_recurring: String,
    pub total_contract_value: String,
}

/// Everything the editor shows for one quote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<String>,
    pub totals: QuoteTotals,
    pub schedule: BillingSchedule,
    pub formatted: FormattedTotals,
}

/// Compute totals and schedule for the editor
pub fn build_report(
    input: &QuoteInput,
    options: &ScheduleOptions,
    currency: &CurrencyFormat,
) -> QuoteReport {
    let totals = compute_totals(
        &input.items,
        input.global_discount_percentage,
        input.global_tax_percentage,
    );
    let schedule = generate_billing_schedule(
        &input.items,
        input.global_tax_percentage,
        input.start_date_or_today(),
        options,
    );

    let formatted = FormattedTotals {
        grand_total: format_currency(totals.grand_total, currency),
        annual_recurring: format_currency(totals.annual_recurring, currency),
        total_contract_value: format_currency(schedule.total_contract_value, currency),
    };

    QuoteReport {
        quote_id: input.quote_id.clone(),
        totals,
        schedule,
        formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    const INPUT: &str = r#"{
        "quote_id": "Q-2025-001",
        "items": [
            {
                "id": "li-1",
                "service_name": "Website",
                "unit_price": 100.0,
                "quantity": 1,
                "line_total": 100.0
            }
        ],
        "global_discount_percentage": 10,
        "start_date": "2025-01-15"
    }"#;

    #[test]
    fn test_input_defaults() {
        let input: QuoteInput = serde_json::from_str(INPUT).unwrap();
        assert_eq!(input.global_tax_percentage, DEFAULT_TAX_RATE);
        assert_eq!(input.items[0].setup_fee, 0.0);
        assert_eq!(input.start_date_or_today(), NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_build_report() {
        let input: QuoteInput = serde_json::from_str(INPUT).unwrap();
        let report = build_report(&input, &ScheduleOptions::default(), &CurrencyFormat::IT_IT);

        assert_eq!(report.quote_id.as_deref(), Some("Q-2025-001"));
        assert_eq!(report.totals.grand_total, 109.8);
        assert_eq!(report.formatted.grand_total, "109,80 €");
        // Schedule is pre-discount: 100 + 22% VAT
        assert_eq!(report.schedule.total_contract_value, 122.0);
        assert_eq!(report.formatted.total_contract_value, "122,00 €");
    }

    #[test]
    fn test_validate_reports_item_index() {
        let mut input: QuoteInput = serde_json::from_str(INPUT).unwrap();
        let mut bad = input.items[0].clone();
        bad.discount_percentage = 120.0;
        input.items.push(bad);

        let err = input.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidDiscount);
        assert_eq!(err.details.unwrap().get("item_index").unwrap(), 1);
    }

    #[test]
    fn test_validate_settings() {
        let mut input: QuoteInput = serde_json::from_str(INPUT).unwrap();
        input.global_tax_percentage = -1.0;
        assert_eq!(input.validate().unwrap_err().code, ErrorCode::InvalidTaxRate);
    }
}
