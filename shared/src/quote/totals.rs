//! Quote totals breakdown

use super::RecurringInterval;
use serde::{Deserialize, Serialize};

/// Display row for one recurring contribution (item or addon)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringDetail {
    pub name: String,
    /// Parent service name, set for addon rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    pub amount: f64,
    pub interval: RecurringInterval,
    /// Occurrences simulated in the billing schedule
    pub count: u32,
    #[serde(default)]
    pub is_addon: bool,
}

/// Internal budget and margin allocation (operator-only)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CommercialMetrics {
    /// 40% of the taxable base
    pub budget_variable_costs: f64,
    /// 10% of the taxable base
    pub budget_tooling: f64,
    /// Fixed 22% modelling rate, independent of the quote tax setting
    pub vat: f64,
    /// 50% of the taxable base
    pub expected_margin: f64,
    pub total_taxable_base: f64,
    /// total_taxable_base + vat
    pub final_client_price: f64,
}

/// Full totals breakdown, as shown in the editor and persisted on save
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QuoteTotals {
    pub subtotal_one_time: f64,
    pub subtotal_recurring_monthly: f64,
    pub subtotal_recurring_quarterly: f64,
    pub subtotal_recurring_yearly: f64,
    /// Global discount, applied to the one-time subtotal only
    pub discount_amount: f64,
    /// subtotal_one_time - discount_amount
    pub total_one_time: f64,
    /// Tax on total_one_time
    pub tax_amount: f64,
    /// total_one_time + tax_amount
    pub grand_total: f64,
    /// Informational yearly equivalent of the recurring subtotals
    pub annual_recurring: f64,
    #[serde(default)]
    pub recurring_details: Vec<RecurringDetail>,
    pub commercial_metrics: CommercialMetrics,
}

impl QuoteTotals {
    /// Recurring subtotal for one cadence
    pub fn recurring_subtotal(&self, interval: RecurringInterval) -> f64 {
        match interval {
            RecurringInterval::Month => self.subtotal_recurring_monthly,
            RecurringInterval::Quarter => self.subtotal_recurring_quarterly,
            RecurringInterval::Year => self.subtotal_recurring_yearly,
        }
    }

    /// Projection for the client-facing read path (drops commercial metrics)
    pub fn for_client(&self) -> ClientQuoteTotals {
        ClientQuoteTotals {
            subtotal_one_time: self.subtotal_one_time,
            subtotal_recurring_monthly: self.subtotal_recurring_monthly,
            subtotal_recurring_quarterly: self.subtotal_recurring_quarterly,
            subtotal_recurring_yearly: self.subtotal_recurring_yearly,
            discount_amount: self.discount_amount,
            total_one_time: self.total_one_time,
            tax_amount: self.tax_amount,
            grand_total: self.grand_total,
            annual_recurring: self.annual_recurring,
            recurring_details: self.recurring_details.clone(),
        }
    }
}

/// Totals as seen by the client. Has no commercial metrics field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClientQuoteTotals {
    pub subtotal_one_time: f64,
    pub subtotal_recurring_monthly: f64,
    pub subtotal_recurring_quarterly: f64,
    pub subtotal_recurring_yearly: f64,
    pub discount_amount: f64,
    pub total_one_time: f64,
    pub tax_amount: f64,
    pub grand_total: f64,
    pub annual_recurring: f64,
    #[serde(default)]
    pub recurring_details: Vec<RecurringDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_projection_drops_metrics() {
        let totals = QuoteTotals {
            subtotal_one_time: 100.0,
            discount_amount: 10.0,
            total_one_time: 90.0,
            tax_amount: 19.8,
            grand_total: 109.8,
            commercial_metrics: CommercialMetrics {
                budget_variable_costs: 36.0,
                budget_tooling: 9.0,
                vat: 19.8,
                expected_margin: 45.0,
                total_taxable_base: 90.0,
                final_client_price: 109.8,
            },
            ..Default::default()
        };

        let client = totals.for_client();
        assert_eq!(client.grand_total, 109.8);
        assert_eq!(client.total_one_time, 90.0);

        let json = serde_json::to_value(&client).unwrap();
        assert!(json.get("commercial_metrics").is_none());
        assert!(json.get("grand_total").is_some());
    }

    #[test]
    fn test_recurring_subtotal_by_interval() {
        let totals = QuoteTotals {
            subtotal_recurring_monthly: 1.0,
            subtotal_recurring_quarterly: 2.0,
            subtotal_recurring_yearly: 3.0,
            ..Default::default()
        };
        assert_eq!(totals.recurring_subtotal(RecurringInterval::Month), 1.0);
        assert_eq!(totals.recurring_subtotal(RecurringInterval::Quarter), 2.0);
        assert_eq!(totals.recurring_subtotal(RecurringInterval::Year), 3.0);
    }
}
