//! Simulated billing schedule

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether a schedule line is billed once or repeats
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChargeKind {
    OneTime,
    Recurring,
}

/// One charge within a billing event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleLine {
    pub name: String,
    pub amount: f64,
    pub kind: ChargeKind,
}

/// A simulated payment date with its charges
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillingScheduleEvent {
    pub date: NaiveDate,
    pub label: String,
    pub items: Vec<ScheduleLine>,
    pub subtotal: f64,
    pub vat: f64,
    /// subtotal + vat
    pub total: f64,
}

/// Ordered payment calendar and its contract value
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BillingSchedule {
    pub events: Vec<BillingScheduleEvent>,
    /// Sum of every event total; zero for an empty schedule
    pub total_contract_value: f64,
}

impl BillingSchedule {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events in which a named charge appears
    pub fn occurrences_of(&self, name: &str) -> usize {
        self.events
            .iter()
            .filter(|event| event.items.iter().any(|line| line.name == name))
            .count()
    }
}
