//! Catalog inputs used to configure a new line item
//!
//! Supplied by the catalog/configuration screens; the engine never queries
//! the catalog itself.

use super::RecurringInterval;
use serde::{Deserialize, Serialize};

/// Catalog service as offered for quoting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogService {
    pub id: String,
    pub name: String,
    pub base_price: f64,
    #[serde(default)]
    pub setup_fee: f64,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_interval: Option<RecurringInterval>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_count: Option<u32>,
}

/// Selected service variant (e.g. "Pro" tier)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariantOption {
    pub name: String,
    /// Added to the base price, may be negative
    pub price_modifier: f64,
}

/// Priced configuration parameter (e.g. "Extra languages")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterImpact {
    pub name: String,
    /// Price change per unit of the chosen value, may be negative
    pub price_impact: f64,
    /// Chosen value (1 for on/off parameters)
    #[serde(default = "default_parameter_value")]
    pub value: f64,
}

fn default_parameter_value() -> f64 {
    1.0
}
