//! Billing cadence

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Billing cadence of a recurring line item or addon
///
/// Serialized as `"month" | "quarter" | "year"`. The legacy spellings
/// `"monthly" | "quarterly" | "yearly" | "annual"` are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurringInterval {
    #[serde(alias = "monthly")]
    Month,
    #[serde(alias = "quarterly")]
    Quarter,
    #[serde(alias = "yearly", alias = "annual")]
    Year,
}

/// Cadence mapping table: (interval, months per step, default count, periods per year)
const CADENCE_TABLE: [(RecurringInterval, u32, u32, u32); 3] = [
    (RecurringInterval::Month, 1, 12, 12),
    (RecurringInterval::Quarter, 3, 4, 4),
    (RecurringInterval::Year, 12, 1, 1),
];

impl RecurringInterval {
    pub const ALL: [RecurringInterval; 3] = [Self::Month, Self::Quarter, Self::Year];

    fn row(self) -> (RecurringInterval, u32, u32, u32) {
        CADENCE_TABLE[self.index()]
    }

    /// Position in [`Self::ALL`], used for fixed-size per-cadence accumulators
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Month => 0,
            Self::Quarter => 1,
            Self::Year => 2,
        }
    }

    /// Calendar months covered by one billing step
    pub fn months_per_step(self) -> u32 {
        self.row().1
    }

    /// Occurrence count used when a recurring entity has none set
    pub fn default_count(self) -> u32 {
        self.row().2
    }

    /// Billing periods in one year (used for the annual recurring estimate)
    pub fn periods_per_year(self) -> u32 {
        self.row().3
    }

    /// Canonical storage string
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }

    /// Display label ("Monthly", "Quarterly", "Yearly")
    pub fn label(self) -> &'static str {
        match self {
            Self::Month => "Monthly",
            Self::Quarter => "Quarterly",
            Self::Year => "Yearly",
        }
    }
}

impl fmt::Display for RecurringInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an unknown interval string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownInterval(pub String);

impl fmt::Display for UnknownInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown recurring interval: {}", self.0)
    }
}

impl std::error::Error for UnknownInterval {}

impl FromStr for RecurringInterval {
    type Err = UnknownInterval;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" | "monthly" => Ok(Self::Month),
            "quarter" | "quarterly" => Ok(Self::Quarter),
            "year" | "yearly" | "annual" => Ok(Self::Year),
            _ => Err(UnknownInterval(s.to_string())),
        }
    }
}
