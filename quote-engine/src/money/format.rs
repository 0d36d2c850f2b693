//! Locale-aware currency formatting
//!
//! Presentation only. Rounds at [`round2`] so a displayed line total always
//! matches the amount that went into the displayed sum.

use super::{DECIMAL_PLACES, round2, to_decimal};
use rust_decimal::Decimal;

/// Separator and symbol placement for one locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub locale: &'static str,
    pub symbol: &'static str,
    pub decimal_separator: char,
    pub thousands_separator: char,
    /// "1.234,56 €" rather than "€1,234.56"
    pub symbol_after: bool,
}

impl CurrencyFormat {
    pub const IT_IT: CurrencyFormat = CurrencyFormat {
        locale: "it-IT",
        symbol: "€",
        decimal_separator: ',',
        thousands_separator: '.',
        symbol_after: true,
    };
    pub const DE_DE: CurrencyFormat = CurrencyFormat {
        locale: "de-DE",
        symbol: "€",
        decimal_separator: ',',
        thousands_separator: '.',
        symbol_after: true,
    };
    pub const EN_US: CurrencyFormat = CurrencyFormat {
        locale: "en-US",
        symbol: "$",
        decimal_separator: '.',
        thousands_separator: ',',
        symbol_after: false,
    };
    pub const EN_GB: CurrencyFormat = CurrencyFormat {
        locale: "en-GB",
        symbol: "£",
        decimal_separator: '.',
        thousands_separator: ',',
        symbol_after: false,
    };

    /// Preset for a locale tag; unknown tags fall back to it-IT
    pub fn for_locale(locale: &str) -> Self {
        match locale.replace('_', "-").to_ascii_lowercase().as_str() {
            "it-it" | "it" => Self::IT_IT,
            "de-de" | "de" => Self::DE_DE,
            "en-us" | "en" => Self::EN_US,
            "en-gb" => Self::EN_GB,
            other => {
                tracing::debug!(locale = %other, "Unknown currency locale, using it-IT");
                Self::IT_IT
            }
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::IT_IT
    }
}

/// Format an amount with 2 decimals, grouping and currency symbol
pub fn format_currency(amount: f64, format: &CurrencyFormat) -> String {
    let rounded = round2(to_decimal(amount));
    let negative = rounded < Decimal::ZERO;

    // "1234.50" → integer and fraction digits
    let mut abs = rounded.abs();
    abs.rescale(DECIMAL_PLACES);
    let plain = abs.to_string();
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, digit) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(format.thousands_separator);
        }
        grouped.push(digit);
    }

    let number = format!("{}{}{}", grouped, format.decimal_separator, frac_part);
    let sign = if negative { "-" } else { "" };

    if format.symbol_after {
        format!("{}{} {}", sign, number, format.symbol)
    } else {
        format!("{}{}{}", sign, format.symbol, number)
    }
}
