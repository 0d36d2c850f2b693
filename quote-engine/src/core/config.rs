use crate::money::CurrencyFormat;
use crate::pricing::{ScheduleOptions, SteppingMode};

/// Engine configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | ENVIRONMENT | development | runtime environment |
/// | LOG_LEVEL | info | tracing max level |
/// | LOG_JSON | false | JSON log lines |
/// | LOG_DIR | (unset) | directory for daily rolling log files |
/// | CURRENCY_LOCALE | it-IT | currency display preset |
/// | SCHEDULE_STEPPING | primary | `primary` or `per_contribution` |
///
/// # Example
///
/// ```ignore
/// CURRENCY_LOCALE=en-US SCHEDULE_STEPPING=per_contribution quote-engine quote.json
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    pub currency_locale: String,
    /// How recurring payments are dated in the billing schedule
    pub schedule_stepping: SteppingMode,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let schedule_stepping = lookup("SCHEDULE_STEPPING")
            .and_then(|raw| match raw.parse::<SteppingMode>() {
                Ok(mode) => Some(mode),
                Err(e) => {
                    tracing::warn!(code = %e.code, error = %e, "Invalid SCHEDULE_STEPPING, using default");
                    None
                }
            })
            .unwrap_or_default();

        if schedule_stepping == SteppingMode::PerContribution {
            tracing::warn!(
                "Per-contribution schedule stepping enabled: payment dates differ from quotes generated with primary stepping"
            );
        }

        Self {
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: lookup("LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: lookup("LOG_DIR").filter(|dir| !dir.trim().is_empty()),
            currency_locale: lookup("CURRENCY_LOCALE").unwrap_or_else(|| "it-IT".into()),
            schedule_stepping,
        }
    }

    pub fn schedule_options(&self) -> ScheduleOptions {
        ScheduleOptions {
            stepping: self.schedule_stepping,
        }
    }

    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat::for_locale(&self.currency_locale)
    }

    /// Whether this is production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Whether this is development
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
