//! User configuration for expense-cli
//!
//! Holds the preferred currency and the append-only log of preferred-currency
//! changes. Persistence (including recovery from a corrupt config file) is
//! handled by the storage layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry in the preferred-currency change log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyChange {
    /// When the change happened
    pub date: DateTime<Utc>,

    /// The preferred currency before the change
    pub previous_preferred_currency: String,

    /// The preferred currency after the change
    pub new_preferred_currency: String,

    /// The exchange rate used to convert past expenses, if any was supplied
    pub exchange_rate: Option<f64>,
}

/// User configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// The user's default currency for new expenses and totals
    #[serde(default)]
    pub preferred_currency: Option<String>,

    /// Append-only log of preferred-currency changes
    #[serde(default)]
    pub currency_history: Vec<CurrencyChange>,
}

impl Config {
    /// Fallback currency used when no preferred currency has been set
    pub const DEFAULT_CURRENCY: &'static str = "USD";

    /// The preferred currency, or the USD fallback
    pub fn preferred_or_default(&self) -> &str {
        self.preferred_currency
            .as_deref()
            .unwrap_or(Self::DEFAULT_CURRENCY)
    }

    /// Switch the preferred currency, recording a history entry when a
    /// previous preference existed. Setting the preference for the first
    /// time appends nothing to the log.
    pub fn set_preferred_currency(&mut self, new_currency: &str, exchange_rate: Option<f64>) {
        if let Some(previous) = self.preferred_currency.take() {
            self.currency_history.push(CurrencyChange {
                date: Utc::now(),
                previous_preferred_currency: previous,
                new_preferred_currency: new_currency.to_string(),
                exchange_rate,
            });
        }
        self.preferred_currency = Some(new_currency.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.preferred_currency, None);
        assert!(config.currency_history.is_empty());
        assert_eq!(config.preferred_or_default(), "USD");
    }

    #[test]
    fn test_first_set_records_no_history() {
        let mut config = Config::default();
        config.set_preferred_currency("EUR", None);

        assert_eq!(config.preferred_currency.as_deref(), Some("EUR"));
        assert!(config.currency_history.is_empty());
    }

    #[test]
    fn test_subsequent_set_records_history() {
        let mut config = Config::default();
        config.set_preferred_currency("EUR", None);
        config.set_preferred_currency("GBP", Some(0.85));

        assert_eq!(config.preferred_currency.as_deref(), Some("GBP"));
        assert_eq!(config.currency_history.len(), 1);

        let change = &config.currency_history[0];
        assert_eq!(change.previous_preferred_currency, "EUR");
        assert_eq!(change.new_preferred_currency, "GBP");
        assert_eq!(change.exchange_rate, Some(0.85));
    }

    #[test]
    fn test_serde_camel_case_round_trip() {
        let mut config = Config::default();
        config.set_preferred_currency("EUR", None);
        config.set_preferred_currency("USD", Some(1.1));

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("preferredCurrency"));
        assert!(json.contains("currencyHistory"));
        assert!(json.contains("exchangeRate"));

        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_parses_minimal_config() {
        let parsed: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, Config::default());
    }
}
