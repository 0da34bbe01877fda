//! Fixed-quote price feed.

use std::collections::HashMap;

use equilib_types::{Currency, EquilibError, Result};
use rust_decimal::Decimal;

use crate::service::PriceFeed;

/// A [`PriceFeed`] serving a fixed table of quotes. The single-node and
/// test stand-in for the external market-price API.
#[derive(Debug, Default)]
pub struct FixedPriceFeed {
    quotes: HashMap<Currency, Decimal>,
}

impl FixedPriceFeed {
    #[must_use]
    pub fn new() -> Self {
        Self {
            quotes: HashMap::new(),
        }
    }

    /// Set the quote for a currency, replacing any previous value.
    pub fn set(&mut self, currency: Currency, quote: Decimal) {
        self.quotes.insert(currency, quote);
    }

    /// Builder-style convenience for fixtures.
    #[must_use]
    pub fn with(mut self, currency: &str, quote: Decimal) -> Self {
        self.set(Currency::new(currency), quote);
        self
    }
}

impl PriceFeed for FixedPriceFeed {
    fn quote(&self, currency: &Currency) -> Result<Decimal> {
        self.quotes
            .get(currency)
            .copied()
            .ok_or_else(|| EquilibError::Internal(format!("no quote for {currency}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_currency_quotes() {
        let feed = FixedPriceFeed::new().with("TOMAN", Decimal::new(61_000, 0));
        assert_eq!(
            feed.quote(&Currency::new("toman")).unwrap(),
            Decimal::new(61_000, 0)
        );
    }

    #[test]
    fn unknown_currency_errors() {
        let feed = FixedPriceFeed::new();
        assert!(feed.quote(&Currency::new("EUR")).is_err());
    }

    #[test]
    fn set_replaces_quote() {
        let mut feed = FixedPriceFeed::new().with("USDT", Decimal::ONE);
        feed.set(Currency::new("USDT"), Decimal::TWO);
        assert_eq!(feed.quote(&Currency::new("USDT")).unwrap(), Decimal::TWO);
    }
}
