use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A USD to target-currency quote as handed out by the rate cache
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRate {
    /// Units of the source currency (USD) the quote is expressed against
    pub source_rate: Decimal,
    /// Units of the target currency per `source_rate` dollars
    pub target_rate: Decimal,
    pub fetched_at: DateTime<Utc>,
}

impl ExchangeRate {
    /// Quote of `target_rate` per one dollar, stamped now
    pub fn per_dollar(target_rate: Decimal) -> Self {
        Self {
            source_rate: Decimal::ONE,
            target_rate,
            fetched_at: Utc::now(),
        }
    }
}
