use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::features::exchange_rates::models::ExchangeRate;

/// Upstream provider of exchange rates consulted by the rate cache on refresh
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Short label used in log lines
    fn name(&self) -> &str;

    async fn fetch_rates(&self) -> Result<ExchangeRate, RateSourceError>;
}

/// Rate source that always quotes the same configured value.
///
/// Stands in for a live provider; every fetch succeeds and is stamped with the
/// time of the call.
pub struct FixedRateSource {
    target_rate: Decimal,
}

impl FixedRateSource {
    pub fn new(target_rate: Decimal) -> Self {
        Self { target_rate }
    }
}

#[async_trait]
impl RateSource for FixedRateSource {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn fetch_rates(&self) -> Result<ExchangeRate, RateSourceError> {
        Ok(ExchangeRate::per_dollar(self.target_rate))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RateSourceError {
    #[error("Failed to fetch exchange rates: {0}")]
    FetchError(String),
}
