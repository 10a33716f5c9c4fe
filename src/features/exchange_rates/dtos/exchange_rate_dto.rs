use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::exchange_rates::models::ExchangeRate;
use crate::shared::constants::SOURCE_CURRENCY;

/// Response DTO for the current exchange rate
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateResponseDto {
    pub source_currency: String,
    pub target_currency: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub source_rate: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub target_rate: Decimal,
    pub fetched_at: DateTime<Utc>,
}

impl ExchangeRateResponseDto {
    pub fn new(rate: ExchangeRate, target_currency: &str) -> Self {
        Self {
            source_currency: SOURCE_CURRENCY.to_string(),
            target_currency: target_currency.to_string(),
            source_rate: rate.source_rate,
            target_rate: rate.target_rate,
            fetched_at: rate.fetched_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rates_serialize_as_json_numbers() {
        let rate = ExchangeRate::per_dollar(Decimal::new(368350, 2));
        let value = serde_json::to_value(ExchangeRateResponseDto::new(rate, "COP")).unwrap();

        assert_eq!(value["sourceRate"], json!(1));
        assert!(value["targetRate"].is_number());
        assert_eq!(value["targetRate"].to_string(), "3683.50");
        assert_eq!(value["targetCurrency"], json!("COP"));
    }
}
