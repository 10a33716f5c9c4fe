use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::exchange_rates::dtos::ExchangeRateResponseDto;
use crate::features::exchange_rates::services::RateCache;
use crate::shared::types::ApiResponse;

/// Get the current USD exchange rate
///
/// Served from cache while fresh; a failed refresh yields the fallback rate.
#[utoipa::path(
    get,
    path = "/api/exchange-rates",
    responses(
        (status = 200, description = "Current exchange rate", body = ApiResponse<ExchangeRateResponseDto>),
    ),
    tag = "exchange-rates"
)]
pub async fn get_exchange_rate(
    State(cache): State<Arc<RateCache>>,
) -> Result<Json<ApiResponse<ExchangeRateResponseDto>>> {
    let rate = cache.get_rates().await;
    let dto = ExchangeRateResponseDto::new(rate, cache.target_currency());
    Ok(Json(ApiResponse::success(Some(dto), None, None)))
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use crate::shared::test_helpers::TestApp;

    #[tokio::test]
    async fn test_get_exchange_rate() {
        let app = TestApp::new().await;

        let response = app.server.get("/api/exchange-rates").await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body["data"]["sourceCurrency"], json!("USD"));
        assert_eq!(body["data"]["targetCurrency"], json!("COP"));
        assert_eq!(body["data"]["sourceRate"], json!(1));
        assert_eq!(body["data"]["targetRate"], json!(3683));
    }
}
