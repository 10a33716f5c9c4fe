use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::exchange_rates::handlers;
use crate::features::exchange_rates::services::RateCache;

/// Create routes for the exchange rates feature
pub fn routes(cache: Arc<RateCache>) -> Router {
    Router::new()
        .route("/api/exchange-rates", get(handlers::get_exchange_rate))
        .with_state(cache)
}
