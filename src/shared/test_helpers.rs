use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use rust_decimal::Decimal;

use crate::core::config::ExchangeRateConfig;
use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::exchange_rates::{routes as exchange_rates_routes, FixedRateSource, RateCache};
use crate::features::movies::{routes as movies_routes, MovieService};
use crate::modules::activity_log::ActivityLog;
use crate::modules::catalog_store::InMemoryCatalogStore;
use crate::shared::constants::DEFAULT_COP_PER_USD;

/// Full API over the in-memory store, a fixed COP rate and an activity log in
/// a temporary directory that lives as long as the app.
pub struct TestApp {
    pub server: TestServer,
    pub activity_log: Arc<ActivityLog>,
    _log_dir: tempfile::TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let log_dir = tempfile::tempdir().unwrap();
        let activity_log = Arc::new(
            ActivityLog::open(log_dir.path().join("Logs").join("movies.log"))
                .await
                .unwrap(),
        );

        let store = Arc::new(InMemoryCatalogStore::new());
        let rate_cache = Arc::new(RateCache::new(
            Arc::new(FixedRateSource::new(Decimal::from(DEFAULT_COP_PER_USD))),
            &ExchangeRateConfig::default(),
        ));

        let category_service = Arc::new(CategoryService::new(store.clone()));
        let movie_service = Arc::new(MovieService::new(
            store,
            Arc::clone(&rate_cache),
            Arc::clone(&activity_log),
        ));

        let app = Router::new()
            .merge(categories_routes::routes(category_service))
            .merge(movies_routes::routes(movie_service))
            .merge(exchange_rates_routes::routes(rate_cache));

        Self {
            server: TestServer::new(app).unwrap(),
            activity_log,
            _log_dir: log_dir,
        }
    }

    /// Lines written to the activity log so far
    pub async fn activity_lines(&self) -> Vec<String> {
        self.activity_log.flush().await;
        std::fs::read_to_string(self.activity_log.path())
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }
}
