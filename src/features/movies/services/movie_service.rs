use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::exchange_rates::RateCache;
use crate::features::movies::dtos::{MovieRequestDto, MovieResponseDto};
use crate::features::movies::models::MovieInput;
use crate::modules::activity_log::{ActivityEntry, ActivityLog, MovieAction};
use crate::modules::catalog_store::{CatalogStore, StoreError};

/// Service for movie operations
pub struct MovieService {
    store: Arc<dyn CatalogStore>,
    rate_cache: Arc<RateCache>,
    activity_log: Arc<ActivityLog>,
}

impl MovieService {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        rate_cache: Arc<RateCache>,
        activity_log: Arc<ActivityLog>,
    ) -> Self {
        Self {
            store,
            rate_cache,
            activity_log,
        }
    }

    /// List all movies, converting every price with the same rate
    pub async fn list(&self) -> Result<Vec<MovieResponseDto>> {
        let movies = self.store.list_movies().await?;
        let rates = self.rate_cache.get_rates().await;

        Ok(movies
            .into_iter()
            .map(|m| {
                let converted = m.price.saturating_mul(rates.target_rate);
                MovieResponseDto::new(m, converted)
            })
            .collect())
    }

    /// Get movie by id
    pub async fn get_by_id(&self, id: i32) -> Result<MovieResponseDto> {
        let movie = self
            .store
            .find_movie(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Movie with id {} not found", id)))?;

        let converted = self.rate_cache.convert(movie.price).await;
        Ok(MovieResponseDto::new(movie, converted))
    }

    /// Create a new movie in an existing category
    pub async fn create(&self, dto: MovieRequestDto) -> Result<MovieResponseDto> {
        let input = MovieInput::from(dto);
        self.ensure_category(input.category_id).await?;

        let movie = self.store.insert_movie(&input).await?;

        tracing::info!("Movie created: id={}, title={}", movie.id, movie.title);
        self.activity_log.record(ActivityEntry::new(
            MovieAction::Create,
            movie.id,
            movie.price,
            movie.category_id,
        ));

        let converted = self.rate_cache.convert(movie.price).await;
        Ok(MovieResponseDto::new(movie, converted))
    }

    /// Replace every field of an existing movie
    pub async fn update(&self, id: i32, dto: MovieRequestDto) -> Result<()> {
        if self.store.find_movie(id).await?.is_none() {
            return Err(AppError::NotFound(format!("Movie with id {} not found", id)));
        }

        let input = MovieInput::from(dto);
        self.ensure_category(input.category_id).await?;

        // row removed since the lookup above
        let movie = self
            .store
            .update_movie(id, &input)
            .await
            .map_err(|e| match e {
                StoreError::NotFound(_) => AppError::Conflict(format!(
                    "Movie with id {} was modified concurrently",
                    id
                )),
                other => other.into(),
            })?;

        tracing::info!("Movie updated: id={}, title={}", movie.id, movie.title);
        self.activity_log.record(ActivityEntry::new(
            MovieAction::Update,
            movie.id,
            movie.price,
            movie.category_id,
        ));

        Ok(())
    }

    /// Delete a movie
    pub async fn delete(&self, id: i32) -> Result<()> {
        let movie = self.store.delete_movie(id).await?;

        tracing::info!("Movie deleted: id={}, title={}", movie.id, movie.title);
        self.activity_log.record(ActivityEntry::new(
            MovieAction::Delete,
            movie.id,
            movie.price,
            movie.category_id,
        ));

        Ok(())
    }

    async fn ensure_category(&self, category_id: i32) -> Result<()> {
        if self.store.category_exists(category_id).await? {
            Ok(())
        } else {
            Err(AppError::ReferentialIntegrity(format!(
                "Category with id {} does not exist",
                category_id
            )))
        }
    }
}
