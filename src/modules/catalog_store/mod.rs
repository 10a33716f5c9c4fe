//! Persistence seam for categories and movies.
//!
//! Services talk to a [`CatalogStore`] trait object so the same feature code
//! runs against PostgreSQL in production and against the in-memory store in
//! local development and tests. Both backends enforce the same rule: a
//! category cannot be removed while any movie still points at it.

mod memory;
mod postgres;

pub use memory::InMemoryCatalogStore;
pub use postgres::PgCatalogStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::features::categories::models::{Category, CategoryInput};
use crate::features::movies::models::{Movie, MovieInput};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    NotFound(String),

    /// A concurrent writer got there first (row vanished, serialization failure)
    #[error("{0}")]
    Conflict(String),

    /// Missing referenced category, or category still referenced by movies
    #[error("{0}")]
    ForeignKey(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_categories(&self) -> StoreResult<Vec<Category>>;

    async fn find_category(&self, id: i32) -> StoreResult<Option<Category>>;

    async fn category_exists(&self, id: i32) -> StoreResult<bool>;

    async fn insert_category(&self, input: &CategoryInput) -> StoreResult<Category>;

    /// Replaces name and description. `NotFound` when no row matched.
    async fn update_category(&self, id: i32, input: &CategoryInput) -> StoreResult<Category>;

    /// `ForeignKey` while movies still reference the category.
    async fn delete_category(&self, id: i32) -> StoreResult<Category>;

    async fn count_movies_in_category(&self, category_id: i32) -> StoreResult<i64>;

    async fn list_movies(&self) -> StoreResult<Vec<Movie>>;

    async fn find_movie(&self, id: i32) -> StoreResult<Option<Movie>>;

    /// `ForeignKey` when the category does not exist.
    async fn insert_movie(&self, input: &MovieInput) -> StoreResult<Movie>;

    /// Replaces every field except the id. `NotFound` when no row matched.
    async fn update_movie(&self, id: i32, input: &MovieInput) -> StoreResult<Movie>;

    /// Removes the movie and returns the row as it was.
    async fn delete_movie(&self, id: i32) -> StoreResult<Movie>;
}
