use std::collections::BTreeMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use super::{CatalogStore, StoreError, StoreResult};
use crate::features::categories::models::{Category, CategoryInput};
use crate::features::movies::models::{Movie, MovieInput, MovieStatus};

#[derive(Debug, Clone)]
struct MovieRow {
    title: String,
    description: Option<String>,
    price: Decimal,
    category_id: i32,
    status: MovieStatus,
}

impl From<&MovieInput> for MovieRow {
    fn from(input: &MovieInput) -> Self {
        Self {
            title: input.title.clone(),
            description: input.description.clone(),
            price: input.price,
            category_id: input.category_id,
            status: input.status,
        }
    }
}

#[derive(Default)]
struct CatalogState {
    categories: BTreeMap<i32, CategoryInput>,
    movies: BTreeMap<i32, MovieRow>,
    next_category_id: i32,
    next_movie_id: i32,
}

impl CatalogState {
    fn category(&self, id: i32) -> Option<Category> {
        self.categories.get(&id).map(|c| Category {
            id,
            name: c.name.clone(),
            description: c.description.clone(),
        })
    }

    fn movie(&self, id: i32, row: &MovieRow) -> Movie {
        Movie {
            id,
            title: row.title.clone(),
            description: row.description.clone(),
            price: row.price,
            category_id: row.category_id,
            status: row.status,
            category_name: self.categories.get(&row.category_id).map(|c| c.name.clone()),
        }
    }

    fn ensure_category(&self, category_id: i32) -> StoreResult<()> {
        if self.categories.contains_key(&category_id) {
            Ok(())
        } else {
            Err(StoreError::ForeignKey(format!(
                "Category with id {} does not exist",
                category_id
            )))
        }
    }
}

/// Catalog store kept entirely in process memory.
///
/// Ids start at 1 and are never reused, like a `SERIAL` column.
#[derive(Default)]
pub struct InMemoryCatalogStore {
    state: RwLock<CatalogState>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let state = self.state.read().await;
        Ok(state
            .categories
            .keys()
            .filter_map(|id| state.category(*id))
            .collect())
    }

    async fn find_category(&self, id: i32) -> StoreResult<Option<Category>> {
        Ok(self.state.read().await.category(id))
    }

    async fn category_exists(&self, id: i32) -> StoreResult<bool> {
        Ok(self.state.read().await.categories.contains_key(&id))
    }

    async fn insert_category(&self, input: &CategoryInput) -> StoreResult<Category> {
        let mut state = self.state.write().await;
        state.next_category_id += 1;
        let id = state.next_category_id;
        state.categories.insert(id, input.clone());

        Ok(Category {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
        })
    }

    async fn update_category(&self, id: i32, input: &CategoryInput) -> StoreResult<Category> {
        let mut state = self.state.write().await;
        let slot = state
            .categories
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("Category with id {} not found", id)))?;
        *slot = input.clone();

        Ok(Category {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
        })
    }

    async fn delete_category(&self, id: i32) -> StoreResult<Category> {
        let mut state = self.state.write().await;
        let category = state
            .category(id)
            .ok_or_else(|| StoreError::NotFound(format!("Category with id {} not found", id)))?;

        if state.movies.values().any(|m| m.category_id == id) {
            return Err(StoreError::ForeignKey(format!(
                "Category with id {} is still referenced by movies",
                id
            )));
        }

        state.categories.remove(&id);
        Ok(category)
    }

    async fn count_movies_in_category(&self, category_id: i32) -> StoreResult<i64> {
        let state = self.state.read().await;
        Ok(state
            .movies
            .values()
            .filter(|m| m.category_id == category_id)
            .count() as i64)
    }

    async fn list_movies(&self) -> StoreResult<Vec<Movie>> {
        let state = self.state.read().await;
        Ok(state
            .movies
            .iter()
            .map(|(id, row)| state.movie(*id, row))
            .collect())
    }

    async fn find_movie(&self, id: i32) -> StoreResult<Option<Movie>> {
        let state = self.state.read().await;
        Ok(state.movies.get(&id).map(|row| state.movie(id, row)))
    }

    async fn insert_movie(&self, input: &MovieInput) -> StoreResult<Movie> {
        let mut state = self.state.write().await;
        state.ensure_category(input.category_id)?;

        state.next_movie_id += 1;
        let id = state.next_movie_id;
        let row = MovieRow::from(input);
        let movie = state.movie(id, &row);
        state.movies.insert(id, row);

        Ok(movie)
    }

    async fn update_movie(&self, id: i32, input: &MovieInput) -> StoreResult<Movie> {
        let mut state = self.state.write().await;
        if !state.movies.contains_key(&id) {
            return Err(StoreError::NotFound(format!(
                "Movie with id {} not found",
                id
            )));
        }
        state.ensure_category(input.category_id)?;

        let row = MovieRow::from(input);
        let movie = state.movie(id, &row);
        state.movies.insert(id, row);

        Ok(movie)
    }

    async fn delete_movie(&self, id: i32) -> StoreResult<Movie> {
        let mut state = self.state.write().await;
        let row = state
            .movies
            .remove(&id)
            .ok_or_else(|| StoreError::NotFound(format!("Movie with id {} not found", id)))?;

        Ok(state.movie(id, &row))
    }
}
