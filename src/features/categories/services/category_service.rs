use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{CategoryRequestDto, CategoryResponseDto};
use crate::features::categories::models::CategoryInput;
use crate::modules::catalog_store::{CatalogStore, StoreError};

/// Service for category operations
pub struct CategoryService {
    store: Arc<dyn CatalogStore>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// List all categories
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.store.list_categories().await?;
        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// Get category by id
    pub async fn get_by_id(&self, id: i32) -> Result<CategoryResponseDto> {
        self.store
            .find_category(id)
            .await?
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))
    }

    /// Create a new category
    pub async fn create(&self, dto: CategoryRequestDto) -> Result<CategoryResponseDto> {
        let input = CategoryInput::from(dto);
        let category = self.store.insert_category(&input).await?;

        tracing::info!("Category created: id={}, name={}", category.id, category.name);

        Ok(category.into())
    }

    /// Replace name and description of an existing category
    pub async fn update(&self, id: i32, dto: CategoryRequestDto) -> Result<()> {
        let input = CategoryInput::from(dto);
        let category = self.store.update_category(id, &input).await?;

        tracing::info!("Category updated: id={}, name={}", category.id, category.name);

        Ok(())
    }

    /// Delete a category that no movie references
    pub async fn delete(&self, id: i32) -> Result<()> {
        if self.store.find_category(id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Category with id {} not found",
                id
            )));
        }

        let movie_count = self.store.count_movies_in_category(id).await?;
        if movie_count > 0 {
            return Err(AppError::ReferentialIntegrity(format!(
                "Category with id {} cannot be deleted because {} movie(s) reference it",
                id, movie_count
            )));
        }

        // a movie may still be attached between the count and the delete
        let category = self.store.delete_category(id).await.map_err(|e| match e {
            StoreError::ForeignKey(_) => AppError::ReferentialIntegrity(format!(
                "Category with id {} cannot be deleted because movies reference it",
                id
            )),
            other => other.into(),
        })?;

        tracing::info!("Category deleted: id={}, name={}", category.id, category.name);

        Ok(())
    }
}
