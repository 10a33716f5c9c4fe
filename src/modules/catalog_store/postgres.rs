use async_trait::async_trait;
use sqlx::PgPool;

use super::{CatalogStore, StoreError, StoreResult};
use crate::features::categories::models::{Category, CategoryInput};
use crate::features::movies::models::{Movie, MovieInput};

const MOVIE_COLUMNS: &str = r#"
    m.id, m.title, m.description, m.price, m.category_id, m.status,
    c.name AS category_name
"#;

/// Translate PostgreSQL error codes into store-level errors
fn handle_db_error(e: sqlx::Error, context: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &e {
        match db_err.code().as_deref() {
            // foreign_key_violation
            Some("23503") => return StoreError::ForeignKey(context.to_string()),
            // serialization_failure, deadlock_detected
            Some("40001") | Some("40P01") => return StoreError::Conflict(context.to_string()),
            _ => {}
        }
    }

    tracing::error!("{}: {:?}", context, e);
    StoreError::Database(e)
}

/// PostgreSQL-backed catalog store
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description
            FROM categories
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| handle_db_error(e, "Failed to list categories"))
    }

    async fn find_category(&self, id: i32) -> StoreResult<Option<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| handle_db_error(e, "Failed to get category by id"))
    }

    async fn category_exists(&self, id: i32) -> StoreResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| handle_db_error(e, "Failed to check category existence"))
    }

    async fn insert_category(&self, input: &CategoryInput) -> StoreResult<Category> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| handle_db_error(e, "Failed to create category"))
    }

    async fn update_category(&self, id: i32, input: &CategoryInput) -> StoreResult<Category> {
        sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $1, description = $2
            WHERE id = $3
            RETURNING id, name, description
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| handle_db_error(e, "Failed to update category"))?
        .ok_or_else(|| StoreError::NotFound(format!("Category with id {} not found", id)))
    }

    async fn delete_category(&self, id: i32) -> StoreResult<Category> {
        sqlx::query_as::<_, Category>(
            r#"
            DELETE FROM categories
            WHERE id = $1
            RETURNING id, name, description
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            handle_db_error(
                e,
                &format!("Category with id {} is still referenced by movies", id),
            )
        })?
        .ok_or_else(|| StoreError::NotFound(format!("Category with id {} not found", id)))
    }

    async fn count_movies_in_category(&self, category_id: i32) -> StoreResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM movies WHERE category_id = $1")
            .bind(category_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| handle_db_error(e, "Failed to count movies in category"))
    }

    async fn list_movies(&self) -> StoreResult<Vec<Movie>> {
        let query = format!(
            r#"
            SELECT {}
            FROM movies m
            LEFT JOIN categories c ON c.id = m.category_id
            ORDER BY m.id
            "#,
            MOVIE_COLUMNS
        );

        sqlx::query_as::<_, Movie>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| handle_db_error(e, "Failed to list movies"))
    }

    async fn find_movie(&self, id: i32) -> StoreResult<Option<Movie>> {
        let query = format!(
            r#"
            SELECT {}
            FROM movies m
            LEFT JOIN categories c ON c.id = m.category_id
            WHERE m.id = $1
            "#,
            MOVIE_COLUMNS
        );

        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| handle_db_error(e, "Failed to get movie by id"))
    }

    async fn insert_movie(&self, input: &MovieInput) -> StoreResult<Movie> {
        let query = format!(
            r#"
            WITH m AS (
                INSERT INTO movies (title, description, price, category_id, status)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
            )
            SELECT {}
            FROM m
            LEFT JOIN categories c ON c.id = m.category_id
            "#,
            MOVIE_COLUMNS
        );

        sqlx::query_as::<_, Movie>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.category_id)
            .bind(input.status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                handle_db_error(
                    e,
                    &format!("Category with id {} does not exist", input.category_id),
                )
            })
    }

    async fn update_movie(&self, id: i32, input: &MovieInput) -> StoreResult<Movie> {
        let query = format!(
            r#"
            WITH m AS (
                UPDATE movies
                SET title = $1, description = $2, price = $3, category_id = $4, status = $5
                WHERE id = $6
                RETURNING *
            )
            SELECT {}
            FROM m
            LEFT JOIN categories c ON c.id = m.category_id
            "#,
            MOVIE_COLUMNS
        );

        sqlx::query_as::<_, Movie>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.category_id)
            .bind(input.status)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                handle_db_error(
                    e,
                    &format!("Category with id {} does not exist", input.category_id),
                )
            })?
            .ok_or_else(|| StoreError::NotFound(format!("Movie with id {} not found", id)))
    }

    async fn delete_movie(&self, id: i32) -> StoreResult<Movie> {
        let query = format!(
            r#"
            WITH m AS (
                DELETE FROM movies
                WHERE id = $1
                RETURNING *
            )
            SELECT {}
            FROM m
            LEFT JOIN categories c ON c.id = m.category_id
            "#,
            MOVIE_COLUMNS
        );

        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| handle_db_error(e, "Failed to delete movie"))?
            .ok_or_else(|| StoreError::NotFound(format!("Movie with id {} not found", id)))
    }
}
