use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

/// Movie status enum matching database enum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "movie_status", rename_all = "lowercase")]
pub enum MovieStatus {
    #[default]
    Active,
    Inactive,
}

impl std::fmt::Display for MovieStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovieStatus::Active => write!(f, "Active"),
            MovieStatus::Inactive => write!(f, "Inactive"),
        }
    }
}

/// Database model for movie, joined with its category name
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: i32,
    pub status: MovieStatus,
    pub category_name: Option<String>,
}

/// Writable movie fields, shared by create and update
#[derive(Debug, Clone)]
pub struct MovieInput {
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: i32,
    pub status: MovieStatus,
}
