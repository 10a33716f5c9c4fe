use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::movies::models::{Movie, MovieInput, MovieStatus};
use crate::shared::validation::{validate_price, validate_title};

/// Request DTO for creating or replacing a movie
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieRequestDto {
    /// Movie title (required)
    #[validate(custom(function = "validate_title"))]
    #[serde(default)]
    pub title: String,

    /// Optional synopsis
    #[validate(length(max = 1000, message = "Description must not exceed 1000 characters"))]
    pub description: Option<String>,

    /// Price in USD, greater than zero
    #[validate(custom(function = "validate_price"))]
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,

    /// Id of an existing category
    pub category_id: i32,

    /// Defaults to `Active`
    #[serde(default)]
    pub status: MovieStatus,
}

impl From<MovieRequestDto> for MovieInput {
    fn from(dto: MovieRequestDto) -> Self {
        Self {
            title: dto.title.trim().to_string(),
            description: dto.description,
            price: dto.price,
            category_id: dto.category_id,
            status: dto.status,
        }
    }
}

/// Response DTO for movie, with the price converted to the display currency
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponseDto {
    pub id: i32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price_converted: Decimal,
    pub category_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    pub status: MovieStatus,
}

impl MovieResponseDto {
    pub fn new(movie: Movie, price_converted: Decimal) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            description: movie.description,
            price: movie.price,
            price_converted,
            category_id: movie.category_id,
            category_name: movie.category_name,
            status: movie.status,
        }
    }
}
