use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::exchange_rates::{
    dtos as exchange_rates_dtos, handlers as exchange_rates_handlers,
};
use crate::features::movies::{
    dtos as movies_dtos, handlers as movies_handlers, models as movies_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Movies
        movies_handlers::list_movies,
        movies_handlers::get_movie,
        movies_handlers::create_movie,
        movies_handlers::update_movie,
        movies_handlers::delete_movie,
        // Exchange rates
        exchange_rates_handlers::get_exchange_rate,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Categories
            categories_dtos::CategoryRequestDto,
            categories_dtos::CategoryResponseDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            // Movies
            movies_models::MovieStatus,
            movies_dtos::MovieRequestDto,
            movies_dtos::MovieResponseDto,
            ApiResponse<Vec<movies_dtos::MovieResponseDto>>,
            ApiResponse<movies_dtos::MovieResponseDto>,
            // Exchange rates
            exchange_rates_dtos::ExchangeRateResponseDto,
            ApiResponse<exchange_rates_dtos::ExchangeRateResponseDto>,
        )
    ),
    tags(
        (name = "categories", description = "Movie categories"),
        (name = "movies", description = "Movie catalog with converted prices"),
        (name = "exchange-rates", description = "Cached USD exchange rate"),
    ),
    info(
        title = "Movie Catalog API",
        version = "0.1.0",
        description = "API documentation for the movie catalog",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
