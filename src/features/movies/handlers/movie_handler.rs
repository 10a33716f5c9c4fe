use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::movies::dtos::{MovieRequestDto, MovieResponseDto};
use crate::features::movies::services::MovieService;
use crate::shared::types::{ApiResponse, Meta};

/// List all movies with converted prices
#[utoipa::path(
    get,
    path = "/api/movies",
    responses(
        (status = 200, description = "List of movies", body = ApiResponse<Vec<MovieResponseDto>>),
    ),
    tag = "movies"
)]
pub async fn list_movies(
    State(service): State<Arc<MovieService>>,
) -> Result<Json<ApiResponse<Vec<MovieResponseDto>>>> {
    let movies = service.list().await?;
    let total = movies.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(movies),
        None,
        Some(Meta { total }),
    )))
}

/// Get movie by id
#[utoipa::path(
    get,
    path = "/api/movies/{id}",
    params(
        ("id" = i32, Path, description = "Movie id")
    ),
    responses(
        (status = 200, description = "Movie found", body = ApiResponse<MovieResponseDto>),
        (status = 404, description = "Movie not found")
    ),
    tag = "movies"
)]
pub async fn get_movie(
    State(service): State<Arc<MovieService>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MovieResponseDto>>> {
    let movie = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(movie), None, None)))
}

/// Create a movie
#[utoipa::path(
    post,
    path = "/api/movies",
    request_body = MovieRequestDto,
    responses(
        (status = 201, description = "Movie created", body = ApiResponse<MovieResponseDto>),
        (status = 400, description = "Validation error or category does not exist")
    ),
    tag = "movies"
)]
pub async fn create_movie(
    State(service): State<Arc<MovieService>>,
    AppJson(dto): AppJson<MovieRequestDto>,
) -> Result<(
    StatusCode,
    [(header::HeaderName, String); 1],
    Json<ApiResponse<MovieResponseDto>>,
)> {
    dto.validate()?;

    let movie = service.create(dto).await?;
    let location = format!("/api/movies/{}", movie.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ApiResponse::success(Some(movie), None, None)),
    ))
}

/// Replace a movie
#[utoipa::path(
    put,
    path = "/api/movies/{id}",
    params(
        ("id" = i32, Path, description = "Movie id")
    ),
    request_body = MovieRequestDto,
    responses(
        (status = 204, description = "Movie updated"),
        (status = 400, description = "Validation error or category does not exist"),
        (status = 404, description = "Movie not found"),
        (status = 409, description = "Movie changed concurrently")
    ),
    tag = "movies"
)]
pub async fn update_movie(
    State(service): State<Arc<MovieService>>,
    Path(id): Path<i32>,
    AppJson(dto): AppJson<MovieRequestDto>,
) -> Result<StatusCode> {
    dto.validate()?;

    service.update(id, dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a movie
#[utoipa::path(
    delete,
    path = "/api/movies/{id}",
    params(
        ("id" = i32, Path, description = "Movie id")
    ),
    responses(
        (status = 204, description = "Movie deleted"),
        (status = 404, description = "Movie not found")
    ),
    tag = "movies"
)]
pub async fn delete_movie(
    State(service): State<Arc<MovieService>>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::http::{header, StatusCode};
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;
    use serde_json::{json, Value};

    use crate::shared::test_helpers::TestApp;

    async fn create_category(app: &TestApp, name: &str) -> i64 {
        let response = app
            .server
            .post("/api/categories")
            .json(&json!({ "name": name }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<Value>()["data"]["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_create_movie_returns_converted_price() {
        let app = TestApp::new().await;
        let category_id = create_category(&app, "Drama").await;

        let response = app
            .server
            .post("/api/movies")
            .json(&json!({ "title": "X", "price": 10, "categoryId": category_id }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body = response.json::<Value>();
        let id = body["data"]["id"].as_i64().unwrap();
        assert_eq!(
            response.header(header::LOCATION).to_str().unwrap(),
            format!("/api/movies/{}", id)
        );
        assert_eq!(body["data"]["price"], json!(10));
        assert_eq!(body["data"]["priceConverted"], json!(36830));
        assert_eq!(body["data"]["status"], json!("Active"));
        assert_eq!(body["data"]["categoryName"], json!("Drama"));

        let fetched = app.server.get(&format!("/api/movies/{}", id)).await;
        fetched.assert_status_ok();
        assert_eq!(fetched.json::<Value>()["data"]["priceConverted"], json!(36830));
    }

    #[tokio::test]
    async fn test_create_movie_validation_errors() {
        let app = TestApp::new().await;
        let category_id = create_category(&app, "Drama").await;

        let response = app
            .server
            .post("/api/movies")
            .json(&json!({ "title": "", "price": 0, "categoryId": category_id }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body = response.json::<Value>();
        assert_eq!(body["success"], json!(false));
        assert!(body["field_errors"]["title"].is_array());
        assert!(body["field_errors"]["price"].is_array());
    }

    #[tokio::test]
    async fn test_create_movie_with_unknown_category_is_bad_request() {
        let app = TestApp::new().await;

        let response = app
            .server
            .post("/api/movies")
            .json(&json!({ "title": "Roma", "price": 12.5, "categoryId": 404 }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(app.activity_lines().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete_movie() {
        let app = TestApp::new().await;
        let drama = create_category(&app, "Drama").await;
        let comedy = create_category(&app, "Comedy").await;
        let title: String = Sentence(1..4).fake();

        let created = app
            .server
            .post("/api/movies")
            .json(&json!({ "title": &title, "price": 5, "categoryId": drama }))
            .await
            .json::<Value>();
        let id = created["data"]["id"].as_i64().unwrap();
        let path = format!("/api/movies/{}", id);

        let response = app
            .server
            .put(&path)
            .json(&json!({
                "title": &title,
                "description": "Recut",
                "price": 7.25,
                "categoryId": comedy,
                "status": "Inactive"
            }))
            .await;
        response.assert_status(StatusCode::NO_CONTENT);

        let body = app.server.get(&path).await.json::<Value>();
        assert_eq!(body["data"]["categoryName"], json!("Comedy"));
        assert_eq!(body["data"]["status"], json!("Inactive"));
        assert_eq!(body["data"]["description"], json!("Recut"));

        app.server
            .delete(&path)
            .await
            .assert_status(StatusCode::NO_CONTENT);
        app.server.get(&path).await.assert_status_not_found();
        app.server.delete(&path).await.assert_status_not_found();

        let lines = app.activity_lines().await;
        let actions: Vec<&str> = lines
            .iter()
            .map(|l| l.split(" | ").nth(1).unwrap())
            .collect();
        assert_eq!(actions, vec!["Create", "Update", "Delete"]);
        assert!(lines[1].ends_with(&format!(" | {} | 7.25 | {}", id, comedy)));
    }

    #[tokio::test]
    async fn test_update_missing_movie_is_not_found() {
        let app = TestApp::new().await;
        let drama = create_category(&app, "Drama").await;

        app.server
            .put("/api/movies/99")
            .json(&json!({ "title": "Ghost", "price": 1, "categoryId": drama }))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_list_movies_reports_total() {
        let app = TestApp::new().await;
        let drama = create_category(&app, "Drama").await;
        for price in [1, 2] {
            app.server
                .post("/api/movies")
                .json(&json!({ "title": "Copy", "price": price, "categoryId": drama }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let body = app.server.get("/api/movies").await.json::<Value>();
        assert_eq!(body["meta"]["total"], json!(2));
        assert_eq!(body["data"][1]["priceConverted"], json!(7366));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = TestApp::new().await;

        app.server
            .post("/api/movies")
            .text("{not json")
            .content_type("application/json")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
