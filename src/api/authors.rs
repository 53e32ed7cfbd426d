//! Authors API endpoints

use axum::{
    body::Bytes,
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::Response,
};

use super::{decode_body, page_param, path_param};
use crate::{
    error::ErrorResponse,
    models::{Author, PageQuery},
    AppState,
};

/// List authors
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of authors", body = Vec<Author>),
        (status = 400, description = "Invalid paging parameters", body = ErrorResponse)
    )
)]
pub async fn list_authors(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Response {
    let result = async {
        let page = page_param(query)?;
        state.services.authors.list(page).await
    }
    .await;
    state.respond(result)
}

/// Get author by ID
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = String, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = Author),
        (status = 404, description = "Author not found", body = ErrorResponse)
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    let result = async {
        let id = path_param("id", path)?;
        state.services.authors.get(&id).await
    }
    .await;
    state.respond(result)
}

/// Add an author. An empty `id` is replaced by a generated one.
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    request_body = Author,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse)
    )
)]
pub async fn create_author(State(state): State<AppState>, body: Bytes) -> Response {
    let result = async {
        let author = decode_body::<Author>(&body)?;
        state.services.authors.create(&author).await
    }
    .await;
    state.respond(result)
}

/// Replace an author
#[utoipa::path(
    patch,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = String, Path, description = "Author ID, must match the body")),
    request_body = Author,
    responses(
        (status = 200, description = "Author updated"),
        (status = 400, description = "Invalid body or ID mismatch", body = ErrorResponse),
        (status = 404, description = "Author not found", body = ErrorResponse)
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Response {
    let result = async {
        let id = path_param("id", path)?;
        let author = decode_body::<Author>(&body)?;
        state.services.authors.update(&id, &author).await
    }
    .await;
    state.respond(result)
}

/// Delete an author
#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = String, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author deleted"),
        (status = 404, description = "Author not found", body = ErrorResponse)
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    let result = async {
        let id = path_param("id", path)?;
        state.services.authors.delete(&id).await
    }
    .await;
    state.respond(result)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{
        api::test_support::{router, send},
        error::AppError,
        repository::{authors::MockAuthorRepository, Repository},
    };

    #[tokio::test]
    async fn test_missing_languages_is_rejected() {
        let mut mock = MockAuthorRepository::new();
        mock.expect_create().never();
        let app = router(Repository::with_authors(mock));

        let body = r#"{"name": {"first_name": "Ursula", "last_name": "Le Guin"},
                       "dob": "1929-10-21"}"#;
        let (status, value) = send(app, "POST", "/authors", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["field"], "languages");
        assert_eq!(value["error"], "MissingField");
    }

    #[tokio::test]
    async fn test_create_renders_optional_fields_as_empty_strings() {
        let mut mock = MockAuthorRepository::new();
        mock.expect_create().times(1).returning(|record| Ok(record.clone()));
        let app = router(Repository::with_authors(mock));

        let body = r#"{"name": {"first_name": "Ursula", "last_name": "Le Guin"},
                       "dob": "1929-10-21", "address": {"city": "Portland"},
                       "languages": ["en"]}"#;
        let (status, value) = send(app, "POST", "/authors", Some(body)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert!(!value["id"].as_str().unwrap_or_default().is_empty());
        assert_eq!(value["name"]["middle_name"], "");
        assert_eq!(value["address"]["city"], "Portland");
        assert_eq!(value["address"]["landmark"], "");
    }

    #[tokio::test]
    async fn test_invalid_dob() {
        let mut mock = MockAuthorRepository::new();
        mock.expect_create().never();
        let app = router(Repository::with_authors(mock));

        let body = r#"{"name": {"first_name": "U", "last_name": "L"},
                       "dob": "21/10/1929", "languages": ["en"]}"#;
        let (status, value) = send(app, "POST", "/authors", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["field"], "dob");
    }

    #[tokio::test]
    async fn test_oversized_zipcode_is_rejected() {
        let mut mock = MockAuthorRepository::new();
        mock.expect_create().never();
        let app = router(Repository::with_authors(mock));

        let body = json!({
            "name": {"first_name": "U", "last_name": "L"},
            "dob": "1929-10-21",
            "address": {"zipcode": "1".repeat(21)},
            "languages": ["en"]
        })
        .to_string();
        let (status, value) = send(app, "POST", "/authors", Some(body.as_str())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["field"], "zipcode");
    }

    #[tokio::test]
    async fn test_delete_missing_author() {
        let mut mock = MockAuthorRepository::new();
        mock.expect_delete()
            .times(1)
            .returning(|id| Err(AppError::NotFound(format!("Author {} not found", id))));

        let app = router(Repository::with_authors(mock));

        let (status, _) = send(app, "DELETE", "/authors/ghost", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
