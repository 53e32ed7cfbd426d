//! API handlers for the bookstore REST endpoints

pub mod authors;
pub mod books;
pub mod customers;
pub mod health;
pub mod openapi;
pub mod params;

use axum::{
    body::Bytes,
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query,
    },
    routing::{delete, get, patch, post},
    Router,
};
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;

use crate::{
    error::{AppError, AppResult},
    models::{Assertions, Page, PageQuery},
    AppState,
};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Books
        .route("/books", get(books::list_books))
        .route("/books", post(books::create_book))
        .route("/books/:isbn", get(books::get_book))
        .route("/books/:isbn", patch(books::update_book))
        .route("/books/:isbn", delete(books::delete_book))
        // Authors
        .route("/authors", get(authors::list_authors))
        .route("/authors", post(authors::create_author))
        .route("/authors/:id", get(authors::get_author))
        .route("/authors/:id", patch(authors::update_author))
        .route("/authors/:id", delete(authors::delete_author))
        // Customers
        .route("/customers", get(customers::list_customers))
        .route("/customers", post(customers::create_customer))
        .route("/customers/:email", get(customers::get_customer))
        .route("/customers/:email", patch(customers::update_customer))
        .route("/customers/:email", delete(customers::delete_customer))
        .with_state(state)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
}

/// Decode a strict JSON body and run its required-field and constraint checks
pub(crate) fn decode_body<T>(body: &Bytes) -> AppResult<T>
where
    T: DeserializeOwned + Assertions,
{
    let value: T = serde_json::from_slice(body).map_err(|e| AppError::Parsing {
        param: None,
        message: e.to_string(),
    })?;
    value.assert_required()?;
    value.assert_constraints()?;
    Ok(value)
}

/// Extracted path identifier, required to be non-blank
pub(crate) fn path_param(
    name: &str,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<String> {
    let Path(value) = path.map_err(|e| AppError::Parsing {
        param: Some(name.to_string()),
        message: e.body_text(),
    })?;
    params::required_path_param(name, &value)
}

pub(crate) fn page_param(query: Result<Query<PageQuery>, QueryRejection>) -> AppResult<Page> {
    let Query(query) = query.map_err(|e| AppError::Parsing {
        param: None,
        message: e.body_text(),
    })?;
    query.to_page()
}
