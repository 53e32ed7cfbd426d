//! Books API endpoints

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
    models::{Book, PageQuery},
    AppState,
};

/// List books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of books", body = Vec<Book>),
        (status = 400, description = "Invalid paging parameters", body = ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Response {
    let result = async {
        let page = page_param(query)?;
        state.services.books.list(page).await
    }
    .await;
    state.respond(result)
}

/// Get book by ISBN
#[utoipa::path(
    get,
    path = "/books/{isbn}",
    tag = "books",
    params(("isbn" = String, Path, description = "Book ISBN")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    let result = async {
        let isbn = path_param("isbn", path)?;
        state.services.books.get(&isbn).await
    }
    .await;
    state.respond(result)
}

/// Add a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = Book,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse)
    )
)]
pub async fn create_book(State(state): State<AppState>, body: Bytes) -> Response {
    let result = async {
        let book = decode_body::<Book>(&body)?;
        state.services.books.create(&book).await
    }
    .await;
    state.respond(result)
}

/// Replace a book
#[utoipa::path(
    patch,
    path = "/books/{isbn}",
    tag = "books",
    params(("isbn" = String, Path, description = "Book ISBN, must match the body")),
    request_body = Book,
    responses(
        (status = 200, description = "Book updated"),
        (status = 400, description = "Invalid body or ISBN mismatch", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Response {
    let result = async {
        let isbn = path_param("isbn", path)?;
        let book = decode_body::<Book>(&body)?;
        state.services.books.update(&isbn, &book).await
    }
    .await;
    state.respond(result)
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{isbn}",
    tag = "books",
    params(("isbn" = String, Path, description = "Book ISBN")),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    let result = async {
        let isbn = path_param("isbn", path)?;
        state.services.books.delete(&isbn).await
    }
    .await;
    state.respond(result)
}
