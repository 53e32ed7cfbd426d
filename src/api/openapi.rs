//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, customers, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookstore API",
        version = "1.0.0",
        description = "Books, authors and customers of a bookstore"
    ),
    paths(
        // Health
        health::health_check,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        // Customers
        customers::list_customers,
        customers::get_customer,
        customers::create_customer,
        customers::update_customer,
        customers::delete_customer,
    ),
    components(
        schemas(
            health::HealthResponse,
            crate::error::ErrorResponse,
            crate::models::Book,
            crate::models::Author,
            crate::models::Customer,
            crate::models::CustomerStatus,
            crate::models::PersonName,
            crate::models::Address,
        )
    ),
    tags(
        (name = "health", description = "Liveness"),
        (name = "books", description = "Book catalog"),
        (name = "authors", description = "Author records"),
        (name = "customers", description = "Customer accounts")
    )
)]
pub struct ApiDoc;

/// Create OpenAPI router with Swagger UI
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
