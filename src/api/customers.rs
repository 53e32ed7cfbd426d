//! Customers API endpoints

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
    models::{Customer, PageQuery},
    AppState,
};

/// List customers
#[utoipa::path(
    get,
    path = "/customers",
    tag = "customers",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of customers", body = Vec<Customer>),
        (status = 400, description = "Invalid paging parameters", body = ErrorResponse)
    )
)]
pub async fn list_customers(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Response {
    let result = async {
        let page = page_param(query)?;
        state.services.customers.list(page).await
    }
    .await;
    state.respond(result)
}

/// Get customer by email
#[utoipa::path(
    get,
    path = "/customers/{email}",
    tag = "customers",
    params(("email" = String, Path, description = "Customer email")),
    responses(
        (status = 200, description = "Customer details", body = Customer),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    )
)]
pub async fn get_customer(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    let result = async {
        let email = path_param("email", path)?;
        state.services.customers.get(&email).await
    }
    .await;
    state.respond(result)
}

/// Register a customer
#[utoipa::path(
    post,
    path = "/customers",
    tag = "customers",
    request_body = Customer,
    responses(
        (status = 201, description = "Customer created", body = Customer),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse)
    )
)]
pub async fn create_customer(State(state): State<AppState>, body: Bytes) -> Response {
    let result = async {
        let customer = decode_body::<Customer>(&body)?;
        state.services.customers.create(&customer).await
    }
    .await;
    state.respond(result)
}

/// Replace a customer. The registration date cannot be changed.
#[utoipa::path(
    patch,
    path = "/customers/{email}",
    tag = "customers",
    params(("email" = String, Path, description = "Customer email, must match the body")),
    request_body = Customer,
    responses(
        (status = 200, description = "Customer updated"),
        (status = 400, description = "Invalid body or email mismatch", body = ErrorResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    )
)]
pub async fn update_customer(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Response {
    let result = async {
        let email = path_param("email", path)?;
        let customer = decode_body::<Customer>(&body)?;
        state.services.customers.update(&email, &customer).await
    }
    .await;
    state.respond(result)
}

/// Delete a customer
#[utoipa::path(
    delete,
    path = "/customers/{email}",
    tag = "customers",
    params(("email" = String, Path, description = "Customer email")),
    responses(
        (status = 200, description = "Customer deleted"),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    )
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    let result = async {
        let email = path_param("email", path)?;
        state.services.customers.delete(&email).await
    }
    .await;
    state.respond(result)
}
