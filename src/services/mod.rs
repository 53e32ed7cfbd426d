//! Business logic services

pub mod authors;
pub mod books;
pub mod convert;
pub mod customers;

use axum::http::StatusCode;

use crate::repository::Repository;

/// Outcome of a successful service call: the status to answer with and an optional body
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub status: StatusCode,
    pub body: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(body: T) -> Self {
        Self {
            status: StatusCode::OK,
            body: Some(body),
        }
    }

    pub fn created(body: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            body: Some(body),
        }
    }

    /// 200 without a body
    pub fn empty() -> Self {
        Self {
            status: StatusCode::OK,
            body: None,
        }
    }
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub authors: authors::AuthorsService,
    pub customers: customers::CustomersService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            books: books::BooksService::new(repository.clone()),
            authors: authors::AuthorsService::new(repository.clone()),
            customers: customers::CustomersService::new(repository),
        }
    }
}
