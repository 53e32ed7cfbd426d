//! Repository layer for database operations

pub mod authors;
pub mod books;
pub mod customers;

use std::sync::Arc;

use sqlx::{Pool, Postgres};

use crate::error::{AppError, AppResult};

pub use authors::{AuthorRecord, AuthorRepository, PgAuthorRepository};
pub use books::{BookRecord, BookRepository, PgBookRepository};
pub use customers::{CustomerRecord, CustomerRepository, PgCustomerRepository};

/// Main repository struct holding one repository per resource
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookRepository>,
    pub authors: Arc<dyn AuthorRepository>,
    pub customers: Arc<dyn CustomerRepository>,
}

impl Repository {
    /// Create the Postgres-backed repositories sharing the given pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(PgBookRepository::new(pool.clone())),
            authors: Arc::new(PgAuthorRepository::new(pool.clone())),
            customers: Arc::new(PgCustomerRepository::new(pool)),
        }
    }

    /// Assemble a repository from arbitrary implementations (used with mocks in tests)
    pub fn from_parts(
        books: Arc<dyn BookRepository>,
        authors: Arc<dyn AuthorRepository>,
        customers: Arc<dyn CustomerRepository>,
    ) -> Self {
        Self {
            books,
            authors,
            customers,
        }
    }
}

/// Serialize a list-valued column as a compact JSON array
pub fn encode_list(values: &[String]) -> String {
    serde_json::Value::from(values).to_string()
}

/// Decode a list-valued column.
///
/// `NULL`, an empty string and JSON `null` all decode to an empty list;
/// anything else must be a JSON array of strings.
pub fn decode_list(column: &'static str, raw: Option<String>) -> AppResult<Vec<String>> {
    let raw = match raw {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Ok(Vec::new()),
    };

    let values: Option<Vec<String>> = serde_json::from_str(&raw)
        .map_err(|source| AppError::CorruptRecord { column, source })?;
    Ok(values.unwrap_or_default())
}

#[cfg(test)]
impl Repository {
    /// Mocked repository where only the book store is expected to be touched
    pub(crate) fn with_books(books: books::MockBookRepository) -> Self {
        Self::from_parts(
            Arc::new(books),
            Arc::new(authors::MockAuthorRepository::new()),
            Arc::new(customers::MockCustomerRepository::new()),
        )
    }

    pub(crate) fn with_authors(authors: authors::MockAuthorRepository) -> Self {
        Self::from_parts(
            Arc::new(books::MockBookRepository::new()),
            Arc::new(authors),
            Arc::new(customers::MockCustomerRepository::new()),
        )
    }

    pub(crate) fn with_customers(customers: customers::MockCustomerRepository) -> Self {
        Self::from_parts(
            Arc::new(books::MockBookRepository::new()),
            Arc::new(authors::MockAuthorRepository::new()),
            Arc::new(customers),
        )
    }
}
