//! Wire models for the bookstore API

pub mod author;
pub mod book;
pub mod common;
pub mod customer;
pub mod pagination;

use crate::error::AppResult;

// Re-export commonly used types
pub use author::Author;
pub use book::Book;
pub use common::{Address, PersonName};
pub use customer::{Customer, CustomerStatus};
pub use pagination::{Page, PageQuery};

/// Request-body checks run by the controllers before a model reaches a service
pub trait Assertions {
    /// Fails with `AppError::RequiredField` naming the first empty required field
    fn assert_required(&self) -> AppResult<()>;

    /// Fails with `AppError::Constraint` when a present value is out of range or malformed
    fn assert_constraints(&self) -> AppResult<()>;
}
