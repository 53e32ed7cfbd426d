//! Book model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{
    common::{parse_iso_date, require_text},
    Assertions,
};
use crate::error::AppResult;

/// Book as exchanged over HTTP.
///
/// `date_of_publish` is rendered as MM/DD/YY and accepted only as YYYY-MM-DD.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default, deny_unknown_fields)]
pub struct Book {
    /// ISBN, primary key
    #[validate(length(max = 32, message = "isbn is longer than 32 characters"))]
    pub isbn: String,
    #[validate(length(max = 255, message = "name is longer than 255 characters"))]
    pub name: String,
    pub tags: Vec<String>,
    /// Author display name; not a reference to an author record
    #[validate(length(max = 255, message = "author_name is longer than 255 characters"))]
    pub author_name: String,
    pub date_of_publish: String,
    #[validate(length(max = 255, message = "publishing_house is longer than 255 characters"))]
    pub publishing_house: String,
    #[validate(range(min = 0, message = "number_of_pages cannot be negative"))]
    pub number_of_pages: i32,
    /// Stored as NUMERIC(12,2)
    #[validate(range(
        min = 0.0,
        max = 9_999_999_999.99,
        message = "cost must be between 0 and 9999999999.99"
    ))]
    pub cost: f64,
}

impl Assertions for Book {
    fn assert_required(&self) -> AppResult<()> {
        require_text("isbn", &self.isbn)?;
        require_text("name", &self.name)?;
        require_text("author_name", &self.author_name)?;
        require_text("date_of_publish", &self.date_of_publish)?;
        Ok(())
    }

    fn assert_constraints(&self) -> AppResult<()> {
        self.validate()?;
        parse_iso_date("date_of_publish", &self.date_of_publish)?;
        Ok(())
    }
}
