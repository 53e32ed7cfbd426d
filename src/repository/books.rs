//! Books repository

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, Pool, Postgres};

use super::{decode_list, encode_list};
use crate::{
    error::{AppError, AppResult},
    models::Page,
};

/// Book as stored in the `books` table
#[derive(Debug, Clone, PartialEq)]
pub struct BookRecord {
    pub isbn: String,
    pub name: String,
    pub tags: Vec<String>,
    pub author_name: String,
    pub date_of_publish: NaiveDate,
    pub publishing_house: String,
    pub number_of_pages: i32,
    pub cost: Decimal,
}

#[derive(FromRow)]
struct BookRow {
    isbn: String,
    name: String,
    tags: Option<String>,
    author_name: String,
    date_of_publish: NaiveDate,
    publishing_house: String,
    number_of_pages: i32,
    cost: Decimal,
}

impl TryFrom<BookRow> for BookRecord {
    type Error = AppError;

    fn try_from(row: BookRow) -> AppResult<Self> {
        Ok(BookRecord {
            tags: decode_list("tags", row.tags)?,
            isbn: row.isbn,
            name: row.name,
            author_name: row.author_name,
            date_of_publish: row.date_of_publish,
            publishing_house: row.publishing_house,
            number_of_pages: row.number_of_pages,
            cost: row.cost,
        })
    }
}

const BOOK_COLUMNS: &str =
    "isbn, name, tags, author_name, date_of_publish, publishing_house, number_of_pages, cost";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Insert a new book and return the stored row
    async fn create(&self, book: &BookRecord) -> AppResult<BookRecord>;

    async fn get_by_id(&self, isbn: &str) -> AppResult<BookRecord>;

    /// Full-row update keyed by ISBN
    async fn update(&self, book: &BookRecord) -> AppResult<()>;

    async fn delete(&self, isbn: &str) -> AppResult<()>;

    /// One page of books ordered by ISBN
    async fn get_all(&self, page: Page) -> AppResult<Vec<BookRecord>>;
}

#[derive(Clone)]
pub struct PgBookRepository {
    pool: Pool<Postgres>,
}

impl PgBookRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn create(&self, book: &BookRecord) -> AppResult<BookRecord> {
        let query = format!(
            r#"
            INSERT INTO books ({BOOK_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {BOOK_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, BookRow>(&query)
            .bind(&book.isbn)
            .bind(&book.name)
            .bind(encode_list(&book.tags))
            .bind(&book.author_name)
            .bind(book.date_of_publish)
            .bind(&book.publishing_house)
            .bind(book.number_of_pages)
            .bind(book.cost)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::storage("insert into books failed", e))?;
        row.try_into()
    }

    async fn get_by_id(&self, isbn: &str) -> AppResult<BookRecord> {
        let query = format!("SELECT {BOOK_COLUMNS} FROM books WHERE isbn = $1");
        sqlx::query_as::<_, BookRow>(&query)
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::storage("select from books failed", e))?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", isbn)))?
            .try_into()
    }

    async fn update(&self, book: &BookRecord) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET name = $2, tags = $3, author_name = $4, date_of_publish = $5,
                publishing_house = $6, number_of_pages = $7, cost = $8
            WHERE isbn = $1
            "#,
        )
        .bind(&book.isbn)
        .bind(&book.name)
        .bind(encode_list(&book.tags))
        .bind(&book.author_name)
        .bind(book.date_of_publish)
        .bind(&book.publishing_house)
        .bind(book.number_of_pages)
        .bind(book.cost)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::storage("update of books failed", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", book.isbn)));
        }
        Ok(())
    }

    async fn delete(&self, isbn: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE isbn = $1")
            .bind(isbn)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::storage("delete from books failed", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", isbn)));
        }
        Ok(())
    }

    async fn get_all(&self, page: Page) -> AppResult<Vec<BookRecord>> {
        let query = format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY isbn LIMIT $1 OFFSET $2");
        let rows = sqlx::query_as::<_, BookRow>(&query)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::storage("select from books failed", e))?;

        rows.into_iter().map(BookRecord::try_from).collect()
    }
}
