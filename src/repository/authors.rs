//! Authors repository

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, Pool, Postgres};

use super::{decode_list, encode_list};
use crate::{
    error::{AppError, AppResult},
    models::Page,
};

/// Author as stored in the `authors` table. Optional columns are `None` when unset.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorRecord {
    pub id: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub dob: NaiveDate,
    pub unit_no: Option<String>,
    pub street_name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zipcode: Option<String>,
    pub landmark: Option<String>,
    pub languages: Vec<String>,
}

#[derive(FromRow)]
struct AuthorRow {
    id: String,
    first_name: String,
    middle_name: Option<String>,
    last_name: String,
    dob: NaiveDate,
    unit_no: Option<String>,
    street_name: Option<String>,
    city: Option<String>,
    state: Option<String>,
    country: Option<String>,
    zipcode: Option<String>,
    landmark: Option<String>,
    languages: Option<String>,
}

impl TryFrom<AuthorRow> for AuthorRecord {
    type Error = AppError;

    fn try_from(row: AuthorRow) -> AppResult<Self> {
        Ok(AuthorRecord {
            languages: decode_list("languages", row.languages)?,
            id: row.id,
            first_name: row.first_name,
            middle_name: row.middle_name,
            last_name: row.last_name,
            dob: row.dob,
            unit_no: row.unit_no,
            street_name: row.street_name,
            city: row.city,
            state: row.state,
            country: row.country,
            zipcode: row.zipcode,
            landmark: row.landmark,
        })
    }
}

const AUTHOR_COLUMNS: &str = "id, first_name, middle_name, last_name, dob, unit_no, street_name, \
     city, state, country, zipcode, landmark, languages";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Insert a new author and return the stored row
    async fn create(&self, author: &AuthorRecord) -> AppResult<AuthorRecord>;

    async fn get_by_id(&self, id: &str) -> AppResult<AuthorRecord>;

    /// Full-row update keyed by id
    async fn update(&self, author: &AuthorRecord) -> AppResult<()>;

    async fn delete(&self, id: &str) -> AppResult<()>;

    /// One page of authors ordered by id
    async fn get_all(&self, page: Page) -> AppResult<Vec<AuthorRecord>>;
}

#[derive(Clone)]
pub struct PgAuthorRepository {
    pool: Pool<Postgres>,
}

impl PgAuthorRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorRepository for PgAuthorRepository {
    async fn create(&self, author: &AuthorRecord) -> AppResult<AuthorRecord> {
        let query = format!(
            r#"
            INSERT INTO authors ({AUTHOR_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {AUTHOR_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, AuthorRow>(&query)
            .bind(&author.id)
            .bind(&author.first_name)
            .bind(&author.middle_name)
            .bind(&author.last_name)
            .bind(author.dob)
            .bind(&author.unit_no)
            .bind(&author.street_name)
            .bind(&author.city)
            .bind(&author.state)
            .bind(&author.country)
            .bind(&author.zipcode)
            .bind(&author.landmark)
            .bind(encode_list(&author.languages))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::storage("insert into authors failed", e))?;
        row.try_into()
    }

    async fn get_by_id(&self, id: &str) -> AppResult<AuthorRecord> {
        let query = format!("SELECT {AUTHOR_COLUMNS} FROM authors WHERE id = $1");
        sqlx::query_as::<_, AuthorRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::storage("select from authors failed", e))?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))?
            .try_into()
    }

    async fn update(&self, author: &AuthorRecord) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE authors
            SET first_name = $2, middle_name = $3, last_name = $4, dob = $5,
                unit_no = $6, street_name = $7, city = $8, state = $9,
                country = $10, zipcode = $11, landmark = $12, languages = $13
            WHERE id = $1
            "#,
        )
        .bind(&author.id)
        .bind(&author.first_name)
        .bind(&author.middle_name)
        .bind(&author.last_name)
        .bind(author.dob)
        .bind(&author.unit_no)
        .bind(&author.street_name)
        .bind(&author.city)
        .bind(&author.state)
        .bind(&author.country)
        .bind(&author.zipcode)
        .bind(&author.landmark)
        .bind(encode_list(&author.languages))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::storage("update of authors failed", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author {} not found", author.id)));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::storage("delete from authors failed", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author {} not found", id)));
        }
        Ok(())
    }

    async fn get_all(&self, page: Page) -> AppResult<Vec<AuthorRecord>> {
        let query = format!("SELECT {AUTHOR_COLUMNS} FROM authors ORDER BY id LIMIT $1 OFFSET $2");
        let rows = sqlx::query_as::<_, AuthorRow>(&query)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::storage("select from authors failed", e))?;

        rows.into_iter().map(AuthorRecord::try_from).collect()
    }
}
