//! Customers repository

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, Pool, Postgres};

use super::{decode_list, encode_list};
use crate::{
    error::{AppError, AppResult},
    models::{CustomerStatus, Page},
};

/// Customer as stored in the `customer` table
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRecord {
    pub email: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub dob: NaiveDate,
    pub unit_no: Option<String>,
    pub street_name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zipcode: Option<String>,
    pub landmark: Option<String>,
    /// Assigned by the database on insert; never written back
    pub registration_date: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
    pub status: CustomerStatus,
    pub notes: Option<String>,
    pub languages: Vec<String>,
}

#[derive(FromRow)]
struct CustomerRow {
    email: String,
    first_name: String,
    middle_name: Option<String>,
    last_name: String,
    phone_number: Option<String>,
    dob: NaiveDate,
    unit_no: Option<String>,
    street_name: Option<String>,
    city: Option<String>,
    state: Option<String>,
    country: Option<String>,
    zipcode: Option<String>,
    landmark: Option<String>,
    registration_date: DateTime<Utc>,
    last_login: Option<DateTime<Utc>>,
    status: String,
    notes: Option<String>,
    languages: Option<String>,
}

impl TryFrom<CustomerRow> for CustomerRecord {
    type Error = AppError;

    fn try_from(row: CustomerRow) -> AppResult<Self> {
        let status = row.status.parse::<CustomerStatus>().map_err(|_| {
            AppError::Internal(format!(
                "customer {} has unknown status '{}'",
                row.email, row.status
            ))
        })?;

        Ok(CustomerRecord {
            languages: decode_list("languages", row.languages)?,
            status,
            email: row.email,
            first_name: row.first_name,
            middle_name: row.middle_name,
            last_name: row.last_name,
            phone_number: row.phone_number,
            dob: row.dob,
            unit_no: row.unit_no,
            street_name: row.street_name,
            city: row.city,
            state: row.state,
            country: row.country,
            zipcode: row.zipcode,
            landmark: row.landmark,
            registration_date: Some(row.registration_date),
            last_login: row.last_login,
            notes: row.notes,
        })
    }
}

const CUSTOMER_COLUMNS: &str = "email, first_name, middle_name, last_name, phone_number, dob, \
     unit_no, street_name, city, state, country, zipcode, landmark, registration_date, \
     last_login, status, notes, languages";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Insert a new customer and return the stored row, registration date included
    async fn create(&self, customer: &CustomerRecord) -> AppResult<CustomerRecord>;

    async fn get_by_id(&self, email: &str) -> AppResult<CustomerRecord>;

    /// Full-row update keyed by email. The registration date is left untouched.
    async fn update(&self, customer: &CustomerRecord) -> AppResult<()>;

    async fn delete(&self, email: &str) -> AppResult<()>;

    /// One page of customers ordered by email
    async fn get_all(&self, page: Page) -> AppResult<Vec<CustomerRecord>>;
}

#[derive(Clone)]
pub struct PgCustomerRepository {
    pool: Pool<Postgres>,
}

impl PgCustomerRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn create(&self, customer: &CustomerRecord) -> AppResult<CustomerRecord> {
        let query = format!(
            r#"
            INSERT INTO customer (
                email, first_name, middle_name, last_name, phone_number, dob,
                unit_no, street_name, city, state, country, zipcode, landmark,
                last_login, status, notes, languages
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING {CUSTOMER_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, CustomerRow>(&query)
            .bind(&customer.email)
            .bind(&customer.first_name)
            .bind(&customer.middle_name)
            .bind(&customer.last_name)
            .bind(&customer.phone_number)
            .bind(customer.dob)
            .bind(&customer.unit_no)
            .bind(&customer.street_name)
            .bind(&customer.city)
            .bind(&customer.state)
            .bind(&customer.country)
            .bind(&customer.zipcode)
            .bind(&customer.landmark)
            .bind(customer.last_login)
            .bind(customer.status.as_str())
            .bind(&customer.notes)
            .bind(encode_list(&customer.languages))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::storage("insert into customer failed", e))?;
        row.try_into()
    }

    async fn get_by_id(&self, email: &str) -> AppResult<CustomerRecord> {
        let query = format!("SELECT {CUSTOMER_COLUMNS} FROM customer WHERE email = $1");
        sqlx::query_as::<_, CustomerRow>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::storage("select from customer failed", e))?
            .ok_or_else(|| AppError::NotFound(format!("Customer {} not found", email)))?
            .try_into()
    }

    async fn update(&self, customer: &CustomerRecord) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE customer
            SET first_name = $2, middle_name = $3, last_name = $4, phone_number = $5,
                dob = $6, unit_no = $7, street_name = $8, city = $9, state = $10,
                country = $11, zipcode = $12, landmark = $13, last_login = $14,
                status = $15, notes = $16, languages = $17
            WHERE email = $1
            "#,
        )
        .bind(&customer.email)
        .bind(&customer.first_name)
        .bind(&customer.middle_name)
        .bind(&customer.last_name)
        .bind(&customer.phone_number)
        .bind(customer.dob)
        .bind(&customer.unit_no)
        .bind(&customer.street_name)
        .bind(&customer.city)
        .bind(&customer.state)
        .bind(&customer.country)
        .bind(&customer.zipcode)
        .bind(&customer.landmark)
        .bind(customer.last_login)
        .bind(customer.status.as_str())
        .bind(&customer.notes)
        .bind(encode_list(&customer.languages))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::storage("update of customer failed", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Customer {} not found",
                customer.email
            )));
        }
        Ok(())
    }

    async fn delete(&self, email: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM customer WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::storage("delete from customer failed", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Customer {} not found", email)));
        }
        Ok(())
    }

    async fn get_all(&self, page: Page) -> AppResult<Vec<CustomerRecord>> {
        let query =
            format!("SELECT {CUSTOMER_COLUMNS} FROM customer ORDER BY email LIMIT $1 OFFSET $2");
        let rows = sqlx::query_as::<_, CustomerRow>(&query)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::storage("select from customer failed", e))?;

        rows.into_iter().map(CustomerRecord::try_from).collect()
    }
}
