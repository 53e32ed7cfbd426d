//! Customers service

use super::{
    convert::{customer_to_storage, customer_to_wire},
    Envelope,
};
use crate::{
    error::{AppError, AppResult},
    models::{Customer, Page},
    repository::Repository,
};

#[derive(Clone)]
pub struct CustomersService {
    repository: Repository,
}

impl CustomersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, page: Page) -> AppResult<Envelope<Vec<Customer>>> {
        tracing::debug!("Listing customers, page {} of size {}", page.number, page.size);
        let records = self
            .repository
            .customers
            .get_all(page)
            .await
            .map_err(|e| e.context("failed to list customers"))?;

        Ok(Envelope::ok(records.into_iter().map(customer_to_wire).collect()))
    }

    pub async fn get(&self, email: &str) -> AppResult<Envelope<Customer>> {
        tracing::debug!("Fetching customer {}", email);
        let record = self
            .repository
            .customers
            .get_by_id(email)
            .await
            .map_err(|e| e.context("failed to get customer"))?;

        Ok(Envelope::ok(customer_to_wire(record)))
    }

    /// Register a customer. The stored version carries the registration date.
    pub async fn create(&self, customer: &Customer) -> AppResult<Envelope<Customer>> {
        tracing::debug!("Adding customer {}", customer.email);
        let record = customer_to_storage(customer)?;
        let stored = self
            .repository
            .customers
            .create(&record)
            .await
            .map_err(|e| e.context("failed to add customer"))?;

        Ok(Envelope::created(customer_to_wire(stored)))
    }

    pub async fn update(&self, email: &str, customer: &Customer) -> AppResult<Envelope<()>> {
        if email != customer.email {
            return Err(AppError::IdMismatch { field: "email" });
        }

        tracing::debug!("Updating customer {}", email);
        let record = customer_to_storage(customer)?;
        self.repository
            .customers
            .update(&record)
            .await
            .map_err(|e| e.context("failed to update customer"))?;

        Ok(Envelope::empty())
    }

    pub async fn delete(&self, email: &str) -> AppResult<Envelope<()>> {
        tracing::debug!("Deleting customer {}", email);
        self.repository
            .customers
            .delete(email)
            .await
            .map_err(|e| e.context("failed to delete customer"))?;

        Ok(Envelope::empty())
    }
}
