//! Authors service

use uuid::Uuid;

use super::{
    convert::{author_to_storage, author_to_wire},
    Envelope,
};
use crate::{
    error::{AppError, AppResult},
    models::{Author, Page},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, page: Page) -> AppResult<Envelope<Vec<Author>>> {
        tracing::debug!("Listing authors, page {} of size {}", page.number, page.size);
        let records = self
            .repository
            .authors
            .get_all(page)
            .await
            .map_err(|e| e.context("failed to list authors"))?;

        Ok(Envelope::ok(records.into_iter().map(author_to_wire).collect()))
    }

    pub async fn get(&self, id: &str) -> AppResult<Envelope<Author>> {
        tracing::debug!("Fetching author {}", id);
        let record = self
            .repository
            .authors
            .get_by_id(id)
            .await
            .map_err(|e| e.context("failed to get author"))?;

        Ok(Envelope::ok(author_to_wire(record)))
    }

    /// Insert an author, generating an id when none is given
    pub async fn create(&self, author: &Author) -> AppResult<Envelope<Author>> {
        let mut record = author_to_storage(author)?;
        if record.id.trim().is_empty() {
            record.id = Uuid::new_v4().to_string();
        }

        tracing::debug!("Adding author {}", record.id);
        let stored = self
            .repository
            .authors
            .create(&record)
            .await
            .map_err(|e| e.context("failed to add author"))?;

        Ok(Envelope::created(author_to_wire(stored)))
    }

    pub async fn update(&self, id: &str, author: &Author) -> AppResult<Envelope<()>> {
        if id != author.id {
            return Err(AppError::IdMismatch { field: "id" });
        }

        tracing::debug!("Updating author {}", id);
        let record = author_to_storage(author)?;
        self.repository
            .authors
            .update(&record)
            .await
            .map_err(|e| e.context("failed to update author"))?;

        Ok(Envelope::empty())
    }

    pub async fn delete(&self, id: &str) -> AppResult<Envelope<()>> {
        tracing::debug!("Deleting author {}", id);
        self.repository
            .authors
            .delete(id)
            .await
            .map_err(|e| e.context("failed to delete author"))?;

        Ok(Envelope::empty())
    }
}
