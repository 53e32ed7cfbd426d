//! Books service

use super::{
    convert::{book_to_storage, book_to_wire},
    Envelope,
};
use crate::{
    error::{AppError, AppResult},
    models::{Book, Page},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List one page of books
    pub async fn list(&self, page: Page) -> AppResult<Envelope<Vec<Book>>> {
        tracing::debug!("Listing books, page {} of size {}", page.number, page.size);
        let records = self
            .repository
            .books
            .get_all(page)
            .await
            .map_err(|e| e.context("failed to list books"))?;

        Ok(Envelope::ok(records.into_iter().map(book_to_wire).collect()))
    }

    pub async fn get(&self, isbn: &str) -> AppResult<Envelope<Book>> {
        tracing::debug!("Fetching book {}", isbn);
        let record = self
            .repository
            .books
            .get_by_id(isbn)
            .await
            .map_err(|e| e.context("failed to get book"))?;

        Ok(Envelope::ok(book_to_wire(record)))
    }

    /// Insert a book and answer with the stored version
    pub async fn create(&self, book: &Book) -> AppResult<Envelope<Book>> {
        tracing::debug!("Adding book {}", book.isbn);
        let record = book_to_storage(book)?;
        let stored = self
            .repository
            .books
            .create(&record)
            .await
            .map_err(|e| e.context("failed to add book"))?;

        Ok(Envelope::created(book_to_wire(stored)))
    }

    /// Replace a book. The ISBN in the path must match the one in the body.
    pub async fn update(&self, isbn: &str, book: &Book) -> AppResult<Envelope<()>> {
        if isbn != book.isbn {
            return Err(AppError::IdMismatch { field: "isbn" });
        }

        tracing::debug!("Updating book {}", isbn);
        let record = book_to_storage(book)?;
        self.repository
            .books
            .update(&record)
            .await
            .map_err(|e| e.context("failed to update book"))?;

        Ok(Envelope::empty())
    }

    pub async fn delete(&self, isbn: &str) -> AppResult<Envelope<()>> {
        tracing::debug!("Deleting book {}", isbn);
        self.repository
            .books
            .delete(isbn)
            .await
            .map_err(|e| e.context("failed to delete book"))?;

        Ok(Envelope::empty())
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;
    use crate::repository::{books::MockBookRepository, BookRecord};

    fn record() -> BookRecord {
        BookRecord {
            isbn: "123".to_string(),
            name: "Go".to_string(),
            tags: vec![],
            author_name: "A".to_string(),
            date_of_publish: NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
            publishing_house: String::new(),
            number_of_pages: 100,
            cost: Decimal::new(999, 2),
        }
    }

    /// Wire form of `record()` as a client would send it
    fn book() -> Book {
        Book {
            date_of_publish: "2020-01-02".to_string(),
            ..book_to_wire(record())
        }
    }

    fn service(mock: MockBookRepository) -> BooksService {
        BooksService::new(Repository::with_books(mock))
    }

    #[tokio::test]
    async fn test_create_returns_created_book() {
        let mut mock = MockBookRepository::new();
        mock.expect_create()
            .withf(|book| book.isbn == "123" && book.cost == Decimal::new(999, 2))
            .times(1)
            .returning(|book| Ok(book.clone()));

        let envelope = service(mock).create(&book()).await.unwrap();

        assert_eq!(envelope.status, StatusCode::CREATED);
        assert_eq!(envelope.body.unwrap().date_of_publish, "01/02/20");
    }

    #[tokio::test]
    async fn test_update_with_mismatched_isbn_never_touches_storage() {
        let mut mock = MockBookRepository::new();
        mock.expect_update().never();

        let result = service(mock).update("999", &book()).await;

        assert!(matches!(result, Err(AppError::IdMismatch { field: "isbn" })));
    }

    #[tokio::test]
    async fn test_update_of_missing_book_is_not_found() {
        let mut mock = MockBookRepository::new();
        mock.expect_update()
            .times(1)
            .returning(|book| Err(AppError::NotFound(format!("Book {} not found", book.isbn))));

        let result = service(mock).update("123", &book()).await;
        let err = result.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_of_missing_book_is_not_found() {
        let mut mock = MockBookRepository::new();
        mock.expect_delete()
            .returning(|isbn| Err(AppError::NotFound(format!("Book {} not found", isbn))));

        let err = service(mock).delete("nope").await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_storage_failure_is_wrapped() {
        let mut mock = MockBookRepository::new();
        mock.expect_get_all().returning(|_| {
            Err(AppError::storage(
                "select from books failed",
                sqlx::Error::PoolTimedOut,
            ))
        });

        let err = service(mock).list(Page::default()).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("failed to list books: "));
    }

    #[tokio::test]
    async fn test_list_empty_page() {
        let mut mock = MockBookRepository::new();
        mock.expect_get_all()
            .withf(|page| page.number == 2 && page.size == 10)
            .returning(|_| Ok(vec![]));

        let envelope = service(mock)
            .list(Page { number: 2, size: 10 })
            .await
            .unwrap();
        assert_eq!(envelope.status, StatusCode::OK);
        assert_eq!(envelope.body, Some(vec![]));
    }
}
