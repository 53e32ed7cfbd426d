//! Bookstore Server
//!
//! A REST JSON API for managing the books, authors and customers of a bookstore,
//! backed by PostgreSQL.

use std::sync::Arc;

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use error::{default_error_handler, ErrorHandler};
use services::{Envelope, Services};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<Services>,
    pub error_handler: ErrorHandler,
}

impl AppState {
    pub fn new(services: Arc<Services>) -> Self {
        Self {
            services,
            error_handler: default_error_handler(),
        }
    }

    /// Replace the function that turns failures into responses
    pub fn with_error_handler(mut self, error_handler: ErrorHandler) -> Self {
        self.error_handler = error_handler;
        self
    }

    /// Write a service outcome: the envelope's status with its body as JSON,
    /// or whatever the error handler makes of a failure
    pub fn respond<T: Serialize>(&self, result: AppResult<Envelope<T>>) -> Response {
        match result {
            Ok(Envelope {
                status,
                body: Some(body),
            }) => (status, Json(body)).into_response(),
            Ok(Envelope { status, body: None }) => status.into_response(),
            Err(err) => (self.error_handler)(err),
        }
    }
}
