//! Error types for the eventhub server.
//!
//! Domain errors live in their own modules (configuration, provider synchronization) and are
//! aggregated into [`Error`], which every service returns. `thiserror` provides the `Display`
//! and `Error` implementations, and `#[from]` lets the `?` operator lift domain and library
//! errors into [`Error`]. The `IntoResponse` implementation maps errors onto HTTP responses
//! for the listing API.

pub mod config;
pub mod sync;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::server::{
    error::{config::ConfigError, sync::SyncError},
    model::api::ErrorDto,
};

/// Main error type for the eventhub server.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Synchronization errors (fetch, format detection, adaptation, reconciliation)
/// - External library errors (database, HTTP client, scheduler, socket binding)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// A provider synchronization stage failed.
    #[error(transparent)]
    SyncError(#[from] SyncError),
    /// Internal error indicating a bug in eventhub's code.
    #[error("Internal error, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// HTTP client construction error.
    #[error(transparent)]
    HttpClientError(#[from] reqwest::Error),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
    /// I/O error (binding the HTTP listener, serving connections).
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// Returns the synchronization error wrapped by this error, if any.
    pub fn as_sync_error(&self) -> Option<&SyncError> {
        match self {
            Self::SyncError(err) => Some(err),
            _ => None,
        }
    }

    /// Short machine-readable name of the failure, used in batch sync reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SyncError(err) => err.kind(),
            Self::ConfigError(_) => "config",
            Self::InternalError(_) => "internal",
            Self::DbErr(_) => "database",
            Self::HttpClientError(_) => "http_client",
            Self::SchedulerError(_) => "scheduler",
            Self::IoError(_) => "io",
        }
    }
}

/// Converts application errors into HTTP responses.
///
/// Every error reaching the listing API is unexpected, so all of them become a logged
/// 500 Internal Server Error without leaking details to the client.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        InternalServerError(self).into_response()
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic "Internal server error" message to the client
/// to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
