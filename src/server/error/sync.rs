//! Errors raised while synchronizing a provider's resource.
//!
//! Each variant belongs to one stage of the pipeline. All of them abort the current
//! provider's sync only; the batch runner logs and reports them without touching sibling
//! providers.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use super::Error as ServerError;

/// Failure of one stage of a provider sync.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The provider endpoint answered with a non-2xx status or could not be reached.
    #[error("Provider resource at {url} is unavailable: {reason}")]
    UpstreamUnavailable {
        /// Resource URL that was requested.
        url: String,
        /// Transport error or unexpected status.
        reason: String,
    },
    /// The payload is neither valid JSON nor a well-formed XML document.
    #[error("Provider resource is neither JSON nor XML")]
    UnrecognizedFormat,
    /// A required field is missing or has the wrong shape somewhere in the resource.
    #[error("Malformed provider resource: {0}")]
    MalformedResource(String),
    /// A natural-key constraint was violated while reconciling.
    ///
    /// Reconciliation looks records up by natural key before writing, so seeing this
    /// indicates a bug rather than bad provider data.
    #[error("Persistence conflict while reconciling provider resource: {0}")]
    PersistenceConflict(String),
    /// No provider exists with the given ID.
    #[error("Provider {0} does not exist")]
    ProviderNotFound(i32),
    /// The provider has no resource URL configured.
    #[error("Provider {0} has no resource configured")]
    MissingResource(i32),
    /// Another sync of the same provider is still running.
    #[error("Provider {0} is already being synchronized")]
    SyncInProgress(i32),
}

impl SyncError {
    /// Short machine-readable name of the error.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UpstreamUnavailable { .. } => "upstream_unavailable",
            Self::UnrecognizedFormat => "unrecognized_format",
            Self::MalformedResource(_) => "malformed_resource",
            Self::PersistenceConflict(_) => "persistence_conflict",
            Self::ProviderNotFound(_) => "provider_not_found",
            Self::MissingResource(_) => "missing_resource",
            Self::SyncInProgress(_) => "sync_in_progress",
        }
    }
}

/// Converts a database error raised during reconciliation, surfacing unique constraint
/// violations as [`SyncError::PersistenceConflict`].
pub fn persistence_error(err: DbErr) -> ServerError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            SyncError::PersistenceConflict(detail).into()
        }
        _ => ServerError::DbErr(err),
    }
}
