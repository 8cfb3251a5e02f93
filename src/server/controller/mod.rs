//! HTTP controller endpoints for the eventhub web API.
//!
//! Controllers are thin Axum handlers: they extract query parameters and state, call the
//! service layer, and return JSON responses documented for OpenAPI through utoipa.

pub mod event;
