//! Server application models and type definitions.
//!
//! This module contains data models shared across layers: application state for HTTP
//! handlers, API response bodies, the canonical records produced by the resource adapter, and
//! the outcome/report types returned by provider synchronization.

pub mod api;
pub mod app;
pub mod canonical;
pub mod sync;
