//! Provider resource pipeline.
//!
//! The stages run in order and each one returns its output to the caller:
//! - [`fetch`] retrieves the raw resource bytes over HTTP
//! - [`format`] detects JSON or XML and parses the bytes into a generic tree
//! - [`adapt`] maps the tree into canonical event records
//!
//! Persisting the records is the reconciler's job, see
//! [`crate::server::service::reconcile`].

pub mod adapt;
pub mod fetch;
pub mod format;
