//! Utility functions and helpers for server operations.
//!
//! This module provides reusable helpers shared by the ingestion pipeline and the listing API:
//! timestamp and date-filter parsing for provider payloads and query parameters, and the
//! per-provider lock registry used to keep two syncs of the same provider from racing.

pub mod lock;
pub mod time;
