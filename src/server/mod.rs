//! Server application core modules.
//!
//! This module contains the eventhub backend: provider resource ingestion (fetch, format
//! detection, adaptation into canonical records, transactional reconciliation), the cron
//! scheduler that triggers daily synchronization, database repositories, and the HTTP API
//! serving the unified event listing.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod resource;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod util;
