//! Data access layer repositories.
//!
//! This module contains the database repositories for providers, their resource configuration,
//! and the catalog hierarchy (events, event dates, zones). Every repository is generic over
//! `C: ConnectionTrait`, so the same code runs against the connection pool or inside a
//! transaction opened by a service.
//!
//! Ownership tiers are explicit in the delete operations and mirrored by the foreign keys:
//! events own their dates and dates own their zones (deleted together), a provider owns its
//! resource configuration (deleted together), while a provider only weakly references its
//! events (the reference is cleared, the events stay).

pub mod event;
pub mod event_date;
pub mod provider;
pub mod provider_resource;
pub mod zone;

#[cfg(test)]
mod tests;
