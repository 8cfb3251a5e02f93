//! SeaORM entities for the event catalog store.
//!
//! Ownership between tables comes in two tiers. Strict ownership cascades deletes:
//! `provider` owns its `provider_resource`, `event` owns its `event_date` rows and an
//! `event_date` owns its `zone` rows. Weak ownership nullifies: deleting a `provider`
//! leaves its events in place with `provider_id` set to `NULL`.

pub mod prelude;

pub mod event;
pub mod event_date;
pub mod provider;
pub mod provider_resource;
pub mod zone;
