//! Service layer for business logic and orchestration.
//!
//! Services coordinate repositories and the resource pipeline: reconciling canonical records
//! into the catalog tables, running provider syncs (alone or as a batch), provider
//! administration, and the active event listing.

pub mod event;
pub mod provider;
pub mod reconcile;
pub mod sync;

#[cfg(test)]
mod tests;
