//! Outcome and report types for provider synchronization.

use std::ops::AddAssign;

use crate::server::{error::Error, resource::format::ResourceFormat};

/// Row counts written by one reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Events created.
    pub events_created: usize,
    /// Existing events updated.
    pub events_updated: usize,
    /// Event dates created.
    pub dates_created: usize,
    /// Existing event dates updated.
    pub dates_updated: usize,
    /// Zones created.
    pub zones_created: usize,
    /// Existing zones updated.
    pub zones_updated: usize,
}

impl ReconcileOutcome {
    /// Total number of rows created.
    pub fn created(&self) -> usize {
        self.events_created + self.dates_created + self.zones_created
    }

    /// Total number of rows updated.
    pub fn updated(&self) -> usize {
        self.events_updated + self.dates_updated + self.zones_updated
    }
}

impl AddAssign for ReconcileOutcome {
    fn add_assign(&mut self, other: Self) {
        self.events_created += other.events_created;
        self.events_updated += other.events_updated;
        self.dates_created += other.dates_created;
        self.dates_updated += other.dates_updated;
        self.zones_created += other.zones_created;
        self.zones_updated += other.zones_updated;
    }
}

/// Result of a successful provider sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Synced provider.
    pub provider_id: i32,
    /// Format detected for the fetched resource.
    pub format: ResourceFormat,
    /// Rows written by the reconciliation.
    pub reconciled: ReconcileOutcome,
}

/// Per-provider entry of a batch sync.
#[derive(Debug)]
pub struct ProviderSyncReport {
    /// Provider this entry reports on.
    pub provider_id: i32,
    /// Provider name at the time of the sync.
    pub provider_name: String,
    /// Outcome, or the error that aborted this provider's sync.
    pub result: Result<SyncOutcome, Error>,
}

/// Result of syncing every provider, in provider creation order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One entry per provider.
    pub reports: Vec<ProviderSyncReport>,
}

impl BatchReport {
    /// Number of providers that synced successfully.
    pub fn succeeded(&self) -> usize {
        self.reports.iter().filter(|r| r.result.is_ok()).count()
    }

    /// Number of providers whose sync failed.
    pub fn failed(&self) -> usize {
        self.reports.len() - self.succeeded()
    }

    /// Report for the given provider, if it was part of the batch.
    pub fn for_provider(&self, provider_id: i32) -> Option<&ProviderSyncReport> {
        self.reports.iter().find(|r| r.provider_id == provider_id)
    }
}
