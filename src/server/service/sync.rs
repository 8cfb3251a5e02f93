//! Provider synchronization.
//!
//! [`ProviderSyncOrchestrator`] runs the resource pipeline for a provider: fetch the resource,
//! detect its format and parse it, adapt it into canonical records, then reconcile the records
//! and record the fetch inside a single transaction. A failure at any stage aborts that
//! provider's sync only and leaves previously committed data untouched.

use futures::{stream, StreamExt};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{provider::ProviderRepository, provider_resource::ProviderResourceRepository},
    error::{sync::SyncError, Error},
    model::sync::{BatchReport, ProviderSyncReport, SyncOutcome},
    resource::{adapt::adapt, fetch::ResourceFetcher, format},
    service::{provider::ProviderService, reconcile::Reconciler},
    util::lock::ProviderLocks,
};

/// Runs provider syncs, individually or as a batch over every provider.
///
/// Cloning is cheap and clones share the same per-provider lock registry, so a provider is
/// never synchronized twice at the same time through any clone.
#[derive(Clone)]
pub struct ProviderSyncOrchestrator {
    db: DatabaseConnection,
    http_client: reqwest::Client,
    locks: ProviderLocks,
    max_concurrent_syncs: usize,
}

impl ProviderSyncOrchestrator {
    /// Creates a new instance of [`ProviderSyncOrchestrator`].
    ///
    /// # Arguments
    /// - `db` - Database connection used for lookups and the reconcile transaction
    /// - `http_client` - Client used to fetch provider resources, carrying timeout and user agent
    /// - `max_concurrent_syncs` - Upper bound on providers synchronized at once by
    ///   [`Self::sync_all`]; values below 1 are treated as 1
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        max_concurrent_syncs: usize,
    ) -> Self {
        Self {
            db,
            http_client,
            locks: ProviderLocks::new(),
            max_concurrent_syncs: max_concurrent_syncs.max(1),
        }
    }

    /// Synchronizes a single provider.
    ///
    /// # Returns
    /// - `Ok(SyncOutcome)` - Resource fetched, reconciled and committed
    /// - `Err(SyncError::SyncInProgress)` - Another sync of this provider is running
    /// - `Err(SyncError::ProviderNotFound)` - No provider with this ID
    /// - `Err(SyncError::MissingResource)` - The provider has no resource configured
    /// - `Err(SyncError::UpstreamUnavailable)` - Fetch failed or returned a non-2xx status
    /// - `Err(SyncError::UnrecognizedFormat)` - Resource is neither JSON nor XML
    /// - `Err(SyncError::MalformedResource)` - Resource is missing required fields
    /// - `Err(Error::DbErr)` / `Err(SyncError::PersistenceConflict)` - Reconciliation failed
    ///   and was rolled back
    pub async fn sync_provider(&self, provider_id: i32) -> Result<SyncOutcome, Error> {
        let Some(_guard) = self.locks.try_acquire(provider_id) else {
            tracing::warn!(provider_id, "Provider sync already in progress");
            return Err(SyncError::SyncInProgress(provider_id).into());
        };

        let provider = ProviderRepository::new(&self.db)
            .get_by_id(provider_id)
            .await?
            .ok_or(SyncError::ProviderNotFound(provider_id))?;

        let result = self.run_pipeline(&provider).await;
        if let Err(e) = &result {
            log_failure(&provider, e);
        }

        result
    }

    /// Synchronizes every provider, oldest first, with bounded concurrency.
    ///
    /// A provider's failure is logged and reported in its entry of the [`BatchReport`]; it
    /// never stops the remaining providers.
    ///
    /// # Returns
    /// - `Ok(BatchReport)` - One report per provider, in provider creation order
    /// - `Err(Error::DbErr)` - The providers could not be listed
    pub async fn sync_all(&self) -> Result<BatchReport, Error> {
        let providers = ProviderService::new(&self.db).get_all_providers().await?;

        tracing::info!("Starting sync of {} provider(s)", providers.len());

        let reports = stream::iter(providers)
            .map(|provider| async move {
                let result = match self.locks.try_acquire(provider.id) {
                    Some(_guard) => self.run_pipeline(&provider).await,
                    None => Err(SyncError::SyncInProgress(provider.id).into()),
                };

                if let Err(e) = &result {
                    log_failure(&provider, e);
                }

                ProviderSyncReport {
                    provider_id: provider.id,
                    provider_name: provider.name,
                    result,
                }
            })
            .buffered(self.max_concurrent_syncs)
            .collect::<Vec<_>>()
            .await;

        let report = BatchReport { reports };

        tracing::info!(
            "Finished sync of {} provider(s): {} succeeded, {} failed",
            report.reports.len(),
            report.succeeded(),
            report.failed()
        );

        Ok(report)
    }

    async fn run_pipeline(&self, provider: &entity::provider::Model) -> Result<SyncOutcome, Error> {
        let resource = ProviderResourceRepository::new(&self.db)
            .get_by_provider_id(provider.id)
            .await?
            .ok_or(SyncError::MissingResource(provider.id))?;

        tracing::debug!(
            provider_id = provider.id,
            provider = %provider.name,
            "Fetching provider resource from {}",
            resource.url
        );
        let bytes = ResourceFetcher::new(&self.http_client)
            .fetch(&resource.url)
            .await?;

        let (tree, format) = format::parse(&bytes)?;
        tracing::debug!(
            provider_id = provider.id,
            provider = %provider.name,
            "Detected {} provider resource",
            format
        );

        let records = adapt(&tree)?;
        tracing::debug!(
            provider_id = provider.id,
            provider = %provider.name,
            "Adapted {} event record(s)",
            records.len()
        );

        let txn = self.db.begin().await?;
        let reconciled = Reconciler::new(&txn)
            .reconcile_in(provider.id, &records)
            .await?;
        ProviderResourceRepository::new(&txn)
            .record_fetch(resource, format)
            .await?;
        txn.commit().await?;

        tracing::info!(
            provider_id = provider.id,
            provider = %provider.name,
            "Synced provider: {} event(s), {} date(s), {} zone(s) created; {} event(s), {} date(s), {} zone(s) updated",
            reconciled.events_created,
            reconciled.dates_created,
            reconciled.zones_created,
            reconciled.events_updated,
            reconciled.dates_updated,
            reconciled.zones_updated
        );

        Ok(SyncOutcome {
            provider_id: provider.id,
            format,
            reconciled,
        })
    }
}

fn log_failure(provider: &entity::provider::Model, e: &Error) {
    tracing::error!(
        provider_id = provider.id,
        provider = %provider.name,
        kind = e.kind(),
        "Provider sync failed: {}",
        e
    );
}
