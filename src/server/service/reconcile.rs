//! Reconciliation of canonical records into the catalog tables.
//!
//! Records are matched against existing rows by natural key at every level: events by
//! (provider, provider_event_id), dates by (event, provider_date_id) and zones by
//! (date, provider_zone_id). Matches are updated in place, everything else is created, so
//! reconciling the same records twice leaves the same rows behind. Rows missing from the
//! records are left alone.

use sea_orm::{ConnectionTrait, TransactionSession, TransactionTrait};

use crate::server::{
    data::{event::EventRepository, event_date::EventDateRepository, zone::ZoneRepository},
    error::{sync::persistence_error, Error},
    model::{
        canonical::{CanonicalDateRecord, CanonicalEventRecord},
        sync::ReconcileOutcome,
    },
};

/// Writes canonical records into the catalog tables by natural key.
pub struct Reconciler<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> Reconciler<'a, C> {
    /// Creates a new instance of [`Reconciler`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Reconciles records on the reconciler's connection without opening a transaction.
    ///
    /// Callers pass a transaction as the connection so that a failure part way through
    /// leaves nothing behind; see [`Reconciler::reconcile`].
    ///
    /// # Returns
    /// - `Ok(ReconcileOutcome)` - Rows created and updated at each level
    /// - `Err(Error::SyncError(PersistenceConflict))` - A natural key constraint was violated
    /// - `Err(Error::DbErr)` - Any other database failure
    pub async fn reconcile_in(
        &self,
        provider_id: i32,
        records: &[CanonicalEventRecord],
    ) -> Result<ReconcileOutcome, Error> {
        let mut outcome = ReconcileOutcome::default();

        for record in records {
            outcome += self.reconcile_event(provider_id, record).await?;
        }

        tracing::debug!(
            provider_id,
            "Reconciled {} event record(s): {} row(s) created, {} row(s) updated",
            records.len(),
            outcome.created(),
            outcome.updated()
        );

        Ok(outcome)
    }

    async fn reconcile_event(
        &self,
        provider_id: i32,
        record: &CanonicalEventRecord,
    ) -> Result<ReconcileOutcome, Error> {
        let event_repo = EventRepository::new(self.db);
        let mut outcome = ReconcileOutcome::default();

        let existing = event_repo
            .find_by_natural_key(provider_id, &record.provider_event_id)
            .await?;

        let event = match existing {
            Some(event) => {
                outcome.events_updated += 1;
                event_repo.update(event, record).await
            }
            None => {
                outcome.events_created += 1;
                event_repo.create(provider_id, record).await
            }
        }
        .map_err(persistence_error)?;

        for date in &record.dates {
            outcome += self.reconcile_date(event.id, date).await?;
        }

        Ok(outcome)
    }

    async fn reconcile_date(
        &self,
        event_id: i32,
        record: &CanonicalDateRecord,
    ) -> Result<ReconcileOutcome, Error> {
        let date_repo = EventDateRepository::new(self.db);
        let zone_repo = ZoneRepository::new(self.db);
        let mut outcome = ReconcileOutcome::default();

        let existing = date_repo
            .find_by_natural_key(event_id, &record.provider_date_id)
            .await?;

        let date = match existing {
            Some(date) => {
                outcome.dates_updated += 1;
                date_repo.update(date, record).await
            }
            None => {
                outcome.dates_created += 1;
                date_repo.create(event_id, record).await
            }
        }
        .map_err(persistence_error)?;

        for zone in &record.zones {
            let existing = zone_repo
                .find_by_natural_key(date.id, &zone.provider_zone_id)
                .await?;

            match existing {
                Some(existing) => {
                    outcome.zones_updated += 1;
                    zone_repo.update(existing, zone).await
                }
                None => {
                    outcome.zones_created += 1;
                    zone_repo.create(date.id, zone).await
                }
            }
            .map_err(persistence_error)?;
        }

        Ok(outcome)
    }
}

impl<'a, C: ConnectionTrait + TransactionTrait> Reconciler<'a, C> {
    /// Reconciles records inside a transaction of its own.
    ///
    /// Either every record is written or, on the first failure, none are.
    pub async fn reconcile(
        &self,
        provider_id: i32,
        records: &[CanonicalEventRecord],
    ) -> Result<ReconcileOutcome, Error> {
        let txn = self.db.begin().await?;

        let outcome = Reconciler::new(&txn)
            .reconcile_in(provider_id, records)
            .await?;

        txn.commit().await?;

        Ok(outcome)
    }
}
