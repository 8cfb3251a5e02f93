//! Scheduler for periodic provider synchronization.
//!
//! This module provides a cron-based job scheduler that runs a batch sync over every provider
//! at a configured time, once a day by default. Each tick is independent: a failed provider is
//! simply retried by the next tick.

use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::Error, model::sync::BatchReport, service::sync::ProviderSyncOrchestrator,
};

pub mod config;

#[cfg(test)]
mod tests;

/// Job scheduler for background provider synchronization.
pub struct Scheduler {
    orchestrator: ProviderSyncOrchestrator,
    sched: JobScheduler,
}

impl Scheduler {
    /// Creates a new instance of [`Scheduler`].
    ///
    /// # Arguments
    /// - `orchestrator` - Orchestrator used by scheduled jobs to run provider syncs
    ///
    /// # Returns
    /// - `Ok(Scheduler)` - Successfully created scheduler instance
    /// - `Err(Error)` - Failed to initialize the underlying job scheduler
    pub async fn new(orchestrator: ProviderSyncOrchestrator) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;
        Ok(Self {
            orchestrator,
            sched,
        })
    }

    /// Registers the batch provider sync and starts the scheduler.
    ///
    /// # Arguments
    /// - `cron` - Cron expression for the batch sync, see [`config::DEFAULT_SYNC_CRON`]
    ///
    /// # Returns
    /// - `Ok(())` - Job registered and scheduler started
    /// - `Err(Error)` - Invalid cron expression or scheduler failure
    pub async fn start(mut self, cron: &str) -> Result<(), Error> {
        self.schedule_job(cron, "provider sync", sync_all_providers)
            .await?;

        self.sched.start().await?;

        tracing::info!("Scheduled provider sync with cron expression {:?}", cron);

        Ok(())
    }

    /// Schedules a recurring job with the specified cron expression.
    ///
    /// The function receives a clone of the orchestrator on every run. On completion the job
    /// logs how many providers succeeded and failed, or the error that prevented the batch
    /// from running at all.
    ///
    /// # Arguments
    /// - `cron` - Cron expression defining when the job should run
    /// - `name` - Human-readable name for the job (used in log messages)
    /// - `function` - Async function running the job and returning its batch report
    ///
    /// # Returns
    /// - `Ok(())` - Job successfully registered with the scheduler
    /// - `Err(Error)` - Failed to create or add the job (invalid cron expression or scheduler error)
    pub async fn schedule_job<F, Fut>(
        &mut self,
        cron: &str,
        name: &str,
        function: F,
    ) -> Result<(), Error>
    where
        F: Fn(ProviderSyncOrchestrator) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<BatchReport, Error>> + Send + 'static,
    {
        let orchestrator = self.orchestrator.clone();
        let name = name.to_string();
        let function = Arc::new(function);

        self.sched
            .add(Job::new_async(cron, move |_, _| {
                let orchestrator = orchestrator.clone();
                let name = name.clone();
                let function = Arc::clone(&function);

                Box::pin(async move {
                    match function(orchestrator).await {
                        Ok(report) => tracing::info!(
                            "Finished {} job: {} provider(s) succeeded, {} failed",
                            name,
                            report.succeeded(),
                            report.failed()
                        ),
                        Err(e) => tracing::error!("Error running {} job: {:?}", name, e),
                    }
                })
            })?)
            .await?;

        Ok(())
    }
}

async fn sync_all_providers(orchestrator: ProviderSyncOrchestrator) -> Result<BatchReport, Error> {
    orchestrator.sync_all().await
}
