//! Scheduler defaults.

/// Cron expression for the batch provider sync when `SYNC_CRON` is unset
/// Runs once a day at 03:00 UTC (seconds, minutes, hours, day of month, month, day of week)
pub const DEFAULT_SYNC_CRON: &str = "0 0 3 * * *";
