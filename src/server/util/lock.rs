//! Per-provider mutual exclusion for synchronization.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

/// Process-wide registry of providers currently being synchronized.
///
/// Cloning shares the underlying registry. A provider is held for as long as the
/// [`ProviderLockGuard`] returned by [`ProviderLocks::try_acquire`] is alive.
#[derive(Clone, Default)]
pub struct ProviderLocks {
    in_flight: Arc<Mutex<HashSet<i32>>>,
}

impl ProviderLocks {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the provider as in flight.
    ///
    /// # Returns
    /// - `Some(ProviderLockGuard)` - The provider was free and is now held until the guard drops
    /// - `None` - Another sync of the same provider is in progress
    pub fn try_acquire(&self, provider_id: i32) -> Option<ProviderLockGuard> {
        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if !in_flight.insert(provider_id) {
            return None;
        }

        Some(ProviderLockGuard {
            provider_id,
            in_flight: Arc::clone(&self.in_flight),
        })
    }
}

/// Releases its provider from the registry when dropped.
pub struct ProviderLockGuard {
    provider_id: i32,
    in_flight: Arc<Mutex<HashSet<i32>>>,
}

impl Drop for ProviderLockGuard {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&self.provider_id);
    }
}
