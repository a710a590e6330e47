//! In-memory device cache store.
//!
//! Single-process stand-in for the shared cache (Redis or similar) that
//! production deployments put behind [`DeviceCacheStore`]. Used by the
//! coordinator tests and useful for single-instance servers.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::core::{CoordinationError, DeviceCacheStore, Eui64};

type LockRegistry = HashMap<Eui64, Arc<Mutex<()>>>;

/// Process-local [`DeviceCacheStore`] backed by hash maps.
///
/// Clones share the same underlying maps, so every server component
/// holding a clone sees one store, the way separate connections to an
/// external cache would.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDeviceStore {
    locks: Arc<RwLock<LockRegistry>>,
    entries: Arc<RwLock<HashMap<Eui64, Vec<u8>>>>,
}

impl InMemoryDeviceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DeviceCacheStore for InMemoryDeviceStore {
    type Lock = OwnedMutexGuard<()>;

    async fn acquire_lock(
        &self,
        dev_eui: &Eui64,
        timeout: Duration,
    ) -> Result<Self::Lock, CoordinationError> {
        let device_lock = {
            let mut locks = self.locks.write().await;
            Arc::clone(locks.entry(*dev_eui).or_default())
        };
        tokio::time::timeout(timeout, device_lock.lock_owned())
            .await
            .map_err(|_| CoordinationError::LockTimeout {
                dev_eui: *dev_eui,
                waited: timeout,
            })
    }

    async fn get(&self, dev_eui: &Eui64) -> Result<Option<Vec<u8>>, CoordinationError> {
        Ok(self.entries.read().await.get(dev_eui).cloned())
    }

    async fn set(&self, dev_eui: &Eui64, value: Vec<u8>) -> Result<(), CoordinationError> {
        self.entries.write().await.insert(*dev_eui, value);
        Ok(())
    }

    async fn delete(&self, dev_eui: &Eui64) -> Result<(), CoordinationError> {
        self.entries.write().await.remove(dev_eui);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dev(n: u64) -> Eui64 {
        Eui64::from_u64(n)
    }

    #[tokio::test]
    async fn test_entry_roundtrip() {
        let store = InMemoryDeviceStore::new();
        assert_eq!(store.get(&dev(1)).await.unwrap(), None);

        store.set(&dev(1), vec![1, 2, 3]).await.unwrap();
        assert_eq!(store.get(&dev(1)).await.unwrap(), Some(vec![1, 2, 3]));

        store.delete(&dev(1)).await.unwrap();
        assert_eq!(store.get(&dev(1)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemoryDeviceStore::new();
        let other = store.clone();
        store.set(&dev(2), vec![7]).await.unwrap();
        assert_eq!(other.get(&dev(2)).await.unwrap(), Some(vec![7]));
    }

    #[tokio::test]
    async fn test_contended_lock_times_out() {
        let store = InMemoryDeviceStore::new();
        let _held = store
            .acquire_lock(&dev(3), Duration::from_secs(1))
            .await
            .unwrap();

        let err = store
            .acquire_lock(&dev(3), Duration::from_millis(20))
            .await
            .unwrap_err();
        match err {
            CoordinationError::LockTimeout { dev_eui, waited } => {
                assert_eq!(dev_eui, dev(3));
                assert_eq!(waited, Duration::from_millis(20));
            }
            other => panic!("expected LockTimeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_locks_are_independent_across_devices() {
        let store = InMemoryDeviceStore::new();
        let _held = store
            .acquire_lock(&dev(4), Duration::from_secs(1))
            .await
            .unwrap();

        // A different device's lock is still free.
        store
            .acquire_lock(&dev(5), Duration::from_millis(20))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_dropping_guard_releases_lock() {
        let store = InMemoryDeviceStore::new();
        let guard = store
            .acquire_lock(&dev(6), Duration::from_millis(20))
            .await
            .unwrap();
        drop(guard);

        store
            .acquire_lock(&dev(6), Duration::from_millis(20))
            .await
            .unwrap();
    }
}
