//! Duplicate-safe downlink frame-counter allocation.

use std::time::Duration;

use crate::core::{
    CoordinationError, DeviceCacheStore, Eui64, DEFAULT_LOCK_TIMEOUT, FCNT_DOWN_SUPPRESSED,
    MAX_FCNT_GAP,
};

use super::entry::AdrCacheEntry;

/// Coordinator tuning knobs.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Bound on the per-device lock wait. A timeout skips only the
    /// downlink counter update for that cycle, never the uplink itself.
    pub lock_timeout: Duration,

    /// Largest backward jump of the uplink counter still treated as a
    /// stale report. A larger jump means the device rejoined or rebooted
    /// and its counters restarted.
    pub max_fcnt_gap: u32,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
            max_fcnt_gap: MAX_FCNT_GAP,
        }
    }
}

/// Allocates downlink frame counters across gateways.
///
/// Several gateways can hear the same uplink and report it concurrently;
/// every report races to this coordinator through the shared store's
/// per-device lock. Exactly one report per uplink wins a fresh downlink
/// counter, the rest are told to stand down.
#[derive(Debug, Clone)]
pub struct AdrCoordinator<S> {
    store: S,
    config: CoordinatorConfig,
}

impl<S: DeviceCacheStore> AdrCoordinator<S> {
    /// Create a coordinator with default tuning.
    pub fn new(store: S) -> Self {
        Self::with_config(store, CoordinatorConfig::default())
    }

    /// Create a coordinator with explicit tuning.
    pub fn with_config(store: S, config: CoordinatorConfig) -> Self {
        Self { store, config }
    }

    /// Active configuration.
    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Allocate the downlink counter answering one gateway's uplink
    /// report.
    ///
    /// Returns the counter to use for the downlink, or
    /// [`FCNT_DOWN_SUPPRESSED`] (`0`) when another gateway's report of
    /// the same uplink already won; counters handed out on the winning
    /// path are always `>= 1`. The cache is only mutated on the winning
    /// and reset paths.
    ///
    /// # Errors
    /// [`CoordinationError::LockTimeout`] when the per-device lock is
    /// not granted within the configured bound; the caller should still
    /// process the uplink payload and only skip this cycle's downlink
    /// counter update.
    ///
    /// # Example
    /// ```
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() -> Result<(), lns_protocol::core::CoordinationError> {
    /// use lns_protocol::adr::{AdrCoordinator, InMemoryDeviceStore};
    /// use lns_protocol::core::Eui64;
    ///
    /// let coordinator = AdrCoordinator::new(InMemoryDeviceStore::new());
    /// let dev_eui = Eui64::from_u64(0x70B3_D549_9000_0001);
    ///
    /// let fcnt_down = coordinator
    ///     .next_downlink_counter(&dev_eui, "gateway-a", 1, 0)
    ///     .await?;
    /// assert_eq!(fcnt_down, 1);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn next_downlink_counter(
        &self,
        dev_eui: &Eui64,
        gateway_id: &str,
        client_fcnt_up: u32,
        client_fcnt_down: u32,
    ) -> Result<u32, CoordinationError> {
        // Held until return; drop releases it on every path.
        let _guard = self
            .store
            .acquire_lock(dev_eui, self.config.lock_timeout)
            .await?;

        let cached = match self.store.get(dev_eui).await? {
            Some(bytes) => AdrCacheEntry::decode(&bytes)?,
            None => AdrCacheEntry::new(0, client_fcnt_down, ""),
        };

        // Counter restart: the device rejoined or rebooted, so the cached
        // uplink counter is far ahead of what it now sends. Checked before
        // staleness or every post-restart uplink would look stale.
        if cached.fcnt_up > client_fcnt_up
            && cached.fcnt_up - client_fcnt_up > self.config.max_fcnt_gap
        {
            let entry = AdrCacheEntry::new(
                client_fcnt_up,
                client_fcnt_down.wrapping_add(1),
                gateway_id,
            );
            self.store.set(dev_eui, entry.encode()?).await?;
            tracing::info!(
                %dev_eui,
                gateway_id,
                cached_fcnt_up = cached.fcnt_up,
                client_fcnt_up,
                "uplink counter restarted, device entry reinitialized"
            );
            return Ok(entry.fcnt_down);
        }

        // Duplicate or out-of-order report. Another gateway already
        // advanced the entry for this uplink.
        if client_fcnt_up <= cached.fcnt_up {
            tracing::debug!(
                %dev_eui,
                gateway_id,
                client_fcnt_up,
                cached_fcnt_up = cached.fcnt_up,
                "stale uplink report, downlink counter suppressed"
            );
            return Ok(FCNT_DOWN_SUPPRESSED);
        }

        let entry = AdrCacheEntry::new(
            client_fcnt_up,
            cached.fcnt_down.wrapping_add(1),
            gateway_id,
        );
        self.store.set(dev_eui, entry.encode()?).await?;
        tracing::debug!(
            %dev_eui,
            gateway_id,
            fcnt_up = entry.fcnt_up,
            fcnt_down = entry.fcnt_down,
            "downlink counter advanced"
        );
        Ok(entry.fcnt_down)
    }

    /// Reset a device's counters, as at join renegotiation.
    ///
    /// The entry becomes `{ fcnt_up: 0, fcnt_down: fcnt_down_init }`
    /// with no winning gateway.
    ///
    /// # Errors
    /// [`CoordinationError::LockTimeout`] when the per-device lock is
    /// not granted within the configured bound.
    pub async fn reset(
        &self,
        dev_eui: &Eui64,
        fcnt_down_init: u32,
    ) -> Result<(), CoordinationError> {
        let _guard = self
            .store
            .acquire_lock(dev_eui, self.config.lock_timeout)
            .await?;

        let entry = AdrCacheEntry::new(0, fcnt_down_init, "");
        self.store.set(dev_eui, entry.encode()?).await?;
        tracing::info!(%dev_eui, fcnt_down_init, "device counters reset");
        Ok(())
    }

    /// Read the cached entry without taking the device lock.
    ///
    /// # Errors
    /// Propagates store read and entry decode failures.
    pub async fn cached_entry(
        &self,
        dev_eui: &Eui64,
    ) -> Result<Option<AdrCacheEntry>, CoordinationError> {
        match self.store.get(dev_eui).await? {
            Some(bytes) => Ok(Some(AdrCacheEntry::decode(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adr::InMemoryDeviceStore;

    fn dev() -> Eui64 {
        Eui64::from_u64(0x70B3_D549_9000_0042)
    }

    async fn seeded(
        fcnt_up: u32,
        fcnt_down: u32,
    ) -> (AdrCoordinator<InMemoryDeviceStore>, InMemoryDeviceStore) {
        let store = InMemoryDeviceStore::new();
        let entry = AdrCacheEntry::new(fcnt_up, fcnt_down, "seed");
        store.set(&dev(), entry.encode().unwrap()).await.unwrap();
        (AdrCoordinator::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_first_report_initializes_entry() {
        let coordinator = AdrCoordinator::new(InMemoryDeviceStore::new());

        let fcnt = coordinator
            .next_downlink_counter(&dev(), "gateway-a", 1, 0)
            .await
            .unwrap();
        assert_eq!(fcnt, 1);

        let entry = coordinator.cached_entry(&dev()).await.unwrap().unwrap();
        assert_eq!((entry.fcnt_up, entry.fcnt_down), (1, 1));
        assert_eq!(entry.gateway_id, "gateway-a");
    }

    #[tokio::test]
    async fn test_newer_uplink_advances_counter() {
        let (coordinator, _) = seeded(10, 100).await;

        let fcnt = coordinator
            .next_downlink_counter(&dev(), "gateway-a", 11, 100)
            .await
            .unwrap();
        assert_eq!(fcnt, 101);

        let entry = coordinator.cached_entry(&dev()).await.unwrap().unwrap();
        assert_eq!((entry.fcnt_up, entry.fcnt_down), (11, 101));
    }

    #[tokio::test]
    async fn test_stale_uplink_suppressed_without_mutation() {
        let (coordinator, _) = seeded(10, 100).await;

        for stale in [9, 10] {
            let fcnt = coordinator
                .next_downlink_counter(&dev(), "gateway-b", stale, 100)
                .await
                .unwrap();
            assert_eq!(fcnt, FCNT_DOWN_SUPPRESSED);
        }

        let entry = coordinator.cached_entry(&dev()).await.unwrap().unwrap();
        assert_eq!((entry.fcnt_up, entry.fcnt_down), (10, 100));
        assert_eq!(entry.gateway_id, "seed");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_duplicates_elect_one_winner() {
        let (coordinator, _) = seeded(10, 100).await;
        let coordinator = Arc::new(coordinator);

        let mut reports = Vec::new();
        for gateway in ["gateway-a", "gateway-b"] {
            let coordinator = Arc::clone(&coordinator);
            reports.push(tokio::spawn(async move {
                coordinator
                    .next_downlink_counter(&dev(), gateway, 11, 100)
                    .await
            }));
        }

        let mut results = Vec::new();
        for report in reports {
            results.push(report.await.unwrap().unwrap());
        }
        results.sort_unstable();
        assert_eq!(results, [FCNT_DOWN_SUPPRESSED, 101]);

        let entry = coordinator.cached_entry(&dev()).await.unwrap().unwrap();
        assert_eq!((entry.fcnt_up, entry.fcnt_down), (11, 101));
    }

    #[tokio::test]
    async fn test_lock_timeout_leaves_cache_untouched() {
        let (_, store) = seeded(10, 100).await;
        let config = CoordinatorConfig {
            lock_timeout: Duration::from_millis(20),
            ..CoordinatorConfig::default()
        };
        let coordinator = AdrCoordinator::with_config(store.clone(), config);

        let _held = store
            .acquire_lock(&dev(), Duration::from_secs(1))
            .await
            .unwrap();

        let err = coordinator
            .next_downlink_counter(&dev(), "gateway-a", 11, 100)
            .await
            .unwrap_err();
        assert!(matches!(err, CoordinationError::LockTimeout { .. }));

        let entry = coordinator.cached_entry(&dev()).await.unwrap().unwrap();
        assert_eq!((entry.fcnt_up, entry.fcnt_down), (10, 100));
    }

    #[tokio::test]
    async fn test_counter_restart_reinitializes() {
        let (coordinator, _) = seeded(40_000, 500).await;

        // Far below the cached counter: the device started over.
        let fcnt = coordinator
            .next_downlink_counter(&dev(), "gateway-a", 3, 0)
            .await
            .unwrap();
        assert_eq!(fcnt, 1);

        let entry = coordinator.cached_entry(&dev()).await.unwrap().unwrap();
        assert_eq!((entry.fcnt_up, entry.fcnt_down), (3, 1));
        assert_eq!(entry.gateway_id, "gateway-a");
    }

    #[tokio::test]
    async fn test_backward_jump_within_gap_is_stale() {
        let (coordinator, _) = seeded(20_000, 500).await;

        let fcnt = coordinator
            .next_downlink_counter(&dev(), "gateway-a", 10_000, 499)
            .await
            .unwrap();
        assert_eq!(fcnt, FCNT_DOWN_SUPPRESSED);

        let entry = coordinator.cached_entry(&dev()).await.unwrap().unwrap();
        assert_eq!((entry.fcnt_up, entry.fcnt_down), (20_000, 500));
    }

    #[tokio::test]
    async fn test_reset_returns_device_to_join_state() {
        let (coordinator, _) = seeded(10, 100).await;

        coordinator.reset(&dev(), 0).await.unwrap();
        let entry = coordinator.cached_entry(&dev()).await.unwrap().unwrap();
        assert_eq!((entry.fcnt_up, entry.fcnt_down), (0, 0));
        assert_eq!(entry.gateway_id, "");

        let fcnt = coordinator
            .next_downlink_counter(&dev(), "gateway-a", 1, 0)
            .await
            .unwrap();
        assert_eq!(fcnt, 1);
    }
}
