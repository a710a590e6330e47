//! Core traits for the LNS protocol.
//!
//! These traits define the seam between the coordination layer and the
//! shared device cache it operates on.

use std::time::Duration;

use super::error::CoordinationError;
use super::types::Eui64;

/// Shared, network-visible key/value store with per-device scoped locking.
///
/// The ADR / frame-counter coordinator performs all of its reads and
/// writes through this interface, inside an `acquire_lock` scope keyed by
/// the device EUI. Values are opaque byte strings; the coordinator owns
/// their encoding.
///
/// # Requirements
///
/// - `acquire_lock` MUST grant at most one lock per device at a time and
///   MUST fail with [`CoordinationError::LockTimeout`] once `timeout`
///   elapses, leaving the store unchanged.
/// - Dropping the returned [`Self::Lock`] releases the lock. Release MUST
///   happen on every exit path, including early returns and errors.
/// - Locks for distinct devices MUST NOT contend with each other.
///
/// # Example
///
/// ```ignore
/// let guard = store.acquire_lock(&dev_eui, Duration::from_secs(10)).await?;
/// let cached = store.get(&dev_eui).await?;
/// // ... decide on the new entry ...
/// store.set(&dev_eui, encoded).await?;
/// drop(guard);
/// ```
#[allow(async_fn_in_trait)]
pub trait DeviceCacheStore: Send + Sync + 'static {
    /// Scoped lock guard; dropping it releases the per-device lock.
    type Lock: Send;

    /// Acquire the per-device lock, waiting at most `timeout`.
    ///
    /// # Errors
    /// Returns [`CoordinationError::LockTimeout`] if the lock was not
    /// granted within the bound.
    async fn acquire_lock(
        &self,
        dev_eui: &Eui64,
        timeout: Duration,
    ) -> Result<Self::Lock, CoordinationError>;

    /// Read the entry for a device, `None` if absent.
    async fn get(&self, dev_eui: &Eui64) -> Result<Option<Vec<u8>>, CoordinationError>;

    /// Write the entry for a device.
    async fn set(&self, dev_eui: &Eui64, value: Vec<u8>) -> Result<(), CoordinationError>;

    /// Remove the entry for a device, if any.
    async fn delete(&self, dev_eui: &Eui64) -> Result<(), CoordinationError>;
}
