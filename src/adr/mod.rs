//! ADR / frame-counter coordination.
//!
//! Multiple gateways hear the same uplink and report it concurrently;
//! [`AdrCoordinator`] serializes those reports per device through a
//! [`DeviceCacheStore`] lock so that exactly one report per uplink is
//! granted a fresh downlink counter. The store is pluggable;
//! [`InMemoryDeviceStore`] serves single-process deployments and tests.
//!
//! [`DeviceCacheStore`]: crate::core::DeviceCacheStore

mod coordinator;
mod entry;
mod store;

pub use coordinator::*;
pub use entry::*;
pub use store::*;
