//! Regional frequency plans.
//!
//! One immutable [`RegionPlan`] per regulatory region supplies channel
//! arithmetic, data-rate and power tables, and receive-window rules:
//!
//! - [`RegionPlan::cn470_rp1`]: gridded upstream folded onto a separate
//!   downstream grid
//! - [`RegionPlan::eu868`]: listed channels with mirrored downlinks
//!
//! Plans never coerce: an off-channel frequency or unknown index is an
//! error, not a nearest-legal substitute.

mod cn470;
mod eu868;
mod plan;

pub use plan::*;
