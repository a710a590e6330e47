//! Regional frequency-plan descriptor and its lookup operations.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::core::{Hertz, RegionError};

/// Identifier of a supported regulatory region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionId {
    /// China 470-510 MHz, RP1 channel plan.
    Cn470Rp1,
    /// Europe 863-870 MHz.
    Eu868,
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionId::Cn470Rp1 => write!(f, "CN470RP1"),
            RegionId::Eu868 => write!(f, "EU868"),
        }
    }
}

impl FromStr for RegionId {
    type Err = RegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CN470RP1" | "CN470" => Ok(RegionId::Cn470Rp1),
            "EU868" => Ok(RegionId::Eu868),
            _ => Err(RegionError::UnknownRegion(s.to_string())),
        }
    }
}

/// Physical parameters of one data-rate index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataRateSpec {
    /// LoRa spreading factor (7..=12).
    pub spreading_factor: u8,
    /// Channel bandwidth in kHz.
    pub bandwidth_khz: u32,
    /// Maximum application payload in bytes at this rate.
    pub max_payload: usize,
}

/// A receive-window assignment: where and how fast to transmit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RxWindow {
    /// Downlink center frequency.
    pub frequency: Hertz,
    /// Downlink data-rate index.
    pub data_rate: u8,
}

/// How a region lays out its upstream channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelLayout {
    /// Evenly spaced channel grid.
    Grid {
        /// Center frequency of channel 0.
        start: Hertz,
        /// Spacing between adjacent channels.
        step: Hertz,
        /// Number of channels on the grid.
        count: u32,
    },
    /// Explicit list of channel frequencies.
    List(&'static [Hertz]),
}

/// How an upstream channel index maps to a downstream frequency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownlinkMapping {
    /// Downlink goes out on the uplink frequency.
    Mirror,
    /// Separate downstream grid; the upstream channel index is taken
    /// modulo `count`.
    Grid {
        /// Center frequency of downstream channel 0.
        start: Hertz,
        /// Spacing between adjacent downstream channels.
        step: Hertz,
        /// Number of downstream channels.
        count: u32,
    },
}

/// Immutable frequency-plan descriptor for one region.
///
/// All tables are fixed at construction; every operation is a pure
/// lookup. Build one with [`RegionPlan::cn470_rp1`] or
/// [`RegionPlan::eu868`] and share it by reference.
#[derive(Debug, Clone)]
pub struct RegionPlan {
    pub(super) id: RegionId,
    pub(super) band: RangeInclusive<Hertz>,
    pub(super) upstream: ChannelLayout,
    pub(super) downlink: DownlinkMapping,
    pub(super) data_rates: &'static [DataRateSpec],
    pub(super) eirp_dbm: &'static [f64],
    pub(super) rx1_offsets: &'static [&'static [u8]],
    pub(super) rx2: RxWindow,
    pub(super) max_adr_data_rate: u8,
}

impl RegionPlan {
    /// Region this plan describes.
    pub fn id(&self) -> RegionId {
        self.id
    }

    /// Upstream channel index of `frequency`.
    ///
    /// For grid layouts the index is the rounding division of the offset
    /// from channel 0 by the channel step, half away from zero; the
    /// frequency must sit exactly on a channel center. For list layouts
    /// it is the position in the channel list.
    fn channel_index(&self, frequency: Hertz) -> Result<u32, RegionError> {
        match &self.upstream {
            ChannelLayout::Grid { start, step, count } => {
                if frequency < *start {
                    return Err(RegionError::InvalidFrequency(frequency));
                }
                let offset = frequency.as_u64() - start.as_u64();
                let step_hz = step.as_u64();
                let index = (offset + step_hz / 2) / step_hz;
                if index >= u64::from(*count)
                    || start.as_u64() + index * step_hz != frequency.as_u64()
                {
                    return Err(RegionError::InvalidFrequency(frequency));
                }
                Ok(index as u32)
            }
            ChannelLayout::List(channels) => channels
                .iter()
                .position(|c| *c == frequency)
                .map(|i| i as u32)
                .ok_or(RegionError::InvalidFrequency(frequency)),
        }
    }

    /// Downstream frequency answering an uplink on `upstream`.
    ///
    /// # Errors
    /// Returns [`RegionError::InvalidFrequency`] when the upstream
    /// frequency is outside the band or not exactly on a defined
    /// channel.
    pub fn downstream_frequency(&self, upstream: Hertz) -> Result<Hertz, RegionError> {
        if !self.band.contains(&upstream) {
            return Err(RegionError::InvalidFrequency(upstream));
        }
        let index = self.channel_index(upstream)?;
        Ok(match &self.downlink {
            DownlinkMapping::Mirror => upstream,
            DownlinkMapping::Grid { start, step, count } => {
                Hertz::new(start.as_u64() + u64::from(index % count) * step.as_u64())
            }
        })
    }

    /// RX1 downlink data rate for an uplink at `upstream_dr` with the
    /// device's configured RX1 offset.
    ///
    /// Out-of-range indices clamp to the table edge; the matrix itself
    /// contains only data rates legal in this region.
    pub fn rx1_data_rate(&self, upstream_dr: u8, rx1_dr_offset: u8) -> u8 {
        let row = self.rx1_offsets[(upstream_dr as usize).min(self.rx1_offsets.len() - 1)];
        row[(rx1_dr_offset as usize).min(row.len() - 1)]
    }

    /// Full RX1 window for an uplink: downstream frequency plus the
    /// offset-adjusted data rate.
    ///
    /// # Errors
    /// Returns [`RegionError::InvalidFrequency`] when the uplink
    /// frequency is not a defined channel.
    pub fn rx1_window(
        &self,
        upstream: Hertz,
        upstream_dr: u8,
        rx1_dr_offset: u8,
    ) -> Result<RxWindow, RegionError> {
        Ok(RxWindow {
            frequency: self.downstream_frequency(upstream)?,
            data_rate: self.rx1_data_rate(upstream_dr, rx1_dr_offset),
        })
    }

    /// Fixed RX2 window for this region.
    pub fn rx2_window(&self) -> RxWindow {
        self.rx2
    }

    /// Whether `frequency` lies within the region's legal band.
    pub fn validate_frequency(&self, frequency: Hertz) -> bool {
        self.band.contains(&frequency)
    }

    /// Whether `dr` is a data-rate index defined in this region.
    pub fn validate_data_rate(&self, dr: u8) -> bool {
        (dr as usize) < self.data_rates.len()
    }

    /// Whether the frequency/data-rate pair is usable in this region.
    pub fn validate(&self, frequency: Hertz, dr: u8) -> bool {
        self.validate_frequency(frequency) && self.validate_data_rate(dr)
    }

    /// Physical parameters of `dr`.
    ///
    /// # Errors
    /// Returns [`RegionError::InvalidDataRate`] for an index this region
    /// does not define.
    pub fn data_rate(&self, dr: u8) -> Result<&DataRateSpec, RegionError> {
        self.data_rates
            .get(dr as usize)
            .ok_or(RegionError::InvalidDataRate(dr))
    }

    /// Maximum application payload at `dr`, in bytes.
    ///
    /// # Errors
    /// Returns [`RegionError::InvalidDataRate`] for an index this region
    /// does not define.
    pub fn max_payload_size(&self, dr: u8) -> Result<usize, RegionError> {
        Ok(self.data_rate(dr)?.max_payload)
    }

    /// Maximum EIRP in dBm for a TX-power index.
    ///
    /// # Errors
    /// Returns [`RegionError::InvalidTxPower`] for an index this region
    /// does not define.
    pub fn eirp(&self, tx_power_index: u8) -> Result<f64, RegionError> {
        self.eirp_dbm
            .get(tx_power_index as usize)
            .copied()
            .ok_or(RegionError::InvalidTxPower(tx_power_index))
    }

    /// Highest data rate ADR is allowed to assign in this region.
    pub fn max_adr_data_rate(&self) -> u8 {
        self.max_adr_data_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_id_parse_and_display() {
        assert_eq!("CN470RP1".parse::<RegionId>().unwrap(), RegionId::Cn470Rp1);
        assert_eq!("cn470".parse::<RegionId>().unwrap(), RegionId::Cn470Rp1);
        assert_eq!("eu868".parse::<RegionId>().unwrap(), RegionId::Eu868);
        assert_eq!(RegionId::Eu868.to_string(), "EU868");
        assert_eq!(
            "US915".parse::<RegionId>(),
            Err(RegionError::UnknownRegion("US915".to_string()))
        );
    }

    #[test]
    fn test_rx1_matrix_clamps_out_of_range_indices() {
        let plan = RegionPlan::cn470_rp1();
        // Same cell as the last defined row/column.
        assert_eq!(plan.rx1_data_rate(200, 0), plan.rx1_data_rate(5, 0));
        assert_eq!(plan.rx1_data_rate(5, 200), plan.rx1_data_rate(5, 5));
    }

    #[test]
    fn test_validate_checks_both_axes() {
        let plan = RegionPlan::cn470_rp1();
        assert!(plan.validate(Hertz::mega(470.3), 5));
        assert!(!plan.validate(Hertz::mega(470.3), 6));
        assert!(!plan.validate(Hertz::mega(523.3), 5));
    }

    #[test]
    fn test_unknown_indices_are_errors() {
        let plan = RegionPlan::cn470_rp1();
        assert_eq!(plan.data_rate(6), Err(RegionError::InvalidDataRate(6)));
        assert_eq!(
            plan.max_payload_size(99),
            Err(RegionError::InvalidDataRate(99))
        );
        assert_eq!(plan.eirp(8), Err(RegionError::InvalidTxPower(8)));
    }
}
