//! Europe 863-870 MHz plan.

use crate::core::Hertz;

use super::plan::{ChannelLayout, DataRateSpec, DownlinkMapping, RegionId, RegionPlan, RxWindow};

/// The three mandatory join channels.
const CHANNELS: [Hertz; 3] = [
    Hertz::new(868_100_000),
    Hertz::new(868_300_000),
    Hertz::new(868_500_000),
];

const DATA_RATES: [DataRateSpec; 7] = [
    DataRateSpec { spreading_factor: 12, bandwidth_khz: 125, max_payload: 59 },
    DataRateSpec { spreading_factor: 11, bandwidth_khz: 125, max_payload: 59 },
    DataRateSpec { spreading_factor: 10, bandwidth_khz: 125, max_payload: 59 },
    DataRateSpec { spreading_factor: 9, bandwidth_khz: 125, max_payload: 123 },
    DataRateSpec { spreading_factor: 8, bandwidth_khz: 125, max_payload: 230 },
    DataRateSpec { spreading_factor: 7, bandwidth_khz: 125, max_payload: 230 },
    DataRateSpec { spreading_factor: 7, bandwidth_khz: 250, max_payload: 230 },
];

const EIRP_DBM: [f64; 8] = [16.0, 14.0, 12.0, 10.0, 8.0, 6.0, 4.0, 2.0];

/// Downlink DR by upstream DR (row) and RX1 DR offset (column).
const RX1_OFFSETS: [&[u8]; 7] = [
    &[0, 0, 0, 0, 0, 0],
    &[1, 0, 0, 0, 0, 0],
    &[2, 1, 0, 0, 0, 0],
    &[3, 2, 1, 0, 0, 0],
    &[4, 3, 2, 1, 0, 0],
    &[5, 4, 3, 2, 1, 0],
    &[6, 5, 4, 3, 2, 1],
];

impl RegionPlan {
    /// The EU868 plan: downlinks mirror the uplink channel, RX2 on the
    /// high-duty-cycle 869.525 MHz sub-band.
    pub fn eu868() -> Self {
        Self {
            id: RegionId::Eu868,
            band: Hertz::new(863_000_000)..=Hertz::new(870_000_000),
            upstream: ChannelLayout::List(&CHANNELS),
            downlink: DownlinkMapping::Mirror,
            data_rates: &DATA_RATES,
            eirp_dbm: &EIRP_DBM,
            rx1_offsets: &RX1_OFFSETS,
            rx2: RxWindow {
                frequency: Hertz::new(869_525_000),
                data_rate: 0,
            },
            max_adr_data_rate: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RegionError;

    #[test]
    fn test_downlink_mirrors_uplink_channel() {
        let plan = RegionPlan::eu868();
        for mhz in [868.1, 868.3, 868.5] {
            assert_eq!(
                plan.downstream_frequency(Hertz::mega(mhz)).unwrap(),
                Hertz::mega(mhz)
            );
        }
    }

    #[test]
    fn test_unlisted_frequency_rejected() {
        let plan = RegionPlan::eu868();
        // In band but not a defined channel.
        assert_eq!(
            plan.downstream_frequency(Hertz::mega(867.1)),
            Err(RegionError::InvalidFrequency(Hertz::mega(867.1)))
        );
        // Outside the band entirely.
        assert!(plan.downstream_frequency(Hertz::mega(470.3)).is_err());
    }

    #[test]
    fn test_rx1_offset_matrix_covers_dr6() {
        let plan = RegionPlan::eu868();
        assert_eq!(plan.rx1_data_rate(6, 0), 6);
        assert_eq!(plan.rx1_data_rate(6, 5), 1);
        assert_eq!(plan.rx1_data_rate(5, 2), 3);
        assert_eq!(plan.rx1_data_rate(0, 5), 0);
    }

    #[test]
    fn test_rx2_window_fixed() {
        let plan = RegionPlan::eu868();
        let rx2 = plan.rx2_window();
        assert_eq!(rx2.frequency, Hertz::mega(869.525));
        assert_eq!(rx2.data_rate, 0);
    }

    #[test]
    fn test_dr6_is_wideband() {
        let plan = RegionPlan::eu868();
        let dr6 = plan.data_rate(6).unwrap();
        assert_eq!((dr6.spreading_factor, dr6.bandwidth_khz), (7, 250));
        assert!(plan.validate_data_rate(6));
        assert!(!plan.validate_data_rate(7));
        // ADR still tops out below the wideband rate.
        assert_eq!(plan.max_adr_data_rate(), 5);
    }

    #[test]
    fn test_eirp_table() {
        let plan = RegionPlan::eu868();
        assert_eq!(plan.eirp(0).unwrap(), 16.0);
        assert_eq!(plan.eirp(7).unwrap(), 2.0);
    }
}
