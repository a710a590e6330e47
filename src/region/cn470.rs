//! China 470-510 MHz plan, RP1 channel layout.

use crate::core::Hertz;

use super::plan::{ChannelLayout, DataRateSpec, DownlinkMapping, RegionId, RegionPlan, RxWindow};

const DATA_RATES: [DataRateSpec; 6] = [
    DataRateSpec { spreading_factor: 12, bandwidth_khz: 125, max_payload: 59 },
    DataRateSpec { spreading_factor: 11, bandwidth_khz: 125, max_payload: 59 },
    DataRateSpec { spreading_factor: 10, bandwidth_khz: 125, max_payload: 59 },
    DataRateSpec { spreading_factor: 9, bandwidth_khz: 125, max_payload: 123 },
    DataRateSpec { spreading_factor: 8, bandwidth_khz: 125, max_payload: 230 },
    DataRateSpec { spreading_factor: 7, bandwidth_khz: 125, max_payload: 230 },
];

const EIRP_DBM: [f64; 8] = [19.15, 17.15, 15.15, 13.15, 11.15, 9.15, 7.15, 5.15];

/// Downlink DR by upstream DR (row) and RX1 DR offset (column).
const RX1_OFFSETS: [&[u8]; 6] = [
    &[0, 0, 0, 0, 0, 0],
    &[1, 0, 0, 0, 0, 0],
    &[2, 1, 0, 0, 0, 0],
    &[3, 2, 1, 0, 0, 0],
    &[4, 3, 2, 1, 0, 0],
    &[5, 4, 3, 2, 1, 0],
];

impl RegionPlan {
    /// The CN470 RP1 plan: 96 upstream channels at 200 kHz from
    /// 470.3 MHz, folded onto 48 downstream channels from 500.3 MHz.
    pub fn cn470_rp1() -> Self {
        Self {
            id: RegionId::Cn470Rp1,
            band: Hertz::new(470_000_000)..=Hertz::new(510_000_000),
            upstream: ChannelLayout::Grid {
                start: Hertz::new(470_300_000),
                step: Hertz::new(200_000),
                count: 96,
            },
            downlink: DownlinkMapping::Grid {
                start: Hertz::new(500_300_000),
                step: Hertz::new(200_000),
                count: 48,
            },
            data_rates: &DATA_RATES,
            eirp_dbm: &EIRP_DBM,
            rx1_offsets: &RX1_OFFSETS,
            rx2: RxWindow {
                frequency: Hertz::new(505_300_000),
                data_rate: 0,
            },
            max_adr_data_rate: 5,
        }
    }
}
