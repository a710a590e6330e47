//! Primitive wire types shared across the protocol layers.
//!
//! All multi-byte fields are little-endian on the wire; the newtypes here
//! store wire order and expose host-order accessors.

use super::constants::{
    DEV_ADDR_SIZE, DEV_NONCE_SIZE, EUI64_SIZE, FPORT_MAC_COMMAND, FPORT_MAC_LAYER_TEST,
    MIC_SIZE,
};

/// Device network address - the short session address assigned at join.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DevAddr([u8; DEV_ADDR_SIZE]);

impl DevAddr {
    /// Create from wire-order (little-endian) bytes.
    pub const fn from_bytes(bytes: [u8; DEV_ADDR_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from the 32-bit address value.
    pub const fn from_u32(value: u32) -> Self {
        Self(value.to_le_bytes())
    }

    /// Get the wire-order bytes.
    pub const fn as_bytes(&self) -> &[u8; DEV_ADDR_SIZE] {
        &self.0
    }

    /// Get the 32-bit address value.
    pub const fn to_u32(&self) -> u32 {
        u32::from_le_bytes(self.0)
    }
}

impl std::fmt::Display for DevAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:08X}", self.to_u32())
    }
}

impl From<u32> for DevAddr {
    fn from(value: u32) -> Self {
        Self::from_u32(value)
    }
}

/// EUI-64 identifier (DevEUI, JoinEUI).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Eui64([u8; EUI64_SIZE]);

impl Eui64 {
    /// Create from wire-order (little-endian) bytes.
    pub const fn from_bytes(bytes: [u8; EUI64_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from the 64-bit identifier value.
    pub const fn from_u64(value: u64) -> Self {
        Self(value.to_le_bytes())
    }

    /// Get the wire-order bytes.
    pub const fn as_bytes(&self) -> &[u8; EUI64_SIZE] {
        &self.0
    }

    /// Get the 64-bit identifier value.
    pub const fn to_u64(&self) -> u64 {
        u64::from_le_bytes(self.0)
    }
}

impl std::fmt::Display for Eui64 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016X}", self.to_u64())
    }
}

impl From<u64> for Eui64 {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

/// Device nonce carried in a join-request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DevNonce(u16);

impl DevNonce {
    /// Create from the nonce value.
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Create from wire-order (little-endian) bytes.
    pub const fn from_bytes(bytes: [u8; DEV_NONCE_SIZE]) -> Self {
        Self(u16::from_le_bytes(bytes))
    }

    /// Get the wire-order bytes.
    pub const fn to_bytes(&self) -> [u8; DEV_NONCE_SIZE] {
        self.0.to_le_bytes()
    }

    /// Get the nonce value.
    pub const fn value(&self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for DevNonce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

/// Frame port qualifying the FRMPayload of a data frame.
///
/// Port 0 carries MAC commands, 224 is reserved for MAC-layer test
/// protocols, 1..=223 are application ports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FramePort(u8);

impl FramePort {
    /// Create from the port number.
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Get the port number.
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Whether the FRMPayload carries MAC commands.
    pub const fn is_mac_command(&self) -> bool {
        self.0 == FPORT_MAC_COMMAND
    }

    /// Whether the port is the MAC-layer test port.
    pub const fn is_mac_layer_test(&self) -> bool {
        self.0 == FPORT_MAC_LAYER_TEST
    }

    /// Whether the port addresses an application.
    pub const fn is_application(&self) -> bool {
        !self.is_mac_command() && !self.is_mac_layer_test()
    }
}

impl std::fmt::Display for FramePort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message integrity code - the 4-byte authentication tag of a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mic([u8; MIC_SIZE]);

impl Mic {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; MIC_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; MIC_SIZE] {
        &self.0
    }
}

impl std::fmt::Display for Mic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:08X}", u32::from_be_bytes(self.0))
    }
}

/// Radio frequency in Hertz.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hertz(u64);

impl Hertz {
    /// Create from a value in Hertz.
    pub const fn new(hz: u64) -> Self {
        Self(hz)
    }

    /// Create from a value in megahertz.
    pub fn mega(mhz: f64) -> Self {
        Self((mhz * 1_000_000.0).round() as u64)
    }

    /// Get the value in Hertz.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Get the value in megahertz.
    pub fn in_mega(&self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }
}

impl std::fmt::Display for Hertz {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3} MHz", self.in_mega())
    }
}

/// Direction of a data frame, as authenticated by the MIC and the
/// payload cipher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Device to network.
    Uplink,
    /// Network to device.
    Downlink,
}

impl Direction {
    /// Direction byte as used in the B0 and Ai crypto blocks.
    pub const fn as_byte(&self) -> u8 {
        match self {
            Direction::Uplink => super::constants::DIR_UPLINK,
            Direction::Downlink => super::constants::DIR_DOWNLINK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_addr_roundtrip() {
        let addr = DevAddr::from_u32(0x0102_0304);
        assert_eq!(addr.as_bytes(), &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(DevAddr::from_bytes(*addr.as_bytes()), addr);
        assert_eq!(format!("{addr}"), "01020304");
    }

    #[test]
    fn test_eui64_display() {
        let eui = Eui64::from_u64(0xAABB_CCDD_0011_2233);
        assert_eq!(format!("{eui}"), "AABBCCDD00112233");
        assert_eq!(eui.as_bytes()[0], 0x33);
    }

    #[test]
    fn test_dev_nonce_wire_order() {
        let nonce = DevNonce::new(0xABCD);
        assert_eq!(nonce.to_bytes(), [0xCD, 0xAB]);
        assert_eq!(DevNonce::from_bytes([0xCD, 0xAB]).value(), 0xABCD);
    }

    #[test]
    fn test_frame_port_classes() {
        assert!(FramePort::new(0).is_mac_command());
        assert!(FramePort::new(224).is_mac_layer_test());
        assert!(FramePort::new(1).is_application());
        assert!(FramePort::new(223).is_application());
        assert!(!FramePort::new(224).is_application());
    }

    #[test]
    fn test_hertz_mega_rounding() {
        assert_eq!(Hertz::mega(470.3).as_u64(), 470_300_000);
        assert_eq!(Hertz::mega(505.3).as_u64(), 505_300_000);
        assert_eq!(Hertz::mega(869.525).as_u64(), 869_525_000);
        assert_eq!(format!("{}", Hertz::new(500_300_000)), "500.300 MHz");
    }

    #[test]
    fn test_direction_bytes() {
        assert_eq!(Direction::Uplink.as_byte(), 0x00);
        assert_eq!(Direction::Downlink.as_byte(), 0x01);
    }
}
