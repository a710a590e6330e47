//! 32-bit frame-counter reconstruction from the 16-bit wire form.

use crate::core::{FrameError, MAX_FCNT_GAP};

/// Reconstruct the full 32-bit counter by substituting the wire value
/// into the low 16 bits of the server-tracked counter.
///
/// Assumes the counter only moved forward within a 16-bit window since
/// the last accepted frame; a device that advanced past 65535 in that
/// window comes out wrong here. Use [`infer_full_fcnt_checked`] when the
/// result drives an acceptance decision.
pub const fn infer_full_fcnt(wire_fcnt: u16, server_fcnt: u32) -> u32 {
    (server_fcnt & 0xFFFF_0000) | wire_fcnt as u32
}

/// Reconstruct the full 32-bit counter, accounting for 16-bit rollover.
///
/// When the plain substitution moves backwards relative to the server
/// counter, the candidate one rollover ahead is considered instead. A
/// candidate further than [`MAX_FCNT_GAP`] ahead is rejected as a
/// desynchronized device rather than accepted with a bogus counter.
///
/// # Errors
/// Returns [`FrameError::CounterJump`] when no candidate lies within
/// the allowed gap.
pub fn infer_full_fcnt_checked(wire_fcnt: u16, server_fcnt: u32) -> Result<u32, FrameError> {
    let candidate = u64::from(infer_full_fcnt(wire_fcnt, server_fcnt));
    let server = u64::from(server_fcnt);
    let candidate = if candidate < server {
        candidate + 0x1_0000
    } else {
        candidate
    };
    if candidate > u64::from(u32::MAX) || candidate - server > u64::from(MAX_FCNT_GAP) {
        return Err(FrameError::CounterJump {
            wire: wire_fcnt,
            server: server_fcnt,
        });
    }
    Ok(candidate as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_substitutes_low_bits() {
        assert_eq!(infer_full_fcnt(5, 0x0001_0003), 0x0001_0005);
        assert_eq!(infer_full_fcnt(0, 0), 0);
        assert_eq!(infer_full_fcnt(0xFFFF, 0x0002_0000), 0x0002_FFFF);
    }

    #[test]
    fn test_checked_accepts_forward_window() {
        assert_eq!(infer_full_fcnt_checked(5, 0x0001_0003), Ok(0x0001_0005));
        assert_eq!(infer_full_fcnt_checked(3, 0x0001_0003), Ok(0x0001_0003));
    }

    #[test]
    fn test_checked_rolls_over() {
        // Wire counter wrapped past 65535 between observations.
        assert_eq!(infer_full_fcnt_checked(2, 0x0001_FFFE), Ok(0x0002_0002));
    }

    #[test]
    fn test_checked_rejects_implausible_jump() {
        assert_eq!(
            infer_full_fcnt_checked(20_000, 0x0001_0000),
            Err(FrameError::CounterJump {
                wire: 20_000,
                server: 0x0001_0000
            })
        );
        // Rollover candidate also past the gap.
        assert_eq!(
            infer_full_fcnt_checked(0x7000, 0x0001_8000),
            Err(FrameError::CounterJump {
                wire: 0x7000,
                server: 0x0001_8000
            })
        );
    }

    #[test]
    fn test_checked_rejects_past_u32_range() {
        assert!(infer_full_fcnt_checked(1, 0xFFFF_FFFE).is_err());
    }
}
