//! Copy-and-verify provisioning of EEPROM contents.
//!
//! The write driver never reads back what it stored; callers that need the
//! guarantee verify at their own layer. This module implements that flow
//! for provisioning a device image: probe, bulk-write, then compare every
//! byte. No retry; the first failure is terminal for the operation.

use embedded_hal::delay::DelayNs;

use crate::eeprom::{Eeprom, EepromTransport};

/// Failure of a [`mirror_verified`] operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorError {
    /// The device did not acknowledge the presence probe.
    DeviceAbsent,
    /// A byte read back different from what was written.
    Mismatch {
        /// Address of the first mismatching byte.
        address: u16,
    },
}

/// Write `data` at `address` and verify it byte-by-byte.
///
/// Returns on the first verification failure; bytes past the mismatch are
/// left unchecked.
pub fn mirror_verified<T: EepromTransport, D: DelayNs>(
    eeprom: &mut Eeprom<T, D>,
    address: u16,
    data: &[u8],
) -> Result<(), MirrorError> {
    if !eeprom.probe() {
        return Err(MirrorError::DeviceAbsent);
    }

    eeprom.write_buffer(address, data);

    for (i, &expected) in data.iter().enumerate() {
        let at = address + i as u16;
        if eeprom.read_byte(at) != expected {
            return Err(MirrorError::Mismatch { address: at });
        }
    }

    Ok(())
}
