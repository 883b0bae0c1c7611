//! Page-safe write driver for an external serial EEPROM.
//!
//! The device commits writes into a fixed-size internal page buffer; a
//! single transaction that runs past the end of a page wraps back to the
//! start of that page and silently corrupts data. This driver chunks bulk
//! writes so no transaction ever crosses a page boundary, and blocks for
//! the device's write-cycle time after every transaction.

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;

/// Device write-page size in bytes. Pure write-chunking policy; pages are
/// not visible through the read path.
pub const PAGE_SIZE: usize = 64;

/// Total device capacity in bytes (32 KB part).
pub const CAPACITY: usize = 32 * 1024;

/// Write-cycle settle time. The device offers no completion signal, so the
/// driver waits this fixed duration after every write transaction.
pub const WRITE_SETTLE: Duration = Duration::from_millis(6);

/// Byte-addressable serial transport to the EEPROM device.
///
/// The driver is transport-agnostic: bit-banged I2C, a hardware bus, or an
/// in-memory fake for tests all work. Transactions are infallible by
/// contract; the only observable failure mode of the device is absence,
/// surfaced through [`EepromTransport::device_present`].
pub trait EepromTransport {
    /// Write a single byte at `address`
    fn send(&mut self, address: u16, byte: u8);

    /// Write `data` as one transaction starting at `address`
    fn send_buffer(&mut self, address: u16, data: &[u8]);

    /// Read a single byte from `address`
    fn get(&mut self, address: u16) -> u8;

    /// Fill `buffer` with consecutive bytes starting at `address`
    fn get_buffer(&mut self, address: u16, buffer: &mut [u8]);

    /// Probe the device with a minimal bus handshake
    fn device_present(&mut self) -> bool;
}

/// EEPROM driver: page-boundary-safe writes with enforced settle delays.
#[derive(Debug)]
pub struct Eeprom<T: EepromTransport, D: DelayNs> {
    transport: T,
    delay: D,
}

impl<T: EepromTransport, D: DelayNs> Eeprom<T, D> {
    pub const fn new(transport: T, delay: D) -> Self {
        Self { transport, delay }
    }

    /// Tear the driver down, returning the transport and delay.
    pub fn into_parts(self) -> (T, D) {
        (self.transport, self.delay)
    }

    /// Check device presence with a single handshake, no retry.
    pub fn probe(&mut self) -> bool {
        self.transport.device_present()
    }

    /// Compiled-in device size in bytes; not a live query.
    pub const fn capacity(&self) -> usize {
        CAPACITY
    }

    /// Read one byte.
    ///
    /// Addresses are not validated against [`CAPACITY`]; out-of-range
    /// behavior is inherited from the transport.
    pub fn read_byte(&mut self, address: u16) -> u8 {
        self.transport.get(address)
    }

    /// Read consecutive bytes into `buffer`.
    pub fn read_buffer(&mut self, address: u16, buffer: &mut [u8]) {
        self.transport.get_buffer(address, buffer);
    }

    /// Write one byte and wait out the settle delay before returning.
    pub fn write_byte(&mut self, address: u16, value: u8) {
        self.transport.send(address, value);
        self.settle();
    }

    /// Write `data` starting at `address`, never crossing a page boundary
    /// within one transaction.
    ///
    /// An unaligned start is brought up to the next page boundary with one
    /// partial transaction, then whole pages follow one per transaction,
    /// then the remainder. The settle delay is waited after every
    /// transaction; an empty `data` issues none.
    pub fn write_buffer(&mut self, address: u16, data: &[u8]) {
        let mut address = address;
        let mut written = 0usize;

        let page_offset = address as usize % PAGE_SIZE;
        if page_offset != 0 {
            // Partial leading page up to the boundary.
            let lead = (PAGE_SIZE - page_offset).min(data.len());
            if lead == 0 {
                return;
            }
            self.transport.send_buffer(address, &data[..lead]);
            self.settle();
            written = lead;
            address += lead as u16;
        }

        while data.len() - written >= PAGE_SIZE {
            self.transport
                .send_buffer(address, &data[written..written + PAGE_SIZE]);
            self.settle();
            written += PAGE_SIZE;
            address += PAGE_SIZE as u16;
        }

        if written < data.len() {
            self.transport.send_buffer(address, &data[written..]);
            self.settle();
        }
    }

    fn settle(&mut self) {
        #[allow(clippy::cast_possible_truncation)]
        self.delay.delay_us(WRITE_SETTLE.as_micros() as u32);
    }
}
