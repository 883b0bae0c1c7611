//! Receive byte queue for the bus protocol layer.
//!
//! The interrupt entry pushes received bytes here; the foreground protocol
//! parser drains them at its own pace. Built on `critical-section` and a
//! fixed-size `heapless::Deque`, so pushes are safe from interrupt context.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

#[cfg(feature = "esp32-log")]
use esp_println::println;

/// Error returned when a byte arrives while the queue is full.
///
/// The byte is dropped rather than overwriting the oldest entry, so the
/// protocol layer sees a gap and can resynchronize on the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overrun(pub u8);

/// Fixed-capacity FIFO of received bytes.
pub struct RxQueue<const N: usize> {
    inner: Mutex<RefCell<Deque<u8, N>>>,
}

impl<const N: usize> RxQueue<N> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Push a received byte; called from the interrupt path.
    ///
    /// Returns `Err(Overrun(byte))` and drops the byte if the queue is full.
    pub fn push(&self, byte: u8) -> Result<(), Overrun> {
        let result = critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(byte).map_err(Overrun)
        });

        #[cfg(feature = "esp32-log")]
        if let Err(Overrun(byte)) = result {
            println!("rx queue full, dropping byte {byte:#04x}");
        }

        result
    }

    /// Pop the oldest received byte, if any; called from the foreground.
    pub fn pop(&self) -> Option<u8> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }

    /// Number of bytes currently queued.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const N: usize> Default for RxQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
