//! Shared interrupt dispatch.
//!
//! Three hardware events share one interrupt priority level: the 5 ms PWM
//! base tick, the day/night sensor timer, and an asynchronous received
//! byte. [`IrqDispatcher`] mirrors the hardware's pending flags and picks
//! exactly one event per interrupt entry in a fixed priority order; a
//! second pending event waits for the next entry. A receive flood can
//! therefore delay bytes behind timer ticks, but never starve them.

use core::cell::Cell;

use critical_section::Mutex;

/// The event chosen for servicing by one dispatcher entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrqEvent {
    /// PWM base-tick timer fired; drive the ramp engine.
    PwmTick,
    /// Day/night sensor timer fired; advance the sensor state machine.
    SensorTick,
    /// A byte arrived from the bus receiver.
    ByteReceived(u8),
}

/// Pending-event latch with single-dispatch-per-entry semantics.
///
/// `raise_*` are called from the hardware vector shims (or test code);
/// [`Self::service`] is the body of the shared interrupt entry. Checking
/// order is fixed: PWM tick first, sensor tick second, received byte last.
pub struct IrqDispatcher {
    pwm_tick: Mutex<Cell<bool>>,
    sensor_tick: Mutex<Cell<bool>>,
    rx_byte: Mutex<Cell<Option<u8>>>,
}

impl IrqDispatcher {
    pub const fn new() -> Self {
        Self {
            pwm_tick: Mutex::new(Cell::new(false)),
            sensor_tick: Mutex::new(Cell::new(false)),
            rx_byte: Mutex::new(Cell::new(None)),
        }
    }

    /// Latch a PWM base-tick event.
    pub fn raise_pwm_tick(&self) {
        critical_section::with(|cs| self.pwm_tick.borrow(cs).set(true));
    }

    /// Latch a sensor timer event.
    pub fn raise_sensor_tick(&self) {
        critical_section::with(|cs| self.sensor_tick.borrow(cs).set(true));
    }

    /// Latch a received byte.
    ///
    /// A byte still pending from a previous receive is replaced, matching
    /// a single-byte hardware receive register.
    pub fn raise_byte_received(&self, byte: u8) {
        critical_section::with(|cs| self.rx_byte.borrow(cs).set(Some(byte)));
    }

    /// Clear and return the highest-priority pending event, or `None`.
    ///
    /// Exactly one event is serviced per call even when several are
    /// pending; the rest stay latched for subsequent calls. The caller
    /// routes the event: ramp tick to [`crate::RampEngine::on_tick`],
    /// received bytes into an [`crate::RxQueue`], and so on.
    pub fn service(&self) -> Option<IrqEvent> {
        critical_section::with(|cs| {
            if self.pwm_tick.borrow(cs).replace(false) {
                return Some(IrqEvent::PwmTick);
            }
            if self.sensor_tick.borrow(cs).replace(false) {
                return Some(IrqEvent::SensorTick);
            }
            self.rx_byte.borrow(cs).take().map(IrqEvent::ByteReceived)
        })
    }
}

impl Default for IrqDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
