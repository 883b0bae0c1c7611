#![no_std]

//! Hardware-agnostic core for a 4-channel LED lighting controller.
//!
//! Two real-time subsystems make up the crate:
//!
//! - [`RampEngine`] — an interrupt-tick-driven state machine that fades four
//!   independent PWM duty channels toward target values, holds them, then
//!   returns to idle.
//! - [`Eeprom`] — a client for an external serial EEPROM that splits bulk
//!   writes on the device's internal write-page boundaries and enforces the
//!   post-write settle delay.
//!
//! Around them sit the shared interrupt dispatcher ([`IrqDispatcher`]), the
//! receive byte queue ([`RxQueue`]) and a copy-and-verify provisioning flow
//! ([`provision::mirror_verified`]). All hardware access goes through traits,
//! so every algorithm runs unchanged on the host for testing.

pub mod channel;
pub mod dispatch;
pub mod eeprom;
pub mod provision;
pub mod ramp;
pub mod rx;

pub use channel::{CHANNEL_COUNT, Channel, DUTY_MAX, Duties};
pub use dispatch::{IrqDispatcher, IrqEvent};
pub use eeprom::{CAPACITY, Eeprom, EepromTransport, PAGE_SIZE, WRITE_SETTLE};
pub use provision::MirrorError;
pub use ramp::{HOLD_TICK_SCALE, RampEngine, TICK_PERIOD};
pub use rx::{Overrun, RxQueue};

pub use embassy_time::Duration;

/// Abstract PWM output stage trait
///
/// Implement this trait to support different hardware platforms.
/// The ramp engine is generic over this trait; duty values take effect
/// immediately and the hardware holds them until the next write.
pub trait PwmOutput {
    /// Apply a duty value (0 = off, 255 = fully on) to one channel
    fn set_duty(&mut self, channel: Channel, duty: u8);

    /// Apply all four duty values in channel order
    fn set_all(&mut self, duties: &Duties) {
        for ch in Channel::ALL {
            self.set_duty(ch, duties[ch.index()]);
        }
    }
}
