//! PWM channel identifiers and duty values.

/// Number of PWM channels driven by the controller.
pub const CHANNEL_COUNT: usize = 4;

/// Maximum duty value (100% on-time).
pub const DUTY_MAX: u8 = 255;

/// Duty values for all channels, positional by channel order.
pub type Duties = [u8; CHANNEL_COUNT];

/// One of the four PWM output channels.
///
/// The ordinal order is fixed; bulk operations over all channels are
/// defined positionally in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Channel {
    Ch1 = 0,
    Ch2 = 1,
    Ch3 = 2,
    Ch4 = 3,
}

impl Channel {
    /// All channels in ordinal order.
    pub const ALL: [Channel; CHANNEL_COUNT] =
        [Channel::Ch1, Channel::Ch2, Channel::Ch3, Channel::Ch4];

    /// Positional index of the channel within a [`Duties`] array.
    pub const fn index(self) -> usize {
        self as usize
    }
}
