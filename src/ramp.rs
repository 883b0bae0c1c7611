//! PWM fade/hold ramp engine.
//!
//! A periodic-tick-driven state machine that steps four duty channels from
//! their current values toward target values, holds the result for a
//! configured duration, then returns to idle. The tick handler runs in
//! interrupt context while ramps are issued from the foreground, so the
//! whole engine state lives behind a single critical section.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::Duration;

use crate::PwmOutput;
use crate::channel::{CHANNEL_COUNT, Duties};

/// Base tick period of the engine (one `on_tick` per period).
pub const TICK_PERIOD: Duration = Duration::from_millis(5);

/// Hold duration scale: one hold unit equals this many base ticks (50 ms).
pub const HOLD_TICK_SCALE: u16 = 10;

/// Engine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// No active transition; the hardware holds the last set duties.
    Idle,
    /// Duty values stepping toward their targets once per fade period.
    Fading,
    /// Duty values fixed at their targets, counting down the hold duration.
    Holding,
}

#[derive(Debug)]
struct RampCore {
    /// Duty values currently in effect at the output stage
    current: Duties,
    /// Duty values the active ramp converges to
    target: Duties,
    state: State,
    /// Ticks remaining before the next fade step or hold expiry
    counter: u16,
    /// Counter reload value between fade steps
    fade_ticks: u16,
    /// Hold duration in base ticks
    hold_ticks: u16,
}

impl RampCore {
    const fn new() -> Self {
        Self {
            current: [0; CHANNEL_COUNT],
            target: [0; CHANNEL_COUNT],
            state: State::Idle,
            counter: 0,
            fade_ticks: 0,
            hold_ticks: 0,
        }
    }

    fn tick<O: PwmOutput>(&mut self, output: &mut O) {
        match self.state {
            State::Fading if self.counter == 0 => {
                // Move every channel one unit toward its target. A channel
                // already at target stays put, so convergence is monotone
                // and never overshoots.
                for i in 0..CHANNEL_COUNT {
                    if self.current[i] < self.target[i] {
                        self.current[i] += 1;
                    } else if self.current[i] > self.target[i] {
                        self.current[i] -= 1;
                    }
                }
                output.set_all(&self.current);

                if self.current == self.target {
                    self.counter = self.hold_ticks;
                    self.state = State::Holding;
                } else {
                    self.counter = self.fade_ticks;
                }
            }
            State::Holding if self.counter == 0 => {
                // Hold expired; leave the outputs as they are.
                self.state = State::Idle;
            }
            _ => {}
        }

        // Unconditional countdown, last action of every tick.
        if self.counter > 0 {
            self.counter -= 1;
        }
    }
}

/// PWM ramp engine.
///
/// `on_tick` is meant to be driven from a fixed 5 ms timer interrupt (see
/// [`TICK_PERIOD`]) while `begin_ramp`, `set_immediate` and `is_busy` are
/// called from the foreground. All state is guarded by a critical section,
/// so foreground mutations are never observed half-applied by the tick
/// handler.
pub struct RampEngine {
    inner: Mutex<RefCell<RampCore>>,
}

impl RampEngine {
    /// Create an idle engine with all duties at zero.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(RampCore::new())),
        }
    }

    /// Check whether a fade or hold is currently in progress.
    ///
    /// Callers poll this to detect completion and to avoid issuing a ramp
    /// that would be discarded.
    pub fn is_busy(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().state != State::Idle)
    }

    /// Snapshot of the duty values currently in effect.
    pub fn duties(&self) -> Duties {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().current)
    }

    /// Cancel any in-progress transition and apply fixed duty values now.
    ///
    /// The cancellation and the hardware write happen inside one critical
    /// section, so a concurrently pending tick can never step the outputs
    /// with stale targets afterwards. Leaves the engine idle.
    pub fn set_immediate<O: PwmOutput>(&self, output: &mut O, duties: Duties) {
        critical_section::with(|cs| {
            let mut core = self.inner.borrow(cs).borrow_mut();
            core.state = State::Idle;
            core.counter = 0;
            core.current = duties;
            output.set_all(&core.current);
        });
    }

    /// Start fading all channels toward `targets`.
    ///
    /// `fade_ticks` is the per-step period in base ticks (5 ms); the first
    /// step lands `fade_ticks + 1` ticks after acceptance. `hold_ticks` is
    /// the hold duration in units of [`HOLD_TICK_SCALE`] base ticks (50 ms).
    ///
    /// Silently ignored while the engine is busy: at most one ramp is in
    /// flight, and callers are expected to retry or poll [`Self::is_busy`].
    /// Returns immediately; the ramp executes over subsequent ticks.
    pub fn begin_ramp(&self, targets: Duties, fade_ticks: u8, hold_ticks: u8) {
        critical_section::with(|cs| {
            let mut core = self.inner.borrow(cs).borrow_mut();
            if core.state != State::Idle {
                return;
            }

            core.target = targets;
            core.fade_ticks = u16::from(fade_ticks);
            core.hold_ticks = u16::from(hold_ticks) * HOLD_TICK_SCALE;
            core.counter = core.fade_ticks;
            core.state = State::Fading;
        });
    }

    /// Advance the state machine by one base tick.
    ///
    /// Call once per [`TICK_PERIOD`] from the timer interrupt. This is the
    /// only place duty values change while a ramp is active.
    pub fn on_tick<O: PwmOutput>(&self, output: &mut O) {
        critical_section::with(|cs| {
            self.inner.borrow(cs).borrow_mut().tick(output);
        });
    }
}

impl Default for RampEngine {
    fn default() -> Self {
        Self::new()
    }
}
