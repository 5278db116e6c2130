//! Timing contract of the HD44780 4-bit interface.
//!
//! Every step of the protocol has a minimum time the controller needs before it accepts the next
//! transfer. These are the datasheet minimums, collected in [Wait] so the protocol engine never
//! sleeps an arbitrary amount.
use embedded_hal::delay::DelayNs;
use std::thread::sleep;
use std::time::Duration;

/// A named minimum wait of the protocol.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Wait {
    /// After the supply stabilizes and before the first transfer. ≥ 15 ms.
    PowerOn,
    /// After the first `0x3` resync nibble. ≥ 4.1 ms.
    FirstResync,
    /// After the second and third resync nibbles and the switch to 4-bit mode. ≥ 100 µs.
    Resync,
    /// Enable pin held high while a nibble is latched. ≥ 450 ns.
    EnablePulse,
    /// After the enable pin falls, before the next nibble. Covers the 37 µs execution time of
    /// ordinary commands and data writes.
    Settle,
    /// Execution time of clear display and return home. ≥ 1.52 ms.
    ClearOrHome,
}

impl Wait {
    /// The minimum duration of the wait.
    pub const fn duration(self) -> Duration {
        match self {
            Wait::PowerOn => Duration::from_millis(15),
            Wait::FirstResync => Duration::from_micros(4_100),
            Wait::Resync => Duration::from_micros(100),
            Wait::EnablePulse => Duration::from_micros(1),
            Wait::Settle => Duration::from_micros(50),
            Wait::ClearOrHome => Duration::from_micros(1_600),
        }
    }

    /// Blocks on `delay` for at least the duration of the wait.
    pub fn wait_on(self, delay: &mut impl DelayNs) {
        delay.delay_us(self.duration().as_micros() as u32);
    }
}

/// Blocking delay using [std::thread::sleep]. The OS may sleep longer, never shorter.
#[derive(Copy, Clone, Debug, Default)]
pub struct ThreadDelay;

impl DelayNs for ThreadDelay {
    fn delay_ns(&mut self, ns: u32) {
        sleep(Duration::from_nanos(ns as u64));
    }

    fn delay_us(&mut self, us: u32) {
        sleep(Duration::from_micros(us as u64));
    }

    fn delay_ms(&mut self, ms: u32) {
        sleep(Duration::from_millis(ms as u64));
    }
}
