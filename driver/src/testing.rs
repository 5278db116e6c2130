//! Recording bus and delay for the unit tests.
use crate::lcd::hd44780::registers::{pins, Mode};
use crate::{I2cAddress, I2cBus, LcdError, LcdResult};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::ErrorKind;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// A successful bus write or a requested wait, in the order they happened.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Event {
    Write(u8),
    Wait(Duration),
}

/// Log shared by a bus and a delay from [recorder].
pub(crate) type EventLog = Rc<RefCell<Vec<Event>>>;

/// A bus and a delay writing to one [EventLog], so writes and waits can be checked together.
pub(crate) fn recorder() -> (RecordingBus, RecordingDelay, EventLog) {
    let log = EventLog::default();
    let bus = RecordingBus {
        events: Some(log.clone()),
        ..RecordingBus::default()
    };
    let delay = RecordingDelay {
        events: Some(log.clone()),
        ..RecordingDelay::default()
    };
    (bus, delay, log)
}

/// A nibble the controller latched, decoded from an EN-high write.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Nibble {
    pub value: u8,
    pub rs: bool,
    pub backlight: bool,
}

/// A full byte reassembled from two latched nibbles.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Transfer {
    pub byte: u8,
    pub mode: Mode,
    pub backlight: bool,
}

impl Transfer {
    pub fn command(byte: u8) -> Self {
        Transfer {
            byte,
            mode: Mode::Command,
            backlight: true,
        }
    }

    pub fn data(byte: u8) -> Self {
        Transfer {
            byte,
            mode: Mode::Data,
            backlight: true,
        }
    }
}

/// Records every write and answers probes for a fixed set of addresses.
#[derive(Debug, Default)]
pub(crate) struct RecordingBus {
    writes: Vec<(I2cAddress, u8)>,
    devices: Vec<u8>,
    /// Fails every write with `ErrorKind::Bus` while set.
    pub fail_writes: bool,
    fail_countdown: Option<usize>,
    events: Option<EventLog>,
}

impl RecordingBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_devices(devices: &[u8]) -> Self {
        RecordingBus {
            devices: devices.to_vec(),
            ..Self::default()
        }
    }

    pub fn remove_device(&mut self, address: u8) {
        self.devices.retain(|&a| a != address);
    }

    /// Lets `writes` more writes through, then fails the next one only.
    pub fn fail_after(&mut self, writes: usize) {
        self.fail_countdown = Some(writes);
    }

    pub fn clear(&mut self) {
        self.writes.clear();
    }

    /// Every byte written, in order.
    pub fn values(&self) -> Vec<u8> {
        self.writes.iter().map(|&(_, value)| value).collect()
    }

    pub fn addresses(&self) -> Vec<I2cAddress> {
        self.writes.iter().map(|&(address, _)| address).collect()
    }

    /// The nibbles latched by the controller, one per EN-high write.
    pub fn nibbles(&self) -> Vec<Nibble> {
        self.values()
            .into_iter()
            .filter(|value| value & pins::EN != 0)
            .map(|value| Nibble {
                value: value >> pins::DATA_SHIFT,
                rs: value & pins::RS != 0,
                backlight: value & pins::BACKLIGHT != 0,
            })
            .collect()
    }

    /// All latched nibbles paired into bytes. Only valid when no single-nibble transfer (the
    /// init resync) was recorded.
    pub fn transfers(&self) -> Vec<Transfer> {
        Self::pair(&self.nibbles())
    }

    pub fn pair(nibbles: &[Nibble]) -> Vec<Transfer> {
        assert_eq!(nibbles.len() % 2, 0, "odd number of nibbles: {:?}", nibbles);
        nibbles
            .chunks(2)
            .map(|pair| {
                let (high, low) = (pair[0], pair[1]);
                assert_eq!(high.rs, low.rs, "mode changed within a byte");
                Transfer {
                    byte: (high.value << 4) | low.value,
                    mode: if high.rs { Mode::Data } else { Mode::Command },
                    backlight: high.backlight && low.backlight,
                }
            })
            .collect()
    }
}

impl I2cBus for RecordingBus {
    fn write_byte(&mut self, address: I2cAddress, value: u8) -> LcdResult<()> {
        match self.fail_countdown {
            Some(0) => {
                self.fail_countdown = None;
                return Err(LcdError::Transport(ErrorKind::Bus));
            }
            Some(n) => self.fail_countdown = Some(n - 1),
            None => {}
        }
        if self.fail_writes {
            return Err(LcdError::Transport(ErrorKind::Bus));
        }
        assert_eq!(value & pins::RW, 0, "RW must never be set");
        self.writes.push((address, value));
        if let Some(events) = &self.events {
            events.borrow_mut().push(Event::Write(value));
        }
        Ok(())
    }

    fn probe(&mut self, address: I2cAddress) -> LcdResult<bool> {
        Ok(self.devices.contains(&address.get()))
    }
}

/// Records every requested wait instead of sleeping.
#[derive(Debug, Default)]
pub(crate) struct RecordingDelay {
    waits: Vec<Duration>,
    events: Option<EventLog>,
}

impl RecordingDelay {
    pub fn waits(&self) -> &[Duration] {
        &self.waits
    }

    fn record(&mut self, wait: Duration) {
        self.waits.push(wait);
        if let Some(events) = &self.events {
            events.borrow_mut().push(Event::Wait(wait));
        }
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.record(Duration::from_nanos(ns as u64));
    }

    fn delay_us(&mut self, us: u32) {
        self.record(Duration::from_micros(us as u64));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.record(Duration::from_millis(ms as u64));
    }
}
