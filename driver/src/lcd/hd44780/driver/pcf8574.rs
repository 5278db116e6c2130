use crate::delay::Wait;
use crate::lcd::hd44780::driver::{HD44780Driver, InitState};
use crate::lcd::hd44780::registers::{pins, Command, Mode};
use crate::lcd::hd44780::state::DisplayState;
use crate::{I2cAddress, I2cBus, LcdError, LcdResult};
use embedded_hal::delay::DelayNs;
use log::{debug, info, trace, warn};
use std::fmt::{Debug, Formatter};

/// HD44780 driver talking through a PCF8574-style 8-bit I²C expander, in 4-bit mode.
///
/// Every expander byte is `[D7 D6 D5 D4][BL][EN][RW][RS]`. A nibble is written three times: with
/// EN low, with EN high for at least [Wait::EnablePulse], and with EN low again, after which the
/// controller gets [Wait::Settle] to process it. A byte is two nibbles, high one first.
///
/// The backlight shares the output register with the controller lines, so its bit is part of
/// every write. The expander can't be read back, so the driver keeps the configuration in a
/// [DisplayState] and the last byte it wrote (with EN low) as the output latch.
pub struct I2cHD44780Driver<B, D> {
    bus: B,
    delay: D,
    address: I2cAddress,
    state: DisplayState,
    init_state: InitState,
    output: u8,
}

impl<B: I2cBus, D: DelayNs> I2cHD44780Driver<B, D> {
    /// Creates the driver for the expander at `address` and initializes the display with the
    /// default [DisplayState]. Change the configuration afterwards with the toggle methods.
    ///
    /// # Errors
    /// - `LcdError::InvalidArgument` if `address` is not a 7-bit address.
    /// - `LcdError::Transport` if the initialization sequence could not be written.
    pub fn new(bus: B, delay: D, address: u8) -> LcdResult<Self> {
        let mut driver = I2cHD44780Driver {
            bus,
            delay,
            address: I2cAddress::new(address)?,
            state: DisplayState::default(),
            init_state: InitState::PowerOnWait,
            output: 0,
        };
        driver.initialize()?;
        Ok(driver)
    }

    pub fn address(&self) -> I2cAddress {
        self.address
    }

    /// The configuration last sent to the controller.
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut DisplayState {
        &mut self.state
    }

    pub fn init_state(&self) -> InitState {
        self.init_state
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Gives back the bus and the delay.
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    /// Runs the power-on initialization from [InitState::PowerOnWait] to [InitState::Ready].
    /// The function set, display control and entry mode registers are taken from the current
    /// [DisplayState].
    ///
    /// If a transfer fails, the driver stays in the failed step and refuses commands with
    /// `LcdError::NotReady` until this is called again and succeeds.
    pub fn initialize(&mut self) -> LcdResult<()> {
        self.init_state = InitState::PowerOnWait;
        while !self.init_state.is_ready() {
            debug!("{} init step {:?}", self.address, self.init_state);
            self.run_init_step(self.init_state)?;
            self.init_state = self.init_state.next();
        }
        info!("LCD at {} ready", self.address);
        Ok(())
    }

    fn run_init_step(&mut self, step: InitState) -> LcdResult<()> {
        match step {
            InitState::PowerOnWait | InitState::Ready => {}
            InitState::ResyncNibble1 | InitState::ResyncNibble2 | InitState::ResyncNibble3 => {
                self.transmit_nibble(0b0011, Mode::Command)?;
            }
            InitState::Set4BitMode => self.transmit_nibble(0b0010, Mode::Command)?,
            InitState::FunctionSet => {
                let command = self.state.function_set_flags().command();
                self.transmit_byte(command, Mode::Command)?;
            }
            InitState::DisplayControl => {
                let command = self.state.display_control_flags().command();
                self.transmit_byte(command, Mode::Command)?;
            }
            InitState::EntrySet => {
                let command = self.state.entry_mode_flags().command();
                self.transmit_byte(command, Mode::Command)?;
            }
            InitState::Clear => {
                self.transmit_byte(Command::ClearDisplay.opcode(), Mode::Command)?
            }
            InitState::Home => self.transmit_byte(Command::ReturnHome.opcode(), Mode::Command)?,
        }
        if let Some(wait) = step.wait() {
            wait.wait_on(&mut self.delay);
        }
        Ok(())
    }

    /// Points the driver at a different expander and initializes the display there.
    ///
    /// The current [DisplayState] is kept and sent to the new device.
    pub fn change_address(&mut self, address: u8) -> LcdResult<()> {
        let address = I2cAddress::new(address)?;
        info!("Changing LCD address {} -> {}", self.address, address);
        self.address = address;
        self.initialize()
    }

    /// Probes the configured address on the bus. Does not touch the display.
    pub fn is_alive(&mut self) -> LcdResult<bool> {
        let address = self.address.get();
        Ok(!self.bus.scan(address..=address)?.is_empty())
    }

    /// Sets the backlight by rewriting the output latch with only the backlight bit changed.
    ///
    /// EN stays low, so the controller doesn't latch anything.
    pub fn set_backlight(&mut self, on: bool) -> LcdResult<()> {
        self.state.backlight_on = on;
        let output = (self.output & !(pins::BACKLIGHT | pins::EN)) | self.backlight_bit();
        trace!("Backlight {}, rewriting output {:08b}", on, output);
        self.write_output(output)
    }

    fn backlight_bit(&self) -> u8 {
        if self.state.backlight_on {
            pins::BACKLIGHT
        } else {
            0
        }
    }

    fn write_output(&mut self, output: u8) -> LcdResult<()> {
        self.bus.write_byte(self.address, output)?;
        self.output = output & !pins::EN;
        Ok(())
    }

    /// Writes one nibble (the low 4 bits of `nibble`) and pulses EN to latch it.
    fn transmit_nibble(&mut self, nibble: u8, mode: Mode) -> LcdResult<()> {
        trace!("Writing nibble: {:04b}, {:?}", nibble & 0x0F, mode);
        let output = ((nibble << pins::DATA_SHIFT) & pins::DATA) | mode.bits() | self.backlight_bit();

        self.write_output(output)?;
        self.write_output(output | pins::EN)?;
        Wait::EnablePulse.wait_on(&mut self.delay);
        self.write_output(output)?;
        Wait::Settle.wait_on(&mut self.delay);
        Ok(())
    }

    /// Writes a whole byte as two nibbles, most significant first.
    fn transmit_byte(&mut self, byte: u8, mode: Mode) -> LcdResult<()> {
        trace!("Sending byte: {:08b}, {:?}", byte, mode);
        self.transmit_nibble(byte >> 4, mode)?;
        self.transmit_nibble(byte & 0x0F, mode)
    }

    /// Sends a byte outside of initialization. A failed write may have left the controller
    /// holding only the high nibble, so the driver drops out of [InitState::Ready] and refuses
    /// everything until [I2cHD44780Driver::initialize] resynchronizes it.
    fn transmit_ready_byte(&mut self, byte: u8, mode: Mode) -> LcdResult<()> {
        self.ensure_ready()?;
        if let Err(err) = self.transmit_byte(byte, mode) {
            warn!("{} lost nibble sync ({}), needs initialize()", self.address, err);
            self.init_state = InitState::PowerOnWait;
            return Err(err);
        }
        Ok(())
    }

    fn ensure_ready(&self) -> LcdResult<()> {
        if !self.init_state.is_ready() {
            return Err(LcdError::NotReady);
        }
        Ok(())
    }
}

impl<B: I2cBus, D> Debug for I2cHD44780Driver<B, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I2cHD44780Driver")
            .field("bus", &self.bus)
            .field("address", &self.address)
            .field("init_state", &self.init_state)
            .field("state", &self.state)
            .finish()
    }
}

impl<B: I2cBus, D: DelayNs> HD44780Driver for I2cHD44780Driver<B, D> {
    fn init(&mut self) -> LcdResult<()> {
        self.initialize()
    }

    /// Sends the command and waits out its execution time. Clear display and return home take
    /// much longer than everything else.
    fn send_command(&mut self, command: u8) -> LcdResult<()> {
        self.transmit_ready_byte(command, Mode::Command)?;
        if needs_long_wait(command) {
            Wait::ClearOrHome.wait_on(&mut self.delay);
        }
        Ok(())
    }

    fn send_data(&mut self, data: u8) -> LcdResult<()> {
        self.transmit_ready_byte(data, Mode::Data)
    }
}

/// Clear display and return home (whose lowest bit is ignored by the controller).
fn needs_long_wait(command: u8) -> bool {
    command == Command::ClearDisplay.opcode() || command & !0b1 == Command::ReturnHome.opcode()
}

#[cfg(target_os = "linux")]
impl I2cHD44780Driver<crate::hal::LinuxI2cBus, crate::delay::ThreadDelay> {
    /// Opens `/dev/i2c-{bus_id}` and initializes the display at `address`.
    pub fn open(bus_id: u8, address: u8) -> LcdResult<Self> {
        let bus = crate::hal::open_linux_bus(bus_id)?;
        I2cHD44780Driver::new(bus, crate::delay::ThreadDelay, address)
    }
}
