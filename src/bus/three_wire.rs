//! Bit-banged three-wire bus (chip enable, clock, bidirectional data).
//!
//! Frame layout, one transaction:
//!
//! ```text
//! CE    __/‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾\____
//! SCLK  ______/‾\_/‾\_ .. _/‾\_/‾\_ .. _/‾\__________
//! IO       cmd b0  b1 ..   b7 | data b0 .. b7
//! ```
//!
//! Bits travel LSB-first. The low bit of the command byte is the read flag.
//! On a read the device starts driving IO on the falling clock edge that
//! ends the command byte, so the data pin turns around to input between the
//! 8th rising and the 8th falling edge.

use embedded_hal::{
  delay::DelayNs,
  digital::{InputPin, OutputPin},
};

use super::RegisterBus;

/// Read flag carried in bit 0 of the command byte.
pub const READ_FLAG: u8 = 0x01;

/// CE setup and inactive time, tCC / tCWH.
const CE_SETTLE_US: u32 = 4;
/// Clock high and low hold, tCH / tCL.
const CLOCK_HOLD_US: u32 = 1;

/// A GPIO that can switch between driving and sampling at run time.
pub trait IoPin: InputPin + OutputPin {
  fn set_as_input(&mut self) -> Result<(), Self::Error>;
  fn set_as_output(&mut self) -> Result<(), Self::Error>;
}

/// Software-clocked half-duplex transport.
///
/// All three pins must share one error type; on most HALs that is
/// `core::convert::Infallible`.
pub struct ThreeWire<CE, SCLK, IO, D> {
  ce: CE,
  sclk: SCLK,
  io: IO,
  delay: D,
}

impl<CE, SCLK, IO, D, E> ThreeWire<CE, SCLK, IO, D>
where
  CE: OutputPin<Error = E>,
  SCLK: OutputPin<Error = E>,
  IO: IoPin<Error = E>,
  D: DelayNs,
{
  pub fn new(ce: CE, sclk: SCLK, io: IO, delay: D) -> Self {
    Self { ce, sclk, io, delay }
  }

  pub fn release(self) -> (CE, SCLK, IO, D) {
    (self.ce, self.sclk, self.io, self.delay)
  }

  /// Select the device and clock out `command`.
  ///
  /// When the read flag is set, IO is left as an input ready for
  /// [`read_byte`](Self::read_byte).
  pub fn begin_transaction(&mut self, command: u8) -> Result<(), E> {
    self.ce.set_low()?;
    self.sclk.set_low()?;
    self.io.set_as_output()?;
    self.ce.set_high()?;
    self.delay.delay_us(CE_SETTLE_US);
    self.write_byte(command, command & READ_FLAG != 0)
  }

  /// Deselect the device and release the data line.
  pub fn end_transaction(&mut self) -> Result<(), E> {
    self.ce.set_low()?;
    self.delay.delay_us(CE_SETTLE_US);
    self.io.set_as_input()
  }

  /// Clock out one byte, LSB first.
  ///
  /// With `turnaround` set, IO switches to input between the last rising
  /// and falling edge.
  pub fn write_byte(&mut self, mut value: u8, turnaround: bool) -> Result<(), E> {
    for bit in 0..8 {
      if value & 0x01 != 0 {
        self.io.set_high()?;
      } else {
        self.io.set_low()?;
      }
      self.delay.delay_us(CLOCK_HOLD_US);
      self.sclk.set_high()?;
      self.delay.delay_us(CLOCK_HOLD_US);
      if turnaround && bit == 7 {
        self.io.set_as_input()?;
      }
      self.sclk.set_low()?;
      self.delay.delay_us(CLOCK_HOLD_US);
      value >>= 1;
    }
    Ok(())
  }

  /// Clock in one byte, LSB first. IO must already be an input.
  pub fn read_byte(&mut self) -> Result<u8, E> {
    let mut value = 0u8;
    for bit in 0..8 {
      if self.io.is_high()? {
        value |= 1 << bit;
      }
      self.sclk.set_high()?;
      self.delay.delay_us(CLOCK_HOLD_US);
      self.sclk.set_low()?;
      self.delay.delay_us(CLOCK_HOLD_US);
    }
    Ok(value)
  }

  fn read_frame(&mut self, command: u8, buf: &mut [u8]) -> Result<(), E> {
    self.begin_transaction(command | READ_FLAG)?;
    for b in buf.iter_mut() {
      *b = self.read_byte()?;
    }
    Ok(())
  }

  fn write_frame(&mut self, command: u8, data: &[u8]) -> Result<(), E> {
    self.begin_transaction(command & !READ_FLAG)?;
    for &b in data {
      self.write_byte(b, false)?;
    }
    Ok(())
  }
}

impl<CE, SCLK, IO, D, E> RegisterBus for ThreeWire<CE, SCLK, IO, D>
where
  CE: OutputPin<Error = E>,
  SCLK: OutputPin<Error = E>,
  IO: IoPin<Error = E>,
  D: DelayNs,
{
  type Error = E;

  fn read_regs(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), E> {
    let res = self.read_frame(reg, buf);
    // CE must drop even when a pin failed mid-frame.
    let end = self.end_transaction();
    res.and(end)
  }

  fn write_regs(&mut self, reg: u8, data: &[u8]) -> Result<(), E> {
    let res = self.write_frame(reg, data);
    let end = self.end_transaction();
    res.and(end)
  }
}
