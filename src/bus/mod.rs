//! Register transports.
//!
//! All three devices are register-addressed: a transaction starts with a
//! register (or command) byte and moves one or more data bytes. [`RegisterBus`]
//! captures exactly that, and every driver in this crate is generic over it.
//!
//! - [`I2cBus`]: two-wire bus, fixed 7-bit device address, MSB-first.
//! - [`SpiBus`]: four-wire bus through an `SpiDevice`, bit 7 of the command
//!   byte selects read, MSB-first.
//! - [`ThreeWire`]: software-clocked half-duplex bus on plain GPIO, LSB-first.
//!
//! Transports are blocking and carry no timeout of their own; devices that
//! can silently misbehave are checked by verification reads in the drivers.

use embedded_hal::{
  i2c::{I2c, Operation as I2cOperation, SevenBitAddress},
  spi::{Operation, SpiDevice},
};

mod three_wire;

pub use three_wire::{IoPin, ThreeWire};

/// Byte-level register access over some transport.
pub trait RegisterBus {
  type Error;

  /// Longest payload `write_regs` frames in one transaction.
  const MAX_WRITE: usize = usize::MAX;

  /// Read `buf.len()` bytes starting at `reg`.
  fn read_regs(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

  /// Write `data` starting at `reg` in a single framed transaction.
  fn write_regs(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error>;
}

impl<T: RegisterBus + ?Sized> RegisterBus for &mut T {
  type Error = T::Error;
  const MAX_WRITE: usize = T::MAX_WRITE;

  fn read_regs(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
    T::read_regs(self, reg, buf)
  }

  fn write_regs(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error> {
    T::write_regs(self, reg, data)
  }
}

/// Largest payload of a single buffered I2C register write.
pub const MAX_WRITE_LEN: usize = 31;

/// Two-wire transport bound to one device address.
pub struct I2cBus<I> {
  i2c: I,
  address: SevenBitAddress,
}

impl<I: I2c> I2cBus<I> {
  pub fn new(i2c: I, address: SevenBitAddress) -> Self {
    Self { i2c, address }
  }

  pub fn address(&self) -> SevenBitAddress {
    self.address
  }

  /// Give the bus back.
  pub fn release(self) -> I {
    self.i2c
  }
}

impl<I: I2c> RegisterBus for I2cBus<I> {
  type Error = I::Error;
  const MAX_WRITE: usize = MAX_WRITE_LEN;

  fn read_regs(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
    self.i2c.write_read(self.address, &[reg], buf)
  }

  fn write_regs(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error> {
    let len = data.len();
    if len > MAX_WRITE_LEN {
      // Adjacent writes go out without a repeated start.
      return self.i2c.transaction(self.address, &mut [I2cOperation::Write(&[reg]), I2cOperation::Write(data)]);
    }
    let mut buf = [0u8; MAX_WRITE_LEN + 1];
    buf[0] = reg;
    buf[1..=len].copy_from_slice(data);
    self.i2c.write(self.address, &buf[..=len])
  }
}

/// Four-wire transport. Chip select is owned by the `SpiDevice`.
pub struct SpiBus<S> {
  spi: S,
}

/// Read flag in the SPI command byte.
const SPI_READ: u8 = 0x80;

impl<S: SpiDevice> SpiBus<S> {
  pub fn new(spi: S) -> Self {
    Self { spi }
  }

  pub fn release(self) -> S {
    self.spi
  }
}

impl<S: SpiDevice> RegisterBus for SpiBus<S> {
  type Error = S::Error;

  fn read_regs(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
    self.spi.transaction(&mut [Operation::Write(&[reg | SPI_READ]), Operation::Read(buf)])
  }

  fn write_regs(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error> {
    self.spi.transaction(&mut [Operation::Write(&[reg & !SPI_READ]), Operation::Write(data)])
  }
}
