//! Register read/write helpers shared by every driver.
//!
//! Typed access goes through [`read`](RegisterAccess::read) and
//! [`write`](RegisterAccess::write): a packed register struct converts to its
//! raw bytes with `TryInto<[u8; N]>` and back with `TryFrom<[u8; N]>`. A raw
//! value that does not decode surfaces as [`Error::Data`].

use crate::{bus::RegisterBus, Error};

pub trait RegisterAccess: RegisterBus {
  fn read<const N: usize, T: TryFrom<[u8; N]>>(&mut self, reg: impl Into<u8>) -> Result<T, Error<Self::Error>> {
    let mut b = [0u8; N];
    self.read_bytes(reg, &mut b)?;
    T::try_from(b).map_err(|_| Error::Data)
  }

  fn write<const N: usize, T: TryInto<[u8; N]>>(
    &mut self,
    reg: impl Into<u8>,
    v: T,
  ) -> Result<(), Error<Self::Error>> {
    let b = v.try_into().map_err(|_| Error::Data)?;
    self.write_bytes(reg, &b)
  }

  fn read_u8(&mut self, reg: impl Into<u8>) -> Result<u8, Error<Self::Error>> {
    let mut b = [0u8; 1];
    self.read_bytes(reg, &mut b)?;
    Ok(b[0])
  }

  fn write_u8(&mut self, reg: impl Into<u8>, value: u8) -> Result<(), Error<Self::Error>> {
    self.write_bytes(reg, &[value])
  }

  fn read_bytes(&mut self, reg: impl Into<u8>, buf: &mut [u8]) -> Result<(), Error<Self::Error>> {
    self.read_regs(reg.into(), buf).map_err(Error::Bus)
  }

  /// Payloads longer than the transport's [`MAX_WRITE`](RegisterBus::MAX_WRITE) are rejected
  /// before any traffic.
  fn write_bytes(&mut self, reg: impl Into<u8>, data: &[u8]) -> Result<(), Error<Self::Error>> {
    if data.len() > Self::MAX_WRITE {
      return Err(Error::WriteTooLong);
    }
    self.write_regs(reg.into(), data).map_err(Error::Bus)
  }

  /// Read-modify-write: clear the `clear` bits, then set the `set` bits.
  fn update(&mut self, reg: impl Into<u8>, clear: u8, set: u8) -> Result<u8, Error<Self::Error>> {
    let reg = reg.into();
    let value = (self.read_u8(reg)? & !clear) | set;
    self.write_u8(reg, value)?;
    Ok(value)
  }

  /// Set or clear a single mask depending on `on`.
  fn set_bits(&mut self, reg: impl Into<u8>, mask: u8, on: bool) -> Result<u8, Error<Self::Error>> {
    if on {
      self.update(reg, 0, mask)
    } else {
      self.update(reg, mask, 0)
    }
  }
}

impl<B: RegisterBus + ?Sized> RegisterAccess for B {}
