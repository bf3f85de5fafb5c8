//! Battery-backed scratch RAM.

use super::{defs::*, Ds1302};
use crate::{bus::RegisterBus, rw::RegisterAccess, Error};

/// Command byte for scratch byte `offset`, or `None` past the RAM window.
pub fn ram_address(offset: u8) -> Option<u8> {
  let addr = u16::from(RAM_START) + 2 * u16::from(offset);
  if addr <= u16::from(RAM_END) {
    Some(addr as u8)
  } else {
    None
  }
}

impl<B, E> Ds1302<B>
where
  B: RegisterBus<Error = E>,
{
  /// Store one byte. An offset outside the RAM window fails with no bus
  /// traffic.
  pub fn set_memory(&mut self, offset: u8, value: u8) -> Result<(), Error<E>> {
    let addr = checked_address(offset)?;
    self.bus.write_u8(addr, value)
  }

  pub fn get_memory(&mut self, offset: u8) -> Result<u8, Error<E>> {
    let addr = checked_address(offset)?;
    self.bus.read_u8(addr)
  }

  /// Read the whole scratch RAM in one burst.
  pub fn read_ram(&mut self) -> Result<[u8; RAM_LEN], Error<E>> {
    let mut buf = [0u8; RAM_LEN];
    self.bus.read_bytes(Reg::RamBurst, &mut buf)?;
    Ok(buf)
  }

  /// Write the whole scratch RAM in one burst.
  pub fn write_ram(&mut self, data: &[u8; RAM_LEN]) -> Result<(), Error<E>> {
    self.bus.write_bytes(Reg::RamBurst, data)
  }
}

fn checked_address<E>(offset: u8) -> Result<u8, Error<E>> {
  ram_address(offset).ok_or_else(|| {
    #[cfg(feature = "defmt")]
    defmt::warn!("ds1302: scratch offset {=u8} out of range", offset);
    Error::AddressOutOfRange(offset)
  })
}
