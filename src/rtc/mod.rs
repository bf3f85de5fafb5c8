//! DS1302 real-time clock.
//!
//! The clock keeps seconds through year in BCD, two digits of year. The
//! century is kept in scratch RAM slot [`CENTURY_SLOT`] so full years
//! survive power loss along with the time.
//!
//! ```no_run
//! # fn example<B: wristcore::bus::RegisterBus>(bus: B) -> Result<(), wristcore::Error<B::Error>> {
//! use wristcore::rtc::{DateTime, Ds1302};
//!
//! let mut rtc = Ds1302::new(bus);
//! let status = rtc.init(&DateTime::new(2024, 12, 3, 12, 0, 0))?;
//! let now = rtc.get_datetime()?;
//! # Ok(())
//! # }
//! ```

use crate::{bus::RegisterBus, rw::RegisterAccess, Error};

pub mod datetime;
mod defs;
pub mod ram;

pub use datetime::*;
pub use defs::RAM_LEN;
pub use ram::ram_address;

use defs::*;

/// Scratch RAM byte holding the century.
pub const CENTURY_SLOT: u8 = 0;

/// Which recoveries [`Ds1302::init`] had to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RtcStatus {
  pub write_protect_cleared: bool,
  /// The oscillator was stopped; the backup time was loaded and started.
  pub was_halted: bool,
  /// The stored date was invalid and has been replaced by the backup.
  pub restored_backup: bool,
}

/// DS1302 driver over any register transport, normally a
/// [`ThreeWire`](crate::bus::ThreeWire).
pub struct Ds1302<B> {
  bus: B,
}

impl<B, E> Ds1302<B>
where
  B: RegisterBus<Error = E>,
{
  pub fn new(bus: B) -> Self {
    Self { bus }
  }

  pub fn release(self) -> B {
    self.bus
  }

  /// Make the clock writable and running with a valid date.
  ///
  /// `backup` is loaded when the clock was halted or holds an invalid date.
  /// An invalid `backup` is rejected before any bus traffic.
  pub fn init(&mut self, backup: &DateTime) -> Result<RtcStatus, Error<E>> {
    if !backup.is_valid() {
      return Err(Error::InvalidConfig);
    }
    let mut status = RtcStatus::default();

    if self.is_write_protected()? {
      self.set_write_protected(false)?;
      status.write_protect_cleared = true;
    }

    if !self.is_running()? {
      #[cfg(feature = "defmt")]
      defmt::info!("ds1302: clock halted, loading backup time");
      self.set_datetime(backup)?;
      self.set_running(true)?;
      status.was_halted = true;
    }

    if !self.get_datetime()?.is_valid() {
      #[cfg(feature = "defmt")]
      defmt::warn!("ds1302: stored date invalid, loading backup time");
      self.set_datetime(backup)?;
      status.restored_backup = true;
    }

    Ok(status)
  }

  /// Read all time fields in one burst.
  pub fn get_datetime(&mut self) -> Result<DateTime, Error<E>> {
    let mut b = [0u8; CLOCK_BURST_LEN];
    self.bus.read_bytes(Reg::ClockBurst, &mut b)?;
    let century = self.get_memory(CENTURY_SLOT)?;
    Ok(DateTime::from_burst(&b, century))
  }

  /// Write all time fields in one burst and start the clock.
  ///
  /// Clears write protect as a side effect of the burst.
  pub fn set_datetime(&mut self, dt: &DateTime) -> Result<(), Error<E>> {
    if !dt.is_valid() {
      return Err(Error::InvalidConfig);
    }
    self.bus.write_bytes(Reg::ClockBurst, &dt.to_burst())?;
    self.set_memory(CENTURY_SLOT, (dt.year / 100) as u8)
  }

  pub fn is_datetime_valid(&mut self) -> Result<bool, Error<E>> {
    Ok(self.get_datetime()?.is_valid())
  }

  pub fn is_write_protected(&mut self) -> Result<bool, Error<E>> {
    Ok(self.bus.read_u8(Reg::WriteProtect)? & WRITE_PROTECT != 0)
  }

  /// The other bits of the register must stay zero.
  pub fn set_write_protected(&mut self, on: bool) -> Result<(), Error<E>> {
    self.bus.write_u8(Reg::WriteProtect, if on { WRITE_PROTECT } else { 0 })
  }

  pub fn is_running(&mut self) -> Result<bool, Error<E>> {
    Ok(self.bus.read_u8(Reg::Seconds)? & CLOCK_HALT == 0)
  }

  /// Start or stop the oscillator, keeping the seconds count.
  pub fn set_running(&mut self, on: bool) -> Result<(), Error<E>> {
    self.bus.set_bits(Reg::Seconds, CLOCK_HALT, !on)?;
    Ok(())
  }
}
