//! Accelerometer configuration and data reading.
//!
//! ```no_run
//! # fn example<B: wristcore::bus::RegisterBus, D: embedded_hal::delay::DelayNs>(imu: &mut wristcore::Qmi8658<B, D>) {
//! use wristcore::imu::accel::{AccelConfig, AccelOdr, AccelRange};
//!
//! let config = AccelConfig { odr: AccelOdr::Hz125, range: AccelRange::G4, ..Default::default() };
//! imu.set_accel_conf(config).ok();
//! let g = imu.get_accel_data().ok();
//! # }
//! ```

use embedded_hal::delay::DelayNs;
use micromath::vector::Vector3d;

use super::{defs::*, Qmi8658};
use crate::{bus::RegisterBus, rw::RegisterAccess, Error};

impl<B, D, E> Qmi8658<B, D>
where
  B: RegisterBus<Error = E>,
  D: DelayNs,
{
  pub fn get_accel_conf(&mut self) -> Result<AccelConfig, Error<E>> {
    self.bus.read(Reg::Ctrl2)
  }

  pub fn set_accel_conf(&mut self, cfg: AccelConfig) -> Result<(), Error<E>> {
    self.bus.write(Reg::Ctrl2, cfg)?;
    self.accel_range = cfg.range;
    Ok(())
  }

  /// Read raw accelerometer samples (16-bit two's complement, little endian).
  ///
  /// Needs address auto-increment, which bring-up enables in CTRL1.
  pub fn get_raw_accel_data(&mut self) -> Result<Vector3d<i16>, Error<E>> {
    let mut b = [0u8; 6];
    self.bus.read_bytes(Reg::AxL, &mut b)?;
    Ok(Vector3d {
      x: i16::from_le_bytes([b[0], b[1]]),
      y: i16::from_le_bytes([b[2], b[3]]),
      z: i16::from_le_bytes([b[4], b[5]]),
    })
  }

  /// Read accelerometer data scaled to g using the last programmed range.
  pub fn get_accel_data(&mut self) -> Result<Vector3d<f32>, Error<E>> {
    let raw = self.get_raw_accel_data()?;
    let k = self.accel_range.multiplier();
    Ok(Vector3d { x: raw.x as f32 * k, y: raw.y as f32 * k, z: raw.z as f32 * k })
  }
}

/// CTRL2: accelerometer self-test, full scale and output data rate.
///
/// ```text
/// 7 aST | 6:4 aFS | 3:0 aODR
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 1)]
pub struct AccelConfig {
  #[bits(4)]
  pub odr: AccelOdr,
  /// Full scale; reserved codes 4..=7 do not decode.
  #[bits(3)]
  pub range: AccelRange,
  #[bits(1)]
  pub self_test: bool,
}

impl AccelConfig {
  pub const fn new(odr: AccelOdr, range: AccelRange) -> Self {
    Self { odr, range, self_test: false }
  }
}

impl Default for AccelConfig {
  /// 56 Hz at ±2 g, the rate the pedometer is tuned for.
  fn default() -> Self {
    Self::new(AccelOdr::Hz56, AccelRange::G2)
  }
}

/// Accelerometer output data rate in accel-only mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelOdr {
  Hz8000 = 0x00,
  Hz4000 = 0x01,
  Hz2000 = 0x02,
  Hz1000 = 0x03,
  Hz500 = 0x04,
  Hz250 = 0x05,
  Hz125 = 0x06,
  Hz56 = 0x07,
  Hz31 = 0x08,
  /// Low-power rates, used with wake-on-motion.
  LowPower128 = 0x0C,
  LowPower21 = 0x0D,
  LowPower11 = 0x0E,
  LowPower3 = 0x0F,
}

impl From<AccelOdr> for u8 {
  fn from(v: AccelOdr) -> Self {
    v as u8
  }
}

impl TryFrom<u8> for AccelOdr {
  type Error = ();

  fn try_from(v: u8) -> Result<Self, ()> {
    Ok(match v {
      0x00 => AccelOdr::Hz8000,
      0x01 => AccelOdr::Hz4000,
      0x02 => AccelOdr::Hz2000,
      0x03 => AccelOdr::Hz1000,
      0x04 => AccelOdr::Hz500,
      0x05 => AccelOdr::Hz250,
      0x06 => AccelOdr::Hz125,
      0x07 => AccelOdr::Hz56,
      0x08 => AccelOdr::Hz31,
      0x0C => AccelOdr::LowPower128,
      0x0D => AccelOdr::LowPower21,
      0x0E => AccelOdr::LowPower11,
      0x0F => AccelOdr::LowPower3,
      _ => return Err(()),
    })
  }
}

/// Accelerometer full-scale range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelRange {
  /// ±2g range
  G2 = 0x00,
  /// ±4g range
  G4 = 0x01,
  /// ±8g range
  G8 = 0x02,
  /// ±16g range
  G16 = 0x03,
}

impl AccelRange {
  /// g per LSB.
  pub(crate) fn multiplier(self) -> f32 {
    match self {
      AccelRange::G2 => 1. / 16384.,
      AccelRange::G4 => 1. / 8192.,
      AccelRange::G8 => 1. / 4096.,
      AccelRange::G16 => 1. / 2048.,
    }
  }
}

impl From<AccelRange> for u8 {
  fn from(v: AccelRange) -> Self {
    v as u8
  }
}

impl TryFrom<u8> for AccelRange {
  type Error = ();

  fn try_from(v: u8) -> Result<Self, ()> {
    Ok(match v {
      0x00 => AccelRange::G2,
      0x01 => AccelRange::G4,
      0x02 => AccelRange::G8,
      0x03 => AccelRange::G16,
      _ => return Err(()),
    })
  }
}
