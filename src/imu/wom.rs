use embedded_hal::delay::DelayNs;

use super::{motion::MotionParams, Qmi8658};
use crate::{bus::RegisterBus, Error};

/// Wake-on-motion setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WomConfig {
  /// Any-axis threshold in mg.
  pub threshold_mg: u8,
  pub interrupt: WomInterrupt,
  /// Samples to ignore after arming, 0..=63.
  pub blanking: u8,
}

impl Default for WomConfig {
  fn default() -> Self {
    Self { threshold_mg: 128, interrupt: WomInterrupt::Int1Low, blanking: 0x01 }
  }
}

impl From<WomConfig> for MotionParams {
  fn from(c: WomConfig) -> Self {
    MotionParams::WakeOnMotion { threshold_mg: c.threshold_mg, interrupt: c.interrupt, blanking: c.blanking }
  }
}

/// Interrupt line and its idle level; the line toggles on each wake event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WomInterrupt {
  Int1Low = 0b00,
  Int1High = 0b01,
  Int2Low = 0b10,
  Int2High = 0b11,
}

impl From<WomInterrupt> for u8 {
  fn from(v: WomInterrupt) -> Self {
    v as u8
  }
}

impl<B, D, E> Qmi8658<B, D>
where
  B: RegisterBus<Error = E>,
  D: DelayNs,
{
  pub fn configure_wom(&mut self, cfg: WomConfig) -> Result<(), Error<E>> {
    self.apply_motion_params(cfg.into())
  }

  /// Zero threshold turns wake-on-motion off.
  pub fn disable_wom(&mut self) -> Result<(), Error<E>> {
    let off = MotionParams::WakeOnMotion { threshold_mg: 0, interrupt: WomInterrupt::Int1Low, blanking: 0 };
    self.apply_motion_params(off)
  }
}
