//! Tap and double-tap detection.

use embedded_hal::delay::DelayNs;

use super::{defs::*, motion::MotionParams, Qmi8658};
use crate::{bus::RegisterBus, rw::RegisterAccess, Error};

/// Tap detection tuning. Windows are in samples at the accelerometer rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TapConfig {
  pub priority: TapPriority,
  pub peak_window: u8,
  pub tap_window: u16,
  pub dtap_window: u16,
  pub alpha: u8,
  pub gamma: u8,
  pub peak_mag_thr: u16,
  pub udm_thr: u16,
}

impl Default for TapConfig {
  /// 40 ms peak window, 100 ms tap window and 300 ms double-tap window at
  /// 2 ms per sample; alpha 0.0625, gamma 0.25, peak 0.8 g, UDM 0.4 g.
  fn default() -> Self {
    Self {
      priority: TapPriority::XYZ,
      peak_window: 20,
      tap_window: 50,
      dtap_window: 150,
      alpha: 8,
      gamma: 32,
      peak_mag_thr: 80,
      udm_thr: 400,
    }
  }
}

impl TapConfig {
  pub fn groups(&self) -> [MotionParams; 2] {
    [
      MotionParams::TapFirst {
        priority: self.priority,
        peak_window: self.peak_window,
        tap_window: self.tap_window,
        dtap_window: self.dtap_window,
      },
      MotionParams::TapSecond {
        alpha: self.alpha,
        gamma: self.gamma,
        peak_mag_thr: self.peak_mag_thr,
        udm_thr: self.udm_thr,
      },
    ]
  }
}

/// Axis order used to resolve simultaneous taps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TapPriority {
  XYZ = 0,
  XZY = 1,
  YXZ = 2,
  YZX = 3,
  ZXY = 4,
  ZYX = 5,
}

impl From<TapPriority> for u8 {
  fn from(v: TapPriority) -> Self {
    v as u8
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TapAxis {
  X,
  Y,
  Z,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TapKind {
  Single,
  Double,
}

/// TAP_STATUS.
///
/// ```text
/// 7 TapPolarity | 6 - | 5:4 TapAxis | 3:2 - | 1:0 TapNum
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TapStatus {
  /// `None` when no tap has been detected.
  pub kind: Option<TapKind>,
  pub axis: Option<TapAxis>,
  /// Tap was along the negative direction of `axis`.
  pub negative: bool,
}

impl From<u8> for TapStatus {
  fn from(v: u8) -> Self {
    let kind = match v & 0x03 {
      0b01 => Some(TapKind::Single),
      0b10 => Some(TapKind::Double),
      _ => None,
    };
    let axis = match (v >> 4) & 0x03 {
      0b01 => Some(TapAxis::X),
      0b10 => Some(TapAxis::Y),
      0b11 => Some(TapAxis::Z),
      _ => None,
    };
    Self { kind, axis, negative: v & 0x80 != 0 }
  }
}

impl<B, D, E> Qmi8658<B, D>
where
  B: RegisterBus<Error = E>,
  D: DelayNs,
{
  /// Send both tap parameter groups. Does not touch CTRL8.
  pub fn configure_tap(&mut self, cfg: TapConfig) -> Result<(), Error<E>> {
    for group in cfg.groups() {
      self.apply_motion_params(group)?;
    }
    Ok(())
  }

  pub fn read_tap_status(&mut self) -> Result<TapStatus, Error<E>> {
    Ok(self.bus.read_u8(Reg::TapStatus)?.into())
  }
}
