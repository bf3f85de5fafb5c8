use embedded_hal::delay::DelayNs;

use super::{defs::*, motion::MotionParams, Qmi8658};
use crate::{bus::RegisterBus, rw::RegisterAccess, Error};

/// Pedometer tuning, sent as two parameter groups.
///
/// Times are in accelerometer samples, amplitudes in mg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PedometerConfig {
  pub sample_count: u16,
  pub fix_peak2peak: u16,
  pub fix_peak: u16,
  pub time_up: u16,
  pub time_low: u8,
  pub time_cnt_entry: u8,
  pub fix_precision: u8,
  pub sig_count: u8,
}

impl Default for PedometerConfig {
  fn default() -> Self {
    Self {
      sample_count: 50,
      fix_peak2peak: 0x00CC,
      fix_peak: 0x0066,
      time_up: 200,
      time_low: 20,
      time_cnt_entry: 10,
      fix_precision: 0,
      sig_count: 4,
    }
  }
}

impl PedometerConfig {
  pub fn groups(&self) -> [MotionParams; 2] {
    [
      MotionParams::PedometerFirst {
        sample_count: self.sample_count,
        fix_peak2peak: self.fix_peak2peak,
        fix_peak: self.fix_peak,
      },
      MotionParams::PedometerSecond {
        time_up: self.time_up,
        time_low: self.time_low,
        time_cnt_entry: self.time_cnt_entry,
        fix_precision: self.fix_precision,
        sig_count: self.sig_count,
      },
    ]
  }
}

/// Combine STEP_CNT low, mid and high into the 24-bit count.
pub fn step_count_from_bytes(b: [u8; 3]) -> u32 {
  u32::from(b[0]) | u32::from(b[1]) << 8 | u32::from(b[2]) << 16
}

impl<B, D, E> Qmi8658<B, D>
where
  B: RegisterBus<Error = E>,
  D: DelayNs,
{
  /// Send both pedometer parameter groups. Does not touch CTRL8.
  pub fn configure_pedometer(&mut self, cfg: PedometerConfig) -> Result<(), Error<E>> {
    for group in cfg.groups() {
      self.apply_motion_params(group)?;
    }
    #[cfg(feature = "defmt")]
    defmt::debug!("qmi8658: pedometer configured");
    Ok(())
  }

  /// Read the step counter.
  ///
  /// The three bytes are read one by one and the hardware does not latch
  /// them, so a step landing mid-read can tear the value.
  pub fn read_step_count(&mut self) -> Result<u32, Error<E>> {
    let low = self.bus.read_u8(Reg::StepCntLow)?;
    let mid = self.bus.read_u8(Reg::StepCntMid)?;
    let high = self.bus.read_u8(Reg::StepCntHigh)?;
    Ok(step_count_from_bytes([low, mid, high]))
  }

  pub fn reset_step_count(&mut self) -> Result<(), Error<E>> {
    self.send_command(Command::ResetPedometer)
  }
}
