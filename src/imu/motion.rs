//! Motion engine parameter groups and the CTRL9 command handshake.
//!
//! The engine takes its parameters through eight calibration bytes,
//! CAL1_L..CAL4_H, whose meaning depends on the command that follows them.
//! Each group is a variant of [`MotionParams`] with named fields; the bytes
//! are only laid out in [`MotionParams::slots`], right before the write.
//!
//! Handshake for one group:
//!
//! 1. write CAL1_L..CAL4_H
//! 2. write the command to CTRL9
//! 3. poll STATUSINT until CmdDone (bit 7) is set, bounded
//! 4. write [`Command::Ack`] to CTRL9, which clears CmdDone
//!
//! The slots may only be reused once step 4 has happened.

use embedded_hal::delay::DelayNs;

use super::{defs::*, Qmi8658};
use crate::{bus::RegisterBus, rw::RegisterAccess, Error};

const SLOT_REGS: [Reg; 8] =
  [Reg::Cal1L, Reg::Cal1H, Reg::Cal2L, Reg::Cal2H, Reg::Cal3L, Reg::Cal3H, Reg::Cal4L, Reg::Cal4H];

/// CAL4_H selector for the first/second parameter set of a two-part command.
const FIRST_GROUP: u8 = 0x01;
const SECOND_GROUP: u8 = 0x02;

/// One parameter group of the motion engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionParams {
  PedometerFirst {
    /// Samples per step detection batch.
    sample_count: u16,
    /// Minimum peak-to-peak amplitude, mg.
    fix_peak2peak: u16,
    /// Minimum peak amplitude, mg.
    fix_peak: u16,
  },
  PedometerSecond {
    /// Longest time between steps, samples.
    time_up: u16,
    /// Shortest time between steps, samples.
    time_low: u8,
    /// Steps before counting starts.
    time_cnt_entry: u8,
    fix_precision: u8,
    /// Steps per interrupt.
    sig_count: u8,
  },
  TapFirst {
    priority: super::tap::TapPriority,
    /// Peak detection window, samples.
    peak_window: u8,
    /// Single tap quiet window, samples.
    tap_window: u16,
    /// Double tap window, samples.
    dtap_window: u16,
  },
  TapSecond {
    /// Linear acceleration filter coefficient, 1/128 units.
    alpha: u8,
    /// Magnitude filter coefficient, 1/128 units.
    gamma: u8,
    /// Peak magnitude threshold, 1/100 g.
    peak_mag_thr: u16,
    /// Undefined motion threshold, mg.
    udm_thr: u16,
  },
  WakeOnMotion {
    /// Threshold in mg. Zero disables wake-on-motion.
    threshold_mg: u8,
    interrupt: super::wom::WomInterrupt,
    /// Samples ignored after enabling, 6 bits.
    blanking: u8,
  },
}

impl MotionParams {
  /// Bytes for CAL1_L, CAL1_H, CAL2_L, CAL2_H, CAL3_L, CAL3_H, CAL4_L, CAL4_H.
  pub fn slots(&self) -> [u8; 8] {
    match *self {
      MotionParams::PedometerFirst { sample_count, fix_peak2peak, fix_peak } => {
        let [s1l, s1h] = sample_count.to_le_bytes();
        let [s2l, s2h] = fix_peak2peak.to_le_bytes();
        let [s3l, s3h] = fix_peak.to_le_bytes();
        [s1l, s1h, s2l, s2h, s3l, s3h, 0, FIRST_GROUP]
      }
      MotionParams::PedometerSecond { time_up, time_low, time_cnt_entry, fix_precision, sig_count } => {
        let [s1l, s1h] = time_up.to_le_bytes();
        [s1l, s1h, time_low, time_cnt_entry, fix_precision, sig_count, 0, SECOND_GROUP]
      }
      MotionParams::TapFirst { priority, peak_window, tap_window, dtap_window } => {
        let [s2l, s2h] = tap_window.to_le_bytes();
        let [s3l, s3h] = dtap_window.to_le_bytes();
        [peak_window, priority.into(), s2l, s2h, s3l, s3h, 0, FIRST_GROUP]
      }
      MotionParams::TapSecond { alpha, gamma, peak_mag_thr, udm_thr } => {
        let [s2l, s2h] = peak_mag_thr.to_le_bytes();
        let [s3l, s3h] = udm_thr.to_le_bytes();
        [alpha, gamma, s2l, s2h, s3l, s3h, 0, SECOND_GROUP]
      }
      MotionParams::WakeOnMotion { threshold_mg, interrupt, blanking } => {
        [threshold_mg, (u8::from(interrupt) << 6) | (blanking & 0x3F), 0, 0, 0, 0, 0, 0]
      }
    }
  }

  /// The CTRL9 command that consumes this group.
  pub fn command(&self) -> Command {
    match self {
      MotionParams::PedometerFirst { .. } | MotionParams::PedometerSecond { .. } => Command::ConfigurePedometer,
      MotionParams::TapFirst { .. } | MotionParams::TapSecond { .. } => Command::ConfigureTap,
      MotionParams::WakeOnMotion { .. } => Command::WriteWomSetting,
    }
  }
}

impl<B, D, E> Qmi8658<B, D>
where
  B: RegisterBus<Error = E>,
  D: DelayNs,
{
  /// Program one parameter group and run its command to completion.
  pub fn apply_motion_params(&mut self, params: MotionParams) -> Result<(), Error<E>> {
    for (reg, value) in SLOT_REGS.iter().zip(params.slots()) {
      self.bus.write_u8(*reg, value)?;
    }
    self.send_command(params.command())
  }

  /// Write `cmd` to CTRL9, wait for CmdDone and acknowledge it.
  ///
  /// A command that never completes yields [`Error::CommandTimeout`] and is
  /// not acknowledged.
  pub fn send_command(&mut self, cmd: Command) -> Result<(), Error<E>> {
    self.bus.write_u8(Reg::Ctrl9, cmd.into())?;
    self.wait_command_done(cmd)?;
    self.bus.write_u8(Reg::Ctrl9, Command::Ack.into())
  }

  fn wait_command_done(&mut self, cmd: Command) -> Result<(), Error<E>> {
    let mut retries = 0;
    while self.bus.read_u8(Reg::StatusInt)? & status_int::CMD_DONE == 0 {
      retries += 1;
      if retries >= CMD_POLL_RETRIES {
        #[cfg(feature = "defmt")]
        defmt::warn!("qmi8658: command {} timed out", cmd);
        return Err(Error::CommandTimeout(cmd.into()));
      }
      self.delay.delay_ms(CMD_POLL_INTERVAL_MS);
    }
    Ok(())
  }
}
