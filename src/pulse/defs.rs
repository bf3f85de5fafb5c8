#![allow(dead_code)]

pub const ADDR: u8 = 0x57;
pub(crate) const PART_ID_VALUE: u8 = 0x15;

/// Depth of the on-chip sample FIFO; both pointers count modulo this.
pub(crate) const FIFO_DEPTH: u8 = 32;
pub(crate) const FIFO_PTR_MASK: u8 = FIFO_DEPTH - 1;
/// Bytes per LED per sample.
pub(crate) const BYTES_PER_LED: usize = 3;
/// ADC results are 18 bits, left-justified per pulse width.
pub(crate) const SAMPLE_MASK: u32 = 0x3FFFF;

/// Largest burst read, in bytes: a full FIFO of two-LED samples.
pub(crate) const SCRATCH_LEN: usize = FIFO_DEPTH as usize * 2 * BYTES_PER_LED;

pub(crate) const TEMP_POLL_RETRIES: u32 = 100;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reg {
  IrqStatus1 = 0x00,
  IrqStatus2 = 0x01,
  IrqEnable1 = 0x02,
  IrqEnable2 = 0x03,
  FifoWrPtr = 0x04,
  OverflowCounter = 0x05,
  FifoRdPtr = 0x06,
  FifoData = 0x07,
  FifoConfig = 0x08,
  ModeConfig = 0x09,
  Spo2Config = 0x0A,
  Led1PulseAmp = 0x0C,
  Led2PulseAmp = 0x0D,
  MultiLedCtrl1 = 0x11,
  MultiLedCtrl2 = 0x12,
  DieTempInt = 0x1F,
  DieTempFrac = 0x20,
  DieTempConfig = 0x21,
  RevisionId = 0xFE,
  PartId = 0xFF,
}

impl From<Reg> for u8 {
  fn from(r: Reg) -> Self {
    r as u8
  }
}

/// MODE_CONFIG bits other than the mode field.
pub(crate) mod mode_bits {
  pub const SHUTDOWN: u8 = 0x80;
  pub const RESET: u8 = 0x40;
  pub const MODE_MASK: u8 = 0x07;
}

pub(crate) mod temp {
  /// Starts one conversion; self-clearing.
  pub const TEMP_EN: u8 = 0x01;
}
