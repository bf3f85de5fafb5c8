#![allow(dead_code)]

/// Seven-bit address with SA0 high.
pub const ADDR_PRIMARY: u8 = 0x6B;
/// Seven-bit address with SA0 low.
pub const ADDR_SECONDARY: u8 = 0x6A;

pub(crate) const WHO_AM_I_VALUE: u8 = 0x05;
pub(crate) const SOFT_RESET: u8 = 0xB0;
/// dQY_L holds this once the reset sequence has completed.
pub(crate) const RESET_DONE: u8 = 0x80;
pub(crate) const RESET_DELAY_MS: u32 = 15;

/// Polls of STATUSINT before a command is declared dead.
pub(crate) const CMD_POLL_RETRIES: u32 = 50;
pub(crate) const CMD_POLL_INTERVAL_MS: u32 = 1;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reg {
  WhoAmI = 0x00,
  Revision = 0x01,
  Ctrl1 = 0x02,
  Ctrl2 = 0x03,
  Ctrl3 = 0x04,
  Ctrl4 = 0x05,
  Ctrl5 = 0x06,
  Ctrl6 = 0x07,
  Ctrl7 = 0x08,
  Ctrl8 = 0x09,
  Ctrl9 = 0x0A,
  Cal1L = 0x0B,
  Cal1H = 0x0C,
  Cal2L = 0x0D,
  Cal2H = 0x0E,
  Cal3L = 0x0F,
  Cal3H = 0x10,
  Cal4L = 0x11,
  Cal4H = 0x12,
  FifoWtmTh = 0x13,
  FifoCtrl = 0x14,
  FifoSmplCnt = 0x15,
  FifoStatus = 0x16,
  FifoData = 0x17,
  StatusInt = 0x2D,
  Status0 = 0x2E,
  Status1 = 0x2F,
  TimestampL = 0x30,
  TimestampM = 0x31,
  TimestampH = 0x32,
  TempL = 0x33,
  TempH = 0x34,
  AxL = 0x35,
  GxL = 0x3B,
  CodStatus = 0x46,
  DqwL = 0x49,
  DqyL = 0x4D,
  DvxL = 0x51,
  TapStatus = 0x59,
  StepCntLow = 0x5A,
  StepCntMid = 0x5B,
  StepCntHigh = 0x5C,
  Reset = 0x60,
}

impl From<Reg> for u8 {
  fn from(r: Reg) -> Self {
    r as u8
  }
}

/// CTRL9 command codes.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
  /// Clears CmdDone after a command completed.
  Ack = 0x00,
  WriteWomSetting = 0x08,
  ConfigureTap = 0x0C,
  ConfigurePedometer = 0x0D,
  ConfigureMotion = 0x0E,
  ResetPedometer = 0x0F,
}

impl From<Command> for u8 {
  fn from(c: Command) -> Self {
    c as u8
  }
}

/// CTRL1 bits.
///
/// ```text
/// 7 SIM | 6 ADDR_AI | 5 BE | 4 INT2_EN | 3 INT1_EN | 2 FIFO_INT_SEL | 1 - | 0 SensorDisable
/// ```
pub(crate) mod ctrl1 {
  pub const ADDR_AI: u8 = 0x40;
  pub const INT2_EN: u8 = 0x10;
  pub const INT1_EN: u8 = 0x08;
  /// Both interrupt lines driven push-pull.
  pub const INT_EN: u8 = INT1_EN | INT2_EN;
}

/// CTRL7 bits. Writing zero disables every sensor and the motion engine.
pub(crate) mod ctrl7 {
  pub const DISABLE_ALL: u8 = 0x00;
  pub const ACCEL_EN: u8 = 0x01;
  pub const GYRO_EN: u8 = 0x02;
}

/// CTRL8 bits.
///
/// ```text
/// 7 CTRL9_HandShake_Type | 6 ACTIVITY_INT_SEL | 5 - | 4 Pedo_EN
/// 3 SigMotion_EN | 2 NoMotion_EN | 1 AnyMotion_EN | 0 Tap_EN
/// ```
pub(crate) mod ctrl8 {
  /// CmdDone reported through STATUSINT bit 7 instead of STATUS1 bit 0.
  pub const HANDSHAKE_STATUSINT: u8 = 0x80;
  /// Motion engine events go to INT1 (INT2 otherwise).
  pub const ROUTE_INT1: u8 = 0x40;
  pub const PEDOMETER_EN: u8 = 0x10;
  pub const SIG_MOTION_EN: u8 = 0x08;
  pub const NO_MOTION_EN: u8 = 0x04;
  pub const ANY_MOTION_EN: u8 = 0x02;
  pub const TAP_EN: u8 = 0x01;
  pub const EVENTS: u8 = PEDOMETER_EN | SIG_MOTION_EN | NO_MOTION_EN | ANY_MOTION_EN | TAP_EN;
}

/// STATUSINT bits.
pub(crate) mod status_int {
  pub const CMD_DONE: u8 = 0x80;
}

/// STATUS1 bits.
///
/// ```text
/// 7 SigMotion | 6 NoMotion | 5 AnyMotion | 4 Pedometer | 3 - | 2 WoM | 1 TAP | 0 CmdDone
/// ```
pub(crate) mod status1 {
  pub const SIG_MOTION: u8 = 0x80;
  pub const NO_MOTION: u8 = 0x40;
  pub const ANY_MOTION: u8 = 0x20;
  pub const PEDOMETER: u8 = 0x10;
  pub const WOM: u8 = 0x04;
  pub const TAP: u8 = 0x02;
  pub const CMD_DONE: u8 = 0x01;
}
