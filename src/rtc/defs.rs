#![allow(dead_code)]

/// Command bytes, write form. The bus sets bit 0 for reads.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reg {
  Seconds = 0x80,
  Minutes = 0x82,
  Hours = 0x84,
  Date = 0x86,
  Month = 0x88,
  Weekday = 0x8A,
  Year = 0x8C,
  WriteProtect = 0x8E,
  TrickleCharge = 0x90,
  ClockBurst = 0xBE,
  RamBurst = 0xFE,
}

impl From<Reg> for u8 {
  fn from(r: Reg) -> Self {
    r as u8
  }
}

/// Scratch RAM command window; byte `n` lives at `RAM_START + 2n`.
pub(crate) const RAM_START: u8 = 0xC0;
pub(crate) const RAM_END: u8 = 0xFC;
pub const RAM_LEN: usize = ((RAM_END - RAM_START) / 2 + 1) as usize;

/// Clock burst: seven time fields plus the write-protect register.
pub(crate) const CLOCK_BURST_LEN: usize = 8;

/// Seconds bit 7, set while the oscillator is stopped.
pub(crate) const CLOCK_HALT: u8 = 0x80;
/// Write-protect register bit 7.
pub(crate) const WRITE_PROTECT: u8 = 0x80;

/// Hours register.
///
/// ```text
/// 7 12/24 | 6 - | 5 AM/PM or 20h | 4 10h | 3:0 h
/// ```
pub(crate) mod hours {
  pub const MODE_12H: u8 = 0x80;
  pub const PM: u8 = 0x20;
  pub const MASK_12H: u8 = 0x1F;
  pub const MASK_24H: u8 = 0x3F;
}

pub(crate) const SECONDS_MASK: u8 = 0x7F;
pub(crate) const MINUTES_MASK: u8 = 0x7F;
pub(crate) const DATE_MASK: u8 = 0x3F;
pub(crate) const MONTH_MASK: u8 = 0x1F;
pub(crate) const WEEKDAY_MASK: u8 = 0x07;
