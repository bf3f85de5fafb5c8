//! Calendar record, BCD codec and validity rules.

use super::defs::*;

/// Latest year whose century fits the one-byte scratch slot.
pub const MAX_YEAR: u16 = u8::MAX as u16 * 100 + 99;

/// Packed BCD for 0..=99.
pub const fn dec_to_bcd(dec: u8) -> u8 {
  ((dec / 10) << 4) | (dec % 10)
}

pub const fn bcd_to_dec(bcd: u8) -> u8 {
  (bcd >> 4) * 10 + (bcd & 0x0F)
}

pub const fn is_leap_year(year: u16) -> bool {
  (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Days in `month` (1..=12) of `year`. Zero for an invalid month.
pub const fn days_in_month(year: u16, month: u8) -> u8 {
  match month {
    2 if is_leap_year(year) => 29,
    2 => 28,
    4 | 6 | 9 | 11 => 30,
    1..=12 => 31,
    _ => 0,
  }
}

/// Day of week, Sunday = 0.
pub const fn day_of_week(year: u16, month: u8, day: u8) -> u8 {
  const T: [u16; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
  if month < 1 || month > 12 {
    return 0;
  }
  let y = if month < 3 { year.saturating_sub(1) } else { year };
  ((y + y / 4 - y / 100 + y / 400 + T[(month - 1) as usize] + day as u16) % 7) as u8
}

/// A wall-clock instant, 24-hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
  pub year: u16,
  /// 1..=12
  pub month: u8,
  /// 1..=31
  pub day: u8,
  pub hour: u8,
  pub minute: u8,
  pub second: u8,
  /// Day of week, Sunday = 0.
  pub dotw: u8,
}

impl DateTime {
  /// Build a record, deriving the day of week.
  pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
    Self { year, month, day, hour, minute, second, dotw: day_of_week(year, month, day) }
  }

  /// All fields in range, day checked against month length and leap years.
  pub const fn is_valid(&self) -> bool {
    self.year <= MAX_YEAR
      && self.month >= 1
      && self.month <= 12
      && self.day >= 1
      && self.day <= days_in_month(self.year, self.month)
      && self.hour < 24
      && self.minute < 60
      && self.second < 60
  }

  /// Clock burst payload. The device keeps two year digits and a weekday
  /// of 1..=7; the trailing byte clears write protect.
  pub(crate) fn to_burst(&self) -> [u8; CLOCK_BURST_LEN] {
    [
      dec_to_bcd(self.second) & SECONDS_MASK,
      dec_to_bcd(self.minute),
      dec_to_bcd(self.hour) & hours::MASK_24H,
      dec_to_bcd(self.day),
      dec_to_bcd(self.month),
      dec_to_bcd(self.dotw % 7 + 1),
      dec_to_bcd((self.year % 100) as u8),
      0,
    ]
  }

  /// Decode a clock burst, placing the two-digit year in `century`.
  pub(crate) fn from_burst(b: &[u8; CLOCK_BURST_LEN], century: u8) -> Self {
    Self {
      second: bcd_to_dec(b[0] & SECONDS_MASK),
      minute: bcd_to_dec(b[1] & MINUTES_MASK),
      hour: decode_hours(b[2]),
      day: bcd_to_dec(b[3] & DATE_MASK),
      month: bcd_to_dec(b[4] & MONTH_MASK),
      dotw: (b[5] & WEEKDAY_MASK).saturating_sub(1),
      year: u16::from(century) * 100 + u16::from(bcd_to_dec(b[6])),
    }
  }
}

/// Hours register to 0..=23, whichever mode the clock runs in.
fn decode_hours(raw: u8) -> u8 {
  if raw & hours::MODE_12H == 0 {
    return bcd_to_dec(raw & hours::MASK_24H);
  }
  let h = bcd_to_dec(raw & hours::MASK_12H) % 12;
  if raw & hours::PM != 0 {
    h + 12
  } else {
    h
  }
}
