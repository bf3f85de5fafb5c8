//! FIFO, mode, SpO2 and LED configuration registers.

use crate::Error;

/// Full sensor configuration applied by [`Max30102::init`](super::Max30102::init).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseConfig {
  pub fifo: FifoConfig,
  pub mode: Mode,
  pub spo2: Spo2Config,
  /// LED1 (red) drive current.
  pub red_current: LedCurrent,
  /// LED2 (infrared) drive current.
  pub ir_current: LedCurrent,
  /// Multi-LED time slots 1..=4. Only read in [`Mode::MultiLed`].
  pub slots: [Slot; 4],
  /// Largest single burst read of FIFO_DATA, in bytes.
  pub burst_limit: usize,
}

impl Default for PulseConfig {
  fn default() -> Self {
    Self {
      fifo: FifoConfig::default(),
      mode: Mode::SpO2,
      spo2: Spo2Config::default(),
      red_current: LedCurrent::MA_7_6,
      ir_current: LedCurrent::MA_7_6,
      slots: [Slot::Red, Slot::Ir, Slot::None, Slot::None],
      burst_limit: 32,
    }
  }
}

impl PulseConfig {
  /// LEDs sampled per FIFO entry.
  pub fn active_leds(&self) -> usize {
    match self.mode {
      Mode::HeartRate => 1,
      Mode::SpO2 => 2,
      Mode::MultiLed => self.slots.iter().filter(|s| **s != Slot::None).count(),
    }
  }

  /// LED order of one FIFO entry.
  pub(crate) fn frame_layout(&self) -> [Slot; 4] {
    match self.mode {
      Mode::HeartRate => [Slot::Red, Slot::None, Slot::None, Slot::None],
      Mode::SpO2 => [Slot::Red, Slot::Ir, Slot::None, Slot::None],
      Mode::MultiLed => {
        let mut out = [Slot::None; 4];
        for (o, s) in out.iter_mut().zip(self.slots.iter().filter(|s| **s != Slot::None)) {
          *o = *s;
        }
        out
      }
    }
  }

  /// Reject layouts the drain cannot serve.
  pub(crate) fn validate<E>(&self) -> Result<(), Error<E>> {
    let leds = self.active_leds();
    // The FIFO holds at most two LED readings per sample.
    if leds == 0 || leds > 2 {
      return Err(Error::InvalidConfig);
    }
    let frame = leds * super::defs::BYTES_PER_LED;
    if self.burst_limit < frame || self.burst_limit > super::defs::SCRATCH_LEN {
      return Err(Error::InvalidConfig);
    }
    Ok(())
  }
}

/// FIFO_CONFIG.
///
/// ```text
/// 7:5 SMP_AVE | 4 FIFO_ROLLOVER_EN | 3:0 FIFO_A_FULL
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 1)]
pub struct FifoConfig {
  /// Free slots left when the almost-full interrupt fires, 0..=15.
  #[bits(4)]
  pub almost_full: u8,
  /// Overwrite the oldest sample when the FIFO is full.
  #[bits(1)]
  pub rollover: bool,
  #[bits(3)]
  pub sample_average: SampleAverage,
}

impl Default for FifoConfig {
  fn default() -> Self {
    Self { sample_average: SampleAverage::Avg8, rollover: true, almost_full: 0 }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleAverage {
  Avg1 = 0,
  Avg2 = 1,
  Avg4 = 2,
  Avg8 = 3,
  Avg16 = 4,
  /// Codes 5..=7 all average 32 samples.
  Avg32 = 5,
}

impl From<SampleAverage> for u8 {
  fn from(v: SampleAverage) -> Self {
    v as u8
  }
}

impl TryFrom<u8> for SampleAverage {
  type Error = ();

  fn try_from(v: u8) -> Result<Self, ()> {
    match v {
      0 => Ok(SampleAverage::Avg1),
      1 => Ok(SampleAverage::Avg2),
      2 => Ok(SampleAverage::Avg4),
      3 => Ok(SampleAverage::Avg8),
      4 => Ok(SampleAverage::Avg16),
      5..=7 => Ok(SampleAverage::Avg32),
      _ => Err(()),
    }
  }
}

/// MODE_CONFIG bits 2:0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
  /// Red only.
  HeartRate = 0x02,
  /// Red and infrared.
  SpO2 = 0x03,
  /// LEDs per [`PulseConfig::slots`].
  MultiLed = 0x07,
}

impl From<Mode> for u8 {
  fn from(v: Mode) -> Self {
    v as u8
  }
}

impl TryFrom<u8> for Mode {
  type Error = ();

  fn try_from(v: u8) -> Result<Self, ()> {
    match v & 0x07 {
      0x02 => Ok(Mode::HeartRate),
      0x03 => Ok(Mode::SpO2),
      0x07 => Ok(Mode::MultiLed),
      _ => Err(()),
    }
  }
}

/// SPO2_CONFIG.
///
/// ```text
/// 7 - | 6:5 SPO2_ADC_RGE | 4:2 SPO2_SR | 1:0 LED_PW
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 1)]
pub struct Spo2Config {
  #[bits(2)]
  pub pulse_width: PulseWidth,
  #[bits(3)]
  pub sample_rate: SampleRate,
  #[bits(2)]
  pub adc_range: AdcRange,
}

impl Default for Spo2Config {
  fn default() -> Self {
    Self { adc_range: AdcRange::Na4096, sample_rate: SampleRate::Hz400, pulse_width: PulseWidth::Us411 }
  }
}

/// ADC full scale, nA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcRange {
  Na2048 = 0,
  Na4096 = 1,
  Na8192 = 2,
  Na16384 = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleRate {
  Hz50 = 0,
  Hz100 = 1,
  Hz200 = 2,
  Hz400 = 3,
  Hz800 = 4,
  Hz1000 = 5,
  Hz1600 = 6,
  Hz3200 = 7,
}

/// LED pulse width; also sets ADC resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulseWidth {
  /// 15 bit
  Us69 = 0,
  /// 16 bit
  Us118 = 1,
  /// 17 bit
  Us215 = 2,
  /// 18 bit
  Us411 = 3,
}

impl From<AdcRange> for u8 {
  fn from(v: AdcRange) -> Self {
    v as u8
  }
}

impl TryFrom<u8> for AdcRange {
  type Error = ();

  fn try_from(v: u8) -> Result<Self, ()> {
    match v {
      0 => Ok(AdcRange::Na2048),
      1 => Ok(AdcRange::Na4096),
      2 => Ok(AdcRange::Na8192),
      3 => Ok(AdcRange::Na16384),
      _ => Err(()),
    }
  }
}

impl From<SampleRate> for u8 {
  fn from(v: SampleRate) -> Self {
    v as u8
  }
}

impl TryFrom<u8> for SampleRate {
  type Error = ();

  fn try_from(v: u8) -> Result<Self, ()> {
    match v {
      0 => Ok(SampleRate::Hz50),
      1 => Ok(SampleRate::Hz100),
      2 => Ok(SampleRate::Hz200),
      3 => Ok(SampleRate::Hz400),
      4 => Ok(SampleRate::Hz800),
      5 => Ok(SampleRate::Hz1000),
      6 => Ok(SampleRate::Hz1600),
      7 => Ok(SampleRate::Hz3200),
      _ => Err(()),
    }
  }
}

impl From<PulseWidth> for u8 {
  fn from(v: PulseWidth) -> Self {
    v as u8
  }
}

impl TryFrom<u8> for PulseWidth {
  type Error = ();

  fn try_from(v: u8) -> Result<Self, ()> {
    match v {
      0 => Ok(PulseWidth::Us69),
      1 => Ok(PulseWidth::Us118),
      2 => Ok(PulseWidth::Us215),
      3 => Ok(PulseWidth::Us411),
      _ => Err(()),
    }
  }
}

/// LED drive current, 0.2 mA per LSB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedCurrent(pub u8);

impl LedCurrent {
  pub const OFF: Self = Self(0x00);
  pub const MA_4_4: Self = Self(0x10);
  pub const MA_7_6: Self = Self(0x20);
  pub const MA_11: Self = Self(0x30);
  pub const MA_24: Self = Self(0x70);
  pub const MA_50: Self = Self(0xF0);
}

impl From<LedCurrent> for u8 {
  fn from(v: LedCurrent) -> Self {
    v.0
  }
}

/// Multi-LED slot assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Slot {
  None = 0,
  Red = 1,
  Ir = 2,
}

impl From<Slot> for u8 {
  fn from(v: Slot) -> Self {
    v as u8
  }
}

/// MULTI_LED_CTRL1/2 value for a pair of slots: first in bits 2:0, second
/// in bits 6:4.
pub(crate) fn slot_pair(first: Slot, second: Slot) -> u8 {
  u8::from(first) | (u8::from(second) << 4)
}
