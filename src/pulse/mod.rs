//! MAX30102 pulse oximetry sensor.
//!
//! [`Max30102::init`] checks the part id before touching any configuration
//! register, then programs averaging and FIFO behavior, the LED mode,
//! SpO2 timing, LED currents and slots, and finally empties the FIFO.
//! Samples are pulled on demand by [`Max30102::check_fifo`] into a four-slot
//! [`SampleRing`].

use embedded_hal::delay::DelayNs;

use crate::{bus::RegisterBus, rw::RegisterAccess, Error};

pub mod config;
mod defs;
pub mod fifo;

pub use config::*;
pub use defs::ADDR;
pub use fifo::{Reading, SampleRing};

use defs::*;

pub struct Max30102<B, D> {
  bus: B,
  delay: D,
  config: PulseConfig,
  ring: SampleRing,
}

impl<B, D, E> Max30102<B, D>
where
  B: RegisterBus<Error = E>,
  D: DelayNs,
{
  pub fn new(bus: B, delay: D) -> Self {
    Self { bus, delay, config: PulseConfig::default(), ring: SampleRing::new() }
  }

  pub fn release(self) -> (B, D) {
    (self.bus, self.delay)
  }

  pub fn config(&self) -> &PulseConfig {
    &self.config
  }

  /// Identify the part and apply `config`.
  ///
  /// A config the drain cannot serve is rejected before any bus traffic.
  pub fn init(&mut self, config: PulseConfig) -> Result<(), Error<E>> {
    config.validate::<E>()?;

    let id = self.get_part_id()?;
    if id != PART_ID_VALUE {
      #[cfg(feature = "defmt")]
      defmt::warn!("max30102: unexpected part id {=u8:#x}", id);
      return Err(Error::InvalidChipId(id));
    }

    self.bus.write(Reg::FifoConfig, config.fifo)?;
    self.write_mode(config.mode)?;
    self.bus.write(Reg::Spo2Config, config.spo2)?;
    self.bus.write_u8(Reg::Led1PulseAmp, config.red_current.into())?;
    self.bus.write_u8(Reg::Led2PulseAmp, config.ir_current.into())?;
    let [s1, s2, s3, s4] = config.slots;
    self.bus.write_u8(Reg::MultiLedCtrl1, slot_pair(s1, s2))?;
    self.bus.write_u8(Reg::MultiLedCtrl2, slot_pair(s3, s4))?;
    self.config = config;

    self.reset_fifo()?;
    #[cfg(feature = "defmt")]
    defmt::info!("max30102: ready, {=usize} LEDs", config.active_leds());
    Ok(())
  }

  pub fn get_part_id(&mut self) -> Result<u8, Error<E>> {
    self.bus.read_u8(Reg::PartId)
  }

  pub fn get_revision(&mut self) -> Result<u8, Error<E>> {
    self.bus.read_u8(Reg::RevisionId)
  }

  /// Change the LED mode, keeping the shutdown bit.
  pub fn set_mode(&mut self, m: Mode) -> Result<(), Error<E>> {
    PulseConfig { mode: m, ..self.config }.validate::<E>()?;
    self.write_mode(m)?;
    self.config.mode = m;
    Ok(())
  }

  fn write_mode(&mut self, m: Mode) -> Result<(), Error<E>> {
    self.bus.update(Reg::ModeConfig, mode_bits::MODE_MASK | mode_bits::RESET, m.into())?;
    Ok(())
  }

  pub fn get_mode(&mut self) -> Result<Mode, Error<E>> {
    Mode::try_from(self.bus.read_u8(Reg::ModeConfig)?).map_err(|_| Error::Data)
  }

  /// Enter power-save; registers keep their values.
  pub fn shutdown(&mut self) -> Result<(), Error<E>> {
    self.bus.set_bits(Reg::ModeConfig, mode_bits::SHUTDOWN, true)?;
    Ok(())
  }

  pub fn resume(&mut self) -> Result<(), Error<E>> {
    self.bus.set_bits(Reg::ModeConfig, mode_bits::SHUTDOWN, false)?;
    Ok(())
  }

  pub fn set_led_currents(&mut self, red: LedCurrent, ir: LedCurrent) -> Result<(), Error<E>> {
    self.bus.write_u8(Reg::Led1PulseAmp, red.into())?;
    self.bus.write_u8(Reg::Led2PulseAmp, ir.into())?;
    self.config.red_current = red;
    self.config.ir_current = ir;
    Ok(())
  }

  /// Run one die temperature conversion, °C.
  pub fn read_temperature(&mut self) -> Result<f32, Error<E>> {
    self.bus.write_u8(Reg::DieTempConfig, temp::TEMP_EN)?;

    let mut retries = 0;
    while self.bus.read_u8(Reg::DieTempConfig)? & temp::TEMP_EN != 0 {
      if retries >= TEMP_POLL_RETRIES {
        return Err(Error::NotReady);
      }
      self.delay.delay_ms(1);
      retries += 1;
    }

    let int = self.bus.read_u8(Reg::DieTempInt)? as i8;
    let frac = self.bus.read_u8(Reg::DieTempFrac)? & 0x0F;
    Ok(f32::from(int) + f32::from(frac) * 0.0625)
  }
}
