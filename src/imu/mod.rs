//! QMI8658A six-axis inertial sensor.
//!
//! Bring-up runs as a small state machine:
//!
//! ```text
//! Uninitialized -> Reset -> Identified -> ConfiguringMotion -> Armed
//!                    |          |                 |
//!               ResetFailed IdentifyFailed   ConfigFailed
//! ```
//!
//! A failed state is terminal for [`Qmi8658::init`]; the device must not be
//! used until a fresh `init` succeeds.

use embedded_hal::delay::DelayNs;

use crate::{bus::RegisterBus, events::Event, rw::RegisterAccess, Error};

pub mod accel;
mod defs;
pub mod interrupt;
pub mod motion;
pub mod pedometer;
pub mod tap;
pub mod wom;

use defs::*;
pub use defs::{Command, ADDR_PRIMARY, ADDR_SECONDARY};

/// Bring-up progress of the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImuState {
  Uninitialized,
  Reset,
  Identified,
  ConfiguringMotion,
  Armed,
  ResetFailed,
  IdentifyFailed,
  ConfigFailed,
}

/// Everything [`Qmi8658::init`] programs, in order.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImuConfig {
  pub accel: accel::AccelConfig,
  /// `None` leaves the pedometer disabled.
  pub pedometer: Option<pedometer::PedometerConfig>,
  pub tap: Option<tap::TapConfig>,
  pub wake_on_motion: Option<wom::WomConfig>,
  pub interrupt: interrupt::InterruptConfig,
}

impl Default for ImuConfig {
  fn default() -> Self {
    Self {
      accel: accel::AccelConfig::default(),
      pedometer: Some(pedometer::PedometerConfig::default()),
      tap: None,
      wake_on_motion: None,
      interrupt: interrupt::InterruptConfig::default(),
    }
  }
}

/// QMI8658A driver.
///
/// Owns its register transport and delay provider. Decoded motion events
/// wait in a bounded queue until [`next_event`](Self::next_event) takes them.
pub struct Qmi8658<B, D> {
  bus: B,
  delay: D,
  state: ImuState,
  accel_range: accel::AccelRange,
  events: heapless::Deque<Event, 16>,
}

impl<B, D, E> Qmi8658<B, D>
where
  B: RegisterBus<Error = E>,
  D: DelayNs,
{
  pub fn new(bus: B, delay: D) -> Self {
    Self {
      bus,
      delay,
      state: ImuState::Uninitialized,
      accel_range: accel::AccelRange::G2,
      events: heapless::Deque::new(),
    }
  }

  /// Give back the transport and delay.
  pub fn release(self) -> (B, D) {
    (self.bus, self.delay)
  }

  pub fn state(&self) -> ImuState {
    self.state
  }

  /// Run the full bring-up sequence and arm the configured motion features.
  ///
  /// Stops at the first failure, leaving [`state`](Self::state) on the
  /// matching failed state.
  pub fn init(&mut self, config: ImuConfig) -> Result<(), Error<E>> {
    self.soft_reset()?;
    self.verify_identity()?;

    // The motion engine only accepts parameters while every sensor is off.
    self.bus.write_u8(Reg::Ctrl7, ctrl7::DISABLE_ALL)?;
    self.set_accel_conf(config.accel)?;
    self.enable_interrupts(config.interrupt)?;

    self.state = ImuState::ConfiguringMotion;
    if let Err(e) = self.configure_motion(&config) {
      self.state = ImuState::ConfigFailed;
      #[cfg(feature = "defmt")]
      defmt::warn!("qmi8658: motion configuration failed");
      return Err(e);
    }

    let features = interrupt::MotionFeatures {
      pedometer: config.pedometer.is_some(),
      tap: config.tap.is_some(),
      ..Default::default()
    };
    self.route_events(config.interrupt, features)?;
    self.bus.update(Reg::Ctrl7, 0, ctrl7::ACCEL_EN)?;

    self.state = ImuState::Armed;
    #[cfg(feature = "defmt")]
    defmt::info!("qmi8658: armed");
    Ok(())
  }

  fn configure_motion(&mut self, config: &ImuConfig) -> Result<(), Error<E>> {
    // CmdDone is polled on STATUSINT, which needs the handshake type bit.
    self.bus.write_u8(Reg::Ctrl8, ctrl8::HANDSHAKE_STATUSINT)?;

    if let Some(p) = config.pedometer {
      self.configure_pedometer(p)?;
    }
    if let Some(t) = config.tap {
      self.configure_tap(t)?;
    }
    if let Some(w) = config.wake_on_motion {
      self.configure_wom(w)?;
    }
    Ok(())
  }

  /// Issue a soft reset and check the reset-done marker.
  pub fn soft_reset(&mut self) -> Result<(), Error<E>> {
    self.bus.write_u8(Reg::Reset, SOFT_RESET)?;
    self.delay.delay_ms(RESET_DELAY_MS);

    let status = self.bus.read_u8(Reg::DqyL)?;
    if status != RESET_DONE {
      self.state = ImuState::ResetFailed;
      #[cfg(feature = "defmt")]
      defmt::warn!("qmi8658: reset failed, status {=u8:#x}", status);
      return Err(Error::ResetFailed(status));
    }

    self.state = ImuState::Reset;
    Ok(())
  }

  /// Compare WHO_AM_I against the QMI8658 identity.
  pub fn verify_identity(&mut self) -> Result<(), Error<E>> {
    let id = self.get_id()?;
    if id != WHO_AM_I_VALUE {
      self.state = ImuState::IdentifyFailed;
      #[cfg(feature = "defmt")]
      defmt::warn!("qmi8658: unexpected WHO_AM_I {=u8:#x}", id);
      return Err(Error::InvalidChipId(id));
    }

    self.state = ImuState::Identified;
    #[cfg(feature = "defmt")]
    defmt::debug!("qmi8658: identified");
    Ok(())
  }

  pub fn get_id(&mut self) -> Result<u8, Error<E>> {
    self.bus.read_u8(Reg::WhoAmI)
  }

  pub fn get_revision(&mut self) -> Result<u8, Error<E>> {
    self.bus.read_u8(Reg::Revision)
  }
}
