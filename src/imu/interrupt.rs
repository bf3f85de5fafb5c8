//! Interrupt pins, event routing and motion status.
//!
//! The interrupt handler for the INT line only latches a flag in
//! [`EventFlags`]; [`Qmi8658::poll_events`] then does the bus work from the
//! main loop.

use embedded_hal::delay::DelayNs;

use super::{defs::*, Qmi8658};
use crate::{bus::RegisterBus, events::Event, rw::RegisterAccess, Error, EventFlags};

/// Interrupt pin setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptConfig {
  /// Drive INT1 push-pull.
  pub int1_enable: bool,
  /// Drive INT2 push-pull.
  pub int2_enable: bool,
  /// Send motion engine events to INT1 instead of INT2.
  pub route_to_int1: bool,
}

impl Default for InterruptConfig {
  fn default() -> Self {
    Self { int1_enable: true, int2_enable: true, route_to_int1: true }
  }
}

/// Motion engine features enabled in CTRL8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionFeatures {
  pub pedometer: bool,
  pub significant_motion: bool,
  pub no_motion: bool,
  pub any_motion: bool,
  pub tap: bool,
}

impl MotionFeatures {
  /// CTRL8 enable bits for these features.
  pub(crate) fn bits(&self) -> u8 {
    let mut v = 0;
    for (on, bit) in [
      (self.pedometer, ctrl8::PEDOMETER_EN),
      (self.significant_motion, ctrl8::SIG_MOTION_EN),
      (self.no_motion, ctrl8::NO_MOTION_EN),
      (self.any_motion, ctrl8::ANY_MOTION_EN),
      (self.tap, ctrl8::TAP_EN),
    ] {
      if on {
        v |= bit;
      }
    }
    v
  }
}

/// STATUS1 decoded. Reading STATUS1 clears the latched bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionStatus {
  pub significant_motion: bool,
  pub no_motion: bool,
  pub any_motion: bool,
  pub pedometer: bool,
  pub wake_on_motion: bool,
  pub tap: bool,
  pub command_done: bool,
}

impl From<u8> for MotionStatus {
  fn from(v: u8) -> Self {
    Self {
      significant_motion: v & status1::SIG_MOTION != 0,
      no_motion: v & status1::NO_MOTION != 0,
      any_motion: v & status1::ANY_MOTION != 0,
      pedometer: v & status1::PEDOMETER != 0,
      wake_on_motion: v & status1::WOM != 0,
      tap: v & status1::TAP != 0,
      command_done: v & status1::CMD_DONE != 0,
    }
  }
}

impl MotionStatus {
  /// Events in a fixed order: step, wake, tap, any, no, significant.
  pub fn events(&self) -> impl Iterator<Item = Event> {
    [
      (self.pedometer, Event::Step),
      (self.wake_on_motion, Event::WakeOnMotion),
      (self.tap, Event::Tap),
      (self.any_motion, Event::AnyMotion),
      (self.no_motion, Event::NoMotion),
      (self.significant_motion, Event::SignificantMotion),
    ]
    .into_iter()
    .filter_map(|(on, e)| on.then_some(e))
  }
}

impl<B, D, E> Qmi8658<B, D>
where
  B: RegisterBus<Error = E>,
  D: DelayNs,
{
  /// Program the CTRL1 interrupt enables. Address auto-increment is always
  /// switched on with them so burst reads walk the register file.
  pub fn enable_interrupts(&mut self, cfg: InterruptConfig) -> Result<(), Error<E>> {
    let mut set = ctrl1::ADDR_AI;
    if cfg.int1_enable {
      set |= ctrl1::INT1_EN;
    }
    if cfg.int2_enable {
      set |= ctrl1::INT2_EN;
    }
    self.bus.update(Reg::Ctrl1, ctrl1::INT_EN, set)?;
    Ok(())
  }

  /// Enable `features` in CTRL8 and pick the interrupt line for them.
  ///
  /// Enable bits already set are kept.
  pub fn route_events(&mut self, cfg: InterruptConfig, features: MotionFeatures) -> Result<(), Error<E>> {
    let mut set = features.bits();
    if cfg.route_to_int1 {
      set |= ctrl8::ROUTE_INT1;
    }
    let clear = if cfg.route_to_int1 { 0 } else { ctrl8::ROUTE_INT1 };
    self.bus.update(Reg::Ctrl8, clear, set)?;
    Ok(())
  }

  pub fn read_motion_events(&mut self) -> Result<MotionStatus, Error<E>> {
    Ok(self.bus.read_u8(Reg::Status1)?.into())
  }

  /// Drain a pending motion interrupt into the event queue.
  ///
  /// Does no bus traffic unless the interrupt handler has signalled. Returns
  /// the number of events queued.
  pub fn poll_events(&mut self, flags: &EventFlags) -> Result<usize, Error<E>> {
    if !flags.take_motion() {
      return Ok(0);
    }

    let status = self.read_motion_events()?;
    let mut n = 0;
    for e in status.events() {
      self.push_event(e);
      n += 1;
    }
    Ok(n)
  }

  pub fn next_event(&mut self) -> Option<Event> {
    self.events.pop_front()
  }

  #[inline]
  fn push_event(&mut self, e: Event) {
    if self.events.is_full() {
      let _ = self.events.pop_front();
    }
    let _ = self.events.push_back(e);
  }
}
