//! Interrupt to main-loop hand-off.
//!
//! Interrupt handlers only call [`EventFlags::signal_motion`] or
//! [`EventFlags::signal_pulse`]. Bus transactions are slow and the
//! transports are not reentrant, so all register access happens later when
//! the main loop takes the flag.
//!
//! ```
//! use wristcore::EventFlags;
//!
//! static FLAGS: EventFlags = EventFlags::new();
//!
//! // in the GPIO interrupt handler
//! FLAGS.signal_motion();
//!
//! // in the main loop
//! assert!(FLAGS.take_motion());
//! assert!(!FLAGS.take_motion());
//! ```

use core::sync::atomic::{AtomicBool, Ordering};

/// Decoded motion engine event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
  Step,
  WakeOnMotion,
  Tap,
  AnyMotion,
  NoMotion,
  SignificantMotion,
}

/// Pending-interrupt latches, safe to share with an interrupt handler.
///
/// Only plain loads and stores are used, so this works on cores without
/// atomic read-modify-write. A signal that lands between the load and the
/// store of `take_*` is merged with the one being taken.
#[derive(Debug, Default)]
pub struct EventFlags {
  motion: AtomicBool,
  pulse: AtomicBool,
}

impl EventFlags {
  pub const fn new() -> Self {
    Self { motion: AtomicBool::new(false), pulse: AtomicBool::new(false) }
  }

  pub fn signal_motion(&self) {
    self.motion.store(true, Ordering::Release);
  }

  pub fn signal_pulse(&self) {
    self.pulse.store(true, Ordering::Release);
  }

  /// Clear and return the motion latch.
  pub fn take_motion(&self) -> bool {
    take(&self.motion)
  }

  /// Clear and return the pulse latch.
  pub fn take_pulse(&self) -> bool {
    take(&self.pulse)
  }
}

fn take(flag: &AtomicBool) -> bool {
  if flag.load(Ordering::Acquire) {
    flag.store(false, Ordering::Release);
    true
  } else {
    false
  }
}
