#![no_std]
#![doc = include_str!("../README.md")]
//!
//! ## Design Principles
//!
//! - **Owned drivers**: every device is a value owning its transport, no global state
//! - **Blocking**: built on the `embedded-hal` 1.0 blocking bus and delay traits
//! - **Injected time**: every poll loop sleeps through a caller-supplied `DelayNs`
//! - **Documented registers**: raw bitfields carry their layout next to the accessor
//!
//! ## Module Organization
//!
//! - [`bus`]: two-wire, four-wire and bit-banged three-wire transports
//! - [`rw`]: register read/write helpers shared by all drivers
//! - [`imu`]: QMI8658A inertial sensor (pedometer, tap, wake-on-motion)
//! - [`pulse`]: MAX30102 pulse sensor and its FIFO drain
//! - [`rtc`]: DS1302 real-time clock
//! - [`heart_rate`]: streaming beats-per-minute estimator
//! - [`events`]: interrupt flag latch consumed by the main loop
//! - [`config`]: board wiring constants
//!
//! ## Basic Usage
//!
//! ```no_run
//! # fn example<I, D>(i2c: I, delay: D) -> Result<(), wristcore::Error<I::Error>>
//! # where I: embedded_hal::i2c::I2c, D: embedded_hal::delay::DelayNs {
//! use wristcore::{bus::I2cBus, imu::{ImuConfig, Qmi8658}};
//!
//! let mut imu = Qmi8658::new(I2cBus::new(i2c, wristcore::imu::ADDR_PRIMARY), delay);
//! imu.init(ImuConfig::default())?;
//! let steps = imu.read_step_count()?;
//! # Ok(())
//! # }
//! ```

pub mod bus;
pub mod config;
pub mod events;
pub mod heart_rate;
pub mod imu;
pub mod pulse;
pub mod rtc;
pub mod rw;

pub use events::{Event, EventFlags};
pub use heart_rate::{BeatDetector, BeatDetectorConfig, NO_ESTIMATE};
pub use imu::Qmi8658;
pub use pulse::Max30102;
pub use rtc::{DateTime, Ds1302};

/// Driver error type.
///
/// Wraps the underlying transport error and adds the device-level failure
/// conditions the drivers detect themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
  /// Transport error reported by the HAL
  Bus(E),
  /// Reset verification register held this value instead of the success code
  ResetFailed(u8),
  /// Identity register mismatch (holds the value read)
  InvalidChipId(u8),
  /// Command never reported completion (holds the command code)
  CommandTimeout(u8),
  /// Scratch memory offset outside the device RAM window
  AddressOutOfRange(u8),
  /// No sample arrived before the timeout
  NoData,
  /// Configuration rejected before touching the device
  InvalidConfig,
  /// Conversion did not finish in time
  NotReady,
  /// Register value does not decode into its typed form
  Data,
  /// Payload longer than the transport frames in one write
  WriteTooLong,
}
