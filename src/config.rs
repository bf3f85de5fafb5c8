//! Board wiring.
//!
//! Bus numbers, pins and clock rates of the reference wrist board. Drivers
//! never read these directly; the application hands them to its HAL when it
//! builds the bus objects passed into [`Qmi8658::new`](crate::Qmi8658::new),
//! [`Max30102::new`](crate::Max30102::new) and [`Ds1302::new`](crate::Ds1302::new).

/// Two-wire bus shared by the IMU and the pulse sensor.
pub mod i2c {
  pub const BUS: u8 = 1;
  pub const SDA_PIN: u8 = 6;
  pub const SCL_PIN: u8 = 7;
  pub const FREQUENCY_HZ: u32 = 400_000;
}

/// Four-wire bus driving the display.
pub mod spi {
  pub const BUS: u8 = 1;
  pub const FREQUENCY_HZ: u32 = 270_000_000;
}

/// Three-wire RTC link.
pub mod rtc {
  pub const CE_PIN: u8 = 17;
  pub const SCLK_PIN: u8 = 18;
  pub const IO_PIN: u8 = 16;
}

/// IMU INT1 line, falling edge.
pub const IMU_INT1_PIN: u8 = 23;

/// Seven-bit device addresses on the two-wire bus.
pub mod address {
  pub const IMU: u8 = crate::imu::ADDR_PRIMARY;
  pub const PULSE: u8 = crate::pulse::ADDR;
}
