//! Framing limits of the two-wire transport.

use wristcore::{
  bus::{I2cBus, MAX_WRITE_LEN},
  rw::RegisterAccess,
  Error,
};

use crate::common::MockI2c;

const ADDR: u8 = 0x57;

#[test]
fn full_buffer_write_goes_out_whole() {
  let i2c = MockI2c::new(ADDR);
  let mut bus = I2cBus::new(i2c.clone(), ADDR);

  let data: Vec<u8> = (1..=MAX_WRITE_LEN as u8).collect();
  bus.write_bytes(0x10u8, &data).unwrap();

  let writes = i2c.writes();
  assert_eq!(writes.len(), MAX_WRITE_LEN);
  assert_eq!(writes.last(), Some(&(0x10 + MAX_WRITE_LEN as u8 - 1, MAX_WRITE_LEN as u8)));
}

#[test]
fn oversize_write_is_rejected_before_traffic() {
  let i2c = MockI2c::new(ADDR);
  let mut bus = I2cBus::new(i2c.clone(), ADDR);

  let data = [0xAA; MAX_WRITE_LEN + 1];
  assert!(matches!(bus.write_bytes(0x10u8, &data), Err(Error::WriteTooLong)));
  assert!(i2c.operations().is_empty());
  assert_eq!(i2c.register(0x10), 0);
}
