//! CTRL9 command handshake.

use wristcore::{
  imu::{motion::MotionParams, wom::WomInterrupt, Command},
  Error,
};

use crate::common::{
  test_utils::{imu_driver, CTRL9, STATUSINT},
  imu_device, MockDelay, MockI2c, Operation,
};

#[test]
fn ack_follows_command_done() {
  let i2c = imu_device();
  let delay = MockDelay::new();
  let mut imu = imu_driver(&i2c, &delay);

  imu.send_command(Command::ResetPedometer).unwrap();

  assert_eq!(
    i2c.operations(),
    vec![
      Operation::Write { reg: CTRL9, value: 0x0F },
      Operation::Read { reg: STATUSINT, value: 0x00 },
      Operation::Read { reg: STATUSINT, value: 0x80 },
      Operation::Write { reg: CTRL9, value: 0x00 },
    ]
  );
  assert_eq!(delay.calls(), 1);
  assert_eq!(i2c.register(STATUSINT), 0);
}

#[test]
fn timeout_is_not_acknowledged() {
  let i2c = MockI2c::new(wristcore::imu::ADDR_PRIMARY);
  let delay = MockDelay::new();
  let mut imu = imu_driver(&i2c, &delay);

  assert_eq!(imu.send_command(Command::ConfigureTap), Err(Error::CommandTimeout(0x0C)));
  assert_eq!(i2c.writes_to(CTRL9), vec![0x0C]);
  assert_eq!(i2c.reads_of(STATUSINT), 50);
  assert!(delay.total_ms() < 100);
}

#[test]
fn parameters_precede_their_command() {
  let i2c = imu_device();
  let delay = MockDelay::new();
  let mut imu = imu_driver(&i2c, &delay);

  let params = MotionParams::WakeOnMotion { threshold_mg: 200, interrupt: WomInterrupt::Int2High, blanking: 0x3F };
  imu.apply_motion_params(params).unwrap();

  let writes = i2c.writes();
  assert_eq!(
    writes,
    vec![
      (0x0B, 200),
      (0x0C, 0xFF),
      (0x0D, 0),
      (0x0E, 0),
      (0x0F, 0),
      (0x10, 0),
      (0x11, 0),
      (0x12, 0),
      (CTRL9, 0x08),
      (CTRL9, 0x00),
    ]
  );
}

#[test]
fn bus_error_propagates() {
  let i2c = imu_device();
  let delay = MockDelay::new();
  let mut imu = imu_driver(&i2c, &delay);

  i2c.fail_next();
  assert!(matches!(imu.send_command(Command::ResetPedometer), Err(Error::Bus(_))));
  assert!(i2c.writes().is_empty());
}
