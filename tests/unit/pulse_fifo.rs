//! MAX30102 bring-up and FIFO drain.

use wristcore::{
  pulse::{LedCurrent, Mode, PulseConfig, Reading, Slot},
  Error,
};

use crate::common::{test_utils::pulse_driver, pulse_device, MockDelay, Operation};

const IRQ1: u8 = 0x00;
const IRQ2: u8 = 0x01;
const WR_PTR: u8 = 0x04;
const OVF: u8 = 0x05;
const RD_PTR: u8 = 0x06;
const FIFO_DATA: u8 = 0x07;
const MODE: u8 = 0x09;
const TEMP_CONFIG: u8 = 0x21;

/// Two-LED frames, red then infrared, three big-endian bytes each.
fn frames(n: u32) -> Vec<u8> {
  let mut out = Vec::new();
  for k in 0..n {
    for v in [0x01_0000 + k, 0x02_0000 + k] {
      out.extend_from_slice(&v.to_be_bytes()[1..]);
    }
  }
  out
}

#[test]
fn init_programs_device_in_order() {
  let i2c = pulse_device();
  let delay = MockDelay::new();
  let mut pulse = pulse_driver(&i2c, &delay);

  pulse.init(PulseConfig::default()).unwrap();

  assert_eq!(
    i2c.writes(),
    vec![
      (0x08, 0x70),
      (MODE, 0x03),
      (0x0A, 0x2F),
      (0x0C, 0x20),
      (0x0D, 0x20),
      (0x11, 0x21),
      (0x12, 0x00),
      (WR_PTR, 0),
      (OVF, 0),
      (RD_PTR, 0),
    ]
  );
}

#[test]
fn wrong_part_id_writes_nothing() {
  let i2c = pulse_device();
  i2c.set_register(0xFF, 0x11);
  let delay = MockDelay::new();
  let mut pulse = pulse_driver(&i2c, &delay);

  assert_eq!(pulse.init(PulseConfig::default()), Err(Error::InvalidChipId(0x11)));
  assert!(i2c.writes().is_empty());
}

#[test]
fn unsupported_layout_is_rejected_before_traffic() {
  let i2c = pulse_device();
  let delay = MockDelay::new();
  let mut pulse = pulse_driver(&i2c, &delay);

  let three_leds =
    PulseConfig { mode: Mode::MultiLed, slots: [Slot::Red, Slot::Ir, Slot::Red, Slot::None], ..Default::default() };
  assert_eq!(pulse.init(three_leds), Err(Error::InvalidConfig));

  let tiny_burst = PulseConfig { burst_limit: 4, ..Default::default() };
  assert_eq!(pulse.init(tiny_burst), Err(Error::InvalidConfig));
  assert!(i2c.operations().is_empty());
}

#[test]
fn drain_follows_pointer_wrap() {
  let i2c = pulse_device();
  let delay = MockDelay::new();
  let mut pulse = pulse_driver(&i2c, &delay);
  pulse.init(PulseConfig::default()).unwrap();

  i2c.set_register(WR_PTR, 2);
  i2c.set_register(RD_PTR, 30);
  i2c.set_stream(FIFO_DATA, &frames(4));
  i2c.clear_operations();

  assert_eq!(pulse.check_fifo().unwrap(), 4);
  assert_eq!(i2c.reads_of(FIFO_DATA), 24);

  // The ring keeps the three newest of the four.
  let ring = pulse.ring();
  assert_eq!(ring.available(), 3);
  assert_eq!(ring.latest(), Reading { red: 0x01_0003, ir: 0x02_0003 });
  assert_eq!(ring.pop(), Some(Reading { red: 0x01_0001, ir: 0x02_0001 }));
}

#[test]
fn long_drain_is_split_on_frame_boundaries() {
  let i2c = pulse_device();
  let delay = MockDelay::new();
  let mut pulse = pulse_driver(&i2c, &delay);
  pulse.init(PulseConfig { burst_limit: 16, ..Default::default() }).unwrap();

  i2c.set_register(WR_PTR, 5);
  i2c.set_register(RD_PTR, 0);
  i2c.set_stream(FIFO_DATA, &frames(5));
  i2c.clear_operations();

  assert_eq!(pulse.check_fifo().unwrap(), 5);

  // Collapse each burst into one entry: 30 bytes as 12 + 12 + 6.
  let mut bursts = Vec::new();
  let mut status_reads = 0;
  for op in i2c.operations() {
    match op {
      Operation::Read { reg: FIFO_DATA, .. } if status_reads == 2 => {
        bursts.push(1);
        status_reads = 0;
      }
      Operation::Read { reg: FIFO_DATA, .. } => *bursts.last_mut().unwrap() += 1,
      Operation::Read { reg, .. } if reg == IRQ1 || reg == IRQ2 => status_reads += 1,
      _ => {}
    }
  }
  assert_eq!(bursts, vec![12, 12, 6]);
  assert_eq!(pulse.ring().latest(), Reading { red: 0x01_0004, ir: 0x02_0004 });
}

#[test]
fn heart_rate_mode_reads_red_only() {
  let i2c = pulse_device();
  let delay = MockDelay::new();
  let mut pulse = pulse_driver(&i2c, &delay);
  pulse.init(PulseConfig { mode: Mode::HeartRate, ..Default::default() }).unwrap();

  i2c.set_register(WR_PTR, 1);
  i2c.set_stream(FIFO_DATA, &[0xFF, 0xFF, 0xFF]);
  assert_eq!(pulse.read_red(10).unwrap(), 0x3FFFF);
  assert_eq!(pulse.ring().latest().ir, 0);
}

#[test]
fn empty_fifo_times_out() {
  let i2c = pulse_device();
  let delay = MockDelay::new();
  let mut pulse = pulse_driver(&i2c, &delay);
  pulse.init(PulseConfig::default()).unwrap();
  i2c.clear_operations();

  assert_eq!(pulse.read_ir(5), Err(Error::NoData));
  assert_eq!(i2c.reads_of(WR_PTR), 6);
  assert_eq!(i2c.reads_of(FIFO_DATA), 0);
  assert_eq!(delay.total_ms(), 5);
}

#[test]
fn reset_fifo_reports_stuck_pointer() {
  let i2c = pulse_device();
  let delay = MockDelay::new();
  let mut pulse = pulse_driver(&i2c, &delay);

  assert!(pulse.reset_fifo().unwrap());
  i2c.script_reads(WR_PTR, &[7]);
  assert!(!pulse.reset_fifo().unwrap());
}

#[test]
fn shutdown_keeps_mode() {
  let i2c = pulse_device();
  let delay = MockDelay::new();
  let mut pulse = pulse_driver(&i2c, &delay);
  pulse.init(PulseConfig::default()).unwrap();

  pulse.shutdown().unwrap();
  assert_eq!(i2c.register(MODE), 0x83);
  pulse.set_mode(Mode::HeartRate).unwrap();
  assert_eq!(i2c.register(MODE), 0x82);
  pulse.resume().unwrap();
  assert_eq!(pulse.get_mode().unwrap(), Mode::HeartRate);
  assert_eq!(pulse.config().mode, Mode::HeartRate);
}

#[test]
fn led_currents_are_remembered() {
  let i2c = pulse_device();
  let delay = MockDelay::new();
  let mut pulse = pulse_driver(&i2c, &delay);

  pulse.set_led_currents(LedCurrent::MA_24, LedCurrent::OFF).unwrap();
  assert_eq!((i2c.register(0x0C), i2c.register(0x0D)), (0x70, 0x00));
  assert_eq!(pulse.config().red_current, LedCurrent::MA_24);
}

#[test]
fn die_temperature() {
  let i2c = pulse_device();
  i2c.set_register(0x1F, 0xF6);
  i2c.set_register(0x20, 0x04);
  let delay = MockDelay::new();
  let mut pulse = pulse_driver(&i2c, &delay);

  i2c.on_write(|regs, reg, value| {
    if reg == TEMP_CONFIG && value == 0x01 {
      regs.script(TEMP_CONFIG, &[0x01, 0x00]);
    }
  });
  let t = pulse.read_temperature().unwrap();
  assert!((t - (-9.75)).abs() < 1e-4);
}

#[test]
fn die_temperature_never_ready() {
  let i2c = pulse_device();
  let delay = MockDelay::new();
  let mut pulse = pulse_driver(&i2c, &delay);

  assert_eq!(pulse.read_temperature(), Err(Error::NotReady));
}
