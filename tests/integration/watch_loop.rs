//! One pass of the watch firmware: bring every device up, then run the
//! main loop against simulated hardware.

use wristcore::{
  imu::ImuConfig, pulse::PulseConfig, BeatDetector, DateTime, Ds1302, Event, EventFlags, NO_ESTIMATE,
};

use crate::common::{
  ds1302_sim::{running_chip, wired},
  imu_device, pulse_device,
  test_utils::{imu_driver, pulse_driver},
  MockDelay,
};

const STATUS1: u8 = 0x2F;
const STEP_CNT_LOW: u8 = 0x5A;
const WR_PTR: u8 = 0x04;
const RD_PTR: u8 = 0x06;
const FIFO_DATA: u8 = 0x07;

static FLAGS: EventFlags = EventFlags::new();

#[test]
fn steps_heart_rate_and_time() {
  let delay = MockDelay::new();

  let imu_bus = imu_device();
  let mut imu = imu_driver(&imu_bus, &delay);
  imu.init(ImuConfig::default()).unwrap();

  let pulse_bus = pulse_device();
  let mut pulse = pulse_driver(&pulse_bus, &delay);
  pulse.init(PulseConfig::default()).unwrap();

  let (rtc_bus, _chip) = wired(running_chip());
  let mut rtc = Ds1302::new(rtc_bus);
  let status = rtc.init(&DateTime::new(2024, 1, 1, 0, 0, 0)).unwrap();
  assert!(!status.restored_backup);

  let mut hr = BeatDetector::default();
  let mut steps_seen = 0;

  for tick in 0u32..300 {
    // Every 25th tick the pedometer fires and the ISR latches the flag.
    if tick % 25 == 24 {
      imu_bus.set_register(STATUS1, 0x10);
      imu_bus.set_register(STEP_CNT_LOW, (tick / 25 + 1) as u8);
      FLAGS.signal_motion();
    }
    imu.poll_events(&FLAGS).unwrap();
    while let Some(e) = imu.next_event() {
      assert_eq!(e, Event::Step);
      steps_seen += 1;
    }

    // One new infrared sample per tick, a 600 ms sawtooth.
    let ir = 50_000 + 1_000 * (tick % 30);
    let mut frame = [0u8; 6];
    frame[3..].copy_from_slice(&ir.to_be_bytes()[1..]);
    pulse_bus.set_register(RD_PTR, (tick % 32) as u8);
    pulse_bus.set_register(WR_PTR, ((tick + 1) % 32) as u8);
    pulse_bus.set_stream(FIFO_DATA, &frame);

    let sample = pulse.read_ir(10).unwrap();
    assert_eq!(sample, ir);
    hr.add_sample(sample, tick * 20);
  }

  assert_eq!(steps_seen, 12);
  assert_eq!(imu.read_step_count().unwrap(), 12);

  let bpm = hr.calculate_heart_rate();
  assert_ne!(bpm, NO_ESTIMATE);
  assert!((98..=102).contains(&bpm), "bpm {}", bpm);

  let now = rtc.get_datetime().unwrap();
  assert_eq!((now.year, now.month, now.day), (2024, 12, 3));
}
