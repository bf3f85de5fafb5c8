//! Pin-level DS1302 model for the three-wire transport.
//!
//! The model samples IO on rising clock edges while it is receiving and
//! drives IO on falling edges while it is sending. It records every pin and
//! delay event so tests can check timing and line direction.

use core::convert::Infallible;
use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::{
  delay::DelayNs,
  digital::{ErrorType, InputPin, OutputPin},
};
use wristcore::bus::{IoPin, ThreeWire};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
  CeHigh,
  CeLow,
  ClkHigh,
  ClkLow,
  IoInput,
  IoOutput,
  Delay(u32),
}

#[derive(Debug, Default)]
pub struct Chip {
  /// Seconds through year, then write protect.
  pub clock: [u8; 8],
  pub trickle: u8,
  pub ram: [u8; 31],
  pub timeline: Vec<Edge>,
  /// Set when both sides drove IO at once.
  pub contention: bool,
  /// Command bytes received, in order.
  pub commands: Vec<u8>,

  ce: bool,
  io_output: bool,
  host_level: bool,
  device_level: bool,
  shift: u8,
  bit: u8,
  command: Option<u8>,
  byte_index: usize,
  read_bit: Option<usize>,
}

const BURST: u8 = 31;

impl Chip {
  fn is_ram(cmd: u8) -> bool {
    cmd & 0x40 != 0
  }

  fn address(cmd: u8) -> u8 {
    (cmd >> 1) & 0x1F
  }

  fn write_protected(&self) -> bool {
    self.clock[7] & 0x80 != 0
  }

  fn cell(&mut self, cmd: u8, index: usize) -> Option<&mut u8> {
    let addr = Self::address(cmd);
    let slot = if addr == BURST { index } else if index == 0 { addr as usize } else { return None };
    if Self::is_ram(cmd) {
      self.ram.get_mut(slot)
    } else if slot < 8 {
      Some(&mut self.clock[slot])
    } else if slot == 8 {
      Some(&mut self.trickle)
    } else {
      None
    }
  }

  fn outgoing_bit(&mut self, pos: usize) -> bool {
    let Some(cmd) = self.command else { return false };
    self.cell(cmd, pos / 8).map_or(false, |b| *b & (1 << (pos % 8)) != 0)
  }

  fn ce(&mut self, high: bool) {
    self.timeline.push(if high { Edge::CeHigh } else { Edge::CeLow });
    self.ce = high;
    self.shift = 0;
    self.bit = 0;
    self.command = None;
    self.byte_index = 0;
    self.read_bit = None;
  }

  fn rising(&mut self) {
    self.timeline.push(Edge::ClkHigh);
    if !self.ce || self.read_bit.is_some() {
      return;
    }
    if !self.io_output {
      return;
    }
    self.shift |= u8::from(self.host_level) << self.bit;
    self.bit += 1;
    if self.bit < 8 {
      return;
    }
    let byte = self.shift;
    self.shift = 0;
    self.bit = 0;

    match self.command {
      None => {
        self.commands.push(byte);
        self.command = Some(byte);
      }
      Some(cmd) if cmd & 0x01 == 0 => {
        let index = self.byte_index;
        let is_wp = !Self::is_ram(cmd) && (Self::address(cmd) == 7 || (Self::address(cmd) == BURST && index == 7));
        if !self.write_protected() || is_wp {
          if let Some(cell) = self.cell(cmd, index) {
            *cell = byte;
          }
        }
        self.byte_index += 1;
      }
      Some(_) => {}
    }
  }

  fn falling(&mut self) {
    self.timeline.push(Edge::ClkLow);
    if !self.ce {
      return;
    }
    let reading = matches!(self.command, Some(cmd) if cmd & 0x01 != 0);
    if !reading {
      return;
    }
    if self.io_output {
      self.contention = true;
    }
    let pos = self.read_bit.map_or(0, |p| p + 1);
    self.read_bit = Some(pos);
    self.device_level = self.outgoing_bit(pos);
  }
}

pub type Shared = Rc<RefCell<Chip>>;

pub struct CePin(Shared);
pub struct SclkPin(Shared);
pub struct IoLine(Shared);
pub struct SimDelay(Shared);

impl ErrorType for CePin {
  type Error = Infallible;
}

impl OutputPin for CePin {
  fn set_low(&mut self) -> Result<(), Infallible> {
    self.0.borrow_mut().ce(false);
    Ok(())
  }

  fn set_high(&mut self) -> Result<(), Infallible> {
    self.0.borrow_mut().ce(true);
    Ok(())
  }
}

impl ErrorType for SclkPin {
  type Error = Infallible;
}

impl OutputPin for SclkPin {
  fn set_low(&mut self) -> Result<(), Infallible> {
    self.0.borrow_mut().falling();
    Ok(())
  }

  fn set_high(&mut self) -> Result<(), Infallible> {
    self.0.borrow_mut().rising();
    Ok(())
  }
}

impl ErrorType for IoLine {
  type Error = Infallible;
}

impl OutputPin for IoLine {
  fn set_low(&mut self) -> Result<(), Infallible> {
    self.0.borrow_mut().host_level = false;
    Ok(())
  }

  fn set_high(&mut self) -> Result<(), Infallible> {
    self.0.borrow_mut().host_level = true;
    Ok(())
  }
}

impl InputPin for IoLine {
  fn is_high(&mut self) -> Result<bool, Infallible> {
    let chip = self.0.borrow();
    Ok(if chip.io_output { chip.host_level } else { chip.device_level })
  }

  fn is_low(&mut self) -> Result<bool, Infallible> {
    self.is_high().map(|h| !h)
  }
}

impl IoPin for IoLine {
  fn set_as_input(&mut self) -> Result<(), Infallible> {
    let mut chip = self.0.borrow_mut();
    chip.io_output = false;
    chip.timeline.push(Edge::IoInput);
    Ok(())
  }

  fn set_as_output(&mut self) -> Result<(), Infallible> {
    let mut chip = self.0.borrow_mut();
    chip.io_output = true;
    chip.timeline.push(Edge::IoOutput);
    Ok(())
  }
}

impl DelayNs for SimDelay {
  fn delay_ns(&mut self, ns: u32) {
    self.0.borrow_mut().timeline.push(Edge::Delay(ns));
  }
}

pub type SimBus = ThreeWire<CePin, SclkPin, IoLine, SimDelay>;

/// A powered DS1302 and a transport wired to it.
pub fn wired(chip: Chip) -> (SimBus, Shared) {
  let shared = Rc::new(RefCell::new(chip));
  let bus = ThreeWire::new(
    CePin(shared.clone()),
    SclkPin(shared.clone()),
    IoLine(shared.clone()),
    SimDelay(shared.clone()),
  );
  (bus, shared)
}

/// Clock registers for 2024-12-03 12:00:00, a Tuesday, running and
/// writable, with the century stored in RAM.
pub fn running_chip() -> Chip {
  let mut chip = Chip::default();
  chip.clock = [0x00, 0x00, 0x12, 0x03, 0x12, 0x03, 0x24, 0x00];
  chip.ram[0] = 20;
  chip
}
