//! FIFO draining and the reading ring.
//!
//! The device queues up to 32 samples and exposes a write pointer (next slot
//! it fills) and a read pointer (next slot we take), both modulo 32. A drain
//! reads both pointers once, then pulls the difference in bursts no larger
//! than the configured limit, never splitting a sample between bursts.

use embedded_hal::delay::DelayNs;

use super::{
  config::Slot,
  defs::{self, Reg},
  Max30102,
};
use crate::{bus::RegisterBus, rw::RegisterAccess, Error};

/// One FIFO sample, 18 bits per LED. Absent LEDs read 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
  pub red: u32,
  pub ir: u32,
}

pub const RING_LEN: usize = 4;

/// Four-slot ring of the newest readings.
///
/// `head` is the slot written last, `tail` the slot consumed last; unread
/// readings are those after `tail` up to `head`. A push onto three unread
/// readings discards the oldest one, so the newest always wins.
#[derive(Debug, Clone, Default)]
pub struct SampleRing {
  slots: [Reading; RING_LEN],
  head: usize,
  tail: usize,
}

impl SampleRing {
  pub const fn new() -> Self {
    Self { slots: [Reading { red: 0, ir: 0 }; RING_LEN], head: 0, tail: 0 }
  }

  pub fn push(&mut self, r: Reading) {
    self.head = (self.head + 1) % RING_LEN;
    self.slots[self.head] = r;
    if self.head == self.tail {
      self.tail = (self.tail + 1) % RING_LEN;
    }
  }

  /// The most recently pushed reading, read or not.
  pub fn latest(&self) -> Reading {
    self.slots[self.head]
  }

  /// Take the oldest unread reading.
  pub fn pop(&mut self) -> Option<Reading> {
    if self.head == self.tail {
      return None;
    }
    self.tail = (self.tail + 1) % RING_LEN;
    Some(self.slots[self.tail])
  }

  pub fn available(&self) -> usize {
    (self.head + RING_LEN - self.tail) % RING_LEN
  }

  /// Mark everything read.
  pub fn clear(&mut self) {
    self.tail = self.head;
  }
}

/// Samples between the read and write pointers.
pub fn unread_samples(write_ptr: u8, read_ptr: u8) -> u8 {
  (write_ptr & defs::FIFO_PTR_MASK).wrapping_sub(read_ptr & defs::FIFO_PTR_MASK) & defs::FIFO_PTR_MASK
}

/// Bytes for the next burst: the largest whole number of frames that fits in
/// both `bytes_left` and `limit`.
pub fn burst_len(bytes_left: usize, frame_len: usize, limit: usize) -> usize {
  bytes_left.min(limit) / frame_len * frame_len
}

/// Decode one FIFO frame, three big-endian bytes per LED in `layout` order.
pub(crate) fn decode_frame(frame: &[u8], layout: &[Slot; 4]) -> Reading {
  let mut r = Reading::default();
  for (led, slot) in frame.chunks_exact(defs::BYTES_PER_LED).zip(layout) {
    let v = (u32::from(led[0]) << 16 | u32::from(led[1]) << 8 | u32::from(led[2])) & defs::SAMPLE_MASK;
    match slot {
      Slot::Red => r.red = v,
      Slot::Ir => r.ir = v,
      Slot::None => {}
    }
  }
  r
}

impl<B, D, E> Max30102<B, D>
where
  B: RegisterBus<Error = E>,
  D: DelayNs,
{
  /// Move every sample waiting in the device FIFO into the ring.
  ///
  /// Returns the number of samples taken.
  pub fn check_fifo(&mut self) -> Result<u8, Error<E>> {
    let write_ptr = self.bus.read_u8(Reg::FifoWrPtr)?;
    let read_ptr = self.bus.read_u8(Reg::FifoRdPtr)?;
    let samples = unread_samples(write_ptr, read_ptr);
    if samples == 0 {
      return Ok(0);
    }

    let frame_len = self.config.active_leds() * defs::BYTES_PER_LED;
    let layout = self.config.frame_layout();
    let mut bytes_left = samples as usize * frame_len;
    let mut scratch = [0u8; defs::SCRATCH_LEN];

    while bytes_left > 0 {
      let len = burst_len(bytes_left, frame_len, self.config.burst_limit);
      // FIFO state is latched by reading both status registers.
      self.bus.read_u8(Reg::IrqStatus1)?;
      self.bus.read_u8(Reg::IrqStatus2)?;
      self.bus.read_bytes(Reg::FifoData, &mut scratch[..len])?;

      for frame in scratch[..len].chunks_exact(frame_len) {
        self.ring.push(decode_frame(frame, &layout));
      }
      bytes_left -= len;
    }

    Ok(samples)
  }

  /// Drain until at least one sample arrives or `timeout_ms` passes.
  pub fn wait_for_sample(&mut self, timeout_ms: u32) -> Result<u8, Error<E>> {
    let mut waited = 0;
    loop {
      let n = self.check_fifo()?;
      if n > 0 {
        return Ok(n);
      }
      if waited >= timeout_ms {
        #[cfg(feature = "defmt")]
        defmt::debug!("max30102: no samples after {=u32} ms", timeout_ms);
        return Err(Error::NoData);
      }
      self.delay.delay_ms(1);
      waited += 1;
    }
  }

  /// Latest infrared value, waiting up to `timeout_ms` for fresh data.
  pub fn read_ir(&mut self, timeout_ms: u32) -> Result<u32, Error<E>> {
    self.wait_for_sample(timeout_ms)?;
    Ok(self.ring.latest().ir)
  }

  pub fn read_red(&mut self, timeout_ms: u32) -> Result<u32, Error<E>> {
    self.wait_for_sample(timeout_ms)?;
    Ok(self.ring.latest().red)
  }

  /// Zero both pointers and the overflow counter.
  ///
  /// Returns whether the read-back confirmed an empty FIFO.
  pub fn reset_fifo(&mut self) -> Result<bool, Error<E>> {
    self.bus.write_u8(Reg::FifoWrPtr, 0)?;
    self.bus.write_u8(Reg::OverflowCounter, 0)?;
    self.bus.write_u8(Reg::FifoRdPtr, 0)?;

    let wr = self.bus.read_u8(Reg::FifoWrPtr)?;
    let rd = self.bus.read_u8(Reg::FifoRdPtr)?;
    let ovf = self.bus.read_u8(Reg::OverflowCounter)?;
    self.ring.clear();

    let cleared = wr == 0 && rd == 0 && ovf == 0;
    if !cleared {
      #[cfg(feature = "defmt")]
      defmt::warn!("max30102: FIFO not cleared, wr {=u8} rd {=u8} ovf {=u8}", wr, rd, ovf);
    }
    Ok(cleared)
  }

  /// Samples the device dropped since the last reset, saturating at 31.
  pub fn overflow_count(&mut self) -> Result<u8, Error<E>> {
    Ok(self.bus.read_u8(Reg::OverflowCounter)? & defs::FIFO_PTR_MASK)
  }

  pub fn ring(&mut self) -> &mut SampleRing {
    &mut self.ring
  }
}
