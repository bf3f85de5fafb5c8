//! Streaming heart-rate estimation from infrared samples.
//!
//! Samples enter with their capture time. Each one also gets a moving
//! average over the last `smoothing_window` samples. When the window is
//! full the oldest sample is dropped by shifting all three arrays left, so
//! index 0 is always the oldest sample.
//!
//! An estimate takes the midpoint between the smoothed minimum and maximum
//! as the threshold, marks strict local maxima above it as beats and turns
//! the mean beat interval into beats per minute.
//!
//! ```
//! use wristcore::{BeatDetector, BeatDetectorConfig, NO_ESTIMATE};
//!
//! let mut hr = BeatDetector::new(BeatDetectorConfig::default());
//! hr.add_sample(52_000, 0);
//! assert_eq!(hr.calculate_heart_rate(), NO_ESTIMATE);
//! ```

/// Returned while there is no usable estimate.
pub const NO_ESTIMATE: u8 = 255;

/// Most samples a detector can hold.
pub const CAPACITY: usize = 255;

/// Most peaks kept per estimate; one per two samples is the upper bound.
const MAX_PEAKS: usize = CAPACITY / 2 + 1;

const MS_PER_MINUTE: u32 = 60_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BeatDetectorConfig {
  /// Samples kept, clamped to [`CAPACITY`].
  pub window_size: usize,
  /// Moving-average length.
  pub smoothing_window: usize,
  /// Thresholds at or below this mean no finger on the sensor.
  pub threshold_floor: u32,
}

impl Default for BeatDetectorConfig {
  /// Three seconds at 50 Hz with 300 ms of smoothing.
  fn default() -> Self {
    Self { window_size: 150, smoothing_window: 15, threshold_floor: 10_000 }
  }
}

/// A detected beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Peak {
  pub timestamp_ms: u32,
  pub magnitude: u32,
}

pub struct BeatDetector {
  config: BeatDetectorConfig,
  samples: [u32; CAPACITY],
  timestamps: [u32; CAPACITY],
  smoothed: [u32; CAPACITY],
  len: usize,
  peaks: heapless::Vec<Peak, MAX_PEAKS>,
}

impl BeatDetector {
  pub fn new(config: BeatDetectorConfig) -> Self {
    let config = BeatDetectorConfig {
      window_size: config.window_size.clamp(1, CAPACITY),
      smoothing_window: config.smoothing_window.max(1),
      ..config
    };
    Self {
      config,
      samples: [0; CAPACITY],
      timestamps: [0; CAPACITY],
      smoothed: [0; CAPACITY],
      len: 0,
      peaks: heapless::Vec::new(),
    }
  }

  pub fn config(&self) -> &BeatDetectorConfig {
    &self.config
  }

  /// Samples currently held.
  pub fn len(&self) -> usize {
    self.len
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  pub fn clear(&mut self) {
    self.len = 0;
    self.peaks.clear();
  }

  /// Peaks found by the last estimate.
  pub fn peaks(&self) -> &[Peak] {
    &self.peaks
  }

  pub fn smoothed(&self) -> &[u32] {
    &self.smoothed[..self.len]
  }

  /// Append a sample captured at `timestamp_ms`.
  pub fn add_sample(&mut self, value: u32, timestamp_ms: u32) {
    if self.len == self.config.window_size {
      let n = self.len;
      self.samples.copy_within(1..n, 0);
      self.timestamps.copy_within(1..n, 0);
      self.smoothed.copy_within(1..n, 0);
      self.len -= 1;
    }

    let i = self.len;
    self.samples[i] = value;
    self.timestamps[i] = timestamp_ms;

    let w = self.config.smoothing_window;
    self.smoothed[i] = if i + 1 >= w {
      let sum: u64 = self.samples[i + 1 - w..=i].iter().map(|&s| u64::from(s)).sum();
      (sum / w as u64) as u32
    } else {
      value
    };
    self.len += 1;
  }

  /// Rebuild the peak list from the current window.
  ///
  /// `None` with fewer than three samples. An empty list means the signal
  /// never cleared the absolute floor.
  pub fn find_peaks(&mut self) -> Option<&[Peak]> {
    self.peaks.clear();
    if self.len < 3 {
      return None;
    }

    let window = &self.smoothed[..self.len];
    let (mut min, mut max) = (u32::MAX, u32::MIN);
    for &s in window {
      min = min.min(s);
      max = max.max(s);
    }
    let threshold = min + (max - min) / 2;
    if threshold <= self.config.threshold_floor {
      return Some(&self.peaks);
    }

    for i in 1..self.len - 1 {
      let s = window[i];
      if s > threshold && window[i - 1] < s && s > window[i + 1] {
        if self.peaks.push(Peak { timestamp_ms: self.timestamps[i], magnitude: s }).is_err() {
          break;
        }
      }
    }
    Some(&self.peaks)
  }

  /// Beats per minute from the mean peak interval, truncated to `u8`.
  ///
  /// [`NO_ESTIMATE`] until at least two peaks are found.
  pub fn calculate_heart_rate(&mut self) -> u8 {
    let peaks = match self.find_peaks() {
      Some(p) if p.len() >= 2 => p,
      _ => return NO_ESTIMATE,
    };

    // Consecutive intervals telescope to last - first.
    let span = peaks[peaks.len() - 1].timestamp_ms.wrapping_sub(peaks[0].timestamp_ms);
    let interval = span / (peaks.len() as u32 - 1);
    if interval == 0 {
      return NO_ESTIMATE;
    }
    (MS_PER_MINUTE / interval) as u8
  }
}

impl Default for BeatDetector {
  fn default() -> Self {
    Self::new(BeatDetectorConfig::default())
  }
}
