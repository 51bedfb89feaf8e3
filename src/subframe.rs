//! Cyclic (frame, subframe) numbering of the sidelink timeline.
//!
//! The air interface counts time in 1 ms subframes (or slots for the
//! higher numerologies) grouped into frames of ten. Frame numbers wrap after
//! 1024 frames, so the whole timeline is a ring of 10240 positions:
//!
//! ```text
//! index = frame * 10 + (subframe - 1)      frame 0..=1023, subframe 1..=10
//! ```
//!
//! All arithmetic here is performed on that ring. Subtraction answers "how
//! many slots is `ahead` after `now`", assuming `ahead` is causally at or
//! after `now` and less than one full cycle away.

use std::fmt;
use std::ops::{Add, Sub};
use thiserror::Error;

/// Number of frames before the frame counter wraps.
pub const FRAMES_PER_CYCLE: u32 = 1024;
/// Subframes (slots) per frame.
pub const SUBFRAMES_PER_FRAME: u32 = 10;
/// Length of the ring in subframes.
pub const CYCLE_LENGTH: u32 = FRAMES_PER_CYCLE * SUBFRAMES_PER_FRAME;

/// Processing delay between the time a MAC decision is taken and the slot it
/// is applied to, in slots.
const PROCESSING_DELAY_SLOTS: u64 = 11;
/// Uplink shared channel scheduling delay in slots.
const UL_PUSCH_TTIS_DELAY: u64 = 4;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubframeError {
    #[error("frame number {0} out of range 0..=1023")]
    FrameOutOfRange(u32),
    #[error("subframe number {0} out of range 1..=10")]
    SubframeOutOfRange(u32),
    #[error("slot duration must be positive, got {0} ms")]
    InvalidSlotDuration(f64),
}

/// A position on the 10240 subframe ring.
///
/// Ordering is lexicographic on `(frame, subframe)` and therefore not aware
/// of the wrap; it is only meant for deterministic iteration and map keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubframeInfo {
    frame: u32,
    subframe: u32,
}

impl SubframeInfo {
    /// Build a validated position.
    ///
    /// # Parameters
    ///
    /// * `frame` - Frame number, 0..=1023
    /// * `subframe` - Subframe number, 1..=10
    ///
    /// # Returns
    ///
    /// The position, or an error naming the out-of-range component.
    pub fn new(frame: u32, subframe: u32) -> Result<Self, SubframeError> {
        if frame >= FRAMES_PER_CYCLE {
            return Err(SubframeError::FrameOutOfRange(frame));
        }
        if subframe == 0 || subframe > SUBFRAMES_PER_FRAME {
            return Err(SubframeError::SubframeOutOfRange(subframe));
        }
        Ok(Self { frame, subframe })
    }

    /// Position of a ring index; indexes beyond the ring wrap.
    pub fn from_index(index: u64) -> Self {
        let index = (index % CYCLE_LENGTH as u64) as u32;
        Self {
            frame: index / SUBFRAMES_PER_FRAME,
            subframe: index % SUBFRAMES_PER_FRAME + 1,
        }
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn subframe(&self) -> u32 {
        self.subframe
    }

    /// Zero-based index on the ring.
    pub fn index(&self) -> u32 {
        self.frame * SUBFRAMES_PER_FRAME + (self.subframe - 1)
    }

    /// Position `slots` later on the ring.
    pub fn add_slots(self, slots: u32) -> Self {
        Self::from_index(self.index() as u64 + slots as u64)
    }

    /// Slots from `now` forward to `self`.
    ///
    /// Always non-negative: when `self` lies numerically before `now` the
    /// distance is taken through the frame 1023 -> 0 wrap.
    pub fn slots_after(self, now: SubframeInfo) -> u32 {
        (self.index() + CYCLE_LENGTH - now.index()) % CYCLE_LENGTH
    }

    /// The next slot.
    pub fn next(self) -> Self {
        self.add_slots(1)
    }

    /// Convert a simulation timestamp to the slot it falls into.
    ///
    /// The timestamp is shifted by the fixed MAC/PHY processing delay before
    /// discretisation, so time zero maps to the slot after that delay.
    ///
    /// # Parameters
    ///
    /// * `time_us` - Simulation time in microseconds
    /// * `slot_duration_ms` - Slot length for the active numerology (1, 0.5, 0.25)
    pub fn from_time(time_us: u64, slot_duration_ms: f64) -> Result<Self, SubframeError> {
        if !(slot_duration_ms > 0.0) {
            return Err(SubframeError::InvalidSlotDuration(slot_duration_ms));
        }
        let slot_us = (slot_duration_ms * 1000.0).round() as u64;
        let shifted = time_us + (PROCESSING_DELAY_SLOTS + UL_PUSCH_TTIS_DELAY) * slot_us;
        let slots = shifted / slot_us;
        // slot numbering is one-based, index 0 is the first slot after the delay
        Ok(Self::from_index(slots.saturating_sub(1)))
    }

    /// Absolute distance between two positions.
    ///
    /// Wrap-around is only assumed when the plain frame difference exceeds
    /// `max_frame_difference`; closer positions are compared directly.
    pub fn slots_difference(a: SubframeInfo, b: SubframeInfo, max_frame_difference: u32) -> u32 {
        let (mut frame_a, mut frame_b) = (a.frame, b.frame);
        if frame_a.abs_diff(frame_b) > max_frame_difference {
            if frame_a < frame_b {
                frame_a += FRAMES_PER_CYCLE;
            } else {
                frame_b += FRAMES_PER_CYCLE;
            }
        }
        let ia = frame_a * SUBFRAMES_PER_FRAME + a.subframe;
        let ib = frame_b * SUBFRAMES_PER_FRAME + b.subframe;
        ia.abs_diff(ib)
    }
}

impl Add<u32> for SubframeInfo {
    type Output = SubframeInfo;

    fn add(self, slots: u32) -> SubframeInfo {
        self.add_slots(slots)
    }
}

impl Sub for SubframeInfo {
    type Output = u32;

    fn sub(self, now: SubframeInfo) -> u32 {
        self.slots_after(now)
    }
}

impl fmt::Display for SubframeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.frame, self.subframe)
    }
}
