//! Mono-to-multichannel fan-out for the playback DMA buffer.
//!
//! The playback DMA buffer holds interleaved frames of `stride` `i16` slots.
//! A [`FanOut`] names which slots of a frame receive a copy of each input
//! sample; slots not named keep whatever they held.
//!
//! ## Layouts
//!
//! | Table | Stride | Offsets | Frame after `spread(s)` |
//! |-------|--------|---------|-------------------------|
//! | [`FanOut::MONO`] | 1 | `{0}` | `[s]` |
//! | [`FanOut::STEREO`] | 2 | `{0, 1}` | `[s, s]` |
//! | `FanOut::new(2, &[0])` | 2 | `{0}` | `[s, unchanged]` |

use crate::error::ConfigError;

/// Maximum number of offsets in one table.
pub const MAX_LANES: usize = 8;

/// Stride/offset table mapping one input sample to output slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FanOut {
    stride: usize,
    offsets: [usize; MAX_LANES],
    lanes: usize,
}

impl FanOut {
    /// One input sample per output slot.
    pub const MONO: FanOut = FanOut::duplicate(1);

    /// Mono duplicated into both slots of a stereo frame.
    pub const STEREO: FanOut = FanOut::duplicate(2);

    /// Copy each sample into every slot of a `lanes`-wide frame.
    ///
    /// # Panics
    ///
    /// If `lanes` is zero or greater than [`MAX_LANES`]. Evaluated at compile
    /// time when used in a `const`.
    pub const fn duplicate(lanes: usize) -> FanOut {
        assert!(lanes > 0 && lanes <= MAX_LANES, "lane count out of range");

        let mut offsets = [0; MAX_LANES];
        let mut i = 0;
        while i < lanes {
            offsets[i] = i;
            i += 1;
        }
        FanOut {
            stride: lanes,
            offsets,
            lanes,
        }
    }

    /// Build a table from an explicit offset list.
    ///
    /// Every offset must be below `stride`, and there must be between 1 and
    /// [`MAX_LANES`] of them.
    pub fn new(stride: usize, offsets: &[usize]) -> Result<FanOut, ConfigError> {
        if stride == 0 || offsets.is_empty() || offsets.len() > MAX_LANES {
            return Err(ConfigError::InvalidFanOut);
        }
        if offsets.iter().any(|&o| o >= stride) {
            return Err(ConfigError::InvalidFanOut);
        }

        let mut table = [0; MAX_LANES];
        table[..offsets.len()].copy_from_slice(offsets);
        Ok(FanOut {
            stride,
            offsets: table,
            lanes: offsets.len(),
        })
    }

    /// Slots per output frame.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Slots within a frame that receive the sample.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets[..self.lanes]
    }

    /// Input samples needed to fill `slots` output slots.
    pub fn frames(&self, slots: usize) -> usize {
        slots / self.stride
    }

    /// Write `sample` into every configured slot of `frame`.
    ///
    /// # Panics
    ///
    /// Debug-asserts that `frame` is exactly one stride long.
    #[inline]
    pub fn spread(&self, frame: &mut [i16], sample: i16) {
        debug_assert_eq!(frame.len(), self.stride);

        for &offset in self.offsets() {
            frame[offset] = sample;
        }
    }
}
