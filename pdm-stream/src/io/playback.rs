//! DMA-driven PCM playback.
//!
//! [`PlaybackChannel`] refills whichever half of the transmit DMA buffer the
//! hardware just finished sending. Each input sample popped from the FIFO is
//! spread over one output frame by a [`FanOut`] table.
//!
//! ```text
//! RingFifo                 TX DMA buffer (i16 slots)             Codec
//! ┌──────────┐  fan-out   ┌─────────────┬─────────────┐        ┌──────┐
//! │ i16 PCM  │───────────►│ Half A      │ Half B      │──DMA──►│ I2S  │
//! │ samples  │            │ s0 s0 s1 s1 │ ...         │        │      │
//! └──────────┘            └─────────────┴─────────────┘        └──────┘
//! ```
//!
//! A half is only rewritten when the FIFO holds a complete batch
//! (`half_len / stride` samples). Otherwise the channel reports an underrun
//! and applies its [`UnderrunPolicy`].

use crate::error::ConfigError;

use super::dma::{DmaFlag, DmaHalf, DoubleBuffer};
use super::fan_out::FanOut;
use super::fifo::RingFifo;

/// What to do with a half that cannot be refilled in full.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UnderrunPolicy {
    /// Leave the half as it is; the DMA replays its previous content.
    #[default]
    RepeatLast,
    /// Zero the half.
    Silence,
}

/// What servicing one playback half did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlaybackOutcome {
    /// A full batch was written.
    Filled { half: DmaHalf },
    /// Fewer than a batch of samples was queued; nothing was consumed.
    Underrun { half: DmaHalf, available: usize },
}

/// Running totals for a playback channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlaybackStats {
    /// Halves serviced, filled or not.
    pub batches: u32,
    pub underruns: u32,
}

/// PCM transmit channel.
pub struct PlaybackChannel<'a> {
    flag: &'a DmaFlag,
    buffer: DoubleBuffer<'a, i16>,
    fan_out: FanOut,
    on_underrun: UnderrunPolicy,
    stats: PlaybackStats,
}

impl<'a> PlaybackChannel<'a> {
    /// Create a playback channel over `storage`.
    ///
    /// Each half must be a whole number of `fan_out.stride()` frames.
    pub fn new(
        flag: &'a DmaFlag,
        storage: &'a mut [i16],
        fan_out: FanOut,
        on_underrun: UnderrunPolicy,
    ) -> Result<Self, ConfigError> {
        let buffer = DoubleBuffer::new(storage)?;
        let half_len = buffer.half_len();
        if half_len % fan_out.stride() != 0 {
            let frames = half_len / fan_out.stride();
            return Err(ConfigError::HalfLengthMismatch {
                expected: frames * fan_out.stride(),
                actual: half_len,
            });
        }

        Ok(PlaybackChannel {
            flag,
            buffer,
            fan_out,
            on_underrun,
            stats: PlaybackStats::default(),
        })
    }

    /// Input samples consumed per serviced half.
    pub fn batch_len(&self) -> usize {
        self.fan_out.frames(self.buffer.half_len())
    }

    /// Service the pending half, if any.
    pub fn poll(&mut self, fifo: &mut RingFifo<'_>) -> Option<PlaybackOutcome> {
        let half = self.flag.take()?;
        Some(self.service(half, fifo))
    }

    /// Refill `half` from `fifo`, or apply the underrun policy.
    pub fn service(&mut self, half: DmaHalf, fifo: &mut RingFifo<'_>) -> PlaybackOutcome {
        self.stats.batches = self.stats.batches.wrapping_add(1);

        let needed = self.batch_len();
        let available = fifo.len();
        if available < needed {
            self.stats.underruns = self.stats.underruns.wrapping_add(1);

            #[cfg(feature = "defmt")]
            defmt::warn!(
                "playback underrun on {}: {} of {} samples queued",
                half,
                available,
                needed
            );

            if self.on_underrun == UnderrunPolicy::Silence {
                self.buffer.half_mut(half).fill(0);
            }
            return PlaybackOutcome::Underrun { half, available };
        }

        let fan_out = self.fan_out;
        for frame in self
            .buffer
            .half_mut(half)
            .chunks_exact_mut(fan_out.stride())
        {
            // `available >= needed` was checked above
            if let Ok(sample) = fifo.read() {
                fan_out.spread(frame, sample);
            }
        }

        PlaybackOutcome::Filled { half }
    }

    pub fn stats(&self) -> PlaybackStats {
        self.stats
    }

    pub fn fan_out(&self) -> FanOut {
        self.fan_out
    }

    pub fn underrun_policy(&self) -> UnderrunPolicy {
        self.on_underrun
    }

    /// The event flag this channel consumes.
    pub fn flag(&self) -> &'a DmaFlag {
        self.flag
    }

    /// The transmit buffer, for priming and programming the DMA controller.
    pub fn dma_buffer(&mut self) -> &mut DoubleBuffer<'a, i16> {
        &mut self.buffer
    }
}
