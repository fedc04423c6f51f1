//! DMA-driven PDM capture.
//!
//! [`CaptureChannel`] owns the receive side of the pipeline: the raw PDM
//! double buffer filled by the serial-audio DMA, the decimation transform
//! that turns each half into PCM, and the processing hook that sees every
//! batch before it is queued.
//!
//! ## Architecture
//!
//! ```text
//! Microphone           RX DMA buffer (u16 words)           RingFifo
//! ┌─────────┐         ┌──────────┬──────────┐           ┌──────────┐
//! │ PDM bit │──DMA──►│  Half A   │  Half B   │─decimate─►│ i16 PCM  │
//! │ stream  │         │ N·W words │ N·W words │  + hook   │ samples  │
//! └─────────┘         └──────────┴──────────┘           └──────────┘
//! ```
//!
//! `W` is [`Decimate::input_words(1)`](Decimate::input_words) and `N` the PCM
//! batch size. Each half-complete or transfer-complete event produces exactly
//! one batch of `N` samples.
//!
//! ## Usage
//!
//! ```ignore
//! static RX_FLAG: DmaFlag = DmaFlag::new();
//! static mut RX_DMA: [u16; RX_DMA_WORDS] = [0; RX_DMA_WORDS];
//!
//! let decimator = CicDecimator::<4>::new(PDM_WORDS_PER_SAMPLE)?;
//! let mut capture: CaptureChannel<_, _, PCM_SAMPLES_PER_HALF> =
//!     CaptureChannel::new(&RX_FLAG, rx_storage, decimator, ())?;
//!
//! // DMA RX ISR:
//! RX_FLAG.half_complete(); // or transfer_complete()
//!
//! // Polling loop:
//! capture.poll(&mut fifo);
//! ```

use crate::error::ConfigError;
use crate::transform::{Decimate, ProcessHook};

use super::dma::{DmaFlag, DmaHalf, DoubleBuffer};
use super::fifo::RingFifo;

/// What servicing one capture half did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CaptureOutcome {
    /// The whole batch was queued.
    Stored { half: DmaHalf },
    /// The FIFO filled up; the tail of the batch was discarded.
    Overrun { half: DmaHalf, dropped: usize },
}

/// Running totals for a capture channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CaptureStats {
    /// Halves serviced.
    pub batches: u32,
    /// Batches that could not be queued in full.
    pub overruns: u32,
    /// Samples discarded across all overruns.
    pub dropped_samples: u32,
}

/// PDM receive channel producing `N` PCM samples per DMA half.
pub struct CaptureChannel<'a, D, H, const N: usize>
where
    D: Decimate,
    H: ProcessHook,
{
    flag: &'a DmaFlag,
    buffer: DoubleBuffer<'a, u16>,
    decimator: D,
    hook: H,
    /// Scratch for the batch being decoded.
    pcm: [i16; N],
    stats: CaptureStats,
}

impl<'a, D, H, const N: usize> CaptureChannel<'a, D, H, N>
where
    D: Decimate,
    H: ProcessHook,
{
    /// Create a capture channel over `storage`.
    ///
    /// Each half of `storage` must hold exactly the PDM words the decimator
    /// consumes for `N` samples.
    pub fn new(
        flag: &'a DmaFlag,
        storage: &'a mut [u16],
        decimator: D,
        hook: H,
    ) -> Result<Self, ConfigError> {
        let buffer = DoubleBuffer::new(storage)?;
        let expected = decimator.input_words(N);
        if buffer.half_len() != expected {
            return Err(ConfigError::HalfLengthMismatch {
                expected,
                actual: buffer.half_len(),
            });
        }

        Ok(CaptureChannel {
            flag,
            buffer,
            decimator,
            hook,
            pcm: [0; N],
            stats: CaptureStats::default(),
        })
    }

    /// Service the pending half, if any.
    ///
    /// Returns `None` without touching any buffer when no event is pending.
    pub fn poll(&mut self, fifo: &mut RingFifo<'_>) -> Option<CaptureOutcome> {
        let half = self.flag.take()?;
        Some(self.service(half, fifo))
    }

    /// Decode `half`, run the hook on the batch, and queue it.
    pub fn service(&mut self, half: DmaHalf, fifo: &mut RingFifo<'_>) -> CaptureOutcome {
        self.decimator
            .decimate(self.buffer.half(half), &mut self.pcm);
        self.hook.process(&self.pcm);

        self.stats.batches = self.stats.batches.wrapping_add(1);

        let written = fifo.write_block(&self.pcm);
        if written == N {
            return CaptureOutcome::Stored { half };
        }

        let dropped = N - written;
        self.stats.overruns = self.stats.overruns.wrapping_add(1);
        self.stats.dropped_samples = self.stats.dropped_samples.wrapping_add(dropped as u32);

        #[cfg(feature = "defmt")]
        defmt::warn!("capture overrun on {}: dropped {} samples", half, dropped);

        CaptureOutcome::Overrun { half, dropped }
    }

    pub fn stats(&self) -> CaptureStats {
        self.stats
    }

    /// The event flag this channel consumes.
    pub fn flag(&self) -> &'a DmaFlag {
        self.flag
    }

    /// The raw PDM buffer, for programming the DMA controller.
    pub fn dma_buffer(&mut self) -> &mut DoubleBuffer<'a, u16> {
        &mut self.buffer
    }

    /// The application hook.
    pub fn hook(&self) -> &H {
        &self.hook
    }

    /// The application hook, mutably.
    pub fn hook_mut(&mut self) -> &mut H {
        &mut self.hook
    }
}
