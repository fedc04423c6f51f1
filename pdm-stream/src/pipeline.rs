//! Cooperative scheduler for the capture → playback stream.
//!
//! [`PipelineScheduler`] owns both channels and the FIFO between them. One
//! call to [`poll()`](PipelineScheduler::poll) services whichever DMA halves
//! became ready since the last call: capture first, so a batch decoded in
//! this iteration is already available to playback in the same iteration.
//!
//! ```text
//!          RX ISR                               TX ISR
//!            │ half/transfer complete              │ half/transfer complete
//!            ▼                                     ▼
//!        RX DmaFlag                            TX DmaFlag
//!            │                                     │
//! poll() ────┴─► CaptureChannel ─► RingFifo ─► PlaybackChannel ◄─┘
//! ```
//!
//! ## Start-up
//!
//! ```ignore
//! bring_up(&mut codec, &CodecConfig::default()).unwrap_or_else(|_| fault::halt(led, delay));
//! let mut pipeline = PipelineScheduler::new(capture, playback, fifo)?;
//! // start both DMA streams, then:
//! pipeline.run(cortex_m::asm::wfi);
//! ```

use crate::control::{AudioCodec, CodecConfig};
use crate::error::{ConfigError, InitError};
use crate::io::{
    CaptureChannel, CaptureOutcome, CaptureStats, PlaybackChannel, PlaybackOutcome, PlaybackStats,
    RingFifo,
};
use crate::transform::{Decimate, ProcessHook};

/// What one scheduler iteration serviced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollReport {
    pub capture: Option<CaptureOutcome>,
    pub playback: Option<PlaybackOutcome>,
}

impl PollReport {
    /// `true` if neither channel had a pending half.
    pub fn is_idle(&self) -> bool {
        self.capture.is_none() && self.playback.is_none()
    }
}

/// Snapshot of every counter in the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PipelineStats {
    pub capture: CaptureStats,
    pub playback: PlaybackStats,
    /// Capture events overwritten before they were serviced.
    pub capture_missed: u32,
    /// Playback events overwritten before they were serviced.
    pub playback_missed: u32,
    /// Samples queued at the time of the snapshot.
    pub fifo_level: usize,
}

/// The polling loop's view of the whole stream.
pub struct PipelineScheduler<'a, D, H, const N: usize>
where
    D: Decimate,
    H: ProcessHook,
{
    capture: CaptureChannel<'a, D, H, N>,
    playback: PlaybackChannel<'a>,
    fifo: RingFifo<'a>,
}

impl<'a, D, H, const N: usize> PipelineScheduler<'a, D, H, N>
where
    D: Decimate,
    H: ProcessHook,
{
    /// Assemble a pipeline.
    ///
    /// The FIFO must hold at least one capture batch (`N`) and one playback
    /// batch.
    pub fn new(
        capture: CaptureChannel<'a, D, H, N>,
        playback: PlaybackChannel<'a>,
        fifo: RingFifo<'a>,
    ) -> Result<Self, ConfigError> {
        let required = N.max(playback.batch_len());
        if fifo.capacity() < required {
            return Err(ConfigError::FifoTooSmall {
                required,
                capacity: fifo.capacity(),
            });
        }

        Ok(PipelineScheduler {
            capture,
            playback,
            fifo,
        })
    }

    /// One non-blocking iteration: service capture, then playback.
    pub fn poll(&mut self) -> PollReport {
        let capture = self.capture.poll(&mut self.fifo);
        let playback = self.playback.poll(&mut self.fifo);
        PollReport { capture, playback }
    }

    /// Poll forever, calling `idle` after every iteration that found nothing
    /// to do (typically `wfi`).
    pub fn run<F>(&mut self, mut idle: F) -> !
    where
        F: FnMut(),
    {
        #[cfg(feature = "defmt")]
        let mut missed = (0u32, 0u32);

        loop {
            if self.poll().is_idle() {
                idle();
            }

            #[cfg(feature = "defmt")]
            {
                let now = (
                    self.capture.flag().missed(),
                    self.playback.flag().missed(),
                );
                if now != missed {
                    defmt::warn!("missed DMA events: capture {}, playback {}", now.0, now.1);
                    missed = now;
                }
            }
        }
    }

    pub fn stats(&self) -> PipelineStats {
        PipelineStats {
            capture: self.capture.stats(),
            playback: self.playback.stats(),
            capture_missed: self.capture.flag().missed(),
            playback_missed: self.playback.flag().missed(),
            fifo_level: self.fifo.len(),
        }
    }

    pub fn capture(&mut self) -> &mut CaptureChannel<'a, D, H, N> {
        &mut self.capture
    }

    pub fn playback(&mut self) -> &mut PlaybackChannel<'a> {
        &mut self.playback
    }

    pub fn fifo(&mut self) -> &mut RingFifo<'a> {
        &mut self.fifo
    }

    /// Take the pipeline apart again.
    pub fn into_parts(self) -> (CaptureChannel<'a, D, H, N>, PlaybackChannel<'a>, RingFifo<'a>) {
        (self.capture, self.playback, self.fifo)
    }
}

/// Codec start-up: `init`, `configure`, `start`.
///
/// Any failure is fatal to the audio path; the caller is expected to stop
/// and signal it, e.g. with [`fault::halt`](crate::fault::halt).
pub fn bring_up<C>(codec: &mut C, config: &CodecConfig) -> Result<(), InitError<C::Error>>
where
    C: AudioCodec,
{
    codec.init().map_err(InitError::Codec)?;
    codec.configure(config).map_err(InitError::Codec)?;
    codec.start().map_err(InitError::Codec)?;

    #[cfg(feature = "defmt")]
    defmt::info!("codec started: {}", config);

    Ok(())
}
