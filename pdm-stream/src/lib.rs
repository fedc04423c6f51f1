//! # pdm-stream
//!
//! A `no_std`, zero-allocation PDM microphone → PCM codec streaming pipeline
//! for DMA-equipped microcontrollers. Two circular DMA transfers (PDM in, PCM
//! out) signal half/transfer-complete events through atomic flags; a
//! cooperative polling loop decimates each captured half, queues the samples
//! in a FIFO, and refills the transmit buffer from it.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Signaling | [`io::dma`] | `DmaFlag` ISR → loop events, `DoubleBuffer` halves |
//! | Buffering | [`io::fifo`] | `RingFifo` over caller-owned storage |
//! | Channels | [`io::capture`] / [`io::playback`] | Per-half DMA servicing |
//! | Scheduling | [`pipeline`] | `PipelineScheduler` and codec `bring_up` |
//! | Trait | [`transform`] / [`control`] | `Decimate`, `ProcessHook`, `AudioCodec` |
//! | Codec | [`codec`] | CS43L22 driver (feature-gated) |
//! | DSP | [`dsp`] | CIC decimator, FIR low-pass (feature-gated) |
//! | Fault | [`fault`] | Blinking halt on start-up failure |
//!
//! ## Quick start
//!
//! ```ignore
//! use pdm_stream::constants::*;
//! use pdm_stream::dsp::CicDecimator;
//! use pdm_stream::io::*;
//! use pdm_stream::pipeline::{bring_up, PipelineScheduler};
//!
//! static RX_FLAG: DmaFlag = DmaFlag::new();
//! static TX_FLAG: DmaFlag = DmaFlag::new();
//!
//! bring_up(&mut codec, &CodecConfig::default()).unwrap_or_else(|_| fault::halt(led, delay));
//!
//! let capture: CaptureChannel<_, _, PCM_SAMPLES_PER_HALF> = CaptureChannel::new(
//!     &RX_FLAG,
//!     rx_storage,
//!     CicDecimator::<4>::new(PDM_WORDS_PER_SAMPLE)?,
//!     |pcm: &[i16]| { /* inspect each batch */ },
//! )?;
//! let playback = PlaybackChannel::new(&TX_FLAG, tx_storage, FanOut::STEREO, UnderrunPolicy::RepeatLast)?;
//! let mut pipeline = PipelineScheduler::new(capture, playback, RingFifo::new(fifo_storage))?;
//!
//! // Start both DMA streams; their ISRs call RX_FLAG / TX_FLAG
//! // half_complete() and transfer_complete().
//! pipeline.run(cortex_m::asm::wfi);
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `dsp` | yes | CIC decimator, FIR filter, sample conversions |
//! | `cs43l22` | yes | CS43L22 codec driver |
//! | `defmt` | no | `defmt::Format` on public types, overrun/underrun logging |
//!
//! ## Audio parameters
//!
//! - **Sample rate:** 48 kHz ([`constants::AUDIO_SAMPLE_RATE`])
//! - **Batch:** 48 samples (1 ms) per DMA half ([`constants::PCM_SAMPLES_PER_HALF`])
//! - **PDM decimation:** 32 ([`constants::PDM_DECIMATION_FACTOR`])
//! - **Sample format:** `i16` (signed 16-bit)

#![no_std]

pub mod constants;
pub mod error;
pub mod control;
pub mod transform;
pub mod io;
pub mod pipeline;
pub mod fault;

#[cfg(feature = "cs43l22")]
pub mod codec;

#[cfg(feature = "dsp")]
pub mod dsp;
