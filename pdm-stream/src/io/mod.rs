//! DMA-driven I/O for the capture → playback stream.
//!
//! This module provides the interrupt-to-loop event flags, the two DMA
//! channels, and the FIFO that decouples them.
//!
//! ## Components
//!
//! | Component | Side | Description |
//! |-----------|------|-------------|
//! | [`DmaFlag`] | ISR → loop | Three-state half/transfer-complete signal |
//! | [`DoubleBuffer`] | both | A DMA region split into two halves |
//! | [`CaptureChannel`] | RX | PDM half → decimate → hook → FIFO |
//! | [`PlaybackChannel`] | TX | FIFO → fan-out → PCM half |
//! | [`RingFifo`] | loop | Fixed-capacity `i16` sample queue |
//!
//! ## Utilities
//!
//! - [`fan_out`]: stride/offset tables for mono → multichannel frames
//!
//! ## DMA Buffer Layout
//!
//! Both channels use circular DMA buffers split into two halves:
//! - The DMA controller fires half-complete after the first half and
//!   transfer-complete after the second, then wraps
//! - The ISR only records the event; the polling loop services the half the
//!   DMA has just left while the hardware works on the other one

pub mod dma;
pub mod fan_out;
pub mod fifo;
pub mod capture;
pub mod playback;

pub use dma::{DmaFlag, DmaHalf, DmaState, DoubleBuffer};
pub use fan_out::FanOut;
pub use fifo::RingFifo;
pub use capture::{CaptureChannel, CaptureOutcome, CaptureStats};
pub use playback::{PlaybackChannel, PlaybackOutcome, PlaybackStats, UnderrunPolicy};

#[cfg(test)]
mod integration_tests;
