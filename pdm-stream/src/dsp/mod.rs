//! PDM decoding and PCM filtering.
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`CicDecimator`] | 1-bit PDM → `i16` PCM, implements [`Decimate`](crate::transform::Decimate) |
//! | [`fir_lowpass`] / [`FirFilter`] | Truncated-sinc low-pass design and filtering |
//! | [`Filtered`] | A decimator followed by a FIR stage |
//! | [`helpers`] | `i16` ↔ `f32` conversion and Q15 arithmetic |
//!
//! # Feature gate
//!
//! This module is available when the `dsp` feature is enabled (on by default).

pub mod cic;
pub mod fir;
pub mod helpers;
pub mod intrinsics;

pub use cic::CicDecimator;
pub use fir::{fir_lowpass, Filtered, FirFilter};
