//! CS43L22 audio codec driver module.
//!
//! Provides a driver for the Cirrus Logic CS43L22 stereo DAC with class-D
//! speaker and headphone amplifiers, configured as an I2S slave receiving
//! the playback stream.
//!
//! # Feature gate
//!
//! This module is available when the `cs43l22` feature is enabled (on by default).

pub(crate) mod registers;
mod cs43l22;

pub use cs43l22::{Cs43l22, Cs43l22Error};
