//! Error types.
//!
//! Steady-state transport conditions (overrun, underrun) are not errors: they
//! are reported through the channel outcomes and counters. Only construction
//! and start-up problems surface as `Err`.

/// Local condition of a [`RingFifo`](crate::io::RingFifo) operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FifoError {
    /// The FIFO holds `capacity` samples; the write was rejected.
    Full,
    /// The FIFO holds no samples; the read was rejected.
    Empty,
}

/// Invalid buffer geometry, channel topology or filter parameters detected at
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A DMA buffer has length zero.
    EmptyBuffer,
    /// A DMA buffer cannot be split into two equal halves.
    OddBufferLength(usize),
    /// A DMA half does not match what one event produces or consumes.
    HalfLengthMismatch {
        /// Half length required by the decimator or fan-out table.
        expected: usize,
        /// Half length of the supplied buffer.
        actual: usize,
    },
    /// The fan-out stride/offset table is unusable.
    InvalidFanOut,
    /// The FIFO cannot hold one capture batch or one playback batch.
    FifoTooSmall {
        /// Minimum capacity needed.
        required: usize,
        /// Capacity of the supplied FIFO.
        capacity: usize,
    },
    /// The decimator cannot be built for this many PDM words per sample.
    UnsupportedDecimation(usize),
    /// FIR design needs an odd, non-zero tap count.
    InvalidTapCount(usize),
    /// FIR cutoff outside `(0, π]` radians per sample.
    CutoffOutOfRange,
}

/// Fatal start-up failure. No audio path can be trusted after one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError<E> {
    /// The codec rejected or failed its bring-up sequence.
    Codec(E),
    /// The pipeline configuration is inconsistent.
    Config(ConfigError),
}

impl<E> From<ConfigError> for InitError<E> {
    fn from(err: ConfigError) -> Self {
        InitError::Config(err)
    }
}
