//! Interrupt-to-loop event signaling and half-split DMA buffers.
//!
//! A circular DMA transfer raises two interrupts per pass over its buffer:
//! half-complete (first half done, DMA now on the second half) and
//! transfer-complete (second half done, DMA back on the first half). The ISR
//! records which half became available in a [`DmaFlag`] and returns; the
//! polling loop takes the flag and services that half through a
//! [`DoubleBuffer`].
//!
//! ```text
//!            half_complete()        transfer_complete()
//! ISR ──────────────┬──────────────────────┬─────────────►
//!                   ▼                      ▼
//! DmaFlag    FirstHalfReady          SecondHalfReady
//!                   │ take()               │ take()
//! loop ─────────────▼──────────────────────▼─────────────►
//!            service(First)          service(Second)
//! ```

use core::sync::atomic::{AtomicU32, AtomicU8, Ordering};

use crate::error::ConfigError;

/// One half of a double-buffered DMA region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DmaHalf {
    /// Slots `0..len/2`.
    First,
    /// Slots `len/2..len`.
    Second,
}

impl DmaHalf {
    /// The half the DMA engine is working on while software owns `self`.
    pub fn other(self) -> DmaHalf {
        match self {
            DmaHalf::First => DmaHalf::Second,
            DmaHalf::Second => DmaHalf::First,
        }
    }
}

/// Transfer state recorded by a [`DmaFlag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DmaState {
    /// No half is waiting to be serviced.
    Idle = 0,
    /// The first half is ready for software.
    FirstHalfReady = 1,
    /// The second half is ready for software.
    SecondHalfReady = 2,
}

impl DmaState {
    fn from_raw(raw: u8) -> DmaState {
        match raw {
            1 => DmaState::FirstHalfReady,
            2 => DmaState::SecondHalfReady,
            _ => DmaState::Idle,
        }
    }
}

/// Single-writer/single-reader event signal between a DMA ISR and the
/// polling loop.
///
/// The ISR side only calls [`half_complete()`](Self::half_complete) and
/// [`transfer_complete()`](Self::transfer_complete); the loop side only calls
/// [`take()`](Self::take). Both are a single atomic swap, so neither side can
/// block the other.
///
/// Place it in a `static` and hand a shared reference to the channel:
///
/// ```ignore
/// static RX_FLAG: DmaFlag = DmaFlag::new();
///
/// #[interrupt]
/// fn DMA1_STREAM3() {
///     if half_transfer { RX_FLAG.half_complete() } else { RX_FLAG.transfer_complete() }
/// }
/// ```
pub struct DmaFlag {
    state: AtomicU8,
    /// Events raised while a previous one was still pending.
    missed: AtomicU32,
}

impl DmaFlag {
    pub const fn new() -> Self {
        DmaFlag {
            state: AtomicU8::new(DmaState::Idle as u8),
            missed: AtomicU32::new(0),
        }
    }

    /// ISR entry point: the first half has been filled or drained.
    #[inline]
    pub fn half_complete(&self) {
        self.raise(DmaState::FirstHalfReady);
    }

    /// ISR entry point: the second half has been filled or drained.
    #[inline]
    pub fn transfer_complete(&self) {
        self.raise(DmaState::SecondHalfReady);
    }

    #[inline]
    fn raise(&self, state: DmaState) {
        let previous = self.state.swap(state as u8, Ordering::AcqRel);
        // The loop did not take the previous event before this one: that half
        // was never serviced within its deadline.
        if previous != DmaState::Idle as u8 {
            self.missed.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Read and clear the pending event.
    ///
    /// Returns the half that became available, or `None` if the flag was
    /// idle. Clearing happens before the caller touches the buffer, so an
    /// event raised during servicing is kept for the next poll.
    #[inline]
    pub fn take(&self) -> Option<DmaHalf> {
        match DmaState::from_raw(self.state.swap(DmaState::Idle as u8, Ordering::AcqRel)) {
            DmaState::Idle => None,
            DmaState::FirstHalfReady => Some(DmaHalf::First),
            DmaState::SecondHalfReady => Some(DmaHalf::Second),
        }
    }

    /// Current state without clearing it.
    pub fn peek(&self) -> DmaState {
        DmaState::from_raw(self.state.load(Ordering::Acquire))
    }

    /// Number of events that overwrote an unserviced one.
    pub fn missed(&self) -> u32 {
        self.missed.load(Ordering::Relaxed)
    }
}

impl Default for DmaFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// A DMA region viewed as two equal halves.
///
/// The storage is caller-owned (normally a `static` placed in DMA-capable
/// RAM) and never resized.
pub struct DoubleBuffer<'a, T> {
    storage: &'a mut [T],
}

impl<'a, T> DoubleBuffer<'a, T> {
    /// Wrap `storage`, which must be non-empty and of even length.
    pub fn new(storage: &'a mut [T]) -> Result<Self, ConfigError> {
        if storage.is_empty() {
            return Err(ConfigError::EmptyBuffer);
        }
        if storage.len() % 2 != 0 {
            return Err(ConfigError::OddBufferLength(storage.len()));
        }
        Ok(DoubleBuffer { storage })
    }

    /// Total length in elements.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Length of one half in elements.
    pub fn half_len(&self) -> usize {
        self.storage.len() / 2
    }

    /// Borrow one half.
    pub fn half(&self, half: DmaHalf) -> &[T] {
        let mid = self.half_len();
        match half {
            DmaHalf::First => &self.storage[..mid],
            DmaHalf::Second => &self.storage[mid..],
        }
    }

    /// Mutably borrow one half.
    pub fn half_mut(&mut self, half: DmaHalf) -> &mut [T] {
        let mid = self.half_len();
        match half {
            DmaHalf::First => &mut self.storage[..mid],
            DmaHalf::Second => &mut self.storage[mid..],
        }
    }

    /// The whole region, e.g. for priming before DMA starts.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.storage[..]
    }

    /// Start address for programming the DMA controller.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.storage.as_mut_ptr()
    }
}
