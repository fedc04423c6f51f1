//! Fixed-capacity PCM sample FIFO.
//!
//! Decouples the capture cadence (one batch per PDM DMA half) from the
//! playback cadence (one batch per PCM DMA half). Both ends are driven from
//! the same polling context, so the FIFO is accessed through `&mut self` and
//! needs no atomics or locks.
//!
//! # Contract
//!
//! - Only ONE role writes (the capture channel) and ONE role reads (the
//!   playback channel).
//! - A full FIFO rejects writes; stored samples are never overwritten.
//! - An empty FIFO rejects reads.

use crate::error::FifoError;

/// A circular buffer of `i16` samples over caller-owned storage.
///
/// The usable capacity is the full storage length (an explicit element count
/// disambiguates full from empty, so no slot is reserved).
pub struct RingFifo<'a> {
    storage: &'a mut [i16],
    /// Next slot to write.
    write: usize,
    /// Next slot to read.
    read: usize,
    /// Samples currently stored.
    count: usize,
}

impl<'a> RingFifo<'a> {
    /// Bind a FIFO to `storage`. The capacity is `storage.len()`.
    pub fn new(storage: &'a mut [i16]) -> Self {
        RingFifo {
            storage,
            write: 0,
            read: 0,
            count: 0,
        }
    }

    /// Discard all stored samples and rewind both cursors.
    pub fn reset(&mut self) {
        self.write = 0;
        self.read = 0;
        self.count = 0;
    }

    /// Append one sample.
    ///
    /// Returns [`FifoError::Full`] without touching any state if the FIFO
    /// already holds `capacity` samples.
    pub fn write(&mut self, sample: i16) -> Result<(), FifoError> {
        if self.count == self.storage.len() {
            return Err(FifoError::Full);
        }

        self.storage[self.write] = sample;
        self.write = (self.write + 1) % self.storage.len();
        self.count += 1;
        Ok(())
    }

    /// Remove and return the oldest sample.
    ///
    /// Returns [`FifoError::Empty`] if no sample is stored.
    pub fn read(&mut self) -> Result<i16, FifoError> {
        if self.count == 0 {
            return Err(FifoError::Empty);
        }

        let sample = self.storage[self.read];
        self.read = (self.read + 1) % self.storage.len();
        self.count -= 1;
        Ok(sample)
    }

    /// Append as many of `samples` as fit, in order.
    ///
    /// Stops the moment the FIFO becomes full. Returns the number written,
    /// which is exactly `min(samples.len(), self.free())`.
    pub fn write_block(&mut self, samples: &[i16]) -> usize {
        let mut written = 0;
        for &sample in samples {
            if self.write(sample).is_err() {
                break;
            }
            written += 1;
        }
        written
    }

    /// Remove up to `buffer.len()` samples into `buffer`, oldest first.
    ///
    /// Returns the number read, which is exactly `min(buffer.len(), self.len())`.
    /// Slots of `buffer` past the returned count are left untouched.
    pub fn read_block(&mut self, buffer: &mut [i16]) -> usize {
        let mut read = 0;
        for slot in buffer.iter_mut() {
            match self.read() {
                Ok(sample) => *slot = sample,
                Err(_) => break,
            }
            read += 1;
        }
        read
    }

    /// Number of samples currently stored.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Total number of samples the FIFO can hold.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Number of samples that can be written before the FIFO is full.
    pub fn free(&self) -> usize {
        self.storage.len() - self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == self.storage.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_order() {
        let mut storage = [0i16; 8];
        let mut fifo = RingFifo::new(&mut storage);

        for s in [1, 2, 3, 4, 5] {
            fifo.write(s).unwrap();
        }
        assert_eq!(fifo.len(), 5);

        for expected in [1, 2, 3, 4, 5] {
            assert_eq!(fifo.read(), Ok(expected));
        }
        assert_eq!(fifo.read(), Err(FifoError::Empty));
        assert!(fifo.is_empty());
    }

    #[test]
    fn write_when_full_is_rejected() {
        let mut storage = [0i16; 4];
        let mut fifo = RingFifo::new(&mut storage);

        for s in [1, 2, 3, 4] {
            assert_eq!(fifo.write(s), Ok(()));
        }
        assert!(fifo.is_full());

        assert_eq!(fifo.write(5), Err(FifoError::Full));
        assert_eq!(fifo.len(), 4);

        // Stored data survives the rejected write
        assert_eq!(fifo.read(), Ok(1));
    }

    #[test]
    fn empty_read_leaves_state_unchanged() {
        let mut storage = [0i16; 3];
        let mut fifo = RingFifo::new(&mut storage);
        assert_eq!(fifo.read(), Err(FifoError::Empty));
        assert_eq!(fifo.read(), Err(FifoError::Empty));
        assert_eq!(fifo.len(), 0);

        fifo.write(7).unwrap();
        assert_eq!(fifo.read(), Ok(7));
    }

    #[test]
    fn wraparound() {
        let mut storage = [0i16; 3];
        let mut fifo = RingFifo::new(&mut storage);

        fifo.write_block(&[1, 2, 3]);
        assert_eq!(fifo.read(), Ok(1));

        // Reuses the slot freed by the read above
        fifo.write(4).unwrap();
        assert!(fifo.is_full());

        assert_eq!(fifo.read(), Ok(2));
        assert_eq!(fifo.read(), Ok(3));

        fifo.write(5).unwrap();
        assert_eq!(fifo.read(), Ok(4));
        assert_eq!(fifo.read(), Ok(5));
        assert!(fifo.is_empty());
    }

    #[test]
    fn repeated_fill_and_drain() {
        let mut storage = [0i16; 3];
        let mut fifo = RingFifo::new(&mut storage);

        for round in 0..10i16 {
            let base = round * 100;
            assert_eq!(fifo.write_block(&[base + 1, base + 2]), 2);
            assert_eq!(fifo.read(), Ok(base + 1));
            assert_eq!(fifo.read(), Ok(base + 2));
            assert!(fifo.is_empty());
        }
    }

    #[test]
    fn write_block_reports_partial_writes() {
        let block = [9i16; 7];
        let mut storage = [0i16; 5];
        let mut fifo = RingFifo::new(&mut storage);

        for c in 0..=5usize {
            for n in 0..=7usize {
                fifo.reset();
                for i in 0..c {
                    fifo.write(i as i16).unwrap();
                }

                let written = fifo.write_block(&block[..n]);
                let expected = n.min(5 - c);
                assert_eq!(written, expected, "c={c} n={n}");
                assert_eq!(fifo.len(), c + expected, "c={c} n={n}");
            }
        }
    }

    #[test]
    fn write_block_stops_exactly_at_capacity() {
        let mut storage = [0i16; 4];
        let mut fifo = RingFifo::new(&mut storage);
        fifo.write(10).unwrap();

        assert_eq!(fifo.write_block(&[20, 30, 40, 50, 60]), 3);
        assert!(fifo.is_full());
        assert_eq!(fifo.write_block(&[70]), 0);

        let mut out = [0i16; 4];
        assert_eq!(fifo.read_block(&mut out), 4);
        assert_eq!(out, [10, 20, 30, 40]);
    }

    #[test]
    fn read_block_is_symmetric() {
        let mut storage = [0i16; 6];
        let mut fifo = RingFifo::new(&mut storage);
        fifo.write_block(&[1, 2, 3]);

        let mut out = [-1i16; 5];
        assert_eq!(fifo.read_block(&mut out), 3);
        assert_eq!(out, [1, 2, 3, -1, -1]);
        assert_eq!(fifo.read_block(&mut out), 0);
    }

    #[test]
    fn len_and_free_track_each_operation() {
        let mut storage = [0i16; 4];
        let mut fifo = RingFifo::new(&mut storage);
        assert_eq!((fifo.len(), fifo.free()), (0, 4));

        fifo.write(1).unwrap();
        fifo.write(2).unwrap();
        assert_eq!((fifo.len(), fifo.free()), (2, 2));

        fifo.read().unwrap();
        assert_eq!((fifo.len(), fifo.free()), (1, 3));
        assert_eq!(fifo.capacity(), 4);
    }

    #[test]
    fn interleaved_operations_match_model() {
        // Deterministic pseudo-random sequence of writes and reads checked
        // against a plain array model.
        let mut storage = [0i16; 7];
        let mut fifo = RingFifo::new(&mut storage);

        let mut model = [0i16; 64];
        let (mut head, mut tail) = (0usize, 0usize);
        let mut next = 0i16;
        let mut lcg: u32 = 0x1234_5678;

        for _ in 0..500 {
            lcg = lcg.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            if (lcg >> 16) % 3 != 0 {
                match fifo.write(next) {
                    Ok(()) => {
                        model[head % 64] = next;
                        head += 1;
                    }
                    Err(e) => {
                        assert_eq!(e, FifoError::Full);
                        assert_eq!(head - tail, 7);
                    }
                }
                next = next.wrapping_add(1);
            } else {
                match fifo.read() {
                    Ok(s) => {
                        assert_eq!(s, model[tail % 64]);
                        tail += 1;
                    }
                    Err(e) => {
                        assert_eq!(e, FifoError::Empty);
                        assert_eq!(head, tail);
                    }
                }
            }
            assert!(fifo.len() <= fifo.capacity());
            assert_eq!(fifo.len(), head - tail);
        }
    }

    #[test]
    fn zero_capacity_rejects_everything() {
        let mut storage: [i16; 0] = [];
        let mut fifo = RingFifo::new(&mut storage);
        assert_eq!(fifo.write(1), Err(FifoError::Full));
        assert_eq!(fifo.read(), Err(FifoError::Empty));
        assert_eq!(fifo.write_block(&[1, 2]), 0);
    }
}
