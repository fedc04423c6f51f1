//! Integration tests exercising the full I/O path in software.
//!
//! These tests wire the capture channel, FIFO and playback channel together
//! and drive them by raising the DMA flags by hand, as the ISRs would:
//!
//! ```text
//! RX_FLAG → CaptureChannel.poll() → RingFifo
//!     → TX_FLAG → PlaybackChannel.poll() → [TX DMA buf]
//! ```

#[cfg(test)]
mod tests {
    use crate::io::capture::{CaptureChannel, CaptureOutcome};
    use crate::io::dma::{DmaFlag, DmaHalf};
    use crate::io::fan_out::FanOut;
    use crate::io::fifo::RingFifo;
    use crate::io::playback::{PlaybackChannel, PlaybackOutcome, UnderrunPolicy};
    use crate::transform::Decimate;

    const BATCH: usize = 16;

    /// Ignores its input and emits 10, 20, ..., 160 on every call.
    struct Ramp;

    impl Decimate for Ramp {
        fn input_words(&self, samples: usize) -> usize {
            samples * 2
        }

        fn decimate(&mut self, _pdm: &[u16], pcm: &mut [i16]) {
            for (i, out) in pcm.iter_mut().enumerate() {
                *out = (i as i16 + 1) * 10;
            }
        }
    }

    /// Emits the running sample index, so ordering across batches is visible.
    struct Counter(i16);

    impl Decimate for Counter {
        fn input_words(&self, samples: usize) -> usize {
            samples * 2
        }

        fn decimate(&mut self, _pdm: &[u16], pcm: &mut [i16]) {
            for out in pcm.iter_mut() {
                *out = self.0;
                self.0 = self.0.wrapping_add(1);
            }
        }
    }

    // ---------------------------------------------------------------
    // Capture → FIFO → stereo playback
    // ---------------------------------------------------------------
    #[test]
    fn capture_to_stereo_playback() {
        let rx_flag = DmaFlag::new();
        let tx_flag = DmaFlag::new();
        let mut rx_storage = [0u16; BATCH * 2 * 2];
        let mut tx_storage = [0i16; BATCH * 2 * 2];
        let mut fifo_storage = [0i16; 64];

        let mut capture: CaptureChannel<_, _, BATCH> =
            CaptureChannel::new(&rx_flag, &mut rx_storage, Ramp, ()).unwrap();
        let mut playback =
            PlaybackChannel::new(&tx_flag, &mut tx_storage, FanOut::STEREO, UnderrunPolicy::RepeatLast)
                .unwrap();
        let mut fifo = RingFifo::new(&mut fifo_storage);
        assert_eq!(playback.batch_len(), BATCH);

        // Step 1: two capture events queue 32 samples
        rx_flag.half_complete();
        assert!(matches!(
            capture.poll(&mut fifo),
            Some(CaptureOutcome::Stored { .. })
        ));
        rx_flag.transfer_complete();
        assert!(matches!(
            capture.poll(&mut fifo),
            Some(CaptureOutcome::Stored { .. })
        ));
        assert_eq!(fifo.len(), 2 * BATCH);

        // Step 2: one playback event consumes one batch
        tx_flag.half_complete();
        assert_eq!(
            playback.poll(&mut fifo),
            Some(PlaybackOutcome::Filled {
                half: DmaHalf::First
            })
        );
        assert_eq!(fifo.len(), BATCH);

        // Step 3: slot pair (2k, 2k+1) holds the k-th popped sample
        let tx = playback.dma_buffer().half(DmaHalf::First);
        for k in 0..BATCH {
            let expected = (k as i16 + 1) * 10;
            assert_eq!(tx[2 * k], expected, "left mismatch at frame {k}");
            assert_eq!(tx[2 * k + 1], expected, "right mismatch at frame {k}");
        }

        // The remaining batch is still in order
        let mut rest = [0i16; BATCH];
        assert_eq!(fifo.read_block(&mut rest), BATCH);
        let expected: [i16; BATCH] = core::array::from_fn(|i| (i as i16 + 1) * 10);
        assert_eq!(rest, expected);
    }

    // ---------------------------------------------------------------
    // Ordering survives many alternating cycles
    // ---------------------------------------------------------------
    #[test]
    fn sustained_stream_preserves_order() {
        let rx_flag = DmaFlag::new();
        let tx_flag = DmaFlag::new();
        let mut rx_storage = [0u16; BATCH * 2 * 2];
        let mut tx_storage = [0i16; BATCH * 2 * 2];
        let mut fifo_storage = [0i16; BATCH * 4];

        let mut capture: CaptureChannel<_, _, BATCH> =
            CaptureChannel::new(&rx_flag, &mut rx_storage, Counter(0), ()).unwrap();
        let mut playback =
            PlaybackChannel::new(&tx_flag, &mut tx_storage, FanOut::STEREO, UnderrunPolicy::Silence)
                .unwrap();
        let mut fifo = RingFifo::new(&mut fifo_storage);

        let mut next_expected = 0i16;
        let mut half = DmaHalf::First;
        for _ in 0..40 {
            match half {
                DmaHalf::First => {
                    rx_flag.half_complete();
                    tx_flag.half_complete();
                }
                DmaHalf::Second => {
                    rx_flag.transfer_complete();
                    tx_flag.transfer_complete();
                }
            }

            capture.poll(&mut fifo);
            assert_eq!(
                playback.poll(&mut fifo),
                Some(PlaybackOutcome::Filled { half })
            );

            for frame in playback.dma_buffer().half(half).chunks_exact(2) {
                assert_eq!(frame, &[next_expected, next_expected]);
                next_expected += 1;
            }
            half = half.other();
        }

        assert_eq!(capture.stats().overruns, 0);
        assert_eq!(playback.stats().underruns, 0);
        assert!(fifo.is_empty());
    }

    // ---------------------------------------------------------------
    // Underrun before capture has produced a full batch
    // ---------------------------------------------------------------
    #[test]
    fn playback_before_capture_underruns() {
        let tx_flag = DmaFlag::new();
        let mut tx_storage = [0i16; BATCH * 2 * 2];
        for (i, slot) in tx_storage.iter_mut().enumerate() {
            *slot = i as i16;
        }
        let before = tx_storage;

        let mut playback =
            PlaybackChannel::new(&tx_flag, &mut tx_storage, FanOut::STEREO, UnderrunPolicy::RepeatLast)
                .unwrap();
        let mut fifo_storage = [0i16; 64];
        let mut fifo = RingFifo::new(&mut fifo_storage);
        fifo.write_block(&[1; BATCH - 1]);

        tx_flag.transfer_complete();
        assert_eq!(
            playback.poll(&mut fifo),
            Some(PlaybackOutcome::Underrun {
                half: DmaHalf::Second,
                available: BATCH - 1
            })
        );
        assert_eq!(playback.dma_buffer().as_mut_slice(), &before[..]);
        assert_eq!(fifo.len(), BATCH - 1);
    }

    #[test]
    fn playback_before_capture_silence_policy() {
        let tx_flag = DmaFlag::new();
        let mut tx_storage = [5i16; BATCH * 2 * 2];
        let mut playback =
            PlaybackChannel::new(&tx_flag, &mut tx_storage, FanOut::STEREO, UnderrunPolicy::Silence)
                .unwrap();
        let mut fifo_storage = [0i16; 64];
        let mut fifo = RingFifo::new(&mut fifo_storage);

        tx_flag.half_complete();
        playback.poll(&mut fifo);

        let buf = playback.dma_buffer();
        assert!(buf.half(DmaHalf::First).iter().all(|&s| s == 0));
        assert!(buf.half(DmaHalf::Second).iter().all(|&s| s == 5));
    }

    // ---------------------------------------------------------------
    // Capture outpaces playback until the FIFO overflows
    // ---------------------------------------------------------------
    #[test]
    fn capture_overrun_drops_newest_samples() {
        let rx_flag = DmaFlag::new();
        let mut rx_storage = [0u16; BATCH * 2 * 2];
        let mut fifo_storage = [0i16; BATCH * 2 + BATCH / 2];

        let mut capture: CaptureChannel<_, _, BATCH> =
            CaptureChannel::new(&rx_flag, &mut rx_storage, Counter(0), ()).unwrap();
        let mut fifo = RingFifo::new(&mut fifo_storage);

        for i in 0..3 {
            if i % 2 == 0 {
                rx_flag.half_complete();
            } else {
                rx_flag.transfer_complete();
            }
            capture.poll(&mut fifo);
        }

        let stats = capture.stats();
        assert_eq!(stats.batches, 3);
        assert_eq!(stats.overruns, 1);
        assert_eq!(stats.dropped_samples, (BATCH / 2) as u32);

        // Oldest samples were kept, in order
        let mut n = 0i16;
        while let Ok(sample) = fifo.read() {
            assert_eq!(sample, n);
            n += 1;
        }
        assert_eq!(n as usize, BATCH * 2 + BATCH / 2);
    }

    // ---------------------------------------------------------------
    // Production geometry with the CIC decimator
    // ---------------------------------------------------------------
    #[cfg(feature = "dsp")]
    #[test]
    fn full_size_pipeline_with_cic() {
        use crate::constants::*;
        use crate::dsp::CicDecimator;
        use crate::pipeline::PipelineScheduler;

        let rx_flag = DmaFlag::new();
        let tx_flag = DmaFlag::new();
        // All-ones PDM: positive full scale once the filter has settled
        let mut rx_storage = [0xFFFFu16; RX_DMA_WORDS];
        let mut tx_storage = [0i16; TX_DMA_SLOTS];
        let mut fifo_storage = [0i16; FIFO_CAPACITY];

        let decimator = CicDecimator::<4>::new(PDM_WORDS_PER_SAMPLE).unwrap();
        let capture: CaptureChannel<_, _, PCM_SAMPLES_PER_HALF> =
            CaptureChannel::new(&rx_flag, &mut rx_storage, decimator, ()).unwrap();
        let playback = PlaybackChannel::new(
            &tx_flag,
            &mut tx_storage,
            FanOut::duplicate(AUDIO_OUT_CHANNELS),
            UnderrunPolicy::RepeatLast,
        )
        .unwrap();
        assert_eq!(playback.batch_len(), PCM_SAMPLES_PER_HALF);

        let mut pipeline =
            PipelineScheduler::new(capture, playback, RingFifo::new(&mut fifo_storage)).unwrap();

        for _ in 0..4 {
            rx_flag.half_complete();
            tx_flag.half_complete();
            pipeline.poll();
            rx_flag.transfer_complete();
            tx_flag.transfer_complete();
            pipeline.poll();
        }

        let stats = pipeline.stats();
        assert_eq!(stats.capture.batches, 8);
        assert_eq!(stats.capture.overruns, 0);
        assert_eq!(stats.playback.underruns, 0);
        assert_eq!(stats.fifo_level, 0);

        let last = pipeline.playback().dma_buffer().half(DmaHalf::Second);
        assert!(last.iter().all(|&s| s == i16::MAX));
    }
}
