/// Output PCM sample rate in Hz.
pub const AUDIO_SAMPLE_RATE: u32 = 48_000;

/// PCM bits per sample on both the capture and playback sides.
pub const AUDIO_BITS_PER_SAMPLE: usize = 16;

/// Number of microphone channels captured.
pub const AUDIO_IN_CHANNELS: usize = 1;

/// Number of codec output lanes (interleaved slots per frame).
pub const AUDIO_OUT_CHANNELS: usize = 2;

/// PDM bits consumed per decoded PCM sample.
pub const PDM_DECIMATION_FACTOR: usize = 32;

/// 16-bit PDM words consumed per decoded PCM sample.
pub const PDM_WORDS_PER_SAMPLE: usize = PDM_DECIMATION_FACTOR / 16;

/// PCM samples produced per DMA half (1 ms of audio).
pub const PCM_SAMPLES_PER_HALF: usize = AUDIO_SAMPLE_RATE as usize / 1000;

/// PDM words in one half of the capture DMA buffer.
pub const PDM_HALF_WORDS: usize = PCM_SAMPLES_PER_HALF * AUDIO_IN_CHANNELS * PDM_WORDS_PER_SAMPLE;

/// PCM slots in one half of the playback DMA buffer.
pub const PCM_HALF_SLOTS: usize = PCM_SAMPLES_PER_HALF * AUDIO_OUT_CHANNELS;

/// Total capture DMA buffer length in words.
pub const RX_DMA_WORDS: usize = 2 * PDM_HALF_WORDS;

/// Total playback DMA buffer length in slots.
pub const TX_DMA_SLOTS: usize = 2 * PCM_HALF_SLOTS;

/// PCM FIFO capacity, twice the playback DMA buffer.
pub const FIFO_CAPACITY: usize = 2 * TX_DMA_SLOTS;
