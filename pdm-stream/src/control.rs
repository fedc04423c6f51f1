//! Codec control surface used at start-up.

/// Trait for the audio codec that renders the playback stream.
///
/// Called from the start-up sequence only, never from the streaming loop.
pub trait AudioCodec {
    /// Error type for control operations.
    type Error;

    /// Probe the device and load its power-down defaults.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Apply format, routing, channel and volume settings.
    fn configure(&mut self, config: &CodecConfig) -> Result<(), Self::Error>;

    /// Power up the output stage.
    fn start(&mut self) -> Result<(), Self::Error>;

    /// Power down the output stage.
    fn stop(&mut self) -> Result<(), Self::Error>;

    /// Set the output volume, 0 (silent) to 100 (full scale). Larger values
    /// are clamped.
    fn set_volume(&mut self, volume: u8) -> Result<(), Self::Error>;
}

/// Serial audio word length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitsPerSample {
    B16,
    B18,
    B20,
    B24,
}

impl BitsPerSample {
    pub fn bits(self) -> u8 {
        match self {
            BitsPerSample::B16 => 16,
            BitsPerSample::B18 => 18,
            BitsPerSample::B20 => 20,
            BitsPerSample::B24 => 24,
        }
    }
}

/// Which analog output the codec drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputRouting {
    Speaker,
    Headphone,
    Both,
    /// Let the codec follow its headphone-detect input.
    Auto,
}

/// Which channels are powered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelMode {
    Mute,
    Left,
    Right,
    Stereo,
}

/// Codec settings applied by [`AudioCodec::configure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CodecConfig {
    /// Frame rate in Hz.
    pub sample_rate: u32,
    pub bits_per_sample: BitsPerSample,
    pub output: OutputRouting,
    /// 0 to 100.
    pub volume: u8,
    pub channels: ChannelMode,
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            sample_rate: crate::constants::AUDIO_SAMPLE_RATE,
            bits_per_sample: BitsPerSample::B16,
            output: OutputRouting::Headphone,
            volume: 50,
            channels: ChannelMode::Stereo,
        }
    }
}
