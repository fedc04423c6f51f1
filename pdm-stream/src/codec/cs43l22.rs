//! CS43L22 audio codec driver.
//!
//! Configures the codec as an I2S slave DAC driving the headphone and/or
//! speaker outputs. The driver is generic over any [`embedded_hal::i2c::I2c`]
//! implementation and performs no delays; the caller releases the codec's
//! reset line before [`init()`](AudioCodec::init).
//!
//! # Example
//!
//! ```ignore
//! let mut codec = Cs43l22::new(i2c);
//! codec.init()?;                          // Probe and load power-down defaults
//! codec.configure(&CodecConfig::default())?;
//! codec.start()?;                         // Power-up sequence
//! ```

use embedded_hal::i2c::I2c;

use super::registers as reg;
use crate::control::{AudioCodec, BitsPerSample, ChannelMode, CodecConfig, OutputRouting};

/// Errors reported by [`Cs43l22`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cs43l22Error<E> {
    /// The I2C transfer failed.
    Bus(E),
    /// The device answered with an ID that is not a CS43L22.
    UnexpectedChipId(u8),
}

/// CS43L22 audio codec driver.
pub struct Cs43l22<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> Cs43l22<I2C>
where
    I2C: I2c,
{
    /// Default I2C address (AD0 pin low).
    pub const DEFAULT_ADDRESS: u8 = reg::I2C_ADDR;

    /// Create a new driver with the default I2C address (0x4A).
    pub fn new(i2c: I2C) -> Self {
        Self::new_with_address(i2c, Self::DEFAULT_ADDRESS)
    }

    /// Create a new driver with a specific 7-bit I2C address.
    pub fn new_with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    // ── Low-level I2C helpers ──────────────────────────────────────────

    pub fn write_register(&mut self, register: u8, value: u8) -> Result<(), Cs43l22Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(Cs43l22Error::Bus)
    }

    pub fn read_register(&mut self, register: u8) -> Result<u8, Cs43l22Error<I2C::Error>> {
        let mut value = [0u8];
        self.i2c
            .write_read(self.address, &[register], &mut value)
            .map_err(Cs43l22Error::Bus)?;
        Ok(value[0])
    }

    /// Read-modify-write: `new = (current & keep) | set`.
    fn modify(&mut self, register: u8, keep: u8, set: u8) -> Result<u8, Cs43l22Error<I2C::Error>> {
        let current = self.read_register(register)?;
        let new_val = (current & keep) | set;
        self.write_register(register, new_val)?;
        Ok(new_val)
    }

    // ── Configuration ──────────────────────────────────────────────────

    /// Read the chip ID register and return the revision bits.
    pub fn probe(&mut self) -> Result<u8, Cs43l22Error<I2C::Error>> {
        let id = self.read_register(reg::CHIP_ID)?;
        if id >> 3 != reg::CHIP_ID_CS43L22 {
            return Err(Cs43l22Error::UnexpectedChipId(id));
        }
        Ok(id & 0x07)
    }

    /// Set the I2S audio word length.
    pub fn set_bits_per_sample(&mut self, bits: BitsPerSample) -> Result<(), Cs43l22Error<I2C::Error>> {
        self.modify(
            reg::INTERFACE_CTL1,
            !reg::INTERFACE_CTL1_AWL_MASK,
            word_length_code(bits),
        )?;
        Ok(())
    }

    /// Power the outputs selected by `output`, restricted to `channels`.
    pub fn set_outputs(
        &mut self,
        output: OutputRouting,
        channels: ChannelMode,
    ) -> Result<(), Cs43l22Error<I2C::Error>> {
        self.write_register(reg::POWER_CTL2, power_ctl2(output, channels))
    }

    /// Power down every output stage.
    pub fn disable_outputs(&mut self) -> Result<(), Cs43l22Error<I2C::Error>> {
        self.write_register(reg::POWER_CTL2, reg::POWER_CTL2_DISABLE)
    }

    /// Release the I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

/// AWL field of INTERFACE_CTL1 for `bits`.
fn word_length_code(bits: BitsPerSample) -> u8 {
    match bits {
        BitsPerSample::B24 => 0,
        BitsPerSample::B20 => 1,
        BitsPerSample::B18 => 2,
        BitsPerSample::B16 => 3,
    }
}

/// POWER_CTL2 value for an output routing and channel selection.
///
/// Channel B is the right channel, A the left.
fn power_ctl2(output: OutputRouting, channels: ChannelMode) -> u8 {
    let (b, a) = match channels {
        ChannelMode::Mute => (reg::PDN_OFF, reg::PDN_OFF),
        ChannelMode::Right => (reg::PDN_ON, reg::PDN_OFF),
        ChannelMode::Left => (reg::PDN_OFF, reg::PDN_ON),
        ChannelMode::Stereo => (reg::PDN_ON, reg::PDN_ON),
    };
    let pair = (b << 2) | a;
    let off = (reg::PDN_OFF << 2) | reg::PDN_OFF;

    match output {
        OutputRouting::Headphone => (pair << 4) | off,
        OutputRouting::Speaker => (off << 4) | pair,
        OutputRouting::Both => (pair << 4) | pair,
        OutputRouting::Auto => reg::POWER_CTL2_AUTO,
    }
}

/// Passthrough volume: 0..=100 maps to -100..=100 in two's complement.
fn passthrough_volume(volume: u8) -> u8 {
    ((volume.min(100) as i8 - 50) * 2) as u8
}

/// Master volume: 0..=100 maps to -24..=24 half-dB steps.
fn master_volume(volume: u8) -> u8 {
    ((volume.min(100) as i16 * 48 / 100) - 24) as i8 as u8
}

// ── AudioCodec trait implementation ────────────────────────────────────────

impl<I2C> AudioCodec for Cs43l22<I2C>
where
    I2C: I2c,
{
    type Error = Cs43l22Error<I2C::Error>;

    /// Probe the chip and load an I2S-slave, 16-bit, headphone configuration
    /// with the outputs still powered down.
    fn init(&mut self) -> Result<(), Self::Error> {
        self.probe()?;

        self.write_register(reg::POWER_CTL1, reg::POWER_CTL1_DOWN)?;
        self.set_outputs(OutputRouting::Headphone, ChannelMode::Stereo)?;
        self.write_register(reg::CLOCKING_CTL, reg::CLOCKING_AUTO_DETECT)?;

        // Slave, non-inverted clock, I2S, 16-bit words
        self.modify(
            reg::INTERFACE_CTL1,
            reg::INTERFACE_CTL1_RESERVED,
            reg::INTERFACE_CTL1_DACDIF_I2S | word_length_code(BitsPerSample::B16),
        )?;

        self.modify(
            reg::PASSTHROUGH_A,
            reg::PASSTHROUGH_RESERVED_MASK,
            reg::PASSTHROUGH_AIN1,
        )?;
        self.modify(
            reg::PASSTHROUGH_B,
            reg::PASSTHROUGH_RESERVED_MASK,
            reg::PASSTHROUGH_AIN1,
        )?;

        self.write_register(reg::MISC_CTL, reg::MISC_CTL_DIGITAL)?;
        self.write_register(reg::PLAYBACK_CTL, 0x00)?;

        // 0 dB
        self.write_register(reg::PASSTHROUGH_VOL_A, 0x00)?;
        self.write_register(reg::PASSTHROUGH_VOL_B, 0x00)?;
        self.write_register(reg::PCM_VOL_A, 0x00)?;
        self.write_register(reg::PCM_VOL_B, 0x00)?;

        #[cfg(feature = "defmt")]
        defmt::info!("cs43l22: initialized at {=u8:#x}", self.address);

        Ok(())
    }

    /// The sample rate is not written: the codec auto-detects it from the
    /// serial clocks.
    fn configure(&mut self, config: &CodecConfig) -> Result<(), Self::Error> {
        self.set_bits_per_sample(config.bits_per_sample)?;
        self.set_outputs(config.output, config.channels)?;
        self.set_volume(config.volume)
    }

    fn start(&mut self) -> Result<(), Self::Error> {
        self.write_register(reg::INIT_00, reg::INIT_00_UNLOCK)?;
        self.write_register(reg::INIT_47, reg::INIT_47_VALUE)?;
        self.modify(reg::INIT_32, !reg::INIT_32_BIT, reg::INIT_32_BIT)?;
        self.modify(reg::INIT_32, !reg::INIT_32_BIT, 0)?;
        self.write_register(reg::INIT_00, reg::INIT_00_LOCK)?;

        self.write_register(reg::POWER_CTL1, reg::POWER_CTL1_UP)
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        self.write_register(reg::POWER_CTL1, reg::POWER_CTL1_DOWN)
    }

    fn set_volume(&mut self, volume: u8) -> Result<(), Self::Error> {
        let passthrough = passthrough_volume(volume);
        self.write_register(reg::PASSTHROUGH_VOL_A, passthrough)?;
        self.write_register(reg::PASSTHROUGH_VOL_B, passthrough)?;

        let master = master_volume(volume);
        self.write_register(reg::MASTER_VOL_A, master)?;
        self.write_register(reg::MASTER_VOL_B, master)
    }
}
