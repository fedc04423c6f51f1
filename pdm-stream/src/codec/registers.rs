//! CS43L22 register addresses and bitfield values.
//!
//! Register addresses and values are 8-bit. A write is the two-byte sequence
//! `[register, value]`; a read writes `[register]` and reads one byte back.

// ── I2C address ────────────────────────────────────────────────────────────

/// 7-bit I2C address with AD0 tied low (0x94 as an 8-bit write address).
pub const I2C_ADDR: u8 = 0x4A;

// ── Identification ─────────────────────────────────────────────────────────

/// Chip ID and revision (read-only).
/// - Bits 7:3: CHIPID (0b11100 for CS43L22)
/// - Bits 2:0: REVID
pub const CHIP_ID: u8 = 0x01;

/// Expected value of `CHIP_ID >> 3`.
pub const CHIP_ID_CS43L22: u8 = 0x1C;

// ── Power ──────────────────────────────────────────────────────────────────

/// Power control 1. `0x01` powered down, `0x9E` powered up.
pub const POWER_CTL1: u8 = 0x02;

pub const POWER_CTL1_DOWN: u8 = 0x01;
pub const POWER_CTL1_UP: u8 = 0x9E;

/// Power control 2: output stage power.
/// - Bits 7:6: PDN_HPB
/// - Bits 5:4: PDN_HPA
/// - Bits 3:2: PDN_SPKB
/// - Bits 1:0: PDN_SPKA
///
/// Each field: `0b10` always on, `0b11` always off, `0b01`/`0b00` follow the
/// headphone-detect pin.
pub const POWER_CTL2: u8 = 0x04;

/// Two-bit field value: output always on.
pub const PDN_ON: u8 = 0b10;
/// Two-bit field value: output always off.
pub const PDN_OFF: u8 = 0b11;

/// All outputs follow the headphone-detect pin.
pub const POWER_CTL2_AUTO: u8 = 0x05;
/// All outputs off.
pub const POWER_CTL2_DISABLE: u8 = 0xFF;

// ── Clocking and serial interface ──────────────────────────────────────────

/// Clocking control. Bit 7: AUTO_DETECT.
pub const CLOCKING_CTL: u8 = 0x05;
pub const CLOCKING_AUTO_DETECT: u8 = 0x80;

/// Interface control 1.
/// - Bit 7  : M/S (0 = slave)
/// - Bit 6  : INV_SCLK
/// - Bit 5  : reserved (preserved)
/// - Bit 4  : DSP mode
/// - Bits 3:2: DACDIF (0b01 = I2S, up to 24-bit)
/// - Bits 1:0: AWL (0 = 24, 1 = 20, 2 = 18, 3 = 16 bit)
pub const INTERFACE_CTL1: u8 = 0x06;
pub const INTERFACE_CTL1_RESERVED: u8 = 1 << 5;
pub const INTERFACE_CTL1_DACDIF_I2S: u8 = 0b01 << 2;
pub const INTERFACE_CTL1_AWL_MASK: u8 = 0x03;

// ── Analog passthrough ─────────────────────────────────────────────────────

/// Passthrough input select, channel A. Bits 7:4 reserved, bit 0 = AIN1A.
pub const PASSTHROUGH_A: u8 = 0x08;
/// Passthrough input select, channel B. Bits 7:4 reserved, bit 0 = AIN1B.
pub const PASSTHROUGH_B: u8 = 0x09;
pub const PASSTHROUGH_RESERVED_MASK: u8 = 0xF0;
pub const PASSTHROUGH_AIN1: u8 = 0x01;

/// Miscellaneous controls. `0x02` selects the digital (I2S) path.
pub const MISC_CTL: u8 = 0x0E;
pub const MISC_CTL_DIGITAL: u8 = 0x02;

/// Playback control 2. `0x00` unmutes headphone and speaker.
pub const PLAYBACK_CTL: u8 = 0x0F;

// ── Volume ─────────────────────────────────────────────────────────────────

pub const PASSTHROUGH_VOL_A: u8 = 0x14;
pub const PASSTHROUGH_VOL_B: u8 = 0x15;
pub const PCM_VOL_A: u8 = 0x1A;
pub const PCM_VOL_B: u8 = 0x1B;

/// Master volume, two's complement 0.5 dB steps.
pub const MASTER_VOL_A: u8 = 0x20;
pub const MASTER_VOL_B: u8 = 0x21;

// ── Start-up sequence ──────────────────────────────────────────────────────

/// Undocumented registers touched by the datasheet's required power-up
/// initialization sequence.
pub const INIT_00: u8 = 0x00;
pub const INIT_47: u8 = 0x47;
pub const INIT_32: u8 = 0x32;

pub const INIT_00_UNLOCK: u8 = 0x99;
pub const INIT_00_LOCK: u8 = 0x00;
pub const INIT_47_VALUE: u8 = 0x80;
pub const INIT_32_BIT: u8 = 0x80;
