//! Sample format conversions and Q15 arithmetic.

use super::intrinsics::saturate16;

/// Full-scale magnitude used for `i16` ↔ `f32` conversion.
const FULL_SCALE: f32 = 32767.0;

/// Convert a PCM sample to `[-1.0, 1.0]`.
#[inline(always)]
pub fn to_float(sample: i16) -> f32 {
    sample as f32 / FULL_SCALE
}

/// Clip `x` to `[-1.0, 1.0]` and convert to the nearest PCM sample.
#[inline(always)]
pub fn to_i16(x: f32) -> i16 {
    let clipped = if x > 1.0 {
        1.0
    } else if x < -1.0 {
        -1.0
    } else {
        x
    };
    libm::roundf(clipped * FULL_SCALE) as i16
}

/// Saturating multiply of two Q15 values.
///
/// Computes `(a * b) >> 15`, saturated to `i16` range.
#[inline(always)]
pub fn saturating_multiply_q15(a: i16, b: i16) -> i16 {
    saturate16((a as i32 * b as i32) >> 15)
}

/// Multiply every sample in `block` by `gain` (Q15 fixed-point, in an `i32`).
pub fn block_multiply(block: &mut [i16], gain: i32) {
    for sample in block.iter_mut() {
        *sample = saturate16((*sample as i32 * gain) >> 15);
    }
}
