//! Cascaded integrator-comb decimator for 1-bit PDM.
//!
//! Each PDM bit is mapped to ±1 and run through `ORDER` integrators at the
//! bit rate; every `R` bits the integrator output goes through `ORDER` combs
//! at the sample rate. The DC gain is `R^ORDER`, so the output is shifted by
//! `ORDER * log2(R) - 15` bits to bring full scale to `i16`.
//!
//! Registers use wrapping arithmetic: as long as they are at least
//! `ORDER * log2(R) + 1` bits wide, the comb differences are exact even after
//! the integrators overflow.

use crate::error::ConfigError;
use crate::transform::Decimate;

use super::intrinsics::saturate16;

/// Bits per PDM capture word.
const BITS_PER_WORD: usize = 16;

/// CIC decimator with `ORDER` stages and a decimation ratio of
/// `16 * words_per_sample`.
pub struct CicDecimator<const ORDER: usize> {
    words_per_sample: usize,
    /// Output shift, right if positive.
    shift: i32,
    integrators: [i32; ORDER],
    combs: [i32; ORDER],
}

impl<const ORDER: usize> CicDecimator<ORDER> {
    /// Create a decimator consuming `words_per_sample` 16-bit PDM words per
    /// output sample.
    ///
    /// `words_per_sample` must be a power of two and the register growth
    /// must fit in 32 bits.
    pub fn new(words_per_sample: usize) -> Result<Self, ConfigError> {
        if ORDER == 0 || !words_per_sample.is_power_of_two() {
            return Err(ConfigError::UnsupportedDecimation(words_per_sample));
        }

        let log2_ratio = (words_per_sample * BITS_PER_WORD).trailing_zeros() as usize;
        let growth = ORDER * log2_ratio;
        if growth + 1 > 32 {
            return Err(ConfigError::UnsupportedDecimation(words_per_sample));
        }

        Ok(CicDecimator {
            words_per_sample,
            shift: growth as i32 - 15,
            integrators: [0; ORDER],
            combs: [0; ORDER],
        })
    }

    /// PDM bits per output sample.
    pub fn ratio(&self) -> usize {
        self.words_per_sample * BITS_PER_WORD
    }

    /// Clear the filter state.
    pub fn reset(&mut self) {
        self.integrators = [0; ORDER];
        self.combs = [0; ORDER];
    }

    #[inline(always)]
    fn integrate(&mut self, x: i32) {
        let mut acc = x;
        for reg in self.integrators.iter_mut() {
            *reg = reg.wrapping_add(acc);
            acc = *reg;
        }
    }

    #[inline(always)]
    fn comb(&mut self) -> i16 {
        let mut v = self.integrators.last().copied().unwrap_or(0);
        for delay in self.combs.iter_mut() {
            let prev = *delay;
            *delay = v;
            v = v.wrapping_sub(prev);
        }

        if self.shift >= 0 {
            saturate16(v >> self.shift)
        } else {
            saturate16(v << -self.shift)
        }
    }
}

impl<const ORDER: usize> Decimate for CicDecimator<ORDER> {
    fn input_words(&self, samples: usize) -> usize {
        samples * self.words_per_sample
    }

    fn decimate(&mut self, pdm: &[u16], pcm: &mut [i16]) {
        debug_assert_eq!(pdm.len(), self.input_words(pcm.len()));

        let words_per_sample = self.words_per_sample;
        for (out, words) in pcm.iter_mut().zip(pdm.chunks_exact(words_per_sample)) {
            for &word in words {
                // MSB is the oldest bit
                for bit in (0..BITS_PER_WORD).rev() {
                    let x = if (word >> bit) & 1 == 1 { 1 } else { -1 };
                    self.integrate(x);
                }
            }
            *out = self.comb();
        }
    }
}
