//! Windowless FIR low-pass design and direct-form filtering.

use core::f32::consts::PI;

use crate::error::ConfigError;
use crate::transform::Decimate;

use super::helpers::{to_float, to_i16};

/// Fill `taps` with an ideal (truncated sinc) low-pass impulse response.
///
/// `wc` is the cutoff in radians per sample, `2π·fc/fs`. The tap count must
/// be odd so the response is symmetric around a single center tap.
pub fn fir_lowpass(wc: f32, taps: &mut [f32]) -> Result<(), ConfigError> {
    let m = taps.len();
    if m % 2 == 0 {
        return Err(ConfigError::InvalidTapCount(m));
    }
    if !(wc > 0.0 && wc <= PI) {
        return Err(ConfigError::CutoffOutOfRange);
    }

    let center = (m / 2) as i32;
    for (k, tap) in taps.iter_mut().enumerate() {
        let n = k as i32 - center;
        *tap = if n == 0 {
            wc / PI
        } else {
            let x = wc * n as f32;
            wc / PI * libm::sinf(x) / x
        };
    }
    Ok(())
}

/// Direct-form FIR filter with `TAPS` coefficients.
pub struct FirFilter<const TAPS: usize> {
    coeffs: [f32; TAPS],
    /// Circular input history, `history[pos]` is the newest sample.
    history: [f32; TAPS],
    pos: usize,
}

impl<const TAPS: usize> FirFilter<TAPS> {
    pub fn new(coeffs: [f32; TAPS]) -> Self {
        FirFilter {
            coeffs,
            history: [0.0; TAPS],
            pos: 0,
        }
    }

    /// Design a low-pass filter with cutoff `wc` radians per sample.
    pub fn lowpass(wc: f32) -> Result<Self, ConfigError> {
        let mut coeffs = [0.0; TAPS];
        fir_lowpass(wc, &mut coeffs)?;
        Ok(Self::new(coeffs))
    }

    pub fn coeffs(&self) -> &[f32; TAPS] {
        &self.coeffs
    }

    /// Clear the input history.
    pub fn reset(&mut self) {
        self.history = [0.0; TAPS];
        self.pos = 0;
    }

    /// Push one sample and return `y[n] = Σ h[k]·x[n-k]`.
    pub fn filter(&mut self, x: f32) -> f32 {
        if TAPS == 0 {
            return 0.0;
        }

        self.pos = if self.pos == 0 { TAPS - 1 } else { self.pos - 1 };
        self.history[self.pos] = x;

        let mut y = 0.0;
        let mut idx = self.pos;
        for &h in self.coeffs.iter() {
            y += h * self.history[idx];
            idx += 1;
            if idx == TAPS {
                idx = 0;
            }
        }
        y
    }

    /// Filter `block` in place, clipping to full scale.
    pub fn process_block(&mut self, block: &mut [i16]) {
        for sample in block.iter_mut() {
            *sample = to_i16(self.filter(to_float(*sample)));
        }
    }
}

/// A decimator followed by a FIR filter at the output rate.
///
/// Lets a low-pass stage run inside the capture channel, before the batch
/// reaches the processing hook and the FIFO.
pub struct Filtered<D, const TAPS: usize> {
    inner: D,
    fir: FirFilter<TAPS>,
}

impl<D, const TAPS: usize> Filtered<D, TAPS>
where
    D: Decimate,
{
    pub fn new(inner: D, fir: FirFilter<TAPS>) -> Self {
        Filtered { inner, fir }
    }

    pub fn into_inner(self) -> (D, FirFilter<TAPS>) {
        (self.inner, self.fir)
    }
}

impl<D, const TAPS: usize> Decimate for Filtered<D, TAPS>
where
    D: Decimate,
{
    fn input_words(&self, samples: usize) -> usize {
        self.inner.input_words(samples)
    }

    fn decimate(&mut self, pdm: &[u16], pcm: &mut [i16]) {
        self.inner.decimate(pdm, pcm);
        self.fir.process_block(pcm);
    }
}
