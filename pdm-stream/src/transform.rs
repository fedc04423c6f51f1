//! Collaborator traits invoked by the capture channel.
//!
//! The capture channel does not know how PDM becomes PCM, nor what the
//! application does with the decoded audio. Both are supplied as trait
//! implementations and called synchronously from the polling loop, so they
//! bound how much time servicing one DMA half can take.

/// PDM → PCM conversion.
///
/// The implementor owns its filter state; it persists across calls so the
/// stream is filtered continuously from one DMA half to the next.
pub trait Decimate {
    /// Number of raw capture words consumed to produce `samples` PCM samples.
    fn input_words(&self, samples: usize) -> usize;

    /// Decode all of `pdm` into exactly `pcm.len()` samples.
    ///
    /// `pdm.len()` is `self.input_words(pcm.len())`.
    fn decimate(&mut self, pdm: &[u16], pcm: &mut [i16]);
}

/// Per-batch processing hook run on freshly decoded PCM.
///
/// Receives a read-only view of the batch before it is queued for playback.
/// The slice is only valid for the duration of the call.
pub trait ProcessHook {
    fn process(&mut self, pcm: &[i16]);
}

/// No processing.
impl ProcessHook for () {
    #[inline]
    fn process(&mut self, _pcm: &[i16]) {}
}

impl<F> ProcessHook for F
where
    F: FnMut(&[i16]),
{
    #[inline]
    fn process(&mut self, pcm: &[i16]) {
        self(pcm)
    }
}
