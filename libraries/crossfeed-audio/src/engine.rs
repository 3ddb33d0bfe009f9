//! Crossfeed engine
//!
//! [`Bs2b`] owns the level, the sample rate, the coefficients derived from
//! them and the filter memory. Every successful setter recomputes the
//! coefficients; a rejected value leaves the previous configuration intact.

use crate::coefficients::Coefficients;
use crate::filter::FilterState;
use crate::kernel::Kernel;
use crossfeed_core::{CrossfeedError, CrossfeedLevel, Preset, Result, SampleRate};
use tracing::debug;

/// Bauer stereophonic-to-binaural crossfeed
#[derive(Debug, Clone)]
pub struct Bs2b {
    level: CrossfeedLevel,
    rate: SampleRate,
    coefficients: Coefficients,
    state: FilterState,
}

impl Bs2b {
    /// Engine with the default preset at 44100 Hz
    pub fn new() -> Self {
        Self::with_level(CrossfeedLevel::default(), SampleRate::default())
    }

    /// Engine for an already validated level and rate
    pub fn with_level(level: CrossfeedLevel, rate: SampleRate) -> Self {
        Self {
            level,
            rate,
            coefficients: Coefficients::compute(level, rate),
            state: FilterState::new(),
        }
    }

    /// Current cut frequency and feed level
    pub fn level(&self) -> CrossfeedLevel {
        self.level
    }

    /// Lowpass cut frequency in Hz
    pub fn cutoff_hz(&self) -> u32 {
        self.level.cutoff_hz()
    }

    /// Feed level in tenths of a dB
    pub fn feed_tenths_db(&self) -> u32 {
        self.level.feed_tenths_db()
    }

    /// Rate the coefficients were derived for
    pub fn sample_rate(&self) -> SampleRate {
        self.rate
    }

    /// Derived filter coefficients
    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    /// Filter memory
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Set the lowpass cut frequency (Hz)
    pub fn set_cutoff(&mut self, cutoff_hz: u32) -> Result<()> {
        let level = self.level.with_cutoff(cutoff_hz)?;
        self.set_level(level);
        Ok(())
    }

    /// Set the feed level (tenths of a dB)
    pub fn set_feed_level(&mut self, feed_tenths_db: u32) -> Result<()> {
        let level = self.level.with_feed_tenths_db(feed_tenths_db)?;
        self.set_level(level);
        Ok(())
    }

    /// Replace cut frequency and feed level together
    pub fn set_level(&mut self, level: CrossfeedLevel) {
        self.level = level;
        self.recompute();
    }

    /// Set the sample rate; clears the filter memory
    pub fn set_sample_rate(&mut self, hz: u32) -> Result<()> {
        let rate = SampleRate::new(hz);
        rate.validate()?;

        self.rate = rate;
        self.recompute();
        self.state.clear();
        Ok(())
    }

    /// Apply a named preset
    ///
    /// The sample rate and the filter memory are left alone. `Preset::None`
    /// carries no level and is rejected.
    pub fn apply_preset(&mut self, preset: Preset) -> Result<()> {
        let level = preset.level().ok_or_else(|| {
            CrossfeedError::invalid_preset(format!("'{}' cannot be applied", preset))
        })?;
        self.set_level(level);
        Ok(())
    }

    /// Preset matching the current level exactly, else `Preset::None`
    pub fn current_preset(&self) -> Preset {
        self.level.preset()
    }

    /// Reset the filter memory to silence
    pub fn clear(&mut self) {
        self.state.clear();
    }

    /// Process one normalized stereo frame
    #[inline]
    pub fn cross_feed_frame(&mut self, frame: [f64; 2]) -> [f64; 2] {
        self.state.process_frame(&self.coefficients, frame)
    }

    /// Process interleaved normalized samples (L, R, L, R, ...) in place
    ///
    /// A trailing odd sample is left untouched.
    pub fn cross_feed(&mut self, samples: &mut [f64]) {
        for frame in samples.chunks_exact_mut(2) {
            let [left, right] = self.cross_feed_frame([frame[0], frame[1]]);
            frame[0] = left;
            frame[1] = right;
        }
    }

    /// Process raw interleaved bytes in place with a format kernel
    ///
    /// Returns the number of frames processed.
    pub fn run(&mut self, kernel: &Kernel, data: &mut [u8], frames: usize) -> usize {
        kernel.run(&self.coefficients, &mut self.state, data, frames)
    }

    fn recompute(&mut self) {
        self.coefficients = Coefficients::compute(self.level, self.rate);
        debug!(
            cutoff_hz = self.level.cutoff_hz(),
            feed_tenths_db = self.level.feed_tenths_db(),
            rate = self.rate.as_hz(),
            gain = self.coefficients.gain,
            "Crossfeed coefficients recomputed"
        );
    }
}

impl Default for Bs2b {
    fn default() -> Self {
        Self::new()
    }
}
