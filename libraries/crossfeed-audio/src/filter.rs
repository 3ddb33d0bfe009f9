//! Per-channel filter memory
//!
//! Expressed in normalized `f64`, so it is independent of the sample format
//! the frames were decoded from.

use crate::coefficients::Coefficients;

/// Running state of the crossfeed recursion
///
/// For each channel: the lowpass accumulator (crossed path), the highboost
/// accumulator (direct path) and the previous input the highboost needs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterState {
    lo: [f64; 2],
    hi: [f64; 2],
    asis: [f64; 2],
}

impl FilterState {
    /// Silent filter state
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to silence
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when no residual energy is left
    pub fn is_silent(&self) -> bool {
        self.lo
            .iter()
            .chain(&self.hi)
            .chain(&self.asis)
            .all(|v| *v == 0.0)
    }

    /// Run one stereo frame through the recursion
    #[inline]
    pub fn process_frame(&mut self, c: &Coefficients, frame: [f64; 2]) -> [f64; 2] {
        let [left, right] = frame;

        // Lowpass (crossed path)
        self.lo = [
            c.a0_lo * left + c.b1_lo * self.lo[0],
            c.a0_lo * right + c.b1_lo * self.lo[1],
        ];

        // Highboost (direct path)
        self.hi = [
            c.a0_hi * left + c.a1_hi * self.asis[0] + c.b1_hi * self.hi[0],
            c.a0_hi * right + c.a1_hi * self.asis[1] + c.b1_hi * self.hi[1],
        ];
        self.asis = frame;

        [
            (self.hi[0] + self.lo[1]) * c.gain,
            (self.hi[1] + self.lo[0]) * c.gain,
        ]
    }
}
