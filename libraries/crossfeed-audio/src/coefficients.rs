//! Crossfeed filter coefficients
//!
//! Bauer stereophonic-to-binaural transfer function. Each output channel is
//! the sum of two first-order filters:
//!
//! - **Direct path**: a high-shelf ("highboost") on the channel itself
//! - **Crossed path**: a lowpass on the opposite channel
//!
//! followed by a make-up gain that keeps the DC sum of both paths at unity,
//! so a mono signal leaves the filter at its original level.
//!
//! ```text
//! GB_lo = feed * -5/6 - 3          (dB, crossed lows)
//! GB_hi = feed / 6 - 3             (dB, direct highs)
//! G_lo  = 10^(GB_lo / 20)
//! G_hi  = 1 - 10^(GB_hi / 20)
//! Fc_hi = Fc_lo * 2^((GB_lo - 20 log10(G_hi)) / 12)
//! ```

use crossfeed_core::{CrossfeedLevel, SampleRate};
use std::f64::consts::PI;

/// Derived filter coefficients
///
/// A pure function of (cut frequency, feed level, sample rate); see
/// [`Coefficients::compute`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// Lowpass input gain
    pub a0_lo: f64,
    /// Lowpass feedback (pole)
    pub b1_lo: f64,
    /// Highboost input gain
    pub a0_hi: f64,
    /// Highboost previous-input gain
    pub a1_hi: f64,
    /// Highboost feedback (pole)
    pub b1_hi: f64,
    /// Output make-up gain
    pub gain: f64,
}

impl Coefficients {
    /// Coefficients that pass both channels through unchanged
    pub const IDENTITY: Self = Self {
        a0_lo: 0.0,
        b1_lo: 0.0,
        a0_hi: 1.0,
        a1_hi: 0.0,
        b1_hi: 0.0,
        gain: 1.0,
    };

    /// Compute coefficients for a level at a sample rate
    pub fn compute(level: CrossfeedLevel, rate: SampleRate) -> Self {
        let fc_lo = f64::from(level.cutoff_hz());
        let feed_db = f64::from(level.feed_tenths_db()) / 10.0;
        let srate = f64::from(rate.as_hz());

        let gb_lo = feed_db * -5.0 / 6.0 - 3.0;
        let gb_hi = feed_db / 6.0 - 3.0;

        let g_lo = 10.0_f64.powf(gb_lo / 20.0);
        let g_hi = 1.0 - 10.0_f64.powf(gb_hi / 20.0);
        let fc_hi = fc_lo * 2.0_f64.powf((gb_lo - 20.0 * g_hi.log10()) / 12.0);

        let x_lo = (-2.0 * PI * fc_lo / srate).exp();
        let x_hi = (-2.0 * PI * fc_hi / srate).exp();

        Self {
            a0_lo: g_lo * (1.0 - x_lo),
            b1_lo: x_lo,
            a0_hi: 1.0 - g_hi * (1.0 - x_hi),
            a1_hi: -x_hi,
            b1_hi: x_hi,
            gain: 1.0 / (1.0 - g_hi + g_lo),
        }
    }

    /// DC gain applied to a channel's own signal
    pub fn direct_weight(&self) -> f64 {
        self.gain * (self.a0_hi + self.a1_hi) / (1.0 - self.b1_hi)
    }

    /// DC gain applied to the opposite channel's signal
    pub fn crossed_weight(&self) -> f64 {
        self.gain * self.a0_lo / (1.0 - self.b1_lo)
    }

    /// True for [`Coefficients::IDENTITY`]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Coefficients {
    fn default() -> Self {
        Self::compute(CrossfeedLevel::default(), SampleRate::default())
    }
}
