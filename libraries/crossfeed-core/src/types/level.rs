//! Crossfeed level (cut frequency + feed level) and the named presets

use crate::error::{CrossfeedError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest accepted lowpass cut frequency (Hz)
pub const MIN_CUTOFF_HZ: u32 = 300;

/// Highest accepted lowpass cut frequency (Hz)
pub const MAX_CUTOFF_HZ: u32 = 2000;

/// Lowest accepted feed level, 1.0 dB (tenths of a dB)
pub const MIN_FEED_TENTHS_DB: u32 = 10;

/// Highest accepted feed level, 15.0 dB (tenths of a dB)
pub const MAX_FEED_TENTHS_DB: u32 = 150;

/// Tenths of a dB per dB
pub const FEED_FACTOR: f32 = 10.0;

/// Validated (cut frequency, feed level) pair
///
/// Both values are integers so that preset matching is exact: a level is a
/// preset only if both fields are equal to the preset's pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CrossfeedLevel {
    cutoff_hz: u32,
    feed_tenths_db: u32,
}

impl CrossfeedLevel {
    /// Create a level, rejecting out-of-range values
    pub fn new(cutoff_hz: u32, feed_tenths_db: u32) -> Result<Self> {
        validate_cutoff(i64::from(cutoff_hz))?;
        validate_feed(i64::from(feed_tenths_db))?;
        Ok(Self {
            cutoff_hz,
            feed_tenths_db,
        })
    }

    const fn from_parts(cutoff_hz: u32, feed_tenths_db: u32) -> Self {
        Self {
            cutoff_hz,
            feed_tenths_db,
        }
    }

    /// Lowpass cut frequency in Hz
    pub fn cutoff_hz(&self) -> u32 {
        self.cutoff_hz
    }

    /// Feed level in tenths of a dB
    pub fn feed_tenths_db(&self) -> u32 {
        self.feed_tenths_db
    }

    /// Feed level in dB
    pub fn feed_db(&self) -> f32 {
        self.feed_tenths_db as f32 / FEED_FACTOR
    }

    /// Same feed level, different cut frequency
    pub fn with_cutoff(self, cutoff_hz: u32) -> Result<Self> {
        validate_cutoff(i64::from(cutoff_hz))?;
        Ok(Self { cutoff_hz, ..self })
    }

    /// Same cut frequency, different feed level
    pub fn with_feed_tenths_db(self, feed_tenths_db: u32) -> Result<Self> {
        validate_feed(i64::from(feed_tenths_db))?;
        Ok(Self {
            feed_tenths_db,
            ..self
        })
    }

    /// The preset this level corresponds to, or [`Preset::None`]
    pub fn preset(&self) -> Preset {
        Preset::from_level(*self)
    }
}

impl Default for CrossfeedLevel {
    fn default() -> Self {
        DEFAULT_LEVEL
    }
}

impl fmt::Display for CrossfeedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz / {:.1} dB", self.cutoff_hz, self.feed_db())
    }
}

const DEFAULT_LEVEL: CrossfeedLevel = CrossfeedLevel::from_parts(700, 45);
const CMOY_LEVEL: CrossfeedLevel = CrossfeedLevel::from_parts(700, 60);
const JMEIER_LEVEL: CrossfeedLevel = CrossfeedLevel::from_parts(650, 95);

/// Check a cut frequency against the inclusive bounds
pub fn validate_cutoff(cutoff_hz: i64) -> Result<()> {
    if !(i64::from(MIN_CUTOFF_HZ)..=i64::from(MAX_CUTOFF_HZ)).contains(&cutoff_hz) {
        return Err(CrossfeedError::CutoffOutOfRange {
            value: cutoff_hz,
            min: MIN_CUTOFF_HZ,
            max: MAX_CUTOFF_HZ,
        });
    }
    Ok(())
}

/// Check a feed level (tenths of a dB) against the inclusive bounds
pub fn validate_feed(feed_tenths_db: i64) -> Result<()> {
    let accepted = i64::from(MIN_FEED_TENTHS_DB)..=i64::from(MAX_FEED_TENTHS_DB);
    if !accepted.contains(&feed_tenths_db) {
        return Err(CrossfeedError::FeedLevelOutOfRange {
            value: feed_tenths_db,
            min: MIN_FEED_TENTHS_DB,
            max: MAX_FEED_TENTHS_DB,
        });
    }
    Ok(())
}

/// Convert a fractional dB feed level to validated tenths of a dB
///
/// Rounds to the nearest tenth, so `4.5` and `4.499_999` both map to 45.
pub fn feed_tenths_from_db(feed_db: f32) -> Result<u32> {
    if !feed_db.is_finite() {
        return Err(CrossfeedError::invalid_settings(format!(
            "feed level must be finite, got {}",
            feed_db
        )));
    }
    let tenths = (f64::from(feed_db) * f64::from(FEED_FACTOR)).round() as i64;
    validate_feed(tenths)?;
    Ok(tenths as u32)
}

/// Named crossfeed presets
///
/// `None` is never stored: it is what [`Preset::from_level`] reports when the
/// live pair matches none of the three known pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Closest to virtual speaker placement (30°, 3 meter): 700 Hz, 4.5 dB
    #[default]
    Default,

    /// Close to Chu Moy's crossfeeder (popular): 700 Hz, 6.0 dB
    Cmoy,

    /// Close to Jan Meier's CORDA amplifiers (little change): 650 Hz, 9.5 dB
    Jmeier,

    /// No preset
    None,
}

impl Preset {
    /// The three presets that carry a level
    pub const ALL: [Preset; 3] = [Preset::Default, Preset::Cmoy, Preset::Jmeier];

    /// The fixed level for this preset (`None` has no level)
    pub fn level(&self) -> Option<CrossfeedLevel> {
        match self {
            Self::Default => Some(DEFAULT_LEVEL),
            Self::Cmoy => Some(CMOY_LEVEL),
            Self::Jmeier => Some(JMEIER_LEVEL),
            Self::None => None,
        }
    }

    /// Exact match of a level against the known presets
    pub fn from_level(level: CrossfeedLevel) -> Self {
        Self::ALL
            .into_iter()
            .find(|preset| preset.level() == Some(level))
            .unwrap_or(Self::None)
    }

    /// Short identifier
    pub fn nick(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Cmoy => "cmoy",
            Self::Jmeier => "jmeier",
            Self::None => "none",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Default => {
                "Closest to virtual speaker placement (30°, 3 meter)   [700Hz, 4.5dB]"
            }
            Self::Cmoy => "Close to Chu Moy's crossfeeder (popular)              [700Hz, 6.0dB]",
            Self::Jmeier => {
                "Close to Jan Meier's CORDA amplifiers (little change) [650Hz, 9.5dB]"
            }
            Self::None => "No preset",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nick())
    }
}

impl FromStr for Preset {
    type Err = CrossfeedError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "cmoy" => Ok(Self::Cmoy),
            "jmeier" => Ok(Self::Jmeier),
            "none" => Ok(Self::None),
            other => Err(CrossfeedError::invalid_preset(other)),
        }
    }
}
