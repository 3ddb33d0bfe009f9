//! Core error types for the crossfeed engine

use thiserror::Error;

/// Result type alias using `CrossfeedError`
pub type Result<T> = std::result::Result<T, CrossfeedError>;

/// Core error type for the crossfeed engine
///
/// Every variant is an immediate rejection: the value that triggered it was
/// not applied and the previous configuration is still in effect.
#[derive(Error, Debug)]
pub enum CrossfeedError {
    /// Lowpass cut frequency outside the accepted range
    #[error("Cutoff frequency out of range: {value} Hz (must be between {min} and {max})")]
    CutoffOutOfRange { value: i64, min: u32, max: u32 },

    /// Feed level outside the accepted range (tenths of a dB)
    #[error("Feed level out of range: {value} (tenths of dB, must be between {min} and {max})")]
    FeedLevelOutOfRange { value: i64, min: u32, max: u32 },

    /// Sample rate outside the accepted range
    #[error("Sample rate out of range: {value} Hz (must be between {min} and {max})")]
    SampleRateOutOfRange { value: u32, min: u32, max: u32 },

    /// Sample layout not in the supported enumeration
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Only interleaved stereo is processed
    #[error("Unsupported channel count: {0} (must be 2)")]
    UnsupportedChannels(u16),

    /// Unknown preset nick, or an attempt to apply the `none` pseudo-preset
    #[error("Invalid preset: {0}")]
    InvalidPreset(String),

    /// Settings that cannot be turned into a valid configuration
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CrossfeedError {
    /// Create an unsupported format error
    pub fn unsupported_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    /// Create an invalid preset error
    pub fn invalid_preset(msg: impl Into<String>) -> Self {
        Self::InvalidPreset(msg.into())
    }

    /// Create an invalid settings error
    pub fn invalid_settings(msg: impl Into<String>) -> Self {
        Self::InvalidSettings(msg.into())
    }

    /// True for the three range rejections (cutoff, feed, sample rate)
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::CutoffOutOfRange { .. }
                | Self::FeedLevelOutOfRange { .. }
                | Self::SampleRateOutOfRange { .. }
        )
    }
}
