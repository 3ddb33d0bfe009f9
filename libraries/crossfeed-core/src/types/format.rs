//! Stream and sample format descriptors

use crate::error::{CrossfeedError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sample rate in Hz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SampleRate(pub u32);

impl SampleRate {
    /// Lowest rate the filter is specified for
    pub const MIN: Self = Self(2_000);
    /// Highest rate the filter is specified for
    pub const MAX: Self = Self(384_000);

    /// CD audio, 44.1 kHz
    pub const CD_QUALITY: Self = Self(44_100);
    /// DVD and broadcast video, 48 kHz
    pub const DVD_QUALITY: Self = Self(48_000);
    /// 96 kHz
    pub const HIGH_RES_96: Self = Self(96_000);
    /// 192 kHz
    pub const HIGH_RES_192: Self = Self(192_000);

    /// Create a new sample rate
    #[must_use]
    pub fn new(hz: u32) -> Self {
        Self(hz)
    }

    /// Get the sample rate as Hz
    pub fn as_hz(&self) -> u32 {
        self.0
    }

    /// Check the rate against the inclusive supported range
    pub fn validate(&self) -> Result<()> {
        if !(Self::MIN.0..=Self::MAX.0).contains(&self.0) {
            return Err(CrossfeedError::SampleRateOutOfRange {
                value: self.0,
                min: Self::MIN.0,
                max: Self::MAX.0,
            });
        }
        Ok(())
    }
}

impl Default for SampleRate {
    fn default() -> Self {
        Self::CD_QUALITY
    }
}

/// Integer or floating-point container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Container {
    /// Linear PCM integers
    Int,
    /// IEEE 754 floats
    Float,
}

/// Byte order of a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endianness {
    /// Least significant byte first
    Little,
    /// Most significant byte first
    Big,
}

impl Endianness {
    /// Byte order of the build target
    #[cfg(target_endian = "little")]
    pub const NATIVE: Self = Self::Little;
    /// Byte order of the build target
    #[cfg(target_endian = "big")]
    pub const NATIVE: Self = Self::Big;

    fn suffix(self) -> &'static str {
        match self {
            Self::Little => "le",
            Self::Big => "be",
        }
    }
}

/// Signedness of an integer sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signedness {
    /// Two's complement, zero at 0
    Signed,
    /// Offset binary, zero at the midpoint
    Unsigned,
}

/// Encoding of a single sample inside a buffer
///
/// 24-bit integers are tightly packed (three bytes per sample). Float
/// samples are always [`Signedness::Signed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SampleFormat {
    /// Integer or float
    pub container: Container,
    /// Bits per sample
    pub width: u16,
    /// Byte order (irrelevant at 8 bits)
    pub endianness: Endianness,
    /// Signedness (integers only)
    pub signedness: Signedness,
}

impl SampleFormat {
    /// Signed 8-bit integer
    pub const S8: Self = Self::int(8, Signedness::Signed, Endianness::Little);
    /// Unsigned 8-bit integer
    pub const U8: Self = Self::int(8, Signedness::Unsigned, Endianness::Little);
    /// Signed 16-bit integer, little-endian
    pub const S16LE: Self = Self::int(16, Signedness::Signed, Endianness::Little);
    /// Signed 16-bit integer, big-endian
    pub const S16BE: Self = Self::int(16, Signedness::Signed, Endianness::Big);
    /// Unsigned 16-bit integer, little-endian
    pub const U16LE: Self = Self::int(16, Signedness::Unsigned, Endianness::Little);
    /// Unsigned 16-bit integer, big-endian
    pub const U16BE: Self = Self::int(16, Signedness::Unsigned, Endianness::Big);
    /// Signed 24-bit integer, little-endian
    pub const S24LE: Self = Self::int(24, Signedness::Signed, Endianness::Little);
    /// Signed 24-bit integer, big-endian
    pub const S24BE: Self = Self::int(24, Signedness::Signed, Endianness::Big);
    /// Unsigned 24-bit integer, little-endian
    pub const U24LE: Self = Self::int(24, Signedness::Unsigned, Endianness::Little);
    /// Unsigned 24-bit integer, big-endian
    pub const U24BE: Self = Self::int(24, Signedness::Unsigned, Endianness::Big);
    /// Signed 32-bit integer, little-endian
    pub const S32LE: Self = Self::int(32, Signedness::Signed, Endianness::Little);
    /// Signed 32-bit integer, big-endian
    pub const S32BE: Self = Self::int(32, Signedness::Signed, Endianness::Big);
    /// Unsigned 32-bit integer, little-endian
    pub const U32LE: Self = Self::int(32, Signedness::Unsigned, Endianness::Little);
    /// Unsigned 32-bit integer, big-endian
    pub const U32BE: Self = Self::int(32, Signedness::Unsigned, Endianness::Big);
    /// 32-bit float, little-endian
    pub const F32LE: Self = Self::float(32, Endianness::Little);
    /// 32-bit float, big-endian
    pub const F32BE: Self = Self::float(32, Endianness::Big);
    /// 64-bit float, little-endian
    pub const F64LE: Self = Self::float(64, Endianness::Little);
    /// 64-bit float, big-endian
    pub const F64BE: Self = Self::float(64, Endianness::Big);

    /// Every layout the kernel can process
    pub const SUPPORTED: [Self; 18] = [
        Self::S8,
        Self::U8,
        Self::S16LE,
        Self::S16BE,
        Self::U16LE,
        Self::U16BE,
        Self::S24LE,
        Self::S24BE,
        Self::U24LE,
        Self::U24BE,
        Self::S32LE,
        Self::S32BE,
        Self::U32LE,
        Self::U32BE,
        Self::F32LE,
        Self::F32BE,
        Self::F64LE,
        Self::F64BE,
    ];

    /// Integer sample descriptor
    pub const fn int(width: u16, signedness: Signedness, endianness: Endianness) -> Self {
        Self {
            container: Container::Int,
            width,
            endianness,
            signedness,
        }
    }

    /// Floating-point sample descriptor
    pub const fn float(width: u16, endianness: Endianness) -> Self {
        Self {
            container: Container::Float,
            width,
            endianness,
            signedness: Signedness::Signed,
        }
    }

    /// Check whether the descriptor is one of the supported layouts
    pub fn is_supported(&self) -> bool {
        match self.container {
            Container::Int => matches!(self.width, 8 | 16 | 24 | 32),
            Container::Float => {
                matches!(self.width, 32 | 64) && self.signedness == Signedness::Signed
            }
        }
    }

    /// Reject unsupported descriptors
    pub fn validate(&self) -> Result<()> {
        if self.is_supported() {
            Ok(())
        } else {
            Err(CrossfeedError::unsupported_format(self.describe()))
        }
    }

    /// Bytes occupied by one sample
    pub fn bytes_per_sample(&self) -> usize {
        usize::from(self.width / 8)
    }

    /// True for floating-point containers
    pub fn is_float(&self) -> bool {
        self.container == Container::Float
    }

    /// Short name such as `s16le`, `u8` or `f64be`
    ///
    /// Endianness is omitted for 8-bit integers.
    pub fn name(&self) -> String {
        let prefix = match (self.container, self.signedness) {
            (Container::Float, _) => "f",
            (Container::Int, Signedness::Signed) => "s",
            (Container::Int, Signedness::Unsigned) => "u",
        };
        if self.container == Container::Int && self.width == 8 {
            format!("{}8", prefix)
        } else {
            format!("{}{}{}", prefix, self.width, self.endianness.suffix())
        }
    }

    fn describe(&self) -> String {
        format!(
            "{:?} width={} {:?} {:?}",
            self.container, self.width, self.signedness, self.endianness
        )
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_supported() {
            f.write_str(&self.name())
        } else {
            f.write_str(&self.describe())
        }
    }
}

impl FromStr for SampleFormat {
    type Err = CrossfeedError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase();
        Self::SUPPORTED
            .into_iter()
            .find(|format| format.name() == name)
            .ok_or_else(|| CrossfeedError::unsupported_format(s))
    }
}

/// Full description of a stream handed to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StreamFormat {
    /// Sample encoding
    pub sample: SampleFormat,
    /// Sample rate
    pub rate: SampleRate,
    /// Number of interleaved channels
    pub channels: u16,
}

impl StreamFormat {
    /// Create a new stream format
    pub fn new(sample: SampleFormat, rate: SampleRate, channels: u16) -> Self {
        Self {
            sample,
            rate,
            channels,
        }
    }

    /// Interleaved stereo stream
    pub fn stereo(sample: SampleFormat, rate: SampleRate) -> Self {
        Self::new(sample, rate, 2)
    }

    /// Bytes occupied by one frame (one sample per channel)
    pub fn bytes_per_frame(&self) -> usize {
        self.sample.bytes_per_sample() * usize::from(self.channels)
    }

    /// Check channel count, rate and sample layout, in that order
    pub fn validate(&self) -> Result<()> {
        if self.channels != 2 {
            return Err(CrossfeedError::UnsupportedChannels(self.channels));
        }
        self.rate.validate()?;
        self.sample.validate()
    }
}

impl fmt::Display for StreamFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} Hz {}ch",
            self.sample,
            self.rate.as_hz(),
            self.channels
        )
    }
}
