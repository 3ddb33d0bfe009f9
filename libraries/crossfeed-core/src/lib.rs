//! Crossfeed Core
//!
//! Platform-agnostic types, settings and error handling for the crossfeed
//! engine.
//!
//! The core crate defines:
//! - **Format Types**: `SampleFormat`, `StreamFormat`, `SampleRate`
//! - **Levels**: `CrossfeedLevel` (cut frequency + feed level) and `Preset`
//! - **Settings**: serde-backed `CrossfeedSettings`
//! - **Error Handling**: unified `CrossfeedError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use crossfeed_core::{CrossfeedLevel, Preset, SampleFormat};
//!
//! let level = CrossfeedLevel::new(650, 95).unwrap();
//! assert_eq!(level.preset(), Preset::Jmeier);
//!
//! let format: SampleFormat = "s24be".parse().unwrap();
//! assert_eq!(format.bytes_per_sample(), 3);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod types;

pub use config::CrossfeedSettings;
pub use error::{CrossfeedError, Result};
pub use types::{
    feed_tenths_from_db, Container, CrossfeedLevel, Endianness, Preset, SampleFormat, SampleRate,
    Signedness, StreamFormat, MAX_CUTOFF_HZ, MAX_FEED_TENTHS_DB, MIN_CUTOFF_HZ,
    MIN_FEED_TENTHS_DB,
};
