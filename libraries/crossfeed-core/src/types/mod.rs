/// Domain types for the crossfeed engine
pub mod format;
pub mod level;

pub use format::{Container, Endianness, SampleFormat, SampleRate, Signedness, StreamFormat};
pub use level::{
    feed_tenths_from_db, validate_cutoff, validate_feed, CrossfeedLevel, Preset, FEED_FACTOR,
    MAX_CUTOFF_HZ, MAX_FEED_TENTHS_DB, MIN_CUTOFF_HZ, MIN_FEED_TENTHS_DB,
};
