//! Crossfeed Audio
//!
//! Bauer stereophonic-to-binaural (bs2b) crossfeed for headphone listening.
//!
//! This crate provides:
//! - Coefficient derivation from cut frequency, feed level and sample rate
//! - A per-sample filter kernel specialised for every supported PCM and
//!   float layout (8/16/24/32-bit integer, 32/64-bit float, LE/BE)
//! - [`Bs2b`], the parameter and coefficient manager
//! - [`Crossfeed`], a thread-safe element a streaming host drives buffer by
//!   buffer
//!
//! # Example: Processing a Buffer
//!
//! ```rust
//! use crossfeed_audio::{BufferFlags, Crossfeed};
//! use crossfeed_core::{Preset, SampleFormat, SampleRate, StreamFormat};
//!
//! # fn example() -> crossfeed_core::Result<()> {
//! let element = Crossfeed::new();
//! element.set_preset(Preset::Cmoy)?;
//! element.configure_format(StreamFormat::stereo(SampleFormat::S16LE, SampleRate::CD_QUALITY))?;
//!
//! // One stereo frame, hard left
//! let mut buffer: Vec<u8> = [16_000_i16, 0].iter().flat_map(|s| s.to_le_bytes()).collect();
//! let frames = element.process(&mut buffer, BufferFlags::default());
//! assert_eq!(frames, 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! # Example: Normalized Samples
//!
//! ```rust
//! use crossfeed_audio::Bs2b;
//!
//! let mut bs2b = Bs2b::new();
//! let mut samples = [0.5, -0.5, 0.25, -0.25];
//! bs2b.cross_feed(&mut samples);
//! assert!(samples[0] < 0.5);
//! ```

pub mod codec;
pub mod coefficients;
pub mod element;
pub mod engine;
pub mod filter;
pub mod kernel;

pub use coefficients::Coefficients;
pub use element::{BufferFlags, Crossfeed, KernelStatus, StreamEvent};
pub use engine::Bs2b;
pub use filter::FilterState;
pub use kernel::{select, Kernel};
