//! Sample-format dispatch
//!
//! One generic routine, [`cross_feed`], is instantiated per [`SampleCodec`].
//! [`select`] maps a [`SampleFormat`] descriptor to the matching instance at
//! configuration time, so the per-buffer path never branches on the format.

use crate::codec::{Be, ByteOrder, Codec, Le, PcmSample, SampleCodec};
use crate::coefficients::Coefficients;
use crate::filter::FilterState;
use crossfeed_core::{Container, CrossfeedError, Endianness, Result, SampleFormat, Signedness};
use dasp_sample::{I24, U24};
use std::fmt;

/// Signature shared by every kernel instance
pub type KernelFn = fn(&Coefficients, &mut FilterState, &mut [u8], usize) -> usize;

/// Run the crossfeed recursion in place over interleaved stereo frames
///
/// Processes `min(frames, data.len() / (2 * C::BYTES))` frames and returns
/// that count. Bytes past the last whole frame are not touched.
pub fn cross_feed<C: SampleCodec>(
    coefficients: &Coefficients,
    state: &mut FilterState,
    data: &mut [u8],
    frames: usize,
) -> usize {
    let mut processed = 0;
    for frame in data.chunks_exact_mut(2 * C::BYTES).take(frames) {
        let (left, right) = frame.split_at_mut(C::BYTES);
        let [out_left, out_right] =
            state.process_frame(coefficients, [C::decode(left), C::decode(right)]);
        C::encode(out_left, left);
        C::encode(out_right, right);
        processed += 1;
    }
    processed
}

/// A kernel bound to the format it was selected for
#[derive(Clone, Copy)]
pub struct Kernel {
    format: SampleFormat,
    run: KernelFn,
}

impl Kernel {
    /// Select the kernel for a format, or fail with `UnsupportedFormat`
    pub fn for_format(format: SampleFormat) -> Result<Self> {
        select(format).ok_or_else(|| CrossfeedError::unsupported_format(format.to_string()))
    }

    /// The format this kernel decodes and encodes
    pub fn format(&self) -> SampleFormat {
        self.format
    }

    /// Bytes per stereo frame
    pub fn frame_bytes(&self) -> usize {
        2 * self.format.bytes_per_sample()
    }

    /// Process up to `frames` frames of `data` in place
    #[inline]
    pub fn run(
        &self,
        coefficients: &Coefficients,
        state: &mut FilterState,
        data: &mut [u8],
        frames: usize,
    ) -> usize {
        (self.run)(coefficients, state, data, frames)
    }
}

impl fmt::Debug for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kernel").field("format", &self.format).finish_non_exhaustive()
    }
}

/// Kernel for a format descriptor, `None` when the layout is unsupported
pub fn select(format: SampleFormat) -> Option<Kernel> {
    if !format.is_supported() {
        return None;
    }

    let run: KernelFn = match (format.container, format.width, format.signedness) {
        // Single bytes have no order
        (Container::Int, 8, Signedness::Signed) => cross_feed::<Codec<i8, Le>>,
        (Container::Int, 8, Signedness::Unsigned) => cross_feed::<Codec<u8, Le>>,
        (Container::Int, 16, Signedness::Signed) => by_order::<i16>(format.endianness),
        (Container::Int, 16, Signedness::Unsigned) => by_order::<u16>(format.endianness),
        (Container::Int, 24, Signedness::Signed) => by_order::<I24>(format.endianness),
        (Container::Int, 24, Signedness::Unsigned) => by_order::<U24>(format.endianness),
        (Container::Int, 32, Signedness::Signed) => by_order::<i32>(format.endianness),
        (Container::Int, 32, Signedness::Unsigned) => by_order::<u32>(format.endianness),
        (Container::Float, 32, _) => by_order::<f32>(format.endianness),
        (Container::Float, 64, _) => by_order::<f64>(format.endianness),
        _ => return None,
    };

    Some(Kernel { format, run })
}

fn by_order<S: PcmSample>(endianness: Endianness) -> KernelFn {
    match endianness {
        Endianness::Little => instance::<S, Le>(),
        Endianness::Big => instance::<S, Be>(),
    }
}

fn instance<S: PcmSample, E: ByteOrder>() -> KernelFn {
    cross_feed::<Codec<S, E>>
}
