//! Sample codecs
//!
//! A [`SampleCodec`] turns the raw bytes of one sample into a normalized
//! `f64` and back. Codecs are built from two independent pieces:
//!
//! - a [`PcmSample`] type (`i8`, `u8`, `i16`, `u16`, [`I24`], [`U24`], `i32`,
//!   `u32`, `f32`, `f64`) that knows its width and its numeric mapping
//! - a [`ByteOrder`] marker ([`Le`] or [`Be`])
//!
//! # Numeric rules
//!
//! - Integers are offset to signed (unsigned formats), then scaled by
//!   `1 / 2^(N-1)`, so full scale maps to `[-1.0, 1.0)`.
//! - Encoding scales by `2^(N-1)`, rounds half to even, saturates to
//!   `[-2^(N-1), 2^(N-1) - 1]`, then re-applies the unsigned offset.
//! - 24-bit samples are tightly packed (three bytes).
//! - Floats are widened/narrowed without scaling or clipping.

use dasp_sample::{Sample, I24, U24};
use std::marker::PhantomData;

/// Byte order marker
pub trait ByteOrder: Send + Sync + 'static {
    /// True for big-endian
    const BIG: bool;
}

/// Little-endian marker
#[derive(Debug, Clone, Copy)]
pub enum Le {}

/// Big-endian marker
#[derive(Debug, Clone, Copy)]
pub enum Be {}

impl ByteOrder for Le {
    const BIG: bool = false;
}

impl ByteOrder for Be {
    const BIG: bool = true;
}

/// A sample type with a fixed byte width and a normalized mapping
pub trait PcmSample: Copy + Send + Sync + 'static {
    /// Bytes per sample
    const BYTES: usize;

    /// Read from exactly `BYTES` little-endian bytes
    fn read_le(bytes: &[u8]) -> Self;

    /// Read from exactly `BYTES` big-endian bytes
    fn read_be(bytes: &[u8]) -> Self;

    /// Write into exactly `BYTES` little-endian bytes
    fn write_le(self, bytes: &mut [u8]);

    /// Write into exactly `BYTES` big-endian bytes
    fn write_be(self, bytes: &mut [u8]);

    /// Map to the normalized working range
    fn to_normalized(self) -> f64;

    /// Map back from the normalized working range
    fn from_normalized(value: f64) -> Self;
}

/// Decode/encode capability the kernel is generic over
pub trait SampleCodec {
    /// Bytes per sample
    const BYTES: usize;

    /// Decode one sample
    fn decode(bytes: &[u8]) -> f64;

    /// Encode one sample in place
    fn encode(value: f64, bytes: &mut [u8]);
}

/// Codec for a sample type in a byte order
#[derive(Debug, Clone, Copy)]
pub struct Codec<S, E>(PhantomData<(S, E)>);

impl<S: PcmSample, E: ByteOrder> SampleCodec for Codec<S, E> {
    const BYTES: usize = S::BYTES;

    #[inline]
    fn decode(bytes: &[u8]) -> f64 {
        let sample = if E::BIG {
            S::read_be(bytes)
        } else {
            S::read_le(bytes)
        };
        sample.to_normalized()
    }

    #[inline]
    fn encode(value: f64, bytes: &mut [u8]) {
        let sample = S::from_normalized(value);
        if E::BIG {
            sample.write_be(bytes);
        } else {
            sample.write_le(bytes);
        }
    }
}

/// Scale, round half to even and saturate to a signed `bits`-wide integer
#[inline]
fn quantize(value: f64, bits: u32) -> i64 {
    let full_scale = (1_i64 << (bits - 1)) as f64;
    let scaled = (value * full_scale).round_ties_even();
    // NaN casts to zero
    scaled.clamp(-full_scale, full_scale - 1.0) as i64
}

#[inline]
fn array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut raw = [0_u8; N];
    raw.copy_from_slice(&bytes[..N]);
    raw
}

macro_rules! impl_signed_pcm {
    ($($t:ty),*) => {$(
        impl PcmSample for $t {
            const BYTES: usize = std::mem::size_of::<$t>();

            #[inline]
            fn read_le(bytes: &[u8]) -> Self {
                <$t>::from_le_bytes(array(bytes))
            }

            #[inline]
            fn read_be(bytes: &[u8]) -> Self {
                <$t>::from_be_bytes(array(bytes))
            }

            #[inline]
            fn write_le(self, bytes: &mut [u8]) {
                bytes[..Self::BYTES].copy_from_slice(&self.to_le_bytes());
            }

            #[inline]
            fn write_be(self, bytes: &mut [u8]) {
                bytes[..Self::BYTES].copy_from_slice(&self.to_be_bytes());
            }

            #[inline]
            fn to_normalized(self) -> f64 {
                self.to_sample::<f64>()
            }

            #[inline]
            fn from_normalized(value: f64) -> Self {
                quantize(value, <$t>::BITS) as $t
            }
        }
    )*};
}

macro_rules! impl_unsigned_pcm {
    ($($t:ty => $signed:ty),*) => {$(
        impl PcmSample for $t {
            const BYTES: usize = std::mem::size_of::<$t>();

            #[inline]
            fn read_le(bytes: &[u8]) -> Self {
                <$t>::from_le_bytes(array(bytes))
            }

            #[inline]
            fn read_be(bytes: &[u8]) -> Self {
                <$t>::from_be_bytes(array(bytes))
            }

            #[inline]
            fn write_le(self, bytes: &mut [u8]) {
                bytes[..Self::BYTES].copy_from_slice(&self.to_le_bytes());
            }

            #[inline]
            fn write_be(self, bytes: &mut [u8]) {
                bytes[..Self::BYTES].copy_from_slice(&self.to_be_bytes());
            }

            #[inline]
            fn to_normalized(self) -> f64 {
                self.to_signed_sample().to_sample::<f64>()
            }

            #[inline]
            fn from_normalized(value: f64) -> Self {
                let signed = quantize(value, <$t>::BITS) as $signed;
                <$t>::from_sample(signed)
            }
        }
    )*};
}

impl_signed_pcm!(i8, i16, i32);
impl_unsigned_pcm!(u8 => i8, u16 => i16, u32 => i32);

#[inline]
fn read_u24_le(bytes: &[u8]) -> i32 {
    i32::from(bytes[0]) | i32::from(bytes[1]) << 8 | i32::from(bytes[2]) << 16
}

#[inline]
fn read_u24_be(bytes: &[u8]) -> i32 {
    i32::from(bytes[2]) | i32::from(bytes[1]) << 8 | i32::from(bytes[0]) << 16
}

#[inline]
fn write_u24_le(raw: i32, bytes: &mut [u8]) {
    bytes[0] = raw as u8;
    bytes[1] = (raw >> 8) as u8;
    bytes[2] = (raw >> 16) as u8;
}

#[inline]
fn write_u24_be(raw: i32, bytes: &mut [u8]) {
    bytes[2] = raw as u8;
    bytes[1] = (raw >> 8) as u8;
    bytes[0] = (raw >> 16) as u8;
}

/// Sign-extend the low 24 bits
#[inline]
fn sign_extend_24(raw: i32) -> i32 {
    (raw << 8) >> 8
}

impl PcmSample for I24 {
    const BYTES: usize = 3;

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        I24::new_unchecked(sign_extend_24(read_u24_le(bytes)))
    }

    #[inline]
    fn read_be(bytes: &[u8]) -> Self {
        I24::new_unchecked(sign_extend_24(read_u24_be(bytes)))
    }

    #[inline]
    fn write_le(self, bytes: &mut [u8]) {
        write_u24_le(self.inner(), bytes);
    }

    #[inline]
    fn write_be(self, bytes: &mut [u8]) {
        write_u24_be(self.inner(), bytes);
    }

    #[inline]
    fn to_normalized(self) -> f64 {
        self.to_sample::<f64>()
    }

    #[inline]
    fn from_normalized(value: f64) -> Self {
        I24::new_unchecked(quantize(value, 24) as i32)
    }
}

impl PcmSample for U24 {
    const BYTES: usize = 3;

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        U24::new_unchecked(read_u24_le(bytes))
    }

    #[inline]
    fn read_be(bytes: &[u8]) -> Self {
        U24::new_unchecked(read_u24_be(bytes))
    }

    #[inline]
    fn write_le(self, bytes: &mut [u8]) {
        write_u24_le(self.inner(), bytes);
    }

    #[inline]
    fn write_be(self, bytes: &mut [u8]) {
        write_u24_be(self.inner(), bytes);
    }

    #[inline]
    fn to_normalized(self) -> f64 {
        self.to_signed_sample().to_sample::<f64>()
    }

    #[inline]
    fn from_normalized(value: f64) -> Self {
        U24::from_sample(I24::new_unchecked(quantize(value, 24) as i32))
    }
}

impl PcmSample for f32 {
    const BYTES: usize = 4;

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        f32::from_le_bytes(array(bytes))
    }

    #[inline]
    fn read_be(bytes: &[u8]) -> Self {
        f32::from_be_bytes(array(bytes))
    }

    #[inline]
    fn write_le(self, bytes: &mut [u8]) {
        bytes[..4].copy_from_slice(&self.to_le_bytes());
    }

    #[inline]
    fn write_be(self, bytes: &mut [u8]) {
        bytes[..4].copy_from_slice(&self.to_be_bytes());
    }

    #[inline]
    fn to_normalized(self) -> f64 {
        self.to_sample::<f64>()
    }

    #[inline]
    fn from_normalized(value: f64) -> Self {
        value.to_sample::<f32>()
    }
}

impl PcmSample for f64 {
    const BYTES: usize = 8;

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        f64::from_le_bytes(array(bytes))
    }

    #[inline]
    fn read_be(bytes: &[u8]) -> Self {
        f64::from_be_bytes(array(bytes))
    }

    #[inline]
    fn write_le(self, bytes: &mut [u8]) {
        bytes[..8].copy_from_slice(&self.to_le_bytes());
    }

    #[inline]
    fn write_be(self, bytes: &mut [u8]) {
        bytes[..8].copy_from_slice(&self.to_be_bytes());
    }

    #[inline]
    fn to_normalized(self) -> f64 {
        self
    }

    #[inline]
    fn from_normalized(value: f64) -> Self {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode<C: SampleCodec>(bytes: &[u8]) -> f64 {
        C::decode(bytes)
    }

    fn encode<C: SampleCodec>(value: f64) -> Vec<u8> {
        let mut bytes = vec![0; C::BYTES];
        C::encode(value, &mut bytes);
        bytes
    }

    #[test]
    fn s16_byte_orders() {
        assert_eq!(decode::<Codec<i16, Le>>(&[0x00, 0x40]), 0.5);
        assert_eq!(decode::<Codec<i16, Be>>(&[0x40, 0x00]), 0.5);
        assert_eq!(decode::<Codec<i16, Le>>(&[0x00, 0x80]), -1.0);
        assert_eq!(encode::<Codec<i16, Be>>(-0.5), vec![0xC0, 0x00]);
    }

    #[test]
    fn unsigned_midpoint_is_zero() {
        assert_eq!(decode::<Codec<u8, Le>>(&[0x80]), 0.0);
        assert_eq!(decode::<Codec<u16, Le>>(&[0x00, 0x80]), 0.0);
        assert_eq!(decode::<Codec<U24, Be>>(&[0x80, 0x00, 0x00]), 0.0);
        assert_eq!(decode::<Codec<u32, Be>>(&[0x80, 0, 0, 0]), 0.0);

        assert_eq!(decode::<Codec<u8, Le>>(&[0x00]), -1.0);
        assert_eq!(encode::<Codec<u8, Le>>(0.0), vec![0x80]);
        assert_eq!(encode::<Codec<u16, Be>>(0.0), vec![0x80, 0x00]);
    }

    #[test]
    fn s24_is_sign_extended() {
        assert_eq!(decode::<Codec<I24, Le>>(&[0x00, 0x00, 0x80]), -1.0);
        assert_eq!(decode::<Codec<I24, Be>>(&[0x40, 0x00, 0x00]), 0.5);
        assert_eq!(decode::<Codec<I24, Le>>(&[0xFF, 0xFF, 0xFF]), -1.0 / 8_388_608.0);
        assert_eq!(encode::<Codec<I24, Le>>(-1.0 / 8_388_608.0), vec![0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn encode_saturates() {
        assert_eq!(encode::<Codec<i16, Le>>(1.0), i16::MAX.to_le_bytes().to_vec());
        assert_eq!(encode::<Codec<i16, Le>>(7.5), i16::MAX.to_le_bytes().to_vec());
        assert_eq!(encode::<Codec<i16, Le>>(-3.0), i16::MIN.to_le_bytes().to_vec());
        assert_eq!(encode::<Codec<u8, Le>>(2.0), vec![0xFF]);
        assert_eq!(encode::<Codec<u8, Le>>(-2.0), vec![0x00]);
        assert_eq!(encode::<Codec<I24, Be>>(1.5), vec![0x7F, 0xFF, 0xFF]);
        assert_eq!(encode::<Codec<i32, Le>>(1.0), i32::MAX.to_le_bytes().to_vec());
        assert_eq!(encode::<Codec<u32, Be>>(-1.5), vec![0, 0, 0, 0]);
    }

    #[test]
    fn encode_rounds_half_to_even() {
        let lsb = 1.0 / 32_768.0;
        assert_eq!(encode::<Codec<i16, Le>>(0.5 * lsb), vec![0, 0]);
        assert_eq!(encode::<Codec<i16, Le>>(1.5 * lsb), 2_i16.to_le_bytes().to_vec());
        assert_eq!(encode::<Codec<i16, Le>>(2.5 * lsb), 2_i16.to_le_bytes().to_vec());
        assert_eq!(encode::<Codec<i16, Le>>(-1.5 * lsb), (-2_i16).to_le_bytes().to_vec());

        let lsb8 = 1.0 / 128.0;
        assert_eq!(encode::<Codec<i8, Le>>(3.5 * lsb8), vec![4]);
    }

    #[test]
    fn nan_encodes_as_zero() {
        assert_eq!(encode::<Codec<i16, Le>>(f64::NAN), vec![0, 0]);
        assert_eq!(encode::<Codec<u8, Le>>(f64::NAN), vec![0x80]);
    }

    #[test]
    fn floats_are_not_scaled_or_clipped() {
        assert_eq!(decode::<Codec<f32, Le>>(&1.5_f32.to_le_bytes()), 1.5);
        assert_eq!(decode::<Codec<f64, Be>>(&(-2.25_f64).to_be_bytes()), -2.25);
        assert_eq!(encode::<Codec<f32, Be>>(3.0), 3.0_f32.to_be_bytes().to_vec());
        assert_eq!(encode::<Codec<f64, Le>>(-7.0), (-7.0_f64).to_le_bytes().to_vec());
    }

    #[test]
    fn every_integer_code_survives_a_round_trip() {
        for code in i8::MIN..=i8::MAX {
            let bytes = code.to_le_bytes();
            let value = decode::<Codec<i8, Le>>(&bytes);
            assert_eq!(encode::<Codec<i8, Le>>(value), bytes.to_vec());
        }
        for code in u16::MIN..=u16::MAX {
            let bytes = code.to_be_bytes();
            let value = decode::<Codec<u16, Be>>(&bytes);
            assert_eq!(encode::<Codec<u16, Be>>(value), bytes.to_vec());
        }
    }

    #[test]
    fn low_bits_of_32_bit_codes_survive_a_round_trip() {
        for code in [0x1234_5679_i32, 1, -1, i32::MIN, i32::MIN + 1, i32::MAX] {
            let bytes = code.to_le_bytes();
            let value = decode::<Codec<i32, Le>>(&bytes);
            assert_eq!(value, f64::from(code) / 2_147_483_648.0);
            assert_eq!(encode::<Codec<i32, Le>>(value), bytes.to_vec());
        }
        for code in [0x8000_0001_u32, 0x1234_5679, 1, u32::MAX] {
            let bytes = code.to_be_bytes();
            let value = decode::<Codec<u32, Be>>(&bytes);
            assert_eq!(encode::<Codec<u32, Be>>(value), bytes.to_vec());
        }
        assert_eq!(
            decode::<Codec<u32, Be>>(&0x8000_0001_u32.to_be_bytes()),
            1.0 / 2_147_483_648.0
        );
    }
}
