//! End-to-end tests for the crossfeed element
//!
//! Drives [`Crossfeed`] the way a streaming host does: negotiate a format,
//! push raw interleaved buffers, send stream events, flip properties.

use crossfeed_audio::{BufferFlags, Crossfeed, KernelStatus, StreamEvent};
use crossfeed_core::{
    CrossfeedError, CrossfeedSettings, Preset, SampleFormat, SampleRate, StreamFormat,
};

// ============================================================================
// TEST UTILITIES
// ============================================================================

fn s16le(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

fn read_s16le(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]))
        .collect()
}

fn cd_stereo(sample: SampleFormat) -> StreamFormat {
    StreamFormat::stereo(sample, SampleRate::CD_QUALITY)
}

fn configured(sample: SampleFormat) -> Crossfeed {
    let element = Crossfeed::new();
    element.configure_format(cd_stereo(sample)).unwrap();
    element
}

/// Wide stereo program material: unrelated tones per channel
fn program(frames: usize) -> Vec<i16> {
    (0..frames)
        .flat_map(|i| {
            let t = i as f64 / 44_100.0;
            let left = (2.0 * std::f64::consts::PI * 440.0 * t).sin() * 20_000.0;
            let right = (2.0 * std::f64::consts::PI * 170.0 * t).cos() * 12_000.0;
            [left as i16, right as i16]
        })
        .collect()
}

fn assert_close(got: i16, want: i16) {
    assert!(
        (i32::from(got) - i32::from(want)).abs() <= 1,
        "got {} want {}",
        got,
        want
    );
}

// ============================================================================
// REFERENCE SCENARIO
// ============================================================================

#[test]
fn test_s16le_default_preset_at_cd_rate() {
    let element = configured(SampleFormat::S16LE);
    assert_eq!(element.preset(), Preset::Default);

    let mut data = s16le(&[32_767, -32_768, 0, 0]);
    assert_eq!(element.process(&mut data, BufferFlags::default()), 2);

    let out = read_s16le(&data);
    // Strictly between pure crossed (silence) and pure direct (full scale)
    for sample in &out[..2] {
        let magnitude = i32::from(*sample).abs();
        assert!(magnitude > 0 && magnitude < 32_767, "{}", sample);
    }
    // Separation reduced: full-scale opposite channels pulled together
    assert_close(out[0], 24_644);
    assert_close(out[1], -24_644);
    // Filter memory rings into the following silent frame
    assert_close(out[2], -1_747);
    assert_close(out[3], 1_747);
}

#[test]
fn test_hard_left_reaches_right_channel() {
    let element = configured(SampleFormat::S16LE);
    let mut data = s16le(&[16_000, 0, 0, 0]);
    element.process(&mut data, BufferFlags::default());

    let out = read_s16le(&data);
    assert_close(out[0], 12_600);
    assert_close(out[1], 567);
    assert!(out[2] < 0 && out[3] > 0);
}

#[test]
fn test_buffer_boundaries_are_invisible() {
    let input = s16le(&program(1_000));

    let whole = configured(SampleFormat::S16LE);
    let mut one_buffer = input.clone();
    whole.process(&mut one_buffer, BufferFlags::default());

    let split = configured(SampleFormat::S16LE);
    let mut pieces = input;
    for chunk in pieces.chunks_mut(4 * 37) {
        split.process(chunk, BufferFlags::default());
    }

    assert_eq!(one_buffer, pieces);
}

// ============================================================================
// PASSTHROUGH
// ============================================================================

#[test]
fn test_inactive_is_bit_identical() {
    let element = configured(SampleFormat::S16LE);
    element.set_active(false);

    let original = s16le(&program(256));
    let mut data = original.clone();
    assert_eq!(element.process(&mut data, BufferFlags::default()), 0);
    assert_eq!(data, original);
}

#[test]
fn test_gap_is_bit_identical() {
    let element = configured(SampleFormat::F32LE);
    let original: Vec<u8> = [0.5_f32, -0.5, 0.25, 0.0]
        .iter()
        .flat_map(|s| s.to_le_bytes())
        .collect();
    let mut data = original.clone();

    assert_eq!(element.process(&mut data, BufferFlags::GAP), 0);
    assert_eq!(data, original);
}

#[test]
fn test_rejected_formats_pass_through() {
    let cases = [
        (
            StreamFormat::new(SampleFormat::S16LE, SampleRate::CD_QUALITY, 6),
            "channels",
        ),
        (
            StreamFormat::stereo(SampleFormat::S16LE, SampleRate::new(500_000)),
            "rate",
        ),
        (
            StreamFormat::stereo(
                SampleFormat::float(16, crossfeed_core::Endianness::Little),
                SampleRate::CD_QUALITY,
            ),
            "layout",
        ),
    ];

    for (format, what) in cases {
        let element = Crossfeed::new();
        let err = element.configure_format(format).unwrap_err();
        match what {
            "channels" => assert!(matches!(err, CrossfeedError::UnsupportedChannels(6))),
            "rate" => assert!(matches!(err, CrossfeedError::SampleRateOutOfRange { .. })),
            _ => assert!(matches!(err, CrossfeedError::UnsupportedFormat(_))),
        }
        assert_eq!(element.status(), KernelStatus::Rejected(format));

        let original = s16le(&program(64));
        let mut data = original.clone();
        assert_eq!(element.process(&mut data, BufferFlags::default()), 0);
        assert_eq!(data, original, "{} rejection must pass through", what);
    }
}

#[test]
fn test_recovers_after_rejection() {
    let element = Crossfeed::new();
    let mono = StreamFormat::new(SampleFormat::S16LE, SampleRate::CD_QUALITY, 1);
    assert!(element.configure_format(mono).is_err());

    let format = cd_stereo(SampleFormat::S16LE);
    element.configure_format(format).unwrap();
    assert_eq!(element.status(), KernelStatus::Ready(format));

    let mut data = s16le(&[16_000, 0]);
    assert_eq!(element.process(&mut data, BufferFlags::default()), 1);
}

// ============================================================================
// STATE
// ============================================================================

#[test]
fn test_configure_is_idempotent() {
    let input = s16le(&program(512));

    let once = configured(SampleFormat::S16LE);
    let mut a = input.clone();
    once.process(&mut a, BufferFlags::default());

    let twice = configured(SampleFormat::S16LE);
    twice.configure_format(cd_stereo(SampleFormat::S16LE)).unwrap();
    let mut b = input;
    twice.process(&mut b, BufferFlags::default());

    assert_eq!(a, b);
}

#[test]
fn test_clear_makes_processing_deterministic() {
    let element = configured(SampleFormat::S16LE);
    let input = s16le(&program(300));

    let mut first = input.clone();
    element.process(&mut first, BufferFlags::default());

    element.handle_event(StreamEvent::Flush);
    let mut second = input;
    element.process(&mut second, BufferFlags::default());

    assert_eq!(first, second);
}

#[test]
fn test_silence_after_clear_stays_silent() {
    let element = configured(SampleFormat::S24LE);
    let mut loud = vec![0x7F_u8; 6 * 100];
    element.process(&mut loud, BufferFlags::default());

    element.handle_event(StreamEvent::Seek);
    let mut silence = vec![0_u8; 6 * 100];
    element.process(&mut silence, BufferFlags::default());
    assert!(silence.iter().all(|b| *b == 0));
}

#[test]
fn test_end_of_stream_keeps_ringing() {
    let element = configured(SampleFormat::S16LE);
    element.process(&mut s16le(&[30_000, -30_000]), BufferFlags::default());
    element.handle_event(StreamEvent::EndOfStream);

    let mut tail = s16le(&[0, 0]);
    element.process(&mut tail, BufferFlags::default());
    assert_ne!(read_s16le(&tail), vec![0, 0]);
}

#[test]
fn test_reactivation_starts_from_silence() {
    let element = configured(SampleFormat::S16LE);
    element.process(&mut s16le(&[30_000, -30_000]), BufferFlags::default());

    element.set_active(false);
    element.set_active(true);

    let mut silence = s16le(&[0, 0, 0, 0]);
    element.process(&mut silence, BufferFlags::default());
    assert_eq!(read_s16le(&silence), vec![0, 0, 0, 0]);
}

#[test]
fn test_rate_change_starts_from_silence() {
    let element = configured(SampleFormat::S16LE);
    element.process(&mut s16le(&[30_000, -30_000]), BufferFlags::default());

    element
        .configure_format(StreamFormat::stereo(SampleFormat::S16LE, SampleRate::HIGH_RES_96))
        .unwrap();

    let mut silence = s16le(&[0, 0]);
    element.process(&mut silence, BufferFlags::default());
    assert_eq!(read_s16le(&silence), vec![0, 0]);
}

// ============================================================================
// PROPERTIES AND SETTINGS
// ============================================================================

#[test]
fn test_property_changes_apply_to_next_buffer() {
    let input = s16le(&program(256));

    let default = configured(SampleFormat::S16LE);
    let mut a = input.clone();
    default.process(&mut a, BufferFlags::default());

    let jmeier = configured(SampleFormat::S16LE);
    jmeier.set_preset(Preset::Jmeier).unwrap();
    let mut b = input;
    jmeier.process(&mut b, BufferFlags::default());

    assert_ne!(a, b);
    assert_eq!(jmeier.cutoff(), 650);
    assert_eq!(jmeier.feed(), 9.5);
}

#[test]
fn test_preset_property_tracks_manual_values() {
    let element = Crossfeed::new();
    element.set_cutoff(650).unwrap();
    assert_eq!(element.preset(), Preset::None);
    element.set_feed(9.5).unwrap();
    assert_eq!(element.preset(), Preset::Jmeier);
}

#[test]
fn test_out_of_range_properties_are_rejected() {
    let element = Crossfeed::new();
    assert!(element.set_cutoff(2_001).is_err());
    assert!(element.set_cutoff(299).is_err());
    assert!(element.set_feed(15.1).is_err());
    assert!(element.set_feed(f32::INFINITY).is_err());

    assert!(element.set_cutoff(2_000).is_ok());
    assert!(element.set_feed(1.0).is_ok());
}

#[test]
fn test_settings_from_json() {
    let settings =
        CrossfeedSettings::from_json(r#"{"active": true, "preset": "cmoy"}"#).unwrap();
    let element = Crossfeed::with_settings(&settings).unwrap();

    assert_eq!(element.preset(), Preset::Cmoy);
    assert_eq!(element.settings(), CrossfeedSettings::from_preset(Preset::Cmoy));
}
