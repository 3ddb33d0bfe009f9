//! Host-facing crossfeed element
//!
//! [`Crossfeed`] is what a streaming host drives: typed properties, one
//! format negotiation per stream, stream events and in-place processing of
//! raw interleaved buffers.
//!
//! State lives behind two independent locks. The engine lock covers the
//! level, rate, coefficients and filter memory; the control lock covers the
//! active flag and the selected kernel. No code path holds both at once.

use crate::engine::Bs2b;
use crate::kernel::Kernel;
use crossfeed_core::types::feed_tenths_from_db;
use crossfeed_core::{CrossfeedSettings, Preset, Result, StreamFormat};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace, warn};

/// Per-buffer flags supplied by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferFlags {
    /// Buffer is known to be silence; passed through untouched
    pub gap: bool,
}

impl BufferFlags {
    /// Flags for a gap (silence) buffer
    pub const GAP: Self = Self { gap: true };
}

/// Stream events forwarded by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEvent {
    /// New segment (discontinuity in the timeline)
    Segment,
    /// Playback position moved
    Seek,
    /// Pending data discarded
    Flush,
    /// No more data
    EndOfStream,
}

/// Where the element stands with respect to format negotiation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KernelStatus {
    /// No format configured yet
    #[default]
    Unconfigured,
    /// A kernel is selected for this format
    Ready(StreamFormat),
    /// The last offered format was refused
    Rejected(StreamFormat),
}

#[derive(Debug, Clone, Copy)]
struct Control {
    active: bool,
    status: KernelStatus,
    kernel: Option<Kernel>,
}

impl Default for Control {
    fn default() -> Self {
        Self {
            active: true,
            status: KernelStatus::Unconfigured,
            kernel: None,
        }
    }
}

/// Crossfeed element
#[derive(Debug, Default)]
pub struct Crossfeed {
    engine: Mutex<Bs2b>,
    control: Mutex<Control>,
}

impl Crossfeed {
    /// Active element at the default preset, no format configured
    pub fn new() -> Self {
        Self::default()
    }

    /// Element initialised from stored settings
    pub fn with_settings(settings: &CrossfeedSettings) -> Result<Self> {
        let element = Self::new();
        element.apply_settings(settings)?;
        Ok(element)
    }

    /// Whether buffers are processed
    pub fn is_active(&self) -> bool {
        self.control().active
    }

    /// Enable or disable processing
    ///
    /// Disabling clears the filter memory so reactivation starts from silence.
    pub fn set_active(&self, active: bool) {
        self.control().active = active;
        if !active {
            self.engine().clear();
        }
    }

    /// Lowpass cut frequency in Hz
    pub fn cutoff(&self) -> u32 {
        self.engine().cutoff_hz()
    }

    /// Set the lowpass cut frequency (Hz)
    pub fn set_cutoff(&self, cutoff_hz: u32) -> Result<()> {
        self.engine()
            .set_cutoff(cutoff_hz)
            .inspect_err(|err| warn!(error = %err, "Rejected crossfeed cutoff"))
    }

    /// Feed level in dB
    pub fn feed(&self) -> f32 {
        self.engine().level().feed_db()
    }

    /// Set the feed level in dB
    ///
    /// The value is rounded to the nearest tenth of a dB, so 9.46 is stored
    /// as 9.5. Values outside 1.0..=15.0 after rounding are rejected.
    pub fn set_feed(&self, feed_db: f32) -> Result<()> {
        feed_tenths_from_db(feed_db)
            .and_then(|tenths| self.engine().set_feed_level(tenths))
            .inspect_err(|err| warn!(error = %err, "Rejected crossfeed feed level"))
    }

    /// Preset matching the current level, or `Preset::None`
    pub fn preset(&self) -> Preset {
        self.engine().current_preset()
    }

    /// Apply a named preset; `Preset::None` is rejected
    pub fn set_preset(&self, preset: Preset) -> Result<()> {
        self.engine()
            .apply_preset(preset)
            .inspect_err(|err| warn!(error = %err, "Rejected crossfeed preset"))
    }

    /// Kernel state for the last negotiated format
    pub fn status(&self) -> KernelStatus {
        self.control().status
    }

    /// Negotiate the stream format
    ///
    /// On success the kernel for the sample layout is selected, the rate is
    /// applied (clearing the filter) and the element is `Ready`. On failure
    /// the element is `Rejected` and passes buffers through.
    pub fn configure_format(&self, format: StreamFormat) -> Result<()> {
        let kernel = match format.validate().and_then(|()| Kernel::for_format(format.sample)) {
            Ok(kernel) => kernel,
            Err(err) => {
                warn!(format = %format, error = %err, "Rejected stream format");
                let mut control = self.control();
                control.status = KernelStatus::Rejected(format);
                control.kernel = None;
                return Err(err);
            }
        };

        self.engine().set_sample_rate(format.rate.as_hz())?;

        let mut control = self.control();
        control.status = KernelStatus::Ready(format);
        control.kernel = Some(kernel);
        debug!(format = %format, "Crossfeed kernel selected");
        Ok(())
    }

    /// Process a whole buffer in place
    ///
    /// Returns the number of frames modified; zero for passthrough.
    pub fn process(&self, data: &mut [u8], flags: BufferFlags) -> usize {
        self.process_frames(data, usize::MAX, flags)
    }

    /// Process at most `frames` frames of a buffer in place
    pub fn process_frames(&self, data: &mut [u8], frames: usize, flags: BufferFlags) -> usize {
        let Control { active, kernel, .. } = *self.control();

        let Some(kernel) = kernel.filter(|_| active && !flags.gap) else {
            return 0;
        };

        let whole = data.len() / kernel.frame_bytes();
        if frames > whole && data.len() % kernel.frame_bytes() != 0 {
            trace!(
                bytes = data.len() % kernel.frame_bytes(),
                "Leaving trailing partial frame untouched"
            );
        }

        self.engine().run(&kernel, data, frames)
    }

    /// React to a stream event
    pub fn handle_event(&self, event: StreamEvent) {
        match event {
            StreamEvent::Segment | StreamEvent::Seek | StreamEvent::Flush => {
                self.engine().clear();
            }
            StreamEvent::EndOfStream => {}
        }
    }

    /// Reset the filter memory
    pub fn clear(&self) {
        self.engine().clear();
    }

    /// Snapshot of the current settings
    pub fn settings(&self) -> CrossfeedSettings {
        let active = self.is_active();
        let level = self.engine().level();

        let mut settings = CrossfeedSettings::from_level(active, level);
        settings.preset = Some(level.preset()).filter(|preset| *preset != Preset::None);
        settings
    }

    /// Apply stored settings; nothing changes if they fail validation
    pub fn apply_settings(&self, settings: &CrossfeedSettings) -> Result<()> {
        let level = settings
            .validate()
            .inspect_err(|err| warn!(error = %err, "Rejected crossfeed settings"))?;

        self.engine().set_level(level);
        self.set_active(settings.active);
        Ok(())
    }

    fn engine(&self) -> MutexGuard<'_, Bs2b> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn control(&self) -> MutexGuard<'_, Control> {
        self.control.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
