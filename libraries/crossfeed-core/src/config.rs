//! Persistable crossfeed settings

use crate::error::Result;
use crate::types::level::{feed_tenths_from_db, CrossfeedLevel, Preset};
use serde::{Deserialize, Serialize};

/// Crossfeed settings as stored by a host (JSON)
///
/// When `preset` names one of the known presets it wins over the explicit
/// `cutoff_hz` / `feed_db` pair. `none` (or an absent preset) means the
/// explicit pair is used.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CrossfeedSettings {
    /// Whether crossfeed processing is enabled
    #[serde(default = "default_active")]
    pub active: bool,

    /// Lowpass cut frequency in Hz
    #[serde(default = "default_cutoff_hz")]
    pub cutoff_hz: u32,

    /// Feed level in dB
    #[serde(default = "default_feed_db")]
    pub feed_db: f32,

    /// Optional named preset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<Preset>,
}

impl Default for CrossfeedSettings {
    fn default() -> Self {
        Self {
            active: default_active(),
            cutoff_hz: default_cutoff_hz(),
            feed_db: default_feed_db(),
            preset: None,
        }
    }
}

impl CrossfeedSettings {
    /// Settings for a named preset
    pub fn from_preset(preset: Preset) -> Self {
        let level = preset.level().unwrap_or_default();
        Self {
            active: true,
            cutoff_hz: level.cutoff_hz(),
            feed_db: level.feed_db(),
            preset: Some(preset),
        }
    }

    /// Settings mirroring an existing level
    pub fn from_level(active: bool, level: CrossfeedLevel) -> Self {
        Self {
            active,
            cutoff_hz: level.cutoff_hz(),
            feed_db: level.feed_db(),
            preset: None,
        }
    }

    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize settings to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Resolve to a validated level
    pub fn validate(&self) -> Result<CrossfeedLevel> {
        if let Some(level) = self.preset.and_then(|preset| preset.level()) {
            return Ok(level);
        }
        CrossfeedLevel::new(self.cutoff_hz, feed_tenths_from_db(self.feed_db)?)
    }
}

// Default values
fn default_active() -> bool {
    true
}

fn default_cutoff_hz() -> u32 {
    CrossfeedLevel::default().cutoff_hz()
}

fn default_feed_db() -> f32 {
    CrossfeedLevel::default().feed_db()
}
