//! Host runtime representation of episode settings.
//!
//! This is the form the simulation host stores and applies to its stepping
//! loop. It differs from the RPC type in one place: the fixed timestep is a
//! plain `f64` where `0.0` means "not set", so there is no way to express a
//! fixed timestep that is present but zero.
//!
//! The host reads its episode defaults from a TOML table:
//!
//! ```toml
//! synchronous_mode = true
//! fixed_delta_seconds = 0.05
//! max_substeps = 16
//! ```
//!
//! Every key is optional; missing keys take the host defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Stored value of [`HostEpisodeSettings::fixed_delta_seconds`] when no
/// fixed timestep is set.
pub const UNSET_FIXED_DELTA: f64 = 0.0;

/// Default maximum physics substep duration, in seconds.
pub const DEFAULT_MAX_SUBSTEP_DELTA_TIME: f64 = 0.01;

/// Default maximum physics substeps per simulation step.
pub const DEFAULT_MAX_SUBSTEPS: i32 = 10;

/// Episode settings as held by the host runtime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HostEpisodeSettings {
    /// Wait for client tick requests before stepping (default: false)
    #[serde(default)]
    pub synchronous_mode: bool,
    /// Skip rendering while simulating (default: false)
    #[serde(default)]
    pub no_rendering_mode: bool,
    /// Fixed step duration in seconds (default: 0.0, meaning unset)
    #[serde(default = "default_fixed_delta_seconds")]
    pub fixed_delta_seconds: f64,
    /// Physics substepping (default: true)
    #[serde(default = "default_true")]
    pub substepping: bool,
    /// Maximum physics substep duration in seconds (default: 0.01)
    #[serde(default = "default_max_substep_delta_time")]
    pub max_substep_delta_time: f64,
    /// Maximum physics substeps per step (default: 10)
    #[serde(default = "default_max_substeps")]
    pub max_substeps: i32,
}

fn default_fixed_delta_seconds() -> f64 {
    UNSET_FIXED_DELTA
}
fn default_true() -> bool {
    true
}
fn default_max_substep_delta_time() -> f64 {
    DEFAULT_MAX_SUBSTEP_DELTA_TIME
}
fn default_max_substeps() -> i32 {
    DEFAULT_MAX_SUBSTEPS
}

impl Default for HostEpisodeSettings {
    fn default() -> Self {
        Self {
            synchronous_mode: false,
            no_rendering_mode: false,
            fixed_delta_seconds: default_fixed_delta_seconds(),
            substepping: default_true(),
            max_substep_delta_time: default_max_substep_delta_time(),
            max_substeps: default_max_substeps(),
        }
    }
}

/// Error type for reading or writing the host settings file.
#[derive(Debug, thiserror::Error)]
pub enum HostConfigError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl HostEpisodeSettings {
    /// The fixed timestep if one is set, otherwise [`UNSET_FIXED_DELTA`].
    ///
    /// Non-positive and NaN stored values read as unset.
    pub fn fixed_delta_seconds_or_unset(&self) -> f64 {
        if self.has_fixed_delta() {
            self.fixed_delta_seconds
        } else {
            UNSET_FIXED_DELTA
        }
    }

    /// Whether a fixed timestep is configured.
    pub fn has_fixed_delta(&self) -> bool {
        self.fixed_delta_seconds > UNSET_FIXED_DELTA
    }

    /// Parse settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, HostConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, HostConfigError> {
        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), ?settings, "loaded host episode settings");
        Ok(settings)
    }

    /// Serialize settings to TOML text.
    pub fn to_toml_string(&self) -> Result<String, HostConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
