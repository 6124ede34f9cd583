//! The episode settings value type.

use std::fmt;

use crate::constants::{DEFAULT_MAX_SUBSTEP_DELTA_TIME, DEFAULT_MAX_SUBSTEPS, DEFAULT_SUBSTEPPING};

/// How the simulation loop should advance.
///
/// A plain value: copied across the RPC boundary, never shared. Equality is
/// field-wise, with `fixed_delta_seconds` equal only when both are absent or
/// both hold the same value.
///
/// `fixed_delta_seconds` is guaranteed positive only for values built with
/// [`EpisodeSettings::new`]. Field assignment and wire decoding store whatever
/// they are given, so consumers must not rely on the invariant for values
/// obtained another way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeSettings {
    /// Simulation advances only when a client requests a tick.
    pub synchronous_mode: bool,

    /// Rendering is suppressed while simulating.
    pub no_rendering_mode: bool,

    /// Duration of each step in fixed-timestep mode.
    ///
    /// `None` means variable (real-time) stepping.
    pub fixed_delta_seconds: Option<f64>,

    /// Physics substepping within one simulation step.
    pub substepping: bool,

    /// Upper bound on a single physics substep, in seconds.
    pub max_substep_delta_time: f64,

    /// Upper bound on substeps per simulation step.
    ///
    /// Not validated; negative values propagate as-is.
    pub max_substeps: i32,
}

impl Default for EpisodeSettings {
    fn default() -> Self {
        Self {
            synchronous_mode: false,
            no_rendering_mode: false,
            fixed_delta_seconds: None,
            substepping: DEFAULT_SUBSTEPPING,
            max_substep_delta_time: DEFAULT_MAX_SUBSTEP_DELTA_TIME,
            max_substeps: DEFAULT_MAX_SUBSTEPS,
        }
    }
}

/// Derive the presence of a fixed timestep from a raw number.
///
/// Only strictly positive values count as set; zero, negatives and NaN all
/// mean variable stepping.
pub fn normalize_fixed_delta(fixed_delta_seconds: f64) -> Option<f64> {
    if fixed_delta_seconds > 0.0 {
        Some(fixed_delta_seconds)
    } else {
        None
    }
}

impl EpisodeSettings {
    /// Build settings from raw values.
    ///
    /// `fixed_delta_seconds` goes through [`normalize_fixed_delta`]: pass `0.0`
    /// to request variable stepping. This is the only constructor that
    /// normalizes.
    pub fn new(
        synchronous_mode: bool,
        no_rendering_mode: bool,
        fixed_delta_seconds: f64,
        substepping: bool,
        max_substep_delta_time: f64,
        max_substeps: i32,
    ) -> Self {
        Self {
            synchronous_mode,
            no_rendering_mode,
            fixed_delta_seconds: normalize_fixed_delta(fixed_delta_seconds),
            substepping,
            max_substep_delta_time,
            max_substeps,
        }
    }

    /// Externally ticked simulation with the given step duration.
    ///
    /// Substepping keeps its defaults.
    pub fn synchronous(fixed_delta_seconds: f64) -> Self {
        Self::new(
            true,
            false,
            fixed_delta_seconds,
            DEFAULT_SUBSTEPPING,
            DEFAULT_MAX_SUBSTEP_DELTA_TIME,
            DEFAULT_MAX_SUBSTEPS,
        )
    }

    /// Whether the server should step by a constant duration.
    pub fn is_fixed_timestep(&self) -> bool {
        self.fixed_delta_seconds.is_some()
    }
}

impl fmt::Display for EpisodeSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sync={} no_render={} ",
            self.synchronous_mode, self.no_rendering_mode
        )?;
        match self.fixed_delta_seconds {
            Some(delta) => write!(f, "fixed_delta={}s ", delta)?,
            None => write!(f, "fixed_delta=variable ")?,
        }
        write!(
            f,
            "substepping={} max_substep_dt={} max_substeps={}",
            self.substepping, self.max_substep_delta_time, self.max_substeps
        )
    }
}
