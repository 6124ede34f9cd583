//! Conversion between [`EpisodeSettings`] and the host runtime representation.
//!
//! These two functions are the only crossing points; there are no `From`
//! impls. The host stores "no fixed timestep" as `0.0`, so a fixed delta
//! that is present but zero cannot survive the trip through the host. Any
//! other value round-trips exactly.

use simlink_host::HostEpisodeSettings;

use crate::settings::EpisodeSettings;

/// Read settings from the host representation.
///
/// The host's fixed delta is normalized, so its unset `0.0` becomes absent.
pub fn from_host(native: &HostEpisodeSettings) -> EpisodeSettings {
    let settings = EpisodeSettings::new(
        native.synchronous_mode,
        native.no_rendering_mode,
        native.fixed_delta_seconds_or_unset(),
        native.substepping,
        native.max_substep_delta_time,
        native.max_substeps,
    );
    tracing::debug!(%settings, "read episode settings from host");
    settings
}

/// Build a fresh host representation from settings.
///
/// An absent fixed delta leaves the host field at its default.
pub fn to_host(settings: &EpisodeSettings) -> HostEpisodeSettings {
    let mut native = HostEpisodeSettings {
        synchronous_mode: settings.synchronous_mode,
        no_rendering_mode: settings.no_rendering_mode,
        substepping: settings.substepping,
        max_substep_delta_time: settings.max_substep_delta_time,
        max_substeps: settings.max_substeps,
        ..HostEpisodeSettings::default()
    };
    if let Some(delta) = settings.fixed_delta_seconds {
        native.fixed_delta_seconds = delta;
    }
    tracing::debug!(%settings, "wrote episode settings to host");
    native
}
