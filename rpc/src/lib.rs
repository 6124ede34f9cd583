//! Episode settings shared between simulation clients and servers.
//!
//! The client sends an [`EpisodeSettings`] over RPC to tell the server how
//! the simulation loop should advance. This crate owns:
//!
//! - [`settings`] - The value type, its defaults and the fixed-delta normalization rule
//! - [`wire`] - Positional MessagePack encoding used on the RPC channel
//! - `host` - Explicit conversion to/from the host runtime representation
//!   (requires the `host` feature)

pub mod constants;
pub mod settings;
pub mod wire;

#[cfg(feature = "host")]
pub mod host;

pub use constants::{
    DEFAULT_MAX_SUBSTEP_DELTA_TIME, DEFAULT_MAX_SUBSTEPS, DEFAULT_SUBSTEPPING, WIRE_ARITY,
};
pub use settings::{EpisodeSettings, normalize_fixed_delta};
pub use wire::WireError;
