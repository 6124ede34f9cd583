//! Default values and wire constants for episode settings.

/// Physics substepping is on unless a client turns it off.
pub const DEFAULT_SUBSTEPPING: bool = true;

/// Upper bound on the duration of one physics substep, in seconds.
pub const DEFAULT_MAX_SUBSTEP_DELTA_TIME: f64 = 0.01;

/// Upper bound on the number of physics substeps per simulation step.
pub const DEFAULT_MAX_SUBSTEPS: i32 = 10;

/// Number of positional elements in the encoded settings array.
///
/// New fields may only be appended; changing this breaks every peer built
/// against the previous layout.
pub const WIRE_ARITY: usize = 6;
