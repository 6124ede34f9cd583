//! Positional wire encoding for episode settings.
//!
//! Settings travel as a fixed-length array, never as a keyed map:
//!
//! ```text
//! [synchronous_mode, no_rendering_mode, fixed_delta_seconds,
//!  substepping, max_substep_delta_time, max_substeps]
//! ```
//!
//! `fixed_delta_seconds` carries an explicit presence marker: `[true, value]`
//! when set, `[false]` when not. The serde impls below define the layout for
//! every data format; RPC payloads use MessagePack.
//!
//! Decoding stores exactly what was sent. It does not normalize
//! `fixed_delta_seconds`.

use std::fmt;

use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::WIRE_ARITY;
use crate::settings::EpisodeSettings;

#[cfg(test)]
mod tests;

/// Errors from encoding or decoding an RPC settings payload.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("Failed to encode episode settings: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    #[error("Failed to decode episode settings: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
}

impl Serialize for EpisodeSettings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(WIRE_ARITY)?;
        tuple.serialize_element(&self.synchronous_mode)?;
        tuple.serialize_element(&self.no_rendering_mode)?;
        tuple.serialize_element(&MarkedDelta(self.fixed_delta_seconds))?;
        tuple.serialize_element(&self.substepping)?;
        tuple.serialize_element(&self.max_substep_delta_time)?;
        tuple.serialize_element(&self.max_substeps)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for EpisodeSettings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_tuple(WIRE_ARITY, SettingsVisitor)
    }
}

struct SettingsVisitor;

impl<'de> Visitor<'de> for SettingsVisitor {
    type Value = EpisodeSettings;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an array of {} episode settings fields", WIRE_ARITY)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let synchronous_mode = next_field(&mut seq, 0)?;
        let no_rendering_mode = next_field(&mut seq, 1)?;
        let MarkedDelta(fixed_delta_seconds) = next_field(&mut seq, 2)?;
        let settings = EpisodeSettings {
            synchronous_mode,
            no_rendering_mode,
            fixed_delta_seconds,
            substepping: next_field(&mut seq, 3)?,
            max_substep_delta_time: next_field(&mut seq, 4)?,
            max_substeps: next_field(&mut seq, 5)?,
        };

        // Trailing elements mean the peer uses a different schema.
        if seq.next_element::<IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(WIRE_ARITY + 1, &self));
        }

        Ok(settings)
    }
}

fn next_field<'de, A, T>(seq: &mut A, index: usize) -> Result<T, A::Error>
where
    A: SeqAccess<'de>,
    T: Deserialize<'de>,
{
    seq.next_element()?
        .ok_or_else(|| de::Error::invalid_length(index, &SettingsVisitor))
}

/// Optional fixed delta with its presence marker.
struct MarkedDelta(Option<f64>);

impl Serialize for MarkedDelta {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(delta) => {
                let mut tuple = serializer.serialize_tuple(2)?;
                tuple.serialize_element(&true)?;
                tuple.serialize_element(&delta)?;
                tuple.end()
            }
            None => {
                let mut tuple = serializer.serialize_tuple(1)?;
                tuple.serialize_element(&false)?;
                tuple.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for MarkedDelta {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(MarkedDeltaVisitor)
    }
}

struct MarkedDeltaVisitor;

impl<'de> Visitor<'de> for MarkedDeltaVisitor {
    type Value = MarkedDelta;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[true, float] or [false]")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let present: bool = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;

        let delta = if present {
            let value: f64 = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(1, &self))?;
            Some(value)
        } else {
            None
        };

        let expected_len = if present { 2 } else { 1 };
        if seq.next_element::<IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(expected_len + 1, &self));
        }

        Ok(MarkedDelta(delta))
    }
}

impl EpisodeSettings {
    /// Encode as a MessagePack array for the RPC channel.
    pub fn to_bytes(&self) -> Result<Vec<u8>, WireError> {
        Ok(rmp_serde::to_vec(self)?)
    }

    /// Decode a MessagePack array received from the RPC channel.
    ///
    /// Fails on wrong arity, wrong element types or malformed markers; a
    /// partially filled value is never returned.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        match rmp_serde::from_slice::<Self>(bytes) {
            Ok(settings) => {
                tracing::trace!(%settings, "decoded episode settings");
                Ok(settings)
            }
            Err(e) => {
                tracing::warn!(len = bytes.len(), error = %e, "failed to decode episode settings");
                Err(WireError::Decode(e))
            }
        }
    }
}
