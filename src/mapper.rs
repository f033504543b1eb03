//! Maps OpenStack volume identifiers onto ScaleIO volume names.
//!
//! ScaleIO caps volume names at 32 characters, so the Cinder driver stores
//! each volume under a compacted form of its UUID: hyphens are removed, the
//! remaining hex digits are decoded to raw bytes, and the bytes are base64
//! encoded. A 36 character UUID therefore becomes a 24 character name.
//! Identifiers that are not hex after hyphen removal are base64 encoded as
//! they are.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::types::{MappedName, VolumeIdentifier};

/// Longest volume name the ScaleIO gateway accepts.
pub const SCALEIO_NAME_LIMIT: usize = 32;

/// Derives the ScaleIO volume name for an OpenStack volume identifier.
///
/// The mapping is total: malformed identifiers degrade to base64 of the
/// hyphen-stripped text instead of failing.
#[must_use]
pub fn map_volume_name(identifier: &VolumeIdentifier) -> MappedName {
    map_raw(identifier.as_str())
}

fn map_raw(identifier: &str) -> MappedName {
    let stripped: String = identifier.chars().filter(|ch| *ch != '-').collect();
    let bytes = hex::decode(&stripped).unwrap_or_else(|_| stripped.into_bytes());
    MappedName::new(STANDARD.encode(bytes))
}
