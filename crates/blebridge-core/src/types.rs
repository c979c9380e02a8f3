//! Core types for the blebridge normalization layer
//!
//! Identifiers stay opaque strings: equality is exact-match on whatever the
//! platform supplied, and any case or dash normalization is an explicit,
//! configurable step in the engine rather than something baked in here.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec;

// ----------------------------------------------------------------------------
// Device Identifier
// ----------------------------------------------------------------------------

/// Opaque identifier for a peripheral, valid for the discovery session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    /// Create a new identifier from the platform-supplied string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hex-decoded form of the identifier (informational only)
    ///
    /// Dashes are ignored; an identifier that is not hex yields empty bytes.
    pub fn raw_bytes(&self) -> Vec<u8> {
        codec::decode_identity(&self.0)
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeviceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DeviceId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

// ----------------------------------------------------------------------------
// Adapter State
// ----------------------------------------------------------------------------

/// Power/authorization state of the local radio adapter
///
/// The transport delivers the state as an already-resolved label; mapping
/// platform state codes to labels is the transport's contract, not ours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdapterState {
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "resetting")]
    Resetting,
    #[serde(rename = "unsupported")]
    Unsupported,
    #[serde(rename = "unauthorized")]
    Unauthorized,
    #[serde(rename = "poweredOff")]
    PoweredOff,
    #[serde(rename = "poweredOn")]
    PoweredOn,
}

impl AdapterState {
    /// Parse a transport label, `None` if the label is not recognized
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "unknown" => Some(Self::Unknown),
            "resetting" => Some(Self::Resetting),
            "unsupported" => Some(Self::Unsupported),
            "unauthorized" => Some(Self::Unauthorized),
            "poweredOff" => Some(Self::PoweredOff),
            "poweredOn" => Some(Self::PoweredOn),
            _ => None,
        }
    }

    /// The transport label for this state
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Resetting => "resetting",
            Self::Unsupported => "unsupported",
            Self::Unauthorized => "unauthorized",
            Self::PoweredOff => "poweredOff",
            Self::PoweredOn => "poweredOn",
        }
    }
}

impl fmt::Display for AdapterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AdapterState {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
            .ok_or_else(|| crate::Error::malformed("stateChange", format!("unknown state label '{s}'")))
    }
}

// ----------------------------------------------------------------------------
// Characteristic Descriptor
// ----------------------------------------------------------------------------

/// A characteristic as reported during discovery
///
/// The platform reports bare characteristic identifiers only; the property
/// set is always empty at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacteristicDescriptor {
    pub uuid: String,
    pub properties: Vec<String>,
}

impl CharacteristicDescriptor {
    /// Synthesize a descriptor for a bare characteristic identifier
    pub fn from_uuid(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            properties: Vec::new(),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_id_equality_is_exact() {
        assert_eq!(DeviceId::new("aabb"), DeviceId::new("aabb"));
        assert_ne!(DeviceId::new("AABB"), DeviceId::new("aabb"));
    }

    #[test]
    fn test_device_id_raw_bytes() {
        let id = DeviceId::new("A0-B1-C2");
        assert_eq!(id.raw_bytes(), vec![0xA0, 0xB1, 0xC2]);

        let opaque = DeviceId::new("not-hex-zz");
        assert!(opaque.raw_bytes().is_empty());
    }

    #[test]
    fn test_adapter_state_labels() {
        for label in [
            "unknown",
            "resetting",
            "unsupported",
            "unauthorized",
            "poweredOff",
            "poweredOn",
        ] {
            let state = AdapterState::from_label(label).unwrap();
            assert_eq!(state.label(), label);
        }
        assert!(AdapterState::from_label("poweredUp").is_none());
    }

    #[test]
    fn test_characteristic_descriptor_has_no_properties() {
        let descriptor = CharacteristicDescriptor::from_uuid("2a37");
        assert_eq!(descriptor.uuid, "2a37");
        assert!(descriptor.properties.is_empty());
    }
}
