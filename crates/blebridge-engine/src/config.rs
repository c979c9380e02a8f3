//! Engine configuration

use serde::{Deserialize, Serialize};

// ----------------------------------------------------------------------------
// Configuration
// ----------------------------------------------------------------------------

/// Normalization applied to advertised service identifiers.
///
/// Whether service UUIDs should be case-folded or stripped of dashes is an
/// unresolved question upstream, so it stays a caller decision here. The
/// defaults pass identifiers through exactly as the platform reported them.
/// Service-data keys are lowercased unconditionally regardless of this
/// config; that rule was never in question.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizationConfig {
    /// Lowercase advertised service UUIDs
    pub lowercase_service_uuids: bool,
    /// Strip dashes from advertised service UUIDs
    pub strip_uuid_dashes: bool,
}

impl NormalizationConfig {
    /// Create a configuration with the pass-through defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable lowercasing of service UUIDs
    pub fn with_lowercase_service_uuids(mut self, enabled: bool) -> Self {
        self.lowercase_service_uuids = enabled;
        self
    }

    /// Enable or disable dash stripping of service UUIDs
    pub fn with_strip_uuid_dashes(mut self, enabled: bool) -> Self {
        self.strip_uuid_dashes = enabled;
        self
    }

    /// Apply the configured normalization to one identifier
    pub fn normalize(&self, uuid: &str) -> String {
        let mut normalized = if self.lowercase_service_uuids {
            uuid.to_lowercase()
        } else {
            uuid.to_string()
        };
        if self.strip_uuid_dashes {
            normalized.retain(|c| c != '-');
        }
        normalized
    }
}
