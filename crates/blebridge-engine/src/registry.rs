//! Peripheral registry
//!
//! The one place peripheral state lives. Records are created on first
//! discovery and then mutated in place on every later discovery of the same
//! identifier; nothing is ever removed for the lifetime of the process. The
//! registry holds plain mutable state: it is driven from the single
//! notification-processing context, and callers that thread notifications
//! must provide their own exclusion around it.

use std::collections::HashMap;

use smallvec::SmallVec;
use tracing::debug;

use blebridge_core::{Advertisement, DeviceId};

/// Placeholder for address information the platform does not report
const UNKNOWN: &str = "unknown";

// ----------------------------------------------------------------------------
// Peripheral Record
// ----------------------------------------------------------------------------

/// Last-known state of one discovered peripheral
#[derive(Debug, Clone, PartialEq)]
pub struct PeripheralRecord {
    /// Platform-supplied identifier, stable for the record's lifetime
    pub id: DeviceId,
    /// Hex-decoded form of the identifier (informational)
    pub raw_identity: Vec<u8>,
    /// Whether the latest advertisement flagged the peripheral connectable
    pub connectable: bool,
    /// Latest normalized advertisement
    pub advertisement: Advertisement,
    /// Latest signal strength reading from discovery
    pub rssi: i32,
    /// Physical address, when known
    pub address: String,
    /// Address type, when known
    pub address_type: String,
}

impl PeripheralRecord {
    fn new(id: DeviceId, connectable: bool, advertisement: Advertisement, rssi: i32) -> Self {
        let raw_identity = id.raw_bytes();
        Self {
            id,
            raw_identity,
            connectable,
            advertisement,
            rssi,
            address: UNKNOWN.to_string(),
            address_type: UNKNOWN.to_string(),
        }
    }
}

// ----------------------------------------------------------------------------
// Registry
// ----------------------------------------------------------------------------

/// Process-lifetime store of discovered peripherals, keyed by identifier
#[derive(Debug, Default)]
pub struct PeripheralRegistry {
    peripherals: HashMap<DeviceId, PeripheralRecord>,
    insertion_order: Vec<DeviceId>,
}

impl PeripheralRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or update the record for `id`.
    ///
    /// The first call for an identifier creates the record with unknown
    /// address information; later calls overwrite only `connectable`,
    /// `advertisement`, and `rssi`. Identity and address fields are never
    /// recreated.
    pub fn upsert(
        &mut self,
        id: DeviceId,
        connectable: bool,
        advertisement: Advertisement,
        rssi: i32,
    ) -> &PeripheralRecord {
        match self.peripherals.entry(id.clone()) {
            std::collections::hash_map::Entry::Occupied(entry) => {
                let record = entry.into_mut();
                record.connectable = connectable;
                record.advertisement = advertisement;
                record.rssi = rssi;
                record
            }
            std::collections::hash_map::Entry::Vacant(entry) => {
                debug!("Peripheral {id} discovered");
                self.insertion_order.push(id.clone());
                entry.insert(PeripheralRecord::new(id, connectable, advertisement, rssi))
            }
        }
    }

    /// Look up a peripheral by identifier
    pub fn get(&self, id: &DeviceId) -> Option<&PeripheralRecord> {
        self.peripherals.get(id)
    }

    /// Identifiers of all known peripherals, in discovery order
    pub fn device_ids(&self) -> SmallVec<[DeviceId; 8]> {
        SmallVec::from_vec(self.insertion_order.clone())
    }

    /// Number of known peripherals
    pub fn len(&self) -> usize {
        self.peripherals.len()
    }

    /// Whether any peripheral has been discovered yet
    pub fn is_empty(&self) -> bool {
        self.peripherals.is_empty()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use blebridge_core::ServiceDataEntry;

    fn advertisement(name: &str) -> Advertisement {
        Advertisement {
            local_name: Some(name.to_string()),
            ..Advertisement::default()
        }
    }

    #[test]
    fn test_first_upsert_creates_with_unknown_address() {
        let mut registry = PeripheralRegistry::new();
        let record = registry.upsert(DeviceId::new("a1b2"), true, advertisement("one"), -40);

        assert_eq!(record.id.as_str(), "a1b2");
        assert_eq!(record.raw_identity, vec![0xA1, 0xB2]);
        assert_eq!(record.address, "unknown");
        assert_eq!(record.address_type, "unknown");
        assert_eq!(record.rssi, -40);
    }

    #[test]
    fn test_second_upsert_mutates_only_volatile_fields() {
        let mut registry = PeripheralRegistry::new();
        registry.upsert(DeviceId::new("a1b2"), true, advertisement("one"), -40);

        let mut second = advertisement("two");
        second.service_data = vec![ServiceDataEntry::new("180f", vec![0x64])];
        let record = registry.upsert(DeviceId::new("a1b2"), false, second, -65);

        assert_eq!(record.id.as_str(), "a1b2");
        assert_eq!(record.address, "unknown");
        assert_eq!(record.address_type, "unknown");
        assert!(!record.connectable);
        assert_eq!(record.rssi, -65);
        assert_eq!(record.advertisement.local_name.as_deref(), Some("two"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_get_unknown_id() {
        let registry = PeripheralRegistry::new();
        assert!(registry.get(&DeviceId::new("missing")).is_none());
    }

    #[test]
    fn test_device_ids_in_discovery_order() {
        let mut registry = PeripheralRegistry::new();
        registry.upsert(DeviceId::new("bb"), false, Advertisement::default(), -50);
        registry.upsert(DeviceId::new("aa"), false, Advertisement::default(), -50);
        registry.upsert(DeviceId::new("bb"), false, Advertisement::default(), -51);

        let device_ids = registry.device_ids();
        let ids: Vec<&str> = device_ids.iter().map(DeviceId::as_str).collect();
        assert_eq!(ids, vec!["bb", "aa"]);
    }
}
