//! Normalized advertisement records
//!
//! Optional fields use explicit absence: a field the peripheral did not
//! advertise (or advertised empty, where the platform blanks it) is `None`,
//! never an empty placeholder. `service_data` is the one exception, where
//! absence is the empty list.

use serde::{Deserialize, Serialize};

// ----------------------------------------------------------------------------
// Service Data
// ----------------------------------------------------------------------------

/// One advertised service-data entry
///
/// `uuid` is lowercased at parse time; entry order is the order the keys
/// were encountered in the raw advertisement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDataEntry {
    pub uuid: String,
    pub data: Vec<u8>,
}

impl ServiceDataEntry {
    pub fn new(uuid: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            uuid: uuid.into(),
            data,
        }
    }
}

// ----------------------------------------------------------------------------
// Advertisement
// ----------------------------------------------------------------------------

/// Normalized advertisement payload of a discovered peripheral
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advertisement {
    /// Advertised local name, falling back to the peripheral's device name
    pub local_name: Option<String>,
    /// Advertised transmit power in dBm
    pub tx_power_level: Option<i32>,
    /// Manufacturer-specific data; zero-length source data is absent
    pub manufacturer_data: Option<Vec<u8>>,
    /// Service data entries in encounter order
    pub service_data: Vec<ServiceDataEntry>,
    /// Advertised service identifiers in encounter order
    pub service_uuids: Vec<String>,
}
