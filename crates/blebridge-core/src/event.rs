//! Canonical event vocabulary
//!
//! Every raw notification the transport delivers maps to at most one of
//! these events, emitted in arrival order. Downstream consumers see the same
//! vocabulary regardless of which radio stack produced the notification.

use serde::{Deserialize, Serialize};

use crate::advertisement::Advertisement;
use crate::types::{AdapterState, CharacteristicDescriptor, DeviceId};

// ----------------------------------------------------------------------------
// Canonical Events
// ----------------------------------------------------------------------------

/// Platform-independent BLE event delivered to subscribers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BleEvent {
    /// Scanning was started (synthesized locally, not awaited from the stack)
    ScanStart,
    /// Scanning was stopped (synthesized locally, not awaited from the stack)
    ScanStop,
    /// The local adapter changed state
    StateChange { state: AdapterState },
    /// A peripheral was discovered or re-advertised
    Discover {
        id: DeviceId,
        address: String,
        address_type: String,
        connectable: bool,
        advertisement: Advertisement,
        rssi: i32,
    },
    /// A connection to a peripheral was established
    Connect { id: DeviceId },
    /// A connection to a peripheral was closed
    Disconnect { id: DeviceId },
    /// A requested signal-strength reading arrived
    RssiUpdate { id: DeviceId, rssi: i32 },
    /// Service discovery completed for a peripheral
    ServicesDiscover {
        id: DeviceId,
        service_uuids: Vec<String>,
    },
    /// Characteristic discovery completed for a service
    CharacteristicsDiscover {
        id: DeviceId,
        service_uuid: String,
        characteristics: Vec<CharacteristicDescriptor>,
    },
    /// A characteristic value arrived, either as a read response or a
    /// peripheral-initiated notification (`is_notification`)
    Data {
        id: DeviceId,
        service_uuid: String,
        characteristic_uuid: String,
        value: Vec<u8>,
        is_notification: bool,
    },
    /// A write-with-response completed
    Write {
        id: DeviceId,
        service_uuid: String,
        characteristic_uuid: String,
    },
    /// Notification subscription state changed for a characteristic
    NotifyStateChange {
        id: DeviceId,
        service_uuid: String,
        characteristic_uuid: String,
        enabled: bool,
    },
}
