//! Event translation
//!
//! The dispatcher from validated raw notifications to canonical events: one
//! notification in, at most one event out, in arrival order. Discovery
//! notifications additionally update the injected peripheral registry; every
//! other kind is a straight field mapping with payload decoding where the
//! transport encoded bytes as text.

use tracing::{debug, warn};

use blebridge_core::codec::decode_base64;
use blebridge_core::notification::{DiscoverPayload, RawNotification};
use blebridge_core::{AdapterState, BleEvent, CharacteristicDescriptor, Result};

use crate::config::NormalizationConfig;
use crate::parser::parse_advertisement;
use crate::registry::PeripheralRegistry;

// ----------------------------------------------------------------------------
// Event Translator
// ----------------------------------------------------------------------------

/// Translates raw notifications into canonical events
///
/// Owns the registry it was constructed with, so independent translators are
/// fully isolated (each test can run its own).
pub struct EventTranslator {
    registry: PeripheralRegistry,
    config: NormalizationConfig,
}

impl EventTranslator {
    /// Create a translator around an injected registry
    pub fn new(registry: PeripheralRegistry, config: NormalizationConfig) -> Self {
        Self { registry, config }
    }

    /// Read access to the peripheral registry
    pub fn registry(&self) -> &PeripheralRegistry {
        &self.registry
    }

    /// Mutable access to the peripheral registry
    pub fn registry_mut(&mut self) -> &mut PeripheralRegistry {
        &mut self.registry
    }

    /// Translate one notification into its canonical event.
    ///
    /// `Ok(None)` is the defined skip (a discovery with an empty
    /// advertisement substructure). An error is scoped to this notification
    /// only; the caller logs it and moves on.
    pub fn translate(&mut self, notification: RawNotification) -> Result<Option<BleEvent>> {
        let event = match notification {
            RawNotification::Connect(p) => BleEvent::Connect {
                id: p.peripheral_uuid,
            },
            RawNotification::Disconnect(p) => BleEvent::Disconnect {
                id: p.peripheral_uuid,
            },
            RawNotification::RssiUpdate(p) => BleEvent::RssiUpdate {
                id: p.peripheral_uuid,
                rssi: p.rssi,
            },
            RawNotification::ServicesDiscover(p) => BleEvent::ServicesDiscover {
                id: p.peripheral_uuid,
                service_uuids: p.service_uuids,
            },
            RawNotification::CharacteristicsDiscover(p) => BleEvent::CharacteristicsDiscover {
                id: p.peripheral_uuid,
                service_uuid: p.service_uuid,
                characteristics: p
                    .characteristic_uuids
                    .into_iter()
                    .map(CharacteristicDescriptor::from_uuid)
                    .collect(),
            },
            RawNotification::Data(p) => BleEvent::Data {
                id: p.peripheral_uuid,
                service_uuid: p.service_uuid,
                characteristic_uuid: p.characteristic_uuid,
                value: decode_base64(&p.data, "characteristic data")?,
                is_notification: p.is_notification,
            },
            RawNotification::Write(p) => BleEvent::Write {
                id: p.peripheral_uuid,
                service_uuid: p.service_uuid,
                characteristic_uuid: p.characteristic_uuid,
            },
            RawNotification::Notify(p) => BleEvent::NotifyStateChange {
                id: p.peripheral_uuid,
                service_uuid: p.service_uuid,
                characteristic_uuid: p.characteristic_uuid,
                enabled: p.state,
            },
            RawNotification::StateChange(p) => {
                let state = AdapterState::from_label(&p.state).unwrap_or_else(|| {
                    warn!("Unrecognized adapter state label '{}'", p.state);
                    AdapterState::Unknown
                });
                debug!("Adapter state change: {state}");
                BleEvent::StateChange { state }
            }
            RawNotification::Discover(p) => return self.translate_discover(p),
        };

        Ok(Some(event))
    }

    fn translate_discover(&mut self, payload: DiscoverPayload) -> Result<Option<BleEvent>> {
        let Some(parsed) =
            parse_advertisement(&payload.advertisement, payload.name.as_deref(), &self.config)?
        else {
            debug!(
                "Skipping discovery of {} with empty advertisement",
                payload.device_uuid
            );
            return Ok(None);
        };

        let record = self.registry.upsert(
            payload.device_uuid,
            parsed.connectable,
            parsed.advertisement,
            payload.rssi,
        );

        Ok(Some(BleEvent::Discover {
            id: record.id.clone(),
            address: record.address.clone(),
            address_type: record.address_type.clone(),
            connectable: record.connectable,
            advertisement: record.advertisement.clone(),
            rssi: record.rssi,
        }))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
