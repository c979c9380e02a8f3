//! Raw notification records and the transport boundary
//!
//! The radio-stack transport delivers one frame per physical event: a named
//! kind plus a loosely-typed field mapping keyed by the platform's own field
//! names. Everything is validated into a typed record here, so a missing
//! required field becomes a [`Error::MalformedNotification`] at the boundary
//! instead of an undefined-field access somewhere downstream.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::types::DeviceId;

/// Namespace prefix some transports put in front of the notification kind
const KIND_PREFIX: &str = "ble.";

// ----------------------------------------------------------------------------
// Transport Frame
// ----------------------------------------------------------------------------

/// One raw notification as delivered by the radio-stack transport
#[derive(Debug, Clone)]
pub struct TransportFrame {
    /// Notification kind, optionally namespaced (`discover` or `ble.discover`)
    pub kind: String,
    /// Loosely-typed field mapping for this kind
    pub body: Value,
}

impl TransportFrame {
    pub fn new(kind: impl Into<String>, body: Value) -> Self {
        Self {
            kind: kind.into(),
            body,
        }
    }

    /// Validate this frame into a typed notification record
    pub fn into_notification(self) -> Result<RawNotification> {
        RawNotification::parse(&self.kind, self.body)
    }
}

// ----------------------------------------------------------------------------
// Payload Records
// ----------------------------------------------------------------------------

/// `connect` payload
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectPayload {
    #[serde(rename = "peripheralUuid")]
    pub peripheral_uuid: DeviceId,
}

/// `disconnect` payload
#[derive(Debug, Clone, Deserialize)]
pub struct DisconnectPayload {
    #[serde(rename = "peripheralUuid")]
    pub peripheral_uuid: DeviceId,
}

/// `rssiUpdate` payload
#[derive(Debug, Clone, Deserialize)]
pub struct RssiUpdatePayload {
    #[serde(rename = "peripheralUuid")]
    pub peripheral_uuid: DeviceId,
    pub rssi: i32,
}

/// `servicesDiscover` payload
#[derive(Debug, Clone, Deserialize)]
pub struct ServicesDiscoverPayload {
    #[serde(rename = "peripheralUuid")]
    pub peripheral_uuid: DeviceId,
    #[serde(rename = "serviceUuids")]
    pub service_uuids: Vec<String>,
}

/// `characteristicsDiscover` payload
///
/// The platform lists bare characteristic identifiers only; properties are
/// synthesized empty by the translator.
#[derive(Debug, Clone, Deserialize)]
pub struct CharacteristicsDiscoverPayload {
    #[serde(rename = "peripheralUuid")]
    pub peripheral_uuid: DeviceId,
    #[serde(rename = "serviceUuid")]
    pub service_uuid: String,
    #[serde(rename = "characteristicUuids")]
    pub characteristic_uuids: Vec<String>,
}

/// `data` payload; `data` is still base64 text at this point
#[derive(Debug, Clone, Deserialize)]
pub struct DataPayload {
    #[serde(rename = "peripheralUuid")]
    pub peripheral_uuid: DeviceId,
    #[serde(rename = "serviceUuid")]
    pub service_uuid: String,
    #[serde(rename = "characteristicUuid")]
    pub characteristic_uuid: String,
    pub data: String,
    #[serde(rename = "isNotification")]
    pub is_notification: bool,
}

/// `write` payload
#[derive(Debug, Clone, Deserialize)]
pub struct WritePayload {
    #[serde(rename = "peripheralUuid")]
    pub peripheral_uuid: DeviceId,
    #[serde(rename = "serviceUuid")]
    pub service_uuid: String,
    #[serde(rename = "characteristicUuid")]
    pub characteristic_uuid: String,
}

/// `notify` payload
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyPayload {
    #[serde(rename = "peripheralUuid")]
    pub peripheral_uuid: DeviceId,
    #[serde(rename = "serviceUuid")]
    pub service_uuid: String,
    #[serde(rename = "characteristicUuid")]
    pub characteristic_uuid: String,
    pub state: bool,
}

/// `stateChange` payload: the label is already resolved by the transport
#[derive(Debug, Clone, Deserialize)]
pub struct StateChangePayload {
    pub state: String,
}

/// `discover` payload
///
/// The advertisement substructure stays a raw map: which of its keys are
/// present varies per packet, and the parser owns the presence/absence
/// rules. An absent substructure is the empty map, which the parser treats
/// as the defined skip condition.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverPayload {
    #[serde(rename = "kCBMsgArgDeviceUUID")]
    pub device_uuid: DeviceId,
    #[serde(rename = "kCBMsgArgName", default)]
    pub name: Option<String>,
    #[serde(rename = "kCBMsgArgRssi")]
    pub rssi: i32,
    #[serde(rename = "kCBMsgArgAdvertisementData", default)]
    pub advertisement: Map<String, Value>,
}

// ----------------------------------------------------------------------------
// Raw Notification
// ----------------------------------------------------------------------------

/// A validated raw notification, one variant per transport kind
#[derive(Debug, Clone)]
pub enum RawNotification {
    Connect(ConnectPayload),
    Disconnect(DisconnectPayload),
    RssiUpdate(RssiUpdatePayload),
    ServicesDiscover(ServicesDiscoverPayload),
    CharacteristicsDiscover(CharacteristicsDiscoverPayload),
    Data(DataPayload),
    Write(WritePayload),
    Notify(NotifyPayload),
    StateChange(StateChangePayload),
    Discover(DiscoverPayload),
}

impl RawNotification {
    /// Validate a `(kind, body)` pair into a typed notification.
    ///
    /// The kind may carry the transport's namespace prefix. An unrecognized
    /// kind or a body missing a required field fails with
    /// [`Error::MalformedNotification`].
    pub fn parse(kind: &str, body: Value) -> Result<Self> {
        let kind = kind.strip_prefix(KIND_PREFIX).unwrap_or(kind);
        match kind {
            "connect" => payload(kind, body).map(Self::Connect),
            "disconnect" => payload(kind, body).map(Self::Disconnect),
            "rssiUpdate" => payload(kind, body).map(Self::RssiUpdate),
            "servicesDiscover" => payload(kind, body).map(Self::ServicesDiscover),
            "characteristicsDiscover" => payload(kind, body).map(Self::CharacteristicsDiscover),
            "data" => payload(kind, body).map(Self::Data),
            "write" => payload(kind, body).map(Self::Write),
            "notify" => payload(kind, body).map(Self::Notify),
            "stateChange" => parse_state_change(body).map(Self::StateChange),
            "discover" => payload(kind, body).map(Self::Discover),
            other => Err(Error::malformed(other, "unrecognized notification kind")),
        }
    }

    /// The transport kind this notification was parsed from
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Connect(_) => "connect",
            Self::Disconnect(_) => "disconnect",
            Self::RssiUpdate(_) => "rssiUpdate",
            Self::ServicesDiscover(_) => "servicesDiscover",
            Self::CharacteristicsDiscover(_) => "characteristicsDiscover",
            Self::Data(_) => "data",
            Self::Write(_) => "write",
            Self::Notify(_) => "notify",
            Self::StateChange(_) => "stateChange",
            Self::Discover(_) => "discover",
        }
    }
}

fn payload<T: DeserializeOwned>(kind: &str, body: Value) -> Result<T> {
    serde_json::from_value(body).map_err(|e| Error::malformed(kind, e))
}

// Some transports deliver the state label bare, others wrap it in a field.
fn parse_state_change(body: Value) -> Result<StateChangePayload> {
    match body {
        Value::String(state) => Ok(StateChangePayload { state }),
        other => payload("stateChange", other),
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
