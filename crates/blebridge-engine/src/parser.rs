//! Advertisement parsing
//!
//! Consumes the loose advertisement substructure of one discovery
//! notification and produces a normalized [`Advertisement`]. Stateless; the
//! presence/absence rule for each optional field lives here and nowhere
//! else.

use serde_json::{Map, Value};
use tracing::debug;

use blebridge_core::codec::decode_base64;
use blebridge_core::{Advertisement, Result, ServiceDataEntry};

use crate::config::NormalizationConfig;

// Platform field names inside the advertisement substructure.
const ADV_LOCAL_NAME: &str = "kCBAdvDataLocalName";
const ADV_TX_POWER_LEVEL: &str = "kCBAdvDataTxPowerLevel";
const ADV_MANUFACTURER_DATA: &str = "kCBAdvDataManufacturerData";
const ADV_SERVICE_DATA: &str = "kCBAdvDataServiceData";
const ADV_SERVICE_UUIDS: &str = "kCBAdvDataServiceUUIDs";
const ADV_IS_CONNECTABLE: &str = "kCBAdvDataIsConnectable";

// ----------------------------------------------------------------------------
// Parsed Advertisement
// ----------------------------------------------------------------------------

/// Result of parsing one discovery notification's advertisement
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAdvertisement {
    pub advertisement: Advertisement,
    pub connectable: bool,
}

// ----------------------------------------------------------------------------
// Parser
// ----------------------------------------------------------------------------

/// Parse the advertisement substructure of a discovery notification.
///
/// Returns `Ok(None)` when the substructure has no keys at all: that
/// notification is skipped entirely, with no event and no registry change.
/// Malformed base64 inside a data field fails with a decoding error scoped
/// to this one notification.
pub fn parse_advertisement(
    raw: &Map<String, Value>,
    fallback_name: Option<&str>,
    config: &NormalizationConfig,
) -> Result<Option<ParsedAdvertisement>> {
    if raw.is_empty() {
        return Ok(None);
    }

    let advertisement = Advertisement {
        local_name: parse_local_name(raw, fallback_name),
        tx_power_level: parse_tx_power(raw),
        manufacturer_data: parse_manufacturer_data(raw)?,
        service_data: parse_service_data(raw)?,
        service_uuids: parse_service_uuids(raw, config),
    };

    Ok(Some(ParsedAdvertisement {
        advertisement,
        connectable: raw.get(ADV_IS_CONNECTABLE).is_some_and(is_truthy),
    }))
}

// Primary advertisement field, falling back to the notification's top-level
// device name; the empty string is absent at either stage.
fn parse_local_name(raw: &Map<String, Value>, fallback_name: Option<&str>) -> Option<String> {
    raw.get(ADV_LOCAL_NAME)
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .or_else(|| fallback_name.filter(|name| !name.is_empty()))
        .map(str::to_string)
}

// The platform blanks an unadvertised tx power to the empty string.
fn parse_tx_power(raw: &Map<String, Value>) -> Option<i32> {
    match raw.get(ADV_TX_POWER_LEVEL) {
        None => None,
        Some(Value::Number(n)) => n.as_i64().map(|level| level as i32),
        Some(Value::String(s)) if s.is_empty() => None,
        Some(other) => {
            debug!("Ignoring tx power level with unexpected shape: {other}");
            None
        }
    }
}

// Zero decoded bytes means the field was not advertised.
fn parse_manufacturer_data(raw: &Map<String, Value>) -> Result<Option<Vec<u8>>> {
    match raw.get(ADV_MANUFACTURER_DATA) {
        Some(Value::String(encoded)) => {
            let bytes = decode_base64(encoded, "manufacturer data")?;
            Ok((!bytes.is_empty()).then_some(bytes))
        }
        Some(other) => {
            debug!("Ignoring manufacturer data with unexpected shape: {other}");
            Ok(None)
        }
        None => Ok(None),
    }
}

// Keys are lowercased; encounter order is preserved. An absent or empty
// mapping yields the empty list, not an error.
fn parse_service_data(raw: &Map<String, Value>) -> Result<Vec<ServiceDataEntry>> {
    let Some(Value::Object(entries)) = raw.get(ADV_SERVICE_DATA) else {
        return Ok(Vec::new());
    };

    let mut service_data = Vec::with_capacity(entries.len());
    for (uuid, encoded) in entries {
        let Some(encoded) = encoded.as_str() else {
            debug!("Ignoring service data entry {uuid} with non-text payload");
            continue;
        };
        let data = decode_base64(encoded, "service data")?;
        service_data.push(ServiceDataEntry::new(uuid.to_lowercase(), data));
    }
    Ok(service_data)
}

fn parse_service_uuids(raw: &Map<String, Value>, config: &NormalizationConfig) -> Vec<String> {
    let Some(Value::Array(uuids)) = raw.get(ADV_SERVICE_UUIDS) else {
        return Vec::new();
    };

    uuids
        .iter()
        .filter_map(Value::as_str)
        .map(|uuid| config.normalize(uuid))
        .collect()
}

// The connectable flag arrives in whatever shape the platform felt like;
// absent and falsy both mean not connectable.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
