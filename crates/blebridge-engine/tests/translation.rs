//! End-to-end translation tests: transport frames in, canonical events out.

use std::sync::{Arc, Mutex};

use serde_json::json;
use tokio::sync::mpsc::UnboundedSender;

use blebridge_core::{BleEvent, DeviceId, ServiceDataEntry, TransportFrame};
use blebridge_engine::{
    BridgePump, EventBus, EventTranslator, NormalizationConfig, PeripheralRegistry,
};

fn harness() -> (
    UnboundedSender<TransportFrame>,
    BridgePump,
    Arc<Mutex<Vec<BleEvent>>>,
) {
    let translator =
        EventTranslator::new(PeripheralRegistry::new(), NormalizationConfig::default());
    let bus = EventBus::new();

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    bus.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

    let (frame_tx, pump) = BridgePump::channel(translator, bus);
    (frame_tx, pump, events)
}

fn discover_frame(device: &str, rssi: i32, advertisement: serde_json::Value) -> TransportFrame {
    TransportFrame::new(
        "ble.discover",
        json!({
            "kCBMsgArgDeviceUUID": device,
            "kCBMsgArgName": "PulseBand",
            "kCBMsgArgRssi": rssi,
            "kCBMsgArgAdvertisementData": advertisement,
        }),
    )
}

#[tokio::test]
async fn discovery_normalizes_and_registers() {
    let (frame_tx, pump, events) = harness();

    frame_tx
        .send(discover_frame(
            "a1b2c3",
            -52,
            json!({
                "kCBAdvDataLocalName": "",
                "kCBAdvDataTxPowerLevel": "",
                "kCBAdvDataManufacturerData": "",
                "kCBAdvDataIsConnectable": 1,
                "kCBAdvDataServiceData": {"180A": "AQ==", "180F": "Ag=="},
                "kCBAdvDataServiceUUIDs": ["180A", "180F"],
            }),
        ))
        .unwrap();
    drop(frame_tx);

    let translator = pump.run().await;

    let events = events.lock().unwrap();
    let BleEvent::Discover {
        id,
        address,
        address_type,
        connectable,
        advertisement,
        rssi,
    } = &events[0]
    else {
        panic!("expected a discover event, got {:?}", events[0]);
    };

    assert_eq!(id.as_str(), "a1b2c3");
    assert_eq!(address, "unknown");
    assert_eq!(address_type, "unknown");
    assert!(*connectable);
    assert_eq!(*rssi, -52);

    // Blanked optional fields are absent, not present-but-empty; the name
    // falls back to the frame-level device name.
    assert_eq!(advertisement.local_name.as_deref(), Some("PulseBand"));
    assert!(advertisement.tx_power_level.is_none());
    assert!(advertisement.manufacturer_data.is_none());

    // Service data keys are lowercased and keep encounter order.
    assert_eq!(
        advertisement.service_data,
        vec![
            ServiceDataEntry::new("180a", vec![0x01]),
            ServiceDataEntry::new("180f", vec![0x02]),
        ]
    );

    let record = translator.registry().get(&DeviceId::new("a1b2c3")).unwrap();
    assert_eq!(record.rssi, -52);
    assert_eq!(record.raw_identity, vec![0xA1, 0xB2, 0xC3]);
}

#[tokio::test]
async fn rediscovery_updates_without_recreating() {
    let (frame_tx, pump, events) = harness();

    frame_tx
        .send(discover_frame(
            "a1b2c3",
            -52,
            json!({"kCBAdvDataIsConnectable": true}),
        ))
        .unwrap();
    frame_tx
        .send(discover_frame(
            "a1b2c3",
            -71,
            json!({"kCBAdvDataIsConnectable": false}),
        ))
        .unwrap();
    drop(frame_tx);

    let translator = pump.run().await;

    assert_eq!(events.lock().unwrap().len(), 2);
    assert_eq!(translator.registry().len(), 1);

    let record = translator.registry().get(&DeviceId::new("a1b2c3")).unwrap();
    assert_eq!(record.rssi, -71);
    assert!(!record.connectable);
    assert_eq!(record.address, "unknown");
    assert_eq!(record.address_type, "unknown");
}

#[tokio::test]
async fn empty_advertisement_emits_nothing() {
    let (frame_tx, pump, events) = harness();

    frame_tx
        .send(discover_frame("a1b2c3", -52, json!({})))
        .unwrap();
    drop(frame_tx);

    let translator = pump.run().await;

    assert!(events.lock().unwrap().is_empty());
    assert!(translator.registry().is_empty());
}

#[tokio::test]
async fn data_frames_fail_soft_between_valid_ones() {
    let (frame_tx, pump, events) = harness();

    let data_frame = |payload: &str| {
        TransportFrame::new(
            "data",
            json!({
                "peripheralUuid": "a1b2c3",
                "serviceUuid": "180d",
                "characteristicUuid": "2a37",
                "data": payload,
                "isNotification": true,
            }),
        )
    };

    frame_tx.send(data_frame("not base64!")).unwrap();
    frame_tx.send(data_frame("AQID")).unwrap();
    drop(frame_tx);

    pump.run().await;

    // The malformed payload dropped its own event only.
    let events = events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(
        events[0],
        BleEvent::Data {
            id: DeviceId::new("a1b2c3"),
            service_uuid: "180d".to_string(),
            characteristic_uuid: "2a37".to_string(),
            value: vec![0x01, 0x02, 0x03],
            is_notification: true,
        }
    );
}

#[tokio::test]
async fn operation_replies_map_one_to_one() {
    let (frame_tx, pump, events) = harness();

    frame_tx
        .send(TransportFrame::new(
            "servicesDiscover",
            json!({"peripheralUuid": "a1b2c3", "serviceUuids": ["180d", "180f"]}),
        ))
        .unwrap();
    frame_tx
        .send(TransportFrame::new(
            "characteristicsDiscover",
            json!({
                "peripheralUuid": "a1b2c3",
                "serviceUuid": "180d",
                "characteristicUuids": ["2a37"],
            }),
        ))
        .unwrap();
    frame_tx
        .send(TransportFrame::new(
            "write",
            json!({
                "peripheralUuid": "a1b2c3",
                "serviceUuid": "180d",
                "characteristicUuid": "2a39",
            }),
        ))
        .unwrap();
    frame_tx
        .send(TransportFrame::new(
            "notify",
            json!({
                "peripheralUuid": "a1b2c3",
                "serviceUuid": "180d",
                "characteristicUuid": "2a37",
                "state": false,
            }),
        ))
        .unwrap();
    drop(frame_tx);

    pump.run().await;

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 4);
    assert!(matches!(&events[0], BleEvent::ServicesDiscover { service_uuids, .. }
        if service_uuids == &["180d", "180f"]));
    assert!(matches!(&events[1], BleEvent::CharacteristicsDiscover { characteristics, .. }
        if characteristics.len() == 1 && characteristics[0].properties.is_empty()));
    assert!(matches!(&events[2], BleEvent::Write { characteristic_uuid, .. }
        if characteristic_uuid == "2a39"));
    assert!(matches!(&events[3], BleEvent::NotifyStateChange { enabled: false, .. }));
}
