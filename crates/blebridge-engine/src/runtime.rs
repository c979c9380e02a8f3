//! Notification pump
//!
//! The single processing context: frames arrive on one channel and are
//! handled strictly in arrival order, each to completion, before the next is
//! touched. A bad frame is logged and dropped; the loop itself never dies on
//! input. Closing the sender shuts the pump down cleanly.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use blebridge_core::TransportFrame;

use crate::bus::EventBus;
use crate::translator::EventTranslator;

// ----------------------------------------------------------------------------
// Bridge Pump
// ----------------------------------------------------------------------------

/// Drives the translator from an inbound frame channel and publishes the
/// resulting canonical events.
pub struct BridgePump {
    translator: EventTranslator,
    bus: EventBus,
    frames: mpsc::UnboundedReceiver<TransportFrame>,
}

impl BridgePump {
    /// Create a pump over an existing frame receiver
    pub fn new(
        translator: EventTranslator,
        bus: EventBus,
        frames: mpsc::UnboundedReceiver<TransportFrame>,
    ) -> Self {
        Self {
            translator,
            bus,
            frames,
        }
    }

    /// Create a pump together with the sender half the transport feeds
    pub fn channel(
        translator: EventTranslator,
        bus: EventBus,
    ) -> (mpsc::UnboundedSender<TransportFrame>, Self) {
        let (frame_tx, frame_rx) = mpsc::unbounded_channel();
        (frame_tx, Self::new(translator, bus, frame_rx))
    }

    /// Process frames until the sender side is dropped.
    ///
    /// Returns the translator so the registry it accumulated stays
    /// inspectable after shutdown.
    pub async fn run(mut self) -> EventTranslator {
        info!("Notification pump starting");

        while let Some(frame) = self.frames.recv().await {
            self.process_frame(frame);
        }

        info!("Notification pump stopped");
        self.translator
    }

    fn process_frame(&mut self, frame: TransportFrame) {
        let kind = frame.kind.clone();
        let notification = match frame.into_notification() {
            Ok(notification) => notification,
            Err(e) => {
                warn!("Dropping {kind} frame: {e}");
                return;
            }
        };

        match self.translator.translate(notification) {
            Ok(Some(event)) => self.bus.publish(&event),
            Ok(None) => debug!("No event for {kind} notification"),
            Err(e) => warn!("Dropping {kind} notification: {e}"),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
