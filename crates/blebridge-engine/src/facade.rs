//! Command facade
//!
//! The outward-facing operation set. Every supported operation forwards
//! verbatim to the radio stack's command surface and returns immediately;
//! results, if any, arrive later as raw notifications and re-enter through
//! the translator. Correlation between a command and its eventual reply is
//! the caller's job, by matching identifier fields; nothing here tracks
//! in-flight operations.

use tracing::{debug, info};

use blebridge_core::{BleEvent, DeviceId, Error, Result};

use crate::bus::EventBus;

// ----------------------------------------------------------------------------
// Radio Command Surface
// ----------------------------------------------------------------------------

/// The platform radio stack's command surface.
///
/// Calls are synchronous fire-and-forget with no return value: failures are
/// reported only through later notifications, or not at all.
pub trait RadioCommands: Send {
    /// One-time stack setup
    fn setup(&self);
    /// Ask the stack to report its current adapter state
    fn fetch_state(&self);
    fn start_scanning(&self, service_uuids: &[String], allow_duplicates: bool);
    fn stop_scanning(&self);
    fn connect(&self, id: &DeviceId);
    fn disconnect(&self, id: &DeviceId);
    fn update_rssi(&self, id: &DeviceId);
    fn discover_services(&self, id: &DeviceId, service_uuids: &[String]);
    fn discover_characteristics(&self, id: &DeviceId, service_uuid: &str);
    fn read(&self, id: &DeviceId, service_uuid: &str, characteristic_uuid: &str);
    fn write(
        &self,
        id: &DeviceId,
        service_uuid: &str,
        characteristic_uuid: &str,
        value: &[u8],
        without_response: bool,
    );
    fn notify(&self, id: &DeviceId, service_uuid: &str, characteristic_uuid: &str, enabled: bool);
}

// ----------------------------------------------------------------------------
// Command Facade
// ----------------------------------------------------------------------------

/// Forwards application intent to the radio stack
///
/// `start_scanning`/`stop_scanning` are the only operations whose
/// acknowledgement is synthesized locally: they publish `ScanStart`/
/// `ScanStop` synchronously instead of waiting for a stack reply.
pub struct CommandFacade<C: RadioCommands> {
    commands: C,
    bus: EventBus,
}

impl<C: RadioCommands> CommandFacade<C> {
    /// Create a facade over a command surface, publishing into `bus`
    pub fn new(commands: C, bus: EventBus) -> Self {
        Self { commands, bus }
    }

    /// Set up the stack and request an initial adapter state report
    pub fn init(&self) {
        self.commands.setup();
        self.commands.fetch_state();
    }

    /// Start scanning for the given service identifiers (all, if empty)
    pub fn start_scanning(&self, service_uuids: &[String], allow_duplicates: bool) {
        self.commands.start_scanning(service_uuids, allow_duplicates);
        info!("Started scanning ({} service filters)", service_uuids.len());
        self.bus.publish(&BleEvent::ScanStart);
    }

    /// Stop scanning
    pub fn stop_scanning(&self) {
        self.commands.stop_scanning();
        info!("Stopped scanning");
        self.bus.publish(&BleEvent::ScanStop);
    }

    /// Connect to a peripheral; completion arrives as a `Connect` event
    pub fn connect(&self, id: &DeviceId) {
        debug!("Connect requested for {id}");
        self.commands.connect(id);
    }

    /// Disconnect from a peripheral; completion arrives as a `Disconnect`
    /// event
    pub fn disconnect(&self, id: &DeviceId) {
        debug!("Disconnect requested for {id}");
        self.commands.disconnect(id);
    }

    /// Request a signal-strength reading; the value arrives as an
    /// `RssiUpdate` event
    pub fn update_rssi(&self, id: &DeviceId) {
        self.commands.update_rssi(id);
    }

    /// Discover services on a connected peripheral
    pub fn discover_services(&self, id: &DeviceId, service_uuids: &[String]) {
        self.commands.discover_services(id, service_uuids);
    }

    /// Discover characteristics of one service
    pub fn discover_characteristics(&self, id: &DeviceId, service_uuid: &str) {
        self.commands.discover_characteristics(id, service_uuid);
    }

    /// Read a characteristic; the value arrives as a `Data` event with
    /// `is_notification == false`
    pub fn read(&self, id: &DeviceId, service_uuid: &str, characteristic_uuid: &str) {
        self.commands.read(id, service_uuid, characteristic_uuid);
    }

    /// Write a characteristic.
    ///
    /// With `without_response` set, no reply notification is expected and
    /// none should be waited for. Otherwise the stack reports completion as
    /// a later `Write` event, which the caller correlates by identifier.
    pub fn write(
        &self,
        id: &DeviceId,
        service_uuid: &str,
        characteristic_uuid: &str,
        value: &[u8],
        without_response: bool,
    ) {
        self.commands
            .write(id, service_uuid, characteristic_uuid, value, without_response);
    }

    /// Enable or disable notifications for a characteristic; the new state
    /// arrives as a `NotifyStateChange` event
    pub fn notify(&self, id: &DeviceId, service_uuid: &str, characteristic_uuid: &str, enabled: bool) {
        self.commands.notify(id, service_uuid, characteristic_uuid, enabled);
    }

    // The stack exposes no included-service, descriptor, or handle access at
    // this layer. These fail loudly rather than silently doing nothing.

    pub fn discover_included_services(
        &self,
        _id: &DeviceId,
        _service_uuid: &str,
        _service_uuids: &[String],
    ) -> Result<()> {
        Err(unsupported("discoverIncludedServices"))
    }

    pub fn broadcast(
        &self,
        _id: &DeviceId,
        _service_uuid: &str,
        _characteristic_uuid: &str,
        _broadcast: bool,
    ) -> Result<()> {
        Err(unsupported("broadcast"))
    }

    pub fn discover_descriptors(
        &self,
        _id: &DeviceId,
        _service_uuid: &str,
        _characteristic_uuid: &str,
    ) -> Result<()> {
        Err(unsupported("discoverDescriptors"))
    }

    pub fn read_value(
        &self,
        _id: &DeviceId,
        _service_uuid: &str,
        _characteristic_uuid: &str,
        _descriptor_uuid: &str,
    ) -> Result<()> {
        Err(unsupported("readValue"))
    }

    pub fn write_value(
        &self,
        _id: &DeviceId,
        _service_uuid: &str,
        _characteristic_uuid: &str,
        _descriptor_uuid: &str,
        _value: &[u8],
    ) -> Result<()> {
        Err(unsupported("writeValue"))
    }

    pub fn read_handle(&self, _id: &DeviceId, _handle: u16) -> Result<()> {
        Err(unsupported("readHandle"))
    }

    pub fn write_handle(
        &self,
        _id: &DeviceId,
        _handle: u16,
        _value: &[u8],
        _without_response: bool,
    ) -> Result<()> {
        Err(unsupported("writeHandle"))
    }
}

fn unsupported(operation: &'static str) -> Error {
    Error::UnsupportedOperation { operation }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
