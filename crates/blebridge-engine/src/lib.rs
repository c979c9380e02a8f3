//! Event translation engine for the blebridge BLE normalization layer
//!
//! This crate sits between a platform radio-stack transport and
//! platform-independent application code. Raw notifications enter as
//! [`blebridge_core::TransportFrame`]s, are validated and translated into
//! canonical [`blebridge_core::BleEvent`]s, and fan out to subscribers;
//! application intent flows the other way through the command facade.
//!
//! ## Architecture
//!
//! - [`config`] - Identifier normalization settings
//! - [`parser`] - Advertisement substructure parsing
//! - [`registry`] - Peripheral state store
//! - [`translator`] - Raw notification to canonical event dispatch
//! - [`bus`] - Synchronous publish/subscribe fan-out
//! - [`facade`] - Outward command surface
//! - [`runtime`] - The pump task driving the translator from a channel
//!
//! ## Usage
//!
//! ```rust,no_run
//! use blebridge_core::TransportFrame;
//! use blebridge_engine::{
//!     BridgePump, EventBus, EventTranslator, NormalizationConfig, PeripheralRegistry,
//! };
//!
//! # async fn example() {
//! let bus = EventBus::new();
//! bus.subscribe(|event| println!("{event:?}"));
//!
//! let translator = EventTranslator::new(
//!     PeripheralRegistry::new(),
//!     NormalizationConfig::default(),
//! );
//! let (frame_tx, pump) = BridgePump::channel(translator, bus.clone());
//!
//! // The transport feeds frames into frame_tx; the pump translates and
//! // publishes until the sender is dropped.
//! let handle = tokio::spawn(pump.run());
//!
//! frame_tx
//!     .send(TransportFrame::new("stateChange", "poweredOn".into()))
//!     .ok();
//! drop(frame_tx);
//! # handle.await.unwrap();
//! # }
//! ```

// ----------------------------------------------------------------------------
// Module Declarations
// ----------------------------------------------------------------------------

pub mod bus;
pub mod config;
pub mod facade;
pub mod parser;
pub mod registry;
pub mod runtime;
pub mod translator;

// ----------------------------------------------------------------------------
// Public API
// ----------------------------------------------------------------------------

pub use bus::{EventBus, Subscription};
pub use config::NormalizationConfig;
pub use facade::{CommandFacade, RadioCommands};
pub use parser::{parse_advertisement, ParsedAdvertisement};
pub use registry::{PeripheralRecord, PeripheralRegistry};
pub use runtime::BridgePump;
pub use translator::EventTranslator;

// Re-export the core vocabulary for convenience
pub use blebridge_core::{
    AdapterState, Advertisement, BleEvent, CharacteristicDescriptor, DeviceId, Error, Result,
    ServiceDataEntry, TransportFrame,
};
