//! gattup - composing a BLE peripheral's GATT server and bringing it on the air
//!
//! This library models the application side of a GATT server: declaring
//! services and characteristics, flattening them into the attribute tables the
//! underlying link stack consumes, serializing service registration (the stack
//! processes one attribute table at a time), and assembling the advertising and
//! scan-response payloads under the 31-byte legacy budget. The native stack
//! itself is an external collaborator reached through the [`stack::BleStack`]
//! trait; its callbacks arrive as [`stack::GattsEvent`] and [`stack::GapEvent`]
//! values fed into a [`GattsApplication`].

pub mod app;
pub mod gap;
pub mod gatt;
pub mod stack;
pub mod uuid;

// Re-export common types for convenience
pub use app::{AppError, AppResult, GattsApplication, RegistrationState};
pub use gap::{AdvertisingData, AdvertisingParameters, BdAddr, ConnectionParameters, GapError};
pub use gatt::{
    Characteristic, GattError, Permissions, ResponseMode, Service, ServiceUuid, TableEntry,
    Uint16Value, ValueAccess,
};
pub use stack::{BleStack, GapEvent, GattsEvent, ResponseStatus, StackError, StackResult};
pub use uuid::BleUuid;
