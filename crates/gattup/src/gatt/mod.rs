//! GATT server composition
//!
//! This module provides the building blocks of a GATT server declaration:
//! characteristics with read/write behavior, services owning them in
//! declaration order, and the flattening of a service into the attribute
//! table the link stack consumes.

pub mod characteristic;
pub mod constants;
pub mod error;
pub mod service;
pub mod table;

#[cfg(test)]
mod tests;

pub use characteristic::{Characteristic, Permissions, Uint16Value, ValueAccess};
pub use error::{GattError, GattResult};
pub use service::{Service, ServiceUuid};
pub use table::{ResponseMode, TableEntry};
