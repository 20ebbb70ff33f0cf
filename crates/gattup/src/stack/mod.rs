//! Boundary with the external BLE stack
//!
//! Everything below this line of the design — controller bring-up, GATT/ATT
//! wire encoding, pairing — belongs to the native stack. The stack delivers
//! its callbacks one at a time as [`GattsEvent`] / [`GapEvent`] values and is
//! driven back through the [`BleStack`] trait. Every outbound call is
//! fire-and-forget: it may be rejected immediately, but its completion always
//! arrives later as a distinct event.

pub mod events;

pub use events::{GapEvent, GattsEvent, ReadRequest, WriteRequest};

use thiserror::Error;

use crate::gap::{AdvertisingParameters, BdAddr, ConnectionParameters};
use crate::gatt::TableEntry;

/// Inbound event status value meaning success
pub const STATUS_OK: u8 = 0;

/// A connection identifier assigned by the stack
pub type ConnectionId = u16;

/// A per-request transaction identifier assigned by the stack
pub type TransactionId = u32;

/// Status of a response to a read or write request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Ok,
    InvalidHandle,
    InternalError,
}

impl ResponseStatus {
    /// Wire code understood by the stack
    pub fn code(&self) -> u8 {
        match self {
            ResponseStatus::Ok => 0x00,
            ResponseStatus::InvalidHandle => 0x01,
            ResponseStatus::InternalError => 0x81,
        }
    }
}

/// Errors reported synchronously by outbound stack calls
#[derive(Debug, Error)]
pub enum StackError {
    #[error("stack rejected {call}, status {status}")]
    Rejected { call: &'static str, status: i32 },

    #[error("stack unavailable: {0}")]
    Unavailable(&'static str),
}

/// Result type for outbound stack calls
pub type StackResult<T> = Result<T, StackError>;

/// Outbound calls into the external stack.
///
/// Calls that have an asynchronous completion (`create_attribute_table`,
/// `start_service`, the payload setters, `start_advertising`) only report
/// immediate rejection here; the outcome arrives later as an event.
pub trait BleStack {
    /// Register an application; completion arrives as
    /// [`GattsEvent::Registered`].
    fn register_application(&mut self, app_id: u16) -> StackResult<()>;

    /// Set the GAP device name
    fn set_device_name(&mut self, name: &str) -> StackResult<()>;

    /// Hand one service's attribute table to the stack.
    ///
    /// `sequence_number` correlates the eventual table-created event with this
    /// call: the stack's callback carries no service identity of its own.
    fn create_attribute_table(
        &mut self,
        entries: &[TableEntry],
        sequence_number: u8,
    ) -> StackResult<()>;

    /// Start the service whose declaration was assigned `first_handle`
    fn start_service(&mut self, first_handle: u16) -> StackResult<()>;

    /// Answer one read or write request
    fn send_response(
        &mut self,
        conn_id: ConnectionId,
        trans_id: TransactionId,
        status: ResponseStatus,
        value: Option<&[u8]>,
    ) -> StackResult<()>;

    /// Install the advertisement payload
    fn set_advertising_payload(&mut self, data: &[u8]) -> StackResult<()>;

    /// Install the scan-response payload
    fn set_scan_response_payload(&mut self, data: &[u8]) -> StackResult<()>;

    /// Begin advertising with the given broadcast parameters
    fn start_advertising(&mut self, parameters: &AdvertisingParameters) -> StackResult<()>;

    /// Ask the stack to move a connection toward the given parameter target
    fn update_connection_parameters(
        &mut self,
        peer: BdAddr,
        parameters: &ConnectionParameters,
    ) -> StackResult<()>;
}
