//! Events delivered by the external stack
//!
//! The stack serializes delivery: one event at a time, in order, per
//! application. Events the shim layer cannot map onto a known kind arrive as
//! `Other(code)` and are treated as a hard failure by the router rather than
//! being silently dropped.

use super::{ConnectionId, TransactionId};
use crate::gap::BdAddr;

/// A read request against one attribute handle
#[derive(Debug, Clone)]
pub struct ReadRequest {
    pub conn_id: ConnectionId,
    pub trans_id: TransactionId,
    pub handle: u16,
    pub needs_response: bool,
}

/// A write request against one attribute handle
#[derive(Debug, Clone)]
pub struct WriteRequest {
    pub conn_id: ConnectionId,
    pub trans_id: TransactionId,
    pub handle: u16,
    pub value: Vec<u8>,
    /// Part of a prepared (queued) write sequence
    pub is_prepared: bool,
    pub needs_response: bool,
}

/// GATT-server events
#[derive(Debug, Clone)]
pub enum GattsEvent {
    /// The application registration was processed; `interface` is the stack's
    /// handle for this application from here on.
    Registered {
        status: u8,
        app_id: u16,
        interface: u16,
    },
    /// An attribute table submitted earlier was created; `handles` carries one
    /// stack-assigned handle per table entry, in table order.
    AttributeTableCreated { status: u8, handles: Vec<u16> },
    /// The most recently started service is on the air. Correlation is by
    /// call order; the event carries no service identity.
    ServiceStarted,
    Connected {
        conn_id: ConnectionId,
        peer: BdAddr,
    },
    Disconnected {
        conn_id: ConnectionId,
        peer: BdAddr,
        reason: u8,
    },
    MtuNegotiated {
        conn_id: ConnectionId,
        mtu: u16,
    },
    Read(ReadRequest),
    Write(WriteRequest),
    /// A response sent earlier has been transmitted
    ResponseSent { status: u8 },
    /// A native event with no mapping in this design
    Other(u8),
}

/// GAP events
#[derive(Debug, Clone)]
pub enum GapEvent {
    /// The advertisement payload was installed
    AdvertisingDataSet,
    /// The scan-response payload was installed
    ScanResponseDataSet,
    AdvertisingStarted {
        status: u8,
    },
    ConnectionParametersUpdated {
        status: u8,
        interval_min: u16,
        interval_max: u16,
        interval: u16,
        latency: u16,
        timeout: u16,
    },
    /// A native event with no mapping in this design
    Other(u8),
}
