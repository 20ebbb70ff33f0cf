//! Error handling for GATT server composition

use crate::uuid::BleUuid;
use thiserror::Error;

use super::characteristic::Permissions;

/// Errors raised while composing services or serving requests
#[derive(Debug, Error)]
pub enum GattError {
    #[error("attribute table already built for service {0}")]
    TableAlreadyBuilt(BleUuid),

    #[error("attribute table not built yet for service {0}")]
    TableNotBuilt(BleUuid),

    #[error("handles already assigned for service {0}")]
    HandlesAlreadyAssigned(BleUuid),

    #[error("handles not assigned yet for service {0}")]
    HandlesNotAssigned(BleUuid),

    #[error("expected {expected} handles for service {uuid}, stack reported {actual}")]
    HandleCountMismatch {
        uuid: BleUuid,
        expected: usize,
        actual: usize,
    },

    #[error("unsupported permission combination {0:?}")]
    UnsupportedPermissions(Permissions),

    #[error("characteristic does not support reads")]
    ReadNotSupported,

    #[error("characteristic does not support writes")]
    WriteNotSupported,

    #[error("invalid value length, expected {expected}, got {actual}")]
    InvalidValueLength { expected: usize, actual: usize },

    #[error("read buffer too small, need {needed} bytes")]
    BufferTooSmall { needed: usize },
}

/// Result type for GATT composition operations
pub type GattResult<T> = Result<T, GattError>;
