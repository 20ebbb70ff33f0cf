//! Width-tagged identifiers for services and characteristics
//!
//! The stack this library targets speaks 16-bit and 32-bit identifiers only;
//! the width is part of the identity and decides how the value is laid out in
//! attribute tables and advertising payloads.

use std::fmt;

/// A 16-bit or 32-bit BLE identifier.
///
/// Equality and lookup are by exact width + value match; a `Uuid16(0x4000)` is
/// not the same identifier as a `Uuid32(0x4000)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BleUuid {
    /// 16-bit SIG-style identifier
    Uuid16(u16),
    /// 32-bit identifier
    Uuid32(u32),
}

impl BleUuid {
    /// Get the 16-bit value if this is a 16-bit identifier
    pub fn as_u16(&self) -> Option<u16> {
        match self {
            BleUuid::Uuid16(uuid) => Some(*uuid),
            _ => None,
        }
    }

    /// Get the 32-bit value if this is a 32-bit identifier
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            BleUuid::Uuid32(uuid) => Some(*uuid),
            _ => None,
        }
    }

    /// Raw little-endian byte representation (2 or 4 bytes)
    pub fn as_bytes(&self) -> Vec<u8> {
        match self {
            BleUuid::Uuid16(uuid) => uuid.to_le_bytes().to_vec(),
            BleUuid::Uuid32(uuid) => uuid.to_le_bytes().to_vec(),
        }
    }

    /// Encoded width in bytes
    pub fn byte_len(&self) -> usize {
        match self {
            BleUuid::Uuid16(_) => 2,
            BleUuid::Uuid32(_) => 4,
        }
    }
}

impl From<u16> for BleUuid {
    fn from(uuid: u16) -> Self {
        BleUuid::Uuid16(uuid)
    }
}

impl From<u32> for BleUuid {
    fn from(uuid: u32) -> Self {
        BleUuid::Uuid32(uuid)
    }
}

impl fmt::Display for BleUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BleUuid::Uuid16(uuid) => write!(f, "{:04x}", uuid),
            BleUuid::Uuid32(uuid) => write!(f, "{:08x}", uuid),
        }
    }
}
