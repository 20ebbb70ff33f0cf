//! Constants for GATT attribute tables

/// Attribute type of a primary service declaration
pub const PRIMARY_SERVICE_UUID: u16 = 0x2800;

/// Attribute type of a characteristic declaration
pub const CHARACTERISTIC_DECLARATION_UUID: u16 = 0x2803;

/// Attribute type of a characteristic user description
pub const CHARACTERISTIC_DESCRIPTION_UUID: u16 = 0x2901;

/// Characteristic property bit: readable
pub const CHAR_PROP_READ: u8 = 0x02;

/// Characteristic property bit: writable with response
pub const CHAR_PROP_WRITE: u8 = 0x08;

/// Attribute permission bit: readable
pub const PERM_READ: u16 = 1 << 0;

/// Attribute permission bit: writable
pub const PERM_WRITE: u16 = 1 << 4;

/// Largest attribute value the stack will carry in a single response
pub const MAX_ATTRIBUTE_LENGTH: usize = 600;
