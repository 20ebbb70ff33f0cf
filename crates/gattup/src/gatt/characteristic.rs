//! Characteristics and their read/write behavior

use bitflags::bitflags;

use super::constants::{CHAR_PROP_READ, CHAR_PROP_WRITE, PERM_READ, PERM_WRITE};
use super::error::{GattError, GattResult};
use crate::uuid::BleUuid;

bitflags! {
    /// Attribute permission bits, matching the stack's wire values
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Permissions: u16 {
        const READ = PERM_READ;
        const WRITE = PERM_WRITE;
    }
}

impl Permissions {
    /// Derive the characteristic-declaration property byte.
    ///
    /// Exactly read, write, and read+write are supported; anything else is a
    /// configuration error.
    pub fn property_bits(&self) -> GattResult<u8> {
        match (self.contains(Permissions::READ), self.contains(Permissions::WRITE)) {
            (true, false) => Ok(CHAR_PROP_READ),
            (false, true) => Ok(CHAR_PROP_WRITE),
            (true, true) => Ok(CHAR_PROP_READ | CHAR_PROP_WRITE),
            (false, false) => Err(GattError::UnsupportedPermissions(*self)),
        }
    }
}

/// Value behavior of a characteristic.
///
/// The default implementations refuse both operations, so a placeholder
/// characteristic carrying only a declaration and a description needs no
/// implementation of its own.
pub trait ValueAccess {
    /// Read the current value into `buf`, returning the number of bytes written.
    fn read(&self, _buf: &mut [u8]) -> GattResult<usize> {
        Err(GattError::ReadNotSupported)
    }

    /// Replace the current value with `data`.
    fn write(&mut self, _data: &[u8]) -> GattResult<()> {
        Err(GattError::WriteNotSupported)
    }
}

/// A placeholder value that refuses reads and writes
#[derive(Debug, Default)]
pub struct NoValue;

impl ValueAccess for NoValue {}

/// A fixed two-byte value, read and written little-endian
#[derive(Debug)]
pub struct Uint16Value {
    value: u16,
}

impl Uint16Value {
    pub fn new(value: u16) -> Self {
        Self { value }
    }

    pub fn get(&self) -> u16 {
        self.value
    }
}

impl ValueAccess for Uint16Value {
    fn read(&self, buf: &mut [u8]) -> GattResult<usize> {
        let bytes = self.value.to_le_bytes();
        if buf.len() < bytes.len() {
            return Err(GattError::BufferTooSmall { needed: bytes.len() });
        }
        buf[..bytes.len()].copy_from_slice(&bytes);
        Ok(bytes.len())
    }

    fn write(&mut self, data: &[u8]) -> GattResult<()> {
        if data.len() != 2 {
            return Err(GattError::InvalidValueLength {
                expected: 2,
                actual: data.len(),
            });
        }
        self.value = u16::from_le_bytes([data[0], data[1]]);
        Ok(())
    }
}

/// A characteristic: identity, fixed value length, permissions, optional
/// human-readable description, and polymorphic value behavior.
///
/// The handle index is unassigned until the owning service's attribute table
/// is built; it then records the position of this characteristic's value entry
/// within that table.
pub struct Characteristic {
    uuid: BleUuid,
    permissions: Permissions,
    value_length: usize,
    description: Option<String>,
    handle_index: Option<usize>,
    access: Box<dyn ValueAccess>,
}

impl Characteristic {
    /// Create a characteristic with custom value behavior.
    ///
    /// `value_length` is the fixed byte length of the value (at least 1).
    pub fn new(
        uuid: BleUuid,
        value_length: usize,
        permissions: Permissions,
        description: Option<&str>,
        access: Box<dyn ValueAccess>,
    ) -> Self {
        debug_assert!(value_length >= 1);
        Self {
            uuid,
            permissions,
            value_length,
            description: description.map(str::to_owned),
            handle_index: None,
            access,
        }
    }

    /// A description-only placeholder characteristic (one dummy byte, refuses
    /// reads and writes).
    pub fn placeholder(uuid: BleUuid, permissions: Permissions, description: Option<&str>) -> Self {
        Self::new(uuid, 1, permissions, description, Box::new(NoValue))
    }

    /// A characteristic holding a single little-endian `u16`
    pub fn uint16(
        uuid: BleUuid,
        permissions: Permissions,
        description: Option<&str>,
        default_value: u16,
    ) -> Self {
        Self::new(
            uuid,
            2,
            permissions,
            description,
            Box::new(Uint16Value::new(default_value)),
        )
    }

    pub fn uuid(&self) -> BleUuid {
        self.uuid
    }

    pub fn permissions(&self) -> Permissions {
        self.permissions
    }

    pub fn value_length(&self) -> usize {
        self.value_length
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Position of this characteristic's value entry in the owning service's
    /// attribute table, once the table has been built.
    pub fn handle_index(&self) -> Option<usize> {
        self.handle_index
    }

    pub(crate) fn set_handle_index(&mut self, index: usize) {
        self.handle_index = Some(index);
    }

    /// Read the current value into `buf`, returning the number of bytes written
    pub fn read(&self, buf: &mut [u8]) -> GattResult<usize> {
        self.access.read(buf)
    }

    /// Replace the current value with `data`
    pub fn write(&mut self, data: &[u8]) -> GattResult<()> {
        self.access.write(data)
    }
}

impl std::fmt::Debug for Characteristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Characteristic")
            .field("uuid", &self.uuid)
            .field("permissions", &self.permissions)
            .field("value_length", &self.value_length)
            .field("description", &self.description)
            .field("handle_index", &self.handle_index)
            .finish()
    }
}
