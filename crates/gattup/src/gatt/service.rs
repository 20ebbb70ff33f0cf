//! Services: ordered collections of characteristics under one identity

use super::characteristic::Characteristic;
use super::error::{GattError, GattResult};
use super::table::{self, TableEntry};
use crate::uuid::BleUuid;

/// A service identity plus its advertising eligibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceUuid {
    pub uuid: BleUuid,
    pub advertise: bool,
}

impl ServiceUuid {
    /// An identity that is announced in the advertising payload
    pub fn new(uuid: BleUuid) -> Self {
        Self {
            uuid,
            advertise: true,
        }
    }

    /// An identity kept out of the advertising payload
    pub fn unadvertised(uuid: BleUuid) -> Self {
        Self {
            uuid,
            advertise: false,
        }
    }
}

/// A GATT service: an identity and its characteristics in declaration order.
///
/// The attribute table is built lazily, exactly once; the handle array is
/// filled exactly once, from the stack's table-created report. Both are
/// invariants, not recoverable conditions.
pub struct Service {
    uuid: ServiceUuid,
    characteristics: Vec<Characteristic>,
    table: Option<Vec<TableEntry>>,
    handles: Option<Vec<u16>>,
}

impl Service {
    pub fn new(uuid: ServiceUuid) -> Self {
        Self {
            uuid,
            characteristics: Vec::new(),
            table: None,
            handles: None,
        }
    }

    pub fn uuid(&self) -> BleUuid {
        self.uuid.uuid
    }

    /// Whether this service is announced in the advertising payload
    pub fn advertised(&self) -> bool {
        self.uuid.advertise
    }

    /// Append a characteristic; declaration order becomes table order.
    pub fn add_characteristic(&mut self, characteristic: Characteristic) {
        self.characteristics.push(characteristic);
    }

    pub fn characteristics(&self) -> &[Characteristic] {
        &self.characteristics
    }

    /// Build the attribute table, assigning each characteristic's handle index.
    ///
    /// Fails if the table was already built.
    pub fn build_table(&mut self) -> GattResult<&[TableEntry]> {
        if self.table.is_some() {
            return Err(GattError::TableAlreadyBuilt(self.uuid.uuid));
        }
        let entries = table::build_entries(self.uuid.uuid, &mut self.characteristics)?;
        Ok(self.table.insert(entries).as_slice())
    }

    /// The built attribute table, if any
    pub fn table(&self) -> Option<&[TableEntry]> {
        self.table.as_deref()
    }

    /// Store the handle array reported by the stack for this service's table.
    ///
    /// The count must match the table's entry count; filling twice is an
    /// invariant violation.
    pub fn assign_handles(&mut self, handles: Vec<u16>) -> GattResult<()> {
        let table = self
            .table
            .as_ref()
            .ok_or(GattError::TableNotBuilt(self.uuid.uuid))?;
        if self.handles.is_some() {
            return Err(GattError::HandlesAlreadyAssigned(self.uuid.uuid));
        }
        if handles.len() != table.len() {
            return Err(GattError::HandleCountMismatch {
                uuid: self.uuid.uuid,
                expected: table.len(),
                actual: handles.len(),
            });
        }
        self.handles = Some(handles);
        Ok(())
    }

    /// The handle of the service declaration entry, used to start the service
    pub fn first_handle(&self) -> GattResult<u16> {
        self.handles
            .as_ref()
            .and_then(|handles| handles.first().copied())
            .ok_or(GattError::HandlesNotAssigned(self.uuid.uuid))
    }

    /// Whether the given handle belongs to this service's table
    pub fn has_handle(&self, handle: u16) -> bool {
        self.handles
            .as_ref()
            .is_some_and(|handles| handles.contains(&handle))
    }

    /// Resolve a handle to the owning characteristic, if it is a value handle
    pub fn characteristic_for_handle(&self, handle: u16) -> Option<&Characteristic> {
        let index = self.handle_index_of(handle)?;
        self.characteristics
            .iter()
            .find(|c| c.handle_index() == Some(index))
    }

    /// Mutable variant of [`Self::characteristic_for_handle`]
    pub fn characteristic_for_handle_mut(&mut self, handle: u16) -> Option<&mut Characteristic> {
        let index = self.handle_index_of(handle)?;
        self.characteristics
            .iter_mut()
            .find(|c| c.handle_index() == Some(index))
    }

    fn handle_index_of(&self, handle: u16) -> Option<usize> {
        self.handles
            .as_ref()?
            .iter()
            .position(|&candidate| candidate == handle)
    }
}

impl std::fmt::Debug for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Service")
            .field("uuid", &self.uuid)
            .field("characteristics", &self.characteristics.len())
            .field("table_built", &self.table.is_some())
            .field("handles_assigned", &self.handles.is_some())
            .finish()
    }
}
