//! Flattening a service into an attribute table
//!
//! The link stack consumes one flat, ordered table per service: the service
//! declaration first, then per characteristic a declaration entry, a value
//! entry, and (when a description is configured) a user-description entry.
//! The stack later reports one handle per entry, in the same order.

use super::characteristic::{Characteristic, Permissions};
use super::constants::{
    CHARACTERISTIC_DECLARATION_UUID, CHARACTERISTIC_DESCRIPTION_UUID, PRIMARY_SERVICE_UUID,
};
use super::error::GattResult;
use crate::uuid::BleUuid;

/// Who answers a request against a table entry: the stack itself, from the
/// static value stored in the entry, or the application via read/write events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    Auto,
    Application,
}

/// One entry of a service's attribute table
#[derive(Debug, Clone)]
pub struct TableEntry {
    pub response: ResponseMode,
    /// Attribute type (declaration UUID, or the characteristic's own identity
    /// for a value entry)
    pub attribute_type: BleUuid,
    pub permissions: Permissions,
    /// Declared value length
    pub length: usize,
    /// Largest value the entry may ever hold
    pub max_length: usize,
    /// Static value for auto-answered entries; empty for application-answered
    /// ones
    pub value: Vec<u8>,
}

impl TableEntry {
    fn auto(attribute_type: u16, permissions: Permissions, value: Vec<u8>) -> Self {
        Self {
            response: ResponseMode::Auto,
            attribute_type: BleUuid::Uuid16(attribute_type),
            permissions,
            length: value.len(),
            max_length: value.len(),
            value,
        }
    }
}

/// Build the attribute table for a service, assigning each characteristic's
/// handle index to the position of its value entry.
///
/// Entry count is always `1 + sum(2 + 1 if described)` over the
/// characteristics.
pub(crate) fn build_entries(
    service_uuid: BleUuid,
    characteristics: &mut [Characteristic],
) -> GattResult<Vec<TableEntry>> {
    let mut entries = Vec::with_capacity(
        1 + characteristics
            .iter()
            .map(|c| 2 + usize::from(c.description().is_some()))
            .sum::<usize>(),
    );

    // Service declaration, answered by the stack from the raw identity bytes.
    entries.push(TableEntry::auto(
        PRIMARY_SERVICE_UUID,
        Permissions::READ,
        service_uuid.as_bytes(),
    ));

    for characteristic in characteristics {
        let properties = characteristic.permissions().property_bits()?;
        entries.push(TableEntry::auto(
            CHARACTERISTIC_DECLARATION_UUID,
            Permissions::READ,
            vec![properties],
        ));

        characteristic.set_handle_index(entries.len());
        entries.push(TableEntry {
            response: ResponseMode::Application,
            attribute_type: characteristic.uuid(),
            permissions: characteristic.permissions(),
            length: characteristic.value_length(),
            max_length: characteristic.value_length(),
            value: Vec::new(),
        });

        if let Some(description) = characteristic.description() {
            entries.push(TableEntry::auto(
                CHARACTERISTIC_DESCRIPTION_UUID,
                Permissions::READ,
                description.as_bytes().to_vec(),
            ));
        }
    }

    Ok(entries)
}
