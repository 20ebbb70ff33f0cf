//! Unit tests for GATT composition

use super::characteristic::{Characteristic, Permissions, Uint16Value, ValueAccess};
use super::constants::*;
use super::error::GattError;
use super::service::{Service, ServiceUuid};
use super::table::ResponseMode;
use crate::uuid::BleUuid;

fn demo_service() -> Service {
    let mut service = Service::new(ServiceUuid::new(BleUuid::Uuid32(0x2104_0001)));
    service.add_characteristic(Characteristic::uint16(
        BleUuid::Uuid32(0x2104_1000),
        Permissions::READ | Permissions::WRITE,
        Some("Foo"),
        0x4142,
    ));
    service.add_characteristic(Characteristic::uint16(
        BleUuid::Uuid16(0x4020),
        Permissions::READ,
        None,
        0x3132,
    ));
    service
}

#[test]
fn table_entry_count_matches_declaration_shape() {
    // 1 (service) + 3 (described char) + 2 (bare char)
    let mut service = demo_service();
    let entries = service.build_table().unwrap();
    assert_eq!(entries.len(), 6);
}

#[test]
fn handle_index_is_position_of_value_entry() {
    let mut service = demo_service();
    service.build_table().unwrap();

    // [decl, char-decl, value, descr, char-decl, value]
    assert_eq!(service.characteristics()[0].handle_index(), Some(2));
    assert_eq!(service.characteristics()[1].handle_index(), Some(5));

    let table = service.table().unwrap();
    assert_eq!(table[2].response, ResponseMode::Application);
    assert_eq!(table[2].attribute_type, BleUuid::Uuid32(0x2104_1000));
    assert_eq!(table[5].response, ResponseMode::Application);
    assert_eq!(table[5].attribute_type, BleUuid::Uuid16(0x4020));
}

#[test]
fn building_twice_is_fatal() {
    let mut service = demo_service();
    service.build_table().unwrap();
    assert!(matches!(
        service.build_table(),
        Err(GattError::TableAlreadyBuilt(_))
    ));
    // The cached table is untouched by the failed rebuild.
    assert_eq!(service.table().unwrap().len(), 6);
}

#[test]
fn service_declaration_carries_raw_identity_bytes() {
    let mut service = demo_service();
    let entries = service.build_table().unwrap();
    assert_eq!(entries[0].response, ResponseMode::Auto);
    assert_eq!(entries[0].attribute_type, BleUuid::Uuid16(PRIMARY_SERVICE_UUID));
    assert_eq!(entries[0].value, vec![0x01, 0x00, 0x04, 0x21]);

    let mut narrow = Service::new(ServiceUuid::new(BleUuid::Uuid16(0x4000)));
    let entries = narrow.build_table().unwrap();
    assert_eq!(entries[0].value, vec![0x00, 0x40]);
}

#[test]
fn declaration_entry_carries_property_byte() {
    let mut service = demo_service();
    let entries = service.build_table().unwrap();
    assert_eq!(entries[1].attribute_type, BleUuid::Uuid16(CHARACTERISTIC_DECLARATION_UUID));
    assert_eq!(entries[1].value, vec![CHAR_PROP_READ | CHAR_PROP_WRITE]);
    assert_eq!(entries[4].value, vec![CHAR_PROP_READ]);
}

#[test]
fn description_entry_is_auto_answered_text() {
    let mut service = demo_service();
    let entries = service.build_table().unwrap();
    let descr = &entries[3];
    assert_eq!(descr.response, ResponseMode::Auto);
    assert_eq!(descr.attribute_type, BleUuid::Uuid16(CHARACTERISTIC_DESCRIPTION_UUID));
    assert_eq!(descr.permissions, Permissions::READ);
    assert_eq!(descr.value, b"Foo".to_vec());
}

#[test]
fn value_entry_is_application_answered_and_sized() {
    let mut service = demo_service();
    let entries = service.build_table().unwrap();
    assert_eq!(entries[2].length, 2);
    assert_eq!(entries[2].max_length, 2);
    assert!(entries[2].value.is_empty());
    assert_eq!(entries[2].permissions, Permissions::READ | Permissions::WRITE);
}

#[test]
fn empty_permissions_are_rejected() {
    let mut service = Service::new(ServiceUuid::new(BleUuid::Uuid16(0x4000)));
    service.add_characteristic(Characteristic::uint16(
        BleUuid::Uuid16(0x4010),
        Permissions::empty(),
        None,
        0,
    ));
    assert!(matches!(
        service.build_table(),
        Err(GattError::UnsupportedPermissions(_))
    ));
}

#[test]
fn property_bits_cover_the_three_supported_combinations() {
    assert_eq!(Permissions::READ.property_bits().unwrap(), CHAR_PROP_READ);
    assert_eq!(Permissions::WRITE.property_bits().unwrap(), CHAR_PROP_WRITE);
    assert_eq!(
        (Permissions::READ | Permissions::WRITE).property_bits().unwrap(),
        CHAR_PROP_READ | CHAR_PROP_WRITE
    );
}

#[test]
fn handle_assignment_validates_count_and_happens_once() {
    let mut service = demo_service();

    // Before the table exists there is nothing to validate against.
    assert!(matches!(
        service.assign_handles(vec![40, 41]),
        Err(GattError::TableNotBuilt(_))
    ));

    service.build_table().unwrap();
    assert!(matches!(
        service.assign_handles(vec![40, 41]),
        Err(GattError::HandleCountMismatch {
            expected: 6,
            actual: 2,
            ..
        })
    ));

    assert!(matches!(
        service.first_handle(),
        Err(GattError::HandlesNotAssigned(_))
    ));

    service.assign_handles(vec![40, 41, 42, 43, 44, 45]).unwrap();
    assert_eq!(service.first_handle().unwrap(), 40);

    assert!(matches!(
        service.assign_handles(vec![40, 41, 42, 43, 44, 45]),
        Err(GattError::HandlesAlreadyAssigned(_))
    ));
}

#[test]
fn handle_lookup_resolves_value_handles_only() {
    let mut service = demo_service();
    service.build_table().unwrap();
    service.assign_handles(vec![40, 41, 42, 43, 44, 45]).unwrap();

    assert!(service.has_handle(42));
    assert!(!service.has_handle(99));

    // Value handles resolve to their characteristic.
    let first = service.characteristic_for_handle(42).unwrap();
    assert_eq!(first.uuid(), BleUuid::Uuid32(0x2104_1000));
    let second = service.characteristic_for_handle(45).unwrap();
    assert_eq!(second.uuid(), BleUuid::Uuid16(0x4020));

    // Declaration and description handles belong to the service but are not
    // characteristic values.
    assert!(service.characteristic_for_handle(40).is_none());
    assert!(service.characteristic_for_handle(43).is_none());
}

#[test]
fn uint16_value_reads_and_writes_little_endian() {
    let mut characteristic = Characteristic::uint16(
        BleUuid::Uuid16(0x4110),
        Permissions::READ | Permissions::WRITE,
        Some("Baz"),
        0x6162,
    );

    let mut buffer = [0u8; 8];
    assert_eq!(characteristic.read(&mut buffer).unwrap(), 2);
    assert_eq!(&buffer[..2], &[0x62, 0x61]);

    characteristic.write(&[0x01, 0x02]).unwrap();
    characteristic.read(&mut buffer).unwrap();
    assert_eq!(&buffer[..2], &[0x01, 0x02]);
}

#[test]
fn uint16_write_checks_length() {
    let mut value = Uint16Value::new(0x1234);
    assert!(matches!(
        value.write(&[1, 2, 3]),
        Err(GattError::InvalidValueLength {
            expected: 2,
            actual: 3
        })
    ));
    // Unchanged after the refused write.
    assert_eq!(value.get(), 0x1234);
}

#[test]
fn placeholder_refuses_both_operations() {
    let mut characteristic =
        Characteristic::placeholder(BleUuid::Uuid16(0x4030), Permissions::READ, Some("reserved"));
    let mut buffer = [0u8; 4];
    assert!(matches!(
        characteristic.read(&mut buffer),
        Err(GattError::ReadNotSupported)
    ));
    assert!(matches!(
        characteristic.write(&[0]),
        Err(GattError::WriteNotSupported)
    ));
}
