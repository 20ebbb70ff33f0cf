//! Unit tests for advertising payload assembly

use super::advertising::AdvertisingData;
use super::constants::*;
use super::error::GapError;
use super::types::BdAddr;
use crate::gatt::{Service, ServiceUuid};
use crate::uuid::BleUuid;

#[test]
fn advertisement_with_no_services_is_flags_plus_name() {
    let payload = AdvertisingData::advertisement(Some("ESP32"), &[]).unwrap();
    // 3 flag bytes + length/type prefix + the 5 name bytes
    assert_eq!(payload.len(), 3 + 2 + 5);
    assert_eq!(
        payload.as_bytes(),
        &[0x02, 0x01, 0x06, 0x06, 0x09, b'E', b'S', b'P', b'3', b'2']
    );
}

#[test]
fn advertisement_requires_a_name() {
    assert!(matches!(
        AdvertisingData::advertisement(None, &[]),
        Err(GapError::MissingDeviceName)
    ));
}

#[test]
fn advertised_services_are_grouped_by_width() {
    let services = vec![
        Service::new(ServiceUuid::new(BleUuid::Uuid16(0x4000))),
        Service::new(ServiceUuid::new(BleUuid::Uuid32(0x2104_0001))),
        Service::new(ServiceUuid::new(BleUuid::Uuid16(0x4100))),
    ];
    let payload = AdvertisingData::advertisement(Some("X"), &services).unwrap();

    let expected: Vec<u8> = [
        &[0x02, 0x01, 0x06][..],
        &[0x02, AD_TYPE_COMPLETE_LOCAL_NAME, b'X'],
        &[0x05, AD_TYPE_COMPLETE_LIST_16BIT, 0x00, 0x40, 0x00, 0x41],
        &[0x05, AD_TYPE_COMPLETE_LIST_32BIT, 0x01, 0x00, 0x04, 0x21],
    ]
    .concat();
    assert_eq!(payload.as_bytes(), expected.as_slice());
}

#[test]
fn unadvertised_services_are_skipped() {
    let services = vec![
        Service::new(ServiceUuid::new(BleUuid::Uuid32(0x2104_0001))),
        Service::new(ServiceUuid::unadvertised(BleUuid::Uuid32(0x2104_0002))),
        Service::new(ServiceUuid::new(BleUuid::Uuid32(0x2104_0003))),
    ];
    let payload = AdvertisingData::advertisement(Some("ESP32"), &services).unwrap();

    // Two 32-bit identities, no 16-bit segment at all.
    assert_eq!(payload.len(), 3 + 2 + 5 + 2 + 8);
    let tail = &payload.as_bytes()[10..];
    assert_eq!(tail[0], 9);
    assert_eq!(tail[1], AD_TYPE_COMPLETE_LIST_32BIT);
    assert_eq!(&tail[2..6], &[0x01, 0x00, 0x04, 0x21]);
    assert_eq!(&tail[6..10], &[0x03, 0x00, 0x04, 0x21]);
}

#[test]
fn oversized_advertisement_is_an_error_not_a_truncation() {
    let name = "a-device-name-way-too-long-for-the-air";
    let err = AdvertisingData::advertisement(Some(name), &[]).unwrap_err();
    match err {
        GapError::PayloadOverflow { label, needed } => {
            assert_eq!(label, "advertisement");
            assert_eq!(needed, 3 + 2 + name.len());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn overflow_check_counts_service_segments() {
    let services: Vec<Service> = (0u32..6)
        .map(|n| Service::new(ServiceUuid::new(BleUuid::Uuid32(0x2104_0000 + n))))
        .collect();
    // 3 + 2 + 5 + 2 + 24 = 36 > 31
    assert!(matches!(
        AdvertisingData::advertisement(Some("ESP32"), &services),
        Err(GapError::PayloadOverflow { needed: 36, .. })
    ));
}

#[test]
fn scan_response_is_always_seven_bytes() {
    let payload = AdvertisingData::scan_response(0x0280).unwrap();
    assert_eq!(payload.len(), 7);
    assert_eq!(
        payload.as_bytes(),
        &[0x02, 0x01, 0x06, 0x03, AD_TYPE_APPEARANCE, 0x80, 0x02]
    );
}

#[test]
fn bd_addr_formats_colon_separated() {
    let addr = BdAddr::new([0xde, 0xad, 0xbe, 0xef, 0x00, 0x01]);
    assert_eq!(addr.to_string(), "de:ad:be:ef:00:01");
    assert!(BdAddr::from_slice(&[1, 2, 3]).is_none());
    assert_eq!(
        BdAddr::from_slice(&[1, 2, 3, 4, 5, 6, 7]).unwrap().bytes,
        [1, 2, 3, 4, 5, 6]
    );
}
