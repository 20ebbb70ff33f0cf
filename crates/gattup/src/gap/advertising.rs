//! Assembling advertising and scan-response payloads
//!
//! Both payloads are concatenations of length-prefixed, type-tagged segments.
//! The 31-byte legacy limit is a hard external constraint: the budget is
//! checked before a single byte is assembled, and exceeding it is a
//! configuration error, never a truncation.

use byteorder::{LittleEndian, WriteBytesExt};
use log::info;

use super::constants::{
    ADVERTISEMENT_FLAGS, ADVERTISING_DATA_MAX_LENGTH, AD_TYPE_APPEARANCE,
    AD_TYPE_COMPLETE_LIST_16BIT, AD_TYPE_COMPLETE_LIST_32BIT, AD_TYPE_COMPLETE_LOCAL_NAME,
};
use super::error::{GapError, GapResult};
use crate::gatt::Service;

/// A fully assembled broadcast payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvertisingData {
    payload: Vec<u8>,
}

impl AdvertisingData {
    /// Assemble the advertisement payload: flags, the short device name, and
    /// one identity-list segment per identifier width that has advertised
    /// services.
    ///
    /// A service contributes only if its advertise flag is set and its
    /// identity matches the segment's width.
    pub fn advertisement(short_name: Option<&str>, services: &[Service]) -> GapResult<Self> {
        let name = short_name.ok_or(GapError::MissingDeviceName)?;

        let uuids16: Vec<u16> = services
            .iter()
            .filter(|s| s.advertised())
            .filter_map(|s| s.uuid().as_u16())
            .collect();
        let uuids32: Vec<u32> = services
            .iter()
            .filter(|s| s.advertised())
            .filter_map(|s| s.uuid().as_u32())
            .collect();

        let mut needed = ADVERTISEMENT_FLAGS.len() + 2 + name.len();
        if !uuids16.is_empty() {
            needed += 2 + 2 * uuids16.len();
        }
        if !uuids32.is_empty() {
            needed += 2 + 4 * uuids32.len();
        }
        if needed > ADVERTISING_DATA_MAX_LENGTH {
            return Err(GapError::PayloadOverflow {
                label: "advertisement",
                needed,
            });
        }

        let mut payload = Vec::with_capacity(needed);
        payload.extend_from_slice(&ADVERTISEMENT_FLAGS);

        payload.push(name.len() as u8 + 1);
        payload.push(AD_TYPE_COMPLETE_LOCAL_NAME);
        payload.extend_from_slice(name.as_bytes());

        if !uuids16.is_empty() {
            payload.push(2 * uuids16.len() as u8 + 1);
            payload.push(AD_TYPE_COMPLETE_LIST_16BIT);
            for uuid in &uuids16 {
                payload.write_u16::<LittleEndian>(*uuid).unwrap();
            }
        }

        if !uuids32.is_empty() {
            payload.push(4 * uuids32.len() as u8 + 1);
            payload.push(AD_TYPE_COMPLETE_LIST_32BIT);
            for uuid in &uuids32 {
                payload.write_u32::<LittleEndian>(*uuid).unwrap();
            }
        }

        Ok(Self { payload })
    }

    /// Assemble the scan-response payload: flags plus the 16-bit appearance
    /// code. Always seven bytes.
    pub fn scan_response(appearance: u16) -> GapResult<Self> {
        let needed = ADVERTISEMENT_FLAGS.len() + 4;
        if needed > ADVERTISING_DATA_MAX_LENGTH {
            return Err(GapError::PayloadOverflow {
                label: "scan response",
                needed,
            });
        }

        let mut payload = Vec::with_capacity(needed);
        payload.extend_from_slice(&ADVERTISEMENT_FLAGS);
        payload.push(3);
        payload.push(AD_TYPE_APPEARANCE);
        payload.write_u16::<LittleEndian>(appearance).unwrap();

        Ok(Self { payload })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.payload
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Log a human-readable rendering of the payload
    pub fn dump(&self, label: &str) {
        info!(
            "{} ({} bytes): {}",
            label,
            self.payload.len(),
            hex::encode(&self.payload)
        );
    }
}
