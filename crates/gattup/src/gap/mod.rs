//! GAP-side concerns of a peripheral: addresses, broadcast parameters, and
//! the advertising / scan-response payloads.

pub mod advertising;
pub mod constants;
pub mod error;
pub mod types;

#[cfg(test)]
mod tests;

pub use advertising::AdvertisingData;
pub use error::{GapError, GapResult};
pub use types::{AddressType, AdvertisingParameters, BdAddr, ConnectionParameters};
