//! Error handling for advertising payload assembly

use thiserror::Error;

use super::constants::ADVERTISING_DATA_MAX_LENGTH;

/// Errors raised while assembling broadcast payloads
#[derive(Debug, Error)]
pub enum GapError {
    #[error(
        "{label} payload would be {needed} bytes, limit is {}",
        ADVERTISING_DATA_MAX_LENGTH
    )]
    PayloadOverflow { label: &'static str, needed: usize },

    #[error("no device name configured")]
    MissingDeviceName,

    #[error("{0} payload already generated")]
    PayloadAlreadyBuilt(&'static str),
}

/// Result type for payload assembly
pub type GapResult<T> = Result<T, GapError>;
