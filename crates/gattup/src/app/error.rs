//! Error handling for the application layer
//!
//! Configuration errors (`GattError`, `GapError`) and outbound stack
//! rejections are converted in; protocol mismatches between what the stack
//! reports and what this application expects are first-class variants. All of
//! them are fatal to the operation that raised them. Per-request failures are
//! never surfaced here: they are consumed by answering the offending request
//! with an error status.

use thiserror::Error;

use crate::gap::GapError;
use crate::gatt::GattError;
use crate::stack::StackError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("error registering application {app_id:#06x}, status {status}")]
    RegistrationFailed { app_id: u16, status: u8 },

    #[error("error creating the attribute table, status {0}")]
    TableCreationFailed(u8),

    #[error("registration already started")]
    RegistrationAlreadyStarted,

    #[error("attribute table created while none was requested")]
    UnexpectedTableCreation,

    #[error("service started while none was starting")]
    UnexpectedServiceStarted,

    #[error("GATTS event {0} not yet implemented")]
    UnhandledGattsEvent(u8),

    #[error("GAP event {0} not yet implemented")]
    UnhandledGapEvent(u8),

    #[error(transparent)]
    Gatt(#[from] GattError),

    #[error(transparent)]
    Gap(#[from] GapError),

    #[error(transparent)]
    Stack(#[from] StackError),
}

/// Result type for application-layer operations
pub type AppResult<T> = Result<T, AppError>;
