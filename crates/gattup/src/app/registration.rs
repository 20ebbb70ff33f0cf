//! Serialized service registration
//!
//! The stack processes one attribute table at a time, so services are brought
//! up strictly in declaration order: submit a table, wait for it to be
//! created, start the service, wait for the start, advance. All waiting is
//! state held between callbacks; nothing here blocks.

use log::info;

use super::error::{AppError, AppResult};
use crate::gatt::Service;
use crate::stack::BleStack;

/// Where the registration of an application's services currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    /// Registration has not begun
    Idle,
    /// Service `i`'s table was submitted, its created-event is outstanding
    AwaitingTableCreation(usize),
    /// Service `i` was started, its started-event is outstanding
    AwaitingServiceStarted(usize),
    /// Every service is on the air
    Complete,
}

/// Drives the external stack through the per-service registration protocol.
///
/// The table-creation callback carries no service identity, so each
/// submission is tagged with a monotonically increasing per-application
/// sequence number and correlated by call order. In-order delivery of the
/// completion events is a precondition on the host environment; an event that
/// arrives in the wrong state is a fatal protocol mismatch, not something
/// this machine recovers from.
#[derive(Debug)]
pub struct Registrar {
    state: RegistrationState,
    next_sequence_number: u8,
}

impl Registrar {
    pub fn new() -> Self {
        Self {
            state: RegistrationState::Idle,
            next_sequence_number: 0,
        }
    }

    pub fn state(&self) -> RegistrationState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == RegistrationState::Complete
    }

    /// Begin registering `services`, starting with the first.
    pub fn start(&mut self, services: &mut [Service], stack: &mut dyn BleStack) -> AppResult<()> {
        if self.state != RegistrationState::Idle {
            return Err(AppError::RegistrationAlreadyStarted);
        }
        if services.is_empty() {
            self.state = RegistrationState::Complete;
            return Ok(());
        }
        self.submit_table(0, services, stack)
    }

    /// The stack created the outstanding table and assigned `handles`.
    pub fn table_created(
        &mut self,
        services: &mut [Service],
        stack: &mut dyn BleStack,
        handles: Vec<u16>,
    ) -> AppResult<()> {
        let index = match self.state {
            RegistrationState::AwaitingTableCreation(index) => index,
            _ => return Err(AppError::UnexpectedTableCreation),
        };

        let service = &mut services[index];
        service.assign_handles(handles)?;
        stack.start_service(service.first_handle()?)?;
        self.state = RegistrationState::AwaitingServiceStarted(index);
        Ok(())
    }

    /// The most recently started service is on the air; advance the cursor.
    pub fn service_started(
        &mut self,
        services: &mut [Service],
        stack: &mut dyn BleStack,
    ) -> AppResult<()> {
        let index = match self.state {
            RegistrationState::AwaitingServiceStarted(index) => index,
            _ => return Err(AppError::UnexpectedServiceStarted),
        };

        info!("service {} started", services[index].uuid());

        let next = index + 1;
        if next < services.len() {
            self.submit_table(next, services, stack)
        } else {
            self.state = RegistrationState::Complete;
            info!("all services registered");
            Ok(())
        }
    }

    fn submit_table(
        &mut self,
        index: usize,
        services: &mut [Service],
        stack: &mut dyn BleStack,
    ) -> AppResult<()> {
        let entries = services[index].build_table()?;
        stack.create_attribute_table(entries, self.next_sequence_number)?;
        self.next_sequence_number += 1;
        self.state = RegistrationState::AwaitingTableCreation(index);
        Ok(())
    }
}

impl Default for Registrar {
    fn default() -> Self {
        Self::new()
    }
}
