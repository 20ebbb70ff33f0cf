//! The top-level application: state holder and event router
//!
//! A [`GattsApplication`] owns the services, the registration cursor, the
//! configuration-pending mask, and the build-once broadcast payloads. The
//! external stack delivers one event at a time; every handler runs to
//! completion before the next event arrives, so no locking is needed as long
//! as that serialization holds on the host side.

use bitflags::bitflags;
use log::{debug, error, info, warn};

use super::error::{AppError, AppResult};
use super::registration::{Registrar, RegistrationState};
use crate::gap::{AdvertisingData, AdvertisingParameters, BdAddr, ConnectionParameters, GapError};
use crate::gatt::constants::MAX_ATTRIBUTE_LENGTH;
use crate::gatt::{Characteristic, Service};
use crate::stack::{
    BleStack, ConnectionId, GapEvent, GattsEvent, ReadRequest, ResponseStatus, TransactionId,
    WriteRequest, STATUS_OK,
};

bitflags! {
    /// Configuration steps whose completion events are still outstanding
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct ConfigPending: u8 {
        const ADVERTISEMENT = 1 << 0;
        const SCAN_RESPONSE = 1 << 1;
    }
}

/// A GATT server application: identity, services, and the state machines that
/// bring them on the air.
pub struct GattsApplication {
    application_id: u16,
    short_name: String,
    full_name: Option<String>,
    appearance: u16,
    services: Vec<Service>,
    registrar: Registrar,
    interface: Option<u16>,
    pending: ConfigPending,
    advertisement: Option<AdvertisingData>,
    scan_response: Option<AdvertisingData>,
}

impl GattsApplication {
    pub fn new(
        application_id: u16,
        short_name: &str,
        full_name: Option<&str>,
        appearance: u16,
    ) -> Self {
        Self {
            application_id,
            short_name: short_name.to_owned(),
            full_name: full_name.map(str::to_owned),
            appearance,
            services: Vec::new(),
            registrar: Registrar::new(),
            interface: None,
            pending: ConfigPending::empty(),
            advertisement: None,
            scan_response: None,
        }
    }

    pub fn application_id(&self) -> u16 {
        self.application_id
    }

    /// The interface handle assigned by the stack on registration
    pub fn interface(&self) -> Option<u16> {
        self.interface
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Append a service; declaration order becomes registration order.
    pub fn add_service(&mut self, service: Service) {
        self.services.push(service);
    }

    pub fn registration_state(&self) -> RegistrationState {
        self.registrar.state()
    }

    /// Whether both broadcast payloads have been acknowledged by the stack
    pub fn configuration_done(&self) -> bool {
        self.pending.is_empty()
    }

    /// Route one GATT-server event.
    pub fn handle_gatts_event(
        &mut self,
        stack: &mut dyn BleStack,
        event: GattsEvent,
    ) -> AppResult<()> {
        match event {
            GattsEvent::Registered {
                status,
                app_id,
                interface,
            } => self.on_registered(stack, status, app_id, interface),
            GattsEvent::AttributeTableCreated { status, handles } => {
                if status != STATUS_OK {
                    return Err(AppError::TableCreationFailed(status));
                }
                self.registrar
                    .table_created(&mut self.services, stack, handles)
            }
            GattsEvent::ServiceStarted => self.registrar.service_started(&mut self.services, stack),
            GattsEvent::Connected { conn_id, peer } => {
                info!("connected, conn_id={}, address={}", conn_id, peer);
                // Best effort only; the connection works either way.
                if let Err(e) = stack.update_connection_parameters(peer, &ConnectionParameters::default())
                {
                    warn!("could not update connection parameters: {}", e);
                }
                Ok(())
            }
            GattsEvent::Disconnected {
                conn_id,
                peer,
                reason,
            } => self.on_disconnected(stack, conn_id, peer, reason),
            GattsEvent::MtuNegotiated { conn_id, mtu } => {
                info!("MTU negotiated, conn_id={}, mtu={}", conn_id, mtu);
                Ok(())
            }
            GattsEvent::Read(request) => self.on_read(stack, request),
            GattsEvent::Write(request) => self.on_write(stack, request),
            GattsEvent::ResponseSent { status } => {
                debug!("response completed, status={}", status);
                Ok(())
            }
            GattsEvent::Other(code) => Err(AppError::UnhandledGattsEvent(code)),
        }
    }

    /// Route one GAP event.
    pub fn handle_gap_event(&mut self, stack: &mut dyn BleStack, event: GapEvent) -> AppResult<()> {
        match event {
            GapEvent::AdvertisingDataSet => {
                self.pending.remove(ConfigPending::ADVERTISEMENT);
                self.start_advertising_when_configured(stack)
            }
            GapEvent::ScanResponseDataSet => {
                self.pending.remove(ConfigPending::SCAN_RESPONSE);
                self.start_advertising_when_configured(stack)
            }
            GapEvent::AdvertisingStarted { status } => {
                if status == STATUS_OK {
                    info!("started advertising");
                } else {
                    error!("error starting advertising, status={}", status);
                }
                Ok(())
            }
            GapEvent::ConnectionParametersUpdated {
                status,
                interval_min,
                interval_max,
                interval,
                latency,
                timeout,
            } => {
                info!(
                    "connection parameters updated, status={}, min_int={}, max_int={}, conn_int={}, latency={}, timeout={}",
                    status, interval_min, interval_max, interval, latency, timeout
                );
                Ok(())
            }
            GapEvent::Other(code) => Err(AppError::UnhandledGapEvent(code)),
        }
    }

    fn on_registered(
        &mut self,
        stack: &mut dyn BleStack,
        status: u8,
        app_id: u16,
        interface: u16,
    ) -> AppResult<()> {
        if status != STATUS_OK {
            return Err(AppError::RegistrationFailed { app_id, status });
        }
        self.interface = Some(interface);

        let device_name = self.full_name.as_deref().unwrap_or(&self.short_name);
        stack.set_device_name(device_name)?;

        if self.advertisement.is_some() {
            return Err(GapError::PayloadAlreadyBuilt("advertisement").into());
        }
        let advertisement =
            AdvertisingData::advertisement(Some(&self.short_name), &self.services)?;
        advertisement.dump("advertisement");
        stack.set_advertising_payload(advertisement.as_bytes())?;
        self.advertisement = Some(advertisement);
        self.pending.insert(ConfigPending::ADVERTISEMENT);

        if self.scan_response.is_some() {
            return Err(GapError::PayloadAlreadyBuilt("scan response").into());
        }
        let scan_response = AdvertisingData::scan_response(self.appearance)?;
        scan_response.dump("scan response");
        stack.set_scan_response_payload(scan_response.as_bytes())?;
        self.scan_response = Some(scan_response);
        self.pending.insert(ConfigPending::SCAN_RESPONSE);

        self.registrar.start(&mut self.services, stack)
    }

    fn on_disconnected(
        &mut self,
        stack: &mut dyn BleStack,
        conn_id: ConnectionId,
        peer: BdAddr,
        reason: u8,
    ) -> AppResult<()> {
        info!(
            "disconnected, conn_id={}, address={}, reason={:#06x}",
            conn_id, peer, reason
        );
        if self.configuration_done() {
            stack.start_advertising(&AdvertisingParameters::default())?;
        } else {
            warn!("not starting advertising again, configuration not yet completed");
        }
        Ok(())
    }

    fn start_advertising_when_configured(&mut self, stack: &mut dyn BleStack) -> AppResult<()> {
        if self.configuration_done() {
            stack.start_advertising(&AdvertisingParameters::default())?;
        }
        Ok(())
    }

    fn on_read(&mut self, stack: &mut dyn BleStack, request: ReadRequest) -> AppResult<()> {
        let ReadRequest {
            conn_id,
            trans_id,
            handle,
            needs_response,
        } = request;
        debug!("read request, handle={}, need_rsp={}", handle, needs_response);
        if !needs_response {
            return Ok(());
        }

        let mut buffer = [0u8; MAX_ATTRIBUTE_LENGTH];
        match self.characteristic_for_handle(handle) {
            None => self.answer(stack, conn_id, trans_id, ResponseStatus::InvalidHandle, None),
            Some(characteristic) => match characteristic.read(&mut buffer) {
                Ok(written) => self.answer(
                    stack,
                    conn_id,
                    trans_id,
                    ResponseStatus::Ok,
                    Some(&buffer[..written]),
                ),
                Err(e) => {
                    warn!("read of handle {} failed: {}", handle, e);
                    self.answer(stack, conn_id, trans_id, ResponseStatus::InternalError, None)
                }
            },
        }
    }

    fn on_write(&mut self, stack: &mut dyn BleStack, request: WriteRequest) -> AppResult<()> {
        let WriteRequest {
            conn_id,
            trans_id,
            handle,
            value,
            is_prepared,
            needs_response,
        } = request;
        debug!(
            "write request, handle={}, len={}, is_prep={}, need_rsp={}",
            handle,
            value.len(),
            is_prepared,
            needs_response
        );

        // Prepared (queued) writes are out of scope: accepted, never applied.
        if is_prepared {
            if needs_response {
                return self.answer(stack, conn_id, trans_id, ResponseStatus::Ok, None);
            }
            return Ok(());
        }

        let status = match self.characteristic_for_handle_mut(handle) {
            None => ResponseStatus::InvalidHandle,
            Some(characteristic) => match characteristic.write(&value) {
                Ok(()) => ResponseStatus::Ok,
                Err(e) => {
                    warn!("write of handle {} failed: {}", handle, e);
                    ResponseStatus::InternalError
                }
            },
        };

        if needs_response {
            return self.answer(stack, conn_id, trans_id, status, None);
        }
        Ok(())
    }

    fn answer(
        &self,
        stack: &mut dyn BleStack,
        conn_id: ConnectionId,
        trans_id: TransactionId,
        status: ResponseStatus,
        value: Option<&[u8]>,
    ) -> AppResult<()> {
        stack.send_response(conn_id, trans_id, status, value)?;
        Ok(())
    }

    fn characteristic_for_handle(&self, handle: u16) -> Option<&Characteristic> {
        self.services
            .iter()
            .find(|service| service.has_handle(handle))?
            .characteristic_for_handle(handle)
    }

    fn characteristic_for_handle_mut(&mut self, handle: u16) -> Option<&mut Characteristic> {
        self.services
            .iter_mut()
            .find(|service| service.has_handle(handle))?
            .characteristic_for_handle_mut(handle)
    }
}

impl std::fmt::Debug for GattsApplication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GattsApplication")
            .field("application_id", &self.application_id)
            .field("short_name", &self.short_name)
            .field("services", &self.services.len())
            .field("registration", &self.registrar.state())
            .field("configuration_done", &self.configuration_done())
            .finish()
    }
}
