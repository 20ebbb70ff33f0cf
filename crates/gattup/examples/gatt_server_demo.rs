//! Example demonstrating a full GATT server bring-up
//!
//! Assembles an application with three services, registers them against a
//! simulated stack that acknowledges every call with the matching completion
//! event, then replays a connect / read / write / disconnect sequence.
//!
//! Run with `RUST_LOG=debug cargo run --example gatt_server_demo` to see the
//! payload dumps and event logging.

use std::collections::VecDeque;

use gattup::stack::{ReadRequest, WriteRequest};
use gattup::{
    AdvertisingParameters, BdAddr, BleStack, BleUuid, Characteristic, ConnectionParameters,
    GapEvent, GattsApplication, GattsEvent, Permissions, ResponseStatus, Service, ServiceUuid,
    StackResult, TableEntry,
};

const APPLICATION_ID: u16 = 0x2104;
const DEVICE_APPEARANCE: u16 = 0x0280;

/// One pending callback from the simulated stack
enum Pending {
    Gatts(GattsEvent),
    Gap(GapEvent),
}

/// A stand-in for the native stack: every outbound call immediately queues
/// the completion event a real stack would deliver later.
struct SimulatedStack {
    queue: VecDeque<Pending>,
    next_handle: u16,
}

impl SimulatedStack {
    fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            next_handle: 40,
        }
    }

    fn pop(&mut self) -> Option<Pending> {
        self.queue.pop_front()
    }
}

impl BleStack for SimulatedStack {
    fn register_application(&mut self, app_id: u16) -> StackResult<()> {
        println!("stack: registering application {app_id:#06x}");
        self.queue.push_back(Pending::Gatts(GattsEvent::Registered {
            status: 0,
            app_id,
            interface: 3,
        }));
        Ok(())
    }

    fn set_device_name(&mut self, name: &str) -> StackResult<()> {
        println!("stack: device name set to {name:?}");
        Ok(())
    }

    fn create_attribute_table(
        &mut self,
        entries: &[TableEntry],
        sequence_number: u8,
    ) -> StackResult<()> {
        println!(
            "stack: creating attribute table #{sequence_number} with {} entries",
            entries.len()
        );
        let handles: Vec<u16> = (0..entries.len() as u16)
            .map(|n| self.next_handle + n)
            .collect();
        self.next_handle += entries.len() as u16;
        self.queue.push_back(Pending::Gatts(GattsEvent::AttributeTableCreated {
            status: 0,
            handles,
        }));
        Ok(())
    }

    fn start_service(&mut self, first_handle: u16) -> StackResult<()> {
        println!("stack: starting service at handle {first_handle}");
        self.queue.push_back(Pending::Gatts(GattsEvent::ServiceStarted));
        Ok(())
    }

    fn send_response(
        &mut self,
        conn_id: u16,
        trans_id: u32,
        status: ResponseStatus,
        value: Option<&[u8]>,
    ) -> StackResult<()> {
        println!(
            "stack: response on conn {conn_id} trans {trans_id}: status {:#04x}, value {:?}",
            status.code(),
            value
        );
        self.queue
            .push_back(Pending::Gatts(GattsEvent::ResponseSent { status: 0 }));
        Ok(())
    }

    fn set_advertising_payload(&mut self, data: &[u8]) -> StackResult<()> {
        println!("stack: advertisement payload installed ({} bytes)", data.len());
        self.queue.push_back(Pending::Gap(GapEvent::AdvertisingDataSet));
        Ok(())
    }

    fn set_scan_response_payload(&mut self, data: &[u8]) -> StackResult<()> {
        println!("stack: scan-response payload installed ({} bytes)", data.len());
        self.queue.push_back(Pending::Gap(GapEvent::ScanResponseDataSet));
        Ok(())
    }

    fn start_advertising(&mut self, parameters: &AdvertisingParameters) -> StackResult<()> {
        println!(
            "stack: advertising with interval {:#04x}..{:#04x}",
            parameters.interval_min, parameters.interval_max
        );
        self.queue
            .push_back(Pending::Gap(GapEvent::AdvertisingStarted { status: 0 }));
        Ok(())
    }

    fn update_connection_parameters(
        &mut self,
        peer: BdAddr,
        parameters: &ConnectionParameters,
    ) -> StackResult<()> {
        println!(
            "stack: connection parameter update toward {peer}: {}..{} x1.25ms",
            parameters.interval_min, parameters.interval_max
        );
        Ok(())
    }
}

fn demo_application() -> GattsApplication {
    let mut application = GattsApplication::new(
        APPLICATION_ID,
        "ESP32",
        Some("ESP32-GATT-Demo"),
        DEVICE_APPEARANCE,
    );

    let mut service_a = Service::new(ServiceUuid::new(BleUuid::Uuid32(0x2104_0001)));
    service_a.add_characteristic(Characteristic::uint16(
        BleUuid::Uuid32(0x2104_1000),
        Permissions::READ | Permissions::WRITE,
        Some("Foo"),
        0x4142,
    ));
    service_a.add_characteristic(Characteristic::uint16(
        BleUuid::Uuid16(0x4020),
        Permissions::READ,
        Some("Bar"),
        0x3132,
    ));
    application.add_service(service_a);

    let mut service_b = Service::new(ServiceUuid::unadvertised(BleUuid::Uuid32(0x2104_0002)));
    service_b.add_characteristic(Characteristic::uint16(
        BleUuid::Uuid16(0x4110),
        Permissions::READ | Permissions::WRITE,
        Some("Baz"),
        0x6162,
    ));
    application.add_service(service_b);

    let mut service_c = Service::new(ServiceUuid::new(BleUuid::Uuid32(0x2104_0003)));
    service_c.add_characteristic(Characteristic::uint16(
        BleUuid::Uuid32(0x2104_3000),
        Permissions::READ | Permissions::WRITE,
        None,
        0x4f58,
    ));
    application.add_service(service_c);

    application
}

fn drain(
    application: &mut GattsApplication,
    stack: &mut SimulatedStack,
) -> Result<(), Box<dyn std::error::Error>> {
    while let Some(pending) = stack.pop() {
        match pending {
            Pending::Gatts(event) => application.handle_gatts_event(stack, event)?,
            Pending::Gap(event) => application.handle_gap_event(stack, event)?,
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut application = demo_application();
    let mut stack = SimulatedStack::new();

    // Registering kicks off the whole cascade: name, payloads, one
    // create-table/start cycle per service.
    stack.register_application(application.application_id())?;
    drain(&mut application, &mut stack)?;
    println!("registration: {:?}", application.registration_state());

    // A central connects and pokes at the first characteristic.
    let peer = BdAddr::new([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
    application.handle_gatts_event(&mut stack, GattsEvent::Connected { conn_id: 1, peer })?;
    application.handle_gatts_event(
        &mut stack,
        GattsEvent::MtuNegotiated {
            conn_id: 1,
            mtu: 247,
        },
    )?;

    // The simulated stack assigned handles sequentially from 40, so the
    // first service's entries start there.
    let value_handle = 40
        + application.services()[0].characteristics()[0]
            .handle_index()
            .expect("handle assigned during registration") as u16;

    application.handle_gatts_event(
        &mut stack,
        GattsEvent::Read(ReadRequest {
            conn_id: 1,
            trans_id: 1,
            handle: value_handle,
            needs_response: true,
        }),
    )?;
    application.handle_gatts_event(
        &mut stack,
        GattsEvent::Write(WriteRequest {
            conn_id: 1,
            trans_id: 2,
            handle: value_handle,
            value: vec![0x34, 0x12],
            is_prepared: false,
            needs_response: true,
        }),
    )?;
    drain(&mut application, &mut stack)?;

    // The central goes away; the device becomes discoverable again.
    application.handle_gatts_event(
        &mut stack,
        GattsEvent::Disconnected {
            conn_id: 1,
            peer,
            reason: 0x13,
        },
    )?;
    drain(&mut application, &mut stack)?;

    Ok(())
}
