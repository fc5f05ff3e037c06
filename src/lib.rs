// Part of el2574. Copyright 2023-2024 by the authors.
// This work is dual-licensed under Apache 2.0 and MIT terms.


//! 	Driver for the Beckhoff EL2574, a four channel EtherCAT terminal for addressable LED chains.
//!
//! 	The terminal is configured through its object dictionary while the bus is in PRE-OP (chip settings per channel and the PDO assignment) and receives pixel data through a handshake on its extended control objects: segments of eight values are written into a staging buffer, "update" moves them into the frame buffer and "send" pushes the frame out to the LEDs.
//!
//! 	The EtherCAT master is not part of this crate. It is reached through the [SdoTransport] trait; with the `igh` feature the trait is implemented for the IgH/Etherlab master of the `ethercat` crate.
//!
//! 	The entry points are [Driver] (recognise and configure terminals during bus start-up) and [Terminal] (frame transfers).


mod driver;
mod frame;
mod identity;
#[cfg(feature = "igh")]
mod master;
mod objects;
mod pattern;
mod pdo;
mod settings;
mod terminal;
#[cfg(test)]
mod testing;
mod transport;
mod types;

pub use self::{
    driver::{Driver, DriverBuilder},
    identity::{matches, IDENTIFIER},
    objects::{channel_from_signed, control_index, settings_index, CHANNEL_COUNT},
    pattern::{CHECKER_EVEN, CHECKER_ODD},
    pdo::{PdoAssignmentList, MAX_ASSIGNED_PDOS},
    settings::{
        ChannelConfiguration, ModuleConfiguration, CHIP_WS2812, COLOR_RGB, DATA_RATE_800K,
    },
    terminal::Terminal,
    transport::{wait_for, SdoTransport, DEFAULT_SDO_TIMEOUT},
    types::*,
};
