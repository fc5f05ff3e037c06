// Part of el2574. Copyright 2023-2024 by the authors.
// This work is dual-licensed under Apache 2.0 and MIT terms.

//! Object dictionary of the EL2574 (see Beckhoff documentation, chapter
//! "Object description and parameterization").

use crate::types::{Error, Result};
use std::convert::TryFrom;

/// Number of LED channels on one terminal.
pub const CHANNEL_COUNT: usize = 4;

const SETTINGS: [u16; CHANNEL_COUNT] = [0x8000, 0x8010, 0x8020, 0x8030];
const EXTENDED_CONTROL: [u16; CHANNEL_COUNT] = [0x7001, 0x7011, 0x7021, 0x7031];

pub const RX_PDO_ASSIGN: u16 = 0x1C12;
pub const TX_PDO_ASSIGN: u16 = 0x1C13;

/// RxPDOs carrying the extended control words, one per channel.
pub const RX_PDO_EXTENDED: [u16; CHANNEL_COUNT] = [0x1601, 0x1611, 0x1621, 0x1631];
/// TxPDOs carrying the channel status words.
pub const TX_PDO_STATUS: [u16; CHANNEL_COUNT] = [0x1A00, 0x1A10, 0x1A20, 0x1A30];

/// Sub-indices of the channel settings objects (0x80n0).
pub mod settings {
    pub const ENABLE_CUSTOM: u8 = 0x01;
    pub const PIXEL_COUNT: u8 = 0x11;
    pub const CHIP_TYPE: u8 = 0x12;
    pub const COLOR_FORMAT: u8 = 0x13;
    pub const DATA_RATE: u8 = 0x15;
}

/// Sub-indices of the extended control objects (0x70n1).
pub mod control {
    pub const EXECUTE: u8 = 0x01;
    pub const SEND: u8 = 0x02;
    pub const UPDATE: u8 = 0x03;
    pub const WRITE: u8 = 0x04;
    pub const SEGMENT_INDEX: u8 = 0x09;
    /// First of eight consecutive segment element sub-indices.
    pub const SEGMENT_ELEMENT: u8 = 0x11;
}

/// Channel settings object of `channel`.
pub fn settings_index(channel: usize) -> Result<u16> {
    SETTINGS
        .get(channel)
        .copied()
        .ok_or(Error::InvalidChannel(channel as i64))
}

/// Extended control object of `channel`.
pub fn control_index(channel: usize) -> Result<u16> {
    EXTENDED_CONTROL
        .get(channel)
        .copied()
        .ok_or(Error::InvalidChannel(channel as i64))
}

/// Checks a signed channel number coming from outside (command line etc.).
pub fn channel_from_signed(channel: i64) -> Result<usize> {
    usize::try_from(channel)
        .ok()
        .filter(|c| *c < CHANNEL_COUNT)
        .ok_or(Error::InvalidChannel(channel))
}
