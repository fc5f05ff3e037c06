// Part of el2574. Copyright 2023-2024 by the authors.
// This work is dual-licensed under Apache 2.0 and MIT terms.

use crate::transport::{SdoTransport, DEFAULT_SDO_TIMEOUT};
use crate::types::{Error, Result, SdoIdx, SlavePos, Step};
use num_traits::ops::bytes::ToBytes;
use std::time::Duration;

/// One EL2574 on the bus.
///
/// The handle borrows the transport mutably, so handshakes issued through
/// it are strictly ordered. Nothing about the device state is cached.
pub struct Terminal<'m, T: SdoTransport> {
    bus: &'m mut T,
    slave: SlavePos,
    timeout: Duration,
}

impl<'m, T: SdoTransport> Terminal<'m, T> {
    pub fn new(bus: &'m mut T, slave: SlavePos) -> Self {
        Self {
            bus,
            slave,
            timeout: DEFAULT_SDO_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub const fn slave(&self) -> SlavePos {
        self.slave
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Download a single little endian value to `index:sub_index`.
    pub(crate) fn download<V: ToBytes>(
        &mut self,
        index: u16,
        sub_index: u8,
        value: V,
        step: Step,
        segment: Option<u16>,
    ) -> Result<()> {
        let bytes = value.to_le_bytes();
        self.transfer(index, sub_index, false, bytes.as_ref(), step, segment)
    }

    /// Download `data` as a complete access starting at `index:sub_index`.
    pub(crate) fn download_complete(
        &mut self,
        index: u16,
        sub_index: u8,
        data: &[u8],
        step: Step,
    ) -> Result<()> {
        self.transfer(index, sub_index, true, data, step, None)
    }

    fn transfer(
        &mut self,
        index: u16,
        sub_index: u8,
        complete_access: bool,
        data: &[u8],
        step: Step,
        segment: Option<u16>,
    ) -> Result<()> {
        log::debug!(
            "slave {}: 0x{:04X}:{:02X} <- {:02X?} ({})",
            u16::from(self.slave),
            index,
            sub_index,
            data,
            step
        );
        let sdo = SdoIdx::new(index, sub_index);
        self.bus
            .sdo_download(self.slave, sdo, complete_access, data, self.timeout)
            .map_err(|source| Error::TransferFailed {
                slave: u16::from(self.slave),
                index,
                sub_index,
                step,
                segment,
                source,
            })
    }
}
