// Part of el2574. Copyright 2023-2024 by the authors.
// This work is dual-licensed under Apache 2.0 and MIT terms.

//! Recording transport for the unit tests.

use crate::transport::SdoTransport;
use crate::types::{SdoIdx, SlavePos};
use derive_new::new;
use std::{collections::HashMap, io, time::Duration};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Download {
    pub slave: u16,
    pub index: u16,
    pub sub_index: u8,
    pub complete_access: bool,
    pub data: Vec<u8>,
}

#[derive(Default)]
pub struct Recorder {
    pub downloads: Vec<Download>,
    pub names: HashMap<u16, Vec<u8>>,
    /// Attempts (zero based) that should fail with a timeout.
    pub fail_at: Vec<usize>,
    attempts: usize,
}

impl Recorder {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self::default()
    }

    pub fn failing_at(attempts: &[usize]) -> Self {
        Self {
            fail_at: attempts.to_vec(),
            ..Self::new()
        }
    }

    pub fn with_slave(mut self, pos: u16, name: &str) -> Self {
        self.names.insert(pos, name.as_bytes().to_vec());
        self
    }

    /// `(index, sub_index)` of every recorded download.
    pub fn addresses(&self) -> Vec<(u16, u8)> {
        self.downloads
            .iter()
            .map(|d| (d.index, d.sub_index))
            .collect()
    }
}

impl SdoTransport for Recorder {
    fn sdo_download(
        &mut self,
        slave: SlavePos,
        sdo: SdoIdx,
        complete_access: bool,
        data: &[u8],
        _timeout: Duration,
    ) -> io::Result<()> {
        let attempt = self.attempts;
        self.attempts += 1;
        if self.fail_at.contains(&attempt) {
            return Err(io::Error::new(io::ErrorKind::TimedOut, "SDO timeout"));
        }
        self.downloads.push(Download::new(
            u16::from(slave),
            u16::from(sdo.idx),
            u8::from(sdo.sub_idx),
            complete_access,
            data.to_vec(),
        ));
        Ok(())
    }

    fn slave_name(&self, slave: SlavePos) -> io::Result<Vec<u8>> {
        self.names
            .get(&u16::from(slave))
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such slave"))
    }
}
