// Part of el2574. Copyright 2023-2024 by the authors.
// This work is dual-licensed under Apache 2.0 and MIT terms.

//! PDO assignment of the sync managers (objects 0x1C12 and 0x1C13).

use crate::objects::{self, CHANNEL_COUNT};
use crate::terminal::Terminal;
use crate::transport::SdoTransport;
use crate::types::{Error, Result, Step};

/// Maximum number of PDOs one assignment object of the terminal accepts.
pub const MAX_ASSIGNED_PDOS: usize = CHANNEL_COUNT;

/// The PDOs assigned to one sync manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdoAssignmentList {
    index: u16,
    entries: Vec<u16>,
}

impl PdoAssignmentList {
    pub fn new(index: u16) -> Self {
        Self {
            index,
            entries: Vec::with_capacity(MAX_ASSIGNED_PDOS),
        }
    }

    /// Extended control RxPDOs of all channels.
    pub fn rx() -> Self {
        Self::from_pdos(objects::RX_PDO_ASSIGN, &objects::RX_PDO_EXTENDED)
    }

    /// Status TxPDOs of all channels.
    pub fn tx() -> Self {
        Self::from_pdos(objects::TX_PDO_ASSIGN, &objects::TX_PDO_STATUS)
    }

    fn from_pdos(index: u16, pdos: &[u16; CHANNEL_COUNT]) -> Self {
        Self {
            index,
            entries: pdos.to_vec(),
        }
    }

    pub fn push(&mut self, pdo: u16) -> Result<()> {
        if self.entries.len() >= MAX_ASSIGNED_PDOS {
            return Err(Error::PdoListFull { index: self.index });
        }
        self.entries.push(pdo);
        Ok(())
    }

    pub fn index(&self) -> u16 {
        self.index
    }

    pub fn count(&self) -> u16 {
        self.entries.len() as u16
    }

    pub fn entries(&self) -> &[u16] {
        &self.entries
    }

    /// Complete access image: count followed by the entries, all u16 LE.
    pub fn to_bytes(&self) -> Vec<u8> {
        std::iter::once(self.count())
            .chain(self.entries.iter().copied())
            .flat_map(u16::to_le_bytes)
            .collect()
    }
}

impl<'m, T: SdoTransport> Terminal<'m, T> {
    /// Write one assignment: clear the count, then download the full list.
    ///
    /// The slave must be in PRE-OP.
    pub fn apply_pdo_assignment(&mut self, list: &PdoAssignmentList) -> Result<()> {
        log::debug!(
            "slave {}: assigning {:04X?} to 0x{:04X}",
            u16::from(self.slave()),
            list.entries(),
            list.index()
        );
        self.download(list.index(), 0, 0u8, Step::PdoClear, None)?;
        self.download_complete(list.index(), 0, &list.to_bytes(), Step::PdoAssign)
    }

    /// Assign the extended control RxPDOs and the status TxPDOs.
    pub fn assign_pdos(&mut self) -> Result<()> {
        self.apply_pdo_assignment(&PdoAssignmentList::rx())?;
        self.apply_pdo_assignment(&PdoAssignmentList::tx())
    }
}
