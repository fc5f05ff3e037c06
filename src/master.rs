// Part of el2574. Copyright 2023-2024 by the authors.
// This work is dual-licensed under Apache 2.0 and MIT terms.

//! Transport over the IgH/Etherlab kernel master.

use crate::transport::SdoTransport;
use crate::types::{SdoIdx, SlavePos};
use ethercat::Master;
use std::{io, time::Duration};

impl SdoTransport for Master {
    fn sdo_download(
        &mut self,
        slave: SlavePos,
        sdo: SdoIdx,
        complete_access: bool,
        data: &[u8],
        timeout: Duration,
    ) -> io::Result<()> {
        // The kernel master applies its own mailbox timeout.
        log::trace!("ignoring SDO timeout of {:?}", timeout);
        Master::sdo_download(self, slave, sdo, complete_access, &data)?;
        Ok(())
    }

    fn slave_name(&self, slave: SlavePos) -> io::Result<Vec<u8>> {
        Ok(self.get_slave_info(slave)?.name.into_bytes())
    }
}
