// Part of el2574. Copyright 2023-2024 by the authors.
// This work is dual-licensed under Apache 2.0 and MIT terms.

use crate::types::{SdoIdx, SlavePos};
use std::{
    io, thread,
    time::{Duration, Instant},
};

/// Default timeout of a single SDO download (SOEM's `EC_TIMEOUTRXM`).
pub const DEFAULT_SDO_TIMEOUT: Duration = Duration::from_micros(700_000);

/// The part of an EtherCAT master this driver needs.
///
/// Every call is one blocking mailbox transaction. Implementations must
/// not reorder or batch downloads: the terminal interprets the sequence
/// of writes as its protocol.
pub trait SdoTransport {
    /// Download `data` to the object `sdo` of `slave`. With
    /// `complete_access` the whole object starting at `sdo.sub_idx` is
    /// written in one transfer.
    fn sdo_download(
        &mut self,
        slave: SlavePos,
        sdo: SdoIdx,
        complete_access: bool,
        data: &[u8],
        timeout: Duration,
    ) -> io::Result<()>;

    /// Device name as reported by the slave's SII.
    fn slave_name(&self, slave: SlavePos) -> io::Result<Vec<u8>>;
}

impl<T: SdoTransport + ?Sized> SdoTransport for &mut T {
    fn sdo_download(
        &mut self,
        slave: SlavePos,
        sdo: SdoIdx,
        complete_access: bool,
        data: &[u8],
        timeout: Duration,
    ) -> io::Result<()> {
        (**self).sdo_download(slave, sdo, complete_access, data, timeout)
    }

    fn slave_name(&self, slave: SlavePos) -> io::Result<Vec<u8>> {
        (**self).slave_name(slave)
    }
}

/// Poll `reached` every `interval` until it reports true or `timeout` has
/// passed. Returns whether the condition was reached; errors of `reached`
/// end the wait.
pub fn wait_for<F>(timeout: Duration, interval: Duration, mut reached: F) -> io::Result<bool>
where
    F: FnMut() -> io::Result<bool>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if reached()? {
            return Ok(true);
        }
        if Instant::now() >= deadline {
            return Ok(false);
        }
        thread::sleep(interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_until_reached() {
        let mut polls = 0;
        let ok = wait_for(Duration::from_secs(5), Duration::from_millis(1), || {
            polls += 1;
            Ok(polls == 3)
        })
        .unwrap();
        assert!(ok);
        assert_eq!(polls, 3);
    }

    #[test]
    fn wait_gives_up() {
        let ok = wait_for(Duration::from_millis(5), Duration::from_millis(1), || Ok(false)).unwrap();
        assert!(!ok);
    }

    #[test]
    fn wait_stops_on_error() {
        let mut polls = 0;
        let err = wait_for(Duration::from_secs(5), Duration::from_millis(1), || {
            polls += 1;
            Err(io::Error::new(io::ErrorKind::NotFound, "no such slave"))
        })
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(polls, 1);
    }
}
