//! Demo: Checkerboard on every EL2574 of the bus
//!
//! Opens the EtherCAT master (index 0), brings all slaves to PRE-OP,
//! configures every EL2574 that got there (WS2812 chips, 256 pixels per
//! channel) and then requests OP. Afterwards channel 0 of each terminal
//! that reached OP shows a checkerboard over a 32x32 grid, ten times with
//! a short pause.
//!
//! Usage
//! ```text
//! cargo run --features igh --example checkerboard
//! ```
use el2574::{wait_for, Driver, GRID_DIMENSION};
use ethercat::{AlState, Master, MasterAccess, SlavePos};
use std::{
    convert::TryFrom,
    io::{self, Error, ErrorKind},
    thread,
    time::Duration,
};

const FRAMES: usize = 10;
const CHANNEL: usize = 0;
const STATE_TIMEOUT: Duration = Duration::from_secs(2);
const STATE_POLL: Duration = Duration::from_millis(10);

/// Request `state` for every slave and return those that reached it.
fn bring_to(master: &mut Master, slaves: &[SlavePos], state: AlState) -> io::Result<Vec<SlavePos>> {
    let mut reached = Vec::new();
    for slave in slaves {
        master.request_state(*slave, state)?;
    }
    for slave in slaves {
        let ok = wait_for(STATE_TIMEOUT, STATE_POLL, || {
            Ok(master.get_slave_info(*slave)?.al_state == state)
        })?;
        if ok {
            reached.push(*slave);
        } else {
            log::error!("slave {} did not reach {:?}, skipped", u16::from(*slave), state);
        }
    }
    Ok(reached)
}

pub fn main() -> Result<(), io::Error> {
    env_logger::init();

    let mut master = Master::open(0, MasterAccess::ReadWrite)?;
    let slave_count = u16::try_from(master.get_info()?.slave_count)
        .map_err(|e| Error::new(ErrorKind::InvalidData, e))?;
    log::info!("{} slaves on the bus", slave_count);

    let slaves: Vec<SlavePos> = (0..slave_count).map(SlavePos::from).collect();
    let pre_op = bring_to(&mut master, &slaves, AlState::PreOp)?;

    let driver = Driver::default();
    let configured = driver.configure_all(&mut master, pre_op);
    if configured.is_empty() {
        log::warn!("no EL2574 configured, nothing to do");
        return Ok(());
    }

    let terminals = bring_to(&mut master, &configured, AlState::Op)?;
    for frame in 0..FRAMES {
        thread::sleep(Duration::from_secs(2));
        for slave in &terminals {
            driver
                .terminal(&mut master, *slave)
                .render_checkerboard(CHANNEL, GRID_DIMENSION as u16)?;
        }
        log::info!("checkerboard frame {} sent", frame);
    }
    Ok(())
}
