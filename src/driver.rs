// Part of el2574. Copyright 2023-2024 by the authors.
// This work is dual-licensed under Apache 2.0 and MIT terms.

//! Slave discovery hook: recognise EL2574 terminals and bring them into
//! their runtime configuration while the bus is in PRE-OP.

use crate::identity::{self, IDENTIFIER};
use crate::objects;
use crate::settings::{ChannelConfiguration, ModuleConfiguration};
use crate::terminal::Terminal;
use crate::transport::{SdoTransport, DEFAULT_SDO_TIMEOUT};
use crate::types::{Result, SlavePos};
use std::time::Duration;

#[derive(Default)]
pub struct DriverBuilder {
    identifier: Option<String>,
    sdo_timeout: Option<Duration>,
    settings: Option<ModuleConfiguration>,
    channels: Vec<(usize, ChannelConfiguration)>,
}

impl DriverBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identifier(mut self, identifier: &str) -> Self {
        self.identifier = Some(identifier.to_owned());
        self
    }

    pub fn sdo_timeout(mut self, timeout: Duration) -> Self {
        self.sdo_timeout = Some(timeout);
        self
    }

    pub fn settings(mut self, settings: ModuleConfiguration) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Override the settings of one channel.
    pub fn channel(mut self, channel: usize, conf: ChannelConfiguration) -> Self {
        self.channels.push((channel, conf));
        self
    }

    pub fn build(self) -> Result<Driver> {
        let mut settings = self.settings.unwrap_or_default();
        for (channel, conf) in self.channels {
            objects::settings_index(channel)?;
            settings.channels[channel] = conf;
        }
        Ok(Driver {
            identifier: self.identifier.unwrap_or_else(|| IDENTIFIER.to_owned()),
            sdo_timeout: self.sdo_timeout.unwrap_or(DEFAULT_SDO_TIMEOUT),
            settings,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Driver {
    identifier: String,
    sdo_timeout: Duration,
    settings: ModuleConfiguration,
}

impl Default for Driver {
    fn default() -> Self {
        Self {
            identifier: IDENTIFIER.to_owned(),
            sdo_timeout: DEFAULT_SDO_TIMEOUT,
            settings: ModuleConfiguration::default(),
        }
    }
}

impl Driver {
    pub fn settings(&self) -> &ModuleConfiguration {
        &self.settings
    }

    pub fn sdo_timeout(&self) -> Duration {
        self.sdo_timeout
    }

    /// Handle for frame transfers to `slave`.
    pub fn terminal<'m, T: SdoTransport>(&self, bus: &'m mut T, slave: SlavePos) -> Terminal<'m, T> {
        Terminal::new(bus, slave).with_timeout(self.sdo_timeout)
    }

    pub fn is_our_device<T: SdoTransport>(&self, bus: &T, slave: SlavePos) -> Result<bool> {
        let name = bus.slave_name(slave)?;
        Ok(identity::matches(&name, &self.identifier))
    }

    /// Write channel settings and PDO assignment. The slave must be in
    /// PRE-OP and process data must not be mapped yet.
    ///
    /// The PDO assignment is written even if some channels failed; the
    /// channel failures are returned afterwards.
    pub fn configure<T: SdoTransport>(&self, bus: &mut T, slave: SlavePos) -> Result<()> {
        log::info!("configuring {} at slave {}", self.identifier, u16::from(slave));
        let mut terminal = self.terminal(bus, slave);
        let channels = terminal.configure_channels(&self.settings);
        terminal.assign_pdos()?;
        channels
    }

    /// Configure every matching slave in `slaves`. Other slaves are
    /// skipped, as are terminals whose configuration fails. Returns the
    /// configured positions.
    pub fn configure_all<T, I>(&self, bus: &mut T, slaves: I) -> Vec<SlavePos>
    where
        T: SdoTransport,
        I: IntoIterator<Item = SlavePos>,
    {
        let mut configured = Vec::new();
        for slave in slaves {
            match self.is_our_device(&*bus, slave) {
                Ok(true) => {}
                Ok(false) => {
                    log::debug!("slave {} is not an {}", u16::from(slave), self.identifier);
                    continue;
                }
                Err(e) => {
                    log::error!("slave {}: cannot read name: {}", u16::from(slave), e);
                    continue;
                }
            }
            match self.configure(bus, slave) {
                Ok(()) => configured.push(slave),
                Err(e) => log::error!("slave {}: skipped: {}", u16::from(slave), e),
            }
        }
        configured
    }
}
