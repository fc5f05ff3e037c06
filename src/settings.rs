// Part of el2574. Copyright 2023-2024 by the authors.
// This work is dual-licensed under Apache 2.0 and MIT terms.

//! Per-channel chip settings (objects 0x8000 to 0x8030).

use crate::objects::{self, settings, CHANNEL_COUNT};
use crate::terminal::Terminal;
use crate::transport::SdoTransport;
use crate::types::{ChannelFailure, Error, Result, Step};
use derive_new::new;

/// WS2812(B) driver chip.
pub const CHIP_WS2812: u8 = 28;
/// RGB color ordering.
pub const COLOR_RGB: u8 = 26;
/// 800 kbit/s.
pub const DATA_RATE_800K: u8 = 80;

/// Settings of one LED channel. The chip fields are only sent when
/// `enable_custom_settings` is set, otherwise the firmware defaults apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct ChannelConfiguration {
    #[new(value = "true")]
    pub enable_custom_settings: bool,
    pub pixel_count: u16,
    pub chip_type: u8,
    pub color_format: u8,
    pub data_rate: u8,
}

impl Default for ChannelConfiguration {
    fn default() -> Self {
        Self::new(256, CHIP_WS2812, COLOR_RGB, DATA_RATE_800K)
    }
}

impl ChannelConfiguration {
    /// Leave the channel to the terminal's own settings.
    pub fn firmware_defaults() -> Self {
        Self {
            enable_custom_settings: false,
            ..Self::default()
        }
    }
}

/// Settings of all four channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModuleConfiguration {
    pub channels: [ChannelConfiguration; CHANNEL_COUNT],
}

impl ModuleConfiguration {
    pub fn uniform(channel: ChannelConfiguration) -> Self {
        Self {
            channels: [channel; CHANNEL_COUNT],
        }
    }
}

impl<'m, T: SdoTransport> Terminal<'m, T> {
    /// Write the settings of every channel. A failing channel does not
    /// stop the others; all failures are reported together.
    pub fn configure_channels(&mut self, module: &ModuleConfiguration) -> Result<()> {
        let mut failures = Vec::new();
        for (channel, conf) in module.channels.iter().enumerate() {
            if let Err(e) = self.configure_channel(channel, conf) {
                log::warn!(
                    "slave {}: channel {} not configured: {}",
                    u16::from(self.slave()),
                    channel,
                    e
                );
                failures.push(ChannelFailure::new(channel, e));
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::ConfigurationIncomplete {
                slave: u16::from(self.slave()),
                failures,
            })
        }
    }

    /// Write the settings of a single channel, stopping at the first
    /// failed download.
    pub fn configure_channel(&mut self, channel: usize, conf: &ChannelConfiguration) -> Result<()> {
        let index = objects::settings_index(channel)?;
        let enable = conf.enable_custom_settings;
        self.download(
            index,
            settings::ENABLE_CUSTOM,
            enable as u8,
            Step::EnableCustomSettings,
            None,
        )?;
        if !enable {
            return Ok(());
        }
        log::info!(
            "slave {}: channel {}: {} pixels, chip {}, color format {}, data rate {}",
            u16::from(self.slave()),
            channel,
            conf.pixel_count,
            conf.chip_type,
            conf.color_format,
            conf.data_rate
        );
        self.download(index, settings::PIXEL_COUNT, conf.pixel_count, Step::PixelCount, None)?;
        self.download(index, settings::CHIP_TYPE, conf.chip_type, Step::ChipType, None)?;
        self.download(index, settings::COLOR_FORMAT, conf.color_format, Step::ColorFormat, None)?;
        self.download(index, settings::DATA_RATE, conf.data_rate, Step::DataRate, None)
    }
}
