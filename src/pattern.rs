// Part of el2574. Copyright 2023-2024 by the authors.
// This work is dual-licensed under Apache 2.0 and MIT terms.

use crate::terminal::Terminal;
use crate::transport::SdoTransport;
use crate::types::{Result, Segment};

pub const CHECKER_EVEN: Segment = [0, 255, 0, 255, 0, 255, 0, 255];
pub const CHECKER_ODD: Segment = [255, 0, 255, 0, 255, 0, 255, 0];

impl<'m, T: SdoTransport> Terminal<'m, T> {
    /// Alternating test pattern over `segment_count` segments, followed by
    /// a single update and send.
    pub fn render_checkerboard(&mut self, channel: usize, segment_count: u16) -> Result<()> {
        for segment_index in 0..segment_count {
            let pattern = if segment_index % 2 == 0 {
                &CHECKER_EVEN
            } else {
                &CHECKER_ODD
            };
            self.write_segment(channel, segment_index, pattern)?;
        }
        self.commit_to_frame_buffer(channel)?;
        self.transmit_frame(channel)
    }
}
