// Part of el2574. Copyright 2023-2024 by the authors.
// This work is dual-licensed under Apache 2.0 and MIT terms.

//! Frame buffer handshakes on the extended control objects (0x7001 to
//! 0x7031).
//!
//! Every command is an "execute" pulse followed by the command flag. A
//! segment lands in the staging buffer with execute + write, the segment
//! index and its eight elements; "update" moves the staging buffer into
//! the frame buffer and "send" pushes the frame buffer out to the LEDs.

use crate::objects::{self, control};
use crate::terminal::Terminal;
use crate::transport::SdoTransport;
use crate::types::{Result, Segment, Step};
use std::convert::TryFrom;

const TRUE: u8 = 1;

impl<'m, T: SdoTransport> Terminal<'m, T> {
    /// Write one segment into the staging buffer of `channel`.
    ///
    /// The first failed download aborts the segment; nothing is retried.
    pub fn write_segment(&mut self, channel: usize, segment_index: u16, elements: &Segment) -> Result<()> {
        let index = objects::control_index(channel)?;
        let seg = Some(segment_index);
        self.download(index, control::EXECUTE, TRUE, Step::Execute, seg)?;
        self.download(index, control::WRITE, TRUE, Step::Write, seg)?;
        self.download(index, control::SEGMENT_INDEX, segment_index, Step::SegmentIndex, seg)?;
        for (n, value) in (0u8..).zip(elements.iter()) {
            self.download(index, control::SEGMENT_ELEMENT + n, *value, Step::Element(n), seg)?;
        }
        Ok(())
    }

    /// Move everything written since the last update into the frame buffer.
    pub fn commit_to_frame_buffer(&mut self, channel: usize) -> Result<()> {
        self.pulse(channel, control::UPDATE, Step::Update)
    }

    /// Push the frame buffer out to the LED chain.
    pub fn transmit_frame(&mut self, channel: usize) -> Result<()> {
        self.pulse(channel, control::SEND, Step::Send)
    }

    /// Write `segments` with indices counting up from zero, then commit and
    /// transmit them as one frame.
    pub fn push_frame(&mut self, channel: usize, segments: &[Segment]) -> Result<()> {
        for (n, seg) in segments.iter().enumerate() {
            let segment_index = u16::try_from(n).map_err(|_| {
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "too many segments")
            })?;
            self.write_segment(channel, segment_index, seg)?;
        }
        self.commit_to_frame_buffer(channel)?;
        self.transmit_frame(channel)?;
        log::info!(
            "slave {}: sent {} segments on channel {}",
            u16::from(self.slave()),
            segments.len(),
            channel
        );
        Ok(())
    }

    fn pulse(&mut self, channel: usize, flag: u8, step: Step) -> Result<()> {
        let index = objects::control_index(channel)?;
        self.download(index, control::EXECUTE, TRUE, Step::Execute, None)?;
        self.download(index, flag, TRUE, step, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Download, Recorder};
    use crate::types::{Error, SlavePos};

    const SEG: Segment = [10, 11, 12, 13, 14, 15, 16, 17];

    #[test]
    fn segment_write_order() {
        let mut bus = Recorder::new();
        Terminal::new(&mut bus, SlavePos::from(1))
            .write_segment(1, 5, &SEG)
            .unwrap();
        let subs: Vec<u8> = bus.downloads.iter().map(|d| d.sub_index).collect();
        assert_eq!(
            subs,
            vec![0x01, 0x04, 0x09, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18]
        );
        assert!(bus.downloads.iter().all(|d| d.index == 0x7011 && !d.complete_access));
        assert_eq!(bus.downloads[0].data, vec![1]);
        assert_eq!(bus.downloads[1].data, vec![1]);
        assert_eq!(bus.downloads[2].data, vec![5, 0]);
        assert_eq!(bus.downloads[3].data, vec![10, 0, 0, 0]);
        assert_eq!(bus.downloads[10].data, vec![17, 0, 0, 0]);
    }

    #[test]
    fn invalid_channel_writes_nothing() {
        let mut bus = Recorder::new();
        let mut t = Terminal::new(&mut bus, SlavePos::from(1));
        assert!(matches!(t.write_segment(4, 0, &SEG), Err(Error::InvalidChannel(4))));
        assert!(matches!(t.commit_to_frame_buffer(4), Err(Error::InvalidChannel(4))));
        assert!(matches!(t.transmit_frame(9), Err(Error::InvalidChannel(9))));
        assert!(bus.downloads.is_empty());
    }

    #[test]
    fn failed_element_aborts_segment() {
        // execute, write, index, elements 0..3 succeed, element 4 fails
        let mut bus = Recorder::failing_at(&[7]);
        let err = Terminal::new(&mut bus, SlavePos::from(1))
            .write_segment(0, 12, &SEG)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::TransferFailed {
                step: Step::Element(4),
                sub_index: 0x15,
                segment: Some(12),
                ..
            }
        ));
        assert_eq!(err.segment_index(), Some(12));
        assert_eq!(bus.downloads.len(), 7);
        assert_eq!(bus.downloads.last().unwrap().sub_index, 0x14);
    }

    #[test]
    fn commit_and_transmit_pulses() {
        let mut bus = Recorder::new();
        let mut t = Terminal::new(&mut bus, SlavePos::from(3));
        t.commit_to_frame_buffer(2).unwrap();
        t.transmit_frame(2).unwrap();
        assert_eq!(
            bus.downloads,
            vec![
                Download::new(3, 0x7021, 0x01, false, vec![1]),
                Download::new(3, 0x7021, 0x03, false, vec![1]),
                Download::new(3, 0x7021, 0x01, false, vec![1]),
                Download::new(3, 0x7021, 0x02, false, vec![1]),
            ]
        );
    }

    #[test]
    fn repeated_transmit() {
        let mut bus = Recorder::new();
        let mut t = Terminal::new(&mut bus, SlavePos::from(1));
        t.transmit_frame(0).unwrap();
        t.transmit_frame(0).unwrap();
        assert_eq!(bus.downloads.len(), 4);
        assert_eq!(bus.downloads[..2], bus.downloads[2..]);
        assert_eq!(bus.addresses()[..2], [(0x7001, 0x01), (0x7001, 0x02)]);
    }

    #[test]
    fn failed_update_is_reported() {
        let mut bus = Recorder::failing_at(&[1]);
        let err = Terminal::new(&mut bus, SlavePos::from(1))
            .commit_to_frame_buffer(0)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::TransferFailed { step: Step::Update, segment: None, .. }
        ));
    }

    #[test]
    fn push_frame_commits_once() {
        let mut bus = Recorder::new();
        Terminal::new(&mut bus, SlavePos::from(1))
            .push_frame(3, &[SEG, SEG])
            .unwrap();
        assert_eq!(bus.downloads.len(), 2 * 11 + 4);
        assert_eq!(bus.downloads[2].data, vec![0, 0]);
        assert_eq!(bus.downloads[13].data, vec![1, 0]);
        let tail: Vec<u8> = bus.downloads[22..].iter().map(|d| d.sub_index).collect();
        assert_eq!(tail, vec![0x01, 0x03, 0x01, 0x02]);
    }

    #[test]
    fn push_frame_stops_before_commit() {
        let mut bus = Recorder::failing_at(&[15]);
        let err = Terminal::new(&mut bus, SlavePos::from(1))
            .push_frame(0, &[SEG, SEG])
            .unwrap_err();
        assert_eq!(err.segment_index(), Some(1));
        assert!(bus
            .downloads
            .iter()
            .all(|d| d.sub_index != 0x03 && d.sub_index != 0x02));
    }
}
