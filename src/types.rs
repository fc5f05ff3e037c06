// Part of el2574. Copyright 2023-2024 by the authors.
// This work is dual-licensed under Apache 2.0 and MIT terms.

use derive_new::new;
use std::{fmt, io};
use thiserror::Error;

pub use ethercat_types::{SdoIdx, SlavePos};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid channel {0}, the terminal has channels 0 to 3")]
    InvalidChannel(i64),
    #[error("SDO download 0x{index:04X}:{sub_index:02X} to slave {slave} failed ({step}): {source}")]
    TransferFailed {
        slave: u16,
        index: u16,
        sub_index: u8,
        step: Step,
        /// Segment being transferred, if the download belonged to one.
        segment: Option<u16>,
        #[source]
        source: io::Error,
    },
    #[error("Configuration of slave {slave} incomplete, {} channel(s) failed", .failures.len())]
    ConfigurationIncomplete {
        slave: u16,
        failures: Vec<ChannelFailure>,
    },
    #[error("PDO assignment 0x{index:04X} already holds the maximum number of entries")]
    PdoListFull { index: u16 },
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        io::Error::new(io::ErrorKind::Other, e)
    }
}

impl Error {
    /// Segment index carried by a failed segment transfer.
    pub fn segment_index(&self) -> Option<u16> {
        match self {
            Error::TransferFailed { segment, .. } => *segment,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// One failed channel of a configuration pass.
#[derive(Debug, new)]
pub struct ChannelFailure {
    pub channel: usize,
    pub error: Error,
}

/// The protocol step a single SDO download belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    EnableCustomSettings,
    PixelCount,
    ChipType,
    ColorFormat,
    DataRate,
    PdoClear,
    PdoAssign,
    Execute,
    Write,
    SegmentIndex,
    Element(u8),
    Update,
    Send,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Step::EnableCustomSettings => f.write_str("enable custom settings"),
            Step::PixelCount => f.write_str("pixel count"),
            Step::ChipType => f.write_str("chip type"),
            Step::ColorFormat => f.write_str("color format"),
            Step::DataRate => f.write_str("data rate"),
            Step::PdoClear => f.write_str("clear PDO assignment"),
            Step::PdoAssign => f.write_str("write PDO assignment"),
            Step::Execute => f.write_str("execute"),
            Step::Write => f.write_str("write"),
            Step::SegmentIndex => f.write_str("segment index"),
            Step::Element(n) => write!(f, "segment element {}", n),
            Step::Update => f.write_str("update"),
            Step::Send => f.write_str("send"),
        }
    }
}

/// Number of values in one LED segment.
pub const SEGMENT_SIZE: usize = 8;

/// Eight drive values written to the terminal in one handshake.
pub type Segment = [u32; SEGMENT_SIZE];

/// Length and width of the square pixel grid driven per channel.
pub const GRID_DIMENSION: usize = 32;

/// Split a flat pixel buffer into segments. The last segment is padded
/// with zeros.
pub fn segments_from_pixels(pixels: &[u32]) -> Vec<Segment> {
    pixels
        .chunks(SEGMENT_SIZE)
        .map(|chunk| {
            let mut seg = [0; SEGMENT_SIZE];
            seg[..chunk.len()].copy_from_slice(chunk);
            seg
        })
        .collect()
}

#[test]
fn test_segments_from_pixels() {
    let grid: Vec<u32> = (0..(GRID_DIMENSION * GRID_DIMENSION) as u32).collect();
    let segs = segments_from_pixels(&grid);
    assert_eq!(segs.len(), 128);
    assert_eq!(segs[0], [0, 1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(segs[127][7], 1023);

    let segs = segments_from_pixels(&[9, 9, 9]);
    assert_eq!(segs, vec![[9, 9, 9, 0, 0, 0, 0, 0]]);

    assert!(segments_from_pixels(&[]).is_empty());
}

#[test]
fn test_error_display() {
    let e = Error::TransferFailed {
        slave: 1,
        index: 0x7001,
        sub_index: 0x15,
        step: Step::Element(4),
        segment: Some(3),
        source: io::Error::new(io::ErrorKind::TimedOut, "timeout"),
    };
    assert_eq!(
        e.to_string(),
        "SDO download 0x7001:15 to slave 1 failed (segment element 4): timeout"
    );
    assert_eq!(e.segment_index(), Some(3));
    assert_eq!(Error::InvalidChannel(-1).segment_index(), None);
}
