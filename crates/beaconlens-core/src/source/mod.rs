mod hexdump;

pub use hexdump::{HexDumpSource, parse_hex_payload};

use thiserror::Error;

/// One advertisement replayed from a capture, with the uninterpreted side
/// metadata the capturing device attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvertisementEvent {
    /// 1-based record number within the capture.
    pub record: u64,
    pub address: Option<String>,
    pub rssi: Option<i8>,
    pub data: Vec<u8>,
}

pub trait AdvertisementSource {
    fn next_advertisement(&mut self) -> Result<Option<AdvertisementEvent>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid payload hex: {message}")]
    Hex { message: String },
    #[error("dump parse error at line {line}: {message}")]
    Dump { line: u64, message: String },
}
