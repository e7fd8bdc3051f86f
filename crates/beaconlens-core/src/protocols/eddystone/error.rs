use thiserror::Error;

use super::parser::FrameKind;

/// Errors returned by Eddystone advertisement decoding.
///
/// Note: the scanner aborts at the first disqualifying condition; a
/// non-matching service or frame type is a hard stop, never a
/// skip-and-continue.
#[derive(Debug, Error)]
pub enum EddystoneError {
    #[error("advertisement truncated: need {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },
    #[error("unrecognized service uuid {uuid:#06x}")]
    UnrecognizedService { uuid: u16 },
    #[error("unrecognized frame type {value:#04x}")]
    UnrecognizedFrame { value: u8 },
    #[error("no Eddystone service data found")]
    NotFound,
    #[error("invalid {kind} payload length {length}")]
    InvalidLength { kind: FrameKind, length: usize },
    #[error("url byte {value:#04x} outside the encoding tables")]
    InvalidIndex { value: u8 },
}
