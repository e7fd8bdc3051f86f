use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use super::{AdvertisementEvent, AdvertisementSource, SourceError};

/// Replays advertisements from a text dump, one per line.
///
/// Line grammar: whitespace-separated `HEX [ADDRESS [RSSI]]`. The hex
/// payload may use `:` separators and either case; the address token is
/// carried verbatim; the RSSI token is a decimal i8. Blank lines and `#`
/// comments are skipped.
pub struct HexDumpSource {
    lines: Lines<BufReader<File>>,
    line_no: u64,
    record: u64,
}

impl HexDumpSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
            line_no: 0,
            record: 0,
        })
    }
}

impl AdvertisementSource for HexDumpSource {
    fn next_advertisement(&mut self) -> Result<Option<AdvertisementEvent>, SourceError> {
        loop {
            let line = match self.lines.next() {
                Some(line) => line?,
                None => return Ok(None),
            };
            self.line_no += 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let event = parse_line(trimmed, self.line_no, self.record + 1)?;
            self.record += 1;
            return Ok(Some(event));
        }
    }
}

fn parse_line(line: &str, line_no: u64, record: u64) -> Result<AdvertisementEvent, SourceError> {
    let mut tokens = line.split_whitespace();
    let hex = tokens.next().ok_or_else(|| SourceError::Dump {
        line: line_no,
        message: "missing payload".to_string(),
    })?;
    let data = parse_hex_payload(hex).map_err(|err| SourceError::Dump {
        line: line_no,
        message: err.to_string(),
    })?;
    let address = tokens.next().map(str::to_string);
    let rssi = match tokens.next() {
        Some(token) => Some(token.parse::<i8>().map_err(|_| SourceError::Dump {
            line: line_no,
            message: format!("invalid rssi '{token}'"),
        })?),
        None => None,
    };
    if tokens.next().is_some() {
        return Err(SourceError::Dump {
            line: line_no,
            message: "unexpected trailing tokens".to_string(),
        });
    }
    Ok(AdvertisementEvent {
        record,
        address,
        rssi,
        data,
    })
}

/// Parse a hex payload token; `:` byte separators are tolerated.
pub fn parse_hex_payload(token: &str) -> Result<Vec<u8>, SourceError> {
    let digits: Vec<u8> = token.bytes().filter(|b| *b != b':').collect();
    if digits.len() % 2 != 0 {
        return Err(SourceError::Hex {
            message: format!("odd number of hex digits in '{token}'"),
        });
    }
    let mut data = Vec::with_capacity(digits.len() / 2);
    for pair in digits.chunks_exact(2) {
        let hi = hex_value(pair[0]).ok_or_else(|| invalid_digit(pair[0]))?;
        let lo = hex_value(pair[1]).ok_or_else(|| invalid_digit(pair[1]))?;
        data.push((hi << 4) | lo);
    }
    Ok(data)
}

fn hex_value(digit: u8) -> Option<u8> {
    (digit as char).to_digit(16).map(|value| value as u8)
}

fn invalid_digit(digit: u8) -> SourceError {
    SourceError::Hex {
        message: format!("invalid hex digit '{}'", digit as char),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_hex_payload, parse_line};
    use crate::source::SourceError;

    #[test]
    fn parse_hex_plain() {
        assert_eq!(parse_hex_payload("0201").unwrap(), vec![0x02, 0x01]);
    }

    #[test]
    fn parse_hex_mixed_case_and_separators() {
        assert_eq!(
            parse_hex_payload("aa:FE:0c").unwrap(),
            vec![0xAA, 0xFE, 0x0C]
        );
    }

    #[test]
    fn parse_hex_odd_count() {
        let err = parse_hex_payload("abc").unwrap_err();
        assert!(err.to_string().contains("odd number of hex digits"));
    }

    #[test]
    fn parse_hex_bad_digit() {
        let err = parse_hex_payload("zz").unwrap_err();
        assert!(err.to_string().contains("invalid hex digit 'z'"));
    }

    #[test]
    fn parse_line_payload_only() {
        let event = parse_line("020106", 1, 1).unwrap();
        assert_eq!(event.data, vec![0x02, 0x01, 0x06]);
        assert_eq!(event.address, None);
        assert_eq!(event.rssi, None);
    }

    #[test]
    fn parse_line_with_metadata() {
        let event = parse_line("020106 AA:BB:CC:DD:EE:01 -60", 3, 2).unwrap();
        assert_eq!(event.record, 2);
        assert_eq!(event.address.as_deref(), Some("AA:BB:CC:DD:EE:01"));
        assert_eq!(event.rssi, Some(-60));
    }

    #[test]
    fn parse_line_bad_rssi() {
        let err = parse_line("020106 addr notanumber", 7, 1).unwrap_err();
        assert!(matches!(err, SourceError::Dump { line: 7, .. }));
        assert!(err.to_string().contains("invalid rssi"));
    }

    #[test]
    fn parse_line_trailing_tokens() {
        let err = parse_line("020106 addr -60 extra", 2, 1).unwrap_err();
        assert!(err.to_string().contains("unexpected trailing tokens"));
    }
}
