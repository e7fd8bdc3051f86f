use super::error::EddystoneError;
use super::layout;

pub const URL_PREFIXES: [&str; 4] = ["http://www.", "https://www.", "http://", "https://"];

/// Seven suffixes with a trailing slash followed by the same seven without,
/// in the protocol-defined table order.
pub const URL_SUFFIXES: [&str; 14] = [
    ".com/", ".org/", ".edu/", ".net/", ".info/", ".biz/", ".gov/", ".com", ".org", ".edu",
    ".net", ".info", ".biz", ".gov",
];

/// Expand a compressed URL into its full text.
///
/// The scheme byte selects a prefix; each body byte either indexes the
/// suffix table (0..=13) or passes through as one printable ASCII
/// character. Reserved bytes (0x0E..=0x20, 0x7F..) are rejected rather
/// than looked up past the table bounds. An empty body is valid and
/// yields just the prefix.
pub fn expand_url(scheme: u8, body: &[u8]) -> Result<String, EddystoneError> {
    let prefix = URL_PREFIXES
        .get(scheme as usize)
        .ok_or(EddystoneError::InvalidIndex { value: scheme })?;

    let mut url = String::with_capacity(layout::URL_MAX_DECODED_LEN);
    url.push_str(prefix);
    for &byte in body {
        match URL_SUFFIXES.get(byte as usize) {
            Some(suffix) => url.push_str(suffix),
            None if byte.is_ascii_graphic() => url.push(byte as char),
            None => return Err(EddystoneError::InvalidIndex { value: byte }),
        }
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::expand_url;
    use crate::protocols::eddystone::error::EddystoneError;

    #[test]
    fn empty_body_yields_prefix() {
        assert_eq!(expand_url(0, &[]).unwrap(), "http://www.");
    }

    #[test]
    fn suffix_index_expands() {
        assert_eq!(expand_url(3, &[0x00]).unwrap(), "https://.com/");
    }

    #[test]
    fn plain_bytes_pass_through() {
        assert_eq!(expand_url(1, b"ex").unwrap(), "https://www.ex");
    }

    #[test]
    fn suffixes_and_text_interleave() {
        let body = [b'g', b'o', b'o', 0x07, b'/', b'x'];
        assert_eq!(expand_url(2, &body).unwrap(), "http://goo.com/x");
    }

    #[test]
    fn scheme_out_of_range() {
        let err = expand_url(4, &[]).unwrap_err();
        assert!(matches!(err, EddystoneError::InvalidIndex { value: 4 }));
    }

    #[test]
    fn reserved_body_byte_rejected() {
        for byte in [0x0Eu8, 0x20, 0x7F, 0x80, 0xFF] {
            let err = expand_url(0, &[byte]).unwrap_err();
            assert!(matches!(err, EddystoneError::InvalidIndex { value } if value == byte));
        }
    }
}
