//! Eddystone advertisement decoding.
//!
//! The parser walks the advertisement's AD-structure sequence, validates
//! the Eddystone service identifier, then decodes the service-data payload
//! as one of the UID, URL, or TLM frame kinds. Length bounds are enforced
//! before every field read; malformed input yields a typed error, never a
//! partial result or an out-of-bounds access. Byte offsets and protocol
//! constants live in `layout`, byte-access conventions in `reader`, the
//! compressed-URL tables in `url`.
//!
//! Version française (résumé):
//! Le module décode les trames Eddystone (UID, URL, TLM) avec validations
//! strictes (identifiant de service, longueurs, tables d'encodage bornées).
//! Les positions sont dans `layout`, les conventions dans `reader`, les
//! tables URL dans `url`.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod url;

pub use error::EddystoneError;
pub use parser::{
    DecodedAdvertisement, DecodedFrame, FrameKind, TlmFrame, UidFrame, UrlFrame, decode,
    decode_advertisement,
};
pub use url::expand_url;
