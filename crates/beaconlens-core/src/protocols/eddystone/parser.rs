use serde::Serialize;

use super::error::EddystoneError;
use super::layout;
use super::reader::AdvReader;
use super::url::expand_url;

/// Which Eddystone interpretation applies to a service-data payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Uid,
    Url,
    Tlm,
}

impl FrameKind {
    fn from_byte(value: u8) -> Option<Self> {
        match value {
            layout::FRAME_TYPE_UID => Some(FrameKind::Uid),
            layout::FRAME_TYPE_URL => Some(FrameKind::Url),
            layout::FRAME_TYPE_TLM => Some(FrameKind::Tlm),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FrameKind::Uid => "uid",
            FrameKind::Url => "url",
            FrameKind::Tlm => "tlm",
        }
    }
}

impl std::fmt::Display for FrameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Eddystone-UID: calibrated power plus the namespace/instance identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UidFrame {
    pub ranging_data: i8,
    pub namespace_id: [u8; layout::UID_NAMESPACE_LEN],
    pub instance_id: [u8; layout::UID_INSTANCE_LEN],
}

impl UidFrame {
    /// Namespace bytes as uppercase colon-separated hex.
    pub fn namespace_hex(&self) -> String {
        hex_id(&self.namespace_id)
    }

    /// Instance bytes as uppercase colon-separated hex.
    pub fn instance_hex(&self) -> String {
        hex_id(&self.instance_id)
    }
}

fn hex_id(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(":")
}

/// Eddystone-URL: calibrated power plus the expanded URL text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlFrame {
    pub tx_power: i8,
    pub url: String,
}

/// Eddystone-TLM: beacon telemetry counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TlmFrame {
    pub version: u8,
    pub battery_millivolts: u16,
    pub temperature: f32,
    pub advertisement_count: u32,
    pub uptime_deciseconds: u32,
}

impl TlmFrame {
    /// Whole seconds since power-up (the counter ticks at 0.1 s).
    pub fn uptime_seconds(&self) -> u32 {
        self.uptime_deciseconds / 10
    }
}

/// One decoded Eddystone frame, owned by the caller; no field borrows
/// from the advertisement buffer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DecodedFrame {
    Uid(UidFrame),
    Url(UrlFrame),
    Tlm(TlmFrame),
}

impl DecodedFrame {
    pub fn kind(&self) -> FrameKind {
        match self {
            DecodedFrame::Uid(_) => FrameKind::Uid,
            DecodedFrame::Url(_) => FrameKind::Url,
            DecodedFrame::Tlm(_) => FrameKind::Tlm,
        }
    }
}

/// A fully decoded advertisement: the common header fields gathered while
/// scanning plus the single frame carried in the service data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedAdvertisement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u8>,
    pub service_uuid: u16,
    pub frame: DecodedFrame,
}

/// Decode one raw advertisement into its Eddystone frame.
pub fn decode(payload: &[u8]) -> Result<DecodedFrame, EddystoneError> {
    decode_advertisement(payload).map(|adv| adv.frame)
}

/// Decode one raw advertisement, keeping the scanned header fields.
///
/// Walks the AD-structure sequence until a service-data structure carrying
/// the Eddystone service identifier is found, then dispatches on the frame
/// type byte. Structures after the service data are never inspected; its
/// payload runs to the end of the buffer.
pub fn decode_advertisement(payload: &[u8]) -> Result<DecodedAdvertisement, EddystoneError> {
    let reader = AdvReader::new(payload);
    let mut flags = None;
    let mut pos = 0usize;

    loop {
        if pos >= payload.len() {
            return Err(EddystoneError::NotFound);
        }
        let ad_len = reader.read_u8(pos)? as usize;
        if ad_len == 0 {
            // Zero length marks early-termination padding; nothing follows.
            return Err(EddystoneError::NotFound);
        }
        let ad_type = reader.read_u8(pos + 1)?;
        let data = pos + 2;
        match ad_type {
            layout::AD_TYPE_FLAGS => {
                flags = Some(reader.read_u8(data)?);
            }
            layout::AD_TYPE_16BIT_UUID_COMPLETE => {
                let uuid = reader.read_u16_le(data)?;
                if uuid != layout::EDDYSTONE_SERVICE_UUID {
                    return Err(EddystoneError::UnrecognizedService { uuid });
                }
            }
            layout::AD_TYPE_SERVICE_DATA => {
                let uuid = reader.read_u16_le(data)?;
                if uuid != layout::EDDYSTONE_SERVICE_UUID {
                    return Err(EddystoneError::UnrecognizedService { uuid });
                }
                let frame_byte = reader.read_u8(data + 2)?;
                let kind = FrameKind::from_byte(frame_byte)
                    .ok_or(EddystoneError::UnrecognizedFrame { value: frame_byte })?;
                let frame = decode_frame(kind, reader.tail(data + 3)?)?;
                return Ok(DecodedAdvertisement {
                    flags,
                    service_uuid: uuid,
                    frame,
                });
            }
            _ => {}
        }
        // The length byte does not count itself; skip whole structures,
        // recognized or not.
        pos += 1 + ad_len;
    }
}

fn decode_frame(kind: FrameKind, payload: &[u8]) -> Result<DecodedFrame, EddystoneError> {
    match kind {
        FrameKind::Uid => decode_uid(payload),
        FrameKind::Url => decode_url(payload),
        FrameKind::Tlm => decode_tlm(payload),
    }
}

fn decode_uid(payload: &[u8]) -> Result<DecodedFrame, EddystoneError> {
    if payload.len() != layout::UID_DATA_LEN
        && payload.len() != layout::UID_DATA_LEN + layout::UID_RFU_LEN
    {
        return Err(EddystoneError::InvalidLength {
            kind: FrameKind::Uid,
            length: payload.len(),
        });
    }
    let reader = AdvReader::new(payload);
    let ranging_data = reader.read_u8(0)? as i8;
    let mut namespace_id = [0u8; layout::UID_NAMESPACE_LEN];
    namespace_id.copy_from_slice(reader.read_slice(1, layout::UID_NAMESPACE_LEN)?);
    let mut instance_id = [0u8; layout::UID_INSTANCE_LEN];
    instance_id.copy_from_slice(
        reader.read_slice(1 + layout::UID_NAMESPACE_LEN, layout::UID_INSTANCE_LEN)?,
    );
    if payload.len() == layout::UID_DATA_LEN + layout::UID_RFU_LEN {
        // Reserved-for-future-use bytes: read, then discarded.
        reader.read_slice(layout::UID_DATA_LEN, layout::UID_RFU_LEN)?;
    }
    Ok(DecodedFrame::Uid(UidFrame {
        ranging_data,
        namespace_id,
        instance_id,
    }))
}

fn decode_url(payload: &[u8]) -> Result<DecodedFrame, EddystoneError> {
    if payload.len().saturating_sub(layout::URL_TX_POWER_LEN) > layout::URL_MAX_ENCODED_LEN {
        return Err(EddystoneError::InvalidLength {
            kind: FrameKind::Url,
            length: payload.len(),
        });
    }
    let reader = AdvReader::new(payload);
    let tx_power = reader.read_u8(0)? as i8;
    let scheme = reader.read_u8(1)?;
    let url = expand_url(scheme, reader.tail(2)?)?;
    Ok(DecodedFrame::Url(UrlFrame { tx_power, url }))
}

fn decode_tlm(payload: &[u8]) -> Result<DecodedFrame, EddystoneError> {
    if payload.len() < layout::TLM_FIXED_LEN || payload.len() > layout::TLM_MAX_LEN {
        return Err(EddystoneError::InvalidLength {
            kind: FrameKind::Tlm,
            length: payload.len(),
        });
    }
    let reader = AdvReader::new(payload);
    let version = reader.read_u8(0)?;
    let battery_millivolts = reader.read_u16_be(1)?;
    let raw_temp = reader.read_u16_be(3)?;
    // Fixed point split per byte: signed integral high byte plus an
    // unsigned 1/256 fraction, not two's complement of the full 16 bits.
    let integral = (raw_temp >> 8) as u8 as i8;
    let fraction = f32::from((raw_temp & 0xFF) as u8) / 256.0;
    let temperature = f32::from(integral) + fraction;
    let advertisement_count = reader.read_u32_be(5)?;
    let uptime_deciseconds = reader.read_u32_be(9)?;
    Ok(DecodedFrame::Tlm(TlmFrame {
        version,
        battery_millivolts,
        temperature,
        advertisement_count,
        uptime_deciseconds,
    }))
}
