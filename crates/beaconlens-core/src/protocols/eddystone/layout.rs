pub const AD_TYPE_FLAGS: u8 = 0x01;
pub const AD_TYPE_16BIT_UUID_COMPLETE: u8 = 0x03;
pub const AD_TYPE_SERVICE_DATA: u8 = 0x16;

pub const EDDYSTONE_SERVICE_UUID: u16 = 0xFEAA;

pub const FRAME_TYPE_UID: u8 = 0x00;
pub const FRAME_TYPE_URL: u8 = 0x10;
pub const FRAME_TYPE_TLM: u8 = 0x20;

pub const UID_NAMESPACE_LEN: usize = 10;
pub const UID_INSTANCE_LEN: usize = 6;
pub const UID_DATA_LEN: usize = 1 + UID_NAMESPACE_LEN + UID_INSTANCE_LEN;
pub const UID_RFU_LEN: usize = 2;

pub const URL_TX_POWER_LEN: usize = 1;
pub const URL_MAX_ENCODED_LEN: usize = 17;
pub const URL_MAX_DECODED_LEN: usize = 100;

pub const TLM_FIXED_LEN: usize = 13;
pub const TLM_MAX_LEN: usize = 14;
