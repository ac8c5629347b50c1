use crate::impl_default_for;

/// MIFARE Classic block size
pub const BYTES_PER_BLOCK: usize = 16;

/// MIFARE Ultralight page size
pub const BYTES_PER_PAGE: usize = 4;

pub const ULTRALIGHT_TOTAL_BYTES: usize = 64;
pub const ULTRALIGHT_C_TOTAL_BYTES: usize = 192;

/// ISO 7816 status word for a successful command
pub const SW_SUCCESS: (u8, u8) = (0x90, 0x00);

impl_default_for!(NfcConst);

#[derive(Debug, Clone, uniffi::Object)]
pub struct NfcConst {
    pub bytes_per_block: u16,
    pub bytes_per_page: u16,
}

#[uniffi::export]
impl NfcConst {
    #[uniffi::constructor]
    pub fn new() -> Self {
        Self {
            bytes_per_block: BYTES_PER_BLOCK as u16,
            bytes_per_page: BYTES_PER_PAGE as u16,
        }
    }

    pub fn bytes_per_block(&self) -> u16 {
        self.bytes_per_block
    }

    pub fn bytes_per_page(&self) -> u16 {
        self.bytes_per_page
    }

    pub fn ultralight_total_bytes(&self, ultralight_c: bool) -> u16 {
        match ultralight_c {
            true => ULTRALIGHT_C_TOTAL_BYTES as u16,
            false => ULTRALIGHT_TOTAL_BYTES as u16,
        }
    }
}
