//! Capabilities the host platform implements for each radio technology
//!
//! Primitive reads return `Ok(None)` when the platform handed back nothing, readers
//! turn that into [`TagError::DeviceRead`](crate::error::TagError::DeviceRead)

#[cfg(test)]
pub(crate) mod mock;

use std::fmt::Debug;

use async_trait::async_trait;

use crate::{error::TransportError, tag::TechnologyKind};

pub type Result<T, E = TransportError> = std::result::Result<T, E>;

/// Connection lifecycle shared by every technology handle
#[async_trait]
pub trait Technology: Debug + Send + Sync {
    fn kind(&self) -> TechnologyKind;

    fn is_connected(&self) -> bool;

    async fn connect(&self) -> Result<()>;

    async fn close(&self) -> Result<()>;

    /// Release the platform handle, never called twice
    fn dispose(&self);
}

#[async_trait]
pub trait MifareClassicTechnology: Technology {
    fn block_count(&self) -> u32;

    async fn read_block(&self, index: u32) -> Result<Option<Vec<u8>>>;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, uniffi::Enum)]
pub enum UltralightType {
    #[default]
    Ultralight,
    UltralightC,
    Unknown,
}

#[async_trait]
pub trait MifareUltralightTechnology: Technology {
    fn ultralight_type(&self) -> UltralightType;

    /// Reads starting at `page_offset`, platforms usually return four pages at once
    async fn read_pages(&self, page_offset: u32) -> Result<Option<Vec<u8>>>;
}

#[async_trait]
pub trait IsoDepTechnology: Technology {
    async fn hi_layer_response(&self) -> Result<Option<Vec<u8>>>;

    async fn historical_bytes(&self) -> Result<Option<Vec<u8>>>;

    async fn transceive(&self, command: Vec<u8>) -> Result<Option<Vec<u8>>>;
}

#[async_trait]
pub trait NfcATechnology: Technology {
    async fn atqa(&self) -> Result<Option<Vec<u8>>>;

    async fn sak(&self) -> Result<Option<i16>>;
}

#[async_trait]
pub trait NfcBTechnology: Technology {
    async fn application_data(&self) -> Result<Option<Vec<u8>>>;

    async fn protocol_info(&self) -> Result<Option<Vec<u8>>>;
}

#[async_trait]
pub trait NfcFTechnology: Technology {
    async fn manufacturer(&self) -> Result<Option<Vec<u8>>>;

    async fn system_code(&self) -> Result<Option<Vec<u8>>>;
}

#[async_trait]
pub trait NfcVTechnology: Technology {
    async fn dsf_id(&self) -> Result<Option<i8>>;

    async fn response_flags(&self) -> Result<Option<i16>>;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum BarcodeType {
    Kovio,
    Unknown,
}

#[async_trait]
pub trait NfcBarcodeTechnology: Technology {
    async fn barcode(&self) -> Result<Option<Vec<u8>>>;

    async fn barcode_type(&self) -> Result<Option<BarcodeType>>;
}

#[async_trait]
pub trait NdefTechnology: Technology {
    /// Raw bytes of the message currently on the tag
    async fn ndef_message(&self) -> Result<Option<Vec<u8>>>;

    async fn write_ndef_message(&self, message: Vec<u8>) -> Result<()>;

    fn is_writable(&self) -> bool;

    fn can_make_read_only(&self) -> bool;

    async fn make_read_only(&self) -> Result<bool>;

    /// Capacity in bytes, if the platform knows it
    fn max_size(&self) -> Option<u32>;
}

#[async_trait]
pub trait NdefFormatableTechnology: Technology {
    async fn format(&self, message: Vec<u8>) -> Result<()>;

    async fn format_read_only(&self, message: Vec<u8>) -> Result<()>;
}
