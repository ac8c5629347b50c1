use std::sync::Arc;

use tagwire_ndef::{NdefMessage, TypedRecord, tlv};
use tracing::debug;

use super::require;
use crate::{
    consts::{BYTES_PER_PAGE, ULTRALIGHT_C_TOTAL_BYTES, ULTRALIGHT_TOTAL_BYTES},
    error::TagError,
    impl_reader_lifecycle,
    session::TechnologySession,
    tag::Tag,
    technology::{MifareUltralightTechnology, UltralightType},
};

type Result<T, E = TagError> = std::result::Result<T, E>;

/// Memory size and page size of an Ultralight family tag
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UltralightLayout {
    pub total_bytes: usize,
    pub page_size: usize,
}

impl UltralightLayout {
    pub const fn for_type(ultralight_type: UltralightType) -> Self {
        let total_bytes = match ultralight_type {
            UltralightType::UltralightC => ULTRALIGHT_C_TOTAL_BYTES,
            UltralightType::Ultralight | UltralightType::Unknown => ULTRALIGHT_TOTAL_BYTES,
        };

        Self { total_bytes, page_size: BYTES_PER_PAGE }
    }
}

#[derive(Debug)]
pub struct MifareUltralightReader {
    session: TechnologySession<dyn MifareUltralightTechnology>,
    layout: Option<UltralightLayout>,
}

impl_reader_lifecycle!(MifareUltralightReader, MifareUltralightTechnology);

impl MifareUltralightReader {
    /// Layout is taken from the tag's reported subtype on first read
    pub fn new(tag: Tag, technology: Arc<dyn MifareUltralightTechnology>) -> Self {
        Self { session: TechnologySession::new(tag, technology), layout: None }
    }

    pub fn with_layout(
        tag: Tag,
        technology: Arc<dyn MifareUltralightTechnology>,
        layout: UltralightLayout,
    ) -> Self {
        Self { session: TechnologySession::new(tag, technology), layout: Some(layout) }
    }

    pub async fn layout(&mut self) -> Result<UltralightLayout> {
        if let Some(layout) = self.layout {
            return Ok(layout);
        }

        let technology = self.session.open_if_closed().await?;
        let layout = UltralightLayout::for_type(technology.ultralight_type());
        self.layout = Some(layout);

        Ok(layout)
    }

    /// Read the whole memory, copying only as many bytes of each page read as still needed
    pub async fn read_all_data(&mut self) -> Result<Vec<u8>> {
        let UltralightLayout { total_bytes, page_size } = self.layout().await?;
        if page_size == 0 {
            return Err(TagError::device_read("page size is zero"));
        }

        let technology = self.session.open_if_closed().await?;
        let mut data = vec![0u8; total_bytes];
        let mut offset = 0;

        while offset < total_bytes {
            let page = (offset / page_size) as u32;
            let read = require(technology.read_pages(page).await, "page data")?;

            let remaining = read.len().min(total_bytes - offset);
            if remaining == 0 {
                return Err(TagError::device_read(format!("page {page} returned no bytes")));
            }

            data[offset..offset + remaining].copy_from_slice(&read[..remaining]);
            offset += remaining;
        }

        debug!("read {total_bytes} bytes of ultralight memory");
        Ok(data)
    }

    /// Locate the NDEF TLV in the data area and decode it
    pub async fn read_ndef_message(&mut self) -> Result<Vec<TypedRecord>> {
        let memory = self.read_all_data().await?;
        let bytes = tlv::find_ndef_message(&memory)?;
        let message = NdefMessage::parse(bytes)?;

        Ok(TypedRecord::from_message(message)?)
    }
}
