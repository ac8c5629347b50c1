use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    content::{self, ContentEncoderRegistry, WritableItem},
    error::WriteError,
    impl_reader_lifecycle,
    session::TechnologySession,
    tag::Tag,
    technology::NdefFormatableTechnology,
};

/// Formats a blank tag for NDEF, writing an initial message
#[derive(Debug)]
pub struct NdefFormatableReader {
    session: TechnologySession<dyn NdefFormatableTechnology>,
    registry: ContentEncoderRegistry,
}

impl_reader_lifecycle!(NdefFormatableReader, NdefFormatableTechnology);

impl NdefFormatableReader {
    pub fn new(tag: Tag, technology: Arc<dyn NdefFormatableTechnology>) -> Self {
        Self::with_registry(tag, technology, ContentEncoderRegistry::default())
    }

    pub fn with_registry(
        tag: Tag,
        technology: Arc<dyn NdefFormatableTechnology>,
        registry: ContentEncoderRegistry,
    ) -> Self {
        Self { session: TechnologySession::new(tag, technology), registry }
    }

    /// `false` when formatting failed, the caller may retry with the tag still in the field
    pub async fn format(&mut self, read_only: bool, items: Vec<WritableItem>) -> bool {
        match self.try_format(read_only, items).await {
            Ok(()) => {
                info!("formatted tag, read only: {read_only}");
                true
            }
            Err(error) => {
                warn!("unable to format tag: {error}");
                false
            }
        }
    }

    async fn try_format(&mut self, read_only: bool, items: Vec<WritableItem>) -> Result<(), WriteError> {
        let technology = self.session.open_if_closed().await?;
        let bytes = content::create_message(items, &self.registry)?.to_bytes()?;

        match read_only {
            true => technology.format_read_only(bytes).await?,
            false => technology.format(bytes).await?,
        }

        Ok(())
    }
}
