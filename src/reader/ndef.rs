use std::sync::Arc;

use tagwire_ndef::{NdefMessage, TypedRecord};
use tracing::{debug, info, warn};

use crate::{
    content::{self, ContentEncoderRegistry, WritableItem},
    error::{TagError, WriteError},
    impl_reader_lifecycle,
    session::TechnologySession,
    tag::Tag,
    technology::NdefTechnology,
};

type Result<T, E = TagError> = std::result::Result<T, E>;

/// Reads and writes the NDEF message of a formatted tag
#[derive(Debug)]
pub struct NdefReader {
    session: TechnologySession<dyn NdefTechnology>,
    registry: ContentEncoderRegistry,
}

impl_reader_lifecycle!(NdefReader, NdefTechnology);

impl NdefReader {
    pub fn new(tag: Tag, technology: Arc<dyn NdefTechnology>) -> Self {
        Self::with_registry(tag, technology, ContentEncoderRegistry::default())
    }

    pub fn with_registry(
        tag: Tag,
        technology: Arc<dyn NdefTechnology>,
        registry: ContentEncoderRegistry,
    ) -> Self {
        Self { session: TechnologySession::new(tag, technology), registry }
    }

    /// Decoded records of the current message, empty records and unknown types are skipped
    ///
    /// A message holding no records at all is a failed read, a lone empty record is not
    pub async fn get_message(&mut self) -> Result<Vec<TypedRecord>> {
        let technology = self.session.open_if_closed().await?;
        let bytes = technology
            .ndef_message()
            .await
            .map_err(|error| TagError::device_read(format!("unable to read ndef message: {error}")))?
            .ok_or_else(|| TagError::device_read("tag has no ndef message"))?;

        let message = NdefMessage::parse(&bytes)?;
        if message.is_empty() {
            return Err(TagError::device_read("ndef message has no records"));
        }

        let records = TypedRecord::from_message(message)?;
        debug!("read {} ndef records", records.len());

        Ok(records)
    }

    /// Replace the tag's message, `false` if anything failed and nothing was written
    pub async fn set_message(&mut self, items: Vec<WritableItem>) -> bool {
        match self.write_message(items).await {
            Ok(size) => {
                info!("wrote ndef message of {size} bytes");
                true
            }
            Err(error) => {
                warn!("unable to write ndef message: {error}");
                false
            }
        }
    }

    async fn write_message(&mut self, items: Vec<WritableItem>) -> Result<usize, WriteError> {
        let technology = self.session.open_if_closed().await?;

        let message = content::create_message(items, &self.registry)?;
        let bytes = message.to_bytes()?;

        if let Some(capacity) = technology.max_size() {
            if bytes.len() > capacity as usize {
                return Err(WriteError::TooLarge { size: bytes.len(), capacity });
            }
        }

        let size = bytes.len();
        technology.write_ndef_message(bytes).await?;

        Ok(size)
    }

    pub async fn is_writable(&mut self) -> Result<bool> {
        Ok(self.session.open_if_closed().await?.is_writable())
    }

    pub async fn can_make_read_only(&mut self) -> Result<bool> {
        Ok(self.session.open_if_closed().await?.can_make_read_only())
    }

    /// Permanently lock the tag, `false` if the tag refused or the lock failed
    pub async fn make_read_only(&mut self) -> bool {
        let technology = match self.session.open_if_closed().await {
            Ok(technology) => technology,
            Err(error) => {
                warn!("unable to make tag read only: {error}");
                return false;
            }
        };

        match technology.make_read_only().await {
            Ok(locked) => locked,
            Err(error) => {
                warn!("unable to make tag read only: {error}");
                false
            }
        }
    }
}
