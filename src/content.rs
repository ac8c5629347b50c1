//! Resolving arbitrary objects into (bytes, MIME type) pairs for NDEF MIME records

use std::{any::Any, fmt::Debug, sync::Arc};

use tagwire_ndef::{EncodeError, NdefContent, NdefMessage};
use tracing::debug;

use crate::impl_default_for;

pub const MIME_JSON: &str = "application/json";
pub const MIME_OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedContent {
    pub data: Vec<u8>,
    pub mime_type: String,
}

pub trait ContentEncoder: Debug + Send + Sync {
    /// `None` when this encoder does not handle the item
    fn encode(&self, item: &(dyn Any + Send + Sync)) -> Option<Result<EncodedContent, EncodeError>>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonContentEncoder;

impl ContentEncoder for JsonContentEncoder {
    fn encode(&self, item: &(dyn Any + Send + Sync)) -> Option<Result<EncodedContent, EncodeError>> {
        let value = item.downcast_ref::<serde_json::Value>()?;
        let encoded = serde_json::to_vec(value)
            .map(|data| EncodedContent { data, mime_type: MIME_JSON.to_string() })
            .map_err(|error| EncodeError::Unencodable(error.to_string()));

        Some(encoded)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BinaryContentEncoder;

impl ContentEncoder for BinaryContentEncoder {
    fn encode(&self, item: &(dyn Any + Send + Sync)) -> Option<Result<EncodedContent, EncodeError>> {
        let data = item.downcast_ref::<Vec<u8>>()?;
        Some(Ok(EncodedContent {
            data: data.clone(),
            mime_type: MIME_OCTET_STREAM.to_string(),
        }))
    }
}

/// Ordered encoders, the first one that handles an item wins
#[derive(Debug, Clone)]
pub struct ContentEncoderRegistry {
    encoders: Vec<Arc<dyn ContentEncoder>>,
}

impl_default_for!(ContentEncoderRegistry);

impl ContentEncoderRegistry {
    /// Registry with the JSON and raw bytes encoders
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(JsonContentEncoder);
        registry.register(BinaryContentEncoder);
        registry
    }

    pub fn empty() -> Self {
        Self { encoders: Vec::new() }
    }

    pub fn register(&mut self, encoder: impl ContentEncoder + 'static) {
        self.encoders.push(Arc::new(encoder));
    }

    pub fn len(&self) -> usize {
        self.encoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty()
    }

    pub fn try_encode(
        &self,
        item: &(dyn Any + Send + Sync),
        type_name: &str,
    ) -> Result<EncodedContent, EncodeError> {
        self.encoders
            .iter()
            .find_map(|encoder| encoder.encode(item))
            .unwrap_or_else(|| {
                debug!("no content encoder for {type_name}");
                Err(EncodeError::Unencodable(format!("no encoder registered for {type_name}")))
            })
    }
}

/// One item to write to a tag, becomes exactly one record
pub enum WritableItem {
    /// Must be absolute
    Uri(String),
    Text(String),
    Mime { data: Vec<u8>, mime_type: String },
    /// Anything else, resolved through a [`ContentEncoderRegistry`]
    Object { type_name: &'static str, value: Box<dyn Any + Send + Sync> },
}

impl WritableItem {
    pub fn object<T: Any + Send + Sync>(value: T) -> Self {
        Self::Object {
            type_name: std::any::type_name::<T>(),
            value: Box::new(value),
        }
    }

    pub fn resolve(self, registry: &ContentEncoderRegistry) -> Result<NdefContent, EncodeError> {
        let content = match self {
            Self::Uri(uri) => NdefContent::Uri { uri },
            Self::Text(text) => NdefContent::Text { text },
            Self::Mime { data, mime_type } => NdefContent::Mime { data, mime_type },
            Self::Object { type_name, value } => {
                let EncodedContent { data, mime_type } =
                    registry.try_encode(&*value, type_name)?;
                NdefContent::Mime { data, mime_type }
            }
        };

        Ok(content)
    }
}

impl Debug for WritableItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uri(uri) => f.debug_tuple("Uri").field(uri).finish(),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Mime { data, mime_type } => f
                .debug_struct("Mime")
                .field("mime_type", mime_type)
                .field("len", &data.len())
                .finish(),
            Self::Object { type_name, .. } => f.debug_tuple("Object").field(type_name).finish(),
        }
    }
}

impl From<NdefContent> for WritableItem {
    fn from(content: NdefContent) -> Self {
        match content {
            NdefContent::Uri { uri } => Self::Uri(uri),
            NdefContent::Text { text } => Self::Text(text),
            NdefContent::Mime { data, mime_type } => Self::Mime { data, mime_type },
        }
    }
}

/// Resolve every item in order, the first failure fails the whole message
pub fn create_message(
    items: Vec<WritableItem>,
    registry: &ContentEncoderRegistry,
) -> Result<NdefMessage, EncodeError> {
    let records = items
        .into_iter()
        .map(|item| item.resolve(registry)?.into_record())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NdefMessage::new(records))
}
