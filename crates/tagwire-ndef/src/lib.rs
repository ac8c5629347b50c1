uniffi::setup_scaffolding!();

pub mod content;
pub mod encoder;
pub mod ffi;
pub mod header;
pub mod message;
pub mod ndef_type;
pub mod parser;
pub mod payload;
pub mod record;
pub mod tlv;
pub mod typed;

pub use content::NdefContent;
pub use message::NdefMessage;
pub use ndef_type::NdefType;
pub use record::NdefRecord;
pub use typed::TypedRecord;

/// Errors reading an NDEF message or one of its payloads
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum NdefError {
    #[error("error parsing the NDEF message: {0}")]
    ParsingError(String),

    #[error("NDEF message is truncated, missing {needed:?} bytes")]
    Truncated { needed: Option<u64> },

    #[error("record type is not valid utf-8: {0}")]
    InvalidType(String),

    #[error("invalid text payload: {0}")]
    InvalidText(String),

    #[error("invalid tlv block: {0}")]
    InvalidTlv(String),
}

/// Errors turning content into NDEF records
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum EncodeError {
    #[error("uri is not absolute: {0}")]
    NonAbsoluteUri(String),

    #[error("invalid uri: {0}")]
    InvalidUri(String),

    #[error("unable to create text record: {0}")]
    InvalidText(String),

    #[error("mime type is empty")]
    EmptyMimeType,

    #[error("unable to encode content: {0}")]
    Unencodable(String),

    #[error("record {field} is too long: {length} bytes")]
    FieldTooLong { field: String, length: u64 },
}
