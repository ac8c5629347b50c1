use winnow::error::{ErrMode, Needed};

use crate::{
    EncodeError, NdefError,
    encoder::encode_ndef_message,
    parser::{self, stream},
    record::NdefRecord,
};

/// An ordered list of records, order is kept through parsing and encoding
#[derive(Debug, Clone, Default, PartialEq, Eq, uniffi::Record)]
pub struct NdefMessage {
    pub records: Vec<NdefRecord>,
}

type Result<T, E = NdefError> = std::result::Result<T, E>;

impl NdefMessage {
    pub fn new(records: Vec<NdefRecord>) -> Self {
        Self { records }
    }

    /// Parse a complete NDEF message, zero bytes is an empty message
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }

        let mut input = stream::new(bytes);
        let records = parser::parse_ndef_message(&mut input).map_err(|error| match error {
            ErrMode::Incomplete(Needed::Size(needed)) => NdefError::Truncated {
                needed: Some(needed.get() as u64),
            },
            ErrMode::Incomplete(Needed::Unknown) => NdefError::Truncated { needed: None },
            error => NdefError::ParsingError(format!("error parsing message: {error}")),
        })?;

        Ok(Self { records })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        encode_ndef_message(&self.records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NdefRecord> {
        self.records.iter()
    }
}

impl IntoIterator for NdefMessage {
    type Item = NdefRecord;
    type IntoIter = std::vec::IntoIter<NdefRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl From<Vec<NdefRecord>> for NdefMessage {
    fn from(records: Vec<NdefRecord>) -> Self {
        Self::new(records)
    }
}
