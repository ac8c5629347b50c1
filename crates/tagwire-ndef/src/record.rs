use crate::{header::NdefHeader, ndef_type::NdefType};

/// One record as it sits on the wire, before any type dispatch
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct NdefRecord {
    pub header: NdefHeader,
    pub type_: Vec<u8>,
    pub id: Option<Vec<u8>>,
    pub payload: Vec<u8>,
}

impl NdefRecord {
    /// Build a record with a header matching the given fields
    ///
    /// Message level flags (begin, end) are left unset, they are assigned when the
    /// record is placed into a message
    pub fn new(
        type_name_format: NdefType,
        type_: Vec<u8>,
        id: Option<Vec<u8>>,
        payload: Vec<u8>,
    ) -> Self {
        let header = NdefHeader {
            message_begin: false,
            message_end: false,
            chunked: false,
            short_record: payload.len() <= u8::MAX as usize,
            has_id_length: id.is_some(),
            type_name_format,
            type_length: type_.len().min(u8::MAX as usize) as u8,
            payload_length: payload.len().min(u32::MAX as usize) as u32,
            id_length: id.as_ref().map(|id| id.len().min(u8::MAX as usize) as u8),
        };

        Self {
            header,
            type_,
            id,
            payload,
        }
    }

    /// The record with TNF empty, used to represent a message without content
    pub fn empty() -> Self {
        Self::new(NdefType::Empty, Vec::new(), None, Vec::new())
    }

    pub fn tnf(&self) -> NdefType {
        self.header.type_name_format
    }

    /// Type field decoded as UTF-8, `None` if it is not valid UTF-8
    pub fn type_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.type_).ok()
    }
}

// only used for uniffi
mod ffi {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, uniffi::Object)]
    pub struct NdefRecordReader {
        record: NdefRecord,
    }

    #[uniffi::export]
    impl NdefRecordReader {
        #[uniffi::constructor]
        pub fn new(record: NdefRecord) -> Self {
            Self { record }
        }

        pub fn type_(&self) -> Option<String> {
            self.record.type_str().map(ToString::to_string)
        }

        pub fn id(&self) -> Option<String> {
            let id = self.record.id.as_ref()?;
            String::from_utf8(id.clone()).ok()
        }

        pub fn payload_hex(&self) -> String {
            hex::encode(&self.record.payload)
        }
    }
}
