use crate::ndef_type::NdefType;

const MESSAGE_BEGIN: u8 = 0x80;
const MESSAGE_END: u8 = 0x40;
const CHUNKED: u8 = 0x20;
const SHORT_RECORD: u8 = 0x10;
const ID_LENGTH_PRESENT: u8 = 0x08;

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct NdefHeader {
    pub message_begin: bool,
    pub message_end: bool,
    pub chunked: bool,
    pub short_record: bool,
    pub has_id_length: bool,
    pub type_name_format: NdefType,
    pub type_length: u8,
    pub payload_length: u32,
    pub id_length: Option<u8>,
}

impl NdefHeader {
    /// The flags + TNF byte that starts every record on the wire
    pub fn flags_byte(&self) -> u8 {
        let mut byte = self.type_name_format.bits();

        if self.message_begin {
            byte |= MESSAGE_BEGIN;
        }

        if self.message_end {
            byte |= MESSAGE_END;
        }

        if self.chunked {
            byte |= CHUNKED;
        }

        if self.short_record {
            byte |= SHORT_RECORD;
        }

        if self.has_id_length {
            byte |= ID_LENGTH_PRESENT;
        }

        byte
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_short_well_known_record_flags() {
        let header = NdefHeader {
            message_begin: true,
            message_end: true,
            chunked: false,
            short_record: true,
            has_id_length: false,
            type_name_format: NdefType::WellKnown,
            type_length: 1,
            payload_length: 13,
            id_length: None,
        };

        assert_eq!(header.flags_byte(), 0xD1);
    }
}
