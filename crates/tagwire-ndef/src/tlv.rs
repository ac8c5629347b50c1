//! Type 2 tag memory framing, the NDEF message sits inside a TLV block after the
//! four header pages (UID, lock bytes, capability container)

use winnow::{
    ModalResult, Parser,
    binary::{be_u8, be_u16},
    token::take,
};

use crate::{
    NdefError,
    parser::stream::{self, Stream, StreamExt as _},
};

/// Byte offset of the data area in Type 2 tag memory
pub const TYPE_2_DATA_OFFSET: usize = 16;

const TLV_NULL: u8 = 0x00;
const TLV_NDEF_MESSAGE: u8 = 0x03;
const TLV_TERMINATOR: u8 = 0xFE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlvBlock<'a> {
    pub tag: u8,
    pub value: &'a [u8],
}

/// Find the NDEF message TLV in a full Type 2 memory dump
pub fn find_ndef_message(memory: &[u8]) -> Result<&[u8], NdefError> {
    let data = memory.get(TYPE_2_DATA_OFFSET..).ok_or_else(|| {
        NdefError::InvalidTlv(format!("memory is only {} bytes", memory.len()))
    })?;

    let mut input = stream::new(data);

    while !input.is_empty() {
        let block = parse_tlv(&mut input)
            .map_err(|error| NdefError::InvalidTlv(format!("error parsing tlv: {error}")))?;

        match block.tag {
            TLV_NDEF_MESSAGE => return Ok(block.value),
            TLV_TERMINATOR => break,
            _ => tracing::trace!("skipping tlv block {:#04x}", block.tag),
        }
    }

    Err(NdefError::InvalidTlv("no ndef message tlv found".into()))
}

pub fn parse_tlv<'i>(input: &mut Stream<'i>) -> ModalResult<TlvBlock<'i>> {
    let tag = be_u8.parse_next(input)?;

    // null and terminator blocks have no length field
    if tag == TLV_NULL || tag == TLV_TERMINATOR {
        return Ok(TlvBlock { tag, value: &[] });
    }

    let length = parse_length(input)?;
    let value = take(length as usize).parse_next(input)?;

    Ok(TlvBlock { tag, value })
}

fn parse_length(input: &mut Stream<'_>) -> ModalResult<u16> {
    let length_indicator = be_u8.parse_next(input)?;

    if length_indicator == 0xFF {
        be_u16.parse_next(input)
    } else {
        Ok(length_indicator as u16)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn memory(data_area: &[u8]) -> Vec<u8> {
        let mut memory = vec![0; TYPE_2_DATA_OFFSET];
        // capability container, ndef mapping version 1.0, 48 byte data area
        memory[12..16].copy_from_slice(&[0xE1, 0x10, 0x06, 0x00]);
        memory.extend_from_slice(data_area);
        memory
    }

    #[test]
    fn ndef_tlv_after_lock_control_and_nulls() {
        let memory = memory(&[
            0x01, 0x03, 0xA0, 0x0C, 0x34, // lock control
            0x00, 0x00, // padding
            0x03, 0x03, 0xD0, 0x00, 0x00, // ndef message
            0xFE,
        ]);

        assert_eq!(find_ndef_message(&memory).unwrap(), &[0xD0, 0x00, 0x00]);
    }

    #[test]
    fn three_byte_length_form() {
        let mut data = vec![0x03, 0xFF, 0x01, 0x00];
        data.extend(vec![0xAB; 256]);

        let memory = memory(&data);
        assert_eq!(find_ndef_message(&memory).unwrap().len(), 256);
    }

    #[test]
    fn terminator_before_ndef_is_an_error() {
        let memory = memory(&[0xFE, 0x03, 0x03, 0xD0, 0x00, 0x00]);
        assert!(matches!(find_ndef_message(&memory), Err(NdefError::InvalidTlv(_))));
    }

    #[test]
    fn short_memory_is_an_error() {
        assert!(matches!(find_ndef_message(&[0; 8]), Err(NdefError::InvalidTlv(_))));
    }
}
