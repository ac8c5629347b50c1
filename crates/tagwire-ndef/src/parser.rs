pub mod stream;

use stream::{Stream, StreamExt as _};
use winnow::{
    ModalResult, Parser,
    binary::{
        Endianness,
        bits::{bits, bool as take_bool, take as take_bits},
    },
    error::{ContextError, ErrMode},
    token::{any, take},
};

use crate::{header::NdefHeader, ndef_type::NdefType, record::NdefRecord};

/// Parse records until the one flagged message end, chunked records are reassembled
///
/// Bytes after the message end record are left in the stream
pub fn parse_ndef_message(input: &mut Stream<'_>) -> ModalResult<Vec<NdefRecord>> {
    let mut records = Vec::new();

    loop {
        let mut record = parse_ndef_record.parse_next(input)?;

        if record.header.chunked {
            parse_chunks(input, &mut record)?;
        }

        let message_end = record.header.message_end;
        records.push(record);

        // tolerate writers that forget the message end flag on the last record
        if message_end || input.is_empty() {
            break;
        }
    }

    Ok(records)
}

pub fn parse_ndef_record(input: &mut Stream<'_>) -> ModalResult<NdefRecord> {
    let header = parse_header.parse_next(input)?;
    let type_ = parse_type(input, header.type_length)?;
    let id = parse_id(input, header.id_length)?;
    let payload = parse_payload(input, header.payload_length)?;

    Ok(NdefRecord {
        header,
        type_,
        id,
        payload,
    })
}

// private
fn parse_chunks(input: &mut Stream<'_>, record: &mut NdefRecord) -> ModalResult<()> {
    loop {
        let chunk = parse_ndef_record.parse_next(input)?;

        // middle and terminating chunks carry no type of their own
        if chunk.header.type_name_format != NdefType::Unchanged || chunk.header.type_length != 0 {
            tracing::warn!(
                "chunk has type name format {:?}, expected unchanged",
                chunk.header.type_name_format
            );

            return Err(ErrMode::Cut(ContextError::new()));
        }

        record.payload.extend_from_slice(&chunk.payload);
        record.header.message_end = chunk.header.message_end;

        if !chunk.header.chunked {
            break;
        }
    }

    record.header.chunked = false;
    record.header.payload_length = record.payload.len() as u32;
    record.header.short_record = record.payload.len() <= u8::MAX as usize;

    Ok(())
}

fn parse_header_byte(input: &mut Stream<'_>) -> ModalResult<(bool, bool, bool, bool, bool, u8)> {
    bits::<_, _, ErrMode<ContextError>, _, _>((
        take_bool,
        take_bool,
        take_bool,
        take_bool,
        take_bool,
        take_bits(3_u8),
    ))
    .parse_next(input)
}

fn parse_header(input: &mut Stream<'_>) -> ModalResult<NdefHeader> {
    let (message_begin, message_end, chunked, short_record, has_id_length, type_name_format) =
        parse_header_byte(input)?;

    let type_length = winnow::binary::u8.parse_next(input)?;
    let type_name_format = NdefType::from_bits(type_name_format);

    let payload_length = if short_record {
        any.map(|x: u8| x as u32).parse_next(input)?
    } else {
        winnow::binary::u32(Endianness::Big).parse_next(input)?
    };

    let id_length = if has_id_length {
        Some(any.parse_next(input)?)
    } else {
        None
    };

    Ok(NdefHeader {
        message_begin,
        message_end,
        chunked,
        short_record,
        has_id_length,
        type_name_format,
        type_length,
        payload_length,
        id_length,
    })
}

fn parse_type(input: &mut Stream<'_>, type_length: u8) -> ModalResult<Vec<u8>> {
    take(type_length as usize)
        .map(|s: &[u8]| s.to_vec())
        .parse_next(input)
}

fn parse_id(input: &mut Stream<'_>, id_length: Option<u8>) -> ModalResult<Option<Vec<u8>>> {
    if let Some(id_len) = id_length {
        take(id_len as usize)
            .map(|s: &[u8]| Some(s.to_vec()))
            .parse_next(input)
    } else {
        Ok(None)
    }
}

fn parse_payload(input: &mut Stream<'_>, payload_length: u32) -> ModalResult<Vec<u8>> {
    take(payload_length as usize)
        .map(|s: &[u8]| s.to_vec())
        .parse_next(input)
}
