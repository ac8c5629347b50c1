use crate::{EncodeError, record::NdefRecord};

/// Serialize records into one NDEF message
///
/// Message begin/end and short record flags are recomputed, an empty slice is
/// written as a single empty record
pub fn encode_ndef_message(records: &[NdefRecord]) -> Result<Vec<u8>, EncodeError> {
    if records.is_empty() {
        return encode_ndef_message(&[NdefRecord::empty()]);
    }

    let mut bytes = Vec::new();
    let last = records.len() - 1;

    for (index, record) in records.iter().enumerate() {
        encode_record(&mut bytes, record, index == 0, index == last)?;
    }

    Ok(bytes)
}

fn encode_record(
    bytes: &mut Vec<u8>,
    record: &NdefRecord,
    message_begin: bool,
    message_end: bool,
) -> Result<(), EncodeError> {
    let type_length = field_length("type", record.type_.len(), u8::MAX as usize)?;
    let payload_length = field_length("payload", record.payload.len(), u32::MAX as usize)?;
    let id_length = match &record.id {
        Some(id) => Some(field_length("id", id.len(), u8::MAX as usize)?),
        None => None,
    };

    let mut header = record.header.clone();
    header.message_begin = message_begin;
    header.message_end = message_end;
    header.chunked = false;
    header.short_record = payload_length <= u8::MAX as usize;
    header.has_id_length = id_length.is_some();

    bytes.push(header.flags_byte());
    bytes.push(type_length as u8);

    if header.short_record {
        bytes.push(payload_length as u8);
    } else {
        bytes.extend_from_slice(&(payload_length as u32).to_be_bytes());
    }

    if let Some(id_length) = id_length {
        bytes.push(id_length as u8);
    }

    bytes.extend_from_slice(&record.type_);
    if let Some(id) = &record.id {
        bytes.extend_from_slice(id);
    }
    bytes.extend_from_slice(&record.payload);

    Ok(())
}

fn field_length(field: &'static str, length: usize, max: usize) -> Result<usize, EncodeError> {
    if length > max {
        return Err(EncodeError::FieldTooLong {
            field: field.to_string(),
            length: length as u64,
        });
    }

    Ok(length)
}
