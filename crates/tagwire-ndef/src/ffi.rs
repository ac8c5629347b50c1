use crate::{
    EncodeError, NdefError, content::NdefContent, message::NdefMessage, typed::TypedRecord,
};

#[uniffi::export]
fn decode_ndef_message(bytes: Vec<u8>) -> Result<Vec<TypedRecord>, NdefError> {
    let message = NdefMessage::parse(&bytes)?;
    TypedRecord::from_message(message)
}

#[uniffi::export]
fn encode_ndef_message(items: Vec<NdefContent>) -> Result<Vec<u8>, EncodeError> {
    crate::content::create_message(items)?.to_bytes()
}

#[uniffi::export]
fn typed_record_display_value(record: TypedRecord) -> String {
    record.display_value().to_string()
}

#[uniffi::export]
fn typed_record_payload_hex(record: TypedRecord) -> String {
    record.payload_hex()
}
