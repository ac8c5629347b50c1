use tagwire_util::result_ext::ResultExt as _;
use url::Url;

use crate::{
    EncodeError,
    message::NdefMessage,
    ndef_type::NdefType,
    payload::{self, TextPayload},
    record::NdefRecord,
    typed::{WELL_KNOWN_TEXT, WELL_KNOWN_URI},
};

/// Content that maps directly onto one NDEF record
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum NdefContent {
    /// Must be absolute, written as a well known `U` record
    Uri { uri: String },

    /// Written as a UTF-8 well known `T` record without a language code
    Text { text: String },

    /// Pre-encoded data with its MIME type
    Mime { data: Vec<u8>, mime_type: String },
}

type Result<T, E = EncodeError> = std::result::Result<T, E>;

impl NdefContent {
    pub fn into_record(self) -> Result<NdefRecord> {
        match self {
            Self::Uri { uri } => {
                ensure_absolute(&uri)?;

                Ok(NdefRecord::new(
                    NdefType::WellKnown,
                    WELL_KNOWN_URI.as_bytes().to_vec(),
                    None,
                    payload::encode_uri(&uri),
                ))
            }

            Self::Text { text } => {
                let payload = TextPayload::encode(&text, "")
                    .map_err_str(EncodeError::InvalidText)?;

                Ok(NdefRecord::new(
                    NdefType::WellKnown,
                    WELL_KNOWN_TEXT.as_bytes().to_vec(),
                    None,
                    payload,
                ))
            }

            Self::Mime { data, mime_type } => {
                let mime_type = mime_type.trim();
                if mime_type.is_empty() {
                    return Err(EncodeError::EmptyMimeType);
                }

                Ok(NdefRecord::new(
                    NdefType::Mime,
                    mime_type.as_bytes().to_vec(),
                    None,
                    data,
                ))
            }
        }
    }
}

/// Build a message from content, the first failing item fails the whole message
pub fn create_message(items: impl IntoIterator<Item = NdefContent>) -> Result<NdefMessage> {
    let records = items
        .into_iter()
        .map(NdefContent::into_record)
        .collect::<Result<Vec<_>>>()?;

    Ok(NdefMessage::new(records))
}

fn ensure_absolute(uri: &str) -> Result<()> {
    match Url::parse(uri) {
        Ok(_) => Ok(()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Err(EncodeError::NonAbsoluteUri(uri.to_string()))
        }
        Err(error) => Err(EncodeError::InvalidUri(format!("{uri}: {error}"))),
    }
}
