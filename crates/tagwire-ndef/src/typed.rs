use tagwire_util::result_ext::ResultExt as _;
use tracing::debug;

use crate::{
    NdefError,
    message::NdefMessage,
    ndef_type::NdefType,
    payload::{self, TextPayload},
    record::NdefRecord,
};

/// The well known type code that is read as a URI record
pub const WELL_KNOWN_URI: &str = "U";

/// The well known type code for text records
pub const WELL_KNOWN_TEXT: &str = "T";

/// A record after type dispatch, decided once when the message is decoded
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum TypedRecord {
    Uri(UriRecord),
    Mime(MimeTypeRecord),
    WellKnown(WellKnownTypeRecord),
    External(ExternalTypeRecord),
}

/// Absolute URI record, or a well known record of type `U`
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct UriRecord {
    pub record: NdefRecord,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct MimeTypeRecord {
    pub record: NdefRecord,
    pub content_type: String,
}

/// Any well known record other than `U`, only text records get their payload decoded
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct WellKnownTypeRecord {
    pub record: NdefRecord,
    pub well_known_type: String,
    pub text: Option<TextPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct ExternalTypeRecord {
    pub record: NdefRecord,
    pub external_type: String,
}

type Result<T, E = NdefError> = std::result::Result<T, E>;

impl TypedRecord {
    /// Classify a raw record, `None` for records that carry no content
    pub fn classify(record: NdefRecord) -> Result<Option<Self>> {
        let typed = match record.tnf() {
            NdefType::AbsoluteUri => {
                let uri = String::from_utf8_lossy(&record.type_).to_string();
                Self::Uri(UriRecord { record, uri })
            }

            NdefType::Mime => {
                let content_type = String::from_utf8_lossy(&record.type_).to_string();
                Self::Mime(MimeTypeRecord {
                    record,
                    content_type,
                })
            }

            NdefType::WellKnown => {
                let well_known_type = std::str::from_utf8(&record.type_)
                    .map_err_str(NdefError::InvalidType)?
                    .to_string();

                if well_known_type == WELL_KNOWN_URI {
                    let uri = payload::decode_uri(&record.payload);
                    Self::Uri(UriRecord { record, uri })
                } else {
                    let text = match well_known_type.as_str() {
                        WELL_KNOWN_TEXT => TextPayload::parse(&record.payload)
                            .inspect_err(|error| debug!("unreadable text record: {error}"))
                            .ok(),
                        _ => None,
                    };

                    Self::WellKnown(WellKnownTypeRecord {
                        record,
                        well_known_type,
                        text,
                    })
                }
            }

            NdefType::External => {
                let external_type = String::from_utf8_lossy(&record.type_).to_string();
                Self::External(ExternalTypeRecord {
                    record,
                    external_type,
                })
            }

            tnf @ (NdefType::Empty
            | NdefType::Unknown
            | NdefType::Unchanged
            | NdefType::Reserved) => {
                debug!("dropping record with type name format {tnf:?}");
                return Ok(None);
            }
        };

        Ok(Some(typed))
    }

    /// Classify every record of a message, keeping order and dropping empty ones
    pub fn from_message(message: NdefMessage) -> Result<Vec<Self>> {
        let mut typed = Vec::with_capacity(message.len());

        for record in message {
            if let Some(record) = Self::classify(record)? {
                typed.push(record);
            }
        }

        Ok(typed)
    }

    pub fn record(&self) -> &NdefRecord {
        match self {
            Self::Uri(uri) => &uri.record,
            Self::Mime(mime) => &mime.record,
            Self::WellKnown(well_known) => &well_known.record,
            Self::External(external) => &external.record,
        }
    }

    pub fn uri(&self) -> Option<&str> {
        match self {
            Self::Uri(uri) => Some(&uri.uri),
            _ => None,
        }
    }

    /// Short human readable value for lists and history views
    pub fn display_value(&self) -> &str {
        match self {
            Self::Uri(uri) => &uri.uri,
            Self::Mime(mime) => &mime.content_type,
            Self::WellKnown(well_known) => well_known
                .text
                .as_ref()
                .map(|text| text.text.as_str())
                .unwrap_or(well_known.well_known_type.as_str()),
            Self::External(external) => &external.external_type,
        }
    }

    pub fn payload_hex(&self) -> String {
        hex::encode_upper(&self.record().payload)
    }
}

impl MimeTypeRecord {
    pub fn data(&self) -> &[u8] {
        &self.record.payload
    }
}

impl ExternalTypeRecord {
    pub fn data(&self) -> &[u8] {
        &self.record.payload
    }
}
