use winnow::{
    ModalResult, Parser,
    binary::bits::{bits, bool as take_bool, take as take_bits},
    error::{ContextError, ErrMode},
    token::take,
};

use tracing::debug;

use crate::{
    NdefError,
    parser::stream::{self, Stream},
};

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct TextPayload {
    pub format: TextPayloadFormat,
    pub language: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum TextPayloadFormat {
    Utf8,
    Utf16,
}

/// URI prefix codes as defined in NFC Forum RTD URI specification
pub const URI_PREFIXES: &[&str] = &[
    "",                           // 0x00 - no prepending
    "http://www.",                // 0x01
    "https://www.",               // 0x02
    "http://",                    // 0x03
    "https://",                   // 0x04
    "tel:",                       // 0x05
    "mailto:",                    // 0x06
    "ftp://anonymous:anonymous@", // 0x07
    "ftp://ftp.",                 // 0x08
    "ftps://",                    // 0x09
    "sftp://",                    // 0x0A
    "smb://",                     // 0x0B
    "nfs://",                     // 0x0C
    "ftp://",                     // 0x0D
    "dav://",                     // 0x0E
    "news:",                      // 0x0F
    "telnet://",                  // 0x10
    "imap:",                      // 0x11
    "rtsp://",                    // 0x12
    "urn:",                       // 0x13
    "pop:",                       // 0x14
    "sip:",                       // 0x15
    "sips:",                      // 0x16
    "tftp:",                      // 0x17
    "btspp://",                   // 0x18
    "btl2cap://",                 // 0x19
    "btgoep://",                  // 0x1A
    "tcpobex://",                 // 0x1B
    "irdaobex://",                // 0x1C
    "file://",                    // 0x1D
    "urn:epc:id:",                // 0x1E
    "urn:epc:tag:",               // 0x1F
    "urn:epc:pat:",               // 0x20
    "urn:epc:raw:",               // 0x21
    "urn:epc:",                   // 0x22
    "urn:nfc:",                   // 0x23
];

impl TextPayload {
    /// Decode an RTD text payload: status byte, language code, text
    pub fn parse(payload: &[u8]) -> Result<Self, NdefError> {
        let Some(status) = payload.first() else {
            return Err(NdefError::InvalidText("missing status byte".into()));
        };

        let language_code_length = (status & 0x3F) as usize;
        if 1 + language_code_length > payload.len() {
            return Err(NdefError::InvalidText(format!(
                "language code of {language_code_length} bytes does not fit in {} byte payload",
                payload.len()
            )));
        }

        let text_length = payload.len() - 1 - language_code_length;
        let mut input = stream::new(payload);

        let (is_utf16, reserved, language_code, text) =
            parse_text_payload(&mut input, text_length)
                .map_err(|error| NdefError::InvalidText(format!("{error}")))?;

        if reserved {
            return Err(NdefError::InvalidText("reserved status bit is set".into()));
        }

        // odd lengths are rejected, utf-16 text must be whole code units
        if is_utf16 && text.len() % 2 != 0 {
            return Err(NdefError::InvalidText(format!(
                "utf-16 text has odd length {}",
                text.len()
            )));
        }

        let parsed_text = if is_utf16 {
            String::from_utf16_lossy(
                &text
                    .chunks_exact(2)
                    .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
                    .collect::<Vec<u16>>(),
            )
        } else {
            String::from_utf8_lossy(text).to_string()
        };

        Ok(Self {
            format: if is_utf16 { TextPayloadFormat::Utf16 } else { TextPayloadFormat::Utf8 },
            language: String::from_utf8_lossy(language_code).to_string(),
            text: parsed_text,
        })
    }

    /// Encode as UTF-8 with the given language code, an empty language leaves it unset
    pub fn encode(text: &str, language: &str) -> Result<Vec<u8>, NdefError> {
        let language = language.as_bytes();
        if language.len() > 0x3F {
            return Err(NdefError::InvalidText(format!(
                "language code too long: {} bytes",
                language.len()
            )));
        }

        let mut payload = Vec::with_capacity(1 + language.len() + text.len());
        payload.push(language.len() as u8);
        payload.extend_from_slice(language);
        payload.extend_from_slice(text.as_bytes());

        Ok(payload)
    }
}

fn parse_text_payload<'i>(
    input: &mut Stream<'i>,
    text_length: usize,
) -> ModalResult<(bool, bool, &'i [u8], &'i [u8])> {
    let (is_utf16, reserved, language_code_length): (bool, bool, u8) =
        bits::<_, _, ErrMode<ContextError>, _, _>((take_bool, take_bool, take_bits(6_u8)))
            .parse_next(input)?;

    let language_code = take(language_code_length as usize).parse_next(input)?;
    let text = take(text_length).parse_next(input)?;

    Ok((is_utf16, reserved, language_code, text))
}

/// Expand an RTD URI payload into the full URI
///
/// Reserved prefix codes expand to nothing and invalid UTF-8 is replaced, one odd
/// record never fails the message it sits in
pub fn decode_uri(payload: &[u8]) -> String {
    let Some((code, rest)) = payload.split_first() else {
        debug!("empty uri payload");
        return String::new();
    };

    let prefix = URI_PREFIXES.get(*code as usize).copied().unwrap_or_else(|| {
        debug!("reserved uri prefix code {code:#04x}, reading without prefix");
        ""
    });

    format!("{prefix}{}", String::from_utf8_lossy(rest))
}

/// Compress a URI into an RTD URI payload using the longest matching prefix
pub fn encode_uri(uri: &str) -> Vec<u8> {
    let (code, prefix) = URI_PREFIXES
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, prefix)| uri.starts_with(*prefix))
        .max_by_key(|(_, prefix)| prefix.len())
        .unwrap_or((0, &""));

    let rest = &uri.as_bytes()[prefix.len()..];

    let mut payload = Vec::with_capacity(1 + rest.len());
    payload.push(code as u8);
    payload.extend_from_slice(rest);
    payload
}
