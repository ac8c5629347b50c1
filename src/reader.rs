//! One reader per radio technology, each holding a [`TechnologySession`](crate::session::TechnologySession)

pub mod barcode;
pub mod iso_dep;
pub mod mifare_classic;
pub mod mifare_ultralight;
pub mod ndef;
pub mod ndef_formatable;
pub mod nfc_a;
pub mod nfc_b;
pub mod nfc_f;
pub mod nfc_v;

pub use barcode::NfcBarcodeReader;
pub use iso_dep::IsoDepReader;
pub use mifare_classic::MifareClassicReader;
pub use mifare_ultralight::{MifareUltralightReader, UltralightLayout};
pub use ndef::NdefReader;
pub use ndef_formatable::NdefFormatableReader;
pub use nfc_a::NfcAReader;
pub use nfc_b::NfcBReader;
pub use nfc_f::NfcFReader;
pub use nfc_v::NfcVReader;

use tagwire_util::result_ext::ResultExt as _;

use crate::error::{TagError, TransportError};

/// Turn a primitive read into a value, a missing value is a device read failure
pub(crate) fn require<T>(
    read: Result<Option<T>, TransportError>,
    what: &str,
) -> Result<T, TagError> {
    read.map_err_str(TagError::DeviceRead)?
        .ok_or_else(|| TagError::device_read(format!("no {what} returned by the tag")))
}
