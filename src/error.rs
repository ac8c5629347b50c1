use tagwire_ndef::{EncodeError, NdefError};

/// Errors surfaced by sessions and readers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum TagError {
    /// A read returned nothing, the wrong amount, or data that could not be decoded
    ///
    /// Tag removal shows up as this error, the radio layer can not tell it apart from
    /// a corrupt or unsupported read
    #[error("unable to read data from device: {0}")]
    DeviceRead(String),

    /// Connecting to or closing the technology failed
    #[error("i/o error communicating with the tag: {0}")]
    Io(String),

    /// An ISO 7816 command returned a status word other than 90 00
    #[error("command failed with status word {sw1:02X}{sw2:02X}")]
    Status { sw1: u8, sw2: u8 },

    #[error("technology session has been disposed")]
    SessionDisposed,
}

impl TagError {
    pub(crate) fn device_read(reason: impl Into<String>) -> Self {
        Self::DeviceRead(reason.into())
    }
}

impl From<NdefError> for TagError {
    fn from(error: NdefError) -> Self {
        Self::DeviceRead(error.to_string())
    }
}

/// Failure reported by the host platform's technology implementation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("tag is no longer in the field")]
    TagLost,

    #[error("{0}")]
    Io(String),
}

/// Why a write was abandoned, logged then reported to callers as `false`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WriteError {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Tag(#[from] TagError),

    #[error("message of {size} bytes does not fit in {capacity} bytes")]
    TooLarge { size: usize, capacity: u32 },

    #[error("tag rejected the write: {0}")]
    Transport(#[from] TransportError),
}
