pub mod consts;
pub mod content;
pub mod error;
pub mod logging;
pub mod reader;
pub mod session;
pub mod tag;
pub mod technology;

pub(crate) mod macros;

pub use tagwire_ndef as ndef;

pub use content::{ContentEncoder, ContentEncoderRegistry, EncodedContent, WritableItem};
pub use error::{TagError, TransportError, WriteError};
pub use session::{SessionState, TechnologySession};
pub use tag::{Tag, TechnologyKind};

uniffi::setup_scaffolding!();
