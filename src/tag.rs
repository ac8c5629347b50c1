use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

/// Radio technologies a discovered tag can be driven through
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display, uniffi::Enum,
)]
pub enum TechnologyKind {
    #[strum(to_string = "ISO-DEP")]
    IsoDep,
    #[strum(to_string = "MIFARE Classic")]
    MifareClassic,
    #[strum(to_string = "MIFARE Ultralight")]
    MifareUltralight,
    #[strum(to_string = "NFC-A")]
    NfcA,
    #[strum(to_string = "NFC-B")]
    NfcB,
    #[strum(to_string = "NFC-F")]
    NfcF,
    #[strum(to_string = "NFC-V")]
    NfcV,
    #[strum(to_string = "NFC Barcode")]
    NfcBarcode,
    #[strum(to_string = "NDEF")]
    Ndef,
    #[strum(to_string = "NDEF Formatable")]
    NdefFormatable,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Presence {
    InField,
    Lost,
}

/// Handle to one physical tag while it stays in the field
///
/// Clones share presence, so marking one clone lost fails every session opened
/// on the same tag
#[derive(Debug, Clone)]
pub struct Tag(Arc<TagInner>);

#[derive(Debug)]
struct TagInner {
    id: Vec<u8>,
    technologies: Vec<TechnologyKind>,
    presence: RwLock<Presence>,
}

impl Tag {
    pub fn new(id: Vec<u8>, technologies: Vec<TechnologyKind>) -> Self {
        Self(Arc::new(TagInner {
            id,
            technologies,
            presence: RwLock::new(Presence::InField),
        }))
    }

    pub fn id(&self) -> &[u8] {
        &self.0.id
    }

    pub fn id_hex(&self) -> String {
        tagwire_util::hex_upper(&self.0.id)
    }

    pub fn technologies(&self) -> &[TechnologyKind] {
        &self.0.technologies
    }

    pub fn supports(&self, kind: TechnologyKind) -> bool {
        self.0.technologies.contains(&kind)
    }

    /// Comma separated technology names, e.g. `NFC-A, MIFARE Ultralight, NDEF`
    pub fn technologies_summary(&self) -> String {
        self.0
            .technologies
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn is_present(&self) -> bool {
        *self.0.presence.read() == Presence::InField
    }

    /// Called by the host when the tag leaves the field
    pub fn mark_lost(&self) {
        let mut presence = self.0.presence.write();
        if *presence == Presence::InField {
            debug!("tag {} left the field", self.id_hex());
            *presence = Presence::Lost;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_presence() {
        let tag = Tag::new(vec![0x04, 0xA1], vec![TechnologyKind::NfcA]);
        let other = tag.clone();

        assert!(other.is_present());
        tag.mark_lost();
        assert!(!other.is_present());
    }

    #[test]
    fn summary_and_hex_id() {
        let tag = Tag::new(
            vec![0x04, 0xa1, 0x0f],
            vec![TechnologyKind::NfcA, TechnologyKind::MifareUltralight, TechnologyKind::Ndef],
        );

        assert_eq!(tag.id_hex(), "04A10F");
        assert_eq!(tag.technologies_summary(), "NFC-A, MIFARE Ultralight, NDEF");
        assert!(tag.supports(TechnologyKind::Ndef));
        assert!(!tag.supports(TechnologyKind::IsoDep));
    }
}
