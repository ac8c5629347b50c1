use std::sync::Arc;

use super::require;
use crate::{
    error::TagError, impl_reader_lifecycle, session::TechnologySession, tag::Tag,
    technology::NfcATechnology,
};

type Result<T, E = TagError> = std::result::Result<T, E>;

/// ISO 14443-3A discovery data, cached after the first successful read
#[derive(Debug)]
pub struct NfcAReader {
    session: TechnologySession<dyn NfcATechnology>,
    atqa: Option<Vec<u8>>,
    sak: Option<i16>,
}

impl_reader_lifecycle!(NfcAReader, NfcATechnology);

impl NfcAReader {
    pub fn new(tag: Tag, technology: Arc<dyn NfcATechnology>) -> Self {
        Self { session: TechnologySession::new(tag, technology), atqa: None, sak: None }
    }

    pub async fn atqa(&mut self) -> Result<Vec<u8>> {
        if let Some(atqa) = &self.atqa {
            return Ok(atqa.clone());
        }

        let technology = self.session.open_if_closed().await?;
        let atqa = require(technology.atqa().await, "atqa")?;
        self.atqa = Some(atqa.clone());

        Ok(atqa)
    }

    pub async fn sak(&mut self) -> Result<i16> {
        if let Some(sak) = self.sak {
            return Ok(sak);
        }

        let technology = self.session.open_if_closed().await?;
        let sak = require(technology.sak().await, "sak")?;
        self.sak = Some(sak);

        Ok(sak)
    }
}
