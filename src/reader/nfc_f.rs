use std::sync::Arc;

use super::require;
use crate::{
    error::TagError, impl_reader_lifecycle, session::TechnologySession, tag::Tag,
    technology::NfcFTechnology,
};

type Result<T, E = TagError> = std::result::Result<T, E>;

/// JIS 6319-4 (FeliCa) discovery data
#[derive(Debug)]
pub struct NfcFReader {
    session: TechnologySession<dyn NfcFTechnology>,
    manufacturer: Option<Vec<u8>>,
    system_code: Option<Vec<u8>>,
}

impl_reader_lifecycle!(NfcFReader, NfcFTechnology);

impl NfcFReader {
    pub fn new(tag: Tag, technology: Arc<dyn NfcFTechnology>) -> Self {
        Self {
            session: TechnologySession::new(tag, technology),
            manufacturer: None,
            system_code: None,
        }
    }

    pub async fn manufacturer(&mut self) -> Result<Vec<u8>> {
        if let Some(manufacturer) = &self.manufacturer {
            return Ok(manufacturer.clone());
        }

        let technology = self.session.open_if_closed().await?;
        let manufacturer = require(technology.manufacturer().await, "manufacturer bytes")?;
        self.manufacturer = Some(manufacturer.clone());

        Ok(manufacturer)
    }

    pub async fn system_code(&mut self) -> Result<Vec<u8>> {
        if let Some(system_code) = &self.system_code {
            return Ok(system_code.clone());
        }

        let technology = self.session.open_if_closed().await?;
        let system_code = require(technology.system_code().await, "system code")?;
        self.system_code = Some(system_code.clone());

        Ok(system_code)
    }
}
