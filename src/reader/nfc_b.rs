use std::sync::Arc;

use super::require;
use crate::{
    error::TagError, impl_reader_lifecycle, session::TechnologySession, tag::Tag,
    technology::NfcBTechnology,
};

type Result<T, E = TagError> = std::result::Result<T, E>;

/// ISO 14443-3B discovery data
#[derive(Debug)]
pub struct NfcBReader {
    session: TechnologySession<dyn NfcBTechnology>,
    application_data: Option<Vec<u8>>,
    protocol_info: Option<Vec<u8>>,
}

impl_reader_lifecycle!(NfcBReader, NfcBTechnology);

impl NfcBReader {
    pub fn new(tag: Tag, technology: Arc<dyn NfcBTechnology>) -> Self {
        Self {
            session: TechnologySession::new(tag, technology),
            application_data: None,
            protocol_info: None,
        }
    }

    pub async fn application_data(&mut self) -> Result<Vec<u8>> {
        if let Some(data) = &self.application_data {
            return Ok(data.clone());
        }

        let technology = self.session.open_if_closed().await?;
        let data = require(technology.application_data().await, "application data")?;
        self.application_data = Some(data.clone());

        Ok(data)
    }

    pub async fn protocol_info(&mut self) -> Result<Vec<u8>> {
        if let Some(info) = &self.protocol_info {
            return Ok(info.clone());
        }

        let technology = self.session.open_if_closed().await?;
        let info = require(technology.protocol_info().await, "protocol info")?;
        self.protocol_info = Some(info.clone());

        Ok(info)
    }
}
