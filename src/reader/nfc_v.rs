use std::sync::Arc;

use super::require;
use crate::{
    error::TagError, impl_reader_lifecycle, session::TechnologySession, tag::Tag,
    technology::NfcVTechnology,
};

type Result<T, E = TagError> = std::result::Result<T, E>;

/// ISO 15693 discovery data
#[derive(Debug)]
pub struct NfcVReader {
    session: TechnologySession<dyn NfcVTechnology>,
    dsf_id: Option<i8>,
    response_flags: Option<i16>,
}

impl_reader_lifecycle!(NfcVReader, NfcVTechnology);

impl NfcVReader {
    pub fn new(tag: Tag, technology: Arc<dyn NfcVTechnology>) -> Self {
        Self { session: TechnologySession::new(tag, technology), dsf_id: None, response_flags: None }
    }

    pub async fn dsf_id(&mut self) -> Result<i8> {
        if let Some(dsf_id) = self.dsf_id {
            return Ok(dsf_id);
        }

        let technology = self.session.open_if_closed().await?;
        let dsf_id = require(technology.dsf_id().await, "dsf id")?;
        self.dsf_id = Some(dsf_id);

        Ok(dsf_id)
    }

    pub async fn response_flags(&mut self) -> Result<i16> {
        if let Some(flags) = self.response_flags {
            return Ok(flags);
        }

        let technology = self.session.open_if_closed().await?;
        let flags = require(technology.response_flags().await, "response flags")?;
        self.response_flags = Some(flags);

        Ok(flags)
    }
}
