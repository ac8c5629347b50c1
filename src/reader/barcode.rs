use std::sync::Arc;

use super::require;
use crate::{
    error::TagError,
    impl_reader_lifecycle,
    session::TechnologySession,
    tag::Tag,
    technology::{BarcodeType, NfcBarcodeTechnology},
};

type Result<T, E = TagError> = std::result::Result<T, E>;

#[derive(Debug)]
pub struct NfcBarcodeReader {
    session: TechnologySession<dyn NfcBarcodeTechnology>,
    barcode: Option<Vec<u8>>,
    barcode_type: Option<BarcodeType>,
}

impl_reader_lifecycle!(NfcBarcodeReader, NfcBarcodeTechnology);

impl NfcBarcodeReader {
    pub fn new(tag: Tag, technology: Arc<dyn NfcBarcodeTechnology>) -> Self {
        Self { session: TechnologySession::new(tag, technology), barcode: None, barcode_type: None }
    }

    pub async fn barcode(&mut self) -> Result<Vec<u8>> {
        if let Some(barcode) = &self.barcode {
            return Ok(barcode.clone());
        }

        let technology = self.session.open_if_closed().await?;
        let barcode = require(technology.barcode().await, "barcode")?;
        self.barcode = Some(barcode.clone());

        Ok(barcode)
    }

    pub async fn barcode_type(&mut self) -> Result<BarcodeType> {
        if let Some(barcode_type) = self.barcode_type {
            return Ok(barcode_type);
        }

        let technology = self.session.open_if_closed().await?;
        let barcode_type = require(technology.barcode_type().await, "barcode type")?;
        self.barcode_type = Some(barcode_type);

        Ok(barcode_type)
    }
}
