use std::sync::Arc;

use tracing::debug;

use super::require;
use crate::{
    consts::BYTES_PER_BLOCK, error::TagError, impl_reader_lifecycle, session::TechnologySession,
    tag::Tag, technology::MifareClassicTechnology,
};

type Result<T, E = TagError> = std::result::Result<T, E>;

#[derive(Debug)]
pub struct MifareClassicReader {
    session: TechnologySession<dyn MifareClassicTechnology>,
}

impl_reader_lifecycle!(MifareClassicReader, MifareClassicTechnology);

impl MifareClassicReader {
    pub fn new(tag: Tag, technology: Arc<dyn MifareClassicTechnology>) -> Self {
        Self { session: TechnologySession::new(tag, technology) }
    }

    pub async fn block_count(&mut self) -> Result<u32> {
        Ok(self.session.open_if_closed().await?.block_count())
    }

    /// Read one block, anything other than exactly 16 bytes fails
    pub async fn read_block(&mut self, index: u32) -> Result<Vec<u8>> {
        let technology = self.session.open_if_closed().await?;
        let block = require(technology.read_block(index).await, "block")?;

        if block.len() != BYTES_PER_BLOCK {
            return Err(TagError::device_read(format!(
                "block {index} is {} bytes, expected {BYTES_PER_BLOCK}",
                block.len()
            )));
        }

        Ok(block)
    }

    /// Every block in index order
    pub async fn read_all_data(&mut self) -> Result<Vec<u8>> {
        let block_count = self.block_count().await?;
        let mut data = Vec::with_capacity(block_count as usize * BYTES_PER_BLOCK);

        for index in 0..block_count {
            let block = self.read_block(index).await?;
            data.extend_from_slice(&block);
        }

        debug!("read {block_count} mifare classic blocks");
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{tag::TechnologyKind, technology::mock::MockTechnology};

    fn reader(blocks: Vec<Option<Vec<u8>>>) -> MifareClassicReader {
        let mock = MockTechnology::new(TechnologyKind::MifareClassic);
        *mock.blocks.lock() = blocks;

        let tag = Tag::new(vec![0xDE, 0xAD], vec![TechnologyKind::MifareClassic]);
        MifareClassicReader::new(tag, Arc::new(mock))
    }

    #[tokio::test]
    async fn reads_blocks_in_order() {
        let mut reader = reader((0..4u8).map(|i| Some(vec![i; 16])).collect());

        let data = reader.read_all_data().await.unwrap();

        assert_eq!(data.len(), 64);
        assert_eq!(&data[16..32], &[1u8; 16]);
        assert_eq!(data[63], 3);
        reader.dispose().await;
    }

    #[tokio::test]
    async fn short_block_is_a_device_read_error() {
        let mut reader = reader(vec![Some(vec![0; 16]), Some(vec![0; 15])]);

        let error = reader.read_all_data().await.unwrap_err();

        assert!(matches!(error, TagError::DeviceRead(reason) if reason.contains("15 bytes")));
        reader.dispose().await;
    }

    #[tokio::test]
    async fn missing_block_is_a_device_read_error() {
        let mut reader = reader(vec![None]);

        let error = reader.read_block(0).await.unwrap_err();

        assert!(matches!(error, TagError::DeviceRead(_)));
        reader.dispose().await;
    }
}
