//! ISO 14443-4 reader with a few ISO 7816-4 commands on top of raw transceive
//!
//! ```text
//! command:  | CLA | INS | P1 | P2 | Lc | data | Le |
//! response: | data | SW1 | SW2 |
//! ```

use std::sync::Arc;

use tracing::{debug, warn};

use super::require;
use crate::{
    consts::SW_SUCCESS, error::TagError, impl_reader_lifecycle, session::TechnologySession,
    tag::Tag, technology::IsoDepTechnology,
};

type Result<T, E = TagError> = std::result::Result<T, E>;

const INS_SELECT: u8 = 0xA4;
const INS_GET_CHALLENGE: u8 = 0x84;
const INS_EXTERNAL_AUTHENTICATE: u8 = 0x82;

/// Challenge length used by GET CHALLENGE
pub const CHALLENGE_LENGTH: u8 = 8;

/// Short ISO 7816-4 command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Apdu {
    pub cla: u8,
    pub ins: u8,
    pub p1: u8,
    pub p2: u8,
    pub data: Vec<u8>,
    pub le: Option<u8>,
}

impl Apdu {
    pub const MAX_SHORT_DATA: usize = 255;

    pub fn new(ins: u8, p1: u8, p2: u8, data: Vec<u8>) -> Self {
        Self { cla: 0x00, ins, p1, p2, data, le: None }
    }

    pub fn with_le(mut self, le: u8) -> Self {
        self.le = Some(le);
        self
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.data.len() > Self::MAX_SHORT_DATA {
            return Err(TagError::Io(format!(
                "command data of {} bytes does not fit a short apdu",
                self.data.len()
            )));
        }

        let mut bytes = Vec::with_capacity(6 + self.data.len());
        bytes.extend([self.cla, self.ins, self.p1, self.p2]);

        if !self.data.is_empty() {
            bytes.push(self.data.len() as u8);
            bytes.extend_from_slice(&self.data);
        }

        if let Some(le) = self.le {
            bytes.push(le);
        }

        Ok(bytes)
    }
}

/// Split a response into its data and status word, failing on anything but `90 00`
pub fn check_response(mut response: Vec<u8>) -> Result<Vec<u8>> {
    if response.len() < 2 {
        return Err(TagError::device_read(format!(
            "response of {} bytes has no status word",
            response.len()
        )));
    }

    let status = response.split_off(response.len() - 2);
    let (sw1, sw2) = (status[0], status[1]);

    if (sw1, sw2) != SW_SUCCESS {
        warn!("command failed with status {sw1:02X}{sw2:02X}");
        return Err(TagError::Status { sw1, sw2 });
    }

    Ok(response)
}

#[derive(Debug)]
pub struct IsoDepReader {
    session: TechnologySession<dyn IsoDepTechnology>,
}

impl_reader_lifecycle!(IsoDepReader, IsoDepTechnology);

impl IsoDepReader {
    pub fn new(tag: Tag, technology: Arc<dyn IsoDepTechnology>) -> Self {
        Self { session: TechnologySession::new(tag, technology) }
    }

    /// Higher layer response from ATTRIB, NFC-B only
    pub async fn hi_layer_response(&mut self) -> Result<Vec<u8>> {
        let technology = self.session.open_if_closed().await?;
        require(technology.hi_layer_response().await, "higher layer response")
    }

    /// Historical bytes from the ATS, NFC-A only
    pub async fn historical_bytes(&mut self) -> Result<Vec<u8>> {
        let technology = self.session.open_if_closed().await?;
        require(technology.historical_bytes().await, "historical bytes")
    }

    /// Send raw command bytes, returning the raw response including the status word
    pub async fn execute_command(&mut self, command: Vec<u8>) -> Result<Vec<u8>> {
        let technology = self.session.open_if_closed().await?;
        require(technology.transceive(command).await, "command response")
    }

    /// Send an APDU and return its response data once the status word is checked
    pub async fn send(&mut self, apdu: &Apdu) -> Result<Vec<u8>> {
        debug!("sending apdu ins {:02X}", apdu.ins);
        let response = self.execute_command(apdu.to_bytes()?).await?;
        check_response(response)
    }

    pub async fn select_application(&mut self, aid: &[u8]) -> Result<Vec<u8>> {
        let apdu = Apdu::new(INS_SELECT, 0x04, 0x00, aid.to_vec()).with_le(0x00);
        self.send(&apdu).await
    }

    pub async fn get_challenge(&mut self) -> Result<Vec<u8>> {
        let apdu = Apdu::new(INS_GET_CHALLENGE, 0x00, 0x00, Vec::new()).with_le(CHALLENGE_LENGTH);
        let challenge = self.send(&apdu).await?;

        if challenge.len() != CHALLENGE_LENGTH as usize {
            return Err(TagError::device_read(format!(
                "challenge is {} bytes, expected {CHALLENGE_LENGTH}",
                challenge.len()
            )));
        }

        Ok(challenge)
    }

    /// EXTERNAL AUTHENTICATE with the host's cryptogram, returns the card's cryptogram
    pub async fn external_authenticate(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        let le = u8::try_from(data.len()).unwrap_or(0x00);
        let apdu = Apdu::new(INS_EXTERNAL_AUTHENTICATE, 0x00, 0x00, data.to_vec()).with_le(le);
        self.send(&apdu).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{tag::TechnologyKind, technology::mock::MockTechnology};

    fn reader(responses: Vec<Option<Vec<u8>>>) -> (Arc<MockTechnology>, IsoDepReader) {
        let mut mock = MockTechnology::new(TechnologyKind::IsoDep);
        mock.historical_bytes = Some(vec![0x80, 0x73]);
        *mock.responses.lock() = responses.into();
        let mock = Arc::new(mock);

        let tag = Tag::new(vec![0x08, 0x12, 0x34, 0x56], vec![TechnologyKind::IsoDep]);
        (mock.clone(), IsoDepReader::new(tag, mock))
    }

    #[test]
    fn apdu_layout() {
        let select = Apdu::new(0xA4, 0x04, 0x00, vec![0xA0, 0x00, 0x00, 0x02, 0x47, 0x10, 0x01])
            .with_le(0x00);
        assert_eq!(
            select.to_bytes().unwrap(),
            vec![0x00, 0xA4, 0x04, 0x00, 0x07, 0xA0, 0x00, 0x00, 0x02, 0x47, 0x10, 0x01, 0x00]
        );

        let challenge = Apdu::new(0x84, 0x00, 0x00, vec![]).with_le(8);
        assert_eq!(challenge.to_bytes().unwrap(), vec![0x00, 0x84, 0x00, 0x00, 0x08]);
    }

    #[tokio::test]
    async fn pass_through_reads() {
        let (_mock, mut reader) = reader(vec![]);

        assert_eq!(reader.historical_bytes().await.unwrap(), vec![0x80, 0x73]);
        assert!(matches!(reader.hi_layer_response().await, Err(TagError::DeviceRead(_))));
        reader.dispose().await;
    }

    #[tokio::test]
    async fn missing_response_is_a_device_read_error() {
        let (mock, mut reader) = reader(vec![None]);

        let error = reader.execute_command(vec![0x00, 0xB0, 0x00, 0x00]).await.unwrap_err();

        assert!(matches!(error, TagError::DeviceRead(_)));
        assert_eq!(mock.commands.lock().len(), 1);
        reader.dispose().await;
    }

    #[tokio::test]
    async fn get_challenge_strips_status_word() {
        let challenge = vec![1, 2, 3, 4, 5, 6, 7, 8];
        let mut response = challenge.clone();
        response.extend([0x90, 0x00]);
        let (mock, mut reader) = reader(vec![Some(response)]);

        assert_eq!(reader.get_challenge().await.unwrap(), challenge);
        assert_eq!(mock.commands.lock()[0], vec![0x00, 0x84, 0x00, 0x00, 0x08]);
        reader.dispose().await;
    }

    #[tokio::test]
    async fn failed_status_word_is_reported() {
        let (_mock, mut reader) = reader(vec![Some(vec![0x6A, 0x82])]);

        let error = reader.select_application(&[0xA0, 0x00]).await.unwrap_err();

        assert_eq!(error, TagError::Status { sw1: 0x6A, sw2: 0x82 });
        reader.dispose().await;
    }

    #[tokio::test]
    async fn external_authenticate_sends_cryptogram() {
        let (mock, mut reader) = reader(vec![Some(vec![0xAA, 0xBB, 0x90, 0x00])]);

        let response = reader.external_authenticate(&[0x11; 4]).await.unwrap();

        assert_eq!(response, vec![0xAA, 0xBB]);
        assert_eq!(
            mock.commands.lock()[0],
            vec![0x00, 0x82, 0x00, 0x00, 0x04, 0x11, 0x11, 0x11, 0x11, 0x04]
        );
        reader.dispose().await;
    }
}
