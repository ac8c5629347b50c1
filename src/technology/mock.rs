use std::{
    collections::VecDeque,
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::*;

/// Scriptable technology that records every call made against it
#[derive(Debug)]
pub struct MockTechnology {
    pub kind: TechnologyKind,
    pub connected: AtomicBool,
    pub fail_connect: AtomicBool,
    pub fail_close: AtomicBool,
    pub connect_calls: AtomicUsize,
    pub close_calls: AtomicUsize,
    pub dispose_calls: AtomicUsize,
    pub events: Mutex<Vec<&'static str>>,

    // mifare classic
    pub blocks: Mutex<Vec<Option<Vec<u8>>>>,

    // mifare ultralight
    pub ultralight_type: UltralightType,
    pub memory: Mutex<Vec<u8>>,
    pub bytes_per_read: usize,
    pub page_reads: Mutex<Vec<u32>>,

    // iso-dep
    pub responses: Mutex<VecDeque<Option<Vec<u8>>>>,
    pub commands: Mutex<Vec<Vec<u8>>>,
    pub hi_layer_response: Option<Vec<u8>>,
    pub historical_bytes: Option<Vec<u8>>,

    // discovery metadata
    pub metadata: Option<Vec<u8>>,
    pub sak: Option<i16>,
    pub dsf_id: Option<i8>,
    pub barcode_type: Option<BarcodeType>,
    pub metadata_reads: AtomicUsize,

    // ndef
    pub ndef_message: Option<Vec<u8>>,
    pub written: Mutex<Vec<Vec<u8>>>,
    pub fail_write: AtomicBool,
    pub writable: bool,
    pub max_size: Option<u32>,
    pub formatted: Mutex<Vec<(bool, Vec<u8>)>>,
}

impl MockTechnology {
    pub fn new(kind: TechnologyKind) -> Self {
        Self {
            kind,
            connected: AtomicBool::new(false),
            fail_connect: AtomicBool::new(false),
            fail_close: AtomicBool::new(false),
            connect_calls: AtomicUsize::new(0),
            close_calls: AtomicUsize::new(0),
            dispose_calls: AtomicUsize::new(0),
            events: Mutex::new(Vec::new()),
            blocks: Mutex::new(Vec::new()),
            ultralight_type: UltralightType::Ultralight,
            memory: Mutex::new(Vec::new()),
            bytes_per_read: 16,
            page_reads: Mutex::new(Vec::new()),
            responses: Mutex::new(VecDeque::new()),
            commands: Mutex::new(Vec::new()),
            hi_layer_response: None,
            historical_bytes: None,
            metadata: None,
            sak: None,
            dsf_id: None,
            barcode_type: None,
            metadata_reads: AtomicUsize::new(0),
            ndef_message: None,
            written: Mutex::new(Vec::new()),
            fail_write: AtomicBool::new(false),
            writable: true,
            max_size: None,
            formatted: Mutex::new(Vec::new()),
        }
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn metadata_read<T: Clone>(&self, value: &Option<T>) -> Result<Option<T>> {
        self.metadata_reads.fetch_add(1, Ordering::SeqCst);
        Ok(value.clone())
    }
}

#[async_trait]
impl Technology for MockTechnology {
    fn kind(&self) -> TechnologyKind {
        self.kind
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn connect(&self) -> Result<()> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        self.events.lock().push("connect");
        if self.fail_connect.load(Ordering::SeqCst) {
            return Err(TransportError::Io("connect refused".into()));
        }

        self.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        self.events.lock().push("close");
        if self.fail_close.load(Ordering::SeqCst) {
            return Err(TransportError::TagLost);
        }

        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn dispose(&self) {
        self.dispose_calls.fetch_add(1, Ordering::SeqCst);
        self.events.lock().push("dispose");
    }
}

#[async_trait]
impl MifareClassicTechnology for MockTechnology {
    fn block_count(&self) -> u32 {
        self.blocks.lock().len() as u32
    }

    async fn read_block(&self, index: u32) -> Result<Option<Vec<u8>>> {
        Ok(self.blocks.lock().get(index as usize).cloned().flatten())
    }
}

#[async_trait]
impl MifareUltralightTechnology for MockTechnology {
    fn ultralight_type(&self) -> UltralightType {
        self.ultralight_type
    }

    async fn read_pages(&self, page_offset: u32) -> Result<Option<Vec<u8>>> {
        self.page_reads.lock().push(page_offset);

        let memory = self.memory.lock();
        let start = page_offset as usize * 4;
        if start >= memory.len() {
            return Ok(None);
        }

        let end = (start + self.bytes_per_read).min(memory.len());
        Ok(Some(memory[start..end].to_vec()))
    }
}

#[async_trait]
impl IsoDepTechnology for MockTechnology {
    async fn hi_layer_response(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.hi_layer_response.clone())
    }

    async fn historical_bytes(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.historical_bytes.clone())
    }

    async fn transceive(&self, command: Vec<u8>) -> Result<Option<Vec<u8>>> {
        self.commands.lock().push(command);
        Ok(self.responses.lock().pop_front().flatten())
    }
}

#[async_trait]
impl NfcATechnology for MockTechnology {
    async fn atqa(&self) -> Result<Option<Vec<u8>>> {
        self.metadata_read(&self.metadata)
    }

    async fn sak(&self) -> Result<Option<i16>> {
        self.metadata_read(&self.sak)
    }
}

#[async_trait]
impl NfcBTechnology for MockTechnology {
    async fn application_data(&self) -> Result<Option<Vec<u8>>> {
        self.metadata_read(&self.metadata)
    }

    async fn protocol_info(&self) -> Result<Option<Vec<u8>>> {
        self.metadata_read(&self.metadata)
    }
}

#[async_trait]
impl NfcFTechnology for MockTechnology {
    async fn manufacturer(&self) -> Result<Option<Vec<u8>>> {
        self.metadata_read(&self.metadata)
    }

    async fn system_code(&self) -> Result<Option<Vec<u8>>> {
        self.metadata_read(&self.metadata)
    }
}

#[async_trait]
impl NfcVTechnology for MockTechnology {
    async fn dsf_id(&self) -> Result<Option<i8>> {
        self.metadata_read(&self.dsf_id)
    }

    async fn response_flags(&self) -> Result<Option<i16>> {
        self.metadata_read(&self.sak)
    }
}

#[async_trait]
impl NfcBarcodeTechnology for MockTechnology {
    async fn barcode(&self) -> Result<Option<Vec<u8>>> {
        self.metadata_read(&self.metadata)
    }

    async fn barcode_type(&self) -> Result<Option<BarcodeType>> {
        self.metadata_read(&self.barcode_type)
    }
}

#[async_trait]
impl NdefTechnology for MockTechnology {
    async fn ndef_message(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.ndef_message.clone())
    }

    async fn write_ndef_message(&self, message: Vec<u8>) -> Result<()> {
        if self.fail_write.load(Ordering::SeqCst) {
            return Err(TransportError::TagLost);
        }

        self.written.lock().push(message);
        Ok(())
    }

    fn is_writable(&self) -> bool {
        self.writable
    }

    fn can_make_read_only(&self) -> bool {
        self.writable
    }

    async fn make_read_only(&self) -> Result<bool> {
        if self.fail_write.load(Ordering::SeqCst) {
            return Err(TransportError::Io("lock bit write failed".into()));
        }

        Ok(self.writable)
    }

    fn max_size(&self) -> Option<u32> {
        self.max_size
    }
}

#[async_trait]
impl NdefFormatableTechnology for MockTechnology {
    async fn format(&self, message: Vec<u8>) -> Result<()> {
        if self.fail_write.load(Ordering::SeqCst) {
            return Err(TransportError::Io("format failed".into()));
        }

        self.formatted.lock().push((false, message));
        Ok(())
    }

    async fn format_read_only(&self, message: Vec<u8>) -> Result<()> {
        if self.fail_write.load(Ordering::SeqCst) {
            return Err(TransportError::Io("format failed".into()));
        }

        self.formatted.lock().push((true, message));
        Ok(())
    }
}
