use std::sync::Arc;

use sleepmerge_core::SignalCodec;
use sleepmerge_types::{SignalFile, SignalHeader};

use crate::traits::RecordDecoder;

/// Decoder for files in the standard signal container, delegating to a codec.
#[derive(Clone)]
pub struct ContainerDecoder {
    codec: Arc<dyn SignalCodec>,
}

impl ContainerDecoder {
    pub fn new(codec: Arc<dyn SignalCodec>) -> Self {
        Self { codec }
    }
}

impl RecordDecoder for ContainerDecoder {
    fn decode_header(&self, bytes: &[u8]) -> Option<SignalHeader> {
        match self.codec.decode_header(bytes) {
            Ok(header) => Some(header),
            Err(err) => {
                tracing::debug!(error = %err, "Container header rejected");
                None
            }
        }
    }

    fn decode_file(
        &self,
        bytes: &[u8],
        on_progress: &mut dyn FnMut(usize, usize),
    ) -> Option<SignalFile> {
        let decoded = self.codec.decode(bytes);
        on_progress(1, 1);
        match decoded {
            Ok(file) => Some(file),
            Err(err) => {
                tracing::debug!(error = %err, "Container file rejected");
                None
            }
        }
    }
}
