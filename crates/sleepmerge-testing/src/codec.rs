//! JSON-backed [`SignalCodec`] for tests.
//!
//! Real container encoding is an external collaborator; tests store decoded
//! files as JSON so fixtures stay readable and exact.

use anyhow::{Context, Result};
use serde::Deserialize;
use sleepmerge_core::SignalCodec;
use sleepmerge_types::{SignalFile, SignalHeader};

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[derive(Deserialize)]
struct HeaderOnly {
    header: SignalHeader,
}

impl SignalCodec for JsonCodec {
    fn decode_header(&self, bytes: &[u8]) -> Result<SignalHeader> {
        let parsed: HeaderOnly =
            serde_json::from_slice(bytes).context("Failed to parse signal header")?;
        Ok(parsed.header)
    }

    fn decode(&self, bytes: &[u8]) -> Result<SignalFile> {
        serde_json::from_slice(bytes).context("Failed to parse signal file")
    }

    fn encode(&self, file: &SignalFile) -> Result<Vec<u8>> {
        serde_json::to_vec(file).context("Failed to encode signal file")
    }
}
